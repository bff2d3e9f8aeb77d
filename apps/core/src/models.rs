use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Supported response locales.
///
/// Unknown locale tags map to [`Locale::En`], the default, rather than failing;
/// the UI layer owns locale selection and the backend must stay permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default locale, fallback for all others).
    #[default]
    En,
    /// Hindi.
    Hi,
    /// Tamil.
    Ta,
    /// Bengali.
    Bn,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Hi, Locale::Ta, Locale::Bn];

    /// Parses a locale tag such as `"bn"` or `"hi-IN"`. Unknown tags map to the default.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "hi" => Locale::Hi,
            "ta" => Locale::Ta,
            "bn" => Locale::Bn,
            _ => Locale::En,
        }
    }

    /// Returns the primary subtag for this locale.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
            Locale::Ta => "ta",
            Locale::Bn => "bn",
        }
    }
}

/// Distress tier assigned to a message, totally ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// No distress signals detected.
    None,
    /// Hopelessness, anxiety or loneliness signals.
    Moderate,
    /// Self-harm or suicide signals.
    High,
}

/// An inbound chat message. Immutable once received.
#[derive(Debug, Clone)]
pub struct UserMessage {
    /// Free text as submitted by the user.
    pub text: String,
    /// Locale for response selection (already defaulted if the tag was unknown).
    pub locale: Locale,
    /// Opaque originating identity; may be an anonymous id.
    pub identity: String,
}

/// The normalized response shape produced for every request, whether the
/// external generator answered or the response was synthesized locally.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResponse {
    /// Response text shown to the user.
    pub text: String,
    /// Whether distress signals were detected in the user's message.
    pub distress_detected: bool,
    /// Whether the generator used retrieved knowledge context.
    pub context_used: bool,
    /// Topics from the knowledge base that informed the response, in relevance order.
    pub relevant_topics: Vec<String>,
    /// True when the response was synthesized locally because the generator
    /// was degraded or absent.
    pub degraded: bool,
}

/// A persisted chat history row. Append-only, keyed by identity.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ChatEntry {
    /// The unique identifier for the entry.
    pub id: i64,
    /// Opaque identity the entry belongs to.
    pub identity: String,
    /// The sender of the entry ("user" or "bot").
    pub sender: String,
    /// The text content of the entry.
    pub content: String,
    /// Whether a bot entry was a locally synthesized fallback.
    pub degraded: bool,
    /// Unix timestamp of when the entry was created.
    pub created_at: i64,
}

/// A mental-health support resource served by the resource directory.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub url: String,
}

//! Distress risk classification using ordered keyword lists.
//!
//! Fast substring matching over two severity-ordered lists.
//! No ML model required - pure keyword scanning.

use crate::models::RiskTier;

/// Self-harm and suicide phrases. Checked first; a single hit classifies the
/// whole message as HIGH regardless of anything else it contains.
const HIGH_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "end it all",
    "don't want to live",
    "dont want to live",
    "want to die",
    "self-harm",
    "self harm",
    "hurt myself",
    "cutting myself",
    "cut myself",
    "no reason to live",
    "better off dead",
    "can't take it anymore",
    "can't go on",
];

/// Hopelessness, anxiety and loneliness phrases. Only consulted when no
/// HIGH keyword matched.
const MODERATE_KEYWORDS: &[&str] = &[
    "hopeless",
    "worthless",
    "depressed",
    "anxious",
    "anxiety",
    "worried",
    "empty inside",
    "alone",
    "lonely",
    "exhausted",
    "overwhelmed",
    "can't cope",
    "no hope",
    "give up",
    "struggling",
];

/// Keyword-based risk classifier.
///
/// `classify` is a total function: every input maps to a tier, nothing fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies text into a [`RiskTier`]. HIGH keywords take precedence
    /// over co-occurring MODERATE keywords; within a list, match order does
    /// not affect the result.
    pub fn classify(&self, text: &str) -> RiskTier {
        let lowered = text.to_lowercase();

        if HIGH_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return RiskTier::High;
        }
        if MODERATE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return RiskTier::Moderate;
        }
        RiskTier::None
    }

    /// Whether the text carries distress signals (tier MODERATE or above).
    pub fn distress(&self, text: &str) -> bool {
        self.classify(text) >= RiskTier::Moderate
    }
}

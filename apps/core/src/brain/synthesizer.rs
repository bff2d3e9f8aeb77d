//! Local response synthesis.
//!
//! Builds the fallback [`GeneratedResponse`] when the dispatch bridge decides
//! not to (or cannot) call the external generator: classify the message,
//! select bank text for its locale and tier, and flag the result as degraded.

use crate::brain::bank::ResponseBank;
use crate::brain::risk::RiskClassifier;
use crate::models::{GeneratedResponse, Locale, RiskTier, UserMessage};
use rand::Rng;

// Conversational openers for messages without distress signals. Word-level
// greeting detection keeps "hi" from matching inside "this".
const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "namaste", "vanakkam"];
const GRATITUDE_WORDS: &[&str] = &["thanks", "grateful"];
const GRATITUDE_PHRASES: &[&str] = &["thank you"];
const HELP_PHRASES: &[&str] = &["what can you do", "how does this work", "help me"];

const GREETINGS_EN: &[&str] = &[
    "Hello! How are you feeling today?",
    "Hi there! How can I support you today?",
    "Hello! I'm here to listen. What's on your mind?",
];
const GREETINGS_HI: &[&str] = &[
    "नमस्ते! आज आप कैसा महसूस कर रहे हैं?",
    "नमस्कार! आज मैं आपकी कैसे सहायता कर सकता हूँ?",
    "नमस्ते! मैं सुनने के लिए यहां हूं। आपके मन में क्या है?",
];
const GREETINGS_TA: &[&str] = &[
    "வணக்கம்! இன்று நீங்கள் எப்படி உணருகிறீர்கள்?",
    "வணக்கம்! இன்று நான் உங்களை எவ்வாறு ஆதரிக்க முடியும்?",
    "வணக்கம்! நான் கேட்க இங்கே இருக்கிறேன். உங்கள் மனதில் என்ன உள்ளது?",
];
const GREETINGS_BN: &[&str] = &[
    "হ্যালো! আজ আপনি কেমন বোধ করছেন?",
    "হাই! আজ আমি কীভাবে আপনাকে সমর্থন করতে পারি?",
    "হ্যালো! আমি শুনতে এখানে আছি। আপনার মনে কী আছে?",
];

const GRATITUDE_EN: &[&str] = &[
    "You're welcome! I'm glad I could help.",
    "It's my pleasure to support you.",
    "I'm here for you anytime you need to talk.",
];
const GRATITUDE_HI: &[&str] = &[
    "आपका स्वागत है! मुझे खुशी है कि मैं मदद कर सका।",
    "आपका समर्थन करना मेरा सौभाग्य है।",
    "जब भी आपको बात करने की जरूरत हो, मैं आपके लिए यहां हूं।",
];
const GRATITUDE_TA: &[&str] = &[
    "வரவேற்கிறேன்! நான் உதவ முடிந்ததில் மகிழ்ச்சி அடைகிறேன்.",
    "உங்களை ஆதரிப்பது எனக்கு மகிழ்ச்சி.",
    "நீங்கள் பேச வேண்டிய நேரத்தில் நான் உங்களுக்காக இங்கே இருக்கிறேன்.",
];
const GRATITUDE_BN: &[&str] = &[
    "স্বাগতম! আমি সাহায্য করতে পেরে খুশি।",
    "আপনাকে সমর্থন করা আমার আনন্দ।",
    "আপনার কথা বলার প্রয়োজন হলে আমি সবসময় আপনার জন্য এখানে আছি।",
];

const HELP_EN: &str = "I'm here to provide emotional support and a safe space to talk. You can share your feelings, and I'll listen without judgment. I can also suggest coping strategies, breathing exercises, or connect you with professional resources if needed. What would be most helpful for you right now?";
const HELP_HI: &str = "मैं भावनात्मक समर्थन और बात करने के लिए एक सुरक्षित जगह प्रदान करने के लिए यहां हूं। आप अपनी भावनाओं को साझा कर सकते हैं, और मैं बिना किसी निर्णय के सुनूंगा। मैं सामना करने की रणनीतियों, श्वास व्यायाम का सुझाव दे सकता हूं, या यदि आवश्यक हो तो आपको पेशेवर संसाधनों से जोड़ सकता हूं। अभी आपके लिए सबसे अधिक मददगार क्या होगा?";
const HELP_TA: &str = "நான் உணர்ச்சி ஆதரவையும் பேசுவதற்கு பாதுகாப்பான இடத்தையும் வழங்க இங்கே இருக்கிறேன். நீங்கள் உங்கள் உணர்வுகளைப் பகிர்ந்து கொள்ளலாம், நான் தீர்ப்பின்றி கேட்பேன். தேவைப்பட்டால் நான் சமாளிக்கும் உத்திகள், சுவாசப் பயிற்சிகளைப் பரிந்துரைக்கலாம் அல்லது உங்களை தொழில்முறை ஆதாரங்களுடன் இணைக்கலாம். இப்போது உங்களுக்கு மிகவும் உதவியாக இருப்பது என்ன?";
const HELP_BN: &str = "আমি আবেগীয় সমর্থন এবং কথা বলার জন্য একটি নিরাপদ জায়গা প্রদান করতে এখানে আছি। আপনি আপনার অনুভূতি শেয়ার করতে পারেন, এবং আমি বিচার ছাড়াই শুনব। প্রয়োজনে আমি মোকাবেলা কৌশল, শ্বাস প্রশ্বাসের ব্যায়াম পরামর্শ দিতে পারি, বা আপনাকে পেশাদার সংস্থানের সাথে সংযোগ করতে পারি। এখন আপনার জন্য সবচেয়ে সহায়ক কী হবে?";

/// Builds degraded responses entirely from local data.
pub struct Synthesizer {
    classifier: RiskClassifier,
    bank: ResponseBank,
}

impl Synthesizer {
    pub fn new(bank: ResponseBank) -> Self {
        Self {
            classifier: RiskClassifier::new(),
            bank,
        }
    }

    /// Synthesizes a locale-appropriate response for the message. Never
    /// fails: the bank is validated at startup and classification is total.
    pub fn synthesize(&self, msg: &UserMessage) -> GeneratedResponse {
        let tier = self.classifier.classify(&msg.text);

        let text = if tier == RiskTier::None {
            self.opener(&msg.text, msg.locale)
                .unwrap_or_else(|| self.bank.select(msg.locale, tier).to_string())
        } else {
            self.bank.select(msg.locale, tier).to_string()
        };

        GeneratedResponse {
            text,
            distress_detected: tier >= RiskTier::Moderate,
            context_used: false,
            relevant_topics: Vec::new(),
            degraded: true,
        }
    }

    /// Greeting / gratitude / help shortcut for messages without distress
    /// signals. Returns `None` when no opener keyword matches.
    fn opener(&self, text: &str, locale: Locale) -> Option<String> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        if GREETING_WORDS.iter().any(|g| words.contains(g)) {
            return Some(pick(match locale {
                Locale::En => GREETINGS_EN,
                Locale::Hi => GREETINGS_HI,
                Locale::Ta => GREETINGS_TA,
                Locale::Bn => GREETINGS_BN,
            }));
        }
        if GRATITUDE_PHRASES.iter().any(|p| lowered.contains(p))
            || GRATITUDE_WORDS.iter().any(|g| words.contains(g))
        {
            return Some(pick(match locale {
                Locale::En => GRATITUDE_EN,
                Locale::Hi => GRATITUDE_HI,
                Locale::Ta => GRATITUDE_TA,
                Locale::Bn => GRATITUDE_BN,
            }));
        }
        if HELP_PHRASES.iter().any(|p| lowered.contains(p)) {
            return Some(
                match locale {
                    Locale::En => HELP_EN,
                    Locale::Hi => HELP_HI,
                    Locale::Ta => HELP_TA,
                    Locale::Bn => HELP_BN,
                }
                .to_string(),
            );
        }
        None
    }
}

fn pick(candidates: &[&str]) -> String {
    let index = rand::thread_rng().gen_range(0..candidates.len());
    candidates[index].to_string()
}

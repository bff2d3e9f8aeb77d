//! Locale- and tier-keyed response bank.
//!
//! Holds the candidate texts the synthesizer draws from when the external
//! generator cannot answer. Buckets are keyed by `(Locale, RiskTier)`; a
//! missing locale falls back to the default locale. Completeness is checked
//! eagerly at startup so request-time selection cannot fail.

use crate::error::AppError;
use crate::models::{Locale, RiskTier};
use rand::Rng;
use std::collections::HashMap;

/// Picks an index into a bucket of `len` candidates. Injectable so tests can
/// pin selection; the default is uniform-random.
pub type Selector = Box<dyn Fn(usize) -> usize + Send + Sync>;

const TIERS: [RiskTier; 3] = [RiskTier::None, RiskTier::Moderate, RiskTier::High];

pub struct ResponseBank {
    buckets: HashMap<(Locale, RiskTier), Vec<String>>,
    selector: Selector,
}

impl Default for ResponseBank {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBank {
    /// Creates a bank with the built-in candidate texts and uniform-random selection.
    pub fn new() -> Self {
        Self::with_selector(Box::new(|len| rand::thread_rng().gen_range(0..len)))
    }

    /// Creates a bank with the built-in texts and a custom selection function.
    pub fn with_selector(selector: Selector) -> Self {
        Self {
            buckets: builtin_buckets(),
            selector,
        }
    }

    /// Verifies that every `(locale, tier)` pair resolves to a non-empty
    /// bucket, directly or through the default-locale fallback. Run during
    /// preflight; a failure here is fatal.
    pub fn validate(&self) -> Result<(), AppError> {
        for tier in TIERS {
            let default_ok = self
                .buckets
                .get(&(Locale::En, tier))
                .is_some_and(|b| !b.is_empty());
            if !default_ok {
                return Err(AppError::Config(format!(
                    "Response bank has no default-locale entries for tier {:?}",
                    tier
                )));
            }
        }
        // Non-default locales may rely on the fallback, but an explicitly
        // present bucket must not be empty.
        for locale in Locale::ALL {
            for tier in TIERS {
                if let Some(bucket) = self.buckets.get(&(locale, tier)) {
                    if bucket.is_empty() {
                        return Err(AppError::Config(format!(
                            "Response bank bucket ({}, {:?}) is present but empty",
                            locale.as_tag(),
                            tier
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Selects a candidate text for `(locale, tier)`, falling back to the
    /// default locale when the requested one has no bucket.
    pub fn select(&self, locale: Locale, tier: RiskTier) -> &str {
        let bucket = self
            .buckets
            .get(&(locale, tier))
            .filter(|b| !b.is_empty())
            .or_else(|| self.buckets.get(&(Locale::En, tier)).filter(|b| !b.is_empty()))
            // validate() runs before the server accepts requests.
            .expect("response bank validated at startup");
        let index = (self.selector)(bucket.len()).min(bucket.len() - 1);
        &bucket[index]
    }
}

fn bucket(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn builtin_buckets() -> HashMap<(Locale, RiskTier), Vec<String>> {
    let mut buckets = HashMap::new();

    // --- HIGH: crisis support, steer toward immediate help ---
    buckets.insert((Locale::En, RiskTier::High), bucket(&[
        "I'm concerned about what you're sharing. Remember that you're not alone, and help is available. Would you like me to provide some crisis resources that might help?",
        "It sounds like you're going through a really difficult time. Your feelings are valid, but please know that there are people who care and want to help. Would you like to talk about some immediate support options?",
        "I'm here to listen, but I also want to make sure you're safe. There are trained professionals who can provide better support during crisis moments. Can I share some helpline numbers with you?",
    ]));
    buckets.insert((Locale::Hi, RiskTier::High), bucket(&[
        "आप जो साझा कर रहे हैं, उसके बारे में मुझे चिंता है। याद रखें कि आप अकेले नहीं हैं, और मदद उपलब्ध है। क्या आप चाहेंगे कि मैं कुछ संकट संसाधन प्रदान करूं जो मदद कर सकते हैं?",
        "ऐसा लगता है कि आप वास्तव में एक कठिन समय से गुजर रहे हैं। आपकी भावनाएं वैध हैं, लेकिन कृपया जानें कि ऐसे लोग हैं जो परवाह करते हैं और मदद करना चाहते हैं। क्या आप कुछ तत्काल सहायता विकल्पों के बारे में बात करना चाहेंगे?",
        "मैं सुनने के लिए यहां हूं, लेकिन मैं यह भी सुनिश्चित करना चाहता हूं कि आप सुरक्षित हैं। ऐसे प्रशिक्षित पेशेवर हैं जो संकट के क्षणों के दौरान बेहतर समर्थन प्रदान कर सकते हैं। क्या मैं आपके साथ कुछ हेल्पलाइन नंबर साझा कर सकता हूं?",
    ]));
    buckets.insert((Locale::Ta, RiskTier::High), bucket(&[
        "நீங்கள் பகிர்வது குறித்து நான் கவலைப்படுகிறேன். நீங்கள் தனியாக இல்லை என்பதை நினைவில் கொள்ளுங்கள், மேலும் உதவி கிடைக்கிறது. உதவக்கூடிய சில நெருக்கடி ஆதாரங்களை நான் வழங்க வேண்டுமா?",
        "நீங்கள் மிகவும் கடினமான நேரத்தைக் கடந்து செல்வது போல் தெரிகிறது. உங்கள் உணர்வுகள் செல்லுபடியாகும், ஆனால் அக்கறை கொண்டவர்களும் உதவ விரும்புபவர்களும் இருப்பதை நினைவில் கொள்ளுங்கள். சில உடனடி ஆதரவு விருப்பங்களைப் பற்றி பேச விரும்புகிறீர்களா?",
        "நான் கேட்க இங்கே இருக்கிறேன், ஆனால் நீங்கள் பாதுகாப்பாக இருப்பதை உறுதிப்படுத்த விரும்புகிறேன். நெருக்கடி நேரங்களில் சிறந்த ஆதரவை வழங்கக்கூடிய பயிற்சி பெற்ற நிபுணர்கள் உள்ளனர். உங்களுடன் சில உதவி எண்களைப் பகிர்ந்து கொள்ளலாமா?",
    ]));
    buckets.insert((Locale::Bn, RiskTier::High), bucket(&[
        "আপনি যা শেয়ার করছেন তা নিয়ে আমি উদ্বিগ্ন। মনে রাখবেন যে আপনি একা নন, এবং সাহায্য পাওয়া যায়। আপনি কি চান আমি কিছু সংকট সংস্থান প্রদান করি যা সাহায্য করতে পারে?",
        "মনে হচ্ছে আপনি সত্যিই একটি কঠিন সময় কাটাচ্ছেন। আপনার অনুভূতিগুলি বৈধ, তবে দয়া করে জেনে রাখুন যে এমন লোক আছে যারা যত্ন নেয় এবং সাহায্য করতে চায়। আপনি কি কিছু অবিলম্বে সমর্থন বিকল্প সম্পর্কে কথা বলতে চান?",
        "আমি শুনতে এখানে আছি, তবে আমি নিশ্চিত করতে চাই যে আপনি নিরাপদ। এমন প্রশিক্ষিত পেশাদাররা আছেন যারা সংকটের মুহূর্তে আরও ভাল সমর্থন প্রদান করতে পারেন। আমি কি আপনার সাথে কিছু হেল্পলাইন নম্বর শেয়ার করতে পারি?",
    ]));

    // --- MODERATE: gentle acknowledgement, invite to talk ---
    buckets.insert((Locale::En, RiskTier::Moderate), bucket(&[
        "It sounds like you're going through a challenging time. Would you like to talk more about what's bothering you?",
        "I'm here to listen. Sometimes sharing our feelings can help us process them better. What's on your mind?",
        "Thank you for sharing that with me. It takes courage to express difficult emotions. Would you like to explore some coping strategies together?",
    ]));
    buckets.insert((Locale::Hi, RiskTier::Moderate), bucket(&[
        "ऐसा लगता है कि आप एक चुनौतीपूर्ण समय से गुजर रहे हैं। क्या आप इस बारे में अधिक बात करना चाहेंगे कि आपको क्या परेशान कर रहा है?",
        "मैं सुनने के लिए यहां हूं। कभी-कभी अपनी भावनाओं को साझा करने से हमें उन्हें बेहतर ढंग से संसाधित करने में मदद मिल सकती है। आपके मन में क्या है?",
        "मुझे यह बताने के लिए धन्यवाद। मुश्किल भावनाओं को व्यक्त करने के लिए साहस की आवश्यकता होती है। क्या आप मेरे साथ कुछ सामना करने की रणनीतियों का पता लगाना चाहेंगे?",
    ]));
    buckets.insert((Locale::Ta, RiskTier::Moderate), bucket(&[
        "நீங்கள் ஒரு சவாலான காலத்தைக் கடந்து செல்வது போல் தெரிகிறது. உங்களைத் தொந்தரவு செய்வது குறித்து மேலும் பேச விரும்புகிறீர்களா?",
        "நான் கேட்க இங்கே இருக்கிறேன். சில நேரங்களில் நமது உணர்வுகளைப் பகிர்வது அவற்றை சிறப்பாகச் செயலாக்க உதவும். உங்கள் மனதில் என்ன உள்ளது?",
        "அதை என்னுடன் பகிர்ந்து கொண்டதற்கு நன்றி. கடினமான உணர்வுகளை வெளிப்படுத்த தைரியம் தேவை. நீங்கள் என்னுடன் சில சமாளிக்கும் உத்திகளை ஆராய விரும்புகிறீர்களா?",
    ]));
    buckets.insert((Locale::Bn, RiskTier::Moderate), bucket(&[
        "মনে হচ্ছে আপনি একটি চ্যালেঞ্জিং সময় কাটাচ্ছেন। আপনাকে কী বিরক্ত করছে সে সম্পর্কে আপনি আরও কথা বলতে চান?",
        "আমি শুনতে এখানে আছি। কখনও কখনও আমাদের অনুভূতি ভাগ করে নেওয়া আমাদের সেগুলি আরও ভালভাবে প্রক্রিয়া করতে সাহায্য করতে পারে। আপনার মনে কী আছে?",
        "আমার সাথে তা শেয়ার করার জন্য ধন্যবাদ। কঠিন আবেগ প্রকাশ করতে সাহস লাগে। আপনি কি একসাথে কিছু মোকাবেলা কৌশল অন্বেষণ করতে চান?",
    ]));

    // --- NONE: open, supportive continuations ---
    buckets.insert((Locale::En, RiskTier::None), bucket(&[
        "I'm here to support you. Can you tell me more about what's on your mind?",
        "Thank you for sharing. How long have you been feeling this way?",
        "I'm listening. What would help you feel better right now?",
        "That sounds challenging. What strategies have helped you cope in the past?",
    ]));
    buckets.insert((Locale::Hi, RiskTier::None), bucket(&[
        "मैं आपका समर्थन करने के लिए यहां हूं। क्या आप मुझे बता सकते हैं कि आपके मन में क्या चल रहा है?",
        "साझा करने के लिए धन्यवाद। आप कब से ऐसा महसूस कर रहे हैं?",
        "मैं सुन रहा हूं। अभी आपको बेहतर महसूस करने में क्या मदद करेगा?",
        "वह चुनौतीपूर्ण लगता है। अतीत में आपको किन रणनीतियों से सामना करने में मदद मिली है?",
    ]));
    buckets.insert((Locale::Ta, RiskTier::None), bucket(&[
        "நான் உங்களை ஆதரிக்க இங்கே இருக்கிறேன். உங்கள் மனதில் என்ன இருக்கிறது என்பதைப் பற்றி மேலும் சொல்ல முடியுமா?",
        "பகிர்ந்தமைக்கு நன்றி. நீங்கள் எவ்வளவு காலமாக இப்படி உணர்கிறீர்கள்?",
        "நான் கேட்டுக்கொண்டிருக்கிறேன். இப்போது நீங்கள் நன்றாக உணர உதவுவது என்ன?",
        "அது சவாலாகத் தெரிகிறது. கடந்த காலத்தில் சமாளிக்க எந்த உத்திகள் உதவின?",
    ]));
    buckets.insert((Locale::Bn, RiskTier::None), bucket(&[
        "আমি আপনাকে সমর্থন করতে এখানে আছি। আপনার মনে কী আছে সে সম্পর্কে আপনি আমাকে আরও বলতে পারেন?",
        "শেয়ার করার জন্য ধন্যবাদ। আপনি কতদিন ধরে এইভাবে অনুভব করছেন?",
        "আমি শুনছি। এখন আপনাকে ভাল বোধ করতে কী সাহায্য করবে?",
        "তা চ্যালেঞ্জিং মনে হচ্ছে। অতীতে কোন কৌশলগুলি আপনাকে মোকাবেলা করতে সাহায্য করেছে?",
    ]));

    buckets
}

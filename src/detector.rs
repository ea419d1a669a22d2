// 🇮🇳 Hinglish Detector
// Hybrid rule: lexicon density OR diversity of common Hinglish patterns

use crate::normalizer::normalize_text;
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Normalized text shorter than this is too short to judge
pub const MIN_NORMALIZED_CHARS: usize = 15;

/// Minimum number of alphabetic tokens (len >= 2)
pub const MIN_ALPHA_WORDS: usize = 3;

/// Share of alphabetic tokens that must be lexicon words (inclusive)
pub const MIN_HINDI_RATIO: f64 = 0.25;

/// Number of distinct pattern groups that qualify on their own (inclusive)
pub const MIN_PATTERN_GROUPS: usize = 2;

// ============================================================================
// LEXICON
// ============================================================================

/// Hindi written in Latin script, plus the English market words that
/// Hinglish posters use as-is
pub const HINGLISH_LEXICON: &[&str] = &[
    // Function words
    "hai", "hain", "tha", "thi", "the", "hoga", "hogi", "hoge", "hu", "hun", "ho",
    "kar", "kara", "kare", "kari", "karna", "karne", "karni", "karta", "karti", "karte", "karo",
    "kya", "kyun", "kyu", "kaise", "kaisa", "kaisi", "kahan", "kab", "kitna", "kitni", "kitne",
    "yeh", "yah", "ye", "wo", "woh", "jo", "jab", "jahan", "jinhe", "jinko", "jiska", "jiski",
    "main", "mein", "me", "tu", "tum", "aap", "hum", "humein", "tumhe", "tumko", "apko", "usko",
    "nahi", "nahin", "na", "mat", "mana", "bilkul", "zaroor", "shayad", "pakka", "sure",
    "abhi", "ab", "phir", "fir", "pehle", "baad", "aage", "peeche", "upar", "neeche", "andar",
    "aur", "ya", "lekin", "par", "magar", "kyunki", "isliye", "agar", "warna", "toh", "to",
    // Money and markets
    "paisa", "paise", "rupya", "rupaye", "crore", "lakh", "hazaar", "hazar", "thousand",
    "kharidna", "khareed", "khareedna", "bechna", "bech", "nivesh", "investment",
    "lagana", "lagaya", "laga", "lagao", "munafa", "fayda", "nuksan", "loss", "profit",
    "ghatna", "ghat", "badhna", "badh", "badha", "gira", "gaya", "jana", "jaana",
    "market", "share", "stock", "company", "kaam", "business", "vyavasaya",
    // Address terms and common expressions
    "bhai", "bhaiyo", "yaar", "dost", "ji", "sahab", "sir", "madam", "uncle", "aunty",
    "accha", "achha", "acha", "bura", "badiya", "mast", "sahi", "galat", "theek", "thik",
    "dekho", "dekh", "dekhna", "suno", "sun", "sunna", "samjho", "samajh", "samjhna",
    "pata", "malum", "chahiye", "chaahiye", "hona", "aana", "lena", "dena",
    // Time
    "aaj", "kal", "parso", "mahina", "month", "saal", "year", "din", "day", "raat", "night",
    "subah", "morning", "shaam", "evening", "time", "waqt", "samay",
    // Emotions
    "khushi", "gam", "dar", "darr", "bharosa", "umeed", "hope", "pareshani", "tension",
    "mazaa", "maja", "maza", "bore", "excited", "nervous", "confident", "happy", "sad",
    // Question words
    "kaun", "kon", "kaha",
    // Verbs
    "khelna", "khana", "peena", "sona", "uthna", "baithna", "khada",
    "chalana", "rukna", "milna", "baat", "bolna", "kehna", "sunana", "dikhana",
    // Intensifiers
    "bahut", "bohot", "kaafi", "zyada", "jyada", "kam", "thoda", "pura", "poora", "sara",
    // Connectives
    "matlab", "means", "yaani", "ki", "ke", "ko", "se", "pe",
];

/// Word-boundary groups; each group counts once no matter how often it hits
pub const PATTERN_GROUPS: &[&str] = &[
    r"\b(kar|kare|karo|karna|karne)\b",
    r"\b(hai|hain|hoga|hogi|hoge)\b",
    r"\b(nahi|nahin|bilkul|zaroor)\b",
    r"\b(abhi|phir|pehle|baad)\b",
    r"\b(bhai|yaar|dost|ji)\b",
];

// ============================================================================
// DETECTION REPORT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Normalized text below MIN_NORMALIZED_CHARS
    TooShort,
    /// Fewer than MIN_ALPHA_WORDS alphabetic tokens
    TooFewWords,
    Qualifies,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub normalized_chars: usize,
    pub total_words: usize,
    pub hindi_words: usize,
    pub ratio: f64,
    pub pattern_groups: usize,
    pub verdict: Verdict,
}

impl DetectionReport {
    pub fn qualifies(&self) -> bool {
        self.verdict == Verdict::Qualifies
    }

    fn early(normalized_chars: usize, total_words: usize, verdict: Verdict) -> Self {
        DetectionReport {
            normalized_chars,
            total_words,
            hindi_words: 0,
            ratio: 0.0,
            pattern_groups: 0,
            verdict,
        }
    }
}

// ============================================================================
// DETECTOR
// ============================================================================

pub struct HinglishDetector {
    lexicon: HashSet<&'static str>,
    patterns: RegexSet,
}

impl HinglishDetector {
    pub fn new() -> Self {
        HinglishDetector {
            lexicon: HINGLISH_LEXICON.iter().copied().collect(),
            patterns: RegexSet::new(PATTERN_GROUPS).expect("pattern groups are valid regexes"),
        }
    }

    /// Does the comment qualify as pure Hinglish?
    pub fn is_pure_hinglish(&self, text: &str) -> bool {
        self.analyze(text).qualifies()
    }

    /// Run the full rule and keep the evidence
    pub fn analyze(&self, text: &str) -> DetectionReport {
        let normalized = normalize_text(text);
        let normalized_chars = normalized.chars().count();

        if normalized_chars < MIN_NORMALIZED_CHARS {
            return DetectionReport::early(normalized_chars, 0, Verdict::TooShort);
        }

        let words: Vec<&str> = normalized
            .split(' ')
            .filter(|w| w.chars().count() >= 2 && w.chars().all(char::is_alphabetic))
            .collect();

        let total_words = words.len();
        if total_words < MIN_ALPHA_WORDS {
            return DetectionReport::early(normalized_chars, total_words, Verdict::TooFewWords);
        }

        let hindi_words = words.iter().filter(|w| self.lexicon.contains(*w)).count();
        let ratio = if total_words > 0 {
            hindi_words as f64 / total_words as f64
        } else {
            0.0
        };

        let pattern_groups = self.patterns.matches(&normalized).iter().count();

        let verdict = if ratio >= MIN_HINDI_RATIO || pattern_groups >= MIN_PATTERN_GROUPS {
            Verdict::Qualifies
        } else {
            Verdict::Rejected
        };

        DetectionReport {
            normalized_chars,
            total_words,
            hindi_words,
            ratio,
            pattern_groups,
            verdict,
        }
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }
}

impl Default for HinglishDetector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

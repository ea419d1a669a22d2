// 🧹 Text Normalizer
// Strips links, mentions and punctuation; produces lowercase tokens
//
// Kept characters are those `char::is_alphanumeric` accepts, which differs
// from a `\w` class in two ways: `_` becomes a separator, and alphabetic
// combining marks such as Devanagari vowel signs stay inside their word.

use regex::Regex;
use std::sync::OnceLock;

fn link_pattern() -> &'static Regex {
    static LINKS: OnceLock<Regex> = OnceLock::new();
    LINKS.get_or_init(|| {
        Regex::new(r"http\S+|www\S+|u/\S+|r/\S+").expect("link pattern is valid")
    })
}

/// Normalized text as a single space-separated string
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = link_pattern().replace_all(lowered.trim(), "");

    let cleaned: String = stripped
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text split into tokens
pub fn normalize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

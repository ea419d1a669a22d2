// 🐂🐻 Sentiment Classifier - lexicon tally with a community-score nudge
//
// Terms are matched as raw substrings of the lowercased comment, unlike the
// detector which matches whole tokens. "kharido" therefore does not count as
// "khareed", while "badha" also fires inside "badhaega".

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// LABEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Bullish, Sentiment::Bearish, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "🐂",
            Sentiment::Bearish => "🐻",
            Sentiment::Neutral => "😐",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LEXICONS
// ============================================================================

pub const BULLISH_TERMS: &[&str] = &[
    "achha", "accha", "acha", "badiya", "mast", "sahi", "theek", "munafa", "fayda",
    "badhega", "badha", "upar", "strong", "bharosa", "khareed", "kharidna", "buy",
    "lagana", "invest", "hold", "good", "profit", "gain", "target", "bullish",
];

pub const BEARISH_TERMS: &[&str] = &[
    "bura", "galat", "kharab", "ghatega", "gira", "neeche", "nuksan", "loss",
    "bech", "bechna", "sell", "girna", "weak", "bearish", "bad", "avoid",
];

/// Scores above this add one bullish vote
pub const UPVOTE_NUDGE_ABOVE: i64 = 5;

/// Scores below this add one bearish vote
pub const DOWNVOTE_NUDGE_BELOW: i64 = -2;

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SentimentTally {
    pub bullish: usize,
    pub bearish: usize,
}

impl SentimentTally {
    pub fn label(&self) -> Sentiment {
        if self.bullish > self.bearish {
            Sentiment::Bullish
        } else if self.bearish > self.bullish {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }
}

pub struct SentimentClassifier {
    bullish_terms: Vec<&'static str>,
    bearish_terms: Vec<&'static str>,
}

impl SentimentClassifier {
    pub fn new() -> Self {
        SentimentClassifier {
            bullish_terms: BULLISH_TERMS.to_vec(),
            bearish_terms: BEARISH_TERMS.to_vec(),
        }
    }

    /// Count lexicon hits and apply the score nudge
    pub fn tally(&self, text: &str, community_score: i64) -> SentimentTally {
        let lowered = text.to_lowercase();

        let mut tally = SentimentTally {
            bullish: self.bullish_terms.iter().filter(|t| lowered.contains(*t)).count(),
            bearish: self.bearish_terms.iter().filter(|t| lowered.contains(*t)).count(),
        };

        if community_score > UPVOTE_NUDGE_ABOVE {
            tally.bullish += 1;
        } else if community_score < DOWNVOTE_NUDGE_BELOW {
            tally.bearish += 1;
        }

        tally
    }

    pub fn classify(&self, text: &str, community_score: i64) -> Sentiment {
        self.tally(text, community_score).label()
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Offline keyword heuristic for a quick privacy signal.
//!
//! Counts fixed good/bad phrases in the page text and turns the balance into
//! a 0-100 score with a coarse label. No network, no cache; useful as an
//! instant first impression while (or instead of) waiting on the remote
//! analyzer.

/// Phrases that suggest privacy-respecting practices.
pub const GOOD_SIGNALS: &[&str] = &[
    "encrypted",
    "protected",
    "gdpr",
    "ccpa",
    "data protection",
    "privacy policy",
    "user consent",
    "no third-party",
    "no tracking",
    "anonymized",
    "secure",
    "confidential",
];

/// Phrases that suggest privacy-hostile practices.
pub const BAD_SIGNALS: &[&str] = &[
    "sell data",
    "third-party",
    "tracking",
    "advertisers",
    "data sharing",
    "cookies",
    "personal information",
    "data collection",
    "profiling",
    "behavioral advertising",
    "data brokers",
];

/// Result of the keyword heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordScore {
    /// Overall score, 0-100.
    pub score: u32,
    /// Coarse label for the score band.
    pub label: &'static str,
    /// Number of distinct good phrases present.
    pub good_hits: usize,
    /// Number of distinct bad phrases present.
    pub bad_hits: usize,
}

/// Score page text by keyword balance.
///
/// Each list contributes the count of its phrases *present* in the text
/// (presence, not occurrences). Score = (good - bad) * 10, clamped to 0-100.
pub fn keyword_score(text: &str) -> KeywordScore {
    let lower = text.to_lowercase();

    let good_hits = GOOD_SIGNALS.iter().filter(|phrase| lower.contains(*phrase)).count();
    let bad_hits = BAD_SIGNALS.iter().filter(|phrase| lower.contains(*phrase)).count();

    let score = ((good_hits as i64 - bad_hits as i64) * 10).clamp(0, 100) as u32;

    let label = if score > 70 {
        "Excellent Privacy"
    } else if score > 40 {
        "Good Privacy"
    } else if score > 20 {
        "Fair Privacy"
    } else {
        "Poor Privacy"
    };

    KeywordScore { score, label, good_hits, bad_hits }
}

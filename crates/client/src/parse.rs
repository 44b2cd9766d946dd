//! Rating and bullet-point extraction from free-text analyzer output.
//!
//! The analyzer is instructed to answer in a fixed shape (`Rating: n/10`,
//! `Good:` and `Bad:` bullet lists, then `Summary:`), but the response is
//! still free text. Extraction is tolerant: a missing rating or section is
//! not an error, it just comes back absent.

use std::sync::LazyLock;

use regex::Regex;

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rating:\s*(\d+(?:\.\d+)?)\s*/\s*10").expect("invalid regex"));

static GOOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bgood:\s*(.*?)(?:\bsummary:|\brecommendations:|\bbad:|\z)").expect("invalid regex")
});

static BAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bbad:\s*(.*?)(?:\bsummary:|\brecommendations:|\bgood:|\z)").expect("invalid regex")
});

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\s+").expect("invalid regex"));

/// Structured fields extracted from a raw analyzer response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRating {
    /// Numeric rating out of 10, if the response contained one. Not clamped;
    /// presentation decides what to do with out-of-range values.
    pub rating: Option<f64>,
    /// Bullet points under the "Good:" label, in order of appearance.
    pub good_points: Vec<String>,
    /// Bullet points under the "Bad:" label, in order of appearance.
    pub bad_points: Vec<String>,
}

/// Extract the rating and categorized bullet points from raw response text.
pub fn parse(raw: &str) -> ParsedRating {
    ParsedRating {
        rating: extract_rating(raw),
        good_points: extract_section(raw, &GOOD_RE),
        bad_points: extract_section(raw, &BAD_RE),
    }
}

fn extract_rating(raw: &str) -> Option<f64> {
    RATING_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Capture the block after a section label up to the next label (or end of
/// text), then split it on `*` bullet markers, dropping blank fragments.
fn extract_section(raw: &str, section_re: &Regex) -> Vec<String> {
    let Some(block) = section_re.captures(raw).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    BULLET_RE
        .split(block.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Rating: 7.5/10\n\nGood:\n* A\n* B\nBad:\n* C\nSummary: fine overall.";

    #[test]
    fn test_parse_well_formed_response() {
        let parsed = parse(WELL_FORMED);
        assert_eq!(parsed.rating, Some(7.5));
        assert_eq!(parsed.good_points, vec!["A", "B"]);
        assert_eq!(parsed.bad_points, vec!["C"]);
    }

    #[test]
    fn test_rating_integer() {
        assert_eq!(parse("Rating: 8/10").rating, Some(8.0));
    }

    #[test]
    fn test_rating_case_insensitive() {
        assert_eq!(parse("RATING: 3/10").rating, Some(3.0));
        assert_eq!(parse("rating: 3/10").rating, Some(3.0));
    }

    #[test]
    fn test_rating_flexible_slash_spacing() {
        assert_eq!(parse("Rating: 6.5 / 10").rating, Some(6.5));
        assert_eq!(parse("Rating: 6.5/ 10").rating, Some(6.5));
        assert_eq!(parse("Rating: 6.5 /10").rating, Some(6.5));
    }

    #[test]
    fn test_rating_not_clamped() {
        assert_eq!(parse("Rating: 12/10").rating, Some(12.0));
    }

    #[test]
    fn test_no_rating_yields_absent() {
        let parsed = parse("The page discusses privacy but offers no verdict.");
        assert_eq!(parsed.rating, None);
        assert!(parsed.good_points.is_empty());
        assert!(parsed.bad_points.is_empty());
    }

    #[test]
    fn test_good_section_stops_at_bad_label() {
        let parsed = parse("Good:\n* strong encryption\n* no resale\nBad:\n* trackers everywhere");
        assert_eq!(parsed.good_points, vec!["strong encryption", "no resale"]);
        assert_eq!(parsed.bad_points, vec!["trackers everywhere"]);
    }

    #[test]
    fn test_sections_stop_at_recommendations() {
        let parsed = parse("Bad:\n* vague retention\nRecommendations:\n* read carefully");
        assert_eq!(parsed.bad_points, vec!["vague retention"]);
    }

    #[test]
    fn test_section_runs_to_end_of_text() {
        let parsed = parse("Rating: 5/10\nBad:\n* sells data\n* shares with advertisers");
        assert_eq!(parsed.bad_points, vec!["sells data", "shares with advertisers"]);
        assert!(parsed.good_points.is_empty());
    }

    #[test]
    fn test_blank_bullets_are_dropped() {
        let parsed = parse("Good:\n*   \n* real point\n*\t\nSummary: done");
        assert_eq!(parsed.good_points, vec!["real point"]);
    }

    #[test]
    fn test_section_labels_case_insensitive() {
        let parsed = parse("GOOD:\n* upper\nBAD:\n* lower\nSUMMARY: end");
        assert_eq!(parsed.good_points, vec!["upper"]);
        assert_eq!(parsed.bad_points, vec!["lower"]);
    }

    #[test]
    fn test_multiline_bullet_preserved() {
        let parsed = parse("Good:\n* consent is asked\n  before any collection\nSummary: ok");
        assert_eq!(parsed.good_points.len(), 1);
        assert!(parsed.good_points[0].contains("consent is asked"));
        assert!(parsed.good_points[0].contains("before any collection"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), ParsedRating::default());
    }
}

//! Fixed scoring rubric and user-facing framings for the remote analyzer.
//!
//! The rubric pins the response shape the parser expects. The framing picks
//! between "this is a policy, rate it" and "this is general content, find
//! privacy statements in it" based on what the locator found.

use crate::extract::PageContent;

/// System instruction sent with every analysis request.
pub const RUBRIC: &str = "\
You rate the privacy practices described in text taken from a web page.
Score how well the practices respect the user, from 1 (hostile) to 10 (exemplary).
Weigh: what data is collected and why, how long it is kept, who it is shared or
sold to, tracking and profiling, user rights and consent, and security measures.

Answer in exactly this format:
Rating: <number>/10
Good:
* <one user-friendly practice per bullet>
Bad:
* <one concerning practice per bullet>
Summary: <two or three plain-language sentences>";

/// Build the user message for a page, selecting the framing by whether the
/// located text looks like a dedicated policy.
pub fn user_prompt(content: &PageContent) -> String {
    if content.is_policy_page {
        format!(
            "The following text is a privacy policy from {url}. Rate the practices it describes.\n\n{text}",
            url = content.source_url,
            text = content.text,
        )
    } else {
        format!(
            "The following text is general page content from {url}. Find any statements about \
             privacy, data collection, or tracking, and rate the practices they describe.\n\n{text}",
            url = content.source_url,
            text = content.text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(is_policy_page: bool) -> PageContent {
        PageContent {
            text: "We collect things.".to_string(),
            is_policy_page,
            source_url: "https://example.com/privacy".to_string(),
            title: "Privacy".to_string(),
        }
    }

    #[test]
    fn test_rubric_pins_response_shape() {
        assert!(RUBRIC.contains("Rating: <number>/10"));
        assert!(RUBRIC.contains("Good:"));
        assert!(RUBRIC.contains("Bad:"));
        assert!(RUBRIC.contains("Summary:"));
    }

    #[test]
    fn test_policy_framing() {
        let prompt = user_prompt(&content(true));
        assert!(prompt.contains("is a privacy policy from https://example.com/privacy"));
        assert!(prompt.ends_with("We collect things."));
    }

    #[test]
    fn test_general_framing() {
        let prompt = user_prompt(&content(false));
        assert!(prompt.contains("general page content"));
        assert!(prompt.contains("https://example.com/privacy"));
        assert!(prompt.ends_with("We collect things."));
    }
}

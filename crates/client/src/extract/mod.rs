//! Policy content location.
//!
//! Finds the slice of a page most worth sending to the remote analyzer.
//!
//! ### Strategy
//! - A title/URL/heading keyword signal gates the search for dedicated
//!   policy text (candidate containers first, then policy-headed sections).
//! - When nothing dedicated is found, a bounded excerpt of the whole page
//!   stands in, so there is always something to analyze.
//! - The `is_policy_page` flag on the result is re-derived from the located
//!   text length alone; the keyword signal only steers the search.
//!
//! Location never fails: an empty document yields empty text, anything else
//! yields at least the fallback excerpt.

pub mod dom;

pub use dom::{DocumentView, HeadingBlock};

/// Phrases that mark a title, URL, or heading as policy-relevant.
pub const POLICY_PHRASES: &[&str] = &[
    "privacy policy",
    "privacy notice",
    "privacy statement",
    "data protection",
    "personal information",
    "cookie policy",
];

/// Located text length above which a page counts as a dedicated policy page.
const POLICY_LENGTH_THRESHOLD: usize = 500;

/// Default character cap for the whole-page fallback excerpt.
const DEFAULT_FALLBACK_CHARS: usize = 4000;

/// Tuning for content location.
#[derive(Debug, Clone)]
pub struct LocateConfig {
    /// Character cap for the fallback excerpt (default: 4000).
    pub fallback_chars: usize,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self { fallback_chars: DEFAULT_FALLBACK_CHARS }
    }
}

impl From<&privrank_core::AppConfig> for LocateConfig {
    fn from(config: &privrank_core::AppConfig) -> Self {
        Self { fallback_chars: config.fallback_chars }
    }
}

/// The slice of page content selected for analysis.
///
/// Produced once per analysis request and owned by the caller of the
/// orchestrator.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// The located text.
    pub text: String,
    /// Whether the located text is long enough to be a dedicated policy page.
    pub is_policy_page: bool,
    /// URL of the page the text came from.
    pub source_url: String,
    /// Title of the page the text came from.
    pub title: String,
}

/// Locate the most analysis-worthy text in a document view.
///
/// 1. Compute the policy signal from title, URL, and heading texts.
/// 2. If signalled, take the first non-empty candidate container, else
///    concatenate policy-headed sections (each extended through deeper
///    headings and stopped at the next heading of equal-or-higher level).
/// 3. If still empty, fall back to the first `fallback_chars` characters of
///    the whole body text.
///
/// The returned `is_policy_page` is purely length-derived (located text
/// longer than 500 characters); the step-1 signal does not feed into it.
pub fn locate(doc: &DocumentView, cfg: &LocateConfig) -> PageContent {
    let signalled = matches_policy_phrase(&doc.title)
        || url_matches_policy_phrase(&doc.url)
        || doc.headings.iter().any(|h| matches_policy_phrase(&h.text));

    let mut text = String::new();
    if signalled {
        text = match doc.container_text() {
            Some(container) => container.to_string(),
            None => policy_heading_text(&doc.headings),
        };
        if !text.is_empty() {
            tracing::debug!("located {} chars of policy text for {}", text.len(), doc.url);
        }
    }

    if text.trim().is_empty() {
        text = truncate_chars(&doc.body_text, cfg.fallback_chars);
        tracing::debug!("no dedicated policy text for {}; using fallback excerpt", doc.url);
    }

    let is_policy_page = text.chars().count() > POLICY_LENGTH_THRESHOLD;

    PageContent { text, is_policy_page, source_url: doc.url.clone(), title: doc.title.clone() }
}

/// Convenience: build the view from HTML and locate in one call.
pub fn locate_html(html: &str, url: &str, cfg: &LocateConfig) -> PageContent {
    locate(&DocumentView::from_html(html, url), cfg)
}

fn matches_policy_phrase(text: &str) -> bool {
    let lower = text.to_lowercase();
    POLICY_PHRASES.iter().any(|p| lower.contains(p))
}

/// URL matching also accepts the hyphenated form of multi-word phrases
/// ("privacy-policy" in a path segment).
fn url_matches_policy_phrase(url: &str) -> bool {
    let lower = url.to_lowercase();
    POLICY_PHRASES
        .iter()
        .any(|p| lower.contains(p) || lower.contains(&p.replace(' ', "-")))
}

/// Concatenate the sections under policy-matching headings.
///
/// A matched heading's section runs through every following deeper heading
/// (their text and body included) and stops at the next heading of
/// equal-or-higher level.
fn policy_heading_text(headings: &[HeadingBlock]) -> String {
    let mut sections = Vec::new();
    let mut i = 0;
    while i < headings.len() {
        let h = &headings[i];
        if !matches_policy_phrase(&h.text) {
            i += 1;
            continue;
        }

        let mut section = String::new();
        push_part(&mut section, &h.body);
        let mut j = i + 1;
        while j < headings.len() && headings[j].level > h.level {
            push_part(&mut section, &headings[j].text);
            push_part(&mut section, &headings[j].body);
            j += 1;
        }
        if !section.is_empty() {
            sections.push(section);
        }
        i = j;
    }
    sections.join("\n\n")
}

fn push_part(section: &mut String, part: &str) {
    if part.is_empty() {
        return;
    }
    if !section.is_empty() {
        section.push(' ');
    }
    section.push_str(part);
}

/// First `n` characters of `s`, never splitting a code point.
fn truncate_chars(s: &str, n: usize) -> String {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

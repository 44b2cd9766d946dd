//! Document view construction from HTML.
//!
//! The locator never walks a live tree; it works on this flattened snapshot:
//! title, URL, whole-body text, candidate content containers, and an ordered
//! sequence of heading blocks. Each heading block carries the text between
//! its heading and the next heading of any level, so heading-scoped
//! accumulation becomes a plain scan over the sequence.

use scraper::{ElementRef, Html, Node, Selector};

/// Element names whose text never counts as page content.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// One heading and the text that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingBlock {
    /// The heading's own text.
    pub text: String,
    /// Heading level, 1-6.
    pub level: u8,
    /// Text between this heading and the next heading of any level.
    pub body: String,
}

/// Flattened, read-only snapshot of a page.
#[derive(Debug, Clone, Default)]
pub struct DocumentView {
    /// Document title.
    pub title: String,
    /// Page URL as given by the caller.
    pub url: String,
    /// Whole-body visible text, whitespace-normalized.
    pub body_text: String,
    /// Text of the first non-empty `<main>` region.
    pub main_text: Option<String>,
    /// Text of the first non-empty `<article>` region.
    pub article_text: Option<String>,
    /// Text of the first non-empty privacy-specific region
    /// (`#privacy-policy`, `#privacy`, or `.privacy-policy`).
    pub policy_region_text: Option<String>,
    /// Heading blocks in document order.
    pub headings: Vec<HeadingBlock>,
}

impl DocumentView {
    /// Build a view from an HTML string. Never fails; a document with no
    /// extractable text yields an empty view.
    pub fn from_html(html: &str, url: &str) -> Self {
        let doc = Html::parse_document(html);

        let title_sel = Selector::parse("title").expect("invalid selector");
        let title = doc
            .select(&title_sel)
            .next()
            .map(|el| normalize_ws(&el.text().collect::<Vec<_>>().join(" ")))
            .unwrap_or_default();

        let body_sel = Selector::parse("body").expect("invalid selector");
        let body = doc.select(&body_sel).next();

        let body_text = body.map(visible_text).unwrap_or_default();

        let headings = body
            .map(|el| {
                let mut blocks = Vec::new();
                collect_heading_blocks(el, &mut blocks);
                for block in &mut blocks {
                    block.body = normalize_ws(&block.body);
                }
                blocks
            })
            .unwrap_or_default();

        Self {
            title,
            url: url.to_string(),
            body_text,
            main_text: first_nonempty_text(&doc, "main"),
            article_text: first_nonempty_text(&doc, "article"),
            policy_region_text: first_nonempty_text(&doc, "#privacy-policy, #privacy, .privacy-policy"),
            headings,
        }
    }

    /// First non-empty candidate container, in priority order:
    /// main region, article region, privacy-specific region.
    pub fn container_text(&self) -> Option<&str> {
        self.main_text
            .as_deref()
            .or(self.article_text.as_deref())
            .or(self.policy_region_text.as_deref())
    }
}

/// Visible text of an element, whitespace-normalized.
pub(crate) fn visible_text(el: ElementRef<'_>) -> String {
    let mut buf = String::new();
    push_text(el, &mut buf);
    normalize_ws(&buf)
}

fn push_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                out.push_str(&t.text);
                out.push(' ');
            }
            Node::Element(e) => {
                if SKIP_TAGS.contains(&e.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Walk the tree in document order, opening a new block at each heading and
/// appending any other text to the block opened last. Text before the first
/// heading belongs to no block.
fn collect_heading_blocks(el: ElementRef<'_>, blocks: &mut Vec<HeadingBlock>) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                if let Some(last) = blocks.last_mut() {
                    last.body.push_str(&t.text);
                    last.body.push(' ');
                }
            }
            Node::Element(e) => {
                if SKIP_TAGS.contains(&e.name()) {
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else { continue };
                if let Some(level) = heading_level(e.name()) {
                    blocks.push(HeadingBlock { text: visible_text(child_el), level, body: String::new() });
                } else {
                    collect_heading_blocks(child_el, blocks);
                }
            }
            _ => {}
        }
    }
}

fn first_nonempty_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).expect("invalid selector");
    doc.select(&sel).map(visible_text).find(|t| !t.is_empty())
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

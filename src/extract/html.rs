//! Visible-text extraction from HTML
//!
//! This module turns a rendered HTML document into the plain text the rest
//! of the pipeline works with. Two rules matter downstream:
//!
//! - Every text node that sits inside an anchor gets the anchor's absolute
//!   resolved URL appended to it. The ranker later detects "page A
//!   references page B" purely by finding B's URL inside A's content, so
//!   link structure survives extraction without a separate link table.
//! - The first `<title>` occurrence becomes the page title; callers fall
//!   back to the source URL when there is none.

use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// The page title (from the first `<title>` tag)
    pub title: Option<String>,

    /// Visible text, one line per text node, anchor URLs appended
    pub text: String,
}

/// Extracts visible text and the title from an HTML document
///
/// `base_url` is used to resolve relative anchor hrefs; pass `None` for
/// local HTML files, where hrefs are appended as written.
pub fn extract_page(html: &str, base_url: Option<&Url>) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text = extract_visible_text(&document, base_url);

    ExtractedPage { title, text }
}

/// Extracts the page title from the first `<title>` element
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Walks all text nodes in document order, collecting visible text
fn extract_visible_text(document: &Html, base_url: Option<&Url>) -> String {
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        if has_ancestor(node, &["script", "style", "noscript"]) {
            continue;
        }

        let trimmed = text.trim();

        if let Some(href) = anchor_href(node) {
            // Anchored strings keep their link target in the text stream
            match resolve_href(&href, base_url) {
                Some(resolved) => lines.push(format!("{} {}", trimmed, resolved)),
                None => {
                    if !trimmed.is_empty() {
                        lines.push(trimmed.to_string());
                    }
                }
            }
        } else if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Whether any ancestor element of the node has one of the given names
fn has_ancestor(node: ego_tree::NodeRef<'_, scraper::Node>, names: &[&str]) -> bool {
    node.ancestors().any(|n| {
        n.value()
            .as_element()
            .is_some_and(|e| names.contains(&e.name()))
    })
}

/// The `href` of the nearest enclosing anchor element, if any
fn anchor_href(node: ego_tree::NodeRef<'_, scraper::Node>) -> Option<String> {
    node.ancestors().find_map(|n| {
        n.value()
            .as_element()
            .filter(|e| e.name() == "a")
            .and_then(|e| e.attr("href"))
            .map(str::to_string)
    })
}

/// Resolves an href to an absolute URL string
///
/// With a base URL, relative hrefs are joined against it and unresolvable
/// ones dropped. Without one (local HTML files), the href passes through
/// as written.
fn resolve_href(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base_url {
        Some(base) => base.join(href).ok().map(|u| u.to_string()),
        None => Some(href.to_string()),
    }
}

//! Content extraction from fetched HTML
//!
//! This module turns a raw HTML document into the three things the rest of
//! the pipeline needs: the page title, a cleaned HTML rendition of the main
//! content region, and the outbound links. Everything here is synchronous;
//! the parsed DOM never crosses an await point.
//!
//! Cleanup rules:
//! - navigation, header, footer, sidebar and skip-link furniture is
//!   dropped, matched by element name, class, id, `role` and `aria-label`
//! - images and scripting elements are dropped
//! - headings are demoted (h1->h2, h2->h3, h3..h6->h4) so every document
//!   can sit under a single `#` page title
//! - the main content region is `main`, `#main`, `.main` or
//!   `[role='main']`, falling back to `<body>`

use crate::url::resolve_href;
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// The page title (from `<title>`), if present and non-empty
    pub title: Option<String>,

    /// Cleaned inner HTML of the main content region
    pub content_html: String,

    /// Outbound references, resolved to absolute URLs
    pub links: Vec<Url>,
}

/// Parses a page and extracts title, cleaned content, and outbound links
pub fn extract_page(html: &str, base_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);

    let mut links = Vec::new();
    collect_links(document.root_element(), base_url, &mut links);

    let region = main_content_region(&document);
    let mut content_html = String::new();
    serialize_children(region, &mut content_html);

    ExtractedPage {
        title,
        content_html,
        links,
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Picks the main content region, falling back to `<body>` and finally the
/// document root.
fn main_content_region(document: &Html) -> ElementRef<'_> {
    if let Ok(selector) = Selector::parse("main, #main, .main, [role='main']") {
        if let Some(region) = document.select(&selector).next() {
            return region;
        }
    }
    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            return body;
        }
    }
    document.root_element()
}

/// Element names that are always dropped
const BLOCKED_NAMES: &[&str] = &["nav", "header", "footer", "script", "style", "noscript"];

/// Class names marking navigation/boilerplate containers
const BLOCKED_CLASSES: &[&str] = &[
    "nav",
    "navbar",
    "menu",
    "navigation",
    "sidebar",
    "skip-link",
    "skip-to-content",
];

/// Decides whether an element and its whole subtree are boilerplate
fn is_boilerplate(element: &scraper::node::Element) -> bool {
    let name = element.name();

    if BLOCKED_NAMES.contains(&name) {
        return true;
    }

    if let Some(classes) = element.attr("class") {
        if classes
            .split_whitespace()
            .any(|c| BLOCKED_CLASSES.contains(&c))
        {
            return true;
        }
    }

    if element.attr("id") == Some("sidebar") {
        return true;
    }

    if element.attr("role") == Some("navigation") {
        return true;
    }

    if let Some(label) = element.attr("aria-label") {
        let label = label.to_lowercase();
        if label.contains("navigation") || label.contains("menu") {
            return true;
        }
    }

    // Skip-to-content anchors
    if name == "a" {
        if let Some(href) = element.attr("href") {
            if href.contains("#content") {
                return true;
            }
        }
    }

    false
}

/// Maps heading levels one step down so the page title can own `h1`
fn remap_tag(name: &str) -> &str {
    match name {
        "h1" => "h2",
        "h2" => "h3",
        "h3" | "h4" | "h5" | "h6" => "h4",
        other => other,
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "input", "link", "meta", "source", "track", "wbr",
];

/// One pending step of the iterative serializer
enum SerializeStep<'a> {
    Visit(NodeRef<'a, Node>),
    Close(&'a str),
}

/// Serializes the children of an element to cleaned HTML, skipping
/// boilerplate subtrees. Comments, doctypes and processing instructions
/// are dropped.
///
/// Driven by an explicit worklist rather than recursion, so document
/// nesting depth is not bounded by the call stack.
fn serialize_children(el: ElementRef<'_>, out: &mut String) {
    let mut stack: Vec<SerializeStep<'_>> =
        el.children().rev().map(SerializeStep::Visit).collect();

    while let Some(step) = stack.pop() {
        let node = match step {
            SerializeStep::Visit(node) => node,
            SerializeStep::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                continue;
            }
        };

        match node.value() {
            Node::Text(text) => escape_text(text, out),
            Node::Element(element) => {
                if is_boilerplate(element) || element.name() == "img" {
                    continue;
                }

                let name = remap_tag(element.name());

                out.push('<');
                out.push_str(name);
                for (attr, value) in element.attrs() {
                    out.push(' ');
                    out.push_str(attr);
                    out.push_str("=\"");
                    escape_attr(value, out);
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&name) {
                    continue;
                }

                stack.push(SerializeStep::Close(name));
                for child in node.children().rev() {
                    stack.push(SerializeStep::Visit(child));
                }
            }
            _ => {}
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

/// Collects outbound links from the whole document, ignoring links inside
/// boilerplate subtrees. Iterative for the same reason as the serializer.
fn collect_links(root: ElementRef<'_>, base_url: &Url, out: &mut Vec<Url>) {
    let mut stack = vec![root];

    while let Some(el) = stack.pop() {
        let element = el.value();

        if is_boilerplate(element) {
            continue;
        }

        if element.name() == "a" && element.attr("download").is_none() {
            if let Some(href) = element.attr("href") {
                if let Some(url) = resolve_href(href, base_url) {
                    out.push(url);
                }
            }
        }

        for child in el.children().rev() {
            if let Some(child_el) = ElementRef::wrap(child) {
                stack.push(child_el);
            }
        }
    }
}

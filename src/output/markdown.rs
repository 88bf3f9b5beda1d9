//! Markdown conversion and document assembly
//!
//! Cleaned HTML is converted with `htmd`, then assembled into the final
//! artifact: a `#` page title, a synthesized table of contents, the body
//! with blank lines collapsed, and a footer naming the source address and
//! the scrape time.

use crate::url::sanitize_anchor;
use chrono::Utc;
use htmd::HtmlToMarkdown;

/// Converts cleaned HTML into markdown
///
/// Images and scripting elements are skipped; the extractor already drops
/// them, this is a second line for fragments assembled elsewhere.
pub fn convert_html(html: &str) -> Result<String, std::io::Error> {
    HtmlToMarkdown::builder()
        .skip_tags(vec!["img", "script", "style"])
        .build()
        .convert(html)
}

/// Assembles the final markdown document for one page
///
/// The table of contents lists every `##`/`###`/`####` heading found
/// outside code fences, linked by sanitized anchor. Blank lines are
/// dropped outside code fences; fenced content is preserved verbatim.
pub fn render_document(markdown: &str, title: &str, source_url: &str) -> String {
    let mut toc = Vec::new();
    let mut body_lines = Vec::new();
    let mut in_code_block = false;

    for line in markdown.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
        }
        if !in_code_block
            && (trimmed.starts_with("## ")
                || trimmed.starts_with("### ")
                || trimmed.starts_with("#### "))
        {
            let entry = trimmed.trim_start_matches(['#', ' ']);
            toc.push(format!("- [{}](#{})", entry, sanitize_anchor(entry)));
        }
        if !trimmed.is_empty() || in_code_block {
            body_lines.push(line);
        }
    }

    let mut document = String::new();
    document.push_str(&format!("# {}\n\n", title));
    document.push_str("## Table of Contents\n\n");
    document.push_str(&toc.join("\n"));
    document.push_str("\n\n---\n\n");
    document.push_str(&body_lines.join("\n"));
    document.push_str(&format!(
        "\n\n---\n\nScraped from [{}]({}) on {}\n",
        source_url,
        source_url,
        Utc::now().to_rfc3339()
    ));

    document
}

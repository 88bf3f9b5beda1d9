//! Output generation: markdown conversion, document assembly, persistence

mod markdown;
mod writer;

pub use markdown::{convert_html, render_document};
pub use writer::{write_external_links_report, write_page};

//! Artifact persistence
//!
//! One markdown file per successfully processed address, stored under
//! `<output root>/<sanitized hostname>/<sanitized address>.md`, plus a
//! single `external_links.md` report written once after the traversal
//! completes.

use crate::crawler::ExternalLinkIndex;
use crate::url::sanitize_filename;
use std::io;
use std::path::{Path, PathBuf};

/// Writes one page artifact, creating the site directory if needed
///
/// Returns the path of the written file.
pub fn write_page(
    output_root: &Path,
    host: &str,
    address: &str,
    text: &str,
) -> io::Result<PathBuf> {
    let site_dir = output_root.join(sanitize_filename(host));
    std::fs::create_dir_all(&site_dir)?;

    let file_path = site_dir.join(format!("{}.md", sanitize_filename(address)));
    std::fs::write(&file_path, text)?;

    Ok(file_path)
}

/// Writes the external-links report at the output root
///
/// One section per origin host, one bullet per external host with the
/// first URL seen for it. Written even when no external links were found,
/// so a completed run always leaves a report behind.
pub fn write_external_links_report(
    output_root: &Path,
    index: &ExternalLinkIndex,
) -> io::Result<PathBuf> {
    let mut content = String::from("# External Links\n");

    for (origin, externals) in index.snapshot() {
        content.push_str(&format!("\n## {}\n\n", origin));
        for (host, url) in externals {
            content.push_str(&format!("- [{}]({})\n", host, url));
        }
    }

    std::fs::create_dir_all(output_root)?;
    let file_path = output_root.join("external_links.md");
    std::fs::write(&file_path, content)?;

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_page_creates_site_directory() {
        let dir = TempDir::new().unwrap();
        let path = write_page(dir.path(), "site.com", "https://site.com/a/b", "content").unwrap();

        assert!(path.exists());
        assert_eq!(
            path,
            dir.path().join("site.com").join("https___site.com_a_b.md")
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_write_page_same_dir_twice() {
        let dir = TempDir::new().unwrap();
        write_page(dir.path(), "site.com", "https://site.com/a", "one").unwrap();
        write_page(dir.path(), "site.com", "https://site.com/b", "two").unwrap();

        let entries = std::fs::read_dir(dir.path().join("site.com")).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[test]
    fn test_write_page_fragmentless_addresses_collide() {
        // The caller strips fragments first; both spellings land on the
        // same file name.
        let dir = TempDir::new().unwrap();
        let a = write_page(dir.path(), "site.com", "https://site.com/p", "x").unwrap();
        let b = write_page(dir.path(), "site.com", "https://site.com/p", "y").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_external_report_format() {
        let dir = TempDir::new().unwrap();
        let index = ExternalLinkIndex::new();
        index.record("site.com", "other.com", "https://other.com/");

        let path = write_external_links_report(dir.path(), &index).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("# External Links\n"));
        assert!(content.contains("## site.com"));
        assert!(content.contains("- [other.com](https://other.com/)"));
    }

    #[test]
    fn test_external_report_written_when_empty() {
        let dir = TempDir::new().unwrap();
        let index = ExternalLinkIndex::new();

        let path = write_external_links_report(dir.path(), &index).unwrap();
        assert!(path.exists());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# External Links\n"
        );
    }
}

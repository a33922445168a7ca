//! Standalone printable HTML export.

use anondocs_entity::document::Document;

use super::markup::{escape_html, sanitize};

const PRINT_STYLE: &str = "\
@media print { @page { margin: 20mm } body { margin: 0; font-family: system-ui, Arial; color: #111 } }
body { padding: 20px; }
img { max-width: 100%; height: auto; }";

/// Renders `doc` as a complete HTML page ready to print.
pub fn printable_html(doc: &Document) -> String {
    let title = if doc.title.trim().is_empty() {
        "Document"
    } else {
        doc.title.as_str()
    };

    format!(
        "<!doctype html>\n<html><head>\n<meta charset=\"utf-8\"><title>{}</title>\n<style>\n{}\n</style>\n</head><body>{}</body></html>\n",
        escape_html(title),
        PRINT_STYLE,
        sanitize(&doc.content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_escaped_and_scripts_removed() {
        let mut doc = Document::new("<Q&A>");
        doc.content = "<p>ok</p><script>x()</script>".into();

        let html = printable_html(&doc);
        assert!(html.contains("<title>&lt;Q&amp;A&gt;</title>"));
        assert!(html.contains("<body><p>ok</p></body>"));
        assert!(!html.contains("x()"));
    }

    #[test]
    fn test_blank_title_falls_back() {
        let doc = Document::new("  ");
        assert!(printable_html(&doc).contains("<title>Document</title>"));
    }
}

//! PDF text extraction via `lopdf`.

use lopdf::Document;
use std::path::Path;
use tracing::warn;

/// Extract the text of every page, concatenated with trailing newlines.
///
/// Extraction failures never propagate: a document that cannot be loaded
/// yields an empty string, and a page that cannot be decoded ends the
/// pass with whatever text was collected so far. Either case logs a
/// warning naming the file.
pub fn extract_text(path: &Path) -> String {
    let mut text = String::new();

    let doc = match Document::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            return text;
        }
    };

    for (page_num, _page_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                warn!(
                    "Error reading {} (page {}): {}",
                    path.display(),
                    page_num,
                    e
                );
                break;
            }
        }
    }

    text
}

//! Document segmentation: blank-line boundaries, whole text as fallback.

/// Split text into documents on the literal two-newline boundary.
///
/// Pieces are trimmed and empty ones dropped, so a run of three or more
/// newlines still acts as a single boundary. Plain running text with no
/// blank lines comes out of the split as a single piece already; when
/// nothing survives at all (empty or whitespace-only input) the trimmed
/// whole text becomes the one document. The result is never empty.
pub fn split_into_documents(text: &str) -> Vec<String> {
    let docs: Vec<String> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|doc| !doc.is_empty())
        .map(str::to_string)
        .collect();
    if docs.is_empty() {
        vec![text.trim().to_string()]
    } else {
        docs
    }
}

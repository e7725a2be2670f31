//! Text normalization: lowercase, restrict to the permitted alphabet.

/// Characters the analyzer keeps: lowercase Latin and Cyrillic letters
/// (including ё), digits, and any whitespace.
fn is_permitted(c: char) -> bool {
    matches!(c, 'a'..='z' | 'а'..='я' | 'ё' | '0'..='9') || c.is_whitespace()
}

/// Lowercase `text` and replace every character outside the permitted
/// alphabet with a single space. Replacement, not removal: "foo-bar" must
/// tokenize as two words, not one. Total over any input and idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if is_permitted(c) { c } else { ' ' })
        .collect()
}

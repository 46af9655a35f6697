//! Text normalization shared by the lexicon, the scorer and the fuzzy matcher.
//!
//! Cues and descriptions go through the same `normalize` so that substring
//! and token comparisons line up.

/// Lower-case `text`, turn every character that is neither alphanumeric nor
/// whitespace into a space, collapse whitespace runs and trim.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split already-normalized text into word tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

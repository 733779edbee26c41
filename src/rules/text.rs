//! Surface text metrics shared by the content and SEO analyzers.
//!
//! Words are whitespace-separated runs; lengths are measured in characters.

/// Words ignored by keyword frequency analysis
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "is", "are", "was", "were",
];

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True when the text ends in `.`, `!` or `?`.
/// Trailing whitespace is ignored, so "Great food. " passes.
pub fn ends_with_terminal(text: &str) -> bool {
    matches!(text.trim_end().chars().last(), Some('.' | '!' | '?'))
}

/// Mean word length in characters, `None` for text without words.
pub fn mean_word_length(text: &str) -> Option<f64> {
    let (words, chars) = text
        .split_whitespace()
        .fold((0usize, 0usize), |(w, c), word| (w + 1, c + word.chars().count()));
    if words == 0 {
        return None;
    }
    Some(chars as f64 / words as f64)
}

/// Word counts of each non-blank sentence. Runs of `.`, `!`, `?` end a
/// sentence.
pub fn sentence_lengths(text: &str) -> Vec<usize> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(word_count)
        .collect()
}

/// More than one sentence, and all of them the same length.
pub fn uniform_sentences(text: &str) -> bool {
    let lengths = sentence_lengths(text);
    match lengths.split_first() {
        Some((first, rest)) if !rest.is_empty() => rest.iter().all(|n| n == first),
        _ => false,
    }
}

/// Case-insensitive substring test.
pub fn mentions(text: &str, subject: &str) -> bool {
    text.to_lowercase().contains(&subject.to_lowercase())
}

/// Lower-case a word and strip surrounding ASCII punctuation.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Normalized, non-empty words of a text, in order, stopwords included.
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

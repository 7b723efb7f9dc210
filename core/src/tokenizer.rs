use lazy_static::lazy_static;
use regex::Regex;

/// Suffixes tried in order; the first one leaving a vowel in the prefix wins.
/// The second "ed" never matches.
pub const SUFFIXES: [&str; 6] = ["ing", "ed", "s", "ed", "eth", "est"];

/// Marks word boundaries inside stored verse text.
pub const SPACE_PLACEHOLDER: char = '~';

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(r"[ ~]+").expect("valid regex");
}

fn has_vowel(word: &str) -> bool {
    word.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Reduce an already lower-cased word to its stem.
pub fn stem(word: &str) -> &str {
    for suffix in SUFFIXES {
        if word.len() > suffix.len() {
            if let Some(prefix) = word.strip_suffix(suffix) {
                if has_vowel(prefix) {
                    return prefix;
                }
            }
        }
    }
    word
}

/// Lower-case and stem a single surface word.
pub fn normalize(word: &str) -> String {
    stem(&word.to_lowercase()).to_string()
}

/// Split verse text on spaces and placeholders, returning one stem per word.
pub fn tokenize(text: &str) -> Vec<String> {
    SEPARATOR
        .split(text)
        .filter(|w| !w.is_empty())
        .map(normalize)
        .collect()
}

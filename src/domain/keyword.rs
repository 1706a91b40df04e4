//! Canonical form and validation rules for keyword phrases.

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::constants::keywords::MAX_PHRASE_CHARS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhraseError {
    #[error("Keyword must not be empty")]
    Empty,

    #[error("Keyword must not exceed 100 characters")]
    TooLong,

    #[error("Keyword must contain at least one meaningful character")]
    NoMeaningfulCharacter,
}

/// Builds the dedup key for a phrase: NFC composition, lowercase, and single
/// spaces between words.
///
/// ```rust
/// use blogforge::domain::normalize_keyword;
///
/// assert_eq!(normalize_keyword("  React.js   Framework "), "react.js framework");
/// ```
#[must_use]
pub fn normalize_keyword(phrase: &str) -> String {
    let composed: String = phrase.nfc().collect();
    composed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validate_keyword_phrase(phrase: &str) -> Result<(), PhraseError> {
    let trimmed = phrase.trim();

    if trimmed.is_empty() {
        return Err(PhraseError::Empty);
    }

    if trimmed.chars().count() > MAX_PHRASE_CHARS {
        return Err(PhraseError::TooLong);
    }

    // Hangul syllables and jamo are alphabetic, so this covers Korean too.
    if !trimmed.chars().any(char::is_alphanumeric) {
        return Err(PhraseError::NoMeaningfulCharacter);
    }

    Ok(())
}

//! Speak request validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! readiness, then empty text, then length. A rejected request never reaches
//! the engine and never touches the output directory.

use thiserror::Error;

use super::readiness::Readiness;

/// Default upper bound on request text, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Model is not loaded.")]
    ModelNotLoaded,

    #[error("Text input is empty.")]
    EmptyText,

    #[error("Text too long. Max {max_chars} characters.")]
    TextTooLong { max_chars: usize },
}

/// Whitespace as far as empty-text detection goes. The ASCII information
/// separators (U+001C..U+001F) count as blank alongside Unicode whitespace.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Validate a speak request against the current readiness and length limit.
///
/// Length is measured in Unicode scalar values of the text as sent, without
/// trimming.
pub fn validate_speech_request(
    readiness: Readiness,
    text: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    if !readiness.is_ready() {
        return Err(ValidationError::ModelNotLoaded);
    }
    if text.chars().all(is_blank) {
        return Err(ValidationError::EmptyText);
    }
    if text.chars().count() > max_chars {
        return Err(ValidationError::TextTooLong { max_chars });
    }
    Ok(())
}

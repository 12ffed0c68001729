//! Validated character names.

use std::fmt;

use thiserror::Error;

/// Errors raised when constructing a [`CharacterName`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CharacterNameError {
    #[error("character name is empty")]
    Empty,
}

/// A character to guess, kept in both display and canonical form.
///
/// The display form preserves the original casing and is what hints are
/// derived from. The answer is the lowercase form guesses are compared to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CharacterName {
    display: String,
    answer: String,
}

impl CharacterName {
    /// Trims surrounding whitespace and rejects blank names.
    pub fn new(text: impl AsRef<str>) -> Result<Self, CharacterNameError> {
        let display = text.as_ref().trim();
        if display.is_empty() {
            return Err(CharacterNameError::Empty);
        }

        Ok(Self {
            display: display.to_string(),
            answer: display.to_lowercase(),
        })
    }

    /// Original-case name.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Lowercase canonical answer.
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl std::str::FromStr for CharacterName {
    type Err = CharacterNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

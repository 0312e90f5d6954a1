//! Text edits between two versions of a source file.
//!
//! Hosts that do not speak syntax trees get the fix as a single byte-range
//! replacement against the original text.
//!
//! ```
//! use reachfix::fix::TextEdit;
//!
//! let edit = TextEdit::between("{ A(); B(); }", "{ A(); }");
//! assert_eq!(edit.apply("{ A(); B(); }").unwrap(), "{ A(); }");
//! ```

use serde::Serialize;

/// Replace `start_byte..end_byte` of the original text with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
}

/// Error while applying a [`TextEdit`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The edit reaches past the end of the source
    #[error("edit out of bounds: end_byte {end_byte} > source length {source_len}")]
    OutOfBounds {
        /// End byte of the edit
        end_byte: usize,
        /// Length of the source
        source_len: usize,
    },
    /// An edit boundary splits a UTF-8 sequence
    #[error("edit boundary {offset} is not on a character boundary")]
    NotCharBoundary {
        /// The offending offset
        offset: usize,
    },
}

impl TextEdit {
    /// Create a new edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }

    /// The smallest edit turning `old` into `new`.
    ///
    /// Strips the common prefix and suffix; the middle of `old` is replaced
    /// by the middle of `new`.
    #[must_use]
    pub fn between(old: &str, new: &str) -> Self {
        let mut prefix = old
            .bytes()
            .zip(new.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        while !old.is_char_boundary(prefix) || !new.is_char_boundary(prefix) {
            prefix -= 1;
        }

        let max_suffix = old.len().min(new.len()) - prefix;
        let mut suffix = old
            .bytes()
            .rev()
            .zip(new.bytes().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();
        while !old.is_char_boundary(old.len() - suffix)
            || !new.is_char_boundary(new.len() - suffix)
        {
            suffix -= 1;
        }

        Self::new(
            prefix,
            old.len() - suffix,
            &new[prefix..new.len() - suffix],
        )
    }

    /// Whether the edit changes nothing
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.start_byte == self.end_byte && self.replacement.is_empty()
    }

    /// Length of the range being replaced
    #[must_use]
    pub const fn range_len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// Apply the edit to `source`.
    ///
    /// # Errors
    ///
    /// Fails if the range is outside `source` or splits a character.
    pub fn apply(&self, source: &str) -> Result<String, EditError> {
        if self.end_byte > source.len() {
            return Err(EditError::OutOfBounds {
                end_byte: self.end_byte,
                source_len: source.len(),
            });
        }
        for offset in [self.start_byte, self.end_byte] {
            if !source.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        let mut result =
            String::with_capacity(source.len() - self.range_len() + self.replacement.len());
        result.push_str(&source[..self.start_byte]);
        result.push_str(&self.replacement);
        result.push_str(&source[self.end_byte..]);
        Ok(result)
    }
}

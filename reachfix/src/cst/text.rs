//! Byte ranges into source text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A half-open byte range `start..end` into source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl TextRange {
    /// Create a new range. `end` is clamped so the range is never inverted.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// Create a range from a start offset and a length.
    #[must_use]
    pub const fn at(start: usize, len: usize) -> Self {
        Self::new(start, start + len)
    }

    /// Length of the range in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check whether `other` lies entirely inside this range
    #[must_use]
    pub const fn contains_range(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if this range overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl TextRange {
    /// The same range as a rowan range, or `None` past 4 GiB
    #[must_use]
    pub fn to_rowan(self) -> Option<rowan::TextRange> {
        let start = rowan::TextSize::try_from(self.start).ok()?;
        let end = rowan::TextSize::try_from(self.end).ok()?;
        Some(rowan::TextRange::new(start, end))
    }
}

impl From<rowan::TextRange> for TextRange {
    fn from(range: rowan::TextRange) -> Self {
        Self::new(usize::from(range.start()), usize::from(range.end()))
    }
}

/// Error returned when a `start..end` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid range `{0}`, expected `start..end`")]
pub struct ParseRangeError(String);

impl FromStr for TextRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| ParseRangeError(s.to_owned()))?;
        let start = start
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseRangeError(s.to_owned()))?;
        let end = end
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseRangeError(s.to_owned()))?;
        if end < start {
            return Err(ParseRangeError(s.to_owned()));
        }
        Ok(Self { start, end })
    }
}

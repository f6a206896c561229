use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a board column (e.g., `todo`, `in-progress`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single task on the board.
///
/// Cards carry no identifier of their own; they are addressed by their
/// position inside a column (see [`CardRef`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub heading: String,
    pub description: String,
}

impl Card {
    pub const PLACEHOLDER_HEADING: &'static str = "New Task";
    pub const PLACEHOLDER_DESCRIPTION: &'static str = "Task details...";

    pub fn new(heading: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            description: description.into(),
        }
    }

    /// Card shown when no text has been supplied at all
    pub fn placeholder() -> Self {
        Self::new(Self::PLACEHOLDER_HEADING, Self::PLACEHOLDER_DESCRIPTION)
    }

    /// Case-insensitive containment against heading or description.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.heading.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Structural address of a card: its column and index within that column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardRef {
    pub column: ColumnId,
    pub index: usize,
}

impl CardRef {
    pub fn new(column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.column, self.index)
    }
}

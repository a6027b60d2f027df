//! Cell comments (notes)
//!
//! ## Example
//!
//! ```rust
//! use sheetvc_core::{Cell, CellComment};
//!
//! let cell = Cell::new(42.0).with_comment(CellComment::new("Author", "Check this"));
//! assert_eq!(cell.comment.unwrap().to_string(), "[Author]: Check this");
//! ```

use serde::{Deserialize, Serialize};

/// A cell comment/note
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellComment {
    /// Author of the comment
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Comment text content
    pub text: String,
}

impl CellComment {
    /// Create a new comment with the given author and text
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    /// Create a comment with just text (empty author)
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            author: String::new(),
            text: text.into(),
        }
    }

    /// Check if this comment has an author
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

impl std::fmt::Display for CellComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_author() {
            write!(f, "[{}]: {}", self.author, self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only() {
        let comment = CellComment::text_only("Just text");
        assert_eq!(comment.author, "");
        assert!(!comment.has_author());
        assert_eq!(comment.to_string(), "Just text");
    }

    #[test]
    fn test_author_is_omitted_when_empty() {
        let json = serde_json::to_string(&CellComment::text_only("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi"}"#);
    }
}

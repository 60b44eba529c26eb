//! Error types for fromxml

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// End of input inside `<name ...>`, `<name .../>` or `</name>`
    UnterminatedTag,
    /// End of input before the `-->` of a `<!--` comment
    UnterminatedComment,
    /// End of input before the `>` of any other `<!...>` construct
    UnterminatedBangNode,
    /// End of input before `]]>`
    UnterminatedCData,
    /// End of input before `?>`
    UnterminatedProcessingInstruction,
    /// Strict mode: close tag does not match the innermost open element
    MismatchedCloseTag { expected: String, found: String },
    /// Strict mode: close tag with no element open
    UnexpectedCloseTag { name: String },
    /// Strict mode: element still open at end of input
    UnclosedElement { name: String },
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    InvalidUtf8,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedTag => write!(f, "unterminated tag"),
            Self::UnterminatedComment => write!(f, "unterminated comment"),
            Self::UnterminatedBangNode => write!(f, "unterminated <! node"),
            Self::UnterminatedCData => write!(f, "unterminated CDATA section"),
            Self::UnterminatedProcessingInstruction => {
                write!(f, "unterminated processing instruction")
            }
            Self::MismatchedCloseTag { expected, found } => {
                write!(f, "expected </{expected}>, found </{found}>")
            }
            Self::UnexpectedCloseTag { name } => write!(f, "unexpected close tag </{name}>"),
            Self::UnclosedElement { name } => write!(f, "unclosed element <{name}>"),
            Self::MaxDepthExceeded { max } => {
                write!(f, "max depth exceeded: {max}")
            }
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
        }
    }
}

/// Main error type for fromxml
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create error at a single position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::new(pos, pos))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.span.start, self.message)
    }
}

/// Result type alias for fromxml
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "42:10:5");
    }

    #[test]
    fn test_error_creation() {
        let err = Error::at(ErrorKind::UnterminatedCData, Pos::new(0, 1, 1));
        assert_eq!(err.kind(), &ErrorKind::UnterminatedCData);
        assert_eq!(err.span().start, err.span().end);
    }

    #[test]
    fn test_error_display() {
        let err = Error::at(ErrorKind::UnterminatedComment, Pos::new(10, 2, 5));
        let display = err.to_string();
        assert!(display.contains("error at 10:2:5"));
        assert!(display.contains("unterminated comment"));
    }

    #[test]
    fn test_mismatch_display_names_both_tags() {
        let kind = ErrorKind::MismatchedCloseTag {
            expected: "foo".to_string(),
            found: "bar".to_string(),
        };
        assert_eq!(kind.to_string(), "expected </foo>, found </bar>");
    }
}

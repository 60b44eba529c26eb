//! Token types for the markup lexer

use crate::error::Span;

/// Raw attribute as written inside a start tag.
///
/// `value` is `None` for a bare attribute (`<a b>`), and the text between the
/// quotes (or the unquoted run) otherwise. Entities are not decoded here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

/// Markup token types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Character data between tags, undecoded
    Text(&'a str),
    /// `<name ...>` or `<name .../>`
    OpenTag {
        name: &'a str,
        attributes: Vec<Attribute<'a>>,
        self_closing: bool,
    },
    /// `</name>`
    CloseTag(&'a str),
    /// `<![CDATA[...]]>` content
    CData(&'a str),
    /// `<!...>` content, comment dashes included
    Bang(&'a str),
    /// `<?...?>` content
    ProcessingInstruction(&'a str),
    Eof,
}

impl TokenKind<'_> {
    /// Get token name for log and error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::OpenTag {
                self_closing: true,
                ..
            } => "self-closing tag",
            Self::OpenTag { .. } => "open tag",
            Self::CloseTag(_) => "close tag",
            Self::CData(_) => "CDATA",
            Self::Bang(_) => "bang node",
            Self::ProcessingInstruction(_) => "processing instruction",
            Self::Eof => "EOF",
        }
    }
}

/// Token with source location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub const fn new(kind: TokenKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }

    pub const fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            span,
        }
    }

    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

//! Lexer module for tokenization

pub mod cursor;
pub mod token;
pub mod xml;

pub use cursor::Cursor;
pub use token::{Attribute, Token, TokenKind};
pub use xml::XmlLexer;

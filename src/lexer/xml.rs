//! Lenient XML lexer

use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::cursor::{is_whitespace, Cursor};
use crate::lexer::token::{Attribute, Token, TokenKind};

const CDATA_OPEN: &[u8] = b"[CDATA[";
const CDATA_CLOSE: &[u8] = b"]]>";
const COMMENT_DASHES: &[u8] = b"--";
const COMMENT_OPEN: &[u8] = b"<!--";
const COMMENT_CLOSE: &[u8] = b"-->";
const DOCTYPE: &[u8] = b"DOCTYPE";
const PI_CLOSE: &[u8] = b"?>";

/// Lexer that splits markup into text runs, tags and `<!`/`<?` nodes.
///
/// Nothing is validated beyond what is needed to find where a construct
/// ends; the only failures are constructs cut off by the end of input.
#[derive(Clone, Debug)]
pub struct XmlLexer<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> XmlLexer<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            done: false,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        let start = self.cursor.position();

        let kind = match self.cursor.current() {
            None => TokenKind::Eof,
            Some(b'<') if self.at_markup() => self.lex_markup(start)?,
            Some(_) => self.lex_text(),
        };

        Ok(Token::new(kind, Span::new(start, self.cursor.position())))
    }

    /// A `<` only opens markup when something tag-like follows it; `a < b`
    /// and a trailing `<` stay text.
    fn at_markup(&self) -> bool {
        match self.cursor.peek(1) {
            Some(b) => !is_whitespace(b) && b != b'<' && b != b'>',
            None => false,
        }
    }

    fn lex_text(&mut self) -> TokenKind<'a> {
        let start = self.cursor.pos();
        // the first byte may be a literal '<'
        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if b == b'<' && self.at_markup() {
                break;
            }
            self.cursor.advance();
        }
        TokenKind::Text(self.cursor.slice_from(start))
    }

    fn lex_markup(&mut self, start: Pos) -> Result<TokenKind<'a>> {
        self.cursor.advance();
        match self.cursor.current() {
            Some(b'/') => self.lex_close_tag(start),
            Some(b'?') => self.lex_processing_instruction(start),
            Some(b'!') => self.lex_bang(start),
            _ => self.lex_open_tag(start),
        }
    }

    fn lex_open_tag(&mut self, start: Pos) -> Result<TokenKind<'a>> {
        let name = self.lex_name();
        let mut attributes = Vec::new();

        let self_closing = loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                None => return Err(self.unterminated(ErrorKind::UnterminatedTag, start)),
                Some(b'>') => {
                    self.cursor.advance();
                    break false;
                }
                Some(b'/') => {
                    self.cursor.advance();
                    if self.cursor.consume(b'>') {
                        break true;
                    }
                }
                Some(b'"' | b'\'') => {
                    // a quoted string with no attribute name is dropped
                    self.lex_quoted(start)?;
                }
                Some(b'=') => self.cursor.advance(),
                Some(_) => attributes.push(self.lex_attribute(start)?),
            }
        };

        Ok(TokenKind::OpenTag {
            name,
            attributes,
            self_closing,
        })
    }

    fn lex_attribute(&mut self, start: Pos) -> Result<Attribute<'a>> {
        let name = self.lex_name();
        self.cursor.skip_whitespace();
        if !self.cursor.consume(b'=') {
            return Ok(Attribute { name, value: None });
        }
        self.cursor.skip_whitespace();

        let value = match self.cursor.current() {
            Some(b'"' | b'\'') => self.lex_quoted(start)?,
            _ => self.lex_unquoted(),
        };

        Ok(Attribute {
            name,
            value: Some(value),
        })
    }

    fn lex_quoted(&mut self, start: Pos) -> Result<&'a str> {
        let Some(quote) = self.cursor.current() else {
            return Err(self.unterminated(ErrorKind::UnterminatedTag, start));
        };
        self.cursor.advance();

        let value_start = self.cursor.pos();
        if !self.cursor.advance_to(&[quote]) {
            return Err(self.unterminated(ErrorKind::UnterminatedTag, start));
        }
        let value = self.cursor.slice_from(value_start);
        self.cursor.advance();
        Ok(value)
    }

    fn lex_unquoted(&mut self) -> &'a str {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if is_whitespace(b) || b == b'>' || self.cursor.starts_with(b"/>") {
                break;
            }
            self.cursor.advance();
        }
        self.cursor.slice_from(start)
    }

    /// Tag or attribute name: runs up to whitespace, `/`, `>`, `=` or a quote
    fn lex_name(&mut self) -> &'a str {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if is_whitespace(b) || matches!(b, b'/' | b'>' | b'=' | b'"' | b'\'') {
                break;
            }
            self.cursor.advance();
        }
        self.cursor.slice_from(start)
    }

    fn lex_close_tag(&mut self, start: Pos) -> Result<TokenKind<'a>> {
        // cursor at '/'
        self.cursor.advance();
        let name = self.lex_name();
        if !self.cursor.advance_to(b">") {
            return Err(self.unterminated(ErrorKind::UnterminatedTag, start));
        }
        self.cursor.advance();
        Ok(TokenKind::CloseTag(name))
    }

    fn lex_processing_instruction(&mut self, start: Pos) -> Result<TokenKind<'a>> {
        // cursor at '?'
        self.cursor.advance();
        let content_start = self.cursor.pos();
        if !self.cursor.advance_to(PI_CLOSE) {
            return Err(self.unterminated(ErrorKind::UnterminatedProcessingInstruction, start));
        }
        let content = self.cursor.slice_from(content_start);
        self.cursor.advance_by(PI_CLOSE.len());
        Ok(TokenKind::ProcessingInstruction(content))
    }

    fn lex_bang(&mut self, start: Pos) -> Result<TokenKind<'a>> {
        // cursor at '!'
        self.cursor.advance();
        let content_start = self.cursor.pos();

        if self.cursor.starts_with(CDATA_OPEN) {
            self.cursor.advance_by(CDATA_OPEN.len());
            let data_start = self.cursor.pos();
            if !self.cursor.advance_to(CDATA_CLOSE) {
                return Err(self.unterminated(ErrorKind::UnterminatedCData, start));
            }
            let data = self.cursor.slice_from(data_start);
            self.cursor.advance_by(CDATA_CLOSE.len());
            return Ok(TokenKind::CData(data));
        }

        if self.cursor.starts_with(COMMENT_DASHES) {
            self.cursor.advance_by(COMMENT_DASHES.len());
            if !self.cursor.advance_to(COMMENT_CLOSE) {
                return Err(self.unterminated(ErrorKind::UnterminatedComment, start));
            }
            // keep the closing dashes, drop only '>'
            self.cursor.advance_by(COMMENT_DASHES.len());
            let content = self.cursor.slice_from(content_start);
            self.cursor.advance();
            return Ok(TokenKind::Bang(content));
        }

        let doctype = self.cursor.starts_with(DOCTYPE);
        let mut in_subset = false;
        loop {
            match self.cursor.current() {
                None => return Err(self.unterminated(ErrorKind::UnterminatedBangNode, start)),
                Some(quote @ (b'"' | b'\'')) => self.skip_literal(quote, start)?,
                Some(b'>') if !in_subset => break,
                Some(b'[') if doctype && !in_subset => {
                    in_subset = true;
                    self.cursor.advance();
                }
                Some(b'<') if in_subset && self.cursor.starts_with(COMMENT_OPEN) => {
                    // comments in the subset may hold quotes, ']' and '>'
                    self.cursor.advance_by(COMMENT_OPEN.len());
                    if !self.cursor.advance_to(COMMENT_CLOSE) {
                        return Err(self.unterminated(ErrorKind::UnterminatedBangNode, start));
                    }
                    self.cursor.advance_by(COMMENT_CLOSE.len());
                }
                Some(b']') if in_subset => {
                    // the subset ends at ']' followed by optional whitespace and '>'
                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    if self.cursor.current() == Some(b'>') {
                        break;
                    }
                }
                Some(_) => self.cursor.advance(),
            }
        }

        let content = self.cursor.slice_from(content_start);
        self.cursor.advance();
        Ok(TokenKind::Bang(content))
    }

    /// Step over a quoted literal inside a bang node, quotes included
    fn skip_literal(&mut self, quote: u8, start: Pos) -> Result<()> {
        self.cursor.advance();
        if !self.cursor.advance_to(&[quote]) {
            return Err(self.unterminated(ErrorKind::UnterminatedBangNode, start));
        }
        self.cursor.advance();
        Ok(())
    }

    fn unterminated(&self, kind: ErrorKind, start: Pos) -> Error {
        Error::new(kind, Span::new(start, self.cursor.position()))
    }
}

impl<'a> Iterator for XmlLexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

//! Folding a token stream into a [`Value`]
//!
//! Every node (each element, plus the document itself) collects an ordered
//! list of `(key, value)` entries: attributes first, then children in
//! document order. When the node ends the entries are grouped by key in
//! first-appearance order, repeated keys becoming lists, and the result is
//! collapsed:
//!
//! - no entries: `Null` for `<a/>`, `""` for `<a></a>` and an empty document
//! - a lone text entry: that text
//! - anything else: a struct
//!
//! An element's folded value is stored in its parent under the tag name.
//! The document node has no parent, so its folded value is the result.
//!
//! Open elements live on an explicit stack, so nesting depth is bounded by
//! [`Config::max_depth`] rather than by the native call stack.

use std::mem;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::{CloseTagPolicy, Config, MixedContent};
use crate::entities;
use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::{Attribute, Token, TokenKind, XmlLexer};
use crate::value::{Struct, Value, ATTRIBUTE_PREFIX, BANG_KEY, PI_KEY, TEXT_KEY};

/// Tokenize and fold `input` in one pass
pub fn fold(input: &str, config: Config) -> Result<Value> {
    let mut folder = Folder::new(config);
    for token in XmlLexer::new(input) {
        folder.push_token(token?)?;
    }
    folder.finish()
}

/// Builds a [`Value`] from tokens pushed in document order
#[derive(Debug)]
pub struct Folder<'a> {
    config: Config,
    root: Node,
    stack: Vec<Frame<'a>>,
}

#[derive(Debug)]
struct Frame<'a> {
    name: &'a str,
    start: Pos,
    node: Node,
}

/// Pending entries of one element or of the document
#[derive(Debug)]
struct Node {
    entries: Vec<(String, Value)>,
    ordered: bool,
    has_text: bool,
}

impl<'a> Folder<'a> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            root: Node::new(config.mixed_content),
            stack: Vec::new(),
        }
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push_token(&mut self, token: Token<'a>) -> Result<()> {
        trace!(
            token = token.kind.name(),
            offset = token.span.start.offset,
            "fold"
        );

        match token.kind {
            TokenKind::Text(raw) => {
                let text = raw.trim();
                if !text.is_empty() {
                    let text = entities::decode(text).into_owned();
                    self.current().push(TEXT_KEY, Value::Text(text));
                }
            }
            TokenKind::CData(data) => {
                if !data.is_empty() {
                    self.current().push(TEXT_KEY, Value::from(data));
                }
            }
            TokenKind::Bang(raw) => self.current().push(BANG_KEY, Value::from(raw)),
            TokenKind::ProcessingInstruction(raw) => {
                self.current().push(PI_KEY, Value::from(raw));
            }
            TokenKind::OpenTag {
                name,
                attributes,
                self_closing,
            } => self.open(name, &attributes, self_closing, token.span)?,
            TokenKind::CloseTag(name) => self.close(name, token.span)?,
            TokenKind::Eof => {}
        }

        Ok(())
    }

    /// Close whatever is still open and fold the document node
    pub fn finish(mut self) -> Result<Value> {
        if let Some(frame) = self.stack.last() {
            if self.config.close_tags == CloseTagPolicy::Strict {
                return Err(Error::new(
                    ErrorKind::UnclosedElement {
                        name: frame.name.to_string(),
                    },
                    Span::new(frame.start, frame.start),
                ));
            }
            debug!(
                open = self.stack.len(),
                "closing elements left open at end of input"
            );
        }
        while !self.stack.is_empty() {
            self.close_innermost();
        }

        Ok(self.root.into_document_value())
    }

    fn open(
        &mut self,
        name: &'a str,
        attributes: &[Attribute<'a>],
        self_closing: bool,
        span: Span,
    ) -> Result<()> {
        let depth = self.stack.len() + 1;
        if self.config.depth_exceeded(depth) {
            return Err(Error::new(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                span,
            ));
        }

        let mut node = Node::new(self.config.mixed_content);
        for attribute in attributes {
            let value = attribute
                .value
                .map(|raw| entities::decode(raw).into_owned());
            node.push(
                format!("{ATTRIBUTE_PREFIX}{}", attribute.name),
                Value::from(value),
            );
        }

        if self_closing {
            let value = node.into_value(Value::Null);
            self.current().push(name, value);
        } else {
            self.stack.push(Frame {
                name,
                start: span.start,
                node,
            });
        }
        Ok(())
    }

    fn close(&mut self, name: &str, span: Span) -> Result<()> {
        match self.config.close_tags {
            CloseTagPolicy::Strict => match self.stack.last().map(|frame| frame.name) {
                None => Err(Error::new(
                    ErrorKind::UnexpectedCloseTag {
                        name: name.to_string(),
                    },
                    span,
                )),
                Some(open) if open != name => Err(Error::new(
                    ErrorKind::MismatchedCloseTag {
                        expected: open.to_string(),
                        found: name.to_string(),
                    },
                    span,
                )),
                Some(_) => {
                    self.close_innermost();
                    Ok(())
                }
            },
            CloseTagPolicy::Lenient => {
                let Some(index) = self
                    .stack
                    .iter()
                    .rposition(|frame| frame.name.eq_ignore_ascii_case(name))
                else {
                    debug!(
                        tag = name,
                        offset = span.start.offset,
                        "ignoring unmatched close tag"
                    );
                    return Ok(());
                };

                let implicit = self.stack.len() - index - 1;
                if implicit > 0 {
                    debug!(tag = name, implicit, "auto-closing elements");
                }
                for _ in 0..=implicit {
                    self.close_innermost();
                }
                Ok(())
            }
        }
    }

    fn close_innermost(&mut self) {
        if let Some(frame) = self.stack.pop() {
            let value = frame.node.into_value(Value::Text(String::new()));
            self.current().push(frame.name, value);
        }
    }

    fn current(&mut self) -> &mut Node {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.node,
            None => &mut self.root,
        }
    }
}

impl Node {
    fn new(mixed_content: MixedContent) -> Self {
        Self {
            entries: Vec::new(),
            ordered: mixed_content == MixedContent::Ordered,
            has_text: false,
        }
    }

    fn push(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if key == TEXT_KEY {
            self.has_text = true;
            self.entries.push((key, value));
        } else if self.ordered && self.has_text {
            let wrapped = Struct::from_iter([(key, value)]);
            self.entries.push((TEXT_KEY.to_string(), Value::Struct(wrapped)));
        } else {
            self.entries.push((key, value));
        }
    }

    /// Fold an element's entries; `empty` is what an element with no
    /// attributes and no children becomes
    fn into_value(self, empty: Value) -> Value {
        if self.entries.is_empty() {
            return empty;
        }
        collapse(group(self.entries))
    }

    /// The document node folds like an open/close element but is never
    /// wrapped in a tag name
    fn into_document_value(self) -> Value {
        self.into_value(Value::Text(String::new()))
    }
}

/// One key's values while grouping
enum Slot {
    One(Value),
    Many(Vec<Value>),
}

impl Slot {
    fn push(&mut self, value: Value) {
        match self {
            Self::Many(values) => values.push(value),
            Self::One(first) => {
                let first = mem::take(first);
                *self = Self::Many(vec![first, value]);
            }
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::One(value) => value,
            Self::Many(values) => Value::from(values),
        }
    }
}

/// Group entries by key in first-appearance order
fn group(entries: Vec<(String, Value)>) -> Struct {
    let mut slots: IndexMap<String, Slot> = IndexMap::with_capacity(entries.len());
    for (key, value) in entries {
        match slots.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().push(value),
            Entry::Vacant(slot) => {
                slot.insert(Slot::One(value));
            }
        }
    }
    slots
        .into_iter()
        .map(|(key, slot)| (key, slot.into_value()))
        .collect()
}

/// A struct holding nothing but one text value becomes that text
fn collapse(grouped: Struct) -> Value {
    if !matches!(grouped.get(TEXT_KEY), Some(Value::Text(_))) {
        return Value::Struct(grouped);
    }
    match grouped.into_single() {
        Ok((_, text)) => text,
        Err(grouped) => Value::Struct(grouped),
    }
}

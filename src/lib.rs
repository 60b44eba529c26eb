//! fromxml - lenient XML to schema-less value conversion
//!
//! Markup is folded into a [`Value`]: text, null, an ordered struct or a
//! list of repeated children. Attributes are keyed `@name`, character data
//! `""`, comments and other `<!...>` nodes `"!"`, processing instructions
//! `"?"`.
//!
//! # Quick Start
//!
//! ```
//! use fromxml::{from_xml, Value};
//! # fn main() -> Result<(), fromxml::Error> {
//! let value = from_xml(r#"<item id="7"><tag>a</tag><tag>b</tag></item>"#)?;
//! let item = value.get("item").and_then(Value::as_struct);
//! let id = item.and_then(|i| i.get("@id")).and_then(Value::as_text);
//! assert_eq!(id, Some("7"));
//! let tags = item.and_then(|i| i.get("tag")).and_then(Value::as_list);
//! assert_eq!(tags.map(|t| t.len()), Some(2));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use tracing::{debug, instrument};

pub mod config;
pub use config::{CloseTagPolicy, Config, MixedContent};

pub mod entities;

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod fold;
pub use fold::Folder;

pub mod lexer;
pub use lexer::{Token, TokenKind, XmlLexer};

pub mod value;
pub use value::{KeyKind, List, Struct, Value};

/// Convert XML text with the default configuration
pub fn from_xml(s: &str) -> Result<Value> {
    from_xml_with_config(s, Config::default())
}

/// Convert XML text with custom configuration
#[instrument(level = "debug", skip(s), fields(len = s.len()))]
pub fn from_xml_with_config(s: &str, config: Config) -> Result<Value> {
    if config.size_exceeded(s.len()) {
        return Err(Error::new(
            ErrorKind::MaxSizeExceeded {
                max: config.max_size,
            },
            Span::empty(),
        ));
    }

    let value = fold::fold(s, config)?;
    debug!("conversion finished");
    Ok(value)
}

/// Convert UTF-8 encoded XML bytes
pub fn from_xml_bytes(bytes: &[u8]) -> Result<Value> {
    from_xml_bytes_with_config(bytes, Config::default())
}

/// Convert UTF-8 encoded XML bytes with custom configuration
pub fn from_xml_bytes_with_config(bytes: &[u8], config: Config) -> Result<Value> {
    let s = std::str::from_utf8(bytes).map_err(|e| {
        let valid = bytes
            .get(..e.valid_up_to())
            .and_then(|prefix| std::str::from_utf8(prefix).ok())
            .unwrap_or_default();
        Error::at(ErrorKind::InvalidUtf8, end_position(valid))
    })?;
    from_xml_with_config(s, config)
}

/// Line and column just past the end of `s`
fn end_position(s: &str) -> Pos {
    let mut cursor = lexer::Cursor::new(s);
    while !cursor.is_eof() {
        cursor.advance();
    }
    cursor.position()
}

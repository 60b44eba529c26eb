#![allow(clippy::panic)]

use fromxml::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE};
use fromxml::{
    from_xml, from_xml_bytes, from_xml_with_config, CloseTagPolicy, Config, ErrorKind, Struct,
    Value,
};

fn kind_of(result: fromxml::Result<Value>) -> ErrorKind {
    match result {
        Err(err) => err.kind().clone(),
        Ok(value) => panic!("expected an error, got {value:?}"),
    }
}

fn strict() -> Config {
    Config::default().with_close_tags(CloseTagPolicy::Strict)
}

#[test]
fn test_unterminated_constructs() {
    assert_eq!(kind_of(from_xml("<foo")), ErrorKind::UnterminatedTag);
    assert_eq!(kind_of(from_xml("<foo/")), ErrorKind::UnterminatedTag);
    assert_eq!(kind_of(from_xml("<foo></foo")), ErrorKind::UnterminatedTag);
    assert_eq!(
        kind_of(from_xml("<foo bar='x></foo>")),
        ErrorKind::UnterminatedTag
    );
    assert_eq!(
        kind_of(from_xml("<foo><!-- never closed</foo>")),
        ErrorKind::UnterminatedComment
    );
    assert_eq!(
        kind_of(from_xml("<!DOCTYPE foo")),
        ErrorKind::UnterminatedBangNode
    );
    assert_eq!(
        kind_of(from_xml("<foo><![CDATA[abc</foo>")),
        ErrorKind::UnterminatedCData
    );
    assert_eq!(
        kind_of(from_xml("<?xml version=\"1.0\"")),
        ErrorKind::UnterminatedProcessingInstruction
    );
}

#[test]
fn test_error_reports_position_of_construct() {
    match from_xml("<a>\n  <!-- open") {
        Err(err) => {
            assert_eq!(err.span().start.line, 2);
            assert_eq!(err.span().start.col, 3);
            assert_eq!(err.span().start.offset, 6);
        }
        Ok(value) => panic!("expected an error, got {value:?}"),
    }
}

#[test]
fn test_leniencies_are_not_errors() -> fromxml::Result<()> {
    from_xml("<a b c=d e=''>x < y</a>")?;
    from_xml("<!weird <markup>")?;
    from_xml("trailing <")?;
    Ok(())
}

#[test]
fn test_lenient_close_tags() -> fromxml::Result<()> {
    // missing close tags are closed at end of input
    assert_eq!(
        from_xml("<a><b>x")?,
        Value::Struct(Struct::from_iter([(
            "a",
            Value::Struct(Struct::from_iter([("b", Value::from("x"))]))
        )]))
    );
    // a close tag for an outer element closes the inner ones
    assert_eq!(
        from_xml("<a><b>x</a><c/>")?,
        Value::Struct(Struct::from_iter([
            (
                "a",
                Value::Struct(Struct::from_iter([("b", Value::from("x"))]))
            ),
            ("c", Value::Null),
        ]))
    );
    // unmatched close tags are ignored
    assert_eq!(
        from_xml("<a>x</b></a>")?,
        Value::Struct(Struct::from_iter([("a", Value::from("x"))]))
    );
    assert_eq!(from_xml("</a>text")?, Value::from("text"));
    // names match case-insensitively
    assert_eq!(
        from_xml("<A>x</a>")?,
        Value::Struct(Struct::from_iter([("A", Value::from("x"))]))
    );
    Ok(())
}

#[test]
fn test_strict_close_tags() {
    assert_eq!(
        kind_of(from_xml_with_config("<a><b></a>", strict())),
        ErrorKind::MismatchedCloseTag {
            expected: "b".to_string(),
            found: "a".to_string(),
        }
    );
    assert_eq!(
        kind_of(from_xml_with_config("</a>", strict())),
        ErrorKind::UnexpectedCloseTag {
            name: "a".to_string(),
        }
    );
    assert_eq!(
        kind_of(from_xml_with_config("<a><b></b>", strict())),
        ErrorKind::UnclosedElement {
            name: "a".to_string(),
        }
    );
}

#[test]
fn test_strict_accepts_well_nested() -> fromxml::Result<()> {
    let value = from_xml_with_config("<a><b>x</b></a>", strict())?;
    assert_eq!(
        value,
        Value::Struct(Struct::from_iter([(
            "a",
            Value::Struct(Struct::from_iter([("b", Value::from("x"))]))
        )]))
    );
    Ok(())
}

#[test]
fn test_max_depth() -> fromxml::Result<()> {
    let depth = usize::from(DEFAULT_MAX_DEPTH) + 1;
    let input = "<n>".repeat(depth);
    assert_eq!(
        kind_of(from_xml(&input)),
        ErrorKind::MaxDepthExceeded {
            max: DEFAULT_MAX_DEPTH
        }
    );

    let config = Config::new(2, 0);
    from_xml_with_config("<a><b/></a>", config)?;
    assert_eq!(
        kind_of(from_xml_with_config("<a><b><c/></b></a>", config)),
        ErrorKind::MaxDepthExceeded { max: 2 }
    );
    Ok(())
}

#[test]
fn test_unlimited_depth() -> fromxml::Result<()> {
    let depth = usize::from(DEFAULT_MAX_DEPTH) * 4;
    let input = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));
    let value = from_xml_with_config(&input, Config::unlimited())?;
    assert!(value.is_struct());
    Ok(())
}

#[test]
fn test_max_size() {
    let input = "a".repeat(DEFAULT_MAX_SIZE + 1);
    assert_eq!(
        kind_of(from_xml(&input)),
        ErrorKind::MaxSizeExceeded {
            max: DEFAULT_MAX_SIZE
        }
    );
    assert_eq!(
        kind_of(from_xml_with_config("<a/>", Config::new(0, 3))),
        ErrorKind::MaxSizeExceeded { max: 3 }
    );
}

#[test]
fn test_invalid_utf8() {
    assert_eq!(
        kind_of(from_xml_bytes(b"<a>\xff</a>")),
        ErrorKind::InvalidUtf8
    );
}

#[test]
fn test_invalid_utf8_position() {
    match from_xml_bytes(b"<a>\n  \xc3\xa9\xff</a>") {
        Err(err) => {
            assert_eq!(err.span().start.offset, 8);
            assert_eq!(err.span().start.line, 2);
            assert_eq!(err.span().start.col, 4);
        }
        Ok(value) => panic!("expected an error, got {value:?}"),
    }
}

#[test]
fn test_bytes_input() -> fromxml::Result<()> {
    assert_eq!(
        from_xml_bytes("<a>é</a>".as_bytes())?,
        Value::Struct(Struct::from_iter([("a", Value::from("é"))]))
    );
    Ok(())
}

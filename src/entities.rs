//! Predefined entity decoding
//!
//! Only `&lt;`, `&gt;`, `&amp;` and `&quot;` are recognized. Everything else
//! that starts with `&` (other named entities, character references, a bare
//! ampersand) is copied through unchanged. Decoding is a single pass, so the
//! `&` produced by `&amp;lt;` is never rescanned.

use std::borrow::Cow;

const ENTITIES: [(&str, char); 4] = [
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&quot;", '"'),
];

/// Decode the predefined entities in `input`.
///
/// Returns the input borrowed when it contains no `&`.
pub fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (before, tail) = rest.split_at(amp);
        out.push_str(before);

        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some(&(entity, ch)) => {
                out.push(ch);
                rest = tail.get(entity.len()..).unwrap_or_default();
            }
            None => {
                out.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

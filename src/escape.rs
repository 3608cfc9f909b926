// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Escaping of character data and attribute values.
//!
//! Both functions accept any text. If the text does not contain a character
//! which needs to be escaped, the input is returned as is without allocating.

use std::borrow::Cow;

#[inline]
#[must_use]
const fn content_entity(byte: u8) -> Option<&'static str> {
    match byte {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        _ => None,
    }
}

#[inline]
#[must_use]
const fn attribute_entity(byte: u8) -> Option<&'static str> {
    match byte {
        b'"' => Some("&quot;"),
        b'\'' => Some("&apos;"),
        _ => content_entity(byte),
    }
}

fn escape_with(text: &str, entity: fn(u8) -> Option<&'static str>) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = bytes.iter().position(|&b| entity(b).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);

    // Entities replace ASCII bytes only, so every split index is a character
    // boundary.
    let mut start = first;
    for (idx, &byte) in bytes.iter().enumerate().skip(first) {
        if let Some(escaped) = entity(byte) {
            out.push_str(&text[start..idx]);
            out.push_str(escaped);
            start = idx + 1;
        }
    }
    out.push_str(&text[start..]);

    Cow::Owned(out)
}

/// Escapes text written as element content.
///
/// Replaces `&`, `<`, and `>` with entity references.
///
/// ```
/// use iati_xml::escape::escape_content;
///
/// assert_eq!("a&amp;b &lt;c&gt;", escape_content("a&b <c>"));
/// assert_eq!("it's \"quoted\"", escape_content("it's \"quoted\""));
/// ```
#[must_use]
pub fn escape_content(text: &str) -> Cow<'_, str> {
    escape_with(text, content_entity)
}

/// Escapes text written as an attribute value.
///
/// Applies the same replacements as [`escape_content()`] and also replaces
/// `"` and `'`.
///
/// ```
/// use iati_xml::escape::escape_attribute;
///
/// assert_eq!("&quot;A&amp;B&apos;s&quot;", escape_attribute("\"A&B's\""));
/// ```
#[must_use]
pub fn escape_attribute(text: &str) -> Cow<'_, str> {
    escape_with(text, attribute_entity)
}

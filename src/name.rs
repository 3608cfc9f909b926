// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lexical validation of element and attribute names.
//!
//! The accepted grammar is a restricted subset of XML names:
//!
//! ```text
//! Name  ::= (Part ':')? Part
//! Part  ::= [A-Za-z] [A-Za-z0-9_-]*
//! ```
//!
//! A name such as `xml:lang` is accepted, but the prefix carries no namespace
//! meaning.

use crate::error::{Error, Result};

#[inline]
#[must_use]
const fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

#[inline]
#[must_use]
const fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-')
}

/// Scans a single name part starting at `pos`.
///
/// Returns the index after the part, or `None` if no part starts at `pos`.
#[must_use]
const fn scan_part(bytes: &[u8], pos: usize) -> Option<usize> {
    if pos >= bytes.len() || !is_name_start(bytes[pos]) {
        return None;
    }

    let mut index = pos + 1;
    while index < bytes.len() && is_name_char(bytes[index]) {
        index += 1;
    }

    Some(index)
}

/// Returns true if the value is a well-formed name.
///
/// ```
/// use iati_xml::name::is_valid;
///
/// assert!(is_valid("iati-activity"));
/// assert!(is_valid("xml:lang"));
/// assert!(!is_valid("1bad"));
/// assert!(!is_valid("a:b:c"));
/// ```
#[must_use]
pub const fn is_valid(value: &str) -> bool {
    let bytes = value.as_bytes();

    let Some(idx) = scan_part(bytes, 0) else {
        return false;
    };
    if idx == bytes.len() {
        return true;
    }
    if bytes[idx] != b':' {
        return false;
    }

    match scan_part(bytes, idx + 1) {
        Some(end) => end == bytes.len(),
        None => false,
    }
}

/// Validates a name.
///
/// # Errors
///
/// Returns [`Error::MalformedName`] if the value is not a well-formed name.
///
/// ```
/// use iati_xml::{name::validate, Error};
///
/// let name = validate("xml:lang")?;
/// assert_eq!("lang", name.local());
/// assert_eq!(Some("xml"), name.namespace_prefix());
///
/// assert!(matches!(validate("x y"), Err(Error::MalformedName { .. })));
/// # Ok::<(), Error>(())
/// ```
pub fn validate(value: &str) -> Result<Name<'_>> {
    Name::new(value)
}

/// A validated element or attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name<'a>(&'a str);

impl<'a> Name<'a> {
    /// Validates the value and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedName`] if the value is not a well-formed name.
    pub fn new(value: &'a str) -> Result<Self> {
        if is_valid(value) {
            Ok(Self(value))
        } else {
            Err(Error::malformed_name(value))
        }
    }

    /// The full name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.0
    }

    /// The local part of the name.
    ///
    /// For example, if `xml:lang` was the name, then `lang` would be the
    /// local part. If there is no prefix, the entire name is returned.
    #[must_use]
    pub fn local(&self) -> &'a str {
        match self.0.split_once(':') {
            Some((_, local)) => local,
            None => self.0,
        }
    }

    /// The prefix if available.
    ///
    /// For example, if `xml:lang` was the name, then `xml` would be the
    /// prefix.
    #[must_use]
    pub fn namespace_prefix(&self) -> Option<&'a str> {
        self.0.split_once(':').map(|(prefix, _)| prefix)
    }
}

impl<'a> AsRef<str> for Name<'a> {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl<'a> core::fmt::Display for Name<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

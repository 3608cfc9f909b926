// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors returned by the writer.

use std::io;

use thiserror::Error;

/// A `Result` with the crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Reasons a write call was rejected.
///
/// Every variant except [`Error::Sink`] is a structural well-formedness
/// failure which is detected before anything is written for the call. In all
/// cases the writer's state is left as it was before the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A document was started while another one is still open.
    #[error("XML document already in progress")]
    AlreadyStarted,

    /// A document was ended but none was started.
    #[error("No XML document started")]
    NoDocument,

    /// A document was ended before any element was written.
    #[error("No root element in document")]
    NoRootElement,

    /// A document was ended while elements are still open.
    ///
    /// The names are ordered from the root to the innermost element.
    #[error("Unclosed elements: {}", names.join(", "))]
    UnclosedElements {
        /// Names of the open elements, innermost last.
        names: Vec<String>,
    },

    /// An element was written before a document was started.
    #[error("Attempt to add element {name} before starting document")]
    ElementBeforeDocument {
        /// The rejected element name.
        name: String,
    },

    /// A second element was written at the top level.
    #[error("There can be only one root element in an XML document: {name}")]
    MultipleRootElements {
        /// The rejected element name.
        name: String,
    },

    /// An element or attribute name is not a well-formed name.
    #[error("Malformed XML name: {name}")]
    MalformedName {
        /// The rejected name.
        name: String,
    },

    /// An element was closed but no element is open.
    #[error("Root element already closed; no XML block to end with {name}")]
    EmptyStack {
        /// The name given to the close call.
        name: String,
    },

    /// The closed element is not the innermost open element.
    #[error("Expected to end element {expected}, but found {found}")]
    MismatchedElement {
        /// The innermost open element.
        expected: String,
        /// The name given to the close call.
        found: String,
    },

    /// The sink failed to accept a line.
    #[error("failed to write line: {0}")]
    Sink(#[from] io::Error),
}

impl Error {
    /// Returns true if the error is a well-formedness violation rather than an
    /// output failure.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        !matches!(self, Error::Sink(_))
    }

    pub(crate) fn malformed_name(name: &str) -> Self {
        Error::MalformedName {
            name: name.to_string(),
        }
    }
}

// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `iati_xml` is a streaming [XML][xml] writer which refuses to produce
//! malformed output. It is used to write [IATI][iati] activity files from
//! humanitarian "3W" data, but does not know anything about IATI itself.
//!
//! The writer never builds a document tree. Each call is checked against the
//! current document state, written to a [`Sink`] line by line, and forgotten.
//!
//! The library does 4 things:
//!
//! 1. Names of elements and attributes are checked against a restricted XML
//!    name grammar (see [`name`]).
//!
//! 2. Element content and attribute values are escaped (see [`escape`]).
//!
//! 3. The document structure is tracked: a document must be started before
//!    elements are written, there is exactly one root element, end tags match
//!    the innermost open element, and no element is left open at the end.
//!
//! 4. Lines are indented by the number of open elements and written to the
//!    sink as soon as they are complete.
//!
//! # Example
//!
//! ```
//! use iati_xml::{Attributes, XmlWriter};
//!
//! let mut w = XmlWriter::new(String::new());
//!
//! w.start_document(Some("UTF-8"))?;
//! w.start_block(
//!     "iati-activities",
//!     &Attributes::new().with("version", "2.03"),
//! )?;
//! w.start_block(
//!     "iati-activity",
//!     &Attributes::new()
//!         .with("xml:lang", "en")
//!         .with("default-currency", "USD"),
//! )?;
//! w.simple_element("iati-identifier", &Attributes::new(), Some("OCHA-3W-SOM-1"))?;
//! w.narrative_element(
//!     "recipient-country",
//!     &Attributes::new().with("code", "SO").with("percentage", "100"),
//!     Some("Somalia"),
//! )?;
//! w.simple_element("activity-status", &Attributes::new().with("code", "2"), None)?;
//! w.end_block("iati-activity")?;
//! w.end_block("iati-activities")?;
//! w.end_document()?;
//!
//! let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
//!
//! <iati-activities version="2.03">
//!   <iati-activity xml:lang="en" default-currency="USD">
//!     <iati-identifier>OCHA-3W-SOM-1</iati-identifier>
//!     <recipient-country code="SO" percentage="100">
//!       <narrative>Somalia</narrative>
//!     </recipient-country>
//!     <activity-status code="2"/>
//!   </iati-activity>
//! </iati-activities>
//!
//! "#;
//! assert_eq!(expected, w.into_inner());
//! # Ok::<(), iati_xml::Error>(())
//! ```
//!
//! # Errors
//!
//! A call which would make the document malformed returns an [`Error`]
//! before anything is written, and the writer's state is unchanged. The
//! output written so far is still an incomplete document, so the caller
//! should treat the error as fatal for the document and discard the output.
//!
//! # Unsupported XML
//!
//! There is no support for mixed content, comments, processing instructions,
//! CDATA sections, or document type declarations. Prefixed names are accepted
//! but namespaces are not resolved.
//!
//! [xml]: https://www.w3.org/TR/xml/
//! [iati]: https://iatistandard.org/

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod attr;
#[cfg(feature = "cli")]
#[cfg_attr(docsrs, doc(cfg(feature = "cli")))]
pub mod cli;
mod error;
pub mod escape;
pub mod instruction;
pub mod name;
pub mod sink;
mod state;
pub mod writer;

pub use attr::Attributes;
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use sink::Sink;
pub use writer::{Options, XmlWriter};

// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Document structure tracking.
//!
//! The `check_*` methods only inspect the state and report whether a call is
//! allowed. The remaining methods commit a transition and are called after the
//! corresponding output was written, so that a rejected or failed call never
//! changes the state.

use crate::error::{Error, Result};

/// Where the writer is in a document's lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) enum DocumentState {
    /// No document is open.
    #[default]
    NotStarted,
    /// A document is open.
    Open {
        /// An element was written at the top level.
        seen_root: bool,
        /// Names of the open elements from the root to the innermost.
        stack: Vec<String>,
    },
}

impl DocumentState {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        DocumentState::NotStarted
    }

    #[inline]
    #[must_use]
    pub(crate) fn is_started(&self) -> bool {
        matches!(self, DocumentState::Open { .. })
    }

    /// Number of open elements.
    #[inline]
    #[must_use]
    pub(crate) fn depth(&self) -> usize {
        self.open_elements().len()
    }

    #[must_use]
    pub(crate) fn open_elements(&self) -> &[String] {
        match self {
            DocumentState::NotStarted => &[],
            DocumentState::Open { stack, .. } => stack,
        }
    }

    pub(crate) fn check_start(&self) -> Result<()> {
        match self {
            DocumentState::NotStarted => Ok(()),
            DocumentState::Open { .. } => Err(Error::AlreadyStarted),
        }
    }

    pub(crate) fn check_end(&self) -> Result<()> {
        match self {
            DocumentState::NotStarted => Err(Error::NoDocument),
            DocumentState::Open {
                seen_root: false, ..
            } => Err(Error::NoRootElement),
            DocumentState::Open { stack, .. } if !stack.is_empty() => {
                Err(Error::UnclosedElements {
                    names: stack.clone(),
                })
            }
            DocumentState::Open { .. } => Ok(()),
        }
    }

    /// Checks that an element may be written at the current position.
    ///
    /// A document must be open, and a top level element may only be written
    /// if no element was written at the top level before.
    pub(crate) fn check_element(&self, name: &str) -> Result<()> {
        match self {
            DocumentState::NotStarted => Err(Error::ElementBeforeDocument {
                name: name.to_string(),
            }),
            DocumentState::Open {
                seen_root: true,
                stack,
            } if stack.is_empty() => Err(Error::MultipleRootElements {
                name: name.to_string(),
            }),
            DocumentState::Open { .. } => Ok(()),
        }
    }

    /// Checks that the innermost open element is `name`.
    ///
    /// Returns the depth the end tag is written at.
    pub(crate) fn check_close(&self, name: &str) -> Result<usize> {
        let stack = self.open_elements();
        match stack.last() {
            None => Err(Error::EmptyStack {
                name: name.to_string(),
            }),
            Some(expected) if expected != name => Err(Error::MismatchedElement {
                expected: expected.clone(),
                found: name.to_string(),
            }),
            Some(_) => Ok(stack.len() - 1),
        }
    }

    pub(crate) fn begin(&mut self) {
        debug_assert!(!self.is_started());
        *self = DocumentState::Open {
            seen_root: false,
            stack: Vec::new(),
        };
    }

    pub(crate) fn finish(&mut self) {
        *self = DocumentState::NotStarted;
    }

    /// Records a written start tag.
    pub(crate) fn push(&mut self, name: &str) {
        if let DocumentState::Open { seen_root, stack } = self {
            *seen_root = true;
            stack.push(name.to_string());
        }
    }

    /// Records a written leaf element.
    pub(crate) fn mark_element(&mut self) {
        if let DocumentState::Open { seen_root, .. } = self {
            *seen_root = true;
        }
    }

    /// Records a written end tag.
    pub(crate) fn pop(&mut self) -> Option<String> {
        match self {
            DocumentState::NotStarted => None,
            DocumentState::Open { stack, .. } => stack.pop(),
        }
    }
}

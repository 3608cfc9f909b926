// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writes indented, well-formed XML to a [`Sink`].

use tracing::{debug, trace};

use crate::{
    attr::Attributes,
    error::{Error, Result},
    escape::{escape_attribute, escape_content},
    name::Name,
    sink::Sink,
    state::DocumentState,
};

/// Name of the child element written by [`XmlWriter::narrative_element()`].
pub const NARRATIVE: &str = "narrative";

/// Formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    /// Number of spaces per nesting level.
    ///
    /// Default: 2
    pub indent_step: usize,
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Options { indent_step: 2 }
    }
}

/// A forward-only XML writer which checks well-formedness before writing.
///
/// Every call either writes its complete output and updates the writer's
/// state, or fails and leaves the state untouched. A structural failure is
/// detected before anything is written for the call.
///
/// Each line is written to the sink as soon as the call producing it
/// succeeds. Lines are indented by [`Options::indent_step`] spaces per open
/// element.
///
/// # Example
///
/// ```
/// use iati_xml::{Attributes, XmlWriter};
///
/// let mut w = XmlWriter::new(Vec::new());
/// w.start_document(None)?;
/// w.start_block("foo", &Attributes::from([("xml:id", "12345")]))?;
/// w.simple_element(
///     "bar",
///     &Attributes::from([("xml:lang", "en")]),
///     Some("Here is some content &&& <<<"),
/// )?;
/// w.end_block("foo")?;
/// w.end_document()?;
///
/// assert_eq!(
///     w.into_inner(),
///     [
///         r#"<?xml version="1.0"?>"#,
///         "",
///         r#"<foo xml:id="12345">"#,
///         r#"  <bar xml:lang="en">Here is some content &amp;&amp;&amp; &lt;&lt;&lt;</bar>"#,
///         "</foo>",
///         "",
///     ]
/// );
/// # Ok::<(), iati_xml::Error>(())
/// ```
///
/// # Concurrency
///
/// The writer holds unsynchronized state and every operation takes
/// `&mut self`. Use one writer per document.
#[derive(Debug)]
pub struct XmlWriter<S> {
    sink: S,
    options: Options,
    state: DocumentState,
}

impl<S> XmlWriter<S>
where
    S: Sink,
{
    /// Creates a writer with the default [`Options`].
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, Options::default())
    }

    /// Creates a writer with the given options.
    pub fn with_options(sink: S, options: Options) -> Self {
        Self {
            sink,
            options,
            state: DocumentState::new(),
        }
    }

    /// Starts a document by writing the XML declaration followed by an empty
    /// line.
    ///
    /// If an encoding is given, it is written as the declaration's `encoding`
    /// pseudo-attribute.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyStarted`] if a document is open.
    /// - [`Error::Sink`] if the sink fails.
    pub fn start_document(&mut self, encoding: Option<&str>) -> Result<()> {
        self.state.check_start().map_err(rejected)?;

        let declaration = match encoding {
            None => String::from(r#"<?xml version="1.0"?>"#),
            Some(encoding) => format!(
                r#"<?xml version="1.0" encoding="{}"?>"#,
                escape_attribute(encoding)
            ),
        };
        self.emit(0, &declaration)?;
        self.emit(0, "")?;

        self.state.begin();
        debug!(?encoding, "started document");
        Ok(())
    }

    /// Ends the document by writing an empty line.
    ///
    /// The writer can start a new document afterwards.
    ///
    /// # Errors
    ///
    /// - [`Error::NoDocument`] if no document is open.
    /// - [`Error::NoRootElement`] if no element was written.
    /// - [`Error::UnclosedElements`] if elements are still open.
    /// - [`Error::Sink`] if the sink fails.
    pub fn end_document(&mut self) -> Result<()> {
        self.state.check_end().map_err(rejected)?;

        self.emit(0, "")?;

        self.state.finish();
        debug!("ended document");
        Ok(())
    }

    /// Writes a start tag. Elements written before the matching
    /// [`end_block()`][XmlWriter::end_block()] are nested one level deeper.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementBeforeDocument`] if no document is open.
    /// - [`Error::MultipleRootElements`] if this would be a second top level
    ///   element.
    /// - [`Error::MalformedName`] if the element name or an attribute name is
    ///   malformed.
    /// - [`Error::Sink`] if the sink fails.
    pub fn start_block(&mut self, name: &str, attrs: &Attributes) -> Result<()> {
        self.state.check_element(name).map_err(rejected)?;
        let tag = start_tag(name, attrs, false).map_err(rejected)?;

        self.emit(self.depth(), &tag)?;

        self.state.push(name);
        Ok(())
    }

    /// Writes the end tag for the innermost open element.
    ///
    /// The name must match the innermost open element.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyStack`] if no element is open.
    /// - [`Error::MismatchedElement`] if the name is not the innermost open
    ///   element.
    /// - [`Error::Sink`] if the sink fails.
    pub fn end_block(&mut self, name: &str) -> Result<()> {
        let depth = self.state.check_close(name).map_err(rejected)?;

        self.emit(depth, &format!("</{name}>"))?;

        self.state.pop();
        Ok(())
    }

    /// Writes an element without children.
    ///
    /// Without content, an empty-element tag like `<name/>` is written.
    /// Otherwise the start tag, the escaped content, and the end tag are
    /// written on a single line.
    ///
    /// Line breaks in the content are not escaped, so the sink may receive a
    /// "line" which spans several lines of output.
    ///
    /// # Errors
    ///
    /// The same as [`start_block()`][XmlWriter::start_block()].
    pub fn simple_element(
        &mut self,
        name: &str,
        attrs: &Attributes,
        content: Option<&str>,
    ) -> Result<()> {
        self.state.check_element(name).map_err(rejected)?;

        let line = match content {
            None => start_tag(name, attrs, true).map_err(rejected)?,
            Some(content) => {
                let mut line = start_tag(name, attrs, false).map_err(rejected)?;
                line.push_str(&escape_content(content));
                line.push_str("</");
                line.push_str(name);
                line.push('>');
                line
            }
        };

        self.emit(self.depth(), &line)?;

        self.state.mark_element();
        Ok(())
    }

    /// Writes an element which holds its text in a nested `narrative` element.
    ///
    /// Without text, this is the same as
    /// [`simple_element(name, attrs, None)`][XmlWriter::simple_element()].
    /// Otherwise the element is opened, a `narrative` element with the text is
    /// written inside it, and the element is closed.
    ///
    /// ```
    /// use iati_xml::{Attributes, XmlWriter};
    ///
    /// let mut w = XmlWriter::new(String::new());
    /// w.start_document(None)?;
    /// w.start_block("iati-activity", &Attributes::new())?;
    /// w.narrative_element("title", &Attributes::new(), Some("Water trucking"))?;
    /// w.narrative_element("activity-scope", &Attributes::from([("code", "4")]), None)?;
    /// w.end_block("iati-activity")?;
    /// w.end_document()?;
    ///
    /// assert_eq!(
    ///     w.into_inner(),
    ///     "<?xml version=\"1.0\"?>\n\
    ///      \n\
    ///      <iati-activity>\n\
    ///      \x20 <title>\n\
    ///      \x20   <narrative>Water trucking</narrative>\n\
    ///      \x20 </title>\n\
    ///      \x20 <activity-scope code=\"4\"/>\n\
    ///      </iati-activity>\n\
    ///      \n"
    /// );
    /// # Ok::<(), iati_xml::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// The same as [`start_block()`][XmlWriter::start_block()].
    pub fn narrative_element(
        &mut self,
        name: &str,
        attrs: &Attributes,
        text: Option<&str>,
    ) -> Result<()> {
        let Some(text) = text else {
            return self.simple_element(name, attrs, None);
        };

        self.state.check_element(name).map_err(rejected)?;
        let open = start_tag(name, attrs, false).map_err(rejected)?;

        let depth = self.depth();
        self.emit(depth, &open)?;
        self.emit(
            depth + 1,
            &format!("<{NARRATIVE}>{}</{NARRATIVE}>", escape_content(text)),
        )?;
        self.emit(depth, &format!("</{name}>"))?;

        self.state.mark_element();
        Ok(())
    }

    fn emit(&mut self, depth: usize, text: &str) -> Result<()> {
        let line = if text.is_empty() {
            String::new()
        } else {
            let mut line = " ".repeat(self.options.indent_step * depth);
            line.push_str(text);
            line
        };
        trace!(depth, line = %line, "write");
        self.sink.write_line(&line)?;
        Ok(())
    }
}

impl<S> XmlWriter<S> {
    /// Number of open elements.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    /// Returns true if a document is open.
    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    /// Names of the open elements, from the root to the innermost.
    #[inline]
    #[must_use]
    pub fn open_elements(&self) -> &[String] {
        self.state.open_elements()
    }

    /// The writer's options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Discards the open document, if any, without writing anything.
    ///
    /// Output already written for the discarded document is left in the sink
    /// and is not well-formed.
    pub fn reset(&mut self) {
        if self.state.is_started() {
            debug!(open = ?self.state.open_elements(), "discarded document");
        }
        self.state.finish();
    }

    /// Returns a reference to the sink.
    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    ///
    /// Writing to the sink directly can break the well-formedness of the
    /// output.
    #[inline]
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Returns the sink.
    #[inline]
    pub fn into_inner(self) -> S {
        self.sink
    }
}

fn rejected(err: Error) -> Error {
    debug!(error = %err, "rejected write");
    err
}

/// Builds `<name attr="value"...>` or, for an empty element, `<name .../>`.
fn start_tag(name: &str, attrs: &Attributes, empty: bool) -> Result<String> {
    let name = Name::new(name)?;

    let mut tag = String::with_capacity(name.as_str().len() + 2 + attrs.len() * 16);
    tag.push('<');
    tag.push_str(name.as_str());
    for (attr_name, value) in attrs.iter() {
        let attr_name = Name::new(attr_name)?;
        tag.push(' ');
        tag.push_str(attr_name.as_str());
        tag.push_str("=\"");
        tag.push_str(&escape_attribute(value));
        tag.push('"');
    }
    tag.push_str(if empty { "/>" } else { ">" });

    Ok(tag)
}

// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Destinations for written lines.

use std::io::{self, Write};

/// Receives complete lines of output.
///
/// Lines are given without a line terminator. A line is never revisited once
/// it has been written, so an implementation may forward it immediately.
///
/// Element content is written as given, so a line holding content with a
/// `\n` spans several lines of output.
pub trait Sink {
    /// Accepts the next line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line could not be written.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<S> Sink for &mut S
where
    S: Sink + ?Sized,
{
    #[inline]
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Collects each line as a separate entry.
impl Sink for Vec<String> {
    #[inline]
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Appends each line followed by `\n`.
impl Sink for String {
    #[inline]
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push_str(line);
        self.push('\n');
        Ok(())
    }
}

/// Writes lines to an [`io::Write`] implementation.
///
/// Each line is followed by `\n`. Nothing is buffered by the sink itself;
/// wrap the writer in a [`io::BufWriter`] if needed.
///
/// ```
/// use iati_xml::{sink::IoSink, Sink};
///
/// let mut sink = IoSink::new(Vec::new());
/// sink.write_line("<a/>")?;
/// assert_eq!(b"<a/>\n".as_slice(), sink.into_inner().as_slice());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct IoSink<W> {
    writer: W,
}

impl<W> IoSink<W>
where
    W: Write,
{
    /// Wraps the writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer could not be flushed.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Sink for IoSink<W>
where
    W: Write,
{
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_lines() -> io::Result<()> {
        let mut lines: Vec<String> = Vec::new();
        lines.write_line("<a>")?;
        lines.write_line("")?;
        assert_eq!(vec!["<a>".to_string(), String::new()], lines);
        Ok(())
    }

    #[test]
    fn string_lines() -> io::Result<()> {
        let mut out = String::new();
        out.write_line("<a>")?;
        out.write_line("</a>")?;
        assert_eq!("<a>\n</a>\n", out);
        Ok(())
    }

    #[test]
    fn borrowed_sink() -> io::Result<()> {
        fn write_leaf<S: Sink>(mut sink: S) -> io::Result<()> {
            sink.write_line("<a/>")
        }

        let mut out = String::new();
        write_leaf(&mut out)?;
        write_leaf(&mut out)?;
        assert_eq!("<a/>\n<a/>\n", out);
        Ok(())
    }

    #[test]
    fn io_sink_propagates_errors() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = IoSink::new(Closed);
        let err = sink.write_line("<a/>").unwrap_err();
        assert_eq!(io::ErrorKind::BrokenPipe, err.kind());
    }
}

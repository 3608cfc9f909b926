// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration and driver for the `iati-xml-replay` binary.

use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::{
    instruction::{self, Instruction},
    sink::IoSink,
    writer::{Options, XmlWriter},
};

/// Replays JSON-lines write instructions as an XML document.
#[derive(Debug, Clone, Parser)]
#[command(name = "iati-xml-replay")]
#[command(about = "Write an XML document from JSON-lines write instructions")]
pub struct ReplayConfig {
    /// Instruction file, or `-` for standard input.
    #[arg(env = "IATI_XML_INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Output file. Standard output is used if not set.
    #[arg(short, long, env = "IATI_XML_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Spaces per nesting level.
    #[arg(long, env = "IATI_XML_INDENT", default_value = "2")]
    pub indent: usize,

    /// Encoding named in the XML declaration.
    #[arg(long, env = "IATI_XML_ENCODING")]
    pub encoding: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "IATI_XML_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            output: None,
            indent: 2,
            encoding: None,
            log_level: "warn".to_string(),
        }
    }
}

impl ReplayConfig {
    /// Writer options derived from the configuration.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            indent_step: self.indent,
        }
    }

    fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

/// Installs a `tracing` subscriber which logs to standard error.
///
/// `RUST_LOG` takes precedence over the given level.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Default filter for the library and the binary.
fn directive(level: &str) -> String {
    format!("iati_xml={level},iati_xml_replay={level}")
}

/// Reads the instructions and writes the document.
///
/// If writing to a file fails, the incomplete file is removed.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, if the
/// instructions do not form a well-formed document, or if the output cannot be
/// written.
pub fn run(config: &ReplayConfig) -> anyhow::Result<()> {
    let input = read_input(config)?;
    let instructions = instruction::parse_json_lines(&input)?;
    info!(count = instructions.len(), "parsed instructions");

    let encoding = config.encoding.as_deref();
    match &config.output {
        None => {
            let stdout = io::stdout();
            write_document(stdout.lock(), &instructions, encoding, config.options())
        }
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let result = write_document(file, &instructions, encoding, config.options());
            if result.is_err() {
                discard(path);
            }
            result
        }
    }
}

/// Writes a complete document to the writer.
///
/// The instructions are first replayed into a discarding sink, so nothing is
/// written to `out` unless they form a well-formed document.
///
/// # Errors
///
/// Returns an error if the instructions are rejected or the output cannot be
/// written.
pub fn write_document<W: Write>(
    out: W,
    instructions: &[Instruction],
    encoding: Option<&str>,
    options: Options,
) -> anyhow::Result<()> {
    let mut dry_run = XmlWriter::with_options(IoSink::new(io::sink()), options);
    instruction::replay(&mut dry_run, instructions, encoding)
        .context("instructions do not form a well-formed document")?;

    let mut writer = XmlWriter::with_options(IoSink::new(BufWriter::new(out)), options);
    instruction::replay(&mut writer, instructions, encoding)
        .context("failed to write output")?;
    writer
        .get_mut()
        .flush()
        .context("failed to flush output")?;
    Ok(())
}

fn read_input(config: &ReplayConfig) -> anyhow::Result<String> {
    let mut input = String::new();
    if config.reads_stdin() {
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read standard input")?;
    } else {
        input = fs::read_to_string(&config.input)
            .with_context(|| format!("failed to read {}", config.input.display()))?;
    }
    Ok(input)
}

fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %err, "failed to remove incomplete output");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Attributes;

    #[test]
    fn parse_arguments() -> Result<(), clap::Error> {
        let config = ReplayConfig::try_parse_from([
            "iati-xml-replay",
            "activities.jsonl",
            "-o",
            "activities.xml",
            "--indent",
            "4",
            "--encoding",
            "UTF-8",
        ])?;
        assert_eq!(PathBuf::from("activities.jsonl"), config.input);
        assert_eq!(Some(PathBuf::from("activities.xml")), config.output);
        assert_eq!(Options { indent_step: 4 }, config.options());
        assert_eq!(Some("UTF-8"), config.encoding.as_deref());
        Ok(())
    }

    #[test]
    fn defaults() {
        let config = ReplayConfig::default();
        assert!(config.reads_stdin());
        assert_eq!(Options::default(), config.options());
        assert_eq!("warn", config.log_level);
    }

    #[test]
    fn directive_covers_binary() {
        assert_eq!("iati_xml=debug,iati_xml_replay=debug", directive("debug"));
    }

    #[test]
    fn write_to_buffer() -> anyhow::Result<()> {
        let instructions = vec![
            Instruction::Open {
                name: "iati-activities".to_string(),
                attrs: Attributes::from([("version", "2.03")]),
            },
            Instruction::Close {
                name: "iati-activities".to_string(),
            },
        ];

        let mut out = Vec::new();
        write_document(&mut out, &instructions, None, Options::default())?;
        assert_eq!(
            "<?xml version=\"1.0\"?>\n\n<iati-activities version=\"2.03\">\n</iati-activities>\n\n",
            String::from_utf8(out)?
        );
        Ok(())
    }

    #[test]
    fn write_rejects_unbalanced() {
        let instructions = vec![Instruction::Open {
            name: "a".to_string(),
            attrs: Attributes::new(),
        }];

        let mut out = Vec::new();
        let err = write_document(&mut out, &instructions, None, Options::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::UnclosedElements { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn write_rejects_mismatched_close() {
        let instructions = vec![
            Instruction::Open {
                name: "a".to_string(),
                attrs: Attributes::new(),
            },
            Instruction::Close {
                name: "b".to_string(),
            },
        ];

        let mut out = Vec::new();
        let err = write_document(&mut out, &instructions, None, Options::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::MismatchedElement { .. })
        ));
        assert_eq!("", String::from_utf8_lossy(&out));
    }
}

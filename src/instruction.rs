// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Write instructions produced by a record mapper and replayed as a document.
//!
//! Instructions are serialized as JSON objects tagged with an `op` field,
//! one per line:
//!
//! ```text
//! {"op":"open","name":"iati-activities","attrs":[["version","2.03"]]}
//! {"op":"open","name":"iati-activity"}
//! {"op":"leaf","name":"iati-identifier","content":"OCHA-3W-SOM-1"}
//! {"op":"narrative","name":"title","text":"Water trucking"}
//! {"op":"leaf","name":"activity-status","attrs":[["code","2"]]}
//! {"op":"close","name":"iati-activity"}
//! {"op":"close","name":"iati-activities"}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{attr::Attributes, error::Result, sink::Sink, writer::XmlWriter};

/// A single write call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Instruction {
    /// Opens an element with [`XmlWriter::start_block()`].
    Open {
        /// Element name.
        name: String,
        /// Attributes in output order.
        #[serde(default, skip_serializing_if = "Attributes::is_empty")]
        attrs: Attributes,
    },
    /// Closes the innermost element with [`XmlWriter::end_block()`].
    Close {
        /// Element name.
        name: String,
    },
    /// Writes an element without children with
    /// [`XmlWriter::simple_element()`].
    Leaf {
        /// Element name.
        name: String,
        /// Attributes in output order.
        #[serde(default, skip_serializing_if = "Attributes::is_empty")]
        attrs: Attributes,
        /// Text content.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    /// Writes an element with a nested narrative with
    /// [`XmlWriter::narrative_element()`].
    Narrative {
        /// Element name.
        name: String,
        /// Attributes in output order.
        #[serde(default, skip_serializing_if = "Attributes::is_empty")]
        attrs: Attributes,
        /// Narrative text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

impl Instruction {
    /// Issues the instruction to the writer.
    ///
    /// # Errors
    ///
    /// Returns the writer's error if the call is rejected.
    pub fn apply<S: Sink>(&self, writer: &mut XmlWriter<S>) -> Result<()> {
        match self {
            Instruction::Open { name, attrs } => writer.start_block(name, attrs),
            Instruction::Close { name } => writer.end_block(name),
            Instruction::Leaf {
                name,
                attrs,
                content,
            } => writer.simple_element(name, attrs, content.as_deref()),
            Instruction::Narrative { name, attrs, text } => {
                writer.narrative_element(name, attrs, text.as_deref())
            }
        }
    }
}

/// A line of input which is not a valid instruction.
#[derive(Debug, Error)]
#[error("invalid instruction on line {line}: {source}")]
pub struct InstructionError {
    /// 1-based line number.
    pub line: usize,
    /// The JSON error.
    #[source]
    pub source: serde_json::Error,
}

/// Parses one instruction per line. Blank lines are skipped.
///
/// # Errors
///
/// Returns an error for the first line which is not a valid instruction.
///
/// ```
/// use iati_xml::instruction::{parse_json_lines, Instruction};
///
/// let input = r#"
/// {"op":"open","name":"root"}
/// {"op":"close","name":"root"}
/// "#;
///
/// let instructions = parse_json_lines(input)?;
/// assert_eq!(
///     instructions[1],
///     Instruction::Close { name: "root".to_string() }
/// );
/// # Ok::<(), iati_xml::instruction::InstructionError>(())
/// ```
pub fn parse_json_lines(
    input: &str,
) -> core::result::Result<Vec<Instruction>, InstructionError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| InstructionError {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Writes a complete document from a sequence of instructions.
///
/// The document is started with the given encoding, every instruction is
/// applied in order, and the document is ended. Replay stops at the first
/// rejected call; the output written so far is not a complete document and
/// the writer is reset so it can be reused.
///
/// # Errors
///
/// Returns the first error reported by the writer.
pub fn replay<'a, S, I>(
    writer: &mut XmlWriter<S>,
    instructions: I,
    encoding: Option<&str>,
) -> Result<()>
where
    S: Sink,
    I: IntoIterator<Item = &'a Instruction>,
{
    let result = replay_document(writer, instructions, encoding);
    if result.is_err() {
        writer.reset();
    }
    result
}

fn replay_document<'a, S, I>(
    writer: &mut XmlWriter<S>,
    instructions: I,
    encoding: Option<&str>,
) -> Result<()>
where
    S: Sink,
    I: IntoIterator<Item = &'a Instruction>,
{
    writer.start_document(encoding)?;
    let mut count = 0usize;
    for instruction in instructions {
        instruction.apply(writer)?;
        count += 1;
    }
    writer.end_document()?;
    debug!(count, "replayed instructions");
    Ok(())
}

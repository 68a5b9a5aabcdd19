//! CoNLL-style columnar reader and writer.
//!
//! One token per line as `text pos label` (tab or space separated), a blank
//! line between sentences. `#` comments and `-DOCSTART-` lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::error::{CrfNerError, Result};
use crate::sample::InputSample;

const DOCSTART: &str = "-DOCSTART-";

/// Written in place of a cell whose column is shorter than the others.
pub const MISSING: &str = "_";

/// Read every sentence of a CoNLL stream into samples.
pub fn read_conll<R: Read>(reader: R) -> Result<Vec<InputSample>> {
    let reader = BufReader::new(reader);

    let mut samples = Vec::new();
    let mut tokens = Vec::new();
    let mut pos_tags = Vec::new();
    let mut tags = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !tokens.is_empty() {
                samples.push(InputSample::new(
                    std::mem::take(&mut tokens),
                    std::mem::take(&mut pos_tags),
                    std::mem::take(&mut tags),
                ));
            }
            continue;
        }

        if line.starts_with('#') || line.starts_with(DOCSTART) {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let [text, pos, label] = parts.as_slice() else {
            return Err(CrfNerError::InvalidSample(format!(
                "line {}: expected 3 columns, found {}",
                line_no + 1,
                parts.len()
            )));
        };

        tokens.push(text.to_string());
        pos_tags.push(pos.to_string());
        tags.push(label.to_string());
    }

    if !tokens.is_empty() {
        samples.push(InputSample::new(tokens, pos_tags, tags));
    }

    Ok(samples)
}

/// Load samples from a CoNLL file.
pub fn load_conll<P: AsRef<Path>>(path: P) -> Result<Vec<InputSample>> {
    let file = File::open(path)?;
    read_conll(file)
}

fn cell(column: &[String], i: usize) -> &str {
    column.get(i).map_or(MISSING, String::as_str)
}

/// Write one sentence, followed by a blank separator line.
///
/// Columns of different lengths never lose rows: the sentence is as long as
/// its longest column and the gaps are filled with [`MISSING`].
pub fn write_conll<W: Write>(
    writer: &mut W,
    tokens: &[String],
    pos_tags: &[String],
    labels: &[String],
) -> Result<()> {
    let rows = tokens.len().max(pos_tags.len()).max(labels.len());
    for i in 0..rows {
        writeln!(
            writer,
            "{}\t{}\t{}",
            cell(tokens, i),
            cell(pos_tags, i),
            cell(labels, i)
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

//! Reading and writing sequence databases in the SPMF text format.
//!
//! One sequence per line, symbols as space-separated non-negative integers.
//! `-1` marks the end of an itemset and `-2` the end of a sequence; both
//! are accepted and skipped on input, and the writer emits them so the
//! files stay loadable by other SPMF-compatible tooling. Anything from a
//! `#` onwards is a comment. See
//! <https://www.philippe-fournier-viger.com/spmf/> for the format's home.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parse a sequence database from a file.
pub fn read_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u32>>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("failed to open sequence file: {}", path.as_ref().display()))?;
    parse_sequences(BufReader::new(file))
}

/// Parse a sequence database from any reader.
pub fn parse_sequences<R: BufRead>(reader: R) -> Result<Vec<Vec<u32>>> {
    let mut sequences = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", line_no + 1))?;
        let sequence = parse_line(&line)
            .with_context(|| format!("invalid symbol on line {}", line_no + 1))?;
        if !sequence.is_empty() {
            sequences.push(sequence);
        }
    }
    Ok(sequences)
}

fn parse_line(line: &str) -> Result<Vec<u32>> {
    let mut sequence = Vec::new();
    for token in line.split_whitespace() {
        if token.starts_with('#') {
            break;
        }
        if token == "-1" || token == "-2" {
            continue;
        }
        let symbol: u32 = token
            .parse()
            .with_context(|| format!("expected a non-negative integer, got {token:?}"))?;
        sequence.push(symbol);
    }
    Ok(sequence)
}

/// Write a sequence database, inserting the `-1` itemset and `-2` sequence
/// terminators.
pub fn write_sequences<P: AsRef<Path>>(path: P, sequences: &[Vec<u32>]) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("failed to create sequence file: {}", path.as_ref().display()))?;
    let mut writer = BufWriter::new(file);
    for sequence in sequences {
        let mut line = String::new();
        for symbol in sequence {
            line.push_str(&symbol.to_string());
            line.push_str(" -1 ");
        }
        line.push_str("-2");
        writeln!(writer, "{line}").context("failed to write sequence line")?;
    }
    writer.flush().context("failed to flush sequence file")?;
    Ok(())
}

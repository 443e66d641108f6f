//! Whole-file drivers for the TOSTEXT string table: table blob -> plain
//! text with a separator line after every entry, and back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::formats::tostext::{self, TextEncoding};

/// Fixed line separating entries in the extracted text file.
pub const SEPARATOR: &str = "-----";

/// Extracts every table entry to a text file. Damaged entries are written
/// as their placeholder so the file keeps one block per table slot.
pub fn extract(input: &Path, output: &Path, encoding: TextEncoding) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("reading {input:?}"))?;
    let entries = tostext::decode(&data, encoding).with_context(|| format!("decoding {input:?}"))?;

    let damaged = entries.iter().filter(|e| e.is_damaged()).count();
    if damaged > 0 {
        tracing::warn!("{damaged} of {} entries failed to decode", entries.len());
    }

    let mut out = String::new();
    for entry in &entries {
        out.push_str(&entry.text_or_placeholder());
        out.push('\n');
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    fs::write(output, out).with_context(|| format!("writing {output:?}"))?;

    tracing::info!("extracted {} strings from {:?}", entries.len(), input);
    Ok(())
}

/// Rebuilds a table blob from an extracted text file.
pub fn rebuild(input: &Path, output: &Path, encoding: TextEncoding) -> Result<()> {
    let content = fs::read_to_string(input).with_context(|| format!("reading {input:?}"))?;
    let strings = parse_entries(&content);
    tracing::info!("read {} strings from {:?}", strings.len(), input);

    let blob = tostext::encode(&strings, encoding)?;
    fs::write(output, blob).with_context(|| format!("writing {output:?}"))?;

    tracing::info!("rebuilt {:?} with {} strings", output, strings.len());
    Ok(())
}

/// Splits the sink file back into entries. Lines inside an entry rejoin
/// with CRLF, the line ending the binary format uses.
fn parse_entries(content: &str) -> Vec<String> {
    let mut strings = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line == SEPARATOR {
            strings.push(current.join("\r\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }

    // Trailing content without a closing separator still counts.
    let leftover = current.join("\r\n");
    if !leftover.is_empty() {
        strings.push(leftover);
    }

    strings
}

//! TOSTEXT string table codec.
//!
//! # Layout
//! ```text
//! 0 .. N*2:    N x offset: u16 little-endian (N = offset[0] / 2)
//! N*2 .. L-2:  concatenated encoded string bytes
//! L-2 .. L:    trailer bytes 1A FF
//! ```
//!
//! The table stores no entry count; it is self-describing, since the first
//! offset points just past the offset table itself. Entry lengths are the
//! gaps between neighboring offsets, except the last entry, which runs to
//! the trailer.

use std::fmt;

use crate::binary_utils::{push_u16_le, read_u16_le};
use crate::error::TosError;

/// Fixed 2-byte end marker closing every table blob.
pub const TRAILER: [u8; 2] = [0x1A, 0xFF];

/// How string bytes map to characters, uniform for a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// One byte per character, the low byte of its code point, verbatim.
    SingleByte,
    /// Characters above 0x7F become two bytes: the high byte of the code
    /// point with its top bit forced set, then the low byte. On decode a
    /// top-bit byte recombines with its successor, unless it is the last
    /// byte of the entry, in which case it stands alone.
    DualByte,
}

/// Decode result for one table entry. A damaged entry never aborts the
/// table; it is carried as a diagnostic next to its intact neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEntry {
    Text(String),
    Damaged { index: usize, reason: String },
}

impl TableEntry {
    /// The decoded text, or the fixed placeholder for a damaged entry.
    pub fn text_or_placeholder(&self) -> String {
        match self {
            TableEntry::Text(text) => text.clone(),
            TableEntry::Damaged { index, .. } => format!("[ERROR READING STRING {index}]"),
        }
    }

    pub fn is_damaged(&self) -> bool {
        matches!(self, TableEntry::Damaged { .. })
    }
}

impl fmt::Display for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text_or_placeholder())
    }
}

/// Decodes a table blob into its entries, in offset order.
///
/// Length mismatches clamp to the bytes actually available, and entries
/// whose offset lies outside the blob come back as [`TableEntry::Damaged`];
/// neither stops the batch. Only a structurally broken header aborts.
pub fn decode(data: &[u8], encoding: TextEncoding) -> Result<Vec<TableEntry>, TosError> {
    if data.len() < 2 {
        return Err(TosError::HeaderTruncated {
            len: data.len(),
            expected: 2,
        });
    }

    let first_offset = read_u16_le(data, 0).unwrap_or(0);
    if first_offset as usize > data.len() {
        return Err(TosError::BadFirstOffset {
            offset: first_offset,
            len: data.len(),
        });
    }
    let num_entries = first_offset as usize / 2;

    let mut offsets = Vec::with_capacity(num_entries);
    for i in 0..num_entries {
        // The whole offset table lies below first_offset, already bounds
        // checked against the blob.
        let offset = read_u16_le(data, i * 2).ok_or(TosError::BadFirstOffset {
            offset: first_offset,
            len: data.len(),
        })?;
        offsets.push(offset as usize);
    }

    let mut entries = Vec::with_capacity(num_entries);
    for i in 0..num_entries {
        let offset = offsets[i];
        if offset > data.len() {
            tracing::warn!(
                index = i,
                offset,
                "entry offset beyond end of table, substituting placeholder"
            );
            entries.push(TableEntry::Damaged {
                index: i,
                reason: format!("offset {offset:#06x} is beyond the end of the table"),
            });
            continue;
        }

        let declared = if i + 1 < num_entries {
            offsets[i + 1].saturating_sub(offset)
        } else {
            // The last entry runs up to the 2-byte trailer.
            data.len().saturating_sub(offset + TRAILER.len())
        };

        let available = data.len() - offset;
        let length = if declared > available {
            tracing::warn!(
                index = i,
                declared,
                available,
                "entry length exceeds available bytes, clamping"
            );
            available
        } else {
            declared
        };

        let text = decode_text(&data[offset..offset + length], encoding);
        entries.push(TableEntry::Text(
            text.trim_end_matches(['\r', '\n']).to_string(),
        ));
    }

    Ok(entries)
}

/// Encodes strings into a table blob: offsets, then bodies (each with a
/// CRLF appended), then the trailer.
pub fn encode(strings: &[String], encoding: TextEncoding) -> Result<Vec<u8>, TosError> {
    let bodies: Vec<Vec<u8>> = strings
        .iter()
        .map(|s| encode_text(&format!("{s}\r\n"), encoding))
        .collect();

    let header_size = strings.len() * 2;
    let total: usize =
        header_size + bodies.iter().map(Vec::len).sum::<usize>() + TRAILER.len();
    let mut out = Vec::with_capacity(total);

    let mut offset = header_size;
    for (i, body) in bodies.iter().enumerate() {
        if offset > u16::MAX as usize {
            return Err(TosError::TableTooLarge { index: i, offset });
        }
        push_u16_le(&mut out, offset as u16);
        offset += body.len();
    }

    for body in &bodies {
        out.extend_from_slice(body);
    }
    out.extend_from_slice(&TRAILER);

    Ok(out)
}

fn decode_text(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::SingleByte => bytes.iter().copied().map(char::from).collect(),
        TextEncoding::DualByte => {
            let mut out = String::with_capacity(bytes.len());
            let mut i = 0;
            while i < bytes.len() {
                let b = bytes[i];
                if b & 0x80 != 0 && i + 1 < bytes.len() {
                    // Mask off the forced marker bit so the code point
                    // written by encode_text comes back unchanged.
                    let code = (((b & 0x7F) as u32) << 8) | bytes[i + 1] as u32;
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    i += 2;
                } else {
                    // Includes a trailing top-bit byte with no successor.
                    out.push(char::from(b));
                    i += 1;
                }
            }
            out
        }
    }
}

fn encode_text(text: &str, encoding: TextEncoding) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        match encoding {
            TextEncoding::DualByte if code > 0x7F => {
                out.push((((code >> 8) & 0xFF) as u8) | 0x80);
                out.push((code & 0xFF) as u8);
            }
            _ => out.push((code & 0xFF) as u8),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hello_world_blob_layout() {
        let blob = encode(&strings(&["HELLO", "WORLD"]), TextEncoding::SingleByte).unwrap();

        let mut expected = vec![0x04, 0x00, 0x0B, 0x00];
        expected.extend_from_slice(b"HELLO\r\nWORLD\r\n");
        expected.extend_from_slice(&[0x1A, 0xFF]);
        assert_eq!(blob, expected);

        let entries = decode(&blob, TextEncoding::SingleByte).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], TableEntry::Text("HELLO".to_string()));
        assert_eq!(entries[1], TableEntry::Text("WORLD".to_string()));
    }

    #[test]
    fn test_entry_count_is_self_describing() {
        let input = strings(&["one", "two", "three", "four", "five"]);
        let blob = encode(&input, TextEncoding::SingleByte).unwrap();
        let entries = decode(&blob, TextEncoding::SingleByte).unwrap();
        assert_eq!(entries.len(), input.len());
        assert_eq!(entries[0].text_or_placeholder(), "one");
    }

    #[test]
    fn test_last_entry_length_stops_before_trailer() {
        // Offsets [4, 10], blob length 20: last entry is 20 - 10 - 2 = 8 bytes.
        let mut blob = vec![0x04, 0x00, 0x0A, 0x00];
        blob.extend_from_slice(b"AB\r\nCD"); // entry 0 spans offsets 4..10
        blob.extend_from_slice(b"WXYZ!!\r\n"); // entry 1, 8 bytes
        blob.extend_from_slice(&TRAILER);
        assert_eq!(blob.len(), 20);

        let entries = decode(&blob, TextEncoding::SingleByte).unwrap();
        assert_eq!(entries[1], TableEntry::Text("WXYZ!!".to_string()));
    }

    #[test]
    fn test_dual_byte_symmetry() {
        let blob = encode(&strings(&["\u{3042}"]), TextEncoding::DualByte).unwrap();
        // One entry: offset table [2], body B0 42 0D 0A, trailer.
        assert_eq!(blob, vec![0x02, 0x00, 0xB0, 0x42, 0x0D, 0x0A, 0x1A, 0xFF]);

        let entries = decode(&blob, TextEncoding::DualByte).unwrap();
        assert_eq!(entries[0], TableEntry::Text("\u{3042}".to_string()));
    }

    #[test]
    fn test_dual_byte_trailing_byte_decodes_alone() {
        assert_eq!(decode_text(&[0xB0], TextEncoding::DualByte), "\u{b0}");
        assert_eq!(
            decode_text(&[0x41, 0xB0], TextEncoding::DualByte),
            "A\u{b0}"
        );
    }

    #[test]
    fn test_single_byte_is_verbatim() {
        assert_eq!(encode_text("Aÿ", TextEncoding::SingleByte), vec![0x41, 0xFF]);
        assert_eq!(decode_text(&[0x41, 0xFF], TextEncoding::SingleByte), "Aÿ");
    }

    #[test]
    fn test_first_offset_beyond_blob_fails() {
        let err = decode(&[0xFF, 0x00], TextEncoding::SingleByte).unwrap_err();
        assert!(matches!(err, TosError::BadFirstOffset { offset: 0xFF, .. }));
    }

    #[test]
    fn test_length_overrun_clamps_and_bad_offset_degrades() {
        // Entry 0 claims to run to offset 9, but the blob ends at 8; entry 1
        // starts past the end entirely.
        let mut blob = vec![0x04, 0x00, 0x09, 0x00];
        blob.extend_from_slice(b"AB");
        blob.extend_from_slice(&TRAILER);
        assert_eq!(blob.len(), 8);

        let entries = decode(&blob, TextEncoding::SingleByte).unwrap();
        assert_eq!(entries.len(), 2);
        // Clamped read picks up the trailer bytes; nothing trims them.
        assert_eq!(
            entries[0],
            TableEntry::Text("AB\u{1a}\u{ff}".to_string())
        );
        assert!(entries[1].is_damaged());
        assert_eq!(
            entries[1].text_or_placeholder(),
            "[ERROR READING STRING 1]"
        );
    }

    #[test]
    fn test_offset_overflow_fails_encode() {
        let big = "A".repeat(70_000);
        let err = encode(&[big, "tail".to_string()], TextEncoding::SingleByte).unwrap_err();
        assert!(matches!(err, TosError::TableTooLarge { index: 1, .. }));
    }

    #[test]
    fn test_internal_line_breaks_survive() {
        let input = strings(&["line one\r\nline two"]);
        let blob = encode(&input, TextEncoding::SingleByte).unwrap();
        let entries = decode(&blob, TextEncoding::SingleByte).unwrap();
        assert_eq!(entries[0].text_or_placeholder(), "line one\r\nline two");
    }
}

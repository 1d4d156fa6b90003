//! Hex font parser (`CODEPOINT:HEXBYTES` lines -> glyph records)
//!
//! # Line format
//! ```text
//! 0041:0000000018242442427E424242420000
//! ^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! codepoint (hex)   glyph bytes (hex, multiple of 16 bytes)
//! ```
//!
//! Every 16 decoded bytes count as one unit of glyph width. Records are kept in
//! input order; ordering and duplicates are not checked.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{Result, UnihexError};

/// Bytes per unit of glyph width
pub const GLYPH_ROW_BYTES: usize = 16;

/// Highest valid Unicode scalar value
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// One parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub codepoint: u32,
    /// Glyph width in 16-byte units
    pub width: u32,
    /// Start of this glyph's bytes in the glyph buffer
    pub offset: u32,
}

/// Parser output: the records plus the concatenated glyph bitmaps
#[derive(Debug, Default)]
pub struct ParsedFont {
    pub records: Vec<GlyphRecord>,
    pub glyphs: Vec<u8>,
}

impl ParsedFont {
    /// Decode one line and append its bytes to the glyph buffer
    fn push_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let (ucs, bytes) = line
            .split_once(':')
            .ok_or_else(|| UnihexError::format(line_no, "missing ':' separator"))?;

        let codepoint = u32::from_str_radix(ucs.trim(), 16).map_err(|e| {
            UnihexError::format(line_no, format!("invalid codepoint {:?}: {}", ucs, e))
        })?;
        if codepoint > MAX_CODEPOINT {
            return Err(UnihexError::format(
                line_no,
                format!("codepoint {:X} is beyond U+10FFFF", codepoint),
            ));
        }

        let bitmap = hex::decode(bytes.trim())
            .map_err(|e| UnihexError::format(line_no, format!("invalid glyph hex: {}", e)))?;
        if bitmap.is_empty() || bitmap.len() % GLYPH_ROW_BYTES != 0 {
            return Err(UnihexError::format(
                line_no,
                format!(
                    "glyph has {} bytes, expected a non-zero multiple of {}",
                    bitmap.len(),
                    GLYPH_ROW_BYTES
                ),
            ));
        }

        if let Some(prev) = self.records.last().filter(|prev| codepoint <= prev.codepoint) {
            tracing::debug!(
                "line {}: codepoint {:X} does not follow {:X}",
                line_no,
                codepoint,
                prev.codepoint
            );
        }

        let offset = u32::try_from(self.glyphs.len()).map_err(|_| UnihexError::Overflow {
            field: "offset",
            value: self.glyphs.len() as u64,
        })?;

        self.records.push(GlyphRecord {
            codepoint,
            width: (bitmap.len() / GLYPH_ROW_BYTES) as u32,
            offset,
        });
        self.glyphs.extend_from_slice(&bitmap);
        Ok(())
    }
}

/// Parse a hex font from any buffered reader
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParsedFont> {
    let mut font = ParsedFont::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => UnihexError::format(line_no, "line is not valid UTF-8"),
            _ => UnihexError::io("<input>", e),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        font.push_line(line_no, line)?;
    }

    Ok(font)
}

/// Parse a hex font file
pub fn parse_file(input: &Path) -> Result<ParsedFont> {
    let file = File::open(input).map_err(|source| UnihexError::InputNotFound {
        path: input.to_path_buf(),
        source,
    })?;

    let font = parse_reader(BufReader::new(file)).map_err(|e| match e {
        UnihexError::Io { source, .. } => UnihexError::io(input, source),
        other => other,
    })?;

    tracing::debug!(
        "Parsed {} glyphs ({} bytes) from {:?}",
        font.records.len(),
        font.glyphs.len(),
        input
    );
    Ok(font)
}

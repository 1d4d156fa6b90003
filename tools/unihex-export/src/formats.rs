//! unifont.dat binary format
//!
//! POD format - no magic bytes. Every field is a big-endian signed 32-bit integer.
//!
//! # Layout
//! ```text
//! 0x00: range_count i32
//! 0x04: compressed_size i32
//! 0x08: uncompressed_size i32
//! 0x0C: range_count × RangeRecord (16 bytes each)
//!         low i32, high i32, width i32, offset i32
//! ....: compressed_size bytes of zlib-compressed glyph data
//! ```

use crate::compress::decompress;
use crate::error::{Result, UnihexError};
use crate::ranges::Range;

fn to_field(field: &'static str, value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| UnihexError::Overflow {
        field,
        value: value as u64,
    })
}

fn read_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// unifont.dat header (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnifontHeader {
    pub range_count: i32,
    pub compressed_size: i32,
    pub uncompressed_size: i32,
}

impl UnifontHeader {
    pub const SIZE: usize = 12;

    /// Build a header from in-memory lengths, rejecting values past `i32::MAX`
    pub fn new(
        range_count: usize,
        compressed_size: usize,
        uncompressed_size: usize,
    ) -> Result<Self> {
        Ok(Self {
            range_count: to_field("range_count", range_count)?,
            compressed_size: to_field("compressed_size", compressed_size)?,
            uncompressed_size: to_field("uncompressed_size", uncompressed_size)?,
        })
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.range_count.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.compressed_size.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.uncompressed_size.to_be_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            range_count: read_i32(bytes, 0),
            compressed_size: read_i32(bytes, 4),
            uncompressed_size: read_i32(bytes, 8),
        })
    }
}

/// One entry of the range table (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRecord {
    pub low: i32,
    pub high: i32,
    pub width: i32,
    pub offset: i32,
}

impl RangeRecord {
    pub const SIZE: usize = 16;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.low.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.high.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.width.to_be_bytes());
        bytes[12..16].copy_from_slice(&self.offset.to_be_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            low: read_i32(bytes, 0),
            high: read_i32(bytes, 4),
            width: read_i32(bytes, 8),
            offset: read_i32(bytes, 12),
        })
    }
}

impl TryFrom<&Range> for RangeRecord {
    type Error = UnihexError;

    fn try_from(range: &Range) -> Result<Self> {
        Ok(Self {
            low: to_field("low", range.low as usize)?,
            high: to_field("high", range.high as usize)?,
            width: to_field("width", range.width as usize)?,
            offset: to_field("offset", range.offset as usize)?,
        })
    }
}

/// Serialize a complete unifont.dat image
pub fn encode_unifont_dat(
    ranges: &[Range],
    compressed: &[u8],
    uncompressed_size: usize,
) -> Result<Vec<u8>> {
    let header = UnifontHeader::new(ranges.len(), compressed.len(), uncompressed_size)?;

    let table_len = ranges.len() * RangeRecord::SIZE;
    let mut out = Vec::with_capacity(UnifontHeader::SIZE + table_len + compressed.len());
    out.extend_from_slice(&header.to_bytes());
    for range in ranges {
        out.extend_from_slice(&RangeRecord::try_from(range)?.to_bytes());
    }
    out.extend_from_slice(compressed);
    Ok(out)
}

/// Decoded unifont.dat image
#[derive(Debug, Clone)]
pub struct UnifontTable {
    pub header: UnifontHeader,
    pub ranges: Vec<RangeRecord>,
    /// Inflated glyph buffer
    pub glyphs: Vec<u8>,
}

impl UnifontTable {
    /// Parse and inflate a unifont.dat image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = UnifontHeader::from_bytes(bytes).ok_or_else(|| {
            UnihexError::Corrupt(format!("{} bytes is too small for header", bytes.len()))
        })?;

        let counts = [
            ("range_count", header.range_count),
            ("compressed_size", header.compressed_size),
            ("uncompressed_size", header.uncompressed_size),
        ];
        for (name, value) in counts {
            if value < 0 {
                return Err(UnihexError::Corrupt(format!("negative {}: {}", name, value)));
            }
        }

        let table_end = UnifontHeader::SIZE + header.range_count as usize * RangeRecord::SIZE;
        let data_end = table_end + header.compressed_size as usize;
        if bytes.len() < data_end {
            return Err(UnihexError::Corrupt(format!(
                "image is {} bytes, header declares {}",
                bytes.len(),
                data_end
            )));
        }

        let ranges = bytes[UnifontHeader::SIZE..table_end]
            .chunks_exact(RangeRecord::SIZE)
            .filter_map(RangeRecord::from_bytes)
            .collect();

        let expected = header.uncompressed_size as usize;
        let glyphs = decompress(&bytes[table_end..data_end], expected)?;
        if glyphs.len() != expected {
            return Err(UnihexError::Corrupt(format!(
                "glyph data inflates to {} bytes, header declares {}",
                glyphs.len(),
                expected
            )));
        }

        Ok(Self {
            header,
            ranges,
            glyphs,
        })
    }
}

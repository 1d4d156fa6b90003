//! Glyph buffer compression (zlib stream, default level)

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::{Result, UnihexError};

/// Compress the glyph buffer into a raw zlib stream
pub fn compress(glyphs: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(glyphs.len() / 2),
        Compression::default(),
    );
    encoder
        .write_all(glyphs)
        .map_err(|e| UnihexError::io("<glyph buffer>", e))?;
    encoder
        .finish()
        .map_err(|e| UnihexError::io("<glyph buffer>", e))
}

/// Deflate cannot expand input by more than this factor
const MAX_INFLATE_RATIO: usize = 1032;

/// Inflate a zlib stream produced by [`compress`].
///
/// Output stops one byte past `expected_len`, so a stream that inflates to more
/// than declared is reported without being fully expanded.
pub fn decompress(data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let capacity = expected_len.min(data.len().saturating_mul(MAX_INFLATE_RATIO));
    let mut out = Vec::with_capacity(capacity);
    ZlibDecoder::new(data)
        .take((expected_len as u64).saturating_add(1))
        .read_to_end(&mut out)
        .map_err(|e| UnihexError::Corrupt(format!("glyph data does not inflate: {}", e)))?;
    if out.len() > expected_len {
        return Err(UnihexError::Corrupt(format!(
            "glyph data inflates past the declared {} bytes",
            expected_len
        )));
    }
    Ok(out)
}

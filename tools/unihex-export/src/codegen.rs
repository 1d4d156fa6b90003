//! C header generation (unifont.h)
//!
//! Embeds the range table as four parallel arrays plus the uncompressed glyph
//! buffer, for compiling the font straight into a host program.

use std::fmt::Write;

use crate::ranges::Range;

/// Glyph bytes per line of the data array
pub const BYTES_PER_LINE: usize = 8;

// Zero-length arrays are not valid C, so empty tables only get the count
fn write_int_array(out: &mut String, name: &str, values: impl Iterator<Item = u32>, len: usize) {
    if len == 0 {
        return;
    }
    let _ = writeln!(out, "static const int unifont_{}[{}] = {{", name, len);
    for value in values {
        let _ = writeln!(out, "\t{},", value);
    }
    out.push_str("};\n");
}

/// Render unifont.h for the given ranges and raw glyph buffer
pub fn generate_c_header(ranges: &[Range], glyphs: &[u8]) -> String {
    let mut out = String::new();
    let count = ranges.len();

    let _ = writeln!(out, "#define unifont_count {}", count);
    write_int_array(&mut out, "low", ranges.iter().map(|r| r.low), count);
    write_int_array(&mut out, "high", ranges.iter().map(|r| r.high), count);
    write_int_array(&mut out, "width", ranges.iter().map(|r| r.width), count);
    write_int_array(&mut out, "offset", ranges.iter().map(|r| r.offset), count);

    if glyphs.is_empty() {
        return out;
    }
    let _ = writeln!(out, "static const unsigned char unifont_data[{}] = {{", glyphs.len());
    for line in glyphs.chunks(BYTES_PER_LINE) {
        out.push('\t');
        for byte in line {
            let _ = write!(out, "0x{:02x},", byte);
        }
        out.push('\n');
    }
    out.push_str("};\n");

    out
}

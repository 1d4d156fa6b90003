//! Integration tests for unihex-export
//!
//! Tests the full pipeline: write hex font -> run binary -> verify output

use std::path::Path;
use std::process::Output;
use tempfile::tempdir;
use unihex_export::{DAT_FILE, HEADER_FILE, UnifontTable};

/// One glyph line with `width` × 16 bytes of `fill`
fn glyph_line(codepoint: u32, width: usize, fill: u8) -> String {
    format!("{:04X}:{}\n", codepoint, format!("{:02X}", fill).repeat(width * 16))
}

// Helper to run the unihex-export binary with the output directory set
fn run_export(input: &Path, out_dir: &Path, extra: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_unihex-export"))
        .arg(input)
        .arg("-o")
        .arg(out_dir)
        .args(extra)
        .output()
        .expect("Failed to run unihex-export")
}

fn read_table(dir: &Path) -> UnifontTable {
    let data = std::fs::read(dir.join(DAT_FILE)).expect("Failed to read unifont.dat");
    UnifontTable::from_bytes(&data).expect("Failed to parse unifont.dat")
}

/// Test run merging across a width change
#[test]
fn test_run_merging() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("font.hex");
    let hex: String = [
        glyph_line(0x41, 1, 0x01),
        glyph_line(0x42, 1, 0x02),
        glyph_line(0x43, 1, 0x03),
        glyph_line(0x44, 2, 0x04),
    ]
    .concat();
    std::fs::write(&input, hex).unwrap();

    let output = run_export(&input, dir.path(), &["--verify"]);
    assert!(output.status.success(), "unihex-export failed: {:?}", output);

    let table = read_table(dir.path());
    assert_eq!(table.header.range_count, 2);
    let ranges: Vec<_> = table
        .ranges
        .iter()
        .map(|r| (r.low, r.high, r.width, r.offset))
        .collect();
    assert_eq!(ranges, vec![(0x41, 0x43, 1, 0), (0x44, 0x44, 2, 48)]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "4 characters");
    assert_eq!(lines[1], "2 ranges");
    assert_eq!(lines[2], "80 bytes of uncompressed glyph data");
    assert_eq!(lines[4], "\t41 43 (3) 1 0");
    assert_eq!(lines[5], "\t44 44 (1) 2 48");
}

/// Test single-record input
#[test]
fn test_single_record() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("one.hex");
    std::fs::write(&input, glyph_line(0x41, 1, 0xAA)).unwrap();

    let output = run_export(&input, dir.path(), &[]);
    assert!(output.status.success());

    let table = read_table(dir.path());
    assert_eq!(table.header.range_count, 1);
    assert_eq!(table.header.uncompressed_size, 16);
    assert_eq!(
        (table.ranges[0].low, table.ranges[0].high, table.ranges[0].width, table.ranges[0].offset),
        (0x41, 0x41, 1, 0)
    );
    assert_eq!(table.glyphs, vec![0xAA; 16]);
}

/// Test that the compressed segment inflates to the concatenated glyphs
#[test]
fn test_glyph_data_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("font.hex");

    let mut hex = String::new();
    let mut expected = Vec::new();
    for cp in 0x20u32..0x120 {
        let width = if (0x80..0xA0).contains(&cp) { 2 } else { 1 };
        let fill = (cp % 256) as u8;
        hex.push_str(&glyph_line(cp, width, fill));
        expected.extend(std::iter::repeat_n(fill, width * 16));
    }
    std::fs::write(&input, hex).unwrap();

    let output = run_export(&input, dir.path(), &[]);
    assert!(output.status.success());

    let table = read_table(dir.path());
    assert_eq!(table.header.uncompressed_size as usize, expected.len());
    assert_eq!(table.glyphs, expected);

    // Ranges cover every codepoint exactly once, in order
    let covered: Vec<i32> = table.ranges.iter().flat_map(|r| r.low..=r.high).collect();
    assert_eq!(covered, (0x20..0x120).collect::<Vec<i32>>());
    assert_eq!(table.ranges.len(), 3);
}

/// Test the generated C header
#[test]
fn test_c_header_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("font.hex");
    let hex = [glyph_line(0x41, 1, 0x10), glyph_line(0x42, 1, 0x20)].concat();
    std::fs::write(&input, hex).unwrap();

    let output = run_export(&input, dir.path(), &[]);
    assert!(output.status.success());

    let header = std::fs::read_to_string(dir.path().join(HEADER_FILE)).unwrap();
    assert!(header.contains("#define unifont_count 1"));
    assert!(header.contains("static const unsigned char unifont_data[32] = {"));
    assert_eq!(header.matches("0x10,").count(), 16);
    assert_eq!(header.matches("0x20,").count(), 16);
}

/// Test --no-header
#[test]
fn test_no_header_flag() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("font.hex");
    std::fs::write(&input, glyph_line(0x41, 1, 0)).unwrap();

    let output = run_export(&input, dir.path(), &["--no-header"]);
    assert!(output.status.success());
    assert!(dir.path().join(DAT_FILE).exists());
    assert!(!dir.path().join(HEADER_FILE).exists());
}

/// Test that a 15-byte glyph aborts without writing artifacts
#[test]
fn test_malformed_glyph_aborts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("bad.hex");
    std::fs::write(&input, format!("0041:{}\n", "00".repeat(15))).unwrap();

    let output = run_export(&input, dir.path(), &[]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
    assert!(!dir.path().join(DAT_FILE).exists());
    assert!(!dir.path().join(HEADER_FILE).exists());
}

/// Test that an unwritable output location fails without leaving files
#[test]
fn test_missing_out_dir_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("font.hex");
    std::fs::write(&input, glyph_line(0x41, 1, 0)).unwrap();
    let out_dir = dir.path().join("missing");

    let output = run_export(&input, &out_dir, &[]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
    assert!(!out_dir.exists());
}

/// Test that a missing input file fails
#[test]
fn test_missing_input_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = run_export(&dir.path().join("nope.hex"), dir.path(), &[]);
    assert!(!output.status.success());
    assert!(!dir.path().join(DAT_FILE).exists());
}

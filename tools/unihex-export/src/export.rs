//! Export pipeline: parse -> compact -> compress -> write artifacts

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::codegen::generate_c_header;
use crate::compress::compress;
use crate::error::{Result, UnihexError};
use crate::formats::{UnifontTable, encode_unifont_dat};
use crate::parse::{GlyphRecord, ParsedFont, parse_file};
use crate::ranges::{Range, compact};

/// Binary table file name
pub const DAT_FILE: &str = "unifont.dat";

/// C header file name
pub const HEADER_FILE: &str = "unifont.h";

/// Everything derived from one input font
#[derive(Debug)]
pub struct FontExport {
    pub records: Vec<GlyphRecord>,
    /// Uncompressed glyph buffer
    pub glyphs: Vec<u8>,
    pub ranges: Vec<Range>,
    /// zlib stream of `glyphs`
    pub compressed: Vec<u8>,
}

impl FontExport {
    /// Run compaction and compression over an already parsed font
    pub fn from_parsed(font: ParsedFont) -> Result<Self> {
        let ranges = compact(&font.records);
        let compressed = compress(&font.glyphs)?;
        tracing::debug!(
            "{} ranges, {} -> {} bytes",
            ranges.len(),
            font.glyphs.len(),
            compressed.len()
        );

        Ok(Self {
            records: font.records,
            glyphs: font.glyphs,
            ranges,
            compressed,
        })
    }

    /// Complete unifont.dat image
    pub fn dat_bytes(&self) -> Result<Vec<u8>> {
        encode_unifont_dat(&self.ranges, &self.compressed, self.glyphs.len())
    }

    /// Complete unifont.h source
    pub fn c_header(&self) -> String {
        generate_c_header(&self.ranges, &self.glyphs)
    }

    /// Print the run summary followed by one line per range
    pub fn write_summary<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "{} characters", self.records.len())?;
        writeln!(w, "{} ranges", self.ranges.len())?;
        writeln!(w, "{} bytes of uncompressed glyph data", self.glyphs.len())?;
        writeln!(w, "{} bytes of compressed glyph data", self.compressed.len())?;
        for r in &self.ranges {
            writeln!(
                w,
                "\t{:x} {:x} ({}) {} {}",
                r.low,
                r.high,
                r.count(),
                r.width,
                r.offset
            )?;
        }
        Ok(())
    }
}

/// Parse, compact and compress a hex font file
pub fn build(input: &Path) -> Result<FontExport> {
    FontExport::from_parsed(parse_file(input)?)
}

/// Library form of the command-line options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// Also write unifont.h
    pub write_header: bool,
    /// Re-read unifont.dat after writing and compare with the in-memory tables
    pub verify: bool,
}

impl ExportOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            out_dir: PathBuf::from("."),
            write_header: true,
            verify: false,
        }
    }
}

/// Paths of the artifacts written by [`export`]
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub dat: PathBuf,
    pub header: Option<PathBuf>,
}

/// Run the whole export. Both images are built before any file is created, and
/// every file touched is removed again if a later step fails.
pub fn export(options: &ExportOptions) -> Result<(FontExport, ExportedFiles)> {
    let font = build(&options.input)?;

    let dat = font.dat_bytes()?;
    let header = options.write_header.then(|| font.c_header());

    let files = write_all_or_nothing(options, &font, &dat, header)?;
    Ok((font, files))
}

fn write_all_or_nothing(
    options: &ExportOptions,
    font: &FontExport,
    dat: &[u8],
    header: Option<String>,
) -> Result<ExportedFiles> {
    let mut touched = Vec::new();
    write_artifacts(options, font, dat, header, &mut touched).inspect_err(|_| {
        for path in &touched {
            if std::fs::remove_file(path).is_ok() {
                tracing::debug!("Removed partial {:?}", path);
            }
        }
    })
}

/// Write (and optionally verify) the artifacts, recording each path before it is created
fn write_artifacts(
    options: &ExportOptions,
    font: &FontExport,
    dat: &[u8],
    header: Option<String>,
    touched: &mut Vec<PathBuf>,
) -> Result<ExportedFiles> {
    let dat_path = options.out_dir.join(DAT_FILE);
    touched.push(dat_path.clone());
    std::fs::write(&dat_path, dat).map_err(|e| UnihexError::io(&dat_path, e))?;
    tracing::info!("Wrote {:?} ({} bytes)", dat_path, dat.len());

    let header_path = match header {
        Some(source) => {
            let path = options.out_dir.join(HEADER_FILE);
            touched.push(path.clone());
            std::fs::write(&path, source).map_err(|e| UnihexError::io(&path, e))?;
            tracing::info!("Wrote {:?}", path);
            Some(path)
        }
        None => None,
    };

    if options.verify {
        verify_dat(&dat_path, font)?;
        tracing::info!("Verified {:?}", dat_path);
    }

    Ok(ExportedFiles {
        dat: dat_path,
        header: header_path,
    })
}

/// Check a written unifont.dat against the tables it was built from
pub fn verify_dat(path: &Path, font: &FontExport) -> Result<()> {
    let bytes = std::fs::read(path).map_err(|e| UnihexError::io(path, e))?;
    let table = UnifontTable::from_bytes(&bytes)?;

    if table.ranges.len() != font.ranges.len() {
        return Err(UnihexError::Corrupt(format!(
            "{} ranges on disk, {} expected",
            table.ranges.len(),
            font.ranges.len()
        )));
    }
    for (i, (on_disk, range)) in table.ranges.iter().zip(&font.ranges).enumerate() {
        let expected = [range.low, range.high, range.width, range.offset];
        let actual = [on_disk.low, on_disk.high, on_disk.width, on_disk.offset].map(|v| v as u32);
        if actual != expected {
            return Err(UnihexError::Corrupt(format!("range {} differs", i)));
        }
    }
    if table.glyphs != font.glyphs {
        return Err(UnihexError::Corrupt("glyph data differs".into()));
    }
    Ok(())
}

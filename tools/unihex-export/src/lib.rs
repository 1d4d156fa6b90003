//! unihex-export library
//!
//! Converts Unifont-style `.hex` fonts into a compressed range table
//! (unifont.dat) and an embeddable C header (unifont.h).

pub mod codegen;
pub mod compress;
pub mod error;
pub mod export;
pub mod formats;
pub mod parse;
pub mod ranges;

pub use error::{Result, UnihexError};
pub use export::{
    DAT_FILE, ExportOptions, ExportedFiles, FontExport, HEADER_FILE, build, export,
};
pub use formats::{RangeRecord, UnifontHeader, UnifontTable};
pub use parse::{GlyphRecord, ParsedFont};
pub use ranges::Range;

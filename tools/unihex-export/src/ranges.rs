//! Range compaction (glyph records -> width runs)

use crate::parse::GlyphRecord;

/// A maximal run `[low, high]` of sequential codepoints sharing one width.
/// Member glyph bytes are contiguous starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub low: u32,
    pub high: u32,
    pub width: u32,
    pub offset: u32,
}

impl Range {
    fn open(record: &GlyphRecord) -> Self {
        Self {
            low: record.codepoint,
            high: record.codepoint,
            width: record.width,
            offset: record.offset,
        }
    }

    /// Number of codepoints covered
    pub fn count(&self) -> u32 {
        self.high - self.low + 1
    }

    fn extends_to(&self, record: &GlyphRecord) -> bool {
        self.high.checked_add(1) == Some(record.codepoint) && self.width == record.width
    }
}

/// Merge records into ranges, in input order.
///
/// A new range starts whenever a record is not `high + 1` of the open range or
/// has a different width. Out-of-order input is not corrected.
pub fn compact(records: &[GlyphRecord]) -> Vec<Range> {
    let mut ranges = Vec::new();
    let mut current: Option<Range> = None;

    for record in records {
        match current.as_mut() {
            Some(open) if open.extends_to(record) => open.high = record.codepoint,
            _ => {
                if let Some(closed) = current.replace(Range::open(record)) {
                    ranges.push(closed);
                }
            }
        }
    }

    ranges.extend(current);
    ranges
}

//! Parser for binary DPLCs
//!
//! DPLC files use the same frame offset table as mappings. Each frame body is
//! an entry count followed by one word per entry.

use std::io::Cursor;

use tracing::debug;

use crate::{
    binary_utils::{read_u16_be, read_u8, seek_to},
    dplc::model::{DplcCopy, DplcFrame, DynamicPatternLoadCues},
    error::ParseResult,
    format::Format,
    offset_table::frame_offsets,
};

impl DynamicPatternLoadCues {
    /// Decode a DPLC binary. Entries are kept exactly as stored, so adjacent
    /// copies are not merged.
    pub fn from_bytes(data: &[u8], format: Format) -> ParseResult<DynamicPatternLoadCues> {
        parse_dplcs(data, format)
    }
}

pub fn parse_dplcs(data: &[u8], format: Format) -> ParseResult<DynamicPatternLoadCues> {
    let offsets = frame_offsets(data, format)?;
    let mut cursor = Cursor::new(data);
    let mut frames = Vec::with_capacity(offsets.len());

    for offset in offsets {
        // A zero offset is an empty frame, not a pointer at the table itself
        if offset == 0 {
            frames.push(DplcFrame::default());
            continue;
        }

        seek_to(&mut cursor, offset)?;
        frames.push(parse_frame(&mut cursor, format)?);
    }

    let dplcs = DynamicPatternLoadCues { format, frames };
    debug!(
        "Parsed {} DPLC frames ({} copies) in {} format",
        dplcs.frames.len(),
        dplcs.total_copies(),
        format
    );

    Ok(dplcs)
}

pub fn parse_frame(cursor: &mut Cursor<&[u8]>, format: Format) -> ParseResult<DplcFrame> {
    let total_entries = match format {
        Format::Sonic1 => read_u8(cursor)? as usize,
        Format::Sonic2 => read_u16_be(cursor)? as usize,
        // Stored minus one; 0xFFFF is an empty frame
        Format::Sonic3AndKnuckles => read_u16_be(cursor)?.wrapping_add(1) as usize,
    };

    let mut copies = Vec::with_capacity(total_entries.min(0x100));
    for _ in 0..total_entries {
        copies.push(decode_entry(read_u16_be(cursor)?, format));
    }

    Ok(DplcFrame { copies })
}

/// Unpack one entry word
pub fn decode_entry(entry: u16, format: Format) -> DplcCopy {
    match format {
        Format::Sonic1 | Format::Sonic2 => DplcCopy {
            start: (entry & 0x0FFF) as usize,
            length: ((entry >> 12) as usize) + 1,
        },
        Format::Sonic3AndKnuckles => DplcCopy {
            start: (entry >> 4) as usize,
            length: ((entry & 0x000F) as usize) + 1,
        },
    }
}

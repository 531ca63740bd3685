//! Binary writer for DPLCs

use crate::{
    binary_utils::{write_u16_be, write_u8},
    dplc::{
        model::{DplcCopy, DplcFrame, DynamicPatternLoadCues},
        MAX_ENTRY_LENGTH, MAX_ENTRY_START,
    },
    error::{ensure_in_range, EncodeResult},
    format::Format,
    offset_table::write_frames,
};

impl DynamicPatternLoadCues {
    pub fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        self.to_bytes_as(self.format)
    }

    pub fn to_bytes_as(&self, format: Format) -> EncodeResult<Vec<u8>> {
        write_frames(&self.frames, |frame, out| write_frame(frame, format, out))
    }
}

/// Split copies into entries a binary word can hold. Copies longer than
/// [`MAX_ENTRY_LENGTH`] become consecutive entries covering the same tiles.
pub fn frame_entries(frame: &DplcFrame) -> EncodeResult<Vec<DplcCopy>> {
    let mut entries = Vec::with_capacity(frame.copies.len());

    for copy in &frame.copies {
        let mut start = copy.start;
        let mut remaining = copy.length;

        while remaining > 0 {
            let length = remaining.min(MAX_ENTRY_LENGTH);
            ensure_in_range("DPLC start tile", start as i64, 0, MAX_ENTRY_START as i64)?;

            entries.push(DplcCopy { start, length });
            start += length;
            remaining -= length;
        }
    }

    Ok(entries)
}

/// Pack one entry. `entry` must already fit (see [`frame_entries`]).
pub fn encode_entry(entry: &DplcCopy, format: Format) -> u16 {
    let start = entry.start as u16;
    let length = (entry.length - 1) as u16;

    match format {
        Format::Sonic1 | Format::Sonic2 => (length << 12) | (start & 0x0FFF),
        Format::Sonic3AndKnuckles => (start << 4) | (length & 0x000F),
    }
}

/// Entry count as the format stores it in the frame header
pub fn encode_count(total_entries: usize, format: Format) -> EncodeResult<u16> {
    match format {
        Format::Sonic1 => {
            ensure_in_range("DPLC entry count", total_entries as i64, 0, u8::MAX as i64)?;
            Ok(total_entries as u16)
        }
        Format::Sonic2 => {
            ensure_in_range("DPLC entry count", total_entries as i64, 0, u16::MAX as i64)?;
            Ok(total_entries as u16)
        }
        Format::Sonic3AndKnuckles => {
            ensure_in_range("DPLC entry count", total_entries as i64, 0, u16::MAX as i64)?;
            Ok((total_entries as u16).wrapping_sub(1))
        }
    }
}

pub fn write_frame(frame: &DplcFrame, format: Format, out: &mut Vec<u8>) -> EncodeResult<()> {
    let entries = frame_entries(frame)?;
    let count = encode_count(entries.len(), format)?;

    match format {
        Format::Sonic1 => write_u8(out, count as u8),
        Format::Sonic2 | Format::Sonic3AndKnuckles => write_u16_be(out, count),
    }

    for entry in &entries {
        write_u16_be(out, encode_entry(entry, format));
    }

    Ok(())
}

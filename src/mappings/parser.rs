//! Parser for binary sprite mappings
//!
//! Frames are located through the offset table heuristic in
//! [`crate::offset_table`]; each frame body is a piece count followed by
//! fixed-size piece records whose layout depends on the [`Format`].

use std::io::Cursor;

use tracing::debug;

use crate::{
    binary_utils::{read_i16_be, read_i8, read_u16_be, read_u8, seek_to},
    error::ParseResult,
    format::Format,
    mappings::model::{SpriteFrame, SpriteMappings, SpritePiece},
    offset_table::frame_offsets,
};

impl SpriteMappings {
    /// Decode a mappings binary. An empty buffer gives empty mappings.
    pub fn from_bytes(data: &[u8], format: Format) -> ParseResult<SpriteMappings> {
        parse_mappings(data, format)
    }
}

pub fn parse_mappings(data: &[u8], format: Format) -> ParseResult<SpriteMappings> {
    let offsets = frame_offsets(data, format)?;
    let mut cursor = Cursor::new(data);
    let mut frames = Vec::with_capacity(offsets.len());

    for offset in offsets {
        // A zero offset is an empty frame, not a pointer at the table itself
        if offset == 0 {
            frames.push(SpriteFrame::default());
            continue;
        }

        seek_to(&mut cursor, offset)?;
        frames.push(parse_frame(&mut cursor, format)?);
    }

    let mappings = SpriteMappings { format, frames };
    debug!(
        "Parsed {} mapping frames ({} pieces) in {} format",
        mappings.frames.len(),
        mappings.total_pieces(),
        format
    );

    Ok(mappings)
}

/// Decode one frame body at the cursor
pub fn parse_frame(cursor: &mut Cursor<&[u8]>, format: Format) -> ParseResult<SpriteFrame> {
    let total_pieces = match format {
        Format::Sonic1 => read_u8(cursor)? as usize,
        Format::Sonic2 | Format::Sonic3AndKnuckles => read_u16_be(cursor)? as usize,
    };

    let mut pieces = Vec::with_capacity(total_pieces.min(0x100));
    for _ in 0..total_pieces {
        pieces.push(parse_piece(cursor, format)?);
    }

    Ok(SpriteFrame { pieces })
}

/// Decode one piece record at the cursor
pub fn parse_piece(cursor: &mut Cursor<&[u8]>, format: Format) -> ParseResult<SpritePiece> {
    let y = read_i8(cursor)? as i16;
    let size = read_u8(cursor)?;
    let art = read_u16_be(cursor)?;

    let x = match format {
        Format::Sonic1 => read_i8(cursor)? as i16,
        Format::Sonic2 => {
            // Two-player art word, derived from `art` when writing
            read_u16_be(cursor)?;
            read_i16_be(cursor)?
        }
        Format::Sonic3AndKnuckles => read_i16_be(cursor)?,
    };

    Ok(SpritePiece::from_packed(x, y, size, art))
}

//! Binary writer for sprite mappings

use crate::{
    binary_utils::{write_u16_be, write_u8},
    error::{ensure_in_range, EncodeResult},
    format::Format,
    mappings::{
        flags,
        model::{SpriteFrame, SpriteMappings, SpritePiece},
        MAX_PIECE_TILES,
    },
    offset_table::write_frames,
};

impl SpriteMappings {
    /// Encode in this mappings' own format
    pub fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        self.to_bytes_as(self.format)
    }

    /// Encode in an explicit format, e.g. to convert between games
    pub fn to_bytes_as(&self, format: Format) -> EncodeResult<Vec<u8>> {
        write_frames(&self.frames, |frame, out| write_frame(frame, format, out))
    }
}

pub fn write_frame(frame: &SpriteFrame, format: Format, out: &mut Vec<u8>) -> EncodeResult<()> {
    let total_pieces = frame.pieces.len() as i64;

    match format {
        Format::Sonic1 => {
            ensure_in_range("Piece count", total_pieces, 0, u8::MAX as i64)?;
            write_u8(out, total_pieces as u8);
        }
        Format::Sonic2 | Format::Sonic3AndKnuckles => {
            ensure_in_range("Piece count", total_pieces, 0, u16::MAX as i64)?;
            write_u16_be(out, total_pieces as u16);
        }
    }

    for piece in &frame.pieces {
        write_piece(piece, format, out)?;
    }

    Ok(())
}

/// Check every field of a piece fits the given layout
pub fn validate_piece(piece: &SpritePiece, format: Format) -> EncodeResult<()> {
    ensure_in_range("Width", piece.width as i64, 1, MAX_PIECE_TILES as i64)?;
    ensure_in_range("Height", piece.height as i64, 1, MAX_PIECE_TILES as i64)?;
    ensure_in_range("Palette line", piece.palette_line as i64, 0, 3)?;
    ensure_in_range(
        "Tile index",
        piece.tile_index as i64,
        0,
        flags::ART_TILE_MASK as i64,
    )?;
    ensure_in_range("Y", piece.y as i64, i8::MIN as i64, i8::MAX as i64)?;

    if format == Format::Sonic1 {
        ensure_in_range("X", piece.x as i64, i8::MIN as i64, i8::MAX as i64)?;
    }

    Ok(())
}

pub fn write_piece(piece: &SpritePiece, format: Format, out: &mut Vec<u8>) -> EncodeResult<()> {
    validate_piece(piece, format)?;

    write_u8(out, piece.y as i8 as u8);
    write_u8(out, piece.size_byte());
    write_u16_be(out, piece.art_word());

    match format {
        Format::Sonic1 => write_u8(out, piece.x as i8 as u8),
        Format::Sonic2 => {
            write_u16_be(out, piece.art_word_2p());
            write_u16_be(out, piece.x as u16);
        }
        Format::Sonic3AndKnuckles => write_u16_be(out, piece.x as u16),
    }

    Ok(())
}

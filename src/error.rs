//! Error types for parsing, encoding and DPLC conversion

use thiserror::Error;

/// Errors raised while decoding mapping or DPLC binaries.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The stream ended in the middle of a value
    #[error("Unexpected end of stream at offset {offset:#x} (needed {needed} more bytes)")]
    UnexpectedEof { offset: u64, needed: u64 },

    /// A frame offset points outside the stream
    #[error("Frame {frame} offset {offset:#x} is out of range (stream length {len:#x})")]
    OffsetOutOfRange { frame: usize, offset: u64, len: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a DPLC table cannot be applied to a set of mappings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DplcError {
    #[error("Mappings have {mappings} frames but the DPLCs have {dplcs}")]
    FrameCountMismatch { mappings: usize, dplcs: usize },

    /// The local tile is past the end of everything the frame's DPLCs load
    #[error("Frame {frame}, piece {piece}: local tile {tile} is not loaded by any DPLC")]
    UnmappedTile {
        frame: usize,
        piece: usize,
        tile: usize,
    },

    /// The piece's tiles are loaded, but not from one contiguous source range
    #[error(
        "Frame {frame}, piece {piece}: local tile {tile} maps to {actual}, expected {expected}"
    )]
    NonContiguous {
        frame: usize,
        piece: usize,
        tile: usize,
        expected: usize,
        actual: usize,
    },

    /// The piece would reach past the last tile an art word can address
    #[error("Frame {frame}, piece {piece}: source tile {tile:#x} is past tile 0x7ff")]
    TileOutOfRange {
        frame: usize,
        piece: usize,
        tile: usize,
    },
}

/// Errors raised while writing binaries or assembly text.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// A value does not fit in the field the format gives it
    #[error("{field} value {value} is outside {min}..={max}")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

pub(crate) fn ensure_in_range(field: &'static str, value: i64, min: i64, max: i64) -> EncodeResult<()> {
    if value < min || value > max {
        return Err(EncodeError::FieldOutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    Ok(())
}

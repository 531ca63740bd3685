//! Sprite mappings
//!
//! Mappings describe how each frame of a sprite is assembled from rectangular
//! pieces of 8x8 tiles. This module handles the headerless binary layouts used
//! by the Mega Drive Sonic games.

pub mod model;
pub mod parser;
pub mod writer;

pub use model::*;

/// Size of a tile in pixels
pub const TILE_WIDTH: i32 = 8;
pub const TILE_HEIGHT: i32 = 8;

/// Largest piece dimension, in tiles
pub const MAX_PIECE_TILES: u8 = 4;

// Bit masks for the packed piece fields
pub mod flags {
    // Art word
    pub const ART_PRIORITY_MASK: u16 = 0x8000; // 1000 0000 0000 0000
    pub const ART_PALETTE_MASK: u16 = 0x6000; // 0110 0000 0000 0000
    pub const ART_Y_FLIP_MASK: u16 = 0x1000; // 0001 0000 0000 0000
    pub const ART_X_FLIP_MASK: u16 = 0x0800; // 0000 1000 0000 0000
    pub const ART_TILE_MASK: u16 = 0x07FF; // 0000 0111 1111 1111
    pub const ART_FLAG_BITS_MASK: u16 = 0xF800; // 1111 1000 0000 0000

    // Size byte
    pub const SIZE_WIDTH_MASK: u8 = 0x0C; // 0000 1100
    pub const SIZE_HEIGHT_MASK: u8 = 0x03; // 0000 0011
}

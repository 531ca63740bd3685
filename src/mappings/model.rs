//! Data structures for sprite mappings

use serde::{Deserialize, Serialize};

use super::{flags, TILE_HEIGHT, TILE_WIDTH};
use crate::format::Format;

/// A single block of tiles drawn at an offset from the frame origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpritePiece {
    /// Horizontal offset from the frame origin, in pixels
    pub x: i16,

    /// Vertical offset from the frame origin, in pixels
    pub y: i16,

    /// Width in tiles (1-4)
    pub width: u8,

    /// Height in tiles (1-4)
    pub height: u8,

    pub priority: bool,

    /// Palette line (0-3)
    pub palette_line: u8,

    pub x_flip: bool,
    pub y_flip: bool,

    /// First tile of the piece. Tiles run column-major through the piece.
    pub tile_index: u16,
}

impl Default for SpritePiece {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
            priority: false,
            palette_line: 0,
            x_flip: false,
            y_flip: false,
            tile_index: 0,
        }
    }
}

impl SpritePiece {
    /// Number of tiles this piece covers
    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Build a piece from its packed size byte and art word
    pub fn from_packed(x: i16, y: i16, size: u8, art: u16) -> Self {
        Self {
            x,
            y,
            width: ((size & flags::SIZE_WIDTH_MASK) >> 2) + 1,
            height: (size & flags::SIZE_HEIGHT_MASK) + 1,
            priority: (art & flags::ART_PRIORITY_MASK) != 0,
            palette_line: ((art & flags::ART_PALETTE_MASK) >> 13) as u8,
            y_flip: (art & flags::ART_Y_FLIP_MASK) != 0,
            x_flip: (art & flags::ART_X_FLIP_MASK) != 0,
            tile_index: art & flags::ART_TILE_MASK,
        }
    }

    /// Pack width and height into a size byte. Callers validate the range.
    pub fn size_byte(&self) -> u8 {
        (((self.width - 1) << 2) & flags::SIZE_WIDTH_MASK)
            | ((self.height - 1) & flags::SIZE_HEIGHT_MASK)
    }

    /// Pack the flags and tile index into an art word. Callers validate the range.
    pub fn art_word(&self) -> u16 {
        let mut art = self.tile_index & flags::ART_TILE_MASK;

        if self.priority {
            art |= flags::ART_PRIORITY_MASK;
        }
        art |= ((self.palette_line as u16) << 13) & flags::ART_PALETTE_MASK;
        if self.y_flip {
            art |= flags::ART_Y_FLIP_MASK;
        }
        if self.x_flip {
            art |= flags::ART_X_FLIP_MASK;
        }

        art
    }

    /// Art word for Sonic 2's two-player mode, where tiles are twice as tall
    /// and the tile index is halved
    pub fn art_word_2p(&self) -> u16 {
        let art = self.art_word();
        (art & flags::ART_FLAG_BITS_MASK) | ((art & flags::ART_TILE_MASK) >> 1)
    }

    /// Bounding box in pixels
    pub fn rect(&self) -> Rect {
        Rect {
            left: self.x as i32,
            top: self.y as i32,
            right: self.x as i32 + self.width as i32 * TILE_WIDTH,
            bottom: self.y as i32 + self.height as i32 * TILE_HEIGHT,
        }
    }
}

/// Pixel rectangle; `right` and `bottom` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// An ordered list of pieces. Order is draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub pieces: Vec<SpritePiece>,
}

impl SpriteFrame {
    pub fn new(pieces: Vec<SpritePiece>) -> Self {
        Self { pieces }
    }

    /// Bounding box of every piece, or `None` for an empty frame
    pub fn rect(&self) -> Option<Rect> {
        self.pieces
            .iter()
            .map(SpritePiece::rect)
            .reduce(|acc, rect| acc.union(&rect))
    }
}

/// Every frame of a sprite, plus the layout it was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteMappings {
    pub format: Format,
    pub frames: Vec<SpriteFrame>,
}

impl SpriteMappings {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            frames: Vec::new(),
        }
    }

    pub fn total_pieces(&self) -> usize {
        self.frames.iter().map(|frame| frame.pieces.len()).sum()
    }
}

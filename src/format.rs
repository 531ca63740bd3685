//! Binary layout variants
//!
//! The mapping and DPLC binaries carry no header, so the caller has to say
//! which game's layout a file uses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Historical mapping/DPLC layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Sonic 1 and Sonic CD: byte-sized counts, 5-byte pieces
    Sonic1,
    /// Sonic 2: word-sized counts, 8-byte pieces with a two-player art word
    Sonic2,
    /// Sonic 3 & Knuckles: word-sized counts, 6-byte pieces
    Sonic3AndKnuckles,
}

impl Format {
    /// Whether frame offsets in this layout are always word-aligned. An odd
    /// value in the offset table therefore cannot be a real offset.
    pub fn requires_even_offsets(self) -> bool {
        match self {
            Format::Sonic1 => false,
            Format::Sonic2 | Format::Sonic3AndKnuckles => true,
        }
    }

    /// Size in bytes of one encoded sprite piece
    pub fn piece_size(self) -> usize {
        match self {
            Format::Sonic1 => 5,
            Format::Sonic2 => 8,
            Format::Sonic3AndKnuckles => 6,
        }
    }

    /// Name used in assembly banners
    pub fn display_name(self) -> &'static str {
        match self {
            Format::Sonic1 => "Sonic 1/CD",
            Format::Sonic2 => "Sonic 2",
            Format::Sonic3AndKnuckles => "Sonic 3 & Knuckles",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

//! Dynamic Pattern Load Cues
//!
//! A DPLC frame lists the runs of source tiles that must be copied into VRAM
//! before its mapping frame is drawn. Mapping pieces then refer to tiles by
//! their position in that loaded sequence instead of by absolute index.

pub mod codec;
pub mod model;
pub mod parser;
pub mod writer;

pub use codec::{apply_dplcs, remove_dplcs};
pub use model::*;

/// Most tiles a single binary DPLC entry can load
pub const MAX_ENTRY_LENGTH: usize = 0x10;

/// Highest start tile a binary DPLC entry can address
pub const MAX_ENTRY_START: usize = 0xFFF;

//! Sprite mappings and DPLC tools for Mega Drive Sonic games
//!
//! Parses the headerless mapping and Dynamic Pattern Load Cue binaries used by
//! Sonic 1, Sonic 2 and Sonic 3 & Knuckles, converts mappings between
//! absolute tile indices and DPLC-relative ones, and writes both structures
//! back out as binaries or assembly.

pub mod assembly;
mod binary_utils;
pub mod document;
pub mod dplc;
pub mod error;
pub mod format;
pub mod manager;
pub mod mappings;
pub mod offset_table;

pub use assembly::{to_assembly, AssemblyTable, FixedLabel, HashedLabels, LabelSource};
pub use document::SpriteDocument;
pub use dplc::{apply_dplcs, remove_dplcs, DplcCopy, DplcFrame, DynamicPatternLoadCues};
pub use error::{DplcError, EncodeError, ParseError};
pub use format::Format;
pub use manager::{MappingsEvent, SpriteMappingsManager};
pub use mappings::{SpriteFrame, SpriteMappings, SpritePiece};

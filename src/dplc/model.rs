//! Data structures for DPLCs

use serde::{Deserialize, Serialize};

use crate::format::Format;

/// Load `length` consecutive source tiles starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DplcCopy {
    pub start: usize,
    pub length: usize,
}

impl DplcCopy {
    /// One past the last source tile
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }
}

/// The copies for one mapping frame, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DplcFrame {
    pub copies: Vec<DplcCopy>,
}

impl DplcFrame {
    pub fn new(copies: Vec<DplcCopy>) -> Self {
        Self { copies }
    }

    /// Number of tiles loaded, i.e. the size of the local index space
    pub fn total_tiles(&self) -> usize {
        self.copies
            .iter()
            .fold(0, |total, copy| total.saturating_add(copy.length))
    }

    /// Source tile loaded into local slot `local_index`, or `None` if the
    /// copies load fewer tiles than that. Copies whose span overflows
    /// `usize` map nothing.
    pub fn mapped_tile(&self, local_index: usize) -> Option<usize> {
        let mut span_start: usize = 0;

        for copy in &self.copies {
            let span_end = span_start.checked_add(copy.length)?;
            if local_index < span_end {
                return copy.start.checked_add(local_index - span_start);
            }
            span_start = span_end;
        }

        None
    }
}

/// One DPLC frame per mapping frame, in the same order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicPatternLoadCues {
    pub format: Format,
    pub frames: Vec<DplcFrame>,
}

impl DynamicPatternLoadCues {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            frames: Vec::new(),
        }
    }

    pub fn total_copies(&self) -> usize {
        self.frames.iter().map(|frame| frame.copies.len()).sum()
    }
}

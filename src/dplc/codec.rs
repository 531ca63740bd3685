//! Conversion between absolute tile indices and DPLC-relative ones
//!
//! [`remove_dplcs`] takes mappings whose pieces point straight at source tiles
//! and builds the DPLCs that load exactly those tiles, renumbering the pieces
//! into each frame's loaded sequence. [`apply_dplcs`] goes the other way and
//! checks that every piece still covers one contiguous run of source tiles.

use tracing::{debug, trace};

use crate::{
    dplc::model::{DplcCopy, DplcFrame, DynamicPatternLoadCues},
    error::DplcError,
    mappings::{flags, SpriteFrame, SpriteMappings},
};

impl SpriteMappings {
    pub fn remove_dplcs(&mut self) -> DynamicPatternLoadCues {
        remove_dplcs(self)
    }

    pub fn apply_dplcs(&mut self, dplcs: &DynamicPatternLoadCues) -> Result<(), DplcError> {
        apply_dplcs(self, dplcs)
    }
}

/// Build DPLCs from absolute mappings and rewrite every piece to index into
/// its frame's loaded tiles.
pub fn remove_dplcs(mappings: &mut SpriteMappings) -> DynamicPatternLoadCues {
    let frames: Vec<DplcFrame> = mappings.frames.iter_mut().map(compress_frame).collect();

    let dplcs = DynamicPatternLoadCues {
        format: mappings.format,
        frames,
    };
    debug!(
        "Built {} DPLC copies for {} frames",
        dplcs.total_copies(),
        dplcs.frames.len()
    );

    dplcs
}

/// Work out which tiles one frame uses, emit a copy per maximal run of them,
/// and renumber the frame's pieces into the loaded order.
pub fn compress_frame(frame: &mut SpriteFrame) -> DplcFrame {
    let total_tiles = frame
        .pieces
        .iter()
        .map(|piece| piece.tile_index as usize + piece.tile_count())
        .max()
        .unwrap_or(0);

    let mut loaded = vec![false; total_tiles];
    for piece in &frame.pieces {
        let start = piece.tile_index as usize;
        loaded[start..start + piece.tile_count()].fill(true);
    }

    let mut copies = Vec::new();
    let mut search_start = 0;

    while let Some(offset) = loaded[search_start..].iter().position(|&tile| tile) {
        let start = search_start + offset;
        let end = loaded[start..]
            .iter()
            .position(|&tile| !tile)
            .map_or(total_tiles, |length| start + length);

        copies.push(DplcCopy {
            start,
            length: end - start,
        });
        search_start = end;
    }

    // local_indices[t] is how many loaded tiles come before source tile t,
    // which for a loaded tile is its slot in the loaded sequence.
    let mut local_indices = Vec::with_capacity(total_tiles + 1);
    let mut next_local = 0;
    for &tile in &loaded {
        local_indices.push(next_local);
        if tile {
            next_local += 1;
        }
    }
    local_indices.push(next_local);

    for piece in &mut frame.pieces {
        // A local index never exceeds the source index it came from.
        piece.tile_index = local_indices[piece.tile_index as usize] as u16;
    }

    trace!(
        "Frame uses {} of {} tiles in {} copies",
        next_local,
        total_tiles,
        copies.len()
    );

    DplcFrame { copies }
}

/// Rewrite DPLC-relative pieces back to absolute source tiles.
///
/// Every frame is checked before anything is written, so on error `mappings`
/// is left exactly as it was.
pub fn apply_dplcs(
    mappings: &mut SpriteMappings,
    dplcs: &DynamicPatternLoadCues,
) -> Result<(), DplcError> {
    if mappings.frames.len() != dplcs.frames.len() {
        return Err(DplcError::FrameCountMismatch {
            mappings: mappings.frames.len(),
            dplcs: dplcs.frames.len(),
        });
    }

    let staged = mappings
        .frames
        .iter()
        .zip(&dplcs.frames)
        .enumerate()
        .map(|(frame_index, (frame, dplc_frame))| resolve_frame(frame_index, frame, dplc_frame))
        .collect::<Result<Vec<_>, _>>()?;

    for (frame, tile_indices) in mappings.frames.iter_mut().zip(staged) {
        for (piece, tile_index) in frame.pieces.iter_mut().zip(tile_indices) {
            piece.tile_index = tile_index;
        }
    }

    debug!("Applied DPLCs to {} frames", mappings.frames.len());
    Ok(())
}

/// Absolute tile index for each piece of one frame
pub fn resolve_frame(
    frame_index: usize,
    frame: &SpriteFrame,
    dplc_frame: &DplcFrame,
) -> Result<Vec<u16>, DplcError> {
    let mut tile_indices = Vec::with_capacity(frame.pieces.len());

    for (piece_index, piece) in frame.pieces.iter().enumerate() {
        let local_start = piece.tile_index as usize;
        let unmapped = |tile| DplcError::UnmappedTile {
            frame: frame_index,
            piece: piece_index,
            tile,
        };

        let base = dplc_frame
            .mapped_tile(local_start)
            .ok_or_else(|| unmapped(local_start))?;

        // The whole span has to fit the art word's tile field.
        let last = base.saturating_add(piece.tile_count().saturating_sub(1));
        if last > flags::ART_TILE_MASK as usize {
            return Err(DplcError::TileOutOfRange {
                frame: frame_index,
                piece: piece_index,
                tile: last,
            });
        }

        for i in 0..piece.tile_count() {
            let mapped = dplc_frame
                .mapped_tile(local_start + i)
                .ok_or_else(|| unmapped(local_start + i))?;

            if mapped != base + i {
                return Err(DplcError::NonContiguous {
                    frame: frame_index,
                    piece: piece_index,
                    tile: local_start + i,
                    expected: base + i,
                    actual: mapped,
                });
            }
        }

        let tile_index = base as u16;
        tile_indices.push(tile_index);
    }

    Ok(tile_indices)
}

//! Owner of the mappings being edited
//!
//! Front ends hold a [`SpriteMappingsManager`] rather than the mappings
//! themselves, make every change through it, and subscribe to find out what
//! to redraw.

use tracing::debug;

use crate::{
    dplc::{self, DynamicPatternLoadCues},
    error::DplcError,
    format::Format,
    mappings::{SpriteFrame, SpriteMappings, SpritePiece},
};

/// What changed in the managed mappings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingsEvent {
    /// Everything may have changed
    Replaced,
    FrameInserted(usize),
    FrameRemoved(usize),
    PieceInserted { frame: usize, piece: usize },
    PieceRemoved { frame: usize, piece: usize },
    PieceChanged { frame: usize, piece: usize },
    /// Tile indices in every frame were rewritten
    TilesRemapped,
}

type Listener = Box<dyn FnMut(&SpriteMappings, MappingsEvent)>;

pub struct SpriteMappingsManager {
    mappings: SpriteMappings,
    listeners: Vec<Listener>,
}

impl SpriteMappingsManager {
    pub fn new(format: Format) -> Self {
        Self::with_mappings(SpriteMappings::new(format))
    }

    pub fn with_mappings(mappings: SpriteMappings) -> Self {
        Self {
            mappings,
            listeners: Vec::new(),
        }
    }

    pub fn mappings(&self) -> &SpriteMappings {
        &self.mappings
    }

    pub fn into_mappings(self) -> SpriteMappings {
        self.mappings
    }

    /// Register a callback run after every change
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SpriteMappings, MappingsEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: MappingsEvent) {
        debug!("Mappings changed: {:?}", event);

        for listener in &mut self.listeners {
            listener(&self.mappings, event);
        }
    }

    pub fn replace(&mut self, mappings: SpriteMappings) {
        self.mappings = mappings;
        self.notify(MappingsEvent::Replaced);
    }

    /// Insert a frame; `index` is clamped to the frame count
    pub fn insert_frame(&mut self, index: usize, frame: SpriteFrame) -> usize {
        let index = index.min(self.mappings.frames.len());
        self.mappings.frames.insert(index, frame);
        self.notify(MappingsEvent::FrameInserted(index));

        index
    }

    pub fn remove_frame(&mut self, index: usize) -> Option<SpriteFrame> {
        if index >= self.mappings.frames.len() {
            return None;
        }

        let frame = self.mappings.frames.remove(index);
        self.notify(MappingsEvent::FrameRemoved(index));

        Some(frame)
    }

    /// Insert a piece into a frame; `piece_index` is clamped to the piece
    /// count. Returns `None` if the frame does not exist.
    pub fn insert_piece(
        &mut self,
        frame_index: usize,
        piece_index: usize,
        piece: SpritePiece,
    ) -> Option<usize> {
        let frame = self.mappings.frames.get_mut(frame_index)?;
        let piece_index = piece_index.min(frame.pieces.len());
        frame.pieces.insert(piece_index, piece);

        self.notify(MappingsEvent::PieceInserted {
            frame: frame_index,
            piece: piece_index,
        });

        Some(piece_index)
    }

    pub fn remove_piece(&mut self, frame_index: usize, piece_index: usize) -> Option<SpritePiece> {
        let frame = self.mappings.frames.get_mut(frame_index)?;
        if piece_index >= frame.pieces.len() {
            return None;
        }

        let piece = frame.pieces.remove(piece_index);
        self.notify(MappingsEvent::PieceRemoved {
            frame: frame_index,
            piece: piece_index,
        });

        Some(piece)
    }

    /// Overwrite a piece, returning the old one
    pub fn set_piece(
        &mut self,
        frame_index: usize,
        piece_index: usize,
        piece: SpritePiece,
    ) -> Option<SpritePiece> {
        let slot = self
            .mappings
            .frames
            .get_mut(frame_index)?
            .pieces
            .get_mut(piece_index)?;
        let old = std::mem::replace(slot, piece);

        self.notify(MappingsEvent::PieceChanged {
            frame: frame_index,
            piece: piece_index,
        });

        Some(old)
    }

    pub fn remove_dplcs(&mut self) -> DynamicPatternLoadCues {
        let dplcs = dplc::remove_dplcs(&mut self.mappings);
        self.notify(MappingsEvent::TilesRemapped);

        dplcs
    }

    /// Apply DPLCs; listeners are only told if the mappings changed
    pub fn apply_dplcs(&mut self, dplcs: &DynamicPatternLoadCues) -> Result<(), DplcError> {
        dplc::apply_dplcs(&mut self.mappings, dplcs)?;
        self.notify(MappingsEvent::TilesRemapped);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    fn recording_manager() -> (SpriteMappingsManager, Rc<RefCell<Vec<MappingsEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SpriteMappingsManager::new(Format::Sonic2);

        let sink = Rc::clone(&events);
        manager.subscribe(move |_, event| sink.borrow_mut().push(event));

        (manager, events)
    }

    #[test]
    fn structural_edits_notify_listeners() {
        let (mut manager, events) = recording_manager();

        assert_eq!(manager.insert_frame(5, SpriteFrame::default()), 0);
        assert_eq!(manager.insert_piece(0, 0, SpritePiece::default()), Some(0));
        assert!(manager
            .set_piece(
                0,
                0,
                SpritePiece {
                    tile_index: 4,
                    ..SpritePiece::default()
                }
            )
            .is_some());
        assert!(manager.remove_piece(0, 0).is_some());
        assert!(manager.remove_frame(0).is_some());

        assert_eq!(
            *events.borrow(),
            vec![
                MappingsEvent::FrameInserted(0),
                MappingsEvent::PieceInserted { frame: 0, piece: 0 },
                MappingsEvent::PieceChanged { frame: 0, piece: 0 },
                MappingsEvent::PieceRemoved { frame: 0, piece: 0 },
                MappingsEvent::FrameRemoved(0),
            ]
        );
    }

    #[test]
    fn invalid_indices_change_nothing() {
        let (mut manager, events) = recording_manager();

        assert!(manager.remove_frame(0).is_none());
        assert!(manager.insert_piece(3, 0, SpritePiece::default()).is_none());
        assert!(manager.set_piece(0, 0, SpritePiece::default()).is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn failed_dplc_application_is_silent() {
        let (mut manager, events) = recording_manager();
        manager.insert_frame(0, SpriteFrame::new(vec![SpritePiece::default()]));
        events.borrow_mut().clear();

        let dplcs = DynamicPatternLoadCues::new(Format::Sonic2);
        assert!(manager.apply_dplcs(&dplcs).is_err());
        assert!(events.borrow().is_empty());

        let dplcs = manager.remove_dplcs();
        assert_eq!(dplcs.frames.len(), 1);
        manager.apply_dplcs(&dplcs).unwrap();
        assert_eq!(
            *events.borrow(),
            vec![MappingsEvent::TilesRemapped, MappingsEvent::TilesRemapped]
        );
    }
}

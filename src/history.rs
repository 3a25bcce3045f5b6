use std::collections::VecDeque;

use crate::surface::{PixelSurface, Snapshot};

/// Default number of undo steps kept.
pub const MAX_UNDO: usize = 20;

/// Bounded stack of full-surface snapshots backing undo.
///
/// Checkpoints are taken before a user action mutates the surface. When the
/// stack is full the oldest snapshot is dropped to make room, so memory use
/// stays at `capacity` surface copies.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    /// Oldest first; the back is the most recent checkpoint
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotHistory {
    /// Creates an empty history holding up to [`MAX_UNDO`] snapshots
    pub fn new() -> Self {
        Self::with_capacity(MAX_UNDO)
    }

    /// Creates an empty history holding up to `capacity` snapshots (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Captures the whole surface, evicting the oldest snapshot when full
    pub fn checkpoint(&mut self, surface: &PixelSurface) {
        if self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
            log::debug!("undo history full, dropped oldest snapshot");
        }
        self.snapshots
            .push_back(surface.read_region(surface.full_region()));
        log::trace!("checkpoint {} of {}", self.snapshots.len(), self.capacity);
    }

    /// Restores the most recent snapshot. Returns false when there is nothing
    /// to undo, leaving the surface untouched.
    pub fn undo(&mut self, surface: &mut PixelSurface) -> bool {
        match self.snapshots.pop_back() {
            Some(snapshot) => {
                surface.write_region(&snapshot, (0, 0));
                true
            }
            None => false,
        }
    }

    /// The most recent snapshot, without consuming it
    pub fn peek_latest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns true if there are snapshots that can be restored
    pub fn can_undo(&self) -> bool {
        !self.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

//! Undo/redo stack of compressed workflow snapshots
//!
//! Each entry is a full serialized workflow compressed with zstd. A
//! snapshot survives any mutation without inverse operations, which
//! keeps the editor's undo path uniform across adds, deletes, drags,
//! and config edits.

use std::collections::VecDeque;

use crate::error::{CanvasEngineError, Result};
use crate::types::Workflow;

/// zstd level for snapshot compression
const COMPRESSION_LEVEL: i32 = 3;

/// Undo/redo stack using compressed snapshots
pub struct UndoStack {
    /// Compressed workflow states
    snapshots: VecDeque<Vec<u8>>,
    /// Current position in the stack
    current: usize,
    /// Maximum number of snapshots to keep
    max_snapshots: usize,
}

impl UndoStack {
    /// Create a new undo stack holding at most `max_snapshots` states
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            current: 0,
            max_snapshots: max_snapshots.max(1),
        }
    }

    /// Push a snapshot of the given workflow
    ///
    /// Truncates any redo history past the current position, then trims
    /// the oldest snapshots once the stack exceeds its limit.
    pub fn push(&mut self, workflow: &Workflow) -> Result<()> {
        let json = serde_json::to_vec(workflow)?;
        let compressed = zstd::encode_all(&json[..], COMPRESSION_LEVEL)
            .map_err(|e| CanvasEngineError::Compression(e.to_string()))?;

        while self.snapshots.len() > self.current + 1 {
            self.snapshots.pop_back();
        }

        self.snapshots.push_back(compressed);
        self.current = self.snapshots.len() - 1;

        while self.snapshots.len() > self.max_snapshots {
            self.snapshots.pop_front();
            if self.current > 0 {
                self.current -= 1;
            }
        }

        Ok(())
    }

    /// Move back one snapshot, returning the restored workflow
    ///
    /// Returns None when already at the oldest state.
    pub fn undo(&mut self) -> Option<Result<Workflow>> {
        if self.current > 0 {
            self.current -= 1;
            Some(self.decompress(self.current))
        } else {
            None
        }
    }

    /// Move forward one snapshot, returning the restored workflow
    ///
    /// Returns None when already at the newest state.
    pub fn redo(&mut self) -> Option<Result<Workflow>> {
        if self.current + 1 < self.snapshots.len() {
            self.current += 1;
            Some(self.decompress(self.current))
        } else {
            None
        }
    }

    /// Get the workflow at the current position without moving
    pub fn current(&self) -> Option<Result<Workflow>> {
        if self.snapshots.is_empty() {
            None
        } else {
            Some(self.decompress(self.current))
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the stack holds no snapshots
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop all snapshots
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current = 0;
    }

    /// Total compressed size of all snapshots, in bytes
    pub fn compressed_size(&self) -> usize {
        self.snapshots.iter().map(|s| s.len()).sum()
    }

    fn decompress(&self, index: usize) -> Result<Workflow> {
        let compressed = &self.snapshots[index];
        let json = zstd::decode_all(&compressed[..])
            .map_err(|e| CanvasEngineError::Compression(e.to_string()))?;
        let workflow: Workflow = serde_json::from_slice(&json)?;
        Ok(workflow)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(64)
    }
}

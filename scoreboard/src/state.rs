//! Application state shared across route handlers.

use crate::board::Board;
use std::collections::HashMap;
use std::sync::Arc;

/// Central application state: one board per homework.
///
/// The map is built once at startup from the homework descriptors and never
/// changes afterwards; only the boards' interior state moves.
#[derive(Clone)]
pub struct AppState {
    boards: Arc<HashMap<String, Board>>,
}

impl AppState {
    pub fn new(boards: HashMap<String, Board>) -> Self {
        Self {
            boards: Arc::new(boards),
        }
    }

    /// Looks up the board for a homework name.
    pub fn board(&self, homework: &str) -> Option<&Board> {
        self.boards.get(homework)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

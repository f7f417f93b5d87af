//! Latest liveboard snapshot.
//!
//! Each upstream update is parsed once and replaces the previous board.
//! Only the most recent successful parse is kept; a failed parse leaves the
//! current board in place.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::Liveboard;
use crate::irail::{LiveboardParser, ParseError};

/// Thread-safe holder of the current board.
#[derive(Clone, Default)]
pub struct LatestSnapshot {
    inner: Arc<RwLock<Option<Arc<Liveboard>>>>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current board, if any update has succeeded yet.
    pub async fn current(&self) -> Option<Arc<Liveboard>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Replace the current board, returning the one it replaced.
    pub async fn replace(&self, board: Liveboard) -> Option<Arc<Liveboard>> {
        let board = Arc::new(board);
        let mut guard = self.inner.write().await;
        guard.replace(board)
    }

    /// Parse one upstream payload and, on success, make it the current board.
    pub async fn update(
        &self,
        parser: &LiveboardParser,
        json: &str,
    ) -> Result<Arc<Liveboard>, ParseError> {
        let board = match parser.parse_str(json) {
            Ok(board) => Arc::new(board),
            Err(e) => {
                warn!(error = %e, details = ?e.details(), "keeping previous liveboard");
                return Err(e);
            }
        };

        info!(
            station = %board.station,
            departures = board.departures().len(),
            "liveboard updated"
        );

        let mut guard = self.inner.write().await;
        *guard = Some(Arc::clone(&board));
        Ok(board)
    }
}

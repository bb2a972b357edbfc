use std::sync::Arc;
use swehockey_api::{Refresh, UnifiedGame};

#[derive(Debug, Clone)]
pub enum SessionRequest {
    Load { game_id: u64 },
    Refresh { target: Refresh },
}

#[derive(Debug)]
pub enum SessionResponse {
    GameLoaded { game: Arc<UnifiedGame> },
    /// Full rebuild after re-fetching `target`; the previous model is discarded.
    GameRefreshed { target: Refresh, game: Arc<UnifiedGame> },
    Error { message: String },
}

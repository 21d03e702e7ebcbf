use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        history::HistoryStore,
        playback::{PlaybackController, PlaybackSnapshot, PlaybackSource},
    },
    error::{AppError, AppResult},
};

/// Request for POST /api/player/play
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayRequest {
    pub history_id: Uuid,
}

pub struct PlayerController {
    player: Arc<PlaybackController>,
    history: Arc<HistoryStore>,
}

impl PlayerController {
    pub fn new(player: Arc<PlaybackController>, history: Arc<HistoryStore>) -> Self {
        Self { player, history }
    }

    /// GET /api/player
    pub async fn state(State(controller): State<Arc<PlayerController>>) -> Json<PlaybackSnapshot> {
        Json(controller.player.snapshot())
    }

    /// POST /api/player/play - Replay a history entry
    pub async fn play(
        State(controller): State<Arc<PlayerController>>,
        Json(request): Json<PlayRequest>,
    ) -> AppResult<Json<PlaybackSnapshot>> {
        let entry = controller
            .history
            .get(request.history_id)
            .ok_or_else(|| AppError::NotFound(format!("History entry {}", request.history_id)))?;

        controller.player.play(
            entry.audio.clone(),
            PlaybackSource::History { id: entry.id },
            None,
        )?;
        Ok(Json(controller.player.snapshot()))
    }

    /// POST /api/player/pause - No-op unless playing
    pub async fn pause(State(controller): State<Arc<PlayerController>>) -> Json<PlaybackSnapshot> {
        controller.player.pause();
        Json(controller.player.snapshot())
    }

    /// POST /api/player/resume - No-op unless paused
    pub async fn resume(State(controller): State<Arc<PlayerController>>) -> Json<PlaybackSnapshot> {
        controller.player.resume();
        Json(controller.player.snapshot())
    }

    /// POST /api/player/stop
    pub async fn stop(State(controller): State<Arc<PlayerController>>) -> Json<PlaybackSnapshot> {
        controller.player.stop();
        Json(controller.player.snapshot())
    }
}

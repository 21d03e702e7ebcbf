use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        history::{HistoryStore, HistorySummary},
        playback::{PlaybackController, PlaybackSource},
    },
    error::{AppError, AppResult},
};

pub struct HistoryController {
    history: Arc<HistoryStore>,
    player: Arc<PlaybackController>,
}

impl HistoryController {
    pub fn new(history: Arc<HistoryStore>, player: Arc<PlaybackController>) -> Self {
        Self { history, player }
    }

    /// GET /api/history - Most recent first
    pub async fn list(State(controller): State<Arc<HistoryController>>) -> Json<Vec<HistorySummary>> {
        Json(controller.history.list().iter().map(|e| e.summary()).collect())
    }

    /// DELETE /api/history/:id
    pub async fn delete(
        State(controller): State<Arc<HistoryController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        let entry = controller
            .history
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("History entry {}", id)))?;

        if controller.player.stop_source(&PlaybackSource::History { id }) {
            tracing::info!(history_id = %id, "Stopped playback of deleted entry");
        }
        tracing::info!(history_id = %entry.id, "History entry deleted");

        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/history/:id/audio - Download the WAV export
    pub async fn download(
        State(controller): State<Arc<HistoryController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let entry = controller
            .history
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("History entry {}", id)))?;

        let disposition = format!("attachment; filename=\"{}\"", entry.file_name);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(entry.artifact.content_type),
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition)
                .map_err(|e| AppError::Internal(format!("Invalid file name: {}", e)))?,
        );

        Ok((StatusCode::OK, headers, Body::from(entry.artifact.bytes.clone())))
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::voice::{PreviewOutcome, VoiceOption, VoiceService},
    error::AppResult,
};

/// Request for POST /api/voices/clone
#[derive(Debug, Serialize, Deserialize)]
pub struct CloneVoiceRequest {
    /// Base64-encoded audio clip
    pub audio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub outcome: PreviewOutcome,
}

pub struct VoiceController {
    voice_service: Arc<VoiceService>,
}

impl VoiceController {
    pub fn new(voice_service: Arc<VoiceService>) -> Self {
        Self { voice_service }
    }

    /// GET /api/voices - Prebuilt voices followed by cloned ones
    pub async fn list(State(controller): State<Arc<VoiceController>>) -> Json<Vec<VoiceOption>> {
        Json(controller.voice_service.list())
    }

    /// POST /api/voices/clone - Analyze a sample and register a cloned voice
    pub async fn clone_voice(
        State(controller): State<Arc<VoiceController>>,
        Json(request): Json<CloneVoiceRequest>,
    ) -> AppResult<(StatusCode, Json<VoiceOption>)> {
        let voice = controller
            .voice_service
            .clone_voice(&request.audio, request.mime_type.as_deref())
            .await?;
        Ok((StatusCode::CREATED, Json(voice)))
    }

    /// POST /api/voices/:id/preview - Toggle a short voice sample
    pub async fn preview(
        State(controller): State<Arc<VoiceController>>,
        Path(voice_id): Path<String>,
    ) -> AppResult<Json<PreviewResponse>> {
        let outcome = controller.voice_service.preview(&voice_id).await?;
        Ok(Json(PreviewResponse { outcome }))
    }
}

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    domain::synthesis::{JobSnapshot, ScriptRequest, SynthesisService},
    error::AppResult,
};

pub struct SynthesisController {
    synthesis_service: Arc<SynthesisService>,
}

impl SynthesisController {
    pub fn new(synthesis_service: Arc<SynthesisService>) -> Self {
        Self { synthesis_service }
    }

    /// POST /api/synthesis - Start synthesizing a script
    pub async fn start(
        State(controller): State<Arc<SynthesisController>>,
        Json(request): Json<ScriptRequest>,
    ) -> AppResult<(StatusCode, Json<JobSnapshot>)> {
        let snapshot = controller.synthesis_service.start(request)?;
        Ok((StatusCode::ACCEPTED, Json(snapshot)))
    }

    /// GET /api/synthesis - Current job state and progress
    pub async fn status(State(controller): State<Arc<SynthesisController>>) -> Json<JobSnapshot> {
        Json(controller.synthesis_service.status())
    }

    /// POST /api/synthesis/cancel
    pub async fn cancel(State(controller): State<Arc<SynthesisController>>) -> Json<JobSnapshot> {
        Json(controller.synthesis_service.cancel())
    }
}

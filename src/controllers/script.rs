use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::script::{catalog, extract_markers, Marker, MarkerCatalog, ProofreadService},
    error::AppResult,
};

/// Body of POST /api/proofread and POST /api/markers/extract
#[derive(Debug, Serialize, Deserialize)]
pub struct TextBody {
    pub text: String,
}

pub struct ScriptController {
    proofread_service: Arc<ProofreadService>,
}

impl ScriptController {
    pub fn new(proofread_service: Arc<ProofreadService>) -> Self {
        Self { proofread_service }
    }

    /// POST /api/proofread - Fix spelling, keep markers
    pub async fn proofread(
        State(controller): State<Arc<ScriptController>>,
        Json(request): Json<TextBody>,
    ) -> AppResult<Json<TextBody>> {
        let text = controller.proofread_service.proofread(&request.text).await?;
        Ok(Json(TextBody { text }))
    }

    /// GET /api/markers - Marker vocabulary
    pub async fn markers() -> Json<MarkerCatalog> {
        Json(catalog())
    }

    /// POST /api/markers/extract - Directives found in a script
    pub async fn extract(Json(request): Json<TextBody>) -> Json<Vec<Marker>> {
        Json(extract_markers(&request.text))
    }
}

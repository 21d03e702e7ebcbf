pub mod request_id;

use axum::{
    http::{header, HeaderName},
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    health, history::HistoryController, player::PlayerController, script::ScriptController,
    synthesis::SynthesisController, voice::VoiceController,
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Every controller the router serves
#[derive(Clone)]
pub struct Controllers {
    pub synthesis: Arc<SynthesisController>,
    pub history: Arc<HistoryController>,
    pub player: Arc<PlayerController>,
    pub voice: Arc<VoiceController>,
    pub script: Arc<ScriptController>,
}

pub fn create_router(controllers: Controllers) -> Router {
    let synthesis_routes = Router::new()
        .route(
            "/api/synthesis",
            get(SynthesisController::status).post(SynthesisController::start),
        )
        .route("/api/synthesis/cancel", post(SynthesisController::cancel))
        .with_state(controllers.synthesis);

    let history_routes = Router::new()
        .route("/api/history", get(HistoryController::list))
        .route("/api/history/:id", delete(HistoryController::delete))
        .route("/api/history/:id/audio", get(HistoryController::download))
        .with_state(controllers.history);

    let player_routes = Router::new()
        .route("/api/player", get(PlayerController::state))
        .route("/api/player/play", post(PlayerController::play))
        .route("/api/player/pause", post(PlayerController::pause))
        .route("/api/player/resume", post(PlayerController::resume))
        .route("/api/player/stop", post(PlayerController::stop))
        .with_state(controllers.player);

    let voice_routes = Router::new()
        .route("/api/voices", get(VoiceController::list))
        .route("/api/voices/clone", post(VoiceController::clone_voice))
        .route("/api/voices/:id/preview", post(VoiceController::preview))
        .with_state(controllers.voice);

    let script_routes = Router::new()
        .route("/api/proofread", post(ScriptController::proofread))
        .route("/api/markers", get(ScriptController::markers))
        .route("/api/markers/extract", post(ScriptController::extract))
        .with_state(controllers.script);

    Router::new()
        .route("/health", get(health::health))
        .merge(synthesis_routes)
        .merge(history_routes)
        .merge(player_routes)
        .merge(voice_routes)
        .merge(script_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([
                    HeaderName::from_static(X_REQUEST_ID),
                    header::CONTENT_DISPOSITION,
                ]),
        )
}

/// Bind and serve until the process is stopped
pub async fn start_http_server(config: Arc<Config>, controllers: Controllers) -> anyhow::Result<()> {
    let app = create_router(controllers);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

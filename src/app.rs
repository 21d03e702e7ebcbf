//! Dependency wiring shared by the binary and the end-to-end tests.

use std::sync::Arc;

use crate::controllers::{
    history::HistoryController, player::PlayerController, script::ScriptController,
    synthesis::SynthesisController, voice::VoiceController,
};
use crate::domain::{
    history::HistoryStore,
    playback::{AudioSink, PlaybackController},
    script::ProofreadService,
    synthesis::{Orchestrator, SynthesisService, SynthesisSettings},
    voice::{VoiceRegistry, VoiceService},
};
use crate::infrastructure::{
    config::Config,
    gemini::GeminiClient,
    http::Controllers,
    repositories::{
        GeminiTextRepository, GeminiTtsRepository, SpeechSynthesisRepository,
        TextGenerationRepository,
    },
};

/// Build every controller on top of the Gemini repositories
pub fn build_controllers(config: &Config, sink: Arc<dyn AudioSink>) -> Controllers {
    let client = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
    ));
    let speech_repo = Arc::new(GeminiTtsRepository::new(
        client.clone(),
        config.gemini_tts_model.clone(),
    ));
    let text_repo = Arc::new(GeminiTextRepository::new(
        client,
        config.gemini_text_model.clone(),
    ));

    build_controllers_with(config, speech_repo, text_repo, sink)
}

/// Build every controller on top of the given provider capabilities
pub fn build_controllers_with(
    config: &Config,
    speech_repo: Arc<dyn SpeechSynthesisRepository>,
    text_repo: Arc<dyn TextGenerationRepository>,
    sink: Arc<dyn AudioSink>,
) -> Controllers {
    tracing::info!("Instantiating services...");
    let voices = Arc::new(VoiceRegistry::new());
    let history = Arc::new(HistoryStore::new());
    let player = Arc::new(PlaybackController::new(sink));

    let synthesis_service = Arc::new(SynthesisService::new(
        Orchestrator::new(speech_repo.clone()),
        voices.clone(),
        history.clone(),
        player.clone(),
        SynthesisSettings {
            max_script_chars: config.max_script_chars,
            segment_size: config.segment_size,
            export_file_prefix: config.export_file_prefix.clone(),
            autoplay: config.autoplay,
        },
    ));
    let voice_service = Arc::new(VoiceService::new(
        voices,
        text_repo.clone(),
        speech_repo,
        player.clone(),
        config.preview_cache_enabled,
    ));
    let proofread_service = Arc::new(ProofreadService::new(text_repo, config.max_script_chars));

    tracing::info!("Instantiating controllers...");
    Controllers {
        synthesis: Arc::new(SynthesisController::new(synthesis_service)),
        history: Arc::new(HistoryController::new(history.clone(), player.clone())),
        player: Arc::new(PlayerController::new(player, history)),
        voice: Arc::new(VoiceController::new(voice_service)),
        script: Arc::new(ScriptController::new(proofread_service)),
    }
}

pub mod gemini_text_repository;
pub mod gemini_tts_repository;
pub mod speech_synthesis_repository;
pub mod text_generation_repository;

pub use gemini_text_repository::GeminiTextRepository;
pub use gemini_tts_repository::GeminiTtsRepository;
pub use speech_synthesis_repository::SpeechSynthesisRepository;
pub use text_generation_repository::{InlineAudio, TextGenerationRepository};

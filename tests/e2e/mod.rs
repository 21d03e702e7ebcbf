// End-to-end tests for the VoiceScript API.
//
// Each test serves the real router on an ephemeral port. The speech and text
// models are replaced by an in-process mock of the Gemini endpoint, so the
// reqwest adapters, prompt building and PCM decoding all run for real.
// Playback goes to the clock-driven virtual output.

mod helpers;
mod test_history;
mod test_player;
mod test_voices;

use crate::e2e::helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_context::test_context;

fn sample_clip() -> String {
    STANDARD.encode(b"RIFF....WAVEfmt fake clip bytes")
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_prebuilt_voices(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices").await.unwrap();
    response.assert_status(StatusCode::OK);

    let voices = response.body.unwrap();
    let ids: Vec<&str> = voices
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["Zephyr", "Puck", "Kore", "Aoede", "Charon", "Fenrir"]);
    assert_eq!(voices[0]["description"], "Warm & Professional");
    assert_eq!(voices[2]["gender"], "Female");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clone_a_voice_from_a_sample(ctx: &TestContext) {
    ctx.gemini.set_text_reply("Gravelly male voice, late fifties, slow and deliberate.");

    let response = ctx
        .client
        .post("/api/voices/clone", &json!({ "audio": sample_clip(), "mime_type": "audio/webm" }))
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);

    let voice = response.body.unwrap();
    assert!(voice["id"].as_str().unwrap().starts_with("custom-"));
    assert_eq!(voice["name"], "Cloned Voice 1");
    assert_eq!(voice["gender"], "Custom");
    assert_eq!(voice["description"], "Gravelly male voice, late fifties, slow and deliberate.");

    let calls = ctx.gemini.calls();
    assert_eq!(calls[0].path, "gemini-3-flash-preview:generateContent");
    assert_eq!(calls[0].body["contents"][0]["parts"][1]["inlineData"]["mimeType"], "audio/webm");

    let voices = ctx.client.get("/api/voices").await.unwrap().body.unwrap();
    assert_eq!(voices.as_array().unwrap().len(), 7);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_cloned_voices_with_their_profile(ctx: &TestContext) {
    ctx.gemini.set_text_reply("Bright soprano with a quick cadence.");
    let voice = ctx
        .client
        .post("/api/voices/clone", &json!({ "audio": sample_clip() }))
        .await
        .unwrap()
        .body
        .unwrap();

    let response = ctx
        .client
        .post(
            "/api/synthesis",
            &json!({ "text": "Hello from my clone.", "voice": voice["id"], "language": "english" }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::ACCEPTED);
    ctx.wait_for_job().await;

    let calls = ctx.gemini.speech_calls();
    assert_eq!(
        calls[0].body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Zephyr"
    );
    let prompt = calls[0].body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("ADOPT VOICE CHARACTERISTICS: Bright soprano with a quick cadence."));

    let history = ctx.client.get("/api/history").await.unwrap().body.unwrap();
    assert_eq!(history[0]["voice_label"], "Cloned Voice 1");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_when_analysis_returns_nothing(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/voices/clone", &json!({ "audio": sample_clip() }))
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.body.unwrap()["description"], "Standard expressive voice.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_sample_that_is_not_base64(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/voices/clone", &json!({ "audio": "definitely not base64!" }))
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("not valid base64");
    assert!(ctx.gemini.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_toggle_voice_preview(ctx: &TestContext) {
    ctx.gemini.set_audio_duration(Duration::from_secs(5));

    let response = ctx.client.post_empty("/api/voices/Puck/preview").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.unwrap()["outcome"], "started");
    assert_eq!(
        ctx.gemini.spoken_scripts(),
        vec!["Voice check for Puck. (amused) Working perfectly!".to_string()]
    );

    let state = ctx.client.get("/api/player").await.unwrap().body.unwrap();
    assert_eq!(state["source"]["kind"], "preview");
    assert_eq!(state["source"]["voice_id"], "Puck");

    let response = ctx.client.post_empty("/api/voices/Puck/preview").await.unwrap();
    assert_eq!(response.body.unwrap()["outcome"], "stopped");

    let state = ctx.client.get("/api/player").await.unwrap().body.unwrap();
    assert_eq!(state["state"], "stopped");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_when_previewing_unknown_voice(ctx: &TestContext) {
    let response = ctx.client.post_empty("/api/voices/Nobody/preview").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_preview_failures_as_bad_gateway(ctx: &TestContext) {
    ctx.gemini.set_missing_audio_on(1);

    let response = ctx.client.post_empty("/api/voices/Kore/preview").await.unwrap();
    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("No audio data received.");
}

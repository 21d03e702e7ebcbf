use crate::e2e::helpers;

use helpers::gemini_mock::GeminiMock;
use helpers::{test_config, TestContext};
use hyper::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use test_context::test_context;
use uuid::Uuid;

async fn player(ctx: &TestContext, action: &str) -> Value {
    let response = ctx
        .client
        .post_empty(&format!("/api/player/{}", action))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response.body.unwrap()
}

async fn play(ctx: &TestContext, history_id: &str) -> Value {
    let response = ctx
        .client
        .post("/api/player/play", &json!({ "history_id": history_id }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response.body.unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_walk_through_the_playback_states(ctx: &TestContext) {
    ctx.gemini.set_audio_duration(Duration::from_secs(10));
    let id = ctx.synthesize("A long take.").await;

    let state = play(ctx, &id).await;
    assert_eq!(state["state"], "playing");
    assert_eq!(state["source"]["kind"], "history");
    assert_eq!(state["source"]["id"], id.as_str());
    assert_eq!(state["duration_ms"], 10_000);

    assert_eq!(player(ctx, "pause").await["state"], "paused");
    assert_eq!(player(ctx, "pause").await["state"], "paused");
    assert_eq!(player(ctx, "resume").await["state"], "playing");

    let stopped = player(ctx, "stop").await;
    assert_eq!(stopped["state"], "stopped");
    assert!(stopped.get("source").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_pause_and_resume_when_stopped(ctx: &TestContext) {
    assert_eq!(player(ctx, "pause").await["state"], "stopped");
    assert_eq!(player(ctx, "resume").await["state"], "stopped");
    assert_eq!(player(ctx, "stop").await["state"], "stopped");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_replace_the_active_playback(ctx: &TestContext) {
    ctx.gemini.set_audio_duration(Duration::from_secs(10));
    let first = ctx.synthesize("First take.").await;
    let second = ctx.synthesize("Second take.").await;

    play(ctx, &first).await;
    let state = play(ctx, &second).await;

    assert_eq!(state["state"], "playing");
    assert_eq!(state["source"]["id"], second.as_str());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stop_when_playback_reaches_the_end(ctx: &TestContext) {
    let id = ctx.synthesize("Short take.").await;

    assert_eq!(play(ctx, &id).await["state"], "playing");
    tokio::time::sleep(Duration::from_millis(400)).await;

    let state = ctx.client.get("/api/player").await.unwrap().body.unwrap();
    assert_eq!(state["state"], "stopped");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_entry(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/player/play", &json!({ "history_id": Uuid::new_v4() }))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_should_autoplay_finished_scripts_when_enabled() {
    let gemini = GeminiMock::start().await;
    gemini.set_audio_duration(Duration::from_secs(10));
    let mut config = test_config(&gemini.base_url);
    config.autoplay = true;
    let ctx = TestContext::with_config(gemini, config).await;

    let id = ctx.synthesize("Play me right away.").await;

    let state = ctx.client.get("/api/player").await.unwrap().body.unwrap();
    assert_eq!(state["state"], "playing");
    assert_eq!(state["source"]["id"], id.as_str());
}

use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_context::test_context;
use uuid::Uuid;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_history_most_recent_first(ctx: &TestContext) {
    let first = ctx.synthesize("The first take.").await;
    let second = ctx.synthesize("The second take.").await;

    let response = ctx.client.get("/api/history").await.unwrap();
    response.assert_status(StatusCode::OK);

    let entries = response.body.unwrap();
    let ids: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);

    assert_eq!(entries[0]["text"], "The second take.");
    assert_eq!(entries[0]["voice_label"], "Kore");
    assert_eq!(entries[0]["duration_ms"], 100);
    assert_eq!(entries[0]["size_bytes"], 44 + 4_800);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_truncate_long_display_text(ctx: &TestContext) {
    let script = "word ".repeat(60);
    ctx.synthesize(&script).await;

    let response = ctx.client.get("/api/history").await.unwrap();
    let text = response.body.unwrap()[0]["text"].as_str().unwrap().to_string();

    assert_eq!(text.chars().count(), 121);
    assert!(text.ends_with('…'));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_an_entry(ctx: &TestContext) {
    let id = ctx.synthesize("Delete me.").await;

    let response = ctx.client.delete(&format!("/api/history/{}", id)).await.unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.client.get("/api/history").await.unwrap();
    assert_eq!(response.body.unwrap(), json!([]));

    let response = ctx
        .client
        .get(&format!("/api/history/{}/audio", id))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_entry(ctx: &TestContext) {
    let id = Uuid::new_v4();

    let response = ctx.client.delete(&format!("/api/history/{}", id)).await.unwrap();
    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("History entry");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stop_playback_when_the_playing_entry_is_deleted(ctx: &TestContext) {
    ctx.gemini.set_audio_duration(Duration::from_secs(10));
    let id = ctx.synthesize("Playing while deleted.").await;

    let response = ctx
        .client
        .post("/api/player/play", &json!({ "history_id": id }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.unwrap()["state"], "playing");

    ctx.client.delete(&format!("/api/history/{}", id)).await.unwrap();

    let player = ctx.client.get("/api/player").await.unwrap().body.unwrap();
    assert_eq!(player["state"], "stopped");
}

//! Session wired to the HTTP client against a mock server

use remix_core::TrackId;
use remix_playback::{MediaEvent, MediaOutput, PlayError, PlayerConfig, SourceGeneration};
use remix_server_client::{ClientConfig, RemixServerClient};
use remix_session::{PlayerSession, Services};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct NullOutput;

impl MediaOutput for NullOutput {
    fn set_source(&mut self, _url: &str, _generation: SourceGeneration) {}
    fn play(&mut self) -> Result<(), PlayError> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn set_current_time(&mut self, _seconds: f64) {}
    fn set_native_loop(&mut self, _enabled: bool) {}
    fn set_volume(&mut self, _gain: f32) {}
}

#[tokio::test]
async fn browse_play_like_and_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/remixes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "r1", "title": "One", "audioUrl": "https://cdn.test/r1.mp3" },
            { "id": "r2", "title": "Two", "audioUrl": "https://cdn.test/r2.mp3" }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/likes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "likes": ["r2"] })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/likes"))
        .and(body_json(serde_json::json!({ "trackId": "r1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "liked": true })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/history"))
        .and(body_json(serde_json::json!({ "trackId": "r1", "durationMs": 95500 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(RemixServerClient::new(ClientConfig::new(mock_server.uri())).unwrap());
    let mut session =
        PlayerSession::new(NullOutput, PlayerConfig::default(), Services::from_backend(client));

    session.mount().await;
    assert!(session.is_liked(&TrackId::new("r2")));

    let remixes = session.load_catalog().await.unwrap();
    session.play_queue(remixes, 0).unwrap();

    let generation = session.controller().generation();
    session.handle_media_event(MediaEvent::loaded_metadata(generation, 95.5));

    session.toggle_like(&TrackId::new("r1"));
    session.settle().await;

    assert!(session.is_liked(&TrackId::new("r1")));
    assert!(session.is_liked(&TrackId::new("r2")));
}

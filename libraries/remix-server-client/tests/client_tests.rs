//! Tests for the remix server client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use remix_core::{
    CatalogService, HistoryService, LikesService, ListenRecord, RemixError, TrackId,
};
use remix_server_client::{ClientConfig, RemixServerClient, ServerClientError};
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> RemixServerClient {
    RemixServerClient::new(ClientConfig::with_token(server.uri(), "test-token")).unwrap()
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_fetch_remixes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/remixes"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "r1",
                    "title": "Midnight Flip",
                    "artist": "DJ Ram",
                    "coverImageUrl": "https://cdn.test/r1.jpg",
                    "audioUrl": "https://cdn.test/r1.mp3",
                    "genre": "house",
                    "duration": 213.5
                },
                {
                    "id": "r2",
                    "title": "Bare Bones",
                    "audioUrl": "https://cdn.test/r2.mp3"
                }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let tracks = client.fetch_tracks().await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, TrackId::new("r1"));
        assert_eq!(tracks[0].artist.as_deref(), Some("DJ Ram"));
        assert_eq!(tracks[0].duration, Some(213.5));
        assert_eq!(tracks[1].audio_url, "https://cdn.test/r2.mp3");
        assert!(tracks[1].artist.is_none());
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_authorization() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/remixes"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(1)
            .expect(0)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/remixes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RemixServerClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let tracks = client.get_remixes().await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/remixes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.get_remixes().await;

        match result {
            Err(ServerClientError::ParseError(msg)) => assert!(msg.contains("remix list")),
            other => panic!("Expected ParseError, got {:?}", other.map(|t| t.len())),
        }
    }
}

// =============================================================================
// Likes Tests
// =============================================================================

mod likes {
    use super::*;

    #[tokio::test]
    async fn test_fetch_likes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/likes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "likes": ["r1", "r3"] })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let likes = client.fetch_likes().await.unwrap();

        assert_eq!(likes, vec![TrackId::new("r1"), TrackId::new("r3")]);
    }

    #[tokio::test]
    async fn test_toggle_like_posts_track_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/likes"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({ "trackId": "r7" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "liked": true })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let liked = client.toggle_like(&TrackId::new("r7")).await.unwrap();

        assert!(liked);
    }

    #[tokio::test]
    async fn test_toggle_like_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/likes"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = RemixServerClient::new(ClientConfig::new(mock_server.uri())).unwrap();

        let direct = client.post_toggle_like(&TrackId::new("r1")).await;
        assert!(matches!(direct, Err(ServerClientError::AuthRequired)));

        let via_trait = client.toggle_like(&TrackId::new("r1")).await;
        assert!(matches!(via_trait, Err(RemixError::Unauthorized)));
    }
}

// =============================================================================
// History Tests
// =============================================================================

mod history {
    use super::*;

    #[tokio::test]
    async fn test_record_listen_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/history"))
            .and(body_json(serde_json::json!({ "trackId": "r2", "durationMs": 184000 })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client
            .record_listen(&ListenRecord::new("r2", 184_000))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_record_listen_ignores_response_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/history"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client
            .post_history(&ListenRecord::new("r2", 1_000))
            .await
            .is_ok());
    }
}

// =============================================================================
// Error Handling Tests
// =============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_server_error_carries_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/likes"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        match client.get_likes().await {
            Err(ServerClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_maps_to_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/remixes"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.fetch_tracks().await;
        assert!(matches!(result, Err(RemixError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Nothing listens on port 1
        let client = RemixServerClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();
        let result = client.get_remixes().await;

        assert!(matches!(result, Err(ServerClientError::ServerUnreachable(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_unreachable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/likes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "likes": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client =
            RemixServerClient::new(ClientConfig::new(mock_server.uri()).timeout(1)).unwrap();
        let result = client.get_likes().await;

        assert!(matches!(result, Err(ServerClientError::ServerUnreachable(_))));
    }
}

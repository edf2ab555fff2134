use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::to_bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use nba_pbp_server::games::GamesClient;
use nba_pbp_server::handler::{AppState, build_router, health, pbp_handler};
use nba_pbp_server::pbp::PlayByPlayLookup;
use nba_pbp_server::upstream::build_agent;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn state_for(games_url: String) -> AppState {
    let games = GamesClient::new(build_agent(Duration::from_secs(2)), games_url);
    AppState::new(PlayByPlayLookup::new(games, "http://data.nba.net"))
}

async fn call(state: AppState, code: &str) -> (StatusCode, serde_json::Value) {
    let response: Response = pbp_handler(State(state), Path(code.to_string()))
        .await
        .into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should be readable");
    let body = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, body)
}

async fn mocked_games() -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/games")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            std::fs::read_to_string("tests/games_sample.json")
                .expect("failed to read games_sample.json"),
        )
        .create_async()
        .await;
    (server, mock)
}

async fn serve(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    addr
}

/// GET `path` from the served router, returning status and body even for error statuses.
async fn get(addr: SocketAddr, path: &str) -> (u16, String) {
    let url = format!("http://{}{}", addr, path);
    tokio::task::spawn_blocking(move || {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        let response = agent.get(&url).call().expect("server should answer");
        let status = response.status().as_u16();
        let body = response.into_body().read_to_string().expect("body should be readable");
        (status, body)
    })
    .await
    .expect("request task failed")
}

#[tokio::test]
async fn returns_requested_game_with_pbp_url() {
    let (server, _mock) = mocked_games().await;
    let state = state_for(format!("{}/games", server.url()));

    let (status, body) = call(state, "GSWNYK").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameId"], "0021800002");
    assert_eq!(body["vTeam"]["triCode"], "GSW");
    assert_eq!(body["hTeam"]["triCode"], "NYK");
    assert_eq!(
        body["pbpUrl"],
        "http://data.nba.net/data/10s/prod/v1/20240115/0021800002_pbp_4.json"
    );
}

#[tokio::test]
async fn unknown_code_is_a_generic_server_error() {
    let (server, _mock) = mocked_games().await;
    let state = state_for(format!("{}/games", server.url()));

    let (status, body) = call(state, "MIACHI").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "server error occurred" }));
}

#[tokio::test(flavor = "current_thread")]
async fn upstream_failure_is_logged_and_hidden_from_caller() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    // Nothing listens on port 1
    let state = state_for("http://127.0.0.1:1/games".to_string());
    let (status, body) = call(state, "LALBOS").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "server error occurred" }));

    let logged = logs.contents();
    assert!(logged.contains("error retrieving game"), "logs were: {}", logged);
    assert!(logged.contains("request to http://127.0.0.1:1/games failed"), "logs were: {}", logged);
    assert_eq!(logged.matches("ERROR").count(), 1, "logs were: {}", logged);
}

#[tokio::test]
async fn malformed_games_document_is_a_generic_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/games")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;
    let state = state_for(format!("{}/games", server.url()));

    let (status, body) = call(state, "LALBOS").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "server error occurred");
}

#[tokio::test]
async fn health_reports_ok() {
    let response = health().await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn router_serves_game_by_code() {
    let (server, _mock) = mocked_games().await;
    let addr = serve(state_for(format!("{}/games", server.url()))).await;

    let (status, body) = get(addr, "/pbp/GSWNYK").await;

    assert_eq!(status, 200, "body was: {}", body);
    let json: serde_json::Value = serde_json::from_str(&body).expect("body should be JSON");
    assert_eq!(json["gameId"], "0021800002");
}

#[tokio::test]
async fn router_answers_unknown_codes_with_generic_error() {
    let (server, _mock) = mocked_games().await;
    let addr = serve(state_for(format!("{}/games", server.url()))).await;

    // Everything after `/pbp/` is the code, so these are all lookups that find nothing
    for path in ["/pbp/MIACHI", "/pbp/", "/pbp/LALBOS/", "/pbp/LAL/BOS"] {
        let (status, body) = get(addr, path).await;
        assert_eq!(status, 500, "path {} body was: {}", path, body);
        let json: serde_json::Value = serde_json::from_str(&body).expect("body should be JSON");
        assert_eq!(json, serde_json::json!({ "error": "server error occurred" }), "path {}", path);
    }
}

#[tokio::test]
async fn router_serves_health() {
    let addr = serve(state_for("http://127.0.0.1:1/games".to_string())).await;
    let (status, body) = get(addr, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
}

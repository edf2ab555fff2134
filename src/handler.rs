use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::config::Config;
use crate::error::PbpError;
use crate::games::GamesClient;
use crate::model::pbp::PlayByPlayGame;
use crate::pbp::PlayByPlayLookup;
use crate::upstream;

#[derive(Debug, Clone)]
pub struct AppState {
    pub lookup: PlayByPlayLookup,
}

impl AppState {
    pub fn new(lookup: PlayByPlayLookup) -> Self {
        Self { lookup }
    }

    pub fn from_config(config: &Config) -> Self {
        let agent = upstream::build_agent(config.upstream_timeout);
        let games = GamesClient::new(agent, config.games_url.clone());
        Self::new(PlayByPlayLookup::new(games, config.nba_base_url.clone()))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/pbp/", get(pbp_empty_code_handler))
        .route("/pbp/{*game_code}", get(pbp_handler))
        .route("/health", get(health))
        .with_state(state)
}

/// `GET /pbp/{game_code}`. The code is everything after `/pbp/`, slashes included.
/// Any failure is logged and answered with a generic 500.
pub async fn pbp_handler(
    State(state): State<AppState>,
    Path(game_code): Path<String>,
) -> Result<Json<PlayByPlayGame>, PbpError> {
    play_by_play(state, game_code).await
}

/// `GET /pbp/` carries an empty code, which never matches a game.
pub async fn pbp_empty_code_handler(
    State(state): State<AppState>,
) -> Result<Json<PlayByPlayGame>, PbpError> {
    play_by_play(state, String::new()).await
}

async fn play_by_play(
    state: AppState,
    game_code: String,
) -> Result<Json<PlayByPlayGame>, PbpError> {
    info!(game_code = %game_code, "requested pbp");

    // The upstream client blocks, so keep it off the async workers.
    let lookup = state.lookup.clone();
    let pbp_game = tokio::task::spawn_blocking(move || lookup.for_game_code(&game_code)).await??;

    Ok(Json(pbp_game))
}

pub async fn health() -> &'static str {
    "ok"
}

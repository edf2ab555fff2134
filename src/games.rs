use std::fmt;

use tracing::{info, instrument};
use ureq::Agent;

use crate::error::PbpError;
use crate::model::game::GameCollection;
use crate::upstream;

/// Client for the local games service listing today's schedule.
#[derive(Clone)]
pub struct GamesClient {
    agent: Agent,
    games_url: String,
}

impl fmt::Debug for GamesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GamesClient").field("games_url", &self.games_url).finish()
    }
}

impl GamesClient {
    pub fn new(agent: Agent, games_url: impl Into<String>) -> Self {
        Self { agent, games_url: games_url.into() }
    }

    /// Fetch today's games. A single failed attempt is returned as is.
    #[instrument(level = "info", skip(self), fields(url = %self.games_url))]
    pub fn fetch_games(&self) -> Result<GameCollection, PbpError> {
        let games: GameCollection = upstream::get_json(&self.agent, &self.games_url)?;
        info!(games = games.len(), "Retrieved games");
        Ok(games)
    }
}

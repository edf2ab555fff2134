use tracing::{debug, info, instrument};

use crate::error::PbpError;
use crate::games::GamesClient;
use crate::model::game::Game;
use crate::model::pbp::PlayByPlayGame;

/// Route of one period's play-by-play feed, in the placeholder form today metadata uses.
pub const DEFAULT_PBP_TEMPLATE: &str =
    "/data/10s/prod/v1/{{gameDate}}/{{gameId}}_pbp_{{periodNum}}.json";

/// Fill the `{{gameDate}}`, `{{gameId}}` and `{{periodNum}}` placeholders for `game`.
pub fn render_pbp_template(template: &str, game: &Game) -> String {
    template
        .replace("{{gameDate}}", &game.game_date())
        .replace("{{gameId}}", &game.id)
        .replace("{{periodNum}}", &game.period.current.to_string())
}

/// Play-by-play URL for the game's current period under `base_url`.
pub fn resolve_pbp_url(base_url: &str, game: &Game) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();
    url.push_str(&render_pbp_template(DEFAULT_PBP_TEMPLATE, game));
    url
}

/// Looks a game up by code and attaches its play-by-play location.
#[derive(Debug, Clone)]
pub struct PlayByPlayLookup {
    games: GamesClient,
    nba_base_url: String,
}

impl PlayByPlayLookup {
    pub fn new(games: GamesClient, nba_base_url: impl Into<String>) -> Self {
        Self { games, nba_base_url: nba_base_url.into() }
    }

    /// Fetch today's games, find `game_code` and resolve its feed URL.
    /// Blocks on the games service.
    #[instrument(level = "info", skip(self))]
    pub fn for_game_code(&self, game_code: &str) -> Result<PlayByPlayGame, PbpError> {
        let games = self.games.fetch_games()?;

        let game = games.find_by_game_code(game_code).inspect_err(|e| {
            debug!(error = %e, "error finding game");
        })?;

        let pbp_url = resolve_pbp_url(&self.nba_base_url, game);
        info!(game_id = %game.id, pbp_url = %pbp_url, "Resolved play-by-play url");

        Ok(PlayByPlayGame { game: game.clone(), pbp_url })
    }
}

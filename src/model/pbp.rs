use serde::Serialize;

use crate::model::game::Game;

/// A game plus its play-by-play details.
/// Serialized flat: the game's own fields sit next to `pbpUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayByPlayGame {
    #[serde(flatten)]
    pub game: Game,
    /// Feed for the game's current period. Not fetched yet.
    #[serde(rename = "pbpUrl")]
    pub pbp_url: String,
}

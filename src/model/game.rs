use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use serde::{Deserialize, Serialize};

use crate::error::PbpError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "teamId")]
    pub id: String,
    #[serde(rename = "triCode")]
    pub tri_code: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub current: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "gameId")]
    pub id: String,
    #[serde(rename = "startTimeUTC")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "vTeam")]
    pub visiting_team: Team,
    #[serde(rename = "hTeam")]
    pub home_team: Team,
    // Scheduled games can arrive without a period block.
    #[serde(default)]
    pub period: Period,
}

impl Game {
    /// Visiting tri-code followed by home tri-code, e.g. `LALBOS`.
    pub fn game_code(&self) -> String {
        format!("{}{}", self.visiting_team.tri_code, self.home_team.tri_code)
    }

    /// Start date of the game in US Eastern time, formatted `YYYYMMDD`.
    pub fn game_date(&self) -> String {
        self.start_time.with_timezone(&New_York).format("%Y%m%d").to_string()
    }
}

/// Today's games in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCollection {
    #[serde(default)]
    pub games: Vec<Game>,
}

impl GameCollection {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Return the first game whose code matches exactly (case-sensitive).
    pub fn find_by_game_code(&self, game_code: &str) -> Result<&Game, PbpError> {
        self.games
            .iter()
            .find(|game| game.game_code() == game_code)
            .ok_or_else(|| PbpError::NotFound(game_code.to_string()))
    }
}

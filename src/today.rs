use std::fmt;

use tracing::{info, instrument, warn};
use ureq::Agent;

use crate::error::PbpError;
use crate::model::today::TodayLinks;
use crate::upstream;

pub const TODAY_ROUTE: &str = "/10s/prod/v1/today.json";
pub const PBP_LINK: &str = "pbp";

/// Client for the NBA data feed's daily metadata document.
#[derive(Clone)]
pub struct TodayClient {
    agent: Agent,
    base_url: String,
}

impl fmt::Debug for TodayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodayClient").field("base_url", &self.base_url).finish()
    }
}

impl TodayClient {
    pub fn new(agent: Agent, base_url: impl Into<String>) -> Self {
        Self { agent, base_url: base_url.into() }
    }

    pub fn today_url(&self) -> String {
        format!("{}{}", self.base_url, TODAY_ROUTE)
    }

    #[instrument(level = "info", skip(self))]
    pub fn fetch_today(&self) -> Result<TodayLinks, PbpError> {
        let url = self.today_url();
        let today: TodayLinks = upstream::get_json(&self.agent, &url)?;
        info!(links = today.links.len(), "Retrieved today metadata");
        Ok(today)
    }

    /// Absolute play-by-play link template advertised for today, placeholders left in.
    pub fn today_pbp_url(&self) -> Result<String, PbpError> {
        let today = self.fetch_today()?;
        match today.get(PBP_LINK) {
            Some(route) => Ok(format!("{}{}", self.base_url, route)),
            None => {
                warn!(link = PBP_LINK, "Today metadata is missing link");
                Err(PbpError::MissingKey(PBP_LINK.to_string()))
            }
        }
    }
}

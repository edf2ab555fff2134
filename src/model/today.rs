use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named link templates published in the daily metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayLinks {
    pub links: HashMap<String, String>,
}

impl TodayLinks {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }
}

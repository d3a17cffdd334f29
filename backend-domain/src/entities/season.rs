// Season entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_id: String,
    pub regular_season_start_date: NaiveDate,
    pub regular_season_end_date: NaiveDate,
}

impl Season {
    /// Inclusive on both ends, compared as calendar dates.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.regular_season_start_date && day <= self.regular_season_end_date
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonList {
    #[serde(default)]
    pub seasons: Vec<Season>,
}

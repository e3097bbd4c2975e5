use crate::league::WEEKS_IN_SEASON;
use serde::{Deserialize, Serialize};

/// What a finished year leaves in the record books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSummary {
    pub year: i32,
    pub champion: Option<String>,
    /// (conference, leader) after the regular season.
    pub conference_leaders: Vec<(String, String)>,
    pub cup_champion: Option<String>,
    pub college_playoff_champion: Option<String>,
    pub league_cup_champion: Option<String>,
    pub bowls_played: usize,
    pub retirements: usize,
    pub transfers: usize,
}

impl SeasonSummary {
    pub fn new(year: i32) -> Self {
        SeasonSummary {
            year,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonState {
    pub year: i32,
    /// 1..=52
    pub week: u8,
    /// Filled in as the year goes on, pushed to `history` at the rollover.
    #[serde(default)]
    pub current: SeasonSummary,
    pub history: Vec<SeasonSummary>,
}

impl SeasonState {
    pub fn new(year: i32) -> Self {
        SeasonState {
            year,
            week: 1,
            current: SeasonSummary::new(year),
            history: Vec::new(),
        }
    }

    pub fn is_last_week(&self) -> bool {
        self.week >= WEEKS_IN_SEASON
    }

    /// Moves to the next week. Returns true when the year rolled over.
    pub fn advance_week(&mut self) -> bool {
        if self.is_last_week() {
            self.close_year();
            true
        } else {
            self.week += 1;
            false
        }
    }

    fn close_year(&mut self) {
        let finished = std::mem::replace(&mut self.current, SeasonSummary::new(self.year + 1));
        self.history.push(finished);

        self.year += 1;
        self.week = 1;
    }

    pub fn last_summary(&self) -> Option<&SeasonSummary> {
        self.history.last()
    }
}

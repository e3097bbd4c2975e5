use crate::league::{Competition, FixtureId};
use crate::r#match::MatchResult;
use crate::season::SeasonEndReport;
use crate::simulator::SimulatorData;
use log::{debug, warn};

#[derive(Debug, Clone)]
pub struct PlayedFixture {
    pub fixture_id: FixtureId,
    pub week: u8,
    pub competition: Competition,
    pub result: MatchResult,
}

impl PlayedFixture {
    /// Stores the result on the calendar, then on clubs, players and the playoff bracket.
    /// A fixture that already has a result is left alone.
    pub fn process(&self, data: &mut SimulatorData) -> bool {
        if !data.calendar.record_result(self.fixture_id, &self.result) {
            debug!("fixture {:?} already played, result ignored", self.fixture_id);
            return false;
        }

        self.result.apply(&mut data.clubs);

        let score = self.result.score;

        match self.competition {
            Competition::League(_) => {
                if let Some(home) = data.clubs.get_mut(self.result.home_club_id) {
                    home.record.register(score.home, score.away);
                }
                if let Some(away) = data.clubs.get_mut(self.result.away_club_id) {
                    away.record.register(score.away, score.home);
                }
            }
            Competition::Playoff(round) => {
                match (data.playoffs.as_mut(), self.result.winner(), self.result.loser()) {
                    (Some(bracket), Some(winner), Some(loser)) => bracket.record(round, winner, loser),
                    _ => warn!("playoff {} result without a bracket", round),
                }
            }
            _ => {}
        }

        true
    }
}

#[derive(Debug, Clone)]
pub struct WeekResult {
    pub year: i32,
    pub week: u8,
    pub fixtures: Vec<PlayedFixture>,
    pub season_end: Option<SeasonEndReport>,
}

impl WeekResult {
    pub fn new(year: i32, week: u8) -> Self {
        WeekResult {
            year,
            week,
            fixtures: Vec::new(),
            season_end: None,
        }
    }

    pub fn has_match_results(&self) -> bool {
        !self.fixtures.is_empty()
    }
}

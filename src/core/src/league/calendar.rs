use crate::club::ClubId;
use crate::league::PlayoffRound;
use crate::r#match::{MatchEvent, MatchResult, Score};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const WEEKS_IN_SEASON: u8 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    Divisional,
    IntraRotation,
    InterRotation,
    IntraPosition,
    InterPosition,
}

impl MatchType {
    /// Divisional pairs meet twice; everything else is a single leg.
    pub fn is_single_leg(&self) -> bool {
        !matches!(self, MatchType::Divisional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competition {
    League(MatchType),
    Cup { phase: u8 },
    Bowl,
    Playoff(PlayoffRound),
    CollegePlayoff { round: u8 },
    LeagueCup { round: u8 },
}

impl Competition {
    pub fn is_league(&self) -> bool {
        matches!(self, Competition::League(_))
    }

    pub fn is_knockout(&self) -> bool {
        !self.is_league()
    }
}

impl Display for Competition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Competition::League(match_type) => write!(f, "League ({:?})", match_type),
            Competition::Cup { phase } => write!(f, "Copa do Brasil, phase {}", phase),
            Competition::Bowl => write!(f, "Bowl"),
            Competition::Playoff(round) => write!(f, "Playoffs, {}", round),
            Competition::CollegePlayoff { round } => write!(f, "College Playoff, round {}", round),
            Competition::LeagueCup { round } => write!(f, "Copa da Liga, round {}", round),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub week: u8,
    pub home: ClubId,
    pub away: ClubId,
    pub competition: Competition,
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<MatchEvent>>,
}

impl Fixture {
    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn involves(&self, club_id: ClubId) -> bool {
        self.home == club_id || self.away == club_id
    }

    pub fn winner(&self) -> Option<ClubId> {
        let score = self.score?;

        match score.home.cmp(&score.away) {
            std::cmp::Ordering::Greater => Some(self.home),
            std::cmp::Ordering::Less => Some(self.away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Season fixtures in insertion order; ids are positions in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Calendar {
    fixtures: Vec<Fixture>,
}

impl Calendar {
    pub fn new() -> Self {
        Calendar::default()
    }

    pub fn schedule(&mut self, week: u8, home: ClubId, away: ClubId, competition: Competition) -> FixtureId {
        debug_assert!((1..=WEEKS_IN_SEASON).contains(&week));

        let id = FixtureId(self.fixtures.len() as u32);

        self.fixtures.push(Fixture {
            id,
            week,
            home,
            away,
            competition,
            score: None,
            events: None,
        });

        id
    }

    /// Appends a tie that was decided outside the weekly loop.
    pub fn add_played(&mut self, week: u8, competition: Competition, result: &MatchResult) -> FixtureId {
        let id = self.schedule(week, result.home_club_id, result.away_club_id, competition);
        self.record_result(id, result);
        id
    }

    /// Stores a result once. Returns false when the fixture is unknown or already played.
    pub fn record_result(&mut self, id: FixtureId, result: &MatchResult) -> bool {
        match self.fixtures.get_mut(id.0 as usize) {
            Some(fixture) if !fixture.is_played() => {
                fixture.score = Some(result.score);
                fixture.events = result.events.clone();
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: FixtureId) -> Option<&Fixture> {
        self.fixtures.get(id.0 as usize)
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn week(&self, week: u8) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().filter(move |f| f.week == week)
    }

    pub fn unplayed_in_week(&self, week: u8) -> Vec<FixtureId> {
        self.week(week).filter(|f| !f.is_played()).map(|f| f.id).collect()
    }

    pub fn for_club(&self, club_id: ClubId) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().filter(move |f| f.involves(club_id))
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Restores a stored calendar. Fixture ids must match their positions.
    pub fn from_fixtures(fixtures: Vec<Fixture>) -> Option<Self> {
        let ordered = fixtures
            .iter()
            .enumerate()
            .all(|(idx, f)| f.id.0 as usize == idx && (1..=WEEKS_IN_SEASON).contains(&f.week));

        ordered.then_some(Calendar { fixtures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(home: u32, away: u32, score: Score) -> MatchResult {
        MatchResult {
            home_club_id: ClubId(home),
            away_club_id: ClubId(away),
            score,
            details: Vec::new(),
            appearances: Vec::new(),
            events: None,
            decided_by_tiebreak: false,
        }
    }

    #[test]
    fn result_is_recorded_once() {
        let mut calendar = Calendar::new();
        let id = calendar.schedule(3, ClubId(1), ClubId(2), Competition::League(MatchType::Divisional));

        assert!(calendar.record_result(id, &result(1, 2, Score::new(2, 1))));
        assert!(!calendar.record_result(id, &result(1, 2, Score::new(0, 5))));

        let fixture = calendar.get(id).unwrap();
        assert_eq!(fixture.score, Some(Score::new(2, 1)));
        assert_eq!(fixture.winner(), Some(ClubId(1)));
    }

    #[test]
    fn week_queries_skip_played_fixtures() {
        let mut calendar = Calendar::new();
        let first = calendar.schedule(5, ClubId(1), ClubId(2), Competition::League(MatchType::IntraRotation));
        calendar.schedule(5, ClubId(3), ClubId(4), Competition::League(MatchType::InterPosition));
        calendar.schedule(6, ClubId(1), ClubId(3), Competition::League(MatchType::Divisional));

        calendar.record_result(first, &result(1, 2, Score::new(0, 0)));

        assert_eq!(calendar.week(5).count(), 2);
        assert_eq!(calendar.unplayed_in_week(5).len(), 1);
        assert_eq!(calendar.for_club(ClubId(1)).count(), 2);
    }

    #[test]
    fn played_ties_are_appended() {
        let mut calendar = Calendar::new();

        let id = calendar.add_played(20, Competition::Cup { phase: 1 }, &result(7, 8, Score::new(1, 2)));

        let fixture = calendar.get(id).unwrap();
        assert!(fixture.is_played());
        assert_eq!(fixture.winner(), Some(ClubId(8)));
        assert!(fixture.competition.is_knockout());
    }
}

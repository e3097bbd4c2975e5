pub mod bowls;
pub mod college_playoff;
pub mod cup;
pub mod knockout;
pub mod league_cup;
pub mod pool;

pub use bowls::*;
pub use college_playoff::*;
pub use cup::*;
pub use knockout::*;
pub use league_cup::*;
pub use pool::*;

use crate::club::ClubId;
use crate::league::Competition;
use crate::r#match::MatchResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentKind {
    NationalCup,
    RegionalFinals,
    CollegePlayoff,
    CollegeLeagueCup,
}

impl TournamentKind {
    pub const ALL: [TournamentKind; 4] = [
        TournamentKind::NationalCup,
        TournamentKind::RegionalFinals,
        TournamentKind::CollegePlayoff,
        TournamentKind::CollegeLeagueCup,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TournamentKind::NationalCup => "Copa do Brasil",
            TournamentKind::RegionalFinals => "Bowls",
            TournamentKind::CollegePlayoff => "College Playoff",
            TournamentKind::CollegeLeagueCup => "Copa da Liga",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TournamentTie {
    pub competition: Competition,
    pub result: MatchResult,
}

/// Everything a tournament instance played, in order. Clubs are untouched
/// until the caller applies the results.
#[derive(Debug, Clone)]
pub struct TournamentResult {
    pub kind: TournamentKind,
    pub champion: Option<ClubId>,
    pub ties: Vec<TournamentTie>,
    pub dropped: Vec<ClubId>,
}

impl TournamentResult {
    pub fn new(kind: TournamentKind) -> Self {
        TournamentResult {
            kind,
            champion: None,
            ties: Vec::new(),
            dropped: Vec::new(),
        }
    }

    pub fn push_round(&mut self, competition: Competition, round: RoundOutcome) {
        self.ties.extend(
            round
                .results
                .into_iter()
                .map(|result| TournamentTie { competition, result }),
        );
    }

    pub fn results(&self) -> impl Iterator<Item = &MatchResult> {
        self.ties.iter().map(|t| &t.result)
    }
}

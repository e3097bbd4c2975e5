use std::sync::atomic::{AtomicBool, Ordering};

static STORE_MATCH_EVENTS_MODE: AtomicBool = AtomicBool::new(false);

/// When enabled, weekly fixtures keep a minute-by-minute event log.
pub fn set_match_events_mode(enabled: bool) {
    STORE_MATCH_EVENTS_MODE.store(enabled, Ordering::SeqCst);
}

pub fn is_match_events_mode() -> bool {
    STORE_MATCH_EVENTS_MODE.load(Ordering::SeqCst)
}

pub mod simulator;
pub use simulator::*;

pub mod club;
pub mod competitions;
pub mod economy;
pub mod error;
pub mod league;
pub mod r#match;
pub mod season;
pub mod settings;
pub mod transfers;

pub mod shared;
pub mod utils;

pub use club::{
    Club, ClubCollection, ClubFinances, ClubFinancialBalance, ClubId, ClubRecord, Coach, CoachingStyle,
    Player, PlayerClubContract, PlayerDevelopment, PlayerGenerator, PlayerId,
    PlayerIdSequence, PlayerPositionType, PlayerStatistics, PlayerValueCalculator, Tier, MAX_ROSTER_SIZE,
};
pub use competitions::{PoolPolicy, TournamentKind, TournamentResult, TournamentTie};
pub use error::LeagueError;
pub use league::{Calendar, Competition, Fixture, FixtureId, LeagueTable, LeagueTableRow, MatchType, PlayoffFormat};
pub use r#match::{MatchEngine, MatchOptions, MatchResult, Score};
pub use season::{SeasonEndReport, SeasonState, SeasonSummary, WeekResult};
pub use settings::SimulationSettings;
pub use transfers::{CompletedTransfer, DraftReport, NoDeal, TransferWindowReport};
pub use utils::*;

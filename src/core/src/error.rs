use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("top tier must have {expected} conferences, found {found}")]
    ConferenceCount { expected: usize, found: usize },

    #[error("conference {conference} must have {expected} divisions, found {found}")]
    DivisionCount {
        conference: String,
        expected: usize,
        found: usize,
    },

    #[error("division {conference}/{division} must have {expected} clubs, found {found}")]
    DivisionSize {
        conference: String,
        division: String,
        expected: usize,
        found: usize,
    },

    #[error("fixture {home} vs {away} does not fit between weeks {first_week} and {last_week}")]
    CalendarOverflow {
        home: String,
        away: String,
        first_week: u8,
        last_week: u8,
    },

    #[error("{tournament} needs at least {needed} clubs, found {found}")]
    InsufficientEntrants {
        tournament: String,
        needed: usize,
        found: usize,
    },

    #[error("invalid playoff format: {0}")]
    InvalidPlayoffFormat(String),
}

impl LeagueError {
    /// Configuration problems are raised before any state is mutated.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, LeagueError::InsufficientEntrants { .. })
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClubContract {
    pub years_remaining: u8,
    /// Annual wage.
    pub wage: i64,
}

impl PlayerClubContract {
    pub fn new(years_remaining: u8, wage: i64) -> Self {
        PlayerClubContract {
            years_remaining,
            wage,
        }
    }

    /// Runs the contract down by one season, returns true when it has expired.
    pub fn tick(&mut self) -> bool {
        self.years_remaining = self.years_remaining.saturating_sub(1);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.years_remaining == 0
    }

    pub fn renewed(&self, years: u8, raise_pct: i64) -> Self {
        PlayerClubContract {
            years_remaining: years,
            wage: self.wage + self.wage * raise_pct / 100,
        }
    }
}

use crate::club::player::builder::PlayerBuilder;
use crate::club::{ClubId, PlayerClubContract, PlayerValueCalculator};
use crate::shared::FullName;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

pub const MIN_ABILITY: u8 = 40;
pub const MAX_ABILITY: u8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out player ids; lives in the simulator context so rookies never collide
/// with loaded players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerIdSequence {
    next: u32,
}

impl PlayerIdSequence {
    pub fn new(next: u32) -> Self {
        PlayerIdSequence { next: next.max(1) }
    }

    pub fn starting_after(max_id: Option<PlayerId>) -> Self {
        Self::new(max_id.map(|id| id.0 + 1).unwrap_or(1))
    }

    pub fn next_id(&mut self) -> PlayerId {
        let id = PlayerId(self.next);
        self.next += 1;
        id
    }

    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for PlayerIdSequence {
    fn default() -> Self {
        Self::new(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerPositionType {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl PlayerPositionType {
    pub const ALL: [PlayerPositionType; 4] = [
        PlayerPositionType::Goalkeeper,
        PlayerPositionType::Defender,
        PlayerPositionType::Midfielder,
        PlayerPositionType::Attacker,
    ];

    /// Slots in the 4-4-2 the clubs line up in.
    pub fn starters(&self) -> usize {
        match self {
            PlayerPositionType::Goalkeeper => 1,
            PlayerPositionType::Defender => 4,
            PlayerPositionType::Midfielder => 4,
            PlayerPositionType::Attacker => 2,
        }
    }

    pub fn scoring_weight(&self) -> u32 {
        match self {
            PlayerPositionType::Goalkeeper => 1,
            PlayerPositionType::Defender => 4,
            PlayerPositionType::Midfielder => 12,
            PlayerPositionType::Attacker => 40,
        }
    }

    pub fn assist_weight(&self) -> u32 {
        match self {
            PlayerPositionType::Goalkeeper => 1,
            PlayerPositionType::Defender => 5,
            PlayerPositionType::Midfielder => 14,
            PlayerPositionType::Attacker => 10,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            PlayerPositionType::Goalkeeper => "GK",
            PlayerPositionType::Defender => "DF",
            PlayerPositionType::Midfielder => "MF",
            PlayerPositionType::Attacker => "FW",
        }
    }
}

impl Display for PlayerPositionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.short_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub goals: u16,
    pub assists: u16,
    pub appearances: u16,
}

impl PlayerStatistics {
    pub fn contributions(&self) -> u16 {
        self.goals + self.assists
    }

    pub fn reset(&mut self) {
        *self = PlayerStatistics::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: FullName,
    pub position: PlayerPositionType,
    pub age: u8,
    pub ability: u8,
    pub potential: u8,

    /// `None` while the player sits in the free-agent pool.
    pub club_id: Option<ClubId>,
    pub contract: Option<PlayerClubContract>,

    pub statistics: PlayerStatistics,
    pub last_evolution: i8,
    pub years_at_club: u8,
}

impl Player {
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    pub fn value(&self) -> i64 {
        PlayerValueCalculator::calculate(self)
    }

    pub fn wage(&self) -> i64 {
        self.contract.as_ref().map(|c| c.wage).unwrap_or(0)
    }

    pub fn is_free_agent(&self) -> bool {
        self.contract.is_none()
    }

    pub fn has_reached_potential(&self) -> bool {
        self.ability >= self.potential
    }

    pub fn reset_season_statistics(&mut self) {
        self.statistics.reset();
    }

    /// Detaches the player from his club: no contract, no club.
    pub fn make_free_agent(&mut self) {
        self.club_id = None;
        self.contract = None;
        self.years_at_club = 0;
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} ({}, {}y, {}/{})",
            self.full_name, self.position, self.age, self.ability, self.potential
        )
    }
}

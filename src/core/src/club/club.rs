use crate::club::{Coach, ClubFinances, Player, PlayerId, PlayerPositionType};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const MAX_ROSTER_SIZE: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClubId(pub u32);

impl Display for ClubId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "club#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Top,
    College1,
    College2,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Top, Tier::College1, Tier::College2];

    pub fn name(&self) -> &'static str {
        match self {
            Tier::Top => "LNF",
            Tier::College1 => "College 1",
            Tier::College2 => "College 2",
        }
    }

    pub fn is_college(&self) -> bool {
        !matches!(self, Tier::Top)
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Season accumulators. Points and goal difference are derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubRecord {
    pub wins: u16,
    pub draws: u16,
    pub losses: u16,
    pub goals_for: u16,
    pub goals_against: u16,
}

impl ClubRecord {
    pub fn register(&mut self, scored: u8, conceded: u8) {
        self.goals_for += scored as u16;
        self.goals_against += conceded as u16;

        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }

    pub fn points(&self) -> u16 {
        3 * self.wins + self.draws
    }

    pub fn goal_diff(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    pub fn played(&self) -> u16 {
        self.wins + self.draws + self.losses
    }

    pub fn reset(&mut self) {
        *self = ClubRecord::default();
    }
}

#[derive(Debug, Clone)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub tier: Tier,
    /// Conference for the top tier, region for the colleges.
    pub conference: String,
    /// Empty for college clubs.
    pub division: String,
    pub rating: u8,

    pub record: ClubRecord,
    pub finance: ClubFinances,

    pub players: Vec<Player>,
    pub coach: Option<Coach>,
}

impl Club {
    pub fn new(
        id: ClubId,
        name: String,
        tier: Tier,
        conference: String,
        division: String,
        rating: u8,
        finance: ClubFinances,
    ) -> Self {
        Club {
            id,
            name,
            tier,
            conference,
            division,
            rating,
            record: ClubRecord::default(),
            finance,
            players: Vec::new(),
            coach: None,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn has_roster_room(&self) -> bool {
        self.players.len() < MAX_ROSTER_SIZE
    }

    /// Adds a player to the roster. A full roster hands the player back.
    pub fn sign(&mut self, mut player: Player) -> Result<(), Player> {
        if !self.has_roster_room() {
            return Err(player);
        }

        debug_assert!(self.player(player.id).is_none(), "player {} signed twice", player.id);

        player.club_id = Some(self.id);
        player.years_at_club = 0;

        self.players.push(player);
        self.refresh_wage_bill();

        Ok(())
    }

    pub fn release(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        let player = self.players.remove(idx);

        self.refresh_wage_bill();

        Some(player)
    }

    /// Swaps the player in `slot` for `replacement`, keeping roster order.
    pub fn replace_player(&mut self, slot: usize, mut replacement: Player) -> Option<Player> {
        if slot >= self.players.len() {
            return None;
        }

        replacement.club_id = Some(self.id);
        let previous = std::mem::replace(&mut self.players[slot], replacement);

        self.refresh_wage_bill();

        Some(previous)
    }

    pub fn refresh_wage_bill(&mut self) {
        self.finance.wage_bill = self.players.iter().map(|p| p.wage()).sum();
    }

    /// Average ability of the best `position.starters()` players at a position.
    pub fn position_strength(&self, position: PlayerPositionType) -> f64 {
        let mut abilities: Vec<u8> = self
            .players
            .iter()
            .filter(|p| p.position == position)
            .map(|p| p.ability)
            .collect();

        if abilities.is_empty() {
            return 0.0;
        }

        abilities.sort_unstable_by(|a, b| b.cmp(a));
        abilities.truncate(position.starters());

        abilities.iter().map(|&a| a as f64).sum::<f64>() / abilities.len() as f64
    }

    pub fn weakest_position(&self) -> PlayerPositionType {
        PlayerPositionType::ALL
            .iter()
            .copied()
            .min_by(|a, b| {
                self.position_strength(*a)
                    .total_cmp(&self.position_strength(*b))
            })
            .unwrap_or(PlayerPositionType::Attacker)
    }

    pub fn players_at(&self, position: PlayerPositionType) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.position == position)
    }
}

impl Display for Club {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.tier, self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::PlayerClubContract;
    use crate::shared::FullName;

    fn player(id: u32, position: PlayerPositionType, ability: u8, wage: i64) -> Player {
        Player::builder()
            .id(PlayerId(id))
            .full_name(FullName::new("Igor".to_string(), "Nunes".to_string()))
            .position(position)
            .age(25)
            .ability(ability)
            .contract(Some(PlayerClubContract::new(2, wage)))
            .build()
            .unwrap()
    }

    fn club() -> Club {
        Club::new(
            ClubId(1),
            "Palmeiras".to_string(),
            Tier::Top,
            "Conferência Sul".to_string(),
            "Sudeste".to_string(),
            92,
            ClubFinances::new(10_000_000, 60_000_000),
        )
    }

    #[test]
    fn record_derives_points_and_goal_diff() {
        let mut record = ClubRecord::default();
        record.register(3, 1);
        record.register(0, 0);
        record.register(1, 2);

        assert_eq!(record.points(), 4);
        assert_eq!(record.goal_diff(), 1);
        assert_eq!(record.played(), 3);

        record.reset();
        assert_eq!(record, ClubRecord::default());
    }

    #[test]
    fn wage_bill_follows_roster_changes() {
        let mut club = club();

        club.sign(player(1, PlayerPositionType::Defender, 80, 100)).unwrap();
        club.sign(player(2, PlayerPositionType::Attacker, 80, 250)).unwrap();
        assert_eq!(club.finance.wage_bill, 350);

        club.release(PlayerId(1));
        assert_eq!(club.finance.wage_bill, 250);

        club.replace_player(0, player(3, PlayerPositionType::Attacker, 60, 40));
        assert_eq!(club.finance.wage_bill, 40);
        assert_eq!(club.players[0].club_id, Some(ClubId(1)));
    }

    #[test]
    fn full_roster_rejects_signing() {
        let mut club = club();
        for id in 0..MAX_ROSTER_SIZE as u32 {
            club.sign(player(id, PlayerPositionType::Midfielder, 70, 1)).unwrap();
        }

        let rejected = club.sign(player(999, PlayerPositionType::Midfielder, 70, 1));

        assert_eq!(rejected.unwrap_err().id, PlayerId(999));
        assert_eq!(club.players.len(), MAX_ROSTER_SIZE);
    }

    #[test]
    fn weakest_position_uses_starters_only() {
        let mut club = club();
        club.sign(player(1, PlayerPositionType::Goalkeeper, 85, 1)).unwrap();
        // a weak backup keeper does not count
        club.sign(player(2, PlayerPositionType::Goalkeeper, 45, 1)).unwrap();
        for id in 10..14 {
            club.sign(player(id, PlayerPositionType::Defender, 80, 1)).unwrap();
        }
        for id in 20..24 {
            club.sign(player(id, PlayerPositionType::Midfielder, 82, 1)).unwrap();
        }
        club.sign(player(30, PlayerPositionType::Attacker, 90, 1)).unwrap();
        club.sign(player(31, PlayerPositionType::Attacker, 60, 1)).unwrap();

        assert_eq!(club.position_strength(PlayerPositionType::Goalkeeper), 85.0);
        assert_eq!(club.position_strength(PlayerPositionType::Attacker), 75.0);
        assert_eq!(club.weakest_position(), PlayerPositionType::Attacker);
    }

    #[test]
    fn missing_position_is_weakest() {
        let mut club = club();
        club.sign(player(1, PlayerPositionType::Defender, 50, 1)).unwrap();

        assert_eq!(club.position_strength(PlayerPositionType::Goalkeeper), 0.0);
        assert_eq!(club.weakest_position(), PlayerPositionType::Goalkeeper);
    }
}

use crate::club::{ClubCollection, ClubId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Score { home, away }
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }

    pub fn margin(&self) -> i32 {
        self.home as i32 - self.away as i32
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatisticType {
    Goal,
    Assist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDetail {
    pub club_id: ClubId,
    pub player_id: PlayerId,
    pub stat_type: MatchStatisticType,
    pub minute: u8,
}

/// Narrative line; cosmetic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub minute: u8,
    pub club_id: Option<ClubId>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub home_club_id: ClubId,
    pub away_club_id: ClubId,
    pub score: Score,
    pub details: Vec<GoalDetail>,
    /// Both sampled line-ups.
    pub appearances: Vec<PlayerId>,
    pub events: Option<Vec<MatchEvent>>,
    /// Level after full time; the extra goal was awarded by the tiebreak.
    pub decided_by_tiebreak: bool,
}

impl MatchResult {
    pub fn winner(&self) -> Option<ClubId> {
        match self.score.home.cmp(&self.score.away) {
            std::cmp::Ordering::Greater => Some(self.home_club_id),
            std::cmp::Ordering::Less => Some(self.away_club_id),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<ClubId> {
        self.winner().map(|winner| {
            if winner == self.home_club_id {
                self.away_club_id
            } else {
                self.home_club_id
            }
        })
    }

    pub fn goals_by(&self, club_id: ClubId) -> impl Iterator<Item = &GoalDetail> {
        self.details
            .iter()
            .filter(move |d| d.club_id == club_id && d.stat_type == MatchStatisticType::Goal)
    }

    /// Writes appearances, goals and assists into the players of both clubs.
    pub fn apply(&self, clubs: &mut ClubCollection) {
        for club_id in [self.home_club_id, self.away_club_id] {
            let Some(club) = clubs.get_mut(club_id) else {
                continue;
            };

            for player_id in &self.appearances {
                if let Some(player) = club.player_mut(*player_id) {
                    player.statistics.appearances += 1;
                }
            }

            for detail in self.details.iter().filter(|d| d.club_id == club_id) {
                if let Some(player) = club.player_mut(detail.player_id) {
                    match detail.stat_type {
                        MatchStatisticType::Goal => player.statistics.goals += 1,
                        MatchStatisticType::Assist => player.statistics.assists += 1,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances, Player, PlayerPositionType, Tier};
    use crate::shared::FullName;

    fn club_with_player(club_id: u32, player_id: u32) -> Club {
        let mut club = Club::new(
            ClubId(club_id),
            format!("Club {}", club_id),
            Tier::Top,
            "Norte".to_string(),
            "Nordeste".to_string(),
            80,
            ClubFinances::new(0, 1_000_000),
        );
        club.sign(
            Player::builder()
                .id(PlayerId(player_id))
                .full_name(FullName::new("Hugo".to_string(), "Moura".to_string()))
                .position(PlayerPositionType::Attacker)
                .age(25)
                .ability(80)
                .build()
                .unwrap(),
        )
        .unwrap();
        club
    }

    #[test]
    fn winner_and_loser() {
        let mut result = MatchResult {
            home_club_id: ClubId(1),
            away_club_id: ClubId(2),
            score: Score::new(1, 2),
            details: Vec::new(),
            appearances: Vec::new(),
            events: None,
            decided_by_tiebreak: false,
        };

        assert_eq!(result.winner(), Some(ClubId(2)));
        assert_eq!(result.loser(), Some(ClubId(1)));

        result.score = Score::new(0, 0);
        assert_eq!(result.winner(), None);
        assert_eq!(result.loser(), None);
    }

    #[test]
    fn apply_updates_player_counters() {
        let mut clubs = ClubCollection::new(vec![club_with_player(1, 10), club_with_player(2, 20)]);

        let result = MatchResult {
            home_club_id: ClubId(1),
            away_club_id: ClubId(2),
            score: Score::new(2, 0),
            details: vec![
                GoalDetail {
                    club_id: ClubId(1),
                    player_id: PlayerId(10),
                    stat_type: MatchStatisticType::Goal,
                    minute: 12,
                },
                GoalDetail {
                    club_id: ClubId(1),
                    player_id: PlayerId(10),
                    stat_type: MatchStatisticType::Goal,
                    minute: 70,
                },
            ],
            appearances: vec![PlayerId(10), PlayerId(20)],
            events: None,
            decided_by_tiebreak: false,
        };

        result.apply(&mut clubs);

        let (_, scorer) = clubs.find_player(PlayerId(10)).unwrap();
        assert_eq!(scorer.statistics.goals, 2);
        assert_eq!(scorer.statistics.appearances, 1);

        let (_, other) = clubs.find_player(PlayerId(20)).unwrap();
        assert_eq!(other.statistics.goals, 0);
        assert_eq!(other.statistics.appearances, 1);
        assert_eq!(result.goals_by(ClubId(1)).count(), 2);
    }
}

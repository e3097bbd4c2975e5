use crate::club::ClubId;
use crate::error::LeagueError;
use crate::league::{LeagueTable, WEEKS_IN_SEASON};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayoffRound {
    WildCard,
    Divisional,
    ConferenceFinal,
    Championship,
}

impl PlayoffRound {
    pub const ALL: [PlayoffRound; 4] = [
        PlayoffRound::WildCard,
        PlayoffRound::Divisional,
        PlayoffRound::ConferenceFinal,
        PlayoffRound::Championship,
    ];
}

impl Display for PlayoffRound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayoffRound::WildCard => "Wild Card",
            PlayoffRound::Divisional => "Divisional Round",
            PlayoffRound::ConferenceFinal => "Conference Final",
            PlayoffRound::Championship => "Championship",
        };
        write!(f, "{}", name)
    }
}

/// Seeding and calendar of the top-tier postseason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayoffFormat {
    /// Qualifiers per conference. Byes fill the bracket up to eight.
    pub clubs_per_conference: usize,
    pub wild_card_week: u8,
    pub divisional_week: u8,
    pub conference_final_week: u8,
    pub championship_week: u8,
}

impl Default for PlayoffFormat {
    fn default() -> Self {
        PlayoffFormat {
            clubs_per_conference: 7,
            wild_card_week: 38,
            divisional_week: 40,
            conference_final_week: 42,
            championship_week: 44,
        }
    }
}

impl PlayoffFormat {
    pub const MIN_CLUBS: usize = 5;
    pub const MAX_CLUBS: usize = 8;

    pub fn validate(&self, first_week: u8) -> Result<(), LeagueError> {
        if !(Self::MIN_CLUBS..=Self::MAX_CLUBS).contains(&self.clubs_per_conference) {
            return Err(LeagueError::InvalidPlayoffFormat(format!(
                "{} clubs per conference, supported {}..={}",
                self.clubs_per_conference,
                Self::MIN_CLUBS,
                Self::MAX_CLUBS
            )));
        }

        let weeks = [
            first_week,
            self.wild_card_week,
            self.divisional_week,
            self.conference_final_week,
            self.championship_week,
        ];

        if weeks.windows(2).any(|w| w[0] >= w[1]) || self.championship_week > WEEKS_IN_SEASON || first_week == 0 {
            return Err(LeagueError::InvalidPlayoffFormat(format!(
                "weeks must increase from {} and end by week {}: {:?}",
                first_week, WEEKS_IN_SEASON, weeks
            )));
        }

        Ok(())
    }

    pub fn week_of(&self, round: PlayoffRound) -> u8 {
        match round {
            PlayoffRound::WildCard => self.wild_card_week,
            PlayoffRound::Divisional => self.divisional_week,
            PlayoffRound::ConferenceFinal => self.conference_final_week,
            PlayoffRound::Championship => self.championship_week,
        }
    }

    pub fn round_at(&self, week: u8) -> Option<PlayoffRound> {
        PlayoffRound::ALL.into_iter().find(|round| self.week_of(*round) == week)
    }

    pub fn last_regular_week(&self) -> u8 {
        self.wild_card_week - 1
    }

    /// Seeds sitting out the wild card round.
    pub fn byes(&self) -> usize {
        Self::MAX_CLUBS - self.clubs_per_conference
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffTie {
    pub round: PlayoffRound,
    pub home: ClubId,
    pub away: ClubId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffGame {
    pub round: PlayoffRound,
    pub winner: ClubId,
    pub loser: ClubId,
}

/// Postseason state: seeds per conference, who is still alive, results so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayoffBracket {
    /// Seed order, seed 1 first.
    pub seeds: BTreeMap<String, Vec<ClubId>>,
    pub eliminated: Vec<ClubId>,
    pub games: Vec<PlayoffGame>,
    pub conference_champions: BTreeMap<String, ClubId>,
    pub champion: Option<ClubId>,
}

impl PlayoffBracket {
    /// Takes the top `clubs_per_conference` of every conference from the standings.
    pub fn seed(table: &LeagueTable, format: &PlayoffFormat) -> Self {
        let seeds: BTreeMap<String, Vec<ClubId>> = table
            .conferences()
            .into_iter()
            .map(|conference| {
                let qualified: Vec<ClubId> = table
                    .conference(&conference)
                    .take(format.clubs_per_conference)
                    .map(|row| row.club_id)
                    .collect();
                (conference, qualified)
            })
            .collect();

        PlayoffBracket {
            seeds,
            ..Default::default()
        }
    }

    pub fn seed_of(&self, club_id: ClubId) -> Option<(&str, usize)> {
        self.seeds.iter().find_map(|(conference, seeds)| {
            seeds
                .iter()
                .position(|id| *id == club_id)
                .map(|idx| (conference.as_str(), idx + 1))
        })
    }

    pub fn is_alive(&self, club_id: ClubId) -> bool {
        self.seed_of(club_id).is_some() && !self.eliminated.contains(&club_id)
    }

    /// Surviving clubs of a conference in seed order.
    pub fn alive(&self, conference: &str) -> Vec<ClubId> {
        self.seeds
            .get(conference)
            .map(|seeds| seeds.iter().copied().filter(|id| !self.eliminated.contains(id)).collect())
            .unwrap_or_default()
    }

    /// Ties for the next conference round. The wild card round leaves the top
    /// seeds out; later rounds re-seed, the best survivor hosting the worst.
    pub fn conference_ties(&self, round: PlayoffRound, format: &PlayoffFormat) -> Vec<PlayoffTie> {
        let mut ties = Vec::new();

        for conference in self.seeds.keys() {
            let alive = self.alive(conference);

            let playing: &[ClubId] = match round {
                PlayoffRound::WildCard => alive.get(format.byes().min(alive.len())..).unwrap_or(&[]),
                PlayoffRound::Championship => continue,
                _ => &alive[..],
            };

            let half = playing.len() / 2;
            for i in 0..half {
                ties.push(PlayoffTie {
                    round,
                    home: playing[i],
                    away: playing[playing.len() - 1 - i],
                });
            }
        }

        ties
    }

    /// The championship tie between conference champions; the better regular-season record hosts.
    pub fn championship_tie(&self, table: &LeagueTable) -> Option<PlayoffTie> {
        let mut champions: Vec<ClubId> = self.conference_champions.values().copied().collect();

        if champions.len() != 2 {
            return None;
        }

        champions.sort_by_key(|id| table.position(*id).unwrap_or(usize::MAX));

        Some(PlayoffTie {
            round: PlayoffRound::Championship,
            home: champions[0],
            away: champions[1],
        })
    }

    pub fn record(&mut self, round: PlayoffRound, winner: ClubId, loser: ClubId) {
        if self.eliminated.contains(&loser) {
            return;
        }

        self.eliminated.push(loser);
        self.games.push(PlayoffGame { round, winner, loser });

        match round {
            PlayoffRound::ConferenceFinal => {
                if let Some((conference, _)) = self.seed_of(winner) {
                    let conference = conference.to_string();
                    self.conference_champions.insert(conference, winner);
                }
            }
            PlayoffRound::Championship => self.champion = Some(winner),
            _ => {}
        }
    }

    pub fn winners(&self, round: PlayoffRound) -> Vec<ClubId> {
        self.games.iter().filter(|g| g.round == round).map(|g| g.winner).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances, Tier};

    /// Two conferences of eight; lower id finishes higher.
    fn table() -> LeagueTable {
        let mut clubs = Vec::new();
        for (offset, conference) in [(0u32, "Brasileira"), (100, "Nacional")] {
            for i in 0..8u32 {
                let mut club = Club::new(
                    ClubId(offset + i + 1),
                    format!("{} {}", conference, i),
                    Tier::Top,
                    conference.to_string(),
                    "Leste".to_string(),
                    80,
                    ClubFinances::new(0, 0),
                );
                for _ in 0..(10 - i) {
                    club.record.register(1, 0);
                }
                clubs.push(club);
            }
        }
        LeagueTable::from_clubs(clubs.iter())
    }

    #[test]
    fn default_format_is_valid() {
        assert_eq!(PlayoffFormat::default().validate(1), Ok(()));
        assert_eq!(PlayoffFormat::default().byes(), 1);
        assert_eq!(PlayoffFormat::default().last_regular_week(), 37);
    }

    #[test]
    fn invalid_formats_are_rejected() {
        let mut format = PlayoffFormat::default();
        format.clubs_per_conference = 9;
        assert!(format.validate(1).is_err());

        let mut format = PlayoffFormat::default();
        format.divisional_week = 38;
        assert!(format.validate(1).is_err());

        let mut format = PlayoffFormat::default();
        format.championship_week = 53;
        assert!(format.validate(1).is_err());
    }

    #[test]
    fn wild_card_gives_seed_one_a_bye() {
        let format = PlayoffFormat::default();
        let bracket = PlayoffBracket::seed(&table(), &format);

        assert_eq!(bracket.seeds["Brasileira"].len(), 7);
        assert_eq!(bracket.seed_of(ClubId(1)), Some(("Brasileira", 1)));

        let ties = bracket.conference_ties(PlayoffRound::WildCard, &format);
        let brasileira: Vec<_> = ties.iter().filter(|t| t.home.0 < 100).map(|t| (t.home.0, t.away.0)).collect();

        assert_eq!(brasileira, vec![(2, 7), (3, 6), (4, 5)]);
        assert!(ties.iter().all(|t| t.home != ClubId(1) && t.away != ClubId(1)));
        assert_eq!(ties.len(), 6);
    }

    #[test]
    fn divisional_round_reseeds() {
        let format = PlayoffFormat::default();
        let mut bracket = PlayoffBracket::seed(&table(), &format);

        // 7 upsets 2, favourites win elsewhere
        bracket.record(PlayoffRound::WildCard, ClubId(7), ClubId(2));
        bracket.record(PlayoffRound::WildCard, ClubId(3), ClubId(6));
        bracket.record(PlayoffRound::WildCard, ClubId(4), ClubId(5));

        let ties: Vec<_> = bracket
            .conference_ties(PlayoffRound::Divisional, &format)
            .into_iter()
            .filter(|t| t.home.0 < 100)
            .map(|t| (t.home.0, t.away.0))
            .collect();

        assert_eq!(ties, vec![(1, 7), (3, 4)]);
    }

    #[test]
    fn champion_flows_through_rounds() {
        let format = PlayoffFormat::default();
        let table = table();
        let mut bracket = PlayoffBracket::seed(&table, &format);

        bracket.record(PlayoffRound::ConferenceFinal, ClubId(3), ClubId(1));
        bracket.record(PlayoffRound::ConferenceFinal, ClubId(101), ClubId(102));

        assert_eq!(bracket.conference_champions.len(), 2);

        let final_tie = bracket.championship_tie(&table).unwrap();
        // 101 won as many games as 1, more than 3
        assert_eq!(final_tie.home, ClubId(101));
        assert_eq!(final_tie.away, ClubId(3));

        bracket.record(PlayoffRound::Championship, ClubId(3), ClubId(101));
        assert_eq!(bracket.champion, Some(ClubId(3)));
        assert!(!bracket.is_alive(ClubId(101)));
    }

    #[test]
    fn eliminated_club_is_recorded_once() {
        let format = PlayoffFormat::default();
        let mut bracket = PlayoffBracket::seed(&table(), &format);

        bracket.record(PlayoffRound::WildCard, ClubId(3), ClubId(6));
        bracket.record(PlayoffRound::WildCard, ClubId(3), ClubId(6));

        assert_eq!(bracket.games.len(), 1);
        assert_eq!(bracket.winners(PlayoffRound::WildCard), vec![ClubId(3)]);
    }
}

use crate::club::{Club, ClubId};
use crate::error::LeagueError;
use std::collections::BTreeMap;

pub const CONFERENCES: usize = 2;
pub const DIVISIONS_PER_CONFERENCE: usize = 4;
pub const CLUBS_PER_DIVISION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub name: String,
    /// Seed order: strongest rating first.
    pub clubs: Vec<ClubId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    pub name: String,
    pub divisions: Vec<Division>,
}

/// Validated conference/division layout of the top tier. Conferences and
/// divisions are ordered by name so rotations are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueStructure {
    pub conferences: Vec<Conference>,
}

impl LeagueStructure {
    pub fn from_clubs<'c>(clubs: impl Iterator<Item = &'c Club>) -> Result<Self, LeagueError> {
        let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<&Club>>> = BTreeMap::new();

        for club in clubs {
            grouped
                .entry(club.conference.as_str())
                .or_default()
                .entry(club.division.as_str())
                .or_default()
                .push(club);
        }

        if grouped.len() != CONFERENCES {
            return Err(LeagueError::ConferenceCount {
                expected: CONFERENCES,
                found: grouped.len(),
            });
        }

        let mut conferences = Vec::with_capacity(CONFERENCES);

        for (conference, divisions) in grouped {
            if divisions.len() != DIVISIONS_PER_CONFERENCE {
                return Err(LeagueError::DivisionCount {
                    conference: conference.to_string(),
                    expected: DIVISIONS_PER_CONFERENCE,
                    found: divisions.len(),
                });
            }

            let mut seeded = Vec::with_capacity(DIVISIONS_PER_CONFERENCE);

            for (division, mut members) in divisions {
                if members.len() != CLUBS_PER_DIVISION {
                    return Err(LeagueError::DivisionSize {
                        conference: conference.to_string(),
                        division: division.to_string(),
                        expected: CLUBS_PER_DIVISION,
                        found: members.len(),
                    });
                }

                members.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));

                seeded.push(Division {
                    name: division.to_string(),
                    clubs: members.iter().map(|c| c.id).collect(),
                });
            }

            conferences.push(Conference {
                name: conference.to_string(),
                divisions: seeded,
            });
        }

        Ok(LeagueStructure { conferences })
    }

    pub fn club_count(&self) -> usize {
        self.conferences
            .iter()
            .flat_map(|c| &c.divisions)
            .map(|d| d.clubs.len())
            .sum()
    }

    pub fn all_clubs(&self) -> impl Iterator<Item = ClubId> + '_ {
        self.conferences
            .iter()
            .flat_map(|c| &c.divisions)
            .flat_map(|d| d.clubs.iter().copied())
    }

    /// (conference, division) of a club.
    pub fn locate(&self, club_id: ClubId) -> Option<(usize, usize)> {
        self.conferences.iter().enumerate().find_map(|(ci, conference)| {
            conference
                .divisions
                .iter()
                .position(|d| d.clubs.contains(&club_id))
                .map(|di| (ci, di))
        })
    }
}

use crate::club::ClubId;
use crate::league::schedule::{LeagueStructure, CLUBS_PER_DIVISION, DIVISIONS_PER_CONFERENCE};
use crate::league::MatchType;
use crate::utils::RandomUtils;
use itertools::Itertools;
use log::debug;
use rand::Rng;
use std::collections::{HashMap, HashSet};

pub const FIXTURES_PER_CLUB: usize = 19;

/// Division pairings for the three rotation years. Each row is an involution:
/// division `i` meets division `ROTATION[k][i]`, which meets `i` back.
const ROTATION: [[usize; DIVISIONS_PER_CONFERENCE]; 3] = [[1, 0, 3, 2], [2, 3, 0, 1], [3, 2, 1, 0]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledPairing {
    pub home: ClubId,
    pub away: ClubId,
    pub match_type: MatchType,
}

impl ScheduledPairing {
    fn new(home: ClubId, away: ClubId, match_type: MatchType) -> Self {
        ScheduledPairing { home, away, match_type }
    }

    fn key(&self) -> (ClubId, ClubId) {
        if self.home < self.away {
            (self.home, self.away)
        } else {
            (self.away, self.home)
        }
    }
}

pub struct ScheduleGenerator;

impl ScheduleGenerator {
    pub fn intra_rotation(year: i32) -> [usize; DIVISIONS_PER_CONFERENCE] {
        ROTATION[year.rem_euclid(3) as usize]
    }

    pub fn inter_rotation(year: i32) -> [usize; DIVISIONS_PER_CONFERENCE] {
        ROTATION[(year + 1).rem_euclid(3) as usize]
    }

    /// Full regular-season pairing list for the given year.
    pub fn generate<R: Rng + ?Sized>(structure: &LeagueStructure, year: i32, rng: &mut R) -> Vec<ScheduledPairing> {
        let intra = Self::intra_rotation(year);
        let inter = Self::inter_rotation(year);

        let mut divisional = Vec::new();
        let mut candidates = Vec::new();

        for (ci, conference) in structure.conferences.iter().enumerate() {
            let other = &structure.conferences[1 - ci];

            for (di, division) in conference.divisions.iter().enumerate() {
                divisional.extend(
                    division
                        .clubs
                        .iter()
                        .permutations(2)
                        .map(|pair| ScheduledPairing::new(*pair[0], *pair[1], MatchType::Divisional)),
                );

                let intra_division = &conference.divisions[intra[di]];
                let inter_division = &other.divisions[inter[di]];

                for (seed, &club) in division.clubs.iter().enumerate() {
                    for &opponent in &intra_division.clubs {
                        candidates.push(ScheduledPairing::new(club, opponent, MatchType::IntraRotation));
                    }

                    for &opponent in &inter_division.clubs {
                        candidates.push(ScheduledPairing::new(club, opponent, MatchType::InterRotation));
                    }

                    for (oi, other_division) in conference.divisions.iter().enumerate() {
                        if oi != di && oi != intra[di] {
                            candidates.push(ScheduledPairing::new(
                                club,
                                other_division.clubs[seed],
                                MatchType::IntraPosition,
                            ));
                        }
                    }

                    for (oi, other_division) in other.divisions.iter().enumerate() {
                        if oi != inter[di] {
                            candidates.push(ScheduledPairing::new(
                                club,
                                other_division.clubs[seed],
                                MatchType::InterPosition,
                            ));
                        }
                    }
                }
            }
        }

        let mut seen = HashSet::with_capacity(candidates.len() / 2);
        let mut single_leg = Vec::with_capacity(candidates.len() / 2);

        for pairing in candidates {
            if !seen.insert(pairing.key()) {
                continue;
            }

            let (a, b) = pairing.key();
            let (home, away) = if RandomUtils::coin_flip(rng) { (a, b) } else { (b, a) };

            single_leg.push(ScheduledPairing::new(home, away, pairing.match_type));
        }

        debug!(
            "schedule {}: {} divisional, {} single-leg fixtures",
            year,
            divisional.len(),
            single_leg.len()
        );

        divisional.extend(single_leg);
        divisional
    }

    /// Checks fixture counts and pair uniqueness against the structure.
    pub fn verify(structure: &LeagueStructure, pairings: &[ScheduledPairing]) -> Result<(), String> {
        let mut per_club: HashMap<ClubId, usize> = HashMap::new();
        let mut single_leg: HashMap<(ClubId, ClubId), usize> = HashMap::new();
        let mut divisional: HashMap<(ClubId, ClubId), usize> = HashMap::new();

        for pairing in pairings {
            if pairing.home == pairing.away {
                return Err(format!("{} is scheduled against itself", pairing.home));
            }

            *per_club.entry(pairing.home).or_default() += 1;
            *per_club.entry(pairing.away).or_default() += 1;

            if pairing.match_type.is_single_leg() {
                *single_leg.entry(pairing.key()).or_default() += 1;
            } else {
                *divisional.entry((pairing.home, pairing.away)).or_default() += 1;
            }
        }

        for club in structure.all_clubs() {
            let count = per_club.get(&club).copied().unwrap_or(0);
            if count != FIXTURES_PER_CLUB {
                return Err(format!("{} has {} fixtures, expected {}", club, count, FIXTURES_PER_CLUB));
            }
        }

        if let Some((pair, count)) = single_leg.iter().find(|(_, count)| **count > 1) {
            return Err(format!("{} vs {} scheduled {} times", pair.0, pair.1, count));
        }

        if let Some(pair) = single_leg.keys().find(|pair| {
            divisional.contains_key(&(pair.0, pair.1)) || divisional.contains_key(&(pair.1, pair.0))
        }) {
            return Err(format!("{} vs {} is both divisional and single-leg", pair.0, pair.1));
        }

        for division in structure.conferences.iter().flat_map(|c| &c.divisions) {
            for pair in division.clubs.iter().permutations(2) {
                let legs = divisional.get(&(*pair[0], *pair[1])).copied().unwrap_or(0);
                if legs != 1 {
                    return Err(format!("{} hosts {} {} times in division {}", pair[0], pair[1], legs, division.name));
                }
            }
        }

        let expected_divisional = structure.conferences.len()
            * DIVISIONS_PER_CONFERENCE
            * CLUBS_PER_DIVISION
            * (CLUBS_PER_DIVISION - 1);
        let divisional_total: usize = divisional.values().sum();
        if divisional_total != expected_divisional {
            return Err(format!("{} divisional fixtures, expected {}", divisional_total, expected_divisional));
        }

        Ok(())
    }
}

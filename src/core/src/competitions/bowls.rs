use crate::club::{Club, ClubCollection, ClubId, Tier};
use crate::competitions::{HomeRule, KnockoutBracket, TournamentKind, TournamentResult};
use crate::error::LeagueError;
use crate::league::Competition;
use crate::r#match::MatchEngine;
use log::info;
use rand::Rng;
use std::collections::BTreeMap;

/// Bowls: each region sends its best College 1 club, regions meet in a
/// yearly rotating pairing, every bowl stands alone.
pub struct RegionalFinals;

impl RegionalFinals {
    /// Best College 1 club per region, regions ordered by name.
    pub fn representatives(clubs: &ClubCollection) -> Vec<ClubId> {
        let mut best: BTreeMap<&str, &Club> = BTreeMap::new();

        for club in clubs.by_tier(Tier::College1) {
            best.entry(club.conference.as_str())
                .and_modify(|current| {
                    if (club.rating, std::cmp::Reverse(&club.name)) > (current.rating, std::cmp::Reverse(&current.name)) {
                        *current = club;
                    }
                })
                .or_insert(club);
        }

        best.values().map(|c| c.id).collect()
    }

    /// Circle-method round `year mod (slots - 1)`. An odd region count adds an empty slot.
    pub fn pairings(regions: &[ClubId], year: i32) -> Vec<(ClubId, ClubId)> {
        let mut slots: Vec<Option<ClubId>> = regions.iter().copied().map(Some).collect();
        if slots.len() % 2 == 1 {
            slots.push(None);
        }

        let n = slots.len();
        if n < 2 {
            return Vec::new();
        }

        let round = year.rem_euclid((n - 1) as i32) as usize;

        let mut rotating: Vec<Option<ClubId>> = slots[1..].to_vec();
        rotating.rotate_right(round);

        let mut order = Vec::with_capacity(n);
        order.push(slots[0]);
        order.extend(rotating);

        (0..n / 2)
            .filter_map(|i| match (order[i], order[n - 1 - i]) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect()
    }

    pub fn play<R: Rng + ?Sized>(
        engine: &MatchEngine,
        clubs: &ClubCollection,
        year: i32,
        rng: &mut R,
    ) -> Result<TournamentResult, LeagueError> {
        let regions = Self::representatives(clubs);

        if regions.len() < 2 {
            return Err(LeagueError::InsufficientEntrants {
                tournament: TournamentKind::RegionalFinals.name().to_string(),
                needed: 2,
                found: regions.len(),
            });
        }

        let pairs = Self::pairings(&regions, year);
        let bracket = KnockoutBracket::new(engine, clubs, HomeRule::Drawn);

        let mut result = TournamentResult::new(TournamentKind::RegionalFinals);
        result.push_round(Competition::Bowl, bracket.play_pairs(&pairs, rng));

        info!("{} bowls played between {} regions", result.ties.len(), regions.len());

        Ok(result)
    }
}

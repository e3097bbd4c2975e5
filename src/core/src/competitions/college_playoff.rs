use crate::club::{ClubCollection, ClubId, Tier};
use crate::competitions::{HomeRule, KnockoutBracket, TournamentKind, TournamentResult};
use crate::error::LeagueError;
use crate::league::Competition;
use crate::r#match::MatchEngine;
use log::info;
use rand::Rng;
use std::cmp::Reverse;

pub const COLLEGE_PLAYOFF_CLUBS: usize = 12;
const BYES: usize = 4;

/// Twelve-club College 1 playoff seeded by rating. Seeds 1-4 wait for the
/// first-round winners, the bracket is fixed from there on.
pub struct SeededPlayoff;

impl SeededPlayoff {
    /// College 1 clubs by rating, ties by name. Index 0 is seed 1.
    pub fn seeds(clubs: &ClubCollection) -> Vec<ClubId> {
        let mut ids = clubs.ids_by_tier(Tier::College1);
        ids.sort_by_cached_key(|id| clubs.get(*id).map(|c| (Reverse(c.rating), c.name.clone())));
        ids.truncate(COLLEGE_PLAYOFF_CLUBS);
        ids
    }

    pub fn play<R: Rng + ?Sized>(
        engine: &MatchEngine,
        clubs: &ClubCollection,
        rng: &mut R,
    ) -> Result<TournamentResult, LeagueError> {
        let seeds = Self::seeds(clubs);

        if seeds.len() < COLLEGE_PLAYOFF_CLUBS {
            return Err(LeagueError::InsufficientEntrants {
                tournament: TournamentKind::CollegePlayoff.name().to_string(),
                needed: COLLEGE_PLAYOFF_CLUBS,
                found: seeds.len(),
            });
        }

        let seed = |n: usize| seeds[n - 1];
        let bracket = KnockoutBracket::new(engine, clubs, HomeRule::Favourite);
        let mut result = TournamentResult::new(TournamentKind::CollegePlayoff);

        // 5v12, 6v11, 7v10, 8v9
        let first: Vec<(ClubId, ClubId)> = (BYES + 1..=BYES + 4)
            .map(|n| (seed(n), seed(COLLEGE_PLAYOFF_CLUBS + BYES + 1 - n)))
            .collect();
        let round1 = bracket.play_pairs(&first, rng);
        let w = round1.winners.clone();
        result.push_round(Competition::CollegePlayoff { round: 1 }, round1);

        let [w5, w6, w7, w8] = w[..] else {
            return Ok(result);
        };

        let second = [(seed(1), w8), (seed(2), w7), (seed(3), w6), (seed(4), w5)];
        let round2 = bracket.play_pairs(&second, rng);
        let q = round2.winners.clone();
        result.push_round(Competition::CollegePlayoff { round: 2 }, round2);

        let [q1, q2, q3, q4] = q[..] else {
            return Ok(result);
        };

        let semis = bracket.play_pairs(&[(q1, q4), (q2, q3)], rng);
        let f = semis.winners.clone();
        result.push_round(Competition::CollegePlayoff { round: 3 }, semis);

        let [f1, f2] = f[..] else {
            return Ok(result);
        };

        let final_round = bracket.play_pairs(&[(f1, f2)], rng);
        result.champion = final_round.winners.first().copied();
        result.push_round(Competition::CollegePlayoff { round: 4 }, final_round);

        if let Some(champion) = result.champion {
            info!("{} champion: {}", TournamentKind::CollegePlayoff.name(), clubs.name(champion));
        }

        Ok(result)
    }
}

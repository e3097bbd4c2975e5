use crate::club::{ClubCollection, ClubId, Tier};
use crate::competitions::{HomeRule, KnockoutBracket, PoolPolicy, TournamentKind, TournamentResult};
use crate::error::LeagueError;
use crate::league::Competition;
use crate::r#match::MatchEngine;
use log::info;
use rand::Rng;

/// Copa da Liga: every college club in one draw, underdogs at home.
pub struct CollegeLeagueCup {
    policy: PoolPolicy,
}

impl CollegeLeagueCup {
    pub fn new(policy: PoolPolicy) -> Self {
        CollegeLeagueCup { policy }
    }

    pub fn play<R: Rng + ?Sized>(
        &self,
        engine: &MatchEngine,
        clubs: &ClubCollection,
        rng: &mut R,
    ) -> Result<TournamentResult, LeagueError> {
        let entrants: Vec<ClubId> = clubs
            .ids_by_tier(Tier::College1)
            .into_iter()
            .chain(clubs.ids_by_tier(Tier::College2))
            .collect();

        if entrants.len() < 2 {
            return Err(LeagueError::InsufficientEntrants {
                tournament: TournamentKind::CollegeLeagueCup.name().to_string(),
                needed: 2,
                found: entrants.len(),
            });
        }

        let bracket = KnockoutBracket::new(engine, clubs, HomeRule::Underdog);
        let mut result = TournamentResult::new(TournamentKind::CollegeLeagueCup);
        let mut round = 1u8;

        let normalized = self.policy.normalize(&bracket, entrants, rng);
        result.dropped = normalized.dropped;

        if let Some(play_in) = normalized.play_in {
            result.push_round(Competition::LeagueCup { round }, play_in);
            round += 1;
        }

        let (champion, rounds) = bracket.play_to_champion(&normalized.entrants, rng);
        for outcome in rounds {
            result.push_round(Competition::LeagueCup { round }, outcome);
            round += 1;
        }

        result.champion = champion;

        if let Some(champion) = champion {
            info!("{} champion: {}", TournamentKind::CollegeLeagueCup.name(), clubs.name(champion));
        }

        Ok(result)
    }
}

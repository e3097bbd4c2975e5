use crate::club::{ClubCollection, ClubId};
use crate::r#match::{MatchEngine, MatchOptions, MatchResult};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Who hosts a single-leg tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeRule {
    /// First club of the drawn pair.
    Drawn,
    /// The lower-rated club.
    Underdog,
    /// The higher-rated club.
    Favourite,
}

#[derive(Debug, Clone, Default)]
pub struct RoundOutcome {
    /// Winners in pairing order, the bye (if any) last.
    pub winners: Vec<ClubId>,
    pub bye: Option<ClubId>,
    pub results: Vec<MatchResult>,
}

impl RoundOutcome {
    pub fn losers(&self) -> impl Iterator<Item = ClubId> + '_ {
        self.results.iter().filter_map(|r| r.loser())
    }
}

/// Single-elimination rounds over any list of clubs. Reads clubs, never writes them:
/// results come back to the caller to apply.
pub struct KnockoutBracket<'a> {
    engine: &'a MatchEngine,
    clubs: &'a ClubCollection,
    home_rule: HomeRule,
}

impl<'a> KnockoutBracket<'a> {
    pub fn new(engine: &'a MatchEngine, clubs: &'a ClubCollection, home_rule: HomeRule) -> Self {
        KnockoutBracket {
            engine,
            clubs,
            home_rule,
        }
    }

    pub fn clubs(&self) -> &ClubCollection {
        self.clubs
    }

    pub fn rating(&self, club_id: ClubId) -> u8 {
        self.clubs.get(club_id).map(|c| c.rating).unwrap_or(0)
    }

    /// Random draw. An odd club out advances untouched.
    pub fn play_round<R: Rng + ?Sized>(&self, entrants: &[ClubId], rng: &mut R) -> RoundOutcome {
        let mut drawn = entrants.to_vec();
        drawn.shuffle(rng);

        let bye = if drawn.len() % 2 == 1 { drawn.pop() } else { None };

        let pairs: Vec<(ClubId, ClubId)> = drawn.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();

        let mut outcome = self.play_pairs(&pairs, rng);

        if let Some(bye) = bye {
            debug!("{} advances on a bye", self.clubs.name(bye));
            outcome.winners.push(bye);
            outcome.bye = Some(bye);
        }

        outcome
    }

    /// Fixed pairings; winners come back in pair order.
    pub fn play_pairs<R: Rng + ?Sized>(&self, pairs: &[(ClubId, ClubId)], rng: &mut R) -> RoundOutcome {
        let mut outcome = RoundOutcome {
            winners: Vec::with_capacity(pairs.len() + 1),
            bye: None,
            results: Vec::with_capacity(pairs.len()),
        };

        for &(a, b) in pairs {
            let (home_id, away_id) = self.orient(a, b);

            let (Some(home), Some(away)) = (self.clubs.get(home_id), self.clubs.get(away_id)) else {
                debug!("skipping tie with unknown club {} vs {}", home_id, away_id);
                continue;
            };

            let result = self.engine.play(home, away, MatchOptions::knockout(), rng);

            if let Some(winner) = result.winner() {
                outcome.winners.push(winner);
            }

            outcome.results.push(result);
        }

        outcome
    }

    /// Rounds until one club is left. Returns the champion and every round played.
    pub fn play_to_champion<R: Rng + ?Sized>(
        &self,
        entrants: &[ClubId],
        rng: &mut R,
    ) -> (Option<ClubId>, Vec<RoundOutcome>) {
        let mut alive = entrants.to_vec();
        let mut rounds = Vec::new();

        while alive.len() > 1 {
            let outcome = self.play_round(&alive, rng);
            alive = outcome.winners.clone();
            rounds.push(outcome);
        }

        (alive.first().copied(), rounds)
    }

    fn orient(&self, a: ClubId, b: ClubId) -> (ClubId, ClubId) {
        let (ra, rb) = (self.rating(a), self.rating(b));

        match self.home_rule {
            HomeRule::Drawn => (a, b),
            HomeRule::Underdog if rb < ra => (b, a),
            HomeRule::Favourite if rb > ra => (b, a),
            _ => (a, b),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances, Tier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    pub(crate) fn clubs(count: u32, tier: Tier) -> ClubCollection {
        ClubCollection::new(
            (1..=count)
                .map(|id| {
                    Club::new(
                        ClubId(id),
                        format!("Club {}", id),
                        tier,
                        format!("Region {}", id % 8),
                        String::new(),
                        (50 + id % 40) as u8,
                        ClubFinances::new(0, 0),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn winners_are_half_rounded_up() {
        let engine = MatchEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(31);

        for n in 1..=17u32 {
            let clubs = clubs(n, Tier::College2);
            let bracket = KnockoutBracket::new(&engine, &clubs, HomeRule::Drawn);

            let outcome = bracket.play_round(&clubs.ids(), &mut rng);

            assert_eq!(outcome.winners.len(), (n as usize).div_ceil(2), "n = {}", n);
            assert_eq!(outcome.results.len(), n as usize / 2);
            assert_eq!(outcome.bye.is_some(), n % 2 == 1);
        }
    }

    #[test]
    fn bye_club_does_not_play_and_nobody_plays_twice() {
        let engine = MatchEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let clubs = clubs(15, Tier::College1);
        let bracket = KnockoutBracket::new(&engine, &clubs, HomeRule::Drawn);

        for _ in 0..50 {
            let outcome = bracket.play_round(&clubs.ids(), &mut rng);
            let bye = outcome.bye.unwrap();

            let mut seen = HashSet::new();
            for result in &outcome.results {
                assert!(seen.insert(result.home_club_id));
                assert!(seen.insert(result.away_club_id));
            }

            assert!(!seen.contains(&bye));
            assert!(outcome.winners.contains(&bye));
        }
    }

    #[test]
    fn eliminated_clubs_never_return() {
        let engine = MatchEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let clubs = clubs(23, Tier::College2);
        let bracket = KnockoutBracket::new(&engine, &clubs, HomeRule::Drawn);

        let (champion, rounds) = bracket.play_to_champion(&clubs.ids(), &mut rng);

        let mut eliminated = HashSet::new();
        for round in &rounds {
            for result in &round.results {
                assert!(!eliminated.contains(&result.home_club_id));
                assert!(!eliminated.contains(&result.away_club_id));
            }
            eliminated.extend(round.losers());
        }

        assert_eq!(eliminated.len(), 22);
        assert!(!eliminated.contains(&champion.unwrap()));
    }

    #[test]
    fn underdog_hosts() {
        let engine = MatchEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(34);
        let clubs = clubs(16, Tier::College1);
        let bracket = KnockoutBracket::new(&engine, &clubs, HomeRule::Underdog);

        let outcome = bracket.play_round(&clubs.ids(), &mut rng);

        for result in &outcome.results {
            assert!(bracket.rating(result.home_club_id) <= bracket.rating(result.away_club_id));
        }
    }

    #[test]
    fn fixed_pairs_keep_order() {
        let engine = MatchEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(35);
        let clubs = clubs(4, Tier::College1);
        let bracket = KnockoutBracket::new(&engine, &clubs, HomeRule::Favourite);

        let outcome = bracket.play_pairs(&[(ClubId(1), ClubId(2)), (ClubId(3), ClubId(4))], &mut rng);

        assert_eq!(outcome.winners.len(), 2);
        assert!([ClubId(1), ClubId(2)].contains(&outcome.winners[0]));
        assert!([ClubId(3), ClubId(4)].contains(&outcome.winners[1]));
        // higher rating hosts
        assert_eq!(outcome.results[0].home_club_id, ClubId(2));
    }

    #[test]
    fn single_entrant_is_champion_without_playing() {
        let engine = MatchEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(36);
        let clubs = clubs(1, Tier::College1);
        let bracket = KnockoutBracket::new(&engine, &clubs, HomeRule::Drawn);

        let (champion, rounds) = bracket.play_to_champion(&clubs.ids(), &mut rng);

        assert_eq!(champion, Some(ClubId(1)));
        assert!(rounds.is_empty());
    }
}

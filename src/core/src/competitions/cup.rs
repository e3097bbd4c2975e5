use crate::club::{ClubCollection, ClubId, Tier};
use crate::competitions::{HomeRule, KnockoutBracket, TournamentKind, TournamentResult};
use crate::error::LeagueError;
use crate::league::Competition;
use crate::r#match::MatchEngine;
use crate::settings::CupSettings;
use log::{debug, info};
use rand::Rng;
use std::cmp::Reverse;

/// Copa do Brasil: lower tiers whittle down first, then merge upwards with
/// the seeded top-tier clubs entering at the round of sixteen.
pub struct NationalCup<'a> {
    settings: &'a CupSettings,
}

impl<'a> NationalCup<'a> {
    pub fn new(settings: &'a CupSettings) -> Self {
        NationalCup { settings }
    }

    pub fn play<R: Rng + ?Sized>(
        &self,
        engine: &MatchEngine,
        clubs: &ClubCollection,
        rng: &mut R,
    ) -> Result<TournamentResult, LeagueError> {
        let mut top_tier: Vec<ClubId> = clubs.ids_by_tier(Tier::Top);

        if top_tier.len() < self.settings.seeded_clubs {
            return Err(LeagueError::InsufficientEntrants {
                tournament: TournamentKind::NationalCup.name().to_string(),
                needed: self.settings.seeded_clubs,
                found: top_tier.len(),
            });
        }

        top_tier.sort_by_cached_key(|id| clubs.get(*id).map(|c| (Reverse(c.rating), c.name.clone())));

        let seeded: Vec<ClubId> = top_tier.drain(..self.settings.seeded_clubs).collect();

        let bracket = KnockoutBracket::new(engine, clubs, HomeRule::Drawn);
        let mut result = TournamentResult::new(TournamentKind::NationalCup);

        let phase1 = self.whittle(&bracket, 1, clubs.ids_by_tier(Tier::College2), self.settings.lower_tier_survivors, &mut result, rng);

        let mut pool = phase1;
        pool.extend(clubs.ids_by_tier(Tier::College1));
        let phase2 = self.whittle(&bracket, 2, pool, self.settings.mid_tier_survivors, &mut result, rng);

        let mut pool = phase2;
        pool.extend(top_tier);
        let phase3 = self.whittle(&bracket, 3, pool, self.settings.seeded_clubs, &mut result, rng);

        let mut finals = phase3;
        finals.extend(seeded);

        info!("Copa do Brasil: {} clubs enter the final phase", finals.len());

        let (champion, rounds) = bracket.play_to_champion(&finals, rng);
        for round in rounds {
            result.push_round(Competition::Cup { phase: 4 }, round);
        }

        result.champion = champion;

        Ok(result)
    }

    /// Runs bracket rounds over `pool` until at most `survivors` remain.
    fn whittle<R: Rng + ?Sized>(
        &self,
        bracket: &KnockoutBracket<'_>,
        phase: u8,
        pool: Vec<ClubId>,
        survivors: usize,
        result: &mut TournamentResult,
        rng: &mut R,
    ) -> Vec<ClubId> {
        if pool.len() <= survivors {
            debug!("cup phase {}: {} clubs advance without playing", phase, pool.len());
            return pool;
        }

        let normalized = self.settings.pool_policy.normalize(bracket, pool, rng);
        result.dropped.extend(normalized.dropped);

        if let Some(play_in) = normalized.play_in {
            result.push_round(Competition::Cup { phase }, play_in);
        }

        let mut alive = normalized.entrants;
        while alive.len() > survivors.max(1) {
            let round = bracket.play_round(&alive, rng);
            alive = round.winners.clone();
            result.push_round(Competition::Cup { phase }, round);
        }

        debug!("cup phase {}: {} survivors", phase, alive.len());

        alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn league(top: u32, college1: u32, college2: u32) -> ClubCollection {
        let mut clubs = Vec::new();
        let mut id = 0;
        for (tier, count, base) in [(Tier::Top, top, 76u32), (Tier::College1, college1, 66), (Tier::College2, college2, 55)] {
            for n in 0..count {
                id += 1;
                clubs.push(Club::new(
                    ClubId(id),
                    format!("{} {}", tier, n),
                    tier,
                    format!("Region {}", n % 8),
                    String::new(),
                    (base + n % 15) as u8,
                    ClubFinances::new(0, 0),
                ));
            }
        }
        ClubCollection::new(clubs)
    }

    #[test]
    fn full_league_produces_a_champion() {
        let clubs = league(32, 96, 96);
        let engine = MatchEngine::default();
        let settings = CupSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(51);

        let result = NationalCup::new(&settings).play(&engine, &clubs, &mut rng).unwrap();

        assert!(result.champion.is_some());
        assert!(result.dropped.is_empty());

        let final_phase: Vec<_> = result
            .ties
            .iter()
            .filter(|t| t.competition == Competition::Cup { phase: 4 })
            .collect();
        // round of 16 through the final
        assert_eq!(final_phase.len(), 15);
    }

    #[test]
    fn seeded_clubs_only_play_in_the_final_phase() {
        let clubs = league(32, 96, 96);
        let engine = MatchEngine::default();
        let settings = CupSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(52);

        let result = NationalCup::new(&settings).play(&engine, &clubs, &mut rng).unwrap();

        let mut top: Vec<&Club> = clubs.by_tier(Tier::Top).collect();
        top.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));
        let seeded: HashSet<ClubId> = top.iter().take(8).map(|c| c.id).collect();

        for tie in &result.ties {
            if tie.competition != (Competition::Cup { phase: 4 }) {
                assert!(!seeded.contains(&tie.result.home_club_id));
                assert!(!seeded.contains(&tie.result.away_club_id));
            }
        }
    }

    #[test]
    fn eliminated_clubs_never_reappear() {
        let clubs = league(32, 40, 30);
        let engine = MatchEngine::default();
        let settings = CupSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(53);

        let result = NationalCup::new(&settings).play(&engine, &clubs, &mut rng).unwrap();

        let mut eliminated = HashSet::new();
        for tie in &result.ties {
            assert!(!eliminated.contains(&tie.result.home_club_id));
            assert!(!eliminated.contains(&tie.result.away_club_id));
            eliminated.insert(tie.result.loser().unwrap());
        }

        assert!(!eliminated.contains(&result.champion.unwrap()));
    }

    #[test]
    fn top_tier_only_still_runs() {
        let clubs = league(32, 0, 0);
        let engine = MatchEngine::default();
        let settings = CupSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(54);

        let result = NationalCup::new(&settings).play(&engine, &clubs, &mut rng).unwrap();

        assert!(result.champion.is_some());
    }

    #[test]
    fn too_few_top_clubs_is_an_error() {
        let clubs = league(4, 10, 10);
        let settings = CupSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(55);

        let err = NationalCup::new(&settings)
            .play(&MatchEngine::default(), &clubs, &mut rng)
            .unwrap_err();

        assert!(matches!(err, LeagueError::InsufficientEntrants { needed: 8, found: 4, .. }));
    }
}

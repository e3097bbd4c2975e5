use crate::club::{ClubCollection, ClubId};
use crate::error::LeagueError;
use crate::league::schedule::ScheduledPairing;
use crate::league::{Calendar, Competition};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub struct WeekLayout;

impl WeekLayout {
    /// Greedy placement: fixtures in random order, each in the earliest week
    /// where neither club already plays.
    pub fn place<R: Rng + ?Sized>(
        pairings: &[ScheduledPairing],
        first_week: u8,
        last_week: u8,
        clubs: &ClubCollection,
        rng: &mut R,
    ) -> Result<Vec<(u8, ScheduledPairing)>, LeagueError> {
        let mut order: Vec<ScheduledPairing> = pairings.to_vec();
        order.shuffle(rng);

        let span = if last_week >= first_week {
            (last_week - first_week) as usize + 1
        } else {
            0
        };
        let mut busy: Vec<HashSet<ClubId>> = vec![HashSet::new(); span];
        let mut placed = Vec::with_capacity(order.len());

        for pairing in order {
            let slot = busy
                .iter()
                .position(|week| !week.contains(&pairing.home) && !week.contains(&pairing.away));

            let Some(slot) = slot else {
                return Err(LeagueError::CalendarOverflow {
                    home: clubs.name(pairing.home).to_string(),
                    away: clubs.name(pairing.away).to_string(),
                    first_week,
                    last_week,
                });
            };

            busy[slot].insert(pairing.home);
            busy[slot].insert(pairing.away);

            placed.push((first_week + slot as u8, pairing));
        }

        let used = busy.iter().rposition(|week| !week.is_empty()).map(|idx| idx + 1).unwrap_or(0);
        debug!("regular season laid out over {} weeks starting at week {}", used, first_week);

        placed.sort_by_key(|(week, _)| *week);

        Ok(placed)
    }

    pub fn fill_calendar(calendar: &mut Calendar, placed: &[(u8, ScheduledPairing)]) {
        for (week, pairing) in placed {
            calendar.schedule(*week, pairing.home, pairing.away, Competition::League(pairing.match_type));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::schedule::structure::tests::top_tier;
    use crate::league::schedule::{LeagueStructure, ScheduleGenerator};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn no_club_plays_twice_in_a_week() {
        let clubs = ClubCollection::new(top_tier());
        let structure = LeagueStructure::from_clubs(clubs.iter()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        for year in 2026..2029 {
            let pairings = ScheduleGenerator::generate(&structure, year, &mut rng);
            let placed = WeekLayout::place(&pairings, 1, 37, &clubs, &mut rng).unwrap();

            assert_eq!(placed.len(), pairings.len());

            for week in 1..=37u8 {
                let mut seen = HashSet::new();
                for (_, pairing) in placed.iter().filter(|(w, _)| *w == week) {
                    assert!(seen.insert(pairing.home));
                    assert!(seen.insert(pairing.away));
                }
            }

            assert!(placed.iter().all(|(week, _)| (1..=37).contains(week)));
        }
    }

    #[test]
    fn too_few_weeks_overflow() {
        let clubs = ClubCollection::new(top_tier());
        let structure = LeagueStructure::from_clubs(clubs.iter()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let pairings = ScheduleGenerator::generate(&structure, 2026, &mut rng);

        let err = WeekLayout::place(&pairings, 1, 10, &clubs, &mut rng).unwrap_err();

        assert!(matches!(err, LeagueError::CalendarOverflow { last_week: 10, .. }));
    }

    #[test]
    fn calendar_receives_league_fixtures() {
        let clubs = ClubCollection::new(top_tier());
        let structure = LeagueStructure::from_clubs(clubs.iter()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let pairings = ScheduleGenerator::generate(&structure, 2026, &mut rng);
        let placed = WeekLayout::place(&pairings, 1, 37, &clubs, &mut rng).unwrap();

        let mut calendar = Calendar::new();
        WeekLayout::fill_calendar(&mut calendar, &placed);

        assert_eq!(calendar.len(), pairings.len());
        assert!(calendar.fixtures().iter().all(|f| f.competition.is_league()));
    }
}

use crate::loaders::{CollegeClubEntity, CollegeDatabaseEntity, LnfClubEntity};
use log::info;
use rand::Rng;
use unifut_core::{Club, ClubFinances, ClubId, PlayerGenerator, PlayerIdSequence, SimulationSettings, SimulatorData, Tier};

/// Opening cash per rating point.
const CASH_PER_RATING_POINT: i64 = 500_000;

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    /// Builds a fresh league: the top tier first, then both college tiers,
    /// every club with a full squad and a head coach.
    pub fn generate<R: Rng + ?Sized>(
        lnf: &[LnfClubEntity],
        college: &CollegeDatabaseEntity,
        settings: SimulationSettings,
        generator: &PlayerGenerator,
        rng: &mut R,
    ) -> SimulatorData {
        let mut ids = PlayerIdSequence::default();
        let mut next_club_id = 1u32;

        let mut clubs = Vec::with_capacity(lnf.len() + college.len());

        for entity in lnf {
            let club = Self::generate_club(
                ClubId(next_club_id),
                &entity.name,
                Tier::Top,
                &entity.conference,
                &entity.division,
                entity.rating,
                &settings,
                generator,
                &mut ids,
                rng,
            );
            clubs.push(club);
            next_club_id += 1;
        }

        for (tier, entities) in [(Tier::College1, &college.college1), (Tier::College2, &college.college2)] {
            for entity in entities {
                clubs.push(Self::generate_college_club(
                    ClubId(next_club_id),
                    entity,
                    tier,
                    &settings,
                    generator,
                    &mut ids,
                    rng,
                ));
                next_club_id += 1;
            }
        }

        info!(
            "league generated: {} clubs, {} players",
            clubs.len(),
            clubs.iter().map(|c| c.players.len()).sum::<usize>()
        );

        SimulatorData::new(clubs, settings)
    }

    fn generate_college_club<R: Rng + ?Sized>(
        id: ClubId,
        entity: &CollegeClubEntity,
        tier: Tier,
        settings: &SimulationSettings,
        generator: &PlayerGenerator,
        ids: &mut PlayerIdSequence,
        rng: &mut R,
    ) -> Club {
        Self::generate_club(
            id,
            &entity.name,
            tier,
            &entity.conference,
            "",
            entity.rating,
            settings,
            generator,
            ids,
            rng,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn generate_club<R: Rng + ?Sized>(
        id: ClubId,
        name: &str,
        tier: Tier,
        conference: &str,
        division: &str,
        rating: u8,
        settings: &SimulationSettings,
        generator: &PlayerGenerator,
        ids: &mut PlayerIdSequence,
        rng: &mut R,
    ) -> Club {
        let finance = ClubFinances::new(
            rating as i64 * CASH_PER_RATING_POINT,
            settings.economy.salary_cap(tier),
        );

        let mut club = Club::new(
            id,
            name.to_string(),
            tier,
            conference.to_string(),
            division.to_string(),
            rating,
            finance,
        );

        club.players = generator.generate_squad(id, rating, ids, rng);
        club.coach = Some(generator.generate_coach(rng));
        club.refresh_wage_bill();

        club
    }
}

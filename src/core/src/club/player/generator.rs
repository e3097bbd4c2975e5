use crate::club::{
    ClubId, Coach, CoachingStyle, Player, PlayerClubContract, PlayerIdSequence, PlayerPositionType,
    PlayerValueCalculator, MAX_ABILITY, MIN_ABILITY,
};
use crate::shared::FullName;
use crate::utils::IntegerUtils;
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Joao", "Pedro", "Lucas", "Gabriel", "Rafael", "Matheus", "Gustavo", "Felipe", "Bruno",
    "Thiago", "Diego", "Rodrigo", "Vinicius", "Caio", "Leonardo", "Eduardo", "Andre", "Marcelo",
    "Fernando", "Ricardo", "Henrique", "Igor", "Renan", "Danilo", "Murilo", "Arthur", "Enzo",
    "Davi", "Samuel", "Otavio", "Wesley", "Everton", "Luan", "Alisson", "Fabricio", "Hugo",
];

const LAST_NAMES: &[&str] = &[
    "Silva", "Santos", "Oliveira", "Souza", "Rodrigues", "Ferreira", "Alves", "Pereira", "Lima",
    "Gomes", "Costa", "Ribeiro", "Martins", "Carvalho", "Almeida", "Lopes", "Soares", "Fernandes",
    "Vieira", "Barbosa", "Rocha", "Dias", "Nascimento", "Andrade", "Moreira", "Nunes", "Marques",
    "Machado", "Mendes", "Freitas", "Cardoso", "Ramos", "Teixeira", "Moura", "Cavalcanti", "Pinto",
];

/// Squad shape for a freshly generated club: 24 players.
pub const SQUAD_TEMPLATE: [(PlayerPositionType, usize); 4] = [
    (PlayerPositionType::Goalkeeper, 3),
    (PlayerPositionType::Defender, 8),
    (PlayerPositionType::Midfielder, 8),
    (PlayerPositionType::Attacker, 5),
];

/// Longest spell at the club a generated player starts with.
const MAX_INITIAL_TENURE: i32 = 6;

#[derive(Debug, Clone)]
pub struct PeopleNameGeneratorData {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

impl Default for PeopleNameGeneratorData {
    fn default() -> Self {
        PeopleNameGeneratorData {
            first_names: FIRST_NAMES.iter().map(|s| s.to_string()).collect(),
            last_names: LAST_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerGenerator {
    people_names_data: PeopleNameGeneratorData,
}

impl PlayerGenerator {
    /// Full squad following `SQUAD_TEMPLATE`, abilities spread around the club rating.
    pub fn generate_squad<R: Rng + ?Sized>(
        &self,
        club_id: ClubId,
        rating: u8,
        ids: &mut PlayerIdSequence,
        rng: &mut R,
    ) -> Vec<Player> {
        SQUAD_TEMPLATE
            .iter()
            .flat_map(|&(position, count)| std::iter::repeat_n(position, count))
            .map(|position| self.generate(ids, club_id, position, rating, 18, 34, rng))
            .collect()
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        ids: &mut PlayerIdSequence,
        club_id: ClubId,
        position: PlayerPositionType,
        rating: u8,
        min_age: u8,
        max_age: u8,
        rng: &mut R,
    ) -> Player {
        let age = IntegerUtils::random(rng, min_age as i32, max_age as i32) as u8;

        // triangular spread around the rating
        let spread = IntegerUtils::random(rng, -6, 6) + IntegerUtils::random(rng, -6, 6);
        let ability = clamp_ability(rating as i32 + spread);
        let potential = generate_potential(ability, age, rng);

        let contract = PlayerClubContract::new(
            IntegerUtils::random(rng, 1, 5) as u8,
            PlayerValueCalculator::wage_for(ability, age),
        );

        // senior players joined at 17 at the earliest
        let tenure = IntegerUtils::random(rng, 0, (age as i32 - 17).min(MAX_INITIAL_TENURE)) as u8;

        self.build_player(ids, club_id, position, age, ability, potential, contract, tenure, rng)
    }

    /// Academy graduate replacing a retiree: young, below the club level, high ceiling.
    pub fn generate_rookie<R: Rng + ?Sized>(
        &self,
        ids: &mut PlayerIdSequence,
        club_id: ClubId,
        position: PlayerPositionType,
        rating: u8,
        rng: &mut R,
    ) -> Player {
        let age = IntegerUtils::random(rng, 18, 20) as u8;
        let ability = clamp_ability(rating as i32 - IntegerUtils::random(rng, 8, 18));
        let potential = clamp_ability(ability as i32 + IntegerUtils::random(rng, 8, 22)).max(ability);

        let contract = PlayerClubContract::new(
            IntegerUtils::random(rng, 2, 4) as u8,
            PlayerValueCalculator::wage_for(ability, age),
        );

        self.build_player(ids, club_id, position, age, ability, potential, contract, 0, rng)
    }

    pub fn generate_coach<R: Rng + ?Sized>(&self, rng: &mut R) -> Coach {
        let style = *CoachingStyle::ALL
            .choose(rng)
            .unwrap_or(&CoachingStyle::Possession);

        Coach::new(
            self.generate_full_name(rng),
            style,
            IntegerUtils::random(rng, 38, 67) as u8,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build_player<R: Rng + ?Sized>(
        &self,
        ids: &mut PlayerIdSequence,
        club_id: ClubId,
        position: PlayerPositionType,
        age: u8,
        ability: u8,
        potential: u8,
        contract: PlayerClubContract,
        years_at_club: u8,
        rng: &mut R,
    ) -> Player {
        Player {
            id: ids.next_id(),
            full_name: self.generate_full_name(rng),
            position,
            age,
            ability,
            potential,
            club_id: Some(club_id),
            contract: Some(contract),
            statistics: Default::default(),
            last_evolution: 0,
            years_at_club,
        }
    }

    fn generate_full_name<R: Rng + ?Sized>(&self, rng: &mut R) -> FullName {
        FullName::new(
            pick(&self.people_names_data.first_names, rng),
            pick(&self.people_names_data.last_names, rng),
        )
    }
}

fn generate_potential<R: Rng + ?Sized>(ability: u8, age: u8, rng: &mut R) -> u8 {
    let headroom = match age {
        0..=21 => IntegerUtils::random(rng, 5, 20),
        22..=25 => IntegerUtils::random(rng, 0, 10),
        _ => IntegerUtils::random(rng, 0, 3),
    };

    clamp_ability(ability as i32 + headroom).max(ability)
}

fn clamp_ability(value: i32) -> u8 {
    value.clamp(MIN_ABILITY as i32, MAX_ABILITY as i32) as u8
}

fn pick<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> String {
    names.choose(rng).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn squad_follows_template_and_belongs_to_club() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = PlayerIdSequence::default();
        let generator = PlayerGenerator::default();

        let squad = generator.generate_squad(ClubId(7), 85, &mut ids, &mut rng);

        let expected: usize = SQUAD_TEMPLATE.iter().map(|(_, n)| n).sum();
        assert_eq!(squad.len(), expected);

        for (position, count) in SQUAD_TEMPLATE {
            assert_eq!(squad.iter().filter(|p| p.position == position).count(), count);
        }

        for player in &squad {
            assert_eq!(player.club_id, Some(ClubId(7)));
            assert!(player.potential >= player.ability);
            assert!((MIN_ABILITY..=MAX_ABILITY).contains(&player.ability));
            assert!((18..=34).contains(&player.age));
            assert!(player.contract.is_some());
        }
    }

    #[test]
    fn squad_ability_tracks_rating() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ids = PlayerIdSequence::default();
        let generator = PlayerGenerator::default();

        let strong = generator.generate_squad(ClubId(1), 90, &mut ids, &mut rng);
        let weak = generator.generate_squad(ClubId(2), 58, &mut ids, &mut rng);

        let avg = |squad: &[Player]| squad.iter().map(|p| p.ability as f64).sum::<f64>() / squad.len() as f64;

        assert!(avg(&strong) > avg(&weak) + 20.0);
    }

    #[test]
    fn ids_are_unique() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ids = PlayerIdSequence::default();
        let generator = PlayerGenerator::default();

        let mut all: Vec<_> = (0..4)
            .flat_map(|n| generator.generate_squad(ClubId(n), 70, &mut ids, &mut rng))
            .map(|p| p.id)
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();

        assert_eq!(all.len(), total);
    }

    #[test]
    fn rookies_are_young_with_headroom() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut ids = PlayerIdSequence::default();
        let generator = PlayerGenerator::default();

        for _ in 0..100 {
            let rookie = generator.generate_rookie(&mut ids, ClubId(1), PlayerPositionType::Defender, 80, &mut rng);
            assert!((18..=20).contains(&rookie.age));
            assert!(rookie.ability < 80);
            assert!(rookie.potential >= rookie.ability);
            assert_eq!(rookie.position, PlayerPositionType::Defender);
        }
    }

    #[test]
    fn squads_start_with_tenure_rookies_without() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut ids = PlayerIdSequence::default();
        let generator = PlayerGenerator::default();

        let squad = generator.generate_squad(ClubId(1), 70, &mut ids, &mut rng);

        for player in &squad {
            assert!(player.years_at_club as i32 <= (player.age as i32 - 17).min(MAX_INITIAL_TENURE));
        }
        assert!(squad.iter().any(|p| p.years_at_club >= 2));

        let rookie = generator.generate_rookie(&mut ids, ClubId(1), PlayerPositionType::Attacker, 70, &mut rng);
        assert_eq!(rookie.years_at_club, 0);
    }
}

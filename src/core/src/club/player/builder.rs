use crate::club::{ClubId, Player, PlayerClubContract, PlayerId, PlayerPositionType, PlayerStatistics};
use crate::shared::FullName;

// Builder for Player
#[derive(Default)]
pub struct PlayerBuilder {
    id: Option<PlayerId>,
    full_name: Option<FullName>,
    position: Option<PlayerPositionType>,
    age: Option<u8>,
    ability: Option<u8>,
    potential: Option<u8>,
    club_id: Option<ClubId>,
    contract: Option<Option<PlayerClubContract>>,
    statistics: Option<PlayerStatistics>,
    last_evolution: Option<i8>,
    years_at_club: Option<u8>,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: PlayerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn full_name(mut self, full_name: FullName) -> Self {
        self.full_name = Some(full_name);
        self
    }

    pub fn position(mut self, position: PlayerPositionType) -> Self {
        self.position = Some(position);
        self
    }

    pub fn age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn ability(mut self, ability: u8) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn potential(mut self, potential: u8) -> Self {
        self.potential = Some(potential);
        self
    }

    pub fn club_id(mut self, club_id: ClubId) -> Self {
        self.club_id = Some(club_id);
        self
    }

    pub fn contract(mut self, contract: Option<PlayerClubContract>) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn statistics(mut self, statistics: PlayerStatistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn last_evolution(mut self, last_evolution: i8) -> Self {
        self.last_evolution = Some(last_evolution);
        self
    }

    pub fn years_at_club(mut self, years_at_club: u8) -> Self {
        self.years_at_club = Some(years_at_club);
        self
    }

    pub fn build(self) -> Result<Player, String> {
        let ability = self.ability.ok_or("ability is required")?;
        let potential = self.potential.unwrap_or(ability);

        Ok(Player {
            id: self.id.ok_or("id is required")?,
            full_name: self.full_name.ok_or("full_name is required")?,
            position: self.position.ok_or("position is required")?,
            age: self.age.ok_or("age is required")?,
            ability,
            potential,
            club_id: self.club_id,
            contract: self.contract.unwrap_or(None),
            statistics: self.statistics.unwrap_or_default(),
            last_evolution: self.last_evolution.unwrap_or(0),
            years_at_club: self.years_at_club.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_are_reported() {
        let result = PlayerBuilder::new().id(PlayerId(1)).ability(60).build();
        assert_eq!(result.unwrap_err(), "full_name is required");
    }

    #[test]
    fn potential_defaults_to_ability() {
        let player = PlayerBuilder::new()
            .id(PlayerId(9))
            .full_name(FullName::new("Caio".to_string(), "Lima".to_string()))
            .position(PlayerPositionType::Attacker)
            .age(27)
            .ability(74)
            .build()
            .unwrap();

        assert_eq!(player.potential, 74);
        assert!(player.is_free_agent());
        assert_eq!(player.club_id, None);
    }
}

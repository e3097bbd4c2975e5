use crate::club::{Club, ClubId, Player, PlayerId, Tier};
use log::{error, warn};
use std::collections::BTreeMap;

/// All clubs of the league, keyed by id so iteration order is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct ClubCollection {
    clubs: BTreeMap<ClubId, Club>,
}

impl ClubCollection {
    pub fn new(clubs: Vec<Club>) -> Self {
        ClubCollection {
            clubs: clubs.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn insert(&mut self, club: Club) {
        self.clubs.insert(club.id, club);
    }

    pub fn get(&self, id: ClubId) -> Option<&Club> {
        self.clubs.get(&id)
    }

    pub fn get_mut(&mut self, id: ClubId) -> Option<&mut Club> {
        self.clubs.get_mut(&id)
    }

    pub fn name(&self, id: ClubId) -> &str {
        self.clubs.get(&id).map(|c| c.name.as_str()).unwrap_or("unknown")
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Club> {
        self.clubs.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Club> {
        self.clubs.values_mut()
    }

    pub fn ids(&self) -> Vec<ClubId> {
        self.clubs.keys().copied().collect()
    }

    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &Club> {
        self.clubs.values().filter(move |c| c.tier == tier)
    }

    pub fn ids_by_tier(&self, tier: Tier) -> Vec<ClubId> {
        self.by_tier(tier).map(|c| c.id).collect()
    }

    pub fn find_player(&self, id: PlayerId) -> Option<(&Club, &Player)> {
        self.clubs
            .values()
            .find_map(|club| club.player(id).map(|player| (club, player)))
    }

    pub fn max_player_id(&self) -> Option<PlayerId> {
        self.clubs
            .values()
            .flat_map(|c| c.players.iter().map(|p| p.id))
            .max()
    }

    /// Moves a player between rosters. Nothing changes unless both sides accept the move.
    pub fn transfer_player(&mut self, player_id: PlayerId, from: ClubId, to: ClubId) -> bool {
        if from == to {
            return false;
        }

        let buyer_has_room = match self.clubs.get(&to) {
            Some(buyer) => buyer.has_roster_room(),
            None => return false,
        };

        if !buyer_has_room {
            return false;
        }

        let player = match self.clubs.get_mut(&from).and_then(|s| s.release(player_id)) {
            Some(player) => player,
            None => return false,
        };

        match self.clubs.get_mut(&to).map(|buyer| buyer.sign(player)) {
            Some(Ok(())) => true,
            Some(Err(player)) => {
                warn!("{} rejected a checked transfer of {}", to, player.id);
                self.restore(from, player);
                false
            }
            None => false,
        }
    }

    /// Puts a player back on the selling roster after a failed move.
    fn restore(&mut self, from: ClubId, mut player: Player) {
        let Some(seller) = self.clubs.get_mut(&from) else {
            error!("{} left {} without a roster to return to", player.id, from);
            return;
        };

        // the seller just released the player, so a slot is free
        player.club_id = Some(from);
        seller.players.push(player);
        seller.refresh_wage_bill();
    }

    /// Every player id across all rosters; duplicates indicate a broken roster move.
    pub fn all_player_ids(&self) -> Vec<PlayerId> {
        self.clubs
            .values()
            .flat_map(|c| c.players.iter().map(|p| p.id))
            .collect()
    }
}

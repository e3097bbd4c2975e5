use crate::club::{Club, ClubCollection, ClubId, PlayerId, MAX_ROSTER_SIZE};
use crate::settings::{EconomySettings, TransferSettings};
use crate::transfers::NoDealReason;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Money, roster places and wages promised by moves that are not applied yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commitment {
    pub cash: i64,
    pub players: i32,
    pub wages: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Commitments {
    by_club: HashMap<ClubId, Commitment>,
    reserved: HashSet<PlayerId>,
}

impl Commitments {
    pub fn get(&self, club_id: ClubId) -> Commitment {
        self.by_club.get(&club_id).copied().unwrap_or_default()
    }

    pub fn is_reserved(&self, player_id: PlayerId) -> bool {
        self.reserved.contains(&player_id)
    }

    pub fn reserve(&mut self, player_id: PlayerId) {
        self.reserved.insert(player_id);
    }

    pub fn commit(&mut self, club_id: ClubId, cash: i64, players: i32, wages: i64) {
        let entry = self.by_club.entry(club_id).or_default();
        entry.cash += cash;
        entry.players += players;
        entry.wages += wages;
    }

    pub fn cash(&self, club: &Club) -> i64 {
        club.finance.cash() + self.get(club.id).cash
    }

    pub fn roster_size(&self, club: &Club) -> usize {
        (club.players.len() as i32 + self.get(club.id).players).max(0) as usize
    }

    pub fn wage_bill(&self, club: &Club) -> i64 {
        club.finance.wage_bill + self.get(club.id).wages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTarget {
    pub player_id: PlayerId,
    pub seller: ClubId,
    pub fee: i64,
    pub wage: i64,
}

/// Scouting and affordability checks for general-manager purchases.
pub struct TransferMarket<'a> {
    economy: &'a EconomySettings,
    settings: &'a TransferSettings,
}

impl<'a> TransferMarket<'a> {
    pub fn new(economy: &'a EconomySettings, settings: &'a TransferSettings) -> Self {
        TransferMarket { economy, settings }
    }

    pub fn fee_for(&self, value: i64) -> i64 {
        value + value * self.economy.transfer_premium_pct / 100
    }

    /// Best player at the buyer's weakest position among a random sample of other clubs.
    pub fn scout<R: Rng + ?Sized>(
        &self,
        clubs: &ClubCollection,
        buyer: &Club,
        commitments: &Commitments,
        rng: &mut R,
    ) -> Option<TransferTarget> {
        let position = buyer.weakest_position();
        let budget = commitments.cash(buyer) * self.economy.transfer_budget_pct / 100;

        let sample = clubs
            .iter()
            .filter(|c| c.id != buyer.id)
            .choose_multiple(rng, self.settings.scouting_sample);

        sample
            .into_iter()
            .flat_map(|seller| seller.players_at(position).map(move |p| (seller.id, p)))
            .filter(|(_, p)| p.ability > buyer.rating && !commitments.is_reserved(p.id))
            .filter(|(_, p)| p.value() <= budget)
            .max_by_key(|(_, p)| (p.ability, std::cmp::Reverse(p.id)))
            .map(|(seller, p)| TransferTarget {
                player_id: p.id,
                seller,
                fee: self.fee_for(p.value()),
                wage: p.wage(),
            })
    }

    pub fn check(
        &self,
        buyer: &Club,
        seller: &Club,
        target: &TransferTarget,
        commitments: &Commitments,
    ) -> Result<(), NoDealReason> {
        if commitments.cash(buyer) < target.fee {
            return Err(NoDealReason::InsufficientFunds);
        }

        if commitments.roster_size(buyer) >= MAX_ROSTER_SIZE {
            return Err(NoDealReason::RosterFull);
        }

        if commitments.wage_bill(buyer) + target.wage > buyer.finance.salary_cap {
            return Err(NoDealReason::SalaryCap);
        }

        if commitments.roster_size(seller) <= self.settings.min_squad_size {
            return Err(NoDealReason::SellerSquadTooSmall);
        }

        Ok(())
    }
}

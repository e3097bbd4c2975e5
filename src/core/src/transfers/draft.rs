use crate::club::{Club, ClubCollection, ClubId, Player, PlayerId, Tier, MAX_ROSTER_SIZE};
use crate::settings::{EconomySettings, TransferSettings};
use crate::transfers::{CompletedTransfer, NoDeal, NoDealReason, TransferType};
use log::{debug, info};
use std::cmp::Reverse;

#[derive(Debug, Clone, Default)]
pub struct DraftReport {
    pub order: Vec<ClubId>,
    pub picks: Vec<CompletedTransfer>,
    pub no_deals: Vec<NoDeal>,
}

/// Top-tier clubs pick college prospects, worst record first.
pub struct Draft<'a> {
    economy: &'a EconomySettings,
    settings: &'a TransferSettings,
}

impl<'a> Draft<'a> {
    pub fn new(economy: &'a EconomySettings, settings: &'a TransferSettings) -> Self {
        Draft { economy, settings }
    }

    /// Ascending points, then wins, goal difference and name.
    pub fn order(clubs: &ClubCollection) -> Vec<ClubId> {
        let mut top: Vec<&Club> = clubs.by_tier(Tier::Top).collect();
        top.sort_by(|a, b| {
            (a.record.points(), a.record.wins, a.record.goal_diff())
                .cmp(&(b.record.points(), b.record.wins, b.record.goal_diff()))
                .then_with(|| a.name.cmp(&b.name))
        });
        top.into_iter().map(|c| c.id).collect()
    }

    pub fn is_eligible(&self, club: &Club, player: &Player) -> bool {
        club.tier.is_college()
            && player.years_at_club >= self.settings.draft_min_years
            && player.age <= self.settings.draft_max_age
    }

    /// Highest-ability eligible college player, lowest id on ties.
    pub fn best_prospect(&self, clubs: &ClubCollection) -> Option<(ClubId, PlayerId)> {
        clubs
            .iter()
            .flat_map(|club| {
                club.players
                    .iter()
                    .filter(move |p| self.is_eligible(club, p))
                    .map(move |p| (club.id, p))
            })
            .max_by_key(|(_, p)| (p.ability, Reverse(p.id)))
            .map(|(club_id, p)| (club_id, p.id))
    }

    pub fn compensation(&self, value: i64) -> i64 {
        value * self.economy.draft_compensation_pct / 100
    }

    pub fn run(&self, clubs: &mut ClubCollection, year: i32) -> DraftReport {
        let mut report = DraftReport {
            order: Self::order(clubs),
            ..Default::default()
        };

        for round in 1..=self.settings.draft_rounds {
            for picker_id in report.order.clone() {
                let Some((college_id, player_id)) = self.best_prospect(clubs) else {
                    debug!("draft round {}: no eligible prospects left", round);
                    break;
                };

                match self.pick(clubs, picker_id, college_id, player_id, year) {
                    Ok(pick) => {
                        debug!("draft round {}: {}", round, pick);
                        report.picks.push(pick);
                    }
                    Err(reason) => report
                        .no_deals
                        .push(NoDeal::new(Some(picker_id), Some(player_id), reason)),
                }
            }
        }

        info!("draft {}: {} picks, {} skipped", year, report.picks.len(), report.no_deals.len());

        report
    }

    fn pick(
        &self,
        clubs: &mut ClubCollection,
        picker_id: ClubId,
        college_id: ClubId,
        player_id: PlayerId,
        year: i32,
    ) -> Result<CompletedTransfer, NoDealReason> {
        let picker = clubs.get(picker_id).ok_or(NoDealReason::NoClubAvailable)?;
        let player = clubs
            .get(college_id)
            .and_then(|c| c.player(player_id))
            .ok_or(NoDealReason::NoTarget)?;

        let fee = self.compensation(player.value());
        let wage = player.wage();
        let player_name = player.full_name.to_string();

        if picker.players.len() >= MAX_ROSTER_SIZE {
            return Err(NoDealReason::RosterFull);
        }
        if !picker.finance.can_afford(fee) {
            return Err(NoDealReason::InsufficientFunds);
        }
        if !picker.finance.fits_under_cap(wage) {
            return Err(NoDealReason::SalaryCap);
        }

        if !clubs.transfer_player(player_id, college_id, picker_id) {
            return Err(NoDealReason::RosterFull);
        }

        if let Some(picker) = clubs.get_mut(picker_id) {
            picker.finance.pay_fee(fee);
        }
        if let Some(college) = clubs.get_mut(college_id) {
            college.finance.receive_fee(fee);
        }

        Ok(CompletedTransfer {
            player_id,
            player_name,
            from_club_id: Some(college_id),
            from_club_name: clubs.name(college_id).to_string(),
            to_club_id: picker_id,
            to_club_name: clubs.name(picker_id).to_string(),
            fee,
            transfer_type: TransferType::Draft,
            season_year: year,
        })
    }
}

use crate::club::{ClubCollection, ClubId, Player, PlayerClubContract, PlayerId, PlayerValueCalculator, Tier};
use crate::settings::{EconomySettings, TransferSettings};
use crate::transfers::{
    Commitments, CompletedTransfer, NoDeal, NoDealReason, PendingMove, TransferMarket, TransferType,
};
use crate::utils::IntegerUtils;
use log::{debug, info};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct TransferWindowReport {
    pub renewed: Vec<PlayerId>,
    pub released: Vec<PlayerId>,
    pub transfers: Vec<CompletedTransfer>,
    pub no_deals: Vec<NoDeal>,
}

/// Off-season window: contract run-down, renewals, purchases, free-agent signings.
pub struct TransferWindow<'a> {
    economy: &'a EconomySettings,
    settings: &'a TransferSettings,
}

impl<'a> TransferWindow<'a> {
    pub fn new(economy: &'a EconomySettings, settings: &'a TransferSettings) -> Self {
        TransferWindow { economy, settings }
    }

    pub fn open<R: Rng + ?Sized>(
        &self,
        clubs: &mut ClubCollection,
        free_agents: &mut Vec<Player>,
        year: i32,
        rng: &mut R,
    ) -> TransferWindowReport {
        let mut report = TransferWindowReport::default();

        self.run_down_contracts(clubs, free_agents, &mut report, rng);

        let mut commitments = Commitments::default();
        let mut moves = self.collect_purchases(clubs, &mut commitments, &mut report, rng);
        moves.extend(self.collect_signings(clubs, free_agents, &mut commitments, &mut report, rng));

        self.apply(clubs, free_agents, moves, year, &mut report);

        info!(
            "transfer window {}: {} renewed, {} released, {} transfers, {} no deals",
            year,
            report.renewed.len(),
            report.released.len(),
            report.transfers.len(),
            report.no_deals.len()
        );

        report
    }

    fn run_down_contracts<R: Rng + ?Sized>(
        &self,
        clubs: &mut ClubCollection,
        free_agents: &mut Vec<Player>,
        report: &mut TransferWindowReport,
        rng: &mut R,
    ) {
        for club in clubs.iter_mut() {
            let mut expired = Vec::new();

            for player in club.players.iter_mut() {
                if let Some(contract) = player.contract.as_mut() {
                    if contract.tick() {
                        expired.push(player.id);
                    }
                }
            }

            for player_id in expired {
                let Some(player) = club.player(player_id) else {
                    continue;
                };

                let Some(contract) = player.contract else {
                    continue;
                };

                let years = IntegerUtils::random(rng, 1, 4) as u8;
                let renewed = contract.renewed(years, self.economy.renewal_raise_pct);
                let raise = renewed.wage - contract.wage;

                let good_enough =
                    player.ability as i32 >= club.rating as i32 - self.economy.renewal_ability_margin as i32;

                if good_enough && club.finance.fits_under_cap(raise) {
                    if let Some(player) = club.player_mut(player_id) {
                        player.contract = Some(renewed);
                    }
                    club.refresh_wage_bill();
                    report.renewed.push(player_id);
                } else if let Some(mut player) = club.release(player_id) {
                    debug!("{} released by {}", player.full_name, club.name);
                    player.make_free_agent();
                    report.released.push(player_id);
                    free_agents.push(player);
                }
            }
        }
    }

    fn collect_purchases<R: Rng + ?Sized>(
        &self,
        clubs: &ClubCollection,
        commitments: &mut Commitments,
        report: &mut TransferWindowReport,
        rng: &mut R,
    ) -> Vec<PendingMove> {
        let market = TransferMarket::new(self.economy, self.settings);

        let mut buyers = clubs.ids_by_tier(Tier::Top);
        buyers.shuffle(rng);

        let mut moves = Vec::new();

        for buyer_id in buyers {
            let Some(buyer) = clubs.get(buyer_id) else {
                continue;
            };

            let Some(target) = market.scout(clubs, buyer, commitments, rng) else {
                report.no_deals.push(NoDeal::new(Some(buyer_id), None, NoDealReason::NoTarget));
                continue;
            };

            let Some(seller) = clubs.get(target.seller) else {
                continue;
            };

            if let Err(reason) = market.check(buyer, seller, &target, commitments) {
                report.no_deals.push(NoDeal::new(Some(buyer_id), Some(target.player_id), reason));
                continue;
            }

            commitments.reserve(target.player_id);
            commitments.commit(buyer_id, -target.fee, 1, target.wage);
            commitments.commit(target.seller, target.fee, -1, -target.wage);

            moves.push(PendingMove::Purchase {
                player_id: target.player_id,
                from: target.seller,
                to: buyer_id,
                fee: target.fee,
                transfer_type: TransferType::Permanent,
            });
        }

        moves
    }

    /// Best free agents first, each to a random club that still has room and cap space.
    fn collect_signings<R: Rng + ?Sized>(
        &self,
        clubs: &ClubCollection,
        free_agents: &mut Vec<Player>,
        commitments: &mut Commitments,
        report: &mut TransferWindowReport,
        rng: &mut R,
    ) -> Vec<PendingMove> {
        free_agents.sort_by(|a, b| b.ability.cmp(&a.ability).then_with(|| a.id.cmp(&b.id)));

        let mut moves = Vec::new();
        let mut unplaced = Vec::new();

        for mut player in free_agents.drain(..) {
            let wage = PlayerValueCalculator::wage_for(player.ability, player.age);

            let destination: Option<ClubId> = clubs
                .iter()
                .filter(|c| commitments.roster_size(c) < crate::club::MAX_ROSTER_SIZE)
                .filter(|c| commitments.wage_bill(c) + wage <= c.finance.salary_cap)
                .map(|c| c.id)
                .choose(rng);

            match destination {
                Some(to) => {
                    player.contract = Some(PlayerClubContract::new(IntegerUtils::random(rng, 1, 3) as u8, wage));
                    commitments.commit(to, 0, 1, wage);
                    moves.push(PendingMove::Signing { player, to });
                }
                None => {
                    report
                        .no_deals
                        .push(NoDeal::new(None, Some(player.id), NoDealReason::NoClubAvailable));
                    unplaced.push(player);
                }
            }
        }

        *free_agents = unplaced;

        moves
    }

    fn apply(
        &self,
        clubs: &mut ClubCollection,
        free_agents: &mut Vec<Player>,
        moves: Vec<PendingMove>,
        year: i32,
        report: &mut TransferWindowReport,
    ) {
        for pending in moves {
            match pending {
                PendingMove::Purchase {
                    player_id,
                    from,
                    to,
                    fee,
                    transfer_type,
                } => {
                    let affordable = clubs.get(to).map(|c| c.finance.can_afford(fee)).unwrap_or(false);
                    let player_name = clubs
                        .get(from)
                        .and_then(|c| c.player(player_id))
                        .map(|p| p.full_name.to_string())
                        .unwrap_or_default();

                    if !affordable || !clubs.transfer_player(player_id, from, to) {
                        report
                            .no_deals
                            .push(NoDeal::new(Some(to), Some(player_id), NoDealReason::InsufficientFunds));
                        continue;
                    }

                    if let Some(buyer) = clubs.get_mut(to) {
                        buyer.finance.pay_fee(fee);
                    }
                    if let Some(seller) = clubs.get_mut(from) {
                        seller.finance.receive_fee(fee);
                    }

                    report.transfers.push(CompletedTransfer {
                        player_id,
                        player_name,
                        from_club_id: Some(from),
                        from_club_name: clubs.name(from).to_string(),
                        to_club_id: to,
                        to_club_name: clubs.name(to).to_string(),
                        fee,
                        transfer_type,
                        season_year: year,
                    });
                }
                PendingMove::Signing { player, to } => {
                    let player_id = player.id;
                    let player_name = player.full_name.to_string();

                    let signed = match clubs.get_mut(to) {
                        Some(club) => club.sign(player),
                        None => Err(player),
                    };

                    match signed {
                        Ok(()) => report.transfers.push(CompletedTransfer {
                            player_id,
                            player_name,
                            from_club_id: None,
                            from_club_name: String::from("free agency"),
                            to_club_id: to,
                            to_club_name: clubs.name(to).to_string(),
                            fee: 0,
                            transfer_type: TransferType::Free,
                            season_year: year,
                        }),
                        Err(mut player) => {
                            player.make_free_agent();
                            report
                                .no_deals
                                .push(NoDeal::new(Some(to), Some(player_id), NoDealReason::RosterFull));
                            free_agents.push(player);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances, PlayerGenerator, PlayerIdSequence};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn league(rng: &mut ChaCha8Rng) -> ClubCollection {
        let generator = PlayerGenerator::default();
        let mut ids = PlayerIdSequence::default();
        let mut clubs = Vec::new();

        for id in 1..=12u32 {
            let (tier, rating) = match id {
                1..=8 => (Tier::Top, 70 + id as u8),
                _ => (Tier::College1, 68),
            };
            let mut club = Club::new(
                ClubId(id),
                format!("Club {}", id),
                tier,
                "Brasileira".to_string(),
                "Sul".to_string(),
                rating,
                ClubFinances::new(rating as i64 * 500_000, EconomySettings::default().salary_cap(tier)),
            );
            for player in generator.generate_squad(club.id, rating, &mut ids, rng) {
                club.sign(player).unwrap();
            }
            clubs.push(club);
        }

        ClubCollection::new(clubs)
    }

    fn contracted(clubs: &ClubCollection, free_agents: &[Player]) -> Vec<PlayerId> {
        let mut ids = clubs.all_player_ids();
        ids.extend(free_agents.iter().map(|p| p.id));
        ids.sort();
        ids
    }

    #[test]
    fn window_never_duplicates_or_loses_a_player() {
        let mut rng = ChaCha8Rng::seed_from_u64(100);
        let mut clubs = league(&mut rng);
        let mut free_agents = Vec::new();
        let economy = EconomySettings::default();
        let settings = TransferSettings::default();

        let before = contracted(&clubs, &free_agents);

        for year in 2026..2030 {
            TransferWindow::new(&economy, &settings).open(&mut clubs, &mut free_agents, year, &mut rng);

            let after = contracted(&clubs, &free_agents);
            assert_eq!(before, after);

            let unique: HashSet<PlayerId> = clubs.all_player_ids().into_iter().collect();
            assert_eq!(unique.len(), clubs.all_player_ids().len());
        }
    }

    #[test]
    fn rosters_and_caps_hold_after_the_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(101);
        let mut clubs = league(&mut rng);
        let mut free_agents = Vec::new();
        let economy = EconomySettings::default();
        let settings = TransferSettings::default();

        let report = TransferWindow::new(&economy, &settings).open(&mut clubs, &mut free_agents, 2026, &mut rng);

        for club in clubs.iter() {
            assert!(club.players.len() <= crate::club::MAX_ROSTER_SIZE);
            assert!(club.finance.wage_bill <= club.finance.salary_cap);
            assert_eq!(club.finance.wage_bill, club.players.iter().map(|p| p.wage()).sum::<i64>());
            assert!(club.players.iter().all(|p| p.club_id == Some(club.id) && p.contract.is_some()));
        }

        for player in &free_agents {
            assert!(player.is_free_agent());
            assert_eq!(player.club_id, None);
        }

        for transfer in report.transfers.iter().filter(|t| t.transfer_type == TransferType::Permanent) {
            assert!(clubs.get(transfer.to_club_id).unwrap().player(transfer.player_id).is_some());
        }
    }

    #[test]
    fn expiring_contract_is_renewed_or_released() {
        let mut rng = ChaCha8Rng::seed_from_u64(102);
        let mut clubs = league(&mut rng);

        let club = clubs.get_mut(ClubId(1)).unwrap();
        let strong = club.players[0].id;
        let weak = club.players[1].id;
        club.players[0].ability = 90;
        club.players[0].contract = Some(PlayerClubContract::new(1, 100_000));
        club.players[1].ability = 50;
        club.players[1].contract = Some(PlayerClubContract::new(1, 100_000));
        club.refresh_wage_bill();

        let economy = EconomySettings::default();
        let settings = TransferSettings::default();
        let mut free_agents = Vec::new();
        let mut report = TransferWindowReport::default();

        TransferWindow::new(&economy, &settings).run_down_contracts(&mut clubs, &mut free_agents, &mut report, &mut rng);

        assert!(report.renewed.contains(&strong));
        assert!(report.released.contains(&weak));

        let renewed = clubs.get(ClubId(1)).unwrap().player(strong).unwrap();
        assert_eq!(renewed.wage(), 120_000);
        assert!((1..=4).contains(&renewed.contract.unwrap().years_remaining));

        assert!(free_agents.iter().any(|p| p.id == weak && p.is_free_agent()));
    }

    #[test]
    fn renewal_blocked_by_the_salary_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(103);
        let mut clubs = league(&mut rng);

        let club = clubs.get_mut(ClubId(2)).unwrap();
        let star = club.players[0].id;
        club.players[0].ability = 95;
        club.players[0].contract = Some(PlayerClubContract::new(1, 1_000_000));
        club.refresh_wage_bill();
        club.finance.salary_cap = club.finance.wage_bill;

        let economy = EconomySettings::default();
        let settings = TransferSettings::default();
        let mut free_agents = Vec::new();
        let mut report = TransferWindowReport::default();

        TransferWindow::new(&economy, &settings).run_down_contracts(&mut clubs, &mut free_agents, &mut report, &mut rng);

        assert!(report.released.contains(&star));
        assert!(clubs.get(ClubId(2)).unwrap().player(star).is_none());
    }
}

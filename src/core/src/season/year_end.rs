use crate::club::{ClubId, PlayerDevelopment, PlayerGenerator, PlayerId};
use crate::economy::{RevenueDistribution, RevenueShare, WagePayroll};
use crate::season::SeasonSummary;
use crate::simulator::SimulatorData;
use log::{debug, info};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retirement {
    pub player_id: PlayerId,
    pub player_name: String,
    pub club_id: Option<ClubId>,
    pub age: u8,
    /// Rookie who took the roster slot.
    pub replaced_by: Option<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct SeasonEndReport {
    pub year: i32,
    pub revenue: Vec<RevenueShare>,
    pub wages_paid: i64,
    pub retirements: Vec<Retirement>,
    pub summary: SeasonSummary,
}

/// Closing books on a year: money first, then every player gets a year older.
pub struct YearEnd;

impl YearEnd {
    pub fn process<R: Rng + ?Sized>(
        data: &mut SimulatorData,
        generator: &PlayerGenerator,
        rng: &mut R,
    ) -> SeasonEndReport {
        let year = data.season.year;

        info!("year end {}", year);

        for club in data.clubs.iter_mut() {
            club.finance.start_new_season();
        }

        let revenue = RevenueDistribution::distribute(&mut data.clubs, data.settings.economy.revenue_pool);
        let wages_paid = WagePayroll::deduct(&mut data.clubs);

        Self::record_standings(data);

        let mut retirements = Self::develop_rosters(data, generator, rng);
        retirements.extend(Self::develop_free_agents(data, rng));

        for club in data.clubs.iter_mut() {
            club.record.reset();
        }

        data.playoffs = None;
        data.season.current.retirements = retirements.len();

        info!(
            "year end {}: {} retirements, wages paid {}",
            year,
            retirements.len(),
            wages_paid
        );

        SeasonEndReport {
            year,
            revenue,
            wages_paid,
            retirements,
            summary: data.season.current.clone(),
        }
    }

    fn record_standings(data: &mut SimulatorData) {
        let table = data.table();

        data.season.current.conference_leaders = table
            .conferences()
            .into_iter()
            .filter_map(|conference| {
                table
                    .leader(&conference)
                    .map(|row| (conference.clone(), row.name.clone()))
            })
            .collect();

        let champion = data.playoffs.as_ref().and_then(|p| p.champion);
        if let Some(champion) = champion {
            data.season.current.champion = Some(data.clubs.name(champion).to_string());
        }
    }

    /// Evolution, aging and retirement for every contracted player. Retirees are
    /// replaced in the same roster slot.
    fn develop_rosters<R: Rng + ?Sized>(
        data: &mut SimulatorData,
        generator: &PlayerGenerator,
        rng: &mut R,
    ) -> Vec<Retirement> {
        let mut retirements = Vec::new();

        for club in data.clubs.iter_mut() {
            for slot in 0..club.players.len() {
                let player = &mut club.players[slot];

                PlayerDevelopment::evolve(player, rng);
                player.age = player.age.saturating_add(1);
                player.reset_season_statistics();
                player.years_at_club = player.years_at_club.saturating_add(1);

                if !PlayerDevelopment::should_retire(player, rng) {
                    continue;
                }

                let position = player.position;
                let rookie = generator.generate_rookie(&mut data.player_ids, club.id, position, club.rating, rng);
                let rookie_id = rookie.id;

                if let Some(retiree) = club.replace_player(slot, rookie) {
                    debug!("{} retires from {} at {}", retiree.full_name, club.name, retiree.age);

                    retirements.push(Retirement {
                        player_id: retiree.id,
                        player_name: retiree.full_name.to_string(),
                        club_id: Some(club.id),
                        age: retiree.age,
                        replaced_by: Some(rookie_id),
                    });
                }
            }

            club.refresh_wage_bill();
        }

        retirements
    }

    fn develop_free_agents<R: Rng + ?Sized>(data: &mut SimulatorData, rng: &mut R) -> Vec<Retirement> {
        let mut retirements = Vec::new();

        data.free_agents.retain_mut(|player| {
            PlayerDevelopment::evolve(player, rng);
            player.age = player.age.saturating_add(1);
            player.reset_season_statistics();

            if PlayerDevelopment::should_retire(player, rng) {
                retirements.push(Retirement {
                    player_id: player.id,
                    player_name: player.full_name.to_string(),
                    club_id: None,
                    age: player.age,
                    replaced_by: None,
                });
                false
            } else {
                true
            }
        });

        retirements
    }
}

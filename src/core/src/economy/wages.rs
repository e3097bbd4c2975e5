use crate::club::ClubCollection;
use log::debug;

pub struct WagePayroll;

impl WagePayroll {
    /// Charges every club its wage bill, recomputed from the roster first. Returns the total paid.
    pub fn deduct(clubs: &mut ClubCollection) -> i64 {
        let mut total = 0;

        for club in clubs.iter_mut() {
            club.refresh_wage_bill();

            let wages = club.finance.wage_bill;
            club.finance.push_salary(&club.name, wages);

            if club.finance.cash() < 0 {
                debug!("{} is in debt: {}", club.name, club.finance.cash());
            }

            total += wages;
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances, ClubId, Player, PlayerClubContract, PlayerId, PlayerPositionType, Tier};
    use crate::shared::FullName;

    #[test]
    fn wages_are_charged_to_every_tier() {
        let mut clubs = ClubCollection::new(
            [Tier::Top, Tier::College1, Tier::College2]
                .into_iter()
                .enumerate()
                .map(|(i, tier)| {
                    let mut club = Club::new(
                        ClubId(i as u32 + 1),
                        format!("Club {}", i),
                        tier,
                        "Sul".to_string(),
                        String::new(),
                        70,
                        ClubFinances::new(1_000_000, 60_000_000),
                    );
                    let player = Player::builder()
                        .id(PlayerId(i as u32 + 1))
                        .full_name(FullName::new("Davi".to_string(), "Melo".to_string()))
                        .position(PlayerPositionType::Defender)
                        .age(24)
                        .ability(70)
                        .contract(Some(PlayerClubContract::new(2, 250_000)))
                        .build()
                        .unwrap();
                    club.sign(player).unwrap();
                    club
                })
                .collect(),
        );

        // a stale stored bill is ignored
        clubs.get_mut(ClubId(2)).unwrap().finance.wage_bill = 1;

        let total = WagePayroll::deduct(&mut clubs);

        assert_eq!(total, 750_000);
        for club in clubs.iter() {
            assert_eq!(club.finance.cash(), 750_000);
        }
    }
}

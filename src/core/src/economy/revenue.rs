use crate::club::{ClubCollection, ClubId, Tier};
use log::{debug, info};

const EQUAL_SHARE_PCT: i64 = 50;
const POINTS_SHARE_PCT: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueShare {
    pub club_id: ClubId,
    pub equal: i64,
    pub points: i64,
    pub rating: i64,
}

impl RevenueShare {
    pub fn total(&self) -> i64 {
        self.equal + self.points + self.rating
    }
}

/// Splits the league revenue pool across the top tier.
pub struct RevenueDistribution;

impl RevenueDistribution {
    /// Half equally, a quarter by points, a quarter by rating. Integer
    /// remainders go to the first clubs in id order so the shares add up to `pool`.
    pub fn shares(clubs: &ClubCollection, pool: i64) -> Vec<RevenueShare> {
        let top: Vec<(ClubId, i64, i64)> = clubs
            .by_tier(Tier::Top)
            .map(|c| (c.id, c.record.points() as i64, c.rating as i64))
            .collect();

        if top.is_empty() || pool <= 0 {
            return Vec::new();
        }

        let equal_pool = pool * EQUAL_SHARE_PCT / 100;
        let points_pool = pool * POINTS_SHARE_PCT / 100;
        let rating_pool = pool - equal_pool - points_pool;

        let equal = split(equal_pool, &top.iter().map(|_| 1).collect::<Vec<_>>());
        let points = split(points_pool, &top.iter().map(|t| t.1).collect::<Vec<_>>());
        let rating = split(rating_pool, &top.iter().map(|t| t.2).collect::<Vec<_>>());

        top.iter()
            .enumerate()
            .map(|(i, (club_id, _, _))| RevenueShare {
                club_id: *club_id,
                equal: equal[i],
                points: points[i],
                rating: rating[i],
            })
            .collect()
    }

    /// Credits every share as season revenue. Returns the shares paid.
    pub fn distribute(clubs: &mut ClubCollection, pool: i64) -> Vec<RevenueShare> {
        let shares = Self::shares(clubs, pool);

        for share in &shares {
            if let Some(club) = clubs.get_mut(share.club_id) {
                club.finance.push_revenue(&club.name, share.total());
                debug!("revenue: {} receives {}", club.name, share.total());
            }
        }

        info!(
            "revenue pool of {} distributed to {} clubs",
            shares.iter().map(|s| s.total()).sum::<i64>(),
            shares.len()
        );

        shares
    }
}

/// Proportional integer split of `amount`; falls back to equal weights when all are zero.
fn split(amount: i64, weights: &[i64]) -> Vec<i64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total: i64 = weights.iter().sum();
    let weights: Vec<i64> = if total > 0 {
        weights.to_vec()
    } else {
        vec![1; weights.len()]
    };
    let total: i64 = weights.iter().sum();

    let mut parts: Vec<i64> = weights.iter().map(|w| amount * w / total).collect();

    let mut remainder = amount - parts.iter().sum::<i64>();
    let count = parts.len();
    let mut idx = 0;
    while remainder > 0 {
        parts[idx % count] += 1;
        remainder -= 1;
        idx += 1;
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances};

    fn top_tier() -> ClubCollection {
        ClubCollection::new(
            (1..=32u32)
                .map(|id| {
                    let mut club = Club::new(
                        ClubId(id),
                        format!("Club {}", id),
                        Tier::Top,
                        "Brasileira".to_string(),
                        "Sul".to_string(),
                        (60 + id) as u8,
                        ClubFinances::new(0, 60_000_000),
                    );
                    club.record.wins = (id % 13) as u16;
                    club.record.draws = (id % 3) as u16;
                    club
                })
                .chain(std::iter::once(Club::new(
                    ClubId(100),
                    "College".to_string(),
                    Tier::College1,
                    "Sul".to_string(),
                    String::new(),
                    70,
                    ClubFinances::new(0, 15_000_000),
                )))
                .collect(),
        )
    }

    #[test]
    fn shares_add_up_to_the_pool() {
        let clubs = top_tier();

        for pool in [800_000_000, 799_999_999, 31, 1] {
            let shares = RevenueDistribution::shares(&clubs, pool);
            assert_eq!(shares.len(), 32);
            assert_eq!(shares.iter().map(|s| s.total()).sum::<i64>(), pool);
        }
    }

    #[test]
    fn only_the_top_tier_is_paid() {
        let mut clubs = top_tier();

        RevenueDistribution::distribute(&mut clubs, 800_000_000);

        assert_eq!(clubs.get(ClubId(100)).unwrap().finance.cash(), 0);
        let total: i64 = clubs.iter().map(|c| c.finance.season_revenue()).sum();
        assert_eq!(total, 800_000_000);
    }

    #[test]
    fn more_points_and_rating_earn_more() {
        let clubs = top_tier();

        let shares = RevenueDistribution::shares(&clubs, 800_000_000);
        let by_id = |id: u32| shares.iter().find(|s| s.club_id == ClubId(id)).unwrap();

        // club 12: 12 wins, club 13: 0 wins
        assert!(by_id(12).points > by_id(13).points);
        assert!(by_id(32).rating > by_id(1).rating);
        assert_eq!(by_id(1).equal, 12_500_000);
    }

    #[test]
    fn pointless_season_splits_evenly() {
        assert_eq!(split(10, &[0, 0, 0]), vec![4, 3, 3]);
    }
}

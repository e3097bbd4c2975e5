use crate::club::Player;

/// Share of market value paid as annual wage on a fresh contract.
const WAGE_SHARE_PCT: i64 = 15;

pub struct PlayerValueCalculator;

impl PlayerValueCalculator {
    pub fn calculate(player: &Player) -> i64 {
        Self::value_for(player.ability, player.age)
    }

    pub fn value_for(ability: u8, age: u8) -> i64 {
        let value = determine_base_value(ability) * determine_age_factor(age);

        value.round().max(10_000.0) as i64
    }

    pub fn wage_for(ability: u8, age: u8) -> i64 {
        Self::value_for(ability, age) * WAGE_SHARE_PCT / 100
    }
}

/// Exponential in ability: 40 → 100K, 70 → ~1M, 85 → ~3.2M, 99 → ~9.4M
fn determine_base_value(ability: u8) -> f64 {
    100_000.0 * 1.08f64.powi(ability as i32 - 40)
}

/// Young players carry a premium, veterans decline steeply
fn determine_age_factor(age: u8) -> f64 {
    match age {
        0..=20 => 1.3,
        21..=24 => 1.15,
        25..=29 => 1.0,
        30..=32 => 0.7,
        _ => 0.45,
    }
}

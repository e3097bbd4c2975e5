use crate::club::{Player, MAX_ABILITY, MIN_ABILITY};
use crate::utils::{IntegerUtils, RandomUtils};
use rand::Rng;

const RETIREMENT_AGE: u8 = 32;
const RETIREMENT_STEP: f64 = 0.15;
const AT_POTENTIAL_GROWTH_CHANCE: f64 = 0.1;

pub struct PlayerDevelopment;

impl PlayerDevelopment {
    /// Rolls the yearly ability change and applies it. Returns the delta actually applied.
    pub fn evolve<R: Rng + ?Sized>(player: &mut Player, rng: &mut R) -> i8 {
        let delta = Self::roll_delta(player, rng);

        let before = player.ability as i32;
        let after = (before + delta).clamp(MIN_ABILITY as i32, MAX_ABILITY as i32);

        player.ability = after as u8;
        player.last_evolution = (after - before) as i8;
        player.last_evolution
    }

    pub fn roll_delta<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> i32 {
        let mut delta = match player.age {
            0..=23 => IntegerUtils::random(rng, -1, 5),
            24..=30 => IntegerUtils::random(rng, -2, 2),
            _ => IntegerUtils::random(rng, -5, 1),
        };

        let stats = &player.statistics;

        if stats.appearances >= 20 {
            delta += 1;
        }
        if stats.contributions() >= 10 {
            delta += 1;
        }
        if stats.appearances < 5 {
            delta -= 1;
        }

        if player.has_reached_potential() && delta > 0 {
            delta = if RandomUtils::chance(rng, AT_POTENTIAL_GROWTH_CHANCE) {
                1
            } else {
                0
            };
        }

        delta
    }

    pub fn retirement_chance(age: u8) -> f64 {
        if age <= RETIREMENT_AGE {
            return 0.0;
        }

        (RETIREMENT_STEP * (age - RETIREMENT_AGE) as f64).min(1.0)
    }

    pub fn should_retire<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> bool {
        RandomUtils::chance(rng, Self::retirement_chance(player.age))
    }
}

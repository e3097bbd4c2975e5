use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct IntegerUtils;

impl IntegerUtils {
    /// Inclusive on both ends; swapped bounds are tolerated.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }

        rng.gen_range(min..=max)
    }
}

pub struct FloatUtils;

impl FloatUtils {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }

        rng.gen_range(min..max)
    }
}

pub struct RandomUtils;

impl RandomUtils {
    pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
        rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
        rng.gen_bool(0.5)
    }

    pub fn seeded(seed: Option<u64>) -> ChaCha8Rng {
        match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

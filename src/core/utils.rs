use std::ops::RangeInclusive;

use quad_rand::compat::QuadRand;
use rand::{
    distributions::uniform::{SampleRange, SampleUniform},
    Rng, RngCore,
};

/// The process-wide generator. Seed it with `quad_rand::srand`.
pub fn zrng() -> Box<dyn RngCore> {
    Box::new(QuadRand)
}

/// Uniform roll inside an inclusive range.
pub fn roll_dice<T, R>(rng: &mut dyn RngCore, range: R) -> T
where
    T: SampleUniform,
    R: SampleRange<T>,
{
    rng.gen_range(range)
}

pub fn roll_dice_inclusive(rng: &mut dyn RngCore, range: RangeInclusive<i32>) -> i32 {
    assert!(!range.is_empty(), "empty dice range: {:?}", range);
    roll_dice(rng, range)
}

pub fn clamp_min<T: PartialOrd>(value: T, min: T) -> T {
    if value < min {
        min
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_clamp_min() {
        assert_eq!(super::clamp_min(1, 0), 1);
        assert_eq!(super::clamp_min(0, 0), 0);
        assert_eq!(super::clamp_min(-1, 0), 0);
    }

    #[test]
    fn test_roll_dice_covers_inclusive_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let n = super::roll_dice_inclusive(&mut rng, 3..=5);
            assert!((3..=5).contains(&n));
            seen[(n - 3) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_roll_dice_single_value() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(super::roll_dice_inclusive(&mut rng, 4..=4), 4);
    }
}

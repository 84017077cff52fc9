//! Heritable trait generation, recombination, mutation, and the mapping from
//! traits to physical parameters.

use neuroarena_data::{DerivedStats, TraitId, Traits, PREDATOR_AGGRESSION, PREY_AGGRESSION};
use rand::Rng;
use rand_distr::StandardNormal;

/// Trait defining the genetic interface of the trait vector.
pub trait TraitLogic: Sized {
    /// Draws every trait uniformly within its range. Aggression is drawn from
    /// the high sub-range for predators and the low one otherwise.
    fn generate_with_rng<R: Rng>(predator_bias: bool, rng: &mut R) -> Self;

    /// Blends each trait with its own random weight in `[0, 1]`.
    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> Self;

    /// Adds Gaussian noise to each trait with probability `rate`, then clamps.
    fn mutate_with_rng<R: Rng>(&mut self, rate: f64, strength: f64, rng: &mut R);

    /// Copy with every trait clamped into its declared range.
    #[must_use]
    fn clamped(&self) -> Self;

    #[must_use]
    fn derive_stats(&self) -> DerivedStats;
}

impl TraitLogic for Traits {
    fn generate_with_rng<R: Rng>(predator_bias: bool, rng: &mut R) -> Self {
        let mut traits = Traits::default();
        for id in TraitId::ALL {
            let range = match id {
                TraitId::Aggression if predator_bias => PREDATOR_AGGRESSION,
                TraitId::Aggression => PREY_AGGRESSION,
                _ => id.range(),
            };
            traits.set(id, rng.gen_range(range.min..=range.max));
        }
        traits
    }

    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        let mut child = *self;
        for id in TraitId::ALL {
            let t: f64 = rng.gen_range(0.0..=1.0);
            let a = self.get(id);
            let b = other.get(id);
            child.set(id, id.range().clamp(a + (b - a) * t));
        }
        child
    }

    fn mutate_with_rng<R: Rng>(&mut self, rate: f64, strength: f64, rng: &mut R) {
        for id in TraitId::ALL {
            if rng.gen::<f64>() < rate {
                let noise: f64 = rng.sample(StandardNormal);
                let value = self.get(id) + noise * strength;
                self.set(id, id.range().clamp(value));
            }
        }
    }

    fn clamped(&self) -> Self {
        let mut traits = *self;
        for id in TraitId::ALL {
            let value = self.get(id);
            // NaN would slip through clamp; fall back to the range midpoint.
            let value = if value.is_nan() {
                let range = id.range();
                (range.min + range.max) / 2.0
            } else {
                value
            };
            traits.set(id, id.range().clamp(value));
        }
        traits
    }

    fn derive_stats(&self) -> DerivedStats {
        derive_stats(self)
    }
}

/// Pure trait → physical parameter mapping.
#[must_use]
pub fn derive_stats(traits: &Traits) -> DerivedStats {
    let Traits {
        size,
        metabolism,
        aggression,
        vision,
    } = *traits;
    DerivedStats {
        max_energy: 100.0 + (size - 1.0) * 80.0,
        max_speed: 4.0 * (1.2 - size * 0.3) * metabolism,
        base_energy_cost: 0.05 * metabolism * size,
        move_energy_cost: 0.02 * metabolism,
        sensor_range: 150.0 * vision,
        body_radius: 12.0 * size,
        attack_power: 30.0 * aggression * size,
        attack_cooldown_ticks: if metabolism > 0.0 { 60.0 / metabolism } else { 60.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generate_respects_aggression_bias() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let predator = Traits::generate_with_rng(true, &mut rng);
            let prey = Traits::generate_with_rng(false, &mut rng);
            assert!(predator.aggression >= 0.6);
            assert!(prey.aggression <= 0.4);
            assert!(predator.in_range() && prey.in_range());
        }
    }

    #[test]
    fn test_crossover_stays_between_parents() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let a = Traits {
            size: 0.5,
            metabolism: 2.0,
            aggression: 0.0,
            vision: 1.0,
        };
        let b = Traits {
            size: 2.0,
            metabolism: 0.5,
            aggression: 1.0,
            vision: 1.0,
        };
        for _ in 0..100 {
            let child = a.crossover_with_rng(&b, &mut rng);
            assert!((0.5..=2.0).contains(&child.size));
            assert!((0.5..=2.0).contains(&child.metabolism));
            assert!((0.0..=1.0).contains(&child.aggression));
            assert_eq!(child.vision, 1.0);
        }
    }

    #[test]
    fn test_clamped_repairs_out_of_range_values() {
        let traits = Traits {
            size: 9.0,
            metabolism: -1.0,
            aggression: f64::NAN,
            vision: 1.2,
        };
        let fixed = traits.clamped();
        assert_eq!(fixed.size, 2.0);
        assert_eq!(fixed.metabolism, 0.5);
        assert_eq!(fixed.aggression, 0.5);
        assert_eq!(fixed.vision, 1.2);
    }

    #[test]
    fn test_derive_stats_formulas() {
        let traits = Traits {
            size: 1.5,
            metabolism: 2.0,
            aggression: 0.8,
            vision: 1.2,
        };
        let stats = derive_stats(&traits);
        assert!((stats.max_energy - 140.0).abs() < 1e-9);
        assert!((stats.max_speed - 4.0 * (1.2 - 0.45) * 2.0).abs() < 1e-9);
        assert!((stats.base_energy_cost - 0.15).abs() < 1e-9);
        assert!((stats.move_energy_cost - 0.04).abs() < 1e-9);
        assert!((stats.sensor_range - 180.0).abs() < 1e-9);
        assert!((stats.body_radius - 18.0).abs() < 1e-9);
        assert!((stats.attack_power - 36.0).abs() < 1e-9);
        assert!((stats.attack_cooldown_ticks - 30.0).abs() < 1e-9);
    }
}

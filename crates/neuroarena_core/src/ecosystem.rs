//! Resource balancing: dynamic plant quota, meat decay, and the end-of-
//! generation fitness penalty for an overpopulated species.

use crate::config::EcosystemConfig;
use neuroarena_data::{Agent, Food, FoodKind, Obstacle, Species};
use rand::Rng;

/// Share of living agents that are prey. Zero when nobody is alive.
#[must_use]
pub fn herbivore_ratio(agents: &[Agent]) -> f64 {
    let (alive, prey) = agents
        .iter()
        .filter(|a| a.is_alive())
        .fold((0usize, 0usize), |(alive, prey), a| {
            (alive + 1, prey + usize::from(a.species == Species::Prey))
        });
    if alive == 0 {
        0.0
    } else {
        prey as f64 / alive as f64
    }
}

/// Target plant count for the given herbivore ratio.
#[must_use]
pub fn plant_quota(base: usize, ratio: f64, config: &EcosystemConfig) -> usize {
    let multiplier = (config.max_plant_multiplier - ratio * config.plant_scaling_factor)
        .clamp(config.min_plant_multiplier, config.max_plant_multiplier);
    (base as f64 * multiplier).round() as usize
}

/// Scales down the fitness of a species that dominates the living
/// population. Returns the penalized species.
pub fn apply_population_penalty(agents: &mut [Agent], config: &EcosystemConfig) -> Vec<Species> {
    let alive = agents.iter().filter(|a| a.is_alive()).count();
    if alive == 0 {
        return Vec::new();
    }
    let prey_ratio = herbivore_ratio(agents);
    let predator_ratio = 1.0 - prey_ratio;

    let mut penalized = Vec::new();
    if prey_ratio > config.herbivore_overpopulation_threshold {
        penalized.push((Species::Prey, config.herbivore_penalty));
    }
    if predator_ratio > config.predator_overpopulation_threshold {
        penalized.push((Species::Predator, config.predator_penalty));
    }

    for &(species, penalty) in &penalized {
        for agent in agents.iter_mut().filter(|a| a.species == species) {
            agent.fitness *= 1.0 - penalty;
        }
    }
    penalized.into_iter().map(|(species, _)| species).collect()
}

/// Counts down meat lifetimes; rotten meat becomes consumed.
pub fn decay_meat(food: &mut [Food]) {
    for item in food.iter_mut().filter(|f| !f.consumed) {
        if let Some(remaining) = item.decay.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                item.consumed = true;
            }
        }
    }
}

/// Drops consumed items.
pub fn prune(food: &mut Vec<Food>) {
    food.retain(Food::is_available);
}

#[must_use]
pub fn count_available(food: &[Food], kind: FoodKind) -> usize {
    food.iter()
        .filter(|f| f.is_available() && f.kind == kind)
        .count()
}

/// Picks a point outside every obstacle, giving up after a few tries.
pub fn open_position_with_rng<R: Rng>(
    width: f64,
    height: f64,
    obstacles: &[Obstacle],
    rng: &mut R,
) -> (f64, f64) {
    let width = width.max(f64::MIN_POSITIVE);
    let height = height.max(f64::MIN_POSITIVE);
    let mut point = (rng.gen_range(0.0..width), rng.gen_range(0.0..height));
    for _ in 0..8 {
        let blocked = obstacles
            .iter()
            .any(|o| (o.x - point.0).hypot(o.y - point.1) < o.radius);
        if !blocked {
            break;
        }
        point = (rng.gen_range(0.0..width), rng.gen_range(0.0..height));
    }
    point
}

/// Tops plants up to `quota` and meat up to `meat_target`.
#[allow(clippy::too_many_arguments)]
pub fn replenish_with_rng<R: Rng>(
    food: &mut Vec<Food>,
    quota: usize,
    meat_target: usize,
    width: f64,
    height: f64,
    obstacles: &[Obstacle],
    config: &EcosystemConfig,
    rng: &mut R,
) {
    let plants = count_available(food, FoodKind::Plant);
    for _ in plants..quota {
        let (x, y) = open_position_with_rng(width, height, obstacles, rng);
        food.push(Food::plant(x, y, config.plant_energy));
    }
    let meat = count_available(food, FoodKind::Meat);
    for _ in meat..meat_target {
        let (x, y) = open_position_with_rng(width, height, obstacles, rng);
        food.push(Food::meat(
            x,
            y,
            config.meat_energy,
            config.hunted_meat_decay,
            false,
        ));
    }
}

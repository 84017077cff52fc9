use serde::{Deserialize, Serialize};

/// Read-only population summary handed to observers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Current generation number (0-based).
    pub generation: u32,
    /// Tick within the current generation.
    pub tick: u64,
    /// Total population size, dead agents included.
    pub population: usize,
    /// Number of living agents.
    pub alive: usize,
    /// Living predators.
    pub predators: usize,
    /// Living prey.
    pub prey: usize,
    /// Mean fitness over the whole population.
    pub avg_fitness: f64,
    /// Highest fitness in the population.
    pub max_fitness: f64,
    /// Lowest fitness in the population.
    pub min_fitness: f64,
    /// Sum of every agent's kill counter.
    pub total_kills: u32,
    /// Unconsumed food items on the map.
    pub food_count: usize,
}

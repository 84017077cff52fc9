//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration sections mapping to a `config.toml` file. Every
//! behavioral constant of the simulation lives here with its default value so
//! experiments can tune it without touching code.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1200.0
//! height = 800.0
//! population_size = 40
//! food_count = 60
//! meat_count = 10
//! obstacle_count = 6
//! generation_length = 2000
//! predator_ratio = 0.25
//! seed = 42
//!
//! [evolution]
//! mutation_rate = 0.1
//! tournament_size = 3
//! ```
//!
//! Sections that are omitted fall back to their defaults.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Arena and population layout. This is the object accepted by
/// `World::reset_to_config`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub population_size: usize,
    /// Base plant count before ecosystem scaling.
    pub food_count: usize,
    /// Minimum amount of meat kept on the map.
    pub meat_count: usize,
    pub obstacle_count: usize,
    /// Ticks per generation.
    pub generation_length: u64,
    /// Fraction of the seeded population that starts as predators.
    pub predator_ratio: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            population_size: 40,
            food_count: 60,
            meat_count: 10,
            obstacle_count: 6,
            generation_length: 2000,
            predator_ratio: 0.25,
            seed: None,
        }
    }
}

/// Per-tick movement and sensing constants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    /// Cone half-angle in radians.
    pub sensor_half_angle: f64,
    /// Speed change per unit of thrust output.
    pub acceleration: f64,
    /// Heading change (radians) per unit of turn output.
    pub turn_rate: f64,
    pub boost_threshold: f32,
    pub boost_multiplier: f64,
    /// Extra energy per boosted tick, scaled by metabolism.
    pub boost_cost: f64,
    pub attack_intent_threshold: f32,
    /// Gap below which a predator strikes without asking its brain.
    pub auto_attack_margin: f64,
    pub friction: f64,
    /// Fitness granted for every tick survived.
    pub passive_fitness: f64,
    pub obstacle_min_radius: f64,
    pub obstacle_max_radius: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            sensor_half_angle: std::f64::consts::FRAC_PI_4,
            acceleration: 0.5,
            turn_rate: 0.15,
            boost_threshold: 0.5,
            boost_multiplier: 1.5,
            boost_cost: 0.1,
            attack_intent_threshold: 0.5,
            auto_attack_margin: 5.0,
            friction: 0.95,
            passive_fitness: 0.01,
            obstacle_min_radius: 20.0,
            obstacle_max_radius: 45.0,
        }
    }
}

/// Combat rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CombatConfig {
    /// Gap beyond touching radii within which an attack still lands.
    pub attack_reach_margin: f64,
    pub kill_bonus: f64,
    /// Share of the victim's fitness transferred to the killer.
    pub victim_fitness_share: f64,
    /// Bonus per kill already on the attacker's record.
    pub streak_bonus: f64,
    /// Share of the victim's max energy the killer absorbs.
    pub kill_energy_fraction: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_reach_margin: 10.0,
            kill_bonus: 150.0,
            victim_fitness_share: 0.5,
            streak_bonus: 20.0,
            kill_energy_fraction: 0.8,
        }
    }
}

/// Resource spawning and population balancing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EcosystemConfig {
    pub plant_energy: f64,
    pub meat_energy: f64,
    /// Reach added to an agent's body radius when eating.
    pub food_radius: f64,
    /// Lifetime of meat left by kills and of spawned meat.
    pub hunted_meat_decay: u32,
    pub starvation_meat_decay: u32,
    pub hunted_meat_energy_fraction: f64,
    pub starvation_meat_energy_fraction: f64,
    /// How strongly herbivore dominance shrinks the plant quota.
    pub plant_scaling_factor: f64,
    pub min_plant_multiplier: f64,
    pub max_plant_multiplier: f64,
    pub herbivore_overpopulation_threshold: f64,
    pub herbivore_penalty: f64,
    pub predator_overpopulation_threshold: f64,
    pub predator_penalty: f64,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            plant_energy: 30.0,
            meat_energy: 60.0,
            food_radius: 5.0,
            hunted_meat_decay: 800,
            starvation_meat_decay: 300,
            hunted_meat_energy_fraction: 0.5,
            starvation_meat_energy_fraction: 0.3,
            plant_scaling_factor: 1.2,
            min_plant_multiplier: 0.6,
            max_plant_multiplier: 1.5,
            herbivore_overpopulation_threshold: 0.7,
            herbivore_penalty: 0.3,
            predator_overpopulation_threshold: 0.5,
            predator_penalty: 0.3,
        }
    }
}

/// Genetic algorithm parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Elites cloned verbatim from each species.
    pub elite_per_species: usize,
    /// Minimum head count per species in a new generation.
    pub min_species_floor: usize,
    pub tournament_size: usize,
    /// Per-weight mutation probability.
    pub mutation_rate: f64,
    /// Standard deviation of per-weight Gaussian noise.
    pub mutation_strength: f64,
    pub trait_mutation_rate: f64,
    pub trait_mutation_strength: f64,
    /// Rate and strength multiplier for floor-rescue clones.
    pub adaptive_mutation_multiplier: f64,
    pub species_flip_probability: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            elite_per_species: 2,
            min_species_floor: 3,
            tournament_size: 3,
            mutation_rate: 0.1,
            mutation_strength: 0.3,
            trait_mutation_rate: 0.1,
            trait_mutation_strength: 0.1,
            adaptive_mutation_multiplier: 2.5,
            species_flip_probability: 0.05,
        }
    }
}

/// Network architecture shared by every agent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrainConfig {
    pub hidden_layers: Vec<usize>,
    /// Initial weights are drawn from `[-init_weight_range, init_weight_range]`.
    pub init_weight_range: f32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![16, 8],
            init_weight_range: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub agent: AgentConfig,
    pub combat: CombatConfig,
    pub ecosystem: EcosystemConfig,
    pub evolution: EvolutionConfig,
    pub brain: BrainConfig,
}

fn unit(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Population must be non-empty
    /// - Tournament size must be in `1..=population_size`
    /// - Both species' elites together must fit in the population
    /// - Probabilities and fractions must lie in [0.0, 1.0]
    /// - Arena dimensions and generation length must be positive
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        let evolution = &self.evolution;

        // World validation
        crate::ensure_config!(world.population_size > 0, "Population size must be positive");
        crate::ensure_config!(
            world.width > 0.0 && world.height > 0.0,
            "Arena dimensions must be positive"
        );
        crate::ensure_config!(
            world.width.is_finite() && world.height.is_finite(),
            "Arena dimensions must be finite, got {}x{}",
            world.width,
            world.height
        );
        crate::ensure_config!(
            world.generation_length > 0,
            "Generation length must be positive"
        );
        crate::ensure_config!(
            unit(world.predator_ratio),
            "Predator ratio must be in [0.0, 1.0]"
        );

        // Evolution validation
        crate::ensure_config!(
            evolution.tournament_size > 0,
            "Tournament size must be positive"
        );
        crate::ensure_config!(
            evolution.tournament_size <= world.population_size,
            "Tournament size {} exceeds population size {}",
            evolution.tournament_size,
            world.population_size
        );
        crate::ensure_config!(
            evolution.elite_per_species * 2 <= world.population_size,
            "Elite count {} per species exceeds population size {}",
            evolution.elite_per_species,
            world.population_size
        );
        crate::ensure_config!(
            evolution.min_species_floor <= world.population_size,
            "Species floor {} exceeds population size {}",
            evolution.min_species_floor,
            world.population_size
        );
        crate::ensure_config!(
            unit(evolution.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        crate::ensure_config!(
            unit(evolution.trait_mutation_rate),
            "Trait mutation rate must be in [0.0, 1.0]"
        );
        crate::ensure_config!(
            unit(evolution.species_flip_probability),
            "Species flip probability must be in [0.0, 1.0]"
        );
        crate::ensure_config!(
            evolution.mutation_strength >= 0.0 && evolution.trait_mutation_strength >= 0.0,
            "Mutation strength must be non-negative"
        );
        crate::ensure_config!(
            evolution.adaptive_mutation_multiplier >= 1.0,
            "Adaptive mutation multiplier must be at least 1.0"
        );

        // Ecosystem validation
        let eco = &self.ecosystem;
        crate::ensure_config!(
            eco.min_plant_multiplier <= eco.max_plant_multiplier,
            "Plant multiplier bounds are inverted"
        );
        crate::ensure_config!(
            unit(eco.herbivore_penalty) && unit(eco.predator_penalty),
            "Population penalties must be in [0.0, 1.0]"
        );
        crate::ensure_config!(
            unit(self.combat.kill_energy_fraction),
            "Kill energy fraction must be in [0.0, 1.0]"
        );

        // Agent validation
        crate::ensure_config!(
            unit(self.agent.friction),
            "Friction must be in [0.0, 1.0]"
        );
        crate::ensure_config!(
            self.agent.obstacle_min_radius <= self.agent.obstacle_max_radius,
            "Obstacle radius bounds are inverted"
        );
        crate::ensure_config!(
            self.agent.obstacle_min_radius >= 0.0 && self.agent.obstacle_max_radius.is_finite(),
            "Obstacle radii must be finite and non-negative"
        );

        crate::ensure_config!(
            self.brain.hidden_layers.iter().all(|&n| n > 0),
            "Hidden layer sizes must be positive"
        );

        Ok(())
    }

    /// Loads and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)
            .map_err(|e| SimError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Stable hash of the rule sections, used to tag snapshots and logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.agent).as_bytes());
        hasher.update(format!("{:?}", self.combat).as_bytes());
        hasher.update(format!("{:?}", self.ecosystem).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.brain).as_bytes());
        hex::encode(hasher.finalize())
    }
}

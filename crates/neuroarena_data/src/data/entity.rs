use super::brain::NeuralNetwork;
use super::traits::{DerivedStats, Traits};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Sub-species of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Hunts prey and eats meat.
    Predator,
    /// Grazes on plants.
    Prey,
}

impl Species {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Species::Predator => Species::Prey,
            Species::Prey => Species::Predator,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Species::Predator => "predator",
            Species::Prey => "prey",
        }
    }
}

/// Cone sensor offsets relative to heading: front, right, back, left.
pub const SENSOR_DIRECTIONS: [f64; 4] = [0.0, FRAC_PI_2, PI, -FRAC_PI_2];

/// Normalized readings of the four directional cones from the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SensorReadings {
    /// Nearest edible food per direction (`1 - d/range`, 0 when none).
    pub food: [f32; 4],
    /// Nearest other living agent per direction.
    pub creatures: [f32; 4],
}

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Starved,
    Hunted,
}

/// An autonomous organism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// World-scoped identity.
    pub id: u64,
    /// Generation the agent was born into.
    pub generation: u32,
    pub species: Species,
    pub x: f64,
    pub y: f64,
    /// Heading in radians.
    pub heading: f64,
    /// Signed scalar speed along the heading.
    pub speed: f64,
    pub energy: f64,
    pub fitness: f64,
    pub traits: Traits,
    pub stats: DerivedStats,
    pub brain: NeuralNetwork,
    pub kills: u32,
    /// Ticks until the next attack is allowed.
    pub attack_cooldown: f64,
    pub sensors: SensorReadings,
    /// Carried over verbatim from the previous generation.
    pub is_elite: bool,
    pub alive: bool,
    /// Death was caused by a predator.
    pub killed: bool,
    /// Death has already been reported to the world.
    pub death_recorded: bool,
    pub food_eaten: u32,
    pub distance_traveled: f64,
    pub ticks_alive: u64,
}

impl Agent {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn is_predator(&self) -> bool {
        self.species == Species::Predator
    }

    #[must_use]
    pub fn energy_ratio(&self) -> f64 {
        if self.stats.max_energy > 0.0 {
            self.energy / self.stats.max_energy
        } else {
            0.0
        }
    }
}

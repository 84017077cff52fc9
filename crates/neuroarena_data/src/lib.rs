//! Plain data types shared by the neuroarena simulation.
//!
//! Everything here is serde-serializable and free of simulation logic; the
//! behavior lives in `neuroarena_core` as extension traits and systems over
//! these structs.

pub mod data;

pub use data::brain::{Layer, NeuralNetwork};
pub use data::entity::{Agent, DeathCause, SensorReadings, Species, SENSOR_DIRECTIONS};
pub use data::food::{Food, FoodKind, Obstacle};
pub use data::stats::PopulationStats;
pub use data::traits::{
    DerivedStats, TraitId, TraitRange, Traits, PREDATOR_AGGRESSION, PREY_AGGRESSION,
};

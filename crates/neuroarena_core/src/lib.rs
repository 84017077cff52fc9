//! # Neuroarena Core
//!
//! The simulation engine for neuroarena: a closed population of predator and
//! prey agents, each steered by its own feedforward network, evolving through
//! a genetic algorithm over network weights and heritable traits.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Feedforward networks and flat weight import/export
//! - Trait generation, recombination, and the trait to stats mapping
//! - The per-tick sense, think, act, physics, eat loop
//! - Combat, resource balancing, and generation turnover
//! - Snapshots, event sinks, and structured logging
//!
//! ## Example
//!
//! ```
//! use neuroarena_core::brain::{NetworkLogic, AGENT_INPUTS, AGENT_OUTPUTS};
//! use neuroarena_data::NeuralNetwork;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let brain = NeuralNetwork::new_random_with_rng(AGENT_INPUTS, &[16, 8], AGENT_OUTPUTS, 1.0, &mut rng);
//!
//! let outputs = brain.forward(&[0.5; AGENT_INPUTS]);
//! assert_eq!(outputs.len(), AGENT_OUTPUTS);
//! assert!(outputs.iter().all(|o| (-1.0..=1.0).contains(o)));
//! ```

/// Per-tick agent behavior: sensing, steering, physics, feeding
pub mod agent;
/// Feedforward networks: inference, flat weights, crossover, mutation
pub mod brain;
/// Configuration management for simulation parameters
pub mod config;
/// Plant quota, meat decay, and overpopulation penalty
pub mod ecosystem;
/// Error types
pub mod error;
/// Generation turnover via the genetic algorithm
pub mod evolution;
/// Heritable traits and derived physical stats
pub mod genetics;
/// Evolutionary event sinks
pub mod history;
/// Combat between predators and prey
pub mod interaction;
/// Agent construction and id allocation
pub mod lifecycle;
/// Update timing and logging setup
pub mod metrics;
/// World persistence
pub mod snapshot;
/// Population statistics
pub mod stats;
/// The tick scheduler
pub mod world;

pub use error::{Result, SimError};
pub use world::World;

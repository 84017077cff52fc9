//! Core data structures for the neuroarena simulation.

pub mod brain;
pub mod entity;
pub mod food;
pub mod stats;
pub mod traits;

pub mod app;
pub mod model;

pub use app::{App, RunOptions, RunSummary};
pub use neuroarena_core::{Result, SimError, World};

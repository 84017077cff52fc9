//! The arena: owns every agent, food item and obstacle, and drives ticks,
//! resource balancing, and generation turnover.

use crate::config::AppConfig;
use crate::error::Result;
use crate::history::{EvolutionLog, TracingLog};
use crate::lifecycle::AgentFactory;
use crate::metrics::Metrics;
use crate::stats;
use neuroarena_data::{Agent, Food, Obstacle, PopulationStats};
use rand_chacha::ChaCha8Rng;

pub mod finalize;
pub mod init;
pub mod update;

/// Highest accepted ticks-per-update multiplier.
pub const MAX_SPEED: u32 = 10;

pub struct World {
    pub width: f64,
    pub height: f64,
    pub tick: u64,
    pub generation: u32,
    pub config: AppConfig,
    pub agents: Vec<Agent>,
    pub food: Vec<Food>,
    pub obstacles: Vec<Obstacle>,
    pub paused: bool,
    /// Ticks advanced per `update` call.
    pub speed: u32,
    pub rng: ChaCha8Rng,
    pub factory: AgentFactory,
    /// Summary of the last completed generation.
    pub last_generation: Option<PopulationStats>,
    pub metrics: Metrics,
    pub(crate) logger: Box<dyn EvolutionLog>,
}

impl World {
    /// Replaces the event sink. Events go to `tracing` by default.
    #[must_use]
    pub fn with_logger(mut self, logger: Box<dyn EvolutionLog>) -> Self {
        self.logger = logger;
        self
    }

    pub fn set_logger(&mut self, logger: Box<dyn EvolutionLog>) {
        self.logger = logger;
    }

    /// Hands back the current sink, leaving a tracing one in its place.
    pub fn take_logger(&mut self) -> Box<dyn EvolutionLog> {
        std::mem::replace(&mut self.logger, Box::new(TracingLog))
    }

    /// Flips the pause flag and returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        tracing::debug!(paused = self.paused, "Pause toggled");
        self.paused
    }

    /// Sets ticks per update, clamped to `1..=MAX_SPEED`.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(1, MAX_SPEED);
    }

    /// Changes the arena boundary only. Agents outside wrap on their next
    /// move.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        crate::ensure_config!(
            width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite(),
            "Arena dimensions must be positive, got {width}x{height}"
        );
        self.width = width;
        self.height = height;
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> PopulationStats {
        stats::compute(&self.agents, &self.food, self.generation, self.tick)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    #[must_use]
    pub fn find_agent(&self, id: u64) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }
}

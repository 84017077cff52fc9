//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and timing of `World::update` calls.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Update timing and named event counters.
#[derive(Debug)]
pub struct Metrics {
    update_count: u64,
    alive_count: usize,
    food_count: usize,
    total_update_time: Duration,
    counters: HashMap<String, u64>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            update_count: 0,
            alive_count: 0,
            food_count: 0,
            total_update_time: Duration::ZERO,
            counters: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Records a completed update call with its duration.
    pub fn record_update(&mut self, duration: Duration, alive: usize, food: usize) {
        self.update_count += 1;
        self.alive_count = alive;
        self.food_count = food;
        self.total_update_time += duration;

        // Log at info level every 1000 updates
        if self.update_count % 1000 == 0 {
            tracing::info!(
                updates = self.update_count,
                alive,
                food,
                duration_us = duration.as_micros() as u64,
                mean_us = self.mean_update_time().as_micros() as u64,
                "Simulation update"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&mut self, name: &str) {
        *self.counters.entry(name.to_string()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    #[must_use]
    pub fn food_count(&self) -> usize {
        self.food_count
    }

    #[must_use]
    pub fn mean_update_time(&self) -> Duration {
        if self.update_count == 0 {
            Duration::ZERO
        } else {
            let nanos = self.total_update_time.as_nanos() / u128::from(self.update_count);
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a global fmt subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}

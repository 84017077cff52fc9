use anyhow::{Context, Result};
use neuroarena_core::config::AppConfig;
use neuroarena_core::history::JsonlLog;
use neuroarena_core::snapshot::WorldSnapshot;
use neuroarena_core::World;
use neuroarena_data::PopulationStats;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Options for a headless run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    /// Generations to complete before stopping.
    pub generations: u32,
    /// Overrides the configured seed. Ignored when resuming.
    pub seed: Option<u64>,
    pub speed: Option<u32>,
    /// Directory for the JSONL event history.
    pub history: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub load: Option<PathBuf>,
}

/// What a finished run reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub fingerprint: String,
    pub start_generation: u32,
    pub generations: Vec<PopulationStats>,
    pub final_stats: PopulationStats,
}

/// Reads a TOML configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    AppConfig::from_toml(&content)
        .with_context(|| format!("Invalid config {}", path.display()))
}

pub struct App {
    pub world: World,
    pub start_generation: u32,
    pub target_generation: u32,
    pub completed: Vec<PopulationStats>,
    save: Option<PathBuf>,
}

impl App {
    pub fn new(options: &RunOptions) -> Result<Self> {
        let mut world = match &options.load {
            Some(path) => {
                if options.seed.is_some() {
                    tracing::warn!("Seed override ignored when resuming a snapshot");
                }
                let snapshot = WorldSnapshot::load(path)
                    .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
                World::restore(snapshot)?
            }
            None => {
                let mut config = load_config(options.config.as_deref())?;
                if let Some(seed) = options.seed {
                    config.world.seed = Some(seed);
                }
                World::new(config)?
            }
        };

        if let Some(speed) = options.speed {
            world.set_speed(speed);
        }
        if world.paused {
            world.toggle_pause();
        }
        if let Some(dir) = &options.history {
            let log = JsonlLog::new_at(dir)
                .with_context(|| format!("Failed to open history in {}", dir.display()))?;
            world.set_logger(Box::new(log));
        }

        let start_generation = world.generation;
        Ok(Self {
            world,
            start_generation,
            target_generation: start_generation.saturating_add(options.generations),
            completed: Vec::new(),
            save: options.save.clone(),
        })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.world.generation >= self.target_generation
    }

    /// Runs one world update and collects the summary of any generation that
    /// ended during it.
    pub fn step(&mut self) {
        let before = self.world.generation;
        self.world.update();
        if self.world.generation > before {
            if let Some(stats) = &self.world.last_generation {
                self.completed.push(stats.clone());
            }
        }
    }

    pub fn run(mut self) -> Result<RunSummary> {
        tracing::info!(
            from = self.start_generation,
            to = self.target_generation,
            speed = self.world.speed,
            "Headless run started"
        );
        while !self.is_finished() {
            self.step();
        }

        if let Some(path) = &self.save {
            self.world
                .snapshot()
                .save(path)
                .with_context(|| format!("Failed to save snapshot {}", path.display()))?;
            tracing::info!(path = %path.display(), "Snapshot saved");
        }

        Ok(RunSummary {
            fingerprint: self.world.config.fingerprint(),
            start_generation: self.start_generation,
            final_stats: self.world.stats(),
            generations: self.completed,
        })
    }
}

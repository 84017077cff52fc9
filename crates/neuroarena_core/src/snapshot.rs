//! Persistence contract for a running world.
//!
//! A [`WorldSnapshot`] carries everything needed to resume a world and
//! reproduce its subsequent ticks exactly: configuration, counters, the RNG
//! stream position, and every agent with its network flattened through
//! [`NetworkLogic::weights`]. Files are JSON, gzip-compressed on save.

use crate::brain::NetworkLogic;
use crate::config::AppConfig;
use crate::error::{Result, SimError};
use crate::genetics::TraitLogic;
use crate::history::TracingLog;
use crate::lifecycle::AgentFactory;
use crate::metrics::Metrics;
use crate::world::World;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use neuroarena_data::{
    Agent, Food, NeuralNetwork, Obstacle, PopulationStats, SensorReadings, Species, Traits,
};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub const SNAPSHOT_VERSION: u32 = 1;

/// One agent, network included as architecture plus flat weights.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentRecord {
    pub id: u64,
    pub generation: u32,
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub speed: f64,
    pub energy: f64,
    pub fitness: f64,
    pub traits: Traits,
    pub kills: u32,
    pub attack_cooldown: f64,
    pub sensors: SensorReadings,
    pub is_elite: bool,
    pub alive: bool,
    pub killed: bool,
    pub death_recorded: bool,
    pub food_eaten: u32,
    pub distance_traveled: f64,
    pub ticks_alive: u64,
    pub inputs: usize,
    pub hidden: Vec<usize>,
    pub outputs: usize,
    pub weights: Vec<f32>,
}

impl AgentRecord {
    #[must_use]
    pub fn capture(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            generation: agent.generation,
            species: agent.species,
            x: agent.x,
            y: agent.y,
            heading: agent.heading,
            speed: agent.speed,
            energy: agent.energy,
            fitness: agent.fitness,
            traits: agent.traits,
            kills: agent.kills,
            attack_cooldown: agent.attack_cooldown,
            sensors: agent.sensors,
            is_elite: agent.is_elite,
            alive: agent.alive,
            killed: agent.killed,
            death_recorded: agent.death_recorded,
            food_eaten: agent.food_eaten,
            distance_traveled: agent.distance_traveled,
            ticks_alive: agent.ticks_alive,
            inputs: agent.brain.inputs,
            hidden: agent.brain.hidden.clone(),
            outputs: agent.brain.outputs,
            weights: agent.brain.weights(),
        }
    }

    /// Rebuilds the agent. Weights must fit the recorded architecture;
    /// out-of-range traits are clamped and derived stats recomputed.
    pub fn restore(&self) -> Result<Agent> {
        let mut brain = NeuralNetwork::zeroed(self.inputs, &self.hidden, self.outputs);
        brain.set_weights(&self.weights)?;

        let traits = self.traits.clamped();
        if traits != self.traits {
            tracing::warn!(
                id = self.id,
                recorded = ?self.traits,
                clamped = ?traits,
                "Imported traits out of range, clamped"
            );
        }

        Ok(Agent {
            id: self.id,
            generation: self.generation,
            species: self.species,
            x: self.x,
            y: self.y,
            heading: self.heading,
            speed: self.speed,
            energy: self.energy,
            fitness: self.fitness,
            traits,
            stats: traits.derive_stats(),
            brain,
            kills: self.kills,
            attack_cooldown: self.attack_cooldown,
            sensors: self.sensors,
            is_elite: self.is_elite,
            alive: self.alive,
            killed: self.killed,
            death_recorded: self.death_recorded,
            food_eaten: self.food_eaten,
            distance_traveled: self.distance_traveled,
            ticks_alive: self.ticks_alive,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub version: u32,
    /// Hash of the rule sections at capture time.
    pub fingerprint: String,
    pub config: AppConfig,
    pub tick: u64,
    pub generation: u32,
    pub width: f64,
    pub height: f64,
    pub paused: bool,
    pub speed: u32,
    pub next_id: u64,
    pub rng: ChaCha8Rng,
    pub agents: Vec<AgentRecord>,
    pub food: Vec<Food>,
    pub obstacles: Vec<Obstacle>,
    pub last_generation: Option<PopulationStats>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SimError::serialization(format!(
                "Unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }

    /// Writes gzip-compressed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(self.to_json()?.as_bytes())?;
        encoder.finish()?.flush()?;
        Ok(())
    }

    /// Reads a snapshot written by [`WorldSnapshot::save`]. Plain JSON files
    /// are accepted too.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut decoder = GzDecoder::new(BufReader::new(File::open(path)?));
        let mut json = String::new();
        if decoder.read_to_string(&mut json).is_err() {
            json = std::fs::read_to_string(path)?;
        }
        Self::from_json(&json)
    }
}

impl World {
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            version: SNAPSHOT_VERSION,
            fingerprint: self.config.fingerprint(),
            config: self.config.clone(),
            tick: self.tick,
            generation: self.generation,
            width: self.width,
            height: self.height,
            paused: self.paused,
            speed: self.speed,
            next_id: self.factory.peek_id(),
            rng: self.rng.clone(),
            agents: self.agents.iter().map(AgentRecord::capture).collect(),
            food: self.food.clone(),
            obstacles: self.obstacles.clone(),
            last_generation: self.last_generation.clone(),
        }
    }

    /// Rebuilds a world from a snapshot. The event sink starts as tracing.
    pub fn restore(snapshot: WorldSnapshot) -> Result<Self> {
        snapshot.config.validate()?;
        let fingerprint = snapshot.config.fingerprint();
        if fingerprint != snapshot.fingerprint {
            tracing::warn!(
                recorded = %snapshot.fingerprint,
                actual = %fingerprint,
                "Snapshot fingerprint does not match its configuration"
            );
        }
        crate::ensure_config!(
            snapshot.width > 0.0 && snapshot.height > 0.0,
            "Snapshot arena dimensions must be positive"
        );

        let agents = snapshot
            .agents
            .iter()
            .map(AgentRecord::restore)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            generation = snapshot.generation,
            tick = snapshot.tick,
            agents = agents.len(),
            "World restored"
        );

        Ok(World {
            width: snapshot.width,
            height: snapshot.height,
            tick: snapshot.tick,
            generation: snapshot.generation,
            config: snapshot.config,
            agents,
            food: snapshot.food,
            obstacles: snapshot.obstacles,
            paused: snapshot.paused,
            speed: snapshot.speed.clamp(1, crate::world::MAX_SPEED),
            rng: snapshot.rng,
            factory: AgentFactory::new(snapshot.next_id),
            last_generation: snapshot.last_generation,
            metrics: Metrics::new(),
            logger: Box::new(TracingLog),
        })
    }
}

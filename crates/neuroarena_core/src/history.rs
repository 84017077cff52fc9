//! Observer hooks for evolutionary events.
//!
//! The engine reports elites, births, deaths, kills and generation summaries
//! through [`EvolutionLog`]. Every method has a no-op default, and a sink's
//! failures never reach the simulation.

use crate::error::Result;
use neuroarena_data::{Agent, DeathCause, PopulationStats, Species};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Sink for evolutionary events.
pub trait EvolutionLog {
    fn log_elite(&mut self, _agent: &Agent, _generation: u32) {}

    /// `parents` is `None` for floor-rescue clones seeded from one template.
    fn log_birth(&mut self, _child: &Agent, _parents: Option<(u64, u64)>, _generation: u32) {}

    fn log_death(&mut self, _agent: &Agent, _cause: DeathCause, _tick: u64) {}

    fn log_kill(&mut self, _killer: &Agent, _victim: &Agent, _tick: u64) {}

    fn log_generation(&mut self, _stats: &PopulationStats) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl EvolutionLog for NullLog {}

/// One line of the JSONL history file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum LiveEvent {
    Elite {
        id: u64,
        species: Species,
        fitness: f64,
        generation: u32,
        timestamp: String,
    },
    Birth {
        id: u64,
        parents: Option<(u64, u64)>,
        species: Species,
        generation: u32,
        timestamp: String,
    },
    Death {
        id: u64,
        species: Species,
        cause: DeathCause,
        fitness: f64,
        tick: u64,
        timestamp: String,
    },
    Kill {
        killer: u64,
        victim: u64,
        tick: u64,
        timestamp: String,
    },
    Generation {
        stats: PopulationStats,
        timestamp: String,
    },
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl LiveEvent {
    #[must_use]
    pub fn elite(agent: &Agent, generation: u32) -> Self {
        LiveEvent::Elite {
            id: agent.id,
            species: agent.species,
            fitness: agent.fitness,
            generation,
            timestamp: now(),
        }
    }

    #[must_use]
    pub fn birth(child: &Agent, parents: Option<(u64, u64)>, generation: u32) -> Self {
        LiveEvent::Birth {
            id: child.id,
            parents,
            species: child.species,
            generation,
            timestamp: now(),
        }
    }

    #[must_use]
    pub fn death(agent: &Agent, cause: DeathCause, tick: u64) -> Self {
        LiveEvent::Death {
            id: agent.id,
            species: agent.species,
            cause,
            fitness: agent.fitness,
            tick,
            timestamp: now(),
        }
    }

    #[must_use]
    pub fn kill(killer: &Agent, victim: &Agent, tick: u64) -> Self {
        LiveEvent::Kill {
            killer: killer.id,
            victim: victim.id,
            tick,
            timestamp: now(),
        }
    }

    #[must_use]
    pub fn generation(stats: &PopulationStats) -> Self {
        LiveEvent::Generation {
            stats: stats.clone(),
            timestamp: now(),
        }
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl EvolutionLog for TracingLog {
    fn log_elite(&mut self, agent: &Agent, generation: u32) {
        tracing::debug!(
            id = agent.id,
            species = agent.species.label(),
            fitness = agent.fitness,
            generation,
            "Elite carried over"
        );
    }

    fn log_birth(&mut self, child: &Agent, parents: Option<(u64, u64)>, generation: u32) {
        tracing::trace!(
            id = child.id,
            species = child.species.label(),
            ?parents,
            generation,
            "Offspring born"
        );
    }

    fn log_death(&mut self, agent: &Agent, cause: DeathCause, tick: u64) {
        tracing::debug!(
            id = agent.id,
            species = agent.species.label(),
            ?cause,
            tick,
            "Agent died"
        );
    }

    fn log_kill(&mut self, killer: &Agent, victim: &Agent, tick: u64) {
        tracing::debug!(
            killer = killer.id,
            victim = victim.id,
            streak = killer.kills,
            tick,
            "Prey hunted"
        );
    }

    fn log_generation(&mut self, stats: &PopulationStats) {
        tracing::info!(
            generation = stats.generation,
            alive = stats.alive,
            predators = stats.predators,
            prey = stats.prey,
            avg_fitness = stats.avg_fitness,
            max_fitness = stats.max_fitness,
            kills = stats.total_kills,
            "Generation complete"
        );
    }
}

/// Keeps every event in memory. Clones share one buffer, so a handle kept
/// outside the world sees what the world logged.
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    events: Rc<RefCell<Vec<LiveEvent>>>,
}

impl MemoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<LiveEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: LiveEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl EvolutionLog for MemoryLog {
    fn log_elite(&mut self, agent: &Agent, generation: u32) {
        self.push(LiveEvent::elite(agent, generation));
    }

    fn log_birth(&mut self, child: &Agent, parents: Option<(u64, u64)>, generation: u32) {
        self.push(LiveEvent::birth(child, parents, generation));
    }

    fn log_death(&mut self, agent: &Agent, cause: DeathCause, tick: u64) {
        self.push(LiveEvent::death(agent, cause, tick));
    }

    fn log_kill(&mut self, killer: &Agent, victim: &Agent, tick: u64) {
        self.push(LiveEvent::kill(killer, victim, tick));
    }

    fn log_generation(&mut self, stats: &PopulationStats) {
        self.push(LiveEvent::generation(stats));
    }
}

/// Appends events as JSON lines to `<dir>/live.jsonl`.
pub struct JsonlLog {
    file: BufWriter<File>,
    path: PathBuf,
}

impl JsonlLog {
    pub fn new_at(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join("live.jsonl");
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file: BufWriter::new(file),
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_event(&mut self, event: &LiveEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.file, "{json}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn record(&mut self, event: LiveEvent) {
        if let Err(e) = self.write_event(&event) {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to write history event");
        }
    }

    /// Reads back every event in a history file, skipping malformed lines.
    pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<LiveEvent>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(reader
            .lines()
            .map_while(std::io::Result::ok)
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect())
    }
}

impl EvolutionLog for JsonlLog {
    fn log_elite(&mut self, agent: &Agent, generation: u32) {
        self.record(LiveEvent::elite(agent, generation));
    }

    fn log_birth(&mut self, child: &Agent, parents: Option<(u64, u64)>, generation: u32) {
        self.record(LiveEvent::birth(child, parents, generation));
    }

    fn log_death(&mut self, agent: &Agent, cause: DeathCause, tick: u64) {
        self.record(LiveEvent::death(agent, cause, tick));
    }

    fn log_kill(&mut self, killer: &Agent, victim: &Agent, tick: u64) {
        self.record(LiveEvent::kill(killer, victim, tick));
    }

    fn log_generation(&mut self, stats: &PopulationStats) {
        self.record(LiveEvent::generation(stats));
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Failed to flush history log");
        }
    }
}

impl Drop for JsonlLog {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{AGENT_INPUTS, AGENT_OUTPUTS};
    use crate::lifecycle::spawn;
    use neuroarena_data::{NeuralNetwork, Traits};

    fn sample() -> Agent {
        let brain = NeuralNetwork::zeroed(AGENT_INPUTS, &[2], AGENT_OUTPUTS);
        spawn(42, 3, Species::Predator, Traits::default(), brain)
    }

    #[test]
    fn test_live_event_tagged_json() {
        let json = serde_json::to_string(&LiveEvent::elite(&sample(), 3)).unwrap();
        assert!(json.contains("\"event\":\"Elite\""));
        assert!(json.contains("\"id\":42"));
    }

    #[test]
    fn test_jsonl_log_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let agent = sample();
        {
            let mut log = JsonlLog::new_at(dir.path()).unwrap();
            log.log_death(&agent, DeathCause::Starved, 17);
            log.log_generation(&PopulationStats {
                generation: 3,
                ..Default::default()
            });
        }
        let events = JsonlLog::read_events(dir.path().join("live.jsonl")).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            LiveEvent::Death {
                id: 42,
                cause: DeathCause::Starved,
                tick: 17,
                ..
            }
        ));
        assert!(matches!(&events[1], LiveEvent::Generation { stats, .. } if stats.generation == 3));
    }

    #[test]
    fn test_memory_log_clones_share_events() {
        let handle = MemoryLog::new();
        let mut sink: Box<dyn EvolutionLog> = Box::new(handle.clone());
        sink.log_elite(&sample(), 1);
        assert_eq!(handle.len(), 1);
        assert!(matches!(handle.events()[0], LiveEvent::Elite { id: 42, .. }));
    }

    #[test]
    fn test_null_log_accepts_everything() {
        let agent = sample();
        let mut log = NullLog;
        log.log_kill(&agent, &agent, 1);
        log.log_generation(&PopulationStats::default());
    }
}

use crate::brain::{NetworkLogic, AGENT_INPUTS, AGENT_OUTPUTS};
use crate::config::AppConfig;
use crate::genetics::TraitLogic;
use neuroarena_data::{Agent, NeuralNetwork, SensorReadings, Species, Traits};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Builds a fresh agent at the origin with full energy and zero fitness.
#[must_use]
pub fn spawn(
    id: u64,
    generation: u32,
    species: Species,
    traits: Traits,
    brain: NeuralNetwork,
) -> Agent {
    let traits = traits.clamped();
    let stats = traits.derive_stats();
    Agent {
        id,
        generation,
        species,
        x: 0.0,
        y: 0.0,
        heading: 0.0,
        speed: 0.0,
        energy: stats.max_energy,
        fitness: 0.0,
        traits,
        stats,
        brain,
        kills: 0,
        attack_cooldown: 0.0,
        sensors: SensorReadings::default(),
        is_elite: false,
        alive: true,
        killed: false,
        death_recorded: false,
        food_eaten: 0,
        distance_traveled: 0.0,
        ticks_alive: 0,
    }
}

/// Places an agent uniformly in the arena with a random heading.
pub fn scatter_with_rng<R: Rng>(agent: &mut Agent, width: f64, height: f64, rng: &mut R) {
    agent.x = rng.gen_range(0.0..width.max(f64::MIN_POSITIVE));
    agent.y = rng.gen_range(0.0..height.max(f64::MIN_POSITIVE));
    agent.heading = rng.gen_range(0.0..TAU);
}

/// Hands out world-scoped agent ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFactory {
    next_id: u64,
}

impl Default for AgentFactory {
    fn default() -> Self {
        Self::new(1)
    }
}

impl AgentFactory {
    #[must_use]
    pub fn new(next_id: u64) -> Self {
        Self { next_id }
    }

    /// Id the next created agent will receive.
    #[must_use]
    pub fn peek_id(&self) -> u64 {
        self.next_id
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn create(
        &mut self,
        species: Species,
        traits: Traits,
        brain: NeuralNetwork,
        generation: u32,
    ) -> Agent {
        spawn(self.next_id(), generation, species, traits, brain)
    }

    /// Random traits biased by species, and a freshly initialized brain.
    pub fn create_random_with_rng<R: Rng>(
        &mut self,
        species: Species,
        config: &AppConfig,
        generation: u32,
        rng: &mut R,
    ) -> Agent {
        let traits = Traits::generate_with_rng(species == Species::Predator, rng);
        let brain = NeuralNetwork::new_random_with_rng(
            AGENT_INPUTS,
            &config.brain.hidden_layers,
            AGENT_OUTPUTS,
            config.brain.init_weight_range,
            rng,
        );
        let mut agent = self.create(species, traits, brain, generation);
        scatter_with_rng(&mut agent, config.world.width, config.world.height, rng);
        agent
    }
}

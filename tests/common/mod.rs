use neuroarena_lib::model::brain::{NeuralNetwork, AGENT_INPUTS, AGENT_OUTPUTS};
use neuroarena_lib::model::config::AppConfig;
use neuroarena_lib::model::data::{Agent, Food, Species, Traits};
use neuroarena_lib::model::lifecycle::spawn;
use neuroarena_lib::model::world::World;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Small seeded arena that evolves quickly.
#[allow(dead_code)]
pub fn test_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.population_size = 16;
    config.world.food_count = 30;
    config.world.meat_count = 4;
    config.world.obstacle_count = 3;
    config.world.generation_length = 120;
    config.world.seed = Some(seed);
    config
}

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Option<Vec<Agent>>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            config: test_config(42),
            agents: None,
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Replaces the seeded population with hand-built agents.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.get_or_insert_with(Vec::new).push(agent);
        self
    }

    pub fn without_obstacles(mut self) -> Self {
        self.mods.push(Box::new(|world| world.obstacles.clear()));
        self
    }

    pub fn without_food(mut self) -> Self {
        self.mods.push(Box::new(|world| world.food.clear()));
        self
    }

    pub fn with_food(mut self, food: Food) -> Self {
        self.mods.push(Box::new(move |world| world.food.push(food)));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        if let Some(agents) = self.agents {
            world.agents = agents;
        }
        for modifier in self.mods {
            modifier(&mut world);
        }
        world
    }
}

/// Builds agents with a zeroed brain: every output is `tanh(0) = 0`, so they
/// neither move nor ask to attack.
#[allow(dead_code)]
pub struct AgentBuilder {
    id: u64,
    species: Species,
    traits: Traits,
    x: f64,
    y: f64,
    energy: Option<f64>,
    fitness: f64,
    kills: u32,
}

#[allow(dead_code)]
impl AgentBuilder {
    pub fn new(id: u64, species: Species) -> Self {
        Self {
            id,
            species,
            traits: Traits::default(),
            x: 100.0,
            y: 100.0,
            energy: None,
            fitness: 0.0,
            kills: 0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn traits(mut self, traits: Traits) -> Self {
        self.traits = traits;
        self
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn fitness(mut self, fitness: f64) -> Self {
        self.fitness = fitness;
        self
    }

    pub fn kills(mut self, kills: u32) -> Self {
        self.kills = kills;
        self
    }

    pub fn build(self) -> Agent {
        let brain = NeuralNetwork::zeroed(AGENT_INPUTS, &[16, 8], AGENT_OUTPUTS);
        let mut agent = spawn(self.id, 0, self.species, self.traits, brain);
        agent.x = self.x;
        agent.y = self.y;
        if let Some(energy) = self.energy {
            agent.energy = energy;
        }
        agent.fitness = self.fitness;
        agent.kills = self.kills;
        agent
    }
}

use crate::config::{AppConfig, WorldConfig};
use crate::ecosystem;
use crate::error::Result;
use crate::history::TracingLog;
use crate::lifecycle::AgentFactory;
use crate::metrics::Metrics;
use crate::world::World;
use neuroarena_data::{Agent, Obstacle, Species};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl World {
    /// Builds a seeded arena: obstacles, generation-0 population, food.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let mut world = Self {
            width: config.world.width,
            height: config.world.height,
            tick: 0,
            generation: 0,
            rng: make_rng(config.world.seed),
            config,
            agents: Vec::new(),
            food: Vec::new(),
            obstacles: Vec::new(),
            paused: false,
            speed: 1,
            factory: AgentFactory::default(),
            last_generation: None,
            metrics: Metrics::new(),
            logger: Box::new(TracingLog),
        };
        world.populate();
        tracing::info!(
            population = world.agents.len(),
            obstacles = world.obstacles.len(),
            food = world.food.len(),
            fingerprint = %world.config.fingerprint(),
            "World created"
        );
        Ok(world)
    }

    /// Restarts from generation 0 with a new arena layout. The rest of the
    /// configuration is kept. Fails without touching the world when the
    /// resulting configuration is invalid.
    pub fn reset_to_config(&mut self, world: WorldConfig) -> Result<()> {
        let mut candidate = self.config.clone();
        candidate.world = world;
        candidate.validate()?;

        self.config = candidate;
        self.rng = make_rng(self.config.world.seed);
        self.width = self.config.world.width;
        self.height = self.config.world.height;
        self.tick = 0;
        self.generation = 0;
        self.factory = AgentFactory::default();
        self.last_generation = None;
        self.populate();
        tracing::info!(
            population = self.agents.len(),
            width = self.width,
            height = self.height,
            "World reset"
        );
        Ok(())
    }

    fn populate(&mut self) {
        self.obstacles = self.generate_obstacles();
        self.agents = self.seed_agents();
        self.layout_food();
    }

    fn generate_obstacles(&mut self) -> Vec<Obstacle> {
        let (min_radius, max_radius) = (
            self.config.agent.obstacle_min_radius,
            self.config.agent.obstacle_max_radius,
        );
        let mut obstacles = Vec::with_capacity(self.config.world.obstacle_count);
        for _ in 0..self.config.world.obstacle_count {
            obstacles.push(Obstacle {
                x: self.rng.gen_range(0.0..self.width),
                y: self.rng.gen_range(0.0..self.height),
                radius: self.rng.gen_range(min_radius..=max_radius),
            });
        }
        obstacles
    }

    /// Fresh random generation-0 population split by `predator_ratio`.
    pub(crate) fn seed_agents(&mut self) -> Vec<Agent> {
        let size = self.config.world.population_size;
        let predators = (size as f64 * self.config.world.predator_ratio).round() as usize;
        let mut agents = Vec::with_capacity(size);
        for i in 0..size {
            let species = if i < predators {
                Species::Predator
            } else {
                Species::Prey
            };
            let mut agent = self.factory.create_random_with_rng(
                species,
                &self.config,
                self.generation,
                &mut self.rng,
            );
            self.place(&mut agent);
            agents.push(agent);
        }
        agents
    }

    /// Random open position and heading, full energy.
    pub(crate) fn place(&mut self, agent: &mut Agent) {
        let (x, y) =
            ecosystem::open_position_with_rng(self.width, self.height, &self.obstacles, &mut self.rng);
        agent.x = x;
        agent.y = y;
        agent.heading = self.rng.gen_range(0.0..TAU);
        agent.speed = 0.0;
        agent.energy = agent.stats.max_energy;
    }

    /// Current plant target for the living population.
    #[must_use]
    pub fn plant_quota(&self) -> usize {
        ecosystem::plant_quota(
            self.config.world.food_count,
            ecosystem::herbivore_ratio(&self.agents),
            &self.config.ecosystem,
        )
    }

    /// Discards all food and spawns a fresh layout at the current quota.
    pub(crate) fn layout_food(&mut self) {
        self.food.clear();
        self.replenish_food();
    }

    pub(crate) fn replenish_food(&mut self) {
        let quota = self.plant_quota();
        ecosystem::replenish_with_rng(
            &mut self.food,
            quota,
            self.config.world.meat_count,
            self.width,
            self.height,
            &self.obstacles,
            &self.config.ecosystem,
            &mut self.rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroarena_data::FoodKind;

    fn config(seed: u64) -> AppConfig {
        AppConfig {
            world: WorldConfig {
                population_size: 20,
                predator_ratio: 0.25,
                seed: Some(seed),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_new_world_layout() {
        let world = World::new(config(1)).unwrap();
        assert_eq!(world.agents.len(), 20);
        assert_eq!(world.agents.iter().filter(|a| a.is_predator()).count(), 5);
        assert_eq!(world.obstacles.len(), 6);
        assert!(world.agents.iter().all(|a| a.is_alive() && a.generation == 0));
        let plants = world.food.iter().filter(|f| f.kind == FoodKind::Plant).count();
        assert_eq!(plants, world.plant_quota());
        assert_eq!(world.food.len() - plants, 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config(1);
        bad.world.population_size = 0;
        assert!(World::new(bad).is_err());
    }

    #[test]
    fn test_infinite_arena_rejected_before_layout() {
        let mut bad = config(1);
        bad.world.width = f64::INFINITY;
        assert!(World::new(bad).is_err());

        let mut world = World::new(config(1)).unwrap();
        let next = WorldConfig {
            height: f64::INFINITY,
            ..Default::default()
        };
        assert!(world.reset_to_config(next).is_err());
        assert_eq!(world.height, 800.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = World::new(config(77)).unwrap();
        let b = World::new(config(77)).unwrap();
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.food, b.food);
        assert_eq!(a.agents[0].brain, b.agents[0].brain);
    }

    #[test]
    fn test_reset_to_config() {
        let mut world = World::new(config(2)).unwrap();
        world.tick = 55;
        world.generation = 3;
        let next = WorldConfig {
            population_size: 10,
            width: 500.0,
            height: 400.0,
            seed: Some(5),
            ..Default::default()
        };
        world.reset_to_config(next.clone()).unwrap();
        assert_eq!((world.tick, world.generation), (0, 0));
        assert_eq!(world.agents.len(), 10);
        assert_eq!((world.width, world.height), (500.0, 400.0));
        assert_eq!(world.config.world, next);

        let rejected = WorldConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(world.reset_to_config(rejected).is_err());
        assert_eq!(world.agents.len(), 10);
    }
}

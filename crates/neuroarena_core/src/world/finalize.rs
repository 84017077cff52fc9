use crate::ecosystem;
use crate::evolution::GeneticAlgorithm;
use crate::stats;
use crate::world::World;
use neuroarena_data::PopulationStats;

impl World {
    /// Closes the current generation and seeds the next one in place.
    ///
    /// Survivors bank their remaining energy as fitness, an overpopulated
    /// species is penalized, and the genetic algorithm breeds a population
    /// of the same size. Returns the summary of the generation that ended.
    pub fn end_generation(&mut self) -> PopulationStats {
        self.record_deaths();

        for agent in self.agents.iter_mut().filter(|a| a.is_alive()) {
            agent.fitness += agent.energy.max(0.0);
        }
        let penalized = ecosystem::apply_population_penalty(&mut self.agents, &self.config.ecosystem);
        if !penalized.is_empty() {
            tracing::debug!(
                generation = self.generation,
                species = ?penalized,
                "Overpopulation penalty applied"
            );
        }

        let summary = stats::compute(&self.agents, &self.food, self.generation, self.tick);
        let next_generation = self.generation + 1;

        let algorithm = GeneticAlgorithm::new(&self.config.evolution);
        let offspring = algorithm.evolve(
            &self.agents,
            &mut self.factory,
            self.logger.as_mut(),
            next_generation,
            &mut self.rng,
        );
        let mut next = match offspring {
            Ok(next) => next,
            Err(e) => {
                tracing::error!(error = %e, "Evolution failed, reseeding population");
                self.generation = next_generation;
                self.seed_agents()
            }
        };
        for agent in next.iter_mut() {
            self.place(agent);
        }

        self.agents = next;
        self.tick = 0;
        self.layout_food();
        self.generation = next_generation;

        self.logger.log_generation(&summary);
        self.metrics.increment_counter("generations");
        self.last_generation = Some(summary.clone());
        summary
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{AppConfig, WorldConfig};
    use crate::history::{LiveEvent, MemoryLog};
    use crate::world::World;
    use neuroarena_data::Species;

    fn world() -> World {
        let config = AppConfig {
            world: WorldConfig {
                population_size: 16,
                generation_length: 30,
                seed: Some(21),
                ..Default::default()
            },
            ..Default::default()
        };
        World::new(config).unwrap()
    }

    #[test]
    fn test_generation_rolls_over_at_length() {
        let mut world = world();
        let log = MemoryLog::new();
        world.set_logger(Box::new(log.clone()));
        world.set_speed(10);
        for _ in 0..3 {
            world.update();
        }
        assert_eq!(world.generation, 1);
        assert_eq!(world.tick, 0);
        assert_eq!(world.agents.len(), 16);
        assert!(world.agents.iter().all(|a| a.generation == 1 && a.is_alive()));
        assert!(world
            .agents
            .iter()
            .all(|a| (a.energy - a.stats.max_energy).abs() < 1e-9 && a.fitness == 0.0));
        let summary = world.last_generation.clone().unwrap();
        assert_eq!(summary.generation, 0);
        assert_eq!(summary.tick, 30);
        assert!(log
            .events()
            .iter()
            .any(|e| matches!(e, LiveEvent::Generation { stats, .. } if stats.generation == 0)));
    }

    #[test]
    fn test_extinction_ends_generation_early() {
        let mut world = world();
        for agent in world.agents.iter_mut() {
            agent.species = Species::Prey;
            agent.energy = 1e-9;
        }
        world.update();
        assert_eq!(world.generation, 1);
        assert_eq!(world.alive_count(), 16);
    }

    #[test]
    fn test_survivors_bank_energy() {
        let mut world = world();
        world.agents[0].fitness = 5.0;
        let energy = world.agents[0].energy;
        let summary = world.end_generation();
        assert!(summary.max_fitness >= 5.0 + energy * 0.7 - 1e-9);
    }
}

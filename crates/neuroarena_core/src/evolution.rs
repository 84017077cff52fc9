//! Generation turnover: species-protected elitism, species floor rescue, and
//! tournament reproduction over both network weights and traits.

use crate::brain::NetworkLogic;
use crate::config::EvolutionConfig;
use crate::error::Result;
use crate::genetics::TraitLogic;
use crate::history::EvolutionLog;
use crate::lifecycle::AgentFactory;
use neuroarena_data::{Agent, Species};
use rand::Rng;

const SPECIES: [Species; 2] = [Species::Predator, Species::Prey];

pub struct GeneticAlgorithm<'a> {
    config: &'a EvolutionConfig,
}

impl<'a> GeneticAlgorithm<'a> {
    #[must_use]
    pub fn new(config: &'a EvolutionConfig) -> Self {
        Self { config }
    }

    /// Produces the next generation, exactly as large as `population`.
    ///
    /// Children are fresh agents from `factory` tagged with `generation`;
    /// placement and energy are left to the caller.
    pub fn evolve<R: Rng>(
        &self,
        population: &[Agent],
        factory: &mut AgentFactory,
        log: &mut dyn EvolutionLog,
        generation: u32,
        rng: &mut R,
    ) -> Result<Vec<Agent>> {
        let size = population.len();
        if size == 0 {
            return Ok(Vec::new());
        }
        crate::ensure_config!(
            self.config.tournament_size > 0,
            "Tournament size must be positive"
        );

        let mut ranked: Vec<&Agent> = population.iter().collect();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let mut next = Vec::with_capacity(size);
        self.select_elites(&ranked, size, factory, log, generation, &mut next);
        let rescued = self.rescue_species(&ranked, size, factory, log, generation, rng, &mut next);
        let elites = next.iter().filter(|a| a.is_elite).count();

        while next.len() < size {
            let child = self.breed(&ranked, factory, log, generation, rng);
            next.push(child);
        }

        tracing::debug!(
            generation,
            size,
            elites,
            rescued,
            "Next generation assembled"
        );
        Ok(next)
    }

    fn select_elites(
        &self,
        ranked: &[&Agent],
        size: usize,
        factory: &mut AgentFactory,
        log: &mut dyn EvolutionLog,
        generation: u32,
        next: &mut Vec<Agent>,
    ) {
        for species in SPECIES {
            let best = ranked
                .iter()
                .filter(|a| a.species == species)
                .take(self.config.elite_per_species);
            for parent in best {
                if next.len() >= size {
                    return;
                }
                let mut elite =
                    factory.create(species, parent.traits, parent.brain.clone(), generation);
                elite.is_elite = true;
                log.log_elite(&elite, generation);
                next.push(elite);
            }
        }
    }

    /// Clones next-best surviving members of an underrepresented species
    /// with amplified mutation. Returns how many were added.
    #[allow(clippy::too_many_arguments)]
    fn rescue_species<R: Rng>(
        &self,
        ranked: &[&Agent],
        size: usize,
        factory: &mut AgentFactory,
        log: &mut dyn EvolutionLog,
        generation: u32,
        rng: &mut R,
        next: &mut Vec<Agent>,
    ) -> usize {
        let multiplier = self.config.adaptive_mutation_multiplier;
        let weight_rate = (self.config.mutation_rate * multiplier).min(1.0);
        let weight_strength = self.config.mutation_strength * multiplier;
        let trait_rate = (self.config.trait_mutation_rate * multiplier).min(1.0);
        let trait_strength = self.config.trait_mutation_strength * multiplier;

        let mut added = 0;
        for species in SPECIES {
            let members: Vec<&Agent> = ranked
                .iter()
                .copied()
                .filter(|a| a.species == species)
                .collect();
            if members.is_empty() {
                continue;
            }
            // Survivors are preferred; an extinct species falls back to its dead.
            let elites = self.config.elite_per_species;
            let survivors: Vec<&Agent> = members
                .iter()
                .copied()
                .filter(|a| a.is_alive())
                .collect();
            let (templates, mut rank) = if survivors.is_empty() {
                (members, elites)
            } else {
                let skipped = members.iter().take(elites).filter(|a| a.is_alive()).count();
                (survivors, skipped)
            };
            let mut count = next.iter().filter(|a| a.species == species).count();
            while count < self.config.min_species_floor && next.len() < size {
                let template = templates[rank % templates.len()];
                rank += 1;

                let mut traits = template.traits;
                traits.mutate_with_rng(trait_rate, trait_strength, rng);
                let mut brain = template.brain.clone();
                brain.mutate_with_rng(weight_rate, weight_strength, rng);

                let child = factory.create(species, traits, brain, generation);
                log.log_birth(&child, None, generation);
                next.push(child);
                count += 1;
                added += 1;
            }
            if count < self.config.min_species_floor {
                tracing::warn!(
                    species = species.label(),
                    count,
                    floor = self.config.min_species_floor,
                    "Population too small to restore species floor"
                );
            }
        }
        added
    }

    /// Tournament pick with replacement. `ranked` is sorted best first, so
    /// the lowest drawn rank wins.
    fn tournament<'p, R: Rng>(&self, ranked: &[&'p Agent], rng: &mut R) -> Option<&'p Agent> {
        if ranked.is_empty() {
            return None;
        }
        (0..self.config.tournament_size)
            .map(|_| rng.gen_range(0..ranked.len()))
            .min()
            .map(|rank| ranked[rank])
    }

    fn breed<R: Rng>(
        &self,
        ranked: &[&Agent],
        factory: &mut AgentFactory,
        log: &mut dyn EvolutionLog,
        generation: u32,
        rng: &mut R,
    ) -> Agent {
        // evolve() guarantees a non-empty pool and a positive tournament size.
        let first = self.tournament(ranked, rng).unwrap_or(ranked[0]);
        let second = self.tournament(ranked, rng).unwrap_or(ranked[0]);

        let mut traits = first.traits.crossover_with_rng(&second.traits, rng);
        traits.mutate_with_rng(
            self.config.trait_mutation_rate,
            self.config.trait_mutation_strength,
            rng,
        );

        let mut species = if rng.gen_bool(0.5) {
            first.species
        } else {
            second.species
        };
        if rng.gen_bool(self.config.species_flip_probability.clamp(0.0, 1.0)) {
            species = species.flipped();
        }

        let mut brain = first.brain.crossover_with_rng(&second.brain, rng);
        brain.mutate_with_rng(
            self.config.mutation_rate,
            self.config.mutation_strength,
            rng,
        );

        let child = factory.create(species, traits, brain, generation);
        log.log_birth(&child, Some((first.id, second.id)), generation);
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::history::{LiveEvent, MemoryLog, NullLog};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(predators: usize, prey: usize, rng: &mut ChaCha8Rng) -> Vec<Agent> {
        let config = AppConfig::default();
        let mut factory = AgentFactory::default();
        let mut agents = Vec::new();
        for i in 0..predators + prey {
            let species = if i < predators {
                Species::Predator
            } else {
                Species::Prey
            };
            let mut agent = factory.create_random_with_rng(species, &config, 0, rng);
            agent.fitness = i as f64 * 10.0;
            agents.push(agent);
        }
        agents
    }

    #[test]
    fn test_empty_population() {
        let config = EvolutionConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let next = GeneticAlgorithm::new(&config)
            .evolve(&[], &mut AgentFactory::default(), &mut NullLog, 1, &mut rng)
            .unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn test_elites_copied_verbatim() {
        let config = EvolutionConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let parents = population(5, 15, &mut rng);
        let mut factory = AgentFactory::new(1000);
        let mut log = MemoryLog::default();
        let next = GeneticAlgorithm::new(&config)
            .evolve(&parents, &mut factory, &mut log, 1, &mut rng)
            .unwrap();

        assert_eq!(next.len(), parents.len());
        let elites: Vec<&Agent> = next.iter().filter(|a| a.is_elite).collect();
        assert_eq!(elites.len(), 4);
        // Best prey is the last one, best predator index 4.
        assert_eq!(elites[0].brain, parents[4].brain);
        assert_eq!(elites[0].traits, parents[4].traits);
        assert_eq!(elites[2].brain, parents[19].brain);
        assert!(next.iter().all(|a| a.fitness == 0.0 && a.generation == 1));
        let elite_events = log
            .events()
            .iter()
            .filter(|e| matches!(e, LiveEvent::Elite { .. }))
            .count();
        assert_eq!(elite_events, 4);
    }

    #[test]
    fn test_floor_rescue_restores_minority() {
        let config = EvolutionConfig {
            species_flip_probability: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let parents = population(1, 19, &mut rng);
        let next = GeneticAlgorithm::new(&config)
            .evolve(&parents, &mut AgentFactory::default(), &mut NullLog, 1, &mut rng)
            .unwrap();
        let predators = next.iter().filter(|a| a.is_predator()).count();
        assert!(predators >= config.min_species_floor);
    }

    #[test]
    fn test_rescue_prefers_survivors() {
        let config = EvolutionConfig {
            elite_per_species: 1,
            min_species_floor: 3,
            mutation_rate: 0.0,
            trait_mutation_rate: 0.0,
            species_flip_probability: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        // Predator fitness ranks: 3 (elite), 2 (dead), 1, 0 (dead).
        let mut parents = population(4, 8, &mut rng);
        parents[2].alive = false;
        parents[0].alive = false;
        let log = MemoryLog::new();
        let mut sink = log.clone();

        let next = GeneticAlgorithm::new(&config)
            .evolve(&parents, &mut AgentFactory::new(500), &mut sink, 1, &mut rng)
            .unwrap();

        let rescued: Vec<&Agent> = log
            .events()
            .iter()
            .filter_map(|e| match e {
                LiveEvent::Birth {
                    id,
                    parents: None,
                    species: Species::Predator,
                    ..
                } => next.iter().find(|a| a.id == *id),
                _ => None,
            })
            .collect();
        assert_eq!(rescued.len(), 2);
        assert_eq!(rescued[0].brain, parents[1].brain);
        assert_eq!(rescued[1].brain, parents[3].brain);
        assert!(rescued.iter().all(|a| a.brain != parents[2].brain));
    }

    #[test]
    fn test_rescue_falls_back_to_dead_members() {
        let config = EvolutionConfig {
            species_flip_probability: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut parents = population(2, 10, &mut rng);
        parents[0].alive = false;
        parents[1].alive = false;
        let next = GeneticAlgorithm::new(&config)
            .evolve(&parents, &mut AgentFactory::default(), &mut NullLog, 1, &mut rng)
            .unwrap();
        let predators = next.iter().filter(|a| a.is_predator()).count();
        assert!(predators >= config.min_species_floor);
    }

    #[test]
    fn test_zero_tournament_rejected() {
        let config = EvolutionConfig {
            tournament_size: 0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let parents = population(2, 2, &mut rng);
        let result = GeneticAlgorithm::new(&config).evolve(
            &parents,
            &mut AgentFactory::default(),
            &mut NullLog,
            1,
            &mut rng,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_children_get_unique_ids() {
        let config = EvolutionConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let parents = population(4, 8, &mut rng);
        let mut factory = AgentFactory::new(100);
        let next = GeneticAlgorithm::new(&config)
            .evolve(&parents, &mut factory, &mut NullLog, 1, &mut rng)
            .unwrap();
        let mut ids: Vec<u64> = next.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), next.len());
        assert_eq!(factory.peek_id(), 112);
        assert_eq!(next[0].brain.weight_count(), parents[0].brain.weight_count());
    }
}

use neuroarena_data::{Agent, Food, PopulationStats, Species};

/// Population summary over every agent, dead ones included.
#[must_use]
pub fn compute(agents: &[Agent], food: &[Food], generation: u32, tick: u64) -> PopulationStats {
    let mut stats = PopulationStats {
        generation,
        tick,
        population: agents.len(),
        food_count: food.iter().filter(|f| f.is_available()).count(),
        ..Default::default()
    };
    if agents.is_empty() {
        return stats;
    }

    let mut total = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for agent in agents {
        total += agent.fitness;
        max = max.max(agent.fitness);
        min = min.min(agent.fitness);
        stats.total_kills += agent.kills;
        if agent.is_alive() {
            stats.alive += 1;
            match agent.species {
                Species::Predator => stats.predators += 1,
                Species::Prey => stats.prey += 1,
            }
        }
    }
    stats.avg_fitness = total / agents.len() as f64;
    stats.max_fitness = max;
    stats.min_fitness = min;
    stats
}

mod common;

use common::{AgentBuilder, WorldBuilder};
use neuroarena_lib::model::data::{FoodKind, Species};
use neuroarena_lib::model::history::{LiveEvent, MemoryLog};

fn duel(prey_energy: Option<f64>, prey_fitness: f64, kills: u32) -> neuroarena_lib::World {
    let predator = AgentBuilder::new(1, Species::Predator)
        .at(200.0, 200.0)
        .kills(kills)
        .build();
    let gap = predator.stats.body_radius * 2.0 + 2.0;
    let mut prey = AgentBuilder::new(2, Species::Prey)
        .at(200.0 + gap, 200.0)
        .fitness(prey_fitness);
    if let Some(energy) = prey_energy {
        prey = prey.energy(energy);
    }
    WorldBuilder::new()
        .with_agent(predator)
        .with_agent(prey.build())
        .without_obstacles()
        .without_food()
        .build()
}

#[test]
fn test_attack_deals_exact_power_and_starts_cooldown() {
    let mut world = duel(None, 0.0, 0);
    let power = world.agents[0].stats.attack_power;
    let cooldown = world.agents[0].stats.attack_cooldown_ticks;
    let prey_before = world.agents[1].energy;
    assert!(power > 0.0);

    world.step_agent(0);

    assert_eq!(world.agents[1].energy, prey_before - power);
    assert!(world.agents[1].is_alive());
    assert_eq!(world.agents[0].attack_cooldown, cooldown);
    assert_eq!(world.agents[0].kills, 0);
}

#[test]
fn test_cooldown_blocks_second_strike() {
    let mut world = duel(None, 0.0, 0);
    world.step_agent(0);
    let after_first = world.agents[1].energy;

    world.step_agent(0);
    assert_eq!(world.agents[1].energy, after_first);
    let cooldown = world.agents[0].stats.attack_cooldown_ticks;
    assert_eq!(world.agents[0].attack_cooldown, cooldown - 1.0);
}

#[test]
fn test_kill_rewards_and_hunted_meat() {
    let mut world = duel(Some(1.0), 40.0, 2);
    let log = MemoryLog::new();
    world.set_logger(Box::new(log.clone()));
    let victim_pos = (world.agents[1].x, world.agents[1].y);
    let victim_max = world.agents[1].stats.max_energy;

    world.step_agent(0);

    let predator = &world.agents[0];
    let victim = &world.agents[1];
    assert!(!victim.is_alive());
    assert!(victim.killed);
    assert_eq!(predator.kills, 3);

    let expected = 150.0 + 0.5 * 40.0 + 20.0 * 2.0 + world.config.agent.passive_fitness;
    assert!(
        (predator.fitness - expected).abs() < 1e-9,
        "fitness {} != {}",
        predator.fitness,
        expected
    );

    let meat: Vec<_> = world
        .food
        .iter()
        .filter(|f| f.kind == FoodKind::Meat)
        .collect();
    assert_eq!(meat.len(), 1);
    assert_eq!((meat[0].x, meat[0].y), victim_pos);
    assert_eq!(meat[0].decay, Some(800));
    assert!(meat[0].hunted);
    assert!((meat[0].energy - 0.5 * victim_max).abs() < 1e-9);

    let events = log.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, LiveEvent::Kill { killer, victim, .. } if *killer == 1 && *victim == 2)));
    assert!(events.iter().any(|e| matches!(e, LiveEvent::Death { id, .. } if *id == 2)));
}

#[test]
fn test_killed_prey_leaves_no_starvation_carcass() {
    let mut world = duel(Some(1.0), 0.0, 0);
    world.update();

    let meat: Vec<_> = world
        .food
        .iter()
        .filter(|f| f.kind == FoodKind::Meat && f.hunted)
        .collect();
    assert_eq!(meat.len(), 1);
    assert!(world
        .food
        .iter()
        .all(|f| f.kind != FoodKind::Meat || f.hunted || f.decay != Some(300)));
}

#[test]
fn test_prey_never_attacks() {
    let predator = AgentBuilder::new(1, Species::Predator).at(226.0, 200.0).build();
    let prey = AgentBuilder::new(2, Species::Prey).at(200.0, 200.0).build();
    let mut world = WorldBuilder::new()
        .with_agent(prey)
        .with_agent(predator)
        .without_obstacles()
        .without_food()
        .build();
    let before = world.agents[1].energy;

    world.step_agent(0);
    assert_eq!(world.agents[1].energy, before);
}

#[test]
fn test_brain_attack_intent_strikes_beyond_auto_margin() {
    let predator = AgentBuilder::new(1, Species::Predator).at(200.0, 200.0).build();
    // Gap of 8 between bodies: too far for an automatic strike, within reach.
    let distance = predator.stats.body_radius * 2.0 + 8.0;
    let prey = AgentBuilder::new(2, Species::Prey)
        .at(200.0 + distance, 200.0)
        .build();
    let mut world = WorldBuilder::new()
        .with_agent(predator)
        .with_agent(prey)
        .without_obstacles()
        .without_food()
        .build();
    let before = world.agents[1].energy;

    world.step_agent(0);
    assert_eq!(world.agents[1].energy, before);

    world.agents[0].attack_cooldown = 0.0;
    // Output 3 is the attack intent; tanh(2.0) is well above the threshold.
    if let Some(output) = world.agents[0].brain.layers.last_mut() {
        output.biases[3] = 2.0;
    }
    world.step_agent(0);
    let power = world.agents[0].stats.attack_power;
    assert_eq!(world.agents[1].energy, before - power);
}

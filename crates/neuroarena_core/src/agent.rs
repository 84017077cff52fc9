//! Per-tick agent behavior: sense, think, act, physics, eat.
//!
//! Agents never hold a reference to the world. Each step receives a
//! [`SenseContext`] borrowed from the world's collections, and the nearest
//! agent found while sensing is handed forward as part of [`Perception`]
//! for the attack decision of the same tick.

use crate::brain::{NetworkLogic, AGENT_INPUTS};
use crate::config::{AgentConfig, EcosystemConfig};
use neuroarena_data::{Agent, Food, FoodKind, Obstacle, SensorReadings, Species, SENSOR_DIRECTIONS};
use std::f64::consts::{PI, TAU};

/// Read-only view of the arena used while sensing.
pub struct SenseContext<'a> {
    pub agents: &'a [Agent],
    pub food: &'a [Food],
    pub width: f64,
    pub height: f64,
    pub half_angle: f64,
}

/// Result of the sense step, valid for the current tick only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Perception {
    pub readings: SensorReadings,
    /// Index of the nearest other living agent within sensor range.
    pub nearest: Option<usize>,
    pub nearest_distance: f64,
}

/// Decoded network outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    pub thrust: f32,
    pub turn: f32,
    pub boost: f32,
    pub attack: f32,
}

/// Shortest signed offset from `from` to `to` on a wrapped axis.
#[must_use]
pub fn wrapped_delta(from: f64, to: f64, extent: f64) -> f64 {
    let mut d = to - from;
    if extent > 0.0 {
        if d > extent / 2.0 {
            d -= extent;
        } else if d < -extent / 2.0 {
            d += extent;
        }
    }
    d
}

/// Toroidal offset and distance between two points.
#[must_use]
pub fn toroidal_offset(ax: f64, ay: f64, bx: f64, by: f64, width: f64, height: f64) -> (f64, f64, f64) {
    let dx = wrapped_delta(ax, bx, width);
    let dy = wrapped_delta(ay, by, height);
    (dx, dy, dx.hypot(dy))
}

fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

fn proximity(distance: f64, range: f64) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / range).clamp(0.0, 1.0) as f32
}

/// Food kind an agent of `species` can eat.
#[must_use]
pub fn diet(species: Species) -> FoodKind {
    match species {
        Species::Predator => FoodKind::Meat,
        Species::Prey => FoodKind::Plant,
    }
}

/// Updates `best` per cone for an object at offset (dx, dy).
fn cone_update(
    best: &mut [Option<f64>; 4],
    heading: f64,
    half_angle: f64,
    dx: f64,
    dy: f64,
    distance: f64,
) {
    let bearing = if distance > 0.0 { dy.atan2(dx) } else { heading };
    for (slot, offset) in best.iter_mut().zip(SENSOR_DIRECTIONS) {
        let diff = normalize_angle(bearing - (heading + offset));
        if diff.abs() <= half_angle && slot.map_or(true, |d| distance < d) {
            *slot = Some(distance);
        }
    }
}

/// Evaluates the four cone sensors for the agent at `index`.
#[must_use]
pub fn sense(index: usize, ctx: &SenseContext<'_>) -> Perception {
    let Some(me) = ctx.agents.get(index) else {
        return Perception::default();
    };
    let range = me.stats.sensor_range;
    let mut perception = Perception::default();
    if range <= 0.0 {
        return perception;
    }

    let edible = diet(me.species);
    let mut food_best = [None; 4];
    for item in ctx.food.iter().filter(|f| f.is_available() && f.kind == edible) {
        let (dx, dy, d) = toroidal_offset(me.x, me.y, item.x, item.y, ctx.width, ctx.height);
        if d <= range {
            cone_update(&mut food_best, me.heading, ctx.half_angle, dx, dy, d);
        }
    }

    let mut agent_best = [None; 4];
    for (other_index, other) in ctx.agents.iter().enumerate() {
        if other_index == index || !other.is_alive() {
            continue;
        }
        let (dx, dy, d) = toroidal_offset(me.x, me.y, other.x, other.y, ctx.width, ctx.height);
        if d > range {
            continue;
        }
        cone_update(&mut agent_best, me.heading, ctx.half_angle, dx, dy, d);
        if perception.nearest.is_none() || d < perception.nearest_distance {
            perception.nearest = Some(other_index);
            perception.nearest_distance = d;
        }
    }

    for i in 0..4 {
        perception.readings.food[i] = food_best[i].map_or(0.0, |d| proximity(d, range));
        perception.readings.creatures[i] = agent_best[i].map_or(0.0, |d| proximity(d, range));
    }
    perception
}

/// Builds the network input vector from the last sensor readings.
#[must_use]
pub fn inputs(agent: &Agent) -> [f32; AGENT_INPUTS] {
    let speed_ratio = if agent.stats.max_speed > 0.0 {
        agent.speed / agent.stats.max_speed
    } else {
        0.0
    };
    let r = &agent.sensors;
    [
        r.food[0],
        r.food[1],
        r.food[2],
        r.food[3],
        r.creatures[0],
        r.creatures[1],
        r.creatures[2],
        r.creatures[3],
        agent.energy_ratio() as f32,
        speed_ratio as f32,
        agent.heading.sin() as f32,
        agent.heading.cos() as f32,
    ]
}

#[must_use]
pub fn think(agent: &Agent) -> Intent {
    let outputs = agent.brain.forward(&inputs(agent));
    let out = |i: usize| outputs.get(i).copied().unwrap_or(0.0);
    Intent {
        thrust: out(0),
        turn: out(1),
        boost: out(2),
        attack: out(3),
    }
}

/// Applies thrust, turn, and boost.
pub fn steer(agent: &mut Agent, intent: &Intent, config: &AgentConfig) {
    let max = agent.stats.max_speed.max(0.0);
    agent.speed =
        (agent.speed + f64::from(intent.thrust) * config.acceleration).clamp(-0.5 * max, max);
    agent.heading = (agent.heading + f64::from(intent.turn) * config.turn_rate).rem_euclid(TAU);

    if intent.boost > config.boost_threshold {
        agent.speed *= config.boost_multiplier;
        agent.energy -= config.boost_cost * agent.traits.metabolism;
    }
}

/// Whether a predator should try to strike the agent it tracked this tick.
#[must_use]
pub fn wants_attack(
    attacker: &Agent,
    target: &Agent,
    distance: f64,
    intent: &Intent,
    config: &AgentConfig,
) -> bool {
    if !attacker.is_predator()
        || attacker.attack_cooldown > 0.0
        || !target.is_alive()
        || target.species != Species::Prey
    {
        return false;
    }
    let gap = distance - attacker.stats.body_radius - target.stats.body_radius;
    gap <= config.auto_attack_margin || intent.attack > config.attack_intent_threshold
}

pub fn tick_cooldown(agent: &mut Agent) {
    agent.attack_cooldown = (agent.attack_cooldown - 1.0).max(0.0);
}

/// Moves the agent, resolves obstacle overlap, wraps, and pays upkeep.
///
/// Marks the agent dead when its energy reaches zero.
pub fn integrate(
    agent: &mut Agent,
    obstacles: &[Obstacle],
    width: f64,
    height: f64,
    config: &AgentConfig,
) {
    let step = agent.speed;
    agent.x += agent.heading.cos() * step;
    agent.y += agent.heading.sin() * step;

    for obstacle in obstacles {
        let (dx, dy, d) = toroidal_offset(obstacle.x, obstacle.y, agent.x, agent.y, width, height);
        let min_gap = obstacle.radius + agent.stats.body_radius;
        if d < min_gap {
            let (ux, uy) = if d > 0.0 {
                (dx / d, dy / d)
            } else {
                (-agent.heading.cos(), -agent.heading.sin())
            };
            agent.x = obstacle.x + ux * min_gap;
            agent.y = obstacle.y + uy * min_gap;
            agent.speed *= 0.5;
        }
    }

    agent.speed *= config.friction;
    if width > 0.0 {
        agent.x = agent.x.rem_euclid(width);
    }
    if height > 0.0 {
        agent.y = agent.y.rem_euclid(height);
    }
    agent.distance_traveled += step.abs();
    agent.energy -= agent.stats.base_energy_cost + agent.speed.abs() * agent.stats.move_energy_cost;

    if agent.energy <= 0.0 {
        agent.energy = 0.0;
        agent.alive = false;
    }
}

/// Eats the first overlapping edible food item. Returns its index.
pub fn eat(
    agent: &mut Agent,
    food: &mut [Food],
    width: f64,
    height: f64,
    config: &EcosystemConfig,
) -> Option<usize> {
    let edible = diet(agent.species);
    let reach = agent.stats.body_radius + config.food_radius;
    let index = food.iter().position(|f| {
        f.is_available()
            && f.kind == edible
            && toroidal_offset(agent.x, agent.y, f.x, f.y, width, height).2 <= reach
    })?;

    let item = &mut food[index];
    item.consumed = true;
    agent.energy = (agent.energy + item.energy).min(agent.stats.max_energy);
    agent.food_eaten += 1;
    agent.fitness += item.energy;
    Some(index)
}

/// Passive survival reward.
pub fn survive(agent: &mut Agent, config: &AgentConfig) {
    agent.fitness += config.passive_fitness;
    agent.ticks_alive += 1;
}

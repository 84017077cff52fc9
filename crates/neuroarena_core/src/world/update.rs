use crate::agent::{self, Intent, SenseContext};
use crate::ecosystem;
use crate::interaction::{self, AttackOutcome};
use crate::world::World;
use neuroarena_data::{DeathCause, Food};
use std::time::Instant;

impl World {
    /// Advances the simulation by up to `speed` ticks.
    ///
    /// Stops early after a generation transition. Death bookkeeping and food
    /// top-up run once per call. Returns the number of ticks simulated.
    pub fn update(&mut self) -> u32 {
        if self.paused {
            return 0;
        }
        let started = Instant::now();

        let mut ticks = 0;
        for _ in 0..self.speed {
            ecosystem::decay_meat(&mut self.food);
            for index in 0..self.agents.len() {
                self.step_agent(index);
            }
            self.tick += 1;
            ticks += 1;

            if self.tick >= self.config.world.generation_length || self.alive_count() == 0 {
                self.end_generation();
                break;
            }
        }

        self.record_deaths();
        ecosystem::prune(&mut self.food);
        self.replenish_food();

        self.metrics
            .record_update(started.elapsed(), self.alive_count(), self.food.len());
        ticks
    }

    /// One sense, think, act, physics, eat pass for the agent at `index`.
    /// Dead or missing agents are skipped.
    pub fn step_agent(&mut self, index: usize) {
        match self.agents.get_mut(index) {
            Some(agent) if agent.is_alive() => agent::tick_cooldown(agent),
            _ => return,
        }

        let perception = {
            let ctx = SenseContext {
                agents: &self.agents,
                food: &self.food,
                width: self.width,
                height: self.height,
                half_angle: self.config.agent.sensor_half_angle,
            };
            agent::sense(index, &ctx)
        };

        let me = &mut self.agents[index];
        me.sensors = perception.readings;
        let intent = agent::think(me);
        agent::steer(me, &intent, &self.config.agent);

        if let Some(target) = perception.nearest {
            self.try_attack(index, target, perception.nearest_distance, &intent);
        }

        let me = &mut self.agents[index];
        agent::integrate(me, &self.obstacles, self.width, self.height, &self.config.agent);
        if me.is_alive() {
            agent::eat(me, &mut self.food, self.width, self.height, &self.config.ecosystem);
            agent::survive(me, &self.config.agent);
        }
    }

    fn try_attack(&mut self, attacker: usize, target: usize, distance: f64, intent: &Intent) {
        let Some((hunter, victim)) = interaction::pair_mut(&mut self.agents, attacker, target)
        else {
            return;
        };
        if !agent::wants_attack(hunter, victim, distance, intent, &self.config.agent) {
            return;
        }

        match interaction::attack(
            hunter,
            victim,
            distance,
            &self.config.combat,
            &self.config.ecosystem,
        ) {
            AttackOutcome::Rejected => {}
            AttackOutcome::Hit { damage } => {
                tracing::trace!(
                    attacker = hunter.id,
                    target = victim.id,
                    damage,
                    remaining = victim.energy,
                    "Attack landed"
                );
            }
            AttackOutcome::Kill {
                fitness_gain, meat, ..
            } => {
                victim.death_recorded = true;
                tracing::debug!(
                    killer = hunter.id,
                    victim = victim.id,
                    fitness_gain,
                    tick = self.tick,
                    "Kill"
                );
                self.logger.log_kill(hunter, victim, self.tick);
                self.logger.log_death(victim, DeathCause::Hunted, self.tick);
                self.food.push(meat);
                self.metrics.increment_counter("kills");
            }
        }
    }

    /// Reports agents that starved since the last call and leaves a carcass
    /// for each.
    pub(crate) fn record_deaths(&mut self) {
        let eco = &self.config.ecosystem;
        for agent in self.agents.iter_mut() {
            if agent.is_alive() || agent.death_recorded {
                continue;
            }
            agent.death_recorded = true;
            if agent.killed {
                continue;
            }
            tracing::debug!(id = agent.id, tick = self.tick, "Starved");
            self.logger.log_death(agent, DeathCause::Starved, self.tick);
            self.food.push(Food::meat(
                agent.x,
                agent.y,
                eco.starvation_meat_energy_fraction * agent.stats.max_energy,
                eco.starvation_meat_decay,
                false,
            ));
            self.metrics.increment_counter("starvations");
        }
    }
}

use crate::config::{CombatConfig, EcosystemConfig};
use neuroarena_data::{Agent, Food, Species};

/// Result of one attack attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// Preconditions failed; nothing changed.
    Rejected,
    Hit {
        damage: f64,
    },
    Kill {
        damage: f64,
        fitness_gain: f64,
        energy_gain: f64,
        /// Carcass left at the victim's last position.
        meat: Food,
    },
}

/// Two distinct mutable elements of one slice.
pub fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> Option<(&mut T, &mut T)> {
    if first == second || first >= items.len() || second >= items.len() {
        return None;
    }
    if first < second {
        let (head, tail) = items.split_at_mut(second);
        Some((&mut head[first], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(first);
        Some((&mut tail[0], &mut head[second]))
    }
}

/// Whether `attacker` may strike `target` at `distance` right now.
#[must_use]
pub fn can_attack(attacker: &Agent, target: &Agent, distance: f64, config: &CombatConfig) -> bool {
    attacker.species == Species::Predator
        && attacker.is_alive()
        && attacker.attack_cooldown <= 0.0
        && target.species == Species::Prey
        && target.is_alive()
        && distance
            <= attacker.stats.body_radius + target.stats.body_radius + config.attack_reach_margin
}

/// Resolves one strike of `attacker` on `target`.
pub fn attack(
    attacker: &mut Agent,
    target: &mut Agent,
    distance: f64,
    combat: &CombatConfig,
    ecosystem: &EcosystemConfig,
) -> AttackOutcome {
    if !can_attack(attacker, target, distance, combat) {
        return AttackOutcome::Rejected;
    }

    let damage = attacker.stats.attack_power;
    target.energy -= damage;
    attacker.attack_cooldown = attacker.stats.attack_cooldown_ticks;

    if target.energy > 0.0 {
        return AttackOutcome::Hit { damage };
    }

    target.energy = 0.0;
    target.alive = false;
    target.killed = true;

    let energy_gain = combat.kill_energy_fraction * target.stats.max_energy;
    attacker.energy = (attacker.energy + energy_gain).min(attacker.stats.max_energy);

    let fitness_gain = combat.kill_bonus
        + combat.victim_fitness_share * target.fitness
        + combat.streak_bonus * f64::from(attacker.kills);
    attacker.fitness += fitness_gain;
    attacker.kills += 1;

    let meat = Food::meat(
        target.x,
        target.y,
        ecosystem.hunted_meat_energy_fraction * target.stats.max_energy,
        ecosystem.hunted_meat_decay,
        true,
    );

    AttackOutcome::Kill {
        damage,
        fitness_gain,
        energy_gain,
        meat,
    }
}

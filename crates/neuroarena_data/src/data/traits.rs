use serde::{Deserialize, Serialize};

/// Closed interval a trait value must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitRange {
    pub min: f64,
    pub max: f64,
}

impl TraitRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Identifier of a heritable trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitId {
    /// Body size: more energy storage, bigger radius, slower.
    Size,
    /// Metabolic rate: faster and quicker to recover, but hungrier.
    Metabolism,
    /// Attack strength multiplier.
    Aggression,
    /// Sensor reach multiplier.
    Vision,
}

impl TraitId {
    /// Static iteration order for every "for each trait" loop.
    pub const ALL: [TraitId; 4] = [
        TraitId::Size,
        TraitId::Metabolism,
        TraitId::Aggression,
        TraitId::Vision,
    ];

    /// Declared valid range of the trait.
    #[must_use]
    pub const fn range(self) -> TraitRange {
        match self {
            TraitId::Size => TraitRange::new(0.5, 2.0),
            TraitId::Metabolism => TraitRange::new(0.5, 2.0),
            TraitId::Aggression => TraitRange::new(0.0, 1.0),
            TraitId::Vision => TraitRange::new(0.5, 2.0),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TraitId::Size => "size",
            TraitId::Metabolism => "metabolism",
            TraitId::Aggression => "aggression",
            TraitId::Vision => "vision",
        }
    }
}

/// Aggression sub-range drawn for freshly generated predators.
pub const PREDATOR_AGGRESSION: TraitRange = TraitRange::new(0.6, 1.0);
/// Aggression sub-range drawn for freshly generated prey.
pub const PREY_AGGRESSION: TraitRange = TraitRange::new(0.0, 0.4);

/// Heritable trait vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub size: f64,
    pub metabolism: f64,
    pub aggression: f64,
    pub vision: f64,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            size: 1.0,
            metabolism: 1.0,
            aggression: 0.5,
            vision: 1.0,
        }
    }
}

impl Traits {
    #[must_use]
    pub fn get(&self, id: TraitId) -> f64 {
        match id {
            TraitId::Size => self.size,
            TraitId::Metabolism => self.metabolism,
            TraitId::Aggression => self.aggression,
            TraitId::Vision => self.vision,
        }
    }

    pub fn set(&mut self, id: TraitId, value: f64) {
        match id {
            TraitId::Size => self.size = value,
            TraitId::Metabolism => self.metabolism = value,
            TraitId::Aggression => self.aggression = value,
            TraitId::Vision => self.vision = value,
        }
    }

    /// True when every trait lies within its declared range.
    #[must_use]
    pub fn in_range(&self) -> bool {
        TraitId::ALL.iter().all(|&id| id.range().contains(self.get(id)))
    }
}

/// Physical parameters derived from a trait vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DerivedStats {
    pub max_energy: f64,
    pub max_speed: f64,
    pub base_energy_cost: f64,
    pub move_energy_cost: f64,
    pub sensor_range: f64,
    pub body_radius: f64,
    pub attack_power: f64,
    pub attack_cooldown_ticks: f64,
}

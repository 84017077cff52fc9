use serde::{Deserialize, Serialize};

/// Kind of food resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    /// Eaten by prey; never decays.
    Plant,
    /// Eaten by predators; decays over time.
    Meat,
}

/// Food resource in the arena.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub x: f64,
    pub y: f64,
    /// Energy value when consumed.
    pub energy: f64,
    pub kind: FoodKind,
    /// Remaining ticks before the item rots away (meat only).
    pub decay: Option<u32>,
    /// Meat left behind by a kill rather than by starvation or spawning.
    pub hunted: bool,
    pub consumed: bool,
}

impl Food {
    /// Create a plant at position.
    #[must_use]
    pub fn plant(x: f64, y: f64, energy: f64) -> Self {
        Self {
            x,
            y,
            energy,
            kind: FoodKind::Plant,
            decay: None,
            hunted: false,
            consumed: false,
        }
    }

    /// Create a piece of meat at position with a decay lifetime.
    #[must_use]
    pub fn meat(x: f64, y: f64, energy: f64, lifetime: u32, hunted: bool) -> Self {
        Self {
            x,
            y,
            energy,
            kind: FoodKind::Meat,
            decay: Some(lifetime),
            hunted,
            consumed: false,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.consumed
    }
}

/// Static circular obstacle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

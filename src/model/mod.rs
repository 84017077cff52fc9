pub use neuroarena_core::brain::NetworkLogic;
pub use neuroarena_core::genetics::TraitLogic;

pub mod agent {
    pub use neuroarena_core::agent::*;
}
pub mod brain {
    pub use neuroarena_core::brain::*;
}
pub mod config {
    pub use neuroarena_core::config::*;
}
pub mod ecosystem {
    pub use neuroarena_core::ecosystem::*;
}
pub mod error {
    pub use neuroarena_core::error::*;
}
pub mod evolution {
    pub use neuroarena_core::evolution::*;
}
pub mod genetics {
    pub use neuroarena_core::genetics::*;
}
pub mod history {
    pub use neuroarena_core::history::*;
}
pub mod interaction {
    pub use neuroarena_core::interaction::*;
}
pub mod lifecycle {
    pub use neuroarena_core::lifecycle::*;
}
pub mod metrics {
    pub use neuroarena_core::metrics::*;
}
pub mod snapshot {
    pub use neuroarena_core::snapshot::*;
}
pub mod stats {
    pub use neuroarena_core::stats::*;
}
pub mod world {
    pub use neuroarena_core::world::*;
}
pub mod data {
    pub use neuroarena_data::*;
}

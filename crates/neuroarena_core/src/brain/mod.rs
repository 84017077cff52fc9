pub mod crossover;
pub mod forward;
pub mod mutation;
pub mod topology;

use crate::error::Result;
pub use neuroarena_data::{Layer, NeuralNetwork};
use rand::Rng;

/// Trait defining the core logic for agent neural networks.
pub trait NetworkLogic: Sized {
    fn new_random_with_rng<R: Rng>(
        inputs: usize,
        hidden: &[usize],
        outputs: usize,
        init_range: f32,
        rng: &mut R,
    ) -> Self;

    /// Runs one inference pass. Hidden layers use ReLU, the output layer tanh.
    #[must_use]
    fn forward(&self, inputs: &[f32]) -> Vec<f32>;

    /// Flattens every layer's weights then biases, input side first.
    #[must_use]
    fn weights(&self) -> Vec<f32>;

    /// Restores parameters produced by [`NetworkLogic::weights`].
    ///
    /// Fails with `ShapeMismatch` unless the length equals the
    /// architecture's weight count.
    fn set_weights(&mut self, weights: &[f32]) -> Result<()>;

    /// Per-weight coin-flip crossover.
    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> Self;

    /// Per-weight Gaussian mutation.
    fn mutate_with_rng<R: Rng>(&mut self, rate: f64, strength: f64, rng: &mut R);
}

pub const INPUT_LABELS: [&str; 12] = [
    "FoodFront",
    "FoodRight",
    "FoodBack",
    "FoodLeft",
    "AgentFront",
    "AgentRight",
    "AgentBack",
    "AgentLeft",
    "Energy",
    "Speed",
    "SinHeading",
    "CosHeading",
];

pub const OUTPUT_LABELS: [&str; 4] = ["Thrust", "Turn", "Boost", "Attack"];

pub const AGENT_INPUTS: usize = INPUT_LABELS.len();
pub const AGENT_OUTPUTS: usize = OUTPUT_LABELS.len();

impl NetworkLogic for NeuralNetwork {
    fn new_random_with_rng<R: Rng>(
        inputs: usize,
        hidden: &[usize],
        outputs: usize,
        init_range: f32,
        rng: &mut R,
    ) -> Self {
        topology::create_network_random_with_rng(inputs, hidden, outputs, init_range, rng)
    }

    fn forward(&self, inputs: &[f32]) -> Vec<f32> {
        forward::forward(self, inputs)
    }

    fn weights(&self) -> Vec<f32> {
        topology::flatten(self)
    }

    fn set_weights(&mut self, weights: &[f32]) -> Result<()> {
        topology::unflatten(self, weights)
    }

    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        crossover::network_crossover_with_rng(self, other, rng)
    }

    fn mutate_with_rng<R: Rng>(&mut self, rate: f64, strength: f64, rng: &mut R) {
        mutation::mutate_weights(self, rate, strength, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn network(seed: u64) -> NeuralNetwork {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        NeuralNetwork::new_random_with_rng(AGENT_INPUTS, &[16, 8], AGENT_OUTPUTS, 1.0, &mut rng)
    }

    #[test]
    fn test_forward_output_bounded() {
        let net = network(1);
        let outputs = net.forward(&[1.0; AGENT_INPUTS]);
        assert_eq!(outputs.len(), AGENT_OUTPUTS);
        assert!(outputs.iter().all(|o| (-1.0..=1.0).contains(o)));
    }

    #[test]
    fn test_clone_is_independent() {
        let net = network(2);
        let mut copy = net.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        copy.mutate_with_rng(1.0, 1.0, &mut rng);
        assert_ne!(net.weights(), copy.weights());
        assert_eq!(net.weights(), network(2).weights());
    }

    #[test]
    fn test_set_weights_rejects_wrong_length() {
        let mut net = network(4);
        let mut weights = net.weights();
        weights.pop();
        let err = net.set_weights(&weights).unwrap_err();
        assert!(matches!(
            err,
            crate::error::SimError::ShapeMismatch { actual, expected } if actual + 1 == expected
        ));
    }
}

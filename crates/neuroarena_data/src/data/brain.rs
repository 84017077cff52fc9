use serde::{Deserialize, Serialize};

/// One fully-connected layer of a feedforward network.
///
/// `weights` is stored row-major: one row per output neuron, one column per
/// input, so the weight from input `i` to output `o` lives at
/// `o * inputs + i`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    /// Number of values this layer consumes.
    pub inputs: usize,
    /// Number of values this layer produces.
    pub outputs: usize,
    /// Row-major weight matrix (`outputs × inputs`).
    pub weights: Vec<f32>,
    /// One bias per output neuron.
    pub biases: Vec<f32>,
}

impl Layer {
    /// Creates a layer with every weight and bias set to zero.
    #[must_use]
    pub fn zeroed(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            weights: vec![0.0; inputs * outputs],
            biases: vec![0.0; outputs],
        }
    }

    /// Number of scalar parameters (weights + biases) in this layer.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.inputs * self.outputs + self.outputs
    }
}

/// The feedforward neural network owned by every agent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NeuralNetwork {
    /// Input vector length.
    pub inputs: usize,
    /// Hidden layer sizes, from the input side.
    pub hidden: Vec<usize>,
    /// Output vector length.
    pub outputs: usize,
    /// Layers in evaluation order (`hidden.len() + 1` of them).
    pub layers: Vec<Layer>,
}

impl NeuralNetwork {
    /// Creates a network of the given architecture with all parameters zeroed.
    #[must_use]
    pub fn zeroed(inputs: usize, hidden: &[usize], outputs: usize) -> Self {
        let sizes = Self::layer_sizes_for(inputs, hidden, outputs);
        let layers = sizes
            .windows(2)
            .map(|pair| Layer::zeroed(pair[0], pair[1]))
            .collect();
        Self {
            inputs,
            hidden: hidden.to_vec(),
            outputs,
            layers,
        }
    }

    /// Every layer width in order: inputs, each hidden layer, outputs.
    #[must_use]
    pub fn layer_sizes_for(inputs: usize, hidden: &[usize], outputs: usize) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(inputs);
        sizes.extend_from_slice(hidden);
        sizes.push(outputs);
        sizes
    }

    /// Length of the flattened parameter vector for an architecture.
    #[must_use]
    pub fn weight_count_for(inputs: usize, hidden: &[usize], outputs: usize) -> usize {
        Self::layer_sizes_for(inputs, hidden, outputs)
            .windows(2)
            .map(|pair| pair[0] * pair[1] + pair[1])
            .sum()
    }

    /// Length of this network's flattened parameter vector.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        Self::weight_count_for(self.inputs, &self.hidden, self.outputs)
    }
}

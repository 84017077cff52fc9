use crate::error::{Result, SimError};
use neuroarena_data::NeuralNetwork;
use rand::Rng;

pub fn create_network_random_with_rng<R: Rng>(
    inputs: usize,
    hidden: &[usize],
    outputs: usize,
    init_range: f32,
    rng: &mut R,
) -> NeuralNetwork {
    let mut network = NeuralNetwork::zeroed(inputs, hidden, outputs);
    let range = init_range.abs();
    for layer in &mut network.layers {
        for w in layer.weights.iter_mut().chain(layer.biases.iter_mut()) {
            *w = rng.gen_range(-range..=range);
        }
    }
    network
}

pub fn flatten(network: &NeuralNetwork) -> Vec<f32> {
    let mut weights = Vec::with_capacity(network.weight_count());
    for layer in &network.layers {
        weights.extend_from_slice(&layer.weights);
        weights.extend_from_slice(&layer.biases);
    }
    weights
}

pub fn unflatten(network: &mut NeuralNetwork, weights: &[f32]) -> Result<()> {
    let expected = network.weight_count();
    if weights.len() != expected {
        return Err(SimError::ShapeMismatch {
            expected,
            actual: weights.len(),
        });
    }

    // Rebuild from the declared architecture so a layer vector that was
    // deserialized with the wrong shape cannot survive an import.
    let mut rebuilt = NeuralNetwork::zeroed(network.inputs, &network.hidden, network.outputs);
    let mut offset = 0;
    for layer in &mut rebuilt.layers {
        let w = layer.weights.len();
        layer.weights.copy_from_slice(&weights[offset..offset + w]);
        offset += w;
        let b = layer.biases.len();
        layer.biases.copy_from_slice(&weights[offset..offset + b]);
        offset += b;
    }
    *network = rebuilt;
    Ok(())
}

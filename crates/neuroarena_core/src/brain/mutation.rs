use neuroarena_data::NeuralNetwork;
use rand::Rng;
use rand_distr::StandardNormal;

/// Adds `N(0, 1) * strength` to each parameter independently with
/// probability `rate`.
pub fn mutate_weights<R: Rng>(network: &mut NeuralNetwork, rate: f64, strength: f64, rng: &mut R) {
    let rate = rate.clamp(0.0, 1.0);
    for layer in &mut network.layers {
        for w in layer.weights.iter_mut().chain(layer.biases.iter_mut()) {
            if rng.gen::<f64>() < rate {
                let noise: f64 = rng.sample(StandardNormal);
                *w += (noise * strength) as f32;
            }
        }
    }
}

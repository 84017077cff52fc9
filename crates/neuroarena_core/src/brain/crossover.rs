use super::topology;
use neuroarena_data::NeuralNetwork;
use rand::Rng;

/// Picks every parameter from one parent or the other with equal odds.
///
/// Parents with different architectures cannot be mixed; the first parent is
/// returned unchanged in that case.
pub fn network_crossover_with_rng<R: Rng>(
    network: &NeuralNetwork,
    other: &NeuralNetwork,
    rng: &mut R,
) -> NeuralNetwork {
    let a = topology::flatten(network);
    let b = topology::flatten(other);
    if a.len() != b.len() || network.hidden != other.hidden {
        return network.clone();
    }

    let mixed: Vec<f32> = a
        .iter()
        .zip(&b)
        .map(|(&wa, &wb)| if rng.gen_bool(0.5) { wa } else { wb })
        .collect();

    let mut child = network.clone();
    // Lengths were checked above.
    if topology::unflatten(&mut child, &mixed).is_err() {
        return network.clone();
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_child_weights_come_from_parents() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut a = NeuralNetwork::zeroed(4, &[3], 2);
        let mut b = a.clone();
        let n = a.weight_count();
        topology::unflatten(&mut a, &vec![1.0; n]).unwrap();
        topology::unflatten(&mut b, &vec![-1.0; n]).unwrap();

        let child = network_crossover_with_rng(&a, &b, &mut rng);
        let weights = topology::flatten(&child);
        assert!(weights.iter().all(|&w| w == 1.0 || w == -1.0));
        assert!(weights.contains(&1.0) && weights.contains(&-1.0));
    }

    #[test]
    fn test_mismatched_architectures_return_first_parent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = NeuralNetwork::zeroed(4, &[3], 2);
        let b = NeuralNetwork::zeroed(4, &[5], 2);
        assert_eq!(network_crossover_with_rng(&a, &b, &mut rng), a);
    }
}

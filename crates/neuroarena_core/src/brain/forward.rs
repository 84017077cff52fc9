use neuroarena_data::NeuralNetwork;

/// Layered matrix-vector product plus bias.
///
/// Missing inputs read as 0.0 and surplus inputs are ignored, so a malformed
/// sensor vector degrades instead of halting the tick.
pub fn forward(network: &NeuralNetwork, inputs: &[f32]) -> Vec<f32> {
    let mut values: Vec<f32> = (0..network.inputs)
        .map(|i| inputs.get(i).copied().unwrap_or(0.0))
        .collect();
    let last = network.layers.len().saturating_sub(1);

    for (index, layer) in network.layers.iter().enumerate() {
        let next = (0..layer.outputs)
            .map(|o| {
                let start = o * layer.inputs;
                let row = layer
                    .weights
                    .get(start..start + layer.inputs)
                    .unwrap_or(&[]);
                let bias = layer.biases.get(o).copied().unwrap_or(0.0);
                let sum = row.iter().zip(&values).map(|(w, v)| w * v).sum::<f32>() + bias;
                if index == last {
                    sum.tanh()
                } else {
                    sum.max(0.0)
                }
            })
            .collect();
        values = next;
    }

    values
}

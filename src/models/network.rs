// src/models/network.rs

use log::debug;
use rand::Rng;

use crate::error::PredictorError;

/// Step size of the delta-rule weight updates.
const LEARNING_RATE: f64 = 0.5;

/// Training stops once |target - output| drops below this.
const TOLERANCE: f64 = 1e-6;

/// Hard bound on training epochs. The stopping rule alone carries no
/// convergence guarantee, so the loop must be bounded either way.
const MAX_EPOCHS: usize = 10_000;

/// One-hidden-layer sigmoid network trained online against a single
/// held-out target value.
///
/// Holds the full weight state for one prediction task (one symbol, one
/// interval) and is discarded after use. Inputs and the target value must
/// already be normalized by the caller; the target is squashed once more at
/// construction so it lives in the same logistic space as the network's own
/// output.
#[derive(Debug, Clone)]
pub struct PredictiveNetwork {
    inputs: Vec<f64>,
    hidden_size: usize,
    /// inputs.len() x hidden_size.
    input_weights: Vec<Vec<f64>>,
    hidden_weights: Vec<f64>,
    hidden_net: Vec<f64>,
    hidden_output: Vec<f64>,
    output_net: f64,
    output: f64,
    target: f64,
}

impl PredictiveNetwork {
    /// Builds a network over an already-normalized input window, with every
    /// weight drawn uniformly from `[0, 1)` out of the caller's generator,
    /// then runs one forward pass to populate the activations.
    pub fn new<R: Rng + ?Sized>(
        inputs: Vec<f64>,
        target_value: f64,
        rng: &mut R,
    ) -> Result<Self, PredictorError> {
        let len = inputs.len();
        if len < 2 {
            return Err(PredictorError::ShapeMismatch(format!(
                "input window of {len} values is too small, need at least 2"
            )));
        }
        let hidden_size = len / 2;
        if hidden_size == 0 {
            return Err(PredictorError::ShapeMismatch(
                "input window yields an empty hidden layer".to_string(),
            ));
        }

        let input_weights: Vec<Vec<f64>> = (0..len)
            .map(|_| (0..hidden_size).map(|_| rng.gen::<f64>()).collect())
            .collect();
        let hidden_weights: Vec<f64> = (0..hidden_size).map(|_| rng.gen::<f64>()).collect();

        let mut network = PredictiveNetwork {
            inputs,
            hidden_size,
            input_weights,
            hidden_weights,
            hidden_net: vec![0.0; hidden_size],
            hidden_output: vec![0.0; hidden_size],
            output_net: 0.0,
            output: 0.0,
            target: logistic(target_value),
        };
        network.forward();
        Ok(network)
    }

    /// Recomputes all activations from the current inputs and weights. The
    /// accumulators are rebuilt from zero on every pass.
    fn forward(&mut self) {
        for j in 0..self.hidden_size {
            let mut net = 0.0;
            for (i, input) in self.inputs.iter().enumerate() {
                net += input * self.input_weights[i][j];
            }
            self.hidden_net[j] = net;
            self.hidden_output[j] = logistic(net);
        }

        self.output_net = self
            .hidden_output
            .iter()
            .zip(self.hidden_weights.iter())
            .map(|(out, weight)| out * weight)
            .sum();
        self.output = logistic(self.output_net);
    }

    /// Runs gradient-descent epochs until the output is within tolerance of
    /// the squashed target, bounded by [`MAX_EPOCHS`].
    ///
    /// Each epoch stages every proposed weight into separate buffers computed
    /// from the same pre-update snapshot, then commits both layers at once
    /// and refreshes the activations. Committing in place would let early
    /// updates leak into later ones within the same epoch.
    pub fn train(&mut self) {
        let mut epoch = 0;
        while (self.target - self.output).abs() > TOLERANCE && epoch < MAX_EPOCHS {
            let delta = (self.output - self.target) * self.output * (1.0 - self.output);

            let adj_hidden_weights: Vec<f64> = self
                .hidden_weights
                .iter()
                .zip(self.hidden_output.iter())
                .map(|(weight, hidden_out)| weight - LEARNING_RATE * delta * hidden_out)
                .collect();

            let adj_input_weights: Vec<Vec<f64>> = self
                .input_weights
                .iter()
                .zip(self.inputs.iter())
                .map(|(row, input)| {
                    row.iter()
                        .enumerate()
                        .map(|(j, weight)| {
                            let hidden_out = self.hidden_output[j];
                            weight
                                - LEARNING_RATE * delta * hidden_out * (1.0 - hidden_out) * input
                        })
                        .collect()
                })
                .collect();

            self.hidden_weights = adj_hidden_weights;
            self.input_weights = adj_input_weights;
            self.forward();
            epoch += 1;
        }

        if epoch == MAX_EPOCHS {
            debug!(
                "training stopped at the {MAX_EPOCHS}-epoch cap, residual error {:.3e}",
                (self.target - self.output).abs()
            );
        } else {
            debug!("training converged after {epoch} epochs");
        }
    }

    /// Swaps in a new already-normalized window, re-runs the forward pass and
    /// returns the unsquashed output, i.e. an estimate of the normalized next
    /// value. Mutates inputs and activations but never the weights.
    pub fn predict(&mut self, new_inputs: &[f64]) -> Result<f64, PredictorError> {
        if new_inputs.len() != self.inputs.len() {
            return Err(PredictorError::ShapeMismatch(format!(
                "prediction window has {} values, network expects {}",
                new_inputs.len(),
                self.inputs.len()
            )));
        }
        self.inputs.copy_from_slice(new_inputs);
        self.forward();
        unpack(self.output)
    }
}

/// Squashing function `1 / (1 + e^-x)`, mapping all finite reals into (0, 1).
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Algebraic inverse of [`logistic`], `-ln(-1 + 1/x)`. Only defined on the
/// open interval (0, 1); floating-point edge values of exactly 0 or 1 are
/// rejected rather than turned into infinities.
pub fn unpack(x: f64) -> Result<f64, PredictorError> {
    if x <= 0.0 || x >= 1.0 {
        return Err(PredictorError::NumericDomain(format!(
            "squashed value {x} lies outside the open interval (0, 1)"
        )));
    }
    Ok(-(1.0 / x - 1.0).ln())
}

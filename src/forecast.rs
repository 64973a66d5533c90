// src/forecast.rs

use log::debug;
use rand::Rng;

use crate::error::PredictorError;
use crate::models::{Normalizer, PredictiveNetwork};

/// Number of recent closes fed into one forecast: the most recent value is
/// held out as the training target, the rest are the training inputs. Longer
/// windows let stale prices dominate the prediction.
pub const WINDOW: usize = 4;

const NORM_HIGH: f64 = 1.0;
const NORM_LOW: f64 = -1.0;

/// Forecast the next value of a series from its most recent closes, ordered
/// most-recent first.
///
/// Two windows are cut from the series: a training window (the values before
/// the held-out most recent one) and a prediction window (the most recent
/// values, shifted forward by one step). Each window is normalized into
/// [-1, 1] against its own min/max, so the final denormalization must use
/// the prediction window's normalizer, never the training window's.
pub fn forecast_next<R: Rng + ?Sized>(
    closes: &[f64],
    rng: &mut R,
) -> Result<f64, PredictorError> {
    if closes.len() < WINDOW {
        return Err(PredictorError::ShapeMismatch(format!(
            "need at least {WINDOW} closes, got {}",
            closes.len()
        )));
    }

    // closes[0] is the most recent sample.
    let target = closes[0];
    let train_window = &closes[1..WINDOW];
    let predict_window = &closes[..WINDOW - 1];

    let train_norm = Normalizer::fit(train_window, NORM_HIGH, NORM_LOW)?;
    let predict_norm = Normalizer::fit(predict_window, NORM_HIGH, NORM_LOW)?;

    let train_inputs: Vec<f64> = train_window.iter().map(|&x| train_norm.normalize(x)).collect();
    let predict_inputs: Vec<f64> = predict_window
        .iter()
        .map(|&x| predict_norm.normalize(x))
        .collect();
    let normalized_target = train_norm.normalize(target);

    let mut network = PredictiveNetwork::new(train_inputs, normalized_target, rng)?;
    network.train();

    let normalized_prediction = network.predict(&predict_inputs)?;
    let prediction = predict_norm.denormalize(normalized_prediction);
    debug!("normalized prediction {normalized_prediction:.6} denormalized to {prediction:.6}");

    Ok(prediction)
}

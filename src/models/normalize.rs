// src/models/normalize.rs

use crate::error::PredictorError;

/// Min-max scaler between a raw data range and a target range.
///
/// Fitted once to a window's min/max and immutable afterwards. Training and
/// prediction windows are different slices of the series with different raw
/// ranges, so each window gets its own instance; denormalization of a
/// prediction must go through the prediction window's instance.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    data_high: f64,
    data_low: f64,
    norm_high: f64,
    norm_low: f64,
}

impl Normalizer {
    /// Construct with an explicit raw range and target range. Rejects flat
    /// ranges on either side, since the affine map degenerates there.
    pub fn new(
        high: f64,
        low: f64,
        norm_high: f64,
        norm_low: f64,
    ) -> Result<Self, PredictorError> {
        if high == low {
            return Err(PredictorError::NumericDomain(format!(
                "flat data range [{low}, {high}] cannot be normalized"
            )));
        }
        if norm_high == norm_low {
            return Err(PredictorError::NumericDomain(format!(
                "flat target range [{norm_low}, {norm_high}] cannot be denormalized"
            )));
        }
        Ok(Normalizer {
            data_high: high,
            data_low: low,
            norm_high,
            norm_low,
        })
    }

    /// Fit the raw range to the min/max of a sample window.
    pub fn fit(values: &[f64], norm_high: f64, norm_low: f64) -> Result<Self, PredictorError> {
        let high = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let low = values.iter().cloned().fold(f64::INFINITY, f64::min);
        if !high.is_finite() || !low.is_finite() {
            return Err(PredictorError::NumericDomain(
                "window has no finite extremes to fit".to_string(),
            ));
        }
        Self::new(high, low, norm_high, norm_low)
    }

    /// Affinely map `x` from the raw range into the target range. Monotonic
    /// non-decreasing in `x` when `data_high > data_low`.
    pub fn normalize(&self, x: f64) -> f64 {
        (x - self.data_low) / (self.data_high - self.data_low)
            * (self.norm_high - self.norm_low)
            + self.norm_low
    }

    /// Inverse of [`normalize`](Self::normalize), mapping a value in the
    /// target range back into the raw range.
    pub fn denormalize(&self, norm: f64) -> f64 {
        (norm - self.norm_low) / (self.norm_high - self.norm_low)
            * (self.data_high - self.data_low)
            + self.data_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_endpoints_and_midpoint() {
        let norm = Normalizer::new(10.0, 0.0, 1.0, -1.0).unwrap();
        assert!((norm.normalize(5.0) - 0.0).abs() < 1e-12);
        assert!((norm.normalize(10.0) - 1.0).abs() < 1e-12);
        assert!((norm.normalize(0.0) - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn flat_data_range_is_rejected() {
        let err = Normalizer::new(5.0, 5.0, 1.0, -1.0).unwrap_err();
        assert!(matches!(err, PredictorError::NumericDomain(_)));
    }

    #[test]
    fn flat_target_range_is_rejected() {
        let err = Normalizer::new(10.0, 0.0, 0.5, 0.5).unwrap_err();
        assert!(matches!(err, PredictorError::NumericDomain(_)));
    }

    #[test]
    fn round_trip_within_tolerance() {
        let norm = Normalizer::new(134.25, 118.6, 1.0, -1.0).unwrap();
        for &x in &[118.6, 120.0, 125.31, 130.0, 134.25] {
            let there_and_back = norm.denormalize(norm.normalize(x));
            assert!((there_and_back - x).abs() < 1e-9);
        }
    }

    #[test]
    fn normalize_is_monotonic() {
        let norm = Normalizer::new(42.0, 3.0, 1.0, -1.0).unwrap();
        let mut prev = f64::NEG_INFINITY;
        for i in 0..100 {
            let x = 3.0 + i as f64 * 0.39;
            let y = norm.normalize(x);
            assert!(y >= prev);
            prev = y;
        }
    }

    #[test]
    fn fit_uses_window_extremes() {
        let norm = Normalizer::fit(&[9.5, 10.0, 9.0], 1.0, -1.0).unwrap();
        assert!((norm.normalize(10.0) - 1.0).abs() < 1e-12);
        assert!((norm.normalize(9.0) - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn fit_rejects_flat_window() {
        assert!(Normalizer::fit(&[7.0, 7.0, 7.0], 1.0, -1.0).is_err());
    }

    #[test]
    fn fit_rejects_empty_window() {
        assert!(Normalizer::fit(&[], 1.0, -1.0).is_err());
    }
}

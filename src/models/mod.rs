// src/models/mod.rs

pub mod network;
pub mod normalize;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated OHLC record from the quote provider.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MarketData {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

// Re-export the numeric core
pub use network::PredictiveNetwork;
pub use normalize::Normalizer;

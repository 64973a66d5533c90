// src/utils/mod.rs

pub mod data_processing;

pub use data_processing::{closing_prices, fetch_time_series, parse_time_series, Interval};

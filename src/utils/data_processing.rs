// src/utils/data_processing.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::models::MarketData;

/// Sampling interval of the requested quote series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    /// Map the prompt letter to an interval, defaulting to weekly.
    pub fn from_letter(letter: &str) -> Interval {
        match letter.trim().to_lowercase().as_str() {
            "d" => Interval::Daily,
            "m" => Interval::Monthly,
            _ => Interval::Weekly,
        }
    }

    /// Alpha Vantage function name selecting this interval.
    pub fn function(self) -> &'static str {
        match self {
            Interval::Daily => "TIME_SERIES_DAILY",
            Interval::Weekly => "TIME_SERIES_WEEKLY",
            Interval::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Time unit for user-facing output.
    pub fn unit(self) -> &'static str {
        match self {
            Interval::Daily => "day",
            Interval::Weekly => "week",
            Interval::Monthly => "month",
        }
    }
}

// Quote fields arrive as JSON strings, e.g. "4. close": "134.2500"
#[derive(Debug, Deserialize)]
pub struct TimeSeriesEntry {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
}

/// Fetch a quote series for `ticker` from the Alpha Vantage API.
pub fn fetch_time_series(
    ticker: &str,
    interval: Interval,
) -> Result<Vec<MarketData>, Box<dyn std::error::Error>> {
    let api_key = std::env::var("ALPHAVANTAGE_API_KEY")?;
    let url = format!(
        "https://www.alphavantage.co/query?function={}&symbol={}&apikey={}",
        interval.function(),
        ticker,
        api_key
    );

    let client = Client::new();
    let body = client.get(&url).send()?.text()?;
    debug!("received {} bytes for '{}'", body.len(), ticker);

    parse_time_series(&body)
}

/// Parse an Alpha Vantage response body into quote records sorted
/// most-recent first.
///
/// The key of the time-series object varies with the requested function
/// ("Time Series (Daily)", "Weekly Time Series", ...), so it is located by
/// substring before the entries are deserialized.
pub fn parse_time_series(body: &str) -> Result<Vec<MarketData>, Box<dyn std::error::Error>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let object = value
        .as_object()
        .ok_or("response body is not a JSON object")?;

    let series = match object.iter().find(|(key, _)| key.contains("Time Series")) {
        Some((_, series)) => series,
        None => {
            // Throttling and bad tickers come back as 200s with a message.
            let message = object
                .get("Error Message")
                .or_else(|| object.get("Note"))
                .and_then(|m| m.as_str())
                .unwrap_or("no time series in response");
            return Err(message.to_string().into());
        }
    };

    let entries: HashMap<String, TimeSeriesEntry> = serde_json::from_value(series.clone())?;

    let mut market_data = Vec::new();
    for (date_str, entry) in entries {
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")?;
        let open = entry.open.parse::<f64>()?;
        let high = entry.high.parse::<f64>()?;
        let low = entry.low.parse::<f64>()?;
        let close = entry.close.parse::<f64>()?;

        market_data.push(MarketData {
            date,
            open,
            high,
            low,
            close,
        });
    }

    market_data.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(market_data)
}

/// Extract the close column, preserving order.
pub fn closing_prices(data: &[MarketData]) -> Vec<f64> {
    data.iter().map(|entry| entry.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEKLY_BODY: &str = r#"{
        "Meta Data": {
            "1. Information": "Weekly Prices (open, high, low, close) and Volumes",
            "2. Symbol": "MSFT"
        },
        "Weekly Time Series": {
            "2026-08-07": {
                "1. open": "130.0000",
                "2. high": "132.5000",
                "3. low": "129.1000",
                "4. close": "131.7000"
            },
            "2026-08-21": {
                "1. open": "131.9000",
                "2. high": "134.3000",
                "3. low": "130.8000",
                "4. close": "133.2500"
            },
            "2026-08-14": {
                "1. open": "131.5000",
                "2. high": "133.0000",
                "3. low": "130.2000",
                "4. close": "132.1000"
            }
        }
    }"#;

    #[test]
    fn parses_and_sorts_most_recent_first() {
        let series = parse_time_series(WEEKLY_BODY).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series[0].date,
            NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
        );
        assert_eq!(closing_prices(&series), vec![133.25, 132.1, 131.7]);
        assert!((series[0].open - 131.9).abs() < 1e-12);
        assert!((series[2].low - 129.1).abs() < 1e-12);
    }

    #[test]
    fn surfaces_api_error_messages() {
        let body = r#"{"Error Message": "Invalid API call."}"#;
        let err = parse_time_series(body).unwrap_err();
        assert_eq!(err.to_string(), "Invalid API call.");
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert!(parse_time_series("[1, 2, 3]").is_err());
        assert!(parse_time_series("not json").is_err());
    }

    #[test]
    fn interval_letters_map_with_weekly_default() {
        assert_eq!(Interval::from_letter("d"), Interval::Daily);
        assert_eq!(Interval::from_letter(" D "), Interval::Daily);
        assert_eq!(Interval::from_letter("w"), Interval::Weekly);
        assert_eq!(Interval::from_letter("m"), Interval::Monthly);
        assert_eq!(Interval::from_letter("x"), Interval::Weekly);
        assert_eq!(Interval::from_letter(""), Interval::Weekly);
    }

    #[test]
    fn interval_functions_match_the_api() {
        assert_eq!(Interval::Daily.function(), "TIME_SERIES_DAILY");
        assert_eq!(Interval::Weekly.function(), "TIME_SERIES_WEEKLY");
        assert_eq!(Interval::Monthly.function(), "TIME_SERIES_MONTHLY");
    }
}

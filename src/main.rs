// src/main.rs

use std::io::{self, BufRead, Write};

use log::{error, info};
use rand::thread_rng;

// Import modules
mod error;
mod forecast;
mod models;
mod utils;

use forecast::{forecast_next, WINDOW};
use utils::{closing_prices, fetch_time_series, Interval};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize environment variables
    dotenv::dotenv().ok();

    // Initialize the logger
    env_logger::init();

    println!("Before you get started here are some basic stock tickers!");
    println!("Google: GOOGL, Microsoft: MSFT, Facebook: FB, Netflix: NFLX");
    println!("Intel: INTC, Amazon: AMZN, Wal-Mart: WMT\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let ticker = prompt(&mut lines, "Enter a stock ticker you are interested in: ")?;
        let letter = prompt(&mut lines, "Enter D, W, or M for next day, week, month price: ")?;
        let interval = Interval::from_letter(&letter);

        match run_symbol(&ticker, interval) {
            Ok(price) => println!(
                "'{}' expected price for next {} is: {:.2}",
                ticker,
                interval.unit(),
                price
            ),
            Err(e) => error!("prediction for '{}' failed: {}", ticker, e),
        }

        let again = prompt(&mut lines, "Would you like to go again? ('y' for yes): ")?;
        println!();
        if !again.trim().eq_ignore_ascii_case("y") {
            break;
        }
    }

    Ok(())
}

/// Fetch the quote series for one symbol and forecast its next value.
fn run_symbol(ticker: &str, interval: Interval) -> Result<f64, Box<dyn std::error::Error>> {
    info!("fetching {} series for '{}'", interval.unit(), ticker);
    let series = fetch_time_series(ticker, interval)?;
    if series.len() < WINDOW {
        return Err(format!(
            "'{}' returned only {} samples, need {}",
            ticker,
            series.len(),
            WINDOW
        )
        .into());
    }

    let closes = closing_prices(&series);
    let price = forecast_next(&closes, &mut thread_rng())?;
    info!("forecast for '{}': {:.4}", ticker, price);
    Ok(price)
}

/// Print a prompt and read one trimmed line from stdin.
fn prompt<B: BufRead>(
    lines: &mut io::Lines<B>,
    message: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    print!("{message}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Err("stdin closed".into()),
    }
}

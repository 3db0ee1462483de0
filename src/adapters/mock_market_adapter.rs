//! Built-in demo market: eight listed stocks, a five-position portfolio and
//! twelve historical trades.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::error::MockstreetError;
use crate::domain::holding::Holding;
use crate::domain::stock::Stock;
use crate::domain::transaction::{TradeStatus, TradeType, Transaction};
use crate::ports::market_data_port::MarketDataPort;

#[derive(Debug, Clone, Default)]
pub struct MockMarketAdapter;

impl MockMarketAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl MarketDataPort for MockMarketAdapter {
    fn stocks(&self) -> Result<Vec<Stock>, MockstreetError> {
        Ok(sample_stocks())
    }

    fn holdings(&self) -> Result<Vec<Holding>, MockstreetError> {
        Ok(sample_holdings())
    }

    fn transactions(&self) -> Result<Vec<Transaction>, MockstreetError> {
        Ok(sample_transactions())
    }
}

fn stock(
    symbol: &str,
    name: &str,
    last_price: f64,
    change: f64,
    change_percent: f64,
    volume: &str,
    market_cap: &str,
) -> Stock {
    Stock {
        symbol: symbol.to_string(),
        name: name.to_string(),
        last_price,
        change,
        change_percent,
        volume: volume.to_string(),
        market_cap: market_cap.to_string(),
    }
}

pub fn sample_stocks() -> Vec<Stock> {
    vec![
        stock("AAPL", "Apple Inc", 189.56, 2.34, 1.25, "45.2M", "2.98T"),
        stock("TSLA", "Tesla Inc", 242.13, -5.87, -2.37, "89.7M", "768B"),
        stock("GOOGL", "Alphabet Inc", 138.21, 1.12, 0.82, "25.4M", "1.75T"),
        stock("MSFT", "Microsoft Corp", 378.85, 4.23, 1.13, "32.1M", "2.81T"),
        stock("AMZN", "Amazon.com Inc", 145.86, -2.14, -1.45, "41.8M", "1.51T"),
        stock("NVDA", "NVIDIA Corporation", 456.78, 12.45, 2.81, "67.3M", "1.12T"),
        stock("META", "Meta Platforms Inc", 312.64, -3.21, -1.02, "38.9M", "812B"),
        stock("NFLX", "Netflix Inc", 423.17, 7.89, 1.90, "15.6M", "188B"),
    ]
}

fn holding(
    symbol: &str,
    name: &str,
    qty: u32,
    avg_price: f64,
    current_price: f64,
    day_change: f64,
    day_change_percent: f64,
) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        name: name.to_string(),
        qty,
        avg_price,
        current_price,
        day_change,
        day_change_percent,
    }
}

pub fn sample_holdings() -> Vec<Holding> {
    vec![
        holding("AAPL", "Apple Inc", 15, 180.0, 189.56, 2.34, 1.25),
        holding("TSLA", "Tesla Inc", 8, 240.0, 242.13, -5.67, -2.29),
        holding("NVDA", "NVIDIA Corporation", 5, 420.0, 445.20, 8.90, 2.04),
        holding("MSFT", "Microsoft Corporation", 12, 340.0, 355.75, 1.25, 0.35),
        holding("GOOGL", "Alphabet Inc", 6, 125.0, 138.42, 0.89, 0.65),
    ]
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, day, hour, minute, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[allow(clippy::too_many_arguments)]
fn transaction(
    trade_id: &str,
    symbol: &str,
    name: &str,
    trade_type: TradeType,
    qty: u32,
    price: f64,
    trade_date: DateTime<Utc>,
    fees: f64,
) -> Transaction {
    Transaction {
        trade_id: trade_id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        trade_type,
        qty,
        price,
        total_amount: price * qty as f64,
        trade_date,
        status: TradeStatus::Completed,
        fees,
        exchange: "NASDAQ".to_string(),
    }
}

/// Newest first, as the history page lists them.
pub fn sample_transactions() -> Vec<Transaction> {
    use TradeType::{Buy, Sell};
    vec![
        transaction("TXN8901", "AAPL", "Apple Inc", Buy, 15, 180.0, at(27, 14, 30), 2.99),
        transaction("TXN8902", "TSLA", "Tesla Inc", Buy, 8, 240.0, at(27, 11, 15), 1.99),
        transaction("TXN8903", "AAPL", "Apple Inc", Sell, 5, 189.0, at(26, 16, 45), 1.99),
        transaction("TXN8904", "NVDA", "NVIDIA Corporation", Buy, 5, 420.0, at(26, 9, 30), 2.99),
        transaction("TXN8905", "MSFT", "Microsoft Corporation", Buy, 12, 340.0, at(25, 13, 20), 3.99),
        transaction("TXN8906", "GOOGL", "Alphabet Inc", Buy, 6, 125.0, at(25, 10, 0), 1.99),
        transaction("TXN8907", "TSLA", "Tesla Inc", Sell, 3, 235.0, at(24, 15, 30), 1.99),
        transaction("TXN8908", "AAPL", "Apple Inc", Buy, 10, 175.0, at(24, 11, 45), 2.99),
        transaction("TXN8909", "NVDA", "NVIDIA Corporation", Sell, 2, 410.0, at(23, 14, 15), 1.99),
        transaction("TXN8910", "MSFT", "Microsoft Corporation", Buy, 8, 335.0, at(23, 12, 0), 2.99),
        transaction("TXN8911", "GOOGL", "Alphabet Inc", Sell, 4, 120.0, at(22, 16, 30), 1.99),
        transaction("TXN8912", "AAPL", "Apple Inc", Buy, 20, 170.0, at(22, 10, 15), 3.99),
    ]
}

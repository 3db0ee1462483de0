#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use mockstreet::domain::error::MockstreetError;
use mockstreet::domain::holding::Holding;
pub use mockstreet::domain::stock::Stock;
use mockstreet::domain::transaction::{TradeStatus, TradeType, Transaction};
use mockstreet::ports::market_data_port::MarketDataPort;
use mockstreet::ports::random_port::RandomPort;

/// Replays a fixed list of draws, wrapping around at the end.
pub struct SequenceRandom {
    values: Vec<f64>,
    pos: usize,
    pub draws: usize,
}

impl SequenceRandom {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            pos: 0,
            draws: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(&[value])
    }
}

impl RandomPort for SequenceRandom {
    fn next(&mut self) -> f64 {
        let v = self.values[self.pos];
        self.pos = (self.pos + 1) % self.values.len();
        self.draws += 1;
        v
    }
}

pub struct MockMarketPort {
    pub stocks: Vec<Stock>,
    pub holdings: Vec<Holding>,
    pub transactions: Vec<Transaction>,
    pub error: Option<String>,
}

impl MockMarketPort {
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            holdings: Vec::new(),
            transactions: Vec::new(),
            error: None,
        }
    }

    pub fn with_stocks(mut self, stocks: Vec<Stock>) -> Self {
        self.stocks = stocks;
        self
    }

    pub fn with_holdings(mut self, holdings: Vec<Holding>) -> Self {
        self.holdings = holdings;
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    fn check(&self) -> Result<(), MockstreetError> {
        match &self.error {
            Some(reason) => Err(MockstreetError::Data {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl MarketDataPort for MockMarketPort {
    fn stocks(&self) -> Result<Vec<Stock>, MockstreetError> {
        self.check()?;
        Ok(self.stocks.clone())
    }

    fn holdings(&self) -> Result<Vec<Holding>, MockstreetError> {
        self.check()?;
        Ok(self.holdings.clone())
    }

    fn transactions(&self) -> Result<Vec<Transaction>, MockstreetError> {
        self.check()?;
        Ok(self.transactions.clone())
    }
}

pub fn make_stock(symbol: &str, name: &str, price: f64, change: f64, change_percent: f64) -> Stock {
    Stock {
        symbol: symbol.to_string(),
        name: name.to_string(),
        last_price: price,
        change,
        change_percent,
        volume: "1.0M".to_string(),
        market_cap: "10B".to_string(),
    }
}

/// The eight-stock listing the demo market ships with.
pub fn eight_stocks() -> Vec<Stock> {
    vec![
        make_stock("AAPL", "Apple Inc", 189.56, 2.34, 1.25),
        make_stock("TSLA", "Tesla Inc", 242.13, -5.87, -2.37),
        make_stock("GOOGL", "Alphabet Inc", 138.21, 1.12, 0.82),
        make_stock("MSFT", "Microsoft Corp", 378.85, 4.23, 1.13),
        make_stock("AMZN", "Amazon.com Inc", 145.86, -2.14, -1.45),
        make_stock("NVDA", "NVIDIA Corporation", 456.78, 12.45, 2.81),
        make_stock("META", "Meta Platforms Inc", 312.64, -3.21, -1.02),
        make_stock("NFLX", "Netflix Inc", 423.17, 7.89, 1.90),
    ]
}

pub fn make_holding(symbol: &str, qty: u32, avg_price: f64, current_price: f64) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        name: format!("{symbol} Corp"),
        qty,
        avg_price,
        current_price,
        day_change: 1.0,
        day_change_percent: 1.0 / (current_price - 1.0) * 100.0,
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn make_transaction(
    trade_id: &str,
    symbol: &str,
    trade_type: TradeType,
    qty: u32,
    price: f64,
    trade_date: DateTime<Utc>,
) -> Transaction {
    Transaction {
        trade_id: trade_id.to_string(),
        symbol: symbol.to_string(),
        name: format!("{symbol} Corp"),
        trade_type,
        qty,
        price,
        total_amount: price * qty as f64,
        trade_date,
        status: TradeStatus::Completed,
        fees: 1.0,
        exchange: "NASDAQ".to_string(),
    }
}

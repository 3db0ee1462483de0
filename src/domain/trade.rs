//! Trade ticket arithmetic and simulated order execution.

use chrono::{DateTime, Utc};

use crate::domain::error::MockstreetError;
use crate::domain::transaction::{TradeStatus, TradeType, Transaction};
use crate::ports::random_port::RandomPort;

pub const DEFAULT_BALANCE: f64 = 100_000.0;
pub const DEFAULT_EXCHANGE: &str = "NASDAQ";

#[derive(Debug, Clone, PartialEq)]
pub struct TradeTicket {
    pub symbol: String,
    pub side: TradeType,
    pub quantity: u32,
    pub price: f64,
}

impl TradeTicket {
    pub fn total(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Sells are always affordable; buys need the full total in cash.
    pub fn can_afford(&self, balance: f64) -> bool {
        match self.side {
            TradeType::Sell => true,
            TradeType::Buy => balance >= self.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeConfirmation {
    pub trade_id: String,
    pub message: String,
    pub amount: f64,
    pub side: TradeType,
    pub updated_balance: f64,
}

impl TradeConfirmation {
    pub fn to_transaction(
        &self,
        ticket: &TradeTicket,
        name: &str,
        executed_at: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            trade_id: self.trade_id.clone(),
            symbol: ticket.symbol.clone(),
            name: name.to_string(),
            trade_type: ticket.side,
            qty: ticket.quantity,
            price: ticket.price,
            total_amount: self.amount,
            trade_date: executed_at,
            status: TradeStatus::Completed,
            fees: 0.0,
            exchange: DEFAULT_EXCHANGE.to_string(),
        }
    }
}

/// Random `TXN0000`-`TXN9999` identifier.
pub fn next_trade_id(rng: &mut dyn RandomPort) -> String {
    let n = ((rng.next() * 10_000.0).floor() as u32).min(9_999);
    format!("TXN{n:04}")
}

/// Validate and settle a ticket against `balance`.
pub fn execute_trade(
    ticket: &TradeTicket,
    balance: f64,
    rng: &mut dyn RandomPort,
) -> Result<TradeConfirmation, MockstreetError> {
    if ticket.quantity == 0 {
        return Err(MockstreetError::invalid_argument(
            "quantity must be at least 1",
        ));
    }
    if !ticket.price.is_finite() || ticket.price <= 0.0 {
        return Err(MockstreetError::invalid_argument(format!(
            "price must be a finite positive number, got {}",
            ticket.price
        )));
    }

    let amount = ticket.total();
    if !ticket.can_afford(balance) {
        return Err(MockstreetError::InsufficientFunds {
            required: amount,
            available: balance,
        });
    }

    let (message, updated_balance) = match ticket.side {
        TradeType::Buy => ("Buy order executed successfully", balance - amount),
        TradeType::Sell => ("Sell order executed successfully", balance + amount),
    };

    Ok(TradeConfirmation {
        trade_id: next_trade_id(rng),
        message: message.to_string(),
        amount,
        side: ticket.side,
        updated_balance,
    })
}

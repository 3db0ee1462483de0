//! Trade history records, the history view query and summary statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::domain::filter::{compare_desc, compare_text, Category, DateRange, SearchTerm};
use crate::domain::table::TableQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
        }
    }

    /// `"BUY"` / `"SELL"` (any case); anything else, including `"ALL"`, is
    /// no type restriction.
    pub fn category_from_key(key: &str) -> Category<TradeType> {
        match key.trim().to_ascii_uppercase().as_str() {
            "BUY" => Category::Only(TradeType::Buy),
            "SELL" => Category::Only(TradeType::Sell),
            _ => Category::All,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Completed,
    Pending,
    Cancelled,
    Failed,
}

impl TradeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeStatus::Completed => "COMPLETED",
            TradeStatus::Pending => "PENDING",
            TradeStatus::Cancelled => "CANCELLED",
            TradeStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub trade_id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub qty: u32,
    pub price: f64,
    pub total_amount: f64,
    pub trade_date: DateTime<Utc>,
    pub status: TradeStatus,
    #[serde(default, deserialize_with = "zero_if_empty")]
    pub fees: f64,
    pub exchange: String,
}

fn zero_if_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionSort {
    #[default]
    Newest,
    Oldest,
    Amount,
    Symbol,
}

impl TransactionSort {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "oldest" => TransactionSort::Oldest,
            "amount" => TransactionSort::Amount,
            "symbol" => TransactionSort::Symbol,
            _ => TransactionSort::Newest,
        }
    }

    pub fn compare(self, a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
        match self {
            TransactionSort::Newest => b.trade_date.cmp(&a.trade_date),
            TransactionSort::Oldest => a.trade_date.cmp(&b.trade_date),
            TransactionSort::Amount => compare_desc(a.total_amount, b.total_amount),
            TransactionSort::Symbol => compare_text(&a.symbol, &b.symbol),
        }
    }
}

/// History view criteria. Search covers symbol, name and trade id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub search: SearchTerm,
    pub trade_type: Category<TradeType>,
    pub date_range: DateRange,
    pub sort: TransactionSort,
}

impl TransactionQuery {
    /// Build the table query. `now` anchors the date window for the whole
    /// evaluation.
    pub fn to_table_query(&self, now: DateTime<Utc>) -> TableQuery<'_, Transaction> {
        let mut query = TableQuery::new();
        if !self.search.is_empty() {
            query = query.filter(move |t: &Transaction| {
                self.search
                    .matches(&[t.symbol.as_str(), t.name.as_str(), t.trade_id.as_str()])
            });
        }
        if !self.trade_type.is_all() {
            let trade_type = self.trade_type;
            query = query.filter(move |t: &Transaction| trade_type.admits(&t.trade_type));
        }
        if let Some(cutoff) = self.date_range.cutoff(now) {
            query = query.filter(move |t: &Transaction| t.trade_date >= cutoff);
        }
        let sort = self.sort;
        query.sort_by(move |a: &Transaction, b: &Transaction| sort.compare(a, b))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSummary {
    pub total_buy_amount: f64,
    pub total_sell_amount: f64,
    pub buy_count: usize,
    pub sell_count: usize,
    pub total_fees: f64,
}

impl TransactionSummary {
    pub fn compute<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(Self::default(), |mut acc, t| {
                match t.trade_type {
                    TradeType::Buy => {
                        acc.total_buy_amount += t.total_amount;
                        acc.buy_count += 1;
                    }
                    TradeType::Sell => {
                        acc.total_sell_amount += t.total_amount;
                        acc.sell_count += 1;
                    }
                }
                acc.total_fees += t.fees;
                acc
            })
    }

    /// Sells minus buys.
    pub fn net_flow(&self) -> f64 {
        self.total_sell_amount - self.total_buy_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn txn(id: &str, symbol: &str, tt: TradeType, amount: f64, date: DateTime<Utc>) -> Transaction {
        Transaction {
            trade_id: id.into(),
            symbol: symbol.into(),
            name: format!("{symbol} Inc"),
            trade_type: tt,
            qty: 1,
            price: amount,
            total_amount: amount,
            trade_date: date,
            status: TradeStatus::Completed,
            fees: 1.5,
            exchange: "NASDAQ".into(),
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, d, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("TXN1", "AAPL", TradeType::Buy, 100.0, day(27)),
            txn("TXN2", "TSLA", TradeType::Sell, 300.0, day(20)),
            txn("TXN3", "AAPL", TradeType::Sell, 200.0, day(10)),
            txn("TXN4", "MSFT", TradeType::Buy, 50.0, day(1)),
        ]
    }

    fn ids(items: &[&Transaction]) -> Vec<String> {
        items.iter().map(|t| t.trade_id.clone()).collect()
    }

    #[test]
    fn type_category_keys() {
        assert_eq!(TradeType::category_from_key("buy"), Category::Only(TradeType::Buy));
        assert_eq!(TradeType::category_from_key("SELL"), Category::Only(TradeType::Sell));
        assert_eq!(TradeType::category_from_key("ALL"), Category::All);
    }

    #[test]
    fn search_covers_trade_id() {
        let data = sample();
        let query = TransactionQuery {
            search: SearchTerm::new("txn3"),
            ..TransactionQuery::default()
        };
        let found = query.to_table_query(day(27)).apply(&data);
        assert_eq!(ids(&found), vec!["TXN3"]);
    }

    #[test]
    fn type_and_date_are_combined() {
        let data = sample();
        let query = TransactionQuery {
            trade_type: Category::Only(TradeType::Sell),
            date_range: DateRange::Week,
            ..TransactionQuery::default()
        };
        let found = query.to_table_query(day(27)).apply(&data);
        assert_eq!(ids(&found), vec!["TXN2"]);
    }

    #[test]
    fn month_window() {
        let data = sample();
        let query = TransactionQuery {
            date_range: DateRange::Month,
            ..TransactionQuery::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 9, 5, 12, 0, 0).unwrap();
        let found = query.to_table_query(now).apply(&data);
        assert_eq!(ids(&found), vec!["TXN1", "TXN2", "TXN3"]);
    }

    #[test]
    fn sort_orders() {
        let data = sample();
        let by = |sort| {
            let q = TransactionQuery {
                sort,
                ..TransactionQuery::default()
            };
            ids(&q.to_table_query(day(27)).apply(&data))
        };
        assert_eq!(by(TransactionSort::Newest), vec!["TXN1", "TXN2", "TXN3", "TXN4"]);
        assert_eq!(by(TransactionSort::Oldest), vec!["TXN4", "TXN3", "TXN2", "TXN1"]);
        assert_eq!(by(TransactionSort::Amount), vec!["TXN2", "TXN3", "TXN1", "TXN4"]);
        assert_eq!(by(TransactionSort::Symbol), vec!["TXN1", "TXN3", "TXN4", "TXN2"]);
    }

    #[test]
    fn summary_splits_buys_and_sells() {
        let data = sample();
        let s = TransactionSummary::compute(&data);
        assert_relative_eq!(s.total_buy_amount, 150.0);
        assert_relative_eq!(s.total_sell_amount, 500.0);
        assert_eq!(s.buy_count, 2);
        assert_eq!(s.sell_count, 2);
        assert_relative_eq!(s.total_fees, 6.0);
        assert_relative_eq!(s.net_flow(), 350.0);
    }

    #[test]
    fn summary_of_nothing() {
        let s = TransactionSummary::compute(&[]);
        assert_eq!(s, TransactionSummary::default());
    }
}

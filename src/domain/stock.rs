//! Stock quotes, the listing query and the market summary.

use serde::Deserialize;

use crate::domain::filter::{compare_desc, compare_text, SearchTerm};
use crate::domain::table::TableQuery;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub last_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: String,
    pub market_cap: String,
}

impl Stock {
    pub fn is_gainer(&self) -> bool {
        self.change > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.change < 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockFilter {
    #[default]
    All,
    Gainers,
    Losers,
}

impl StockFilter {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "gainers" => StockFilter::Gainers,
            "losers" => StockFilter::Losers,
            _ => StockFilter::All,
        }
    }

    pub fn admits(self, stock: &Stock) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Gainers => stock.is_gainer(),
            StockFilter::Losers => stock.is_loser(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockSort {
    #[default]
    Symbol,
    Name,
    Price,
    Change,
    ChangePercent,
}

impl StockSort {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "name" => StockSort::Name,
            "price" => StockSort::Price,
            "change" => StockSort::Change,
            "changepercent" => StockSort::ChangePercent,
            _ => StockSort::Symbol,
        }
    }

    pub fn compare(self, a: &Stock, b: &Stock) -> std::cmp::Ordering {
        match self {
            StockSort::Symbol => compare_text(&a.symbol, &b.symbol),
            StockSort::Name => compare_text(&a.name, &b.name),
            StockSort::Price => compare_desc(a.last_price, b.last_price),
            StockSort::Change => compare_desc(a.change, b.change),
            StockSort::ChangePercent => compare_desc(a.change_percent, b.change_percent),
        }
    }
}

/// Listing view criteria: search over symbol and name, gainer/loser filter,
/// one sort key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockQuery {
    pub search: SearchTerm,
    pub filter: StockFilter,
    pub sort: StockSort,
}

impl StockQuery {
    pub fn to_table_query(&self) -> TableQuery<'_, Stock> {
        let mut query = TableQuery::new();
        if !self.search.is_empty() {
            query = query.filter(move |s: &Stock| {
                self.search.matches(&[s.symbol.as_str(), s.name.as_str()])
            });
        }
        if self.filter != StockFilter::All {
            let filter = self.filter;
            query = query.filter(move |s: &Stock| filter.admits(s));
        }
        let sort = self.sort;
        query.sort_by(move |a: &Stock, b: &Stock| sort.compare(a, b))
    }
}

/// Header figures for the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary<'a> {
    pub top_gainer: Option<&'a Stock>,
    pub top_loser: Option<&'a Stock>,
    pub total: usize,
}

impl<'a> MarketSummary<'a> {
    /// Best and worst by change percent; the earliest stock wins a tie.
    pub fn compute(stocks: &'a [Stock]) -> Self {
        let mut top_gainer: Option<&Stock> = None;
        let mut top_loser: Option<&Stock> = None;
        for stock in stocks {
            if top_gainer.is_none_or(|g| stock.change_percent > g.change_percent) {
                top_gainer = Some(stock);
            }
            if top_loser.is_none_or(|l| stock.change_percent < l.change_percent) {
                top_loser = Some(stock);
            }
        }
        Self {
            top_gainer,
            top_loser,
            total: stocks.len(),
        }
    }
}

//! Portfolio holdings, valuation and the portfolio view query.

use serde::Deserialize;

use crate::domain::filter::{compare_desc, compare_text, SearchTerm};
use crate::domain::series::PRICE_FLOOR;
use crate::domain::table::TableQuery;
use crate::ports::random_port::RandomPort;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub qty: u32,
    pub avg_price: f64,
    pub current_price: f64,
    pub day_change: f64,
    pub day_change_percent: f64,
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.qty as f64 * self.current_price
    }

    pub fn cost_basis(&self) -> f64 {
        self.qty as f64 * self.avg_price
    }

    pub fn profit_loss(&self) -> f64 {
        self.market_value() - self.cost_basis()
    }

    /// Return on the average entry price, in percent.
    pub fn profit_loss_percent(&self) -> f64 {
        if self.avg_price == 0.0 {
            return 0.0;
        }
        (self.current_price - self.avg_price) / self.avg_price * 100.0
    }

    /// Value change over the day for the whole position.
    pub fn position_day_change(&self) -> f64 {
        self.qty as f64 * self.day_change
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoldingSort {
    #[default]
    Symbol,
    Value,
    ProfitLoss,
    ProfitLossPercent,
    DayChange,
}

impl HoldingSort {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "value" | "totalvalue" => HoldingSort::Value,
            "profitloss" | "pl" => HoldingSort::ProfitLoss,
            "profitlosspercent" | "plpercent" => HoldingSort::ProfitLossPercent,
            "daychange" => HoldingSort::DayChange,
            _ => HoldingSort::Symbol,
        }
    }

    pub fn compare(self, a: &Holding, b: &Holding) -> std::cmp::Ordering {
        match self {
            HoldingSort::Symbol => compare_text(&a.symbol, &b.symbol),
            HoldingSort::Value => compare_desc(a.market_value(), b.market_value()),
            HoldingSort::ProfitLoss => compare_desc(a.profit_loss(), b.profit_loss()),
            HoldingSort::ProfitLossPercent => {
                compare_desc(a.profit_loss_percent(), b.profit_loss_percent())
            }
            HoldingSort::DayChange => compare_desc(a.day_change_percent, b.day_change_percent),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingQuery {
    pub search: SearchTerm,
    pub sort: HoldingSort,
}

impl HoldingQuery {
    pub fn to_table_query(&self) -> TableQuery<'_, Holding> {
        let mut query = TableQuery::new();
        if !self.search.is_empty() {
            query = query.filter(move |h: &Holding| {
                self.search.matches(&[h.symbol.as_str(), h.name.as_str()])
            });
        }
        let sort = self.sort;
        query.sort_by(move |a: &Holding, b: &Holding| sort.compare(a, b))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_investment: f64,
    pub total_profit_loss: f64,
    pub total_profit_loss_percent: f64,
    pub day_change: f64,
    /// Day change relative to the previous close value of the portfolio.
    pub day_change_percent: f64,
    pub positions: usize,
}

impl PortfolioSummary {
    pub fn compute(holdings: &[Holding]) -> Self {
        let total_value: f64 = holdings.iter().map(Holding::market_value).sum();
        let total_investment: f64 = holdings.iter().map(Holding::cost_basis).sum();
        let day_change: f64 = holdings.iter().map(Holding::position_day_change).sum();
        let total_profit_loss = total_value - total_investment;

        let total_profit_loss_percent = if total_investment > 0.0 {
            total_profit_loss / total_investment * 100.0
        } else {
            0.0
        };
        let previous_value = total_value - day_change;
        let day_change_percent = if previous_value > 0.0 {
            day_change / previous_value * 100.0
        } else {
            0.0
        };

        Self {
            total_value,
            total_investment,
            total_profit_loss,
            total_profit_loss_percent,
            day_change,
            day_change_percent,
            positions: holdings.len(),
        }
    }
}

/// One slice of the allocation pie.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub symbol: String,
    pub value: f64,
    pub weight_percent: f64,
}

pub fn allocations(holdings: &[Holding]) -> Vec<Allocation> {
    let total: f64 = holdings.iter().map(Holding::market_value).sum();
    holdings
        .iter()
        .map(|h| {
            let value = h.market_value();
            Allocation {
                symbol: h.symbol.clone(),
                value,
                weight_percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            }
        })
        .collect()
}

/// Jitter quotes to simulate a refresh: price moves up to +/-1.00 and the
/// day change up to +/-0.50. Returns new holdings.
pub fn refresh_quotes(holdings: &[Holding], rng: &mut dyn RandomPort) -> Vec<Holding> {
    holdings
        .iter()
        .map(|h| {
            let current_price = (h.current_price + (rng.next() - 0.5) * 2.0).max(PRICE_FLOOR);
            let day_change = h.day_change + (rng.next() - 0.5);
            Holding {
                current_price,
                day_change,
                ..h.clone()
            }
        })
        .collect()
}

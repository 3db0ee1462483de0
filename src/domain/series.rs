//! Synthetic trailing price history.
//!
//! Generates a noisy daily random walk that is pulled increasingly hard
//! towards the current price as it approaches "now", and always ends on
//! exactly that price. Used to back the trading chart when no real history
//! exists.

use crate::domain::error::MockstreetError;
use crate::domain::format::round_to_cents;
use crate::ports::random_port::RandomPort;

pub const DEFAULT_SERIES_DAYS: usize = 30;
pub const MAX_SERIES_DAYS: usize = 3650;
/// Largest accepted current price. Keeps cent rounding finite.
pub const MAX_SERIES_PRICE: f64 = 1e12;

/// Lowest price the walk may reach.
pub const PRICE_FLOOR: f64 = 0.01;

pub const NOW_LABEL: &str = "Now";

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub label: String,
    pub price: f64,
}

impl PricePoint {
    pub fn is_now(&self) -> bool {
        self.label == NOW_LABEL
    }
}

/// Shape parameters for the walk.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesParams {
    /// Maximum daily move as a fraction of the running price.
    pub volatility: f64,
    /// Fraction of the gap to the current price closed on the last step.
    pub trend_strength: f64,
    /// Minimum distance of the starting price below the current price.
    pub start_offset: f64,
    /// Random extra distance added to `start_offset`.
    pub start_spread: f64,
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self {
            volatility: 0.02,
            trend_strength: 0.1,
            start_offset: 5.0,
            start_spread: 15.0,
        }
    }
}

/// Label for a point `days_ago` days before now.
pub fn day_label(days_ago: usize) -> String {
    if days_ago == 0 {
        NOW_LABEL.to_string()
    } else {
        format!("{days_ago}d")
    }
}

/// `days + 1` points from `days` ago up to now, ending at `current_price`.
pub fn generate_series(
    current_price: f64,
    days: usize,
    rng: &mut dyn RandomPort,
) -> Result<Vec<PricePoint>, MockstreetError> {
    generate_series_with(current_price, days, &SeriesParams::default(), rng)
}

pub fn generate_series_with(
    current_price: f64,
    days: usize,
    params: &SeriesParams,
    rng: &mut dyn RandomPort,
) -> Result<Vec<PricePoint>, MockstreetError> {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Err(MockstreetError::invalid_argument(format!(
            "current price must be a finite positive number, got {current_price}"
        )));
    }
    if current_price > MAX_SERIES_PRICE {
        return Err(MockstreetError::invalid_argument(format!(
            "current price must be at most {MAX_SERIES_PRICE}, got {current_price}"
        )));
    }
    if days > MAX_SERIES_DAYS {
        return Err(MockstreetError::invalid_argument(format!(
            "days must be at most {MAX_SERIES_DAYS}, got {days}"
        )));
    }

    let mut price =
        (current_price - (rng.next() * params.start_spread + params.start_offset)).max(PRICE_FLOOR);
    let mut points = Vec::with_capacity(days + 1);

    for remaining in (0..=days).rev() {
        let change = (rng.next() - 0.5) * 2.0 * params.volatility * price;
        price += change;

        let trend_factor = if days == 0 {
            1.0
        } else {
            (days - remaining) as f64 / days as f64
        };
        price += (current_price - price) * trend_factor * params.trend_strength;
        price = price.max(PRICE_FLOOR);

        points.push(PricePoint {
            label: day_label(remaining),
            price: round_to_cents(price),
        });
    }

    if let Some(last) = points.last_mut() {
        last.price = round_to_cents(current_price);
    }

    Ok(points)
}

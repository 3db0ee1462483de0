//! Market data access port trait.

use crate::domain::error::MockstreetError;
use crate::domain::holding::Holding;
use crate::domain::stock::Stock;
use crate::domain::transaction::Transaction;

pub trait MarketDataPort {
    fn stocks(&self) -> Result<Vec<Stock>, MockstreetError>;

    fn holdings(&self) -> Result<Vec<Holding>, MockstreetError>;

    fn transactions(&self) -> Result<Vec<Transaction>, MockstreetError>;

    /// Case-insensitive symbol lookup over [`MarketDataPort::stocks`].
    fn find_stock(&self, symbol: &str) -> Result<Stock, MockstreetError> {
        self.stocks()?
            .into_iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| MockstreetError::UnknownSymbol {
                symbol: symbol.to_uppercase(),
            })
    }
}

//! Concrete implementations of the port traits.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod mock_market_adapter;
pub mod rand_adapter;
pub mod svg_chart;

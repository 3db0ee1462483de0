//! Port traits at the seams between domain logic and the outside world.

pub mod config_port;
pub mod export_port;
pub mod market_data_port;
pub mod random_port;

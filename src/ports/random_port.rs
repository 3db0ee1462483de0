//! Random number source port.
//!
//! Everything that draws randomness (series generation, quote refresh,
//! trade ids) takes a `&mut dyn RandomPort` so tests can inject a fixed
//! sequence.

pub trait RandomPort {
    /// Next uniform draw in `[0, 1)`.
    fn next(&mut self) -> f64;
}

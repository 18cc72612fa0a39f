//! Shared data types for the debt strategy engine, the household permission
//! model and the API service.

pub mod credit;
pub mod debt;
pub mod household;
pub mod settings;

pub use credit::*;
pub use debt::*;
pub use household::*;
pub use settings::*;

/// Rounds a currency amount to cents.
pub fn round2(v: f64) -> f64 {
	(v * 100.0).round() / 100.0
}

/// Rounds a ratio to four decimals.
pub fn round4(v: f64) -> f64 {
	(v * 10000.0).round() / 10000.0
}

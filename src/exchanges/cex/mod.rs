//! Centralized Exchange Implementations

pub mod bequant;
pub mod hitbtc;

pub use bequant::Bequant;
pub use hitbtc::Hitbtc;

//! CCXT-HitBTC: HitBTC 거래소 어댑터
//!
//! CCXT 스타일 통합 타입으로 HitBTC REST API를 변환하는 어댑터 라이브러리

pub mod client;
pub mod errors;
pub mod exchanges;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{ExchangeConfig, HttpClient, RateLimiter};
pub use errors::{CcxtError, CcxtResult};
pub use exchanges::{Bequant, Hitbtc};
pub use types::Exchange;

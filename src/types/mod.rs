//! Unified types
//!
//! 모든 어댑터가 생산해야 하는 거래소 중립 레코드

mod account;
mod balance;
mod currency;
mod exchange;
mod fee;
mod market;
mod ohlcv;
mod order;
mod orderbook;
mod ticker;
mod trade;
mod transaction;

pub use account::{AccountType, DepositAddress};
pub use balance::{Balance, Balances};
pub use currency::Currency;
pub use exchange::{
    Exchange, ExchangeFeatures, ExchangeId, ExchangeUrls, SignedRequest, Timeframe,
};
pub use fee::{Fee, TradingFees};
pub use market::{Market, MarketLimits, MarketPrecision, MarketType, MinMax};
pub use ohlcv::OHLCV;
pub use order::{Order, OrderSide, OrderStatus, OrderType, TimeInForce};
pub use orderbook::{OrderBook, OrderBookEntry};
pub use ticker::Ticker;
pub use trade::{TakerOrMaker, Trade};
pub use transaction::{Transaction, TransactionStatus, TransactionType};

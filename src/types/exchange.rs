//! Exchange trait - 거래소 통합 인터페이스

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    Balances, Currency, DepositAddress, Market, Order, OrderBook, OrderSide, OrderType, Ticker,
    Trade, TradingFees, Transaction, OHLCV,
};
use crate::errors::CcxtResult;

/// 거래소 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Hitbtc,
    /// Hitbtc alias
    Bequant,
}

impl ExchangeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Hitbtc => "hitbtc",
            ExchangeId::Bequant => "bequant",
        }
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 타임프레임
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "3m")]
    Minute3,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute3 => "3m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Day1 => "1d",
            Timeframe::Week1 => "1w",
            Timeframe::Month1 => "1M",
        }
    }

    /// 밀리초 단위 기간
    pub fn to_millis(&self) -> i64 {
        match self {
            Timeframe::Minute1 => 60 * 1000,
            Timeframe::Minute3 => 3 * 60 * 1000,
            Timeframe::Minute5 => 5 * 60 * 1000,
            Timeframe::Minute15 => 15 * 60 * 1000,
            Timeframe::Minute30 => 30 * 60 * 1000,
            Timeframe::Hour1 => 60 * 60 * 1000,
            Timeframe::Hour4 => 4 * 60 * 60 * 1000,
            Timeframe::Day1 => 24 * 60 * 60 * 1000,
            Timeframe::Week1 => 7 * 24 * 60 * 60 * 1000,
            Timeframe::Month1 => 30 * 24 * 60 * 60 * 1000,
        }
    }
}

/// 거래소 지원 기능 플래그
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeFeatures {
    pub cors: bool,
    pub spot: bool,
    pub margin: bool,
    pub swap: bool,
    pub future: bool,
    pub option: bool,

    pub fetch_markets: bool,
    pub fetch_currencies: bool,
    pub fetch_ticker: bool,
    pub fetch_tickers: bool,
    pub fetch_order_book: bool,
    pub fetch_trades: bool,
    pub fetch_ohlcv: bool,

    pub fetch_balance: bool,
    pub create_order: bool,
    pub edit_order: bool,
    pub cancel_order: bool,
    pub fetch_order: bool,
    pub fetch_open_orders: bool,
    pub fetch_closed_orders: bool,
    pub fetch_order_trades: bool,
    pub fetch_my_trades: bool,
    pub fetch_trading_fee: bool,

    pub fetch_deposit_address: bool,
    pub create_deposit_address: bool,
    pub withdraw: bool,
    pub fetch_transactions: bool,
    pub fetch_deposits: bool,
    pub fetch_withdrawals: bool,
}

/// 거래소 URL 정보
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeUrls {
    pub logo: Option<String>,
    pub api: HashMap<String, String>,
    pub www: Option<String>,
    pub doc: Vec<String>,
    pub fees: Option<String>,
}

/// 서명된 요청
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

/// 거래소 통합 인터페이스
///
/// 구현하지 않는 오퍼레이션은 NotSupported를 돌려준다.
#[async_trait]
pub trait Exchange: Send + Sync {
    // === 메타데이터 ===

    /// 거래소 ID
    fn id(&self) -> ExchangeId;

    /// 거래소 이름
    fn name(&self) -> &str;

    /// API 버전
    fn version(&self) -> &str {
        "v1"
    }

    /// 레이트 리밋 (밀리초)
    fn rate_limit(&self) -> u64 {
        1000
    }

    /// 지원 기능
    fn has(&self) -> &ExchangeFeatures;

    /// URL 정보
    fn urls(&self) -> &ExchangeUrls;

    /// 지원 타임프레임
    fn timeframes(&self) -> &HashMap<Timeframe, String>;

    // === Public API ===

    /// 마켓 로드 (캐싱)
    async fn load_markets(&self, reload: bool) -> CcxtResult<HashMap<String, Market>>;

    /// 마켓 목록 조회
    async fn fetch_markets(&self) -> CcxtResult<Vec<Market>>;

    /// 화폐 목록 조회
    async fn fetch_currencies(&self) -> CcxtResult<HashMap<String, Currency>> {
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchCurrencies".into(),
        })
    }

    /// 시세 조회
    async fn fetch_ticker(&self, symbol: &str) -> CcxtResult<Ticker>;

    /// 복수 시세 조회
    async fn fetch_tickers(&self, symbols: Option<&[&str]>) -> CcxtResult<HashMap<String, Ticker>> {
        let _ = symbols;
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchTickers".into(),
        })
    }

    /// 호가창 조회
    async fn fetch_order_book(&self, symbol: &str, limit: Option<u32>) -> CcxtResult<OrderBook>;

    /// 체결 내역 조회
    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>>;

    /// OHLCV 조회
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<OHLCV>>;

    // === Private API ===

    /// 잔고 조회
    async fn fetch_balance(&self) -> CcxtResult<Balances>;

    /// 마켓별 거래 수수료 조회
    async fn fetch_trading_fee(&self, symbol: &str) -> CcxtResult<TradingFees> {
        let _ = symbol;
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchTradingFee".into(),
        })
    }

    /// 주문 생성
    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> CcxtResult<Order>;

    /// 지정가 주문 생성
    async fn create_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> CcxtResult<Order> {
        self.create_order(symbol, OrderType::Limit, side, amount, Some(price))
            .await
    }

    /// 시장가 주문 생성
    async fn create_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        amount: Decimal,
    ) -> CcxtResult<Order> {
        self.create_order(symbol, OrderType::Market, side, amount, None)
            .await
    }

    /// 주문 수정
    async fn edit_order(
        &self,
        id: &str,
        symbol: &str,
        amount: Option<Decimal>,
        price: Option<Decimal>,
    ) -> CcxtResult<Order> {
        let _ = (id, symbol, amount, price);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "editOrder".into(),
        })
    }

    /// 주문 취소
    async fn cancel_order(&self, id: &str, symbol: &str) -> CcxtResult<Order>;

    /// 주문 조회
    async fn fetch_order(&self, id: &str, symbol: &str) -> CcxtResult<Order>;

    /// 미체결 주문 목록
    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>>;

    /// 종료된 주문 목록
    async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        let _ = (symbol, since, limit);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchClosedOrders".into(),
        })
    }

    /// 특정 주문의 체결 내역
    async fn fetch_order_trades(
        &self,
        id: &str,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        let _ = (id, symbol, since, limit);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchOrderTrades".into(),
        })
    }

    /// 내 체결 내역
    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        let _ = (symbol, since, limit);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchMyTrades".into(),
        })
    }

    // === 입출금 ===

    /// 입금 주소 조회
    async fn fetch_deposit_address(&self, code: &str) -> CcxtResult<DepositAddress> {
        let _ = code;
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchDepositAddress".into(),
        })
    }

    /// 입금 주소 생성
    async fn create_deposit_address(&self, code: &str) -> CcxtResult<DepositAddress> {
        let _ = code;
        Err(crate::errors::CcxtError::NotSupported {
            feature: "createDepositAddress".into(),
        })
    }

    /// 출금
    async fn withdraw(
        &self,
        code: &str,
        amount: Decimal,
        address: &str,
        tag: Option<&str>,
    ) -> CcxtResult<Transaction> {
        let _ = (code, amount, address, tag);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "withdraw".into(),
        })
    }

    /// 입출금 내역
    async fn fetch_transactions(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let _ = (code, since, limit);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchTransactions".into(),
        })
    }

    /// 입금 내역
    async fn fetch_deposits(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let _ = (code, since, limit);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchDeposits".into(),
        })
    }

    /// 출금 내역
    async fn fetch_withdrawals(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let _ = (code, since, limit);
        Err(crate::errors::CcxtError::NotSupported {
            feature: "fetchWithdrawals".into(),
        })
    }

    // === Utilities ===

    /// 심볼을 마켓 ID로 변환
    fn market_id(&self, symbol: &str) -> Option<String>;

    /// 마켓 ID를 심볼로 변환
    fn symbol(&self, market_id: &str) -> Option<String>;

    /// 요청 서명
    ///
    /// 비공개 API 경로에 자격 증명이 없으면 AuthenticationError.
    fn sign(
        &self,
        path: &str,
        api: &str,
        method: &str,
        params: &HashMap<String, String>,
        body: Option<&str>,
    ) -> CcxtResult<SignedRequest>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe() {
        assert_eq!(Timeframe::Minute1.as_str(), "1m");
        assert_eq!(Timeframe::Hour1.to_millis(), 3600000);
        assert_eq!(Timeframe::Day1.to_millis(), 86400000);
    }

    #[test]
    fn test_exchange_id() {
        assert_eq!(ExchangeId::Hitbtc.as_str(), "hitbtc");
        assert_eq!(format!("{}", ExchangeId::Bequant), "bequant");
    }
}

//! HitBTC Exchange Implementation
//!
//! REST API v2 어댑터. 인증은 HTTP Basic (base64 "key:secret").

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::client::{ExchangeConfig, HttpClient, RateLimiter};
use crate::errors::{CcxtError, CcxtResult};
use crate::types::{
    AccountType, Balance, Balances, Currency, DepositAddress, Exchange, ExchangeFeatures,
    ExchangeId, ExchangeUrls, Fee, Market, MarketLimits, MarketPrecision, MinMax, Order, OrderBook,
    OrderBookEntry, OrderSide, OrderStatus, OrderType, SignedRequest, Ticker, TimeInForce,
    Timeframe, Trade, TradingFees, Transaction, TransactionStatus, TransactionType, OHLCV,
};
use crate::utils::parse::{parse_iso8601, parse_order_side};
use crate::utils::time::timestamp_to_iso8601;

/// REST 엔드포인트 카탈로그
///
/// 경로 파라미터가 있는 엔드포인트는 호출부에서 `/{...}`를 덧붙인다.
mod api {
    pub const PUBLIC_SYMBOL: &str = "/public/symbol";
    pub const PUBLIC_CURRENCY: &str = "/public/currency";
    pub const PUBLIC_TICKER: &str = "/public/ticker";
    pub const PUBLIC_TRADES: &str = "/public/trades";
    pub const PUBLIC_ORDERBOOK: &str = "/public/orderbook";
    pub const PUBLIC_CANDLES: &str = "/public/candles";

    pub const ORDER: &str = "/order";
    pub const TRADING_BALANCE: &str = "/trading/balance";
    pub const ACCOUNT_BALANCE: &str = "/account/balance";
    pub const TRADING_FEE: &str = "/trading/fee";
    pub const HISTORY_ORDER: &str = "/history/order";
    pub const HISTORY_TRADES: &str = "/history/trades";
    pub const CRYPTO_ADDRESS: &str = "/account/crypto/address";
    pub const CRYPTO_WITHDRAW: &str = "/account/crypto/withdraw";
    pub const ACCOUNT_TRANSACTIONS: &str = "/account/transactions";
}

/// 계정 타입별 잔고 엔드포인트
const BALANCE_ENDPOINTS: &[(AccountType, &str)] = &[
    (AccountType::Trading, api::TRADING_BALANCE),
    (AccountType::Account, api::ACCOUNT_BALANCE),
];

/// 거래소 주문 상태 → 통합 상태 (미등록 상태는 원본 보존)
const ORDER_STATUSES: &[(&str, OrderStatus)] = &[
    ("new", OrderStatus::Open),
    ("suspended", OrderStatus::Open),
    ("partiallyFilled", OrderStatus::Open),
    ("filled", OrderStatus::Closed),
    ("canceled", OrderStatus::Canceled),
    ("expired", OrderStatus::Failed),
];

/// 거래소 주문 타입 → 통합 타입 (미등록 타입은 limit 취급)
const ORDER_TYPES: &[(&str, OrderType)] = &[
    ("limit", OrderType::Limit),
    ("market", OrderType::Market),
    ("stopLimit", OrderType::StopLimit),
    ("stopMarket", OrderType::StopMarket),
];

/// 거래소 트랜잭션 상태 → 통합 상태 (미등록 상태는 원본 보존)
const TRANSACTION_STATUSES: &[(&str, TransactionStatus)] = &[
    ("pending", TransactionStatus::Pending),
    ("failed", TransactionStatus::Failed),
    ("success", TransactionStatus::Ok),
];

/// 거래소 트랜잭션 타입 → 통합 타입 (미등록 타입은 None)
const TRANSACTION_TYPES: &[(&str, TransactionType)] = &[
    ("payin", TransactionType::Deposit),
    ("payout", TransactionType::Withdrawal),
    ("withdraw", TransactionType::Withdrawal),
];

/// 거래소 에러 코드 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiErrorKind {
    Timeout,
    Authentication,
    Permission,
    BadSymbol,
    InvalidOrder,
    InsufficientFunds,
    OrderNotFound,
}

const ERROR_CODES: &[(i64, ApiErrorKind)] = &[
    (504, ApiErrorKind::Timeout),
    (1002, ApiErrorKind::Authentication),
    (1003, ApiErrorKind::Permission),
    (2001, ApiErrorKind::BadSymbol),
    (2010, ApiErrorKind::InvalidOrder),
    (2011, ApiErrorKind::InvalidOrder),
    (2020, ApiErrorKind::InvalidOrder),
    (20001, ApiErrorKind::InsufficientFunds),
    (20002, ApiErrorKind::OrderNotFound),
];

fn map_order_status(status: &str) -> OrderStatus {
    ORDER_STATUSES
        .iter()
        .find(|(raw, _)| *raw == status)
        .map(|(_, unified)| unified.clone())
        .unwrap_or_else(|| OrderStatus::Other(status.to_string()))
}

fn map_order_type(order_type: &str) -> OrderType {
    ORDER_TYPES
        .iter()
        .find(|(raw, _)| *raw == order_type)
        .map(|(_, unified)| *unified)
        .unwrap_or(OrderType::Limit)
}

fn map_transaction_status(status: &str) -> TransactionStatus {
    TRANSACTION_STATUSES
        .iter()
        .find(|(raw, _)| *raw == status)
        .map(|(_, unified)| unified.clone())
        .unwrap_or_else(|| TransactionStatus::Other(status.to_string()))
}

fn map_transaction_type(tx_type: &str) -> Option<TransactionType> {
    TRANSACTION_TYPES
        .iter()
        .find(|(raw, _)| *raw == tx_type)
        .map(|(_, unified)| *unified)
}

fn map_time_in_force(raw: &str) -> Option<TimeInForce> {
    match raw {
        "GTC" => Some(TimeInForce::GTC),
        "GTD" => Some(TimeInForce::GTD),
        "IOC" => Some(TimeInForce::IOC),
        "FOK" => Some(TimeInForce::FOK),
        "Day" => Some(TimeInForce::Day),
        _ => None,
    }
}

/// HitBTC 거래소
pub struct Hitbtc {
    config: ExchangeConfig,
    client: HttpClient,
    rate_limiter: RateLimiter,
    markets: RwLock<HashMap<String, Market>>,
    markets_by_id: RwLock<HashMap<String, String>>,
    currencies: RwLock<HashMap<String, Currency>>,
    /// 주문 캐시 - clientOrderId 기준 마지막으로 본 주문
    orders: RwLock<HashMap<String, Order>>,
    features: ExchangeFeatures,
    urls: ExchangeUrls,
    timeframes: HashMap<Timeframe, String>,
    base_url: String,
}

impl Hitbtc {
    const HOST: &'static str = "api.hitbtc.com";
    const RATE_LIMIT_MS: u64 = 100;

    /// 새 Hitbtc 인스턴스 생성
    pub fn new(config: ExchangeConfig) -> CcxtResult<Self> {
        let host = config.hostname().unwrap_or(Self::HOST).to_string();
        let base_url = format!("https://{host}/api/2");

        let client = HttpClient::new(&base_url, &config)?;
        let rate_limiter = RateLimiter::new(Self::RATE_LIMIT_MS);

        let features = ExchangeFeatures {
            cors: false,
            spot: true,
            fetch_markets: true,
            fetch_currencies: true,
            fetch_ticker: true,
            fetch_tickers: true,
            fetch_order_book: true,
            fetch_trades: true,
            fetch_ohlcv: true,
            fetch_balance: true,
            create_order: true,
            edit_order: true,
            cancel_order: true,
            fetch_order: true,
            fetch_open_orders: true,
            fetch_closed_orders: true,
            fetch_order_trades: true,
            fetch_my_trades: true,
            fetch_trading_fee: true,
            fetch_deposit_address: true,
            create_deposit_address: true,
            withdraw: true,
            fetch_transactions: true,
            fetch_deposits: true,
            fetch_withdrawals: true,
            ..Default::default()
        };

        let mut api_urls = HashMap::new();
        api_urls.insert("public".into(), base_url.clone());
        api_urls.insert("private".into(), base_url.clone());

        let urls = ExchangeUrls {
            logo: Some(
                "https://user-images.githubusercontent.com/1294454/27766555-8eaec20e-5edc-11e7-9c5b-6dc69fc42f5e.jpg"
                    .into(),
            ),
            api: api_urls,
            www: Some("https://hitbtc.com".into()),
            doc: vec!["https://api.hitbtc.com".into()],
            fees: Some("https://hitbtc.com/fees-and-limits".into()),
        };

        let mut timeframes = HashMap::new();
        timeframes.insert(Timeframe::Minute1, "M1".into());
        timeframes.insert(Timeframe::Minute3, "M3".into());
        timeframes.insert(Timeframe::Minute5, "M5".into());
        timeframes.insert(Timeframe::Minute15, "M15".into());
        timeframes.insert(Timeframe::Minute30, "M30".into());
        timeframes.insert(Timeframe::Hour1, "H1".into());
        timeframes.insert(Timeframe::Hour4, "H4".into());
        timeframes.insert(Timeframe::Day1, "D1".into());
        timeframes.insert(Timeframe::Week1, "D7".into());
        timeframes.insert(Timeframe::Month1, "1M".into());

        Ok(Self {
            config,
            client,
            rate_limiter,
            markets: RwLock::new(HashMap::new()),
            markets_by_id: RwLock::new(HashMap::new()),
            currencies: RwLock::new(HashMap::new()),
            orders: RwLock::new(HashMap::new()),
            features,
            urls,
            timeframes,
            base_url,
        })
    }

    /// 스로틀 + 서명 + 실행 + 에러 분류 + 디코딩
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        api: &str,
        params: HashMap<String, String>,
    ) -> CcxtResult<T> {
        self.rate_limiter.throttle(1.0).await;

        let signed = self.sign(path, api, method, &params, None)?;
        let response = self.client.execute(&signed).await?;

        if !response.is_success() {
            return Err(self.handle_errors(response.status, &response.body));
        }

        serde_json::from_str(&response.body).map_err(|e| CcxtError::ParseError {
            data_type: std::any::type_name::<T>().to_string(),
            message: e.to_string(),
        })
    }

    /// 공개 API 호출
    async fn public_get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: HashMap<String, String>,
    ) -> CcxtResult<T> {
        self.request("GET", path, "public", params).await
    }

    /// 비공개 API 호출
    async fn private_request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        params: HashMap<String, String>,
    ) -> CcxtResult<T> {
        self.request(method, path, "private", params).await
    }

    /// 거래소가 보고한 실패를 통합 에러 계층으로 분류
    ///
    /// I/O 없는 순수 함수. 코드 테이블 매칭이 HTTP 상태 매칭보다 우선한다.
    /// 429는 특정 분류 없이 일반 에러로 흘려보낸다.
    fn handle_errors(&self, status: u16, body: &str) -> CcxtError {
        let message = format!("{} {}", self.id(), body);

        if let Ok(response) = serde_json::from_str::<HitbtcErrorResponse>(body) {
            let kind = ERROR_CODES
                .iter()
                .find(|(code, _)| *code == response.error.code)
                .map(|(_, kind)| *kind);

            if let Some(kind) = kind {
                return match kind {
                    ApiErrorKind::Timeout => CcxtError::RequestTimeout { message },
                    ApiErrorKind::Authentication => CcxtError::AuthenticationError { message },
                    ApiErrorKind::Permission => CcxtError::PermissionDenied { message },
                    ApiErrorKind::BadSymbol => CcxtError::BadSymbol { symbol: message },
                    ApiErrorKind::InvalidOrder => CcxtError::InvalidOrder { message },
                    ApiErrorKind::InsufficientFunds => CcxtError::InsufficientFunds { message },
                    ApiErrorKind::OrderNotFound => CcxtError::OrderNotFound { order_id: message },
                };
            }

            if response.error.message.contains("Duplicate clientOrderId") {
                return CcxtError::InvalidOrder { message };
            }
        }

        if status == 503 || status == 504 {
            return CcxtError::ExchangeNotAvailable { message };
        }

        CcxtError::ExchangeError { message }
    }

    /// 마켓 ID → 통합 심볼
    fn resolve_symbol(&self, market_id: &str) -> Option<String> {
        self.markets_by_id.read().unwrap().get(market_id).cloned()
    }

    /// 심볼의 견적 화폐 (수수료 화폐로 사용)
    fn quote_of(&self, symbol: &str) -> Option<String> {
        self.markets
            .read()
            .unwrap()
            .get(symbol)
            .map(|m| m.quote.clone())
    }

    /// 마켓 조회 (필요시 로드)
    async fn market(&self, symbol: &str) -> CcxtResult<Market> {
        self.load_markets(false).await?;
        self.markets
            .read()
            .unwrap()
            .get(symbol)
            .cloned()
            .ok_or_else(|| CcxtError::BadSymbol {
                symbol: symbol.to_string(),
            })
    }

    /// 계정 타입별 잔고 조회
    pub async fn fetch_balance_for(&self, account: AccountType) -> CcxtResult<Balances> {
        let path = BALANCE_ENDPOINTS
            .iter()
            .find(|(kind, _)| *kind == account)
            .map(|(_, path)| *path)
            .ok_or_else(|| CcxtError::NotSupported {
                feature: format!("balance account type: {}", account.as_str()),
            })?;

        let response: Vec<HitbtcBalance> =
            self.private_request("GET", path, HashMap::new()).await?;

        let mut balances = Balances::new();
        for entry in &response {
            balances.add(
                entry.currency.to_uppercase(),
                Balance::new(entry.available, entry.reserved),
            );
        }
        balances.info = serde_json::to_value(&response).unwrap_or_default();

        Ok(balances)
    }

    // === 파서 ===

    fn parse_market(&self, data: &HitbtcSymbol) -> Market {
        let base = data.base_currency.to_uppercase();
        let quote = data.quote_currency.to_uppercase();
        let symbol = format!("{base}/{quote}");

        let mut market = Market::spot(data.id.clone(), symbol, base, quote);
        market.base_id = data.base_currency.clone();
        market.quote_id = data.quote_currency.clone();
        market.taker = data.take_liquidity_rate;
        market.maker = data.provide_liquidity_rate;
        market.precision = MarketPrecision {
            amount: data.quantity_increment,
            price: data.tick_size,
        };
        market.limits = MarketLimits {
            amount: MinMax {
                min: data.quantity_increment,
                max: None,
            },
            price: MinMax {
                min: data.tick_size,
                max: None,
            },
            cost: MinMax {
                min: match (data.quantity_increment, data.tick_size) {
                    (Some(lot), Some(tick)) => Some(lot * tick),
                    _ => None,
                },
                max: None,
            },
        };
        market.info = serde_json::to_value(data).unwrap_or_default();
        market
    }

    fn parse_currency(&self, data: &HitbtcCurrency) -> Currency {
        let code = data.id.to_uppercase();
        let payin = data.payin_enabled.unwrap_or(false);
        let payout = data.payout_enabled.unwrap_or(false);
        let transfer = data.transfer_enabled.unwrap_or(false);
        let delisted = data.delisted.unwrap_or(false);

        Currency {
            id: data.id.clone(),
            code,
            name: data.full_name.clone(),
            active: payin && payout && transfer && !delisted,
            deposit: data.payin_enabled,
            withdraw: data.payout_enabled,
            crypto: data.crypto,
            fee: data.payout_fee,
            // 거래소 전역 고정 정밀도
            precision: Some(8),
            info: serde_json::to_value(data).unwrap_or_default(),
        }
    }

    fn parse_ticker(&self, data: &HitbtcTicker, symbol: &str) -> Ticker {
        let timestamp = data.timestamp.as_deref().and_then(parse_iso8601);
        let last = data.last;
        let open = data.open;

        // 파생 필드는 피연산자가 모두 있고 분모가 0이 아닐 때만 계산
        let change = match (last, open) {
            (Some(l), Some(o)) => Some(l - o),
            _ => None,
        };
        let percentage = match (change, open) {
            (Some(c), Some(o)) if !o.is_zero() => Some(c / o * Decimal::ONE_HUNDRED),
            _ => None,
        };
        let average = match (last, open) {
            (Some(l), Some(o)) => Some((l + o) / Decimal::TWO),
            _ => None,
        };
        let vwap = match (data.volume_quote, data.volume) {
            (Some(q), Some(b)) if !b.is_zero() => Some(q / b),
            _ => None,
        };

        Ticker {
            symbol: symbol.to_string(),
            timestamp,
            datetime: timestamp.and_then(timestamp_to_iso8601),
            high: data.high,
            low: data.low,
            bid: data.bid,
            ask: data.ask,
            vwap,
            open,
            close: last,
            last,
            change,
            percentage,
            average,
            base_volume: data.volume,
            quote_volume: data.volume_quote,
            info: serde_json::to_value(data).unwrap_or_default(),
        }
    }

    fn parse_ohlcv(&self, data: &HitbtcCandle) -> CcxtResult<OHLCV> {
        // 타임스탬프는 캔들의 식별자라 대체값 없이 파싱 실패로 처리한다
        let timestamp = data
            .timestamp
            .as_deref()
            .and_then(parse_iso8601)
            .ok_or_else(|| CcxtError::ParseError {
                data_type: "OHLCV".into(),
                message: format!("invalid candle timestamp: {:?}", data.timestamp),
            })?;

        Ok(OHLCV::new(
            timestamp,
            data.open,
            data.max,
            data.min,
            data.close,
            data.volume.unwrap_or_default(),
        ))
    }

    fn parse_order_book(&self, data: &HitbtcOrderBook, symbol: &str) -> OrderBook {
        let mut book = OrderBook::new(symbol.to_string());
        book.bids = data
            .bid
            .iter()
            .map(|level| OrderBookEntry {
                price: level.price,
                amount: level.size,
            })
            .collect();
        book.asks = data
            .ask
            .iter()
            .map(|level| OrderBookEntry {
                price: level.price,
                amount: level.size,
            })
            .collect();
        book
    }

    fn parse_trade(&self, data: &HitbtcTrade, symbol_hint: Option<&str>) -> Trade {
        // 마켓 테이블에 없는 ID는 원본 그대로 노출한다
        let symbol = data
            .symbol
            .as_deref()
            .map(|id| self.resolve_symbol(id).unwrap_or_else(|| id.to_string()))
            .or_else(|| symbol_hint.map(str::to_string))
            .unwrap_or_default();

        let timestamp = data.timestamp.as_deref().and_then(parse_iso8601);
        let fee = data.fee.map(|cost| Fee {
            cost: Some(cost),
            currency: self.quote_of(&symbol),
            rate: None,
        });

        Trade {
            id: data.id.map(|id| id.to_string()),
            order: data
                .client_order_id
                .clone()
                .or_else(|| data.order_id.map(|id| id.to_string())),
            timestamp,
            datetime: timestamp.and_then(timestamp_to_iso8601),
            symbol,
            side: data.side.clone(),
            taker_or_maker: None,
            price: data.price,
            amount: data.quantity,
            cost: Some(data.price * data.quantity),
            fee,
            info: serde_json::to_value(data).unwrap_or_default(),
        }
    }

    fn parse_order(&self, data: &HitbtcOrder, symbol_hint: Option<&str>) -> Order {
        let id = data.client_order_id.clone();
        let status = map_order_status(&data.status);
        let order_type = map_order_type(&data.order_type);
        let side = parse_order_side(&data.side).unwrap_or(OrderSide::Buy);

        let symbol = self
            .resolve_symbol(&data.symbol)
            .or_else(|| symbol_hint.map(str::to_string))
            .unwrap_or_else(|| data.symbol.clone());

        let timestamp = data.created_at.as_deref().and_then(parse_iso8601);
        let last_trade_timestamp = data.updated_at.as_deref().and_then(parse_iso8601);

        let amount = data.quantity;
        let filled = data.cum_quantity.unwrap_or_default();

        // 가격 누락시 (시장가 주문 등) 캐시된 주문의 가격을 재사용
        let mut price = data.price;
        if price.is_none() {
            if let Some(prev) = self.orders.read().unwrap().get(&id) {
                price = prev.price;
            }
        }

        let mut cost = None;
        let mut average = None;
        let mut fee = None;
        let mut trades = Vec::new();

        if let Some(fills) = &data.trades_report {
            // 주문 레벨 합계를 믿지 않고 체결 내역을 합산한다
            let mut total_cost = Decimal::ZERO;
            let mut total_amount = Decimal::ZERO;
            let mut total_fee = Decimal::ZERO;
            let mut has_fee = false;

            for fill in fills {
                let trade = self.parse_trade(fill, Some(&symbol));
                total_cost += trade.price * trade.amount;
                total_amount += trade.amount;
                if let Some(cost) = trade.fee.as_ref().and_then(|f| f.cost) {
                    total_fee += cost;
                    has_fee = true;
                }
                trades.push(trade);
            }

            if !fills.is_empty() {
                cost = Some(total_cost);
                let filled_for_average = if filled.is_zero() { total_amount } else { filled };
                if !filled_for_average.is_zero() {
                    average = Some(total_cost / filled_for_average);
                }
                if has_fee {
                    fee = Some(Fee {
                        cost: Some(total_fee),
                        currency: self.quote_of(&symbol),
                        rate: None,
                    });
                }
            }

            if order_type == OrderType::Market && price.is_none() {
                price = average;
            }
        } else if !filled.is_zero() {
            cost = price.map(|p| p * filled);
        }

        Order {
            id,
            client_order_id: Some(data.client_order_id.clone()),
            timestamp,
            datetime: timestamp.and_then(timestamp_to_iso8601),
            last_trade_timestamp,
            status,
            symbol,
            order_type,
            time_in_force: data.time_in_force.as_deref().and_then(map_time_in_force),
            side,
            price,
            average,
            amount,
            filled,
            remaining: Some(amount - filled),
            stop_price: data.stop_price,
            cost,
            trades,
            fee,
            info: serde_json::to_value(data).unwrap_or_default(),
        }
    }

    fn parse_transaction(&self, data: &HitbtcTransaction) -> Transaction {
        let timestamp = data.created_at.as_deref().and_then(parse_iso8601);
        let currency = data.currency.to_uppercase();

        Transaction {
            id: data.id.clone(),
            timestamp,
            datetime: timestamp.and_then(timestamp_to_iso8601),
            updated: data.updated_at.as_deref().and_then(parse_iso8601),
            tx_type: map_transaction_type(&data.tx_type),
            currency: currency.clone(),
            amount: data.amount,
            status: map_transaction_status(&data.status),
            address: data.address.clone(),
            tag: data.payment_id.clone(),
            txid: data.hash.clone(),
            fee: data.fee.map(|cost| Fee {
                cost: Some(cost),
                currency: Some(currency),
                rate: None,
            }),
            info: serde_json::to_value(data).unwrap_or_default(),
        }
    }

    fn parse_trading_fee(&self, symbol: &str, data: &HitbtcTradingFee) -> TradingFees {
        // 응답에 없는 수수료율은 0이 아니라 미지정으로 남긴다
        TradingFees {
            symbol: symbol.to_string(),
            maker: data.provide_liquidity_rate,
            taker: data.take_liquidity_rate,
            percentage: true,
            tier_based: false,
            info: serde_json::to_value(data).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Exchange for Hitbtc {
    fn id(&self) -> ExchangeId {
        ExchangeId::Hitbtc
    }

    fn name(&self) -> &str {
        "HitBTC"
    }

    fn version(&self) -> &str {
        "2"
    }

    fn rate_limit(&self) -> u64 {
        Self::RATE_LIMIT_MS
    }

    fn has(&self) -> &ExchangeFeatures {
        &self.features
    }

    fn urls(&self) -> &ExchangeUrls {
        &self.urls
    }

    fn timeframes(&self) -> &HashMap<Timeframe, String> {
        &self.timeframes
    }

    async fn load_markets(&self, reload: bool) -> CcxtResult<HashMap<String, Market>> {
        {
            let markets = self.markets.read().unwrap();
            if !reload && !markets.is_empty() {
                return Ok(markets.clone());
            }
        }

        let markets_vec = self.fetch_markets().await?;
        let mut markets_map = HashMap::new();
        let mut markets_by_id = HashMap::new();

        for market in markets_vec {
            markets_by_id.insert(market.id.clone(), market.symbol.clone());
            markets_map.insert(market.symbol.clone(), market);
        }

        {
            let mut markets = self.markets.write().unwrap();
            *markets = markets_map.clone();
        }
        {
            let mut by_id = self.markets_by_id.write().unwrap();
            *by_id = markets_by_id;
        }

        Ok(markets_map)
    }

    async fn fetch_markets(&self) -> CcxtResult<Vec<Market>> {
        let response: Vec<HitbtcSymbol> =
            self.public_get(api::PUBLIC_SYMBOL, HashMap::new()).await?;

        Ok(response.iter().map(|s| self.parse_market(s)).collect())
    }

    async fn fetch_currencies(&self) -> CcxtResult<HashMap<String, Currency>> {
        let response: Vec<HitbtcCurrency> =
            self.public_get(api::PUBLIC_CURRENCY, HashMap::new()).await?;

        let currencies: HashMap<String, Currency> = response
            .iter()
            .map(|c| {
                let currency = self.parse_currency(c);
                (currency.code.clone(), currency)
            })
            .collect();

        {
            let mut cached = self.currencies.write().unwrap();
            *cached = currencies.clone();
        }

        Ok(currencies)
    }

    async fn fetch_ticker(&self, symbol: &str) -> CcxtResult<Ticker> {
        let market = self.market(symbol).await?;
        let path = format!("{}/{}", api::PUBLIC_TICKER, market.id);

        let response: HitbtcTicker = self.public_get(&path, HashMap::new()).await?;

        Ok(self.parse_ticker(&response, symbol))
    }

    async fn fetch_tickers(&self, symbols: Option<&[&str]>) -> CcxtResult<HashMap<String, Ticker>> {
        self.load_markets(false).await?;

        let response: Vec<HitbtcTicker> =
            self.public_get(api::PUBLIC_TICKER, HashMap::new()).await?;

        let mut tickers = HashMap::new();
        for data in &response {
            let Some(symbol) = data.symbol.as_deref().and_then(|id| self.resolve_symbol(id))
            else {
                continue;
            };
            if let Some(filter) = symbols {
                if !filter.contains(&symbol.as_str()) {
                    continue;
                }
            }
            tickers.insert(symbol.clone(), self.parse_ticker(data, &symbol));
        }

        Ok(tickers)
    }

    async fn fetch_order_book(&self, symbol: &str, limit: Option<u32>) -> CcxtResult<OrderBook> {
        let market = self.market(symbol).await?;
        let path = format!("{}/{}", api::PUBLIC_ORDERBOOK, market.id);

        let mut params = HashMap::new();
        if let Some(limit) = limit {
            params.insert("limit".into(), limit.to_string());
        }

        let response: HitbtcOrderBook = self.public_get(&path, params).await?;

        Ok(self.parse_order_book(&response, symbol))
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        let market = self.market(symbol).await?;
        let path = format!("{}/{}", api::PUBLIC_TRADES, market.id);

        let mut params = HashMap::new();
        if let Some(since) = since.and_then(timestamp_to_iso8601) {
            params.insert("from".into(), since);
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), limit.to_string());
        }

        let response: Vec<HitbtcTrade> = self.public_get(&path, params).await?;

        Ok(response
            .iter()
            .map(|t| self.parse_trade(t, Some(symbol)))
            .collect())
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<OHLCV>> {
        let market = self.market(symbol).await?;
        let period = self
            .timeframes
            .get(&timeframe)
            .cloned()
            .ok_or_else(|| CcxtError::NotSupported {
                feature: format!("timeframe: {}", timeframe.as_str()),
            })?;

        let path = format!("{}/{}", api::PUBLIC_CANDLES, market.id);
        let mut params = HashMap::new();
        params.insert("period".into(), period);
        if let Some(since) = since.and_then(timestamp_to_iso8601) {
            params.insert("from".into(), since);
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), limit.to_string());
        }

        let response: Vec<HitbtcCandle> = self.public_get(&path, params).await?;

        response.iter().map(|c| self.parse_ohlcv(c)).collect()
    }

    async fn fetch_balance(&self) -> CcxtResult<Balances> {
        self.fetch_balance_for(AccountType::Trading).await
    }

    async fn fetch_trading_fee(&self, symbol: &str) -> CcxtResult<TradingFees> {
        let market = self.market(symbol).await?;
        let path = format!("{}/{}", api::TRADING_FEE, market.id);

        let response: HitbtcTradingFee = self
            .private_request("GET", &path, HashMap::new())
            .await?;

        Ok(self.parse_trading_fee(symbol, &response))
    }

    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> CcxtResult<Order> {
        let market = self.market(symbol).await?;

        let mut params = HashMap::new();
        params.insert("symbol".into(), market.id.clone());
        params.insert("side".into(), side.as_str().into());
        params.insert("type".into(), order_type.as_str().into());
        params.insert("quantity".into(), amount.to_string());

        if matches!(order_type, OrderType::Limit | OrderType::StopLimit) {
            let price = price.ok_or_else(|| CcxtError::ArgumentsRequired {
                message: format!("{} order requires a price", order_type.as_str()),
            })?;
            params.insert("price".into(), price.to_string());
        }

        let response: HitbtcOrder = self.private_request("POST", api::ORDER, params).await?;
        let order = self.parse_order(&response, Some(symbol));

        if matches!(&order.status, OrderStatus::Other(raw) if raw == "rejected") {
            return Err(CcxtError::InvalidOrder {
                message: format!("{} order {} was rejected", self.id(), order.id),
            });
        }

        self.orders
            .write()
            .unwrap()
            .insert(order.id.clone(), order.clone());

        Ok(order)
    }

    async fn edit_order(
        &self,
        id: &str,
        symbol: &str,
        amount: Option<Decimal>,
        price: Option<Decimal>,
    ) -> CcxtResult<Order> {
        let path = format!("{}/{}", api::ORDER, id);

        let mut params = HashMap::new();
        if let Some(amount) = amount {
            params.insert("quantity".into(), amount.to_string());
        }
        if let Some(price) = price {
            params.insert("price".into(), price.to_string());
        }
        if params.is_empty() {
            return Err(CcxtError::ArgumentsRequired {
                message: "editOrder requires amount or price".into(),
            });
        }

        let response: HitbtcOrder = self.private_request("PATCH", &path, params).await?;
        let order = self.parse_order(&response, Some(symbol));

        self.orders
            .write()
            .unwrap()
            .insert(order.id.clone(), order.clone());

        Ok(order)
    }

    async fn cancel_order(&self, id: &str, symbol: &str) -> CcxtResult<Order> {
        let path = format!("{}/{}", api::ORDER, id);

        let response: HitbtcOrder = self
            .private_request("DELETE", &path, HashMap::new())
            .await?;
        let order = self.parse_order(&response, Some(symbol));

        self.orders
            .write()
            .unwrap()
            .insert(order.id.clone(), order.clone());

        Ok(order)
    }

    async fn fetch_order(&self, id: &str, symbol: &str) -> CcxtResult<Order> {
        let mut params = HashMap::new();
        params.insert("clientOrderId".into(), id.to_string());

        let response: Vec<HitbtcOrder> = self
            .private_request("GET", api::HISTORY_ORDER, params)
            .await?;

        response
            .first()
            .map(|o| self.parse_order(o, Some(symbol)))
            .ok_or_else(|| CcxtError::OrderNotFound {
                order_id: id.to_string(),
            })
    }

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        _since: Option<i64>,
        _limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        let mut params = HashMap::new();
        if let Some(symbol) = symbol {
            let market = self.market(symbol).await?;
            params.insert("symbol".into(), market.id);
        }

        let response: Vec<HitbtcOrder> =
            self.private_request("GET", api::ORDER, params).await?;

        Ok(response
            .iter()
            .map(|o| self.parse_order(o, symbol))
            .collect())
    }

    async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        let mut params = HashMap::new();
        if let Some(symbol) = symbol {
            let market = self.market(symbol).await?;
            params.insert("symbol".into(), market.id);
        }
        if let Some(since) = since.and_then(timestamp_to_iso8601) {
            params.insert("from".into(), since);
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), limit.to_string());
        }

        let response: Vec<HitbtcOrder> = self
            .private_request("GET", api::HISTORY_ORDER, params)
            .await?;

        Ok(response
            .iter()
            .map(|o| self.parse_order(o, symbol))
            .collect())
    }

    async fn fetch_order_trades(
        &self,
        id: &str,
        symbol: &str,
        _since: Option<i64>,
        _limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        let path = format!("{}/{}/trades", api::HISTORY_ORDER, id);

        let response: Vec<HitbtcTrade> = self
            .private_request("GET", &path, HashMap::new())
            .await?;

        Ok(response
            .iter()
            .map(|t| self.parse_trade(t, Some(symbol)))
            .collect())
    }

    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        let mut params = HashMap::new();
        if let Some(symbol) = symbol {
            let market = self.market(symbol).await?;
            params.insert("symbol".into(), market.id);
        }
        if let Some(since) = since.and_then(timestamp_to_iso8601) {
            params.insert("from".into(), since);
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), limit.to_string());
        }

        let response: Vec<HitbtcTrade> = self
            .private_request("GET", api::HISTORY_TRADES, params)
            .await?;

        Ok(response
            .iter()
            .map(|t| self.parse_trade(t, symbol))
            .collect())
    }

    async fn fetch_deposit_address(&self, code: &str) -> CcxtResult<DepositAddress> {
        let path = format!("{}/{}", api::CRYPTO_ADDRESS, code.to_uppercase());

        let response: HitbtcAddress = self
            .private_request("GET", &path, HashMap::new())
            .await?;

        let mut address = DepositAddress::new(code.to_uppercase(), response.address.clone());
        if let Some(tag) = response.payment_id.clone().filter(|t| !t.is_empty()) {
            address = address.with_tag(tag);
        }
        address.info = serde_json::to_value(&response).unwrap_or_default();

        Ok(address)
    }

    async fn create_deposit_address(&self, code: &str) -> CcxtResult<DepositAddress> {
        let path = format!("{}/{}", api::CRYPTO_ADDRESS, code.to_uppercase());

        let response: HitbtcAddress = self
            .private_request("POST", &path, HashMap::new())
            .await?;

        let mut address = DepositAddress::new(code.to_uppercase(), response.address.clone());
        if let Some(tag) = response.payment_id.clone().filter(|t| !t.is_empty()) {
            address = address.with_tag(tag);
        }
        address.info = serde_json::to_value(&response).unwrap_or_default();

        Ok(address)
    }

    async fn withdraw(
        &self,
        code: &str,
        amount: Decimal,
        address: &str,
        tag: Option<&str>,
    ) -> CcxtResult<Transaction> {
        let mut params = HashMap::new();
        params.insert("currency".into(), code.to_uppercase());
        params.insert("amount".into(), amount.to_string());
        params.insert("address".into(), address.to_string());
        // 빈 태그는 필드 자체를 생략한다
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            params.insert("paymentId".into(), tag.to_string());
        }

        let response: HitbtcWithdrawResponse = self
            .private_request("POST", api::CRYPTO_WITHDRAW, params)
            .await?;

        let mut transaction = Transaction::new(response.id.clone(), code.to_uppercase(), amount)
            .with_address(address.to_string(), tag.map(str::to_string));
        transaction.tx_type = Some(TransactionType::Withdrawal);
        transaction.info = serde_json::to_value(&response).unwrap_or_default();

        Ok(transaction)
    }

    async fn fetch_transactions(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let mut params = HashMap::new();
        if let Some(code) = code {
            params.insert("currency".into(), code.to_uppercase());
        }
        if let Some(since) = since.and_then(timestamp_to_iso8601) {
            params.insert("from".into(), since);
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), limit.to_string());
        }

        let response: Vec<HitbtcTransaction> = self
            .private_request("GET", api::ACCOUNT_TRANSACTIONS, params)
            .await?;

        Ok(response.iter().map(|t| self.parse_transaction(t)).collect())
    }

    async fn fetch_deposits(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let transactions = self.fetch_transactions(code, since, limit).await?;
        Ok(transactions.into_iter().filter(|t| t.is_deposit()).collect())
    }

    async fn fetch_withdrawals(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let transactions = self.fetch_transactions(code, since, limit).await?;
        Ok(transactions
            .into_iter()
            .filter(|t| t.is_withdrawal())
            .collect())
    }

    fn market_id(&self, symbol: &str) -> Option<String> {
        self.markets
            .read()
            .unwrap()
            .get(symbol)
            .map(|m| m.id.clone())
    }

    fn symbol(&self, market_id: &str) -> Option<String> {
        self.resolve_symbol(market_id)
    }

    fn sign(
        &self,
        path: &str,
        api: &str,
        method: &str,
        params: &HashMap<String, String>,
        body: Option<&str>,
    ) -> CcxtResult<SignedRequest> {
        let mut url = format!("{}{}", self.base_url, path);
        let mut headers = HashMap::new();

        if api == "private" {
            let api_key =
                self.config
                    .api_key()
                    .ok_or_else(|| CcxtError::AuthenticationError {
                        message: "API key required".into(),
                    })?;
            let secret = self
                .config
                .secret()
                .ok_or_else(|| CcxtError::AuthenticationError {
                    message: "Secret required".into(),
                })?;

            let auth_string = format!("{api_key}:{secret}");
            let encoded = BASE64.encode(auth_string);
            headers.insert("Authorization".into(), format!("Basic {encoded}"));
        }

        let body = if method == "GET" || method == "DELETE" {
            if !params.is_empty() {
                let query: String = params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&");
                url = format!("{url}?{query}");
            }
            body.map(str::to_string)
        } else if !params.is_empty() {
            headers.insert("Content-Type".into(), "application/json".into());
            Some(serde_json::to_string(params)?)
        } else {
            body.map(str::to_string)
        };

        Ok(SignedRequest {
            url,
            method: method.to_string(),
            headers,
            body,
        })
    }
}

// === 응답 구조체 ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcErrorBody {
    code: i64,
    message: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HitbtcErrorResponse {
    error: HitbtcErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcSymbol {
    id: String,
    base_currency: String,
    quote_currency: String,
    #[serde(default)]
    quantity_increment: Option<Decimal>,
    #[serde(default)]
    tick_size: Option<Decimal>,
    #[serde(default)]
    take_liquidity_rate: Option<Decimal>,
    #[serde(default)]
    provide_liquidity_rate: Option<Decimal>,
    #[serde(default)]
    fee_currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcCurrency {
    id: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    crypto: Option<bool>,
    #[serde(default)]
    payin_enabled: Option<bool>,
    #[serde(default)]
    payout_enabled: Option<bool>,
    #[serde(default)]
    transfer_enabled: Option<bool>,
    #[serde(default)]
    delisted: Option<bool>,
    #[serde(default)]
    payout_fee: Option<Decimal>,
    #[serde(default)]
    payin_confirmations: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcTicker {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    ask: Option<Decimal>,
    #[serde(default)]
    bid: Option<Decimal>,
    #[serde(default)]
    last: Option<Decimal>,
    #[serde(default)]
    open: Option<Decimal>,
    #[serde(default)]
    low: Option<Decimal>,
    #[serde(default)]
    high: Option<Decimal>,
    #[serde(default)]
    volume: Option<Decimal>,
    #[serde(default)]
    volume_quote: Option<Decimal>,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcCandle {
    #[serde(default)]
    timestamp: Option<String>,
    open: Decimal,
    close: Decimal,
    min: Decimal,
    max: Decimal,
    #[serde(default)]
    volume: Option<Decimal>,
    #[serde(default)]
    volume_quote: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HitbtcBookLevel {
    price: Decimal,
    size: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HitbtcOrderBook {
    #[serde(default)]
    ask: Vec<HitbtcBookLevel>,
    #[serde(default)]
    bid: Vec<HitbtcBookLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcTrade {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    order_id: Option<i64>,
    #[serde(default)]
    client_order_id: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    side: Option<String>,
    quantity: Decimal,
    price: Decimal,
    #[serde(default)]
    fee: Option<Decimal>,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcOrder {
    #[serde(default)]
    id: Option<i64>,
    client_order_id: String,
    symbol: String,
    side: String,
    status: String,
    #[serde(rename = "type")]
    order_type: String,
    #[serde(default)]
    time_in_force: Option<String>,
    quantity: Decimal,
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    cum_quantity: Option<Decimal>,
    #[serde(default)]
    stop_price: Option<Decimal>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    trades_report: Option<Vec<HitbtcTrade>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcBalance {
    currency: String,
    available: Decimal,
    reserved: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcTradingFee {
    #[serde(default)]
    take_liquidity_rate: Option<Decimal>,
    #[serde(default)]
    provide_liquidity_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcAddress {
    address: String,
    #[serde(default)]
    payment_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HitbtcWithdrawResponse {
    id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitbtcTransaction {
    id: String,
    currency: String,
    amount: Decimal,
    #[serde(rename = "type")]
    tx_type: String,
    status: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    payment_id: Option<String>,
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    fee: Option<Decimal>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn exchange() -> Hitbtc {
        Hitbtc::new(ExchangeConfig::default()).unwrap()
    }

    fn exchange_with_credentials() -> Hitbtc {
        Hitbtc::new(ExchangeConfig::new().with_credentials("key", "secret")).unwrap()
    }

    fn seed_market(exchange: &Hitbtc) {
        let market = Market::spot(
            "ETHBTC".into(),
            "ETH/BTC".into(),
            "ETH".into(),
            "BTC".into(),
        );
        exchange
            .markets
            .write()
            .unwrap()
            .insert("ETH/BTC".into(), market);
        exchange
            .markets_by_id
            .write()
            .unwrap()
            .insert("ETHBTC".into(), "ETH/BTC".into());
    }

    #[test]
    fn test_exchange_info() {
        let exchange = exchange();
        assert_eq!(exchange.id(), ExchangeId::Hitbtc);
        assert_eq!(exchange.name(), "HitBTC");
        assert_eq!(exchange.version(), "2");
        assert!(exchange.has().fetch_markets);
        assert!(exchange.has().create_order);
        assert!(exchange.urls().api.get("public").unwrap().contains("api.hitbtc.com"));
    }

    #[test]
    fn test_hostname_override() {
        let exchange =
            Hitbtc::new(ExchangeConfig::new().with_hostname("api.bequant.io")).unwrap();
        assert_eq!(exchange.base_url, "https://api.bequant.io/api/2");
    }

    #[test]
    fn test_parse_market_idempotent() {
        let exchange = exchange();
        let data: HitbtcSymbol = serde_json::from_str(
            r#"{
                "id": "ETHBTC",
                "baseCurrency": "ETH",
                "quoteCurrency": "BTC",
                "quantityIncrement": "0.001",
                "tickSize": "0.000001",
                "takeLiquidityRate": "0.001",
                "provideLiquidityRate": "-0.0001",
                "feeCurrency": "BTC"
            }"#,
        )
        .unwrap();

        let first = exchange.parse_market(&data);
        let second = exchange.parse_market(&data);

        assert_eq!(first, second);
        assert_eq!(first.symbol, "ETH/BTC");
        assert_eq!(first.precision.amount, Some(dec!(0.001)));
        assert_eq!(first.precision.price, Some(dec!(0.000001)));
        assert_eq!(first.limits.cost.min, Some(dec!(0.000000001)));
        assert_eq!(first.taker, Some(dec!(0.001)));
    }

    #[test]
    fn test_parse_currency_active() {
        let exchange = exchange();
        let data: HitbtcCurrency = serde_json::from_str(
            r#"{
                "id": "btc",
                "fullName": "Bitcoin",
                "crypto": true,
                "payinEnabled": true,
                "payoutEnabled": true,
                "transferEnabled": true,
                "delisted": false,
                "payoutFee": "0.0005"
            }"#,
        )
        .unwrap();

        let currency = exchange.parse_currency(&data);
        assert_eq!(currency.code, "BTC");
        assert!(currency.active);
        assert_eq!(currency.precision, Some(8));

        let mut delisted = data.clone();
        delisted.delisted = Some(true);
        assert!(!exchange.parse_currency(&delisted).active);
    }

    #[test]
    fn test_parse_ticker_derived_fields() {
        let exchange = exchange();
        let data: HitbtcTicker = serde_json::from_str(
            r#"{
                "symbol": "ETHBTC",
                "last": "110",
                "open": "100",
                "volume": "10",
                "volumeQuote": "1050",
                "timestamp": "2017-10-20T20:00:00.000Z"
            }"#,
        )
        .unwrap();

        let ticker = exchange.parse_ticker(&data, "ETH/BTC");
        assert_eq!(ticker.change, Some(dec!(10)));
        assert_eq!(ticker.average, Some(dec!(105)));
        assert_eq!(ticker.percentage, Some(dec!(10.0)));
        assert_eq!(ticker.vwap, Some(dec!(105)));
        assert_eq!(ticker.timestamp, Some(1508529600000));
    }

    #[test]
    fn test_parse_ticker_zero_open_leaves_percentage_unset() {
        let exchange = exchange();
        let data: HitbtcTicker =
            serde_json::from_str(r#"{"last": "110", "open": "0"}"#).unwrap();

        let ticker = exchange.parse_ticker(&data, "ETH/BTC");
        assert_eq!(ticker.change, Some(dec!(110)));
        assert_eq!(ticker.percentage, None);
    }

    #[test]
    fn test_parse_ticker_missing_operands_leave_fields_unset() {
        let exchange = exchange();
        let data: HitbtcTicker = serde_json::from_str(r#"{"last": "110"}"#).unwrap();

        let ticker = exchange.parse_ticker(&data, "ETH/BTC");
        assert_eq!(ticker.change, None);
        assert_eq!(ticker.average, None);
        assert_eq!(ticker.vwap, None);
    }

    #[test]
    fn test_parse_ohlcv() {
        let exchange = exchange();
        let data: HitbtcCandle = serde_json::from_str(
            r#"{
                "timestamp": "2017-10-20T20:00:00.000Z",
                "open": "100",
                "close": "105",
                "min": "95",
                "max": "110",
                "volume": "1000",
                "volumeQuote": "102000"
            }"#,
        )
        .unwrap();

        let candle = exchange.parse_ohlcv(&data).unwrap();
        assert_eq!(candle.timestamp, 1508529600000);
        assert_eq!(candle.high, dec!(110));
        assert_eq!(candle.low, dec!(95));
    }

    #[test]
    fn test_parse_ohlcv_missing_timestamp_is_error() {
        let exchange = exchange();
        let data: HitbtcCandle = serde_json::from_str(
            r#"{"open": "100", "close": "105", "min": "95", "max": "110"}"#,
        )
        .unwrap();

        // 식별 필드인 타임스탬프에 대체값을 넣지 않는다
        let result = exchange.parse_ohlcv(&data);
        assert!(matches!(result, Err(CcxtError::ParseError { .. })));
    }

    #[test]
    fn test_parse_order_book() {
        let exchange = exchange();
        let data: HitbtcOrderBook = serde_json::from_str(
            r#"{
                "ask": [{"price": "0.055", "size": "2"}],
                "bid": [{"price": "0.054", "size": "1.5"}]
            }"#,
        )
        .unwrap();

        let book = exchange.parse_order_book(&data, "ETH/BTC");
        assert_eq!(book.best_ask().unwrap().price, dec!(0.055));
        assert_eq!(book.best_bid().unwrap().amount, dec!(1.5));
    }

    #[test]
    fn test_parse_trade_symbol_fallback() {
        let exchange = exchange();
        // 마켓 테이블에 없는 ID는 원본 그대로
        let data: HitbtcTrade = serde_json::from_str(
            r#"{"id": 9533117, "symbol": "XYZABC", "price": "0.05", "quantity": "2", "side": "buy"}"#,
        )
        .unwrap();

        let trade = exchange.parse_trade(&data, None);
        assert_eq!(trade.symbol, "XYZABC");
        assert_eq!(trade.cost, Some(dec!(0.10)));
        assert!(trade.fee.is_none());
    }

    #[test]
    fn test_parse_trade_missing_id_stays_unset() {
        let exchange = exchange();
        let data: HitbtcTrade = serde_json::from_str(
            r#"{"price": "100", "quantity": "1", "side": "buy"}"#,
        )
        .unwrap();

        let trade = exchange.parse_trade(&data, Some("ETH/BTC"));
        assert_eq!(trade.id, None);
        assert_eq!(trade.symbol, "ETH/BTC");
    }

    #[test]
    fn test_parse_trading_fee_keeps_missing_rates_unset() {
        let exchange = exchange();

        let data: HitbtcTradingFee = serde_json::from_str(
            r#"{"takeLiquidityRate": "0.001"}"#,
        )
        .unwrap();
        let fees = exchange.parse_trading_fee("ETH/BTC", &data);
        assert_eq!(fees.taker, Some(dec!(0.001)));
        assert_eq!(fees.maker, None);

        let data: HitbtcTradingFee = serde_json::from_str(
            r#"{"takeLiquidityRate": "0.001", "provideLiquidityRate": "-0.0001"}"#,
        )
        .unwrap();
        let fees = exchange.parse_trading_fee("ETH/BTC", &data);
        assert_eq!(fees.maker, Some(dec!(-0.0001)));
        assert!(fees.percentage);
    }

    #[test]
    fn test_parse_trade_resolves_known_market() {
        let exchange = exchange();
        seed_market(&exchange);

        let data: HitbtcTrade = serde_json::from_str(
            r#"{"id": 1, "symbol": "ETHBTC", "price": "0.05", "quantity": "2", "fee": "0.001"}"#,
        )
        .unwrap();

        let trade = exchange.parse_trade(&data, None);
        assert_eq!(trade.symbol, "ETH/BTC");
        let fee = trade.fee.unwrap();
        assert_eq!(fee.cost, Some(dec!(0.001)));
        assert_eq!(fee.currency, Some("BTC".into()));
    }

    #[test]
    fn test_order_status_table() {
        assert_eq!(map_order_status("new"), OrderStatus::Open);
        assert_eq!(map_order_status("suspended"), OrderStatus::Open);
        assert_eq!(map_order_status("partiallyFilled"), OrderStatus::Open);
        assert_eq!(map_order_status("filled"), OrderStatus::Closed);
        assert_eq!(map_order_status("canceled"), OrderStatus::Canceled);
        assert_eq!(map_order_status("expired"), OrderStatus::Failed);
        // 미등록 상태는 원본 그대로 통과
        assert_eq!(
            map_order_status("rejected"),
            OrderStatus::Other("rejected".into())
        );
    }

    #[test]
    fn test_transaction_tables() {
        assert_eq!(map_transaction_status("success"), TransactionStatus::Ok);
        assert_eq!(map_transaction_status("pending"), TransactionStatus::Pending);
        assert_eq!(map_transaction_status("failed"), TransactionStatus::Failed);
        assert_eq!(
            map_transaction_status("refunded"),
            TransactionStatus::Other("refunded".into())
        );

        assert_eq!(map_transaction_type("payin"), Some(TransactionType::Deposit));
        assert_eq!(
            map_transaction_type("payout"),
            Some(TransactionType::Withdrawal)
        );
        assert_eq!(
            map_transaction_type("withdraw"),
            Some(TransactionType::Withdrawal)
        );
        assert_eq!(map_transaction_type("bankToExchange"), None);
    }

    #[test]
    fn test_parse_order_price_backfill_from_cache() {
        let exchange = exchange();
        seed_market(&exchange);

        let mut cached = Order::limit(
            "my-order-1".into(),
            "ETH/BTC".into(),
            OrderSide::Buy,
            dec!(1),
            dec!(50),
        );
        cached.client_order_id = Some("my-order-1".into());
        exchange
            .orders
            .write()
            .unwrap()
            .insert("my-order-1".into(), cached);

        let data: HitbtcOrder = serde_json::from_str(
            r#"{
                "clientOrderId": "my-order-1",
                "symbol": "ETHBTC",
                "side": "buy",
                "status": "partiallyFilled",
                "type": "limit",
                "quantity": "1"
            }"#,
        )
        .unwrap();

        let order = exchange.parse_order(&data, None);
        assert_eq!(order.price, Some(dec!(50)));
        assert_eq!(order.status, OrderStatus::Open);
    }

    #[test]
    fn test_parse_order_sums_fills() {
        let exchange = exchange();
        seed_market(&exchange);

        let data: HitbtcOrder = serde_json::from_str(
            r#"{
                "clientOrderId": "my-order-2",
                "symbol": "ETHBTC",
                "side": "buy",
                "status": "filled",
                "type": "market",
                "quantity": "2",
                "cumQuantity": "2",
                "tradesReport": [
                    {"id": 1, "price": "100", "quantity": "1", "fee": "0.1"},
                    {"id": 2, "price": "102", "quantity": "1", "fee": "0.2"}
                ]
            }"#,
        )
        .unwrap();

        let order = exchange.parse_order(&data, None);
        assert_eq!(order.cost, Some(dec!(202)));
        assert_eq!(order.fee.as_ref().unwrap().cost, Some(dec!(0.3)));
        assert_eq!(order.average, Some(dec!(101)));
        // 시장가 주문의 가격은 평균 체결가로 채운다
        assert_eq!(order.price, Some(dec!(101)));
        assert_eq!(order.trades.len(), 2);
        assert_eq!(order.status, OrderStatus::Closed);
    }

    #[test]
    fn test_handle_errors_code_table() {
        let exchange = exchange();

        // 코드 매칭이 HTTP 상태 매칭보다 우선
        let err = exchange.handle_errors(
            504,
            r#"{"error":{"code":504,"message":"Gateway Timeout"}}"#,
        );
        assert!(matches!(err, CcxtError::RequestTimeout { .. }));

        let err = exchange.handle_errors(
            401,
            r#"{"error":{"code":1002,"message":"Authorization failed"}}"#,
        );
        assert!(matches!(err, CcxtError::AuthenticationError { .. }));

        let err = exchange.handle_errors(
            403,
            r#"{"error":{"code":1003,"message":"Action is forbidden"}}"#,
        );
        assert!(matches!(err, CcxtError::PermissionDenied { .. }));

        let err = exchange.handle_errors(
            400,
            r#"{"error":{"code":2001,"message":"Symbol not found"}}"#,
        );
        assert!(matches!(err, CcxtError::BadSymbol { .. }));
        assert!(err.to_string().contains("hitbtc"));
        assert!(err.to_string().contains("Symbol not found"));

        let err = exchange.handle_errors(
            400,
            r#"{"error":{"code":20001,"message":"Insufficient funds"}}"#,
        );
        assert!(matches!(err, CcxtError::InsufficientFunds { .. }));

        let err = exchange.handle_errors(
            400,
            r#"{"error":{"code":20002,"message":"Order not found"}}"#,
        );
        assert!(matches!(err, CcxtError::OrderNotFound { .. }));
        assert!(err.to_string().contains("hitbtc"));
        assert!(err.to_string().contains("Order not found"));
    }

    #[test]
    fn test_handle_errors_duplicate_client_order_id() {
        let exchange = exchange();
        let err = exchange.handle_errors(
            400,
            r#"{"error":{"code":9999,"message":"Duplicate clientOrderId"}}"#,
        );
        assert!(matches!(err, CcxtError::InvalidOrder { .. }));
    }

    #[test]
    fn test_handle_errors_http_status() {
        let exchange = exchange();

        let err = exchange.handle_errors(503, "Service Unavailable");
        assert!(matches!(err, CcxtError::ExchangeNotAvailable { .. }));

        // 429는 특정 분류 없이 일반 에러로 흘려보낸다
        let err = exchange.handle_errors(429, "Too Many Requests");
        assert!(matches!(err, CcxtError::ExchangeError { .. }));

        // 에러 메시지에 거래소 ID와 원본 본문이 포함된다
        let err = exchange.handle_errors(400, "raw body");
        assert!(err.to_string().contains("hitbtc"));
        assert!(err.to_string().contains("raw body"));
    }

    #[test]
    fn test_sign_public_has_no_auth_header() {
        let exchange = exchange();
        let signed = exchange
            .sign(api::PUBLIC_SYMBOL, "public", "GET", &HashMap::new(), None)
            .unwrap();

        assert_eq!(signed.url, "https://api.hitbtc.com/api/2/public/symbol");
        assert!(!signed.headers.contains_key("Authorization"));
        assert!(signed.body.is_none());
    }

    #[test]
    fn test_sign_private_requires_credentials() {
        let exchange = exchange();
        let result = exchange.sign(api::ORDER, "private", "GET", &HashMap::new(), None);
        assert!(matches!(
            result,
            Err(CcxtError::AuthenticationError { .. })
        ));
    }

    #[test]
    fn test_sign_private_basic_auth() {
        let exchange = exchange_with_credentials();
        let signed = exchange
            .sign(api::TRADING_BALANCE, "private", "GET", &HashMap::new(), None)
            .unwrap();

        // base64("key:secret")
        assert_eq!(
            signed.headers.get("Authorization").unwrap(),
            "Basic a2V5OnNlY3JldA=="
        );
    }

    #[test]
    fn test_sign_get_params_become_query() {
        let exchange = exchange_with_credentials();
        let mut params = HashMap::new();
        params.insert("clientOrderId".into(), "my-order-1".into());

        let signed = exchange
            .sign(api::HISTORY_ORDER, "private", "GET", &params, None)
            .unwrap();

        assert!(signed.url.contains("clientOrderId=my-order-1"));
        assert!(signed.body.is_none());
    }

    #[test]
    fn test_sign_withdraw_tag_round_trip() {
        let exchange = exchange_with_credentials();

        // 태그가 있으면 paymentId 필드가 본문에 포함된다
        let mut params = HashMap::new();
        params.insert("currency".into(), "XRP".into());
        params.insert("amount".into(), "10".into());
        params.insert("address".into(), "rE53DM...".into());
        params.insert("paymentId".into(), "12345".into());

        let signed = exchange
            .sign(api::CRYPTO_WITHDRAW, "private", "POST", &params, None)
            .unwrap();
        let body = signed.body.unwrap();
        assert!(body.contains("\"paymentId\":\"12345\""));
        assert_eq!(
            signed.headers.get("Content-Type").unwrap(),
            "application/json"
        );

        // 태그가 없으면 필드 자체가 빠진다
        let mut params = HashMap::new();
        params.insert("currency".into(), "BTC".into());
        params.insert("amount".into(), "1".into());
        params.insert("address".into(), "1A1zP1eP...".into());

        let signed = exchange
            .sign(api::CRYPTO_WITHDRAW, "private", "POST", &params, None)
            .unwrap();
        assert!(!signed.body.unwrap().contains("paymentId"));
    }

    #[test]
    fn test_parse_transaction() {
        let exchange = exchange();
        let data: HitbtcTransaction = serde_json::from_str(
            r#"{
                "id": "d2ce578f-647d-4fa0-b1aa-4a27e5ee597b",
                "currency": "btc",
                "amount": "0.023",
                "type": "payin",
                "status": "success",
                "address": "1A1zP1eP...",
                "hash": "abcdef01",
                "fee": "0.0005",
                "createdAt": "2017-10-20T20:00:00.000Z"
            }"#,
        )
        .unwrap();

        let tx = exchange.parse_transaction(&data);
        assert_eq!(tx.currency, "BTC");
        assert_eq!(tx.tx_type, Some(TransactionType::Deposit));
        assert_eq!(tx.status, TransactionStatus::Ok);
        assert_eq!(tx.txid, Some("abcdef01".into()));
        assert_eq!(tx.fee.as_ref().unwrap().cost, Some(dec!(0.0005)));
        assert!(tx.is_completed());
    }

    #[test]
    fn test_balance_endpoint_lookup() {
        assert_eq!(
            BALANCE_ENDPOINTS
                .iter()
                .find(|(kind, _)| *kind == AccountType::Trading)
                .map(|(_, path)| *path),
            Some("/trading/balance")
        );
        assert_eq!(
            BALANCE_ENDPOINTS
                .iter()
                .find(|(kind, _)| *kind == AccountType::Account)
                .map(|(_, path)| *path),
            Some("/account/balance")
        );
    }

    #[test]
    fn test_market_id_and_symbol_lookup() {
        let exchange = exchange();
        seed_market(&exchange);

        assert_eq!(exchange.market_id("ETH/BTC"), Some("ETHBTC".into()));
        assert_eq!(exchange.symbol("ETHBTC"), Some("ETH/BTC".into()));
        assert_eq!(exchange.market_id("AAA/BBB"), None);
    }
}

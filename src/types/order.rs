//! Order type - 주문 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Fee, Trade};

/// 주문 상태
///
/// 거래소가 내려준 상태 중 알려진 것만 매핑하고, 그 외에는
/// 원본 문자열을 `Other`로 보존한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
    Canceled,
    Failed,
    /// 알 수 없는 상태의 원본 문자열
    #[serde(untagged)]
    Other(String),
}

/// 주문 측면
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

/// 주문 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    Limit,
    Market,
    StopLimit,
    StopMarket,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
            OrderType::StopLimit => "stopLimit",
            OrderType::StopMarket => "stopMarket",
        }
    }

}

/// 주문 유효 기간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    GTC, // Good Till Canceled
    GTD, // Good Till Date
    IOC, // Immediate Or Cancel
    FOK, // Fill Or Kill
    Day, // 당일 유효
}

/// 주문 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// 주문 ID (clientOrderId 기준)
    pub id: String,
    /// 클라이언트 주문 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    /// 타임스탬프 (밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// ISO 8601 datetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 최종 체결 타임스탬프
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trade_timestamp: Option<i64>,
    /// 주문 상태
    pub status: OrderStatus,
    /// 심볼
    pub symbol: String,
    /// 주문 타입
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// 유효 기간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// 매수/매도
    pub side: OrderSide,
    /// 주문 가격
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// 평균 체결가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<Decimal>,
    /// 주문 수량
    pub amount: Decimal,
    /// 체결된 수량
    #[serde(default)]
    pub filled: Decimal,
    /// 미체결 수량
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    /// 손절가 (스탑 주문)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    /// 총 비용 (quote 화폐)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// 체결 내역
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trades: Vec<Trade>,
    /// 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Order {
    /// 새 주문 생성
    pub fn new(
        id: String,
        symbol: String,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
    ) -> Self {
        Self {
            id,
            client_order_id: None,
            timestamp: None,
            datetime: None,
            last_trade_timestamp: None,
            status: OrderStatus::Open,
            symbol,
            order_type,
            time_in_force: None,
            side,
            price: None,
            average: None,
            amount,
            filled: Decimal::ZERO,
            remaining: Some(amount),
            stop_price: None,
            cost: None,
            trades: Vec::new(),
            fee: None,
            info: serde_json::Value::Null,
        }
    }

    /// 지정가 주문 생성
    pub fn limit(
        id: String,
        symbol: String,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        let mut order = Self::new(id, symbol, OrderType::Limit, side, amount);
        order.price = Some(price);
        order
    }

    /// 시장가 주문 생성
    pub fn market(id: String, symbol: String, side: OrderSide, amount: Decimal) -> Self {
        Self::new(id, symbol, OrderType::Market, side, amount)
    }

    /// 타임스탬프 설정
    pub fn with_timestamp(mut self, ts: i64) -> Self {
        self.timestamp = Some(ts);
        self.datetime = Some(
            chrono::DateTime::<chrono::Utc>::from_timestamp_millis(ts)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
        );
        self
    }

    /// 상태 설정
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// 체결됨 여부
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Closed && self.filled >= self.amount
    }

    /// 미체결 여부
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// 취소됨 여부
    pub fn is_canceled(&self) -> bool {
        self.status == OrderStatus::Canceled
    }

    /// 체결률 (%)
    pub fn fill_percentage(&self) -> Decimal {
        if self.amount > Decimal::ZERO {
            self.filled / self.amount * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    /// 미체결 수량 계산
    pub fn calculate_remaining(&self) -> Decimal {
        self.amount - self.filled
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new(
            String::new(),
            String::new(),
            OrderType::Limit,
            OrderSide::Buy,
            Decimal::ZERO,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_order() {
        let order = Order::limit(
            "12345".into(),
            "ETH/BTC".into(),
            OrderSide::Buy,
            dec!(0.1),
            dec!(0.055),
        );

        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.price, Some(dec!(0.055)));
        assert!(order.is_open());
    }

    #[test]
    fn test_market_order() {
        let order = Order::market("12345".into(), "ETH/BTC".into(), OrderSide::Sell, dec!(0.5));

        assert_eq!(order.order_type, OrderType::Market);
        assert!(order.price.is_none());
    }

    #[test]
    fn test_status_other_preserves_raw() {
        let status = OrderStatus::Other("rejected".into());
        assert_ne!(status, OrderStatus::Failed);
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"rejected\""
        );
    }

    #[test]
    fn test_fill_percentage() {
        let mut order = Order::limit(
            "12345".into(),
            "ETH/BTC".into(),
            OrderSide::Buy,
            dec!(1.0),
            dec!(0.055),
        );
        order.filled = dec!(0.5);

        assert_eq!(order.fill_percentage(), dec!(50));
        assert_eq!(order.calculate_remaining(), dec!(0.5));
    }
}

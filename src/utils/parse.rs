//! Parse utilities - 거래소 응답 파싱 헬퍼

use chrono::{DateTime, NaiveDateTime};

use crate::types::OrderSide;

/// ISO 8601 datetime 문자열을 타임스탬프(밀리초)로 변환
pub fn parse_iso8601(datetime: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime) {
        return Some(dt.timestamp_millis());
    }

    // 타임존 없는 형식 (UTC로 간주)
    if let Ok(dt) = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_millis());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }

    None
}

/// 매수/매도 문자열 파싱
pub fn parse_order_side(side: &str) -> Option<OrderSide> {
    match side.to_lowercase().as_str() {
        "buy" | "bid" => Some(OrderSide::Buy),
        "sell" | "ask" => Some(OrderSide::Sell),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso8601() {
        assert_eq!(
            parse_iso8601("2017-10-20T20:00:00.000Z"),
            Some(1508529600000)
        );
        assert_eq!(parse_iso8601("2017-10-20T20:00:00Z"), Some(1508529600000));
        assert_eq!(parse_iso8601("not-a-date"), None);
    }

    #[test]
    fn test_parse_order_side() {
        assert_eq!(parse_order_side("buy"), Some(OrderSide::Buy));
        assert_eq!(parse_order_side("SELL"), Some(OrderSide::Sell));
        assert_eq!(parse_order_side("hold"), None);
    }
}

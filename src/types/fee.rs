//! Fee type - 수수료 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 수수료 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    /// 수수료 금액
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// 수수료 화폐
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// 수수료율
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
}

impl Fee {
    /// 새 Fee 생성
    pub fn new(cost: Decimal, currency: String) -> Self {
        Self {
            cost: Some(cost),
            currency: Some(currency),
            rate: None,
        }
    }

    /// 수수료율 설정
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }
}

/// 마켓별 거래 수수료
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradingFees {
    /// 심볼
    #[serde(default)]
    pub symbol: String,
    /// 메이커 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<Decimal>,
    /// 테이커 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker: Option<Decimal>,
    /// 퍼센트 기반
    #[serde(default)]
    pub percentage: bool,
    /// 티어 기반
    #[serde(default)]
    pub tier_based: bool,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl TradingFees {
    /// 새 TradingFees 생성
    pub fn new(symbol: String, maker: Decimal, taker: Decimal) -> Self {
        Self {
            symbol,
            maker: Some(maker),
            taker: Some(taker),
            percentage: true,
            tier_based: false,
            info: serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fee() {
        let fee = Fee::new(dec!(0.1), "BTC".into()).with_rate(dec!(0.001));
        assert_eq!(fee.cost, Some(dec!(0.1)));
        assert_eq!(fee.rate, Some(dec!(0.001)));
    }

    #[test]
    fn test_trading_fees() {
        let fees = TradingFees::new("ETH/BTC".into(), dec!(-0.0001), dec!(0.001));
        assert_eq!(fees.maker, Some(dec!(-0.0001)));
        assert!(fees.percentage);
    }
}

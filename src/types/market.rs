//! Market type - 거래소 마켓 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 마켓 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    #[default]
    Spot,
    Margin,
    Swap,
    Future,
    Option,
}

/// 마켓 정보
///
/// 정밀도와 거래 제한은 거래소 메타데이터에서 한 번 파생되며
/// 세션 동안 불변으로 취급한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// 거래소 내부 ID (예: 'ETHBTC')
    pub id: String,
    /// 소문자 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowercase_id: Option<String>,
    /// 통합 심볼 (예: 'ETH/BTC')
    pub symbol: String,
    /// 기준 화폐 (예: 'ETH')
    pub base: String,
    /// 견적 화폐 (예: 'BTC')
    pub quote: String,
    /// 거래소 기준 화폐 ID
    pub base_id: String,
    /// 거래소 견적 화폐 ID
    pub quote_id: String,
    /// 마켓 타입
    #[serde(rename = "type")]
    pub market_type: MarketType,
    /// 현물 여부
    pub spot: bool,
    /// 마진 여부
    pub margin: bool,
    /// 스왑 여부
    pub swap: bool,
    /// 선물 여부
    pub future: bool,
    /// 옵션 여부
    pub option: bool,
    /// 계약 여부
    pub contract: bool,
    /// 활성 상태
    pub active: bool,
    /// 테이커 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker: Option<Decimal>,
    /// 메이커 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<Decimal>,
    /// 정밀도
    pub precision: MarketPrecision,
    /// 거래 제한
    pub limits: MarketLimits,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
    /// 티어 기반 수수료
    #[serde(default)]
    pub tier_based: bool,
    /// 퍼센트 기반 수수료
    #[serde(default)]
    pub percentage: bool,
}

/// 마켓 정밀도
///
/// 거래소가 허용하는 최소 증분 (틱 사이즈 / 랏 사이즈).
/// 십진 문자열에서 무손실 파싱되며, 미지정은 None으로 남긴다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketPrecision {
    /// 수량 최소 증분 (랏 사이즈)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// 가격 최소 증분 (틱 사이즈)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// 마켓 제한
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketLimits {
    /// 수량 제한
    #[serde(default)]
    pub amount: MinMax,
    /// 가격 제한
    #[serde(default)]
    pub price: MinMax,
    /// 비용 제한
    #[serde(default)]
    pub cost: MinMax,
}

/// 최소/최대 값
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

impl Market {
    /// 현물 마켓 생성
    pub fn spot(id: String, symbol: String, base: String, quote: String) -> Self {
        Self {
            id: id.clone(),
            lowercase_id: Some(id.to_lowercase()),
            symbol,
            base: base.clone(),
            quote: quote.clone(),
            base_id: base,
            quote_id: quote,
            market_type: MarketType::Spot,
            spot: true,
            margin: false,
            swap: false,
            future: false,
            option: false,
            contract: false,
            active: true,
            taker: None,
            maker: None,
            precision: MarketPrecision::default(),
            limits: MarketLimits::default(),
            info: serde_json::Value::Null,
            tier_based: false,
            percentage: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_spot_market() {
        let market = Market::spot(
            "ETHBTC".into(),
            "ETH/BTC".into(),
            "ETH".into(),
            "BTC".into(),
        );
        assert!(market.spot);
        assert!(!market.margin);
        assert_eq!(market.market_type, MarketType::Spot);
        assert_eq!(market.lowercase_id, Some("ethbtc".into()));
    }

    #[test]
    fn test_precision_is_tick_size() {
        let precision = MarketPrecision {
            amount: Some(dec!(0.001)),
            price: Some(dec!(0.000001)),
        };
        assert_eq!(precision.price, Some(dec!(0.000001)));
    }
}

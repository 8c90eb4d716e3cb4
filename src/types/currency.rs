//! Currency type - 화폐 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 화폐 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// 화폐 ID (거래소 내부)
    pub id: String,
    /// 통합 코드 (예: 'BTC')
    pub code: String,
    /// 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 활성 상태 (입금·출금·이체 모두 가능하고 상장 폐지되지 않음)
    pub active: bool,
    /// 입금 가능
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<bool>,
    /// 출금 가능
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdraw: Option<bool>,
    /// 암호화폐 여부 (false면 법정화폐)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crypto: Option<bool>,
    /// 출금 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
    /// 정밀도 (소수점 자릿수)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Currency {
    /// 새 Currency 생성
    pub fn new(id: String, code: String) -> Self {
        Self {
            id,
            code,
            name: None,
            active: true,
            deposit: None,
            withdraw: None,
            crypto: None,
            fee: None,
            precision: None,
            info: serde_json::Value::Null,
        }
    }

    /// 이름 설정
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// 수수료 설정
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = Some(fee);
        self
    }
}

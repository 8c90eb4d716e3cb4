//! Account types - 계정 관련 타입

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 잔고 조회 대상 계정
///
/// 잔고 엔드포인트가 계정 종류별로 나뉘어 있어 enum으로 구분한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// 거래 계정
    #[default]
    Trading,
    /// 메인(입출금) 계정
    Account,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Trading => "trading",
            AccountType::Account => "account",
        }
    }
}

/// 입금 주소 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositAddress {
    /// 원본 응답
    #[serde(default)]
    pub info: Value,
    /// 화폐 코드
    pub currency: String,
    /// 입금 주소
    pub address: String,
    /// 주소 태그/메모 (XRP, XLM 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl DepositAddress {
    /// 새 DepositAddress 생성
    pub fn new(currency: impl Into<String>, address: impl Into<String>) -> Self {
        DepositAddress {
            info: Value::Null,
            currency: currency.into(),
            address: address.into(),
            tag: None,
        }
    }

    /// 태그 설정
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type() {
        assert_eq!(AccountType::Trading.as_str(), "trading");
        assert_eq!(AccountType::Account.as_str(), "account");
        assert_eq!(AccountType::default(), AccountType::Trading);
    }

    #[test]
    fn test_deposit_address() {
        let address = DepositAddress::new("XRP", "rE53DM...").with_tag("12345");

        assert_eq!(address.currency, "XRP");
        assert_eq!(address.tag, Some("12345".to_string()));
    }
}

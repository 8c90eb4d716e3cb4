//! Transaction type - 입출금 내역

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Fee;

/// 트랜잭션 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

/// 트랜잭션 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Ok,
    Failed,
    /// 알 수 없는 상태의 원본 문자열
    #[serde(untagged)]
    Other(String),
}

/// 입출금 트랜잭션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 트랜잭션 ID
    pub id: String,
    /// 타임스탬프 (밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// ISO 8601 datetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 업데이트 타임스탬프
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    /// 트랜잭션 타입
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<TransactionType>,
    /// 화폐 코드
    pub currency: String,
    /// 금액
    pub amount: Decimal,
    /// 상태
    pub status: TransactionStatus,
    /// 주소
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// 태그 (memo, payment id 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// 트랜잭션 해시
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Transaction {
    /// 새 트랜잭션 생성
    pub fn new(id: String, currency: String, amount: Decimal) -> Self {
        Self {
            id,
            timestamp: None,
            datetime: None,
            updated: None,
            tx_type: None,
            currency,
            amount,
            status: TransactionStatus::Pending,
            address: None,
            tag: None,
            txid: None,
            fee: None,
            info: serde_json::Value::Null,
        }
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

    /// 주소 설정
    pub fn with_address(mut self, address: String, tag: Option<String>) -> Self {
        self.address = Some(address);
        self.tag = tag;
        self
    }

    /// 상태 설정
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    /// 입금인지 확인
    pub fn is_deposit(&self) -> bool {
        self.tx_type == Some(TransactionType::Deposit)
    }

    /// 출금인지 확인
    pub fn is_withdrawal(&self) -> bool {
        self.tx_type == Some(TransactionType::Withdrawal)
    }

    /// 완료됨인지 확인
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Ok
    }
}

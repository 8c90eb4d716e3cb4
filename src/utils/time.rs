//! 시간 유틸리티

use chrono::Utc;

/// 타임스탬프(밀리초)를 ISO 8601 문자열로 변환
pub fn timestamp_to_iso8601(ts: i64) -> Option<String> {
    chrono::DateTime::<Utc>::from_timestamp_millis(ts).map(|dt| dt.to_rfc3339())
}

//! Rate limiting for API requests

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// 레이트 리미터
///
/// 요청 간 최소 간격을 보장하는 단순 인터벌 스로틀.
/// 어댑터는 요청마다 `throttle(cost)`를 await 한다.
pub struct RateLimiter {
    interval_ms: u64,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// 새로운 레이트 리미터 생성
    ///
    /// # Arguments
    /// * `interval_ms` - 요청 간 최소 간격 (밀리초)
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_request: Mutex::new(None),
        }
    }

    /// 다음 요청이 허용될 때까지 대기
    ///
    /// `cost`는 해당 요청의 상대적 비용 (기본 1.0, 무거운 엔드포인트는 그 이상)
    pub async fn throttle(&self, cost: f64) {
        let wait = {
            let mut last = self.last_request.lock().await;
            let now = Instant::now();
            let required = Duration::from_millis((self.interval_ms as f64 * cost) as u64);

            let wait = match *last {
                Some(prev) => {
                    let elapsed = now.duration_since(prev);
                    required.checked_sub(elapsed)
                },
                None => None,
            };

            *last = Some(now + wait.unwrap_or_default());
            wait
        };

        if let Some(wait) = wait {
            tokio::time::sleep(wait).await;
        }
    }

    /// 설정된 요청 간격 (밀리초)
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

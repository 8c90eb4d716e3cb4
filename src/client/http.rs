//! HTTP client for API requests

use reqwest::{Client, Method};
use std::time::Duration;

use crate::errors::{CcxtError, CcxtResult};
use crate::types::SignedRequest;

use super::ExchangeConfig;

/// 원시 HTTP 응답 (상태 코드 + 본문)
///
/// 상태 코드 판정은 어댑터의 에러 분류기가 담당한다.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx 여부
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 클라이언트
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// 새로운 HTTP 클라이언트 생성
    pub fn new(base_url: impl Into<String>, config: &ExchangeConfig) -> CcxtResult<Self> {
        let base_url_str = base_url.into();
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms()))
            .build()
            .map_err(|e| CcxtError::NetworkError {
                url: base_url_str.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url_str,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 서명된 요청 실행
    ///
    /// 비-2xx 응답도 그대로 반환한다. 거래소가 보고한 실패의 분류는
    /// 호출 측의 handle_errors 몫이다.
    pub async fn execute(&self, signed: &SignedRequest) -> CcxtResult<HttpResponse> {
        let method = Method::from_bytes(signed.method.as_bytes()).map_err(|_| {
            CcxtError::BadRequest {
                message: format!("Invalid HTTP method: {}", signed.method),
            }
        })?;

        tracing::debug!(method = %signed.method, url = %signed.url, "sending request");

        let mut request = self.client.request(method, &signed.url);

        for (key, value) in &signed.headers {
            request = request.header(key, value);
        }

        if let Some(body) = &signed.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

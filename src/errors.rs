//! CCXT Error Hierarchy
//!
//! Unified error taxonomy shared by the adapter and the embedding client

use thiserror::Error;

/// CCXT error hierarchy
///
/// Error classes follow the same hierarchy as CCXT TypeScript:
/// - BaseError
///   - ExchangeError (exchange-specific errors)
///     - AuthenticationError
///       - PermissionDenied
///     - ArgumentsRequired
///     - BadRequest
///       - BadSymbol
///     - InsufficientFunds
///     - InvalidAddress
///     - InvalidOrder
///       - OrderNotFound
///       - DuplicateOrderId
///     - NotSupported
///   - OperationFailed (operation failures)
///     - NetworkError
///       - RateLimitExceeded
///       - ExchangeNotAvailable
///       - RequestTimeout
#[derive(Error, Debug)]
pub enum CcxtError {
    // === ExchangeError family ===
    /// Generic exchange error
    #[error("Exchange error: {message}")]
    ExchangeError { message: String },

    /// Authentication failed (invalid API key, signature, etc.)
    #[error("Authentication error: {message}")]
    AuthenticationError { message: String },

    /// API key lacks permission for the operation
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// Required arguments missing
    #[error("Arguments required: {message}")]
    ArgumentsRequired { message: String },

    /// Invalid request parameters
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Invalid trading symbol
    #[error("Bad symbol: {symbol}")]
    BadSymbol { symbol: String },

    /// Not enough balance
    #[error("Insufficient funds: {message}")]
    InsufficientFunds { message: String },

    /// Invalid deposit/withdrawal address
    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    /// Generic invalid order error
    #[error("Invalid order: {message}")]
    InvalidOrder { message: String },

    /// Order not found on exchange
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Client order ID already used
    #[error("Duplicate order ID: {order_id}")]
    DuplicateOrderId { order_id: String },

    /// Feature not supported by this exchange
    #[error("Not supported: {feature}")]
    NotSupported { feature: String },

    // === OperationFailed / NetworkError family ===
    /// Generic network error
    #[error("Network error: {url} - {message}")]
    NetworkError { url: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        /// Suggested retry after in milliseconds (if provided by exchange)
        retry_after_ms: Option<u64>,
    },

    /// Exchange is temporarily unavailable
    #[error("Exchange not available: {message}")]
    ExchangeNotAvailable { message: String },

    /// Request timed out
    #[error("Request timeout: {message}")]
    RequestTimeout { message: String },

    // === Parsing errors ===
    /// Failed to parse response data
    #[error("Parse error: {data_type} - {message}")]
    ParseError { data_type: String, message: String },

    /// JSON parsing error
    #[error("JSON error: {message}")]
    JsonError { message: String },
}

impl CcxtError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            CcxtError::ExchangeError { .. } => "EXCHANGE_ERROR",
            CcxtError::AuthenticationError { .. } => "AUTHENTICATION_ERROR",
            CcxtError::PermissionDenied { .. } => "PERMISSION_DENIED",
            CcxtError::ArgumentsRequired { .. } => "ARGUMENTS_REQUIRED",
            CcxtError::BadRequest { .. } => "BAD_REQUEST",
            CcxtError::BadSymbol { .. } => "BAD_SYMBOL",
            CcxtError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            CcxtError::InvalidAddress { .. } => "INVALID_ADDRESS",
            CcxtError::InvalidOrder { .. } => "INVALID_ORDER",
            CcxtError::OrderNotFound { .. } => "ORDER_NOT_FOUND",
            CcxtError::DuplicateOrderId { .. } => "DUPLICATE_ORDER_ID",
            CcxtError::NotSupported { .. } => "NOT_SUPPORTED",
            CcxtError::NetworkError { .. } => "NETWORK_ERROR",
            CcxtError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            CcxtError::ExchangeNotAvailable { .. } => "EXCHANGE_NOT_AVAILABLE",
            CcxtError::RequestTimeout { .. } => "REQUEST_TIMEOUT",
            CcxtError::ParseError { .. } => "PARSE_ERROR",
            CcxtError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// Returns true if this error is temporary and the operation can be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CcxtError::NetworkError { .. }
                | CcxtError::RequestTimeout { .. }
                | CcxtError::RateLimitExceeded { .. }
                | CcxtError::ExchangeNotAvailable { .. }
        )
    }

    /// Returns true if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            CcxtError::AuthenticationError { .. } | CcxtError::PermissionDenied { .. }
        )
    }

    /// Returns true if this is an order-related error
    pub fn is_order_error(&self) -> bool {
        matches!(
            self,
            CcxtError::InvalidOrder { .. }
                | CcxtError::OrderNotFound { .. }
                | CcxtError::DuplicateOrderId { .. }
        )
    }

    /// Returns the suggested retry delay in milliseconds for retryable errors
    /// Returns None for non-retryable errors or when no delay is suggested
    pub fn suggested_retry_after(&self) -> Option<u64> {
        match self {
            CcxtError::RateLimitExceeded { retry_after_ms, .. } => {
                retry_after_ms.or(Some(1000)) // Default 1 second for rate limits
            },
            CcxtError::RequestTimeout { .. } => Some(5000),
            CcxtError::ExchangeNotAvailable { .. } => Some(30000),
            CcxtError::NetworkError { .. } => Some(1000),
            _ => None,
        }
    }
}

// === From implementations for common error types ===

impl From<serde_json::Error> for CcxtError {
    fn from(err: serde_json::Error) -> Self {
        CcxtError::JsonError {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for CcxtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CcxtError::RequestTimeout {
                message: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if err.is_connect() {
            CcxtError::NetworkError {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                message: "Connection failed".into(),
            }
        } else {
            CcxtError::NetworkError {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                message: err.to_string(),
            }
        }
    }
}

/// Result 타입 alias
pub type CcxtResult<T> = Result<T, CcxtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = CcxtError::AuthenticationError {
            message: "Invalid API key".into(),
        };
        assert_eq!(err.code(), "AUTHENTICATION_ERROR");

        let err = CcxtError::BadSymbol {
            symbol: "AAA/BBB".into(),
        };
        assert_eq!(err.code(), "BAD_SYMBOL");
    }

    #[test]
    fn test_retryable_errors() {
        let network_err = CcxtError::NetworkError {
            url: "https://api.hitbtc.com".into(),
            message: "Connection refused".into(),
        };
        assert!(network_err.is_retryable());

        let unavailable = CcxtError::ExchangeNotAvailable {
            message: "Service Unavailable".into(),
        };
        assert!(unavailable.is_retryable());

        let auth_err = CcxtError::AuthenticationError {
            message: "Invalid key".into(),
        };
        assert!(!auth_err.is_retryable());
    }

    #[test]
    fn test_is_auth_error() {
        let auth_err = CcxtError::AuthenticationError {
            message: "Invalid key".into(),
        };
        assert!(auth_err.is_auth_error());

        let perm_err = CcxtError::PermissionDenied {
            message: "No permission".into(),
        };
        assert!(perm_err.is_auth_error());

        let order_err = CcxtError::OrderNotFound {
            order_id: "12345".into(),
        };
        assert!(!order_err.is_auth_error());
        assert!(order_err.is_order_error());
    }

    #[test]
    fn test_suggested_retry_after() {
        let err = CcxtError::RateLimitExceeded {
            message: "Too many requests".into(),
            retry_after_ms: Some(250),
        };
        assert_eq!(err.suggested_retry_after(), Some(250));

        let err = CcxtError::InvalidOrder {
            message: "Bad price".into(),
        };
        assert_eq!(err.suggested_retry_after(), None);
    }
}

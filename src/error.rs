use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

/// Failure classes for the generation proxy. Each maps to one HTTP status
/// and a fixed client-facing message; internal detail stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("AI_GATEWAY_API_KEY is not configured")]
    MissingApiKey,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Usage limit reached. Please add credits.")]
    UsageLimited,

    #[error("AI gateway error")]
    Upstream,

    #[error("Failed to parse AI response")]
    Extraction { detail: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::UsageLimited => StatusCode::PAYMENT_REQUIRED,
            GatewayError::MissingApiKey
            | GatewayError::Upstream
            | GatewayError::Extraction { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("AI content error: {:?}", self);
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_failure_class() {
        assert_eq!(
            GatewayError::MissingApiKey.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::InvalidRequest("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            GatewayError::UsageLimited.status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            GatewayError::Upstream.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Extraction {
                detail: "x".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages_are_fixed() {
        assert_eq!(
            GatewayError::RateLimited.to_string(),
            "Rate limit exceeded. Please try again later."
        );
        assert_eq!(
            GatewayError::UsageLimited.to_string(),
            "Usage limit reached. Please add credits."
        );
        assert_eq!(GatewayError::Upstream.to_string(), "AI gateway error");
        // extraction detail never leaks into the client message
        assert_eq!(
            GatewayError::Extraction {
                detail: "missing field `keywords`".to_string()
            }
            .to_string(),
            "Failed to parse AI response"
        );
    }
}

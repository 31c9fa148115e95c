use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Transport failures, non-2xx upstream responses and malformed payloads all
/// reject the operation that raised them and leave the catalog untouched.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {service} returned status {status}: {body}")]
    ExternalApi {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::HttpClient(_) | AppError::ExternalApi { .. } | AppError::Decode { .. } => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid = AppError::InvalidInput("email must not be empty".to_string()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let upstream = AppError::ExternalApi {
            service: "tmdb",
            status: 401,
            body: "Invalid API key".to_string(),
        }
        .into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let decode = AppError::Decode {
            service: "liked-movies",
            message: "missing field `movies`".to_string(),
        }
        .into_response();
        assert_eq!(decode.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_external_api_message() {
        let err = AppError::ExternalApi {
            service: "tmdb",
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "External API error: tmdb returned status 503: down"
        );
    }
}

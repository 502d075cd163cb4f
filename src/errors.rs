use std::time::Duration;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Failure while fetching or reducing the reference page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status code {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("page has no readable text")]
    EmptyContent,
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ScrapeError::Status(status.as_u16()),
            None => ScrapeError::Request(err.to_string()),
        }
    }
}

/// Failure of a single call to the language-model service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("model API error: {0}")]
    Api(String),

    #[error("could not reach the model service: {0}")]
    Transport(String),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model returned an empty reply")]
    EmptyReply,

    #[error("invalid model request: {0}")]
    Client(String),
}

impl From<async_openai::error::OpenAIError> for ModelError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;

        match err {
            OpenAIError::ApiError(api_err) => ModelError::Api(api_err.message),
            OpenAIError::Reqwest(e) => ModelError::Transport(e.to_string()),
            OpenAIError::JSONDeserialize(_, content) => {
                ModelError::Api(format!("failed to parse response: {content}"))
            }
            OpenAIError::InvalidArgument(msg) => ModelError::Client(msg),
            other => ModelError::Api(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Reference content unavailable: {0}")]
    ScrapeError(#[from] ScrapeError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error body shared with the chat endpoint's failure payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub erro: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) | AppError::ScrapeError(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            erro: self.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigError(format!("invalid URL: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

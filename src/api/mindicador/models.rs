use serde::{Deserialize, Serialize};

/// Body of `GET /api/{codigo}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorResponse {
    pub version: Option<String>,
    pub autor: Option<String>,
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub unidad_medida: Option<String>,
    pub serie: Option<Vec<SerieEntry>>,
}

/// One observation as sent on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerieEntry {
    pub fecha: String,
    pub valor: f64,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited(String),
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other non-success HTTP statuses
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl ApiError {
    /// Status code of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimited(_) => Some(429),
            ApiError::ServerError(code, _) | ApiError::HttpError(code, _) => Some(*code),
            ApiError::RequestError(_) | ApiError::DeserializationError(_) => None,
        }
    }

    /// Text shown to the user. Every non-success status collapses into one
    /// generic message; the details stay in the logs.
    pub fn user_message(&self) -> String {
        if self.status().is_some() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited(msg) => write!(f, "Rate Limited: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

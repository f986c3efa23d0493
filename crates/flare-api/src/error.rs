use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use flare_persist::PersistError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database unavailable")]
    DatabaseUnavailable,
    
    #[error("Invalid thread id")]
    InvalidThreadId,
    
    #[error("Thread not found")]
    ThreadNotFound,
    
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    
    #[error("Persistence error: {0}")]
    Persist(PersistError),
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::InvalidObjectId(_) => ApiError::InvalidThreadId,
            other => ApiError::Persist(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidThreadId => StatusCode::BAD_REQUEST,
            ApiError::ThreadNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::DatabaseUnavailable | ApiError::Persist(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                "Storage error".to_string()
            }
            ApiError::InvalidBody(ref rejection) => rejection.body_text(),
            ApiError::DatabaseUnavailable => {
                tracing::warn!("Request rejected, database unavailable");
                self.to_string()
            }
            _ => self.to_string(),
        };
        
        let body = Json(json!({
            "detail": detail
        }));
        
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_invalid_object_id_maps_to_bad_request() {
        let err: ApiError = PersistError::InvalidObjectId("bad".into()).into();
        assert!(matches!(err, ApiError::InvalidThreadId));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
    
    #[test]
    fn test_error_statuses() {
        assert_eq!(ApiError::ThreadNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::DatabaseUnavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
        
        let err: ApiError = PersistError::Internal("boom".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

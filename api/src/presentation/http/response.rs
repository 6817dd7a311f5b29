use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::error::ServiceError;
use crate::application::integrity::ReferenceError;
use crate::application::ports::upload_storage_port::UploadError;

/// `{success, data?, error?, count?}` body returned by every `/api/v1` route.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            count: None,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            error: None,
        }
    }
}

impl Envelope<serde_json::Value> {
    pub fn empty() -> Self {
        Self::data(serde_json::json!({}))
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(Envelope::data(data))))
}

pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(Envelope::data(data))))
}

pub fn deleted() -> ApiResult<serde_json::Value> {
    Ok((StatusCode::OK, Json(Envelope::empty())))
}

pub fn ok_list<T: Serialize>(items: Vec<T>) -> ApiResult<Vec<T>> {
    Ok((StatusCode::OK, Json(Envelope::list(items))))
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            // Authorization denials share 401 with missing identity.
            ServiceError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Reference(ReferenceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServiceError::Reference(ReferenceError::PolicyFarmerMismatch) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Internal(e) => {
                tracing::error!(error = ?e, "internal_error");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server Error");
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } | UploadError::UnsupportedType => {
                Self::bad_request(err.to_string())
            }
            UploadError::Storage(e) => {
                tracing::error!(error = ?e, "upload_store_failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        Self::bad_request(rej.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::<()> {
            success: false,
            data: None,
            error: Some(self.message),
            count: None,
        };
        (self.status, Json(body)).into_response()
    }
}

//! Mapping of catalog errors onto HTTP responses.

use api_shared::ErrorRes;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use songlib_core::CatalogError;

/// Error returned by REST handlers.
///
/// Client errors (400, 404) carry a message describing the problem. Dependency and server
/// errors (502, 500) are logged in full and answered with a fixed message.
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

/// Unreadable JSON bodies (bad syntax, wrong field types, missing content type) are client
/// errors like any other invalid request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CatalogError::InvalidRequest(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::EnrichmentFailed(_) => StatusCode::BAD_GATEWAY,
            CatalogError::PersistenceFailed(_) | CatalogError::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            CatalogError::InvalidRequest(msg) => msg.clone(),
            CatalogError::NotFound(_) => "Song not found".into(),
            CatalogError::EnrichmentFailed(_) => "Failed to fetch song details".into(),
            CatalogError::PersistenceFailed(_) => "Failed to access song storage".into(),
            CatalogError::InvalidConfig(_) => "Internal error".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, "request rejected");
        }

        (
            status,
            Json(ErrorRes {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songlib_core::{EnrichmentError, StoreError};

    #[test]
    fn test_each_error_kind_has_a_distinct_status() {
        let cases = [
            (CatalogError::InvalidRequest("group is required".into()), StatusCode::BAD_REQUEST),
            (CatalogError::NotFound(3), StatusCode::NOT_FOUND),
            (
                CatalogError::EnrichmentFailed(EnrichmentError::Status(503)),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CatalogError::PersistenceFailed(StoreError::NotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ApiError(CatalogError::EnrichmentFailed(EnrichmentError::Network(
            "connection refused to 10.0.0.7".into(),
        )));
        assert_eq!(err.message(), "Failed to fetch song details");

        let err = ApiError(CatalogError::InvalidRequest("song is required".into()));
        assert_eq!(err.message(), "song is required");
    }
}

//! Error conversions - store and HTTP boundary adapters for [`AppError`].
//!
//! Messages produced here are generic. The underlying error is attached as
//! `source` for logging and never rendered to clients.

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Store unavailable").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("Duplicate value"),
                    Some("23503") => AppError::conflict("Referenced record is in use"),
                    Some("23502") | Some("23514") => AppError::bad_request("Invalid value"),
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Store unavailable")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Store unavailable")
                    }
                    _ => AppError::internal("Internal error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => AppError::service_unavailable("Store unavailable").with_source(err),
            _ => AppError::internal("Internal error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "code": self.kind().code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_problem_details_status() {
        let response = AppError::forbidden("Admin access required").into_response();
        assert_eq!(response.status().as_u16(), 403);
    }

    #[test]
    fn test_problem_details_fallback_for_internal() {
        let response = AppError::internal("Internal error").into_response();
        assert_eq!(response.status().as_u16(), 500);
    }
}

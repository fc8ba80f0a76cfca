use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;
use spot_discovery_sdk::errors::SpotsError;

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 problem details body.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: &'static str,
}

impl Problem {
    fn new(status: StatusCode, code: &'static str, title: &str, detail: impl Into<String>) -> Self {
        Self {
            type_url: format!("urn:spot-discovery:error:{code}"),
            title: title.to_owned(),
            status: status.as_u16(),
            detail: detail.into(),
            code,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation", "Bad Request", detail)
    }
}

impl From<SpotsError> for Problem {
    fn from(e: SpotsError) -> Self {
        let detail = e.to_string();
        match e {
            SpotsError::Validation { .. } => Self::bad_request(detail),
            SpotsError::Unauthenticated => {
                Self::new(StatusCode::UNAUTHORIZED, "unauthenticated", "Unauthorized", detail)
            }
            SpotsError::NotOwner => Self::new(StatusCode::FORBIDDEN, "not_owner", "Forbidden", detail),
            SpotsError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "not_found", "Not Found", detail)
            }
            SpotsError::DuplicateVote => {
                Self::new(StatusCode::CONFLICT, "duplicate_vote", "Conflict", detail)
            }
            SpotsError::Internal => {
                tracing::error!("request failed with an internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal Server Error",
                    "An internal error occurred",
                )
            }
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

pub type ApiResult<T> = Result<T, Problem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_categories_map_to_statuses() {
        let cases = [
            (SpotsError::validation("text: must not be empty"), StatusCode::BAD_REQUEST),
            (SpotsError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (SpotsError::NotOwner, StatusCode::FORBIDDEN),
            (SpotsError::not_found("Review"), StatusCode::NOT_FOUND),
            (SpotsError::DuplicateVote, StatusCode::CONFLICT),
            (SpotsError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(Problem::from(err).status(), status);
        }
    }

    #[test]
    fn response_uses_problem_content_type() {
        let response = Problem::from(SpotsError::DuplicateVote).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_CONTENT_TYPE
        );
    }

    #[test]
    fn internal_detail_is_generic() {
        let problem = Problem::from(SpotsError::internal());
        assert_eq!(problem.detail, "An internal error occurred");
    }
}

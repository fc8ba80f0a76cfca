//! Request identity taken from the headers set by the identity collaborator.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::HeaderMap;
use http::request::Parts;
use spot_discovery_sdk::session::{Identity, SessionContext};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_PHOTO_HEADER: &str = "x-user-photo";

/// Caller session. Requests without a user id header are anonymous.
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

#[must_use]
pub fn session_from_headers(headers: &HeaderMap) -> SessionContext {
    let Some(user_id) = header(headers, USER_ID_HEADER) else {
        return SessionContext::anonymous();
    };
    SessionContext::signed_in(Identity {
        user_name: header(headers, USER_NAME_HEADER).unwrap_or_else(|| user_id.clone()),
        user_photo_url: header(headers, USER_PHOTO_HEADER),
        user_id,
    })
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_headers(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn missing_or_blank_user_is_anonymous() {
        let mut headers = HeaderMap::new();
        assert!(session_from_headers(&headers).is_anonymous());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert!(session_from_headers(&headers).is_anonymous());
    }

    #[test]
    fn name_defaults_to_id() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u-7"));
        headers.insert(USER_PHOTO_HEADER, HeaderValue::from_static("https://img/u7.png"));

        let ctx = session_from_headers(&headers);
        let identity = ctx.identity().unwrap();

        assert_eq!(identity.user_id, "u-7");
        assert_eq!(identity.user_name, "u-7");
        assert_eq!(identity.user_photo_url.as_deref(), Some("https://img/u7.png"));
    }
}

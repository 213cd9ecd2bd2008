//! Session extraction from a JWT Bearer header or session cookie.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::user::{parse_roles, UserRole};
use crate::services::auth::{self as auth_service, Claims};
use crate::AppState;

/// Cookie carrying the session token for browser navigation.
pub const SESSION_COOKIE: &str = "access_token";

/// The caller's session, passed explicitly to whatever needs to check it.
///
/// Use as an Axum extractor in handlers that require authentication:
/// ```ignore
/// async fn handler(session: Session) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub subject: String,
    pub user_id: Option<i64>,
    pub roles: Vec<UserRole>,
}

impl Session {
    pub fn new(subject: impl Into<String>, user_id: Option<i64>, roles: Vec<UserRole>) -> Self {
        Self {
            subject: subject.into(),
            user_id,
            roles,
        }
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    pub fn is_customer(&self) -> bool {
        self.has_role(UserRole::Customer)
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub, claims.user_id, parse_roles(&claims.roles))
    }
}

/// Raw session token from the request, header first, then cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

/// Resolve the session for a request, `None` when absent or invalid.
pub fn resolve_session(headers: &HeaderMap, jwt_secret: &str) -> Option<Session> {
    let token = session_token(headers)?;
    match auth_service::validate_token(&token, jwt_secret) {
        Ok(claims) => Some(Session::from(claims)),
        Err(_) => {
            tracing::debug!("Rejected invalid session token");
            None
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(&parts.headers, &state.config.jwt_secret).ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{AUTHORIZATION, COOKIE};

    const SECRET: &str = "session-test-secret";

    fn token(roles: &[UserRole]) -> String {
        auth_service::issue_token("ada@foodiehub.test", Some(3), roles, SECRET, 900).unwrap()
    }

    #[test]
    fn bearer_header_resolves_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", token(&[UserRole::Admin])).parse().unwrap(),
        );

        let session = resolve_session(&headers, SECRET).unwrap();
        assert_eq!(session.subject, "ada@foodiehub.test");
        assert_eq!(session.user_id, Some(3));
        assert!(session.is_admin());
        assert!(!session.is_customer());
    }

    #[test]
    fn cookie_resolves_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("theme=dark; {SESSION_COOKIE}={}", token(&[UserRole::Customer]))
                .parse()
                .unwrap(),
        );

        let session = resolve_session(&headers, SECRET).unwrap();
        assert!(session.is_customer());
    }

    #[test]
    fn missing_or_invalid_token_is_anonymous() {
        assert!(resolve_session(&HeaderMap::new(), SECRET).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer not-a-jwt".parse().unwrap());
        assert!(resolve_session(&headers, SECRET).is_none());
    }

    #[test]
    fn unknown_claim_roles_are_dropped() {
        let claims = Claims {
            sub: "x@y.z".to_string(),
            user_id: None,
            roles: vec!["ROLE_ADMIN".to_string(), "SOMMELIER".to_string()],
            exp: 0,
            iat: 0,
        };
        let session = Session::from(claims);
        assert_eq!(session.roles, vec![UserRole::Admin]);
    }
}

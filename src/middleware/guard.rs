//! Route guards: send callers without the right session to the login page.
//!
//! The guard decision is a pure function of an explicitly passed session; the
//! extractors below only gather that session and the requested location.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::auth::{resolve_session, Session};
use crate::AppState;

/// Which predicate a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Customer,
    Admin,
}

impl Access {
    pub fn permits(self, session: Option<&Session>) -> bool {
        match (self, session) {
            (Access::Customer, Some(s)) => s.is_customer(),
            (Access::Admin, Some(s)) => s.is_admin(),
            (_, None) => false,
        }
    }
}

/// Redirect to the login page, remembering where the caller was going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub login_path: String,
    pub from: String,
}

impl LoginRedirect {
    /// `login_path?from=<requested>`, with `requested` URL-encoded.
    pub fn location(&self) -> String {
        format!("{}?from={}", self.login_path, urlencoding::encode(&self.from))
    }
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.location()).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(LoginRedirect),
}

/// Decide whether a request for `requested` may proceed.
pub fn guard(
    access: Access,
    session: Option<&Session>,
    requested: &str,
    login_path: &str,
) -> GuardOutcome {
    if access.permits(session) {
        GuardOutcome::Proceed
    } else {
        GuardOutcome::Redirect(LoginRedirect {
            login_path: login_path.to_string(),
            from: requested.to_string(),
        })
    }
}

/// Run the guard against a request's session and original URI.
fn check(access: Access, parts: &Parts, state: &AppState) -> Result<Session, LoginRedirect> {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.clone())
        .unwrap_or_else(|| parts.uri.clone());
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let session = resolve_session(&parts.headers, &state.config.jwt_secret);
    match (
        guard(access, session.as_ref(), &requested, &state.config.login_path),
        session,
    ) {
        (GuardOutcome::Proceed, Some(session)) => Ok(session),
        (GuardOutcome::Redirect(redirect), _) => {
            tracing::info!(?access, from = %redirect.from, "Redirecting to login");
            Err(redirect)
        }
        (GuardOutcome::Proceed, None) => Err(LoginRedirect {
            login_path: state.config.login_path.clone(),
            from: requested,
        }),
    }
}

/// Extractor that requires an admin session.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Session);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check(Access::Admin, parts, state).map(RequireAdmin)
    }
}

/// Extractor that requires a customer session.
#[derive(Debug, Clone)]
pub struct RequireCustomer(pub Session);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check(Access::Customer, parts, state).map(RequireCustomer)
    }
}

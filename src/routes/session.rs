//! Session routes.

use axum::Json;

use crate::errors::ApiResponse;
use crate::middleware::auth::Session;
use crate::middleware::guard::RequireCustomer;

/// GET /api/v1/session - the caller's session for any role, 401 when anonymous.
///
/// Lets API clients check whether they are logged in without being redirected.
pub async fn current(session: Session) -> Json<ApiResponse<Session>> {
    ApiResponse::success(session)
}

/// GET /api/v1/me - the caller's session; customers only.
pub async fn me(RequireCustomer(session): RequireCustomer) -> Json<ApiResponse<Session>> {
    ApiResponse::success(session)
}

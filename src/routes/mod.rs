//! Route definitions for the FoodieHub admin API.

pub mod dashboard;
pub mod health;
pub mod orders;
pub mod session;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

/// Build the full router with middleware applied.
pub fn router(state: AppState) -> Router {
    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(frontend_url = %state.config.frontend_url, "Invalid FRONTEND_URL, CORS disabled");
            CorsLayer::new()
        }
    };

    let api_routes = Router::new()
        .route("/dashboard", get(dashboard::overview))
        .route("/dashboard/refresh", post(dashboard::refresh))
        .route("/dashboard/notice", get(dashboard::notice))
        .route("/orders/{id}", get(orders::detail))
        .route("/me", get(session::me))
        .route("/session", get(session::current));

    let health_routes = Router::new()
        .route("/live", get(health::live))
        .route("/ready", get(health::ready));

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::models::user::UserRole;
    use crate::services::upstream::HttpDashboardSource;

    fn test_app() -> Router {
        let config = AppConfig::for_tests("router-secret", "http://127.0.0.1:9");
        let source =
            HttpDashboardSource::new("http://127.0.0.1:9", None, Duration::from_millis(200), 10)
                .unwrap();
        router(AppState::new(config, Arc::new(source)))
    }

    #[tokio::test]
    async fn liveness_needs_no_session() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn anonymous_dashboard_redirects_with_nested_path() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/v1/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/login?from=%2Fapi%2Fv1%2Fdashboard"
        );
    }

    #[tokio::test]
    async fn anonymous_session_lookup_is_unauthorized() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/v1/session").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn delivery_session_lookup_succeeds() {
        let token = crate::services::auth::issue_token(
            "rider@foodiehub.test",
            Some(9),
            &[UserRole::Delivery],
            "router-secret",
            600,
        )
        .unwrap();
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/session")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["subject"], "rider@foodiehub.test");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/v1/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

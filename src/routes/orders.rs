//! Order detail route behind the dashboard's "view" action.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::guard::RequireAdmin;
use crate::models::order::Order;
use crate::AppState;

/// GET /api/v1/orders/{id}
pub async fn detail(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let order = state.source.fetch_order(id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::NotFound(format!("Order {id} not found"))
        } else {
            AppError::from(e)
        }
    })?;
    Ok(ApiResponse::success(order))
}

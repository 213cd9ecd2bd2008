//! Dashboard routes: the admin overview, refresh, and the error notice.

use axum::{extract::State, Json};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::guard::RequireAdmin;
use crate::models::order::Order;
use crate::services::dashboard::{PopularItem, StatusCount};
use crate::services::store::{self, Published};
use crate::AppState;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Shown when an order has no customer name.
const NO_CUSTOMER: &str = "N/A";

/// Where the dashboard's "view" action for an order navigates.
pub fn order_detail_path(id: i64) -> String {
    format!("/admin/orders/{id}")
}

/// Labels and values for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// One row of the recent-orders table.
#[derive(Debug, Clone, Serialize)]
pub struct RecentOrderRow {
    pub id: i64,
    pub order_date: Option<NaiveDate>,
    pub customer: String,
    pub total_amount: Option<f64>,
    pub order_status: String,
    pub detail_path: String,
}

impl From<&Order> for RecentOrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            order_date: order.order_date.map(|d| d.date()),
            customer: order.customer_name().unwrap_or(NO_CUSTOMER).to_string(),
            total_amount: order.total_amount,
            order_status: order.status_label().to_string(),
            detail_path: order_detail_path(order.id),
        }
    }
}

/// Presentation-ready dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub active_customers: i64,
    pub menu: usize,
    pub recent_orders: Vec<RecentOrderRow>,
    pub order_status_distribution: Vec<StatusCount>,
    pub revenue_data: [f64; 12],
    pub popular_items: Vec<PopularItem>,
    pub revenue_chart: ChartSeries,
    pub status_chart: ChartSeries,
    pub computed_at: DateTime<Utc>,
}

impl From<&Published> for DashboardView {
    fn from(published: &Published) -> Self {
        let s = &published.snapshot;
        Self {
            total_orders: s.total_orders,
            total_revenue: s.total_revenue,
            active_customers: s.active_customers,
            menu: s.menu,
            recent_orders: s.recent_orders.iter().map(RecentOrderRow::from).collect(),
            order_status_distribution: s.order_status_distribution.clone(),
            revenue_data: s.revenue_data,
            popular_items: s.popular_items.clone(),
            revenue_chart: ChartSeries {
                labels: MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
                data: s.revenue_data.to_vec(),
            },
            status_chart: ChartSeries {
                labels: s
                    .order_status_distribution
                    .iter()
                    .map(|c| c.status.clone())
                    .collect(),
                data: s
                    .order_status_distribution
                    .iter()
                    .map(|c| c.count as f64)
                    .collect(),
            },
            computed_at: published.computed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoticeView {
    pub message: String,
}

/// GET /api/v1/dashboard - latest snapshot, computing the first on demand.
pub async fn overview(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let published =
        store::current_or_refresh(state.source.as_ref(), &state.dashboard, &state.notice).await?;
    Ok(ApiResponse::success(DashboardView::from(&published)))
}

/// POST /api/v1/dashboard/refresh - recompute from fresh upstream data.
pub async fn refresh(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    tracing::info!(user = %admin.subject, "Dashboard refresh requested");
    let published =
        store::refresh(state.source.as_ref(), &state.dashboard, &state.notice).await?;
    Ok(ApiResponse::success(DashboardView::from(&published)))
}

/// GET /api/v1/dashboard/notice - the transient error message, empty when idle.
pub async fn notice(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<ApiResponse<NoticeView>> {
    ApiResponse::success(NoticeView {
        message: state.notice.current(),
    })
}

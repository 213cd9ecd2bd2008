//! Dashboard aggregation over the four FoodieHub reads.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;

use crate::models::menu::MenuItem;
use crate::models::order::Order;
use crate::models::payment::Payment;
use crate::services::upstream::{DashboardSource, FetchError};

/// Number of orders shown in the recent-orders table.
pub const RECENT_ORDERS_LIMIT: usize = 5;

/// Number of items shown in the popular-items table.
pub const POPULAR_ITEMS_LIMIT: usize = 5;

/// Aggregated dashboard metrics computed from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub active_customers: i64,
    pub menu: usize,
    pub recent_orders: Vec<Order>,
    pub order_status_distribution: Vec<StatusCount>,
    /// Completed revenue per calendar month, January first.
    pub revenue_data: [f64; 12],
    pub popular_items: Vec<PopularItem>,
}

/// Number of orders carrying a given status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Menu item name with its cumulative ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularItem {
    pub name: String,
    pub quantity: i64,
}

/// Build a snapshot from raw inputs. Pure and deterministic: the only
/// environmental input is the host calendar used to read payment dates.
pub fn compute_snapshot(
    orders: &[Order],
    menu_items: &[MenuItem],
    payments: &[Payment],
    active_customers: i64,
) -> DashboardSnapshot {
    let (total_revenue, revenue_data) = revenue_by_month(payments);

    DashboardSnapshot {
        total_orders: orders.len(),
        total_revenue,
        active_customers,
        menu: menu_items.len(),
        recent_orders: orders.iter().take(RECENT_ORDERS_LIMIT).cloned().collect(),
        order_status_distribution: status_distribution(orders),
        revenue_data,
        popular_items: popular_items(orders, POPULAR_ITEMS_LIMIT),
    }
}

/// Count orders per status, keeping first-occurrence order.
pub fn status_distribution(orders: &[Order]) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for order in orders {
        let status = order.status_label();
        match index.get(status) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(status, counts.len());
                counts.push(StatusCount {
                    status: status.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Top `limit` item names by total ordered quantity.
///
/// Line items without a usable menu name are skipped. Ties keep the order in
/// which names were first seen.
pub fn popular_items(orders: &[Order], limit: usize) -> Vec<PopularItem> {
    let mut totals: Vec<PopularItem> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in orders.iter().flat_map(|o| o.order_items.iter()) {
        let Some(name) = item.menu_name() else {
            continue;
        };
        match index.get(name) {
            Some(&i) => {
                totals[i].quantity = totals[i].quantity.saturating_add(item.quantity);
            }
            None => {
                index.insert(name, totals.len());
                totals.push(PopularItem {
                    name: name.to_string(),
                    quantity: item.quantity,
                });
            }
        }
    }

    // sort_by is stable, so equal quantities stay in first-seen order.
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(limit);
    totals
}

/// Total completed revenue and its split by payment month.
///
/// A completed payment without a readable date still counts toward the total
/// but has no month slot.
pub fn revenue_by_month(payments: &[Payment]) -> (f64, [f64; 12]) {
    let mut total = 0.0;
    let mut months = [0.0; 12];

    for payment in payments.iter().filter(|p| p.is_completed()) {
        total += payment.amount;
        if let Some(date) = payment.payment_date {
            months[date.month0() as usize] += payment.amount;
        }
    }

    (total, months)
}

/// Fetch all four inputs concurrently and aggregate them.
///
/// Any failed read aborts the whole load; no partial snapshot is built.
pub async fn load_snapshot(source: &dyn DashboardSource) -> Result<DashboardSnapshot, FetchError> {
    let (orders, menu_items, payments, active_customers) = tokio::try_join!(
        source.fetch_orders(),
        source.fetch_menu_items(),
        source.fetch_payments(),
        source.count_active_customers(),
    )?;

    tracing::debug!(
        orders = orders.len(),
        menu_items = menu_items.len(),
        payments = payments.len(),
        active_customers,
        "Dashboard inputs fetched"
    );

    Ok(compute_snapshot(&orders, &menu_items, &payments, active_customers))
}

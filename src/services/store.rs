//! Latest published dashboard snapshot and the refresh task that feeds it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::services::dashboard::{self, DashboardSnapshot};
use crate::services::notice::ErrorNotice;
use crate::services::upstream::DashboardSource;

/// A snapshot together with when it was computed.
#[derive(Debug, Clone)]
pub struct Published {
    pub snapshot: Arc<DashboardSnapshot>,
    pub computed_at: DateTime<Utc>,
    ticket: u64,
}

/// Holds the most recent snapshot.
///
/// Refreshes may overlap. Each takes a ticket when it starts, and a result is
/// only installed if no later-started refresh has been installed already.
#[derive(Debug, Default)]
pub struct DashboardStore {
    latest: RwLock<Option<Published>>,
    next_ticket: AtomicU64,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a ticket for a refresh that is about to start.
    pub fn begin(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Install `snapshot` for `ticket`. Returns `false` when a newer refresh
    /// already published and this result was discarded.
    pub fn publish(&self, ticket: u64, snapshot: DashboardSnapshot) -> bool {
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        if latest.as_ref().is_some_and(|p| p.ticket > ticket) {
            return false;
        }
        *latest = Some(Published {
            snapshot: Arc::new(snapshot),
            computed_at: Utc::now(),
            ticket,
        });
        true
    }

    pub fn current(&self) -> Option<Published> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Fetch, aggregate and publish a new snapshot.
///
/// On failure nothing is published, the previous snapshot stays in place and
/// the failure's message goes to `notice`. Returns whatever snapshot is
/// current once this refresh is done, which may be a newer one.
pub async fn refresh(
    source: &dyn DashboardSource,
    store: &DashboardStore,
    notice: &ErrorNotice,
) -> Result<Published, AppError> {
    let ticket = store.begin();
    tracing::info!(ticket, "Refreshing dashboard");

    let snapshot = match dashboard::load_snapshot(source).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            let err = AppError::from(e);
            notice.show_error(err.user_message());
            return Err(err);
        }
    };

    if !store.publish(ticket, snapshot) {
        tracing::debug!(ticket, "Discarding stale dashboard snapshot");
    }

    store
        .current()
        .ok_or_else(|| AppError::Internal("No dashboard snapshot after refresh".to_string()))
}

/// The current snapshot, computing the first one on demand.
pub async fn current_or_refresh(
    source: &dyn DashboardSource,
    store: &DashboardStore,
    notice: &ErrorNotice,
) -> Result<Published, AppError> {
    match store.current() {
        Some(published) => Ok(published),
        None => refresh(source, store, notice).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::MenuItem;
    use crate::models::order::Order;
    use crate::models::payment::Payment;
    use crate::services::dashboard::compute_snapshot;
    use crate::services::upstream::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;
    use tokio_test::{assert_err, assert_ok};

    /// In-memory source whose menu read can be made to fail.
    #[derive(Debug, Default)]
    struct StubSource {
        fail_menu: AtomicBool,
    }

    #[async_trait]
    impl DashboardSource for StubSource {
        async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
            Ok(vec![Order { id: 1, ..Default::default() }])
        }

        async fn fetch_menu_items(&self) -> Result<Vec<MenuItem>, FetchError> {
            if self.fail_menu.load(Ordering::SeqCst) {
                return Err(FetchError::Api {
                    status: 500,
                    message: Some("Menu service down".to_string()),
                });
            }
            Ok(vec![MenuItem::default()])
        }

        async fn fetch_payments(&self) -> Result<Vec<Payment>, FetchError> {
            Ok(Vec::new())
        }

        async fn count_active_customers(&self) -> Result<i64, FetchError> {
            Ok(2)
        }

        async fn fetch_order(&self, id: i64) -> Result<Order, FetchError> {
            Ok(Order { id, ..Default::default() })
        }
    }

    #[tokio::test]
    async fn refresh_publishes_snapshot() {
        let source = StubSource::default();
        let store = DashboardStore::new();
        let notice = ErrorNotice::default();

        let published = assert_ok!(refresh(&source, &store, &notice).await);
        assert_eq!(published.snapshot.total_orders, 1);
        assert_eq!(published.snapshot.menu, 1);
        assert_eq!(published.snapshot.active_customers, 2);
        assert_eq!(notice.current(), "");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let source = StubSource::default();
        let store = DashboardStore::new();
        let notice = ErrorNotice::default();
        let first = refresh(&source, &store, &notice).await.unwrap();

        source.fail_menu.store(true, Ordering::SeqCst);
        let err = assert_err!(refresh(&source, &store, &notice).await);
        assert!(matches!(err, AppError::DataFetch(_)));
        assert_eq!(notice.current(), "Menu service down");

        let current = store.current().unwrap();
        assert!(Arc::ptr_eq(&current.snapshot, &first.snapshot));
    }

    #[tokio::test]
    async fn current_or_refresh_reuses_published_snapshot() {
        let source = StubSource::default();
        let store = DashboardStore::new();
        let notice = ErrorNotice::default();
        let first = current_or_refresh(&source, &store, &notice).await.unwrap();

        source.fail_menu.store(true, Ordering::SeqCst);
        let second = current_or_refresh(&source, &store, &notice).await.unwrap();
        assert!(Arc::ptr_eq(&first.snapshot, &second.snapshot));
    }

    fn snapshot_with_customers(n: i64) -> DashboardSnapshot {
        compute_snapshot(&[], &[], &[], n)
    }

    #[test]
    fn tickets_increase() {
        let store = DashboardStore::new();
        let a = store.begin();
        let b = store.begin();
        assert!(b > a);
    }

    #[test]
    fn publish_replaces_snapshot() {
        let store = DashboardStore::new();
        assert!(store.current().is_none());

        let t1 = store.begin();
        assert!(store.publish(t1, snapshot_with_customers(1)));
        let t2 = store.begin();
        assert!(store.publish(t2, snapshot_with_customers(2)));

        assert_eq!(store.current().unwrap().snapshot.active_customers, 2);
    }

    #[test]
    fn older_refresh_finishing_late_is_discarded() {
        let store = DashboardStore::new();
        let older = store.begin();
        let newer = store.begin();

        assert!(store.publish(newer, snapshot_with_customers(2)));
        assert!(!store.publish(older, snapshot_with_customers(1)));
        assert_eq!(store.current().unwrap().snapshot.active_customers, 2);
    }

    #[test]
    fn older_refresh_finishing_first_is_kept_until_replaced() {
        let store = DashboardStore::new();
        let older = store.begin();
        let newer = store.begin();

        assert!(store.publish(older, snapshot_with_customers(1)));
        assert_eq!(store.current().unwrap().snapshot.active_customers, 1);
        assert!(store.publish(newer, snapshot_with_customers(2)));
        assert_eq!(store.current().unwrap().snapshot.active_customers, 2);
    }
}

//! FoodieHub REST API client.
//!
//! Every FoodieHub endpoint wraps its payload in
//! `{ statusCode, message, data, meta }`; orders additionally come as a Spring
//! page (`data.content`). Missing payloads degrade to empty values.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::models::menu::MenuItem;
use crate::models::null_as_default;
use crate::models::order::Order;
use crate::models::payment::Payment;

/// Failure reading from the FoodieHub API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Upstream API timed out")]
    Timeout,

    #[error("Upstream API is unavailable")]
    Unavailable,

    #[error("Upstream API returned status {status}")]
    Api { status: u16, message: Option<String> },

    #[error("Upstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Upstream response could not be decoded: {0}")]
    Decode(String),
}

impl FetchError {
    /// The structured `message` from the upstream body when there is one,
    /// otherwise this error's own description.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Unavailable
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Request(e)
        }
    }
}

/// The four reads the dashboard is built from, plus order lookup.
#[async_trait]
pub trait DashboardSource: Send + Sync + fmt::Debug {
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError>;

    async fn fetch_menu_items(&self) -> Result<Vec<MenuItem>, FetchError>;

    async fn fetch_payments(&self) -> Result<Vec<Payment>, FetchError>;

    async fn count_active_customers(&self) -> Result<i64, FetchError>;

    async fn fetch_order(&self, id: i64) -> Result<Order, FetchError>;

    /// Reachability probe used by the readiness check.
    async fn health_check(&self) -> Result<(), FetchError> {
        Ok(())
    }
}

/// FoodieHub response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status_code: Option<u16>,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Spring Data page; only the content matters here.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<T>,
}

/// Envelope shape used only to pull a message out of an error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP implementation of [`DashboardSource`] against the FoodieHub API.
#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: Client,
    base_url: String,
    token: Option<String>,
    orders_page_size: u32,
}

impl HttpDashboardSource {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
        orders_page_size: u32,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            orders_page_size,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            config.upstream_api_url.clone(),
            config.upstream_api_token.clone(),
            Duration::from_millis(config.upstream_timeout_ms),
            config.orders_page_size,
        )
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET `path` and unwrap the envelope's `data`.
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, FetchError> {
        tracing::debug!(path, "Fetching from FoodieHub API");
        let response = self.get(path).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        let path = format!("/api/orders/all?page=0&size={}", self.orders_page_size);
        let page: Option<Page<Order>> = self.get_data(&path).await?;
        Ok(page.map(|p| p.content).unwrap_or_default())
    }

    async fn fetch_menu_items(&self) -> Result<Vec<MenuItem>, FetchError> {
        Ok(self.get_data("/api/menu").await?.unwrap_or_default())
    }

    async fn fetch_payments(&self) -> Result<Vec<Payment>, FetchError> {
        Ok(self.get_data("/api/payments/all").await?.unwrap_or_default())
    }

    async fn count_active_customers(&self) -> Result<i64, FetchError> {
        Ok(self
            .get_data("/api/orders/unique-customers")
            .await?
            .unwrap_or(0))
    }

    async fn fetch_order(&self, id: i64) -> Result<Order, FetchError> {
        self.get_data(&format!("/api/orders/{id}"))
            .await?
            .ok_or(FetchError::Api {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: Some("Order not found".to_string()),
            })
    }

    async fn health_check(&self) -> Result<(), FetchError> {
        let response = self.get("/actuator/health").send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(FetchError::Unavailable)
        }
    }
}

//! Payment records as served by the FoodieHub payments API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp::deserialize_lenient;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    /// Any status this service does not know about.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payment_gateway: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub payment_date: Option<NaiveDateTime>,
}

impl Payment {
    /// Only completed payments count as revenue.
    pub fn is_completed(&self) -> bool {
        self.payment_status == Some(PaymentStatus::Completed)
    }
}

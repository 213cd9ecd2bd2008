//! Domain records consumed from the FoodieHub API.

pub mod menu;
pub mod order;
pub mod payment;
pub mod timestamp;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Serde adapter: treats an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! FoodieHub user roles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Customer,
    Delivery,
}

impl UserRole {
    /// Parse a role name as it appears in token claims. Accepts an optional
    /// Spring-style `ROLE_` prefix.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("ROLE_").unwrap_or(name);
        match name.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "CUSTOMER" => Some(Self::Customer),
            "DELIVERY" => Some(Self::Delivery),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Customer => "CUSTOMER",
            Self::Delivery => "DELIVERY",
        }
    }
}

/// Parse a list of claim role names, ignoring unknown ones.
pub fn parse_roles<S: AsRef<str>>(names: &[S]) -> Vec<UserRole> {
    names
        .iter()
        .filter_map(|n| UserRole::parse(n.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_serialization() {
        let json = serde_json::to_string(&UserRole::Customer).unwrap();
        assert_eq!(json, "\"CUSTOMER\"");
    }

    #[test]
    fn parse_accepts_prefix_and_case() {
        assert_eq!(UserRole::parse("ROLE_ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("customer"), Some(UserRole::Customer));
        assert_eq!(UserRole::parse("chef"), None);
    }

    #[test]
    fn parse_roles_skips_unknown() {
        let roles = parse_roles(&["ADMIN", "WAITER", "DELIVERY"]);
        assert_eq!(roles, vec![UserRole::Admin, UserRole::Delivery]);
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;
use super::menu_item::MAX_AVAILABLE_QUANTITY;
use super::MAX_NAME_LEN;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::invalid(format!(
                "`{other}` is not a valid order status"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
    pub customer_name: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub item_id: i32,
    pub quantity: i32,
    pub customer_name: String,
    pub status: OrderStatus,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity < 1 {
            return Err(DomainError::invalid(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        if self.quantity > MAX_AVAILABLE_QUANTITY {
            return Err(DomainError::invalid(format!(
                "quantity must be at most {MAX_AVAILABLE_QUANTITY}, got {}",
                self.quantity
            )));
        }
        if self.customer_name.is_empty() {
            return Err(DomainError::invalid("customerName is required"));
        }
        if self.customer_name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::invalid(format!(
                "customerName must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }
}

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::MAX_NAME_LEN;

/// Upper bound for stock set through create/update. Restocking may push an
/// item past it; the headroom up to `i32::MAX` absorbs returned orders.
pub const MAX_AVAILABLE_QUANTITY: i32 = 1_000_000_000;

/// Prices are stored as `NUMERIC(10, 2)`, so they must stay below 10^8.
const PRICE_LIMIT: i64 = 100_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: i32,
    pub item_name: String,
    pub available_quantity: i32,
    pub price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub id: i32,
    pub item_name: String,
    pub available_quantity: i32,
    pub price: BigDecimal,
}

impl NewMenuItem {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.item_name)?;
        validate_quantity(self.available_quantity)?;
        validate_price(&self.price)
    }
}

/// Partial update of a menu item. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct MenuItemChanges {
    pub item_name: Option<String>,
    pub available_quantity: Option<i32>,
    pub price: Option<BigDecimal>,
}

impl MenuItemChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.item_name {
            validate_name(name)?;
        }
        if let Some(quantity) = self.available_quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = &self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.item_name.is_none() && self.available_quantity.is_none() && self.price.is_none()
    }
}

/// Outcome of an atomic conditional stock decrement.
#[derive(Debug, Clone, PartialEq)]
pub enum StockReservation {
    Reserved(MenuItem),
    Insufficient { available: i32 },
    Missing,
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::invalid("itemName is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::invalid(format!(
            "itemName must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity < 0 {
        return Err(DomainError::invalid(format!(
            "availableQuantity must be at least 0, got {quantity}"
        )));
    }
    if quantity > MAX_AVAILABLE_QUANTITY {
        return Err(DomainError::invalid(format!(
            "availableQuantity must be at most {MAX_AVAILABLE_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

fn validate_price(price: &BigDecimal) -> Result<(), DomainError> {
    if *price < BigDecimal::from(0) {
        return Err(DomainError::invalid(format!(
            "price must be at least 0, got {price}"
        )));
    }
    if *price >= BigDecimal::from(PRICE_LIMIT) {
        return Err(DomainError::invalid(format!(
            "price must be below {PRICE_LIMIT}, got {price}"
        )));
    }
    Ok(())
}

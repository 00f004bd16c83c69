use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::menu_item::{MenuItem, MenuItemChanges, NewMenuItem};
use crate::domain::order::{NewOrder, Order};
use crate::schema::{menu_items, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MenuItemRow {
    pub id: i32,
    pub item_name: String,
    pub available_quantity: i32,
    pub price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            item_name: row.item_name,
            available_quantity: row.available_quantity,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = menu_items)]
pub struct NewMenuItemRow {
    pub id: i32,
    pub item_name: String,
    pub available_quantity: i32,
    pub price: BigDecimal,
}

impl From<NewMenuItem> for NewMenuItemRow {
    fn from(item: NewMenuItem) -> Self {
        NewMenuItemRow {
            id: item.id,
            item_name: item.item_name,
            available_quantity: item.available_quantity,
            price: item.price,
        }
    }
}

/// `None` fields are skipped by diesel; `updated_at` is always written so the
/// changeset is never empty.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = menu_items)]
pub struct MenuItemChangeset {
    pub item_name: Option<String>,
    pub available_quantity: Option<i32>,
    pub price: Option<BigDecimal>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuItemChanges> for MenuItemChangeset {
    fn from(changes: MenuItemChanges) -> Self {
        MenuItemChangeset {
            item_name: changes.item_name,
            available_quantity: changes.available_quantity,
            price: changes.price,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
    pub customer_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            DomainError::Internal(format!(
                "order {} has unknown status `{}`",
                row.id, row.status
            ))
        })?;
        Ok(Order {
            id: row.id,
            item_id: row.item_id,
            quantity: row.quantity,
            customer_name: row.customer_name,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
    pub customer_name: String,
    pub status: String,
}

impl From<NewOrder> for NewOrderRow {
    fn from(order: NewOrder) -> Self {
        NewOrderRow {
            id: Uuid::new_v4(),
            item_id: order.item_id,
            quantity: order.quantity,
            customer_name: order.customer_name,
            status: order.status.as_str().to_string(),
        }
    }
}

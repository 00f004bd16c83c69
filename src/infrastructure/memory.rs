//! In-memory repositories backed by `RwLock`-guarded maps.
//!
//! Each operation takes the lock once, so `reserve_stock` and `restock` are
//! atomic with respect to concurrent callers, same as the Postgres versions.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::menu_item::{MenuItem, MenuItemChanges, NewMenuItem, StockReservation};
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::{MenuItemRepository, OrderRepository};

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Internal("storage lock poisoned".to_string())
}

#[derive(Default)]
pub struct InMemoryMenuItemRepository {
    items: RwLock<BTreeMap<i32, MenuItem>>,
}

impl InMemoryMenuItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MenuItemRepository for InMemoryMenuItemRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.values().cloned().collect())
    }

    fn create(&self, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        if items.contains_key(&item.id) {
            return Err(DomainError::DuplicateMenuItem(item.id));
        }
        let now = Utc::now();
        let created = MenuItem {
            id: item.id,
            item_name: item.item_name,
            available_quantity: item.available_quantity,
            price: item.price,
            created_at: now,
            updated_at: now,
        };
        items.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&self, id: i32, changes: MenuItemChanges) -> Result<Option<MenuItem>, DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        let Some(item) = items.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.item_name {
            item.item_name = name;
        }
        if let Some(quantity) = changes.available_quantity {
            item.available_quantity = quantity;
        }
        if let Some(price) = changes.price {
            item.price = price;
        }
        item.updated_at = Utc::now();
        Ok(Some(item.clone()))
    }

    fn delete(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        Ok(items.remove(&id))
    }

    fn reserve_stock(&self, id: i32, quantity: i32) -> Result<StockReservation, DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        let Some(item) = items.get_mut(&id) else {
            return Ok(StockReservation::Missing);
        };
        if item.available_quantity < quantity {
            return Ok(StockReservation::Insufficient {
                available: item.available_quantity,
            });
        }
        item.available_quantity -= quantity;
        item.updated_at = Utc::now();
        Ok(StockReservation::Reserved(item.clone()))
    }

    fn restock(&self, id: i32, quantity: i32) -> Result<Option<MenuItem>, DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        Ok(items.get_mut(&id).map(|item| {
            item.available_quantity = item.available_quantity.saturating_add(quantity);
            if item.available_quantity == i32::MAX {
                log::warn!("Stock of item {} capped at {}", id, i32::MAX);
            }
            item.updated_at = Utc::now();
            item.clone()
        }))
    }

    fn delete_all(&self) -> Result<usize, DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        let removed = items.len();
        items.clear();
        Ok(removed)
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().map_err(poisoned)?;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by_key(|o| o.created_at);
        Ok(all)
    }

    fn create(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let now = Utc::now();
        let created = Order {
            id: Uuid::new_v4(),
            item_id: order.item_id,
            quantity: order.quantity,
            customer_name: order.customer_name,
            status: order.status,
            created_at: now,
            updated_at: now,
        };
        orders.insert(created.id, created.clone());
        Ok(created)
    }

    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>, DomainError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        Ok(orders.get_mut(&id).map(|order| {
            order.status = status;
            order.updated_at = Utc::now();
            order.clone()
        }))
    }

    fn delete(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        Ok(orders.remove(&id))
    }

    fn delete_all(&self) -> Result<usize, DomainError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let removed = orders.len();
        orders.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use bigdecimal::BigDecimal;

    use super::*;

    fn item(id: i32, available_quantity: i32) -> NewMenuItem {
        NewMenuItem {
            id,
            item_name: format!("Item {id}"),
            available_quantity,
            price: BigDecimal::from(5),
        }
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let repo = InMemoryMenuItemRepository::new();
        repo.create(item(1, 10)).unwrap();
        let err = repo.create(item(1, 20)).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateMenuItem(1)));
    }

    #[test]
    fn list_is_ordered_by_id() {
        let repo = InMemoryMenuItemRepository::new();
        for id in [3, 1, 2] {
            repo.create(item(id, 1)).unwrap();
        }
        let ids: Vec<i32> = repo.list().unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn reserve_stock_classifies_outcomes() {
        let repo = InMemoryMenuItemRepository::new();
        repo.create(item(1, 3)).unwrap();

        assert_eq!(
            repo.reserve_stock(1, 10).unwrap(),
            StockReservation::Insufficient { available: 3 }
        );
        assert_eq!(repo.reserve_stock(9, 1).unwrap(), StockReservation::Missing);

        match repo.reserve_stock(1, 3).unwrap() {
            StockReservation::Reserved(updated) => assert_eq!(updated.available_quantity, 0),
            other => panic!("expected reservation, got {other:?}"),
        }
    }

    #[test]
    fn concurrent_reservations_never_oversell() {
        let repo = Arc::new(InMemoryMenuItemRepository::new());
        repo.create(item(1, 10)).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || repo.reserve_stock(1, 3).unwrap())
            })
            .collect();
        let reserved = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| matches!(r, StockReservation::Reserved(_)))
            .count();

        assert_eq!(reserved, 3);
        assert_eq!(repo.find_by_id(1).unwrap().unwrap().available_quantity, 1);
    }

    #[test]
    fn restock_missing_item_returns_none() {
        let repo = InMemoryMenuItemRepository::new();
        assert!(repo.restock(42, 5).unwrap().is_none());
    }

    #[test]
    fn restock_near_the_limit_saturates_without_poisoning() {
        let repo = InMemoryMenuItemRepository::new();
        repo.create(item(1, 10)).unwrap();
        repo.update(
            1,
            MenuItemChanges {
                available_quantity: Some(i32::MAX - 2),
                ..Default::default()
            },
        )
        .unwrap();

        let restocked = repo.restock(1, 5).unwrap().unwrap();

        assert_eq!(restocked.available_quantity, i32::MAX);
        // the lock is still usable afterwards
        assert_eq!(repo.list().unwrap().len(), 1);
        assert!(matches!(
            repo.reserve_stock(1, 5).unwrap(),
            StockReservation::Reserved(_)
        ));
    }

    #[test]
    fn update_applies_only_given_fields() {
        let repo = InMemoryMenuItemRepository::new();
        repo.create(item(1, 10)).unwrap();
        let updated = repo
            .update(
                1,
                MenuItemChanges {
                    available_quantity: Some(99),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.available_quantity, 99);
        assert_eq!(updated.item_name, "Item 1");
    }

    #[test]
    fn order_delete_returns_removed_record_once() {
        let repo = InMemoryOrderRepository::new();
        let order = repo
            .create(NewOrder {
                item_id: 1,
                quantity: 2,
                customer_name: "John".to_string(),
                status: OrderStatus::Pending,
            })
            .unwrap();

        assert_eq!(repo.delete(order.id).unwrap(), Some(order.clone()));
        assert!(repo.delete(order.id).unwrap().is_none());
        assert!(repo.find_by_id(order.id).unwrap().is_none());
    }

    #[test]
    fn delete_all_reports_count() {
        let repo = InMemoryMenuItemRepository::new();
        repo.create(item(1, 1)).unwrap();
        repo.create(item(2, 1)).unwrap();
        assert_eq!(repo.delete_all().unwrap(), 2);
        assert!(repo.list().unwrap().is_empty());
    }
}

use std::sync::Arc;

use uuid::Uuid;

use super::errors::DomainError;
use super::menu_item::{MenuItem, MenuItemChanges, NewMenuItem, StockReservation};
use super::order::{NewOrder, Order, OrderStatus};

pub trait MenuItemRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError>;
    /// All items, ordered by id.
    fn list(&self) -> Result<Vec<MenuItem>, DomainError>;
    fn create(&self, item: NewMenuItem) -> Result<MenuItem, DomainError>;
    fn update(&self, id: i32, changes: MenuItemChanges) -> Result<Option<MenuItem>, DomainError>;
    fn delete(&self, id: i32) -> Result<Option<MenuItem>, DomainError>;
    /// Decrement stock by `quantity` only if the result stays non-negative,
    /// as one storage-level operation.
    fn reserve_stock(&self, id: i32, quantity: i32) -> Result<StockReservation, DomainError>;
    /// Increment stock by `quantity`, saturating at `i32::MAX`. Returns
    /// `None` if the item is gone.
    fn restock(&self, id: i32, quantity: i32) -> Result<Option<MenuItem>, DomainError>;
    fn delete_all(&self) -> Result<usize, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    /// All orders, oldest first.
    fn list(&self) -> Result<Vec<Order>, DomainError>;
    fn create(&self, order: NewOrder) -> Result<Order, DomainError>;
    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>, DomainError>;
    /// Remove the order and hand back what was stored.
    fn delete(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn delete_all(&self) -> Result<usize, DomainError>;
}

impl<T: MenuItemRepository + ?Sized> MenuItemRepository for Arc<T> {
    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        (**self).find_by_id(id)
    }

    fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        (**self).list()
    }

    fn create(&self, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        (**self).create(item)
    }

    fn update(&self, id: i32, changes: MenuItemChanges) -> Result<Option<MenuItem>, DomainError> {
        (**self).update(id, changes)
    }

    fn delete(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        (**self).delete(id)
    }

    fn reserve_stock(&self, id: i32, quantity: i32) -> Result<StockReservation, DomainError> {
        (**self).reserve_stock(id, quantity)
    }

    fn restock(&self, id: i32, quantity: i32) -> Result<Option<MenuItem>, DomainError> {
        (**self).restock(id, quantity)
    }

    fn delete_all(&self) -> Result<usize, DomainError> {
        (**self).delete_all()
    }
}

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        (**self).list()
    }

    fn create(&self, order: NewOrder) -> Result<Order, DomainError> {
        (**self).create(order)
    }

    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>, DomainError> {
        (**self).update_status(id, status)
    }

    fn delete(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).delete(id)
    }

    fn delete_all(&self) -> Result<usize, DomainError> {
        (**self).delete_all()
    }
}

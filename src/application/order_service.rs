use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::menu_item::StockReservation;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::{MenuItemRepository, OrderRepository};

/// Order lifecycle with the matching inventory bookkeeping: creating an
/// order takes stock from its menu item, deleting one gives it back.
pub struct OrderService<M, O> {
    menu: M,
    orders: O,
}

impl<M: MenuItemRepository, O: OrderRepository> OrderService<M, O> {
    pub fn new(menu: M, orders: O) -> Self {
        Self { menu, orders }
    }

    /// Reserve stock for the order, then persist it. If the insert fails the
    /// reservation is handed back before the error is returned.
    pub fn create_order(&self, order: NewOrder) -> Result<Order, DomainError> {
        order.validate()?;

        match self.menu.reserve_stock(order.item_id, order.quantity)? {
            StockReservation::Reserved(_) => {}
            StockReservation::Missing => return Err(DomainError::MenuItemNotFound),
            StockReservation::Insufficient { available } => {
                log::warn!(
                    "Rejected order for item {}: requested {}, available {}",
                    order.item_id,
                    order.quantity,
                    available
                );
                return Err(DomainError::InsufficientStock { available });
            }
        }

        let (item_id, quantity) = (order.item_id, order.quantity);
        match self.orders.create(order) {
            Ok(created) => {
                log::info!(
                    "Created order {} for item {} (quantity {})",
                    created.id,
                    created.item_id,
                    created.quantity
                );
                Ok(created)
            }
            Err(e) => {
                if let Err(release) = self.menu.restock(item_id, quantity) {
                    log::error!(
                        "Failed to release {} units of item {} after order insert failed: {}",
                        quantity,
                        item_id,
                        release
                    );
                }
                Err(e)
            }
        }
    }

    pub fn get_order(&self, id: Uuid) -> Result<Order, DomainError> {
        self.orders.find_by_id(id)?.ok_or(DomainError::OrderNotFound)
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.orders.list()
    }

    pub fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, DomainError> {
        self.orders
            .update_status(id, status)?
            .ok_or(DomainError::OrderNotFound)
    }

    /// Delete the order and restore its quantity to the menu item. A menu
    /// item that no longer exists is skipped without error.
    pub fn delete_order(&self, id: Uuid) -> Result<(), DomainError> {
        let order = self.orders.delete(id)?.ok_or(DomainError::OrderNotFound)?;

        match self.menu.restock(order.item_id, order.quantity)? {
            Some(item) => log::info!(
                "Deleted order {}; item {} restocked to {}",
                order.id,
                item.id,
                item.available_quantity
            ),
            None => log::debug!(
                "Deleted order {}; item {} no longer exists, nothing to restock",
                order.id,
                order.item_id
            ),
        }
        Ok(())
    }
}

//! Sample data for local development, used by the `seed` and `cleanup`
//! binaries.

use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::menu_item::NewMenuItem;
use crate::domain::order::{NewOrder, OrderStatus};
use crate::domain::ports::{MenuItemRepository, OrderRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub menu_items: usize,
    pub orders: usize,
}

fn cents(amount: i64) -> BigDecimal {
    BigDecimal::new(amount.into(), 2)
}

fn item(id: i32, item_name: &str, available_quantity: i32, price_cents: i64) -> NewMenuItem {
    NewMenuItem {
        id,
        item_name: item_name.to_string(),
        available_quantity,
        price: cents(price_cents),
    }
}

fn order(item_id: i32, quantity: i32, customer_name: &str, status: OrderStatus) -> NewOrder {
    NewOrder {
        item_id,
        quantity,
        customer_name: customer_name.to_string(),
        status,
    }
}

pub fn sample_menu_items() -> Vec<NewMenuItem> {
    vec![
        item(1, "Classic Burger", 50, 999),
        item(2, "Chicken Sandwich", 40, 899),
        item(3, "Veggie Burger", 30, 799),
        item(4, "Caesar Salad", 25, 699),
        item(5, "French Fries", 100, 399),
        item(6, "Chocolate Milkshake", 35, 499),
        item(7, "Grilled Cheese Sandwich", 45, 599),
        item(8, "Onion Rings", 60, 449),
    ]
}

pub fn sample_orders() -> Vec<NewOrder> {
    vec![
        order(1, 2, "John Doe", OrderStatus::Completed),
        order(3, 1, "Jane Smith", OrderStatus::Pending),
        order(5, 3, "Mike Johnson", OrderStatus::Pending),
        order(2, 2, "Sarah Williams", OrderStatus::Completed),
        order(6, 4, "David Brown", OrderStatus::Pending),
    ]
}

/// Replace all data with the sample set. Sample orders are stored as
/// history and do not draw down stock.
pub fn seed_database<M, O>(menu: &M, orders: &O) -> Result<SeedReport, DomainError>
where
    M: MenuItemRepository,
    O: OrderRepository,
{
    menu.delete_all()?;
    orders.delete_all()?;
    log::info!("Cleared existing data");

    let mut report = SeedReport {
        menu_items: 0,
        orders: 0,
    };
    for item in sample_menu_items() {
        menu.create(item)?;
        report.menu_items += 1;
    }
    for order in sample_orders() {
        orders.create(order)?;
        report.orders += 1;
    }
    Ok(report)
}

/// Delete every order; menu items and their stock are left as they are.
pub fn clear_orders<O: OrderRepository>(orders: &O) -> Result<usize, DomainError> {
    orders.delete_all()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::infrastructure::memory::{InMemoryMenuItemRepository, InMemoryOrderRepository};

    #[test]
    fn sample_data_is_valid() {
        for item in sample_menu_items() {
            item.validate().unwrap();
        }
        for order in sample_orders() {
            order.validate().unwrap();
        }
    }

    #[test]
    fn prices_are_exact_cents() {
        let burger = &sample_menu_items()[0];
        assert_eq!(burger.price, BigDecimal::from_str("9.99").unwrap());
    }

    #[test]
    fn seeding_replaces_existing_data() {
        let menu = InMemoryMenuItemRepository::new();
        let orders = InMemoryOrderRepository::new();
        menu.create(item(99, "Stale", 1, 100)).unwrap();

        let report = seed_database(&menu, &orders).unwrap();

        assert_eq!(report, SeedReport { menu_items: 8, orders: 5 });
        assert!(menu.find_by_id(99).unwrap().is_none());
        // stock is not drawn down by seeded orders
        assert_eq!(menu.find_by_id(1).unwrap().unwrap().available_quantity, 50);

        // seeding twice does not trip over duplicate ids
        seed_database(&menu, &orders).unwrap();
        assert_eq!(orders.list().unwrap().len(), 5);
    }

    #[test]
    fn cleanup_only_removes_orders() {
        let menu = InMemoryMenuItemRepository::new();
        let orders = InMemoryOrderRepository::new();
        seed_database(&menu, &orders).unwrap();

        assert_eq!(clear_orders(&orders).unwrap(), 5);
        assert!(orders.list().unwrap().is_empty());
        assert_eq!(menu.list().unwrap().len(), 8);
    }
}

use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::schema::orders;

use super::models::{NewOrderRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_order(row: Option<OrderRow>) -> Result<Option<Order>, DomainError> {
    row.map(Order::try_from).transpose()
}

impl OrderRepository for DieselOrderRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        into_order(row)
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .select(OrderRow::as_select())
            .order(orders::created_at.asc())
            .load(&mut conn)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    fn create(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(orders::table)
            .values(&NewOrderRow::from(order))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;

        Order::try_from(row)
    }

    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(orders::table.find(id))
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(Utc::now()),
            ))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        into_order(row)
    }

    fn delete(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::delete(orders::table.find(id))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        into_order(row)
    }

    fn delete_all(&self) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(orders::table).execute(&mut conn)?)
    }
}

/// Postgres-backed tests, ignored unless run with
/// `cargo test -- --include-ignored` and a Docker daemon available.
#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::DieselOrderRepository;
    use crate::domain::order::{NewOrder, OrderStatus};
    use crate::domain::ports::OrderRepository;
    use crate::infrastructure::test_support::setup_db;

    fn make_order(customer_name: &str) -> NewOrder {
        NewOrder {
            item_id: 1,
            quantity: 2,
            customer_name: customer_name.to_string(),
            status: OrderStatus::default(),
        }
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres container"]
    async fn create_and_find_by_id_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        let created = repo.create(make_order("John")).expect("create failed");

        let order = repo
            .find_by_id(created.id)
            .expect("find failed")
            .expect("order should exist");

        assert_eq!(order.id, created.id);
        assert_eq!(order.item_id, 1);
        assert_eq!(order.customer_name, "John");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres container"]
    async fn find_by_id_returns_none_for_unknown_id() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        let result = repo
            .find_by_id(Uuid::new_v4())
            .expect("find should not error");

        assert!(result.is_none());
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres container"]
    async fn list_returns_oldest_first() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        for name in ["first", "second", "third"] {
            repo.create(make_order(name)).expect("create failed");
        }

        let names: Vec<String> = repo
            .list()
            .expect("list failed")
            .into_iter()
            .map(|o| o.customer_name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres container"]
    async fn update_status_and_delete() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);
        let created = repo.create(make_order("Jane")).expect("create failed");

        let updated = repo
            .update_status(created.id, OrderStatus::Completed)
            .expect("update failed")
            .expect("order should exist");
        assert_eq!(updated.status, OrderStatus::Completed);

        let deleted = repo
            .delete(created.id)
            .expect("delete failed")
            .expect("order should exist");
        assert_eq!(deleted.quantity, 2);
        assert!(repo.delete(created.id).expect("delete failed").is_none());
    }
}

use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::menu_item::{MenuItem, MenuItemChanges, NewMenuItem, StockReservation};
use crate::domain::ports::MenuItemRepository;
use crate::schema::menu_items;

use super::models::{MenuItemChangeset, MenuItemRow, NewMenuItemRow};

pub struct DieselMenuItemRepository {
    pool: DbPool,
}

impl DieselMenuItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MenuItemRepository for DieselMenuItemRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = menu_items::table
            .find(id)
            .select(MenuItemRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(MenuItem::from))
    }

    fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = menu_items::table
            .select(MenuItemRow::as_select())
            .order(menu_items::id.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    fn create(&self, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        let mut conn = self.pool.get()?;
        let id = item.id;

        diesel::insert_into(menu_items::table)
            .values(&NewMenuItemRow::from(item))
            .returning(MenuItemRow::as_returning())
            .get_result(&mut conn)
            .map(MenuItem::from)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DomainError::DuplicateMenuItem(id)
                }
                other => other.into(),
            })
    }

    fn update(&self, id: i32, changes: MenuItemChanges) -> Result<Option<MenuItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(menu_items::table.find(id))
            .set(&MenuItemChangeset::from(changes))
            .returning(MenuItemRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(MenuItem::from))
    }

    fn delete(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::delete(menu_items::table.find(id))
            .returning(MenuItemRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(MenuItem::from))
    }

    fn reserve_stock(&self, id: i32, quantity: i32) -> Result<StockReservation, DomainError> {
        let mut conn = self.pool.get()?;

        // Check and decrement in one statement; the row lock taken by UPDATE
        // serialises concurrent reservations on the same item.
        let reserved = diesel::update(
            menu_items::table
                .filter(menu_items::id.eq(id))
                .filter(menu_items::available_quantity.ge(quantity)),
        )
        .set((
            menu_items::available_quantity.eq(menu_items::available_quantity - quantity),
            menu_items::updated_at.eq(Utc::now()),
        ))
        .returning(MenuItemRow::as_returning())
        .get_result(&mut conn)
        .optional()?;

        if let Some(row) = reserved {
            return Ok(StockReservation::Reserved(row.into()));
        }

        // Nothing matched: find out whether the item is missing or short.
        let available = menu_items::table
            .find(id)
            .select(menu_items::available_quantity)
            .first::<i32>(&mut conn)
            .optional()?;

        Ok(match available {
            Some(available) => StockReservation::Insufficient { available },
            None => StockReservation::Missing,
        })
    }

    fn restock(&self, id: i32, quantity: i32) -> Result<Option<MenuItem>, DomainError> {
        let mut conn = self.pool.get()?;
        let headroom = i32::MAX - quantity;

        let restocked = diesel::update(
            menu_items::table
                .filter(menu_items::id.eq(id))
                .filter(menu_items::available_quantity.le(headroom)),
        )
        .set((
            menu_items::available_quantity.eq(menu_items::available_quantity + quantity),
            menu_items::updated_at.eq(Utc::now()),
        ))
        .returning(MenuItemRow::as_returning())
        .get_result(&mut conn)
        .optional()?;

        if let Some(row) = restocked {
            return Ok(Some(row.into()));
        }

        // Either the item is gone or the sum would overflow INTEGER: cap it.
        let capped = diesel::update(
            menu_items::table
                .filter(menu_items::id.eq(id))
                .filter(menu_items::available_quantity.gt(headroom)),
        )
        .set((
            menu_items::available_quantity.eq(i32::MAX),
            menu_items::updated_at.eq(Utc::now()),
        ))
        .returning(MenuItemRow::as_returning())
        .get_result(&mut conn)
        .optional()?;

        if capped.is_some() {
            log::warn!("Stock of item {} capped at {}", id, i32::MAX);
        }
        Ok(capped.map(MenuItem::from))
    }

    fn delete_all(&self) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(menu_items::table).execute(&mut conn)?)
    }
}

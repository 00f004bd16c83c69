use std::sync::Arc;

use crate::application::{MenuService, OrderService};
use crate::db::DbPool;
use crate::domain::ports::{MenuItemRepository, OrderRepository};
use crate::infrastructure::{
    DieselMenuItemRepository, DieselOrderRepository, InMemoryMenuItemRepository,
    InMemoryOrderRepository,
};

pub type SharedMenuItemRepository = Arc<dyn MenuItemRepository>;
pub type SharedOrderRepository = Arc<dyn OrderRepository>;

/// Services shared by every actix worker.
pub struct AppState {
    pub menu: MenuService<SharedMenuItemRepository>,
    pub orders: OrderService<SharedMenuItemRepository, SharedOrderRepository>,
}

impl AppState {
    pub fn new(menu_repo: SharedMenuItemRepository, order_repo: SharedOrderRepository) -> Self {
        Self {
            menu: MenuService::new(Arc::clone(&menu_repo)),
            orders: OrderService::new(menu_repo, order_repo),
        }
    }

    pub fn postgres(pool: DbPool) -> Self {
        Self::new(
            Arc::new(DieselMenuItemRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool)),
        )
    }

    /// Non-persistent state, for tests and local demos.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryMenuItemRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
        )
    }
}

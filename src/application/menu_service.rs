use crate::domain::errors::DomainError;
use crate::domain::menu_item::{MenuItem, MenuItemChanges, NewMenuItem};
use crate::domain::ports::MenuItemRepository;

pub struct MenuService<R> {
    repo: R,
}

impl<R: MenuItemRepository> MenuService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_items(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.repo.list()
    }

    pub fn get_item(&self, id: i32) -> Result<MenuItem, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::MenuItemNotFound)
    }

    pub fn create_item(&self, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        item.validate()?;
        self.repo.create(item)
    }

    /// An empty change set returns the stored item unchanged.
    pub fn update_item(&self, id: i32, changes: MenuItemChanges) -> Result<MenuItem, DomainError> {
        changes.validate()?;
        if changes.is_empty() {
            return self.get_item(id);
        }
        self.repo
            .update(id, changes)?
            .ok_or(DomainError::MenuItemNotFound)
    }

    /// Orders that reference the item are left in place.
    pub fn delete_item(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete(id)?.ok_or(DomainError::MenuItemNotFound)?;
        log::info!("Deleted menu item {}", id);
        Ok(())
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Menu item not found")]
    MenuItemNotFound,
    #[error("Order not found")]
    OrderNotFound,
    #[error("Not enough items available")]
    InsufficientStock { available: i32 },
    #[error("Menu item with id {0} already exists")]
    DuplicateMenuItem(i32),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }
}

pub mod errors;
pub mod menu_item;
pub mod order;
pub mod ports;

/// Longest `itemName` / `customerName` the store accepts, in characters.
pub const MAX_NAME_LEN: usize = 255;

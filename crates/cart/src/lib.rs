pub mod entities;
pub mod store;

pub use crate::entities::{CartLine, LineKey, NewCartItem, StockWarning};
pub use crate::store::{CartStore, CART_STORAGE_KEY};

use anyhow::Result;

pub mod file;
pub mod in_memory;

pub use file::FileLocalStorage;
pub use in_memory::InMemoryLocalStorage;

/// Key/value storage that outlives a single session, modelled on the browser's
/// `localStorage`. Access is shared, so implementations take `&self`.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

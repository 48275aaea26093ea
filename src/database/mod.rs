pub mod memory;
pub mod repository;
pub mod rest;
pub mod store;

pub use memory::MemoryStore;
pub use repository::{Repository, RepositoryError};
pub use rest::RestStore;
pub use store::{RowStore, StoreError};

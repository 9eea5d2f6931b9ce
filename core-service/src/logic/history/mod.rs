//! History Module - locally persisted record of completed checks

pub mod storage;
pub mod store;
pub mod types;


pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::HistoryStore;
pub use types::CheckRecord;

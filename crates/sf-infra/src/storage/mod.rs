//! Key/value storage adapters.

mod file_kv_store;
mod memory_kv_store;

pub use file_kv_store::FileKeyValueStorage;
pub use memory_kv_store::InMemoryKeyValueStorage;

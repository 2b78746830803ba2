//! Store adapter for the distributed lock, with Redis and in-memory backends

pub mod client;
pub mod error;
pub mod memory;
pub mod operations;
pub mod scripts;
pub mod traits;

pub use client::RedisStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::LockStore;

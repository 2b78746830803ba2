//! Distributed lock module, providing a distributed lock implementation based on a shared key-value store

pub mod client;
pub mod error;
pub mod lock;

mod renewal;

pub use client::LockClient;
pub use error::{LockError, Result};
pub use lock::Lock;

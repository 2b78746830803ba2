/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use store::{LockStore, RedisStore};
use uuid::Uuid;

use crate::error::{LockError, Result};
use crate::lock::Lock;

/// Entry point for acquiring distributed locks backed by a shared store.
#[derive(Clone)]
pub struct LockClient {
    store: Arc<dyn LockStore>,
}

impl LockClient {
    /// Create a client over an already constructed store.
    pub fn new(store: Arc<dyn LockStore>) -> Self {
        Self { store }
    }

    /// Create a client connected to the Redis instance at `url`.
    ///
    /// # Arguments
    ///
    /// * `url` - Connection URL, e.g. `redis://127.0.0.1:6379/`
    pub async fn connect(url: &str) -> Result<Self> {
        let store = RedisStore::connect(url).await?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Create a client from the REDIS_URL environment variable.
    pub async fn from_env() -> Result<Self> {
        let store = RedisStore::from_env().await?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Attempt to acquire the lock named `key` for `ttl`.
    ///
    /// A fresh holder token is generated for every attempt, so two
    /// acquisitions by the same process are distinct holders. This is a
    /// single non-blocking attempt: no retry, backoff, or queueing happens
    /// inside; callers that want to wait retry with their own policy.
    ///
    /// # Arguments
    ///
    /// * `key` - Name of the contended resource.
    /// * `ttl` - Expiration after which the store drops the lock if it is
    ///   neither renewed nor released.
    ///
    /// # Errors
    ///
    /// * `LockError::AlreadyHeld` - Another holder currently owns the key.
    /// * `LockError::Store` - The store call itself failed.
    pub async fn try_acquire(&self, key: impl Into<String>, ttl: Duration) -> Result<Lock> {
        let key = key.into();
        let token = Uuid::new_v4().to_string();
        let created = self.store.set_if_absent(&key, &token, ttl).await?;
        if !created {
            debug!("Lock '{}' is already held, acquisition failed", key);
            return Err(LockError::AlreadyHeld);
        }
        debug!("Acquired lock '{}' with ttl {:?}", key, ttl);
        Ok(Lock::new(key, token, ttl, Arc::clone(&self.store)))
    }
}

impl fmt::Debug for LockClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockClient").finish_non_exhaustive()
    }
}

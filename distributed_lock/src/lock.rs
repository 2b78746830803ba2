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
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use store::LockStore;
use tokio::sync::watch;

use crate::error::{LockError, Result};

/// A successfully acquired distributed lock.
///
/// Holds the key, the unique holder token generated at acquisition, and the
/// configured expiration. Key, token, and ttl never change after
/// construction; renewing re-issues the ttl at the store rather than
/// mutating the handle. Share the handle across tasks with `Arc` when the
/// auto-renewal loop runs in the background.
pub struct Lock {
    /// Lock key name
    key: String,
    /// Holder token identifying this acquisition
    token: String,
    /// Expiration re-issued by every renewal
    ttl: Duration,
    /// Shared store the lock lives in
    store: Arc<dyn LockStore>,
    /// Stop signal for the auto-renewal loop
    pub(crate) stop: watch::Sender<bool>,
    /// Whether an auto-renewal loop currently runs for this handle
    pub(crate) renewing: AtomicBool,
}

impl Lock {
    pub(crate) fn new(key: String, token: String, ttl: Duration, store: Arc<dyn LockStore>) -> Self {
        let (stop, _) = watch::channel(false);
        Self { key, token, ttl, store, stop, renewing: AtomicBool::new(false) }
    }

    /// Renew the lock: reset its expiration at the store to the configured
    /// ttl, provided this handle is still the holder.
    ///
    /// Wrap the returned future in `tokio::time::timeout` to bound a manual
    /// call; the auto-renewal loop bounds its own calls.
    ///
    /// # Errors
    ///
    /// * `LockError::NotHeld` - The lock expired, was deleted, or now
    ///   belongs to another holder.
    /// * `LockError::Store` - The store call failed (including timeouts).
    pub async fn renew(&self) -> Result<()> {
        let renewed = self.store.expire_if_equals(&self.key, &self.token, self.ttl).await?;
        if renewed {
            debug!("Renewed lock '{}' for {:?}", self.key, self.ttl);
            Ok(())
        } else {
            Err(LockError::NotHeld)
        }
    }

    /// Release the lock if this handle still holds it.
    ///
    /// The auto-renewal loop, if one runs, is signalled to stop on every
    /// path, even when the release itself fails. A `NotHeld` result means
    /// there was nothing left to release (the lock already expired or moved
    /// to another holder) and is benign for cleanup purposes.
    ///
    /// # Errors
    ///
    /// * `LockError::NotHeld` - This handle no longer owns the key.
    /// * `LockError::Store` - The store call itself failed.
    pub async fn release(&self) -> Result<()> {
        let deleted = self.store.delete_if_equals(&self.key, &self.token).await;
        self.stop_auto_renew();
        match deleted {
            Ok(true) => {
                debug!("Released lock '{}'", self.key);
                Ok(())
            }
            Ok(false) => Err(LockError::NotHeld),
            Err(e) => Err(e.into()),
        }
    }

    /// Remaining time to live at the store, `None` when the key is gone.
    pub async fn remaining_ttl(&self) -> Result<Option<Duration>> {
        Ok(self.store.remaining_ttl(&self.key).await?)
    }

    /// Lock key name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Holder token generated for this acquisition
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Expiration used at acquisition and by every renewal
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl fmt::Debug for Lock {
    // The holder token stays out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lock")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

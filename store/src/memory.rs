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

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::StoreError;
use crate::traits::LockStore;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process store with the same atomicity contract as the Redis backend.
///
/// Every operation holds the map mutex for its whole compare-and-mutate, so
/// the `LockStore` guarantees hold within the process. Expired entries are
/// dropped lazily on the next access to their key. Intended for tests and
/// single-process embedding, not for cross-process coordination.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value currently stored at `key`, if it exists and has not expired.
    pub fn value_of(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.lock_entries()?;
        Self::drop_if_expired(&mut entries, key, Instant::now());
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Operation("Store mutex poisoned".to_string()))
    }

    fn drop_if_expired(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) {
        let expired = entries.get(key).is_some_and(|entry| entry.expires_at <= now);
        if expired {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl LockStore for MemoryStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut entries = self.lock_entries()?;
        let now = Instant::now();
        Self::drop_if_expired(&mut entries, key, now);
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), Entry { value: value.to_string(), expires_at: now + ttl });
        Ok(true)
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let mut entries = self.lock_entries()?;
        let now = Instant::now();
        Self::drop_if_expired(&mut entries, key, now);
        let owned = entries.get(key).is_some_and(|entry| entry.value == expected);
        if owned {
            entries.remove(key);
        }
        Ok(owned)
    }

    async fn expire_if_equals(
        &self,
        key: &str,
        expected: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut entries = self.lock_entries()?;
        let now = Instant::now();
        Self::drop_if_expired(&mut entries, key, now);
        match entries.get_mut(key) {
            Some(entry) if entry.value == expected => {
                entry.expires_at = now + ttl;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        let mut entries = self.lock_entries()?;
        let now = Instant::now();
        Self::drop_if_expired(&mut entries, key, now);
        Ok(entries.get(key).map(|entry| entry.expires_at - now))
    }
}

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

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// Atomic operations the lock protocol needs from a key-value store.
///
/// Every method is a single atomic step at the store: no other client can
/// interleave between the compare and the mutation. Implementations are
/// shared across lock handles behind `Arc<dyn LockStore>`.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Create `key = value` with expiration `ttl`, only if the key does not
    /// already exist.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the key was created, `Ok(false)` if it already existed.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, StoreError>;

    /// Delete `key`, only if its current value equals `expected`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the key was deleted, `Ok(false)` if it was absent or
    /// held a different value.
    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, StoreError>;

    /// Reset the expiration of `key` to `ttl`, only if its current value
    /// equals `expected`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the expiration was reset, `Ok(false)` if the key was
    /// absent or held a different value.
    async fn expire_if_equals(&self, key: &str, expected: &str, ttl: Duration)
        -> Result<bool, StoreError>;

    /// Remaining time to live of `key`.
    ///
    /// # Returns
    ///
    /// `Ok(Some(..))` while the key exists with an expiration, `Ok(None)`
    /// if it is absent or has no expiration.
    async fn remaining_ttl(&self, key: &str) -> Result<Option<Duration>, StoreError>;
}

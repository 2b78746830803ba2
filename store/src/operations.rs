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
use redis::{Script, Value};

use crate::client::RedisStore;
use crate::error::StoreError;
use crate::scripts::{RELEASE_LOCK, RENEW_LOCK};
use crate::traits::LockStore;

#[async_trait]
impl LockStore for RedisStore {
    /// Issued as a single `SET key value PX ttl NX` round trip, so creation
    /// and expiration are one atomic step.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut conn = self.connection();
        let reply: Value = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl.as_millis() as u64)
            .arg("NX")
            .query_async(&mut conn)
            .await?;
        Ok(matches!(reply, Value::Okay))
    }

    /// A nil script reply means the key vanished; it reads as `None` and is
    /// reported as not deleted, the same as an ownership mismatch.
    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection();
        let result: Option<i64> = Script::new(RELEASE_LOCK)
            .key(key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await?;
        Ok(result == Some(1))
    }

    async fn expire_if_equals(
        &self,
        key: &str,
        expected: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut conn = self.connection();
        let result: Option<i64> = Script::new(RENEW_LOCK)
            .key(key)
            .arg(expected)
            .arg(ttl.as_millis() as u64)
            .invoke_async(&mut conn)
            .await?;
        Ok(result == Some(1))
    }

    /// PTTL reports -1 for keys without expiration and -2 for missing keys;
    /// both read as `None`.
    async fn remaining_ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        let mut conn = self.connection();
        let ttl_ms: i64 = redis::cmd("PTTL").arg(key).query_async(&mut conn).await?;
        if ttl_ms >= 0 {
            Ok(Some(Duration::from_millis(ttl_ms as u64)))
        } else {
            Ok(None)
        }
    }
}

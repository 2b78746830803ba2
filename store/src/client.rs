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

use redis::aio::ConnectionManager;
use redis::Client;

use crate::error::StoreError;

const REDIS_URL_ENV: &str = "REDIS_URL";

/// Redis-backed store client.
///
/// Wraps a connection manager that reconnects on failure; cloning is cheap
/// and every clone shares the same underlying connection.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis instance at `url`.
    ///
    /// # Arguments
    ///
    /// * `url` - Connection URL, e.g. `redis://127.0.0.1:6379/`
    ///
    /// # Errors
    ///
    /// * `StoreError::Connection` - If the URL is malformed or the initial
    ///   connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self { manager })
    }

    /// Connect using the address in the REDIS_URL environment variable.
    ///
    /// # Errors
    ///
    /// * `StoreError::Operation` - If REDIS_URL is not set.
    /// * `StoreError::Connection` - If the connection cannot be established.
    pub async fn from_env() -> Result<Self, StoreError> {
        let url = std::env::var(REDIS_URL_ENV)
            .map_err(|_| StoreError::Operation("REDIS_URL environment variable not set".to_string()))?;
        Self::connect(&url).await
    }

    pub(crate) fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

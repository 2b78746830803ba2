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

use store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Lock is already held by another client")]
    AlreadyHeld,

    #[error("Lock is not held: it expired, was deleted, or belongs to another client")]
    NotHeld,

    #[error("Auto renewal is already running for this lock")]
    RenewalAlreadyStarted,
}

impl LockError {
    /// Whether this error is a renewal-deadline or timeout kind rather than
    /// a hard failure. The auto-renewal loop retries these immediately
    /// instead of terminating.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LockError::Store(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, LockError>;

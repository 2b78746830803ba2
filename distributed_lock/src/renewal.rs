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

use std::sync::atomic::Ordering;
use std::time::Duration;

use log::{error, info, warn};
use scopeguard::defer;
use store::StoreError;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::{LockError, Result};
use crate::lock::Lock;

impl Lock {
    /// Keep the lock alive by renewing it every `interval`, each attempt
    /// bounded by `per_call_timeout`.
    ///
    /// Runs until stopped or failed, blocking the calling task; spawn it on
    /// its own task (with the handle in an `Arc`) alongside the critical
    /// section it protects. A timed-out renewal is not fatal: the loop
    /// schedules one follow-up attempt right away instead of waiting for
    /// the next tick, and drops further triggers while one is pending. Any
    /// other renewal error stops the loop and is returned; the lock is
    /// presumed lost at that point.
    ///
    /// Returns `Ok(())` once [`Lock::stop_auto_renew`] or [`Lock::release`]
    /// is called; immediately, if one of them already ran.
    ///
    /// # Arguments
    ///
    /// * `interval` - Period between renewal attempts; choose it well below
    ///   the lock ttl so a missed attempt still leaves headroom.
    /// * `per_call_timeout` - Deadline for each store call.
    ///
    /// # Errors
    ///
    /// * `LockError::RenewalAlreadyStarted` - An auto-renewal loop is
    ///   already active for this handle.
    /// * `LockError::NotHeld` / `LockError::Store` - A renewal failed and
    ///   the loop stopped.
    pub async fn auto_renew(&self, interval: Duration, per_call_timeout: Duration) -> Result<()> {
        if self.renewing.swap(true, Ordering::AcqRel) {
            return Err(LockError::RenewalAlreadyStarted);
        }
        defer! {
            self.renewing.store(false, Ordering::Release);
        }

        let mut stop_rx = self.stop.subscribe();
        if *stop_rx.borrow_and_update() {
            info!("Auto renewal for lock '{}' not started: already stopped", self.key());
            return Ok(());
        }

        // Capacity 1: at most one pending retry, later triggers are dropped.
        let (retry_tx, mut retry_rx) = mpsc::channel::<()>(1);
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Auto renewal started for lock '{}' (interval {:?}, per call timeout {:?})",
            self.key(),
            interval,
            per_call_timeout
        );

        loop {
            select! {
                _ = stop_rx.changed() => {
                    info!("Auto renewal stopped for lock '{}'", self.key());
                    return Ok(());
                }
                _ = ticker.tick() => {}
                _ = retry_rx.recv() => {}
            }

            // The attempt is awaited outside the select, so a stop signal
            // never preempts an in-flight renewal.
            match self.renew_within(per_call_timeout).await {
                Ok(()) => {}
                Err(e) if e.is_timeout() => {
                    warn!("Renewal of lock '{}' timed out, retrying immediately", self.key());
                    let _ = retry_tx.try_send(());
                }
                Err(e) => {
                    error!("Auto renewal for lock '{}' failed: {}", self.key(), e);
                    return Err(e);
                }
            }
        }
    }

    /// Signal the auto-renewal loop to stop.
    ///
    /// Idempotent and safe to call from any task, any number of times,
    /// concurrently with the loop's own termination; at most one stop is
    /// ever observed. Called implicitly by [`Lock::release`].
    pub fn stop_auto_renew(&self) {
        self.stop.send_replace(true);
    }

    /// Whether an auto-renewal loop currently runs for this handle.
    pub fn is_auto_renewing(&self) -> bool {
        self.renewing.load(Ordering::Acquire)
    }

    async fn renew_within(&self, limit: Duration) -> Result<()> {
        match time::timeout(limit, self.renew()).await {
            Ok(result) => result,
            Err(_) => Err(LockError::Store(StoreError::Timeout)),
        }
    }
}

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

use std::sync::Arc;
use std::time::Duration;

use distributed_lock::{LockClient, LockError};
use store::{LockStore, MemoryStore};

const TTL: Duration = Duration::from_secs(30);

fn memory_client() -> (Arc<MemoryStore>, LockClient) {
    let store = Arc::new(MemoryStore::new());
    (Arc::clone(&store), LockClient::new(store))
}

#[tokio::test]
async fn test_concurrent_acquires_have_one_winner() {
    let (store, client) = memory_client();
    let (a, b, c, d) = tokio::join!(
        client.try_acquire("res", TTL),
        client.try_acquire("res", TTL),
        client.try_acquire("res", TTL),
        client.try_acquire("res", TTL),
    );

    let outcomes = [a, b, c, d];
    let winners = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(winners, 1, "exactly one acquire must win");
    let losers =
        outcomes.iter().filter(|outcome| matches!(outcome, Err(LockError::AlreadyHeld))).count();
    assert_eq!(losers, 3);

    let winner = outcomes.into_iter().find_map(|outcome| outcome.ok()).unwrap();
    assert_eq!(store.value_of("res").unwrap(), Some(winner.token().to_string()));
}

#[tokio::test]
async fn test_forged_token_cannot_release() {
    let (store, client) = memory_client();
    let lock = client.try_acquire("res", TTL).await.unwrap();

    assert!(!store.delete_if_equals("res", "forged-token").await.unwrap());
    assert_eq!(store.value_of("res").unwrap(), Some(lock.token().to_string()));

    lock.release().await.unwrap();
    assert_eq!(store.value_of("res").unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_renew_resets_ttl_and_keeps_holder() {
    let (store, client) = memory_client();
    let ttl = Duration::from_secs(4);
    let lock = client.try_acquire("res", ttl).await.unwrap();

    // Renewed past the original deadline twice over, the key stays owned.
    for _ in 0..3 {
        tokio::time::advance(Duration::from_secs(2)).await;
        lock.renew().await.unwrap();
        assert_eq!(lock.remaining_ttl().await.unwrap(), Some(ttl));
        assert_eq!(store.value_of("res").unwrap(), Some(lock.token().to_string()));
    }
}

#[tokio::test]
async fn test_release_then_stale_release_reports_not_held() {
    let (store, client) = memory_client();
    let lock = client.try_acquire("res", TTL).await.unwrap();
    lock.release().await.unwrap();
    assert_eq!(store.value_of("res").unwrap(), None);

    assert!(matches!(lock.release().await, Err(LockError::NotHeld)));
    assert!(matches!(lock.renew().await, Err(LockError::NotHeld)));
}

#[tokio::test(start_paused = true)]
async fn test_expired_lock_can_be_reacquired() {
    let (store, client) = memory_client();
    let first = client.try_acquire("res", TTL).await.unwrap();
    assert!(matches!(client.try_acquire("res", TTL).await, Err(LockError::AlreadyHeld)));

    tokio::time::advance(TTL + Duration::from_millis(1)).await;

    let second = client.try_acquire("res", TTL).await.unwrap();
    assert_ne!(first.token(), second.token());
    assert_eq!(store.value_of("res").unwrap(), Some(second.token().to_string()));

    // The first handle went stale with the expiry; its token no longer matches.
    assert!(matches!(first.release().await, Err(LockError::NotHeld)));
    second.release().await.unwrap();
    assert_eq!(store.value_of("res").unwrap(), None);
}

//! Define Lua scripts for the ownership-checked lock operations

/// Lua script for releasing a lock.
/// Can only delete the key when it exists and the value matches the holder token.
pub const RELEASE_LOCK: &str = r#"
    if redis.call('get', KEYS[1]) == ARGV[1] then
        return redis.call('del', KEYS[1])
    end
    return 0
"#;

/// Lua script for renewing a lock.
/// Can only reset the expiration (milliseconds) when the key exists and the
/// value matches the holder token.
pub const RENEW_LOCK: &str = r#"
    if redis.call('get', KEYS[1]) == ARGV[1] then
        return redis.call('pexpire', KEYS[1], ARGV[2])
    end
    return 0
"#;

//! Redis-backed session store.
//!
//! Sessions are stored as JSON strings under `session:<id>` and refreshed
//! with the configured time-to-live on every save.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis;
use tracing::debug;

use super::{encode_session, resume_document};
use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionId, SessionState};

const KEY_PREFIX: &str = "session:";

/// Tuning for [`RedisSessionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedisSessionStoreOptions {
    /// Expiry applied on save. Zero disables expiry.
    pub ttl: Duration,
    /// Resume unknown identifiers as empty sessions instead of failing.
    pub create_missing: bool,
    /// How long to wait for a pooled connection.
    pub connection_timeout: Duration,
}

impl Default for RedisSessionStoreOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(1440),
            create_missing: true,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// Session store backed by a pooled Redis connection.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: Pool<RedisConnectionManager>,
    options: RedisSessionStoreOptions,
}

impl RedisSessionStore {
    /// Build a pool for `url` and check out one connection so an
    /// unreachable server fails start-up instead of every callback.
    pub async fn connect(
        url: &str,
        options: RedisSessionStoreOptions,
    ) -> Result<Self, SessionStoreError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|error| SessionStoreError::unavailable(error.to_string()))?;
        let pool = Pool::builder()
            .connection_timeout(options.connection_timeout)
            .build(manager)
            .await
            .map_err(|error| SessionStoreError::unavailable(error.to_string()))?;
        let store = Self { pool, options };
        drop(store.connection().await?);
        Ok(store)
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, SessionStoreError> {
        self.pool
            .get()
            .await
            .map_err(|error| SessionStoreError::unavailable(error.to_string()))
    }
}

fn session_key(id: &SessionId) -> String {
    format!("{KEY_PREFIX}{}", id.as_str())
}

fn set_command(key: &str, value: &str, ttl: Duration) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value);
    if !ttl.is_zero() {
        cmd.arg("EX").arg(ttl.as_secs().max(1));
    }
    cmd
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn resume(&self, id: &SessionId) -> Result<SessionState, SessionStoreError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(id))
            .query_async(&mut *conn)
            .await
            .map_err(|error| SessionStoreError::unavailable(error.to_string()))?;
        if raw.is_none() {
            debug!(
                create_missing = self.options.create_missing,
                "no stored session for identifier"
            );
        }
        resume_document(id, raw.as_deref(), self.options.create_missing)
    }

    async fn save(&self, session: &SessionState) -> Result<(), SessionStoreError> {
        let encoded = encode_session(session)?;
        let mut conn = self.connection().await?;
        set_command(&session_key(session.id()), &encoded, self.options.ttl)
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|error| SessionStoreError::unavailable(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn args(cmd: &redis::Cmd) -> Vec<String> {
        cmd.args_iter()
            .filter_map(|arg| match arg {
                redis::Arg::Simple(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[rstest]
    fn keys_are_namespaced() {
        let id = SessionId::new("abc").expect("valid id");
        assert_eq!(session_key(&id), "session:abc");
    }

    #[rstest]
    #[case(Duration::from_secs(1440), vec!["SET", "k", "v", "EX", "1440"])]
    #[case(Duration::ZERO, vec!["SET", "k", "v"])]
    #[case(Duration::from_millis(200), vec!["SET", "k", "v", "EX", "1"])]
    fn set_applies_expiry(#[case] ttl: Duration, #[case] expected: Vec<&str>) {
        assert_eq!(args(&set_command("k", "v", ttl)), expected);
    }

    #[rstest]
    fn default_options_match_session_lifetime() {
        let options = RedisSessionStoreOptions::default();
        assert_eq!(options.ttl, Duration::from_secs(1440));
        assert!(options.create_missing);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_servers_fail_to_connect() {
        let options = RedisSessionStoreOptions {
            connection_timeout: Duration::from_millis(200),
            ..RedisSessionStoreOptions::default()
        };
        let result = RedisSessionStore::connect("redis://127.0.0.1:1/", options).await;
        assert!(matches!(result, Err(SessionStoreError::Unavailable { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_urls_are_unavailable() {
        let result = RedisSessionStore::connect("not a url", RedisSessionStoreOptions::default()).await;
        assert!(matches!(result, Err(SessionStoreError::Unavailable { .. })));
    }
}

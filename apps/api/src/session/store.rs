use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::EditingSession;

/// Working-copy storage for editing sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<EditingSession>, AppError>;

    /// Writes the whole session and restarts its idle TTL.
    async fn save(&self, session: &EditingSession) -> Result<(), AppError>;

    /// Returns false when the session had already expired or never existed.
    async fn discard(&self, id: Uuid) -> Result<bool, AppError>;
}

pub struct RedisSessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

pub fn session_key(id: Uuid) -> String {
    format!("resume-session:{id}")
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<EditingSession>, AppError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(session_key(id)).await?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &EditingSession) -> Result<(), AppError> {
        let payload = serde_json::to_string(session)?;
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(session_key(session.id), payload, self.ttl_secs)
            .await?;
        debug!("Stored session {} (ttl {}s)", session.id, self.ttl_secs);
        Ok(())
    }

    async fn discard(&self, id: Uuid) -> Result<bool, AppError> {
        let mut conn = self.connection().await?;
        let removed: u64 = conn.del(session_key(id)).await?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_is_namespaced() {
        assert_eq!(
            session_key(Uuid::nil()),
            "resume-session:00000000-0000-0000-0000-000000000000"
        );
    }
}

use redis::{Client, Commands, Connection};
use shared::{KeyValueStore, StoreError};

/// Keeps the snapshot as a plain string value in Redis.
pub struct RedisStore {
    conn: Connection,
}

impl RedisStore {
    pub fn connect(url: &str) -> redis::RedisResult<Self> {
        let client = Client::open(url)?;
        let conn = client.get_connection()?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for RedisStore {
    fn get(&mut self, key: &str) -> shared::Result<Option<String>> {
        self.conn
            .get::<_, Option<String>>(key)
            .map_err(|e| StoreError::backend(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> shared::Result<()> {
        self.conn
            .set::<_, _, ()>(key, value)
            .map_err(|e| StoreError::backend(e.to_string()))
    }
}

use async_trait::async_trait;
use clickhouse::Client;
use log::debug;

use crate::errors::LoaderError;
use crate::loader::Warehouse;
use crate::models::TripSample;

/// HTTP client for the ClickHouse server.
///
/// No default database is set: the target database may not exist yet when
/// the client is built, so every statement uses qualified table names.
#[derive(Clone)]
pub struct ClickHouseClient {
    client: Client,
}

impl ClickHouseClient {
    pub fn new(url: &str, user: &str, password: &str) -> Self {
        let client = Client::default()
            .with_url(url)
            .with_user(user)
            .with_password(password);
        Self { client }
    }
}

#[async_trait]
impl Warehouse for ClickHouseClient {
    async fn ping(&self) -> Result<(), LoaderError> {
        self.client.query("SELECT 1").execute().await?;
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<(), LoaderError> {
        debug!("executing: {}", sql.trim());
        // hold the response until the statement has finished server side
        self.client
            .query(sql)
            .with_option("wait_end_of_query", "1")
            .execute()
            .await?;
        Ok(())
    }

    async fn count(&self, sql: &str) -> Result<u64, LoaderError> {
        debug!("counting: {}", sql.trim());
        let count = self.client.query(sql).fetch_one::<u64>().await?;
        Ok(count)
    }

    async fn sample(&self, sql: &str) -> Result<Vec<TripSample>, LoaderError> {
        debug!("sampling: {}", sql.trim());
        let rows = self.client.query(sql).fetch_all::<TripSample>().await?;
        Ok(rows)
    }
}

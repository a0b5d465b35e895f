use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::info;

use crate::config::LoaderConfig;
use crate::errors::LoaderError;
use crate::models::TripSample;
use crate::sql;

/// The statements the loader needs from a database.
#[async_trait]
pub trait Warehouse: Send + Sync {
    async fn ping(&self) -> Result<(), LoaderError>;
    async fn execute(&self, sql: &str) -> Result<(), LoaderError>;
    async fn count(&self, sql: &str) -> Result<u64, LoaderError>;
    async fn sample(&self, sql: &str) -> Result<Vec<TripSample>, LoaderError>;
}

#[derive(Debug)]
pub struct Verification {
    pub row_count: u64,
    pub sample: Vec<TripSample>,
}

#[derive(Debug)]
pub struct LoadReport {
    pub row_count: u64,
    pub sample: Vec<TripSample>,
    pub elapsed: Duration,
}

pub struct Loader<W> {
    warehouse: W,
    cfg: LoaderConfig,
}

impl<W: Warehouse> Loader<W> {
    pub fn new(warehouse: W, cfg: LoaderConfig) -> Self {
        Self { warehouse, cfg }
    }

    pub async fn connect(&self) -> Result<(), LoaderError> {
        info!("Connecting to ClickHouse at {}:{}...", self.cfg.host, self.cfg.port);
        self.warehouse.ping().await?;
        info!("Connected successfully!");
        Ok(())
    }

    pub async fn create_database(&self) -> Result<(), LoaderError> {
        info!("Creating database '{}' if not exists...", self.cfg.database);
        self.warehouse
            .execute(&sql::create_database(&self.cfg.database))
            .await?;
        info!("Database '{}' is ready.", self.cfg.database);
        Ok(())
    }

    pub async fn create_table(&self) -> Result<(), LoaderError> {
        info!("Creating table '{}'...", self.cfg.table);
        self.warehouse
            .execute(&sql::create_table(&self.cfg.qualified_table()))
            .await?;
        info!("Table '{}' created successfully!", self.cfg.table);
        Ok(())
    }

    pub async fn load(&self, limit: Option<u64>) -> Result<(), LoaderError> {
        info!("Loading {} into '{}'...", sql::SOURCE_URL, self.cfg.qualified_table());
        self.warehouse
            .execute(&sql::insert_from_s3(&self.cfg.qualified_table(), limit))
            .await?;
        info!("Server-side import finished.");
        Ok(())
    }

    pub async fn verify(&self) -> Result<Verification, LoaderError> {
        info!("Verifying data load...");
        let table = self.cfg.qualified_table();
        let row_count = self.warehouse.count(&sql::count_rows(&table)).await?;
        let sample = self.warehouse.sample(&sql::sample_rows(&table)).await?;
        Ok(Verification { row_count, sample })
    }

    /// Runs every step in order, stopping at the first failure.
    pub async fn run(&self, limit: Option<u64>) -> Result<LoadReport, LoaderError> {
        let start = Instant::now();

        self.connect().await?;
        self.create_database().await?;
        self.create_table().await?;
        self.load(limit).await?;
        let Verification { row_count, sample } = self.verify().await?;

        Ok(LoadReport {
            row_count,
            sample,
            elapsed: start.elapsed(),
        })
    }
}

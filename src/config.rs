use std::sync::LazyLock;

use config::{Config, Environment, Map};
use regex::Regex;
use serde::Deserialize;

use crate::errors::LoaderError;

static IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub table: String,
}

impl LoaderConfig {
    /// Reads `CLICKHOUSE_*` and `NYC_TAXI_TABLE` from the environment.
    pub fn new() -> Result<Self, LoaderError> {
        Self::from_vars(None)
    }

    /// `vars` replaces the process environment when given.
    fn from_vars(vars: Option<Map<String, String>>) -> Result<Self, LoaderError> {
        let cfg = Config::builder()
            .set_default("host", "localhost")
            .and_then(|b| b.set_default("port", 8123))
            .and_then(|b| b.set_default("user", "default"))
            .and_then(|b| b.set_default("password", ""))
            .and_then(|b| b.set_default("database", "nyc_taxi"))
            .and_then(|b| b.set_default("table", "trips"))
            .map_err(|e| LoaderError::Init(format!("Error setting defaults: {}", e)))?
            .add_source(Environment::with_prefix("CLICKHOUSE").source(vars.clone()))
            .add_source(Environment::with_prefix("NYC_TAXI").source(vars))
            .build()
            .map_err(|e| LoaderError::Init(format!("Error reading config: {}", e)))?;
        let loader_cfg = cfg
            .try_deserialize::<Self>()
            .map_err(|e| LoaderError::Init(format!("Error parsing config: {}", e)))?;
        loader_cfg.validate()?;
        Ok(loader_cfg)
    }

    /// Database and table names end up inside SQL text unquoted.
    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.host.trim().is_empty() {
            return Err(LoaderError::Validation("host must not be empty".to_string()));
        }
        for (name, value) in [("database", &self.database), ("table", &self.table)] {
            if !IDENT.is_match(value) {
                return Err(LoaderError::Validation(format!(
                    "{} name {:?} is not a plain identifier",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn qualified_table(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }
}

use thiserror::Error;
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("init error: {0}")]
    Init(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("clickhouse error: {0}")]
    ClickHouse(#[from] clickhouse::error::Error),
}

use std::fmt;

use chrono::{DateTime, Utc};
use clickhouse::Row;
use serde::{Deserialize, Serialize};

/// One row of the verification sample, in `sql::sample_rows` column order.
#[derive(Debug, Clone, PartialEq, Row, Serialize, Deserialize)]
pub struct TripSample {
    #[serde(with = "clickhouse::serde::chrono::datetime")]
    pub pickup_datetime: DateTime<Utc>,
    #[serde(with = "clickhouse::serde::chrono::datetime")]
    pub dropoff_datetime: DateTime<Utc>,
    pub passenger_count: u8,
    pub trip_distance: f64,
    pub total_amount: f32,
    pub cab_type: String,
}

impl fmt::Display for TripSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, '{}')",
            self.pickup_datetime.format("%Y-%m-%d %H:%M:%S"),
            self.dropoff_datetime.format("%Y-%m-%d %H:%M:%S"),
            self.passenger_count,
            self.trip_distance,
            self.total_amount,
            self.cab_type
        )
    }
}

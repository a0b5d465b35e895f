pub const SOURCE_URL: &str =
    "https://datasets-documentation.s3.eu-west-3.amazonaws.com/nyc-taxi/trips_0.gz";
pub const SOURCE_FORMAT: &str = "TabSeparatedWithNames";
/// Malformed rows the server may skip before failing the insert.
pub const ALLOWED_ERRORS: u64 = 25_000;
pub const SAMPLE_SIZE: u64 = 5;

pub fn create_database(database: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {database}")
}

pub fn create_table(qualified_table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {qualified_table}
(
    trip_id             UInt32,
    vendor_id           String,
    pickup_datetime     DateTime,
    dropoff_datetime    DateTime,
    store_and_fwd_flag  UInt8,
    rate_code_id        UInt8,
    pickup_longitude    Float64,
    pickup_latitude     Float64,
    dropoff_longitude   Float64,
    dropoff_latitude    Float64,
    passenger_count     UInt8,
    trip_distance       Float64,
    fare_amount         Float32,
    extra               Float32,
    mta_tax             Float32,
    tip_amount          Float32,
    tolls_amount        Float32,
    ehail_fee           Float32,
    improvement_surcharge Float32,
    total_amount        Float32,
    payment_type        String,
    trip_type           UInt8,
    pickup_ntaname      String,
    dropoff_ntaname     String,
    cab_type            String,

    pickup_date Date MATERIALIZED toDate(pickup_datetime),
    pickup_hour UInt8 MATERIALIZED toHour(pickup_datetime)
)
ENGINE = MergeTree
PARTITION BY toYYYYMM(pickup_datetime)
ORDER BY (pickup_datetime, trip_id)
"#,
    )
}

/// Fetch, decompression and parsing all happen server side.
pub fn insert_from_s3(qualified_table: &str, limit: Option<u64>) -> String {
    let limit = match limit {
        Some(n) => format!("LIMIT {n}\n"),
        None => String::new(),
    };
    format!(
        r#"
INSERT INTO {qualified_table}
SELECT * FROM s3(
'{SOURCE_URL}',
'{SOURCE_FORMAT}'
)
{limit}SETTINGS input_format_allow_errors_num={ALLOWED_ERRORS}
"#,
    )
}

pub fn count_rows(qualified_table: &str) -> String {
    format!("SELECT count() FROM {qualified_table}")
}

pub fn sample_rows(qualified_table: &str) -> String {
    format!(
        r#"
SELECT
    pickup_datetime,
    dropoff_datetime,
    passenger_count,
    trip_distance,
    total_amount,
    cab_type
FROM {qualified_table}
LIMIT {SAMPLE_SIZE}
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_database_is_idempotent() {
        assert_eq!(
            create_database("nyc_taxi"),
            "CREATE DATABASE IF NOT EXISTS nyc_taxi"
        );
    }

    #[test]
    fn test_create_table_schema() {
        let sql = create_table("nyc_taxi.trips");
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS nyc_taxi.trips"));
        assert!(sql.contains("pickup_date Date MATERIALIZED toDate(pickup_datetime)"));
        assert!(sql.contains("pickup_hour UInt8 MATERIALIZED toHour(pickup_datetime)"));
        assert!(sql.contains("ENGINE = MergeTree"));
        assert!(sql.contains("PARTITION BY toYYYYMM(pickup_datetime)"));
        assert!(sql.contains("ORDER BY (pickup_datetime, trip_id)"));

        let columns: Vec<(&str, &str)> = sql
            .lines()
            .map(str::trim)
            .filter(|l| l.ends_with(',') && !l.contains("MATERIALIZED"))
            .filter_map(|l| l.trim_end_matches(',').split_once(char::is_whitespace))
            .map(|(name, ty)| (name, ty.trim()))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("trip_id", "UInt32"),
                ("vendor_id", "String"),
                ("pickup_datetime", "DateTime"),
                ("dropoff_datetime", "DateTime"),
                ("store_and_fwd_flag", "UInt8"),
                ("rate_code_id", "UInt8"),
                ("pickup_longitude", "Float64"),
                ("pickup_latitude", "Float64"),
                ("dropoff_longitude", "Float64"),
                ("dropoff_latitude", "Float64"),
                ("passenger_count", "UInt8"),
                ("trip_distance", "Float64"),
                ("fare_amount", "Float32"),
                ("extra", "Float32"),
                ("mta_tax", "Float32"),
                ("tip_amount", "Float32"),
                ("tolls_amount", "Float32"),
                ("ehail_fee", "Float32"),
                ("improvement_surcharge", "Float32"),
                ("total_amount", "Float32"),
                ("payment_type", "String"),
                ("trip_type", "UInt8"),
                ("pickup_ntaname", "String"),
                ("dropoff_ntaname", "String"),
                ("cab_type", "String"),
            ]
        );
    }

    #[test]
    fn test_insert_without_limit() {
        let sql = insert_from_s3("nyc_taxi.trips", None);
        assert!(sql.contains("INSERT INTO nyc_taxi.trips"));
        assert!(sql.contains(&format!("s3(\n'{SOURCE_URL}',\n'TabSeparatedWithNames'\n)")));
        assert!(sql.contains("SETTINGS input_format_allow_errors_num=25000"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn test_insert_limit_precedes_settings() {
        let sql = insert_from_s3("nyc_taxi.trips", Some(1000));
        let limit = sql.find("LIMIT 1000").unwrap();
        let settings = sql.find("SETTINGS").unwrap();
        assert!(limit < settings);
    }

    #[test]
    fn test_verification_queries() {
        assert_eq!(
            count_rows("nyc_taxi.trips"),
            "SELECT count() FROM nyc_taxi.trips"
        );
        let sample = sample_rows("nyc_taxi.trips");
        assert!(sample.contains("FROM nyc_taxi.trips"));
        assert!(sample.contains("LIMIT 5"));
        assert!(sample.contains("cab_type"));
    }
}

//! Catalog reports against a live PostgreSQL database.
//!
//! Requires DATABASE_URL to point at a PostgreSQL database that already has an
//! `expenses_data` table. Nothing is created or modified.

use expense_insights::config::ConnectionConfig;
use expense_insights::db::{DatabaseClient, PostgresClient, Value};
use expense_insights::report::{ConfigConnector, ReportExecutor};

async fn get_test_config() -> Option<ConnectionConfig> {
    let url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| url.starts_with("postgres"))?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;

    let client = PostgresClient::connect(&config).await.ok()?;
    let table_check = client
        .execute_query("SELECT to_regclass('expenses_data') IS NOT NULL AS present")
        .await;
    let _ = client.close().await;

    match table_check.ok()?.rows.first()?.first()? {
        Value::Bool(true) => Some(config),
        _ => None,
    }
}

#[tokio::test]
async fn test_every_report_runs_on_postgres() {
    let Some(config) = get_test_config().await else {
        eprintln!("Skipping test: DATABASE_URL not set or expenses_data missing");
        return;
    };

    let executor = ReportExecutor::new(ConfigConnector::new(config));
    for (name, outcome) in executor.run_all().await {
        assert!(outcome.is_ok(), "{name} failed: {:?}", outcome.err());
    }
}

#[tokio::test]
async fn test_percentage_is_rounded_on_postgres() {
    let Some(config) = get_test_config().await else {
        eprintln!("Skipping test: DATABASE_URL not set or expenses_data missing");
        return;
    };

    let executor = ReportExecutor::new(ConfigConnector::new(config));
    let result = executor.run("highest_percentage_category").await.unwrap();

    if let Some(percentage) = result.value(0, "percentage").and_then(Value::as_f64) {
        assert!((0.0..=100.0).contains(&percentage));
        assert_eq!((percentage * 100.0).round() / 100.0, percentage);
    }
}

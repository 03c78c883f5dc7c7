//! Connection lifecycle of report runs against a real SQLite file.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use expense_insights::db::{DatabaseBackend, DatabaseClient, QueryResult};
use expense_insights::error::Result;
use expense_insights::report::{ConfigConnector, Connector, ReportExecutor};

use super::common::{Expense, ExpenseDb};

#[derive(Default)]
struct Counts {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

struct CountingClient {
    inner: Box<dyn DatabaseClient>,
    counts: Arc<Counts>,
}

#[async_trait]
impl DatabaseClient for CountingClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.inner.execute_query(sql).await
    }

    async fn close(&self) -> Result<()> {
        self.counts.closed.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}

struct CountingConnector {
    inner: ConfigConnector,
    counts: Arc<Counts>,
}

#[async_trait]
impl Connector for CountingConnector {
    fn backend(&self) -> DatabaseBackend {
        self.inner.backend()
    }

    async fn connect(&self) -> Result<Box<dyn DatabaseClient>> {
        let inner = self.inner.connect().await?;
        self.counts.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingClient {
            inner,
            counts: self.counts.clone(),
        }))
    }
}

fn counting_executor(db: &ExpenseDb) -> (ReportExecutor, Arc<Counts>) {
    let counts = Arc::new(Counts::default());
    let executor = ReportExecutor::new(CountingConnector {
        inner: ConfigConnector::new(db.config()),
        counts: counts.clone(),
    });
    (executor, counts)
}

#[tokio::test]
async fn test_success_releases_connection_once() {
    let db = ExpenseDb::seed(&[Expense::new("2024-01-01", "Rent", 1200.0)]).await;
    let (executor, counts) = counting_executor(&db);

    executor.run("total_spent_per_category").await.unwrap();

    assert_eq!(counts.opened.load(Ordering::SeqCst), 1);
    assert_eq!(counts.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failure_releases_connection_once() {
    let db = ExpenseDb::without_table().await;
    let (executor, counts) = counting_executor(&db);

    assert!(executor.run("total_spent_per_category").await.is_err());

    assert_eq!(counts.opened.load(Ordering::SeqCst), 1);
    assert_eq!(counts.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_report_opens_nothing() {
    let db = ExpenseDb::seed(&[]).await;
    let (executor, counts) = counting_executor(&db);

    assert!(executor.run("nonexistent").await.is_err());

    assert_eq!(counts.opened.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_run_all_uses_one_connection_per_report() {
    let db = ExpenseDb::seed(&[Expense::new("2024-01-01", "Groceries", 42.0)]).await;
    let (executor, counts) = counting_executor(&db);

    let entries = executor.run_all().await;

    assert!(entries.iter().all(|(_, outcome)| outcome.is_ok()));
    assert_eq!(counts.opened.load(Ordering::SeqCst), entries.len());
    assert_eq!(counts.closed.load(Ordering::SeqCst), entries.len());
}

#[tokio::test]
async fn test_reports_never_modify_the_database() {
    let db = ExpenseDb::seed(&[Expense::new("2024-01-01", "Groceries", 42.0)]).await;
    let executor = db.executor();

    executor.run_all().await;
    let result = executor.run("total_spent_per_category").await.unwrap();

    assert_eq!(result.row_count, 1);
}

//! Mock database clients for testing.
//!
//! Both clients record every `close` call in an optional [`ReleaseCounter`]
//! so tests can check that connections are released.

use super::{ColumnInfo, DatabaseClient, QueryResult, Value};
use crate::error::{InsightsError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared count of released connections.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCounter(Arc<AtomicUsize>);

impl ReleaseCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many releases have been recorded.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A mock database client that returns a predefined result for every query.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    result: QueryResult,
    releases: Option<ReleaseCounter>,
}

impl MockDatabaseClient {
    /// Creates a mock that answers every query with a single `result` row.
    pub fn new() -> Self {
        Self::with_result(QueryResult::with_data(
            vec![ColumnInfo::new("result", "TEXT")],
            vec![vec![Value::from("mock")]],
        ))
    }

    /// Creates a mock that answers every query with `result`.
    pub fn with_result(result: QueryResult) -> Self {
        Self {
            result,
            ..Default::default()
        }
    }

    /// Records each `close` call in `counter`.
    pub fn tracking_releases(mut self, counter: ReleaseCounter) -> Self {
        self.releases = Some(counter);
        self
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Ok(self
            .result
            .clone()
            .with_execution_time(Duration::from_millis(1)))
    }

    async fn close(&self) -> Result<()> {
        if let Some(counter) = &self.releases {
            counter.record();
        }
        Ok(())
    }
}

/// A mock database client whose queries always fail.
#[derive(Debug)]
pub struct FailingDatabaseClient {
    message: String,
    releases: Option<ReleaseCounter>,
}

impl FailingDatabaseClient {
    /// Creates a client that fails every query with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            releases: None,
        }
    }

    /// Records each `close` call in `counter`.
    pub fn tracking_releases(mut self, counter: ReleaseCounter) -> Self {
        self.releases = Some(counter);
        self
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(InsightsError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        if let Some(counter) = &self.releases {
            counter.record();
        }
        Ok(())
    }
}

//! Report execution against a per-request connection.
//!
//! Each run resolves the report, opens one connection, runs one query and
//! closes the connection again whether or not the query succeeded.

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Report};
use crate::db::QueryResult;
use crate::error::{InsightsError, Result};

use super::Connector;

/// Outcome of one report in a dashboard run.
pub type DashboardEntry = (&'static str, Result<QueryResult>);

/// Runs catalog reports through a [`Connector`].
pub struct ReportExecutor {
    connector: Box<dyn Connector>,
}

impl ReportExecutor {
    /// Creates a new report executor.
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
        }
    }

    /// Runs the named report and returns every row.
    ///
    /// Unknown names fail before any connection is opened.
    pub async fn run(&self, report_name: &str) -> Result<QueryResult> {
        let report = Catalog::get(report_name)?;
        self.execute(report).await
    }

    /// Runs every catalog report in order, one connection each.
    ///
    /// A failing report does not stop the remaining ones.
    pub async fn run_all(&self) -> Vec<DashboardEntry> {
        let mut entries = Vec::with_capacity(Catalog::all().len());
        for report in Catalog::all() {
            entries.push((report.name, self.execute(report).await));
        }
        entries
    }

    async fn execute(&self, report: &Report) -> Result<QueryResult> {
        let backend = self.connector.backend();
        let sql = report.sql(backend);
        debug!(report = report.name, %backend, "Resolved report SQL");

        let client = self.connector.connect().await.map_err(|e| {
            warn!(report = report.name, error = %e, "Could not open connection");
            into_query_error(e)
        })?;

        let outcome = client.execute_query(&sql).await;

        if let Err(e) = client.close().await {
            warn!(report = report.name, error = %e, "Failed to close connection");
        }

        match outcome {
            Ok(result) => {
                info!(
                    report = report.name,
                    rows = result.row_count,
                    elapsed_ms = result.execution_time.as_millis() as u64,
                    "Report completed"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(report = report.name, error = %e, "Report failed");
                Err(into_query_error(e))
            }
        }
    }
}

/// Every failure past name resolution surfaces as a query execution error.
fn into_query_error(error: InsightsError) -> InsightsError {
    match error {
        InsightsError::QueryExecution(_) => error,
        InsightsError::Config(msg) | InsightsError::UnknownReport(msg) => {
            InsightsError::query(msg)
        }
    }
}

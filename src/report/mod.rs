//! Report execution.
//!
//! Resolves catalog reports and runs them against a per-request connection.

mod connector;
mod executor;

pub use connector::{ConfigConnector, Connector, MockConnector};
pub use executor::{DashboardEntry, ReportExecutor};

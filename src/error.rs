//! Error types for expense-insights.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for expense-insights operations.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// The requested report name is not in the catalog. Always a caller defect.
    #[error("Unknown report: '{0}'")]
    UnknownReport(String),

    /// Any failure at the database boundary (connectivity, syntax, missing table, etc.)
    #[error("Query execution error: {0}")]
    QueryExecution(String),

    /// Configuration errors (invalid config file, bad connection string, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InsightsError {
    /// Creates an unknown-report error for the given name.
    pub fn unknown_report(name: impl Into<String>) -> Self {
        Self::UnknownReport(name.into())
    }

    /// Creates a query execution error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryExecution(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownReport(_) => "Unknown Report",
            Self::QueryExecution(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Result type alias using InsightsError.
pub type Result<T> = std::result::Result<T, InsightsError>;

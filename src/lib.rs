//! expense-insights - a fixed catalog of expense dashboard reports.
//!
//! This library exposes the core modules for use in integration tests.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;
pub mod safety;

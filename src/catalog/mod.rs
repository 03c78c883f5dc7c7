//! The report catalog.
//!
//! A static table of every report the dashboard can show. Each report owns a
//! read-only SQL template over `expenses_data`; the template is rendered for
//! the connected backend just before execution.

mod dialect;
mod queries;

pub use dialect::{render, PLACEHOLDERS};

use serde::Serialize;

use crate::db::DatabaseBackend;
use crate::error::{InsightsError, Result};
use crate::safety::{classify_sql, ClassificationResult};

/// The table every report reads from.
pub const EXPENSES_TABLE: &str = "expenses_data";

/// The algorithmic shape of a report's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPattern {
    /// `SUM(amount_paid)` grouped by one column.
    GroupedSum,
    /// Sums bucketed by calendar month, year or weekday, in calendar order.
    TimeBucketed,
    /// Grouped sum restricted by a static category list.
    FilteredSum,
    /// Share of the grand total, top row only.
    RankedPercentage,
    /// Raw rows matching a static predicate.
    Listing,
    /// A single aggregate over the whole table.
    Scalar,
}

impl ReportPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GroupedSum => "grouped_sum",
            Self::TimeBucketed => "time_bucketed",
            Self::FilteredSum => "filtered_sum",
            Self::RankedPercentage => "ranked_percentage",
            Self::Listing => "listing",
            Self::Scalar => "scalar",
        }
    }
}

/// How a rendering layer is expected to draw a report's result set.
///
/// Field values are column names of the report's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visualization {
    Bar {
        x: &'static str,
        y: &'static str,
    },
    GroupedBar {
        x: &'static str,
        y: &'static str,
        color: &'static str,
    },
    StackedBar {
        x: &'static str,
        y: &'static str,
        color: &'static str,
    },
    Pie {
        names: &'static str,
        values: &'static str,
    },
    Line {
        x: &'static str,
        y: &'static str,
    },
    /// A single headline number, optionally labelled by another column of the first row.
    Metric {
        label: Option<&'static str>,
        value: &'static str,
    },
    Table,
}

impl Visualization {
    /// Returns a short name for listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bar { .. } => "bar",
            Self::GroupedBar { .. } => "grouped bar",
            Self::StackedBar { .. } => "stacked bar",
            Self::Pie { .. } => "pie",
            Self::Line { .. } => "line",
            Self::Metric { .. } => "metric",
            Self::Table => "table",
        }
    }

    /// Returns every output column the visualization refers to.
    pub fn columns(&self) -> Vec<&'static str> {
        match *self {
            Self::Bar { x, y } | Self::Line { x, y } => vec![x, y],
            Self::GroupedBar { x, y, color } | Self::StackedBar { x, y, color } => {
                vec![x, y, color]
            }
            Self::Pie { names, values } => vec![names, values],
            Self::Metric { label, value } => label.into_iter().chain([value]).collect(),
            Self::Table => Vec::new(),
        }
    }
}

/// A named, fixed aggregation over the expense table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Stable lookup key.
    pub name: &'static str,
    /// Human-readable heading.
    pub title: &'static str,
    pub pattern: ReportPattern,
    pub visualization: Visualization,
    /// SQL with dialect placeholders; see [`render`].
    #[serde(skip)]
    pub template: &'static str,
}

impl Report {
    /// Renders this report's SQL for the given backend.
    pub fn sql(&self, backend: DatabaseBackend) -> String {
        render(self.template.trim(), backend)
    }
}

/// Static registry of every report.
pub struct Catalog;

impl Catalog {
    /// All reports, in dashboard order.
    pub fn all() -> &'static [Report] {
        queries::REPORTS
    }

    /// All report names, in dashboard order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        queries::REPORTS.iter().map(|r| r.name)
    }

    /// Looks up a report by name.
    ///
    /// Use [`Catalog::sql`] to get the rendered SQL text directly.
    pub fn get(name: &str) -> Result<&'static Report> {
        queries::REPORTS
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| InsightsError::unknown_report(name))
    }

    /// Looks up a report and renders its SQL for the given backend.
    pub fn sql(name: &str, backend: DatabaseBackend) -> Result<String> {
        Ok(Self::get(name)?.sql(backend))
    }
}

/// A report whose rendered SQL is not a plain read-only query.
#[derive(Debug, Clone)]
pub struct AuditFinding {
    pub report: &'static str,
    pub classification: ClassificationResult,
}

/// Classifies every rendered statement for `backend` and returns those that
/// are not read-only. An empty result means the catalog is clean.
pub fn audit(backend: DatabaseBackend) -> Vec<AuditFinding> {
    Catalog::all()
        .iter()
        .filter_map(|report| {
            let classification = classify_sql(&report.sql(backend), backend);
            (!classification.is_read_only()).then_some(AuditFinding {
                report: report.name,
                classification,
            })
        })
        .collect()
}

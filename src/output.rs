//! Terminal rendering of report results.
//!
//! Result sets are printed either as an aligned text table or as pretty JSON.
//! Charts are left to whatever renderer consumes the JSON; the report's
//! visualization hint travels with it.

use serde::{Deserialize, Serialize};

use crate::catalog::{AuditFinding, Catalog, Report, ReportPattern};
use crate::db::{DatabaseBackend, QueryResult};
use crate::report::DashboardEntry;

/// Output format for the `run` and `dashboard` commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Text,
    /// JSON document with report metadata and rows.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a str,
    title: &'a str,
    pattern: ReportPattern,
    visualization: &'a crate::catalog::Visualization,
    columns: Vec<&'a str>,
    rows: Vec<serde_json::Map<String, serde_json::Value>>,
    row_count: usize,
    execution_time_ms: u64,
}

/// Renders a report result in the requested format.
pub fn render(report: &Report, result: &QueryResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(report, result),
        OutputFormat::Json => render_json(report, result),
    }
}

fn render_text(report: &Report, result: &QueryResult) -> String {
    let headers: Vec<String> = result.columns.iter().map(|c| c.name.clone()).collect();
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_display_string()).collect())
        .collect();

    let body = if result.is_empty() {
        "(no rows)".to_string()
    } else {
        format_table(&headers, &rows)
    };

    format!(
        "{}\n{}\n\n{}\n\n{} row(s) in {}ms",
        report.title,
        "=".repeat(report.title.chars().count()),
        body,
        result.row_count,
        result.execution_time.as_millis()
    )
}

fn json_report<'a>(report: &'a Report, result: &'a QueryResult) -> JsonReport<'a> {
    JsonReport {
        report: report.name,
        title: report.title,
        pattern: report.pattern,
        visualization: &report.visualization,
        columns: result.column_names(),
        rows: result.to_json_rows(),
        row_count: result.row_count,
        execution_time_ms: result.execution_time.as_millis() as u64,
    }
}

fn render_json(report: &Report, result: &QueryResult) -> String {
    serde_json::to_string_pretty(&json_report(report, result))
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e))
}

/// Renders the catalog listing for the `list` command.
pub fn render_catalog(reports: &[Report]) -> String {
    let headers = ["report", "title", "pattern", "chart"].map(String::from);
    let rows: Vec<Vec<String>> = reports
        .iter()
        .map(|r| {
            vec![
                r.name.to_string(),
                r.title.to_string(),
                r.pattern.as_str().to_string(),
                r.visualization.kind().to_string(),
            ]
        })
        .collect();
    format_table(&headers, &rows)
}

/// Renders the outcome of a catalog audit.
pub fn render_audit(backend: DatabaseBackend, findings: &[AuditFinding]) -> String {
    if findings.is_empty() {
        return format!("{backend}: all {} reports are read-only", Catalog::all().len());
    }
    let mut lines = vec![format!("{backend}: {} report(s) failed the audit", findings.len())];
    lines.extend(
        findings
            .iter()
            .map(|f| format!("  {}: {}", f.report, f.classification)),
    );
    lines.join("\n")
}

/// Renders every dashboard entry, reporting failed reports inline.
pub fn render_dashboard(entries: &[DashboardEntry], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => entries
            .iter()
            .filter_map(|(name, outcome)| {
                let report = Catalog::get(name).ok()?;
                Some(match outcome {
                    Ok(result) => render_text(report, result),
                    Err(e) => format!(
                        "{}\n{}\n\nerror: {}",
                        report.title,
                        "=".repeat(report.title.chars().count()),
                        e
                    ),
                })
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        OutputFormat::Json => {
            let docs: Vec<serde_json::Value> = entries
                .iter()
                .map(|(name, outcome)| match outcome {
                    Ok(result) => Catalog::get(name)
                        .ok()
                        .and_then(|report| serde_json::to_value(json_report(report, result)).ok())
                        .unwrap_or(serde_json::Value::Null),
                    Err(e) => serde_json::json!({ "report": name, "error": e.to_string() }),
                })
                .collect();
            serde_json::to_string_pretty(&docs)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e))
        }
    }
}

/// Formats a table as a string for display.
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    output.push_str(header_line.join(" │ ").trim_end());
    output.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    output.push_str(&separator.join("─┼─"));
    output.push('\n');

    for row in rows {
        let row_line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(cell.chars().count());
                format!("{:width$}", cell, width = width)
            })
            .collect();
        output.push_str(row_line.join(" │ ").trim_end());
        output.push('\n');
    }

    output.trim_end().to_string()
}

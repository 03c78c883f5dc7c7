//! Per-backend rendering of report SQL templates.
//!
//! Templates contain placeholders for the date-part expressions and numeric
//! types that differ between engines. Rendering is plain text substitution.

use crate::db::DatabaseBackend;

/// Placeholders understood by [`render`].
pub const PLACEHOLDERS: [&str; 7] = [
    "{percent_of_total}",
    "{month_number}",
    "{month_name}",
    "{year}",
    "{weekday_number}",
    "{weekday_name}",
    "{real}",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Indexed by strftime('%w'): Sunday = 0.
const SQLITE_WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Renders a template into SQL for the given backend.
pub fn render(template: &str, backend: DatabaseBackend) -> String {
    PLACEHOLDERS
        .iter()
        .fold(template.to_string(), |sql, placeholder| {
            sql.replace(placeholder, &expansion(placeholder, backend))
        })
}

fn expansion(placeholder: &str, backend: DatabaseBackend) -> String {
    match backend {
        DatabaseBackend::Sqlite => sqlite_expansion(placeholder),
        DatabaseBackend::Postgres => postgres_expansion(placeholder),
    }
}

fn sqlite_expansion(placeholder: &str) -> String {
    match placeholder {
        "{month_number}" => "CAST(strftime('%m', date) AS INTEGER)".to_string(),
        "{month_name}" => case_table(
            "CAST(strftime('%m', date) AS INTEGER)",
            MONTH_NAMES.iter().enumerate().map(|(i, name)| (i + 1, *name)),
        ),
        "{year}" => "CAST(strftime('%Y', date) AS INTEGER)".to_string(),
        // ISO weekday: Monday = 1 ... Sunday = 7
        "{weekday_number}" => "((CAST(strftime('%w', date) AS INTEGER) + 6) % 7 + 1)".to_string(),
        "{weekday_name}" => case_table(
            "CAST(strftime('%w', date) AS INTEGER)",
            SQLITE_WEEKDAY_NAMES.iter().enumerate().map(|(i, name)| (i, *name)),
        ),
        // Whole cents keep the half-up rounding exact.
        "{percent_of_total}" => {
            let cents = "SUM(CAST(ROUND(amount_paid * 100) AS INTEGER))";
            let total = format!("(SELECT {cents} FROM expenses_data)");
            format!(
                "CAST((20000 * {cents} + {total}) / NULLIF(2 * {total}, 0) AS REAL) / 100.0"
            )
        }
        "{real}" => "REAL".to_string(),
        other => other.to_string(),
    }
}

fn postgres_expansion(placeholder: &str) -> String {
    match placeholder {
        "{month_number}" => "CAST(EXTRACT(MONTH FROM date) AS INTEGER)",
        "{month_name}" => "TO_CHAR(date, 'FMMonth')",
        "{year}" => "CAST(EXTRACT(YEAR FROM date) AS INTEGER)",
        "{weekday_number}" => "CAST(EXTRACT(ISODOW FROM date) AS INTEGER)",
        "{weekday_name}" => "TO_CHAR(date, 'FMDay')",
        "{percent_of_total}" => {
            "CAST(ROUND(100 * SUM(CAST(amount_paid AS NUMERIC)) \
             / NULLIF((SELECT SUM(CAST(amount_paid AS NUMERIC)) FROM expenses_data), 0), 2) \
             AS DOUBLE PRECISION)"
        }
        "{real}" => "DOUBLE PRECISION",
        other => other,
    }
    .to_string()
}

fn case_table<'a>(subject: &str, arms: impl Iterator<Item = (usize, &'a str)>) -> String {
    let arms: Vec<String> = arms
        .map(|(key, label)| format!("WHEN {key} THEN '{label}'"))
        .collect();
    format!("CASE {subject} {} END", arms.join(" "))
}

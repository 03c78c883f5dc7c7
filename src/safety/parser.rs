//! SQL parsing and classification logic.
//!
//! Uses sqlparser-rs with the dialect of the target backend to parse SQL and
//! classify statements by their safety level.

use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::{PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::{Parser, ParserError};

use crate::db::DatabaseBackend;

use super::{ClassificationResult, SafetyLevel, StatementType};

/// SQL classifier bound to one backend's dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlClassifier {
    backend: DatabaseBackend,
}

impl SqlClassifier {
    /// Creates a classifier that parses with the given backend's dialect.
    pub fn new(backend: DatabaseBackend) -> Self {
        Self { backend }
    }

    /// Classifies a SQL string.
    ///
    /// SQL that cannot be parsed is treated as destructive, with the parser
    /// message as the warning.
    pub fn classify(&self, sql: &str) -> ClassificationResult {
        let statements = match self.parse(sql) {
            Ok(statements) => statements,
            Err(e) => {
                return ClassificationResult::with_warning(
                    SafetyLevel::Destructive,
                    StatementType::Unknown,
                    format!("Could not parse SQL: {e}"),
                )
            }
        };

        match statements.as_slice() {
            [] => ClassificationResult::with_warning(
                SafetyLevel::Destructive,
                StatementType::Unknown,
                "Empty SQL statement",
            ),
            [statement] => {
                let (level, stmt_type) = classify_statement(statement);
                ClassificationResult::new(level, stmt_type)
            }
            many => {
                let (level, stmt_type) = many
                    .iter()
                    .map(classify_statement)
                    .max_by_key(|(level, _)| level.priority())
                    .unwrap_or((SafetyLevel::Destructive, StatementType::Unknown));
                ClassificationResult::with_warning(
                    level,
                    StatementType::Multiple(Box::new(stmt_type)),
                    "Expected a single statement",
                )
            }
        }
    }

    fn parse(&self, sql: &str) -> Result<Vec<Statement>, ParserError> {
        match self.backend {
            DatabaseBackend::Sqlite => Parser::parse_sql(&SQLiteDialect {}, sql),
            DatabaseBackend::Postgres => Parser::parse_sql(&PostgreSqlDialect {}, sql),
        }
    }
}

/// Convenience function to classify SQL without creating a classifier instance.
pub fn classify_sql(sql: &str, backend: DatabaseBackend) -> ClassificationResult {
    SqlClassifier::new(backend).classify(sql)
}

fn most_dangerous(
    a: (SafetyLevel, StatementType),
    b: (SafetyLevel, StatementType),
) -> (SafetyLevel, StatementType) {
    if b.0.priority() > a.0.priority() {
        b
    } else {
        a
    }
}

fn safe_select() -> (SafetyLevel, StatementType) {
    (SafetyLevel::Safe, StatementType::Select)
}

/// Classifies a single parsed statement.
fn classify_statement(statement: &Statement) -> (SafetyLevel, StatementType) {
    match statement {
        // Query: may contain data-modifying CTEs, so recurse
        Statement::Query(query) => classify_query(query),

        Statement::Insert(_) => (SafetyLevel::Mutating, StatementType::Insert),
        Statement::Update { .. } => (SafetyLevel::Mutating, StatementType::Update),
        Statement::Merge { .. } => (SafetyLevel::Mutating, StatementType::Merge),
        Statement::Delete(_) => (SafetyLevel::Destructive, StatementType::Delete),

        // Conservative default: DDL, grants and anything else
        _ => (SafetyLevel::Destructive, StatementType::Unknown),
    }
}

/// Classifies a Query by recursively inspecting CTEs and the body.
fn classify_query(query: &Query) -> (SafetyLevel, StatementType) {
    let from_ctes = query
        .with
        .iter()
        .flat_map(|with| with.cte_tables.iter())
        .map(|cte| classify_query(&cte.query))
        .fold(safe_select(), most_dangerous);

    most_dangerous(from_ctes, classify_set_expr(&query.body))
}

/// Classifies a SetExpr, detecting mutations and recursing into nested queries.
fn classify_set_expr(set_expr: &SetExpr) -> (SafetyLevel, StatementType) {
    match set_expr {
        SetExpr::Select(select) => classify_select(select),
        SetExpr::Query(query) => classify_query(query),
        SetExpr::SetOperation { left, right, .. } => {
            most_dangerous(classify_set_expr(left), classify_set_expr(right))
        }
        SetExpr::Values(_) | SetExpr::Table(_) => safe_select(),
        SetExpr::Insert(stmt) | SetExpr::Update(stmt) => classify_statement(stmt),
        #[allow(unreachable_patterns)]
        _ => (SafetyLevel::Destructive, StatementType::Unknown),
    }
}

/// Classifies a Select by checking its FROM clause for subqueries.
fn classify_select(select: &Select) -> (SafetyLevel, StatementType) {
    select
        .from
        .iter()
        .map(classify_table_with_joins)
        .fold(safe_select(), most_dangerous)
}

/// Classifies a TableWithJoins, checking the main relation and all joins.
fn classify_table_with_joins(twj: &TableWithJoins) -> (SafetyLevel, StatementType) {
    twj.joins
        .iter()
        .map(|join| classify_table_factor(&join.relation))
        .fold(classify_table_factor(&twj.relation), most_dangerous)
}

/// Classifies a TableFactor, recursing into derived tables (subqueries).
fn classify_table_factor(factor: &TableFactor) -> (SafetyLevel, StatementType) {
    match factor {
        TableFactor::Derived { subquery, .. } => classify_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => classify_table_with_joins(table_with_joins),
        _ => safe_select(),
    }
}

//! Report semantics against a seeded SQLite database.

use expense_insights::catalog::Catalog;
use expense_insights::db::{QueryResult, Value};
use expense_insights::error::InsightsError;
use pretty_assertions::assert_eq;

use super::common::{Expense, ExpenseDb};

fn strings(result: &QueryResult, column: &str) -> Vec<String> {
    result
        .column_values(column)
        .into_iter()
        .map(|v| v.to_display_string())
        .collect()
}

fn floats(result: &QueryResult, column: &str) -> Vec<f64> {
    result
        .column_values(column)
        .into_iter()
        .filter_map(Value::as_f64)
        .collect()
}

fn sample_ledger() -> Vec<Expense> {
    vec![
        Expense::new("2024-01-05", "Groceries", 120.0).paid_by("Debit Card"),
        Expense::new("2024-01-20", "Travel", 900.0)
            .paid_by("Credit Card")
            .with_cashback(45.0),
        Expense::new("2024-02-11", "Entertainment", 60.0).paid_by("UPI"),
        Expense::new("2024-02-14", "Gifts", 250.0)
            .paid_by("Credit Card")
            .with_cashback(12.5),
        Expense::new("2024-03-01", "Insurance", 1500.0).paid_by("Net Banking"),
        Expense::new("2024-03-15", "Property Taxes", 11000.0).paid_by("Net Banking"),
        Expense::new("2024-04-02", "Transportation", 80.0).paid_by("Cash"),
        Expense::new("2024-04-09", "Groceries", 95.5).paid_by("Debit Card"),
    ]
}

#[tokio::test]
async fn test_every_report_runs_on_sqlite() {
    let db = ExpenseDb::seed(&sample_ledger()).await;
    let entries = db.executor().run_all().await;

    assert_eq!(entries.len(), 14);
    for (name, outcome) in &entries {
        let result = outcome
            .as_ref()
            .unwrap_or_else(|e| panic!("{name} failed: {e}"));
        let report = Catalog::get(name).unwrap();
        for column in report.visualization.columns() {
            if !result.is_empty() {
                assert!(
                    result.column_index(column).is_some(),
                    "{name} is missing chart column {column}"
                );
            }
        }
    }
}

#[tokio::test]
async fn test_grouped_sum_is_complete() {
    let ledger = sample_ledger();
    let db = ExpenseDb::seed(&ledger).await;

    let result = db.executor().run("total_spent_per_category").await.unwrap();

    let table_total: f64 = ledger.iter().map(|e| e.amount_paid).sum();
    let report_total: f64 = floats(&result, "total_spent").iter().sum();
    assert!((table_total - report_total).abs() < 1e-9);
    assert_eq!(strings(&result, "category")[0], "Property Taxes");
}

#[tokio::test]
async fn test_payment_mode_totals() {
    let db = ExpenseDb::seed(&sample_ledger()).await;

    let result = db
        .executor()
        .run("total_spent_per_payment_mode")
        .await
        .unwrap();

    assert_eq!(
        strings(&result, "payment_mode"),
        vec!["Cash", "Credit Card", "Debit Card", "Net Banking", "UPI"]
    );
    assert_eq!(floats(&result, "total_spent"), vec![80.0, 1150.0, 215.5, 12500.0, 60.0]);
}

#[tokio::test]
async fn test_monthly_spending_is_calendar_ordered() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-03-10", "Groceries", 30.0),
        Expense::new("2024-01-10", "Groceries", 10.0),
        Expense::new("2024-07-10", "Groceries", 70.0),
    ])
    .await;

    let result = db.executor().run("spending_per_month").await.unwrap();

    assert_eq!(strings(&result, "month"), vec!["January", "March", "July"]);
    assert_eq!(floats(&result, "total_spent"), vec![10.0, 30.0, 70.0]);
}

#[tokio::test]
async fn test_highest_percentage_category() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-01-01", "A", 75.0),
        Expense::new("2024-01-02", "B", 25.0),
    ])
    .await;

    let result = db
        .executor()
        .run("highest_percentage_category")
        .await
        .unwrap();

    assert_eq!(result.row_count, 1);
    assert_eq!(result.value(0, "category"), Some(&Value::from("A")));
    assert_eq!(result.value(0, "percentage"), Some(&Value::Float(75.0)));
}

#[tokio::test]
async fn test_percentage_tie_breaks_by_category() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-01-01", "Utilities", 50.0),
        Expense::new("2024-01-02", "Rent", 50.0),
    ])
    .await;

    let result = db
        .executor()
        .run("highest_percentage_category")
        .await
        .unwrap();

    assert_eq!(result.value(0, "category"), Some(&Value::from("Rent")));
    assert_eq!(result.value(0, "percentage"), Some(&Value::Float(50.0)));
}

#[tokio::test]
async fn test_cashback_listing_excludes_zero_cashback() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-05-01", "Dining", 40.0).described("Lunch"),
        Expense::new("2024-05-02", "Dining", 60.0)
            .described("Dinner")
            .with_cashback(5.0),
    ])
    .await;

    let result = db
        .executor()
        .run("transactions_with_cashback")
        .await
        .unwrap();

    assert_eq!(result.row_count, 1);
    assert_eq!(result.value(0, "description"), Some(&Value::from("Dinner")));
    assert_eq!(result.value(0, "date"), Some(&Value::from("2024-05-02")));
    assert_eq!(result.value(0, "cashback"), Some(&Value::Float(5.0)));
}

#[tokio::test]
async fn test_total_cashback() {
    let db = ExpenseDb::seed(&sample_ledger()).await;

    let result = db.executor().run("total_cashback_received").await.unwrap();

    assert_eq!(result.row_count, 1);
    assert_eq!(result.value(0, "total_cashback"), Some(&Value::Float(57.5)));
}

#[tokio::test]
async fn test_total_cashback_on_empty_table_is_zero() {
    let db = ExpenseDb::seed(&[]).await;

    let result = db.executor().run("total_cashback_received").await.unwrap();

    assert_eq!(result.value(0, "total_cashback"), Some(&Value::Float(0.0)));
}

#[tokio::test]
async fn test_grocery_weekdays_run_monday_to_sunday() {
    // 2024-01-01 was a Monday.
    let db = ExpenseDb::seed(&[
        Expense::new("2024-01-07", "Groceries", 70.0),
        Expense::new("2024-01-03", "Groceries", 30.0),
        Expense::new("2024-01-01", "Groceries", 10.0),
        Expense::new("2024-01-08", "Groceries", 15.0),
        Expense::new("2024-01-02", "Travel", 500.0),
    ])
    .await;

    let result = db.executor().run("grocery_patterns").await.unwrap();

    assert_eq!(strings(&result, "day"), vec!["Monday", "Wednesday", "Sunday"]);
    assert_eq!(floats(&result, "total_spent"), vec![25.0, 30.0, 70.0]);
}

#[tokio::test]
async fn test_spending_trend_orders_by_year_then_month() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-02-01", "Rent", 200.0),
        Expense::new("2023-12-01", "Rent", 100.0),
        Expense::new("2024-01-01", "Rent", 150.0),
        Expense::new("2023-02-01", "Rent", 50.0),
    ])
    .await;

    let result = db.executor().run("spending_trend").await.unwrap();

    assert_eq!(
        strings(&result, "month"),
        vec!["February", "December", "January", "February"]
    );
    assert_eq!(
        result.column_values("year"),
        vec![
            &Value::Int(2023),
            &Value::Int(2023),
            &Value::Int(2024),
            &Value::Int(2024)
        ]
    );
}

#[tokio::test]
async fn test_priority_threshold() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-01-01", "Rent", 6000.0),
        Expense::new("2024-02-01", "Rent", 6000.0),
        Expense::new("2024-01-01", "Utilities", 10000.0),
    ])
    .await;

    let result = db
        .executor()
        .run("high_low_priority_categories")
        .await
        .unwrap();

    assert_eq!(strings(&result, "category"), vec!["Rent", "Utilities"]);
    assert_eq!(
        strings(&result, "priority"),
        vec!["High Priority", "Low Priority"]
    );
}

#[tokio::test]
async fn test_filtered_reports_only_see_their_categories() {
    let db = ExpenseDb::seed(&sample_ledger()).await;
    let executor = db.executor();

    let travel = executor.run("travel_expenses_data").await.unwrap();
    assert_eq!(strings(&travel, "category"), vec!["Travel", "Transportation"]);

    let recurring = executor.run("recurring_expenses_data").await.unwrap();
    assert_eq!(
        strings(&recurring, "category"),
        vec!["Insurance", "Property Taxes"]
    );
    assert_eq!(strings(&recurring, "month"), vec!["March", "March"]);

    let highlights = executor.run("highest_spending_categories").await.unwrap();
    assert_eq!(
        strings(&highlights, "category"),
        vec!["Travel", "Gifts", "Entertainment"]
    );
}

#[tokio::test]
async fn test_top_five_limits_rows() {
    let db = ExpenseDb::seed(&sample_ledger()).await;

    let result = db.executor().run("top_5_categories").await.unwrap();

    assert_eq!(result.row_count, 5);
    assert_eq!(
        strings(&result, "category"),
        vec!["Property Taxes", "Insurance", "Travel", "Gifts", "Groceries"]
    );
}

#[tokio::test]
async fn test_missing_table_is_query_error() {
    let db = ExpenseDb::without_table().await;

    let error = db.executor().run("spending_per_month").await.unwrap_err();

    assert!(matches!(error, InsightsError::QueryExecution(_)));
    assert!(error.to_string().contains("expenses_data"));
}

#[tokio::test]
async fn test_unknown_report() {
    let db = ExpenseDb::seed(&[]).await;

    let error = db.executor().run("nonexistent").await.unwrap_err();

    assert!(matches!(error, InsightsError::UnknownReport(ref name) if name == "nonexistent"));
}

#[tokio::test]
async fn test_monthly_cashback_is_calendar_ordered() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-03-04", "Dining", 80.0).with_cashback(3.0),
        Expense::new("2024-01-04", "Dining", 40.0).with_cashback(1.0),
        Expense::new("2024-07-04", "Dining", 90.0).with_cashback(7.0),
    ])
    .await;

    let result = db.executor().run("monthly_cashback_rewards").await.unwrap();

    assert_eq!(strings(&result, "month"), vec!["January", "March", "July"]);
    assert_eq!(floats(&result, "total_cashback"), vec![1.0, 3.0, 7.0]);
}

#[tokio::test]
async fn test_recurring_expenses_are_calendar_ordered() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-03-01", "Insurance", 300.0),
        Expense::new("2024-01-01", "Property Taxes", 100.0),
        Expense::new("2024-07-01", "Insurance", 700.0),
        Expense::new("2024-01-15", "Groceries", 55.0),
    ])
    .await;

    let result = db.executor().run("recurring_expenses_data").await.unwrap();

    assert_eq!(strings(&result, "month"), vec!["January", "March", "July"]);
    assert_eq!(
        strings(&result, "category"),
        vec!["Property Taxes", "Insurance", "Insurance"]
    );
    assert_eq!(floats(&result, "total_spent"), vec![100.0, 300.0, 700.0]);
}

#[tokio::test]
async fn test_percentage_rounds_half_up_on_cents() {
    let db = ExpenseDb::seed(&[
        Expense::new("2024-01-01", "A", 164.01),
        Expense::new("2024-01-02", "B", 35.99),
    ])
    .await;

    let result = db
        .executor()
        .run("highest_percentage_category")
        .await
        .unwrap();

    assert_eq!(result.value(0, "category"), Some(&Value::from("A")));
    assert_eq!(result.value(0, "percentage"), Some(&Value::Float(82.01)));
}

#[tokio::test]
async fn test_empty_listing_keeps_column_names() {
    let db = ExpenseDb::seed(&[Expense::new("2024-05-01", "Dining", 40.0)]).await;
    let executor = db.executor();

    let cashback = executor.run("transactions_with_cashback").await.unwrap();
    assert!(cashback.is_empty());
    assert_eq!(
        cashback.column_names(),
        vec!["date", "category", "description", "amount_paid", "cashback"]
    );

    let travel = executor.run("travel_expenses_data").await.unwrap();
    assert!(travel.is_empty());
    assert_eq!(travel.column_names(), vec!["category", "total_spent"]);
}

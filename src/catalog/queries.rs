//! The fixed report definitions, in dashboard order.

use super::{Report, ReportPattern, Visualization};

pub(super) static REPORTS: &[Report] = &[
    Report {
        name: "total_spent_per_category",
        title: "Total Spending by Category",
        pattern: ReportPattern::GroupedSum,
        visualization: Visualization::Bar {
            x: "category",
            y: "total_spent",
        },
        template: "
            SELECT category, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            GROUP BY category
            ORDER BY total_spent DESC, category ASC;
        ",
    },
    Report {
        name: "total_spent_per_payment_mode",
        title: "Total Spending by Payment Mode",
        pattern: ReportPattern::GroupedSum,
        visualization: Visualization::Pie {
            names: "payment_mode",
            values: "total_spent",
        },
        template: "
            SELECT payment_mode, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            GROUP BY payment_mode
            ORDER BY payment_mode ASC;
        ",
    },
    Report {
        name: "total_cashback_received",
        title: "Total Cashback Received",
        pattern: ReportPattern::Scalar,
        visualization: Visualization::Metric {
            label: None,
            value: "total_cashback",
        },
        template: "
            SELECT CAST(COALESCE(SUM(cashback), 0) AS {real}) AS total_cashback
            FROM expenses_data;
        ",
    },
    Report {
        name: "top_5_categories",
        title: "Top 5 Expense Categories",
        pattern: ReportPattern::GroupedSum,
        visualization: Visualization::Bar {
            x: "category",
            y: "total_spent",
        },
        template: "
            SELECT category, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            GROUP BY category
            ORDER BY total_spent DESC, category ASC
            LIMIT 5;
        ",
    },
    Report {
        name: "spending_per_month",
        title: "Monthly Spending Overview",
        pattern: ReportPattern::TimeBucketed,
        visualization: Visualization::Line {
            x: "month",
            y: "total_spent",
        },
        template: "
            SELECT {month_name} AS month, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            GROUP BY {month_number}, {month_name}
            ORDER BY {month_number};
        ",
    },
    Report {
        name: "highest_spending_categories",
        title: "Highest Spending in Travel, Entertainment, and Gifts",
        pattern: ReportPattern::TimeBucketed,
        visualization: Visualization::GroupedBar {
            x: "month",
            y: "total_spent",
            color: "category",
        },
        template: "
            SELECT {month_name} AS month, category, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            WHERE category IN ('Travel', 'Entertainment', 'Gifts')
            GROUP BY {month_number}, {month_name}, category
            ORDER BY total_spent DESC, {month_number}, category ASC;
        ",
    },
    Report {
        name: "transactions_with_cashback",
        title: "Transactions with Cashback",
        pattern: ReportPattern::Listing,
        visualization: Visualization::Table,
        template: "
            SELECT CAST(date AS TEXT) AS date, category, description,
                   CAST(amount_paid AS {real}) AS amount_paid,
                   CAST(cashback AS {real}) AS cashback
            FROM expenses_data
            WHERE cashback > 0
            ORDER BY date ASC, description ASC;
        ",
    },
    Report {
        name: "recurring_expenses_data",
        title: "Recurring Expenses",
        pattern: ReportPattern::TimeBucketed,
        visualization: Visualization::StackedBar {
            x: "month",
            y: "total_spent",
            color: "category",
        },
        template: "
            SELECT {month_name} AS month, category, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            WHERE category IN ('Insurance', 'Property Taxes')
            GROUP BY {month_number}, {month_name}, category
            ORDER BY {month_number}, category ASC;
        ",
    },
    Report {
        name: "monthly_cashback_rewards",
        title: "Monthly Cashback Rewards",
        pattern: ReportPattern::TimeBucketed,
        visualization: Visualization::Line {
            x: "month",
            y: "total_cashback",
        },
        template: "
            SELECT {month_name} AS month, CAST(SUM(cashback) AS {real}) AS total_cashback
            FROM expenses_data
            GROUP BY {month_number}, {month_name}
            ORDER BY {month_number};
        ",
    },
    Report {
        name: "spending_trend",
        title: "Spending Trend Over Time",
        pattern: ReportPattern::TimeBucketed,
        visualization: Visualization::Line {
            x: "month",
            y: "total_spent",
        },
        template: "
            SELECT {month_name} AS month, {year} AS year,
                   CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            GROUP BY {year}, {month_number}, {month_name}
            ORDER BY {year}, {month_number};
        ",
    },
    Report {
        name: "travel_expenses_data",
        title: "Travel Expenses Breakdown",
        pattern: ReportPattern::FilteredSum,
        visualization: Visualization::Table,
        template: "
            SELECT category, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            WHERE category IN ('Travel', 'Transportation')
            GROUP BY category
            ORDER BY total_spent DESC, category ASC;
        ",
    },
    Report {
        name: "grocery_patterns",
        title: "Grocery Spending Patterns",
        pattern: ReportPattern::TimeBucketed,
        visualization: Visualization::Bar {
            x: "day",
            y: "total_spent",
        },
        template: "
            SELECT {weekday_name} AS day, CAST(SUM(amount_paid) AS {real}) AS total_spent
            FROM expenses_data
            WHERE category = 'Groceries'
            GROUP BY {weekday_number}, {weekday_name}
            ORDER BY {weekday_number};
        ",
    },
    Report {
        name: "high_low_priority_categories",
        title: "High and Low Priority Categories",
        pattern: ReportPattern::GroupedSum,
        visualization: Visualization::Table,
        template: "
            SELECT category, CAST(SUM(amount_paid) AS {real}) AS total_spent,
                   CASE
                       WHEN SUM(amount_paid) > 10000 THEN 'High Priority'
                       ELSE 'Low Priority'
                   END AS priority
            FROM expenses_data
            GROUP BY category
            ORDER BY total_spent DESC, category ASC;
        ",
    },
    Report {
        name: "highest_percentage_category",
        title: "Highest Percentage Category",
        pattern: ReportPattern::RankedPercentage,
        visualization: Visualization::Metric {
            label: Some("category"),
            value: "percentage",
        },
        template: "
            SELECT category, CAST(SUM(amount_paid) AS {real}) AS total_spent,
                   {percent_of_total} AS percentage
            FROM expenses_data
            GROUP BY category
            ORDER BY percentage DESC, category ASC
            LIMIT 1;
        ",
    },
];

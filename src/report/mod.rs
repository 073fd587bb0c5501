//! Downloadable expense report.
//!
//! The report is built purely from the dashboard state; no request is made.

mod pdf;

use crate::model::{format_amount, total_spent, Expense, Filter, User};

pub const REPORT_FILENAME: &str = "expense-report.pdf";

/// The content of the report, independent of the output format.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseReport {
    pub title: String,
    pub summary: Vec<String>,
    pub columns: [String; 3],
    pub rows: Vec<[String; 3]>,
}

impl ExpenseReport {
    pub fn build(user: &User, filter: Filter, expenses: &[Expense]) -> Self {
        let symbol = user.currency_symbol();
        let symbol = if pdf::can_encode(&symbol) {
            symbol
        } else {
            format!("{} ", user.currency_code())
        };

        let summary = vec![
            format!("User: {}", user.full_name),
            format!(
                "Total Spent: {}",
                format_amount(total_spent(expenses), &symbol)
            ),
            format!("Report Type: {} Report", filter.label()),
        ];

        let rows = expenses
            .iter()
            .enumerate()
            .map(|(idx, expense)| {
                [
                    (idx + 1).to_string(),
                    expense.category.clone(),
                    expense
                        .amount
                        .map(|amount| format!("{:.2}", amount))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        Self {
            title: "Expense Report".to_string(),
            summary,
            columns: [
                "#".to_string(),
                "Category".to_string(),
                format!("Amount ({})", symbol.trim()),
            ],
            rows,
        }
    }

    pub fn to_pdf(&self) -> Vec<u8> {
        pdf::render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(currency: &str) -> User {
        User {
            id: "u1".to_string(),
            full_name: "Ada Lovelace".to_string(),
            monthly_budget: Some(500.0),
            preferred_currency: Some(currency.to_string()),
        }
    }

    fn expenses() -> Vec<Expense> {
        vec![
            Expense {
                id: "a".to_string(),
                category: "Groceries".to_string(),
                amount: Some(1250.5),
            },
            Expense {
                id: "b".to_string(),
                category: "Broken".to_string(),
                amount: None,
            },
        ]
    }

    #[test]
    fn summary_lines_match_dashboard_state() {
        let report = ExpenseReport::build(&user("USD"), Filter::Weekly, &expenses());

        assert_eq!(report.title, "Expense Report");
        assert_eq!(
            report.summary,
            [
                "User: Ada Lovelace",
                "Total Spent: $1,250.50",
                "Report Type: Weekly Report",
            ]
        );
    }

    #[test]
    fn rows_are_numbered_and_malformed_amounts_shown_as_dash() {
        let report = ExpenseReport::build(&user("USD"), Filter::Monthly, &expenses());

        assert_eq!(
            report.rows,
            [
                ["1".to_string(), "Groceries".to_string(), "1250.50".to_string()],
                ["2".to_string(), "Broken".to_string(), "-".to_string()],
            ]
        );
        assert_eq!(report.columns[2], "Amount ($)");
    }

    #[test]
    fn currency_without_pdf_glyph_uses_code() {
        let report = ExpenseReport::build(&user("INR"), Filter::All, &expenses());

        assert_eq!(report.summary[1], "Total Spent: INR 1,250.50");
        assert_eq!(report.columns[2], "Amount (INR)");
    }

    #[test]
    fn empty_report_has_no_rows() {
        let report = ExpenseReport::build(&user("EUR"), Filter::Daily, &[]);

        assert!(report.rows.is_empty());
        assert_eq!(report.summary[1], "Total Spent: €0.00");
    }
}

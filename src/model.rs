use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// The signed-in user as persisted by the login page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub monthly_budget: Option<f64>,
    #[serde(default)]
    pub preferred_currency: Option<String>,
}

impl User {
    pub fn currency_code(&self) -> &str {
        self.preferred_currency.as_deref().unwrap_or("USD")
    }

    pub fn currency_symbol(&self) -> String {
        currency_symbol_for(self.currency_code())
    }
}

/// One expense record as returned by the backend.
///
/// `amount` is `None` when the server sent a missing, null or non-numeric
/// value. Such entries are still listed but never counted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
}

/// Accepts a JSON number or a numeric string, mapping anything else to `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// The server side aggregation window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    Daily,
    Weekly,
    #[default]
    Monthly,
    All,
}

impl Filter {
    pub const ALL: [Filter; 4] = [Filter::Daily, Filter::Weekly, Filter::Monthly, Filter::All];

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::All => "all",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_query_value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::All => "All",
        }
    }

    /// The filter to switch to when `requested` is picked while `self` is
    /// selected. `None` for the current filter or an unknown value, so no
    /// re-fetch happens.
    pub fn change(self, requested: &str) -> Option<Self> {
        Self::from_query_value(requested).filter(|next| *next != self)
    }
}

/// Sum of every well formed amount in `expenses`.
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .filter_map(|expense| expense.amount)
        .filter(|amount| amount.is_finite())
        .sum()
}

/// How much of the monthly budget the displayed expenses use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BudgetUsage {
    /// No usable budget: missing, zero, negative or not a number.
    Unset,
    Tracked { percent: f64, over_budget: bool },
}

impl BudgetUsage {
    pub fn new(total: f64, budget: Option<f64>) -> Self {
        match budget {
            Some(budget) if budget.is_finite() && budget > 0.0 => BudgetUsage::Tracked {
                percent: total / budget * 100.0,
                over_budget: total > budget,
            },
            _ => BudgetUsage::Unset,
        }
    }

    /// Progress bar width in percent, clamped to `0..=100`.
    pub fn bar_width(&self) -> f64 {
        match self {
            BudgetUsage::Unset => 0.0,
            BudgetUsage::Tracked { percent, .. } => percent.clamp(0.0, 100.0),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        matches!(
            self,
            BudgetUsage::Tracked {
                over_budget: true,
                ..
            }
        )
    }

    pub fn label(&self) -> String {
        match self {
            BudgetUsage::Unset => "No monthly budget set".to_string(),
            BudgetUsage::Tracked { percent, .. } => format!("{:.1}% Spent", percent),
        }
    }
}

/// The raw contents of the add-expense form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub category: String,
    pub amount: String,
}

/// A validated add-expense request.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub category: String,
    pub amount: f64,
}

impl ExpenseForm {
    pub fn validate(&self) -> Result<NewExpense, Error> {
        let category = self.category.trim();
        let amount = self.amount.trim();

        if category.is_empty() {
            return Err(Error::MissingField("category"));
        }
        if amount.is_empty() {
            return Err(Error::MissingField("amount"));
        }

        let parsed = amount
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| Error::InvalidAmount(amount.to_string()))?;

        Ok(NewExpense {
            category: category.to_string(),
            amount: parsed,
        })
    }
}

pub fn currency_symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "INR" => "₹".to_string(),
        "PHP" => "₱".to_string(),
        other => format!("{} ", other),
    }
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Formats `amount` with two decimals and thousands separators, e.g. `$1,234.50`.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        format_with_commas(cents / 100),
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picking_a_new_filter_changes_it() {
        assert_eq!(Filter::Monthly.change("weekly"), Some(Filter::Weekly));
        assert_eq!(Filter::All.change("daily"), Some(Filter::Daily));
    }

    #[test]
    fn picking_the_current_filter_is_a_no_op() {
        for filter in Filter::ALL {
            assert_eq!(filter.change(filter.as_query_value()), None);
        }
    }

    #[test]
    fn unknown_filter_value_is_ignored() {
        assert_eq!(Filter::Monthly.change("yearly"), None);
        assert_eq!(Filter::Monthly.change("Weekly"), None);
    }

    #[test]
    fn total_skips_malformed_amounts() {
        let expenses: Vec<Expense> =
            serde_json::from_str(r#"[{"_id":"a","category":"Food","amount":10},{"_id":"b","category":"Rent"}]"#)
                .unwrap();

        assert_eq!(total_spent(&expenses), 10.0);
    }

    #[test]
    fn total_of_empty_list_is_zero() {
        assert_eq!(total_spent(&[]), 0.0);
    }

    #[test]
    fn amount_accepts_numeric_strings_and_rejects_garbage() {
        let expenses: Vec<Expense> = serde_json::from_str(
            r#"[
                {"_id":"a","category":"Food","amount":"12.5"},
                {"_id":"b","category":"Food","amount":"twelve"},
                {"_id":"c","category":"Food","amount":null},
                {"id":"d","category":"Food","amount":7.25}
            ]"#,
        )
        .unwrap();

        assert_eq!(expenses[0].amount, Some(12.5));
        assert_eq!(expenses[1].amount, None);
        assert_eq!(expenses[2].amount, None);
        assert_eq!(expenses[3].id, "d");
        assert_eq!(total_spent(&expenses), 19.75);
    }

    #[test]
    fn expense_without_id_fails_to_decode() {
        let result = serde_json::from_str::<Expense>(r#"{"category":"Food","amount":1}"#);

        assert!(result.is_err());
    }

    #[test]
    fn user_decodes_from_login_record() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","fullName":"Ada Lovelace","monthlyBudget":1500,"preferredCurrency":"EUR"}"#,
        )
        .unwrap();

        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.monthly_budget, Some(1500.0));
        assert_eq!(user.currency_symbol(), "€");
    }

    #[test]
    fn filter_round_trips_query_values() {
        for filter in Filter::ALL {
            assert_eq!(Filter::from_query_value(filter.as_query_value()), Some(filter));
        }
        assert_eq!(Filter::from_query_value("yearly"), None);
        assert_eq!(Filter::default(), Filter::Monthly);
    }

    #[test]
    fn budget_usage_is_unset_for_zero_or_missing_budget() {
        assert_eq!(BudgetUsage::new(50.0, None), BudgetUsage::Unset);
        assert_eq!(BudgetUsage::new(50.0, Some(0.0)), BudgetUsage::Unset);
        assert_eq!(BudgetUsage::new(50.0, Some(-10.0)), BudgetUsage::Unset);
        assert_eq!(BudgetUsage::Unset.bar_width(), 0.0);
        assert!(!BudgetUsage::Unset.is_over_budget());
    }

    #[test]
    fn budget_usage_clamps_bar_but_not_label() {
        let usage = BudgetUsage::new(150.0, Some(100.0));

        assert!(usage.is_over_budget());
        assert_eq!(usage.bar_width(), 100.0);
        assert_eq!(usage.label(), "150.0% Spent");
    }

    #[test]
    fn budget_usage_exactly_at_budget_is_not_over() {
        let usage = BudgetUsage::new(100.0, Some(100.0));

        assert!(!usage.is_over_budget());
    }

    #[test]
    fn form_requires_both_fields() {
        let missing_category = ExpenseForm {
            category: "  ".to_string(),
            amount: "4".to_string(),
        };
        let missing_amount = ExpenseForm {
            category: "Food".to_string(),
            amount: "".to_string(),
        };

        assert_eq!(missing_category.validate(), Err(Error::MissingField("category")));
        assert_eq!(missing_amount.validate(), Err(Error::MissingField("amount")));
    }

    #[test]
    fn form_rejects_non_numeric_amount() {
        let form = ExpenseForm {
            category: "Food".to_string(),
            amount: "lots".to_string(),
        };

        assert_eq!(form.validate(), Err(Error::InvalidAmount("lots".to_string())));
    }

    #[test]
    fn form_trims_and_parses() {
        let form = ExpenseForm {
            category: " Groceries ".to_string(),
            amount: " 12.40".to_string(),
        };

        assert_eq!(
            form.validate(),
            Ok(NewExpense {
                category: "Groceries".to_string(),
                amount: 12.4,
            })
        );
    }

    #[test]
    fn formats_amounts_with_separators() {
        assert_eq!(format_amount(1234.5, "$"), "$1,234.50");
        assert_eq!(format_amount(0.0, "$"), "$0.00");
        assert_eq!(format_amount(-5.0, "€"), "-€5.00");
        assert_eq!(format_amount(1_000_000.0, "XYZ "), "XYZ 1,000,000.00");
    }

    #[test]
    fn unknown_currency_uses_code() {
        assert_eq!(currency_symbol_for("CAD"), "CAD ");
    }
}

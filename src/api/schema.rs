//! Request and response bodies for each endpoint, and the status rules that
//! decide whether a response counts as a success.

use serde::{Deserialize, Serialize};

use crate::{error::Error, model::Expense};

// ============ Requests ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExpenseRequest<'a> {
    pub user_id: &'a str,
    pub category: &'a str,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest<'a> {
    pub user_id: &'a str,
    pub data: &'a str,
}

// ============ Responses ============

#[derive(Debug, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseResponse {
    pub expense: Expense,
}

/// A scan may create one expense or several (e.g. one per receipt line).
#[derive(Debug, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub expenses: Option<Vec<Expense>>,
    #[serde(default)]
    pub expense: Option<Expense>,
}

impl ScanResponse {
    pub fn into_expenses(self) -> Result<Vec<Expense>, Error> {
        match (self.expenses, self.expense) {
            (Some(expenses), _) => Ok(expenses),
            (None, Some(expense)) => Ok(vec![expense]),
            (None, None) => Err(Error::Decode(
                "scan response holds neither `expenses` nor `expense`".to_string(),
            )),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ============ Status handling ============

/// The statuses an endpoint accepts as success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expect {
    /// Any 2xx status.
    Success,
    /// Exactly this status, e.g. 201 for a created scan.
    Status(u16),
}

impl Expect {
    pub fn accepts(self, status: u16) -> bool {
        match self {
            Expect::Success => (200..300).contains(&status),
            Expect::Status(expected) => status == expected,
        }
    }
}

/// Turn a response that fails `expect` into [Error::Server], carrying the
/// server's `message` when the body has one.
pub fn check_status(status: u16, body: &str, expect: Expect) -> Result<(), Error> {
    if expect.accepts(status) {
        return Ok(());
    }

    let message = serde_json::from_str::<ErrorResponse>(body)
        .unwrap_or_default()
        .message;

    Err(Error::Server { status, message })
}

pub fn decode<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, Error> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_requires_expenses_field() {
        let ok = decode::<ExpenseListResponse>(r#"{"expenses":[{"_id":"1","category":"Food","amount":3}]}"#);
        let missing = decode::<ExpenseListResponse>(r#"{"items":[]}"#);

        assert_eq!(ok.unwrap().expenses.len(), 1);
        assert!(matches!(missing, Err(Error::Decode(_))));
    }

    #[test]
    fn scan_response_prefers_expense_list() {
        let response = decode::<ScanResponse>(
            r#"{"expenses":[{"_id":"1","category":"Milk","amount":2},{"_id":"2","category":"Bread","amount":3}],
                "expense":{"_id":"3","category":"Ignored","amount":9}}"#,
        )
        .unwrap();

        let ids: Vec<String> = response
            .into_expenses()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn scan_response_with_single_expense() {
        let response = decode::<ScanResponse>(r#"{"expense":{"_id":"9","category":"Taxi","amount":14}}"#).unwrap();

        assert_eq!(response.into_expenses().unwrap()[0].category, "Taxi");
    }

    #[test]
    fn empty_scan_response_is_a_decode_error() {
        let response = decode::<ScanResponse>(r#"{"message":"ok"}"#).unwrap();

        assert!(matches!(response.into_expenses(), Err(Error::Decode(_))));
    }

    #[test]
    fn exact_status_rejects_other_successes() {
        assert_eq!(check_status(201, "", Expect::Status(201)), Ok(()));
        assert_eq!(
            check_status(200, r#"{"message":"Nothing parsed"}"#, Expect::Status(201)),
            Err(Error::Server {
                status: 200,
                message: Some("Nothing parsed".to_string()),
            })
        );
    }

    #[test]
    fn failure_without_json_body_has_no_message() {
        assert_eq!(
            check_status(502, "<html>Bad Gateway</html>", Expect::Success),
            Err(Error::Server {
                status: 502,
                message: None,
            })
        );
        assert_eq!(check_status(204, "", Expect::Success), Ok(()));
    }

    #[test]
    fn add_request_uses_camel_case() {
        let body = serde_json::to_value(AddExpenseRequest {
            user_id: "u1",
            category: "Food",
            amount: 4.5,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"userId": "u1", "category": "Food", "amount": 4.5}));
    }
}

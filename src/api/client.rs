//! HTTP API Client
//!
//! One method per backend endpoint. Every response body is read as text and
//! decoded into its schema, so a malformed payload surfaces as
//! [Error::Decode] instead of an empty field.

use gloo_net::http::{Request, RequestBuilder, Response};

use super::schema::{
    check_status, decode, AddExpenseRequest, Expect, ExpenseListResponse, ExpenseResponse,
    ScanRequest, ScanResponse,
};
use crate::{
    config::AppConfig,
    error::Error,
    model::{Expense, Filter, NewExpense},
    session::Session,
};

/// Client bound to one backend and one signed-in user.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseApi {
    base_url: String,
    user_id: String,
    token: Option<String>,
}

impl ExpenseApi {
    pub fn new(config: &AppConfig, session: &Session) -> Self {
        Self {
            base_url: config.backend_url.clone(),
            user_id: session.user.id.clone(),
            token: session.token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// `GET /api/expenses/{userId}?filter=…`
    pub async fn fetch_expenses(&self, filter: Filter) -> Result<Vec<Expense>, Error> {
        let url = self.url(&format!(
            "/api/expenses/{}?filter={}",
            urlencoding::encode(&self.user_id),
            filter.as_query_value()
        ));

        let response = Request::get(&url).send().await?;
        let body = read_body(response, Expect::Success).await?;

        Ok(decode::<ExpenseListResponse>(&body)?.expenses)
    }

    /// `POST /api/expenses/add`, returning the stored record.
    pub async fn add_expense(&self, expense: &NewExpense) -> Result<Expense, Error> {
        let payload = AddExpenseRequest {
            user_id: &self.user_id,
            category: &expense.category,
            amount: expense.amount,
        };

        let response = self
            .authorize(Request::post(&self.url("/api/expenses/add")))
            .json(&payload)?
            .send()
            .await?;
        let body = read_body(response, Expect::Success).await?;

        Ok(decode::<ExpenseResponse>(&body)?.expense)
    }

    /// `POST /api/expenses/scan`. Only `201 Created` counts as success.
    pub async fn submit_scan(&self, data: &str) -> Result<Vec<Expense>, Error> {
        let payload = ScanRequest {
            user_id: &self.user_id,
            data,
        };

        let response = self
            .authorize(Request::post(&self.url("/api/expenses/scan")))
            .json(&payload)?
            .send()
            .await?;
        let body = read_body(response, Expect::Status(201)).await?;

        decode::<ScanResponse>(&body)?.into_expenses()
    }

    /// `DELETE /api/expenses/{id}`
    pub async fn delete_expense(&self, id: &str) -> Result<(), Error> {
        let url = self.url(&format!("/api/expenses/{}", urlencoding::encode(id)));

        let response = self.authorize(Request::delete(&url)).send().await?;
        read_body(response, Expect::Success).await?;

        Ok(())
    }

    /// `DELETE /api/expenses/all/{userId}`. Only `200 OK` counts as success.
    pub async fn delete_all_expenses(&self) -> Result<(), Error> {
        let url = self.url(&format!(
            "/api/expenses/all/{}",
            urlencoding::encode(&self.user_id)
        ));

        let response = self.authorize(Request::delete(&url)).send().await?;
        read_body(response, Expect::Status(200)).await?;

        Ok(())
    }
}

async fn read_body(response: Response, expect: Expect) -> Result<String, Error> {
    let status = response.status();
    // An unreadable body on a failed response still reports the status.
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) if !expect.accepts(status) => {
            log::debug!("could not read error body: {}", e);
            String::new()
        }
        Err(e) => return Err(e.into()),
    };

    check_status(status, &body, expect)?;
    Ok(body)
}

//! REST client for the expense backend.

mod client;
mod schema;

pub use client::ExpenseApi;

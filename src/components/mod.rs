mod add_expense;
mod dashboard;
mod expense_history;
mod expense_overview;
mod icons;
mod modal;
mod notice_toast;
mod qr_scanner;
mod scan_review;

pub use dashboard::Dashboard;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{
    add_expense::AddExpenseForm,
    expense_history::ExpenseHistory,
    expense_overview::ExpenseOverview,
    icons::{icon_download, icon_log_out},
    notice_toast::NoticeToast,
    qr_scanner::QrScanner,
    scan_review::ScanReview,
};
use crate::{
    app::AppContext,
    browser,
    draft::{DraftAction, ExpenseDraft},
    error::Error,
    ledger::{FetchTicket, Ledger, LedgerAction},
    model::{format_amount, total_spent, BudgetUsage, ExpenseForm, Filter},
    notice::{NoticeBoard, Notifier},
    report::{ExpenseReport, REPORT_FILENAME},
    scan::{ScanAction, ScanEvent, ScanWorkflow},
    session::Session,
};

/// Renders the dashboard for the session provided by `App`.
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let app = use_context::<AppContext>();

    match app {
        Some(app) => html! { <DashboardView app={app} /> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct DashboardViewProps {
    app: AppContext,
}

#[function_component(DashboardView)]
fn dashboard_view(props: &DashboardViewProps) -> Html {
    let app = &props.app;

    let ledger = use_reducer(Ledger::default);
    let filter = use_state(Filter::default);
    let draft = use_reducer(ExpenseDraft::default);
    let scan = use_reducer(ScanWorkflow::default);
    let notices = use_reducer(NoticeBoard::default);
    let logging_out = use_state(|| false);

    let api = app.api();
    let notifier = Notifier::new(notices.clone(), app.config.notice_timeout_ms);
    let user = &app.session.user;
    let currency_symbol = user.currency_symbol();

    // Responses for a filter that is no longer selected are dropped.
    {
        let ledger = ledger.clone();
        let api = api.clone();
        let notifier = notifier.clone();
        use_effect_with_deps(
            move |filter: &Filter| {
                let filter = *filter;
                let ticket = FetchTicket::issue();
                {
                    let ticket = ticket.clone();
                    spawn_local(async move {
                        match api.fetch_expenses(filter).await {
                            Ok(expenses) => match ticket.replace(expenses) {
                                Some(action) => ledger.dispatch(action),
                                None => log::debug!("dropping stale {} expenses", filter.as_query_value()),
                            },
                            Err(e) => {
                                log::error!("GET expenses ({}) failed: {}", filter.as_query_value(), e);
                                if ticket.is_current() {
                                    notifier.error("Failed to fetch expenses. Please try again later.");
                                }
                            }
                        }
                    });
                }
                move || ticket.retire()
            },
            *filter,
        );
    }

    // One request per Reviewing -> Submitting transition.
    {
        let submission = scan.submission;
        let scan = scan.clone();
        let ledger = ledger.clone();
        let api = api.clone();
        let notifier = notifier.clone();
        use_effect_with_deps(
            move |_| {
                let pending = scan.pending_submission().map(str::to_string);
                if let Some(data) = pending {
                    spawn_local(async move {
                        match api.submit_scan(&data).await {
                            Ok(created) => {
                                ledger.dispatch(LedgerAction::Append(created));
                                notifier.success(
                                    "Expense Added",
                                    "The scanned expense has been added successfully!",
                                    2000,
                                );
                            }
                            Err(e) => {
                                log::error!("POST /api/expenses/scan failed: {}", e);
                                notifier.error(&e.user_message("Failed to add expense to the database."));
                            }
                        }
                        scan.dispatch(ScanAction::Resolved);
                    });
                }
                || ()
            },
            submission,
        );
    }

    let on_form_change = {
        let draft = draft.clone();
        Callback::from(move |next: ExpenseForm| draft.dispatch(DraftAction::Edit(next)))
    };

    let on_add = {
        let draft = draft.clone();
        let ledger = ledger.clone();
        let api = api.clone();
        let notifier = notifier.clone();
        Callback::from(move |_: ()| {
            if draft.saving {
                return;
            }
            let new_expense = match draft.form.validate() {
                Ok(new_expense) => new_expense,
                Err(Error::MissingField(_)) => {
                    notifier.warning("Incomplete Fields", "Please fill in all fields to add a new expense.");
                    return;
                }
                Err(e) => {
                    notifier.warning("Invalid Amount", &format!("{}.", e));
                    return;
                }
            };

            draft.dispatch(DraftAction::Start);
            let draft = draft.clone();
            let ledger = ledger.clone();
            let api = api.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match api.add_expense(&new_expense).await {
                    Ok(expense) => {
                        ledger.dispatch(LedgerAction::Append(vec![expense]));
                        draft.dispatch(DraftAction::Added);
                        notifier.success("Expense Added", "Your expense has been successfully added.", 2000);
                    }
                    Err(e) => {
                        log::error!("POST /api/expenses/add failed: {}", e);
                        draft.dispatch(DraftAction::Failed);
                        notifier.error(&e.user_message("Failed to add expense."));
                    }
                }
            });
        })
    };

    let on_delete = {
        let ledger = ledger.clone();
        let api = api.clone();
        let notifier = notifier.clone();
        Callback::from(move |id: String| {
            if !browser::confirm("Are you sure? Do you really want to delete this expense?") {
                return;
            }
            let ledger = ledger.clone();
            let api = api.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match api.delete_expense(&id).await {
                    Ok(()) => {
                        ledger.dispatch(LedgerAction::Remove(id));
                        notifier.success("Deleted!", "Your expense has been deleted.", 1500);
                    }
                    Err(e) => {
                        log::error!("DELETE /api/expenses/{} failed: {}", id, e);
                        notifier.error("Failed to delete expense. Please try again later.");
                    }
                }
            });
        })
    };

    let on_delete_all = {
        let ledger = ledger.clone();
        let api = api.clone();
        let notifier = notifier.clone();
        Callback::from(move |_: ()| {
            let ledger = ledger.clone();
            let api = api.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match api.delete_all_expenses().await {
                    Ok(()) => {
                        ledger.dispatch(LedgerAction::Clear);
                        notifier.success("Deleted!", "All your expenses have been deleted successfully.", 2000);
                    }
                    Err(e) => {
                        log::error!("DELETE /api/expenses/all failed: {}", e);
                        notifier.error(&e.user_message("Failed to delete all expenses."));
                    }
                }
            });
        })
    };

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Some(next) = filter.change(&select.value()) {
                filter.set(next);
            }
        })
    };

    let on_download = {
        let user = user.clone();
        let filter = *filter;
        let ledger = ledger.clone();
        let notifier = notifier.clone();
        Callback::from(move |_: MouseEvent| {
            let report = ExpenseReport::build(&user, filter, &ledger.expenses);
            match browser::download(REPORT_FILENAME, "application/pdf", &report.to_pdf()) {
                Ok(()) => log::info!("generated {} with {} rows", REPORT_FILENAME, report.rows.len()),
                Err(e) => {
                    log::error!("{}", e);
                    notifier.error("Could not generate the report. Please try again.");
                }
            }
        })
    };

    let on_logout = {
        let logging_out = logging_out.clone();
        let delay_ms = app.config.logout_delay_ms;
        Callback::from(move |_: MouseEvent| {
            if !browser::confirm("Are you sure you want to logout?") {
                return;
            }
            log::info!("logging out");
            logging_out.set(true);
            Timeout::new(delay_ms, || {
                if let Err(e) = Session::clear_persisted() {
                    log::error!("{}", e);
                }
                browser::redirect("/");
            })
            .forget();
        })
    };

    let scan_callback = |action: fn() -> ScanAction| {
        let scan = scan.clone();
        Callback::from(move |_: ()| scan.dispatch(action()))
    };
    let on_open_scanner = scan_callback(|| ScanAction::Open);
    let on_scan_cancel = scan_callback(|| ScanAction::Cancel);
    let on_scan_edit = scan_callback(|| ScanAction::Edit);
    let on_scan_submit = scan_callback(|| ScanAction::Submit);
    let on_scan_event = {
        let scan = scan.clone();
        Callback::from(move |event: ScanEvent| scan.dispatch(ScanAction::Event(event)))
    };
    let on_scan_draft = {
        let scan = scan.clone();
        Callback::from(move |draft: String| scan.dispatch(ScanAction::UpdateDraft(draft)))
    };

    let on_dismiss_notice = {
        let notifier = notifier.clone();
        Callback::from(move |id: u32| notifier.dismiss(id))
    };

    let total = total_spent(&ledger.expenses);
    let usage = BudgetUsage::new(total, user.monthly_budget);
    let bar_class = if usage.is_over_budget() {
        "h-full bg-red-500 rounded-full transition-all"
    } else {
        "h-full bg-[#1D617A] rounded-full transition-all"
    };
    let monthly_budget = user
        .monthly_budget
        .map(|budget| format_amount(budget, &currency_symbol))
        .unwrap_or_else(|| "Not set".to_string());

    html! {
        <div class="min-h-screen bg-background">
            <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
                <h1 class="text-[#173E63] font-bold text-lg">{"Dashboard"}</h1>
                <button onclick={on_logout} class="flex items-center gap-3 px-4 py-2 rounded-xl hover:bg-white/40 transition-colors text-[13px] font-medium text-[#173E63]">
                    { icon_log_out() }
                    {"Logout"}
                </button>
            </header>

            <main class="max-w-6xl mx-auto p-6 space-y-6">
                <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border space-y-4">
                    <div class="flex flex-wrap items-start justify-between gap-4">
                        <div class="space-y-1">
                            <h2 class="text-2xl font-bold text-foreground">{ format!("Welcome, {}!", user.full_name) }</h2>
                            <p class="text-sm text-muted-foreground">{ format!("Monthly Budget: {}", monthly_budget) }</p>
                            <p class="text-sm text-muted-foreground">{ format!("Preferred Currency: {}", user.currency_code()) }</p>
                            <p class="text-sm text-muted-foreground">{ format!("Total Spent: {}", format_amount(total, &currency_symbol)) }</p>
                        </div>
                        <div class="flex items-center gap-3">
                            <select onchange={on_filter} class="bg-[#f1f4f9] border-2 border-transparent rounded-[10px] px-3 py-2 text-[12px] focus:ring-2 focus:ring-[#1D617A] outline-none">
                                {
                                    Filter::ALL.iter().map(|option| html! {
                                        <option value={option.as_query_value()} selected={*option == *filter}>{ option.label() }</option>
                                    }).collect::<Html>()
                                }
                            </select>
                            <button onclick={on_download} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[11px] font-bold">
                                { icon_download() }
                                {"Download Report"}
                            </button>
                        </div>
                    </div>
                    <div class="space-y-2">
                        <div class="flex justify-between text-sm">
                            <span class={if usage.is_over_budget() { "font-bold text-red-600" } else { "text-muted-foreground" }}>{ usage.label() }</span>
                            if usage.is_over_budget() {
                                <span class="text-sm font-bold text-red-600">{"Over budget"}</span>
                            }
                        </div>
                        <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                            <div class={bar_class} style={format!("width: {:.1}%", usage.bar_width())}></div>
                        </div>
                    </div>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <AddExpenseForm
                        form={draft.form.clone()}
                        currency_symbol={currency_symbol.clone()}
                        saving={draft.saving}
                        on_change={on_form_change}
                        on_submit={on_add}
                        on_scan={on_open_scanner}
                    />
                    <ExpenseOverview expenses={ledger.expenses.clone()} currency_symbol={currency_symbol.clone()} />
                </div>

                <ExpenseHistory
                    expenses={ledger.expenses.clone()}
                    currency_symbol={currency_symbol.clone()}
                    on_delete={on_delete}
                    on_delete_all={on_delete_all}
                />
            </main>

            if scan.is_scanner_open() {
                <QrScanner error={scan.scanner_error()} on_event={on_scan_event} on_cancel={on_scan_cancel.clone()} />
            }
            if let Some(review) = scan.review() {
                <ScanReview
                    review={review.clone()}
                    submitting={scan.is_submitting()}
                    on_edit={on_scan_edit}
                    on_draft={on_scan_draft}
                    on_cancel={on_scan_cancel}
                    on_submit={on_scan_submit}
                />
            }

            <NoticeToast notice={notices.current.clone()} on_dismiss={on_dismiss_notice} />

            if *logging_out {
                <div class="fixed inset-0 z-50 flex flex-col items-center justify-center bg-[#173E63]/80 text-white gap-4">
                    <span class="w-10 h-10 border-4 border-white border-t-transparent rounded-full animate-spin"></span>
                    <p class="text-lg font-bold">{"Logging out..."}</p>
                </div>
            }
        </div>
    }
}

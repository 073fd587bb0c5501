use yew::prelude::*;

use super::{icons::icon_trash, modal::modal_shell};
use crate::model::{format_amount, Expense};

/// The phrase the user must type before every expense is deleted.
pub const CONFIRMATION_PHRASE: &str = "delete";

/// Case sensitive and untrimmed: only the exact phrase passes.
pub fn confirmation_matches(input: &str) -> bool {
    input == CONFIRMATION_PHRASE
}

#[derive(Properties, PartialEq)]
pub struct ExpenseHistoryProps {
    pub expenses: Vec<Expense>,
    pub currency_symbol: String,
    pub on_delete: Callback<String>,
    pub on_delete_all: Callback<()>,
}

#[function_component(ExpenseHistory)]
pub fn expense_history(props: &ExpenseHistoryProps) -> Html {
    let show_modal = use_state(|| false);
    let confirmation = use_state(String::new);
    let error = use_state(|| None::<String>);

    let open_modal = {
        let show_modal = show_modal.clone();
        let confirmation = confirmation.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            confirmation.set(String::new());
            error.set(None);
            show_modal.set(true);
        })
    };

    let close_modal = {
        let show_modal = show_modal.clone();
        let confirmation = confirmation.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            confirmation.set(String::new());
            error.set(None);
            show_modal.set(false);
        })
    };

    let on_confirmation = {
        let confirmation = confirmation.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            confirmation.set(input.value());
        })
    };

    let on_confirm = {
        let show_modal = show_modal.clone();
        let confirmation = confirmation.clone();
        let error = error.clone();
        let on_delete_all = props.on_delete_all.clone();
        Callback::from(move |_: MouseEvent| {
            if !confirmation_matches(&confirmation) {
                error.set(Some("Please type \"delete\" to confirm.".to_string()));
                return;
            }
            on_delete_all.emit(());
            confirmation.set(String::new());
            error.set(None);
            show_modal.set(false);
        })
    };

    let rows = if props.expenses.is_empty() {
        html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"No expenses found."}</td></tr> }
    } else {
        props
            .expenses
            .iter()
            .enumerate()
            .map(|(idx, expense)| {
                let on_delete = {
                    let id = expense.id.clone();
                    let on_delete = props.on_delete.clone();
                    Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                };
                let amount = expense
                    .amount
                    .map(|amount| format_amount(amount, &props.currency_symbol))
                    .unwrap_or_else(|| "-".to_string());

                html! {
                    <tr key={expense.id.clone()} class="text-sm hover:bg-muted/40 transition-colors group">
                        <td class="px-8 py-4 text-muted-foreground">{ (idx + 1).to_string() }</td>
                        <td class="px-8 py-4">
                            <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[9px] font-bold">{ expense.category.clone() }</span>
                        </td>
                        <td class="px-8 py-4 text-right font-bold text-foreground">{ amount }</td>
                        <td class="px-8 py-4 text-right">
                            <button onclick={on_delete} class="p-2 rounded-lg text-red-500 hover:bg-red-50" aria-label="Delete expense">
                                { icon_trash() }
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect::<Html>()
    };

    let modal = if *show_modal {
        let body = html! {
            <div class="space-y-3">
                <p class="text-sm text-muted-foreground">
                    {"This will permanently remove every expense. Type "}
                    <span class="font-bold text-foreground">{ CONFIRMATION_PHRASE }</span>
                    {" to confirm."}
                </p>
                <input type="text" value={(*confirmation).clone()} oninput={on_confirmation}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                {
                    if let Some(msg) = &*error {
                        html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
        };
        let footer = html! {
            <>
                <button type="button" onclick={close_modal.clone()} class="px-4 py-2 rounded-[10px] bg-secondary text-secondary-foreground text-sm font-bold">{"Cancel"}</button>
                <button type="button" onclick={on_confirm} class="px-4 py-2 rounded-[10px] bg-red-600 text-white text-sm font-bold">{"Delete All"}</button>
            </>
        };
        modal_shell("Delete All Expenses", close_modal, body, footer)
    } else {
        html! {}
    };

    html! {
        <div class="bg-white rounded-2xl shadow-md border border-border overflow-hidden">
            <div class="p-5 border-b border-border flex items-center justify-between">
                <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Expense History"}</h4>
                <button onclick={open_modal} class="flex items-center gap-2 px-4 py-2 rounded-[10px] bg-red-600 text-white text-[11px] font-bold">
                    { icon_trash() }
                    {"Delete All Expenses"}
                </button>
            </div>
            <div class="overflow-x-auto">
                <table class="w-full text-left border-collapse">
                    <thead>
                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                            <th class="px-8 py-4 font-bold">{"#"}</th>
                            <th class="px-8 py-4 font-bold">{"Category"}</th>
                            <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                            <th class="px-8 py-4 font-bold text-right">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        { rows }
                    </tbody>
                </table>
            </div>
            { modal }
        </div>
    }
}

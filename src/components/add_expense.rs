use yew::prelude::*;

use super::icons::icon_qr_code;
use crate::model::ExpenseForm;

#[derive(Properties, PartialEq)]
pub struct AddExpenseFormProps {
    pub form: ExpenseForm,
    pub currency_symbol: String,
    pub saving: bool,
    pub on_change: Callback<ExpenseForm>,
    pub on_submit: Callback<()>,
    pub on_scan: Callback<()>,
}

#[function_component(AddExpenseForm)]
pub fn add_expense_form(props: &AddExpenseFormProps) -> Html {
    let on_category = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_change.emit(ExpenseForm {
                category: input.value(),
                ..form.clone()
            });
        })
    };

    let on_amount = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_change.emit(ExpenseForm {
                amount: input.value(),
                ..form.clone()
            });
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_scan = {
        let on_scan = props.on_scan.clone();
        Callback::from(move |_: MouseEvent| on_scan.emit(()))
    };

    html! {
        <div class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50">
            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Add New Expense"}</h4>
            <form onsubmit={on_submit} class="space-y-3">
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                    <input type="text" placeholder="e.g. Groceries" value={props.form.category.clone()} oninput={on_category}
                        class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground">{ format!("Amount ({})", props.currency_symbol.trim()) }</label>
                    <input type="number" step="0.01" placeholder={format!("{}0.00", props.currency_symbol)} value={props.form.amount.clone()} oninput={on_amount}
                        class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                </div>
                <div class="flex gap-3">
                    <button type="submit" class="flex-1 bg-[#173E63] text-white py-2 rounded-[10px] text-[10px] font-bold flex items-center justify-center gap-2" disabled={props.saving}>
                        { if props.saving { "Saving..." } else { "Add Expense" } }
                    </button>
                    <button type="button" onclick={on_scan} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-[10px] font-bold flex items-center justify-center gap-2">
                        { icon_qr_code() }
                        {"Scan QR Code"}
                    </button>
                </div>
            </form>
        </div>
    }
}

use yew::prelude::*;

use super::modal::modal_shell;
use crate::scan::Review;

#[derive(Properties, PartialEq)]
pub struct ScanReviewProps {
    pub review: Review,
    pub submitting: bool,
    pub on_edit: Callback<()>,
    pub on_draft: Callback<String>,
    pub on_cancel: Callback<()>,
    pub on_submit: Callback<()>,
}

#[function_component(ScanReview)]
pub fn scan_review(props: &ScanReviewProps) -> Html {
    let on_close = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };
    let on_edit = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(()))
    };
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| on_submit.emit(()))
    };
    let on_draft = {
        let on_draft = props.on_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            on_draft.emit(input.value());
        })
    };

    let body = if props.review.editing {
        html! {
            <textarea rows="6" value={props.review.draft.clone()} oninput={on_draft} disabled={props.submitting}
                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none font-mono"></textarea>
        }
    } else {
        html! {
            <div class="space-y-2">
                <p class="text-[12px] font-bold text-muted-foreground">{"Scanned data"}</p>
                <pre class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] whitespace-pre-wrap break-all">{ props.review.draft.clone() }</pre>
            </div>
        }
    };

    let submit_label = if props.submitting {
        html! {
            <>
                <span class="w-4 h-4 border-2 border-white border-t-transparent rounded-full animate-spin"></span>
                {"Adding..."}
            </>
        }
    } else {
        html! { {"Update Expense"} }
    };

    let footer = html! {
        <>
            <button type="button" onclick={on_close.clone()} disabled={props.submitting}
                class="px-4 py-2 rounded-[10px] bg-secondary text-secondary-foreground text-sm font-bold">{"Cancel"}</button>
            if !props.review.editing {
                <button type="button" onclick={on_edit}
                    class="px-4 py-2 rounded-[10px] bg-[#B2CBDE] text-[#173E63] text-sm font-bold">{"Edit"}</button>
            }
            <button type="button" onclick={on_submit} disabled={props.submitting}
                class="px-4 py-2 rounded-[10px] bg-[#173E63] text-white text-sm font-bold flex items-center gap-2">{ submit_label }</button>
        </>
    };

    modal_shell("Scan Result", on_close, body, footer)
}

use yew::prelude::*;

use crate::notice::{Notice, NoticeKind};

#[derive(Properties, PartialEq)]
pub struct NoticeToastProps {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(NoticeToast)]
pub fn notice_toast(props: &NoticeToastProps) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };

    let accent = match notice.kind {
        NoticeKind::Success => "border-green-500 bg-green-50 text-green-800",
        NoticeKind::Warning => "border-amber-500 bg-amber-50 text-amber-800",
        NoticeKind::Error => "border-red-500 bg-red-50 text-red-800",
    };
    let on_close = {
        let id = notice.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class="fixed top-6 right-6 z-50 w-80" role="alert">
            <div class={format!("border-l-4 rounded-[10px] shadow-lg p-4 flex items-start gap-3 {}", accent)}>
                <div class="flex-1">
                    <p class="font-bold text-sm">{ notice.title.clone() }</p>
                    <p class="text-sm mt-1">{ notice.text.clone() }</p>
                </div>
                <button type="button" onclick={on_close} class="text-xs font-bold opacity-60 hover:opacity-100">{"OK"}</button>
            </div>
        </div>
    }
}

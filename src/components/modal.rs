use yew::prelude::*;

use super::icons::icon_close;

/// Centered dialog over a dimmed backdrop. Clicking the backdrop does not
/// close it; only `on_close` (the header cross) does.
pub fn modal_shell(
    title: &'static str,
    on_close: Callback<MouseEvent>,
    body: Html,
    footer: Html,
) -> Html {
    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/50 p-4" role="dialog" aria-modal="true">
            <div class="w-full max-w-lg bg-card rounded-[10px] shadow-lg border border-border overflow-hidden">
                <div class="px-6 py-4 border-b border-border flex items-center justify-between">
                    <h3 class="font-bold text-foreground text-lg">{ title }</h3>
                    <button type="button" class="p-1 rounded-full hover:bg-secondary" aria-label="Close" onclick={on_close}>
                        { icon_close() }
                    </button>
                </div>
                <div class="px-6 py-4">{ body }</div>
                <div class="px-6 py-4 border-t border-border flex justify-end gap-3">{ footer }</div>
            </div>
        </div>
    }
}

use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-md border px-3 py-2 text-sm"}
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

pub use components::*;

/// Inline error line for forms and panels.
#[component]
pub fn ErrorAlert(#[prop(into)] message: String, #[prop(into, optional)] class: String) -> impl IntoView {
    let class = tw_merge!("border-destructive/30", class);
    view! {
        <Alert class=class attr:role="alert">
            <AlertDescription class="text-destructive text-xs whitespace-pre-wrap">{message}</AlertDescription>
        </Alert>
    }
}

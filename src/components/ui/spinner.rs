use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let class = tw_merge!("size-4 animate-spin", class);

    view! { <LoaderCircle class=class attr:role="status" attr:aria-label="Loading" /> }
}

/// Spinner with a caption, used for panel-level loading states.
#[component]
pub fn Loading(#[prop(into, default = "Loading...".to_string())] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-6 text-xs text-muted-foreground">
            <Spinner />
            <span>{label}</span>
        </div>
    }
}

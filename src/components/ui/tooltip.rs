use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::tw_merge;

clx! {Tooltip, div, "relative w-full group/tooltip"}

/// Label shown to the right of a rail button while it is hovered.
#[component]
pub fn TooltipContent(#[prop(into, optional)] class: String, children: Children) -> impl IntoView {
    let class = tw_merge!(
        "pointer-events-none absolute left-full top-1/2 z-[70] ml-3 -translate-y-1/2 whitespace-nowrap rounded-md bg-neutral-800 px-3 py-1.5 text-xs text-white opacity-0 shadow-lg transition-opacity duration-200",
        "group-hover/tooltip:opacity-100",
        class,
    );

    view! {
        <div data-name="TooltipContent" role="tooltip" class=class>
            {children()}
        </div>
    }
}

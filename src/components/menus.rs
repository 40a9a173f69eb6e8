use crate::components::hooks::use_dismiss_on_outside;
use crate::models::SessionUser;
use crate::state::navigation::MenuPosition;
use icons::{LogOut, Pencil, Trash2};
use leptos::html;
use leptos::prelude::*;

const MENU_CLASS: &str = "fixed z-50 rounded-lg border border-neutral-700 bg-neutral-800 py-1 shadow-lg";
const ITEM_CLASS: &str = "flex w-full items-center gap-2 px-4 py-2 text-left text-sm hover:bg-neutral-700 disabled:opacity-50";

fn place(position: MenuPosition) -> String {
    format!("left: {}px; top: {}px;", position.x, position.y)
}

/// Edit / Delete menu for a folder, opened at the pointer.
#[component]
pub fn FolderContextMenu(
    position: MenuPosition,
    #[prop(into)] deleting: Signal<bool>,
    on_edit: Callback<()>,
    on_delete: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let menu_ref = NodeRef::<html::Div>::new();
    use_dismiss_on_outside(menu_ref, None, on_close);

    view! {
        <div
            node_ref=menu_ref
            role="menu"
            class=format!("{MENU_CLASS} min-w-36")
            style=place(position)
            on:contextmenu=|ev| ev.prevent_default()
        >
            <button role="menuitem" class=format!("{ITEM_CLASS} text-white") on:click=move |_| on_edit.run(())>
                <Pencil class="size-4" />
                "Edit"
            </button>
            <button
                role="menuitem"
                class=format!("{ITEM_CLASS} text-red-400")
                disabled=move || deleting.get()
                on:click=move |_| on_delete.run(())
            >
                <Trash2 class="size-4" />
                "Delete"
            </button>
        </div>
    }
}

#[component]
pub fn AccountMenu(
    position: MenuPosition,
    user: Option<SessionUser>,
    on_logout: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let menu_ref = NodeRef::<html::Div>::new();
    use_dismiss_on_outside(menu_ref, Some("[data-menu-anchor='account']"), on_close);

    let (name, email) = match &user {
        Some(u) => (u.display_name().to_string(), u.email.clone()),
        None => ("Signed in".to_string(), String::new()),
    };

    view! {
        <div node_ref=menu_ref role="menu" class=format!("{MENU_CLASS} w-64") style=place(position)>
            <div class="border-b border-neutral-700 px-4 py-3">
                <div class="truncate font-medium text-white">{name}</div>
                <div class="truncate text-sm text-neutral-400">{email}</div>
            </div>
            <button role="menuitem" class=format!("{ITEM_CLASS} text-red-400") on:click=move |_| on_logout.run(())>
                <LogOut class="size-4" />
                "Log out"
            </button>
        </div>
    }
}

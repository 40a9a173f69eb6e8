use crate::api::NewFolder;
use crate::components::dialogs::{CreateFolderDialog, CreateTopicDialog};
use crate::components::hooks::use_active_indicator;
use crate::components::menus::{AccountMenu, FolderContextMenu};
use crate::components::ui::{Loading, Tooltip, TooltipContent};
use crate::models::{Folder, FolderIcon, Topic, TopicKind};
use crate::state::navigation::{LoadStatus, MenuPosition, NavIntent, NavTarget, Overlay};
use crate::state::{AppContext, NavController};
use crate::util::now_iso;
use icons::{
    BookOpen, Brain, Camera, Eraser, FileBox, FileText, Folder as FolderLucide, Globe, House,
    Inbox, Mouse, PenTool, Plus, Search, Send, TestTube, Trash, User,
};
use leptos::html;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;

/// Accent used for the Mind pseudo-folder.
const MIND_COLOR: &str = "#f43f5e";

#[component]
pub fn FolderGlyph(icon: FolderIcon, #[prop(into, default = "size-5".to_string())] class: String) -> impl IntoView {
    match icon {
        FolderIcon::ComputerMouse => view! { <Mouse class=class /> }.into_any(),
        FolderIcon::PhotoStack => view! { <FileBox class=class /> }.into_any(),
        FolderIcon::Camera => view! { <Camera class=class /> }.into_any(),
        FolderIcon::Eraser => view! { <Eraser class=class /> }.into_any(),
        FolderIcon::TestTube => view! { <TestTube class=class /> }.into_any(),
        FolderIcon::Trash => view! { <Trash class=class /> }.into_any(),
        FolderIcon::Folder => view! { <FolderLucide class=class /> }.into_any(),
        FolderIcon::Paperplane => view! { <Send class=class /> }.into_any(),
        FolderIcon::Tray => view! { <Inbox class=class /> }.into_any(),
    }
}

#[component]
pub fn TopicGlyph(kind: TopicKind) -> impl IntoView {
    match kind {
        TopicKind::Notes => view! { <PenTool class="size-5" /> }.into_any(),
        TopicKind::Quiz => view! { <Brain class="size-5" /> }.into_any(),
        TopicKind::Flashcards => view! { <BookOpen class="size-5" /> }.into_any(),
    }
}

/// Square rail button with a hover label.
///
/// Buttons that take part in navigation set `indicator` so the active one
/// can be found by the indicator measurement.
#[component]
fn SidebarButton(
    #[prop(into)] label: String,
    #[prop(into, default = Signal::stored(false))] active: Signal<bool>,
    #[prop(optional)] indicator: bool,
    #[prop(default = None)] color: Option<&'static str>,
    #[prop(optional)] on_click: Option<Callback<web_sys::MouseEvent>>,
    #[prop(optional)] on_context_menu: Option<Callback<web_sys::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let class = move || {
        if active.get() {
            "flex w-full items-center justify-center rounded-lg p-2 bg-neutral-800 text-white scale-105 transition-all duration-200"
        } else {
            "flex w-full items-center justify-center rounded-lg p-2 text-neutral-400 transition-all duration-200 hover:scale-105 hover:bg-neutral-800 hover:text-white active:scale-95"
        }
    };

    view! {
        <Tooltip>
            <button
                aria-label=label.clone()
                data-nav-active=move || (indicator && active.get()).to_string()
                class=class
                style=color.map(|c| format!("color: {c};"))
                on:click=move |ev| {
                    if let Some(cb) = on_click {
                        cb.run(ev);
                    }
                }
                on:contextmenu=move |ev| {
                    if let Some(cb) = on_context_menu {
                        ev.prevent_default();
                        cb.run(ev);
                    }
                }
            >
                {children()}
            </button>
            <TooltipContent>{label}</TooltipContent>
        </Tooltip>
    }
}

/// Inline rename field. Enter saves, Escape or blur cancels.
#[component]
fn FolderEditInput(
    initial: String,
    on_save: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let value = RwSignal::new(initial);
    let input_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    view! {
        <form
            class="py-1"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_save.run(value.get_untracked());
            }
        >
            <input
                node_ref=input_ref
                type="text"
                aria-label="Folder name"
                class="w-full rounded bg-neutral-800 px-1.5 py-1 text-xs text-white outline-none focus:ring-1 focus:ring-blue-500"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:blur=move |_| on_cancel.run(())
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        on_cancel.run(());
                    }
                }
            />
        </form>
    }
}

#[component]
fn TopicRow(topic: Topic, #[prop(into)] selected: Signal<bool>, on_select: Callback<String>) -> impl IntoView {
    let id = topic.id.clone();
    let subtitle = topic.subtitle();

    view! {
        <button
            class=move || {
                if selected.get() {
                    "w-full rounded-lg bg-neutral-800 p-3 text-left ring-1 ring-blue-500"
                } else {
                    "w-full rounded-lg p-3 text-left hover:bg-neutral-800"
                }
            }
            on:click=move |_| on_select.run(id.clone())
        >
            <div class="flex items-center gap-3">
                <span class="text-neutral-400">
                    <TopicGlyph kind=topic.kind />
                </span>
                <div class="min-w-0">
                    <h3 class="truncate text-sm font-medium text-white">{topic.title}</h3>
                    <p class="mt-1 text-xs text-neutral-400">{subtitle}</p>
                </div>
            </div>
        </button>
    }
}

fn menu_anchor(ev: &web_sys::MouseEvent) -> Option<MenuPosition> {
    let el = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = el.get_bounding_client_rect();
    Some(MenuPosition::beside_account_button(rect.right(), rect.top()))
}

/// Folder rail plus the extended topic panel and their overlays.
#[component]
pub fn Sidebar(nav: NavController) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    nav.dispatch(NavIntent::Mount);

    let state = nav.state();
    let status = Memo::new(move |_| state.with(|s| s.folders_status.clone()));
    let folders = Memo::new(move |_| state.with(|s| s.folders.clone()));
    let selection = Memo::new(move |_| state.with(|s| s.selection.clone()));
    let editing = Memo::new(move |_| state.with(|s| s.editing_folder_id.clone()));
    let overlay = Memo::new(move |_| state.with(|s| s.overlay.clone()));
    let extended = Memo::new(move |_| state.with(|s| s.extended));
    let hub_active = Memo::new(move |_| state.with(|s| s.hub_active));
    let topic_filter = Memo::new(move |_| state.with(|s| s.topic_filter.clone()));
    let topics_loading = Memo::new(move |_| state.with(|s| s.topics_loading));
    let empty_topics = Memo::new(move |_| state.with(|s| s.shows_empty_topics()));
    let visible_topics = Memo::new(move |_| {
        state.with(|s| s.visible_topics().into_iter().cloned().collect::<Vec<_>>())
    });
    let selected_topic = Memo::new(move |_| state.with(|s| s.selected_topic_id.clone()));
    let create_topic_open = Memo::new(move |_| state.with(|s| s.create_topic_open));
    let active_folder_name = Memo::new(move |_| {
        state.with(|s| s.active_folder().map(|f| f.name.clone()).unwrap_or_default())
    });

    let create_folder_open = RwSignal::new(false);

    let rail_ref = NodeRef::<html::Div>::new();
    let indicator_inputs = Memo::new(move |_| state.with(|s| s.indicator_inputs()));
    let indicator_top = use_active_indicator(rail_ref, move || indicator_inputs.get());

    let select = move |target: NavTarget| nav.dispatch(NavIntent::Select(target));

    let folder_row = move |folder: Folder| {
        let id = folder.id.clone();
        let is_editing = {
            let id = id.clone();
            move || editing.get().as_deref() == Some(id.as_str())
        };
        let is_active = {
            let id = id.clone();
            Signal::derive(move || selection.with(|s| s.folder_id() == Some(id.as_str())))
        };

        let on_save = {
            let id = id.clone();
            Callback::new(move |name: String| {
                nav.dispatch(NavIntent::SubmitRename {
                    folder_id: id.clone(),
                    name,
                })
            })
        };
        let on_click = {
            let id = id.clone();
            Callback::new(move |_| select(NavTarget::Folder(id.clone())))
        };
        let on_context_menu = {
            let id = id.clone();
            Callback::new(move |ev: web_sys::MouseEvent| {
                nav.dispatch(NavIntent::OpenContextMenu {
                    folder_id: id.clone(),
                    position: MenuPosition {
                        x: ev.client_x() as f64,
                        y: ev.client_y() as f64,
                    },
                })
            })
        };

        let name = folder.name.clone();
        let icon = folder.icon();
        let color = folder.theme().color();

        view! {
            <Show
                when=is_editing
                fallback=move || view! {
                    <SidebarButton
                        label=name.clone()
                        active=is_active
                        indicator=true
                        color=color
                        on_click=on_click
                        on_context_menu=on_context_menu
                    >
                        <FolderGlyph icon=icon />
                    </SidebarButton>
                }
            >
                <FolderEditInput
                    initial=folder.name.clone()
                    on_save=on_save
                    on_cancel=Callback::new(move |_| nav.dispatch(NavIntent::CancelRename))
                />
            </Show>
        }
    };

    let rail_body = move || match status.get() {
        LoadStatus::Loading => view! {
            <div class="flex h-full items-center justify-center">
                <span class="text-xs text-neutral-400">"Loading..."</span>
            </div>
        }
        .into_any(),
        LoadStatus::Failed(message) => view! {
            <div class="flex h-full flex-col items-center justify-center gap-2 px-1">
                <div role="alert" class="break-words text-center text-[10px] text-red-500">{message}</div>
                <button class="text-[10px] text-neutral-400 underline" on:click=move |_| nav.dispatch(NavIntent::Reload)>
                    "Retry"
                </button>
            </div>
        }
        .into_any(),
        LoadStatus::Ready => view! {
            <nav class="w-full space-y-2 px-2 pt-3">
                <SidebarButton
                    label="Home"
                    active=Signal::derive(move || state.with(|s| s.is_home_active()))
                    indicator=true
                    on_click=Callback::new(move |_| select(NavTarget::Home))
                >
                    <House class="size-5" />
                </SidebarButton>
            </nav>

            <div class="my-4 h-px w-8 bg-neutral-800" />

            <div class="mb-4 w-full px-2">
                <SidebarButton
                    label="Mind"
                    active=Signal::derive(move || state.with(|s| s.is_mind_active()))
                    indicator=true
                    color=Some(MIND_COLOR)
                    on_click=Callback::new(move |_| select(NavTarget::Mind))
                >
                    <Brain class="size-5" />
                </SidebarButton>
            </div>

            <div class="mb-4 h-px w-8 bg-neutral-800" />

            <div class="w-full flex-1 overflow-y-auto">
                <div class="space-y-1 px-2">
                    <For
                        each=move || folders.get()
                        key=|f| (f.id.clone(), f.name.clone(), f.theme.clone(), f.icon.clone())
                        children=folder_row
                    />
                    <SidebarButton
                        label="New Folder"
                        on_click=Callback::new(move |_| create_folder_open.set(true))
                    >
                        <Plus class="size-5" />
                    </SidebarButton>
                </div>
            </div>

            <div class="mt-auto w-full space-y-2 px-2 pb-2">
                <SidebarButton
                    label="Documents"
                    on_click=Callback::new(move |_| {
                        navigate.with_value(|go| go("/documents", Default::default()))
                    })
                >
                    <FileText class="size-5" />
                </SidebarButton>
                <div data-menu-anchor="account">
                    <SidebarButton
                        label="Account"
                        active=Signal::derive(move || matches!(overlay.get(), Overlay::AccountMenu { .. }))
                        on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                            if let Some(position) = menu_anchor(&ev) {
                                nav.dispatch(NavIntent::ToggleAccountMenu { position });
                            }
                        })
                    >
                        <User class="size-5" />
                    </SidebarButton>
                </div>
            </div>
        }
        .into_any(),
    };

    let overlay_view = move || match overlay.get() {
        Overlay::Closed => ().into_any(),
        Overlay::ContextMenu {
            folder_id,
            position,
        } => {
            let edit_id = folder_id.clone();
            let delete_id = folder_id.clone();
            view! {
                <FolderContextMenu
                    position=position
                    deleting=Signal::derive(move || state.with(|s| s.is_deleting(&folder_id)))
                    on_edit=Callback::new(move |_| nav.dispatch(NavIntent::BeginRename(edit_id.clone())))
                    on_delete=Callback::new(move |_| nav.dispatch(NavIntent::RequestDelete(delete_id.clone())))
                    on_close=Callback::new(move |_| nav.dispatch(NavIntent::CloseOverlay))
                />
            }
            .into_any()
        }
        Overlay::AccountMenu { position } => view! {
            <AccountMenu
                position=position
                user=app_state.0.current_user.get_untracked()
                on_logout=Callback::new(move |_| nav.dispatch(NavIntent::Logout))
                on_close=Callback::new(move |_| nav.dispatch(NavIntent::CloseOverlay))
            />
        }
        .into_any(),
    };

    view! {
        <div
            node_ref=rail_ref
            class="fixed top-0 left-0 z-10 flex h-screen w-16 flex-col items-center border-r border-neutral-800 bg-neutral-900 py-1"
        >
            <div
                class="absolute right-0 mr-[2.75px] h-4 w-0.5 -translate-y-1/2 rounded-full bg-white transition-all duration-300 ease-in-out"
                style=move || match indicator_top.get() {
                    Some(top) => format!("top: {top}px; opacity: 1;"),
                    None => "top: 0px; opacity: 0;".to_string(),
                }
            />
            {rail_body}
        </div>

        <Show when=move || extended.get()>
            <aside class="fixed top-0 left-16 z-10 flex h-screen w-[300px] flex-col overflow-y-auto border-r border-neutral-800 bg-neutral-900 p-4">
                <div class="relative mb-4">
                    <Search class="absolute left-3 top-1/2 size-4 -translate-y-1/2 text-neutral-400" />
                    <input
                        type="text"
                        placeholder="Search topics..."
                        class="w-full rounded-lg bg-neutral-800 py-2 pl-10 pr-4 text-sm text-white focus:outline-none focus:ring-1 focus:ring-blue-500"
                        prop:value=move || topic_filter.get()
                        on:input=move |ev| nav.dispatch(NavIntent::SetTopicFilter(event_target_value(&ev)))
                    />
                </div>

                <button
                    class=move || {
                        if hub_active.get() {
                            "w-full rounded-lg bg-neutral-800 p-3 text-left ring-1 ring-blue-500"
                        } else {
                            "w-full rounded-lg p-3 text-left hover:bg-neutral-800"
                        }
                    }
                    on:click=move |_| nav.dispatch(NavIntent::OpenHub)
                >
                    <div class="flex items-center gap-3">
                        <Globe class="size-5 text-blue-500" />
                        <div>
                            <h3 class="text-sm font-medium text-white">"Study Hub"</h3>
                            <p class="text-xs text-neutral-400">"Discover and share resources"</p>
                        </div>
                    </div>
                </button>

                <div class="my-4 h-px bg-neutral-800" />

                <div class="flex-1 space-y-2">
                    <Show when=move || topics_loading.get()>
                        <Loading />
                    </Show>
                    <Show when=move || empty_topics.get()>
                        <div class="py-8 text-center text-sm text-neutral-400">"No topics yet"</div>
                    </Show>
                    <For
                        each=move || visible_topics.get()
                        key=|t| (t.id.clone(), t.title.clone(), t.updated_at.clone())
                        children=move |topic: Topic| {
                            let id = topic.id.clone();
                            view! {
                                <TopicRow
                                    topic=topic
                                    selected=Signal::derive(move || selected_topic.get().as_deref() == Some(id.as_str()))
                                    on_select=Callback::new(move |id| nav.dispatch(NavIntent::SelectTopic(id)))
                                />
                            }
                        }
                    />
                </div>

                <Show when=move || selection.with(|s| s.folder_id().is_some())>
                    <button
                        class="mt-4 flex w-full items-center justify-center gap-2 rounded-lg bg-blue-600 px-4 py-2 text-white transition-colors hover:bg-blue-700"
                        on:click=move |_| nav.dispatch(NavIntent::OpenCreateTopic)
                    >
                        <Plus class="size-5" />
                        "New Topic"
                    </button>
                </Show>
            </aside>
        </Show>

        {overlay_view}

        <Show when=move || create_folder_open.get()>
            <CreateFolderDialog
                on_submit=Callback::new(move |folder: NewFolder| {
                    create_folder_open.set(false);
                    nav.dispatch(NavIntent::CreateFolder(folder));
                })
                on_close=Callback::new(move |_| create_folder_open.set(false))
            />
        </Show>

        <Show when=move || create_topic_open.get()>
            <CreateTopicDialog
                folder_name=active_folder_name.get_untracked()
                on_submit=Callback::new(move |(kind, title): (TopicKind, String)| {
                    nav.dispatch(NavIntent::CreateTopic {
                        kind,
                        title,
                        now_iso: now_iso(),
                    })
                })
                on_close=Callback::new(move |_| nav.dispatch(NavIntent::CloseCreateTopic))
            />
        </Show>
    }
}

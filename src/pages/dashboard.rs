use crate::components::sidebar::{FolderGlyph, Sidebar, TopicGlyph};
use crate::components::ui::{
    Card, CardContent, CardDescription, CardHeader, CardTitle, ErrorAlert, Loading, StatCard,
};
use crate::documents::{file_type_label, DashboardStats, LOAD_FAILURE};
use crate::models::{Document, Folder, Topic, TopicContent};
use crate::notify::Notifier;
use crate::state::navigation::{MainView, Selection};
use crate::state::{AppContext, NavController};
use crate::util::{date_part, format_bytes};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notifier = expect_context::<Notifier>();

    let documents: RwSignal<Vec<Document>> = RwSignal::new(Vec::new());
    let docs_loading = RwSignal::new(true);
    let docs_error: RwSignal<Option<String>> = RwSignal::new(None);
    // Bumped whenever Home is re-entered so the summary is fresh.
    let docs_version = RwSignal::new(0u32);

    let on_select = Callback::new(move |selection: Selection| {
        web_sys::console::log_1(&format!("[Dashboard] selection: {:?}", selection).into());
        if selection == Selection::None {
            docs_version.update(|v| *v += 1);
        }
    });
    let nav = NavController::new(app_state, notifier, on_select);

    Effect::new(move |_| {
        docs_version.track();
        let api_client = app_state.0.api_client.get_untracked();
        docs_loading.set(true);

        spawn_local(async move {
            match api_client.list_documents().await {
                Ok(list) => {
                    let _ = documents.try_set(list);
                    let _ = docs_error.try_set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[Dashboard] list documents failed: {}", e).into());
                    if e.is_unauthorized() {
                        app_state.0.end_session();
                        return;
                    }
                    let _ = docs_error.try_set(Some(LOAD_FAILURE.to_string()));
                }
            }
            let _ = docs_loading.try_set(false);
        });
    });

    let state = nav.state();
    let view_kind = Memo::new(move |_| state.with(|s| s.main_view()));
    let extended = Memo::new(move |_| state.with(|s| s.extended));
    let folder_count = Memo::new(move |_| state.with(|s| s.folders.len()));
    let selected_topic = Memo::new(move |_| state.with(|s| s.selected_topic().cloned()));

    let stats = Memo::new(move |_| documents.with(|d| DashboardStats::compute(folder_count.get(), d)));

    let main_class = move || {
        if extended.get() {
            "ml-[364px] min-h-screen p-8 transition-[margin] duration-200"
        } else {
            "ml-16 min-h-screen p-8 transition-[margin] duration-200"
        }
    };

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <Sidebar nav=nav />

            <main class=main_class>
                {move || match view_kind.get() {
                    MainView::Home => {
                        view! {
                            <HomeView
                                stats=stats
                                loading=docs_loading
                                error=docs_error
                            />
                        }
                            .into_any()
                    }
                    MainView::Mind => {
                        view! {
                            <Placeholder
                                title="Mind"
                                body="A space for loose thoughts that don't belong to a folder yet."
                            />
                        }
                            .into_any()
                    }
                    MainView::Hub => {
                        view! {
                            <Placeholder
                                title="Study Hub"
                                body="Pick a folder in the rail to browse its topics."
                            />
                        }
                            .into_any()
                    }
                    MainView::Folder(folder) => {
                        view! { <FolderView folder=folder topic=selected_topic /> }.into_any()
                    }
                }}
            </main>
        </div>
    }
}

#[component]
fn HomeView(
    stats: Memo<DashboardStats>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let folders = Signal::derive(move || stats.with(|s| s.folder_count.to_string()));
    let docs = Signal::derive(move || stats.with(|s| s.document_count.to_string()));
    let storage = Signal::derive(move || stats.with(|s| s.storage_label()));
    let recent = Memo::new(move |_| stats.with(|s| s.recent.clone()));

    view! {
        <div class="mx-auto max-w-4xl space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold">"Welcome back"</h1>
                <p class="text-sm text-muted-foreground">"Here's an overview of your study space."</p>
            </div>

            <div class="grid grid-cols-1 gap-4 sm:grid-cols-3">
                <StatCard label="Folders" value=folders />
                <StatCard label="Documents" value=docs />
                <StatCard label="Storage Used" value=storage />
            </div>

            <Card>
                <CardHeader>
                    <div class="flex items-center justify-between">
                        <CardTitle>"Recent documents"</CardTitle>
                        <A href="/documents" attr:class="text-xs text-muted-foreground hover:underline">
                            "Manage documents"
                        </A>
                    </div>
                </CardHeader>
                <CardContent>
                    {move || {
                        if loading.get() {
                            return view! { <Loading /> }.into_any();
                        }
                        if let Some(message) = error.get() {
                            return view! { <ErrorAlert message=message /> }.into_any();
                        }
                        let items = recent.get();
                        if items.is_empty() {
                            return view! {
                                <p class="py-4 text-center text-sm text-muted-foreground">
                                    "No documents yet"
                                </p>
                            }
                                .into_any();
                        }
                        view! {
                            <ul class="divide-y divide-border">
                                {items
                                    .into_iter()
                                    .map(|d| {
                                        view! {
                                            <li class="flex items-center justify-between py-2 text-sm">
                                                <span class="truncate">{d.title.clone()}</span>
                                                <span class="shrink-0 text-xs text-muted-foreground">
                                                    {format!(
                                                        "{} · {} · {}",
                                                        file_type_label(&d.file_type),
                                                        format_bytes(d.size),
                                                        date_part(&d.created_at),
                                                    )}
                                                </span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }}
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
fn Placeholder(title: &'static str, body: &'static str) -> impl IntoView {
    view! {
        <div class="mx-auto max-w-2xl space-y-2 pt-10 text-center">
            <h1 class="text-2xl font-semibold">{title}</h1>
            <p class="text-sm text-muted-foreground">{body}</p>
        </div>
    }
}

#[component]
fn FolderView(folder: Folder, #[prop(into)] topic: Signal<Option<Topic>>) -> impl IntoView {
    let color = folder.theme().color();

    view! {
        <div class="mx-auto max-w-3xl space-y-6">
            <div class="flex items-center gap-3">
                <span style=color.map(|c| format!("color: {c};"))>
                    <FolderGlyph icon=folder.icon() class="size-7" />
                </span>
                <h1 class="text-2xl font-semibold">{folder.name.clone()}</h1>
            </div>

            {move || match topic.get() {
                Some(t) => view! { <TopicDetails topic=t /> }.into_any(),
                None => {
                    view! {
                        <p class="text-sm text-muted-foreground">
                            "Select a topic from the panel, or create a new one."
                        </p>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn TopicDetails(topic: Topic) -> impl IntoView {
    let body = match topic.content() {
        Some(TopicContent::Notes(notes)) if notes.text.trim().is_empty() => {
            view! { <p class="text-sm text-muted-foreground">"This note is empty."</p> }.into_any()
        }
        Some(TopicContent::Notes(notes)) => {
            view! { <p class="whitespace-pre-wrap text-sm">{notes.text}</p> }.into_any()
        }
        Some(TopicContent::Quiz(quiz)) => {
            let count = quiz.questions.len();
            view! {
                <div class="space-y-2">
                    <p class="text-xs text-muted-foreground">
                        {format!("{} question{}", count, if count == 1 { "" } else { "s" })}
                    </p>
                    <ol class="list-decimal space-y-1 pl-5 text-sm">
                        {quiz.questions.into_iter().map(|q| view! { <li>{q.prompt}</li> }).collect_view()}
                    </ol>
                </div>
            }
                .into_any()
        }
        Some(TopicContent::Flashcards(deck)) => {
            let count = deck.cards.len();
            view! {
                <div class="space-y-2">
                    <p class="text-xs text-muted-foreground">
                        {format!("{} card{}", count, if count == 1 { "" } else { "s" })}
                    </p>
                    <div class="grid grid-cols-1 gap-2 sm:grid-cols-2">
                        {deck
                            .cards
                            .into_iter()
                            .map(|c| {
                                view! {
                                    <div class="rounded-md border border-border p-3 text-sm">
                                        <div class="font-medium">{c.front}</div>
                                        <div class="text-muted-foreground">{c.back}</div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            }
                .into_any()
        }
        None => {
            view! { <ErrorAlert message="This topic's content could not be read." /> }.into_any()
        }
    };

    let kind = topic.kind;
    let title = topic.title.clone();
    let subtitle = topic.subtitle();

    view! {
        <Card>
            <CardHeader>
                <div class="flex items-center gap-2">
                    <TopicGlyph kind=kind />
                    <div class="space-y-0.5">
                        <CardTitle>{title}</CardTitle>
                        <CardDescription>{subtitle}</CardDescription>
                    </div>
                </div>
            </CardHeader>
            <CardContent>{body}</CardContent>
        </Card>
    }
}

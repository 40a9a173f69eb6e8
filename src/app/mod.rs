use crate::api::EnvConfig;
use crate::notify::{Notifier, Toaster};
use crate::pages::{DocumentsPage, LoginPage, RootAuthed, RootPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let config = EnvConfig::new();
    provide_context(AppContext(AppState::new(&config)));
    provide_context(Notifier::new(config.toast_ms));

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("documents") view=move || view! {
                    <RootAuthed>
                        <DocumentsPage />
                    </RootAuthed>
                } />
                <Route path=path!("") view=RootPage />
            </Routes>
        </Router>
        <Toaster />
    }
}

use crate::api::{ApiClient, ApiResult};
use crate::notify::Notifier;
use crate::state::navigation::{NavCommand, NavIntent, NavState, Selection};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Runs the sidebar's remote work.
///
/// `NavState` decides what should happen; this controller executes the
/// resulting commands (API calls, toasts, parent callbacks) and feeds every
/// response back in as an intent. A 401 from any call ends the session.
#[derive(Clone, Copy)]
pub(crate) struct NavController {
    app_state: AppContext,
    notifier: Notifier,
    state: RwSignal<NavState>,
    on_select: Callback<Selection>,
}

impl NavController {
    pub fn new(app_state: AppContext, notifier: Notifier, on_select: Callback<Selection>) -> Self {
        Self {
            app_state,
            notifier,
            state: RwSignal::new(NavState::new()),
            on_select,
        }
    }

    /// Reactive read access for the views.
    pub fn state(&self) -> ReadSignal<NavState> {
        self.state.read_only()
    }

    pub fn dispatch(&self, intent: NavIntent) {
        // The owning view may already be gone when a late response lands.
        let Some(commands) = self.state.try_update(|s| s.dispatch(intent)) else {
            return;
        };
        for cmd in commands {
            self.run(cmd);
        }
    }

    fn api(&self) -> ApiClient {
        self.app_state.0.api_client.get_untracked()
    }

    fn run(&self, cmd: NavCommand) {
        let api = self.api();
        let this = *self;

        match cmd {
            NavCommand::FetchFolders(token) => spawn_local(async move {
                let result = api.list_folders().await;
                if this.accept("list folders", &result) {
                    this.dispatch(NavIntent::FoldersLoaded { token, result });
                }
            }),
            NavCommand::CreateFolder(folder) => spawn_local(async move {
                let result = api.create_folder(&folder).await;
                if this.accept("create folder", &result) {
                    this.dispatch(NavIntent::FolderCreated { result });
                }
            }),
            NavCommand::RenameFolder {
                folder_id,
                name,
                token,
            } => spawn_local(async move {
                let result = api.rename_folder(&folder_id, &name).await;
                if this.accept("rename folder", &result) {
                    this.dispatch(NavIntent::FolderRenamed {
                        token,
                        folder_id,
                        name,
                        result,
                    });
                }
            }),
            NavCommand::DeleteFolder { folder_id, token } => spawn_local(async move {
                let result = api.delete_folder(&folder_id).await;
                if this.accept("delete folder", &result) {
                    this.dispatch(NavIntent::FolderDeleted {
                        token,
                        folder_id,
                        result,
                    });
                }
            }),
            NavCommand::FetchTopics { folder_id, token } => spawn_local(async move {
                let result = api.list_topics(&folder_id).await;
                if this.accept("list topics", &result) {
                    this.dispatch(NavIntent::TopicsLoaded {
                        token,
                        folder_id,
                        result,
                    });
                }
            }),
            NavCommand::CreateTopic(topic) => spawn_local(async move {
                let result = api.create_topic(&topic).await;
                if this.accept("create topic", &result) {
                    this.dispatch(NavIntent::TopicCreated { result });
                }
            }),
            NavCommand::SelectionChanged(selection) => self.on_select.run(selection),
            NavCommand::Notify(severity, message) => self.notifier.notify(severity, message),
            NavCommand::Logout => spawn_local(async move {
                // Server-side sign-out is best effort; the local session goes regardless.
                if let Err(e) = api.remote_logout().await {
                    web_sys::console::warn_1(&format!("[Sidebar] remote logout: {}", e).into());
                }
                this.app_state.0.end_session();
            }),
        }
    }

    /// Logs failures and ends the session on 401. Returns whether the
    /// response should be fed back into the state.
    fn accept<T>(&self, what: &str, result: &ApiResult<T>) -> bool {
        let Err(e) = result else {
            return true;
        };
        web_sys::console::error_1(&format!("[Sidebar] {} failed: {}", what, e).into());
        if e.is_unauthorized() {
            self.app_state.0.end_session();
            return false;
        }
        true
    }
}

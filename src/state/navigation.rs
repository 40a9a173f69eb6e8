//! Sidebar navigation state.
//!
//! `NavState` owns the folder list, the topic list of the selected folder,
//! the current selection and the transient overlays. It only changes through
//! [`NavState::dispatch`], which takes a user intent or a remote response and
//! returns the commands (remote calls, notifications, parent callbacks) the
//! controller has to run. Nothing in here touches the DOM or the network.

use crate::api::{ApiError, ApiResult, NewFolder, NewTopic};
use crate::models::{Folder, Topic, TopicContent, TopicKind};
use crate::notify::Severity;
use crate::state::tokens::{RequestKey, RequestToken, RequestTokens};
use crate::util::matches_filter;
use std::collections::HashSet;

/// Id of the fixed "Mind" pseudo-folder. It has no backing record.
pub(crate) const MIND_FOLDER_ID: &str = "mind-folder";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Selection {
    /// Home.
    #[default]
    None,
    PseudoFolder(String),
    Folder(String),
}

impl Selection {
    pub fn folder_id(&self) -> Option<&str> {
        match self {
            Selection::Folder(id) => Some(id),
            _ => None,
        }
    }
}

/// Click targets in the sidebar rail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NavTarget {
    Home,
    Mind,
    Folder(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MenuPosition {
    pub x: f64,
    pub y: f64,
}

impl MenuPosition {
    /// Account menu opens to the right of its button, lifted so it sits
    /// beside the bottom of the rail.
    pub fn beside_account_button(button_right: f64, button_top: f64) -> Self {
        Self {
            x: button_right + 8.0,
            y: button_top - 75.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum Overlay {
    #[default]
    Closed,
    ContextMenu {
        folder_id: String,
        position: MenuPosition,
    },
    AccountMenu {
        position: MenuPosition,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Everything that decides where the rail's active indicator sits: which
/// button is marked active and where the buttons are laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IndicatorInputs {
    pub selection: Selection,
    pub home_active: bool,
    pub folder_ids: Vec<String>,
    pub editing_folder_id: Option<String>,
    pub status: LoadStatus,
}

/// What the main panel should show for the current state.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MainView {
    Home,
    Mind,
    Hub,
    Folder(Folder),
}

/// Remote operations, each with its own fixed user-facing wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncOp {
    LoadFolders,
    RefreshFolders,
    CreateFolder,
    RenameFolder,
    DeleteFolder,
    LoadTopics,
    CreateTopic,
}

impl SyncOp {
    pub fn failure_message(self) -> &'static str {
        match self {
            SyncOp::LoadFolders => "Failed to load folders",
            SyncOp::RefreshFolders => "Failed to refresh folders",
            SyncOp::CreateFolder => "Failed to create folder",
            SyncOp::RenameFolder => "Failed to rename folder",
            SyncOp::DeleteFolder => "Failed to delete folder",
            SyncOp::LoadTopics => "Failed to load topics",
            SyncOp::CreateTopic => "Failed to create topic",
        }
    }

    pub fn success_message(self) -> Option<&'static str> {
        match self {
            SyncOp::CreateFolder => Some("Folder created"),
            SyncOp::RenameFolder => Some("Folder renamed successfully"),
            SyncOp::DeleteFolder => Some("Folder deleted successfully"),
            SyncOp::CreateTopic => Some("Topic created"),
            _ => None,
        }
    }

    pub fn failure_severity(self) -> Severity {
        match self {
            SyncOp::LoadTopics | SyncOp::CreateTopic => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum NavIntent {
    Mount,
    /// Manual retry after the initial load failed.
    Reload,
    Select(NavTarget),
    OpenHub,
    SetTopicFilter(String),
    SelectTopic(String),

    OpenContextMenu {
        folder_id: String,
        position: MenuPosition,
    },
    /// Opens the account menu, or closes it when it is already open.
    ToggleAccountMenu {
        position: MenuPosition,
    },
    CloseOverlay,
    Logout,

    BeginRename(String),
    CancelRename,
    SubmitRename {
        folder_id: String,
        name: String,
    },
    RequestDelete(String),
    CreateFolder(NewFolder),

    OpenCreateTopic,
    CloseCreateTopic,
    CreateTopic {
        kind: TopicKind,
        title: String,
        now_iso: String,
    },

    FoldersLoaded {
        token: RequestToken,
        result: ApiResult<Vec<Folder>>,
    },
    FolderCreated {
        result: ApiResult<Folder>,
    },
    FolderRenamed {
        token: RequestToken,
        folder_id: String,
        name: String,
        result: ApiResult<()>,
    },
    FolderDeleted {
        token: RequestToken,
        folder_id: String,
        result: ApiResult<()>,
    },
    TopicsLoaded {
        token: RequestToken,
        folder_id: String,
        result: ApiResult<Vec<Topic>>,
    },
    TopicCreated {
        result: ApiResult<()>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum NavCommand {
    FetchFolders(RequestToken),
    CreateFolder(NewFolder),
    RenameFolder {
        folder_id: String,
        name: String,
        token: RequestToken,
    },
    DeleteFolder {
        folder_id: String,
        token: RequestToken,
    },
    FetchTopics {
        folder_id: String,
        token: RequestToken,
    },
    CreateTopic(NewTopic),
    /// Tell the parent view which target is now selected.
    SelectionChanged(Selection),
    Notify(Severity, String),
    Logout,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NavState {
    pub folders: Vec<Folder>,
    pub folders_status: LoadStatus,

    pub selection: Selection,
    pub extended: bool,
    pub hub_active: bool,

    /// Topics of the selected folder only.
    pub topics: Vec<Topic>,
    pub topics_loading: bool,
    /// The last topic fetch for the selected folder failed.
    pub topics_error: bool,
    pub topic_filter: String,
    pub selected_topic_id: Option<String>,

    pub overlay: Overlay,
    pub editing_folder_id: Option<String>,
    pub create_topic_open: bool,

    deleting: HashSet<String>,
    tokens: RequestTokens,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- read side ---------------------------------------------------

    pub fn is_active(&self, folder_id: &str) -> bool {
        self.selection.folder_id() == Some(folder_id)
    }

    pub fn is_mind_active(&self) -> bool {
        matches!(&self.selection, Selection::PseudoFolder(id) if id == MIND_FOLDER_ID)
    }

    pub fn is_home_active(&self) -> bool {
        self.selection == Selection::None && !self.hub_active
    }

    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    pub fn active_folder(&self) -> Option<&Folder> {
        self.selection.folder_id().and_then(|id| self.folder(id))
    }

    pub fn visible_topics(&self) -> Vec<&Topic> {
        self.topics
            .iter()
            .filter(|t| matches_filter(&t.title, &self.topic_filter))
            .collect()
    }

    pub fn shows_empty_topics(&self) -> bool {
        self.active_folder().is_some()
            && !self.topics_loading
            && !self.topics_error
            && self.topics.is_empty()
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        let id = self.selected_topic_id.as_deref()?;
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn is_deleting(&self, folder_id: &str) -> bool {
        self.deleting.contains(folder_id)
    }

    pub fn indicator_inputs(&self) -> IndicatorInputs {
        IndicatorInputs {
            selection: self.selection.clone(),
            home_active: self.is_home_active(),
            folder_ids: self.folders.iter().map(|f| f.id.clone()).collect(),
            editing_folder_id: self.editing_folder_id.clone(),
            status: self.folders_status.clone(),
        }
    }

    pub fn main_view(&self) -> MainView {
        match &self.selection {
            Selection::Folder(_) => match self.active_folder() {
                Some(f) => MainView::Folder(f.clone()),
                None => MainView::Home,
            },
            Selection::PseudoFolder(_) => MainView::Mind,
            Selection::None if self.hub_active => MainView::Hub,
            Selection::None => MainView::Home,
        }
    }

    // ----- write side --------------------------------------------------

    pub fn dispatch(&mut self, intent: NavIntent) -> Vec<NavCommand> {
        match intent {
            NavIntent::Mount => {
                self.folders_status = LoadStatus::Loading;
                vec![self.fetch_folders()]
            }
            NavIntent::Reload => {
                if matches!(self.folders_status, LoadStatus::Failed(_)) {
                    self.folders_status = LoadStatus::Loading;
                }
                vec![self.fetch_folders()]
            }
            NavIntent::Select(target) => self.select(target),
            NavIntent::OpenHub => {
                self.leave_folder();
                self.selection = Selection::None;
                self.extended = true;
                self.hub_active = true;
                vec![NavCommand::SelectionChanged(Selection::None)]
            }
            NavIntent::SetTopicFilter(filter) => {
                self.topic_filter = filter;
                vec![]
            }
            NavIntent::SelectTopic(topic_id) => {
                if self.topics.iter().any(|t| t.id == topic_id) {
                    self.selected_topic_id = Some(topic_id);
                }
                vec![]
            }

            NavIntent::OpenContextMenu {
                folder_id,
                position,
            } => {
                if self.folder(&folder_id).is_some() {
                    self.overlay = Overlay::ContextMenu {
                        folder_id,
                        position,
                    };
                }
                vec![]
            }
            NavIntent::ToggleAccountMenu { position } => {
                self.overlay = match self.overlay {
                    Overlay::AccountMenu { .. } => Overlay::Closed,
                    _ => Overlay::AccountMenu { position },
                };
                vec![]
            }
            NavIntent::CloseOverlay => {
                self.overlay = Overlay::Closed;
                vec![]
            }
            NavIntent::Logout => {
                self.overlay = Overlay::Closed;
                vec![NavCommand::Logout]
            }

            NavIntent::BeginRename(folder_id) => {
                self.overlay = Overlay::Closed;
                if self.folder(&folder_id).is_some() {
                    self.editing_folder_id = Some(folder_id);
                }
                vec![]
            }
            NavIntent::CancelRename => {
                self.editing_folder_id = None;
                vec![]
            }
            NavIntent::SubmitRename { folder_id, name } => self.submit_rename(folder_id, name),
            NavIntent::RequestDelete(folder_id) => {
                self.overlay = Overlay::Closed;
                if self.folder(&folder_id).is_none() || !self.deleting.insert(folder_id.clone()) {
                    return vec![];
                }
                let token = self.tokens.issue(RequestKey::Folder(folder_id.clone()));
                vec![NavCommand::DeleteFolder { folder_id, token }]
            }
            NavIntent::CreateFolder(folder) => {
                let name = folder.name.trim().to_string();
                if name.is_empty() {
                    return vec![warn("Folder name cannot be empty")];
                }
                vec![NavCommand::CreateFolder(NewFolder { name, ..folder })]
            }

            NavIntent::OpenCreateTopic => {
                self.create_topic_open = self.active_folder().is_some();
                vec![]
            }
            NavIntent::CloseCreateTopic => {
                self.create_topic_open = false;
                vec![]
            }
            NavIntent::CreateTopic {
                kind,
                title,
                now_iso,
            } => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return vec![warn("Topic title cannot be empty")];
                }
                vec![NavCommand::CreateTopic(NewTopic {
                    kind,
                    title,
                    folder_id: self.selection.folder_id().map(str::to_string),
                    content: TopicContent::empty(kind, &now_iso),
                })]
            }

            NavIntent::FoldersLoaded { token, result } => self.on_folders_loaded(token, result),
            NavIntent::FolderCreated { result } => match result {
                Ok(folder) => {
                    if self.folder(&folder.id).is_none() {
                        self.folders.push(folder);
                    }
                    let mut out = success(SyncOp::CreateFolder);
                    out.push(self.fetch_folders());
                    out
                }
                Err(e) => vec![failure(SyncOp::CreateFolder, &e)],
            },
            NavIntent::FolderRenamed {
                token,
                folder_id,
                name,
                result,
            } => self.on_folder_renamed(token, folder_id, name, result),
            NavIntent::FolderDeleted {
                token,
                folder_id,
                result,
            } => self.on_folder_deleted(token, folder_id, result),
            NavIntent::TopicsLoaded {
                token,
                folder_id,
                result,
            } => {
                if !self.tokens.settle(&token) || !self.is_active(&folder_id) {
                    return vec![];
                }
                self.topics_loading = false;
                match result {
                    Ok(topics) => {
                        self.topics = topics;
                        vec![]
                    }
                    Err(e) => {
                        self.topics_error = true;
                        vec![failure(SyncOp::LoadTopics, &e)]
                    }
                }
            }
            NavIntent::TopicCreated { result } => match result {
                Ok(()) => {
                    self.create_topic_open = false;
                    let mut out = success(SyncOp::CreateTopic);
                    if let Some(folder_id) = self.selection.folder_id().map(str::to_string) {
                        out.push(self.fetch_topics(folder_id));
                    }
                    out
                }
                Err(e) => vec![failure(SyncOp::CreateTopic, &e)],
            },
        }
    }

    fn fetch_folders(&mut self) -> NavCommand {
        NavCommand::FetchFolders(self.tokens.issue(RequestKey::FolderList))
    }

    fn fetch_topics(&mut self, folder_id: String) -> NavCommand {
        self.topics_loading = true;
        self.topics_error = false;
        let token = self.tokens.issue(RequestKey::TopicList);
        NavCommand::FetchTopics { folder_id, token }
    }

    /// Drops folder-scoped panel content and any topic request in flight.
    fn leave_folder(&mut self) {
        self.tokens.cancel(&RequestKey::TopicList);
        self.topics.clear();
        self.topics_loading = false;
        self.topics_error = false;
        self.topic_filter.clear();
        self.selected_topic_id = None;
        self.create_topic_open = false;
    }

    fn select(&mut self, target: NavTarget) -> Vec<NavCommand> {
        self.hub_active = false;
        match target {
            NavTarget::Home | NavTarget::Mind => {
                self.leave_folder();
                self.extended = false;
                self.selection = if target == NavTarget::Mind {
                    Selection::PseudoFolder(MIND_FOLDER_ID.to_string())
                } else {
                    Selection::None
                };
                vec![NavCommand::SelectionChanged(self.selection.clone())]
            }
            NavTarget::Folder(folder_id) => {
                if self.folder(&folder_id).is_none() {
                    return vec![];
                }
                self.leave_folder();
                self.selection = Selection::Folder(folder_id.clone());
                self.extended = true;
                vec![
                    NavCommand::SelectionChanged(self.selection.clone()),
                    self.fetch_topics(folder_id),
                ]
            }
        }
    }

    /// Resets to Home when the selected folder disappeared.
    fn deselect_folder(&mut self, folder_id: &str) -> Option<NavCommand> {
        if !self.is_active(folder_id) {
            return None;
        }
        self.leave_folder();
        self.selection = Selection::None;
        self.extended = false;
        Some(NavCommand::SelectionChanged(Selection::None))
    }

    fn forget_folder(&mut self, folder_id: &str) -> Vec<NavCommand> {
        if self.editing_folder_id.as_deref() == Some(folder_id) {
            self.editing_folder_id = None;
        }
        if matches!(&self.overlay, Overlay::ContextMenu { folder_id: id, .. } if id == folder_id) {
            self.overlay = Overlay::Closed;
        }
        self.deselect_folder(folder_id).into_iter().collect()
    }

    fn submit_rename(&mut self, folder_id: String, name: String) -> Vec<NavCommand> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return vec![warn("Folder name cannot be empty")];
        }
        match self.folder(&folder_id) {
            None => {
                self.editing_folder_id = None;
                return vec![];
            }
            Some(f) if f.name == name => {
                self.editing_folder_id = None;
                return vec![];
            }
            Some(_) => {}
        }
        let token = self.tokens.issue(RequestKey::Folder(folder_id.clone()));
        vec![NavCommand::RenameFolder {
            folder_id,
            name,
            token,
        }]
    }

    fn on_folders_loaded(
        &mut self,
        token: RequestToken,
        result: ApiResult<Vec<Folder>>,
    ) -> Vec<NavCommand> {
        if !self.tokens.settle(&token) {
            return vec![];
        }
        match result {
            Ok(folders) => {
                self.folders = folders;
                self.folders_status = LoadStatus::Ready;

                let gone: Vec<String> = [
                    self.selection.folder_id().map(str::to_string),
                    self.editing_folder_id.clone(),
                    match &self.overlay {
                        Overlay::ContextMenu { folder_id, .. } => Some(folder_id.clone()),
                        _ => None,
                    },
                ]
                .into_iter()
                .flatten()
                .filter(|id| self.folder(id).is_none())
                .collect();

                gone.iter().flat_map(|id| self.forget_folder(id)).collect()
            }
            Err(e) => match self.folders_status {
                LoadStatus::Ready => vec![failure(SyncOp::RefreshFolders, &e)],
                _ => {
                    self.folders_status = LoadStatus::Failed(format!(
                        "{}: {}",
                        SyncOp::LoadFolders.failure_message(),
                        e
                    ));
                    vec![]
                }
            },
        }
    }

    fn on_folder_renamed(
        &mut self,
        token: RequestToken,
        folder_id: String,
        name: String,
        result: ApiResult<()>,
    ) -> Vec<NavCommand> {
        if !self.tokens.settle(&token) {
            // Superseded by a newer mutation of the same folder; only
            // reconcile with the server.
            return match result {
                Ok(()) => vec![self.fetch_folders()],
                Err(_) => vec![],
            };
        }
        match result {
            Ok(()) => {
                if let Some(f) = self.folders.iter_mut().find(|f| f.id == folder_id) {
                    f.name = name;
                }
                if self.editing_folder_id.as_deref() == Some(folder_id.as_str()) {
                    self.editing_folder_id = None;
                }
                let mut out = success(SyncOp::RenameFolder);
                out.push(self.fetch_folders());
                out
            }
            Err(e) => vec![failure(SyncOp::RenameFolder, &e)],
        }
    }

    fn on_folder_deleted(
        &mut self,
        token: RequestToken,
        folder_id: String,
        result: ApiResult<()>,
    ) -> Vec<NavCommand> {
        self.deleting.remove(&folder_id);
        if !self.tokens.settle(&token) {
            return match result {
                Ok(()) => vec![self.fetch_folders()],
                Err(_) => vec![],
            };
        }
        match result {
            Ok(()) => {
                let mut out = self.forget_folder(&folder_id);
                self.folders.retain(|f| f.id != folder_id);
                out.extend(success(SyncOp::DeleteFolder));
                out.push(self.fetch_folders());
                out
            }
            Err(e) => vec![failure(SyncOp::DeleteFolder, &e)],
        }
    }
}

fn warn(message: &str) -> NavCommand {
    NavCommand::Notify(Severity::Warning, message.to_string())
}

fn success(op: SyncOp) -> Vec<NavCommand> {
    op.success_message()
        .map(|m| NavCommand::Notify(Severity::Success, m.to_string()))
        .into_iter()
        .collect()
}

fn failure(op: SyncOp, e: &ApiError) -> NavCommand {
    NavCommand::Notify(
        op.failure_severity(),
        format!("{}: {}", op.failure_message(), e),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    fn folder(id: &str, name: &str) -> Folder {
        Folder {
            id: id.into(),
            name: name.into(),
            theme: "lime".into(),
            icon: "Folder".into(),
            user_id: "u1".into(),
        }
    }

    fn topic(id: &str, folder_id: &str, title: &str) -> Topic {
        Topic {
            id: id.into(),
            folder_id: Some(folder_id.into()),
            title: title.into(),
            kind: TopicKind::Notes,
            updated_at: "2024-03-05T10:00:00Z".into(),
            content: serde_json::json!({"text": "", "lastEdited": ""}),
        }
    }

    fn net_err() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Network,
            message: "offline".into(),
        }
    }

    fn fetch_token(cmds: &[NavCommand]) -> RequestToken {
        cmds.iter()
            .find_map(|c| match c {
                NavCommand::FetchFolders(t) => Some(t.clone()),
                _ => None,
            })
            .expect("expected a folder fetch")
    }

    fn topics_token(cmds: &[NavCommand]) -> (String, RequestToken) {
        cmds.iter()
            .find_map(|c| match c {
                NavCommand::FetchTopics { folder_id, token } => {
                    Some((folder_id.clone(), token.clone()))
                }
                _ => None,
            })
            .expect("expected a topic fetch")
    }

    fn loaded(folders: Vec<Folder>) -> NavState {
        let mut s = NavState::new();
        let cmds = s.dispatch(NavIntent::Mount);
        s.dispatch(NavIntent::FoldersLoaded {
            token: fetch_token(&cmds),
            result: Ok(folders),
        });
        s
    }

    fn has_notify(cmds: &[NavCommand], severity: Severity) -> bool {
        cmds.iter()
            .any(|c| matches!(c, NavCommand::Notify(s, _) if *s == severity))
    }

    #[test]
    fn test_initial_load_renders_folders() {
        let s = loaded(vec![folder("f1", "Biology")]);
        assert_eq!(s.folders_status, LoadStatus::Ready);
        assert_eq!(s.folders.len(), 1);
        assert_eq!(s.folders[0].name, "Biology");
        assert_eq!(s.folders[0].theme().color(), Some("#84cc16"));
        assert!(s.is_home_active());
    }

    #[test]
    fn test_initial_load_failure_replaces_panel() {
        let mut s = NavState::new();
        let cmds = s.dispatch(NavIntent::Mount);
        let out = s.dispatch(NavIntent::FoldersLoaded {
            token: fetch_token(&cmds),
            result: Err(net_err()),
        });
        assert!(out.is_empty());
        assert!(matches!(&s.folders_status, LoadStatus::Failed(m) if m.contains("offline")));

        let retry = s.dispatch(NavIntent::Reload);
        assert_eq!(s.folders_status, LoadStatus::Loading);
        fetch_token(&retry);
    }

    #[test]
    fn test_refresh_failure_notifies_and_keeps_list() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let cmds = s.dispatch(NavIntent::Reload);
        let out = s.dispatch(NavIntent::FoldersLoaded {
            token: fetch_token(&cmds),
            result: Err(net_err()),
        });
        assert!(has_notify(&out, Severity::Error));
        assert_eq!(s.folders.len(), 1);
        assert_eq!(s.folders_status, LoadStatus::Ready);
    }

    #[test]
    fn test_select_folder_shows_panel_and_fetches_topics() {
        let mut s = loaded(vec![folder("f1", "Biology"), folder("f2", "Chemistry")]);
        let out = s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));

        assert_eq!(s.selection, Selection::Folder("f1".into()));
        assert!(s.extended);
        assert!(out.contains(&NavCommand::SelectionChanged(Selection::Folder("f1".into()))));
        let (folder_id, _) = topics_token(&out);
        assert_eq!(folder_id, "f1");

        // Zero or one active folder, matching the selection.
        let active: Vec<_> = s.folders.iter().filter(|f| s.is_active(&f.id)).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "f1");
    }

    #[test]
    fn test_select_home_and_mind_do_not_fetch_or_extend() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));

        let out = s.dispatch(NavIntent::Select(NavTarget::Mind));
        assert!(s.is_mind_active());
        assert!(!s.extended);
        assert_eq!(
            out,
            vec![NavCommand::SelectionChanged(Selection::PseudoFolder(
                MIND_FOLDER_ID.into()
            ))]
        );
        assert!(s.folders.iter().all(|f| !s.is_active(&f.id)));

        let out = s.dispatch(NavIntent::Select(NavTarget::Home));
        assert_eq!(out, vec![NavCommand::SelectionChanged(Selection::None)]);
        assert!(s.is_home_active());
        assert_eq!(s.main_view(), MainView::Home);
    }

    #[test]
    fn test_select_unknown_folder_is_ignored() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let out = s.dispatch(NavIntent::Select(NavTarget::Folder("nope".into())));
        assert!(out.is_empty());
        assert_eq!(s.selection, Selection::None);
    }

    #[test]
    fn test_switching_folders_drops_stale_topics() {
        let mut s = loaded(vec![folder("a", "A"), folder("b", "B")]);
        let (_, token_a) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("a".into()))));
        let (_, token_b) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("b".into()))));

        // B resolves first, then A's late response arrives.
        s.dispatch(NavIntent::TopicsLoaded {
            token: token_b,
            folder_id: "b".into(),
            result: Ok(vec![topic("tb", "b", "Bonds")]),
        });
        s.dispatch(NavIntent::TopicsLoaded {
            token: token_a,
            folder_id: "a".into(),
            result: Ok(vec![topic("ta", "a", "Atoms")]),
        });

        assert_eq!(s.topics.len(), 1);
        assert_eq!(s.topics[0].id, "tb");
    }

    #[test]
    fn test_empty_topic_list_shows_placeholder() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let (_, token) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into()))));
        assert!(!s.shows_empty_topics());

        s.dispatch(NavIntent::TopicsLoaded {
            token,
            folder_id: "f1".into(),
            result: Ok(vec![]),
        });
        assert!(s.shows_empty_topics());
    }

    #[test]
    fn test_topic_fetch_failure_keeps_selection_and_warns() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let (_, token) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into()))));
        let out = s.dispatch(NavIntent::TopicsLoaded {
            token,
            folder_id: "f1".into(),
            result: Err(net_err()),
        });
        assert!(has_notify(&out, Severity::Warning));
        assert_eq!(s.selection, Selection::Folder("f1".into()));
        assert!(!s.topics_loading);
    }

    #[test]
    fn test_topic_filter_is_case_insensitive() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let (_, token) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into()))));
        s.dispatch(NavIntent::TopicsLoaded {
            token,
            folder_id: "f1".into(),
            result: Ok(vec![topic("t1", "f1", "Cell Biology"), topic("t2", "f1", "Genetics")]),
        });
        s.dispatch(NavIntent::SetTopicFilter("CELL".into()));
        let visible: Vec<&str> = s.visible_topics().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec!["t1"]);
    }

    #[test]
    fn test_select_topic_ignores_unknown_ids() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let (_, token) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into()))));
        s.dispatch(NavIntent::TopicsLoaded {
            token,
            folder_id: "f1".into(),
            result: Ok(vec![topic("t1", "f1", "Cells")]),
        });

        s.dispatch(NavIntent::SelectTopic("missing".into()));
        assert!(s.selected_topic().is_none());

        s.dispatch(NavIntent::SelectTopic("t1".into()));
        assert_eq!(s.selected_topic().map(|t| t.title.as_str()), Some("Cells"));
    }

    #[test]
    fn test_rename_blank_is_rejected_locally() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::BeginRename("f1".into()));
        for name in ["", "   ", "\t\n"] {
            let out = s.dispatch(NavIntent::SubmitRename {
                folder_id: "f1".into(),
                name: name.into(),
            });
            assert!(!out.iter().any(|c| matches!(c, NavCommand::RenameFolder { .. })));
        }
        assert_eq!(s.editing_folder_id.as_deref(), Some("f1"));
    }

    #[test]
    fn test_rename_success_patches_and_reconciles() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::BeginRename("f1".into()));
        let out = s.dispatch(NavIntent::SubmitRename {
            folder_id: "f1".into(),
            name: "  Botany ".into(),
        });
        let token = match &out[..] {
            [NavCommand::RenameFolder { name, token, .. }] => {
                assert_eq!(name, "Botany");
                token.clone()
            }
            other => panic!("unexpected commands: {other:?}"),
        };

        let out = s.dispatch(NavIntent::FolderRenamed {
            token,
            folder_id: "f1".into(),
            name: "Botany".into(),
            result: Ok(()),
        });
        assert_eq!(s.folders[0].name, "Botany");
        assert!(s.editing_folder_id.is_none());
        assert!(has_notify(&out, Severity::Success));
        fetch_token(&out);
    }

    #[test]
    fn test_rename_failure_keeps_editor_open() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::BeginRename("f1".into()));
        let out = s.dispatch(NavIntent::SubmitRename {
            folder_id: "f1".into(),
            name: "Botany".into(),
        });
        let NavCommand::RenameFolder { token, .. } = out[0].clone() else {
            panic!("expected rename");
        };
        let out = s.dispatch(NavIntent::FolderRenamed {
            token,
            folder_id: "f1".into(),
            name: "Botany".into(),
            result: Err(net_err()),
        });
        assert!(has_notify(&out, Severity::Error));
        assert_eq!(s.editing_folder_id.as_deref(), Some("f1"));
        assert_eq!(s.folders[0].name, "Biology");
    }

    #[test]
    fn test_delete_active_folder_resets_selection() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));
        let out = s.dispatch(NavIntent::RequestDelete("f1".into()));
        let NavCommand::DeleteFolder { token, .. } = out[0].clone() else {
            panic!("expected delete");
        };

        let out = s.dispatch(NavIntent::FolderDeleted {
            token,
            folder_id: "f1".into(),
            result: Ok(()),
        });
        assert_eq!(s.selection, Selection::None);
        assert!(!s.extended);
        assert!(s.topics.is_empty());
        assert!(out.contains(&NavCommand::SelectionChanged(Selection::None)));

        // The reconciling list no longer includes f1.
        let token = fetch_token(&out);
        s.dispatch(NavIntent::FoldersLoaded {
            token,
            result: Ok(vec![]),
        });
        assert!(s.folder("f1").is_none());
    }

    #[test]
    fn test_delete_inactive_folder_keeps_selection() {
        let mut s = loaded(vec![folder("f1", "Biology"), folder("f2", "Chemistry")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f2".into())));
        let out = s.dispatch(NavIntent::RequestDelete("f1".into()));
        let NavCommand::DeleteFolder { token, .. } = out[0].clone() else {
            panic!("expected delete");
        };
        let out = s.dispatch(NavIntent::FolderDeleted {
            token,
            folder_id: "f1".into(),
            result: Ok(()),
        });
        assert_eq!(s.selection, Selection::Folder("f2".into()));
        assert!(!out.iter().any(|c| matches!(c, NavCommand::SelectionChanged(_))));
    }

    #[test]
    fn test_double_delete_issues_one_request() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let first = s.dispatch(NavIntent::RequestDelete("f1".into()));
        let second = s.dispatch(NavIntent::RequestDelete("f1".into()));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert!(s.is_deleting("f1"));
    }

    #[test]
    fn test_stale_rename_after_delete_is_ignored() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let rename = s.dispatch(NavIntent::SubmitRename {
            folder_id: "f1".into(),
            name: "Botany".into(),
        });
        let NavCommand::RenameFolder { token: rename_token, .. } = rename[0].clone() else {
            panic!("expected rename");
        };
        let delete = s.dispatch(NavIntent::RequestDelete("f1".into()));
        let NavCommand::DeleteFolder { token: delete_token, .. } = delete[0].clone() else {
            panic!("expected delete");
        };

        s.dispatch(NavIntent::FolderDeleted {
            token: delete_token,
            folder_id: "f1".into(),
            result: Ok(()),
        });
        // The rename resolves last but was issued first: it must not
        // resurrect or patch anything locally.
        let out = s.dispatch(NavIntent::FolderRenamed {
            token: rename_token,
            folder_id: "f1".into(),
            name: "Botany".into(),
            result: Ok(()),
        });
        assert!(s.folder("f1").is_none());
        assert!(!has_notify(&out, Severity::Success));
    }

    #[test]
    fn test_create_folder_appends_and_is_selectable() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let out = s.dispatch(NavIntent::CreateFolder(NewFolder {
            name: " Physics ".into(),
            theme: "plum".into(),
            icon: "Camera".into(),
        }));
        assert_eq!(
            out,
            vec![NavCommand::CreateFolder(NewFolder {
                name: "Physics".into(),
                theme: "plum".into(),
                icon: "Camera".into(),
            })]
        );

        let out = s.dispatch(NavIntent::FolderCreated {
            result: Ok(folder("f9", "Physics")),
        });
        assert_eq!(s.folders.last().map(|f| f.id.as_str()), Some("f9"));
        fetch_token(&out);

        let out = s.dispatch(NavIntent::Select(NavTarget::Folder("f9".into())));
        assert_eq!(topics_token(&out).0, "f9");
    }

    #[test]
    fn test_create_folder_blank_name_rejected() {
        let mut s = loaded(vec![]);
        let out = s.dispatch(NavIntent::CreateFolder(NewFolder {
            name: "  ".into(),
            theme: "lime".into(),
            icon: "Folder".into(),
        }));
        assert!(!out.iter().any(|c| matches!(c, NavCommand::CreateFolder(_))));
    }

    #[test]
    fn test_create_folder_failure_keeps_state() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let out = s.dispatch(NavIntent::FolderCreated {
            result: Err(net_err()),
        });
        assert!(has_notify(&out, Severity::Error));
        assert_eq!(s.folders.len(), 1);
    }

    #[test]
    fn test_overlays_are_exclusive() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::OpenContextMenu {
            folder_id: "f1".into(),
            position: MenuPosition { x: 10.0, y: 20.0 },
        });
        assert!(matches!(&s.overlay, Overlay::ContextMenu { folder_id, .. } if folder_id == "f1"));

        s.dispatch(NavIntent::ToggleAccountMenu {
            position: MenuPosition::beside_account_button(64.0, 500.0),
        });
        assert_eq!(
            s.overlay,
            Overlay::AccountMenu {
                position: MenuPosition { x: 72.0, y: 425.0 }
            }
        );

        s.dispatch(NavIntent::CloseOverlay);
        assert_eq!(s.overlay, Overlay::Closed);
    }

    #[test]
    fn test_edit_from_context_menu_closes_it() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::OpenContextMenu {
            folder_id: "f1".into(),
            position: MenuPosition::default(),
        });
        s.dispatch(NavIntent::BeginRename("f1".into()));
        assert_eq!(s.overlay, Overlay::Closed);
        assert_eq!(s.editing_folder_id.as_deref(), Some("f1"));
    }

    #[test]
    fn test_logout_closes_account_menu() {
        let mut s = loaded(vec![]);
        s.dispatch(NavIntent::ToggleAccountMenu {
            position: MenuPosition::default(),
        });
        let out = s.dispatch(NavIntent::Logout);
        assert_eq!(out, vec![NavCommand::Logout]);
        assert_eq!(s.overlay, Overlay::Closed);
    }

    #[test]
    fn test_hub_keeps_panel_open_without_folder() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));
        let out = s.dispatch(NavIntent::OpenHub);
        assert_eq!(out, vec![NavCommand::SelectionChanged(Selection::None)]);
        assert!(s.extended);
        assert!(s.hub_active);
        assert!(s.topics.is_empty());
        assert_eq!(s.main_view(), MainView::Hub);
    }

    #[test]
    fn test_create_topic_scoped_to_active_folder_and_refetches() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));
        s.dispatch(NavIntent::OpenCreateTopic);
        assert!(s.create_topic_open);

        let out = s.dispatch(NavIntent::CreateTopic {
            kind: TopicKind::Notes,
            title: "Cells".into(),
            now_iso: "2024-01-01T00:00:00Z".into(),
        });
        match &out[..] {
            [NavCommand::CreateTopic(t)] => {
                assert_eq!(t.folder_id.as_deref(), Some("f1"));
                assert_eq!(t.title, "Cells");
            }
            other => panic!("unexpected commands: {other:?}"),
        }

        let out = s.dispatch(NavIntent::TopicCreated { result: Ok(()) });
        assert!(!s.create_topic_open);
        assert_eq!(topics_token(&out).0, "f1");
    }

    #[test]
    fn test_create_topic_failure_warns_and_keeps_dialog() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));
        s.dispatch(NavIntent::OpenCreateTopic);
        let out = s.dispatch(NavIntent::TopicCreated {
            result: Err(net_err()),
        });
        assert!(has_notify(&out, Severity::Warning));
        assert!(s.create_topic_open);
    }

    #[test]
    fn test_create_topic_dialog_requires_folder() {
        let mut s = loaded(vec![]);
        s.dispatch(NavIntent::OpenCreateTopic);
        assert!(!s.create_topic_open);
    }

    #[test]
    fn test_reload_dropping_selected_folder_resets_selection() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));
        let cmds = s.dispatch(NavIntent::Reload);
        let out = s.dispatch(NavIntent::FoldersLoaded {
            token: fetch_token(&cmds),
            result: Ok(vec![folder("f2", "Chemistry")]),
        });
        assert_eq!(s.selection, Selection::None);
        assert!(out.contains(&NavCommand::SelectionChanged(Selection::None)));
    }

    #[test]
    fn test_sync_op_wording() {
        assert_eq!(SyncOp::DeleteFolder.failure_message(), "Failed to delete folder");
        assert_eq!(SyncOp::LoadTopics.failure_severity(), Severity::Warning);
        assert_eq!(SyncOp::RenameFolder.failure_severity(), Severity::Error);
        assert!(SyncOp::LoadFolders.success_message().is_none());
    }

    #[test]
    fn test_leaving_hub_for_home_moves_indicator() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into())));
        s.dispatch(NavIntent::OpenHub);
        let in_hub = s.indicator_inputs();
        assert!(!s.is_home_active());

        s.dispatch(NavIntent::Select(NavTarget::Home));
        assert!(s.is_home_active());
        assert_ne!(s.indicator_inputs(), in_hub);
    }

    #[test]
    fn test_reordered_folders_move_indicator() {
        let mut s = loaded(vec![folder("a", "A"), folder("b", "B")]);
        s.dispatch(NavIntent::Select(NavTarget::Folder("b".into())));
        let before = s.indicator_inputs();

        let cmds = s.dispatch(NavIntent::Reload);
        s.dispatch(NavIntent::FoldersLoaded {
            token: fetch_token(&cmds),
            result: Ok(vec![folder("b", "B"), folder("a", "A")]),
        });
        assert_eq!(s.folders.len(), 2);
        assert_ne!(s.indicator_inputs(), before);
    }

    #[test]
    fn test_failed_topic_fetch_hides_empty_placeholder() {
        let mut s = loaded(vec![folder("f1", "Biology")]);
        let (_, token) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into()))));
        s.dispatch(NavIntent::TopicsLoaded {
            token,
            folder_id: "f1".into(),
            result: Err(net_err()),
        });
        assert!(s.topics_error);
        assert!(!s.shows_empty_topics());

        // A later successful fetch clears the error.
        let (_, token) = topics_token(&s.dispatch(NavIntent::Select(NavTarget::Folder("f1".into()))));
        s.dispatch(NavIntent::TopicsLoaded {
            token,
            folder_id: "f1".into(),
            result: Ok(vec![]),
        });
        assert!(!s.topics_error);
        assert!(s.shows_empty_topics());
    }

    #[test]
    fn test_account_button_toggles_its_menu() {
        let mut s = loaded(vec![]);
        let position = MenuPosition::beside_account_button(64.0, 500.0);
        s.dispatch(NavIntent::ToggleAccountMenu { position });
        assert_eq!(s.overlay, Overlay::AccountMenu { position });

        s.dispatch(NavIntent::ToggleAccountMenu { position });
        assert_eq!(s.overlay, Overlay::Closed);
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Signed-in user as returned by the auth backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl SessionUser {
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Folder {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,

    /// Raw palette key. Use [`Folder::theme`] for the parsed value.
    #[serde(default)]
    pub theme: String,

    /// Raw icon key. Use [`Folder::icon`] for the parsed value.
    #[serde(default)]
    pub icon: String,

    #[serde(rename = "userId", default)]
    pub user_id: String,
}

impl Folder {
    pub fn theme(&self) -> FolderTheme {
        FolderTheme::from_key(&self.theme)
    }

    pub fn icon(&self) -> FolderIcon {
        FolderIcon::from_key(&self.icon)
    }
}

/// Named folder tints. Unknown keys fall back to `Plain` (no tint).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum FolderTheme {
    #[default]
    #[strum(disabled)]
    Plain,
    Lime,
    Lychee,
    Mango,
    Plum,
    Blueberry,
    Kiwi,
    Pitaya,
    Smoothie,
    Macaron,
}

impl FolderTheme {
    pub fn from_key(key: &str) -> Self {
        Self::from_str(key.trim()).unwrap_or_default()
    }

    pub fn color(self) -> Option<&'static str> {
        match self {
            FolderTheme::Plain => None,
            FolderTheme::Lime => Some("#84cc16"),
            FolderTheme::Lychee => Some("#ec4899"),
            FolderTheme::Mango => Some("#f97316"),
            FolderTheme::Plum => Some("#a855f7"),
            FolderTheme::Blueberry => Some("#3b82f6"),
            FolderTheme::Kiwi => Some("#22c55e"),
            FolderTheme::Pitaya => Some("#d946ef"),
            FolderTheme::Smoothie => Some("#06b6d4"),
            FolderTheme::Macaron => Some("#f43f5e"),
        }
    }

    /// Themes offered in the create-folder dialog.
    pub fn choices() -> impl Iterator<Item = FolderTheme> {
        use strum::IntoEnumIterator;
        Self::iter().filter(|t| *t != FolderTheme::Plain)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub(crate) enum FolderIcon {
    #[strum(serialize = "Computer Mouse")]
    ComputerMouse,
    #[strum(serialize = "Photo Stack")]
    PhotoStack,
    Camera,
    Eraser,
    #[strum(serialize = "Test Tube")]
    TestTube,
    Trash,
    #[default]
    Folder,
    Paperplane,
    Tray,
}

impl FolderIcon {
    pub fn from_key(key: &str) -> Self {
        Self::from_str(key.trim()).unwrap_or_default()
    }

    pub fn choices() -> impl Iterator<Item = FolderIcon> {
        use strum::IntoEnumIterator;
        Self::iter()
    }
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum TopicKind {
    #[default]
    Notes,
    Quiz,
    Flashcards,
}

impl TopicKind {
    pub fn label(self) -> &'static str {
        match self {
            TopicKind::Notes => "Notes",
            TopicKind::Quiz => "Quiz",
            TopicKind::Flashcards => "Flashcards",
        }
    }

    pub fn choices() -> impl Iterator<Item = TopicKind> {
        use strum::IntoEnumIterator;
        Self::iter()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Topic {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(rename = "folderId", default)]
    pub folder_id: Option<String>,

    pub title: String,

    #[serde(rename = "type")]
    pub kind: TopicKind,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,

    /// Shape depends on `kind`; decode with [`Topic::content`].
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Topic {
    pub fn content(&self) -> Option<TopicContent> {
        TopicContent::decode(self.kind, self.content.clone())
    }

    /// Second line in the topic list.
    pub fn subtitle(&self) -> String {
        match self.kind {
            TopicKind::Notes => {
                let edited = match self.content() {
                    Some(TopicContent::Notes(n)) if !n.last_edited.trim().is_empty() => {
                        n.last_edited
                    }
                    _ => self.updated_at.clone(),
                };
                format!("Last edited: {}", crate::util::date_part(&edited))
            }
            kind => kind.label().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct NotesContent {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "lastEdited", default)]
    pub last_edited: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct QuizQuestion {
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct QuizContent {
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct FlashcardsContent {
    #[serde(default)]
    pub cards: Vec<Flashcard>,
}

/// Typed view of a topic payload. The `type` tag lives on the topic record,
/// so this is encoded untagged.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub(crate) enum TopicContent {
    Notes(NotesContent),
    Quiz(QuizContent),
    Flashcards(FlashcardsContent),
}

impl TopicContent {
    /// Empty payload for a freshly created topic.
    pub fn empty(kind: TopicKind, now_iso: &str) -> Self {
        match kind {
            TopicKind::Notes => TopicContent::Notes(NotesContent {
                text: String::new(),
                last_edited: now_iso.to_string(),
            }),
            TopicKind::Quiz => TopicContent::Quiz(QuizContent { questions: vec![] }),
            TopicKind::Flashcards => {
                TopicContent::Flashcards(FlashcardsContent { cards: vec![] })
            }
        }
    }

    pub fn decode(kind: TopicKind, value: serde_json::Value) -> Option<Self> {
        match kind {
            TopicKind::Notes => serde_json::from_value(value).ok().map(TopicContent::Notes),
            TopicKind::Quiz => serde_json::from_value(value).ok().map(TopicContent::Quiz),
            TopicKind::Flashcards => serde_json::from_value(value)
                .ok()
                .map(TopicContent::Flashcards),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Document {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "fileType", default)]
    pub file_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_accepts_underscore_id() {
        let json = r#"{"_id":"f1","name":"Biology","theme":"lime","icon":"Folder","userId":"u1"}"#;
        let f: Folder = serde_json::from_str(json).expect("folder should parse");
        assert_eq!(f.id, "f1");
        assert_eq!(f.user_id, "u1");
        assert_eq!(f.theme(), FolderTheme::Lime);
        assert_eq!(f.theme().color(), Some("#84cc16"));
        assert_eq!(f.icon(), FolderIcon::Folder);
    }

    #[test]
    fn test_folder_unknown_theme_and_icon_fall_back() {
        let json = r#"{"id":"f2","name":"Misc","theme":"durian","icon":"Rocket"}"#;
        let f: Folder = serde_json::from_str(json).expect("folder should parse");
        assert_eq!(f.theme(), FolderTheme::Plain);
        assert!(f.theme().color().is_none());
        assert_eq!(f.icon(), FolderIcon::Folder);
    }

    #[test]
    fn test_icon_keys_with_spaces() {
        assert_eq!(FolderIcon::from_key("Computer Mouse"), FolderIcon::ComputerMouse);
        assert_eq!(FolderIcon::from_key("Test Tube"), FolderIcon::TestTube);
        assert_eq!(FolderIcon::PhotoStack.to_string(), "Photo Stack");
        assert_eq!(FolderIcon::choices().count(), 9);
    }

    #[test]
    fn test_theme_choices_exclude_plain() {
        let keys: Vec<String> = FolderTheme::choices().map(|t| t.to_string()).collect();
        assert_eq!(keys.len(), 9);
        assert_eq!(keys[0], "lime");
        assert!(!keys.iter().any(|k| k == "plain"));
    }

    #[test]
    fn test_topic_notes_content_decodes() {
        let json = r#"{
            "_id": "t1",
            "folderId": "f1",
            "title": "Cells",
            "type": "notes",
            "updatedAt": "2024-03-05T10:00:00Z",
            "content": {"text": "mitochondria", "lastEdited": "2024-03-05T10:00:00Z"}
        }"#;
        let t: Topic = serde_json::from_str(json).expect("topic should parse");
        assert_eq!(t.kind, TopicKind::Notes);
        match t.content() {
            Some(TopicContent::Notes(n)) => assert_eq!(n.text, "mitochondria"),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_topic_without_folder_is_unscoped() {
        let json = r#"{"id":"t2","title":"Loose","type":"flashcards","content":{"cards":[{"front":"a","back":"b"}]}}"#;
        let t: Topic = serde_json::from_str(json).expect("topic should parse");
        assert!(t.folder_id.is_none());
        match t.content() {
            Some(TopicContent::Flashcards(c)) => assert_eq!(c.cards.len(), 1),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_empty_content_shape_per_kind() {
        let notes = serde_json::to_value(TopicContent::empty(TopicKind::Notes, "2024-01-01T00:00:00Z"))
            .expect("should serialize");
        assert_eq!(notes["text"], "");
        assert_eq!(notes["lastEdited"], "2024-01-01T00:00:00Z");

        let quiz = serde_json::to_value(TopicContent::empty(TopicKind::Quiz, "")).expect("should serialize");
        assert!(quiz["questions"].as_array().is_some_and(|q| q.is_empty()));
    }

    #[test]
    fn test_topic_subtitle_per_kind() {
        let notes: Topic = serde_json::from_value(serde_json::json!({
            "_id": "t1",
            "title": "Cells",
            "type": "notes",
            "updatedAt": "2024-04-01T08:00:00Z",
            "content": {"text": "", "lastEdited": "2024-03-05T10:00:00Z"}
        }))
        .expect("topic should parse");
        assert_eq!(notes.subtitle(), "Last edited: 2024-03-05");

        let bare = Topic {
            content: serde_json::Value::Null,
            ..notes.clone()
        };
        assert_eq!(bare.subtitle(), "Last edited: 2024-04-01");

        let quiz = Topic {
            kind: TopicKind::Quiz,
            ..notes
        };
        assert_eq!(quiz.subtitle(), "Quiz");
    }

    #[test]
    fn test_session_user_display_name() {
        let u = SessionUser {
            id: "u1".into(),
            email: "ada@example.com".into(),
            full_name: None,
        };
        assert_eq!(u.display_name(), "ada");

        let named = SessionUser {
            full_name: Some("Ada Lovelace".into()),
            ..u
        };
        assert_eq!(named.display_name(), "Ada Lovelace");
    }
}

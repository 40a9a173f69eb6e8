use crate::models::{Document, Folder, SessionUser, Topic, TopicContent, TopicKind};
use crate::storage::{
    clear_session_storage, load_token_from_storage, save_token_to_storage, save_user_to_storage,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    /// Non-success HTTP status.
    Fetch,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    pub(crate) fn fetch(status: u16, body: &str, ctx: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("{ctx} ({status})")
        } else {
            format!("{ctx} ({status}): {body}")
        };
        Self {
            kind: ApiErrorKind::Fetch,
            message,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub toast_ms: u32,
}

impl EnvConfig {
    const DEFAULT_API_URL: &'static str = "http://localhost:3000";
    const DEFAULT_TOAST_MS: u32 = 4000;

    pub fn new() -> Self {
        let mut config = Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            toast_ms: Self::DEFAULT_TOAST_MS,
        };

        // Both `window.ENV.API_URL` and the lower-case spelling are accepted.
        let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) else {
            return config;
        };
        if env.is_undefined() || !env.is_object() {
            return config;
        }

        let read = |keys: [&str; 2]| {
            keys.iter().find_map(|k| {
                js_sys::Reflect::get(&env, &wasm_bindgen::JsValue::from_str(k))
                    .ok()
                    .filter(|v| !v.is_undefined() && !v.is_null())
            })
        };

        if let Some(url) = read(["API_URL", "api_url"]).and_then(|v| v.as_string()) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(ms) = read(["TOAST_MS", "toast_ms"]).and_then(|v| v.as_f64()) {
            if ms >= 0.0 {
                config.toast_ms = ms as u32;
            }
        }

        config
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewFolder {
    pub name: String,
    pub theme: String,
    pub icon: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RenameFolderRequest {
    pub name: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub(crate) struct NewTopic {
    #[serde(rename = "type")]
    pub kind: TopicKind,
    pub title: String,
    #[serde(rename = "folderId", skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub content: TopicContent,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewDocument {
    pub title: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
    pub size: u64,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        Self {
            base_url: EnvConfig::new().api_url,
            token: load_token_from_storage(),
        }
    }

    pub fn save_to_storage(&self) {
        if let Some(token) = &self.token {
            save_token_to_storage(token);
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Stores a fresh session after sign-in or sign-up.
    pub fn start_session(&mut self, auth: &AuthResponse) {
        self.set_token(auth.token.clone());
        self.save_to_storage();
        save_user_to_storage(&auth.user);
    }

    pub fn logout(&mut self) {
        self.token = None;
        clear_session_storage();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let req = reqwest::Client::new().request(method, self.url(path));
        match &self.token {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn send(req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::fetch(status, &body, ctx))
        }
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
        ctx: &str,
    ) -> ApiResult<T> {
        let mut req = self.builder(method, path);
        if let Some(b) = body {
            req = req.json(b);
        }
        let res = Self::send(req, ctx).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// For endpoints whose response body is irrelevant (often empty).
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
        ctx: &str,
    ) -> ApiResult<()> {
        let mut req = self.builder(method, path);
        if let Some(b) = body {
            req = req.json(b);
        }
        Self::send(req, ctx).await.map(|_| ())
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.request_json(
            Method::POST,
            "/api/auth/login",
            Some(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            }),
            "Sign in failed",
        )
        .await
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> ApiResult<AuthResponse> {
        let full_name = full_name.trim();
        self.request_json(
            Method::POST,
            "/api/auth/signup",
            Some(&SignupRequest {
                email: email.to_string(),
                password: password.to_string(),
                full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
            }),
            "Sign up failed",
        )
        .await
    }

    /// Best-effort server-side sign-out.
    pub async fn remote_logout(&self) -> ApiResult<()> {
        self.request_empty(
            Method::POST,
            "/api/auth/logout",
            None::<&()>,
            "Sign out failed",
        )
        .await
    }

    pub async fn list_folders(&self) -> ApiResult<Vec<Folder>> {
        self.request_json(Method::GET, "/api/folders", None::<&()>, "Failed to fetch folders")
            .await
    }

    pub async fn create_folder(&self, folder: &NewFolder) -> ApiResult<Folder> {
        self.request_json(
            Method::POST,
            "/api/folders",
            Some(folder),
            "Failed to create folder",
        )
        .await
    }

    pub async fn rename_folder(&self, folder_id: &str, name: &str) -> ApiResult<()> {
        self.request_empty(
            Method::PATCH,
            &format!("/api/folders/{}", urlencoding::encode(folder_id)),
            Some(&RenameFolderRequest {
                name: name.to_string(),
            }),
            "Failed to update folder",
        )
        .await
    }

    pub async fn delete_folder(&self, folder_id: &str) -> ApiResult<()> {
        self.request_empty(
            Method::DELETE,
            &format!("/api/folders?id={}", urlencoding::encode(folder_id)),
            None::<&()>,
            "Failed to delete folder",
        )
        .await
    }

    pub async fn list_topics(&self, folder_id: &str) -> ApiResult<Vec<Topic>> {
        self.request_json(
            Method::GET,
            &format!("/api/topics?folderId={}", urlencoding::encode(folder_id)),
            None::<&()>,
            "Failed to fetch topics",
        )
        .await
    }

    pub async fn create_topic(&self, topic: &NewTopic) -> ApiResult<()> {
        self.request_empty(Method::POST, "/api/topics", Some(topic), "Failed to create topic")
            .await
    }

    pub async fn list_documents(&self) -> ApiResult<Vec<Document>> {
        self.request_json(
            Method::GET,
            "/api/documents",
            None::<&()>,
            "Failed to fetch documents",
        )
        .await
    }

    /// Uploads raw file bytes to the document bucket at `path`.
    pub async fn upload_object(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> ApiResult<()> {
        let req = self
            .builder(Method::PUT, &storage_path(path))
            .header("Content-Type", content_type)
            .body(bytes);
        Self::send(req, "Upload failed").await.map(|_| ())
    }

    pub async fn delete_object(&self, path: &str) -> ApiResult<()> {
        self.request_empty(
            Method::DELETE,
            &storage_path(path),
            None::<&()>,
            "Failed to remove stored file",
        )
        .await
    }

    pub async fn create_document(&self, doc: &NewDocument) -> ApiResult<Document> {
        self.request_json(
            Method::POST,
            "/api/documents",
            Some(doc),
            "Failed to save document",
        )
        .await
    }

    pub async fn delete_document(&self, document_id: &str) -> ApiResult<()> {
        self.request_empty(
            Method::DELETE,
            &format!("/api/documents?id={}", urlencoding::encode(document_id)),
            None::<&()>,
            "Failed to delete document",
        )
        .await
    }
}

fn storage_path(path: &str) -> String {
    format!("/api/storage/documents/{}", urlencoding::encode(path))
}

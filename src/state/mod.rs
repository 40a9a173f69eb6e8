pub(crate) mod nav_sync;
pub(crate) mod navigation;
pub(crate) mod tokens;

use crate::api::{ApiClient, AuthResponse, EnvConfig};
use crate::models::SessionUser;
use crate::storage::load_user_from_storage;
use leptos::prelude::*;

pub(crate) use nav_sync::NavController;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<SessionUser>>,
}

impl AppState {
    pub fn new(config: &EnvConfig) -> Self {
        let mut client = ApiClient::load_from_storage();
        client.base_url = config.api_url.clone();

        Self {
            api_client: RwSignal::new(client),
            current_user: RwSignal::new(load_user_from_storage()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_client.with(|c| c.is_authenticated())
    }

    /// Persists a fresh session returned by sign-in or sign-up.
    pub fn begin_session(&self, auth: AuthResponse) {
        self.api_client.update(|c| c.start_session(&auth));
        self.current_user.set(Some(auth.user));
    }

    /// Drops the local session and hard-navigates to the sign-in page.
    pub fn end_session(&self) {
        self.api_client.update(|c| c.logout());
        self.current_user.set(None);
        let _ = window().location().set_href("/login");
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

mod dashboard;
mod documents;

pub use dashboard::DashboardPage;
pub use documents::DocumentsPage;

use crate::api::ApiError;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    ErrorAlert, Input, Label, Spinner,
};
use crate::notify::Notifier;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

/// Reports a failed call made outside the sidebar. A 401 ends the session
/// instead of showing a toast.
pub(crate) fn report_api_error(app_state: AppContext, notifier: Notifier, message: &str, e: &ApiError) {
    web_sys::console::error_1(&format!("[Pages] {}: {}", message, e).into());
    if e.is_unauthorized() {
        app_state.0.end_session();
    } else {
        notifier.error(format!("{}: {}", message, e));
    }
}

/// Sign-in and sign-up on one form; a link toggles between the modes.
#[component]
pub fn AuthPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let full_name: RwSignal<String> = RwSignal::new(String::new());
    let is_sign_up: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let name_val = full_name.get_untracked();
        let sign_up = is_sign_up.get_untracked();
        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = if sign_up {
                api_client.signup(&email_val, &password_val, &name_val).await
            } else {
                api_client.login(&email_val, &password_val).await
            };

            match result {
                Ok(auth) => {
                    app_state.0.begin_session(auth);
                    let _ = window().location().set_href("/");
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[Auth] {}", e).into());
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    let toggle_mode = move |_| {
        is_sign_up.update(|v| *v = !*v);
        error.set(None);
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <span class="text-sm font-medium text-foreground">"Study Hub"</span>
                </div>

                <Card>
                    <CardHeader>
                        <div class="space-y-1.5">
                            <CardTitle class="text-lg">
                                {move || if is_sign_up.get() { "Create your account" } else { "Welcome back" }}
                            </CardTitle>
                            <CardDescription>
                                {move || {
                                    if is_sign_up.get() {
                                        "Start managing your documents"
                                    } else {
                                        "Sign in to access your documents"
                                    }
                                }}
                            </CardDescription>
                        </div>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <Show when=move || is_sign_up.get()>
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="full-name">"Full name (optional)"</Label>
                                    <Input id="full-name" autocomplete="name" bind_value=full_name class="h-8" />
                                </div>
                            </Show>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    autocomplete="email"
                                    placeholder="Enter your email"
                                    bind_value=email
                                    required=true
                                    class="h-8"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="Enter your password"
                                    bind_value=password
                                    required=true
                                    class="h-8"
                                />
                            </div>

                            {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

                            <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || loading.get()>
                                <Show when=move || loading.get()>
                                    <Spinner />
                                </Show>
                                {move || match (loading.get(), is_sign_up.get()) {
                                    (true, _) => "Processing...",
                                    (false, true) => "Create Account",
                                    (false, false) => "Sign In",
                                }}
                            </Button>
                        </form>

                        <div class="pt-3 text-center">
                            <Button
                                attr:r#type="button"
                                variant=ButtonVariant::Link
                                size=ButtonSize::Sm
                                class="text-xs text-muted-foreground"
                                on:click=toggle_mode
                            >
                                {move || {
                                    if is_sign_up.get() {
                                        "Already have an account? Sign in"
                                    } else {
                                        "Don't have an account? Sign up"
                                    }
                                }}
                            </Button>
                        </div>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

/// `/login`: a signed-in user goes straight to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.is_authenticated();

    view! {
        <Show when=is_authenticated fallback=|| view! { <AuthPage /> }>
            <Redirect path="/" />
        </Show>
    }
}

#[component]
pub fn RootAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=move || view! { <AuthPage /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    view! {
        <RootAuthed>
            <DashboardPage />
        </RootAuthed>
    }
}

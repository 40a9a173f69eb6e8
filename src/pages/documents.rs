use crate::api::{ApiClient, ApiResult, NewDocument};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    ErrorAlert, Loading, Spinner,
};
use crate::documents::{
    file_type_label, remove_stored_document, storage_object_name, validate_upload, UploadRows, UploadStatus, ACCEPT_ATTR,
    DELETE_FAILURE, DELETE_SUCCESS, FINISHED_ROW_MS, LOAD_FAILURE, UPLOAD_FAILURE, UPLOAD_SUCCESS,
};
use crate::models::Document;
use crate::notify::Notifier;
use crate::pages::report_api_error;
use crate::state::AppContext;
use crate::util::{date_part, format_bytes, now_ms, run_after};
use icons::{ArrowLeft, FileText, Trash2, Upload};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use std::collections::HashSet;
use wasm_bindgen_futures::JsFuture;

fn files_of(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

async fn read_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buf = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read file: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Stores the bytes, then records the document. A failed record removes the
/// stored object again so nothing is left orphaned.
async fn store_document(
    api: &ApiClient,
    name: &str,
    mime: &str,
    size: u64,
    bytes: Vec<u8>,
) -> ApiResult<Document> {
    let path = storage_object_name(now_ms(), name);
    api.upload_object(&path, mime, bytes).await?;

    let record = NewDocument {
        title: name.to_string(),
        file_path: path.clone(),
        file_type: mime.to_string(),
        size,
    };
    match api.create_document(&record).await {
        Ok(doc) => Ok(doc),
        Err(e) => {
            if let Err(cleanup) = api.delete_object(&path).await {
                web_sys::console::warn_1(
                    &format!("[Documents] cleanup of {} failed: {}", path, cleanup).into(),
                );
            }
            Err(e)
        }
    }
}

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notifier = expect_context::<Notifier>();

    let documents: RwSignal<Vec<Document>> = RwSignal::new(Vec::new());
    let loading = RwSignal::new(true);
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);
    let uploads: RwSignal<UploadRows> = RwSignal::new(UploadRows::default());
    let deleting: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());
    let drag_over = RwSignal::new(false);
    let picker_ref = NodeRef::<html::Input>::new();

    {
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.list_documents().await {
                Ok(list) => {
                    let _ = documents.try_set(list);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[Documents] list failed: {}", e).into());
                    if e.is_unauthorized() {
                        app_state.0.end_session();
                        return;
                    }
                    let _ = load_error.try_set(Some(LOAD_FAILURE.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    }

    let upload = move |file: web_sys::File| {
        let name = file.name();
        let size = file.size() as u64;
        let mime = file.type_();

        if let Err(rejection) = validate_upload(&name, size, &mime) {
            web_sys::console::warn_1(&format!("[Documents] rejected {}: {}", name, rejection).into());
            notifier.error(rejection.message());
            return;
        }

        let Some(row_id) = uploads.try_update(|u| u.start(&name, size)) else {
            return;
        };
        let api_client = app_state.0.api_client.get_untracked();

        spawn_local(async move {
            let result = match read_bytes(&file).await {
                Ok(bytes) => store_document(&api_client, &name, &mime, size, bytes)
                    .await
                    .map_err(|e| {
                        if e.is_unauthorized() {
                            app_state.0.end_session();
                        }
                        e.to_string()
                    }),
                Err(msg) => Err(msg),
            };

            match result {
                Ok(doc) => {
                    let _ = documents.try_update(|d| d.insert(0, doc));
                    let _ = uploads.try_update(|u| u.finish(row_id, UploadStatus::Done));
                    notifier.success(UPLOAD_SUCCESS);
                }
                Err(msg) => {
                    web_sys::console::error_1(&format!("[Documents] upload of {} failed: {}", name, msg).into());
                    let _ = uploads.try_update(|u| u.finish(row_id, UploadStatus::Failed(msg)));
                    notifier.error(UPLOAD_FAILURE);
                }
            }

            run_after(FINISHED_ROW_MS, move || {
                let _ = uploads.try_update(|u| u.remove(row_id));
            });
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        let files = files_of(ev.data_transfer().and_then(|dt| dt.files()));
        files.into_iter().for_each(upload);
    };

    let on_pick = move |_| {
        let Some(input) = picker_ref.get() else {
            return;
        };
        files_of(input.files()).into_iter().for_each(upload);
        // Picking the same file again should fire `change` again.
        input.set_value("");
    };

    let delete = move |doc: Document| {
        if !deleting.try_update(|d| d.insert(doc.id.clone())).unwrap_or(false) {
            return;
        }
        let api_client = app_state.0.api_client.get_untracked();

        spawn_local(async move {
            let api = &api_client;
            let (path, id) = (doc.file_path.as_str(), doc.id.as_str());
            let result = remove_stored_document(
                move || api.delete_object(path),
                move || api.delete_document(id),
            )
            .await;
            match result {
                Ok(()) => {
                    let _ = documents.try_update(|d| d.retain(|x| x.id != doc.id));
                    notifier.success(DELETE_SUCCESS);
                }
                Err(e) => report_api_error(app_state, notifier, DELETE_FAILURE, &e),
            }
            let _ = deleting.try_update(|d| d.remove(&doc.id));
        });
    };

    let drop_class = move || {
        if drag_over.get() {
            "flex flex-col items-center justify-center gap-2 rounded-lg border-2 border-dashed border-primary bg-primary/5 p-10 text-center"
        } else {
            "flex flex-col items-center justify-center gap-2 rounded-lg border-2 border-dashed border-border p-10 text-center"
        }
    };

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="mx-auto max-w-3xl space-y-6 px-4 py-8">
                <div class="flex items-center gap-3">
                    <A href="/" attr:class="text-muted-foreground hover:text-foreground" attr:title="Back to dashboard">
                        <ArrowLeft class="size-5" />
                    </A>
                    <h1 class="text-2xl font-semibold">"Documents"</h1>
                </div>

                <div
                    class=drop_class
                    on:dragover=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        drag_over.set(true);
                    }
                    on:dragleave=move |_| drag_over.set(false)
                    on:drop=on_drop
                >
                    <Upload class="size-8 text-muted-foreground" />
                    <p class="text-sm">"Drag and drop files here"</p>
                    <p class="text-xs text-muted-foreground">"PDF, TXT, DOC or DOCX up to 5MB"</p>
                    <input
                        node_ref=picker_ref
                        type="file"
                        multiple=true
                        accept=ACCEPT_ATTR
                        class="hidden"
                        on:change=on_pick
                    />
                    <Button
                        attr:r#type="button"
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_| {
                            if let Some(input) = picker_ref.get() {
                                input.click();
                            }
                        }
                    >
                        "Browse files"
                    </Button>
                </div>

                <Show when=move || uploads.with(|u| u.in_flight() > 0)>
                    <p class="text-xs text-muted-foreground">
                        {move || {
                            let n = uploads.with(UploadRows::in_flight);
                            format!("Uploading {} file{}...", n, if n == 1 { "" } else { "s" })
                        }}
                    </p>
                </Show>

                <ul class="space-y-1">
                    <For
                        each=move || uploads.with(|u| u.rows().to_vec())
                        key=|row| (row.id, row.status.clone())
                        children=move |row| {
                            let status = match &row.status {
                                UploadStatus::Uploading => view! { <Spinner /> }.into_any(),
                                UploadStatus::Done => {
                                    view! { <span class="text-xs text-emerald-600">"Uploaded"</span> }.into_any()
                                }
                                UploadStatus::Failed(msg) => {
                                    view! {
                                        <span class="text-xs text-destructive" title=msg.clone()>"Failed"</span>
                                    }
                                        .into_any()
                                }
                            };
                            view! {
                                <li class="flex items-center justify-between rounded-md border border-border px-3 py-2 text-sm">
                                    <span class="truncate">{row.name.clone()}</span>
                                    <span class="flex items-center gap-2">
                                        <span class="text-xs text-muted-foreground">{format_bytes(row.size)}</span>
                                        {status}
                                    </span>
                                </li>
                            }
                        }
                    />
                </ul>

                <Card>
                    <CardHeader>
                        <CardTitle>"Your documents"</CardTitle>
                        <CardDescription>
                            {move || {
                                let n = documents.with(Vec::len);
                                format!("{} document{}", n, if n == 1 { "" } else { "s" })
                            }}
                        </CardDescription>
                    </CardHeader>
                    <CardContent>
                        <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                            {move || load_error.get().map(|message| view! { <ErrorAlert message=message /> })}
                            <Show when=move || load_error.with(Option::is_none) && documents.with(Vec::is_empty)>
                                <p class="py-4 text-center text-sm text-muted-foreground">"No documents yet"</p>
                            </Show>
                            <ul class="divide-y divide-border">
                                <For
                                    each=move || documents.get()
                                    key=|d| d.id.clone()
                                    children=move |doc| {
                                        let id = doc.id.clone();
                                        let busy = move || deleting.with(|d| d.contains(&id));
                                        let meta = format!(
                                            "{} · {} · {}",
                                            file_type_label(&doc.file_type),
                                            format_bytes(doc.size),
                                            date_part(&doc.created_at),
                                        );
                                        let target = doc.clone();
                                        view! {
                                            <li class="flex items-center justify-between gap-3 py-2">
                                                <div class="flex min-w-0 items-center gap-2">
                                                    <FileText class="size-4 shrink-0 text-muted-foreground" />
                                                    <div class="min-w-0">
                                                        <div class="truncate text-sm">{doc.title.clone()}</div>
                                                        <div class="text-xs text-muted-foreground">{meta}</div>
                                                    </div>
                                                </div>
                                                <Button
                                                    attr:r#type="button"
                                                    attr:title="Delete document"
                                                    variant=ButtonVariant::Ghost
                                                    size=ButtonSize::Icon
                                                    attr:disabled=busy
                                                    on:click=move |_| delete(target.clone())
                                                >
                                                    <Trash2 class="size-4 text-destructive" />
                                                </Button>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

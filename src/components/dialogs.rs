use crate::api::NewFolder;
use crate::components::sidebar::FolderGlyph;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, DialogBackdrop, DialogDescription, DialogFooter,
    DialogHeader, DialogPanel, DialogTitle, Input, Label,
};
use crate::models::{FolderIcon, FolderTheme, TopicKind};
use leptos::html;
use leptos::prelude::*;

/// Name, theme and icon for a new folder. Submits only a non-blank name.
#[component]
pub fn CreateFolderDialog(on_submit: Callback<NewFolder>, on_close: Callback<()>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let theme = RwSignal::new(FolderTheme::Lime);
    let icon = RwSignal::new(FolderIcon::Folder);
    let name_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = name_ref.get() {
            let _ = input.focus();
        }
    });

    let can_submit = move || !name.get().trim().is_empty();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        on_submit.run(NewFolder {
            name: name.get_untracked().trim().to_string(),
            theme: theme.get_untracked().to_string(),
            icon: icon.get_untracked().to_string(),
        });
    };

    view! {
        <DialogBackdrop on:click=move |_| on_close.run(())>
            <DialogPanel on:click=|ev| ev.stop_propagation()>
                <form on:submit=submit>
                    <DialogHeader>
                        <DialogTitle>"New folder"</DialogTitle>
                    </DialogHeader>

                    <div class="space-y-3">
                        <div class="space-y-1">
                            <Label html_for="folder-name">"Name"</Label>
                            <Input id="folder-name" node_ref=name_ref bind_value=name class="h-8" />
                        </div>

                        <div class="space-y-1">
                            <Label>"Theme"</Label>
                            <div class="flex flex-wrap gap-2">
                                {FolderTheme::choices()
                                    .map(|t| {
                                        let color = t.color().unwrap_or_default();
                                        view! {
                                            <button
                                                type="button"
                                                title=t.to_string()
                                                aria-pressed=move || (theme.get() == t).to_string()
                                                class=move || {
                                                    if theme.get() == t {
                                                        "size-6 rounded-full ring-2 ring-offset-2 ring-ring"
                                                    } else {
                                                        "size-6 rounded-full opacity-80 hover:opacity-100"
                                                    }
                                                }
                                                style=format!("background-color: {color};")
                                                on:click=move |_| theme.set(t)
                                            />
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>

                        <div class="space-y-1">
                            <Label>"Icon"</Label>
                            <div class="grid grid-cols-5 gap-1">
                                {FolderIcon::choices()
                                    .map(|i| {
                                        view! {
                                            <button
                                                type="button"
                                                title=i.to_string()
                                                class=move || {
                                                    if icon.get() == i {
                                                        "flex items-center justify-center rounded-md bg-accent p-2"
                                                    } else {
                                                        "flex items-center justify-center rounded-md p-2 text-muted-foreground hover:bg-accent/60"
                                                    }
                                                }
                                                style=move || {
                                                    theme.get().color().map(|c| format!("color: {c};"))
                                                }
                                                on:click=move |_| icon.set(i)
                                            >
                                                <FolderGlyph icon=i />
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    </div>

                    <DialogFooter>
                        <Button
                            attr:r#type="button"
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| on_close.run(())
                        >
                            "Cancel"
                        </Button>
                        <Button size=ButtonSize::Sm attr:disabled=move || !can_submit()>
                            "Create"
                        </Button>
                    </DialogFooter>
                </form>
            </DialogPanel>
        </DialogBackdrop>
    }
}

/// Kind and title for a new topic in the active folder.
#[component]
pub fn CreateTopicDialog(
    #[prop(into)] folder_name: String,
    on_submit: Callback<(TopicKind, String)>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let kind = RwSignal::new(TopicKind::Notes);

    let can_submit = move || !title.get().trim().is_empty();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if can_submit() {
            on_submit.run((kind.get_untracked(), title.get_untracked()));
        }
    };

    view! {
        <DialogBackdrop on:click=move |_| on_close.run(())>
            <DialogPanel on:click=|ev| ev.stop_propagation()>
                <form on:submit=submit>
                    <DialogHeader>
                        <DialogTitle>"New topic"</DialogTitle>
                        <DialogDescription>{format!("In {folder_name}")}</DialogDescription>
                    </DialogHeader>

                    <div class="space-y-3">
                        <div class="grid grid-cols-3 gap-1">
                            {TopicKind::choices()
                                .map(|k| {
                                    view! {
                                        <button
                                            type="button"
                                            class=move || {
                                                if kind.get() == k {
                                                    "rounded-md border border-primary bg-primary/10 px-2 py-1.5 text-xs font-medium"
                                                } else {
                                                    "rounded-md border border-border px-2 py-1.5 text-xs text-muted-foreground hover:bg-accent"
                                                }
                                            }
                                            on:click=move |_| kind.set(k)
                                        >
                                            {k.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>

                        <div class="space-y-1">
                            <Label html_for="topic-title">"Title"</Label>
                            <Input id="topic-title" bind_value=title autofocus=true class="h-8" />
                        </div>
                    </div>

                    <DialogFooter>
                        <Button
                            attr:r#type="button"
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| on_close.run(())
                        >
                            "Cancel"
                        </Button>
                        <Button size=ButtonSize::Sm attr:disabled=move || !can_submit()>
                            "Create"
                        </Button>
                    </DialogFooter>
                </form>
            </DialogPanel>
        </DialogBackdrop>
    }
}

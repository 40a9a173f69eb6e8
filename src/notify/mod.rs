use crate::util::run_after;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub(crate) enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    fn toast_class(self) -> &'static str {
        match self {
            Severity::Success => "border-emerald-300 bg-emerald-50 text-emerald-900",
            Severity::Warning => "border-amber-300 bg-amber-50 text-amber-900",
            Severity::Error => "border-destructive/40 bg-destructive/10 text-destructive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

/// Visible toasts, newest last. Older entries fall off past `MAX_VISIBLE`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NotificationList {
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationList {
    const MAX_VISIBLE: usize = 4;

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            severity,
            message: message.into(),
        });
        if self.items.len() > Self::MAX_VISIBLE {
            let overflow = self.items.len() - Self::MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

/// App-wide notification sink. Every message is mirrored to the console and
/// shown as a toast that dismisses itself after `toast_ms`.
#[derive(Clone, Copy)]
pub(crate) struct Notifier {
    list: RwSignal<NotificationList>,
    toast_ms: u32,
}

impl Notifier {
    pub fn new(toast_ms: u32) -> Self {
        Self {
            list: RwSignal::new(NotificationList::default()),
            toast_ms,
        }
    }

    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        let line = format!("[Notify] {severity}: {message}").into();
        match severity {
            Severity::Error => web_sys::console::error_1(&line),
            Severity::Warning => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }

        if let Some(id) = self.list.try_update(|l| l.push(severity, message)) {
            self.schedule_dismiss(id);
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Severity::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Severity::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        let _ = self.list.try_update(|l| l.dismiss(id));
    }

    fn schedule_dismiss(&self, id: u64) {
        if self.toast_ms == 0 {
            return;
        }
        let this = *self;
        run_after(self.toast_ms as i32, move || this.dismiss(id));
    }
}

#[component]
pub(crate) fn Toaster() -> impl IntoView {
    let notifier = expect_context::<Notifier>();
    let items = move || notifier.list.with(|l| l.items().to_vec());

    view! {
        <div class="pointer-events-none fixed bottom-4 right-4 z-[60] flex w-80 flex-col gap-2">
            <For
                each=items
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div
                            role="status"
                            class=format!(
                                "pointer-events-auto flex items-start gap-2 rounded-md border px-3 py-2 text-sm shadow-md {}",
                                n.severity.toast_class(),
                            )
                        >
                            <span class="min-w-0 flex-1 break-words">{n.message}</span>
                            <button
                                class="text-xs opacity-60 hover:opacity-100"
                                aria-label="Dismiss"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut list = NotificationList::default();
        let a = list.push(Severity::Success, "Folder created");
        let b = list.push(Severity::Error, "Failed to delete folder");
        assert!(b > a);
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.items()[1].severity, Severity::Error);
    }

    #[test]
    fn test_dismiss_removes_only_target() {
        let mut list = NotificationList::default();
        let a = list.push(Severity::Success, "one");
        list.push(Severity::Warning, "two");
        list.dismiss(a);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].message, "two");
        // Unknown id is a no-op.
        list.dismiss(999);
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut list = NotificationList::default();
        for i in 0..6 {
            list.push(Severity::Warning, format!("msg {i}"));
        }
        assert_eq!(list.items().len(), NotificationList::MAX_VISIBLE);
        assert_eq!(list.items()[0].message, "msg 2");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "Warning");
        assert_eq!(Severity::Error.as_ref(), "Error");
    }
}

use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {DialogBackdrop, div, "fixed inset-0 z-50 flex items-center justify-center bg-black/40 px-4"}
    clx! {DialogPanel, div, "w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg"}
    clx! {DialogHeader, div, "mb-3 space-y-1"}
    clx! {DialogTitle, h3, "text-sm font-medium"}
    clx! {DialogDescription, p, "text-xs text-muted-foreground"}
    clx! {DialogFooter, div, "flex items-center justify-end gap-2 pt-3"}
}

pub use components::*;

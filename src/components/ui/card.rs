use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-3 rounded-xl border border-border py-4 shadow-sm"}
    clx! {CardHeader, div, "flex items-center justify-between gap-2 px-4"}
    clx! {CardTitle, h2, "text-sm leading-none font-semibold"}
    clx! {CardDescription, p, "text-muted-foreground text-xs"}
    clx! {CardContent, div, "px-4"}
}

pub use components::*;

/// Single figure on the dashboard.
#[component]
pub fn StatCard(#[prop(into)] label: String, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <Card>
            <CardHeader>
                <CardDescription>{label}</CardDescription>
            </CardHeader>
            <CardContent>
                <div class="text-2xl font-semibold tabular-nums">{move || value.get()}</div>
            </CardContent>
        </Card>
    }
}

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos_dom::helpers::{request_animation_frame, window_event_listener};
use wasm_bindgen::JsCast;

/// Calls `on_dismiss` on a pointer press outside `container` or on Escape.
///
/// Presses inside an element matching `anchor` are ignored too, so the
/// button that opened the overlay can close it with its own click.
/// Both listeners are owned by the calling component and removed when it
/// unmounts, so an overlay only listens while it is on screen.
pub fn use_dismiss_on_outside(
    container: NodeRef<html::Div>,
    anchor: Option<&'static str>,
    on_dismiss: Callback<()>,
) {
    let pointer = window_event_listener(ev::mousedown, move |ev: web_sys::MouseEvent| {
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok());
        let inside = match (container.get_untracked(), target.as_deref()) {
            (Some(el), Some(node)) => el.contains(Some(node)),
            _ => false,
        };
        let on_anchor = match (anchor, &target) {
            (Some(selector), Some(el)) => matches!(el.closest(selector), Ok(Some(_))),
            _ => false,
        };
        if !inside && !on_anchor {
            on_dismiss.run(());
        }
    });

    let escape = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            on_dismiss.run(());
        }
    });

    on_cleanup(move || {
        pointer.remove();
        escape.remove();
    });
}

/// Vertical centre, in px relative to `container`, of the descendant marked
/// `data-nav-active="true"`. Re-measured one animation frame after `track`
/// changes so the DOM already reflects the new selection.
pub fn use_active_indicator<T: 'static>(
    container: NodeRef<html::Div>,
    track: impl Fn() -> T + 'static,
) -> ReadSignal<Option<f64>> {
    let (offset, set_offset) = signal(None::<f64>);

    Effect::new(move |_| {
        track();
        request_animation_frame(move || {
            let Some(root) = container.get_untracked() else {
                return;
            };
            let centre = root
                .query_selector("[data-nav-active='true']")
                .ok()
                .flatten()
                .map(|el| {
                    let rect = el.get_bounding_client_rect();
                    let base = root.get_bounding_client_rect();
                    rect.top() - base.top() + rect.height() / 2.0
                });
            set_offset.set(centre);
        });
    });

    offset
}

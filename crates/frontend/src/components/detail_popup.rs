use citymap_shared::render;
use citymap_shared::state::{Action, AppState};
use dioxus::prelude::*;

use crate::controller::dispatch;

#[component]
pub fn DetailPopup(state: Signal<AppState>) -> Element {
    let Some(view) = render::popup_view(&state.read()) else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "popup-backdrop",
            onclick: move |_| dispatch(state, Action::ClosePopup),

            div {
                class: "popup",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                button {
                    class: "close-popup",
                    "aria-label": "Close",
                    onclick: move |_| dispatch(state, Action::ClosePopup),
                    "\u{00d7}"
                }

                h2 { id: "popup-title", "{view.title}" }

                div { id: "popup-description",
                    for (idx, paragraph) in view.body.split("\n\n").enumerate() {
                        p { key: "{idx}", "{paragraph}" }
                    }
                }
            }
        }
    }
}

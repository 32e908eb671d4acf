use citymap_shared::layout::LabelKind;
use citymap_shared::render::ListEntry;
use citymap_shared::state::AppState;
use dioxus::prelude::*;

use super::map_view::select_action;
use crate::controller::dispatch;

#[component]
pub fn EntityList(
    title: String,
    list_id: String,
    kind: LabelKind,
    entries: Vec<ListEntry>,
    state: Signal<AppState>,
) -> Element {
    rsx! {
        div { class: "panel",
            h3 { "{title} ({entries.len()})" }
            if entries.is_empty() {
                p { class: "empty-list", "No matches" }
            } else {
                ul { id: "{list_id}", class: "entity-list",
                    for entry in entries {
                        li {
                            key: "{entry.id}",
                            class: if entry.selected { "entity selected" } else { "entity" },
                            onclick: move |_| dispatch(state, select_action(kind, entry.id)),
                            "{entry.name}"
                        }
                    }
                }
            }
        }
    }
}

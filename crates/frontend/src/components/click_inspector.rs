use citymap_shared::coords::MapSize;
use citymap_shared::history::authoring_snippet;
use citymap_shared::state::{Action, AppState};
use dioxus::prelude::*;

use crate::controller::{copy_to_clipboard, dispatch};

fn cursor_text(cursor: Option<(i64, i64)>) -> String {
    match cursor {
        Some((x, y)) => format!("X: {}, Y: {}", x, y),
        None => "X: -, Y: -".to_string(),
    }
}

fn map_size_text(size: Option<MapSize>) -> String {
    match size {
        Some(size) => format!("Map size: {}", size),
        None => "Loading map\u{2026}".to_string(),
    }
}

/// Cursor readout and recent clicks, for authoring coordinate tables.
#[component]
pub fn ClickInspector(state: Signal<AppState>, cursor: Signal<Option<(i64, i64)>>) -> Element {
    let cursor = cursor_text(*cursor.read());
    let size = map_size_text(state.read().map_size());
    let records: Vec<_> = state.read().history().iter().cloned().collect();

    rsx! {
        div { class: "panel inspector",
            h3 { "Coordinates" }
            div { id: "cursor-coords", class: "cursor-readout", "{cursor}" }
            div { class: "map-size", "{size}" }

            h3 { "Recent clicks" }
            if records.is_empty() {
                p { class: "empty-list", "Click the map to record a position" }
            }
            ul { id: "click-history", class: "click-history",
                for (idx, record) in records.into_iter().enumerate() {
                    li {
                        key: "{record.timestamp}-{idx}",
                        class: "click-entry",
                        onclick: move |_| dispatch(state, Action::RecallClick(idx)),
                        span { class: "click-time", "{record.timestamp}" }
                        span { class: "click-kind", "{record.kind}" }
                        span { class: "click-pos", "({record.x}, {record.y})" }
                        button {
                            class: "secondary",
                            onclick: {
                                let snippet = authoring_snippet(&record);
                                move |evt: Event<MouseData>| {
                                    evt.stop_propagation();
                                    copy_to_clipboard(snippet.clone());
                                }
                            },
                            "Copy"
                        }
                    }
                }
            }
        }
    }
}

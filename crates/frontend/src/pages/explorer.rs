use citymap_shared::config::MapConfig;
use citymap_shared::layout::LabelKind;
use citymap_shared::render;
use citymap_shared::state::{Action, AppState};
use dioxus::prelude::*;

use crate::components::click_inspector::ClickInspector;
use crate::components::detail_popup::DetailPopup;
use crate::components::entity_list::EntityList;
use crate::components::map_view::MapView;
use crate::components::search_panel::SearchPanel;
use crate::controller::dispatch;
use crate::tables;

const MAP_IMAGE_URL: &str = "/static/images/map.webp";

#[component]
pub fn Explorer(focus: Option<u32>) -> Element {
    // Tables are read from the host page once; a deep link opens its popup immediately
    let state = use_signal(move || {
        let mut state = AppState::new(tables::load_store(), MapConfig::default());
        if let Some(id) = focus {
            state.dispatch(Action::SelectLocation(id));
        }
        state
    });
    // Pointer readout changes on every mouse move and stays out of the map state
    let cursor = use_signal(|| None::<(i64, i64)>);

    let locations = render::location_entries(&state.read());
    let characters = render::character_entries(&state.read());
    let filter_active = state.read().filter_active();

    rsx! {
        div {
            class: "app",
            tabindex: "0",
            onkeydown: move |evt: Event<KeyboardData>| {
                if evt.key() == Key::Escape {
                    dispatch(state, Action::ClosePopup);
                }
            },

            // Header
            div { class: "header",
                h1 { "City Map" }
                if filter_active {
                    span { class: "filter-badge", "Filtered" }
                }
            }

            // Sidebar
            div { class: "sidebar",
                SearchPanel { state: state }

                EntityList {
                    title: "Locations".to_string(),
                    list_id: "location-list".to_string(),
                    kind: LabelKind::Location,
                    entries: locations,
                    state: state,
                }

                EntityList {
                    title: "Characters".to_string(),
                    list_id: "character-list".to_string(),
                    kind: LabelKind::Character,
                    entries: characters,
                    state: state,
                }

                ClickInspector { state: state, cursor: cursor }
            }

            // Map view
            MapView {
                image_url: MAP_IMAGE_URL.to_string(),
                state: state,
                cursor: cursor,
            }

            DetailPopup { state: state }
        }
    }
}

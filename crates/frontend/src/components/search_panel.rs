use citymap_shared::models::CategoryFilter;
use citymap_shared::state::{Action, AppState};
use dioxus::prelude::*;

use crate::controller::dispatch;

#[component]
pub fn SearchPanel(state: Signal<AppState>) -> Element {
    let search = state.read().filter().search.clone();
    let category = state.read().filter().category;

    rsx! {
        div { class: "panel",
            h3 { "Search" }
            input {
                id: "search",
                r#type: "text",
                placeholder: "Search by name...",
                value: "{search}",
                oninput: move |evt: Event<FormData>| {
                    dispatch(state, Action::SearchChanged(evt.value()));
                },
            }
            select {
                id: "category-filter",
                "aria-label": "Filter by category",
                value: "{category.value()}",
                onchange: move |evt: Event<FormData>| {
                    dispatch(state, Action::CategoryChanged(CategoryFilter::from_value(&evt.value())));
                },
                for (value, text) in [("all", "All"), ("location", "Locations"), ("character", "Characters")] {
                    option {
                        value: "{value}",
                        selected: category.value() == value,
                        "{text}"
                    }
                }
            }
        }
    }
}

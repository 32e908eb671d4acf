use citymap_shared::coords::PercentRect;
use citymap_shared::layout::{LabelKind, LabelPlacement};
use citymap_shared::models::ClickKind;
use citymap_shared::render::{self, DrawCommand};
use citymap_shared::state::{Action, AppState};
use dioxus::prelude::*;

use crate::controller::{dispatch, timestamp_now};
use crate::coords;

const MAP_CONTAINER_ID: &str = "map-container";
const MAP_IMAGE_ID: &str = "map-image";

// ---------------------------------------------------------------------------
// Draw-list partitioning
// ---------------------------------------------------------------------------

struct RegionItem {
    id: u32,
    title: String,
    rect: PercentRect,
}

struct MarkerItem {
    key: String,
    kind: LabelKind,
    id: u32,
    left: f64,
    top: f64,
}

struct LabelItem {
    key: String,
    kind: LabelKind,
    id: u32,
    text: String,
    placement: LabelPlacement,
}

#[derive(Default)]
struct Layers {
    regions: Vec<RegionItem>,
    markers: Vec<MarkerItem>,
    labels: Vec<LabelItem>,
    highlight: Option<String>,
    flash: Option<(f64, f64, u64)>,
}

fn kind_class(kind: LabelKind) -> &'static str {
    match kind {
        LabelKind::Location => "location",
        LabelKind::Character => "character",
    }
}

/// Split draw commands into the DOM layers they end up in.
///
/// Marker and label keys carry the render epoch so a resize rebuilds them.
fn split_layers(commands: &[DrawCommand], epoch: u64) -> Layers {
    let mut layers = Layers::default();
    for cmd in commands {
        match cmd {
            DrawCommand::Region { id, title, rect } => layers.regions.push(RegionItem {
                id: *id,
                title: title.clone(),
                rect: *rect,
            }),
            DrawCommand::Marker { kind, id, left, top } => layers.markers.push(MarkerItem {
                key: format!("m-{}-{}-{}", kind_class(*kind), id, epoch),
                kind: *kind,
                id: *id,
                left: *left,
                top: *top,
            }),
            DrawCommand::Label { kind, id, text, placement } => layers.labels.push(LabelItem {
                key: format!("l-{}-{}-{}", kind_class(*kind), id, epoch),
                kind: *kind,
                id: *id,
                text: text.clone(),
                placement: *placement,
            }),
            DrawCommand::Highlight { rect } => layers.highlight = Some(render::highlight_svg(rect)),
            DrawCommand::ClickFlash { left, top, token } => layers.flash = Some((*left, *top, *token)),
        }
    }
    layers
}

pub(super) fn select_action(kind: LabelKind, id: u32) -> Action {
    match kind {
        LabelKind::Location => Action::SelectLocation(id),
        LabelKind::Character => Action::SelectCharacter(id),
    }
}

fn record_click(state: Signal<AppState>, client_x: f64, client_y: f64, kind: ClickKind) {
    if let Some((x, y, element)) = coords::pointer_in_element(client_x, client_y, MAP_CONTAINER_ID) {
        dispatch(
            state,
            Action::MapClicked { x, y, element, kind, timestamp: timestamp_now() },
        );
    }
}

fn report_image_size(state: Signal<AppState>) {
    if let Some((width, height)) = coords::image_natural_size(MAP_IMAGE_ID) {
        if state.read().map_size().is_none() {
            dispatch(state, Action::ImageLoaded { width, height });
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    image_url: String,
    state: Signal<AppState>,
    cursor: Signal<Option<(i64, i64)>>,
) -> Element {
    // Only recomputes when the state changes; the cursor lives outside it
    let commands = use_memo(move || render::draw_list(&state.read()));
    let epoch = state.read().render_epoch();
    let layers = split_layers(&commands.read(), epoch);
    let loading = state.read().map_size().is_none();

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: if loading { "map-container loading" } else { "map-container" },

            onmousemove: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                if let Some((x, y, element)) =
                    coords::pointer_in_element(client.x, client.y, MAP_CONTAINER_ID)
                {
                    let position = state.peek().pointer_position(x, y, element);
                    if position.is_some() {
                        cursor.set(position);
                    }
                }
            },

            onmouseleave: move |_| cursor.set(None),

            onclick: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                record_click(state, client.x, client.y, ClickKind::Left);
            },

            oncontextmenu: move |evt: Event<MouseData>| {
                evt.prevent_default();
                let client = evt.client_coordinates();
                record_click(state, client.x, client.y, ClickKind::Right);
            },

            onresize: move |_| dispatch(state, Action::Resized),

            img {
                id: MAP_IMAGE_ID,
                src: "{image_url}",
                alt: "Map",
                draggable: "false",
                onload: move |_| report_image_size(state),
                // A cached image can finish before the load listener exists
                onmounted: move |_| report_image_size(state),
            }

            div { class: "region-layer",
                for region in layers.regions {
                    div {
                        key: "r-{region.id}",
                        class: "map-region",
                        title: "{region.title}",
                        style: "{region.rect.style()}",
                        onmouseenter: move |_| dispatch(state, Action::HoverRegion(Some(region.id))),
                        onmouseleave: move |_| dispatch(state, Action::HoverRegion(None)),
                        onclick: move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            dispatch(state, Action::SelectLocation(region.id));
                        },
                    }
                }
            }

            div { class: "marker-layer",
                for marker in layers.markers {
                    div {
                        key: "{marker.key}",
                        class: "map-marker {kind_class(marker.kind)}-marker",
                        style: "left:{marker.left}%;top:{marker.top}%;",
                        onclick: move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            dispatch(state, select_action(marker.kind, marker.id));
                        },
                    }
                }
                for label in layers.labels {
                    div {
                        key: "{label.key}",
                        class: "map-label {kind_class(label.kind)}-label {label.placement.side.as_class()}",
                        style: "left:{label.placement.x}%;top:{label.placement.y}%;width:{label.placement.width}%;height:{label.placement.height}%;",
                        onclick: move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            dispatch(state, select_action(label.kind, label.id));
                        },
                        "{label.text}"
                    }
                }
            }

            if let Some(svg) = layers.highlight {
                div {
                    class: "highlight-layer",
                    dangerous_inner_html: "{svg}",
                }
            }

            if let Some((left, top, token)) = layers.flash {
                div {
                    class: "click-marker",
                    "data-token": "{token}",
                    style: "left:{left}%;top:{top}%;",
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citymap_shared::layout::Side;

    fn placement() -> LabelPlacement {
        LabelPlacement { x: 1.0, y: 2.0, width: 10.0, height: 2.0, side: Side::Top }
    }

    #[test]
    fn test_split_layers_routes_every_command() {
        let rect = PercentRect { left: 1.0, top: 1.0, width: 1.0, height: 1.0 };
        let commands = vec![
            DrawCommand::Region { id: 5, title: "Cathedral".to_string(), rect },
            DrawCommand::Marker { kind: LabelKind::Location, id: 5, left: 1.5, top: 1.5 },
            DrawCommand::Label {
                kind: LabelKind::Location,
                id: 5,
                text: "Cathedral".to_string(),
                placement: placement(),
            },
            DrawCommand::Highlight { rect },
            DrawCommand::ClickFlash { left: 50.0, top: 50.0, token: 3 },
        ];
        let layers = split_layers(&commands, 0);
        assert_eq!(layers.regions.len(), 1);
        assert_eq!(layers.markers.len(), 1);
        assert_eq!(layers.labels.len(), 1);
        assert!(layers.highlight.unwrap().contains("area-highlight"));
        assert_eq!(layers.flash, Some((50.0, 50.0, 3)));
    }

    #[test]
    fn test_marker_keys_change_with_epoch() {
        let commands = vec![DrawCommand::Marker {
            kind: LabelKind::Character,
            id: 2,
            left: 0.0,
            top: 0.0,
        }];
        let before = split_layers(&commands, 1);
        let after = split_layers(&commands, 2);
        assert_ne!(before.markers[0].key, after.markers[0].key);
    }

    #[test]
    fn test_location_and_character_keys_differ() {
        let commands = vec![
            DrawCommand::Marker { kind: LabelKind::Location, id: 1, left: 0.0, top: 0.0 },
            DrawCommand::Marker { kind: LabelKind::Character, id: 1, left: 0.0, top: 0.0 },
        ];
        let layers = split_layers(&commands, 0);
        assert_ne!(layers.markers[0].key, layers.markers[1].key);
    }

    #[test]
    fn test_select_action() {
        assert_eq!(select_action(LabelKind::Location, 4), Action::SelectLocation(4));
        assert_eq!(select_action(LabelKind::Character, 4), Action::SelectCharacter(4));
    }
}

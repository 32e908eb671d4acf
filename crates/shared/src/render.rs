//! Declarative rendering: application state in, draw commands out.
//!
//! The platform shell turns each command into DOM nodes. Nothing here touches
//! the DOM, so the full render pass is unit-testable.

use crate::coords::PercentRect;
use crate::layout::{LabelKind, LabelPlacement, LabelPlacer};
use crate::state::{AppState, Selection};
use crate::store::character_anchor;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clickable area covering a location's rect.
    Region { id: u32, title: String, rect: PercentRect },
    Marker { kind: LabelKind, id: u32, left: f64, top: f64 },
    Label { kind: LabelKind, id: u32, text: String, placement: LabelPlacement },
    Highlight { rect: PercentRect },
    ClickFlash { left: f64, top: f64, token: u64 },
}

/// Build the map overlay for the current state. Empty until the image size is known.
pub fn draw_list(state: &AppState) -> Vec<DrawCommand> {
    let Some(size) = state.map_size() else {
        return Vec::new();
    };
    let store = state.store();
    let view = state.view();
    let config = state.config();

    // Fresh placer per pass: overlap state never outlives one render
    let mut placer = LabelPlacer::new(config.placement_policy, config.label_metrics);
    let mut cmds = Vec::with_capacity(view.locations.len() * 3 + view.characters.len() * 2 + 2);

    let locations: Vec<_> = view.locations.iter().filter_map(|id| store.location(*id)).collect();

    for loc in &locations {
        cmds.push(DrawCommand::Region {
            id: loc.id,
            title: loc.name.clone(),
            rect: size.rect_to_percent(loc.coords),
        });
    }

    for loc in &locations {
        let (left, top) = size.point_to_percent(loc.center);
        cmds.push(DrawCommand::Marker { kind: LabelKind::Location, id: loc.id, left, top });
        cmds.push(DrawCommand::Label {
            kind: LabelKind::Location,
            id: loc.id,
            text: loc.name.clone(),
            placement: placer.place((left, top), LabelKind::Location),
        });
    }

    for id in &view.characters {
        let Some(character) = store.character(*id) else { continue };
        // Characters without a resolvable location stay list-only
        let Some(loc) = store.location_of(character) else { continue };
        let anchor = character_anchor(character, loc, config.clamp_margin);
        let (left, top) = size.point_to_percent(anchor);
        cmds.push(DrawCommand::Marker { kind: LabelKind::Character, id: character.id, left, top });
        cmds.push(DrawCommand::Label {
            kind: LabelKind::Character,
            id: character.id,
            text: character.name.clone(),
            placement: placer.place((left, top), LabelKind::Character),
        });
    }

    if let Some(coords) = state.highlight_coords() {
        cmds.push(DrawCommand::Highlight { rect: size.rect_to_percent(coords) });
    }

    if let Some(flash) = state.flash() {
        let (left, top) = size.point_to_percent([flash.x, flash.y]);
        cmds.push(DrawCommand::ClickFlash { left, top, token: flash.token });
    }

    cmds
}

/// SVG markup outlining `rect`, sized to cover the whole map.
pub fn highlight_svg(rect: &PercentRect) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" style="position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;"><rect class="area-highlight" x="{}%" y="{}%" width="{}%" height="{}%"/></svg>"#,
        rect.left, rect.top, rect.width, rect.height
    )
}

/// Fallback shown for a character whose location does not resolve.
pub const UNKNOWN_LOCATION: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub title: String,
    pub body: String,
}

pub fn popup_view(state: &AppState) -> Option<PopupView> {
    let store = state.store();
    match state.selection()? {
        Selection::Location(id) => {
            let loc = store.location(id)?;
            Some(PopupView { title: loc.name.clone(), body: loc.description.clone() })
        }
        Selection::Character(id) => {
            let c = store.character(id)?;
            let place = store
                .location_of(c)
                .map(|l| l.name.as_str())
                .unwrap_or(UNKNOWN_LOCATION);
            Some(PopupView {
                title: c.name.clone(),
                body: format!("{}\n\nLocated in: {}", c.description, place),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: u32,
    pub name: String,
    pub selected: bool,
}

pub fn location_entries(state: &AppState) -> Vec<ListEntry> {
    let selected = match state.selection() {
        Some(Selection::Location(id)) => Some(id),
        _ => None,
    };
    state
        .view()
        .locations
        .iter()
        .filter_map(|id| state.store().location(*id))
        .map(|l| ListEntry { id: l.id, name: l.name.clone(), selected: selected == Some(l.id) })
        .collect()
}

pub fn character_entries(state: &AppState) -> Vec<ListEntry> {
    let selected = match state.selection() {
        Some(Selection::Character(id)) => Some(id),
        _ => None,
    };
    state
        .view()
        .characters
        .iter()
        .filter_map(|id| state.store().character(*id))
        .map(|c| ListEntry { id: c.id, name: c.name.clone(), selected: selected == Some(c.id) })
        .collect()
}

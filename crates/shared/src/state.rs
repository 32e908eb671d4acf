use crate::config::MapConfig;
use crate::coords::{ElementBox, MapSize};
use crate::history::{authoring_snippet, ClickHistory};
use crate::models::{CategoryFilter, ClickKind, ClickRecord};
use crate::store::{DataStore, Filter, FilteredView};

/// The entity whose popup is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Location(u32),
    Character(u32),
}

/// Transient marker shown where the map was last clicked, in natural pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub x: f64,
    pub y: f64,
    pub token: u64,
}

/// Everything the view can ask the state to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ImageLoaded { width: f64, height: f64 },
    MapClicked {
        x: f64,
        y: f64,
        element: ElementBox,
        kind: ClickKind,
        timestamp: String,
    },
    /// Flash a history entry again, by index (0 = newest).
    RecallClick(usize),
    SelectLocation(u32),
    SelectCharacter(u32),
    HoverRegion(Option<u32>),
    ClosePopup,
    SearchChanged(String),
    CategoryChanged(CategoryFilter),
    Resized,
    FlashExpired(u64),
}

/// Follow-up work the platform shell must schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    HideFlashAfter { token: u64, delay_ms: u32 },
}

/// Application state of the map component. `dispatch` is its only mutator.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    store: DataStore,
    config: MapConfig,
    filter: Filter,
    view: FilteredView,
    map_size: Option<MapSize>,
    selection: Option<Selection>,
    hovered: Option<u32>,
    history: ClickHistory,
    flash: Option<Flash>,
    next_flash_token: u64,
    render_epoch: u64,
}

impl AppState {
    pub fn new(store: DataStore, config: MapConfig) -> Self {
        let filter = Filter::default();
        let view = store.filtered(&filter);
        let history = ClickHistory::new(config.history_capacity);
        AppState {
            store,
            config,
            filter,
            view,
            map_size: None,
            selection: None,
            hovered: None,
            history,
            flash: None,
            next_flash_token: 0,
            render_epoch: 0,
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn map_size(&self) -> Option<MapSize> {
        self.map_size
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn hovered(&self) -> Option<u32> {
        self.hovered
    }

    /// Natural-pixel position under a pointer at `(x, y)` relative to the map
    /// element's top-left corner. `None` until the image size is known.
    pub fn pointer_position(&self, x: f64, y: f64, element: ElementBox) -> Option<(i64, i64)> {
        self.map_size?.pointer_to_natural(x, y, element)
    }

    pub fn history(&self) -> &ClickHistory {
        &self.history
    }

    pub fn flash(&self) -> Option<Flash> {
        self.flash
    }

    /// Bumped whenever markers must be rebuilt from scratch.
    pub fn render_epoch(&self) -> u64 {
        self.render_epoch
    }

    pub fn filter_active(&self) -> bool {
        self.filter.is_active()
    }

    pub fn popup_open(&self) -> bool {
        self.selection.is_some()
    }

    /// Natural-pixel rect to outline: the hovered region, else the selection's.
    /// A character with a dangling location has nothing to outline.
    pub fn highlight_coords(&self) -> Option<[f64; 4]> {
        let hovered = self
            .hovered
            .filter(|id| self.view.locations.contains(id))
            .and_then(|id| self.store.location(id));
        if let Some(loc) = hovered {
            return Some(loc.coords);
        }
        match self.selection? {
            Selection::Location(id) => self.store.location(id).map(|l| l.coords),
            Selection::Character(id) => {
                let c = self.store.character(id)?;
                self.store.location_of(c).map(|l| l.coords)
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::ImageLoaded { width, height } => {
                self.map_size = MapSize::new(width, height);
                match self.map_size {
                    Some(size) => tracing::info!(%size, "Map image loaded"),
                    None => tracing::warn!(width, height, "Map image has no natural size"),
                }
                self.render_epoch += 1;
                None
            }
            Action::MapClicked { x, y, element, kind, timestamp } => {
                let size = self.map_size?;
                let (nx, ny) = size.pointer_to_natural(x, y, element)?;
                let record = ClickRecord { x: nx, y: ny, kind, timestamp, map_size: size };
                tracing::info!(x = nx, y = ny, %kind, "Map click\n{}", authoring_snippet(&record));
                self.history.push(record);
                Some(self.show_flash(nx as f64, ny as f64))
            }
            Action::RecallClick(index) => {
                self.map_size?;
                let record = self.history.get(index)?;
                let (x, y) = (record.x as f64, record.y as f64);
                tracing::info!("Recalled click\n{}", authoring_snippet(record));
                Some(self.show_flash(x, y))
            }
            Action::SelectLocation(id) => {
                if self.store.location(id).is_some() {
                    self.selection = Some(Selection::Location(id));
                } else {
                    tracing::debug!(id, "Ignoring selection of unknown location");
                }
                None
            }
            Action::SelectCharacter(id) => {
                if self.store.character(id).is_some() {
                    self.selection = Some(Selection::Character(id));
                } else {
                    tracing::debug!(id, "Ignoring selection of unknown character");
                }
                None
            }
            Action::HoverRegion(id) => {
                self.hovered = id;
                None
            }
            Action::ClosePopup => {
                self.selection = None;
                self.hovered = None;
                None
            }
            Action::SearchChanged(search) => {
                self.filter.search = search;
                self.refilter();
                None
            }
            Action::CategoryChanged(category) => {
                self.filter.category = category;
                self.refilter();
                None
            }
            Action::Resized => {
                self.render_epoch += 1;
                None
            }
            Action::FlashExpired(token) => {
                if self.flash.is_some_and(|f| f.token == token) {
                    self.flash = None;
                }
                None
            }
        }
    }

    /// A region removed from the view never reports the pointer leaving it.
    fn refilter(&mut self) {
        self.view = self.store.filtered(&self.filter);
        if self.hovered.is_some_and(|id| !self.view.locations.contains(&id)) {
            self.hovered = None;
        }
    }

    fn show_flash(&mut self, x: f64, y: f64) -> Effect {
        self.next_flash_token += 1;
        let token = self.next_flash_token;
        self.flash = Some(Flash { x, y, token });
        Effect::HideFlashAfter { token, delay_ms: self.config.flash_ms }
    }
}

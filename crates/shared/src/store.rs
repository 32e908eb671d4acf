use crate::models::{Category, CategoryFilter, Character, Location, Offset};

/// Ids of the `<script type="application/json">` elements that carry the
/// tables in the served page.
pub const LOCATIONS_ELEMENT_ID: &str = "locations-data";
pub const CHARACTERS_ELEMENT_ID: &str = "characters-data";

#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    Missing(&'static str),
    Malformed { table: &'static str, reason: String },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Missing(table) => write!(f, "{} table not supplied", table),
            TableError::Malformed { table, reason } => {
                write!(f, "{} table is malformed: {}", table, reason)
            }
        }
    }
}

impl std::error::Error for TableError {}

pub fn parse_locations(json: &str) -> Result<Vec<Location>, TableError> {
    serde_json::from_str(json).map_err(|e| TableError::Malformed {
        table: "locations",
        reason: e.to_string(),
    })
}

pub fn parse_characters(json: &str) -> Result<Vec<Character>, TableError> {
    serde_json::from_str(json).map_err(|e| TableError::Malformed {
        table: "characters",
        reason: e.to_string(),
    })
}

/// Search text plus category selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub search: String,
    pub category: CategoryFilter,
}

impl Filter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.category != CategoryFilter::All
    }

    /// Case-insensitive substring match on `name`, gated by category.
    pub fn matches(&self, name: &str, category: Category) -> bool {
        self.category.admits(category)
            && name.to_lowercase().contains(&self.search.to_lowercase())
    }
}

/// Ids of the records that pass the current filter, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub locations: Vec<u32>,
    pub characters: Vec<u32>,
}

/// In-memory location and character tables. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStore {
    locations: Vec<Location>,
    characters: Vec<Character>,
}

impl DataStore {
    pub fn new(locations: Vec<Location>, characters: Vec<Character>) -> Self {
        DataStore { locations, characters }
    }

    /// Build the store from whatever the host supplied. A missing or malformed
    /// table is replaced by the demo table of the same kind.
    pub fn load(
        locations: Result<Vec<Location>, TableError>,
        characters: Result<Vec<Character>, TableError>,
    ) -> Self {
        let locations = locations.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to demo locations");
            demo_locations()
        });
        let characters = characters.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to demo characters");
            demo_characters()
        });
        tracing::info!(
            locations = locations.len(),
            characters = characters.len(),
            "Loaded map tables"
        );
        DataStore { locations, characters }
    }

    pub fn demo() -> Self {
        DataStore::new(demo_locations(), demo_characters())
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn location(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn character(&self, id: u32) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// The location a character stands in, if its reference resolves.
    pub fn location_of(&self, character: &Character) -> Option<&Location> {
        self.location(character.location_id)
    }

    pub fn filtered(&self, filter: &Filter) -> FilteredView {
        FilteredView {
            locations: self
                .locations
                .iter()
                .filter(|l| filter.matches(&l.name, Category::Location))
                .map(|l| l.id)
                .collect(),
            characters: self
                .characters
                .iter()
                .filter(|c| filter.matches(&c.name, Category::Character))
                .map(|c| c.id)
                .collect(),
        }
    }
}

/// Character marker position: location center plus offset, kept `margin`
/// pixels inside the location rect. When the rect is narrower than two
/// margins the upper bound wins.
pub fn character_anchor(character: &Character, location: &Location, margin: f64) -> [f64; 2] {
    let [x1, y1, x2, y2] = location.coords;
    let x = location.center[0] + character.offset.x;
    let y = location.center[1] + character.offset.y;
    [
        x.max(x1 + margin).min(x2 - margin),
        y.max(y1 + margin).min(y2 - margin),
    ]
}

fn demo_location(id: u32, name: &str, coords: [f64; 4], description: &str) -> Location {
    Location {
        id,
        name: name.to_string(),
        coords,
        center: [(coords[0] + coords[2]) / 2.0, (coords[1] + coords[3]) / 2.0],
        description: description.to_string(),
    }
}

fn demo_character(id: u32, name: &str, location_id: u32, x: f64, y: f64, description: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        location_id,
        description: description.to_string(),
        offset: Offset { x, y },
    }
}

pub fn demo_locations() -> Vec<Location> {
    vec![
        demo_location(
            1,
            "The Drunken Unicorn",
            [851.0, 460.0, 861.0, 470.0],
            "Common room 5 cp, private room 2 gp, supper 5 cp. Rumours for a gold piece, not always true.",
        ),
        demo_location(
            2,
            "Steel & Faith Armoury",
            [412.0, 226.0, 432.0, 246.0],
            "Common arms and armour, repairs 10-50 gp, +1 weapons to order (500 gp).",
        ),
        demo_location(
            5,
            "Cathedral of the Golden Hammer",
            [682.0, 289.0, 702.0, 309.0],
            "White marble and gilded domes on the main square. Blessings for a 25 gp donation.",
        ),
    ]
}

pub fn demo_characters() -> Vec<Character> {
    vec![
        demo_character(1, "Barney", 1, 15.0, -5.0, "Keeper of the Drunken Unicorn."),
        demo_character(2, "Torgren", 2, 15.0, -5.0, "Owner of the Steel & Faith armoury."),
        demo_character(3, "Old Mage Telbran", 5, 20.0, -10.0, "Former archivist, now a hermit among his books."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cathedral() -> Location {
        Location {
            id: 5,
            name: "Cathedral".to_string(),
            coords: [682.0, 289.0, 702.0, 309.0],
            center: [692.0, 299.0],
            description: String::new(),
        }
    }

    fn character_at(offset_x: f64, offset_y: f64) -> Character {
        Character {
            id: 2,
            name: "Inquisitor".to_string(),
            location_id: 5,
            description: String::new(),
            offset: Offset { x: offset_x, y: offset_y },
        }
    }

    #[test]
    fn test_character_anchor_clamps_to_margin() {
        let anchor = character_anchor(&character_at(15.0, -5.0), &cathedral(), 15.0);
        assert!((anchor[0] - 687.0).abs() < 1e-9);
        assert!((anchor[1] - 294.0).abs() < 1e-9);
    }

    #[test]
    fn test_character_anchor_inside_large_rect_is_untouched() {
        let mut loc = cathedral();
        loc.coords = [600.0, 200.0, 800.0, 400.0];
        let anchor = character_anchor(&character_at(20.0, -10.0), &loc, 15.0);
        assert_eq!(anchor, [712.0, 289.0]);
    }

    #[test]
    fn test_character_anchor_degenerate_rect_does_not_panic() {
        let mut loc = cathedral();
        loc.coords = [952.0, 361.0, 952.0, 361.0];
        loc.center = [952.0, 361.0];
        let anchor = character_anchor(&character_at(15.0, -5.0), &loc, 15.0);
        assert_eq!(anchor, [937.0, 346.0]);
    }

    #[test]
    fn test_load_falls_back_per_table() {
        let own = vec![cathedral()];
        let store = DataStore::load(Ok(own.clone()), Err(TableError::Missing("characters")));
        assert_eq!(store.locations(), own.as_slice());
        assert_eq!(store.characters(), demo_characters().as_slice());

        let store = DataStore::load(
            parse_locations("not json"),
            Ok(vec![character_at(0.0, 0.0)]),
        );
        assert_eq!(store.locations(), demo_locations().as_slice());
        assert_eq!(store.characters().len(), 1);
    }

    #[test]
    fn test_parse_locations_reports_malformed() {
        let err = parse_locations("{").unwrap_err();
        assert!(matches!(err, TableError::Malformed { table: "locations", .. }));
        assert!(err.to_string().starts_with("locations table is malformed"));
    }

    #[test]
    fn test_demo_characters_resolve() {
        let store = DataStore::demo();
        for c in store.characters() {
            assert!(store.location_of(c).is_some(), "{} should resolve", c.name);
        }
    }

    #[test]
    fn test_dangling_location_id() {
        let store = DataStore::new(vec![cathedral()], vec![character_at(0.0, 0.0)]);
        let mut ghost = character_at(0.0, 0.0);
        ghost.location_id = 99;
        assert!(store.location_of(&ghost).is_none());
        assert!(store.location_of(&store.characters()[0]).is_some());
    }

    #[test]
    fn test_filter_is_active() {
        assert!(!Filter::default().is_active());
        assert!(!Filter { search: "   ".to_string(), ..Filter::default() }.is_active());
        assert!(Filter { search: "ab".to_string(), ..Filter::default() }.is_active());
        assert!(Filter {
            category: CategoryFilter::Only(Category::Location),
            ..Filter::default()
        }
        .is_active());
    }

    #[test]
    fn test_filtered_is_case_insensitive() {
        let store = DataStore::demo();
        let view = store.filtered(&Filter { search: "UNICORN".to_string(), ..Filter::default() });
        assert_eq!(view.locations, vec![1]);
        assert!(view.characters.is_empty());
    }

    #[test]
    fn test_filtered_matches_non_ascii_names() {
        let mut loc = cathedral();
        loc.name = "Собор Золотого Молота".to_string();
        let store = DataStore::new(vec![loc], vec![]);
        let view = store.filtered(&Filter { search: "собор".to_string(), ..Filter::default() });
        assert_eq!(view.locations, vec![5]);
    }

    #[test]
    fn test_filtered_category_only() {
        let store = DataStore::demo();
        let view = store.filtered(&Filter {
            search: String::new(),
            category: CategoryFilter::Only(Category::Character),
        });
        assert!(view.locations.is_empty());
        assert_eq!(view.characters, vec![1, 2, 3]);
    }

    #[test]
    fn test_filtered_is_exact_partition() {
        let store = DataStore::demo();
        let searches = ["", "e", "or", "the", "zzz"];
        let categories = [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Location),
            CategoryFilter::Only(Category::Character),
        ];
        for s in searches {
            for c in categories {
                let filter = Filter { search: s.to_string(), category: c };
                let view = store.filtered(&filter);
                for l in store.locations() {
                    let expected = l.name.to_lowercase().contains(s) && c.admits(Category::Location);
                    assert_eq!(view.locations.contains(&l.id), expected);
                }
                for ch in store.characters() {
                    let expected = ch.name.to_lowercase().contains(s) && c.admits(Category::Character);
                    assert_eq!(view.characters.contains(&ch.id), expected);
                }
            }
        }
    }
}

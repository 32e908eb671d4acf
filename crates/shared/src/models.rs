use serde::{Deserialize, Serialize};

use crate::coords::MapSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Location,
    Character,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Location => write!(f, "location"),
            Category::Character => write!(f, "character"),
        }
    }
}

/// Category filter as chosen in the sidebar select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse the select's option value. Anything unrecognised means "all".
    pub fn from_value(value: &str) -> Self {
        match value {
            "location" => CategoryFilter::Only(Category::Location),
            "character" => CategoryFilter::Only(Category::Character),
            _ => CategoryFilter::All,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(Category::Location) => "location",
            CategoryFilter::Only(Category::Character) => "character",
        }
    }

    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

/// A named rectangular region of the map, in natural image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    /// `[x1, y1, x2, y2]`, axis-aligned with `x1 <= x2` and `y1 <= y2`.
    pub coords: [f64; 4],
    pub center: [f64; 2],
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub location_id: u32,
    #[serde(default)]
    pub description: String,
    /// Displacement from the location's center, in natural pixels.
    #[serde(default)]
    pub offset: Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Left,
    Right,
}

impl std::fmt::Display for ClickKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClickKind::Left => write!(f, "Left click"),
            ClickKind::Right => write!(f, "Right click"),
        }
    }
}

/// One entry of the click-coordinate inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickRecord {
    pub x: i64,
    pub y: i64,
    pub kind: ClickKind,
    pub timestamp: String,
    pub map_size: MapSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_from_value() {
        assert_eq!(CategoryFilter::from_value("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_value("location"),
            CategoryFilter::Only(Category::Location)
        );
        assert_eq!(
            CategoryFilter::from_value("character"),
            CategoryFilter::Only(Category::Character)
        );
        assert_eq!(CategoryFilter::from_value("bogus"), CategoryFilter::All);
    }

    #[test]
    fn test_category_filter_value_roundtrip() {
        for f in [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Location),
            CategoryFilter::Only(Category::Character),
        ] {
            assert_eq!(CategoryFilter::from_value(f.value()), f);
        }
    }

    #[test]
    fn test_character_deserializes_camel_case_and_default_offset() {
        let json = r#"{"id": 3, "name": "Ferryman", "type": "character", "locationId": 7, "description": "Rows"}"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.location_id, 7);
        assert_eq!(c.offset, Offset::default());
    }

    #[test]
    fn test_location_ignores_type_field() {
        let json = r#"{"id": 5, "name": "Cathedral", "type": "location", "coords": [682, 289, 702, 309], "center": [692, 299], "description": ""}"#;
        let l: Location = serde_json::from_str(json).unwrap();
        assert_eq!(l.coords, [682.0, 289.0, 702.0, 309.0]);
        assert_eq!(l.center, [692.0, 299.0]);
    }

    #[test]
    fn test_click_kind_display() {
        assert_eq!(ClickKind::Left.to_string(), "Left click");
        assert_eq!(ClickKind::Right.to_string(), "Right click");
    }
}

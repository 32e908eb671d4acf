use citymap_shared::store::{
    parse_characters, parse_locations, DataStore, TableError, CHARACTERS_ELEMENT_ID,
    LOCATIONS_ELEMENT_ID,
};

fn embedded_json(id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.get_element_by_id(id)?.text_content()
}

/// Build the store from raw table texts. Absent, blank or malformed tables
/// fall back to the demo data.
pub fn store_from_texts(locations: Option<String>, characters: Option<String>) -> DataStore {
    let locations = match locations.filter(|t| !t.trim().is_empty()) {
        Some(text) => parse_locations(&text),
        None => Err(TableError::Missing("locations")),
    };
    let characters = match characters.filter(|t| !t.trim().is_empty()) {
        Some(text) => parse_characters(&text),
        None => Err(TableError::Missing("characters")),
    };
    DataStore::load(locations, characters)
}

/// Read the tables the host page supplied.
pub fn load_store() -> DataStore {
    store_from_texts(
        embedded_json(LOCATIONS_ELEMENT_ID),
        embedded_json(CHARACTERS_ELEMENT_ID),
    )
}

use citymap_shared::store::{
    parse_characters, parse_locations, TableError, CHARACTERS_ELEMENT_ID, LOCATIONS_ELEMENT_ID,
};
use serde::Serialize;
use std::path::Path;

/// The two data tables, validated and re-serialized for embedding in the page.
///
/// A table that failed to load is `None`; the page then omits it and the
/// map falls back to its demo data for that table.
#[derive(Debug, Clone, Default)]
pub struct DataTables {
    pub locations: Option<String>,
    pub characters: Option<String>,
}

fn load_table<T, F>(path: &Path, parse: F) -> Result<String, String>
where
    T: Serialize,
    F: Fn(&str) -> Result<Vec<T>, TableError>,
{
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let rows = parse(&data).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    serde_json::to_string(&rows).map_err(|e| format!("Failed to encode {}: {}", path.display(), e))
}

impl DataTables {
    pub fn load(assets_dir: &Path) -> Self {
        let data_dir = assets_dir.join("data");

        let locations = match load_table(&data_dir.join("locations.json"), parse_locations) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };
        let characters = match load_table(&data_dir.join("characters.json"), parse_characters) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };

        tracing::info!(
            locations = locations.is_some(),
            characters = characters.is_some(),
            "Loaded map data tables"
        );

        DataTables { locations, characters }
    }

    /// `<script>` elements carrying the tables, for the page head.
    pub fn script_tags(&self) -> String {
        let mut tags = String::new();
        for (id, table) in [
            (LOCATIONS_ELEMENT_ID, &self.locations),
            (CHARACTERS_ELEMENT_ID, &self.characters),
        ] {
            if let Some(json) = table {
                tags.push_str(&format!(
                    r#"<script type="application/json" id="{}">{}</script>"#,
                    id,
                    escape_script(json)
                ));
            }
        }
        tags
    }

    /// Insert the table scripts right before `</head>`, or at the very start
    /// of a page without one.
    pub fn inject(&self, html: &str) -> String {
        let tags = self.script_tags();
        match html.find("</head>") {
            Some(at) => format!("{}{}{}", &html[..at], tags, &html[at..]),
            None => format!("{}{}", tags, html),
        }
    }
}

/// Keep JSON text from closing the surrounding `<script>` element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

use crate::layout::{LabelMetrics, PlacementPolicy};

/// Number of click records kept by the inspector.
pub const DEFAULT_HISTORY_CAPACITY: usize = 8;

/// How long the click flash marker stays visible.
pub const DEFAULT_FLASH_MS: u32 = 2000;

/// Character anchors stay this many natural pixels inside their location rect.
pub const DEFAULT_CLAMP_MARGIN: f64 = 15.0;

/// Tunables of the map component.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub history_capacity: usize,
    pub flash_ms: u32,
    pub clamp_margin: f64,
    pub placement_policy: PlacementPolicy,
    pub label_metrics: LabelMetrics,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            flash_ms: DEFAULT_FLASH_MS,
            clamp_margin: DEFAULT_CLAMP_MARGIN,
            placement_policy: PlacementPolicy::default(),
            label_metrics: LabelMetrics::default(),
        }
    }
}

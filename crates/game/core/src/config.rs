use crate::state::MapDimensions;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Bounds of the playing field. Clicks outside resolve to a no-op.
    pub dimensions: MapDimensions,
}

impl GameConfig {
    // ===== fixed board geometry =====
    pub const GRID_WIDTH: u32 = 20;
    pub const GRID_HEIGHT: u32 = 20;
    pub const DIMENSIONS: MapDimensions = MapDimensions::new(Self::GRID_WIDTH, Self::GRID_HEIGHT);
    /// Largest accepted width or height for a loaded map.
    pub const MAX_MAP_SIDE: u32 = 256;

    pub const fn new() -> Self {
        Self {
            dimensions: Self::DIMENSIONS,
        }
    }

    pub const fn with_dimensions(dimensions: MapDimensions) -> Self {
        Self { dimensions }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

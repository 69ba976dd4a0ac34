use cgmath::Vector2;

pub const ATLAS_COLS: usize = 4;
pub const ATLAS_ROWS: usize = 3;
pub const TILE_COUNT: usize = ATLAS_COLS * ATLAS_ROWS;

pub type TileIndex = usize;

// The bottom atlas row holds the structural cells: the pillar texture on the
// far left and the blank cell on the far right. Neither may be handed out as
// a random segment decoration.
pub const TILE_PILLAR: TileIndex = (ATLAS_ROWS - 1) * ATLAS_COLS;
pub const TILE_BLANK: TileIndex = TILE_COUNT - 1;

pub fn is_reserved(tile: TileIndex) -> bool {
    tile == TILE_PILLAR || tile == TILE_BLANK
}

pub fn tile_column(tile: TileIndex) -> usize {
    tile % ATLAS_COLS
}

pub fn tile_row(tile: TileIndex) -> usize {
    tile / ATLAS_COLS
}

/// UV offset of a tile's cell origin within the atlas grid.
pub fn tile_uv_offset(tile: TileIndex) -> Vector2<f32> {
    Vector2::new(
        tile_column(tile) as f32 / ATLAS_COLS as f32,
        tile_row(tile) as f32 / ATLAS_ROWS as f32,
    )
}

use cgmath::Vector2;

/// Extents below this magnitude snap to it instead of being rejected.
pub const MIN_EXTENT: f32 = 0.1;

/// Input parameters for one wall. Width extents are measured from the wall's
/// central vertical axis, so `width_right` is positive and `width_left` is
/// negative. All lengths are in doubled units; the generator halves the
/// finished vertices (two stacked segments equal one texture tile).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallParameters {
    pub depth: f32,
    pub height: f32,
    pub width_right: f32,
    pub width_left: f32,
    pub row_count: u32,
    pub texture_offset: Vector2<f32>,
    pub texture_scale: f32,
}

impl Default for WallParameters {
    fn default() -> Self {
        Self {
            depth: 1.0,
            height: 2.0,
            width_right: 1.0,
            width_left: -1.0,
            row_count: 1,
            texture_offset: Vector2::new(0.0, 0.0),
            texture_scale: 0.25,
        }
    }
}

impl WallParameters {
    /// Snaps out-of-range extents to their minimum magnitude.
    pub fn clamped(mut self) -> Self {
        if self.depth < MIN_EXTENT {
            self.depth = MIN_EXTENT;
        }
        if self.height < MIN_EXTENT {
            self.height = MIN_EXTENT;
        }
        if self.width_right < MIN_EXTENT {
            self.width_right = MIN_EXTENT;
        }
        if self.width_left > -MIN_EXTENT {
            self.width_left = -MIN_EXTENT;
        }
        self
    }
}

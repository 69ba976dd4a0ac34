use cgmath::{One, Quaternion, Rotation, Vector2, Vector3};
use log::debug;
use rand::{rngs::SmallRng, SeedableRng};

use crate::atlas::{is_reserved, tile_uv_offset, ATLAS_COLS, ATLAS_ROWS, TILE_BLANK};
use crate::mesh::{triangulate_quads, MeshBuffers, VERTICES_PER_QUAD};
use crate::params::WallParameters;
use crate::segment::{segment_side, Segment};
use crate::variants::TextureVariants;

// The outer box contributes four quads: top, bottom, right and left. Front
// and back are replaced by the subdivided segment columns.
const OUTER_QUADS: usize = 4;
const OUTER_VERTEX_COUNT: usize = OUTER_QUADS * VERTICES_PER_QUAD;

/// Procedural wall mesh generator.
///
/// Owns the wall parameters, the persistent texture variant state and the
/// published mesh buffers. Parameter edits mark the generator dirty; the
/// next [`update`](Self::update) (or an explicit
/// [`regenerate`](Self::regenerate)) runs the pipeline exactly once and
/// replaces the buffers wholesale.
pub struct WallMeshGenerator {
    params: WallParameters,
    rotation: Quaternion<f32>,
    variants: Option<TextureVariants>,
    rng: SmallRng,
    mesh: Option<MeshBuffers>,
    dirty: bool,
}

impl WallMeshGenerator {
    pub fn new(params: WallParameters) -> Self {
        Self::from_rng(params, SmallRng::from_entropy())
    }

    /// Deterministic construction for tests and reproducible walls.
    pub fn with_seed(params: WallParameters, seed: u64) -> Self {
        Self::from_rng(params, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(params: WallParameters, rng: SmallRng) -> Self {
        let params = params.clamped();
        assert!(params.row_count >= 1, "row_count must be at least 1");
        Self {
            params,
            rotation: Quaternion::one(),
            variants: None,
            rng,
            mesh: None,
            dirty: true,
        }
    }

    pub fn parameters(&self) -> &WallParameters {
        &self.params
    }

    pub fn set_parameters(&mut self, params: WallParameters) {
        assert!(params.row_count >= 1, "row_count must be at least 1");
        self.params = params.clamped();
        self.dirty = true;
    }

    /// Caller-supplied rotation, applied about the mesh bounding-box center.
    pub fn set_rotation(&mut self, rotation: Quaternion<f32>) {
        self.rotation = rotation;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last published buffers, if any regeneration has run.
    pub fn mesh(&self) -> Option<&MeshBuffers> {
        self.mesh.as_ref()
    }

    pub fn texture_variants(&self) -> Option<&TextureVariants> {
        self.variants.as_ref()
    }

    /// Per-frame pump: rebuilds only when dirty, so a burst of parameter
    /// edits costs a single regeneration.
    pub fn update(&mut self) -> Option<&MeshBuffers> {
        if self.dirty {
            Some(self.regenerate())
        } else {
            None
        }
    }

    /// Runs the full pipeline unconditionally and publishes fresh buffers.
    pub fn regenerate(&mut self) -> &MeshBuffers {
        self.dirty = false;

        let params = self.params;
        let right = segment_side(params.width_right);
        let left = segment_side(params.width_left);

        let variants = self
            .variants
            .get_or_insert_with(|| TextureVariants::seed(&mut self.rng));
        variants.ensure(right.len(), left.len(), &mut self.rng);

        debug!(
            "regenerating wall mesh: {} right + {} left columns, {} rows",
            right.len(),
            left.len(),
            params.row_count
        );

        let mut vertices = build_vertices(&params, &right, &left);
        let triangles = triangulate_quads(vertices.len() / VERTICES_PER_QUAD);
        let uv = build_uv(&params, &right, &left, variants);
        let normals = build_normals(
            params.row_count as usize,
            right.len() + left.len(),
            self.rotation,
        );
        finalize_vertices(&mut vertices, self.rotation);

        debug_assert_eq!(uv.len(), vertices.len());
        debug_assert_eq!(normals.len(), vertices.len());
        debug_assert!(triangles
            .iter()
            .all(|&index| (index as usize) < vertices.len()));

        self.mesh.insert(MeshBuffers {
            vertices,
            triangles,
            uv,
            normals,
        })
    }

    /// Re-rolls every assigned tile; call [`regenerate`](Self::regenerate)
    /// afterwards to see the effect.
    pub fn reroll_texture_variants(&mut self) {
        if let Some(variants) = self.variants.as_mut() {
            variants.reroll(&mut self.rng);
            self.dirty = true;
        }
    }

    /// Drops the variant state; the next regeneration reseeds from scratch.
    pub fn reset_texture_variants(&mut self) {
        self.variants = None;
        self.dirty = true;
    }

    /// "Delete mesh": drops both the published buffers and the variant state.
    pub fn clear(&mut self) {
        self.mesh = None;
        self.variants = None;
        self.dirty = true;
    }
}

/// Segment columns of the front face in emission order: marching -z from the
/// right outer edge through both seam-adjacent fractional segments to the
/// left outer edge. Spans are (leading z, trailing z) with leading > trailing.
fn front_spans(right: &[Segment], left: &[Segment]) -> Vec<(f32, f32)> {
    let mut spans = Vec::with_capacity(right.len() + left.len());
    for segment in right {
        spans.push((segment.outer, segment.inner));
    }
    for segment in left.iter().rev() {
        spans.push((-segment.inner, -segment.outer));
    }
    spans
}

/// Back face mirror: marching +z from the left outer edge, leading < trailing.
fn back_spans(right: &[Segment], left: &[Segment]) -> Vec<(f32, f32)> {
    let mut spans = Vec::with_capacity(right.len() + left.len());
    for segment in left {
        spans.push((-segment.outer, -segment.inner));
    }
    for segment in right.iter().rev() {
        spans.push((segment.inner, segment.outer));
    }
    spans
}

fn build_vertices(
    params: &WallParameters,
    right: &[Segment],
    left: &[Segment],
) -> Vec<Vector3<f32>> {
    let (d, h) = (params.depth, params.height);
    let (wr, wl) = (params.width_right, params.width_left);
    let rows = params.row_count as usize;
    let quad_height = h / params.row_count as f32;
    let columns = right.len() + left.len();

    let mut vertices =
        Vec::with_capacity(OUTER_VERTEX_COUNT + 2 * columns * rows * VERTICES_PER_QUAD);

    // Outer box in doubled units, pivot at the bottom.
    vertices.extend([
        // top
        Vector3::new(d, h, wr),
        Vector3::new(d, h, wl),
        Vector3::new(-d, h, wr),
        Vector3::new(-d, h, wl),
        // bottom
        Vector3::new(d, 0.0, wl),
        Vector3::new(d, 0.0, wr),
        Vector3::new(-d, 0.0, wl),
        Vector3::new(-d, 0.0, wr),
        // right
        Vector3::new(d, 0.0, wr),
        Vector3::new(d, h, wr),
        Vector3::new(-d, 0.0, wr),
        Vector3::new(-d, h, wr),
        // left
        Vector3::new(d, h, wl),
        Vector3::new(d, 0.0, wl),
        Vector3::new(-d, h, wl),
        Vector3::new(-d, 0.0, wl),
    ]);

    for span in front_spans(right, left) {
        push_column(&mut vertices, d, span, quad_height, rows);
    }
    for span in back_spans(right, left) {
        push_column(&mut vertices, -d, span, quad_height, rows);
    }

    vertices
}

fn push_column(
    vertices: &mut Vec<Vector3<f32>>,
    x: f32,
    (z_lead, z_trail): (f32, f32),
    quad_height: f32,
    rows: usize,
) {
    for row in 0..rows {
        let y0 = row as f32 * quad_height;
        let y1 = y0 + quad_height;
        vertices.push(Vector3::new(x, y0, z_lead));
        vertices.push(Vector3::new(x, y0, z_trail));
        vertices.push(Vector3::new(x, y1, z_lead));
        vertices.push(Vector3::new(x, y1, z_trail));
    }
}

fn build_uv(
    params: &WallParameters,
    right: &[Segment],
    left: &[Segment],
    variants: &TextureVariants,
) -> Vec<Vector2<f32>> {
    let rows = params.row_count as usize;
    let mut uv = outer_box_uv(params);

    // Front then back, in the same column order as the vertices. Segment
    // widths are halved in the finalize step, so a full segment spans one
    // tile unit and a fractional one stops short of it.
    for segment in right.iter().chain(left.iter().rev()) {
        push_column_uv(&mut uv, segment.width() / 2.0, rows);
    }
    for segment in left.iter().chain(right.iter().rev()) {
        push_column_uv(&mut uv, segment.width() / 2.0, rows);
    }

    // Zoom the whole set into a single atlas cell, then shift each range
    // into its assigned tile.
    for coord in uv.iter_mut() {
        coord.x /= ATLAS_COLS as f32;
        coord.y /= ATLAS_ROWS as f32;
    }
    apply_tiles(&mut uv, variants, rows);

    uv
}

// Legacy texture block for the undecorated outer faces: corner coordinates
// reflect the wall's own aspect, placed by texture_offset/texture_scale.
fn outer_box_uv(params: &WallParameters) -> Vec<Vector2<f32>> {
    let offset = params.texture_offset;
    let scale = params.texture_scale;
    let height = offset.y + params.height / 2.0 * scale;
    let depth_right = offset.x + params.depth * scale;
    let depth_left = offset.x + (1.0 - params.depth) * scale;

    vec![
        // top
        Vector2::new(scale, offset.y),
        Vector2::new(offset.x, offset.y),
        Vector2::new(scale, scale),
        Vector2::new(offset.x, scale),
        // bottom
        Vector2::new(offset.x, offset.y),
        Vector2::new(scale, offset.y),
        Vector2::new(offset.x, scale),
        Vector2::new(scale, scale),
        // right
        Vector2::new(offset.x, offset.y),
        Vector2::new(offset.x, height),
        Vector2::new(depth_right, offset.y),
        Vector2::new(depth_right, height),
        // left
        Vector2::new(scale + offset.x, height),
        Vector2::new(scale + offset.x, offset.y),
        Vector2::new(depth_left, height),
        Vector2::new(depth_left, offset.y),
    ]
}

fn push_column_uv(uv: &mut Vec<Vector2<f32>>, span: f32, rows: usize) {
    for _ in 0..rows {
        uv.push(Vector2::new(span, 0.0));
        uv.push(Vector2::new(0.0, 0.0));
        uv.push(Vector2::new(span, 1.0));
        uv.push(Vector2::new(0.0, 1.0));
    }
}

fn apply_tiles(uv: &mut [Vector2<f32>], variants: &TextureVariants, rows: usize) {
    let blank = tile_uv_offset(TILE_BLANK);
    for coord in &mut uv[0..2 * VERTICES_PER_QUAD] {
        *coord += blank;
    }
    let side = tile_uv_offset(variants.side());
    for coord in &mut uv[2 * VERTICES_PER_QUAD..OUTER_VERTEX_COUNT] {
        *coord += side;
    }

    // Consumption order mirrors the span order, so a physical segment column
    // gets the same tile on the front and the back face.
    let front = variants.right().iter().chain(variants.left().iter().rev());
    let back = variants.left().iter().chain(variants.right().iter().rev());
    let column_stride = rows * VERTICES_PER_QUAD;
    let mut cursor = OUTER_VERTEX_COUNT;
    for &tile in front.chain(back) {
        debug_assert!(!is_reserved(tile));
        let offset = tile_uv_offset(tile);
        for coord in &mut uv[cursor..cursor + column_stride] {
            *coord += offset;
        }
        cursor += column_stride;
    }
    debug_assert_eq!(cursor, uv.len());
}

fn build_normals(rows: usize, columns: usize, rotation: Quaternion<f32>) -> Vec<Vector3<f32>> {
    let column_stride = rows * VERTICES_PER_QUAD;
    let mut normals = Vec::with_capacity(OUTER_VERTEX_COUNT + 2 * columns * column_stride);

    // top, bottom, right, left
    for normal in [
        Vector3::unit_y(),
        -Vector3::unit_y(),
        Vector3::unit_z(),
        -Vector3::unit_z(),
    ] {
        let rotated = rotation.rotate_vector(normal);
        for _ in 0..VERTICES_PER_QUAD {
            normals.push(rotated);
        }
    }

    let front = rotation.rotate_vector(Vector3::unit_x());
    for _ in 0..columns * column_stride {
        normals.push(front);
    }
    for _ in 0..columns * column_stride {
        normals.push(-front);
    }

    normals
}

/// Halves the doubled-unit coordinates, then rotates about the bounding-box
/// center so the pivot stays put.
fn finalize_vertices(vertices: &mut [Vector3<f32>], rotation: Quaternion<f32>) {
    for vertex in vertices.iter_mut() {
        *vertex /= 2.0;
    }
    let center = bounds_center(vertices);
    for vertex in vertices.iter_mut() {
        *vertex = rotation.rotate_vector(*vertex - center) + center;
    }
}

fn bounds_center(vertices: &[Vector3<f32>]) -> Vector3<f32> {
    let mut min = vertices[0];
    let mut max = vertices[0];
    for vertex in vertices {
        min.x = min.x.min(vertex.x);
        min.y = min.y.min(vertex.y);
        min.z = min.z.min(vertex.z);
        max.x = max.x.max(vertex.x);
        max.y = max.y.max(vertex.y);
        max.z = max.z.max(vertex.z);
    }
    (min + max) / 2.0
}

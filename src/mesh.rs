use cgmath::{Vector2, Vector3};

pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;

// Winding for one quad; every further quad adds 4 to each index.
const QUAD_PATTERN: [u32; INDICES_PER_QUAD] = [0, 1, 2, 1, 3, 2];

/// Finished mesh buffers, replaced wholesale on every regeneration. `uv` and
/// `normals` run parallel to `vertices`; `triangles` indexes into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<Vector3<f32>>,
    pub triangles: Vec<u32>,
    pub uv: Vec<Vector2<f32>>,
    pub normals: Vec<Vector3<f32>>,
}

impl MeshBuffers {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_QUAD
    }

    /// Packs the parallel buffers into one GPU-uploadable vertex stream.
    pub fn interleave(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uv)
            .map(|((position, normal), uv)| Vertex {
                position: [position.x, position.y, position.z],
                normal: [normal.x, normal.y, normal.z],
                uv: [uv.x, uv.y],
            })
            .collect()
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Index buffer for `quad_count` consecutive quads of 4 vertices each.
pub fn triangulate_quads(quad_count: usize) -> Vec<u32> {
    let mut triangles = Vec::with_capacity(quad_count * INDICES_PER_QUAD);
    for quad in 0..quad_count {
        let base = (quad * VERTICES_PER_QUAD) as u32;
        triangles.extend(QUAD_PATTERN.iter().map(|index| index + base));
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_replicates_with_vertex_stride() {
        let triangles = triangulate_quads(2);
        assert_eq!(triangles, vec![0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6]);
    }

    #[test]
    fn index_count_is_six_per_quad() {
        for quads in [0, 1, 4, 13] {
            let triangles = triangulate_quads(quads);
            assert_eq!(triangles.len(), quads * INDICES_PER_QUAD);
            if quads > 0 {
                let max = *triangles.iter().max().unwrap() as usize;
                assert_eq!(max, quads * VERTICES_PER_QUAD - 1);
            }
        }
    }

    #[test]
    fn interleave_zips_parallel_buffers() {
        let buffers = MeshBuffers {
            vertices: vec![Vector3::new(1.0, 2.0, 3.0)],
            triangles: vec![],
            uv: vec![Vector2::new(0.5, 0.25)],
            normals: vec![Vector3::new(0.0, 1.0, 0.0)],
        };
        let stream = buffers.interleave();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(stream[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(stream[0].uv, [0.5, 0.25]);
    }
}

//! Procedural wall mesh generation.
//!
//! Builds vertex/index/uv/normal buffers for a box-shaped wall whose front
//! and back faces are subdivided into texture-atlas-tiled width segments.
//! Segment tile assignments are stable across incremental parameter edits.

pub mod atlas;
pub mod generator;
pub mod mesh;
pub mod params;
pub mod segment;
pub mod variants;

pub use generator::WallMeshGenerator;
pub use mesh::{MeshBuffers, Vertex};
pub use params::WallParameters;
pub use variants::TextureVariants;

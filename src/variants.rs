//! Persistent per-wall texture variant assignments.
//!
//! Each segment column on the front/back faces carries one atlas tile. The
//! assignments survive regeneration: when a width edit adds or removes
//! segments, tiles are pushed or popped only at the seam-adjacent end of the
//! affected side, so every surviving segment keeps the tile it already had
//! and the wall does not reshuffle under small handle nudges.

use rand::{rngs::SmallRng, Rng};

use crate::atlas::{is_reserved, TileIndex, TILE_COUNT};

/// Tile assignments for both sides plus the shared right/left outer-face
/// tile. Both lists are ordered outward to inward, so index 0 is the
/// outermost segment and the seam-adjacent end is the back of the vector.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureVariants {
    right: Vec<TileIndex>,
    left: Vec<TileIndex>,
    side: TileIndex,
}

impl TextureVariants {
    pub fn seed(rng: &mut SmallRng) -> Self {
        Self {
            right: vec![random_tile(rng)],
            left: vec![random_tile(rng)],
            side: random_tile(rng),
        }
    }

    /// Grows or shrinks the lists to the given segment counts, one tile per
    /// step at the seam end, right side first. Surviving entries are never
    /// reassigned.
    pub fn ensure(&mut self, right_count: usize, left_count: usize, rng: &mut SmallRng) {
        while self.right.len() < right_count || self.left.len() < left_count {
            if self.right.len() < right_count {
                self.right.push(random_tile(rng));
            } else {
                self.left.push(random_tile(rng));
            }
        }
        while self.right.len() > right_count || self.left.len() > left_count {
            if self.right.len() > right_count {
                self.right.pop();
            } else {
                self.left.pop();
            }
        }

        assert_eq!(self.right.len(), right_count);
        assert_eq!(self.left.len(), left_count);
    }

    /// Re-rolls every assignment in place, keeping list lengths.
    pub fn reroll(&mut self, rng: &mut SmallRng) {
        for tile in self.right.iter_mut() {
            *tile = random_tile(rng);
        }
        for tile in self.left.iter_mut() {
            *tile = random_tile(rng);
        }
        self.side = random_tile(rng);
    }

    pub fn right(&self) -> &[TileIndex] {
        &self.right
    }

    pub fn left(&self) -> &[TileIndex] {
        &self.left
    }

    pub fn side(&self) -> TileIndex {
        self.side
    }
}

/// Uniform pick over the atlas grid minus the reserved cells. Only 2 of the
/// 12 cells are reserved, so the resample loop terminates quickly.
pub fn random_tile(rng: &mut SmallRng) -> TileIndex {
    loop {
        let tile = rng.gen_range(0..TILE_COUNT);
        if !is_reserved(tile) {
            return tile;
        }
    }
}

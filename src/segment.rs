//! Width segmentation for the subdivided front and back faces.
//!
//! A side's extent splits into full 2-unit segments plus at most one
//! fractional remainder. The fractional segment always sits innermost,
//! against the central seam, so a width nudge only moves the seam-adjacent
//! boundary and the outer full segments keep their positions.

/// Span of one full segment in doubled units (one texture tile wide after
/// the finalize halving).
pub const FULL_SEGMENT_SPAN: f32 = 2.0;

// Remainders below this count as zero so even-integer widths do not grow a
// sliver segment out of f32 rounding.
const REMAINDER_EPS: f32 = 1e-5;

/// One width slice of a side, as positive offsets from the central seam.
/// `outer > inner >= 0` and `outer - inner` is in `(0, 2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub outer: f32,
    pub inner: f32,
}

impl Segment {
    pub fn width(&self) -> f32 {
        self.outer - self.inner
    }
}

/// Splits one side's extent into segments ordered outward to inward. The
/// sign of `extent` is ignored; right and left sides use the same rule on
/// their magnitudes.
pub fn segment_side(extent: f32) -> Vec<Segment> {
    let width = extent.abs();
    let full = (width / FULL_SEGMENT_SPAN).floor() as usize;

    let mut segments = Vec::with_capacity(full + 1);
    let mut outer = width;
    for _ in 0..full {
        segments.push(Segment {
            outer,
            inner: outer - FULL_SEGMENT_SPAN,
        });
        outer -= FULL_SEGMENT_SPAN;
    }
    if outer > REMAINDER_EPS {
        segments.push(Segment { outer, inner: 0.0 });
    }

    segments
}

pub fn segment_count(extent: f32) -> usize {
    segment_side(extent).len()
}

//! Greedy triangle strip generation.
//!
//! A strip `s` of `n + 2` vertices encodes `n` triangles: triangle `k` is `(s[k], s[k+1], s[k+2])`,
//! with the first two vertices swapped when `k` is odd so that every triangle keeps the winding
//! of the face it came from.

mod builder;
mod free;
mod stitch;

pub use builder::*;
pub use free::*;
pub use stitch::*;

use crate::Triangle;

/// How [StripBuilder] grows strips.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StripOptions {
    /// Only accept neighbours whose winding survives their position in the strip.
    pub preserve_winding: bool,
    /// Emit faces that couldn't be merged as one-triangle strips instead of [SingleTriangle]s.
    pub singles_as_strips: bool,
    /// Orient seeds so that both strip ends face a usable neighbour where possible, instead of
    /// taking the lowest edge slot that has one.
    pub two_sided_seeds: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            preserve_winding: true,
            singles_as_strips: false,
            two_sided_seeds: false,
        }
    }
}

impl StripOptions {
    pub fn preserve_winding(mut self, value: bool) -> Self {
        self.preserve_winding = value;
        self
    }

    pub fn singles_as_strips(mut self, value: bool) -> Self {
        self.singles_as_strips = value;
        self
    }

    pub fn two_sided_seeds(mut self, value: bool) -> Self {
        self.two_sided_seeds = value;
        self
    }
}

/// A triangle strip and the faces it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub(crate) vertices: Vec<u32>,
    pub(crate) faces: Vec<u32>,
    pub(crate) seed: u32,
}

impl Strip {
    /// Vertex indices in strip order.
    #[inline]
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// The face each strip triangle came from, in strip order.
    #[inline]
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    /// The face this strip was grown from.
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of triangles in the strip.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The triangles of this strip, as they would be rendered.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.vertices.windows(3).enumerate().map(|(k, w)| {
            if k % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            }
        })
    }
}

/// A face that couldn't be merged into any strip.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SingleTriangle {
    pub face: u32,
    pub vertices: Triangle,
}

/// The output of one strip build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripSet {
    pub(crate) strips: Vec<Strip>,
    pub(crate) singles: Vec<SingleTriangle>,
}

impl StripSet {
    /// Strips, ordered by ascending seed face.
    #[inline]
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Unmerged faces, in ascending face order.
    #[inline]
    pub fn singles(&self) -> &[SingleTriangle] {
        &self.singles
    }

    /// Total number of faces covered.
    pub fn face_count(&self) -> usize {
        self.strips.iter().map(Strip::len).sum::<usize>() + self.singles.len()
    }

    /// Number of indices needed to draw every strip separately plus every single as a triangle.
    pub fn index_count(&self) -> usize {
        self.strips.iter().map(|s| s.vertices.len()).sum::<usize>() + self.singles.len() * 3
    }

    pub fn into_parts(self) -> (Vec<Strip>, Vec<SingleTriangle>) {
        (self.strips, self.singles)
    }
}

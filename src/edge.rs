//! Edge deduplication and face → edge adjacency.

mod cache;

pub use cache::*;

use fastvec::{FastVec, FastView};

use crate::{Error, Triangle};

/// An undirected edge between two vertices, stored with the smaller index first.
#[repr(C)]
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
}

impl Edge {
    /// Construct the canonical edge between `v0` and `v1`.
    #[inline]
    pub fn new(v0: u32, v1: u32) -> Self {
        Self {
            a: v0.min(v1),
            b: v0.max(v1),
        }
    }

    #[inline]
    pub fn contains(self, v: u32) -> bool {
        self.a == v || self.b == v
    }

    /// Whether both endpoints are the same vertex.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.a == self.b
    }
}

/// Indices into a deduplicated edge list of a triangle's edges `v0-v1`, `v1-v2`, `v2-v0`.
pub type FaceEdges = [u32; 3];

/// Vertices of edge slot `slot` of `tri`.
#[inline]
pub fn slot_edge(tri: &Triangle, slot: usize) -> Edge {
    Edge::new(tri[slot], tri[(slot + 1) % 3])
}

/// A deduplicated edge list and the edges of each face within it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeGraph {
    pub(crate) edges: FastVec<Edge>,
    pub(crate) face_edges: FastVec<FaceEdges>,
}

/// A borrowed [EdgeGraph], possibly aliasing memory owned by a mesh's edge cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeGraphView<'a> {
    edges: FastView<'a, Edge>,
    face_edges: FastView<'a, FaceEdges>,
}

/// Scratch buffers reused across edge computations.
#[derive(Debug, Default)]
pub struct EdgeScratch {
    /// `3 * faces` edges, one per face edge slot, with duplicates.
    redundant: FastVec<Edge>,
    /// Permutation of `redundant`, sorted by edge.
    order: FastVec<u32>,
    /// Redundant index → deduplicated index.
    remap: FastVec<u32>,
    rebuilds: usize,
}

impl EdgeScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a cached edge blob has been recomputed through this scratch.
    #[inline]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }
}

impl EdgeGraph {
    /// Compute the edge graph of `triangles`.
    pub fn compute(triangles: &[Triangle]) -> Result<Self, Error> {
        Self::compute_with(triangles, &mut EdgeScratch::default())
    }

    /// Compute the edge graph of `triangles`, using `scratch` for temporary storage.
    ///
    /// Edges shared by any number of faces collapse into one entry; degenerate faces produce
    /// degenerate edges like any other.
    pub fn compute_with(triangles: &[Triangle], scratch: &mut EdgeScratch) -> Result<Self, Error> {
        let redundant_len = triangles
            .len()
            .checked_mul(3)
            .filter(|n| *n <= u32::MAX as usize)
            .ok_or(Error::TooManyTriangles(triangles.len()))?;

        let EdgeScratch {
            redundant,
            order,
            remap,
            ..
        } = scratch;

        // every face edge, in face order, plus each face's position in that list
        redundant.resize_not_preserving(redundant_len);
        let mut face_edges = FastVec::<FaceEdges>::with_len(triangles.len());
        for (face, tri) in triangles.iter().enumerate() {
            let base = face * 3;
            for slot in 0..3 {
                redundant[base + slot] = slot_edge(tri, slot);
            }
            let base = base as u32;
            face_edges[face] = [base, base + 1, base + 2];
        }

        order.resize_not_preserving(redundant_len);
        for (i, o) in order.iter_mut().enumerate() {
            *o = i as u32;
        }
        order.sort_unstable_by_key(|i| redundant[*i as usize]);

        // collapse runs of equal edges; a run may be any length
        remap.resize_not_preserving(redundant_len);
        let mut edges = FastVec::with_capacity(redundant_len / 2 + 1);
        for run in order.chunk_by(|l, r| redundant[*l as usize] == redundant[*r as usize]) {
            let dedup = edges.len() as u32;
            edges.push(redundant[run[0] as usize]);
            for r in run {
                remap[*r as usize] = dedup;
            }
        }

        for fe in face_edges.iter_mut() {
            for e in fe.iter_mut() {
                *e = remap[*e as usize];
            }
        }

        Ok(Self { edges, face_edges })
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn face_edges(&self) -> &[FaceEdges] {
        &self.face_edges
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_edges.len()
    }

    pub fn view(&self) -> EdgeGraphView<'_> {
        EdgeGraphView {
            edges: self.edges.view(),
            face_edges: self.face_edges.view(),
        }
    }

    /// Overwrite `self` with the contents of `view`, reusing the existing buffers.
    pub fn copy_from(&mut self, view: EdgeGraphView<'_>) {
        self.edges.resize_not_preserving(view.edges.len());
        self.edges.copy_from_slice(&view.edges);
        self.face_edges.resize_not_preserving(view.face_edges.len());
        self.face_edges.copy_from_slice(&view.face_edges);
    }
}

impl<'a> EdgeGraphView<'a> {
    pub fn new(edges: FastView<'a, Edge>, face_edges: FastView<'a, FaceEdges>) -> Self {
        Self { edges, face_edges }
    }

    #[inline]
    pub fn edges(&self) -> &'a [Edge] {
        self.edges.as_slice()
    }

    #[inline]
    pub fn face_edges(&self) -> &'a [FaceEdges] {
        self.face_edges.as_slice()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_edges.len()
    }

    pub fn to_owned_graph(&self) -> EdgeGraph {
        EdgeGraph {
            edges: self.edges.to_owned_vec(),
            face_edges: self.face_edges.to_owned_vec(),
        }
    }
}

impl<'a> From<&'a EdgeGraph> for EdgeGraphView<'a> {
    fn from(graph: &'a EdgeGraph) -> Self {
        graph.view()
    }
}

//! Triangle strip generation over indexed triangle soups.
//!
//! Building strips happens in two stages:
//!
//! 1. [compute_edges] deduplicates the soup's edges and records, for each face, the indices of
//!    its three edges ([EdgeGraph]). Meshes implementing [MeshSource] can keep that graph cached
//!    as a property blob tagged with the mesh's edit index; see [edge::refresh_edge_cache].
//! 2. [StripBuilder] greedily grows strips across shared edges, keeping faces of different
//!    materials apart and (optionally) every face's winding intact.
//!
//! The resulting [StripSet] can be stitched into one index stream with [StripSet::stitch].
//!
//! ```
//! use ribbon::{build_strips, unstrip, Stitch};
//!
//! let square = [[0, 1, 2], [0, 2, 3]];
//! let set = build_strips(&square, &[(); 2]).unwrap();
//! assert_eq!(set.strips()[0].vertices(), &[1, 2, 0, 3]);
//!
//! let stream = set.stitch(Stitch::Degenerate);
//! assert_eq!(unstrip(&stream, Stitch::Degenerate).len(), 2);
//! ```
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod edge;
pub mod error;
pub mod mesh;
pub mod strip;

pub use edge::{Edge, EdgeGraph, EdgeGraphView, EdgeScratch};
pub use error::Error;
pub use mesh::{MeshSource, PropertyKey, TriMesh};
pub use strip::*;

/// Vertex indices of one triangle, counter-clockwise when seen from the front.
pub type Triangle = [u32; 3];

/// Compute the deduplicated edges of `triangles` and the edges of each face.
pub fn compute_edges(triangles: &[Triangle]) -> Result<EdgeGraph, Error> {
    EdgeGraph::compute(triangles)
}

/// Strip `triangles` with default [StripOptions], computing adjacency on the fly.
///
/// `materials[f]` is the material key of face `f`; only faces with equal keys share a strip.
pub fn build_strips<K: Eq>(triangles: &[Triangle], materials: &[K]) -> Result<StripSet, Error> {
    let graph = EdgeGraph::compute(triangles)?;
    build_strips_with(triangles, materials, graph.view(), StripOptions::default())
}

/// Strip `triangles` using precomputed adjacency.
pub fn build_strips_with<K: Eq>(
    triangles: &[Triangle],
    materials: &[K],
    graph: EdgeGraphView<'_>,
    options: StripOptions,
) -> Result<StripSet, Error> {
    Ok(StripBuilder::new(triangles, materials, graph, options)?.build())
}

/// Strip a mesh, reusing (or refreshing) the edge graph cached on it.
pub fn build_mesh_strips<M: MeshSource + ?Sized, K: Eq>(
    mesh: &mut M,
    materials: &[K],
    scratch: &mut EdgeScratch,
    options: StripOptions,
) -> Result<StripSet, Error> {
    mesh.validate_triangles()?;
    edge::refresh_edge_cache(mesh, scratch)?;
    let mesh: &M = mesh;
    let graph = edge::fresh_view(mesh)?;
    build_strips_with(mesh.triangles(), materials, graph, options)
}

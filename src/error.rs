//! Errors surfaced at the API boundary.
//!
//! Stale caches and non-manifold or degenerate geometry are not errors; they are handled
//! silently.

use crate::mesh::PropertyKey;

/// Errors related to edge computation and strip building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("face {face} references vertex {vertex}, but the mesh only has {point_count} points")]
    VertexOutOfRange {
        face: usize,
        vertex: u32,
        point_count: usize,
    },
    #[error("expected one material key per face: {faces} faces, {materials} keys")]
    MaterialCountMismatch { faces: usize, materials: usize },
    #[error("adjacency describes {adjacency} faces, but {faces} triangles were supplied")]
    AdjacencyMismatch { faces: usize, adjacency: usize },
    #[error("face {face} references edge {edge}, but only {edge_count} edges exist")]
    EdgeOutOfRange {
        face: usize,
        edge: u32,
        edge_count: usize,
    },
    #[error("{0} triangles overflow the 32-bit edge index space")]
    TooManyTriangles(usize),
    #[error("mesh did not keep the edge cache stored under `{0}`")]
    EdgeCacheLost(PropertyKey),
}

//! Edge graphs cached on a mesh, keyed by the mesh's edit index.
//!
//! # Blob layout
//!
//! The cache is stored as a `u32` word blob under [EDGE_CACHE_KEY]:
//!
//! | words       | contents                                 |
//! |-------------|------------------------------------------|
//! | `0`         | layout version                           |
//! | `1`         | edit index of the mesh the blob matches  |
//! | `2`         | edge count `E`                           |
//! | `3`         | face count `F`                           |
//! | `4..4+2E`   | edges, as `(a, b)` pairs                 |
//! | `..+3F`     | face edges, as index triples             |
//!
//! A blob is only trusted if it parses, its tag equals the mesh's current edit index, and its
//! face count matches the mesh. Anything else is recomputed and overwritten.

use fastvec::FastView;

use crate::{
    mesh::{MeshSource, PropertyKey},
    Error,
};

use super::{Edge, EdgeGraph, EdgeGraphView, EdgeScratch, FaceEdges};

/// Property key under which edge caches are stored.
pub const EDGE_CACHE_KEY: PropertyKey = PropertyKey(*b"edge");

const LAYOUT_VERSION: u32 = 1;
const VERSION_WORD: usize = 0;
const EDIT_INDEX_WORD: usize = 1;
const EDGE_COUNT_WORD: usize = 2;
const FACE_COUNT_WORD: usize = 3;
const HEADER_WORDS: usize = 4;

const EDGE_WORDS: usize = 2;
const FACE_WORDS: usize = 3;

/// A parsed, borrowed edge cache blob.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeBlob<'a> {
    words: &'a [u32],
    edge_count: usize,
    face_count: usize,
}

impl<'a> EdgeBlob<'a> {
    /// Parse a blob, returning `None` if its version or length is wrong.
    pub(crate) fn parse(words: &'a [u32]) -> Option<Self> {
        if words.len() < HEADER_WORDS || words[VERSION_WORD] != LAYOUT_VERSION {
            return None;
        }
        let edge_count = words[EDGE_COUNT_WORD] as usize;
        let face_count = words[FACE_COUNT_WORD] as usize;
        let expected = edge_count
            .checked_mul(EDGE_WORDS)?
            .checked_add(face_count.checked_mul(FACE_WORDS)?)?
            .checked_add(HEADER_WORDS)?;
        (words.len() == expected).then_some(Self {
            words,
            edge_count,
            face_count,
        })
    }

    #[inline]
    pub(crate) fn edit_index(&self) -> u32 {
        self.words[EDIT_INDEX_WORD]
    }

    #[inline]
    pub(crate) fn face_count(&self) -> usize {
        self.face_count
    }

    pub(crate) fn edges(&self) -> &'a [Edge] {
        let end = HEADER_WORDS + self.edge_count * EDGE_WORDS;
        bytemuck::cast_slice(&self.words[HEADER_WORDS..end])
    }

    pub(crate) fn face_edges(&self) -> &'a [FaceEdges] {
        let start = HEADER_WORDS + self.edge_count * EDGE_WORDS;
        bytemuck::cast_slice(&self.words[start..])
    }

    pub(crate) fn graph(&self) -> EdgeGraphView<'a> {
        EdgeGraphView::new(
            FastView::from_slice(self.edges()),
            FastView::from_slice(self.face_edges()),
        )
    }

    /// Serialize `graph` as a blob tagged with `edit_index`, reusing `out`'s allocation.
    pub(crate) fn encode_into(edit_index: u32, graph: EdgeGraphView<'_>, out: &mut Vec<u32>) {
        out.clear();
        out.reserve(
            HEADER_WORDS + graph.edge_count() * EDGE_WORDS + graph.face_count() * FACE_WORDS,
        );
        out.extend_from_slice(&[
            LAYOUT_VERSION,
            edit_index,
            graph.edge_count() as u32,
            graph.face_count() as u32,
        ]);
        out.extend_from_slice(bytemuck::cast_slice(graph.edges()));
        out.extend_from_slice(bytemuck::cast_slice(graph.face_edges()));
    }
}

fn fresh_blob<M: MeshSource + ?Sized>(mesh: &M) -> Option<EdgeBlob<'_>> {
    let words = mesh.property(EDGE_CACHE_KEY)?;
    let Some(blob) = EdgeBlob::parse(words) else {
        tracing::warn!(words = words.len(), "ignoring malformed edge cache blob");
        return None;
    };
    (blob.edit_index() == mesh.edit_index() && blob.face_count() == mesh.triangles().len())
        .then_some(blob)
}

/// Whether `mesh` carries an edge cache that matches its current state.
pub fn has_fresh_edge_cache<M: MeshSource + ?Sized>(mesh: &M) -> bool {
    fresh_blob(mesh).is_some()
}

/// The edge graph cached on `mesh`, if the cache matches the mesh's current state.
///
/// Use this after [refresh_edge_cache] when the view has to coexist with other shared borrows of
/// the mesh, which [cached_edges_view] doesn't allow.
pub fn edge_cache_view<M: MeshSource + ?Sized>(mesh: &M) -> Option<EdgeGraphView<'_>> {
    fresh_blob(mesh).map(|blob| blob.graph())
}

/// Like [edge_cache_view], for callers that just refreshed the cache and expect it to be there.
pub(crate) fn fresh_view<M: MeshSource + ?Sized>(
    mesh: &M,
) -> Result<EdgeGraphView<'_>, Error> {
    edge_cache_view(mesh).ok_or(Error::EdgeCacheLost(EDGE_CACHE_KEY))
}

/// Make sure `mesh` carries an up-to-date edge cache, recomputing it if stale.
///
/// Returns whether the cache had to be rebuilt. Fails with [Error::EdgeCacheLost] if the mesh
/// doesn't hand the blob back after storing it.
#[tracing::instrument(skip_all, fields(faces = mesh.triangles().len()))]
pub fn refresh_edge_cache<M: MeshSource + ?Sized>(
    mesh: &mut M,
    scratch: &mut EdgeScratch,
) -> Result<bool, Error> {
    if has_fresh_edge_cache(mesh) {
        tracing::trace!(edit_index = mesh.edit_index(), "edge cache hit");
        return Ok(false);
    }

    mesh.validate_triangles()?;
    let graph = EdgeGraph::compute_with(mesh.triangles(), scratch)?;
    let mut blob = Vec::new();
    EdgeBlob::encode_into(mesh.edit_index(), graph.view(), &mut blob);
    mesh.set_property(EDGE_CACHE_KEY, blob);

    // attaching the blob may itself have been an edit; tag it with the resulting index
    let tag = mesh.edit_index();
    match mesh.property_mut(EDGE_CACHE_KEY) {
        Some(words) if words.len() > EDIT_INDEX_WORD => words[EDIT_INDEX_WORD] = tag,
        _ => return Err(Error::EdgeCacheLost(EDGE_CACHE_KEY)),
    }
    scratch.rebuilds += 1;

    tracing::debug!(
        edges = graph.edge_count(),
        edit_index = tag,
        "rebuilt edge cache"
    );
    Ok(true)
}

/// Get the edge graph of `mesh`, recomputing its cache if stale, and copy it into `out`.
///
/// `out`'s buffers are reused where their capacity allows.
pub fn cached_edges<M: MeshSource + ?Sized>(
    mesh: &mut M,
    scratch: &mut EdgeScratch,
    out: &mut EdgeGraph,
) -> Result<(), Error> {
    refresh_edge_cache(mesh, scratch)?;
    out.copy_from(fresh_view(mesh)?);
    Ok(())
}

/// Get the edge graph of `mesh`, recomputing its cache if stale, as a view aliasing the cache.
///
/// The view borrows `mesh`; it cannot outlive the cache or coexist with a mutation of it.
pub fn cached_edges_view<'m, M: MeshSource + ?Sized>(
    mesh: &'m mut M,
    scratch: &mut EdgeScratch,
) -> Result<EdgeGraphView<'m>, Error> {
    refresh_edge_cache(mesh, scratch)?;
    let mesh: &'m M = mesh;
    fresh_view(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> EdgeGraph {
        EdgeGraph::compute(&[[0, 1, 2], [0, 2, 3]]).unwrap()
    }

    #[test]
    fn blob_layout() {
        let g = square();
        let mut words = Vec::new();
        EdgeBlob::encode_into(42, g.view(), &mut words);
        assert_eq!(&words[..HEADER_WORDS], &[LAYOUT_VERSION, 42, 5, 2]);
        assert_eq!(words.len(), HEADER_WORDS + 5 * 2 + 2 * 3);
        // first edge is (0, 1)
        assert_eq!(&words[HEADER_WORDS..HEADER_WORDS + 2], &[0, 1]);

        let blob = EdgeBlob::parse(&words).unwrap();
        assert_eq!(blob.edit_index(), 42);
        assert_eq!(blob.graph(), g.view());
    }

    #[test]
    fn rejects_malformed() {
        let mut words = Vec::new();
        EdgeBlob::encode_into(0, square().view(), &mut words);

        assert!(EdgeBlob::parse(&words[..words.len() - 1]).is_none());
        assert!(EdgeBlob::parse(&[]).is_none());

        let mut wrong_version = words.clone();
        wrong_version[VERSION_WORD] = LAYOUT_VERSION + 1;
        assert!(EdgeBlob::parse(&wrong_version).is_none());

        let mut huge = words;
        huge[EDGE_COUNT_WORD] = u32::MAX;
        assert!(EdgeBlob::parse(&huge).is_none());
    }

    #[test]
    fn encode_reuses_buffer() {
        let mut words = vec![9; 64];
        EdgeBlob::encode_into(1, square().view(), &mut words);
        assert_eq!(words.len(), HEADER_WORDS + 16);
        assert!(words.capacity() >= 64);
    }
}

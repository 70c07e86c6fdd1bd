use fastvec::FastVec;

use crate::{
    edge::{EdgeGraphView, FaceEdges},
    Error, Triangle,
};

use super::{FreeFaceSet, SingleTriangle, Strip, StripOptions, StripSet};

/// Whether `a` is `b`, possibly starting from a different vertex.
#[inline]
pub(crate) fn is_rotation(a: Triangle, b: Triangle) -> bool {
    (0..3).any(|r| a[0] == b[r] && a[1] == b[(r + 1) % 3] && a[2] == b[(r + 2) % 3])
}

/// Whether a face rendered at strip position `position` from trailing edge `(x, y)` and far
/// vertex `far` keeps the winding of `tri`.
#[inline]
fn winds_like(position: usize, x: u32, y: u32, far: u32, tri: Triangle) -> bool {
    let rendered = if position % 2 == 0 {
        [x, y, far]
    } else {
        [y, x, far]
    };
    is_rotation(rendered, tri)
}

/// A strip under construction.
#[derive(Debug)]
struct Growing {
    vertices: Vec<u32>,
    faces: Vec<u32>,
}

impl Growing {
    /// Start from `seed`, rotated so that its edge slot `slot` is the trailing edge.
    fn from_seed(seed: u32, tri: Triangle, slot: usize) -> Self {
        Self {
            vertices: vec![tri[(slot + 2) % 3], tri[slot], tri[(slot + 1) % 3]],
            faces: vec![seed],
        }
    }

    fn reverse(&mut self) {
        self.vertices.reverse();
        self.faces.reverse();
    }
}

/// Greedily partitions a triangle soup into triangle strips.
///
/// Seeds are taken in ascending face order. From each seed the strip grows forward across the
/// trailing edge as far as it can, then (once) from the other end. Faces only join a strip if
/// they are still free, share the seed's material key exactly, and (with
/// [`preserve_winding`](StripOptions::preserve_winding)) keep their winding at their strip
/// position. Seeds without any such neighbour become [SingleTriangles](SingleTriangle).
#[derive(Debug)]
pub struct StripBuilder<'a, K> {
    triangles: &'a [Triangle],
    materials: &'a [K],
    face_edges: &'a [FaceEdges],
    options: StripOptions,
    /// Faces around edge `e` are `edge_faces[edge_start[e]..edge_start[e + 1]]`, ascending.
    edge_start: FastVec<u32>,
    edge_faces: FastVec<u32>,
    free: FreeFaceSet,
}

impl<'a, K: Eq> StripBuilder<'a, K> {
    /// Prepare to strip `triangles`, whose adjacency is given by `graph`.
    ///
    /// Vertex indices aren't checked here; the caller vouches for them.
    pub fn new(
        triangles: &'a [Triangle],
        materials: &'a [K],
        graph: EdgeGraphView<'a>,
        options: StripOptions,
    ) -> Result<Self, Error> {
        if materials.len() != triangles.len() {
            return Err(Error::MaterialCountMismatch {
                faces: triangles.len(),
                materials: materials.len(),
            });
        }
        if graph.face_count() != triangles.len() {
            return Err(Error::AdjacencyMismatch {
                faces: triangles.len(),
                adjacency: graph.face_count(),
            });
        }
        if triangles.len() > u32::MAX as usize / 3 {
            return Err(Error::TooManyTriangles(triangles.len()));
        }

        let face_edges = graph.face_edges();
        let edge_count = graph.edge_count();
        for (face, fe) in face_edges.iter().enumerate() {
            if let Some(&edge) = fe.iter().find(|e| **e as usize >= edge_count) {
                return Err(Error::EdgeOutOfRange {
                    face,
                    edge,
                    edge_count,
                });
            }
        }

        // invert face -> edge into edge -> faces
        let mut edge_start = FastVec::from_elem(0u32, edge_count + 1);
        for e in face_edges.iter().flatten() {
            edge_start[*e as usize + 1] += 1;
        }
        for i in 1..=edge_count {
            edge_start[i] += edge_start[i - 1];
        }
        let mut cursor = edge_start.clone();
        let mut edge_faces = FastVec::with_len(face_edges.len() * 3);
        for (face, fe) in face_edges.iter().enumerate() {
            for e in fe {
                let at = &mut cursor[*e as usize];
                edge_faces[*at as usize] = face as u32;
                *at += 1;
            }
        }

        Ok(Self {
            triangles,
            materials,
            face_edges,
            options,
            edge_start,
            edge_faces,
            free: FreeFaceSet::new(triangles.len()),
        })
    }

    /// Consume every face, returning the strips and leftover single triangles.
    #[tracing::instrument(skip_all, fields(faces = self.triangles.len()))]
    pub fn build(mut self) -> StripSet {
        let mut set = StripSet::default();
        while let Some(seed) = self.free.find_next_free() {
            match self.grow(seed) {
                Some(strip) => set.strips.push(strip),
                None => {
                    let vertices = self.triangles[seed as usize];
                    if self.options.singles_as_strips {
                        set.strips.push(Strip {
                            vertices: vertices.to_vec(),
                            faces: vec![seed],
                            seed,
                        });
                    } else {
                        set.singles.push(SingleTriangle {
                            face: seed,
                            vertices,
                        });
                    }
                }
            }
        }
        debug_assert_eq!(self.free.count_free(), 0);
        tracing::debug!(
            strips = set.strips.len(),
            singles = set.singles.len(),
            indices = set.index_count(),
            "built triangle strips"
        );
        set
    }

    #[inline]
    fn faces_on_edge(&self, edge: u32) -> &[u32] {
        let e = edge as usize;
        &self.edge_faces[self.edge_start[e] as usize..self.edge_start[e + 1] as usize]
    }

    /// The index of the edge between `x` and `y` among `face`'s edges.
    fn edge_of(&self, face: u32, x: u32, y: u32) -> Option<u32> {
        let tri = &self.triangles[face as usize];
        let fe = &self.face_edges[face as usize];
        (0..3)
            .find(|slot| {
                let (u, v) = (tri[*slot], tri[(*slot + 1) % 3]);
                (u == x && v == y) || (u == y && v == x)
            })
            .map(|slot| fe[slot])
    }

    /// If `face` may continue a strip across `edge`, get its far vertex.
    fn joins(&self, face: u32, edge: u32, x: u32, y: u32, position: usize, key: &K) -> Option<u32> {
        let f = face as usize;
        if !self.free.is_free(face) || self.materials[f] != *key {
            return None;
        }
        let tri = self.triangles[f];
        (0..3)
            .filter(|slot| self.face_edges[f][*slot] == edge)
            .map(|slot| tri[(slot + 2) % 3])
            .find(|far| !self.options.preserve_winding || winds_like(position, x, y, *far, tri))
    }

    /// The face (and its far vertex) that would be appended across the strip's trailing edge.
    fn peek(&self, strip: &Growing, key: &K) -> Option<(u32, u32)> {
        let n = strip.vertices.len();
        let (x, y) = (strip.vertices[n - 2], strip.vertices[n - 1]);
        let last = *strip.faces.last()?;
        let edge = self.edge_of(last, x, y)?;
        let position = strip.faces.len();
        self.faces_on_edge(edge)
            .iter()
            .find_map(|&f| self.joins(f, edge, x, y, position, key).map(|far| (f, far)))
    }

    /// Try to append one face across the strip's trailing edge.
    fn extend(&mut self, strip: &mut Growing, key: &K) -> bool {
        match self.peek(strip, key) {
            Some((face, far)) => {
                self.free.set_used(face);
                strip.vertices.push(far);
                strip.faces.push(face);
                true
            }
            None => false,
        }
    }

    /// Pick the edge slot of `seed` that becomes the trailing edge, if any neighbour can join.
    ///
    /// Slots are tried in order 0, 1, 2. With
    /// [`two_sided_seeds`](StripOptions::two_sided_seeds), a slot whose opposite end (the slot
    /// before it) also has a usable neighbour wins over a lower one that doesn't.
    fn seed_slot(&self, seed: u32, tri: Triangle, key: &K) -> Option<usize> {
        let joinable = |slot: usize| self.peek(&Growing::from_seed(seed, tri, slot), key).is_some();
        (0..3)
            .filter(|slot| joinable(*slot))
            .min_by_key(|slot| self.options.two_sided_seeds && !joinable((*slot + 2) % 3))
    }

    /// Grow a strip from `seed`, or return `None` if no neighbour can join it.
    fn grow(&mut self, seed: u32) -> Option<Strip> {
        self.free.set_used(seed);
        let materials = self.materials;
        let key = &materials[seed as usize];
        let tri = self.triangles[seed as usize];

        let mut strip = Growing::from_seed(seed, tri, self.seed_slot(seed, tri, key)?);
        while self.extend(&mut strip, key) {}

        // reversing a strip with an odd face count flips every face
        if !self.options.preserve_winding || strip.faces.len() % 2 == 0 {
            let forward = strip.faces.len();
            strip.reverse();
            while self.extend(&mut strip, key) {}
            if strip.faces.len() == forward {
                strip.reverse();
            }
        }

        Some(Strip {
            vertices: strip.vertices,
            faces: strip.faces,
            seed,
        })
    }
}

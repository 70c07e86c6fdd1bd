//! The mesh object that edge caches attach to.
//!
//! The library only needs a handful of things from a mesh: its edit index, its triangles, its
//! point count (to validate indices) and somewhere to keep opaque property blobs. [MeshSource]
//! captures that; [TriMesh] is a plain in-memory implementation.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::{Error, Triangle};

/// A four-character tag identifying a property blob attached to a mesh.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey(pub [u8; 4]);

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in self.0 {
            write!(f, "{}", b.escape_ascii())?;
        }
        Ok(())
    }
}

/// Read access to a triangle mesh, plus storage for derived data keyed by [PropertyKey].
///
/// # Contract
///
/// * `edit_index` must change whenever the mesh's geometry changes.
/// * `set_property` may itself count as an edit (and change `edit_index`).
/// * `property_mut` must **not** change `edit_index`.
pub trait MeshSource {
    /// Version tag of the mesh's current state.
    fn edit_index(&self) -> u32;

    /// Number of points that triangle vertex indices may refer to.
    fn point_count(&self) -> usize;

    fn triangles(&self) -> &[Triangle];

    fn property(&self, key: PropertyKey) -> Option<&[u32]>;

    fn property_mut(&mut self, key: PropertyKey) -> Option<&mut [u32]>;

    fn set_property(&mut self, key: PropertyKey, blob: Vec<u32>);

    /// Check that every triangle only refers to existing points.
    fn validate_triangles(&self) -> Result<(), Error> {
        let point_count = self.point_count();
        for (face, tri) in self.triangles().iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|v| **v as usize >= point_count) {
                return Err(Error::VertexOutOfRange {
                    face,
                    vertex,
                    point_count,
                });
            }
        }
        Ok(())
    }
}

/// An in-memory triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    points: Vec<Point3<f32>>,
    triangles: Vec<Triangle>,
    properties: HashMap<PropertyKey, Vec<u32>>,
    edit_index: u32,
}

impl TriMesh {
    pub fn new(points: Vec<Point3<f32>>, triangles: Vec<Triangle>) -> Self {
        Self {
            points,
            triangles,
            properties: HashMap::new(),
            edit_index: 0,
        }
    }

    /// A flat, consistently wound grid of `width` × `height` quads in the XY plane, each split
    /// into two triangles along its diagonal.
    ///
    /// Quads are emitted row by row; quad `(x, y)` owns faces `2 * (y * width + x)` and the one
    /// after it.
    pub fn grid(width: u32, height: u32) -> Self {
        let stride = width + 1;
        let points = (0..=height)
            .flat_map(|y| (0..=width).map(move |x| Point3::new(x as f32, y as f32, 0.0)))
            .collect();
        let mut triangles = Vec::with_capacity(2 * (width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let p0 = y * stride + x;
                let p1 = p0 + 1;
                let p2 = p1 + stride;
                let p3 = p0 + stride;
                triangles.push([p0, p1, p2]);
                triangles.push([p0, p2, p3]);
            }
        }
        Self::new(points, triangles)
    }

    #[inline]
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    /// Mutable access to the points; counts as an edit.
    pub fn points_mut(&mut self) -> &mut Vec<Point3<f32>> {
        self.touch();
        &mut self.points
    }

    /// Mutable access to the triangles; counts as an edit.
    pub fn triangles_mut(&mut self) -> &mut Vec<Triangle> {
        self.touch();
        &mut self.triangles
    }

    pub fn push_triangle(&mut self, tri: Triangle) {
        self.touch();
        self.triangles.push(tri);
    }

    pub fn remove_property(&mut self, key: PropertyKey) -> Option<Vec<u32>> {
        self.properties.remove(&key)
    }

    #[inline]
    fn touch(&mut self) {
        self.edit_index = self.edit_index.wrapping_add(1);
    }
}

impl MeshSource for TriMesh {
    #[inline]
    fn edit_index(&self) -> u32 {
        self.edit_index
    }

    #[inline]
    fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    fn property(&self, key: PropertyKey) -> Option<&[u32]> {
        self.properties.get(&key).map(Vec::as_slice)
    }

    fn property_mut(&mut self, key: PropertyKey) -> Option<&mut [u32]> {
        self.properties.get_mut(&key).map(Vec::as_mut_slice)
    }

    fn set_property(&mut self, key: PropertyKey, blob: Vec<u32>) {
        self.touch();
        self.properties.insert(key, blob);
    }
}

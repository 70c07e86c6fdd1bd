use nalgebra::Point3;
use ribbon::{
    build_mesh_strips, build_strips,
    edge::{
        cached_edges, cached_edges_view, edge_cache_view, has_fresh_edge_cache,
        refresh_edge_cache, EDGE_CACHE_KEY,
    },
    EdgeGraph, EdgeScratch, Error, MeshSource, PropertyKey, StripOptions, TriMesh, Triangle,
};

/// A mesh that accepts property blobs but never stores them.
struct Forgetful(TriMesh);

impl MeshSource for Forgetful {
    fn edit_index(&self) -> u32 {
        self.0.edit_index()
    }

    fn point_count(&self) -> usize {
        self.0.point_count()
    }

    fn triangles(&self) -> &[Triangle] {
        self.0.triangles()
    }

    fn property(&self, _: PropertyKey) -> Option<&[u32]> {
        None
    }

    fn property_mut(&mut self, _: PropertyKey) -> Option<&mut [u32]> {
        None
    }

    fn set_property(&mut self, _: PropertyKey, _: Vec<u32>) {}
}

#[test]
fn refresh_is_idempotent() {
    let mut mesh = TriMesh::grid(3, 3);
    let mut scratch = EdgeScratch::new();
    assert!(!has_fresh_edge_cache(&mesh));

    assert!(refresh_edge_cache(&mut mesh, &mut scratch).unwrap());
    assert_eq!(scratch.rebuild_count(), 1);
    assert!(has_fresh_edge_cache(&mesh));
    // the blob is tagged with the index the mesh ended up at
    assert_eq!(
        mesh.property(EDGE_CACHE_KEY).unwrap()[1],
        mesh.edit_index()
    );

    assert!(!refresh_edge_cache(&mut mesh, &mut scratch).unwrap());
    assert_eq!(scratch.rebuild_count(), 1);

    mesh.push_triangle([0, 5, 4]);
    assert!(!has_fresh_edge_cache(&mesh));
    assert!(refresh_edge_cache(&mut mesh, &mut scratch).unwrap());
    assert_eq!(scratch.rebuild_count(), 2);
}

#[test]
fn view_matches_copy() {
    let mut mesh = TriMesh::grid(2, 3);
    let expected = EdgeGraph::compute(mesh.triangles()).unwrap();
    let mut scratch = EdgeScratch::new();

    let mut out = EdgeGraph::default();
    cached_edges(&mut mesh, &mut scratch, &mut out).unwrap();
    assert_eq!(out, expected);

    let view = cached_edges_view(&mut mesh, &mut scratch).unwrap();
    assert_eq!(view, expected.view());
    assert_eq!(scratch.rebuild_count(), 1);
}

#[test]
fn garbage_blob_is_replaced() {
    let mut mesh = TriMesh::grid(1, 1);
    mesh.set_property(EDGE_CACHE_KEY, vec![7, 7, 7]);
    assert!(!has_fresh_edge_cache(&mesh));
    assert!(edge_cache_view(&mesh).is_none());

    let mut scratch = EdgeScratch::new();
    assert!(refresh_edge_cache(&mut mesh, &mut scratch).unwrap());
    assert_eq!(
        edge_cache_view(&mesh).map(|v| v.to_owned_graph()),
        Some(EdgeGraph::compute(mesh.triangles()).unwrap())
    );
}

#[test]
fn stale_tag_is_replaced() {
    let mut mesh = TriMesh::grid(1, 1);
    let mut scratch = EdgeScratch::new();
    refresh_edge_cache(&mut mesh, &mut scratch).unwrap();

    // a well-formed blob written back by hand no longer matches the edit index
    let blob = mesh.property(EDGE_CACHE_KEY).unwrap().to_vec();
    mesh.set_property(EDGE_CACHE_KEY, blob);
    assert!(!has_fresh_edge_cache(&mesh));
    assert!(refresh_edge_cache(&mut mesh, &mut scratch).unwrap());
    assert_eq!(scratch.rebuild_count(), 2);
}

#[test]
fn out_of_range_vertex() {
    let mut mesh = TriMesh::new(vec![Point3::origin(); 3], vec![[0, 1, 5]]);
    let mut scratch = EdgeScratch::new();
    let err = Error::VertexOutOfRange {
        face: 0,
        vertex: 5,
        point_count: 3,
    };
    assert_eq!(refresh_edge_cache(&mut mesh, &mut scratch), Err(err.clone()));
    assert_eq!(
        build_mesh_strips(&mut mesh, &[0], &mut scratch, StripOptions::default()),
        Err(err)
    );
    assert_eq!(scratch.rebuild_count(), 0);
}

#[test]
fn mesh_strips_match_soup_strips() {
    let mut mesh = TriMesh::grid(4, 2);
    let keys: Vec<u8> = (0..mesh.triangles().len()).map(|f| (f / 6) as u8).collect();
    let expected = build_strips(mesh.triangles(), &keys).unwrap();

    let mut scratch = EdgeScratch::new();
    for _ in 0..2 {
        let set = build_mesh_strips(&mut mesh, &keys, &mut scratch, StripOptions::default())
            .unwrap();
        assert_eq!(set, expected);
    }
    assert_eq!(scratch.rebuild_count(), 1);
}

#[test]
fn copied_edges_are_stable() {
    let mut mesh = TriMesh::grid(3, 2);
    let mut scratch = EdgeScratch::new();

    let mut first = EdgeGraph::default();
    cached_edges(&mut mesh, &mut scratch, &mut first).unwrap();
    let mut second = EdgeGraph::default();
    cached_edges(&mut mesh, &mut scratch, &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.edges(), second.edges());
    assert_eq!(first.face_edges(), second.face_edges());
    assert_eq!(scratch.rebuild_count(), 1);
}

#[test]
fn lost_cache_is_an_error() {
    let mut mesh = Forgetful(TriMesh::grid(2, 2));
    let mut scratch = EdgeScratch::new();
    let lost = Error::EdgeCacheLost(EDGE_CACHE_KEY);

    assert_eq!(refresh_edge_cache(&mut mesh, &mut scratch), Err(lost.clone()));

    let mut out = EdgeGraph::default();
    assert_eq!(
        cached_edges(&mut mesh, &mut scratch, &mut out),
        Err(lost.clone())
    );
    assert_eq!(out, EdgeGraph::default());
    assert!(cached_edges_view(&mut mesh, &mut scratch).is_err());

    let keys = vec![0u8; mesh.triangles().len()];
    assert_eq!(
        build_mesh_strips(&mut mesh, &keys, &mut scratch, StripOptions::default()),
        Err(lost)
    );
    assert_eq!(scratch.rebuild_count(), 0);
}

//! Strips a generated grid mesh and reports how well it compressed.

use clap::Parser;
use ribbon::{build_mesh_strips, unstrip, EdgeScratch, MeshSource, StripSet, TriMesh};

mod cli;

use cli::Cli;

/// One material key per face, splitting the grid into `bands` horizontal bands of rows.
fn band_materials(width: u32, height: u32, bands: u32) -> Vec<u32> {
    let bands = bands.clamp(1, height.max(1));
    (0..height)
        .flat_map(|y| std::iter::repeat(y * bands / height.max(1)).take(2 * width as usize))
        .collect()
}

fn report(pass: &str, faces: usize, set: &StripSet, stream: &[u32]) {
    let longest = set.strips().iter().map(|s| s.len()).max().unwrap_or(0);
    tracing::info!(
        pass,
        faces,
        strips = set.strips().len(),
        singles = set.singles().len(),
        longest,
        stream = stream.len(),
        list = faces * 3,
        "stripped mesh"
    );
}

pub fn main() -> Result<(), ribbon::Error> {
    let args = Cli::parse();
    cli::initialize_tracing(&args.log_filter, args.log_format);
    tracing::debug!(?args, "parsed arguments");

    let mut mesh = TriMesh::grid(args.width, args.height);
    let materials = band_materials(args.width, args.height, args.bands);
    let options = args.strip_options();
    let stitch = args.stitch();
    let mut scratch = EdgeScratch::new();

    let set = build_mesh_strips(&mut mesh, &materials, &mut scratch, options)?;
    let stream = set.stitch(stitch);
    report("initial", mesh.triangles().len(), &set, &stream);

    let decoded = unstrip(&stream, stitch);
    if decoded.len() != mesh.triangles().len() {
        tracing::warn!(
            decoded = decoded.len(),
            faces = mesh.triangles().len(),
            "stitched stream doesn't decode to the original face count"
        );
    }

    // repeat without touching the mesh; the cached edges should be reused
    build_mesh_strips(&mut mesh, &materials, &mut scratch, options)?;

    for p in mesh.points_mut() {
        *p = args.rescale.transform_point(p);
    }
    let set = build_mesh_strips(&mut mesh, &materials, &mut scratch, options)?;
    let stream = set.stitch(stitch);
    report("rescaled", mesh.triangles().len(), &set, &stream);

    tracing::info!(rebuilds = scratch.rebuild_count(), "edge cache rebuilds");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_split_rows() {
        let m = band_materials(2, 4, 2);
        assert_eq!(m.len(), 16);
        assert_eq!(&m[..8], &[0; 8]);
        assert_eq!(&m[8..], &[1; 8]);
        assert!(band_materials(3, 0, 4).is_empty());
    }
}

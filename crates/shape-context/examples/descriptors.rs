//! Compute descriptors for a small polygon and print the occupied cells.
//!
//! Usage: `cargo run -p shape-context --example descriptors [points.json]`

use nalgebra::Point2;
use shape_context::io::PointSetFile;
use shape_context::{build_descriptors, PointSet, ShapeContextParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let points = match std::env::args().nth(1) {
        Some(path) => PointSetFile::load_json(path)?.to_point_set()?,
        None => PointSet::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(5.0, 2.0),
            Point2::new(2.0, 4.0),
            Point2::new(-1.0, 2.0),
        ])?,
    };

    let params = ShapeContextParams::new(3, 8, 0.125, 2.0);
    let desc = build_descriptors(&points, &params)?;

    for (i, p) in points.iter().enumerate() {
        let hist = desc.histogram(i);
        println!("point {i} ({:.2}, {:.2}): {} pairs", p.x, p.y, hist.total());
        for (r, t, count) in hist.nonzero_cells() {
            println!("  r={r} theta={t} count={count}");
        }
    }
    Ok(())
}

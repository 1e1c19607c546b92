// main.rs
//
// Walk-through of the shapelib operations: build a few shapes, query
// boundary bearings and nearest points, and rasterize the results.
// Run with RUST_LOG=shapelib=debug to watch the probes grow.

use std::error::Error;

use geo::Point;
use shapelib::raster::{AxisRange, Raster, rasterize};
use shapelib::sketch::{CapStyle, extrapolate_point};
use shapelib::{BooleanOps, Sketch, angle_at, linestr, nearest_point, rect_line};
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for the walk-through itself.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("shapelib=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 1) bearings and nearest points on a square boundary
    let square = rect_line(0.0, 0.0, 1.0, 1.0)?;
    let projected = nearest_point(&square, Point::new(0.5, 2.0), None)?;
    let bearing = angle_at(&square, projected, None)?;
    info!(x = projected.x(), y = projected.y(), bearing, "nearest point on the square");

    // 2) extending an open curve past its end
    let path = linestr([(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)])?;
    let beyond = extrapolate_point(&path, path.end(), 1.0)?;
    info!(x = beyond.x(), y = beyond.y(), "extrapolated end");

    // 3) a ring, a thick line and their union
    let ring = Sketch::ring(0.0, 0.0, 2.0, 0.5, 64)?;
    let bar = Sketch::line(-3.0, 0.0, 3.0, 0.0, 0.25, 16)?;
    let wheel = ring.union(&bar);
    info!(ring = ring.area(), wheel = wheel.area(), holes = wheel.holes().area(), "areas");

    // 4) tubes along the same path with each cap style
    let mut tubes = Vec::new();
    for cap in [CapStyle::Closed, CapStyle::Flat, CapStyle::Open] {
        let tube = Sketch::tube([(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)], 1.0, 0.2, cap, cap, 32)?;
        info!(%cap, area = tube.area(), "tube");
        tubes.push((cap, tube));
    }

    // 5) rasters
    let rasters: Vec<(String, Raster)> = vec![
        ("wheel".into(), rasterize(&wheel, 40.0, None, None)?),
        ("wheel_right_half".into(), rasterize(&wheel, 40.0, Some(AxisRange::Span(0.0, 3.0)), None)?),
        ("square_edge".into(), rasterize(&square, 100.0, None, None)?),
    ]
    .into_iter()
    .chain(
        tubes
            .iter()
            .map(|(cap, tube)| Ok((format!("tube_{cap}"), rasterize(tube, 40.0, None, None)?)))
            .collect::<Result<Vec<_>, shapelib::RasterError>>()?,
    )
    .collect();

    for (name, raster) in &rasters {
        info!(name = name.as_str(), width = raster.width, height = raster.height, filled = raster.filled(), "raster");
        #[cfg(feature = "image-io")]
        raster.save(format!("png/{name}.png"))?;
    }

    Ok(())
}

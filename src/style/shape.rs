use std::f64::consts::PI;

use image::{Rgba, RgbaImage};
use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape as _, Stroke, StrokeOpts};

use crate::{
    foundation::error::{QrForgeError, QrForgeResult},
    options::ClipShape,
};

/// Pixel buffer between the clip boundary and the raster edge.
const CLIP_MARGIN_PX: f64 = 10.0;
/// Inner/outer radius ratio of the five-point star.
const STAR_INNER_RATIO: f64 = 0.4;
/// Turns of the Archimedean spiral.
const SPIRAL_TURNS: f64 = 3.0;
/// Flattening tolerance for curve-to-path conversions.
const PATH_TOLERANCE: f64 = 0.1;

/// Restrict a raster to the given clip shape: pixels whose centers fall
/// outside the shape boundary become fully transparent. `square` is the
/// identity.
///
/// The clip is centered on the raster at radius `min(w, h) / 2 - 10` px.
/// Aggressive shapes (star, spiral, cross) cut into the corner finder
/// patterns at that radius; the resulting scannability loss is the user's
/// accepted tradeoff and is not corrected here.
pub fn clip_to_shape(raster: &RgbaImage, shape: ClipShape) -> QrForgeResult<RgbaImage> {
    if shape == ClipShape::Square {
        return Ok(raster.clone());
    }

    let (w, h) = raster.dimensions();
    let radius = f64::from(w.min(h)) / 2.0 - CLIP_MARGIN_PX;
    if radius <= 0.0 {
        return Err(QrForgeError::validation(
            "raster too small to clip to a shape",
        ));
    }

    // Non-square rasters should not occur, but when they do the clip stays
    // centered on the geometric centroid; the result is just asymmetric.
    let center = Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0);
    let path = shape_path(shape, center, radius);

    let mut out = raster.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        if path.winding(p) == 0 {
            *px = Rgba([0, 0, 0, 0]);
        }
    }
    Ok(out)
}

/// Build the closed clip path for `shape`, centered on `center` with the
/// given outer radius. Multi-part shapes (cross, flower, spiral) are
/// subpaths of one path; containment uses the nonzero winding rule.
pub fn shape_path(shape: ClipShape, center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    match shape {
        ClipShape::Square => {
            Rect::new(x - radius, y - radius, x + radius, y + radius).to_path(PATH_TOLERANCE)
        }
        ClipShape::Circle => Circle::new(center, radius).to_path(PATH_TOLERANCE),
        ClipShape::RoundedSquare => RoundedRect::from_rect(
            Rect::new(x - radius, y - radius, x + radius, y + radius),
            radius * 0.2,
        )
        .to_path(PATH_TOLERANCE),
        ClipShape::Heart => heart_path(center, radius),
        ClipShape::Star => star_path(center, radius, 5),
        ClipShape::Diamond => diamond_path(center, radius),
        ClipShape::Hexagon => polygon_path(center, radius, 6),
        ClipShape::Octagon => polygon_path(center, radius, 8),
        ClipShape::Triangle => polygon_path(center, radius, 3),
        ClipShape::Cross => cross_path(center, radius),
        ClipShape::Arrow => arrow_path(center, radius),
        ClipShape::Shield => shield_path(center, radius),
        ClipShape::Leaf => leaf_path(center, radius),
        ClipShape::Flower => flower_path(center, radius),
        ClipShape::Spiral => spiral_path(center, radius),
    }
}

fn heart_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let s = radius * 0.8;

    let mut p = BezPath::new();
    p.move_to((x, y + s / 4.0));
    p.curve_to((x, y - s / 4.0), (x - s / 2.0, y - s / 4.0), (x - s / 2.0, y));
    p.curve_to((x - s / 2.0, y + s / 4.0), (x, y + s / 2.0), (x, y + s));
    p.curve_to((x, y + s / 2.0), (x + s / 2.0, y + s / 4.0), (x + s / 2.0, y));
    p.curve_to((x + s / 2.0, y - s / 4.0), (x, y - s / 4.0), (x, y + s / 4.0));
    p.close_path();
    p
}

fn star_path(center: Point, radius: f64, points: u32) -> BezPath {
    let (x, y) = (center.x, center.y);
    let inner = radius * STAR_INNER_RATIO;
    let step = PI / f64::from(points);

    let mut p = BezPath::new();
    p.move_to((x, y - radius));
    for i in 1..points * 2 {
        let r = if i % 2 == 0 { radius } else { inner };
        let angle = f64::from(i) * step - PI / 2.0;
        p.line_to((x + angle.cos() * r, y + angle.sin() * r));
    }
    p.close_path();
    p
}

fn diamond_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let mut p = BezPath::new();
    p.move_to((x, y - radius));
    p.line_to((x + radius, y));
    p.line_to((x, y + radius));
    p.line_to((x - radius, y));
    p.close_path();
    p
}

/// Generic regular N-gon with the first vertex at angle 0 (pointing right).
fn polygon_path(center: Point, radius: f64, sides: u32) -> BezPath {
    let (x, y) = (center.x, center.y);
    let step = 2.0 * PI / f64::from(sides);

    let mut p = BezPath::new();
    p.move_to((x + radius, y));
    for i in 1..sides {
        let angle = f64::from(i) * step;
        p.line_to((x + radius * angle.cos(), y + radius * angle.sin()));
    }
    p.close_path();
    p
}

fn cross_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let thickness = radius * 0.3;

    let mut p = BezPath::new();
    p.extend(
        Rect::new(
            x - thickness / 2.0,
            y - radius,
            x + thickness / 2.0,
            y + radius,
        )
        .path_elements(PATH_TOLERANCE),
    );
    p.extend(
        Rect::new(
            x - radius,
            y - thickness / 2.0,
            x + radius,
            y + thickness / 2.0,
        )
        .path_elements(PATH_TOLERANCE),
    );
    p
}

fn arrow_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let s = radius;

    let mut p = BezPath::new();
    p.move_to((x - s, y - s * 0.3));
    p.line_to((x + s * 0.3, y - s * 0.3));
    p.line_to((x + s * 0.3, y - s * 0.6));
    p.line_to((x + s, y));
    p.line_to((x + s * 0.3, y + s * 0.6));
    p.line_to((x + s * 0.3, y + s * 0.3));
    p.line_to((x - s, y + s * 0.3));
    p.close_path();
    p
}

fn shield_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let s = radius;

    let mut p = BezPath::new();
    p.move_to((x, y - s));
    p.line_to((x + s * 0.7, y - s * 0.7));
    p.line_to((x + s * 0.7, y + s * 0.3));
    p.quad_to((x + s * 0.7, y + s), (x, y + s));
    p.quad_to((x - s * 0.7, y + s), (x - s * 0.7, y + s * 0.3));
    p.line_to((x - s * 0.7, y - s * 0.7));
    p.close_path();
    p
}

fn leaf_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let s = radius;

    let mut p = BezPath::new();
    p.move_to((x, y + s));
    p.quad_to((x - s, y), (x, y - s));
    p.quad_to((x + s, y), (x, y + s));
    p.close_path();
    p
}

fn flower_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let petal_count = 6u32;
    let petal_size = radius * 0.6;

    let mut p = BezPath::new();
    for i in 0..petal_count {
        let angle = f64::from(i) * 2.0 * PI / f64::from(petal_count);
        let px = x + angle.cos() * petal_size * 0.5;
        let py = y + angle.sin() * petal_size * 0.5;

        p.move_to((x, y));
        p.quad_to(
            (
                px + (angle + PI / 2.0).cos() * petal_size * 0.3,
                py + (angle + PI / 2.0).sin() * petal_size * 0.3,
            ),
            (px, py),
        );
        p.quad_to(
            (
                px + (angle - PI / 2.0).cos() * petal_size * 0.3,
                py + (angle - PI / 2.0).sin() * petal_size * 0.3,
            ),
            (x, y),
        );
        p.close_path();
    }
    p.extend(Circle::new(center, radius * 0.2).path_elements(PATH_TOLERANCE));
    p
}

/// Archimedean spiral: the visible region is the stroked polyline united
/// with its fill, which is what stroking then filling the same path gives
/// on a canvas.
fn spiral_path(center: Point, radius: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let steps = 100u32;

    let mut core = BezPath::new();
    core.move_to((x, y));
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        let angle = t * SPIRAL_TURNS * 2.0 * PI;
        let r = t * radius;
        core.line_to((x + angle.cos() * r, y + angle.sin() * r));
    }

    let stroked = kurbo::stroke(
        core.iter(),
        &Stroke::new(radius * 0.1),
        &StrokeOpts::default(),
        PATH_TOLERANCE,
    );

    let mut p = core;
    p.close_path();
    p.extend(stroked);
    p
}

#[cfg(test)]
#[path = "../../tests/unit/style/shape.rs"]
mod tests;

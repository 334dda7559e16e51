use orrery_shared::{HexLayout, Movable};

/// Padding added on every side of the trajectory overlay.
pub const TRAJECTORY_MARGIN: f64 = 5.0;

/// Pixel-space overlay for a movable's planned path: a padded bounding box
/// placed relative to the map surface, and polyline vertices relative to the
/// box origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryView {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub vertices: Vec<(f64, f64)>,
}

/// Axis-aligned pixel bounds. Degenerates to a zero-size box when every point
/// coincides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PixelBounds {
    /// Bounds of a non-empty point set. A single point yields the degenerate
    /// zero-size box at that point.
    pub fn from_points(xs: &[f64], ys: &[f64]) -> Self {
        let fold = |values: &[f64]| {
            values.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), &v| (min.min(v), max.max(v)),
            )
        };
        let (min_x, max_x) = fold(xs);
        let (min_y, max_y) = fold(ys);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Projects a movable's current position plus every trajectory waypoint.
/// `None` clears the display: nothing selected, or nothing planned.
pub fn project(layout: &HexLayout, movable: Option<&Movable>) -> Option<TrajectoryView> {
    let movable = movable?;
    if movable.trajectory.is_empty() {
        return None;
    }

    let mut xs = vec![layout.pixel_x(f64::from(movable.position.x))];
    let mut ys = vec![layout.pixel_y(f64::from(movable.position.y))];
    for waypoint in &movable.trajectory {
        xs.push(layout.pixel_x(f64::from(waypoint.x)));
        ys.push(layout.pixel_y(f64::from(waypoint.y)));
    }
    let bounds = PixelBounds::from_points(&xs, &ys);

    // Vertices are rounded to whole pixels, then shifted so the padded box
    // origin is (0,0).
    let vertices = xs
        .iter()
        .zip(&ys)
        .map(|(&px, &py)| {
            (
                px.round() - bounds.min_x + TRAJECTORY_MARGIN,
                py.round() - bounds.min_y + TRAJECTORY_MARGIN,
            )
        })
        .collect();

    // The overlay sits half a field right and half a row down of the field
    // origin, so the polyline runs through field centers.
    Some(TrajectoryView {
        width: bounds.width() + 2.0 * TRAJECTORY_MARGIN,
        height: bounds.height() + 2.0 * TRAJECTORY_MARGIN,
        left: bounds.min_x - TRAJECTORY_MARGIN + layout.pixel_x(1.0),
        top: bounds.min_y - TRAJECTORY_MARGIN + layout.pixel_y(0.5) / 0.75,
        vertices,
    })
}

//! Reference layout generator: cells spaced around the edge of a rectangle.
//!
//! The engine only needs an ordered list of coordinates; any generator
//! will do. This one walks the bottom edge left to right, the right edge
//! bottom to top, the top edge right to left and the left edge top to
//! bottom, centred on the origin.

use crate::domain::topology::Point;

/// Places `cells` points around a `width` × `height` rectangle.
///
/// Each side receives `cells / 4` points; the remainder goes one each to
/// the first sides. Points on a side are spread evenly from its first
/// corner to its last, a lone point sits on the first corner.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn square_ring(cells: usize, width: f32, height: f32) -> Vec<Point> {
    let per_side = cells / 4;
    let remainder = cells % 4;
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    let mut points = Vec::with_capacity(cells);
    for side in 0..4 {
        let count = per_side + usize::from(side < remainder);
        for index in 0..count {
            let t = if count > 1 {
                index as f32 / (count - 1) as f32
            } else {
                0.0
            };
            let point = match side {
                0 => Point::new(-half_w + t * width, -half_h),
                1 => Point::new(half_w, -half_h + t * height),
                2 => Point::new(half_w - t * width, half_h),
                _ => Point::new(-half_w, half_h - t * height),
            };
            points.push(point);
        }
    }
    points
}

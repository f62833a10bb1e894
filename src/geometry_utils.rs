use map_range::MapRange;

use crate::Point2D;

/// Distances between normalised landmarks are expressed in this range
/// rather than [0;1]; gesture thresholds are tuned against it.
pub const NORMALISED_DISTANCE_SCALE: f32 = 1000.;

pub fn distance_points(a: &Point2D, b: &Point2D) -> f32 {
    let (x1, y1) = *a;
    let (x2, y2) = *b;

    f32::sqrt(f32::powi(x1 - x2, 2) + f32::powi(y1 - y2, 2))
}

/// Return the angle (in degrees, in the range [0;180]) formed at the
/// vertex `b` by the two rays `b->a` and `b->c`.
///
/// Swapping `a` and `c` gives the same result.
pub fn angle_at(a: &Point2D, b: &Point2D, c: &Point2D) -> f32 {
    let (ax, ay) = *a;
    let (bx, by) = *b;
    let (cx, cy) = *c;

    let radians = (cy - by).atan2(cx - bx) - (ay - by).atan2(ax - bx);
    let angle = radians.to_degrees().abs();

    if angle > 180. { 360. - angle } else { angle }
}

/// Euclidean distance between two points in normalised image space, remapped
/// from [0;1] to [0;1000]. No clamping: points further apart than 1.0 give
/// values above 1000.
pub fn normalized_distance(a: &Point2D, b: &Point2D) -> f32 {
    distance_points(a, b).map_range(0. ..1., 0. ..NORMALISED_DISTANCE_SCALE)
}

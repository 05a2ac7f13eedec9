use crate::error::{BlurError, Result};

/// An `(x, y)` point of a piecewise-linear curve.
pub type Point = (f64, f64);

/// Iterates the authoritative points of `curve`.
///
/// When consecutive points share an `x` value, only the last of them is
/// kept. Shadowed points stay in the caller's list.
pub(crate) fn authoritative_points(curve: &[Point]) -> impl Iterator<Item = Point> + '_ {
	curve
		.iter()
		.enumerate()
		.filter(|(i, point)| curve.get(i + 1).is_none_or(|next| next.0 != point.0))
		.map(|(_, point)| *point)
}

/// Linearly interpolates `curve` at `x`.
///
/// `curve` must be sorted in non-decreasing `x` order. The first segment
/// whose x-range contains `x` is used, so a value sitting exactly on a
/// control point returns that point's `y`.
///
/// # Errors
/// Returns `BlurError::Domain` if `x` is outside every segment, which is
/// always the case for a curve with fewer than two distinct `x` values.
///
/// # Example
/// ```
/// use blur_core::chance::interpolate;
///
/// let curve = [(0.0, 0.0), (2.0, 1.0)];
/// assert_eq!(interpolate(&curve, 0.5).unwrap(), 0.25);
/// ```
pub fn interpolate(curve: &[Point], x: f64) -> Result<f64> {
	let points: Vec<Point> = authoritative_points(curve).collect();

	for segment in points.windows(2) {
		let (x0, y0) = segment[0];
		let (x1, y1) = segment[1];
		if x0 <= x && x <= x1 {
			let slope = (y1 - y0) / (x1 - x0);
			return Ok(y0 + slope * (x - x0));
		}
	}

	Err(BlurError::Domain { x })
}

/// Whether `point` lies strictly below `curve`.
///
/// A point outside the curve's domain is never under it.
pub fn point_under_curve(curve: &[Point], point: Point) -> bool {
	match interpolate(curve, point.0) {
		Ok(y) => y > point.1,
		Err(_) => false,
	}
}

/// Clamps `value` into `[minimum, maximum]`.
///
/// # Errors
/// Returns `BlurError::InvalidBounds` if `maximum < minimum`.
pub fn clamp_value(value: f64, minimum: f64, maximum: f64) -> Result<f64> {
	if maximum < minimum {
		return Err(BlurError::InvalidBounds { min: minimum, max: maximum });
	}
	Ok(value.max(minimum).min(maximum))
}

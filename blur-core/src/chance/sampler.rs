use std::f64::consts::PI;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::curve::{Point, authoritative_points, interpolate, point_under_curve};
use crate::error::{BlurError, Result};

/// Number of rejected draws after which `sample_curve` gives up and falls
/// back to a curve vertex.
pub const MAX_SAMPLE_ATTEMPTS: usize = 500_000;

/// Number of points `normal_distribution` is usually asked for.
pub const DEFAULT_NORMAL_POINT_COUNT: usize = 23;

/// A value drawn from a weight curve.
///
/// `degraded` is set when rejection sampling exhausted its attempts and
/// `value` is the `x` of a random vertex instead of a true sample.
/// Callers decide whether that is worth reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
	pub value: f64,
	pub degraded: bool,
}

impl Sample {
	fn exact(value: f64) -> Self {
		Self { value, degraded: false }
	}
}

/// Bounds a weight curve so that every outcome fits in `[minimum, maximum]`.
///
/// Points outside the bounds are removed. When trimming drops points at
/// an end, a synthetic point is attached at that bound with the `y` value
/// the original curve had there, so the enclosed shape is unchanged.
/// The input is left untouched.
///
/// # Errors
/// - `EmptyInput` if `curve` is empty
/// - `MissingBounds` if neither bound is supplied
/// - `InvalidBounds` if `maximum < minimum`
/// - `Domain` if a bound that needs a synthetic point lies outside the curve
///
/// # Example
/// ```
/// use blur_core::chance::bound_weights;
///
/// let curve = [(0.0, 0.0), (2.0, 2.0), (4.0, 0.0)];
/// let bounded = bound_weights(&curve, Some(1.0), Some(3.0)).unwrap();
/// assert_eq!(bounded, vec![(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)]);
/// ```
pub fn bound_weights(curve: &[Point], minimum: Option<f64>, maximum: Option<f64>) -> Result<Vec<Point>> {
	let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
		return Err(BlurError::EmptyInput);
	};

	let mut bounded: Vec<Point> = match (minimum, maximum) {
		(Some(min), Some(max)) => {
			if max < min {
				return Err(BlurError::InvalidBounds { min, max });
			}
			curve.iter().copied().filter(|p| min <= p.0 && p.0 <= max).collect()
		}
		(Some(min), None) => curve.iter().copied().filter(|p| min <= p.0).collect(),
		(None, Some(max)) => curve.iter().copied().filter(|p| p.0 <= max).collect(),
		(None, None) => return Err(BlurError::MissingBounds),
	};

	// Re-attach the ends where points were dropped
	if let Some(min) = minimum {
		let trimmed = bounded.first().is_none_or(|p| p.0 > first.0);
		if trimmed && bounded.first().is_none_or(|p| p.0 != min) {
			bounded.insert(0, (min, interpolate(curve, min)?));
		}
	}
	if let Some(max) = maximum {
		let trimmed = bounded.last().is_none_or(|p| p.0 < last.0);
		if trimmed && bounded.last().is_none_or(|p| p.0 != max) {
			bounded.push((max, interpolate(curve, max)?));
		}
	}

	Ok(bounded)
}

/// Gaussian probability density at `x`.
pub fn normal_pdf(x: f64, mean: f64, variance: f64) -> f64 {
	let exponent = -((x - mean).powi(2) / (2.0 * variance));
	(1.0 / (2.0 * variance * PI).sqrt()) * exponent.exp()
}

/// Approximates a normal distribution with a weight curve.
///
/// Produces `count` evenly spaced samples of the density, starting at
/// `mean - 5σ` and stepping by `10σ / count`. If either bound is given,
/// the curve is then passed through `bound_weights`.
///
/// # Errors
/// - `InvalidArgument` if `variance <= 0` or `count == 0`
/// - Any error of `bound_weights`
pub fn normal_distribution(
	mean: f64,
	variance: f64,
	minimum: Option<f64>,
	maximum: Option<f64>,
	count: usize,
) -> Result<Vec<Point>> {
	if !(variance > 0.0) {
		return Err(BlurError::InvalidArgument(format!("variance must be > 0, got {variance}")));
	}
	if count == 0 {
		return Err(BlurError::InvalidArgument("count must be >= 1".to_owned()));
	}

	let standard_deviation = variance.sqrt();
	let min_x = mean - 5.0 * standard_deviation;
	let step = (10.0 * standard_deviation) / count as f64;

	let weights: Vec<Point> = (0..count)
		.map(|i| {
			let x = min_x + step * i as f64;
			(x, normal_pdf(x, mean, variance))
		})
		.collect();

	if minimum.is_some() || maximum.is_some() {
		bound_weights(&weights, minimum, maximum)
	} else {
		Ok(weights)
	}
}

/// Draws a value from the density described by `curve`.
///
/// Same as `sample_curve_with_attempts` with `MAX_SAMPLE_ATTEMPTS`.
pub fn sample_curve<R: Rng>(curve: &[Point], round: bool, rng: &mut R) -> Result<Sample> {
	sample_curve_with_attempts(curve, round, MAX_SAMPLE_ATTEMPTS, rng)
}

/// Draws a value from the density described by `curve`.
///
/// Treats the points as a piecewise-linear density and rolls uniform
/// points in its bounding box `[x_min, x_max] × [0, y_max]` until one
/// falls under the curve. Points do not need to be pre-sorted.
///
/// - A curve with a single distinct `x` returns that `x` without sampling.
/// - After `max_attempts` rejections, the `x` of a uniformly chosen vertex
///   is returned with `degraded` set.
/// - `round` rounds the result to the nearest integer.
///
/// # Errors
/// - `EmptyInput` if `curve` is empty
/// - `UndefinedProbability` if no point has a positive `y`
/// - `InvalidArgument` if the `x` span or the largest `y` is not finite
pub fn sample_curve_with_attempts<R: Rng>(
	curve: &[Point],
	round: bool,
	max_attempts: usize,
	rng: &mut R,
) -> Result<Sample> {
	if curve.is_empty() {
		return Err(BlurError::EmptyInput);
	}

	// Stable sort: among equal x values the last one stays authoritative
	let mut points = curve.to_vec();
	points.sort_by(|a, b| a.0.total_cmp(&b.0));

	let finish = |x: f64| if round { x.round() } else { x };

	let distinct: Vec<Point> = authoritative_points(&points).collect();
	if let [single] = distinct.as_slice() {
		return Ok(Sample::exact(finish(single.0)));
	}

	let x_min = distinct[0].0;
	let x_max = distinct[distinct.len() - 1].0;
	let y_max = distinct.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
	if !(y_max > 0.0) {
		return Err(BlurError::UndefinedProbability(
			"no point of the curve has a positive weight".to_owned(),
		));
	}
	if !(x_max - x_min).is_finite() || !y_max.is_finite() {
		return Err(BlurError::InvalidArgument(format!(
			"curve spans x {x_min}..{x_max} and y 0..{y_max}, which cannot be sampled"
		)));
	}

	for _ in 0..max_attempts {
		let sample = (rng.random_range(x_min..=x_max), rng.random_range(0.0..=y_max));
		if point_under_curve(&points, sample) {
			return Ok(Sample::exact(finish(sample.0)));
		}
	}

	let fallback = points.choose(rng).map(|p| p.0).unwrap_or(x_min);
	Ok(Sample { value: finish(fallback), degraded: true })
}

//! Non-uniform random operations.
//!
//! Most functions work on weight tuples of the form `(outcome, strength)`:
//! - For curves, `outcome` is an `f64` x coordinate and `strength` its y,
//!   the points forming a piecewise-linear probability density.
//! - For discrete choices, `outcome` may be any value and `strength` is
//!   its relative chance of being picked.

/// Interpolation and point-in-region tests over sorted point lists.
pub mod curve;

/// Rejection sampling over weight curves, curve bounding and
/// Gaussian curve approximation.
pub mod sampler;

/// Segment-mapped weighted choice, weighted ordering and coin flips.
pub mod choice;

pub use choice::{
	percent_possible, pos_or_neg, pos_or_neg_1, prob_bool, weighted_choice,
	weighted_choice_with_index, weighted_order,
};
pub use curve::{Point, clamp_value, interpolate, point_under_curve};
pub use sampler::{
	DEFAULT_NORMAL_POINT_COUNT, MAX_SAMPLE_ATTEMPTS, Sample, bound_weights, normal_distribution,
	normal_pdf, sample_curve, sample_curve_with_attempts,
};

use rand::Rng;

use crate::error::{BlurError, Result};

/// Picks one outcome from `(outcome, strength)` options.
///
/// Each option owns a segment of length `strength` on a line; a uniform
/// point on the line selects the outcome. Options with a strength of `0`
/// or less have no segment and are never selected, but stay in the list.
/// The line only spans the positive strengths: a negative strength does
/// not shorten the segments after it, so `[(a, 3), (b, -1), (c, 1)]`
/// picks `c` one time in four.
///
/// # Errors
/// - `EmptyInput` if `options` is empty
/// - `UndefinedProbability` if the strengths sum to `0` or less, or if the
///   positive strengths sum past the largest finite `f64`
///
/// # Example
/// ```
/// use blur_core::chance::weighted_choice;
///
/// let mut rng = rand::rng();
/// let choice = weighted_choice(&[("always", 1.0), ("never", 0.0)], &mut rng).unwrap();
/// assert_eq!(choice, "always");
/// ```
pub fn weighted_choice<T: Clone, R: Rng>(options: &[(T, f64)], rng: &mut R) -> Result<T> {
	weighted_choice_with_index(options, rng).map(|(_, outcome)| outcome)
}

/// Same as `weighted_choice`, also returning the index of the picked option.
///
/// Useful when several options share the same outcome and the caller
/// needs to know exactly which one was picked.
pub fn weighted_choice_with_index<T: Clone, R: Rng>(options: &[(T, f64)], rng: &mut R) -> Result<(usize, T)> {
	let index = weighted_index(options.iter().map(|(_, strength)| *strength), rng)?;
	Ok((index, options[index].0.clone()))
}

/// Segment-mapped selection over a list of strengths.
///
/// Returns the position of the selected strength.
fn weighted_index<I>(strengths: I, rng: &mut impl Rng) -> Result<usize>
where
	I: Iterator<Item = f64> + Clone,
{
	let mut count = 0;
	let mut total = 0.0;
	let mut positive_total = 0.0;
	for strength in strengths.clone() {
		count += 1;
		total += strength;
		if strength > 0.0 {
			positive_total += strength;
		}
	}

	if count == 0 {
		return Err(BlurError::EmptyInput);
	}
	if !(total > 0.0) {
		return Err(BlurError::UndefinedProbability(format!(
			"strengths sum to {total}, no option can be chosen"
		)));
	}

	if !f64::is_finite(positive_total) {
		return Err(BlurError::UndefinedProbability(format!(
			"strengths sum to {positive_total}, segments cannot be mapped"
		)));
	}

	let sample = rng.random_range(0.0..positive_total);
	let mut position = 0.0;
	let mut last_positive = 0;
	for (index, strength) in strengths.enumerate() {
		if strength <= 0.0 {
			continue;
		}
		position += strength;
		last_positive = index;
		if sample < position {
			return Ok(index);
		}
	}

	// Float accumulation can leave the sample just past the last segment
	Ok(last_positive)
}

/// Orders outcomes randomly, biased by strength.
///
/// The result is built by repeatedly picking from the remaining options
/// with `weighted_choice`, so stronger outcomes tend to come first.
/// Uniform strengths give an unbiased shuffle.
///
/// # Errors
/// Returns `UndefinedProbability` if any strength is `0` or less.
/// An empty input returns an empty list.
pub fn weighted_order<T: Clone, R: Rng>(options: &[(T, f64)], rng: &mut R) -> Result<Vec<T>> {
	if options.is_empty() {
		return Ok(Vec::new());
	}
	if options.iter().any(|(_, strength)| !(*strength > 0.0)) {
		return Err(BlurError::UndefinedProbability(
			"all strengths must be greater than 0".to_owned(),
		));
	}

	// Remaining option indices
	let mut working: Vec<usize> = (0..options.len()).collect();
	let mut ordered = Vec::with_capacity(options.len());

	while !working.is_empty() {
		let picked = weighted_index(working.iter().map(|&i| options[i].1), rng)?;
		let option_index = working.remove(picked);
		ordered.push(options[option_index].0.clone());
	}

	Ok(ordered)
}

/// Returns `true` with the given probability.
///
/// `0` (or less) never returns `true`, `1` (or more) always does.
pub fn prob_bool<R: Rng>(probability: f64, rng: &mut R) -> bool {
	rng.random::<f64>() < probability
}

/// Returns `true` `percent` times out of 100.
pub fn percent_possible<R: Rng>(percent: f64, rng: &mut R) -> bool {
	rng.random::<f64>() * 100.0 < percent
}

/// Returns `1.0` with probability `prob_pos`, otherwise `-1.0`.
pub fn pos_or_neg_1<R: Rng>(prob_pos: f64, rng: &mut R) -> f64 {
	if prob_bool(prob_pos, rng) { 1.0 } else { -1.0 }
}

/// Returns `|value|` with probability `prob_pos`, otherwise `-|value|`.
pub fn pos_or_neg<R: Rng>(value: f64, prob_pos: f64, rng: &mut R) -> f64 {
	value.abs() * pos_or_neg_1(prob_pos, rng)
}

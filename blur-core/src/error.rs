use thiserror::Error;

use crate::markov::node::NodeId;

/// Errors raised by the sampling engine and the Markov graph.
///
/// Lookups that find nothing (`find_node_by_name`, `remove_node` on a
/// non-member, ...) are not errors and never produce one of these.
#[derive(Debug, Error)]
pub enum BlurError {
	/// `x` lies outside every valid segment of a curve.
	#[error("x = {x} is outside the domain of the curve")]
	Domain { x: f64 },

	/// The requested maximum is below the requested minimum.
	#[error("invalid bounds: max ({max}) < min ({min})")]
	InvalidBounds { min: f64, max: f64 },

	/// Bounding was requested without any bound.
	#[error("at least one of min or max must be supplied")]
	MissingBounds,

	/// Nothing to choose from.
	#[error("cannot choose from an empty set of options")]
	EmptyInput,

	/// The strengths do not define a probability distribution.
	#[error("probability is undefined: {0}")]
	UndefinedProbability(String),

	/// A numeric parameter is out of its valid range.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// The id does not refer to a live node.
	#[error("node {0} does not exist")]
	UnknownNode(NodeId),

	/// The group markers produced an invalid tokenizer pattern.
	#[error("invalid tokenizer pattern: {0}")]
	Pattern(#[from] regex::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BlurError>;

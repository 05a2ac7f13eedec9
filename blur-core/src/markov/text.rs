use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use super::graph::Graph;
use super::node::{NodeId, NodeKind};
use crate::error::{BlurError, Result};
use crate::io;

/// Suffix marking a group token as single-use (`<<once@>>`).
const SELF_DESTRUCT_MARK: char = '@';

/// Parameters for building a graph from text.
///
/// # Fields
/// - `distance_weights`: relative token offset → link weight. `1: 1000.0`
///   links every token to the next one with weight 1000; `-4: 350.0` links
///   it to the fourth token behind. `0` links a token to itself. Offsets
///   past either end wrap around.
/// - `merge_same_words`: one node per distinct token text instead of one
///   per occurrence.
/// - `group_open` / `group_close`: markers keeping arbitrary text together
///   as a single token.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextGraphOptions {
	pub distance_weights: BTreeMap<i64, f64>,
	pub merge_same_words: bool,
	pub group_open: String,
	pub group_close: String,
}

impl Default for TextGraphOptions {
	/// Each token links to the next one with weight 1, so a walk reads
	/// the source linearly and wraps at the end.
	fn default() -> Self {
		Self {
			distance_weights: BTreeMap::from([(1, 1.0)]),
			merge_same_words: false,
			group_open: "<<".to_owned(),
			group_close: ">>".to_owned(),
		}
	}
}

impl TextGraphOptions {
	/// Sets the link weight for a token offset.
	///
	/// # Errors
	/// Returns an error if `weight` is not finite.
	pub fn set_distance_weight(&mut self, offset: i64, weight: f64) -> Result<()> {
		if !weight.is_finite() {
			return Err(BlurError::InvalidArgument(format!("weight for offset {offset} must be finite")));
		}
		self.distance_weights.insert(offset, weight);
		Ok(())
	}

	/// Sets the group markers.
	///
	/// # Errors
	/// Returns an error if a marker is empty or both markers are equal.
	pub fn set_group_markers(&mut self, open: &str, close: &str) -> Result<()> {
		validate_markers(open, close)?;
		self.group_open = open.to_owned();
		self.group_close = close.to_owned();
		Ok(())
	}
}

fn validate_markers(open: &str, close: &str) -> Result<()> {
	if open.is_empty() || close.is_empty() {
		return Err(BlurError::InvalidArgument("group markers cannot be empty".to_owned()));
	}
	if open == close {
		return Err(BlurError::InvalidArgument("group markers must differ".to_owned()));
	}
	Ok(())
}

/// A piece of source text that becomes a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
	pub text: String,
	pub kind: NodeKind,
	pub self_destruct: bool,
}

impl Token {
	fn new(text: &str, kind: NodeKind) -> Self {
		Self { text: text.to_owned(), kind, self_destruct: false }
	}
}

/// Splits `source` into word, punctuation and group tokens.
///
/// In priority order:
/// 1. Text between `group_open` and `group_close` (markers stripped). A
///    group ending with `@` is single-use, the `@` is stripped.
/// 2. A run of punctuation marks followed by a non-boundary.
/// 3. A run of non-whitespace characters ending on a word boundary.
///
/// `"hello, world"` gives `hello`, `,` and `world`, while `"who's there?"`
/// gives `who's`, `there` and `?`.
///
/// # Errors
/// Returns an error if the markers are empty or equal.
pub fn tokenize(source: &str, group_open: &str, group_close: &str) -> Result<Vec<Token>> {
	validate_markers(group_open, group_close)?;

	let expression = format!(
		r"{}(.+?){}|([^\w\s]+)\B|(\S+\b)",
		regex::escape(group_open),
		regex::escape(group_close)
	);
	let pattern = Regex::new(&expression)?;

	let tokens = pattern
		.captures_iter(source)
		.filter_map(|captures| {
			if let Some(group) = captures.get(1) {
				let text = group.as_str();
				match text.strip_suffix(SELF_DESTRUCT_MARK) {
					Some(stripped) if !stripped.is_empty() => Some(Token {
						self_destruct: true,
						..Token::new(stripped, NodeKind::Group)
					}),
					_ => Some(Token::new(text, NodeKind::Group)),
				}
			} else if let Some(punctuation) = captures.get(2) {
				Some(Token::new(punctuation.as_str(), NodeKind::Punctuation))
			} else {
				captures.get(3).map(|word| Token::new(word.as_str(), NodeKind::Word))
			}
		})
		.collect();

	Ok(tokens)
}

impl Graph {
	/// Builds a graph from text.
	///
	/// Every token becomes a node, or with `merge_same_words` every
	/// distinct token text does. Then, for every token position `i` and
	/// every `(offset, weight)` of `distance_weights` (ascending offsets),
	/// the node of token `i` gets a link of `weight` to the node of token
	/// `(i + offset) mod token_count`.
	///
	/// Nodes are added in order of first appearance. Text without any
	/// token gives an empty graph.
	///
	/// # Example
	/// ```
	/// use blur_core::markov::{Graph, TextGraphOptions};
	///
	/// let graph = Graph::from_string("I have a cat.", &TextGraphOptions::default()).unwrap();
	/// let names: Vec<&str> = graph.nodes().map(|n| n.name()).collect();
	/// assert_eq!(names, vec!["I", "have", "a", "cat", "."]);
	/// ```
	pub fn from_string(source: &str, options: &TextGraphOptions) -> Result<Graph> {
		let tokens = tokenize(source, &options.group_open, &options.group_close)?;
		let mut graph = Graph::new();
		if tokens.is_empty() {
			warn!("source text has no tokens, graph is empty");
			return Ok(graph);
		}

		// Node of each token position
		let mut token_nodes: Vec<NodeId> = Vec::with_capacity(tokens.len());
		let mut created: Vec<NodeId> = Vec::new();
		let mut by_text: HashMap<&str, NodeId> = HashMap::new();

		for token in &tokens {
			if options.merge_same_words {
				if let Some(&existing) = by_text.get(token.text.as_str()) {
					if let Some(node) = graph.node_mut(existing) {
						node.self_destruct |= token.self_destruct;
					}
					token_nodes.push(existing);
					continue;
				}
			}

			let id = graph.create_node(&token.text, token.kind.clone());
			if let Some(node) = graph.node_mut(id) {
				node.self_destruct = token.self_destruct;
			}
			by_text.insert(token.text.as_str(), id);
			created.push(id);
			token_nodes.push(id);
		}

		let count = token_nodes.len() as i64;
		for (position, &source_id) in token_nodes.iter().enumerate() {
			for (&offset, &weight) in &options.distance_weights {
				// Reduce first so the sum stays within i64 for any offset
				let wrapped = (position as i64 + offset.rem_euclid(count)).rem_euclid(count) as usize;
				graph.add_link(source_id, token_nodes[wrapped], weight)?;
			}
		}

		graph.add_nodes(&created, false)?;
		debug!("built graph of {} nodes from {} tokens", graph.len(), tokens.len());
		Ok(graph)
	}

	/// Reads a text file and builds a graph from it with `from_string`.
	///
	/// # Errors
	/// Returns `BlurError::Io` if the file cannot be read.
	pub fn from_file<P: AsRef<Path>>(path: P, options: &TextGraphOptions) -> Result<Graph> {
		let source = io::read_source(&path)?;
		debug!("read source '{}' ({} bytes)", io::get_filename(&path)?, source.len());
		Self::from_string(&source, options)
	}
}

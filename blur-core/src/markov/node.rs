use std::borrow::Cow;
use std::fmt;

use rand::Rng;

use crate::chance::weighted_choice;
use crate::error::Result;

/// Stable handle of a node inside a `Graph`.
///
/// Ids are never reused, so a handle to a removed node stays invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Position of the node in the graph arena.
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// What a node stands for, and how its value is produced.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	/// A word of source text.
	Word,
	/// A run of punctuation marks.
	Punctuation,
	/// Text kept together between group markers.
	Group,
	/// A value re-rolled on every read from `(value, strength)` options.
	Choice(Vec<(String, f64)>),
}

/// A one-way weighted link to another node.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	target: NodeId,
	/// Relative chance of following this link.
	pub weight: f64,
}

impl Link {
	pub fn new(target: NodeId, weight: f64) -> Self {
		Self { target, weight }
	}

	pub fn target(&self) -> NodeId {
		self.target
	}
}

/// A named vertex of a Markov graph.
///
/// ## Invariants
/// - At most one outgoing link targets a given node; adding a link to an
///   already linked target sums the weights.
/// - `id` is the handle the owning graph allocated for this node.
#[derive(Clone, Debug)]
pub struct Node {
	id: NodeId,
	name: String,
	kind: NodeKind,
	/// Whether this node is meant to be used only once. Advisory: the graph
	/// never removes it on its own.
	pub self_destruct: bool,
	/// Relative chance of being picked when a traversal starts from nothing
	/// with `Bootstrap::UseWeight`.
	pub use_weight: f64,
	links: Vec<Link>,
}

impl Node {
	pub(crate) fn new(id: NodeId, name: &str, kind: NodeKind) -> Self {
		Self {
			id,
			name: name.to_owned(),
			kind,
			self_destruct: false,
			use_weight: 1.0,
			links: Vec::new(),
		}
	}

	pub fn id(&self) -> NodeId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> &NodeKind {
		&self.kind
	}

	/// Outgoing links, in creation order.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub(crate) fn links_mut(&mut self) -> &mut Vec<Link> {
		&mut self.links
	}

	/// Sum of the weights of every outgoing link.
	pub fn link_weight_sum(&self) -> f64 {
		self.links.iter().map(|link| link.weight).sum()
	}

	/// Produces the value of this node.
	///
	/// Text kinds return the node name. `Choice` nodes roll a new value
	/// among their options on every call.
	///
	/// # Errors
	/// Propagates `weighted_choice` errors for `Choice` nodes.
	pub fn value<R: Rng>(&self, rng: &mut R) -> Result<Cow<'_, str>> {
		match &self.kind {
			NodeKind::Word | NodeKind::Punctuation | NodeKind::Group => Ok(Cow::Borrowed(&self.name)),
			NodeKind::Choice(options) => Ok(Cow::Owned(weighted_choice(options, rng)?)),
		}
	}

	/// Adds a link to `target`.
	///
	/// - If a link to `target` already exists, `weight` is added to it.
	/// - Otherwise, a new link is appended.
	pub fn add_link(&mut self, target: NodeId, weight: f64) {
		match self.find_link_mut(target) {
			Some(existing) => existing.weight += weight,
			None => self.links.push(Link::new(target, weight)),
		}
	}

	/// Adds a link of `weight` to every node of `targets`.
	pub fn add_links(&mut self, targets: &[NodeId], weight: f64) {
		for &target in targets {
			self.add_link(target, weight);
		}
	}

	/// Copies the links of `other` into this node.
	///
	/// Links to a target this node already links to are merged by
	/// summing weights. To merge by target name, see
	/// `Graph::merge_links_from`.
	pub fn merge_links_from(&mut self, other: &Node) {
		for link in &other.links {
			self.add_link(link.target, link.weight);
		}
	}

	/// The link pointing to `target`, if any.
	pub fn find_link(&self, target: NodeId) -> Option<&Link> {
		self.links.iter().find(|link| link.target == target)
	}

	pub fn find_link_mut(&mut self, target: NodeId) -> Option<&mut Link> {
		self.links.iter_mut().find(|link| link.target == target)
	}

	/// Removes the link pointing back to this node, if any.
	pub fn remove_links_to_self(&mut self) {
		let id = self.id;
		self.links.retain(|link| link.target != id);
	}

	/// Removes every link pointing to `target`.
	pub(crate) fn remove_links_to(&mut self, target: NodeId) {
		self.links.retain(|link| link.target != target);
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node {} \"{}\" with {} links", self.id, self.name, self.links.len())?;
		for (i, link) in self.links.iter().enumerate() {
			write!(f, "\n    {}: {} --> {}", i, link.weight, link.target)?;
		}
		Ok(())
	}
}

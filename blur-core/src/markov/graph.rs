use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, trace, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;

use super::node::{Link, Node, NodeId, NodeKind};
use crate::chance::{Point, sample_curve, weighted_choice};
use crate::error::{BlurError, Result};

/// How `Graph::pick` chooses a node when there is nowhere to start from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bootstrap {
	/// Every member node is equally likely.
	#[default]
	Uniform,
	/// Members are weighted by their `use_weight`.
	UseWeight,
}

/// A Markov graph of named nodes.
///
/// The graph owns every node in an arena and hands out `NodeId`s. Nodes
/// can be allocated detached (`create_node`) so links can be set up
/// before they join the graph with `add_nodes`.
///
/// # Responsibilities
/// - Keep the ordered list of member nodes (insertion order matters for
///   text-derived graphs)
/// - Merge, remove, feather and perturb nodes and links
/// - Walk the graph one weighted step at a time, remembering where it is
///
/// # Invariants
/// - Ids are never reused; a removed node's slot stays empty
/// - After a removal, no live node links to the removed one
/// - `current` is either `None` or a live node
#[derive(Clone, Debug, Default)]
pub struct Graph {
	/// Every node ever allocated, `None` once destroyed.
	arena: Vec<Option<Node>>,
	/// Member nodes, in insertion order.
	members: Vec<NodeId>,
	/// Last picked node.
	current: Option<NodeId>,
	/// Policy for picks that have nowhere to start from.
	pub bootstrap: Bootstrap,
}

impl Graph {
	/// Creates an empty graph with a uniform bootstrap.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty graph with the given bootstrap policy.
	pub fn with_bootstrap(bootstrap: Bootstrap) -> Self {
		Self { bootstrap, ..Self::default() }
	}

	/// Allocates a node that is not yet a member of the graph.
	///
	/// Use `add_nodes` to make it a member.
	pub fn create_node(&mut self, name: &str, kind: NodeKind) -> NodeId {
		let id = NodeId(self.arena.len());
		self.arena.push(Some(Node::new(id, name, kind)));
		id
	}

	/// Allocates a word node and appends it to the graph.
	pub fn insert_node(&mut self, name: &str) -> NodeId {
		self.insert_node_with_kind(name, NodeKind::Word)
	}

	/// Allocates a node of any kind and appends it to the graph.
	pub fn insert_node_with_kind(&mut self, name: &str, kind: NodeKind) -> NodeId {
		let id = self.create_node(name, kind);
		self.members.push(id);
		id
	}

	/// The node behind `id`, member or detached. `None` once destroyed.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.arena.get(id.0).and_then(Option::as_ref)
	}

	pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.arena.get_mut(id.0).and_then(Option::as_mut)
	}

	fn node_or_err(&self, id: NodeId) -> Result<&Node> {
		self.node(id).ok_or(BlurError::UnknownNode(id))
	}

	fn node_mut_or_err(&mut self, id: NodeId) -> Result<&mut Node> {
		self.node_mut(id).ok_or(BlurError::UnknownNode(id))
	}

	/// Whether `id` is a member of the graph.
	pub fn contains(&self, id: NodeId) -> bool {
		self.members.contains(&id)
	}

	/// Member ids, in insertion order.
	pub fn node_ids(&self) -> &[NodeId] {
		&self.members
	}

	/// Member nodes, in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.members.iter().filter_map(|&id| self.node(id))
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Adds a link from `from` to `to`, summing into an existing one.
	///
	/// # Errors
	/// Returns `UnknownNode` if either node does not exist.
	pub fn add_link(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<()> {
		self.node_or_err(to)?;
		self.node_mut_or_err(from)?.add_link(to, weight);
		Ok(())
	}

	/// Adds a link of `weight` from `from` to every node of `targets`.
	pub fn add_links(&mut self, from: NodeId, targets: &[NodeId], weight: f64) -> Result<()> {
		for &target in targets {
			self.add_link(from, target, weight)?;
		}
		Ok(())
	}

	/// Links `node` and each of `targets` in both directions with `weight`.
	pub fn add_reciprocal_link(&mut self, node: NodeId, targets: &[NodeId], weight: f64) -> Result<()> {
		for &target in targets {
			self.add_link(node, target, weight)?;
			self.add_link(target, node, weight)?;
		}
		Ok(())
	}

	/// Gives each of `sources` a link of `weight` to `node`.
	pub fn add_link_to_self(&mut self, node: NodeId, sources: &[NodeId], weight: f64) -> Result<()> {
		for &source in sources {
			self.add_link(source, node, weight)?;
		}
		Ok(())
	}

	/// Copies the links of `src` into `dst`.
	///
	/// Links are merged into existing ones of `dst` when they point to the
	/// same node, or, with `match_by_name`, to a node with the same name
	/// (useful when distinct nodes share a logical name).
	///
	/// # Errors
	/// Returns `UnknownNode` if either node does not exist.
	pub fn merge_links_from(&mut self, dst: NodeId, src: NodeId, match_by_name: bool) -> Result<()> {
		let src_links: Vec<Link> = self.node_or_err(src)?.links().to_vec();
		self.node_or_err(dst)?;

		for link in src_links {
			let existing = if match_by_name {
				self.find_link_by_target_name(dst, link.target())
			} else {
				None
			};

			let dst_node = self.node_mut_or_err(dst)?;
			match existing {
				Some(position) => dst_node.links_mut()[position].weight += link.weight,
				None => dst_node.add_link(link.target(), link.weight),
			}
		}
		Ok(())
	}

	/// Position of the first link of `owner` whose target is named like `target`.
	fn find_link_by_target_name(&self, owner: NodeId, target: NodeId) -> Option<usize> {
		let name = self.node(target)?.name();
		self.node(owner)?
			.links()
			.iter()
			.position(|link| self.node(link.target()).is_some_and(|n| n.name() == name))
	}

	/// Adds nodes to the graph.
	///
	/// Nodes are appended in order. With `merge_existing_by_name`, a node
	/// whose name is already used by a member (possibly one added earlier
	/// in the same call) is merged into that member with `merge_nodes`
	/// instead of being appended. Nodes that are already members are left
	/// where they are.
	///
	/// # Errors
	/// Returns `UnknownNode` if an id does not refer to a live node.
	pub fn add_nodes(&mut self, ids: &[NodeId], merge_existing_by_name: bool) -> Result<()> {
		let mut pending_merges = Vec::new();

		for &id in ids {
			let node = self.node_or_err(id)?;
			if self.contains(id) {
				continue;
			}
			if merge_existing_by_name {
				if let Some(existing) = self.find_node_by_name(node.name()) {
					pending_merges.push((existing, id));
					continue;
				}
			}
			self.members.push(id);
		}

		// Links between two colliding nodes must point at a member before
		// either merge runs
		let keep_of: HashMap<NodeId, NodeId> = pending_merges.iter().map(|&(keep, kill)| (kill, keep)).collect();
		for &(_, kill) in &pending_merges {
			if let Some(node) = self.node_mut(kill) {
				let links = std::mem::take(node.links_mut());
				for link in links {
					let target = keep_of.get(&link.target()).copied().unwrap_or(link.target());
					node.add_link(target, link.weight);
				}
			}
		}

		// Merge once every non-colliding node is a member, so links between
		// incoming nodes survive
		for (keep, kill) in pending_merges {
			self.merge_nodes(keep, kill)?;
		}

		debug!("added {} nodes, graph now has {}", ids.len(), self.members.len());
		Ok(())
	}

	/// Merges `kill` into `keep`, then destroys `kill`.
	///
	/// - Links of `kill` to member nodes are added to `keep` (a link of
	///   `kill` to itself becomes a link of `keep` to itself).
	/// - Every member linking to `kill` moves that weight onto its link to
	///   `keep`.
	/// - `kill` is removed and every remaining link to it pruned.
	///
	/// The weight `keep` and `kill` each had toward a shared target ends up
	/// summed on `keep`'s link.
	///
	/// # Errors
	/// - `UnknownNode` if either node does not exist
	/// - `InvalidArgument` if `keep == kill`
	pub fn merge_nodes(&mut self, keep: NodeId, kill: NodeId) -> Result<()> {
		if keep == kill {
			return Err(BlurError::InvalidArgument(format!("cannot merge node {keep} into itself")));
		}
		let kill_links: Vec<Link> = self.node_or_err(kill)?.links().to_vec();
		self.node_or_err(keep)?;

		for link in kill_links {
			let target = if link.target() == kill { keep } else { link.target() };
			if target == keep || self.contains(target) {
				self.node_mut_or_err(keep)?.add_link(target, link.weight);
			}
		}

		for &member in &self.members {
			if member == kill {
				continue;
			}
			if let Some(node) = self.arena[member.0].as_mut() {
				if let Some(weight) = node.find_link(kill).map(|link| link.weight) {
					node.add_link(keep, weight);
				}
			}
		}

		self.destroy(kill);
		debug!("merged node {kill} into {keep}");
		Ok(())
	}

	/// Drops a node from the arena and every link pointing to it.
	fn destroy(&mut self, id: NodeId) {
		self.members.retain(|&member| member != id);
		if let Some(slot) = self.arena.get_mut(id.0) {
			*slot = None;
		}
		for node in self.arena.iter_mut().flatten() {
			node.remove_links_to(id);
		}
		if self.current == Some(id) {
			self.current = None;
		}
	}

	/// Removes a member node and every link pointing to it.
	///
	/// Does nothing if `id` is not a member. If the node was the current
	/// position of the walk, the walk is reset.
	pub fn remove_node(&mut self, id: NodeId) {
		if !self.contains(id) {
			return;
		}
		self.destroy(id);
		trace!("removed node {id}");
	}

	/// Removes every member named `name`, and every link to a node named
	/// `name`.
	pub fn remove_node_by_name(&mut self, name: &str) {
		let named: HashSet<NodeId> = self
			.arena
			.iter()
			.flatten()
			.filter(|node| node.name() == name)
			.map(Node::id)
			.collect();

		let doomed: Vec<NodeId> = self.members.iter().copied().filter(|id| named.contains(id)).collect();
		self.members.retain(|id| !named.contains(id));
		for id in doomed {
			self.arena[id.0] = None;
			if self.current == Some(id) {
				self.current = None;
			}
		}

		for node in self.arena.iter_mut().flatten() {
			node.links_mut().retain(|link| !named.contains(&link.target()));
		}
	}

	/// Whether any member is named `name`.
	pub fn has_node_with_name(&self, name: &str) -> bool {
		self.nodes().any(|node| node.name() == name)
	}

	/// The first member named `name`, in insertion order.
	///
	/// Returns `None` when there is no such node.
	pub fn find_node_by_name(&self, name: &str) -> Option<NodeId> {
		self.nodes().find(|node| node.name() == name).map(Node::id)
	}

	/// Makes every node inherit the links of the nodes it links to.
	///
	/// For a node `n` linking to `m` with a share `r` of `n`'s outgoing
	/// weight, each link of `m` is copied onto `n` with weight
	/// `r × (link weight / m's outgoing weight) × factor`. Links of `m`
	/// back to `n` are skipped unless `include_self`.
	///
	/// Each node works from a snapshot of its own links, so links it
	/// inherits during the pass are not feathered again. Nodes whose
	/// outgoing weight is not positive neither give nor inherit anything.
	pub fn feather_links(&mut self, factor: f64, include_self: bool) {
		for position in 0..self.members.len() {
			let id = self.members[position];
			let Some(node) = self.node(id) else { continue };

			let snapshot = node.links().to_vec();
			let node_sum: f64 = snapshot.iter().map(|link| link.weight).sum();
			if !(node_sum > 0.0) {
				continue;
			}

			let mut inherited = Vec::new();
			for link in &snapshot {
				let Some(neighbor) = self.node(link.target()) else { continue };
				let neighbor_sum = neighbor.link_weight_sum();
				if !(neighbor_sum > 0.0) {
					continue;
				}
				let share = link.weight / node_sum;
				for neighbor_link in neighbor.links() {
					if !include_self && neighbor_link.target() == id {
						continue;
					}
					let relative = neighbor_link.weight / neighbor_sum;
					inherited.push((neighbor_link.target(), relative * share * factor));
				}
			}

			if let Some(node) = self.node_mut(id) {
				for (target, weight) in inherited {
					node.add_link(target, weight);
				}
			}
		}
	}

	/// Adds noise to the weight of every link.
	///
	/// With `noise_curve`, each link gets a value sampled from that curve.
	/// Otherwise each link gets a uniform amount in
	/// `[0, weight × uniform_amount)`.
	///
	/// Returns how many curve samples were degraded (see `Sample`).
	///
	/// # Errors
	/// Propagates `sample_curve` errors for an invalid `noise_curve`.
	pub fn apply_noise<R: Rng>(&mut self, noise_curve: Option<&[Point]>, uniform_amount: f64, rng: &mut R) -> Result<usize> {
		let mut degraded = 0;

		for &id in &self.members {
			let Some(node) = self.arena[id.0].as_mut() else { continue };
			for link in node.links_mut() {
				let noise = match noise_curve {
					Some(curve) => {
						let sample = sample_curve(curve, false, rng)?;
						if sample.degraded {
							degraded += 1;
						}
						sample.value
					}
					None => rng.random::<f64>() * link.weight * uniform_amount,
				};
				link.weight += noise;
			}
		}

		if degraded > 0 {
			warn!("{degraded} noise samples fell back to a curve vertex");
		}
		Ok(degraded)
	}

	/// Takes one step of the walk and returns the node reached.
	///
	/// - With `starting`, steps from that node (ignoring the current one).
	/// - Otherwise steps from the current node.
	/// - With neither, picks a member according to `bootstrap` without
	///   stepping.
	///
	/// A step follows one outgoing link, chosen by weight. The returned
	/// node becomes the current one.
	///
	/// # Errors
	/// - `EmptyInput` if the graph is empty (bootstrap) or the start node
	///   has no links
	/// - `UndefinedProbability` if the candidate weights are not positive
	/// - `UnknownNode` if `starting` does not exist
	pub fn pick<R: Rng>(&mut self, starting: Option<NodeId>, rng: &mut R) -> Result<NodeId> {
		let Some(start) = starting.or(self.current) else {
			let picked = self.bootstrap_pick(rng)?;
			trace!("bootstrapped walk at {picked}");
			self.current = Some(picked);
			return Ok(picked);
		};

		let options: Vec<(NodeId, f64)> = self
			.node_or_err(start)?
			.links()
			.iter()
			.map(|link| (link.target(), link.weight))
			.collect();
		let picked = weighted_choice(&options, rng)?;

		trace!("picked {picked} from {start}");
		self.current = Some(picked);
		Ok(picked)
	}

	fn bootstrap_pick<R: Rng>(&self, rng: &mut R) -> Result<NodeId> {
		match self.bootstrap {
			Bootstrap::Uniform => self.members.choose(rng).copied().ok_or(BlurError::EmptyInput),
			Bootstrap::UseWeight => {
				let options: Vec<(NodeId, f64)> = self.nodes().map(|node| (node.id(), node.use_weight)).collect();
				weighted_choice(&options, rng)
			}
		}
	}

	/// The node the walk is currently on.
	pub fn current(&self) -> Option<NodeId> {
		self.current
	}

	/// Moves the walk to `id`.
	///
	/// # Errors
	/// Returns `UnknownNode` if `id` does not exist.
	pub fn set_current(&mut self, id: NodeId) -> Result<()> {
		self.node_or_err(id)?;
		self.current = Some(id);
		Ok(())
	}

	/// Forgets the current node; the next pick bootstraps.
	pub fn reset(&mut self) {
		self.current = None;
	}
}

impl fmt::Display for Graph {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "graph with {} nodes:", self.members.len())?;
		for (i, node) in self.nodes().enumerate() {
			write!(f, "\n    {}: {}", i, node.name())?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	fn make_rng() -> ChaCha8Rng {
		ChaCha8Rng::seed_from_u64(42)
	}

	fn weight(graph: &Graph, from: NodeId, to: NodeId) -> Option<f64> {
		graph.node(from)?.find_link(to).map(|link| link.weight)
	}

	fn names(graph: &Graph) -> Vec<&str> {
		graph.nodes().map(Node::name).collect()
	}

	#[test]
	fn add_nodes_appends_in_order() {
		let mut graph = Graph::new();
		let one = graph.create_node("One", NodeKind::Word);
		let two = graph.create_node("Two", NodeKind::Word);
		assert!(graph.is_empty());
		graph.add_nodes(&[one, two], false).unwrap();
		assert_eq!(names(&graph), vec!["One", "Two"]);
		// Adding a member again does not duplicate it
		graph.add_nodes(&[one], false).unwrap();
		assert_eq!(graph.len(), 2);
	}

	#[test]
	fn add_nodes_merges_by_name() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		graph.add_link(one, two, 1.0).unwrap();

		let other_one = graph.create_node("One", NodeKind::Word);
		graph.add_link(other_one, two, 2.0).unwrap();
		graph.add_link(other_one, one, 4.0).unwrap();
		graph.add_nodes(&[other_one], true).unwrap();

		assert_eq!(names(&graph), vec!["One", "Two"]);
		assert!(graph.node(other_one).is_none());
		assert_eq!(weight(&graph, one, two), Some(3.0));
		assert_eq!(weight(&graph, one, one), Some(4.0));
	}

	#[test]
	fn add_nodes_keeps_links_between_colliding_nodes() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");

		let other_one = graph.create_node("One", NodeKind::Word);
		let other_two = graph.create_node("Two", NodeKind::Word);
		graph.add_link(other_one, other_two, 2.0).unwrap();
		graph.add_link(other_two, other_one, 1.0).unwrap();
		graph.add_link(other_two, other_two, 0.5).unwrap();
		graph.add_nodes(&[other_one, other_two], true).unwrap();

		assert_eq!(names(&graph), vec!["One", "Two"]);
		assert_eq!(weight(&graph, one, two), Some(2.0));
		assert_eq!(weight(&graph, two, one), Some(1.0));
		assert_eq!(weight(&graph, two, two), Some(0.5));
	}

	#[test]
	fn merge_nodes_redirects_links() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		let three = graph.insert_node("Three");
		graph.add_link(one, three, 7.0).unwrap();
		graph.add_link(two, one, 1.0).unwrap();
		graph.add_link(two, two, 3.0).unwrap();
		graph.add_link(three, two, 5.0).unwrap();

		graph.merge_nodes(two, three).unwrap();

		assert_eq!(names(&graph), vec!["One", "Two"]);
		assert_eq!(graph.node(two).unwrap().links(), &[Link::new(one, 1.0), Link::new(two, 8.0)]);
		assert_eq!(graph.node(one).unwrap().links(), &[Link::new(two, 7.0)]);
	}

	#[test]
	fn merge_nodes_conserves_shared_weight() {
		let mut graph = Graph::new();
		let keep = graph.insert_node("keep");
		let kill = graph.insert_node("kill");
		let target = graph.insert_node("target");
		graph.add_link(keep, target, 2.0).unwrap();
		graph.add_link(kill, target, 3.0).unwrap();
		graph.add_link(kill, kill, 1.5).unwrap();

		graph.merge_nodes(keep, kill).unwrap();

		assert_eq!(weight(&graph, keep, target), Some(5.0));
		assert_eq!(weight(&graph, keep, keep), Some(1.5));
		assert!(!graph.contains(kill));
	}

	#[test]
	fn merge_nodes_skips_links_outside_the_graph() {
		let mut graph = Graph::new();
		let keep = graph.insert_node("keep");
		let kill = graph.insert_node("kill");
		let outsider = graph.create_node("outsider", NodeKind::Word);
		graph.add_link(kill, outsider, 1.0).unwrap();

		graph.merge_nodes(keep, kill).unwrap();
		assert!(graph.node(keep).unwrap().links().is_empty());
	}

	#[test]
	fn merge_node_into_itself_fails() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		assert!(matches!(graph.merge_nodes(one, one), Err(BlurError::InvalidArgument(_))));
	}

	#[test]
	fn remove_node_prunes_inbound_links() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		graph.add_reciprocal_link(one, &[two], 1.0).unwrap();
		graph.add_link(two, two, 1.0).unwrap();

		graph.remove_node(two);

		assert_eq!(names(&graph), vec!["One"]);
		assert!(graph.node(two).is_none());
		assert!(graph.nodes().all(|node| node.find_link(two).is_none()));
	}

	#[test]
	fn remove_absent_node_is_a_no_op() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let detached = graph.create_node("Detached", NodeKind::Word);
		graph.add_link(one, detached, 1.0).unwrap();
		graph.remove_node(detached);
		assert_eq!(weight(&graph, one, detached), Some(1.0));
		assert!(graph.node(detached).is_some());
	}

	#[test]
	fn remove_node_by_name_removes_all() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		let other_two = graph.insert_node("Two");
		graph.add_links(one, &[two, other_two, one], 1.0).unwrap();

		graph.remove_node_by_name("Two");

		assert_eq!(names(&graph), vec!["One"]);
		assert_eq!(graph.node(one).unwrap().links(), &[Link::new(one, 1.0)]);
		assert!(!graph.has_node_with_name("Two"));
	}

	#[test]
	fn find_by_name() {
		let mut graph = Graph::new();
		let first = graph.insert_node("One");
		graph.insert_node("One");
		assert_eq!(graph.find_node_by_name("One"), Some(first));
		assert_eq!(graph.find_node_by_name("Foo"), None);
		assert!(graph.has_node_with_name("One"));
		assert!(!graph.has_node_with_name("Foo"));
	}

	#[test]
	fn merge_links_by_identity_or_name() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		let two_again = graph.insert_node("Two");
		let three = graph.insert_node("Three");
		graph.add_link(one, two, 1.0).unwrap();
		graph.add_link(three, two_again, 2.0).unwrap();

		let mut by_identity = graph.clone();
		by_identity.merge_links_from(one, three, false).unwrap();
		assert_eq!(
			by_identity.node(one).unwrap().links(),
			&[Link::new(two, 1.0), Link::new(two_again, 2.0)]
		);

		graph.merge_links_from(one, three, true).unwrap();
		assert_eq!(graph.node(one).unwrap().links(), &[Link::new(two, 3.0)]);
	}

	#[test]
	fn reciprocal_and_inbound_links() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		let three = graph.insert_node("Three");
		graph.add_reciprocal_link(one, &[two, three], 5.0).unwrap();
		assert_eq!(weight(&graph, one, two), Some(5.0));
		assert_eq!(weight(&graph, two, one), Some(5.0));
		assert_eq!(weight(&graph, three, one), Some(5.0));

		graph.add_link_to_self(three, &[one, two], 2.0).unwrap();
		assert_eq!(weight(&graph, one, three), Some(7.0));
		assert_eq!(weight(&graph, two, three), Some(2.0));
	}

	#[test]
	fn links_to_destroyed_nodes_are_rejected() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		graph.remove_node(two);
		assert!(matches!(graph.add_link(one, two, 1.0), Err(BlurError::UnknownNode(_))));
	}

	#[test]
	fn feather_inherits_neighbor_links() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		graph.add_link(one, two, 1.0).unwrap();
		graph.add_link(two, one, 1.0).unwrap();

		let mut without_self = graph.clone();
		without_self.feather_links(0.01, false);
		assert_eq!(without_self.node(one).unwrap().links(), &[Link::new(two, 1.0)]);

		graph.feather_links(0.01, true);
		assert_eq!(graph.node(one).unwrap().links(), &[Link::new(two, 1.0), Link::new(one, 0.01)]);
	}

	#[test]
	fn feather_scales_by_relative_share() {
		let mut graph = Graph::new();
		let a = graph.insert_node("a");
		let b = graph.insert_node("b");
		let c = graph.insert_node("c");
		let d = graph.insert_node("d");
		graph.add_link(a, b, 3.0).unwrap();
		graph.add_link(a, c, 1.0).unwrap();
		graph.add_link(b, d, 1.0).unwrap();
		graph.add_link(b, c, 1.0).unwrap();

		graph.feather_links(1.0, false);

		// a -> b has share 0.75, b splits it evenly between d and c
		let a_to_d = weight(&graph, a, d).unwrap();
		let a_to_c = weight(&graph, a, c).unwrap();
		assert!((a_to_d - 0.375).abs() < 1e-12);
		assert!((a_to_c - 1.375).abs() < 1e-12);
		// b inherits nothing from nodes without links
		assert_eq!(graph.node(b).unwrap().links().len(), 2);
	}

	#[test]
	fn uniform_noise_only_increases_weights_within_bounds() {
		let mut rng = make_rng();
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		graph.add_link(one, one, 3.0).unwrap();
		graph.add_link(one, two, 5.0).unwrap();

		let degraded = graph.apply_noise(None, 0.1, &mut rng).unwrap();
		assert_eq!(degraded, 0);
		let to_one = weight(&graph, one, one).unwrap();
		let to_two = weight(&graph, one, two).unwrap();
		assert!((3.0..3.3).contains(&to_one));
		assert!((5.0..5.5).contains(&to_two));
	}

	#[test]
	fn curve_noise_is_sampled() {
		let mut rng = make_rng();
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		graph.add_link(one, one, 1.0).unwrap();

		graph.apply_noise(Some(&[(0.5, 1.0)]), 0.1, &mut rng).unwrap();
		assert_eq!(weight(&graph, one, one), Some(1.5));

		let curve = [(-1.0, 1.0), (1.0, 1.0)];
		graph.apply_noise(Some(&curve), 0.1, &mut rng).unwrap();
		let noisy = weight(&graph, one, one).unwrap();
		assert!((0.5..=2.5).contains(&noisy));
	}

	#[test]
	fn pick_follows_links() {
		let mut rng = make_rng();
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		graph.add_link(one, two, 1.0).unwrap();
		graph.add_link(two, one, 1.0).unwrap();

		graph.set_current(one).unwrap();
		for _ in 0..10 {
			assert_eq!(graph.pick(None, &mut rng).unwrap(), two);
			assert_eq!(graph.pick(None, &mut rng).unwrap(), one);
		}
		assert_eq!(graph.current(), Some(one));
	}

	#[test]
	fn pick_from_starting_node_ignores_current() {
		let mut rng = make_rng();
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		let two = graph.insert_node("Two");
		let three = graph.insert_node("Three");
		graph.add_link(one, two, 1.0).unwrap();
		graph.add_link(three, three, 1.0).unwrap();

		graph.set_current(one).unwrap();
		assert_eq!(graph.pick(Some(three), &mut rng).unwrap(), three);
		assert_eq!(graph.current(), Some(three));
	}

	#[test]
	fn bootstrap_uniform_picks_a_member() {
		let mut rng = make_rng();
		let mut graph = Graph::new();
		let ids = [graph.insert_node("a"), graph.insert_node("b"), graph.insert_node("c")];
		let mut seen = HashSet::new();
		for _ in 0..100 {
			graph.reset();
			let picked = graph.pick(None, &mut rng).unwrap();
			assert!(ids.contains(&picked));
			assert_eq!(graph.current(), Some(picked));
			seen.insert(picked);
		}
		assert_eq!(seen.len(), 3);
	}

	#[test]
	fn bootstrap_by_use_weight() {
		let mut rng = make_rng();
		let mut graph = Graph::with_bootstrap(Bootstrap::UseWeight);
		let a = graph.insert_node("a");
		let b = graph.insert_node("b");
		graph.node_mut(a).unwrap().use_weight = 0.0;
		for _ in 0..100 {
			graph.reset();
			assert_eq!(graph.pick(None, &mut rng).unwrap(), b);
		}
	}

	#[test]
	fn pick_errors() {
		let mut rng = make_rng();
		let mut graph = Graph::new();
		assert!(matches!(graph.pick(None, &mut rng), Err(BlurError::EmptyInput)));

		let lonely = graph.insert_node("lonely");
		assert!(matches!(graph.pick(Some(lonely), &mut rng), Err(BlurError::EmptyInput)));

		let gone = graph.insert_node("gone");
		graph.remove_node(gone);
		assert!(matches!(graph.pick(Some(gone), &mut rng), Err(BlurError::UnknownNode(_))));
	}

	#[test]
	fn removing_current_node_resets_the_walk() {
		let mut graph = Graph::new();
		let one = graph.insert_node("One");
		graph.set_current(one).unwrap();
		graph.remove_node(one);
		assert_eq!(graph.current(), None);
	}

	#[test]
	fn display_lists_members() {
		let mut graph = Graph::new();
		graph.insert_node("One");
		graph.insert_node("Two");
		assert_eq!(graph.to_string(), "graph with 2 nodes:\n    0: One\n    1: Two");
	}
}

//! Markov graph built on top of the sampling engine.
//!
//! The graph owns every node in an arena; links and the traversal cursor
//! refer to nodes by `NodeId` only. This lets a node be the target of any
//! number of links (itself included) while being mutated in one place.
//!
//! ```
//! use blur_core::markov::Graph;
//!
//! let mut graph = Graph::new();
//! let one = graph.insert_node("One");
//! let two = graph.insert_node("Two");
//! graph.add_link(one, one, 5.0).unwrap();
//! graph.add_link(one, two, 2.0).unwrap();
//! graph.add_link(two, one, 1.0).unwrap();
//!
//! let mut rng = rand::rng();
//! let picked = graph.pick(None, &mut rng).unwrap();
//! assert!(picked == one || picked == two);
//! ```

/// Nodes, node kinds and outgoing links.
pub mod node;

/// The graph container: membership, merging, feathering, noise, traversal.
pub mod graph;

/// Tokenizer and text-to-graph construction.
pub mod text;

pub use graph::{Bootstrap, Graph};
pub use node::{Link, Node, NodeId, NodeKind};
pub use text::{TextGraphOptions, Token, tokenize};

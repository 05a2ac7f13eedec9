//! Stochastic primitives for generative art.
//!
//! This crate provides:
//! - Non-uniform sampling over piecewise-linear curves and weighted outcomes
//! - A weighted directed Markov graph driven by that sampler
//! - Graph construction from free text (words, punctuation, groups)
//!
//! Every random operation takes the caller's `rand::Rng`, so a seeded
//! generator makes any sequence of operations reproducible.

/// Random sampling engine.
///
/// Curve utilities, continuous rejection sampling and discrete
/// weighted choice.
pub mod chance;

/// Weighted directed graph of named nodes and stochastic traversal.
pub mod markov;

/// Error type shared by every module.
pub mod error;

/// I/O utilities (source text loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::{BlurError, Result};

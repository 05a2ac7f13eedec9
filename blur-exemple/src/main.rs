use std::env;
use std::fs;

use blur_core::chance::{normal_distribution, sample_curve, weighted_order};
use blur_core::markov::{Bootstrap, Graph, TextGraphOptions};
use log::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug to see graph construction and merges
    env_logger::init();

    // Usage: blur-exemple [source.txt] [options.json]
    let mut args = env::args().skip(1);
    let source_path = args.next().unwrap_or_else(|| "./data/source.txt".to_owned());

    // Text graph options can be loaded from JSON, for example:
    // { "distance_weights": { "1": 10, "2": 3, "-1": 1 }, "merge_same_words": true }
    let mut options = match args.next() {
        Some(path) => serde_json::from_str::<TextGraphOptions>(&fs::read_to_string(path)?)?,
        None => TextGraphOptions::default(),
    };

    // Without a config file: merge repeated words and give some weight
    // to the word two steps ahead
    if options == TextGraphOptions::default() {
        options.merge_same_words = true;
        options.set_distance_weight(2, 0.25)?;
    }

    let mut rng = rand::rng();
    let mut graph = Graph::from_file(&source_path, &options)?;
    graph.bootstrap = Bootstrap::UseWeight;
    info!("loaded {} nodes from {}", graph.len(), source_path);

    // Let every word borrow a little of its neighbors' habits
    graph.feather_links(0.05, false);

    // Jitter every link with noise drawn from a bell curve around 0.05
    let noise = normal_distribution(0.05, 0.0004, Some(0.0), None, 23)?;
    let degraded = graph.apply_noise(Some(&noise), 0.1, &mut rng)?;
    if degraded > 0 {
        warn!("{degraded} noise samples were approximated");
    }

    // Walk the graph
    let mut words = Vec::new();
    for _ in 0..40 {
        let id = graph.pick(None, &mut rng)?;
        if let Some(node) = graph.node(id) {
            words.push(node.value(&mut rng)?.into_owned());
        }
    }
    println!("{}", words.join(" "));

    // A few draws from a hand-drawn curve, rounded to whole numbers
    let curve = [(-3.0, 4.0), (0.0, 10.0), (5.0, 1.0)];
    let rolls = (0..10)
        .map(|_| sample_curve(&curve, true, &mut rng).map(|s| s.value.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    println!("curve rolls: {}", rolls.join(", "));

    // Order some words, the heavier ones tending to come first
    let ordered = weighted_order(&[("probably first", 100.0), ("probably middle", 20.0), ("probably last", 1.0)], &mut rng)?;
    println!("ordered: {}", ordered.join(" / "));

    Ok(())
}

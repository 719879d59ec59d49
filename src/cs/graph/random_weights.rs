use log::trace;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::cs::graph::Graph;

/// Overwrites the weight of every edge with an independent draw from the
/// uniform distribution on `[0, 1)`.
///
/// Each edge is visited exactly once, so both endpoints observe the same new weight.
pub fn assign_random_weights<R: Rng + ?Sized>(graph: &mut Graph, rng: &mut R) {
    let unit = Uniform::new(0.0, 1.0);
    let mut count = 0usize;
    for weight in graph.weights_mut() {
        *weight = unit.sample(rng);
        count += 1;
    }
    trace!("assigned random weights to {count} edges");
}

//! # Wilson's Algorithm
//!
//! Grows a tree from an initial vertex by attaching loop-erased random walks.
//! A walk starts at a vertex outside the tree and stops when it hits the tree;
//! loops are erased by overwriting the successor recorded for a revisited
//! vertex, so following successors from the start yields a simple path.
//!
//! The result is an exactly uniform spanning tree, whatever the initial vertex
//! and whatever order the outside vertices are processed in. The initial vertex
//! is the one of maximum degree, which tends to shorten the first walks.

use bitvec::prelude::*;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cs::graph::{ensure_connected, Arc, Edge, Graph, Vertex};
use crate::error::Result;

/// Samples a uniform spanning tree with Wilson's algorithm.
///
/// Outside vertices are taken in a uniformly shuffled order, skipping those
/// already absorbed by earlier walks; each walk therefore starts at a
/// uniformly random vertex among the ones still outside the tree.
///
/// # Errors
/// * `Disconnected` if the graph is not connected
///
/// Graphs with zero or one active vertex give an empty tree.
pub fn wilson<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Result<Vec<Edge>> {
    if graph.order() <= 1 {
        return Ok(Vec::new());
    }
    ensure_connected(graph)?;

    let root = match graph.max_degree_vertex() {
        Some(v) => v,
        None => return Ok(Vec::new()),
    };

    let mut in_tree = bitvec![0; graph.upper_bound()];
    in_tree.set(root, true);
    let mut successor: Vec<Option<Arc>> = vec![None; graph.upper_bound()];
    let mut tree = Vec::with_capacity(graph.order() - 1);

    let mut pending: Vec<Vertex> = graph.vertices().filter(|&v| v != root).collect();
    pending.shuffle(rng);

    for start in pending {
        if in_tree[start] {
            continue;
        }

        let mut current = start;
        let mut steps = 0usize;
        while !in_tree[current] {
            let arcs = graph.out_arcs(current);
            let arc = arcs[rng.gen_range(0..arcs.len())];
            successor[current] = Some(arc);
            current = graph.arc_dest(arc);
            steps += 1;
        }

        let before = tree.len();
        let mut v = start;
        while !in_tree[v] {
            in_tree.set(v, true);
            if let Some(arc) = successor[v] {
                tree.push(graph[arc.edge()]);
                v = graph.arc_dest(arc);
            }
        }
        trace!(
            "walk from {start}: {steps} steps, {} edges after loop erasure",
            tree.len() - before
        );
    }

    debug!("wilson: root {root}, {} edges", tree.len());
    Ok(tree)
}

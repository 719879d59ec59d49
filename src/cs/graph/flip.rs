//! # Flip Chain
//!
//! Markov chain on rooted spanning trees. The tree is kept as an arborescence
//! oriented toward a root: every other vertex stores its parent and the tree
//! edge leading to it. One flip:
//!
//! 1. pick a uniformly random non-tree edge `(root, u)` incident to the root;
//! 2. drop the tree edge between `u` and its parent, which lies on the cycle
//!    closed by `(root, u)`;
//! 3. add `(root, u)` and make `u` the new root;
//! 4. recompute all parent pointers with a breadth-first pass from `u`.
//!
//! A flip with no candidate edge at the root leaves the state unchanged.
//! Repeated flips move the tree distribution toward uniform; how many are
//! needed is not bounded here and is up to the caller.

use std::collections::{HashSet, VecDeque};

use bitvec::prelude::*;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cs::graph::{ensure_connected, Edge, EdgeId, Graph, Vertex};
use crate::error::{GraphError, Result};

/// Rooted spanning tree of a borrowed graph, mutated by flips.
#[derive(Debug, Clone)]
pub struct Flipper<'g> {
    graph: &'g Graph,
    in_tree: HashSet<EdgeId>,
    tree_adj: Vec<Vec<EdgeId>>,
    parent: Vec<Option<(Vertex, EdgeId)>>,
    root: Vertex,
}

impl<'g> Flipper<'g> {
    /// Starts the chain from `seed`, oriented toward `root`.
    ///
    /// Seed edges are matched to graph edges by endpoints.
    ///
    /// # Errors
    /// * `VertexNotFound` if `root` is not active
    /// * `Disconnected` if `graph` has no spanning tree at all
    /// * `EdgeNotFound` if a seed edge joins vertices that are not adjacent in `graph`
    /// * `InvalidTree` if the seed has the wrong size, repeats an edge or does
    ///   not span the graph
    pub fn new(graph: &'g Graph, seed: &[Edge], root: Vertex) -> Result<Self> {
        if !graph.is_vertex(root) {
            return Err(GraphError::VertexNotFound(root));
        }
        ensure_connected(graph)?;
        let expected = graph.order() - 1;
        if seed.len() != expected {
            return Err(GraphError::invalid_tree(format!(
                "expected {expected} edges, got {}",
                seed.len()
            )));
        }

        let mut in_tree = HashSet::with_capacity(seed.len());
        let mut tree_adj = vec![Vec::new(); graph.upper_bound()];
        for e in seed {
            let id = graph
                .find_edge(e.src, e.dst)
                .ok_or(GraphError::EdgeNotFound(e.src, e.dst))?;
            if !in_tree.insert(id) {
                return Err(GraphError::invalid_tree(format!(
                    "edge ({}, {}) appears twice",
                    e.src, e.dst
                )));
            }
            tree_adj[e.src].push(id);
            tree_adj[e.dst].push(id);
        }

        let mut flipper = Self {
            graph,
            in_tree,
            tree_adj,
            parent: vec![None; graph.upper_bound()],
            root,
        };
        let reached = flipper.reorient();
        if reached != graph.order() {
            return Err(GraphError::invalid_tree(format!(
                "edges reach {reached} of {} vertices from root {root}",
                graph.order()
            )));
        }
        Ok(flipper)
    }

    pub fn root(&self) -> Vertex {
        self.root
    }

    /// Parent of `v` toward the root; `None` for the root and inactive handles.
    pub fn parent(&self, v: Vertex) -> Option<Vertex> {
        self.parent.get(v).copied().flatten().map(|(p, _)| p)
    }

    pub fn is_tree_edge(&self, id: EdgeId) -> bool {
        self.in_tree.contains(&id)
    }

    /// Current tree edges, listed by child vertex in increasing handle order.
    pub fn tree_edges(&self) -> Vec<Edge> {
        self.graph
            .vertices()
            .filter_map(|v| self.parent[v].map(|(_, id)| self.graph[id]))
            .collect()
    }

    /// Performs one flip. Returns `false` if the root had no non-tree edge
    /// and nothing changed.
    pub fn flip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let candidates: Vec<EdgeId> = self
            .graph
            .incident_edges(self.root)
            .iter()
            .copied()
            .filter(|id| !self.in_tree.contains(id))
            .collect();
        let Some(&chosen) = candidates.choose(rng) else {
            trace!("flip skipped: no non-tree edge at root {}", self.root);
            return false;
        };

        let u = self.graph[chosen].opposite(self.root);
        let Some((p, dropped)) = self.parent[u] else {
            return false;
        };

        self.in_tree.remove(&dropped);
        self.tree_adj[u].retain(|&id| id != dropped);
        self.tree_adj[p].retain(|&id| id != dropped);
        self.in_tree.insert(chosen);
        self.tree_adj[u].push(chosen);
        self.tree_adj[self.root].push(chosen);

        trace!("flip: root {} -> {u}, dropped ({u}, {p})", self.root);
        self.root = u;
        self.reorient();
        true
    }

    /// Runs `m` flips and returns how many of them changed the tree.
    pub fn perform_flips<R: Rng + ?Sized>(&mut self, m: usize, rng: &mut R) -> usize {
        let changed = (0..m).filter(|_| self.flip(rng)).count();
        debug!("flip chain: {changed} of {m} flips applied, root {}", self.root);
        changed
    }

    /// Recomputes parent pointers by breadth-first search from the root over
    /// tree edges. Returns the number of vertices reached.
    fn reorient(&mut self) -> usize {
        self.parent.iter_mut().for_each(|p| *p = None);
        let mut seen = bitvec![0; self.graph.upper_bound()];
        let mut queue = VecDeque::new();
        seen.set(self.root, true);
        queue.push_back(self.root);
        let mut reached = 1;

        while let Some(v) = queue.pop_front() {
            for &id in &self.tree_adj[v] {
                let w = self.graph[id].opposite(v);
                if !seen[w] {
                    seen.set(w, true);
                    self.parent[w] = Some((v, id));
                    queue.push_back(w);
                    reached += 1;
                }
            }
        }
        reached
    }
}

/// Runs `flips` moves of the chain from `seed` rooted at `root` and returns
/// the final tree.
///
/// # Errors
/// Same as [`Flipper::new`]. A graph without active vertices gives an empty tree.
pub fn flip_chain<R: Rng + ?Sized>(
    graph: &Graph,
    seed: &[Edge],
    root: Vertex,
    flips: usize,
    rng: &mut R,
) -> Result<Vec<Edge>> {
    if graph.order() == 0 {
        return Ok(Vec::new());
    }
    let mut flipper = Flipper::new(graph, seed, root)?;
    flipper.perform_flips(flips, rng);
    Ok(flipper.tree_edges())
}

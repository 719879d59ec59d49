//! # Graph Store
//!
//! Undirected graph over a fixed handle space `0..upper_bound` with per-vertex
//! activation. Edges live once in an arena and are addressed by [`EdgeId`];
//! every vertex keeps three incidence views into that arena:
//!
//! - `incidence[v]`: undirected edges touching `v`
//! - `out_arcs[v]`: arcs leaving `v`
//! - `in_arcs[v]`: arcs entering `v`
//!
//! An [`Arc`] is only an edge id plus a reversal flag, so a weight written
//! through one endpoint is seen from the other and from both arcs.
//!
//! Arena slots of removed edges are never reused; a stale [`EdgeId`] never
//! aliases a newer edge.

use std::ops::Index;

use bitvec::prelude::*;
use log::trace;

use crate::error::{GraphError, Result};

/// Vertex handle in `0..upper_bound`.
pub type Vertex = usize;

/// Index of an edge in the graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An undirected edge with a mutable weight.
///
/// `src` and `dst` only fix an enumeration order; the edge itself is unordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub src: Vertex,
    pub dst: Vertex,
    pub weight: f64,
}

impl Edge {
    /// Unweighted edge (weight `0.0`).
    pub fn new(src: Vertex, dst: Vertex) -> Self {
        Self::with_weight(src, dst, 0.0)
    }

    pub fn with_weight(src: Vertex, dst: Vertex, weight: f64) -> Self {
        Self { src, dst, weight }
    }

    /// Returns the endpoint that is not `v`.
    pub fn opposite(&self, v: Vertex) -> Vertex {
        if self.src == v {
            self.dst
        } else {
            self.src
        }
    }

    /// True if the edge joins `u` and `v` in either direction.
    pub fn connects(&self, u: Vertex, v: Vertex) -> bool {
        (self.src == u && self.dst == v) || (self.src == v && self.dst == u)
    }

    /// Endpoints as `(min, max)`, handy for comparing edges regardless of orientation.
    pub fn key(&self) -> (Vertex, Vertex) {
        (self.src.min(self.dst), self.src.max(self.dst))
    }
}

/// Oriented view of an edge: `src -> dst`, or `dst -> src` when reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    edge: EdgeId,
    reversed: bool,
}

impl Arc {
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

/// Mutable undirected graph with activation flags and arc views.
#[derive(Debug, Clone)]
pub struct Graph {
    upper_bound: usize,
    order: usize,
    edge_count: usize,
    active: BitVec,
    edges: Vec<Option<Edge>>,
    incidence: Vec<Vec<EdgeId>>,
    out_arcs: Vec<Vec<Arc>>,
    in_arcs: Vec<Vec<Arc>>,
}

impl Graph {
    /// Creates a graph with `upper_bound` active vertices and no edges.
    pub fn new(upper_bound: usize) -> Self {
        Self {
            upper_bound,
            order: upper_bound,
            edge_count: 0,
            active: bitvec![1; upper_bound],
            edges: Vec::new(),
            incidence: vec![Vec::new(); upper_bound],
            out_arcs: vec![Vec::new(); upper_bound],
            in_arcs: vec![Vec::new(); upper_bound],
        }
    }

    /// Fixed handle capacity.
    pub fn upper_bound(&self) -> usize {
        self.upper_bound
    }

    /// Number of active vertices.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_vertex(&self, v: Vertex) -> bool {
        v < self.upper_bound && self.active[v]
    }

    /// Reactivates an inactive handle. Returns `false` if `v` is out of range or already active.
    ///
    /// A reactivated vertex starts without edges.
    pub fn add_vertex(&mut self, v: Vertex) -> bool {
        if v >= self.upper_bound || self.active[v] {
            return false;
        }
        self.active.set(v, true);
        self.order += 1;
        true
    }

    /// Same as [`Graph::add_vertex`]; reads better at call sites that only need the vertex present.
    pub fn ensure_vertex(&mut self, v: Vertex) -> bool {
        self.add_vertex(v)
    }

    /// Deactivates `v` and removes every edge and arc touching it.
    ///
    /// The edge count drops by exactly the degree of `v`. Returns `false`
    /// (and does nothing) if `v` is inactive or out of range.
    pub fn delete_vertex(&mut self, v: Vertex) -> bool {
        if !self.is_vertex(v) {
            return false;
        }
        let incident = std::mem::take(&mut self.incidence[v]);
        for id in incident {
            if let Some(edge) = self.edges[id.0].take() {
                let other = edge.opposite(v);
                self.incidence[other].retain(|&e| e != id);
                self.out_arcs[other].retain(|a| a.edge != id);
                self.in_arcs[other].retain(|a| a.edge != id);
                self.edge_count -= 1;
            }
        }
        self.out_arcs[v].clear();
        self.in_arcs[v].clear();
        self.active.set(v, false);
        self.order -= 1;
        trace!("deleted vertex {v}, {} edges left", self.edge_count);
        true
    }

    /// Adds an unweighted edge between two distinct active vertices.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<EdgeId> {
        self.add_weighted_edge(u, v, 0.0)
    }

    /// Adds an edge `u - v` together with its arcs `u -> v` and `v -> u`.
    ///
    /// # Errors
    /// * `VertexNotFound` if either endpoint is inactive or out of range
    /// * `SelfLoop` if `u == v`
    pub fn add_weighted_edge(&mut self, u: Vertex, v: Vertex, weight: f64) -> Result<EdgeId> {
        if !self.is_vertex(u) {
            return Err(GraphError::VertexNotFound(u));
        }
        if !self.is_vertex(v) {
            return Err(GraphError::VertexNotFound(v));
        }
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Some(Edge::with_weight(u, v, weight)));
        self.incidence[u].push(id);
        self.incidence[v].push(id);

        let forward = Arc {
            edge: id,
            reversed: false,
        };
        let backward = Arc {
            edge: id,
            reversed: true,
        };
        self.out_arcs[u].push(forward);
        self.in_arcs[v].push(forward);
        self.out_arcs[v].push(backward);
        self.in_arcs[u].push(backward);

        self.edge_count += 1;
        Ok(id)
    }

    /// Adds `u - v` unless an edge between them already exists.
    ///
    /// Returns `Ok(None)` when the pair was already joined; the existing edge
    /// and its weight are left untouched and `weight` is dropped.
    pub fn add_edge_if_not_duplicate(
        &mut self,
        u: Vertex,
        v: Vertex,
        weight: f64,
    ) -> Result<Option<EdgeId>> {
        if self.find_edge(u, v).is_some() {
            return Ok(None);
        }
        self.add_weighted_edge(u, v, weight).map(Some)
    }

    /// Removes an edge and both of its arcs. Returns the removed edge, or
    /// `None` if the id was already removed.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.get_mut(id.0)?.take()?;
        for end in [edge.src, edge.dst] {
            self.incidence[end].retain(|&e| e != id);
            self.out_arcs[end].retain(|a| a.edge != id);
            self.in_arcs[end].retain(|a| a.edge != id);
        }
        self.edge_count -= 1;
        Some(edge)
    }

    /// Looks up an edge joining `u` and `v` by scanning the incidence list of `u`.
    pub fn find_edge(&self, u: Vertex, v: Vertex) -> Option<EdgeId> {
        if !self.is_vertex(u) {
            return None;
        }
        self.incidence[u]
            .iter()
            .copied()
            .find(|&id| self[id].connects(u, v))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    /// Overwrites the weight of an edge. Returns `false` if the edge is gone.
    pub fn set_weight(&mut self, id: EdgeId, weight: f64) -> bool {
        match self.edges.get_mut(id.0).and_then(Option::as_mut) {
            Some(edge) => {
                edge.weight = weight;
                true
            }
            None => false,
        }
    }

    pub fn degree(&self, v: Vertex) -> usize {
        self.incidence.get(v).map_or(0, Vec::len)
    }

    pub fn incident_edges(&self, v: Vertex) -> &[EdgeId] {
        self.incidence.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn out_arcs(&self, v: Vertex) -> &[Arc] {
        self.out_arcs.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn in_arcs(&self, v: Vertex) -> &[Arc] {
        self.in_arcs.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Snapshot of the arcs leaving `v`, safe to hold across mutations.
    pub fn out_edges(&self, v: Vertex) -> Vec<Arc> {
        self.out_arcs(v).to_vec()
    }

    /// Tail of an arc.
    ///
    /// # Panics
    /// Panics if the supporting edge was removed.
    pub fn arc_source(&self, arc: Arc) -> Vertex {
        let edge = &self[arc.edge];
        if arc.reversed {
            edge.dst
        } else {
            edge.src
        }
    }

    /// Head of an arc.
    ///
    /// # Panics
    /// Panics if the supporting edge was removed.
    pub fn arc_dest(&self, arc: Arc) -> Vertex {
        let edge = &self[arc.edge];
        if arc.reversed {
            edge.src
        } else {
            edge.dst
        }
    }

    /// Active vertices in increasing handle order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.active.iter_ones()
    }

    /// Every live edge exactly once, in arena order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId(i), e)))
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges().map(|(id, _)| id)
    }

    /// Mutable access to the weight of every live edge exactly once, in arena
    /// order. Endpoints stay fixed; use [`Graph::remove_edge`] and
    /// [`Graph::add_weighted_edge`] to rewire.
    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        self.edges.iter_mut().flatten().map(|e| &mut e.weight)
    }

    /// Active vertex of maximum degree, lowest handle on ties.
    pub fn max_degree_vertex(&self) -> Option<Vertex> {
        let mut best: Option<(Vertex, usize)> = None;
        for v in self.vertices() {
            let deg = self.degree(v);
            if best.map_or(true, |(_, d)| deg > d) {
                best = Some((v, deg));
            }
        }
        best.map(|(v, _)| v)
    }

    /// Independent deep copy with the same topology, edge ids and weights.
    pub fn copy(&self) -> Graph {
        self.clone()
    }
}

impl Index<EdgeId> for Graph {
    type Output = Edge;

    /// # Panics
    /// Panics if the edge was removed.
    fn index(&self, id: EdgeId) -> &Edge {
        match self.edge(id) {
            Some(edge) => edge,
            None => panic!("edge {} was removed from the graph", id.0),
        }
    }
}

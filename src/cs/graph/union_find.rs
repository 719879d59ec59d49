use crate::cs::graph::Vertex;

/// Disjoint-set (union-find) over vertex handles `0..n`.
///
/// Shared cycle oracle for Kruskal's algorithm, random insertion and random
/// contraction.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    /// Initializes a union-find for `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Finds the representative (root) of the set containing `x`.
    /// Uses path compression.
    pub fn find(&mut self, x: Vertex) -> Vertex {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Unites the sets containing `x` and `y` by rank.
    /// Returns `false` without touching anything if they already share a root.
    pub fn union(&mut self, x: Vertex, y: Vertex) -> bool {
        let x_root = self.find(x);
        let y_root = self.find(y);
        if x_root == y_root {
            return false;
        }
        match self.rank[x_root].cmp(&self.rank[y_root]) {
            std::cmp::Ordering::Less => self.parent[x_root] = y_root,
            std::cmp::Ordering::Greater => self.parent[y_root] = x_root,
            std::cmp::Ordering::Equal => {
                self.parent[y_root] = x_root;
                self.rank[x_root] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, x: Vertex, y: Vertex) -> bool {
        self.find(x) == self.find(y)
    }
}

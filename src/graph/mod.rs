//! Graphs on the vertices `0..V`, and classic algorithms over them.
//!
//! Vertices outside `0..V` are a logic error of the caller and panic.

mod mst;
mod paths;
mod shortest_paths;
mod weighted;

pub use mst::*;
pub use paths::*;
pub use shortest_paths::*;
pub use weighted::*;

/// An undirected graph kept as adjacency lists. Parallel edges are allowed.
///
/// A self-loop appears once in the adjacency list of its vertex.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adj: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// A graph with `vertices` vertices and no edges.
    pub fn new(vertices: usize) -> Self {
        Graph {
            adj: vec![vec![]; vertices],
            edge_count: 0,
        }
    }

    /// Builds a graph from a list of edges.
    pub fn from_edges(vertices: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut res = Self::new(vertices);
        for (v, w) in edges {
            res.add_edge(v, w);
        }
        res
    }

    pub fn vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn add_edge(&mut self, v: usize, w: usize) {
        validate_vertex(v, self.vertices());
        validate_vertex(w, self.vertices());
        self.adj[v].push(w);
        if v != w {
            self.adj[w].push(v);
        }
        self.edge_count += 1;
    }

    /// The neighbours of `v`, most recently added last.
    pub fn adj(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Every edge once, as `(v, w)` with `v <= w`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(v, adj)| adj.iter().filter(move |&&w| v <= w).map(move |&w| (v, w)))
    }
}

fn validate_vertex(v: usize, vertices: usize) {
    assert!(v < vertices, "vertex {v} is not between 0 and {}", vertices.saturating_sub(1));
}

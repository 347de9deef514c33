//! Edge-weighted graphs, undirected and directed.

use std::fmt;

use super::validate_vertex;

/// An undirected weighted edge between `v` and `w`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Edge {
    v: usize,
    w: usize,
    weight: f64,
}

impl Edge {
    pub fn new(v: usize, w: usize, weight: f64) -> Self {
        Edge { v, w, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// One of the endpoints.
    pub fn either(&self) -> usize {
        self.v
    }

    /// The endpoint that isn't `vertex`. Panics if `vertex` is not an endpoint.
    pub fn other(&self, vertex: usize) -> usize {
        if vertex == self.v {
            self.w
        } else if vertex == self.w {
            self.v
        } else {
            panic!("vertex {vertex} is not an endpoint of {self}")
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {:.5}", self.v, self.w, self.weight)
    }
}

/// An undirected graph with weighted edges.
#[derive(Clone, Debug, Default)]
pub struct EdgeWeightedGraph {
    adj: Vec<Vec<Edge>>,
    edges: Vec<Edge>,
}

impl EdgeWeightedGraph {
    pub fn new(vertices: usize) -> Self {
        EdgeWeightedGraph {
            adj: vec![vec![]; vertices],
            edges: vec![],
        }
    }

    /// Builds a graph from `(v, w, weight)` triples.
    pub fn from_edges(vertices: usize, edges: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let mut res = Self::new(vertices);
        for (v, w, weight) in edges {
            res.add_edge(Edge::new(v, w, weight));
        }
        res
    }

    pub fn vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_edge(&mut self, e: Edge) {
        let v = e.either();
        let w = e.other(v);
        validate_vertex(v, self.vertices());
        validate_vertex(w, self.vertices());
        self.adj[v].push(e);
        if v != w {
            self.adj[w].push(e);
        }
        self.edges.push(e);
    }

    /// The edges incident to `v`.
    pub fn adj(&self, v: usize) -> &[Edge] {
        &self.adj[v]
    }

    /// Every edge once, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// A weighted edge from `from` to `to`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DirectedEdge {
    from: usize,
    to: usize,
    weight: f64,
}

impl DirectedEdge {
    pub fn new(from: usize, to: usize, weight: f64) -> Self {
        DirectedEdge { from, to, weight }
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for DirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} {:.5}", self.from, self.to, self.weight)
    }
}

/// A directed graph with weighted edges.
#[derive(Clone, Debug, Default)]
pub struct EdgeWeightedDigraph {
    adj: Vec<Vec<DirectedEdge>>,
    edge_count: usize,
}

impl EdgeWeightedDigraph {
    pub fn new(vertices: usize) -> Self {
        EdgeWeightedDigraph {
            adj: vec![vec![]; vertices],
            edge_count: 0,
        }
    }

    /// Builds a digraph from `(from, to, weight)` triples.
    pub fn from_edges(vertices: usize, edges: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let mut res = Self::new(vertices);
        for (from, to, weight) in edges {
            res.add_edge(DirectedEdge::new(from, to, weight));
        }
        res
    }

    pub fn vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn add_edge(&mut self, e: DirectedEdge) {
        validate_vertex(e.from, self.vertices());
        validate_vertex(e.to, self.vertices());
        self.adj[e.from].push(e);
        self.edge_count += 1;
    }

    /// The edges leaving `v`.
    pub fn adj(&self, v: usize) -> &[DirectedEdge] {
        &self.adj[v]
    }

    pub fn edges(&self) -> impl Iterator<Item = &DirectedEdge> + '_ {
        self.adj.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let e = Edge::new(3, 8, 0.5);
        assert_eq!(e.other(e.either()), 8);
        assert_eq!(e.other(8), 3);
        assert_eq!(e.to_string(), "3-8 0.50000");
    }

    #[test]
    #[should_panic]
    fn other_of_stranger() {
        Edge::new(3, 8, 0.5).other(4);
    }

    #[test]
    fn digraph_edges() {
        let g = EdgeWeightedDigraph::from_edges(3, [(0, 1, 1.0), (1, 2, 2.0), (2, 0, 3.0), (0, 2, 0.5)]);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.adj(0).len(), 2);
        let total: f64 = g.edges().map(|e| e.weight()).sum();
        assert!((total - 6.5).abs() < 1e-12);
    }
}

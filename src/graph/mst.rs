//! Minimum spanning forests of edge-weighted graphs.
//!
//! If the graph is disconnected, both algorithms return a spanning tree for
//! every component.

use std::cmp::Ordering;

use log::debug;

use super::{Edge, EdgeWeightedGraph};
use crate::pq::{IndexMinPQ, MinPQ};
use crate::union_find::{UnionFind, WeightedQuickUnion};

const FRONTIER_ERROR: &str = "invariant violated: vertices fit in the frontier and their keys only improve";

/// Orders edges by weight alone.
struct ByWeight(Edge);

impl PartialEq for ByWeight {
    fn eq(&self, other: &Self) -> bool {
        self.0.weight() == other.0.weight()
    }
}

impl PartialOrd for ByWeight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.weight().partial_cmp(&other.0.weight())
    }
}

/// Kruskal's algorithm: take the edges lightest first, skipping those that close a cycle.
/// Edges with a NaN weight are ignored, as [`PrimMst`] does.
/// O(E log E)
#[derive(Clone, Debug)]
pub struct KruskalMst {
    edges: Vec<Edge>,
    weight: f64,
}

impl KruskalMst {
    pub fn new(g: &EdgeWeightedGraph) -> Self {
        // NaN weights have no place in the order, so their edges are never taken
        let mut pq: MinPQ<ByWeight> = g
            .edges()
            .iter()
            .filter(|e| !e.weight().is_nan())
            .copied()
            .map(ByWeight)
            .collect();
        let mut uf = WeightedQuickUnion::new(g.vertices());
        let mut edges = vec![];
        let mut weight = 0.0;
        while uf.count() > 1 {
            let Some(ByWeight(e)) = pq.pop() else {
                break;
            };
            let v = e.either();
            let w = e.other(v);
            if uf.connected(v, w) {
                continue;
            }
            uf.union(v, w);
            debug!("kruskal: accepted edge {e}");
            weight += e.weight();
            edges.push(e);
        }
        KruskalMst { edges, weight }
    }

    /// The edges of the forest, in the order they were accepted.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// The eager version of Prim's algorithm: grow a tree from a vertex, keeping for
/// every vertex outside the tree only its lightest edge into the tree.
/// Edges with a NaN weight are ignored.
/// O(E log V)
#[derive(Clone, Debug)]
pub struct PrimMst {
    /// The lightest known edge from each vertex into the tree.
    edge_to: Vec<Option<Edge>>,
    dist_to: Vec<f64>,
    marked: Vec<bool>,
}

impl PrimMst {
    pub fn new(g: &EdgeWeightedGraph) -> Self {
        let vertices = g.vertices();
        let mut res = PrimMst {
            edge_to: vec![None; vertices],
            dist_to: vec![f64::INFINITY; vertices],
            marked: vec![false; vertices],
        };
        let mut pq = IndexMinPQ::new(vertices);
        for s in 0..vertices {
            if res.marked[s] {
                continue;
            }
            res.dist_to[s] = 0.0;
            pq.insert(s, 0.0).expect(FRONTIER_ERROR);
            while let Ok(v) = pq.pop() {
                res.visit(g, v, &mut pq);
            }
        }
        res
    }

    fn visit(&mut self, g: &EdgeWeightedGraph, v: usize, pq: &mut IndexMinPQ<f64>) {
        self.marked[v] = true;
        for e in g.adj(v) {
            let w = e.other(v);
            // NaN weights never improve a distance
            if self.marked[w] || !(e.weight() < self.dist_to[w]) {
                continue;
            }
            self.dist_to[w] = e.weight();
            self.edge_to[w] = Some(*e);
            let update = if pq.contains(w).expect(FRONTIER_ERROR) {
                pq.increase_key(w, e.weight())
            } else {
                pq.insert(w, e.weight())
            };
            update.expect(FRONTIER_ERROR);
        }
    }

    /// The edges of the forest, by the vertex they lead into.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edge_to.iter().flatten()
    }

    pub fn weight(&self) -> f64 {
        self.edges().map(|e| e.weight()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn tiny_ewg() -> EdgeWeightedGraph {
        EdgeWeightedGraph::from_edges(
            8,
            [
                (4, 5, 0.35),
                (4, 7, 0.37),
                (5, 7, 0.28),
                (0, 7, 0.16),
                (1, 5, 0.32),
                (0, 4, 0.38),
                (2, 3, 0.17),
                (1, 7, 0.19),
                (0, 2, 0.26),
                (1, 2, 0.36),
                (1, 3, 0.29),
                (2, 7, 0.34),
                (6, 2, 0.40),
                (3, 6, 0.52),
                (6, 0, 0.58),
                (6, 4, 0.93),
            ],
        )
    }

    #[test]
    fn kruskal_tiny() {
        let mst = KruskalMst::new(&tiny_ewg());
        assert_eq!(mst.edges().len(), 7);
        assert!((mst.weight() - 1.81).abs() < 1e-9);
        let weights: Vec<f64> = mst.edges().iter().map(|e| e.weight()).collect();
        assert_eq!(weights, vec![0.16, 0.17, 0.19, 0.26, 0.28, 0.35, 0.40]);
    }

    #[test]
    fn prim_tiny() {
        let mst = PrimMst::new(&tiny_ewg());
        assert_eq!(mst.edges().count(), 7);
        assert!((mst.weight() - 1.81).abs() < 1e-9);
    }

    #[test]
    fn forest() {
        let g = EdgeWeightedGraph::from_edges(5, [(0, 1, 2.0), (1, 2, 1.0), (0, 2, 3.0), (3, 4, 0.5)]);
        let kruskal = KruskalMst::new(&g);
        let prim = PrimMst::new(&g);
        assert_eq!(kruskal.edges().len(), 3);
        assert_eq!(prim.edges().count(), 3);
        assert!((kruskal.weight() - 3.5).abs() < 1e-9);
        assert!((prim.weight() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn nan_edges_ignored() {
        let g = EdgeWeightedGraph::from_edges(4, [(0, 1, 2.0), (2, 3, f64::NAN), (1, 2, 3.0), (0, 2, 0.5)]);
        let kruskal = KruskalMst::new(&g);
        let prim = PrimMst::new(&g);
        let weights: Vec<f64> = kruskal.edges().iter().map(|e| e.weight()).collect();
        assert_eq!(weights, vec![0.5, 2.0]);
        assert!((kruskal.weight() - 2.5).abs() < 1e-9);
        assert_eq!(prim.edges().count(), 2);
        assert!((prim.weight() - 2.5).abs() < 1e-9);
    }
}

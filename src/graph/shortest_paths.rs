//! Single-source shortest paths in edge-weighted digraphs.

use log::trace;

use super::{validate_vertex, DirectedEdge, EdgeWeightedDigraph};
use crate::collections::Stack;
use crate::pq::IndexMinPQ;

const FRONTIER_ERROR: &str = "invariant violated: vertices fit in the frontier and distances only improve";

/// Dijkstra's algorithm. Edge weights must be nonnegative and not NaN.
///
/// O(E log V)
///
///```
/// use hedgerow::graph::{DijkstraSp, EdgeWeightedDigraph};
///
/// let g = EdgeWeightedDigraph::from_edges(3, [(0, 1, 5.0), (0, 2, 1.0), (2, 1, 2.0)]);
/// let sp = DijkstraSp::new(&g, 0);
/// assert_eq!(sp.dist_to(1), Some(3.0));
/// assert_eq!(sp.path_to(1).map(|p| p.len()), Some(2));
///```
#[derive(Clone, Debug)]
pub struct DijkstraSp {
    source: usize,
    dist_to: Vec<f64>,
    /// The last edge on a shortest path to each vertex.
    edge_to: Vec<Option<DirectedEdge>>,
}

impl DijkstraSp {
    /// Panics if some edge has a negative or NaN weight.
    pub fn new(g: &EdgeWeightedDigraph, source: usize) -> Self {
        validate_vertex(source, g.vertices());
        if let Some(e) = g.edges().find(|e| !(e.weight() >= 0.0)) {
            panic!("edge {e} has a negative or NaN weight");
        }
        let mut res = DijkstraSp {
            source,
            dist_to: vec![f64::INFINITY; g.vertices()],
            edge_to: vec![None; g.vertices()],
        };
        res.dist_to[source] = 0.0;
        let mut pq = IndexMinPQ::new(g.vertices());
        pq.insert(source, 0.0).expect(FRONTIER_ERROR);
        while let Ok(v) = pq.pop() {
            for e in g.adj(v) {
                res.relax(e, &mut pq);
            }
        }
        res
    }

    fn relax(&mut self, e: &DirectedEdge, pq: &mut IndexMinPQ<f64>) {
        let (v, w) = (e.from(), e.to());
        let dist = self.dist_to[v] + e.weight();
        if dist >= self.dist_to[w] {
            return;
        }
        trace!("relaxing {e}: distance to {w} is now {dist}");
        self.dist_to[w] = dist;
        self.edge_to[w] = Some(*e);
        let update = if pq.contains(w).expect(FRONTIER_ERROR) {
            pq.increase_key(w, dist)
        } else {
            pq.insert(w, dist)
        };
        update.expect(FRONTIER_ERROR);
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// The length of a shortest path to `v`, or `None` if `v` can't be reached.
    pub fn dist_to(&self, v: usize) -> Option<f64> {
        let dist = self.dist_to[v];
        dist.is_finite().then_some(dist)
    }

    pub fn has_path_to(&self, v: usize) -> bool {
        self.dist_to[v].is_finite()
    }

    /// The edges of a shortest path from the source to `v`, in order.
    pub fn path_to(&self, v: usize) -> Option<Vec<DirectedEdge>> {
        if !self.has_path_to(v) {
            return None;
        }
        let mut path = Stack::new();
        let mut x = v;
        while let Some(e) = self.edge_to[x] {
            path.push(e);
            x = e.from();
        }
        Some(path.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_ewd() -> EdgeWeightedDigraph {
        EdgeWeightedDigraph::from_edges(
            8,
            [
                (4, 5, 0.35),
                (5, 4, 0.35),
                (4, 7, 0.37),
                (5, 7, 0.28),
                (7, 5, 0.28),
                (5, 1, 0.32),
                (0, 4, 0.38),
                (0, 2, 0.26),
                (7, 3, 0.39),
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
    fn tiny_distances() {
        let g = tiny_ewd();
        let sp = DijkstraSp::new(&g, 0);
        let expected = [0.0, 1.05, 0.26, 0.99, 0.38, 0.73, 1.51, 0.60];
        for (v, &dist) in expected.iter().enumerate() {
            let found = sp.dist_to(v).unwrap();
            assert!((found - dist).abs() < 1e-9, "vertex {v}: {found} != {dist}");
        }
    }

    #[test]
    fn tiny_paths() {
        let sp = DijkstraSp::new(&tiny_ewd(), 0);
        let path = sp.path_to(6).unwrap();
        let hops: Vec<(usize, usize)> = path.iter().map(|e| (e.from(), e.to())).collect();
        assert_eq!(hops, vec![(0, 2), (2, 7), (7, 3), (3, 6)]);
        assert_eq!(sp.path_to(0), Some(vec![]));
    }

    #[test]
    fn unreachable() {
        let g = EdgeWeightedDigraph::from_edges(3, [(1, 0, 1.0)]);
        let sp = DijkstraSp::new(&g, 0);
        assert!(!sp.has_path_to(1));
        assert_eq!(sp.dist_to(2), None);
        assert_eq!(sp.path_to(1), None);
    }

    #[test]
    #[should_panic]
    fn negative_weight() {
        let g = EdgeWeightedDigraph::from_edges(2, [(0, 1, -1.0)]);
        DijkstraSp::new(&g, 0);
    }
}

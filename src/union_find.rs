//! Union-find (disjoint sets) over the sites `0..n`.
//!
//! Three classic variants are given, all behind the [`UnionFind`] trait:
//! * [`QuickFind`]: `O(1)` find, `O(N)` union.
//! * [`QuickUnion`]: trees without balancing, `O(N)` worst case for both.
//! * [`WeightedQuickUnion`]: union by size and path halving, nearly `O(1)` amortized.
//!
//! Sites outside `0..n` are a logic error of the caller and panic, the same way
//! indexing a slice out of bounds does.

pub trait UnionFind {
    /// `n` singleton components, one per site.
    fn new(n: usize) -> Self;

    /// The number of sites.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of components.
    fn count(&self) -> usize;

    /// The canonical site of the component containing `p`.
    fn find(&mut self, p: usize) -> usize;

    /// Merges the components containing `p` and `q`.
    fn union(&mut self, p: usize, q: usize);

    fn connected(&mut self, p: usize, q: usize) -> bool {
        self.find(p) == self.find(q)
    }
}

#[derive(Clone, Debug)]
pub struct QuickFind {
    id: Vec<usize>,
    count: usize,
}

impl UnionFind for QuickFind {
    fn new(n: usize) -> Self {
        QuickFind {
            id: (0..n).collect(),
            count: n,
        }
    }

    fn len(&self) -> usize {
        self.id.len()
    }

    fn count(&self) -> usize {
        self.count
    }

    fn find(&mut self, p: usize) -> usize {
        self.id[p]
    }

    fn union(&mut self, p: usize, q: usize) {
        let p_id = self.id[p];
        let q_id = self.id[q];
        if p_id == q_id {
            return;
        }
        for id in self.id.iter_mut() {
            if *id == p_id {
                *id = q_id;
            }
        }
        self.count -= 1;
    }
}

#[derive(Clone, Debug)]
pub struct QuickUnion {
    parent: Vec<usize>,
    count: usize,
}

impl UnionFind for QuickUnion {
    fn new(n: usize) -> Self {
        QuickUnion {
            parent: (0..n).collect(),
            count: n,
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn count(&self) -> usize {
        self.count
    }

    fn find(&mut self, mut p: usize) -> usize {
        while self.parent[p] != p {
            p = self.parent[p];
        }
        p
    }

    fn union(&mut self, p: usize, q: usize) {
        let root_p = self.find(p);
        let root_q = self.find(q);
        if root_p == root_q {
            return;
        }
        self.parent[root_p] = root_q;
        self.count -= 1;
    }
}

/// Union by size, with path halving in `find`.
#[derive(Clone, Debug)]
pub struct WeightedQuickUnion {
    parent: Vec<usize>,
    /// `size[r]` is the number of sites in the tree rooted at `r`. Meaningless for non-roots.
    size: Vec<usize>,
    count: usize,
}

impl WeightedQuickUnion {
    /// The number of sites in the component containing `p`.
    pub fn component_size(&mut self, p: usize) -> usize {
        let root = self.find(p);
        self.size[root]
    }
}

impl UnionFind for WeightedQuickUnion {
    fn new(n: usize) -> Self {
        WeightedQuickUnion {
            parent: (0..n).collect(),
            size: vec![1; n],
            count: n,
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn count(&self) -> usize {
        self.count
    }

    fn find(&mut self, mut p: usize) -> usize {
        while self.parent[p] != p {
            self.parent[p] = self.parent[self.parent[p]];
            p = self.parent[p];
        }
        p
    }

    fn union(&mut self, p: usize, q: usize) {
        let root_p = self.find(p);
        let root_q = self.find(q);
        if root_p == root_q {
            return;
        }
        let (small, large) = if self.size[root_p] < self.size[root_q] {
            (root_p, root_q)
        } else {
            (root_q, root_p)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.count -= 1;
    }
}

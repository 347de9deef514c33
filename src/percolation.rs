//! Percolation on an `n`×`n` grid, and a Monte-Carlo estimate of its threshold.
//!
//! Sites start blocked and get opened one by one. The system percolates when an
//! open path connects the top row to the bottom row.

use log::debug;
use rand::Rng;

use crate::union_find::{UnionFind, WeightedQuickUnion};
use crate::{Error, Result};

/// An `n`×`n` grid of sites. Rows and columns are 1-based, as in `1..=n`.
///
/// Connectivity is kept in two union-finds. Both have a virtual top site
/// connected to every open site in the first row. Only `percolation` also has a
/// virtual bottom site. `fullness` lacks it, so that a site connected only to the
/// bottom row is not reported as full once the grid percolates ("backwash").
#[derive(Clone, Debug)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    open_sites: usize,
    percolation: WeightedQuickUnion,
    fullness: WeightedQuickUnion,
}

impl Percolation {
    /// Creates an `n`×`n` grid of blocked sites.
    /// Fails with [`Error::InvalidCapacity`] if `n == 0`.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidCapacity);
        }
        let sites = n * n;
        Ok(Percolation {
            n,
            open: vec![false; sites],
            open_sites: 0,
            percolation: WeightedQuickUnion::new(sites + 2),
            fullness: WeightedQuickUnion::new(sites + 1),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Opens the site at `(row, col)` if it isn't open already.
    ///
    /// Panics if the site is outside the grid.
    pub fn open(&mut self, row: usize, col: usize) {
        let site = self.site(row, col);
        if self.open[site] {
            return;
        }
        self.open[site] = true;
        self.open_sites += 1;

        let (top, bottom) = (self.top(), self.bottom());
        if row == 1 {
            self.percolation.union(site, top);
            self.fullness.union(site, top);
        }
        if row == self.n {
            self.percolation.union(site, bottom);
        }
        let neighbours = [
            (row > 1).then(|| (row - 1, col)),
            (row < self.n).then(|| (row + 1, col)),
            (col > 1).then(|| (row, col - 1)),
            (col < self.n).then(|| (row, col + 1)),
        ];
        for (r, c) in neighbours.into_iter().flatten() {
            if self.is_open(r, c) {
                let other = self.site(r, c);
                self.percolation.union(site, other);
                self.fullness.union(site, other);
            }
        }
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.open[self.site(row, col)]
    }

    /// Whether the site is open and connected to the top row by open sites.
    pub fn is_full(&mut self, row: usize, col: usize) -> bool {
        let site = self.site(row, col);
        let top = self.top();
        self.open[site] && self.fullness.connected(site, top)
    }

    pub fn open_sites(&self) -> usize {
        self.open_sites
    }

    pub fn percolates(&mut self) -> bool {
        let (top, bottom) = (self.top(), self.bottom());
        self.percolation.connected(top, bottom)
    }

    fn site(&self, row: usize, col: usize) -> usize {
        assert!(
            (1..=self.n).contains(&row) && (1..=self.n).contains(&col),
            "site ({row}, {col}) is outside the {n}x{n} grid",
            n = self.n
        );
        (row - 1) * self.n + (col - 1)
    }

    fn top(&self) -> usize {
        self.n * self.n
    }

    fn bottom(&self) -> usize {
        self.n * self.n + 1
    }
}

/// Parameters of a [`PercolationStats`] experiment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PercolationConfig {
    /// The side of the grid.
    pub n: usize,
    /// The number of independent trials. At least 2, for the deviation to exist.
    pub trials: usize,
}

impl PercolationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 || self.trials < 2 {
            return Err(Error::InvalidCapacity);
        }
        Ok(())
    }
}

/// Estimates the percolation threshold: the fraction of open sites at which a
/// grid whose sites are opened uniformly at random starts to percolate.
#[derive(Clone, Debug)]
pub struct PercolationStats {
    thresholds: Vec<f64>,
}

const CONFIDENCE_95: f64 = 1.96;

impl PercolationStats {
    /// Runs `config.trials` independent experiments with randomness from `rng`.
    pub fn run<R: Rng + ?Sized>(config: PercolationConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let n = config.n;
        let mut thresholds = Vec::with_capacity(config.trials);
        for trial in 0..config.trials {
            let mut grid = Percolation::new(n)?;
            while !grid.percolates() {
                let row = rng.gen_range(1..=n);
                let col = rng.gen_range(1..=n);
                grid.open(row, col);
            }
            let threshold = grid.open_sites() as f64 / (n * n) as f64;
            debug!("percolation trial {trial} finished at threshold {threshold}");
            thresholds.push(threshold);
        }
        Ok(PercolationStats { thresholds })
    }

    /// Like [`PercolationStats::run`], with the thread-local random generator.
    pub fn run_with_thread_rng(config: PercolationConfig) -> Result<Self> {
        Self::run(config, &mut rand::thread_rng())
    }

    pub fn mean(&self) -> f64 {
        self.thresholds.iter().sum::<f64>() / self.thresholds.len() as f64
    }

    /// The sample standard deviation of the thresholds.
    pub fn stddev(&self) -> f64 {
        let mean = self.mean();
        let squares: f64 = self.thresholds.iter().map(|x| (x - mean) * (x - mean)).sum();
        (squares / (self.thresholds.len() - 1) as f64).sqrt()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev() / (self.thresholds.len() as f64).sqrt()
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.mean() - self.half_width()
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.mean() + self.half_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn column_percolates() {
        let mut grid = Percolation::new(3).unwrap();
        grid.open(1, 2);
        grid.open(2, 2);
        assert!(!grid.percolates());
        assert!(grid.is_full(2, 2));
        grid.open(3, 2);
        assert!(grid.percolates());
        assert_eq!(grid.open_sites(), 3);
    }

    #[test]
    fn no_backwash() {
        let mut grid = Percolation::new(3).unwrap();
        for row in 1..=3 {
            grid.open(row, 1);
        }
        grid.open(3, 3);
        assert!(grid.percolates());
        assert!(grid.is_open(3, 3));
        assert!(!grid.is_full(3, 3));
        assert!(grid.is_full(3, 1));
    }

    #[test]
    fn one_by_one() {
        let mut grid = Percolation::new(1).unwrap();
        assert!(!grid.percolates());
        grid.open(1, 1);
        grid.open(1, 1);
        assert_eq!(grid.open_sites(), 1);
        assert!(grid.percolates());
    }

    #[test]
    fn invalid_sizes() {
        assert_eq!(Percolation::new(0).unwrap_err(), Error::InvalidCapacity);
        let config = PercolationConfig { n: 5, trials: 1 };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            PercolationStats::run(config, &mut rng).unwrap_err(),
            Error::InvalidCapacity
        );
    }

    #[test]
    #[should_panic]
    fn outside_grid() {
        let mut grid = Percolation::new(2).unwrap();
        grid.open(0, 1);
    }

    #[test]
    fn threshold_estimate() {
        let mut rng = StdRng::seed_from_u64(2024);
        let stats = PercolationStats::run(PercolationConfig { n: 20, trials: 30 }, &mut rng).unwrap();
        // the threshold for square site percolation is about 0.5927
        assert!((0.5..0.7).contains(&stats.mean()));
        assert!(stats.confidence_lo() <= stats.mean());
        assert!(stats.mean() <= stats.confidence_hi());
        assert!(stats.stddev() > 0.0);
    }
}

use std::convert::TryFrom;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::union_find::UnionFind;

/// Virtual node joined to every open site in the top row.
const VIRTUAL_TOP: usize = 0;

/// An n-by-n grid of sites that open one at a time, tracking which
/// open sites are connected to the top row and whether an open path
/// spans the grid from top to bottom.
///
/// Rows and columns are 1-indexed. Site `(row, col)` has id
/// `(row - 1) * n + col`; id 0 is the virtual top node and id
/// `n * n + 1` the virtual bottom node.
///
/// Two forests are kept: `percolation` knows about both virtual nodes,
/// `fullness` only about the top one. Joining the bottom node into the
/// forest used for `is_full` would make bottom-row sites look full as
/// soon as the system percolates (backwash).
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    open_sites: usize,
    percolation: UnionFind,
    fullness: UnionFind,
}

impl Percolation {
    pub fn new(n: i64) -> Result<Percolation> {
        if n <= 0 {
            return Err(Error::InvalidArgument(format!(
                "grid size must be > 0, got {}",
                n
            )));
        }
        let too_large = || {
            Error::InvalidArgument(format!("grid size {} is too large", n))
        };
        let side = usize::try_from(n).map_err(|_| too_large())?;
        let sites = side.checked_mul(side).ok_or_else(too_large)?;
        // sites plus both virtual nodes
        let nodes = sites.checked_add(2).ok_or_else(too_large)?;
        let n = side;

        debug!(n, sites, "creating percolation grid");

        Ok(Percolation {
            n,
            open: vec![false; sites],
            open_sites: 0,
            percolation: UnionFind::new(nodes),
            fullness: UnionFind::new(nodes - 1),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    fn virtual_bottom(&self) -> usize {
        self.n * self.n + 1
    }

    fn on_grid(&self, row: i64, col: i64) -> bool {
        let n = self.n as i64;
        row >= 1 && row <= n && col >= 1 && col <= n
    }

    fn validate(&self, row: i64, col: i64) -> Result<()> {
        if self.on_grid(row, col) {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "site ({}, {}) is outside of 1..={}",
                row, col, self.n
            )))
        }
    }

    /// Storage offset of an on-grid site. Its union-find id is the
    /// offset plus one.
    fn offset(&self, row: i64, col: i64) -> usize {
        (row as usize - 1) * self.n + (col as usize - 1)
    }

    fn neighbor_open(&self, row: i64, col: i64) -> bool {
        self.on_grid(row, col) && self.open[self.offset(row, col)]
    }

    fn union_both(&mut self, p: usize, q: usize) {
        self.percolation.union(p, q);
        self.fullness.union(p, q);
    }

    /// Opens the site if it is not open already, joining it to its
    /// open neighbors.
    pub fn open(&mut self, row: i64, col: i64) -> Result<()> {
        self.validate(row, col)?;
        let offset = self.offset(row, col);
        if self.open[offset] {
            return Ok(());
        }
        self.open[offset] = true;
        self.open_sites += 1;

        let n = self.n;
        let site = offset + 1;
        trace!(row, col, site, "opened site");

        // left
        if self.neighbor_open(row, col - 1) {
            self.union_both(site, site - 1);
        }
        // right
        if self.neighbor_open(row, col + 1) {
            self.union_both(site, site + 1);
        }
        // up
        if row == 1 {
            self.union_both(site, VIRTUAL_TOP);
        } else if self.neighbor_open(row - 1, col) {
            self.union_both(site, site - n);
        }
        // down, the virtual bottom only goes into the percolation forest
        if row as usize == n {
            let bottom = self.virtual_bottom();
            self.percolation.union(site, bottom);
        } else if self.neighbor_open(row + 1, col) {
            self.union_both(site, site + n);
        }

        Ok(())
    }

    pub fn is_open(&self, row: i64, col: i64) -> Result<bool> {
        self.validate(row, col)?;
        Ok(self.open[self.offset(row, col)])
    }

    /// Whether the site is connected to the top row through open sites.
    pub fn is_full(&mut self, row: i64, col: i64) -> Result<bool> {
        self.validate(row, col)?;
        let site = self.offset(row, col) + 1;
        Ok(self.fullness.connected(VIRTUAL_TOP, site))
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    pub fn percolates(&mut self) -> bool {
        let bottom = self.virtual_bottom();
        self.percolation.connected(VIRTUAL_TOP, bottom)
    }
}

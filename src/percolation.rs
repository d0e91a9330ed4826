use crate::error::{PercolationError, Result};
use crate::grid::{for_each_neighbor, site_index, to_zero_based};
use crate::union_find::UnionFind;

/// An n-by-n site percolation lattice. All sites start blocked.
///
/// Connectivity is tracked in two union-find forests. `uf` has `n*n + 2`
/// elements: one per site, a virtual top node joined to every open site in
/// the first row and a virtual bottom node joined to every open site in the
/// last row. It answers `percolates`. `top_uf` has `n*n + 1` elements and no
/// bottom node, so a component touching only the bottom row can never reach
/// the top through it. It answers `is_full`.
///
/// Queries take 1-indexed `(row, col)` coordinates in `[1, n]`.
#[derive(Debug, Clone)]
pub struct Percolation {
    grid_size: usize,
    // Row-major open flags, 0-indexed
    open: Vec<bool>,
    open_count: usize,
    virtual_top: usize,
    virtual_bottom: usize,
    uf: UnionFind,
    top_uf: UnionFind,
}

impl Percolation {
    /// Creates an n-by-n lattice with every site blocked.
    ///
    /// # Errors
    /// `InvalidArgument` if `n <= 0` or `n * n` overflows.
    pub fn new(n: i64) -> Result<Self> {
        let invalid = PercolationError::InvalidArgument { name: "grid size", value: n };
        if n <= 0 {
            return Err(invalid);
        }
        let grid_size = usize::try_from(n).map_err(|_| invalid.clone())?;
        let num_sites = grid_size
            .checked_mul(grid_size)
            .and_then(|sites| sites.checked_add(2).map(|_| sites))
            .ok_or(invalid)?;

        Ok(Self {
            grid_size,
            open: vec![false; num_sites],
            open_count: 0,
            virtual_top: num_sites,
            virtual_bottom: num_sites + 1,
            uf: UnionFind::new(num_sites + 2),
            top_uf: UnionFind::new(num_sites + 1),
        })
    }

    /// Side length `n`.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Opens site `(row, col)` if it is not open already.
    pub fn open(&mut self, row: i64, col: i64) -> Result<()> {
        let (r, c) = to_zero_based(row, col, self.grid_size)?;
        let n = self.grid_size;
        let node = site_index(r, c, n);

        if self.open[node] {
            return Ok(());
        }
        self.open[node] = true;
        self.open_count += 1;

        // Both apply when n == 1
        if r == 0 {
            self.uf.union(node, self.virtual_top)?;
            self.top_uf.union(node, self.virtual_top)?;
        }
        if r == n - 1 {
            // Bottom node only exists in `uf`
            self.uf.union(node, self.virtual_bottom)?;
        }

        let open = &self.open;
        let uf = &mut self.uf;
        let top_uf = &mut self.top_uf;
        let mut outcome = Ok(());
        for_each_neighbor(r, c, n, |nr, nc| {
            let neighbor = site_index(nr, nc, n);
            if open[neighbor] {
                let merged = uf
                    .union(neighbor, node)
                    .and_then(|_| top_uf.union(neighbor, node));
                if let Err(e) = merged {
                    outcome = Err(e);
                    return false;
                }
            }
            true
        });
        outcome
    }

    /// Is site `(row, col)` open?
    pub fn is_open(&self, row: i64, col: i64) -> Result<bool> {
        let (r, c) = to_zero_based(row, col, self.grid_size)?;
        Ok(self.open[site_index(r, c, self.grid_size)])
    }

    /// Is site `(row, col)` full, i.e. open and connected to the top row?
    ///
    /// Answered by the top-only forest. Asking `uf` instead would report
    /// bottom-only components as full once the system percolates (backwash).
    pub fn is_full(&mut self, row: i64, col: i64) -> Result<bool> {
        let (r, c) = to_zero_based(row, col, self.grid_size)?;
        let node = site_index(r, c, self.grid_size);
        if !self.open[node] {
            return Ok(false);
        }
        self.top_uf.connected(node, self.virtual_top)
    }

    /// Number of open sites.
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Total number of sites, `n * n`.
    pub fn number_of_sites(&self) -> usize {
        self.open.len()
    }

    /// Fraction of all sites that are open.
    pub fn open_fraction(&self) -> f64 {
        self.number_of_open_sites() as f64 / self.number_of_sites() as f64
    }

    /// Does the system percolate?
    pub fn percolates(&mut self) -> Result<bool> {
        self.uf.connected(self.virtual_top, self.virtual_bottom)
    }
}

use crate::error::{PercolationError, Result};

/// Up, down, left, right. Diagonals are not adjacent.
const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// Calculates the 1D union-find index for a 0-indexed site
#[inline(always)]
pub fn site_index(row: usize, col: usize, n: usize) -> usize {
    row * n + col
}

/// Converts a 1-indexed `(row, col)` pair into 0-indexed grid coordinates.
///
/// Fails with `InvalidCoordinate` for anything outside `[1, n]`, including
/// zero and negative values.
#[inline]
pub fn to_zero_based(row: i64, col: i64, n: usize) -> Result<(usize, usize)> {
    let in_range = |v: i64| v >= 1 && (v as u64) <= n as u64;
    if in_range(row) && in_range(col) {
        Ok(((row - 1) as usize, (col - 1) as usize))
    } else {
        Err(PercolationError::InvalidCoordinate { row, col, n })
    }
}

/// Helper to iterate over the in-bounds 4-neighbors of a 0-indexed site.
/// F takes: (neighbor_row, neighbor_col) -> bool (return true to continue, false to stop early)
#[inline(always)]
pub fn for_each_neighbor<F>(row: usize, col: usize, n: usize, mut f: F)
where
    F: FnMut(usize, usize) -> bool,
{
    for (dr, dc) in NEIGHBOR_OFFSETS {
        let check_row = row as i64 + dr;
        let check_col = col as i64 + dc;

        // Check if neighbor is within bounds
        if check_row >= 0 && check_row < n as i64 && check_col >= 0 && check_col < n as i64 {
            if !f(check_row as usize, check_col as usize) { return; } // Stop if closure returns false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors(row: usize, col: usize, n: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for_each_neighbor(row, col, n, |r, c| {
            out.push((r, c));
            true
        });
        out.sort();
        out
    }

    #[test]
    fn test_site_index_row_major() {
        assert_eq!(site_index(0, 0, 4), 0);
        assert_eq!(site_index(0, 3, 4), 3);
        assert_eq!(site_index(1, 0, 4), 4);
        assert_eq!(site_index(3, 3, 4), 15);
    }

    #[test]
    fn test_site_index_is_bijective() {
        let n = 7;
        let mut seen = vec![false; n * n];
        for r in 0..n {
            for c in 0..n {
                let idx = site_index(r, c, n);
                assert!(idx < n * n);
                assert!(!seen[idx], "index {} produced twice", idx);
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_to_zero_based() {
        assert_eq!(to_zero_based(1, 1, 3), Ok((0, 0)));
        assert_eq!(to_zero_based(3, 2, 3), Ok((2, 1)));
        for (r, c) in [(0, 1), (1, 0), (4, 1), (1, 4), (-1, 2), (2, -5), (i64::MIN, 1)] {
            assert_eq!(
                to_zero_based(r, c, 3),
                Err(PercolationError::InvalidCoordinate { row: r, col: c, n: 3 })
            );
        }
    }

    #[test]
    fn test_neighbors_corner_edge_interior() {
        assert_eq!(neighbors(0, 0, 3), vec![(0, 1), (1, 0)]);
        assert_eq!(neighbors(2, 2, 3), vec![(1, 2), (2, 1)]);
        assert_eq!(neighbors(0, 1, 3), vec![(0, 0), (0, 2), (1, 1)]);
        assert_eq!(neighbors(1, 1, 3), vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_single_site_has_no_neighbors() {
        assert!(neighbors(0, 0, 1).is_empty());
    }

    #[test]
    fn test_early_stop() {
        let mut calls = 0;
        for_each_neighbor(1, 1, 3, |_, _| {
            calls += 1;
            false
        });
        assert_eq!(calls, 1);
    }
}

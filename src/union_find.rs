//! Disjoint-set (union-find) forest over the elements `0..n`.
//!
//! Parent links live in a flat `Vec<usize>` arena. `find` compresses paths
//! and `union` attaches the smaller tree under the root of the larger one,
//! which keeps both operations at amortized O(α(n)).

use crate::error::{PercolationError, Result};

/// Disjoint-set forest with path compression and union by size.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n-1}`. `n == 0` is allowed.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    #[inline]
    fn check(&self, x: usize) -> Result<()> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(PercolationError::IndexOutOfRange { index: x, len: self.parent.len() })
        }
    }

    /// Finds the representative of the set containing `x`.
    ///
    /// Every node visited on the way to the root is relinked directly to
    /// the root. Two passes instead of recursion, so deep chains cannot
    /// exhaust the stack.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `x >= len()`.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;

        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        Ok(root)
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `true` if they were in different sets, `false` if the call
    /// was a no-op.
    ///
    /// # Errors
    /// `IndexOutOfRange` if either index is `>= len()`.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;

        if root_x == root_y {
            return Ok(false);
        }

        // Union by size
        let (small, large) = if self.size[root_x] < self.size[root_y] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];

        self.components -= 1;
        Ok(true)
    }

    /// Returns `true` if `x` and `y` are in the same set.
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Returns the number of disjoint sets.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the size of the set containing `x`.
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let uf = UnionFind::new(5);
        assert_eq!(uf.len(), 5);
        assert_eq!(uf.component_count(), 5);
    }

    #[test]
    fn test_new_empty() {
        let mut uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.component_count(), 0);
        assert_eq!(
            uf.find(0),
            Err(PercolationError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_find_initial() {
        let mut uf = UnionFind::new(5);
        for i in 0..5 {
            assert_eq!(uf.find(i).unwrap(), i);
        }
    }

    #[test]
    fn test_union_basic() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 1).unwrap());
        assert!(uf.connected(0, 1).unwrap());
        assert_eq!(uf.component_count(), 4);
    }

    #[test]
    fn test_union_same_set() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1).unwrap();
        assert!(!uf.union(1, 0).unwrap());
        assert!(!uf.union(2, 2).unwrap());
        assert_eq!(uf.component_count(), 4);
    }

    #[test]
    fn test_transitivity() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1).unwrap();
        uf.union(1, 2).unwrap();
        assert!(uf.connected(0, 2).unwrap());
        assert!(!uf.connected(0, 3).unwrap());
    }

    #[test]
    fn test_union_by_size_keeps_larger_root() {
        let mut uf = UnionFind::new(6);
        uf.union(0, 1).unwrap();
        uf.union(0, 2).unwrap();
        let big_root = uf.find(0).unwrap();
        uf.union(5, 0).unwrap(); // singleton joins the 3-element tree
        assert_eq!(uf.find(5).unwrap(), big_root);
        assert_eq!(uf.component_size(5).unwrap(), 4);
    }

    #[test]
    fn test_out_of_range() {
        let mut uf = UnionFind::new(3);
        assert_eq!(
            uf.find(3),
            Err(PercolationError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(uf.union(0, 7).is_err());
        assert!(uf.union(9, 0).is_err());
        assert!(uf.connected(0, 3).is_err());
        // A failed union leaves the forest untouched
        assert_eq!(uf.component_count(), 3);
    }

    #[test]
    fn test_long_chain_path_compression() {
        let n = 100_000;
        let mut uf = UnionFind::new(n);
        for i in 0..n - 1 {
            uf.union(i, i + 1).unwrap();
        }
        assert_eq!(uf.component_count(), 1);
        assert_eq!(uf.component_size(n - 1).unwrap(), n);
        assert!(uf.connected(0, n - 1).unwrap());
    }
}

/// Nearest-neighbour index tables for a periodic chain of `size` sites.
///
/// A square lattice uses the same table for rows and columns, so one
/// `NeighborTable` of length L is enough to wrap both axes of an L x L grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    /// Successor index: `next[i] == (i + 1) % size`
    pub next: Vec<usize>,
    /// Predecessor index: `prev[i] == (i + size - 1) % size`
    pub prev: Vec<usize>,
}

impl NeighborTable {
    /// Build the periodic successor/predecessor tables for `size >= 1` sites
    pub fn new(size: usize) -> Self {
        let mut next = Vec::with_capacity(size);
        let mut prev = Vec::with_capacity(size);

        for i in 0..size {
            next.push(if i + 1 == size { 0 } else { i + 1 });
            prev.push(if i == 0 { size - 1 } else { i - 1 });
        }

        Self { next, prev }
    }

    /// Number of sites along the chain
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    #[inline]
    pub fn next(&self, i: usize) -> usize {
        self.next[i]
    }

    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        self.prev[i]
    }
}

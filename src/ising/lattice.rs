use super::geometry::NeighborTable;
use rand::Rng;

/// Square L x L lattice of Ising spins
///
/// Spins are stored row-major as `i8` and are always either +1 or -1.
/// The side length is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinLattice {
    size: usize,
    spins: Vec<i8>,
}

impl SpinLattice {
    /// Random configuration: each spin is -1 when a uniform draw falls below 0.5, +1 otherwise
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let spins = (0..size * size)
            .map(|_| if rng.gen::<f64>() < 0.5 { -1 } else { 1 })
            .collect();
        Self { size, spins }
    }

    /// All spins up
    pub fn ordered(size: usize) -> Self {
        Self {
            size,
            spins: vec![1; size * size],
        }
    }

    /// Build a lattice from explicit row-major spins.
    ///
    /// Panics if the length is not `size * size` or a value is not ±1.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Self {
        assert_eq!(spins.len(), size * size, "expected {} spins", size * size);
        assert!(
            spins.iter().all(|&s| s == 1 || s == -1),
            "spins must be +1 or -1"
        );
        Self { size, spins }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites N = L^2
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i8 {
        self.spins[i * self.size + j]
    }

    /// Reverse the spin at (i, j) and return its new value
    #[inline]
    pub fn flip(&mut self, i: usize, j: usize) -> i8 {
        let s = &mut self.spins[i * self.size + j];
        *s = -*s;
        *s
    }

    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, i8> {
        self.spins.chunks(self.size)
    }

    /// Sum of the four periodic neighbours of (i, j)
    #[inline]
    pub fn local_field(&self, i: usize, j: usize, neighbors: &NeighborTable) -> i32 {
        self.get(i, neighbors.next(j)) as i32
            + self.get(i, neighbors.prev(j)) as i32
            + self.get(neighbors.next(i), j) as i32
            + self.get(neighbors.prev(i), j) as i32
    }

    /// Total energy `-sum_<ij> s_i s_j` with unit coupling.
    ///
    /// Every site is visited with all four neighbours and the sum is halved,
    /// since each bond is seen from both of its ends.
    pub fn total_energy(&self, neighbors: &NeighborTable) -> i64 {
        let mut energy = 0i64;
        for i in 0..self.size {
            for j in 0..self.size {
                energy -= (self.get(i, j) as i32 * self.local_field(i, j, neighbors)) as i64;
            }
        }
        energy / 2
    }

    /// Total magnetization (sum of all spins)
    pub fn total_magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Render as rows of arrows (useful for small systems)
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.n_sites() * 4);
        for row in self.rows() {
            for &spin in row {
                out.push_str(if spin == 1 { " ↑" } else { " ↓" });
            }
            out.push('\n');
        }
        out
    }
}

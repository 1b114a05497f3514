use super::geometry::NeighborTable;
use super::lattice::SpinLattice;
use super::transition::TransitionTable;
use rand::prelude::*;
use rand::rngs::StdRng;

/// 2D Ising Model evolved by single-spin-flip Metropolis dynamics
///
/// Spins live on an L x L square lattice with periodic boundaries and unit
/// ferromagnetic coupling. The model keeps the total energy and
/// magnetization up to date incrementally: an accepted flip adds its energy
/// change `de` to the running energy and twice the new spin value to the
/// running magnetization, so a sweep costs O(N) and never rescans the lattice.
#[derive(Debug, Clone)]
pub struct IsingModel2D<R = StdRng> {
    /// Spin configuration
    pub(crate) lattice: SpinLattice,
    /// Periodic neighbour indices shared by rows and columns
    neighbors: NeighborTable,
    /// Boltzmann factors for the current temperature
    table: TransitionTable,
    /// Running total energy
    energy: i64,
    /// Running total magnetization
    magnetization: i64,
    /// Random number generator owned by this run
    rng: R,
    /// Completed sweeps
    pub step: u64,
    /// Flip attempt counters
    pub stats: SweepStatistics,
}

/// Counters for Metropolis flip attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStatistics {
    pub attempts: u64,
    pub accepted: u64,
}

impl SweepStatistics {
    /// Fraction of attempted flips that were accepted
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempts as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl IsingModel2D<StdRng> {
    /// Random initial configuration, generator seeded from system entropy
    pub fn new(size: usize, temperature: f64) -> Self {
        Self::with_rng(size, temperature, StdRng::from_entropy())
    }

    /// Random initial configuration with a reproducible generator
    pub fn seeded(size: usize, temperature: f64, seed: u64) -> Self {
        Self::with_rng(size, temperature, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IsingModel2D<R> {
    /// Random initial configuration drawn from `rng`
    pub fn with_rng(size: usize, temperature: f64, mut rng: R) -> Self {
        let lattice = SpinLattice::random(size, &mut rng);
        Self::from_lattice(lattice, temperature, rng)
    }

    /// All spins up (ordered state)
    pub fn ordered_with_rng(size: usize, temperature: f64, rng: R) -> Self {
        Self::from_lattice(SpinLattice::ordered(size), temperature, rng)
    }

    /// Start from an existing configuration
    pub fn from_lattice(lattice: SpinLattice, temperature: f64, rng: R) -> Self {
        let neighbors = NeighborTable::new(lattice.size());
        let energy = lattice.total_energy(&neighbors);
        let magnetization = lattice.total_magnetization();

        Self {
            lattice,
            neighbors,
            table: TransitionTable::new(temperature),
            energy,
            magnetization,
            rng,
            step: 0,
            stats: SweepStatistics::default(),
        }
    }

    /// Set the temperature, rebuilding the Boltzmann factor table
    pub fn set_temperature(&mut self, temperature: f64) {
        self.table = TransitionTable::new(temperature);
    }

    pub fn temperature(&self) -> f64 {
        self.table.temperature()
    }

    pub fn size(&self) -> usize {
        self.lattice.size()
    }

    pub fn n_sites(&self) -> usize {
        self.lattice.n_sites()
    }

    pub fn lattice(&self) -> &SpinLattice {
        &self.lattice
    }

    pub fn neighbors(&self) -> &NeighborTable {
        &self.neighbors
    }

    pub fn transition_table(&self) -> &TransitionTable {
        &self.table
    }

    /// Running total energy
    pub fn energy(&self) -> i64 {
        self.energy
    }

    /// Running total magnetization
    pub fn magnetization(&self) -> i64 {
        self.magnetization
    }

    /// Energy recomputed from scratch, O(N)
    pub fn recomputed_energy(&self) -> i64 {
        self.lattice.total_energy(&self.neighbors)
    }

    /// Magnetization recomputed from scratch, O(N)
    pub fn recomputed_magnetization(&self) -> i64 {
        self.lattice.total_magnetization()
    }

    pub fn energy_per_site(&self) -> f64 {
        self.energy as f64 / self.n_sites() as f64
    }

    pub fn magnetization_per_site(&self) -> f64 {
        self.magnetization as f64 / self.n_sites() as f64
    }

    /// Energy change that flipping the spin at (i, j) would cause
    #[inline]
    pub fn flip_delta(&self, i: usize, j: usize) -> i32 {
        2 * self.lattice.get(i, j) as i32 * self.lattice.local_field(i, j, &self.neighbors)
    }

    /// Apply the Metropolis rule to the spin at (i, j).
    ///
    /// Returns the energy change if the flip was accepted.
    #[inline]
    pub fn attempt_flip(&mut self, i: usize, j: usize) -> Option<i32> {
        self.stats.attempts += 1;
        let de = self.flip_delta(i, j);

        if de <= 0 || self.rng.gen::<f64>() < self.table.acceptance(de) {
            let new_spin = self.lattice.flip(i, j);
            self.energy += de as i64;
            self.magnetization += 2 * new_spin as i64;
            self.stats.accepted += 1;
            Some(de)
        } else {
            None
        }
    }

    /// One Monte Carlo sweep: N = L^2 flip attempts at uniformly chosen sites.
    ///
    /// Sites are drawn with replacement, so a site may be tried more than
    /// once per sweep. Returns the running (energy, magnetization).
    pub fn metropolis_sweep(&mut self) -> (i64, i64) {
        let size = self.lattice.size();
        for _ in 0..self.lattice.n_sites() {
            let i = self.rng.gen_range(0..size);
            let j = self.rng.gen_range(0..size);
            self.attempt_flip(i, j);
        }

        self.step += 1;
        (self.energy, self.magnetization)
    }

    /// Mutable access to the generator, for callers that draw from the same stream
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

//! Random trap configurations on a periodic ring and their survival probability

use crate::ising::NeighborTable;
use rand::Rng;

/// Trap labels of a periodic ring of sites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapLattice {
    traps: Vec<bool>,
}

impl TrapLattice {
    /// Each of `length` sites becomes a trap independently with probability `density`
    pub fn random<R: Rng + ?Sized>(length: usize, density: f64, rng: &mut R) -> Self {
        let traps = (0..length).map(|_| rng.gen::<f64>() < density).collect();
        Self { traps }
    }

    pub fn from_traps(traps: Vec<bool>) -> Self {
        Self { traps }
    }

    pub fn len(&self) -> usize {
        self.traps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
    }

    #[inline]
    pub fn is_trap(&self, site: usize) -> bool {
        self.traps[site]
    }

    pub fn n_traps(&self) -> usize {
        self.traps.iter().filter(|&&t| t).count()
    }

    /// Survival probability after each of `nsteps` steps, by exact enumeration.
    ///
    /// One walker starts on every trap-free site. The occupation probability
    /// of each site is propagated exactly (right with probability `p`) and
    /// mass that lands on a trap is removed. Entry `n` is the remaining mass
    /// divided by the initial number of walkers. A ring made only of traps
    /// has no survivors, so every entry is 0.
    pub fn survival_probability(&self, nsteps: usize, p: f64) -> Vec<f64> {
        let free_sites = self.len() - self.n_traps();
        if free_sites == 0 {
            return vec![0.0; nsteps + 1];
        }

        let ring = NeighborTable::new(self.len());
        let mut occupation: Vec<f64> = self
            .traps
            .iter()
            .map(|&trap| if trap { 0.0 } else { 1.0 })
            .collect();
        let mut next = vec![0.0; self.len()];

        let mut survival = Vec::with_capacity(nsteps + 1);
        survival.push(1.0);
        for _ in 0..nsteps {
            for (j, w) in next.iter_mut().enumerate() {
                *w = if self.traps[j] {
                    0.0
                } else {
                    p * occupation[ring.prev(j)] + (1.0 - p) * occupation[ring.next(j)]
                };
            }
            std::mem::swap(&mut occupation, &mut next);
            survival.push(occupation.iter().sum::<f64>() / free_sites as f64);
        }

        survival
    }
}

/// Survival probability averaged over `ntrials` random trap configurations
pub fn average_survival_probability<R: Rng + ?Sized>(
    length: usize,
    density: f64,
    p: f64,
    nsteps: usize,
    ntrials: usize,
    rng: &mut R,
) -> Vec<f64> {
    let mut mean = vec![0.0; nsteps + 1];
    for _ in 0..ntrials {
        let lattice = TrapLattice::random(length, density, rng);
        for (acc, s) in mean.iter_mut().zip(lattice.survival_probability(nsteps, p)) {
            *acc += s;
        }
    }
    if ntrials > 0 {
        mean.iter_mut().for_each(|v| *v /= ntrials as f64);
    }
    mean
}

use super::model2d::IsingModel2D;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// Running sums of the six moments sampled after every measurement sweep
///
/// The sums are raw (not divided by the number of samples); see
/// [`Observables::thermodynamics`] for the usual derived quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Observables {
    /// Sum of E
    pub energy: f64,
    /// Sum of E^2
    pub energy_sq: f64,
    /// Sum of M
    pub magnetization: f64,
    /// Sum of M^2
    pub magnetization_sq: f64,
    /// Sum of |M|
    pub abs_magnetization: f64,
    /// Sum of M^4
    pub magnetization_quartic: f64,
    /// Number of recorded sweeps
    pub samples: u64,
}

impl Observables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one (E, M) sample
    pub fn record(&mut self, energy: i64, magnetization: i64) {
        let e = energy as f64;
        let m = magnetization as f64;
        let m2 = m * m;

        self.energy += e;
        self.energy_sq += e * e;
        self.magnetization += m;
        self.magnetization_sq += m2;
        self.abs_magnetization += m.abs();
        self.magnetization_quartic += m2 * m2;
        self.samples += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The sums in the order E, E^2, M, M^2, |M|, M^4
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.energy,
            self.energy_sq,
            self.magnetization,
            self.magnetization_sq,
            self.abs_magnetization,
            self.magnetization_quartic,
        ]
    }
}

/// Equilibrate for `nwarmup` sweeps, then accumulate observables over `nsteps` sweeps
pub fn mc_sweeps<R: Rng>(model: &mut IsingModel2D<R>, nwarmup: usize, nsteps: usize) -> Observables {
    let mut observables = Observables::new();

    for _ in 0..nwarmup {
        model.metropolis_sweep();
    }
    debug!(
        "Warm-up finished after {} sweeps at T = {:.4} (E = {}, M = {})",
        nwarmup,
        model.temperature(),
        model.energy(),
        model.magnetization()
    );

    model.stats.reset();
    for _ in 0..nsteps {
        let (energy, magnetization) = model.metropolis_sweep();
        observables.record(energy, magnetization);
    }
    debug!(
        "Measured {} sweeps at T = {:.4}, acceptance rate {:.4}",
        nsteps,
        model.temperature(),
        model.stats.acceptance_rate()
    );

    observables
}

/// Result of one temperature in a scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanPoint {
    pub temperature: f64,
    pub observables: Observables,
    pub acceptance_rate: f64,
}

/// Run an independent simulation at each temperature, in order.
///
/// Every temperature starts from a fresh random lattice whose generator is
/// seeded from `rng`, so a seeded `rng` makes the whole scan reproducible.
pub fn temperature_scan<R: Rng + ?Sized>(
    size: usize,
    temperatures: &[f64],
    nwarmup: usize,
    nsteps: usize,
    rng: &mut R,
) -> Vec<ScanPoint> {
    info!(
        "Scanning {} temperatures on a {}x{} lattice ({} warm-up + {} measurement sweeps)",
        temperatures.len(),
        size,
        size,
        nwarmup,
        nsteps
    );

    temperatures
        .iter()
        .map(|&temperature| {
            let run_rng = StdRng::seed_from_u64(rng.gen());
            let mut model = IsingModel2D::with_rng(size, temperature, run_rng);
            let observables = mc_sweeps(&mut model, nwarmup, nsteps);
            ScanPoint {
                temperature,
                observables,
                acceptance_rate: model.stats.acceptance_rate(),
            }
        })
        .collect()
}

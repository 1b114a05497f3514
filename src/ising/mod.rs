pub mod analysis;
pub mod driver;
pub mod geometry;
pub mod lattice;
pub mod model2d;
pub mod transition;

pub use analysis::{critical_temperature, Thermodynamics};
pub use driver::{mc_sweeps, temperature_scan, Observables, ScanPoint};
pub use geometry::NeighborTable;
pub use lattice::SpinLattice;
pub use model2d::{IsingModel2D, SweepStatistics};
pub use transition::TransitionTable;

#[cfg(test)]
mod tests;

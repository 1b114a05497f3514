// Main library file for lattice Monte Carlo simulations

pub mod app;
pub mod config;
pub mod io;
pub mod ising;
pub mod walk;

pub use ising::{mc_sweeps, IsingModel2D, NeighborTable, Observables, SpinLattice, TransitionTable};
pub use walk::{average_sites_visited, run_trials, sites_visited, Move, MoveRule, Site, WalkStatistics};

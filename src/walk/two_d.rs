//! Two-dimensional square-lattice walks

use super::{Move, MoveRule};
use nalgebra::Vector2;
use rand::Rng;
use std::collections::HashSet;

/// Site of the infinite square lattice
pub type Site2D = Vector2<i64>;

/// The four nearest neighbours of `site`: right, left, up, down
pub fn lattice_neighbors(site: Site2D) -> [Site2D; 4] {
    [
        Vector2::new(site.x + 1, site.y),
        Vector2::new(site.x - 1, site.y),
        Vector2::new(site.x, site.y + 1),
        Vector2::new(site.x, site.y - 1),
    ]
}

/// Uniform step to one of the four neighbours
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimpleWalk2D;

impl MoveRule for SimpleWalk2D {
    type Site = Site2D;

    fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Site2D {
        Vector2::zeros()
    }

    fn step<R: Rng + ?Sized>(&mut self, site: Site2D, rng: &mut R) -> Move<Site2D> {
        Move::To(lattice_neighbors(site)[rng.gen_range(0..4)])
    }
}

/// Self-avoiding walk: uniform step to a neighbour not visited in this trial.
///
/// When every neighbour has already been visited the walker is trapped by
/// its own path. It then stays frozen in place ([`Move::Stuck`]) for the
/// rest of the trial; the trial is kept rather than discarded or restarted.
#[derive(Debug, Clone, Default)]
pub struct SelfAvoidingWalk2D {
    visited: HashSet<Site2D>,
}

impl SelfAvoidingWalk2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sites visited in the current trial
    pub fn visited(&self) -> &HashSet<Site2D> {
        &self.visited
    }
}

impl MoveRule for SelfAvoidingWalk2D {
    type Site = Site2D;

    fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Site2D {
        let origin = Vector2::zeros();
        self.visited.clear();
        self.visited.insert(origin);
        origin
    }

    fn step<R: Rng + ?Sized>(&mut self, site: Site2D, rng: &mut R) -> Move<Site2D> {
        let free: Vec<Site2D> = lattice_neighbors(site)
            .into_iter()
            .filter(|n| !self.visited.contains(n))
            .collect();

        if free.is_empty() {
            return Move::Stuck;
        }

        let next = free[rng.gen_range(0..free.len())];
        self.visited.insert(next);
        Move::To(next)
    }
}

//! One-dimensional walk variants

use super::traps::TrapLattice;
use super::{Move, MoveRule, WalkStatistics};
use crate::ising::NeighborTable;
use rand::Rng;
use std::collections::HashMap;

/// Unit steps: right with probability `p`, left with probability `1 - p`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleWalk1D {
    pub p: f64,
}

impl SimpleWalk1D {
    pub fn new(p: f64) -> Self {
        Self { p }
    }
}

impl MoveRule for SimpleWalk1D {
    type Site = i64;

    fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> i64 {
        0
    }

    fn step<R: Rng + ?Sized>(&mut self, x: i64, rng: &mut R) -> Move<i64> {
        if rng.gen::<f64>() < self.p {
            Move::To(x + 1)
        } else {
            Move::To(x - 1)
        }
    }
}

/// Keeps the direction of the previous step with probability `p`, reverses it otherwise.
///
/// The walker starts at the origin as if its previous step had been to the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistentWalk1D {
    pub p: f64,
    direction: i64,
}

impl PersistentWalk1D {
    pub fn new(p: f64) -> Self {
        Self { p, direction: 1 }
    }
}

impl MoveRule for PersistentWalk1D {
    type Site = i64;

    fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> i64 {
        self.direction = 1;
        0
    }

    fn step<R: Rng + ?Sized>(&mut self, x: i64, rng: &mut R) -> Move<i64> {
        if rng.gen::<f64>() >= self.p {
            self.direction = -self.direction;
        }
        Move::To(x + self.direction)
    }
}

/// Walk confined to `[-half_width, half_width]` with reflecting ends.
///
/// A step that would leave the interval is turned around, so the walker
/// at an end always moves back inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectingWalk1D {
    pub p: f64,
    pub half_width: i64,
}

impl ReflectingWalk1D {
    pub fn new(p: f64, half_width: i64) -> Self {
        Self { p, half_width }
    }
}

impl MoveRule for ReflectingWalk1D {
    type Site = i64;

    fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> i64 {
        0
    }

    fn step<R: Rng + ?Sized>(&mut self, x: i64, rng: &mut R) -> Move<i64> {
        let right = rng.gen::<f64>() < self.p;
        let next = match (right, x) {
            (true, x) if x >= self.half_width => x - 1,
            (true, x) => x + 1,
            (false, x) if x <= -self.half_width => x + 1,
            (false, x) => x - 1,
        };
        Move::To(next)
    }
}

/// Walk on sites `0..=length` started at `length / 2`, absorbed at either end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorbingWalk1D {
    pub p: f64,
    pub length: i64,
}

impl AbsorbingWalk1D {
    pub fn new(p: f64, length: i64) -> Self {
        Self { p, length }
    }

    /// Fraction of trials absorbed at the left end `x = 0`
    pub fn origin_absorption_probability(stats: &WalkStatistics<i64>) -> f64 {
        stats.final_site_fraction(&0)
    }
}

impl MoveRule for AbsorbingWalk1D {
    type Site = i64;

    fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> i64 {
        self.length / 2
    }

    fn step<R: Rng + ?Sized>(&mut self, x: i64, rng: &mut R) -> Move<i64> {
        if rng.gen::<f64>() < self.p {
            Move::To(x + 1)
        } else {
            Move::To(x - 1)
        }
    }

    fn is_absorbing(&self, x: i64) -> bool {
        x <= 0 || x >= self.length
    }
}

/// Walk on a periodic ring of `length` sites with randomly placed traps.
///
/// Each trial draws a fresh trap configuration (every site is a trap with
/// probability `trap_density`) and a uniformly random start site, which may
/// itself be a trap.
#[derive(Debug, Clone)]
pub struct RandomTrapWalk1D {
    pub p: f64,
    pub trap_density: f64,
    ring: NeighborTable,
    traps: TrapLattice,
}

impl RandomTrapWalk1D {
    pub fn new(p: f64, trap_density: f64, length: usize) -> Self {
        Self {
            p,
            trap_density,
            ring: NeighborTable::new(length),
            traps: TrapLattice::from_traps(vec![false; length]),
        }
    }

    pub fn length(&self) -> usize {
        self.ring.len()
    }

    /// Trap configuration of the current trial
    pub fn traps(&self) -> &TrapLattice {
        &self.traps
    }
}

impl MoveRule for RandomTrapWalk1D {
    type Site = i64;

    fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> i64 {
        self.traps = TrapLattice::random(self.length(), self.trap_density, rng);
        rng.gen_range(0..self.length()) as i64
    }

    fn step<R: Rng + ?Sized>(&mut self, x: i64, rng: &mut R) -> Move<i64> {
        let x = x as usize;
        let next = if rng.gen::<f64>() < self.p {
            self.ring.next(x)
        } else {
            self.ring.prev(x)
        };
        Move::To(next as i64)
    }

    fn is_absorbing(&self, x: i64) -> bool {
        self.traps.is_trap(x as usize)
    }
}

/// True self-avoiding walk: steps are biased away from frequently visited sites.
///
/// With `n(y)` the number of visits to `y` so far (the start counts once),
/// the walker at `x` steps right with probability
/// `exp(-g n(x+1)) / (exp(-g n(x+1)) + exp(-g n(x-1)))`.
#[derive(Debug, Clone)]
pub struct TrueSelfAvoidingWalk1D {
    pub g: f64,
    visits: HashMap<i64, u32>,
}

impl TrueSelfAvoidingWalk1D {
    pub fn new(g: f64) -> Self {
        Self {
            g,
            visits: HashMap::new(),
        }
    }

    fn visits(&self, x: i64) -> f64 {
        self.visits.get(&x).copied().unwrap_or(0) as f64
    }

    /// Probability of stepping right from `x` given the visits so far.
    ///
    /// Evaluated as `1 / (1 + exp(g (n(x+1) - n(x-1))))`, which stays in
    /// [0, 1] for any finite `g`.
    pub fn right_probability(&self, x: i64) -> f64 {
        let excess = self.visits(x + 1) - self.visits(x - 1);
        1.0 / (1.0 + (self.g * excess).exp())
    }
}

impl MoveRule for TrueSelfAvoidingWalk1D {
    type Site = i64;

    fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> i64 {
        self.visits.clear();
        self.visits.insert(0, 1);
        0
    }

    fn step<R: Rng + ?Sized>(&mut self, x: i64, rng: &mut R) -> Move<i64> {
        let next = if rng.gen::<f64>() < self.right_probability(x) {
            x + 1
        } else {
            x - 1
        };
        *self.visits.entry(next).or_insert(0) += 1;
        Move::To(next)
    }
}

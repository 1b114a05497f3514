//! Random walks on 1D and 2D lattices
//!
//! Every walk variant is a [`MoveRule`]: it picks a start site at the
//! beginning of each trial and then produces the next site from the current
//! one. The trial loop, the displacement statistics and the
//! distinct-sites-visited bookkeeping are shared by all variants.

pub mod exact;
pub mod one_d;
pub mod traps;
pub mod two_d;

pub use one_d::{
    AbsorbingWalk1D, PersistentWalk1D, RandomTrapWalk1D, ReflectingWalk1D, SimpleWalk1D,
    TrueSelfAvoidingWalk1D,
};
pub use traps::TrapLattice;
pub use two_d::{SelfAvoidingWalk2D, SimpleWalk2D, Site2D};

use itertools::izip;
use nalgebra::Vector2;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// A lattice site a walker can occupy
pub trait Site: Copy + Eq + Hash + Debug {
    /// Number of spatial axes
    const DIM: usize;

    /// Cartesian coordinate along `axis` (0-based, `axis < DIM`)
    fn coordinate(&self, axis: usize) -> f64;

    /// Integer coordinates, one per axis
    fn coordinates(&self) -> Vec<i64>;
}

impl Site for i64 {
    const DIM: usize = 1;

    fn coordinate(&self, _axis: usize) -> f64 {
        *self as f64
    }

    fn coordinates(&self) -> Vec<i64> {
        vec![*self]
    }
}

impl Site for Vector2<i64> {
    const DIM: usize = 2;

    fn coordinate(&self, axis: usize) -> f64 {
        self[axis] as f64
    }

    fn coordinates(&self) -> Vec<i64> {
        vec![self.x, self.y]
    }
}

/// Outcome of one local move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move<S> {
    /// The walker moves to this site
    To(S),
    /// No admissible move exists; the walker stays where it is
    Stuck,
}

/// Local update rule of a walk variant
pub trait MoveRule {
    type Site: Site;

    /// Reset any per-trial state and return the starting site
    fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Self::Site;

    /// Propose the next site from `current`
    fn step<R: Rng + ?Sized>(&mut self, current: Self::Site, rng: &mut R) -> Move<Self::Site>;

    /// Whether a walker on `site` is absorbed and stops moving
    fn is_absorbing(&self, _site: Self::Site) -> bool {
        false
    }
}

/// Sites occupied during one trial, including the start
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<S> {
    /// `sites[n]` is the position after `n` steps, length `nsteps + 1`
    pub sites: Vec<S>,
    /// Steps taken before landing on an absorbing site (`nsteps` if never absorbed)
    pub lifetime: usize,
    /// First step at which the rule reported [`Move::Stuck`]
    pub stuck_at: Option<usize>,
}

impl<S: Site> Trajectory<S> {
    pub fn final_site(&self) -> S {
        self.sites[self.sites.len() - 1]
    }

    /// Cumulative number of distinct sites visited after each step
    pub fn distinct_site_counts(&self) -> Vec<usize> {
        let mut seen = HashSet::with_capacity(self.sites.len());
        self.sites
            .iter()
            .map(|site| {
                seen.insert(*site);
                seen.len()
            })
            .collect()
    }
}

/// Run a single trial of `nsteps` moves.
///
/// Once the walker sits on an absorbing site it is not moved again and its
/// position is repeated for the remaining steps. A stuck walker also keeps
/// its position, but the rule is still consulted on later steps.
pub fn walk_trial<M, R>(rule: &mut M, nsteps: usize, rng: &mut R) -> Trajectory<M::Site>
where
    M: MoveRule,
    R: Rng + ?Sized,
{
    let mut current = rule.start(rng);
    let mut sites = Vec::with_capacity(nsteps + 1);
    sites.push(current);

    let mut lifetime = nsteps;
    let mut stuck_at = None;

    for n in 0..nsteps {
        if rule.is_absorbing(current) {
            if lifetime == nsteps {
                lifetime = n;
            }
        } else {
            match rule.step(current, rng) {
                Move::To(next) => current = next,
                Move::Stuck => {
                    stuck_at.get_or_insert(n);
                }
            }
        }
        sites.push(current);
    }

    Trajectory {
        sites,
        lifetime,
        stuck_at,
    }
}

/// Ensemble statistics of independent trials
#[derive(Debug, Clone)]
pub struct WalkStatistics<S> {
    pub nsteps: usize,
    pub ntrials: usize,
    /// Number of trials ending at each site
    pub final_sites: HashMap<S, usize>,
    /// `mean[axis][n]`: average coordinate after `n` steps
    pub mean: Vec<Vec<f64>>,
    /// `mean_square[axis][n]`: average squared coordinate after `n` steps
    pub mean_square: Vec<Vec<f64>>,
    /// Fraction of trials not absorbed after `n` steps
    pub survival: Vec<f64>,
    /// Steps survived by each trial
    pub lifetimes: Vec<usize>,
    /// Trials in which the walker got stuck at least once
    pub stuck_trials: usize,
}

impl<S: Site> WalkStatistics<S> {
    fn new(nsteps: usize, ntrials: usize) -> Self {
        Self {
            nsteps,
            ntrials,
            final_sites: HashMap::new(),
            mean: vec![vec![0.0; nsteps + 1]; S::DIM],
            mean_square: vec![vec![0.0; nsteps + 1]; S::DIM],
            survival: vec![0.0; nsteps + 1],
            lifetimes: Vec::with_capacity(ntrials),
            stuck_trials: 0,
        }
    }

    fn accumulate<M: MoveRule<Site = S>>(&mut self, rule: &M, trajectory: &Trajectory<S>) {
        for (n, site) in trajectory.sites.iter().enumerate() {
            for axis in 0..S::DIM {
                let x = site.coordinate(axis);
                self.mean[axis][n] += x;
                self.mean_square[axis][n] += x * x;
            }
            if !rule.is_absorbing(*site) {
                self.survival[n] += 1.0;
            }
        }

        *self.final_sites.entry(trajectory.final_site()).or_insert(0) += 1;
        self.lifetimes.push(trajectory.lifetime);
        if trajectory.stuck_at.is_some() {
            self.stuck_trials += 1;
        }
    }

    fn normalize(&mut self) {
        if self.ntrials == 0 {
            return;
        }
        let n = self.ntrials as f64;
        for series in self
            .mean
            .iter_mut()
            .chain(self.mean_square.iter_mut())
            .chain(std::iter::once(&mut self.survival))
        {
            series.iter_mut().for_each(|v| *v /= n);
        }
    }

    /// Displacement variance `<x^2> - <x>^2` along `axis` after each step
    pub fn variance(&self, axis: usize) -> Vec<f64> {
        izip!(&self.mean[axis], &self.mean_square[axis])
            .map(|(m, m2)| m2 - m * m)
            .collect()
    }

    /// Variance summed over all axes after each step
    pub fn total_variance(&self) -> Vec<f64> {
        (0..S::DIM).fold(vec![0.0; self.nsteps + 1], |mut acc, axis| {
            for (a, v) in acc.iter_mut().zip(self.variance(axis)) {
                *a += v;
            }
            acc
        })
    }

    /// Mean squared distance from the origin after each step
    pub fn mean_squared_displacement(&self) -> Vec<f64> {
        (0..self.nsteps + 1)
            .map(|n| self.mean_square.iter().map(|axis| axis[n]).sum())
            .collect()
    }

    /// Average number of steps survived (mean first-passage time for absorbing walks)
    pub fn mean_lifetime(&self) -> f64 {
        if self.lifetimes.is_empty() {
            return 0.0;
        }
        self.lifetimes.iter().sum::<usize>() as f64 / self.lifetimes.len() as f64
    }

    /// Fraction of trials that ended on `site`
    pub fn final_site_fraction(&self, site: &S) -> f64 {
        if self.ntrials == 0 {
            return 0.0;
        }
        self.final_sites.get(site).copied().unwrap_or(0) as f64 / self.ntrials as f64
    }
}

/// Run `ntrials` independent trials of `nsteps` moves each
pub fn run_trials<M, R>(
    rule: &mut M,
    nsteps: usize,
    ntrials: usize,
    rng: &mut R,
) -> WalkStatistics<M::Site>
where
    M: MoveRule,
    R: Rng + ?Sized,
{
    let mut stats = WalkStatistics::new(nsteps, ntrials);
    for _ in 0..ntrials {
        let trajectory = walk_trial(rule, nsteps, rng);
        stats.accumulate(rule, &trajectory);
    }
    stats.normalize();
    stats
}

/// Distinct sites visited after each step of a single trial (starts at 1)
pub fn sites_visited<M, R>(rule: &mut M, nsteps: usize, rng: &mut R) -> Vec<usize>
where
    M: MoveRule,
    R: Rng + ?Sized,
{
    walk_trial(rule, nsteps, rng).distinct_site_counts()
}

/// Distinct-sites-visited curve averaged over `ntrials` trials
pub fn average_sites_visited<M, R>(
    rule: &mut M,
    nsteps: usize,
    ntrials: usize,
    rng: &mut R,
) -> Vec<f64>
where
    M: MoveRule,
    R: Rng + ?Sized,
{
    let mut mean = vec![0.0; nsteps + 1];
    for _ in 0..ntrials {
        for (acc, count) in mean.iter_mut().zip(sites_visited(rule, nsteps, rng)) {
            *acc += count as f64;
        }
    }
    if ntrials > 0 {
        mean.iter_mut().for_each(|v| *v /= ntrials as f64);
    }
    mean
}

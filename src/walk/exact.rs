//! Closed-form results for the simple 1D walk

use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Exact probability P(x, n) of ending at displacement `x` after `n` unit steps.
///
/// With `k` right steps the displacement is `x = 2k - n`, so
/// `P(x, n) = C(n, k) p^k (1-p)^(n-k)`. Only reachable `x` are present.
pub fn binomial_distribution(nsteps: u32, p: f64) -> BTreeMap<i64, f64> {
    let n = nsteps as i64;
    let mut coefficient = 1.0;
    let mut distribution = BTreeMap::new();

    for k in 0..=n {
        if k > 0 {
            coefficient *= (n - k + 1) as f64 / k as f64;
        }
        let prob = coefficient * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32);
        distribution.insert(2 * k - n, prob);
    }

    distribution
}

/// Large-`n` Gaussian approximation of P(x, n).
///
/// Mean `n (2p - 1)` and variance `4 n p (1 - p)`. Since a ±1 walk only
/// reaches every other site, `spacing = 2` makes the density comparable to
/// the lattice probabilities of [`binomial_distribution`].
pub fn gaussian_approximation(nsteps: u32, p: f64, x: i64, spacing: f64) -> f64 {
    let n = nsteps as f64;
    let mean = n * (2.0 * p - 1.0);
    let variance = 4.0 * n * p * (1.0 - p);
    let dx = x as f64 - mean;
    spacing / (2.0 * PI * variance).sqrt() * (-dx * dx / (2.0 * variance)).exp()
}

/// Every equally likely symmetric walk of a given length
#[derive(Debug, Clone, PartialEq)]
pub struct ExactEnumeration {
    /// End point of each of the 2^n walks, sorted
    pub endpoints: Vec<i64>,
    /// <x>
    pub mean: f64,
    /// <x^2>
    pub mean_square: f64,
}

/// Enumerate all 2^n walks of `nsteps` steps at p = 1/2.
///
/// Each bit of the walk index is one step (set = right). Only sensible for
/// small `nsteps`; panics if `nsteps >= 64`.
pub fn exact_enumeration(nsteps: u32) -> ExactEnumeration {
    assert!(
        nsteps < u64::BITS,
        "exact enumeration needs nsteps < 64, got {}",
        nsteps
    );
    let n = nsteps as i64;
    let mut endpoints: Vec<i64> = (0..1u64 << nsteps)
        .map(|walk| 2 * walk.count_ones() as i64 - n)
        .collect();
    endpoints.sort_unstable();

    let total = endpoints.len() as f64;
    let mean = endpoints.iter().sum::<i64>() as f64 / total;
    let mean_square = endpoints.iter().map(|x| (x * x) as f64).sum::<f64>() / total;

    ExactEnumeration {
        endpoints,
        mean,
        mean_square,
    }
}

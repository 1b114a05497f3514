use super::*;
use approx::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_ising_creation() {
    let ising = IsingModel2D::seeded(10, 2.0, 1);
    assert_eq!(ising.size(), 10);
    assert_eq!(ising.n_sites(), 100);
    assert_eq!(ising.temperature(), 2.0);
    assert_eq!(ising.step, 0);
    assert_eq!(ising.energy(), ising.recomputed_energy());
    assert_eq!(ising.magnetization(), ising.recomputed_magnetization());
}

#[test]
fn test_ordered_state() {
    let ising = IsingModel2D::ordered_with_rng(5, 1.0, rng(0));
    assert_eq!(ising.magnetization_per_site(), 1.0);
    assert_relative_eq!(ising.energy_per_site(), -2.0, epsilon = 1e-10);
}

#[test]
fn test_flip_delta_in_ordered_state() {
    let ising = IsingModel2D::ordered_with_rng(4, 1.0, rng(0));
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(ising.flip_delta(i, j), 8);
        }
    }
}

#[test]
fn test_each_accepted_flip_updates_energy_and_magnetization_exactly() {
    // Hot enough that most uphill moves are accepted too
    let mut ising = IsingModel2D::seeded(6, 5.0, 3);
    let mut picker = rng(4);
    let mut accepted = 0;

    for _ in 0..5_000 {
        let i = picker.gen_range(0..6);
        let j = picker.gen_range(0..6);
        let e0 = ising.energy();
        let m0 = ising.magnetization();
        let expected = ising.flip_delta(i, j);

        match ising.attempt_flip(i, j) {
            Some(de) => {
                accepted += 1;
                assert_eq!(de, expected);
                assert_eq!(ising.energy() - e0, de as i64);
                let new_spin = ising.lattice().get(i, j) as i64;
                assert_eq!(ising.magnetization() - m0, 2 * new_spin);
                assert_eq!(ising.recomputed_energy(), ising.energy());
            }
            None => {
                assert!(expected > 0);
                assert_eq!(ising.energy(), e0);
                assert_eq!(ising.magnetization(), m0);
            }
        }
    }

    assert!(accepted > 0);
    assert_eq!(ising.stats.attempts, 5_000);
    assert_eq!(ising.stats.accepted, accepted);
}

#[test]
fn test_downhill_flips_always_accepted() {
    // Single spin against four aligned neighbours at very low temperature
    let mut lattice = SpinLattice::ordered(3);
    lattice.flip(1, 1);
    let mut ising = IsingModel2D::from_lattice(lattice, 1e-3, rng(5));

    assert_eq!(ising.flip_delta(1, 1), -8);
    assert_eq!(ising.attempt_flip(1, 1), Some(-8));
    assert_eq!(ising.magnetization(), 9);
    assert_eq!(ising.energy(), -18);

    // Uphill moves are essentially never accepted at T -> 0
    for _ in 0..100 {
        assert_eq!(ising.attempt_flip(0, 0), None);
    }
}

#[test]
fn test_sweep_keeps_running_values_in_sync() {
    for &t in &[0.5, 1.5, 2.269, 3.0, 10.0] {
        let mut ising = IsingModel2D::seeded(8, t, 42);
        for _ in 0..50 {
            let (e, m) = ising.metropolis_sweep();
            assert_eq!(e, ising.recomputed_energy());
            assert_eq!(m, ising.recomputed_magnetization());
        }
        assert_eq!(ising.step, 50);
        assert_eq!(ising.stats.attempts, 50 * 64);
    }
}

#[test]
fn test_sweep_preserves_spin_alphabet() {
    let mut ising = IsingModel2D::seeded(7, 2.0, 9);
    for _ in 0..20 {
        ising.metropolis_sweep();
    }
    assert!(ising.lattice().spins().iter().all(|&s| s == 1 || s == -1));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut a = IsingModel2D::seeded(6, 2.0, 77);
    let mut b = IsingModel2D::seeded(6, 2.0, 77);
    for _ in 0..10 {
        assert_eq!(a.metropolis_sweep(), b.metropolis_sweep());
    }
    assert_eq!(a.lattice(), b.lattice());
}

#[test]
fn test_set_temperature_rebuilds_table() {
    let mut ising = IsingModel2D::seeded(4, 1.0, 0);
    ising.set_temperature(4.0);
    assert_eq!(ising.temperature(), 4.0);
    assert_relative_eq!(
        ising.transition_table().acceptance(4),
        (-1.0f64).exp(),
        max_relative = 1e-14
    );
}

#[test]
fn test_low_temperature_orders() {
    let mut ising = IsingModel2D::ordered_with_rng(10, 1.0, rng(8));
    let obs = mc_sweeps(&mut ising, 100, 200);
    let thermo = obs.thermodynamics(1.0, ising.n_sites());
    assert!(thermo.abs_magnetization > 0.95);
    assert!(thermo.energy < -1.9);
}

#[test]
fn test_high_temperature_disorders() {
    let mut ising = IsingModel2D::seeded(16, 10.0, 12);
    let obs = mc_sweeps(&mut ising, 100, 400);
    let thermo = obs.thermodynamics(10.0, ising.n_sites());
    assert!(thermo.abs_magnetization < 0.2);
    assert!(thermo.energy > -0.5);
}

#[test]
fn test_driver_returns_finite_moments() {
    let nsteps = 100;
    let mut ising = IsingModel2D::seeded(5, 2.0, 2024);
    let obs = mc_sweeps(&mut ising, 10, nsteps);

    let values = obs.as_array();
    assert_eq!(values.len(), 6);
    assert!(values.iter().all(|v| v.is_finite()));
    assert_eq!(obs.samples, nsteps as u64);
    assert_eq!(ising.step, 110);

    let n = nsteps as f64;
    let [e, e2, m, m2, abs_m, m4] = values;
    // Cauchy-Schwarz: (sum x)^2 <= n sum x^2
    assert!(e * e <= n * e2 + 1e-6);
    assert!(m * m <= n * m2 + 1e-6);
    assert!(abs_m * abs_m <= n * m2 + 1e-6);
    assert!(m2 * m2 <= n * m4 + 1e-6);
    assert!(m.abs() <= abs_m);
    // |M| <= N and |E| <= 2N per sample
    assert!(abs_m <= n * 25.0);
    assert!(e.abs() <= n * 50.0);
}

#[test]
fn test_driver_resets_between_runs() {
    let mut ising = IsingModel2D::seeded(4, 2.0, 5);
    let first = mc_sweeps(&mut ising, 0, 5);
    let second = mc_sweeps(&mut ising, 0, 5);
    assert_eq!(first.samples, 5);
    assert_eq!(second.samples, 5);
}

#[test]
fn test_zero_measurement_sweeps() {
    let mut ising = IsingModel2D::seeded(4, 2.0, 5);
    let obs = mc_sweeps(&mut ising, 3, 0);
    assert_eq!(obs, Observables::default());
    assert_eq!(ising.step, 3);
}

#[test]
fn test_temperature_scan_is_reproducible() {
    let temps = [1.5, 2.269, 3.5];
    let a = temperature_scan(6, &temps, 20, 50, &mut rng(99));
    let b = temperature_scan(6, &temps, 20, 50, &mut rng(99));
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
    for (point, &t) in a.iter().zip(temps.iter()) {
        assert_eq!(point.temperature, t);
        assert_eq!(point.observables.samples, 50);
        assert!(point.acceptance_rate >= 0.0 && point.acceptance_rate <= 1.0);
    }
    // Acceptance grows with temperature
    assert!(a[0].acceptance_rate < a[2].acceptance_rate);
}

#[test]
fn test_two_by_two_lattice_double_bonds() {
    // L = 2: next and prev coincide, so every pair of neighbours shares two bonds
    let mut ising = IsingModel2D::ordered_with_rng(2, 2.0, rng(1));
    assert_eq!(ising.energy(), -8);
    assert_eq!(ising.flip_delta(0, 0), 8);
    for _ in 0..200 {
        let (e, m) = ising.metropolis_sweep();
        assert_eq!(e, ising.recomputed_energy());
        assert_eq!(m, ising.recomputed_magnetization());
    }
}

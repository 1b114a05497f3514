//! End-to-end runs driven by the example YAML configuration

use monte_carlo::app::simulate;
use monte_carlo::config::{Config, WalkModelConfig};
use std::path::PathBuf;

fn example_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("example")
        .join(filename)
}

/// The example configuration, shrunk so the test stays fast
fn small_example() -> Config {
    let mut config = Config::from_file(example_path("monte_carlo.yaml")).unwrap();
    if let Some(ising) = config.ising.as_mut() {
        ising.size = 6;
        ising.warmup_sweeps = 200;
        ising.measurement_sweeps = 200;
    }
    for walk in &mut config.walks {
        walk.trials = walk.trials.min(100);
    }
    config
}

#[test]
fn test_example_config_loads() {
    let config = Config::from_file(example_path("monte_carlo.yaml")).unwrap();
    assert_eq!(config.seed, Some(2024));
    assert_eq!(config.ising.as_ref().unwrap().temperatures.len(), 5);
    assert_eq!(config.walks.len(), 9);
    assert!(config
        .walks
        .iter()
        .any(|w| w.model == WalkModelConfig::SelfAvoiding2D));
}

#[test]
fn test_example_run() {
    let config = small_example();
    let report = simulate(&config);
    assert_eq!(report.seed, 2024);

    let ising = report.ising.as_ref().unwrap();
    assert_eq!(ising.points.len(), 5);
    for point in &ising.points {
        let t = &point.thermodynamics;
        assert!(t.energy >= -2.0 && t.energy <= 0.0);
        assert!(t.abs_magnetization >= 0.0 && t.abs_magnetization <= 1.0);
        assert!(t.specific_heat >= 0.0);
    }
    // Ordered well below T_c, disordered well above
    assert!(
        ising.points[0].thermodynamics.abs_magnetization
            > ising.points[4].thermodynamics.abs_magnetization
    );

    assert_eq!(report.walks.len(), config.walks.len());
    for (summary, walk) in report.walks.iter().zip(&config.walks) {
        assert_eq!(summary.name, walk.name);
        assert_eq!(summary.survival.len(), walk.steps + 1);
        assert_eq!(summary.distinct_sites[0], 1.0);
        let total: f64 = summary.final_sites.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    let restricted = report.walks.iter().find(|w| w.name == "restricted").unwrap();
    assert!(restricted.origin_absorption.is_some());
    assert!(restricted
        .final_sites
        .iter()
        .all(|s| s.site[0] == 0 || s.site[0] == 20));
}

#[test]
fn test_results_file() {
    let config = small_example();
    let report = simulate(&config);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.yaml");
    monte_carlo::io::write_results(&path, &report).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_yml::Value = serde_yml::from_str(&text).unwrap();
    assert_eq!(value["seed"].as_u64(), Some(2024));
    assert_eq!(value["walks"].as_sequence().unwrap().len(), 9);
}

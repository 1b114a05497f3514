use crate::config::{WalkConfig, WalkModelConfig};
use crate::io::print_scan_table;
use crate::ising::Thermodynamics;
use crate::walk::{Site, WalkStatistics};
use color_eyre::eyre::Result;
use serde::Serialize;
use tracing::info;

/// Everything a run produced, written with `--results`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Seed that reproduces this run
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ising: Option<IsingReport>,
    pub walks: Vec<WalkSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IsingReport {
    pub size: usize,
    pub warmup_sweeps: usize,
    pub measurement_sweeps: usize,
    pub critical_temperature: f64,
    pub points: Vec<IsingPoint>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IsingPoint {
    #[serde(flatten)]
    pub thermodynamics: Thermodynamics,
    pub acceptance_rate: f64,
}

/// Fraction of trials ending at a site, given by its coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalSite {
    pub site: Vec<i64>,
    pub fraction: f64,
}

/// Ensemble results of one walk experiment
#[derive(Debug, Clone, Serialize)]
pub struct WalkSummary {
    pub name: String,
    pub model: WalkModelConfig,
    pub steps: usize,
    pub trials: usize,
    /// Mean coordinate per axis after the last step
    pub final_mean: Vec<f64>,
    /// Coordinate variance per axis after the last step
    pub final_variance: Vec<f64>,
    pub mean_squared_displacement: Vec<f64>,
    pub survival: Vec<f64>,
    pub mean_lifetime: f64,
    pub stuck_trials: usize,
    /// Average number of distinct sites visited after each step
    pub distinct_sites: Vec<f64>,
    /// Sorted by site
    pub final_sites: Vec<FinalSite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_absorption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_final_sites: Option<Vec<FinalSite>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_survival: Option<Vec<f64>>,
}

impl WalkSummary {
    pub fn from_statistics<S: Site>(walk: &WalkConfig, stats: &WalkStatistics<S>) -> Self {
        let last = stats.nsteps;

        let mut final_sites: Vec<FinalSite> = stats
            .final_sites
            .keys()
            .map(|site| FinalSite {
                site: site.coordinates(),
                fraction: stats.final_site_fraction(site),
            })
            .collect();
        final_sites.sort_by(|a, b| a.site.cmp(&b.site));

        WalkSummary {
            name: walk.name.clone(),
            model: walk.model.clone(),
            steps: walk.steps,
            trials: walk.trials,
            final_mean: stats.mean.iter().map(|axis| axis[last]).collect(),
            final_variance: (0..S::DIM).map(|axis| stats.variance(axis)[last]).collect(),
            mean_squared_displacement: stats.mean_squared_displacement(),
            survival: stats.survival.clone(),
            mean_lifetime: stats.mean_lifetime(),
            stuck_trials: stats.stuck_trials,
            distinct_sites: Vec::new(),
            final_sites,
            origin_absorption: None,
            exact_final_sites: None,
            exact_survival: None,
        }
    }
}

pub fn report_ising_summary(report: &IsingReport) -> Result<()> {
    info!(
        "\nIsing scan finished on a {}x{} lattice (exact T_c = {:.4})",
        report.size, report.size, report.critical_temperature
    );

    let rows: Vec<Thermodynamics> = report.points.iter().map(|p| p.thermodynamics).collect();
    let mut table = Vec::new();
    print_scan_table(&mut table, &rows)?;
    for line in String::from_utf8_lossy(&table).lines() {
        info!("  {}", line);
    }

    for point in &report.points {
        info!(
            "  T = {:.4}: acceptance rate {:.4}",
            point.thermodynamics.temperature, point.acceptance_rate
        );
    }
    Ok(())
}

pub fn report_walk_summary(summary: &WalkSummary) {
    let last = summary.steps;

    info!("\nWalk '{}' ({:?}) finished.", summary.name, summary.model);
    info!("  <x> after {} steps: {:?}", last, summary.final_mean);
    info!("  variance after {} steps: {:?}", last, summary.final_variance);
    info!(
        "  <r^2> after {} steps: {:.4}",
        last, summary.mean_squared_displacement[last]
    );
    info!(
        "  distinct sites visited: {:.4}",
        summary.distinct_sites.last().copied().unwrap_or(0.0)
    );
    info!(
        "  survival: {:.4}, mean lifetime: {:.4}",
        summary.survival[last], summary.mean_lifetime
    );

    if summary.stuck_trials > 0 {
        info!(
            "  {} of {} trials got stuck",
            summary.stuck_trials, summary.trials
        );
    }
    if let Some(origin) = summary.origin_absorption {
        info!("  absorbed at the origin: {:.4}", origin);
    }
    if let Some(exact) = &summary.exact_survival {
        info!("  exact survival (trap average): {:.4}", exact[last]);
    }
    if let Some(exact) = &summary.exact_final_sites {
        let max_deviation: f64 = summary
            .final_sites
            .iter()
            .filter_map(|s| {
                exact
                    .iter()
                    .find(|e| e.site == s.site)
                    .map(|e| (s.fraction - e.fraction).abs())
            })
            .fold(0.0, f64::max);
        info!("  max deviation from binomial: {:.4}", max_deviation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::{run_trials, SimpleWalk2D};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_summary_from_statistics() {
        let walk = WalkConfig {
            name: "plane".to_string(),
            steps: 3,
            trials: 50,
            model: WalkModelConfig::Simple2D,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let stats = run_trials(&mut SimpleWalk2D, 3, 50, &mut rng);
        let summary = WalkSummary::from_statistics(&walk, &stats);

        assert_eq!(summary.final_mean.len(), 2);
        assert_eq!(summary.final_variance.len(), 2);
        assert_eq!(summary.survival, vec![1.0; 4]);
        assert_eq!(summary.mean_lifetime, 3.0);
        for pair in summary.final_sites.windows(2) {
            assert!(pair[0].site < pair[1].site);
        }
        // Three unit steps always end at odd Manhattan distance
        for s in &summary.final_sites {
            assert_eq!((s.site[0].abs() + s.site[1].abs()) % 2, 1);
        }
    }

    #[test]
    fn test_report_serializes() {
        let report = RunReport {
            seed: 3,
            ising: None,
            walks: Vec::new(),
        };
        let text = serde_yml::to_string(&report).unwrap();
        assert!(text.contains("seed: 3"));
        assert!(!text.contains("ising"));
    }
}

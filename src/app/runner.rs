use crate::app::report::{FinalSite, IsingPoint, IsingReport, WalkSummary};
use crate::config::{IsingConfig, WalkConfig, WalkModelConfig};
use crate::ising::{critical_temperature, temperature_scan};
use crate::walk::exact::binomial_distribution;
use crate::walk::traps::average_survival_probability;
use crate::walk::{
    average_sites_visited, run_trials, AbsorbingWalk1D, MoveRule, PersistentWalk1D,
    RandomTrapWalk1D, ReflectingWalk1D, SelfAvoidingWalk2D, SimpleWalk1D, SimpleWalk2D,
    TrueSelfAvoidingWalk1D,
};
use rand::Rng;
use tracing::info;

/// Longest walk for which the exact binomial end-point distribution is reported
const EXACT_DISTRIBUTION_MAX_STEPS: usize = 200;

pub fn run_ising<R: Rng + ?Sized>(config: &IsingConfig, rng: &mut R) -> IsingReport {
    let points = temperature_scan(
        config.size,
        &config.temperatures,
        config.warmup_sweeps,
        config.measurement_sweeps,
        rng,
    );
    let n_sites = config.size * config.size;

    IsingReport {
        size: config.size,
        warmup_sweeps: config.warmup_sweeps,
        measurement_sweeps: config.measurement_sweeps,
        critical_temperature: critical_temperature(),
        points: points
            .iter()
            .map(|point| IsingPoint {
                thermodynamics: point.observables.thermodynamics(point.temperature, n_sites),
                acceptance_rate: point.acceptance_rate,
            })
            .collect(),
    }
}

pub fn run_walk<R: Rng + ?Sized>(walk: &WalkConfig, rng: &mut R) -> WalkSummary {
    info!(
        "Running walk '{}': {} trials of {} steps",
        walk.name, walk.trials, walk.steps
    );

    match walk.model {
        WalkModelConfig::Simple1D { p } => {
            let mut summary = summarize(walk, &mut SimpleWalk1D::new(p), rng);
            if walk.steps <= EXACT_DISTRIBUTION_MAX_STEPS {
                let exact = binomial_distribution(walk.steps as u32, p)
                    .into_iter()
                    .map(|(x, fraction)| FinalSite {
                        site: vec![x],
                        fraction,
                    })
                    .collect();
                summary.exact_final_sites = Some(exact);
            }
            summary
        }
        WalkModelConfig::Persistent1D { p } => {
            summarize(walk, &mut PersistentWalk1D::new(p), rng)
        }
        WalkModelConfig::Reflecting1D { p, half_width } => {
            summarize(walk, &mut ReflectingWalk1D::new(p, half_width), rng)
        }
        WalkModelConfig::Absorbing1D { p, length } => {
            let mut rule = AbsorbingWalk1D::new(p, length);
            let stats = run_trials(&mut rule, walk.steps, walk.trials, rng);
            let mut summary = WalkSummary::from_statistics(walk, &stats);
            summary.origin_absorption = Some(AbsorbingWalk1D::origin_absorption_probability(&stats));
            summary.distinct_sites = average_sites_visited(&mut rule, walk.steps, walk.trials, rng);
            summary
        }
        WalkModelConfig::RandomTraps1D {
            p,
            trap_density,
            length,
        } => {
            let mut summary =
                summarize(walk, &mut RandomTrapWalk1D::new(p, trap_density, length), rng);
            summary.exact_survival = Some(average_survival_probability(
                length,
                trap_density,
                p,
                walk.steps,
                walk.trials,
                rng,
            ));
            summary
        }
        WalkModelConfig::TrueSelfAvoiding1D { g } => {
            summarize(walk, &mut TrueSelfAvoidingWalk1D::new(g), rng)
        }
        WalkModelConfig::Simple2D => summarize(walk, &mut SimpleWalk2D, rng),
        WalkModelConfig::SelfAvoiding2D => summarize(walk, &mut SelfAvoidingWalk2D::new(), rng),
    }
}

fn summarize<M, R>(walk: &WalkConfig, rule: &mut M, rng: &mut R) -> WalkSummary
where
    M: MoveRule,
    R: Rng + ?Sized,
{
    let stats = run_trials(rule, walk.steps, walk.trials, rng);
    let mut summary = WalkSummary::from_statistics(walk, &stats);
    summary.distinct_sites = average_sites_visited(rule, walk.steps, walk.trials, rng);
    summary
}

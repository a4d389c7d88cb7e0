use serde::Serialize;

use super::record::{ConstraintRecord, DemonRecord};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConstraintSummary {
    pub failures: i64,
    pub initial_propagation_micros: i64,
    pub demon_count: usize,
    pub demon_invocations: i64,
    pub total_demon_runtime_micros: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DemonSummary {
    pub invocations: i64,
    pub failures: i64,
    pub total_runtime_micros: i64,
    pub mean_micros: f64,
    pub median_micros: f64,
    pub stddev_micros: f64,
}

/// Reduces one demon's run list to its summary statistics. With no runs
/// every numeric field stays zero; there is never a division by zero.
pub fn compute_demon_summary(record: &DemonRecord) -> DemonSummary {
    let durations = record.durations();
    let mut summary = DemonSummary {
        invocations: durations.len() as i64,
        failures: record.failures,
        ..DemonSummary::default()
    };
    if durations.is_empty() {
        return summary;
    }

    summary.total_runtime_micros = durations.iter().sum();
    summary.mean_micros = summary.total_runtime_micros as f64 / durations.len() as f64;

    let mut sorted = durations;
    sorted.sort();
    let pivot = sorted.len() / 2;
    summary.median_micros = if sorted.len() % 2 == 1 {
        sorted[pivot] as f64
    } else {
        (sorted[pivot - 1] + sorted[pivot]) as f64 / 2.0
    };

    let total_deviation: f64 = sorted
        .iter()
        .map(|duration| (*duration as f64 - summary.mean_micros).powi(2))
        .sum();
    summary.stddev_micros = (total_deviation / sorted.len() as f64).sqrt();

    summary
}

/// Folds a constraint's own propagation phase and its owned demons into one
/// summary. Failures sum the constraint's flag with every demon's counter;
/// attribution keeps the two disjoint, so nothing is counted twice.
pub fn compute_constraint_summary<'a, I>(record: &ConstraintRecord, demons: I) -> ConstraintSummary
where
    I: Iterator<Item = &'a DemonRecord>,
{
    let mut summary = ConstraintSummary {
        failures: record.failed as i64,
        initial_propagation_micros: record.initial_propagation_micros(),
        ..ConstraintSummary::default()
    };
    for demon in demons {
        let durations = demon.durations();
        summary.demon_count += 1;
        summary.failures += demon.failures;
        summary.demon_invocations += durations.len() as i64;
        summary.total_demon_runtime_micros += durations.iter().sum::<i64>();
    }
    summary
}

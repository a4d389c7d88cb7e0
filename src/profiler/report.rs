use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::recorder::DemonMonitor;
use super::ProfileError;

/// Renders the gathered data as human-readable text: one block per
/// constraint, then one indented block per owned demon in registration
/// order.
pub fn render_overview(monitor: &DemonMonitor) -> String {
    let mut out = String::new();
    for constraint in monitor.constraint_records() {
        let summary = monitor.constraint_summary(&constraint.id);
        out.push_str(&format!(
            "  - Constraint: {}\n                failures={}, initial propagation runtime={} us, \
             demons={}, demon invocations={}, total demon runtime={} us\n",
            constraint.id,
            summary.failures,
            summary.initial_propagation_micros,
            summary.demon_count,
            summary.demon_invocations,
            summary.total_demon_runtime_micros,
        ));
        for demon_id in &constraint.demons {
            let demon = monitor.demon_summary(demon_id);
            out.push_str(&format!(
                "    - Demon: {}\n             invocations={}, failures={}, total runtime={} us, \
                 [average={:.2}, median={:.2}, stddev={:.2}]\n",
                demon_id,
                demon.invocations,
                demon.failures,
                demon.total_runtime_micros,
                demon.mean_micros,
                demon.median_micros,
                demon.stddev_micros,
            ));
        }
    }
    out
}

/// Writes the overview to a file sink. An unavailable sink is an operational
/// error: logged and returned, the profiling state stays queryable.
pub fn write_overview(monitor: &DemonMonitor, path: &Path) -> Result<(), ProfileError> {
    let mut file = File::create(path).map_err(|source| {
        tracing::warn!("failed to gain write access to {}: {}", path.display(), source);
        ProfileError::Sink {
            path: path.to_path_buf(),
            source,
        }
    })?;
    file.write_all(render_overview(monitor).as_bytes())
        .map_err(|source| {
            tracing::warn!("failed to write overview to {}: {}", path.display(), source);
            ProfileError::Sink {
                path: path.to_path_buf(),
                source,
            }
        })
}

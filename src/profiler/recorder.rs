use std::collections::HashMap;
use std::path::Path;

use super::clock::MicroClock;
use super::record::{ConstraintRecord, DemonRecord};
use super::report;
use super::stats::{
    compute_constraint_summary, compute_demon_summary, ConstraintSummary, DemonSummary,
};
use super::ProfileError;

/// Owns the profiling state for one solving session and gives access to the
/// gathered data after the end of a search.
///
/// The host engine drives it through paired begin/end calls: at most one
/// constraint is mid initial-propagation and at most one demon is mid-run at
/// any time (a demon run may be nested inside a constraint's initial
/// propagation, never inside another run). Mismatched calls are
/// instrumentation bugs and panic, see the module header.
#[derive(Debug)]
pub struct DemonMonitor {
    clock: MicroClock,
    active_constraint: Option<String>,
    active_demon: Option<String>,
    constraints: HashMap<String, ConstraintRecord>,
    demons: HashMap<String, DemonRecord>,
}

impl DemonMonitor {
    pub fn new() -> Self {
        Self {
            clock: MicroClock::new(),
            active_constraint: None,
            active_demon: None,
            constraints: HashMap::new(),
            demons: HashMap::new(),
        }
    }

    /// Microseconds elapsed since this monitor was created.
    pub fn current_time(&self) -> i64 {
        self.clock.elapsed_micros()
    }

    /// Opens a constraint's initial propagation phase. Re-registering a known
    /// constraint overwrites its timing (latest wins); the demons it owns
    /// stay bound to it.
    pub fn start_initial_propagation(&mut self, constraint_id: &str) {
        assert!(
            self.active_constraint.is_none() && self.active_demon.is_none(),
            "start_initial_propagation('{}'): another phase is still open",
            constraint_id
        );
        let now = self.current_time();
        let record = self
            .constraints
            .entry(constraint_id.to_string())
            .or_insert_with(|| ConstraintRecord::new(constraint_id, now));
        record.initial_propagation_start = now;
        record.initial_propagation_end = None;
        record.failed = false;
        self.active_constraint = Some(constraint_id.to_string());
    }

    /// Closes the active constraint's phase as successful.
    pub fn end_initial_propagation(&mut self, constraint_id: &str) {
        assert!(
            self.active_demon.is_none(),
            "end_initial_propagation('{}') with a demon run still open",
            constraint_id
        );
        match self.active_constraint.take() {
            Some(active) if active == constraint_id => {}
            other => panic!(
                "end_initial_propagation('{}') does not match the active constraint {:?}",
                constraint_id, other
            ),
        }
        let now = self.current_time();
        let record = self.constraint_mut(constraint_id);
        record.initial_propagation_end = Some(now);
        record.failed = false;
    }

    /// Binds a demon to the active constraint for the rest of the session.
    /// Already-known demons are left untouched.
    pub fn register_demon(&mut self, demon_id: &str) {
        if self.demons.contains_key(demon_id) {
            return;
        }
        assert!(
            self.active_demon.is_none(),
            "register_demon('{}') during a demon run",
            demon_id
        );
        let constraint_id = match &self.active_constraint {
            Some(id) => id.clone(),
            None => panic!("register_demon('{}') requires an active constraint", demon_id),
        };
        self.demons
            .insert(demon_id.to_string(), DemonRecord::new(demon_id));
        self.constraint_mut(&constraint_id)
            .demons
            .push(demon_id.to_string());
    }

    /// Opens a run of a registered demon.
    pub fn start_demon_run(&mut self, demon_id: &str) {
        assert!(
            self.active_demon.is_none(),
            "start_demon_run('{}') while demon {:?} is active",
            demon_id,
            self.active_demon
        );
        let now = self.current_time();
        self.demon_mut(demon_id).start_times.push(now);
        self.active_demon = Some(demon_id.to_string());
    }

    /// Closes the active demon's current run.
    pub fn end_demon_run(&mut self, demon_id: &str) {
        match self.active_demon.take() {
            Some(active) if active == demon_id => {}
            other => panic!(
                "end_demon_run('{}') does not match the active demon {:?}",
                demon_id, other
            ),
        }
        let now = self.current_time();
        self.demon_mut(demon_id).end_times.push(now);
    }

    /// Attributes a propagation failure to whatever was running when it was
    /// signaled. Exactly one of the two phases is charged per call; outside
    /// any tracked phase this is a no-op.
    pub fn raise_failure(&mut self) {
        let now = self.current_time();
        if let Some(demon_id) = self.active_demon.take() {
            // A demon was mid-run: close the run and charge the failure to it.
            let record = self.demon_mut(&demon_id);
            record.end_times.push(now);
            record.failures += 1;
        } else if let Some(constraint_id) = self.active_constraint.take() {
            // Initial propagation failed outright.
            let record = self.constraint_mut(&constraint_id);
            record.initial_propagation_end = Some(now);
            record.failed = true;
        }
    }

    /// Appends a run without going through the phase protocol. Unit-test and
    /// debugging path; the demon must already be registered.
    pub fn add_synthetic_run(&mut self, demon_id: &str, start: i64, end: i64, failed: bool) {
        let record = self.demon_mut(demon_id);
        record.start_times.push(start);
        record.end_times.push(end);
        if failed {
            record.failures += 1;
        }
    }

    pub fn constraint_summary(&self, constraint_id: &str) -> ConstraintSummary {
        let record = self.constraint(constraint_id);
        let demons = record.demons.iter().map(|id| self.demon(id));
        compute_constraint_summary(record, demons)
    }

    pub fn demon_summary(&self, demon_id: &str) -> DemonSummary {
        compute_demon_summary(self.demon(demon_id))
    }

    /// All constraint records. Map order: arbitrary but stable within one
    /// process run, no ordering contract.
    pub fn constraint_records(&self) -> impl Iterator<Item = &ConstraintRecord> {
        self.constraints.values()
    }

    pub fn render_report(&self) -> String {
        // Delegate to the pure rendering module
        report::render_overview(self)
    }

    pub fn write_report<P: AsRef<Path>>(&self, path: P) -> Result<(), ProfileError> {
        report::write_overview(self, path.as_ref())
    }

    /// Discards every record between independent searches.
    pub fn reset(&mut self) {
        assert!(
            self.active_constraint.is_none() && self.active_demon.is_none(),
            "reset while a phase is still open"
        );
        self.constraints.clear();
        self.demons.clear();
    }

    fn constraint(&self, constraint_id: &str) -> &ConstraintRecord {
        self.constraints
            .get(constraint_id)
            .unwrap_or_else(|| panic!("unknown constraint '{}'", constraint_id))
    }

    fn constraint_mut(&mut self, constraint_id: &str) -> &mut ConstraintRecord {
        self.constraints
            .get_mut(constraint_id)
            .unwrap_or_else(|| panic!("unknown constraint '{}'", constraint_id))
    }

    fn demon(&self, demon_id: &str) -> &DemonRecord {
        self.demons
            .get(demon_id)
            .unwrap_or_else(|| panic!("unknown demon '{}'", demon_id))
    }

    fn demon_mut(&mut self, demon_id: &str) -> &mut DemonRecord {
        self.demons
            .get_mut(demon_id)
            .unwrap_or_else(|| panic!("unknown demon '{}'", demon_id))
    }
}

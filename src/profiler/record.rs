/// Timing record for one profiled constraint.
#[derive(Debug, Clone)]
pub struct ConstraintRecord {
    pub id: String,
    pub initial_propagation_start: i64,
    pub initial_propagation_end: Option<i64>,
    pub failed: bool,
    /// Owned demons, in first-registration order.
    pub demons: Vec<String>,
}

impl ConstraintRecord {
    pub fn new(id: &str, start: i64) -> Self {
        Self {
            id: id.to_string(),
            initial_propagation_start: start,
            initial_propagation_end: None,
            failed: false,
            demons: Vec::new(),
        }
    }

    /// Duration of the initial propagation phase, zero while still open.
    pub fn initial_propagation_micros(&self) -> i64 {
        match self.initial_propagation_end {
            Some(end) => end - self.initial_propagation_start,
            None => 0,
        }
    }
}

/// Timing record for one profiled demon. Start and end lists are parallel;
/// every closed run contributes one entry to each.
#[derive(Debug, Clone)]
pub struct DemonRecord {
    pub id: String,
    pub start_times: Vec<i64>,
    pub end_times: Vec<i64>,
    pub failures: i64,
}

impl DemonRecord {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            start_times: Vec::new(),
            end_times: Vec::new(),
            failures: 0,
        }
    }

    /// Per-run durations. Aggregation must only happen while no run is open.
    pub fn durations(&self) -> Vec<i64> {
        assert_eq!(
            self.start_times.len(),
            self.end_times.len(),
            "demon '{}' still has an open run",
            self.id
        );
        self.start_times
            .iter()
            .zip(&self.end_times)
            .map(|(start, end)| end - start)
            .collect()
    }
}

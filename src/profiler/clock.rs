use std::time::Instant;

/// Microsecond clock anchored at monitor creation. Every recorded timestamp
/// is an offset from this origin.
#[derive(Debug, Clone, Copy)]
pub struct MicroClock {
    origin: Instant,
}

impl MicroClock {
    pub fn new() -> Self {
        MicroClock { origin: Instant::now() }
    }

    pub fn elapsed_micros(&self) -> i64 {
        self.origin.elapsed().as_micros() as i64
    }
}

pub mod demon;
pub mod profiler;

// Re-export the items a host engine touches on every call
pub use demon::{profile_initial_propagation, Demon, Fail, ProfiledDemon};
pub use profiler::recorder::DemonMonitor;
pub use profiler::{build_monitor, ProfileLevel};

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::profiler::recorder::DemonMonitor;

/// A propagation failure: some variable's domain was wiped out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("propagation failure")]
pub struct Fail;

/// The dispatch seam of the host engine: anything invokable with a stable
/// identity can be profiled.
pub trait Demon {
    /// Stable identity, unique per logical demon for the session.
    fn id(&self) -> String;

    /// One propagation step.
    fn run(&mut self) -> Result<(), Fail>;
}

/// Wraps a demon and adds profiling capability, tracking the usage and
/// performance of the wrapped demon. Construction registers it with the
/// monitor, so it must happen while the owning constraint's initial
/// propagation is active.
pub struct ProfiledDemon<D: Demon> {
    demon: D,
    monitor: Rc<RefCell<DemonMonitor>>,
}

impl<D: Demon> ProfiledDemon<D> {
    pub fn new(demon: D, monitor: Rc<RefCell<DemonMonitor>>) -> Self {
        monitor.borrow_mut().register_demon(&demon.id());
        Self { demon, monitor }
    }
}

impl<D: Demon> Demon for ProfiledDemon<D> {
    fn id(&self) -> String {
        format!("profiled<{}>", self.demon.id())
    }

    fn run(&mut self) -> Result<(), Fail> {
        let id = self.demon.id();
        self.monitor.borrow_mut().start_demon_run(&id);
        match self.demon.run() {
            Ok(()) => {
                self.monitor.borrow_mut().end_demon_run(&id);
                Ok(())
            }
            Err(fail) => {
                // A failing run is closed by the attribution path, not by
                // end_demon_run.
                self.monitor.borrow_mut().raise_failure();
                Err(fail)
            }
        }
    }
}

/// Brackets a constraint's first consistency pass. A failing body closes the
/// phase through the failure-attribution path and re-raises.
pub fn profile_initial_propagation<F>(
    monitor: &Rc<RefCell<DemonMonitor>>,
    constraint_id: &str,
    body: F,
) -> Result<(), Fail>
where
    F: FnOnce() -> Result<(), Fail>,
{
    monitor.borrow_mut().start_initial_propagation(constraint_id);
    match body() {
        Ok(()) => {
            monitor.borrow_mut().end_initial_propagation(constraint_id);
            Ok(())
        }
        Err(fail) => {
            monitor.borrow_mut().raise_failure();
            Err(fail)
        }
    }
}

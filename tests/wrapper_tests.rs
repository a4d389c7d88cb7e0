use std::cell::RefCell;
use std::rc::Rc;

use propscope::{profile_initial_propagation, Demon, DemonMonitor, Fail, ProfiledDemon};

// Minimal demon: succeeds until its fuse burns down, then fails.
struct FuseDemon {
    name: &'static str,
    fuse: u32,
    runs: u32,
}

impl FuseDemon {
    fn new(name: &'static str, fuse: u32) -> Self {
        Self { name, fuse, runs: 0 }
    }
}

impl Demon for FuseDemon {
    fn id(&self) -> String {
        self.name.to_string()
    }

    fn run(&mut self) -> Result<(), Fail> {
        self.runs += 1;
        if self.runs > self.fuse {
            return Err(Fail);
        }
        Ok(())
    }
}

fn shared_monitor() -> Rc<RefCell<DemonMonitor>> {
    Rc::new(RefCell::new(DemonMonitor::new()))
}

#[test]
fn wrapper_registers_and_brackets_runs() {
    let monitor = shared_monitor();

    let mut wrapped = None;
    profile_initial_propagation(&monitor, "C1", || {
        wrapped = Some(ProfiledDemon::new(FuseDemon::new("R1", 10), monitor.clone()));
        Ok(())
    })
    .expect("clean propagation");

    let wrapped = wrapped.as_mut().expect("built during propagation");
    wrapped.run().expect("first run");
    wrapped.run().expect("second run");

    let summary = monitor.borrow().demon_summary("R1");
    assert_eq!(summary.invocations, 2);
    assert_eq!(summary.failures, 0);
    assert_eq!(monitor.borrow().constraint_summary("C1").demon_count, 1);
}

#[test]
fn wrapper_id_decorates_the_inner_id() {
    let monitor = shared_monitor();
    monitor.borrow_mut().start_initial_propagation("C1");
    let wrapped = ProfiledDemon::new(FuseDemon::new("R1", 1), monitor.clone());
    monitor.borrow_mut().end_initial_propagation("C1");

    assert_eq!(wrapped.id(), "profiled<R1>");
}

#[test]
fn wrapper_charges_a_failing_run_to_the_demon() {
    let monitor = shared_monitor();

    let mut wrapped = None;
    profile_initial_propagation(&monitor, "C1", || {
        wrapped = Some(ProfiledDemon::new(FuseDemon::new("R1", 1), monitor.clone()));
        Ok(())
    })
    .expect("clean propagation");

    let wrapped = wrapped.as_mut().expect("built during propagation");
    wrapped.run().expect("within the fuse");
    assert_eq!(wrapped.run(), Err(Fail), "fuse burnt");

    let summary = monitor.borrow().demon_summary("R1");
    assert_eq!(summary.invocations, 2, "the failed run is closed and counted");
    assert_eq!(summary.failures, 1);

    // The latch was released by the failure, so the demon can fire again.
    assert_eq!(wrapped.run(), Err(Fail));
    assert_eq!(monitor.borrow().demon_summary("R1").failures, 2);
}

#[test]
fn failed_initial_propagation_marks_the_constraint() {
    let monitor = shared_monitor();

    let result = profile_initial_propagation(&monitor, "C1", || Err(Fail));
    assert_eq!(result, Err(Fail), "the failure is re-raised to the caller");

    let summary = monitor.borrow().constraint_summary("C1");
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.demon_count, 0);
}

#[test]
fn wrapper_is_reusable_across_propagations_of_its_constraint() {
    let monitor = shared_monitor();

    let mut wrapped = None;
    profile_initial_propagation(&monitor, "C1", || {
        wrapped = Some(ProfiledDemon::new(FuseDemon::new("R1", 10), monitor.clone()));
        Ok(())
    })
    .expect("clean propagation");
    let wrapped = wrapped.as_mut().expect("built during propagation");
    wrapped.run().expect("steady-state run");

    // Re-propagating the constraint re-registers the demon: a no-op.
    profile_initial_propagation(&monitor, "C1", || {
        monitor.borrow_mut().register_demon("R1");
        Ok(())
    })
    .expect("clean re-propagation");
    wrapped.run().expect("still wired to the same record");

    let summary = monitor.borrow().demon_summary("R1");
    assert_eq!(summary.invocations, 2);
    assert_eq!(monitor.borrow().constraint_summary("C1").demon_count, 1);
}

use propscope::DemonMonitor;

// One constraint with two demons and a known set of runs.
fn profiled_session() -> DemonMonitor {
    let mut monitor = DemonMonitor::new();
    monitor.start_initial_propagation("x < y");
    monitor.register_demon("var_bound(x)");
    monitor.register_demon("var_bound(y)");
    monitor.end_initial_propagation("x < y");

    // var_bound(x): durations 10, 20, 30
    monitor.add_synthetic_run("var_bound(x)", 0, 10, false);
    monitor.add_synthetic_run("var_bound(x)", 50, 70, false);
    monitor.add_synthetic_run("var_bound(x)", 90, 120, false);
    // var_bound(y): one failed run of 5
    monitor.add_synthetic_run("var_bound(y)", 130, 135, true);
    monitor
}

#[test]
fn report_lists_the_constraint_then_owned_demons_in_order() {
    let monitor = profiled_session();
    let report = monitor.render_report();

    let constraint_at = report.find("- Constraint: x < y").expect("constraint line");
    let first_demon_at = report.find("- Demon: var_bound(x)").expect("first demon line");
    let second_demon_at = report.find("- Demon: var_bound(y)").expect("second demon line");
    assert!(
        constraint_at < first_demon_at && first_demon_at < second_demon_at,
        "demons render under their owner in registration order"
    );

    assert!(report.contains("demons=2"));
    assert!(report.contains("demon invocations=4"));
    assert!(report.contains("total demon runtime=65 us"));
    assert!(report.contains("failures=1"));
}

#[test]
fn demon_line_carries_two_decimal_statistics() {
    let monitor = profiled_session();
    let report = monitor.render_report();

    // 10, 20, 30 -> mean 20, median 20, population stddev sqrt(200/3) ~ 8.16
    assert!(report.contains(
        "invocations=3, failures=0, total runtime=60 us, [average=20.00, median=20.00, stddev=8.16]"
    ));
    assert!(report.contains(
        "invocations=1, failures=1, total runtime=5 us, [average=5.00, median=5.00, stddev=0.00]"
    ));
}

#[test]
fn empty_monitor_renders_an_empty_report() {
    let monitor = DemonMonitor::new();
    assert!(monitor.render_report().is_empty());
}

#[test]
fn report_is_written_to_the_sink() {
    let monitor = profiled_session();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profile.txt");

    monitor.write_report(&path).expect("writable sink");

    let written = std::fs::read_to_string(&path).expect("readable report");
    assert_eq!(written, monitor.render_report());
}

#[test]
fn unavailable_sink_is_reported_not_fatal() {
    let monitor = profiled_session();
    let dir = tempfile::tempdir().expect("tempdir");
    // Parent directory does not exist, the sink cannot be opened.
    let path = dir.path().join("missing").join("profile.txt");

    let err = monitor.write_report(&path).expect_err("sink must be unavailable");
    assert!(err.to_string().contains("unavailable"));

    // Profiling state stays valid and queryable after the failed write.
    assert_eq!(monitor.demon_summary("var_bound(x)").invocations, 3);
    assert_eq!(monitor.constraint_summary("x < y").demon_count, 2);
}

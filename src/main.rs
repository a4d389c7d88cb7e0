use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use anyhow::Result;
use propscope::{build_monitor, profile_initial_propagation, Demon, Fail, ProfileLevel, ProfiledDemon};

/// Bounds-tightening demon standing in for real propagation work.
struct BoundsDemon {
    name: String,
    lower: i64,
    upper: i64,
    step: i64,
    checksum: i64,
}

impl BoundsDemon {
    fn new(name: &str, lower: i64, upper: i64, step: i64) -> Self {
        Self {
            name: name.to_string(),
            lower,
            upper,
            step,
            checksum: 0,
        }
    }
}

impl Demon for BoundsDemon {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn run(&mut self) -> Result<(), Fail> {
        self.lower += self.step;
        self.upper -= self.step;
        if self.lower > self.upper {
            // Interval collapsed: domain wipe-out
            return Err(Fail);
        }
        self.checksum += (self.lower..=self.upper).sum::<i64>();
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize logging/tracing
    tracing_subscriber::fmt::init();
    tracing::info!("propscope demo session starting");

    let report_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "propagation_profile.txt".to_string());

    let monitor = build_monitor(ProfileLevel::Normal)
        .ok_or_else(|| anyhow::anyhow!("profiling is switched off"))?;
    let monitor = Rc::new(RefCell::new(monitor));

    // 1. Post a constraint whose initial propagation succeeds and attaches
    //    two demons.
    let mut tighten_x = None;
    let mut tighten_y = None;
    let posted = profile_initial_propagation(&monitor, "x + y == 10", || {
        tighten_x = Some(ProfiledDemon::new(
            BoundsDemon::new("tighten(x)", 0, 12, 1),
            monitor.clone(),
        ));
        tighten_y = Some(ProfiledDemon::new(
            BoundsDemon::new("tighten(y)", 0, 6, 2),
            monitor.clone(),
        ));
        Ok(())
    });
    if posted.is_err() {
        tracing::warn!("initial propagation of x + y == 10 failed");
    }

    // 2. Fire the demons the way a search loop would, until one wipes out
    //    its interval.
    for demon in [tighten_x.as_mut(), tighten_y.as_mut()].into_iter().flatten() {
        loop {
            if demon.run().is_err() {
                tracing::info!("demon {} failed, the search would backtrack here", demon.id());
                break;
            }
        }
    }

    // 3. A constraint whose very first consistency pass fails.
    if profile_initial_propagation(&monitor, "alldiff(x, y, z)", || Err(Fail)).is_err() {
        tracing::warn!("initial propagation of alldiff(x, y, z) wiped out a domain");
    }

    // 4. Export the overview.
    let monitor = monitor.borrow();
    if let Err(err) = monitor.write_report(&report_path) {
        tracing::warn!("overview not exported: {}", err);
    } else {
        tracing::info!("overview written to {}", report_path);
    }
    print!("{}", monitor.render_report());

    // Machine-readable summaries for downstream tooling
    let machine = serde_json::json!({
        "x + y == 10": monitor.constraint_summary("x + y == 10"),
        "alldiff(x, y, z)": monitor.constraint_summary("alldiff(x, y, z)"),
        "tighten(y)": monitor.demon_summary("tighten(y)"),
    });
    println!("{}", serde_json::to_string_pretty(&machine)?);

    Ok(())
}

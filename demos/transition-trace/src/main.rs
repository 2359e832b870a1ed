//! Drives every lifecycle transition through a hooked value and reports what fired.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use clap::Parser;
use lifehooks::hooks::{CountingObserver, TransitionTally};
use lifehooks::prelude::*;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "transition-trace", about = "Trace lifecycle hook transitions")]
struct Cli {
    /// Transitions to trace, e.g. `copy_construct,destroy`, `all` or `none`.
    #[arg(long, default_value = "all")]
    trace: TransitionSet,

    /// Base log filter; defaults to `RUST_LOG`, then `info`.
    #[arg(long)]
    log_filter: Option<String>,

    /// Number of copies to make of the hooked value.
    #[arg(long, default_value_t = 2)]
    copies: usize,

    /// Print the transition tally as JSON.
    #[arg(long)]
    json: bool,
}

/// Forwards each transition to a tracing observer and a counter.
struct Tee {
    tracing: TracingObserver,
    counting: Arc<CountingObserver>,
}

impl TransitionObserver for Tee {
    fn on_transition(&self, kind: TransitionKind) {
        self.tracing.on_transition(kind);
        self.counting.on_transition(kind);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let telemetry = match &cli.log_filter {
        Some(directive) => TelemetryConfig::new(directive.clone()),
        None => TelemetryConfig::from_env("info"),
    };
    telemetry.trace_transitions(!cli.trace.is_empty()).init()?;

    let counting = CountingObserver::new();
    let observer = Arc::new(Tee {
        tracing: TracingObserver::with_kinds(cli.trace),
        counting: Arc::clone(&counting),
    });

    let _run = LifetimeHook::new(
        || info!(trace = %cli.trace, copies = cli.copies, "scenario started"),
        || info!("scenario finished"),
    );

    let fired = run_scenario(observer, cli.copies);
    let tally = counting.snapshot();
    report(&tally, fired, cli.json)?;
    Ok(())
}

/// Runs one of each transition kind, plus extra copies, and returns how many
/// user callbacks ran.
fn run_scenario(observer: Arc<dyn TransitionObserver>, copies: usize) -> usize {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut builder = TransitionHooks::builder().observer(Arc::clone(&observer));
    for kind in TransitionKind::ALL {
        let fired = Arc::clone(&fired);
        builder = builder.on(kind, move || {
            fired.fetch_add(1, Ordering::Relaxed);
            info!(transition = %kind, "user callback");
        });
    }

    let mut original = Instrumented::new(vec!["alpha".to_owned()], builder.build());
    original.push("beta".to_owned());

    let clones: Vec<_> = (0..copies).map(|_| original.clone()).collect();
    let mut moved = original.take();
    if let Some(first) = clones.first() {
        moved.clone_from(first);
    }
    let mut target = Instrumented::new(Vec::new(), TransitionHooks::with_observer(observer));
    target.move_assign(&mut moved);
    info!(items = ?*target, "final payload");

    drop((original, clones, moved, target));
    fired.load(Ordering::Relaxed)
}

fn report(tally: &TransitionTally, fired: usize, json: bool) -> Result<()> {
    if json {
        let body = serde_json::json!({
            "transitions": tally,
            "callbacks_fired": fired,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    for kind in TransitionKind::ALL {
        println!("{kind:<16} {}", tally.get(kind));
    }
    println!("{:<16} {fired}", "callbacks");
    Ok(())
}

//! meas demo clients.
//!
//! Usage: `meas-demo [loops|sorts|fib|all] [--config <path>]`
//! - loops: two counters driven by plain loops, counters report
//! - sorts: bubble sort vs heap sort on a reversed vector, timers report
//! - fib:   recursive vs iterative Fibonacci with call counters, full report
//!
//! Logs go to stderr, filtered by `RUST_LOG`.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use meas_core::error::Result;
use meas_session::{config, CounterId, Scope, Sections, Session, ValueFormat};

const LOOP1: u64 = 100;
const LOOP2: u64 = 50;
const SORT_SIZE: usize = 5_000;
const FIB_N: u32 = 27;

#[derive(Parser, Debug)]
#[clap(name = "meas-demo", about = "Exercise the measurement library and print its report")]
struct DemoOpts {
    /// Which client to run.
    #[clap(value_enum, default_value_t = Demo::All)]
    demo: Demo,
    /// YAML session config; built-in defaults when absent.
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    Loops,
    Sorts,
    Fib,
    All,
}

fn main() -> ExitCode {
    let opts = DemoOpts::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: DemoOpts) -> Result<()> {
    let cfg = match &opts.config {
        Some(path) => config::load_from_file(path)?,
        None => config::MeasConfig::default(),
    };

    let mut session = Session::with_config(cfg)?;
    let sections = match opts.demo {
        Demo::Loops => loops(&mut session)?,
        Demo::Sorts => sorts(&mut session)?,
        Demo::Fib => fib(&mut session)?,
        Demo::All => loops(&mut session)? | sorts(&mut session)? | fib(&mut session)?,
    };

    session.generate_report(sections)?;
    session.write_report(&mut io::stdout().lock())?;
    session.close();
    Ok(())
}

fn loops(session: &mut Session) -> Result<Sections> {
    let up = session.create_counter(0, "counter_loop1");
    for _ in 0..LOOP1 {
        session.increment(up)?;
    }

    let down = session.create_counter(LOOP2, "counter_loop2");
    for _ in 0..LOOP2 {
        session.decrement(down)?;
    }

    Ok(Sections::COUNTERS)
}

fn sorts(session: &mut Session) -> Result<Sections> {
    let mut v1 = reversed(SORT_SIZE);
    let mut v2 = reversed(SORT_SIZE);

    let t = session.start_timer("TIMER_BUBBLE");
    bubble_sort(&mut v1);
    session.stop_timer(t)?;

    let t = session.start_timer("TIMER_HEAP");
    heap_sort(&mut v2);
    session.stop_timer(t)?;

    Ok(Sections::TIMERS)
}

fn fib(session: &mut Session) -> Result<Sections> {
    let rec_calls = session.create_counter(0, "C_REC");
    let iter_steps = session.create_counter(0, "C_NONREC");

    let t = session.start_timer("T_REC");
    let v1 = fib_recursive(session, rec_calls, FIB_N)?;
    session.stop_timer(t)?;

    let t = session.start_timer("T_NONREC");
    let v2 = fib_iterative(session, iter_steps, FIB_N)?;
    session.stop_timer(t)?;

    session.add_report_item("REC_VALUE", ValueFormat::Decimal, v1 as i64);
    session.add_report_item("NONREC_VALUE", ValueFormat::Decimal, v2 as i64);

    let swaps = session.swaps(Scope::SelfProcess)?;
    session.add_report_item("N_SWAPS", ValueFormat::Decimal, swaps);
    let switches = session.context_switches(Scope::SelfProcess)?;
    session.add_report_item("N_CONTEXT_SWITCHES", ValueFormat::Decimal, switches);
    let rss = session.max_resident(Scope::SelfProcess)?;
    session.add_report_item("MAX_RSS_KB", ValueFormat::Decimal, rss);

    Ok(Sections::ALL)
}

fn fib_recursive(session: &mut Session, calls: CounterId, n: u32) -> Result<u64> {
    session.increment(calls)?;
    match n {
        0 => Ok(0),
        1 => Ok(1),
        _ => Ok(fib_recursive(session, calls, n - 1)? + fib_recursive(session, calls, n - 2)?),
    }
}

fn fib_iterative(session: &mut Session, steps: CounterId, n: u32) -> Result<u64> {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        session.increment(steps)?;
        (a, b) = (b, a + b);
    }
    Ok(a)
}

fn reversed(size: usize) -> Vec<i64> {
    (0..size as i64).rev().collect()
}

fn bubble_sort(v: &mut [i64]) {
    let n = v.len();
    for i in 0..n {
        for j in 0..n - 1 - i {
            if v[j] > v[j + 1] {
                v.swap(j, j + 1);
            }
        }
    }
}

fn heap_sort(v: &mut [i64]) {
    let n = v.len();
    for start in (0..n / 2).rev() {
        sift_down(v, start, n);
    }
    for end in (1..n).rev() {
        v.swap(0, end);
        sift_down(v, 0, end);
    }
}

fn sift_down(v: &mut [i64], mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && v[child] < v[child + 1] {
            child += 1;
        }
        if v[root] >= v[child] {
            break;
        }
        v.swap(root, child);
        root = child;
    }
}

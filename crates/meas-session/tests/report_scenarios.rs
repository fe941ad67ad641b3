//! Report rendering scenarios with a manual clock and fixed timestamps.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use time::macros::datetime;

use meas_session::config::MeasConfig;
use meas_session::{ManualTicks, Sections, Session, ValueFormat};

fn session() -> (Session, ManualTicks) {
    let ticks = ManualTicks::new(100);
    let s = Session::with_tick_source(MeasConfig::default(), Box::new(ticks.clone())).unwrap();
    (s, ticks)
}

/// Line that renders `name` with `value` in the table layout.
fn row_for(report: &str, name: &str) -> Option<String> {
    report
        .lines()
        .find(|l| l.split_whitespace().next() == Some(name))
        .map(str::to_string)
}

#[test]
fn golden_full_report() {
    let (mut s, ticks) = session();

    let t1 = s.start_timer("t1");
    ticks.advance(7);
    s.stop_timer(t1).unwrap();
    s.start_timer("t2");

    let c = s.create_counter(0, "c");
    for _ in 0..100 {
        s.increment(c).unwrap();
    }
    let down = s.create_counter(0, "down");
    s.decrement(down).unwrap();

    s.add_report_item("X", ValueFormat::Decimal, 42);
    s.add_report_item("MASK", ValueFormat::LowerHex, 255);
    s.add_report_item("NEG", ValueFormat::Decimal, -3);

    s.generate_report_at(Sections::ALL, datetime!(2024-03-05 14:07:09 UTC))
        .unwrap();

    let expected = concat!(
        "****************************************************************\n",
        "* libmeas - A measurement system for critical embedded systems *\n",
        "*                       ANALYSIS REPORT                        *\n",
        "****************************************************************\n",
        "\n",
        " Generated on Tue Mar 05 14:07:09 2024\n",
        "\n",
        "============================ TIMERS ============================\n",
        " TIMER NAME                            NUMBER OF TICKS\n",
        "================================================================\n",
        " t1                                    7\n",
        " t2                                    0\n",
        "----------------------------------------------------------------\n",
        "\n",
        "=========================== COUNTERS ===========================\n",
        " COUNTER NAME                          VALUE\n",
        "================================================================\n",
        " c                                     100\n",
        " down                                  18446744073709551615\n",
        "----------------------------------------------------------------\n",
        "\n",
        "========================== USER ITEMS ==========================\n",
        " ITEM NAME                             VALUE\n",
        "================================================================\n",
        " X                                     42\n",
        " MASK                                  ff\n",
        " NEG                                   -3\n",
        "----------------------------------------------------------------\n",
        "\n",
    );
    assert_eq!(s.report_text().unwrap(), expected);

    let mut sink = Vec::new();
    s.write_report(&mut sink).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), expected);
}

#[test]
fn counters_only_report_shows_incremented_counter() {
    let (mut s, _) = session();
    let c = s.create_counter(0, "c");
    for _ in 0..100 {
        s.increment(c).unwrap();
    }
    s.generate_report(Sections::COUNTERS).unwrap();

    let report = s.report_text().unwrap();
    let row = row_for(report, "c").expect("row for c");
    assert_eq!(row.split_whitespace().nth(1), Some("100"));
    assert!(!report.contains("TIMERS"));
    assert!(!report.contains("USER ITEMS"));
}

#[test]
fn timers_only_report_with_real_clock() {
    let mut s = Session::new().unwrap();
    let t1 = s.start_timer("t1");
    s.stop_timer(t1).unwrap();
    s.generate_report(Sections::TIMERS).unwrap();

    let report = s.report_text().unwrap();
    let row = row_for(report, "t1").expect("row for t1");
    let ticks: u64 = row.split_whitespace().nth(1).unwrap().parse().unwrap();
    assert_eq!(ticks, s.timer(t1).unwrap().elapsed_ticks());
    assert!(!report.contains("COUNTERS"));
}

#[test]
fn user_item_value_follows_padded_name() {
    let (mut s, _) = session();
    let fmt = ValueFormat::from_printf("%d\n").unwrap();
    s.add_report_item("X", fmt, 42);
    s.generate_report(Sections::USER_ITEMS).unwrap();

    let row = row_for(s.report_text().unwrap(), "X").expect("row for X");
    assert!(row.starts_with(" X   "));
    assert!(row.ends_with("   42"));
}

#[test]
fn generate_is_idempotent_apart_from_timestamp() {
    let (mut s, ticks) = session();
    let c = s.create_counter(3, "hits");
    s.increment(c).unwrap();
    let t = s.start_timer("work");
    ticks.advance(12);
    s.stop_timer(t).unwrap();
    s.add_report_item("ratio", ValueFormat::Unsigned, 9);

    s.generate_report_at(Sections::ALL, datetime!(2024-01-01 00:00:00 UTC))
        .unwrap();
    let first = s.report_text().unwrap().to_string();
    s.generate_report_at(Sections::ALL, datetime!(2025-06-30 23:59:59 UTC))
        .unwrap();
    let second = s.report_text().unwrap().to_string();

    assert_ne!(first, second);
    let strip = |r: &str| -> Vec<String> {
        r.lines()
            .filter(|l| !l.starts_with(" Generated on "))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(strip(&first), strip(&second));
}

#[test]
fn sections_render_in_fixed_order() {
    let (mut s, _) = session();
    s.create_counter(1, "c");
    s.start_timer("t");
    s.add_report_item("i", ValueFormat::Decimal, 1);

    let flags = Sections::USER_ITEMS | Sections::TIMERS | Sections::COUNTERS;
    assert_eq!(flags, Sections::ALL);
    s.generate_report(flags).unwrap();

    let report = s.report_text().unwrap();
    let timers = report.find(" TIMERS ").unwrap();
    let counters = report.find(" COUNTERS ").unwrap();
    let items = report.find(" USER ITEMS ").unwrap();
    assert!(timers < counters && counters < items);
}

#[test]
fn rows_keep_registration_order() {
    let (mut s, _) = session();
    for name in ["zeta", "alpha", "mid"] {
        s.create_counter(0, name);
    }
    s.generate_report(Sections::COUNTERS).unwrap();
    let report = s.report_text().unwrap();

    let z = report.find(" zeta ").unwrap();
    let a = report.find(" alpha ").unwrap();
    let m = report.find(" mid ").unwrap();
    assert!(z < a && a < m);
}

#[test]
fn no_sections_renders_banner_only() {
    let (mut s, _) = session();
    s.create_counter(0, "c");
    s.generate_report_at(Sections::NONE, datetime!(2024-03-05 14:07:09 UTC))
        .unwrap();
    let report = s.report_text().unwrap();
    assert!(report.contains("ANALYSIS REPORT"));
    assert!(report.ends_with(" Generated on Tue Mar 05 14:07:09 2024\n\n"));
}

#[test]
fn write_without_report_is_noop() {
    let (s, _) = session();
    let mut sink = Vec::new();
    s.write_report(&mut sink).unwrap();
    assert!(sink.is_empty());
    assert!(s.report_text().is_none());
}

#[test]
fn long_names_are_truncated_and_stay_aligned() {
    let (mut s, _) = session();
    let long = "a_counter_name_that_is_far_longer_than_the_column";
    s.create_counter(5, long);
    s.create_counter(6, "short");
    s.generate_report(Sections::COUNTERS).unwrap();

    let report = s.report_text().unwrap();
    let kept = &long[..34];
    assert!(!report.contains(long));
    let long_row = row_for(report, kept).unwrap();
    let short_row = row_for(report, "short").unwrap();
    assert_eq!(long_row.find('5'), short_row.find('6'));
}

#[test]
fn larger_reports_grow_the_buffer_in_quanta() {
    let cfg = config_with_quantum(64);
    let ticks = ManualTicks::new(0);
    let mut s = Session::with_tick_source(cfg, Box::new(ticks)).unwrap();
    for i in 0..50 {
        s.create_counter(i, &format!("counter_{i}"));
    }
    s.generate_report(Sections::COUNTERS).unwrap();
    let report = s.report_text().unwrap();
    for i in 0..50 {
        assert!(report.contains(&format!(" counter_{i} ")));
    }
}

fn config_with_quantum(q: usize) -> MeasConfig {
    let mut cfg = MeasConfig::default();
    cfg.report.growth_quantum = q;
    cfg
}

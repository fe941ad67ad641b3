//! Text buffer growth vectors and accumulation properties.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fmt::Write as _;

use meas_core::text::{TextBuffer, DEFAULT_GROWTH_QUANTUM};
use meas_core::ErrorKind;


#[test]
fn append_vectors() {
    let files = [
        "append_basic.json",
        "append_exact_fill.json",
        "append_multi_quantum.json",
        "append_empty.json",
        "append_utf8.json",
    ];

    for f in files {
        let v = vector_loader::load(f);
        let mut buf = TextBuffer::with_quantum(v.quantum);
        for frag in &v.fragments {
            buf.append(frag).expect("append");
            assert!(buf.len() < buf.capacity(), "vector={}", v.description);
        }
        assert_eq!(buf.as_str(), v.expect.text, "vector={}", v.description);
        assert_eq!(buf.capacity(), v.expect.capacity, "vector={}", v.description);
    }
}

#[test]
fn content_is_concatenation_and_capacity_covers_it() {
    let mut buf = TextBuffer::new();
    let mut expected = String::new();
    for i in 0..200 {
        let line = format!(" row {i:>4} {}\n", "x".repeat(i % 97));
        buf.append(&line).unwrap();
        expected.push_str(&line);
        assert!(buf.capacity() >= buf.len());
        assert_eq!(buf.capacity() % DEFAULT_GROWTH_QUANTUM, 0);
    }
    assert_eq!(buf.as_str(), expected);
    assert_eq!(buf.len(), expected.len());
}

#[test]
fn zero_quantum_is_clamped() {
    let mut buf = TextBuffer::with_quantum(0);
    assert_eq!(buf.quantum(), 1);
    buf.append("abc").unwrap();
    assert_eq!(buf.capacity(), 4);
}

#[test]
fn fmt_write_appends() {
    let mut buf = TextBuffer::with_quantum(8);
    write!(buf, "{}-{}", 4, "two").unwrap();
    assert_eq!(buf.as_str(), "4-two");
}

#[test]
fn clear_releases_and_write_to_copies_verbatim() {
    let mut buf = TextBuffer::with_quantum(8);
    buf.append("line one\nline two\n").unwrap();

    let mut sink = Vec::new();
    buf.write_to(&mut sink).unwrap();
    assert_eq!(sink, b"line one\nline two\n");

    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 0);

    let mut sink = Vec::new();
    buf.write_to(&mut sink).unwrap();
    assert!(sink.is_empty());
}

#[test]
fn failed_growth_reports_allocation_and_keeps_state() {
    // One quantum is already past `isize::MAX`, so every growth is refused.
    let mut buf = TextBuffer::with_quantum(usize::MAX);
    let before = buf.clone();

    for fragment in ["a", "a longer fragment\n"] {
        let err = buf.append(fragment).expect_err("growth must fail");
        assert_eq!(err.kind(), ErrorKind::Allocation);
        assert_eq!(err.kind().as_str(), "ALLOCATION");
        assert_eq!(buf.as_str(), before.as_str());
        assert_eq!(buf.len(), before.len());
        assert_eq!(buf.capacity(), before.capacity());
    }

    assert!(write!(buf, "{}", 42).is_err());
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 0);
}

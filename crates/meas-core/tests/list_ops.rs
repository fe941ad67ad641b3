//! Owned list behavior.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::cell::Cell;
use std::rc::Rc;

use meas_core::{ErrorKind, OwnedList};

#[test]
fn append_preserves_order_and_length() {
    let mut list = OwnedList::new();
    for i in 0..25 {
        list.push_back(i);
        assert_eq!(list.len(), i + 1);
    }
    for i in 0..25 {
        assert_eq!(list.at(i), Some(&i));
    }
    assert_eq!(list.at(25), None);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), (0..25).collect::<Vec<_>>());
}

#[test]
fn remove_at_shrinks_by_one_and_keeps_order() {
    for p in 0..6 {
        let mut list: OwnedList<u32> = (0..6).collect();
        let removed = list.remove_at(p).unwrap();
        assert_eq!(removed, p as u32);
        assert_eq!(list.len(), 5);
        let expected: Vec<u32> = (0..6).filter(|v| *v != p as u32).collect();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn remove_at_out_of_range_is_not_found() {
    let mut empty: OwnedList<String> = OwnedList::new();
    let err = empty.remove_at(0).expect_err("empty list");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let mut list: OwnedList<u8> = [1, 2, 3].into_iter().collect();
    assert_eq!(list.remove_at(3).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(list.len(), 3);
}

#[test]
fn remove_element_uses_identity() {
    let mut list: OwnedList<String> = ["a", "b", "a"].iter().map(|s| s.to_string()).collect();

    let third: *const String = list.at(2).unwrap();
    let removed = list.remove_element(third).unwrap();
    assert_eq!(removed, "a");
    assert_eq!(list.iter().map(String::as_str).collect::<Vec<_>>(), ["a", "b"]);

    let outsider = String::from("a");
    let err = list.remove_element(&outsider).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(list.len(), 2);
}

#[test]
fn index_of_uses_identity() {
    let list: OwnedList<u64> = [7, 7, 9].into_iter().collect();
    let second = list.at(1).unwrap();
    assert_eq!(list.index_of(second), Some(1));
    assert_eq!(list.index_of(&7), None);
    assert_eq!(list.position(|v| *v == 9), Some(2));
}

#[test]
fn remove_first_and_find_mut() {
    let mut list: OwnedList<(u32, &str)> = [(1, "x"), (2, "y"), (3, "z")].into_iter().collect();
    list.find_mut(|(id, _)| *id == 2).unwrap().1 = "changed";
    assert_eq!(list.find(|(id, _)| *id == 2).unwrap().1, "changed");

    let (id, _) = list.remove_first(|(id, _)| *id == 1).unwrap();
    assert_eq!(id, 1);
    assert_eq!(list.at(0).unwrap().0, 2);
    assert!(list.remove_first(|(id, _)| *id == 1).is_err());
}

struct DropTally(Rc<Cell<usize>>);

impl Drop for DropTally {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn clear_and_drop_release_every_element() {
    let drops = Rc::new(Cell::new(0));
    let mut list = OwnedList::new();
    for _ in 0..4 {
        list.push_back(DropTally(Rc::clone(&drops)));
    }
    list.clear();
    assert_eq!(drops.get(), 4);
    assert!(list.is_empty());
    list.clear();
    assert_eq!(drops.get(), 4);

    {
        let mut list = OwnedList::new();
        list.push_back(DropTally(Rc::clone(&drops)));
        list.push_back(DropTally(Rc::clone(&drops)));
    }
    assert_eq!(drops.get(), 6);
}

#[test]
fn removed_element_is_handed_back_not_dropped() {
    let drops = Rc::new(Cell::new(0));
    let mut list = OwnedList::new();
    list.push_back(DropTally(Rc::clone(&drops)));
    let detached = list.remove_at(0).unwrap();
    assert_eq!(drops.get(), 0);
    drop(detached);
    assert_eq!(drops.get(), 1);
}

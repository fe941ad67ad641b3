//! Owned singly-linked list.
//!
//! Rules:
//! - Elements are appended at the tail and keep insertion order.
//! - The list is the only owner of its elements; removing an element hands it
//!   back to the caller, dropping the list drops every element.
//! - Addressing past the end (including any position on an empty list) is a
//!   `NotFound` error, never a panic.
//!
//! Length is counted on demand; lists here hold a handful of entries.

use std::fmt;

use crate::error::{MeasError, Result};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    element: T,
    next: Link<T>,
}

/// Ordered container that exclusively owns its elements.
pub struct OwnedList<T> {
    head: Link<T>,
}

impl<T> OwnedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Drop every node and element. Safe to call on an empty list.
    pub fn clear(&mut self) {
        // Unlink node by node so long lists do not recurse through `Box` drops.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }

    /// Append `element` at the tail, taking ownership of it.
    pub fn push_back(&mut self, element: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node {
            element,
            next: None,
        }));
    }

    /// Remove the element at zero-based `position` and return it.
    pub fn remove_at(&mut self, position: usize) -> Result<T> {
        let mut cursor = &mut self.head;
        for _ in 0..position {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return Err(MeasError::NotFound),
            }
        }

        match cursor.take() {
            Some(node) => {
                let Node { element, next } = *node;
                *cursor = next;
                Ok(element)
            }
            None => Err(MeasError::NotFound),
        }
    }

    /// Remove the element living at address `element` (identity, not value).
    ///
    /// Obtain the address from [`OwnedList::at`] or [`OwnedList::iter`].
    pub fn remove_element(&mut self, element: *const T) -> Result<T> {
        let position = self
            .position(|e| std::ptr::eq(e, element))
            .ok_or(MeasError::NotFound)?;
        self.remove_at(position)
    }

    /// Remove the first element matching `pred`.
    pub fn remove_first<F>(&mut self, pred: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        let position = self.position(pred).ok_or(MeasError::NotFound)?;
        self.remove_at(position)
    }

    /// Element at `index`, if any.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Mutable element at `index`, if any.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.iter_mut().nth(index)
    }

    /// Position of `element` by identity.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.position(|e| std::ptr::eq(e, element))
    }

    /// Position of the first element matching `pred`.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(pred)
    }

    /// First element matching `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|e| pred(e))
    }

    /// Mutable first element matching `pred`.
    pub fn find_mut<F>(&mut self, mut pred: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter_mut().find(|e| pred(e))
    }

    /// Number of elements (walks the list).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }
}

impl<T> Default for OwnedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OwnedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for OwnedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for OwnedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<T> FromIterator<T> for OwnedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a OwnedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator in list order.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.element
        })
    }
}

/// Mutable iterator in list order.
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.element
        })
    }
}

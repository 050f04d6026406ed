// src/merge/mergeheap.rs

//! A fixed-capacity binary min-heap parameterized over its comparator.
//!
//! Entries may be added unordered with [`MergeHeap::push_unordered`] and
//! ordered once with [`MergeHeap::heapify`], which is cheaper than
//! inserting each entry.

use std::cmp::Ordering;
use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Errors of [`MergeHeap`] operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeapError {
    /// the heap holds `capacity` entries
    Capacity { capacity: usize },
    /// the heap holds no entries
    Empty,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Capacity { capacity } => write!(f, "heap is at capacity {}", capacity),
            HeapError::Empty => write!(f, "heap is empty"),
        }
    }
}

impl std::error::Error for HeapError {}

pub type HeapResult<T> = std::result::Result<T, HeapError>;

/// Comparator of entries of type `T`.
pub type FnCompare<T> = fn(&T, &T) -> Ordering;

/// Binary min-heap holding at most `capacity` entries. The least entry
/// according to `compare` is popped first.
pub struct MergeHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    entries: Vec<T>,
    capacity: usize,
    compare: C,
    /// `false` after `push_unordered` until `heapify`
    ordered: bool,
}

/// A `MergeHeap` ordered by `T`'s `Ord`.
pub type OrdHeap<T> = MergeHeap<T, FnCompare<T>>;

impl<T: Ord> MergeHeap<T, FnCompare<T>> {
    pub fn new(capacity: usize) -> OrdHeap<T> {
        MergeHeap::with_comparator(capacity, T::cmp as FnCompare<T>)
    }
}

impl<T, C> MergeHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(capacity: usize, compare: C) -> MergeHeap<T, C> {
        defñ!("capacity {}", capacity);
        MergeHeap {
            // do not reserve all of a large capacity up front
            entries: Vec::with_capacity(capacity.min(1024)),
            capacity,
            compare,
            ordered: true,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.entries[a], &self.entries[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut at: usize) {
        while at > 0 {
            let parent = (at - 1) / 2;
            if !self.less(at, parent) {
                break;
            }
            self.entries.swap(at, parent);
            at = parent;
        }
    }

    fn sift_down(&mut self, mut at: usize) {
        let len = self.entries.len();
        loop {
            let left = at * 2 + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, at) {
                break;
            }
            self.entries.swap(at, child);
            at = child;
        }
    }

    /// Add `item` in O(log n).
    pub fn insert(&mut self, item: T) -> HeapResult<()> {
        debug_assert!(self.ordered, "insert before heapify");
        if self.entries.len() >= self.capacity {
            return Err(HeapError::Capacity { capacity: self.capacity });
        }
        self.entries.push(item);
        self.sift_up(self.entries.len() - 1);

        Ok(())
    }

    /// Add `item` without ordering. [`heapify`] must be called before the
    /// next `insert` or `pop_min`.
    ///
    /// [`heapify`]: MergeHeap::heapify
    pub fn push_unordered(&mut self, item: T) -> HeapResult<()> {
        if self.entries.len() >= self.capacity {
            return Err(HeapError::Capacity { capacity: self.capacity });
        }
        self.entries.push(item);
        self.ordered = false;

        Ok(())
    }

    /// Order all entries in O(n).
    pub fn heapify(&mut self) {
        defn!("len {}", self.entries.len());
        let len = self.entries.len();
        for at in (0..len / 2).rev() {
            self.sift_down(at);
        }
        self.ordered = true;
        defx!();
    }

    /// Remove and return the least entry in O(log n).
    pub fn pop_min(&mut self) -> HeapResult<T> {
        debug_assert!(self.ordered, "pop_min before heapify");
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }
        let item = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        Ok(item)
    }

    /// The least entry, if any.
    pub fn peek_min(&self) -> Option<&T> {
        debug_assert!(self.ordered, "peek_min before heapify");
        self.entries.first()
    }
}

impl<T, C> fmt::Debug for MergeHeap<T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MergeHeap")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("min", &self.entries.first())
            .finish()
    }
}

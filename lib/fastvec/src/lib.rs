#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use bytemuck::Pod;

mod alloc;
mod conv;
mod macros;
mod view;

pub use view::FastView;

use alloc::{allocate, capacity_overflow};

/// A growable buffer of [`Pod`] values that never constructs or destroys elements one by one.
///
/// Comparable to a `Vec<T>`, except that the slots between `len` and `capacity` always hold
/// *some* valid value (zero after allocation, or whatever was last written there), which lets
/// [`resize_not_preserving`](Self::resize_not_preserving) and [`resize`](Self::resize) move the
/// logical length without touching memory.
///
/// # Invariants
///
/// * `len` <= `data.len()`
pub struct FastVec<T: Pod> {
    /// Backing storage; its length is the capacity.
    data: Box<[T]>,
    /// Logical length.
    len: usize,
}

impl<T: Pod> Default for FastVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pod> FastVec<T> {
    /// Create a new, empty [`FastVec`] without allocating.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Box::new([]),
            len: 0,
        }
    }

    /// Create a [`FastVec`] of logical length `len`, with room for one extra sentinel element.
    ///
    /// The contents are unspecified.
    pub fn with_len(len: usize) -> Self {
        let cap = match len.checked_add(1) {
            Some(c) => c,
            None => capacity_overflow(),
        };
        Self {
            data: allocate::<T>(cap),
            len,
        }
    }

    /// Create an empty [`FastVec`] able to hold `cap` elements without reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            data: allocate::<T>(cap),
            len: 0,
        }
    }

    /// Create a [`FastVec`] holding `len` copies of `elem`.
    pub fn from_elem(elem: T, len: usize) -> Self {
        let mut res = Self::with_len(len);
        res.fill(elem);
        res
    }

    /// Get the logical length.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of elements this buffer can hold without reallocating.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.len]
    }

    /// Borrow the live elements as a read-only [`FastView`].
    #[inline]
    pub fn view(&self) -> FastView<'_, T> {
        FastView::from_slice(self.as_slice())
    }

    /// Set the logical length to `new_len`.
    ///
    /// If `new_len` fits within the current capacity, nothing but the length changes. Otherwise
    /// the buffer is reallocated to twice `new_len` and **the previous contents are lost**: the
    /// caller must treat every element as unspecified after growth.
    pub fn resize_not_preserving(&mut self, new_len: usize) {
        if new_len > self.capacity() {
            let new_cap = match new_len.checked_mul(2) {
                Some(c) => c,
                None => capacity_overflow(),
            };
            self.reallocate(new_cap, 0);
        }
        self.len = new_len;
    }

    /// Set the logical length to `new_len`, preserving the elements in `0..min(len, new_len)`.
    ///
    /// Elements beyond the old length are unspecified.
    pub fn resize(&mut self, new_len: usize) {
        self.reserve(new_len);
        self.len = new_len;
    }

    /// Ensure that the buffer can hold at least `cap` elements, keeping the live elements.
    pub fn reserve(&mut self, cap: usize) {
        if cap > self.capacity() {
            self.reallocate(cap, self.len);
        }
    }

    /// Append `value`, doubling (plus one) the capacity when full.
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            let new_cap = match self.capacity().checked_add(1).and_then(|c| c.checked_mul(2)) {
                Some(c) => c,
                None => capacity_overflow(),
            };
            self.reallocate(new_cap, self.len);
        }
        self.data[self.len] = value;
        self.len += 1;
    }

    /// Remove and return the last live element.
    pub fn pop(&mut self) -> Option<T> {
        self.len = self.len.checked_sub(1)?;
        Some(self.data[self.len])
    }

    /// Append every element of `other`.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        let needed = match self.len.checked_add(other.len()) {
            Some(n) => n,
            None => capacity_overflow(),
        };
        if needed > self.capacity() {
            self.reallocate(needed.max(self.capacity().saturating_mul(2)), self.len);
        }
        self.data[self.len..needed].copy_from_slice(other);
        self.len = needed;
    }

    /// Shorten the buffer to `len`; no-op if it is already shorter.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Drop every live element. The capacity is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Exchange the contents (and capacities) of two buffers.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Copy the live elements into a [`Vec`].
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Replace the backing storage with a fresh allocation of `new_cap` elements, copying the
    /// first `keep` elements across.
    fn reallocate(&mut self, new_cap: usize, keep: usize) {
        debug_assert!(keep <= self.len && keep <= new_cap);
        tracing::trace!(
            from = self.capacity(),
            to = new_cap,
            kept = keep,
            "reallocating FastVec"
        );
        let mut data = allocate::<T>(new_cap);
        data[..keep].copy_from_slice(&self.data[..keep]);
        self.data = data;
    }
}

impl<T: Pod> Clone for FastVec<T> {
    fn clone(&self) -> Self {
        Self::from(self.as_slice())
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for FastVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: Pod + PartialEq> PartialEq for FastVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Pod + Eq> Eq for FastVec<T> {}

impl<T: Pod> Deref for FastVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: Pod> DerefMut for FastVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: Pod> Extend<T> for FastVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len.saturating_add(lower));
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Pod> IntoIterator for &'a FastVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_reserves_sentinel() {
        let v = FastVec::<u32>::with_len(4);
        assert_eq!(v.len(), 4);
        assert_eq!(v.capacity(), 5);
    }

    #[test]
    fn growth_doubles_requested_len() {
        let mut v = FastVec::<u16>::with_len(2);
        v.resize_not_preserving(7);
        assert_eq!(v.len(), 7);
        assert_eq!(v.capacity(), 14);
        // shrinking never reallocates
        v.resize_not_preserving(1);
        assert_eq!(v.capacity(), 14);
    }

    #[test]
    fn push_growth_policy() {
        let mut v = FastVec::<u8>::new();
        v.push(1);
        assert_eq!(v.capacity(), 2);
        v.push(2);
        v.push(3);
        assert_eq!(v.capacity(), 6);
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn resize_preserves_overlap() {
        let mut v: FastVec<u32> = (0..5).collect();
        v.resize(40);
        assert_eq!(&v[..5], &[0, 1, 2, 3, 4]);
        v.resize(2);
        assert_eq!(v.as_slice(), &[0, 1]);
    }

    #[test]
    fn swap_exchanges_buffers() {
        let mut a = FastVec::from_elem(1u64, 3);
        let mut b = FastVec::from_elem(2u64, 5);
        a.swap(&mut b);
        assert_eq!(a.len(), 5);
        assert!(a.iter().all(|x| *x == 2));
        assert_eq!(b.as_slice(), &[1, 1, 1]);
    }

    #[test]
    fn clone_is_deep() {
        let a: FastVec<i32> = vec![3, 1, 4].into();
        let mut b = a.clone();
        b[0] = 9;
        assert_eq!(a.as_slice(), &[3, 1, 4]);
        assert_eq!(b.as_slice(), &[9, 1, 4]);
    }

    #[test]
    fn pop_and_extend() {
        let mut v = FastVec::<u32>::new();
        v.extend_from_slice(&[1, 2, 3]);
        v.extend([4, 5]);
        assert_eq!(v.pop(), Some(5));
        assert_eq!(v.to_vec(), vec![1, 2, 3, 4]);
        v.clear();
        assert_eq!(v.pop(), None);
    }
}

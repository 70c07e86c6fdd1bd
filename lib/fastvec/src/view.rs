use std::ops::Deref;

use bytemuck::Pod;

use crate::FastVec;

/// A read-only view over elements owned by someone else.
///
/// This is the "unowned" counterpart of [`FastVec`]: it never frees, resizes or writes the
/// memory it wraps, and it has no methods that could. The borrow it carries keeps the owner
/// from being mutated or dropped while the view exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastView<'a, T: Pod> {
    data: &'a [T],
}

impl<'a, T: Pod> Default for FastView<'a, T> {
    fn default() -> Self {
        Self { data: &[] }
    }
}

impl<'a, T: Pod> FastView<'a, T> {
    /// Wrap externally owned memory without taking ownership of it.
    #[inline]
    pub const fn from_slice(data: &'a [T]) -> Self {
        Self { data }
    }

    /// The viewed elements, for as long as the underlying borrow lasts.
    #[inline]
    pub const fn as_slice(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy the viewed elements into an owning [`FastVec`].
    pub fn to_owned_vec(&self) -> FastVec<T> {
        FastVec::from(self.data)
    }
}

impl<'a, T: Pod> Deref for FastView<'a, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<'a, T: Pod> From<&'a [T]> for FastView<'a, T> {
    #[inline]
    fn from(data: &'a [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<'a, T: Pod> IntoIterator for FastView<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

//! Allocation helpers for [`FastVecs`](crate::FastVec).
//!
//! Allocation goes through [`bytemuck`]'s zeroed allocation, which asks the global allocator
//! for already-zeroed memory instead of writing every element.

use std::alloc::{handle_alloc_error, Layout};

use bytemuck::Pod;

pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[inline]
const fn can_alloc(size: usize) -> bool {
    usize::BITS >= 64 || size <= isize::MAX as usize
}

/// Allocate a zero-filled buffer of `cap` elements.
///
/// # Panics
///
/// * if the byte size of the buffer overflows `isize`
pub(crate) fn allocate<T: Pod>(cap: usize) -> Box<[T]> {
    let layout = match Layout::array::<T>(cap) {
        Ok(l) => l,
        Err(_) => capacity_overflow(),
    };
    if !can_alloc(layout.size()) {
        capacity_overflow()
    }
    match bytemuck::allocation::try_zeroed_slice_box::<T>(cap) {
        Ok(b) => b,
        Err(()) => handle_alloc_error(layout),
    }
}

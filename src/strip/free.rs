use bitvec::vec::BitVec;

/// The set of faces not yet consumed by a strip.
///
/// Bits are only materialised up to the highest face ever marked used; everything past that is
/// implicitly free.
///
/// # Invariants
///
/// * `flags.len()` == `first_all_free`
/// * no face below `first_maybe_free` is free
/// * every face at or beyond `first_all_free` is free and has never been touched
#[derive(Debug, Clone)]
pub struct FreeFaceSet {
    /// `true` = free
    flags: BitVec,
    len: usize,
    first_maybe_free: usize,
    first_all_free: usize,
}

impl FreeFaceSet {
    /// A set of `len` faces, all free.
    pub fn new(len: usize) -> Self {
        Self {
            flags: BitVec::new(),
            len,
            first_maybe_free: 0,
            first_all_free: 0,
        }
    }

    /// Total number of faces tracked, free or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_free(&self, face: u32) -> bool {
        let face = face as usize;
        debug_assert!(face < self.len);
        face >= self.first_all_free || self.flags[face]
    }

    /// Mark `face` as consumed. It will never be reported free again.
    pub fn set_used(&mut self, face: u32) {
        let face = face as usize;
        debug_assert!(face < self.len);
        if face >= self.first_all_free {
            self.flags.resize(face + 1, true);
            self.first_all_free = face + 1;
        }
        self.flags.set(face, false);
    }

    /// Find the lowest free face at or after the scan pointer, and move the pointer there.
    ///
    /// The pointer never retreats, so successive results never decrease.
    pub fn find_next_free(&mut self) -> Option<u32> {
        let start = self.first_maybe_free.min(self.first_all_free);
        let next = match self.flags[start..].first_one() {
            Some(offset) => start + offset,
            None => self.first_all_free,
        };
        if next >= self.len {
            self.first_maybe_free = self.len;
            None
        } else {
            self.first_maybe_free = next;
            Some(next as u32)
        }
    }

    /// Count the faces that are still free.
    pub fn count_free(&self) -> usize {
        let start = self.first_maybe_free.min(self.first_all_free);
        self.flags[start..].count_ones() + (self.len - self.first_all_free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_all_free() {
        let mut set = FreeFaceSet::new(4);
        assert_eq!(set.count_free(), 4);
        assert!((0..4).all(|f| set.is_free(f)));
        assert_eq!(set.find_next_free(), Some(0));
        // nothing was consumed, so the same face comes back
        assert_eq!(set.find_next_free(), Some(0));
    }

    #[test]
    fn lazy_materialisation() {
        let mut set = FreeFaceSet::new(100);
        set.set_used(10);
        assert_eq!(set.flags.len(), 11);
        assert!(!set.is_free(10));
        assert!(set.is_free(9));
        assert!(set.is_free(99));
        assert_eq!(set.count_free(), 99);
    }

    #[test]
    fn scan_skips_used() {
        let mut set = FreeFaceSet::new(6);
        for f in [0, 1, 3] {
            set.set_used(f);
        }
        assert_eq!(set.find_next_free(), Some(2));
        set.set_used(2);
        assert_eq!(set.find_next_free(), Some(4));
        set.set_used(5);
        set.set_used(4);
        assert_eq!(set.find_next_free(), None);
        assert_eq!(set.count_free(), 0);
        assert_eq!(set.find_next_free(), None);
    }

    #[test]
    fn empty() {
        let mut set = FreeFaceSet::new(0);
        assert!(set.is_empty());
        assert_eq!(set.find_next_free(), None);
        assert_eq!(set.count_free(), 0);
    }
}

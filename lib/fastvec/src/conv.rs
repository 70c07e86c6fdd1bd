//! Conversion of various types to [FastVec].

use bytemuck::Pod;

use crate::FastVec;

impl<T: Pod> From<&[T]> for FastVec<T> {
    fn from(data: &[T]) -> Self {
        let mut res = Self::with_len(data.len());
        res.copy_from_slice(data);
        res
    }
}

impl<T: Pod> From<Vec<T>> for FastVec<T> {
    fn from(v: Vec<T>) -> Self {
        Self::from(v.as_slice())
    }
}

impl<T: Pod> From<FastVec<T>> for Vec<T> {
    fn from(v: FastVec<T>) -> Self {
        v.to_vec()
    }
}

impl<T: Pod> FromIterator<T> for FastVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

//! Joining strips into a single index stream, and decoding such streams.

use crate::Triangle;

use super::StripSet;

/// How separate strips are joined into one index stream.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Stitch {
    /// Bridge strips with zero-area triangles.
    #[default]
    Degenerate,
    /// Separate strips with a primitive restart index.
    Restart(u32),
}

impl StripSet {
    /// Join every strip, then every single triangle, into one strip index stream.
    ///
    /// With [Stitch::Degenerate], each part starts at an even position in the stream, so every
    /// face keeps the winding it has in its own strip.
    pub fn stitch(&self, stitch: Stitch) -> Vec<u32> {
        let parts = self
            .strips
            .iter()
            .map(|s| s.vertices.as_slice())
            .chain(self.singles.iter().map(|s| s.vertices.as_slice()));

        let bridges = (self.strips.len() + self.singles.len()).saturating_sub(1);
        let mut out = Vec::with_capacity(self.index_count() + bridges * 3);
        for part in parts {
            let (Some(&first), Some(&last)) = (part.first(), out.last()) else {
                out.extend_from_slice(part);
                continue;
            };
            match stitch {
                Stitch::Degenerate => {
                    out.push(last);
                    out.push(first);
                    if out.len() % 2 == 1 {
                        out.push(first);
                    }
                }
                Stitch::Restart(index) => out.push(index),
            }
            out.extend_from_slice(part);
        }
        out
    }
}

/// Decode a strip index stream back into triangles.
///
/// Triangles with a repeated vertex are dropped, which removes the bridges [StripSet::stitch]
/// inserts (and any degenerate face the stream genuinely contained).
pub fn unstrip(indices: &[u32], stitch: Stitch) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(indices.len().saturating_sub(2));
    let mut start = 0;
    for (i, &c) in indices.iter().enumerate() {
        if let Stitch::Restart(restart) = stitch {
            if c == restart {
                start = i + 1;
                continue;
            }
        }
        if i < start + 2 {
            continue;
        }
        let (mut a, mut b) = (indices[i - 2], indices[i - 1]);
        if (i - start) % 2 == 1 {
            std::mem::swap(&mut a, &mut b);
        }
        if a != b && b != c && a != c {
            out.push([a, b, c]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::{SingleTriangle, Strip};

    fn set() -> StripSet {
        StripSet {
            strips: vec![
                Strip {
                    vertices: vec![1, 2, 0, 3],
                    faces: vec![0, 1],
                    seed: 0,
                },
                Strip {
                    vertices: vec![4, 5, 6, 7, 8],
                    faces: vec![2, 3, 4],
                    seed: 2,
                },
            ],
            singles: vec![SingleTriangle {
                face: 5,
                vertices: [9, 10, 11],
            }],
        }
    }

    #[test]
    fn degenerate_bridges_keep_parity() {
        let stream = set().stitch(Stitch::Degenerate);
        assert_eq!(
            stream,
            vec![1, 2, 0, 3, 3, 4, 4, 5, 6, 7, 8, 8, 9, 9, 9, 10, 11]
        );
        assert_eq!(
            unstrip(&stream, Stitch::Degenerate),
            vec![
                [1, 2, 0],
                [0, 2, 3],
                [4, 5, 6],
                [6, 5, 7],
                [6, 7, 8],
                [9, 10, 11]
            ]
        );
    }

    #[test]
    fn restart_separates_parts() {
        let stream = set().stitch(Stitch::Restart(u32::MAX));
        assert_eq!(
            stream,
            vec![1, 2, 0, 3, u32::MAX, 4, 5, 6, 7, 8, u32::MAX, 9, 10, 11]
        );
        assert_eq!(unstrip(&stream, Stitch::Restart(u32::MAX)).len(), 6);
    }

    #[test]
    fn empty_set() {
        assert!(StripSet::default().stitch(Stitch::Degenerate).is_empty());
        assert!(unstrip(&[], Stitch::Degenerate).is_empty());
        assert!(unstrip(&[1, 2], Stitch::Degenerate).is_empty());
    }
}

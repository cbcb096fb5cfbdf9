//! Shoebox pixel regions: congruent data / mask / background array triples.

use ndarray::Array3;

/// Per-pixel mask bit flags.
///
/// A pixel qualifies as a background sample iff its mask carries both
/// [`VALID`](mask::VALID) and [`BACKGROUND`](mask::BACKGROUND); the
/// [`BACKGROUND_VALID`](mask::BACKGROUND_VALID) combination expresses that
/// test as `m & BACKGROUND_VALID == BACKGROUND_VALID`.
pub mod mask {
    /// Pixel is usable (inside trusted region, not dead).
    pub const VALID: i32 = 1 << 0;
    /// Pixel belongs to the reflection foreground.
    pub const FOREGROUND: i32 = 1 << 1;
    /// Pixel is classified as background.
    pub const BACKGROUND: i32 = 1 << 2;
    /// Pixel intensity is above the strong-spot threshold.
    pub const STRONG: i32 = 1 << 3;
    /// Pixel was consumed by a background fit.
    pub const BACKGROUND_USED: i32 = 1 << 4;
    /// Combination identifying a usable background sample.
    pub const BACKGROUND_VALID: i32 = VALID | BACKGROUND;
}

/// A rectangular pixel region cut from an image stack.
///
/// Three congruent arrays indexed `(frame, row, column)`: measured
/// intensities, per-pixel mask flags, and fitted background values. The
/// background fit reads `data`, and writes `background` and `mask` in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Shoebox {
    /// Measured pixel intensities. Never written by this crate.
    pub data: Array3<f64>,
    /// Per-pixel bit flags ([`mask`] constants).
    pub mask: Array3<i32>,
    /// Fitted background level per pixel.
    pub background: Array3<f64>,
}

impl Shoebox {
    /// Allocate a zeroed shoebox of extent `(frames, rows, columns)`.
    pub fn with_extent(extent: (usize, usize, usize)) -> Self {
        Self {
            data: Array3::zeros(extent),
            mask: Array3::zeros(extent),
            background: Array3::zeros(extent),
        }
    }

    /// All three arrays share one extent.
    pub fn is_consistent(&self) -> bool {
        self.data.dim() == self.mask.dim() && self.data.dim() == self.background.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_shoebox_is_consistent() {
        let sbox = Shoebox::with_extent((2, 3, 4));
        assert!(sbox.is_consistent());
        assert_eq!(sbox.data.dim(), (2, 3, 4));
    }

    #[test]
    fn mismatched_extents_are_detected() {
        let mut sbox = Shoebox::with_extent((1, 3, 3));
        sbox.mask = Array3::zeros((1, 3, 4));
        assert!(!sbox.is_consistent());
    }

    #[test]
    fn background_sample_predicate() {
        let m = mask::VALID | mask::BACKGROUND | mask::BACKGROUND_USED;
        assert_eq!(m & mask::BACKGROUND_VALID, mask::BACKGROUND_VALID);
        let m = mask::VALID | mask::FOREGROUND;
        assert_ne!(m & mask::BACKGROUND_VALID, mask::BACKGROUND_VALID);
    }
}

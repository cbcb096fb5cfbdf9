//! Area-weighted resampling between the Cartesian and polar grids.

use ndarray::Array2;

use crate::error::Error;

use super::PolarTransform;

impl PolarTransform {
    /// Resample a Cartesian image onto the polar grid.
    ///
    /// Every pixel's value is split evenly over its `multiplier^2`
    /// supersampled sub-cells (weight `1 / multiplier^2` each) and splatted
    /// into the polar cell its map entry floors to. Sub-cells mapping
    /// outside the polar grid contribute nothing. `data` is indexed
    /// `(row, column)` and must match the panel's image size.
    pub fn to_polar(&self, data: &Array2<f64>) -> Result<Array2<f64>, Error> {
        let [image_w, image_h] = self.image_size;
        if data.dim() != (image_h, image_w) {
            return Err(Error::ShapeMismatch {
                expected: (image_h, image_w),
                actual: data.dim(),
            });
        }

        let [polar_w, polar_h] = self.polar_size;
        let mut out = Array2::<f64>::zeros((polar_h, polar_w));
        let fraction = 1.0 / (self.multiplier * self.multiplier) as f64;
        for j in 0..image_h {
            for i in 0..image_w {
                for jj in 0..self.multiplier {
                    for ii in 0..self.multiplier {
                        let sj = j * self.multiplier + jj;
                        let si = i * self.multiplier + ii;
                        let pi = self.xmap[(sj, si)].floor() as isize;
                        let pj = self.ymap[(sj, si)].floor() as isize;
                        if pj >= 0 && (pj as usize) < polar_h && pi >= 0 && (pi as usize) < polar_w
                        {
                            out[(pj as usize, pi as usize)] += data[(j, i)] * fraction;
                        }
                    }
                }
            }
        }

        Ok(out)
    }

    /// Resample a polar image back onto the Cartesian grid.
    ///
    /// Each supersampled sub-cell gathers its mapped polar cell's value and
    /// accumulates it, unweighted, into its parent pixel; out-of-bounds
    /// sub-cells gather nothing. The gather is deliberately not normalized:
    /// `from_polar(to_polar(x))` picks up a factor of up to `multiplier^2`
    /// per shared polar cell relative to `x`, and callers compensating for
    /// the split must do so themselves.
    pub fn from_polar(&self, data: &Array2<f64>) -> Result<Array2<f64>, Error> {
        let [polar_w, polar_h] = self.polar_size;
        if data.dim() != (polar_h, polar_w) {
            return Err(Error::ShapeMismatch {
                expected: (polar_h, polar_w),
                actual: data.dim(),
            });
        }

        let [image_w, image_h] = self.image_size;
        let mut out = Array2::<f64>::zeros((image_h, image_w));
        for j in 0..image_h {
            for i in 0..image_w {
                for jj in 0..self.multiplier {
                    for ii in 0..self.multiplier {
                        let sj = j * self.multiplier + jj;
                        let si = i * self.multiplier + ii;
                        let pi = self.xmap[(sj, si)].floor() as isize;
                        let pj = self.ymap[(sj, si)].floor() as isize;
                        if pj >= 0 && (pj as usize) < polar_h && pi >= 0 && (pi as usize) < polar_w
                        {
                            out[(j, i)] += data[(pj as usize, pi as usize)];
                        }
                    }
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Beam, FlatPanel, Goniometer};

    /// Flat 6x6 panel, 1 mm pixels, perpendicular to a +z beam at 50 mm.
    fn transform(multiplier: usize) -> PolarTransform {
        let beam = Beam::new([0.0, 0.0, 1.0]);
        let panel = FlatPanel::new(
            [-3.0, -3.0, 50.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0],
            [6, 6],
        );
        let goniometer = Goniometer::new([1.0, 0.0, 0.0]);
        PolarTransform::new(&beam, &panel, &goniometer, multiplier).unwrap()
    }

    /// Polar destination cell of one supersampled location, if in bounds.
    fn dest(t: &PolarTransform, sj: usize, si: usize) -> Option<(usize, usize)> {
        let [polar_w, polar_h] = t.polar_size();
        let pi = t.xmap()[(sj, si)].floor() as isize;
        let pj = t.ymap()[(sj, si)].floor() as isize;
        if pj >= 0 && (pj as usize) < polar_h && pi >= 0 && (pi as usize) < polar_w {
            Some((pj as usize, pi as usize))
        } else {
            None
        }
    }

    #[test]
    fn to_polar_rejects_wrong_shape() {
        let t = transform(1);
        let err = t.to_polar(&Array2::zeros((5, 6))).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: (6, 6),
                actual: (5, 6),
            }
        );
    }

    #[test]
    fn from_polar_rejects_wrong_shape() {
        let t = transform(1);
        let err = t.from_polar(&Array2::zeros((1, 1))).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn to_polar_conserves_in_bounds_mass() {
        let t = transform(2);
        let (map_h, map_w) = t.xmap().dim();
        let mut in_bounds = 0usize;
        for sj in 0..map_h {
            for si in 0..map_w {
                if dest(&t, sj, si).is_some() {
                    in_bounds += 1;
                }
            }
        }
        assert!(in_bounds > 0);

        let image = Array2::from_elem((6, 6), 2.0);
        let polar = t.to_polar(&image).unwrap();
        // Every in-bounds sub-cell deposits exactly v / multiplier^2; the
        // sums stay exact because all terms are small multiples of 0.5.
        let total: f64 = polar.iter().sum();
        assert_eq!(total, 0.5 * in_bounds as f64);
    }

    #[test]
    fn from_polar_matches_reference_gather() {
        let t = transform(2);
        let [polar_w, polar_h] = t.polar_size();
        let polar = Array2::from_shape_fn((polar_h, polar_w), |(r, c)| (r * polar_w + c) as f64);
        let back = t.from_polar(&polar).unwrap();

        let m = t.multiplier();
        for j in 0..6 {
            for i in 0..6 {
                let mut expected = 0.0;
                for jj in 0..m {
                    for ii in 0..m {
                        if let Some((pj, pi)) = dest(&t, j * m + jj, i * m + ii) {
                            expected += polar[(pj, pi)];
                        }
                    }
                }
                assert_eq!(back[(j, i)], expected, "pixel ({}, {})", j, i);
            }
        }
    }

    #[test]
    fn round_trip_accumulates_multiplier_squared_per_shared_cell() {
        let t = transform(2);
        let v = 2.0;
        let image = Array2::from_elem((6, 6), v);
        let polar = t.to_polar(&image).unwrap();
        let back = t.from_polar(&polar).unwrap();

        // Splat puts v / m^2 per sub-cell into its destination, so a cell
        // gathered by n sub-cells holds n * v / m^2 and the gathered total
        // is (v / m^2) * sum(n_c^2) — the round trip scales with the square
        // of the mapping multiplicity, not back to v.
        let (map_h, map_w) = t.xmap().dim();
        let [polar_w, polar_h] = t.polar_size();
        let mut hits = Array2::<f64>::zeros((polar_h, polar_w));
        for sj in 0..map_h {
            for si in 0..map_w {
                if let Some((pj, pi)) = dest(&t, sj, si) {
                    hits[(pj, pi)] += 1.0;
                }
            }
        }
        let m2 = (t.multiplier() * t.multiplier()) as f64;
        let expected_total: f64 = hits.iter().map(|&n| n * n * v / m2).sum();
        let total: f64 = back.iter().sum();
        assert_eq!(total, expected_total);

        // With every sub-cell of the image in bounds this would equal
        // m^2 * v * pixels only if all mappings shared single cells; the
        // constant-image total always exceeds the naive v * pixels once
        // cells are shared.
        assert!(total > v * 36.0 * 0.5, "total = {}", total);
    }
}

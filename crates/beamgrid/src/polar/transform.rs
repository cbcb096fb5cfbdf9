//! Cartesian-to-polar coordinate map construction.

use nalgebra::Vector3;
use ndarray::Array2;

use crate::error::Error;
use crate::geometry::{Beam, Goniometer, LabProjector};

/// Precomputed Cartesian → polar pixel map for one imaging geometry.
///
/// Construction projects every supersampled pixel location onto a local
/// orthonormal frame derived from the beam and rotation axis, derives the
/// polar grid dimensions from the angular extrema, and stores each
/// location's fractional polar coordinate (colatitude index in `xmap`,
/// azimuth index in `ymap`). The maps are immutable after construction and
/// are consumed by [`to_polar`](PolarTransform::to_polar) /
/// [`from_polar`](PolarTransform::from_polar).
#[derive(Debug, Clone)]
pub struct PolarTransform {
    pub(super) multiplier: usize,
    /// Cartesian image size `[width, height]` in whole pixels.
    pub(super) image_size: [usize; 2],
    /// Polar grid size `[width, height]` in cells.
    pub(super) polar_size: [usize; 2],
    /// Fractional colatitude index per supersampled location, shape
    /// `(height * multiplier, width * multiplier)`.
    pub(super) xmap: Array2<f64>,
    /// Fractional azimuth index per supersampled location, same shape.
    pub(super) ymap: Array2<f64>,
}

impl PolarTransform {
    /// Build the coordinate map for one imaging geometry.
    ///
    /// `multiplier` is the per-axis supersampling factor; every detector
    /// pixel contributes `multiplier^2` sub-cells, each evaluated at its
    /// centre. Fails on a zero multiplier or a zero-area panel.
    pub fn new<P: LabProjector>(
        beam: &Beam,
        panel: &P,
        goniometer: &Goniometer,
        multiplier: usize,
    ) -> Result<Self, Error> {
        if multiplier == 0 {
            return Err(Error::InvalidMultiplier);
        }
        let [image_w, image_h] = panel.image_size();
        if image_w == 0 || image_h == 0 {
            return Err(Error::EmptyImage {
                width: image_w,
                height: image_h,
            });
        }

        let map_w = image_w * multiplier;
        let map_h = image_h * multiplier;

        // Local frame: z along the beam, y perpendicular to both beam and
        // rotation axis, x completing the (non-normalized) triplet.
        let zaxis = Vector3::from(beam.unit_s0());
        let m2 = Vector3::from(goniometer.unit_axis());
        let yaxis = zaxis.cross(&m2);
        let xaxis = zaxis.cross(&yaxis);

        let mut xmap = Array2::<f64>::zeros((map_h, map_w));
        let mut ymap = Array2::<f64>::zeros((map_h, map_w));
        let m = multiplier as f64;
        for j in 0..map_h {
            for i in 0..map_w {
                let ii = (i / multiplier) as f64 + ((i % multiplier) as f64 + 0.5) / m;
                let jj = (j / multiplier) as f64 + ((j % multiplier) as f64 + 0.5) / m;
                let s1 = Vector3::from(panel.pixel_lab_coord([ii, jj])).normalize();
                let z = s1.dot(&zaxis);
                let y = s1.dot(&yaxis);
                let x = s1.dot(&xaxis);
                xmap[(j, i)] = z.clamp(-1.0, 1.0).acos();
                ymap[(j, i)] = y.atan2(x);
            }
        }

        // Angular extrema in one scan. The seeding indices, the scan start
        // at flat element 1 and the strict comparisons (first extremum in
        // scan order wins ties) reproduce the reference scan order exactly;
        // the azimuth extrema deliberately never see flat element 0. Known
        // quirk, kept for reproducibility.
        let flat = |map: &Array2<f64>, index: usize| map[(index / map_w, index % map_w)];
        let n = map_w * map_h;
        let phi_seed = 1.min(n - 1);
        let mut theta_min = flat(&xmap, 0);
        let mut theta_max = flat(&xmap, 0);
        let mut phi_min = flat(&ymap, phi_seed);
        let mut phi_max = flat(&ymap, phi_seed);
        let mut theta_min_index = 0usize;
        for index in 1..n {
            let theta = flat(&xmap, index);
            let phi = flat(&ymap, index);
            if theta < theta_min {
                theta_min_index = index;
                theta_min = theta;
            }
            if theta > theta_max {
                theta_max = theta;
            }
            if phi < phi_min {
                phi_min = phi;
            }
            if phi > phi_max {
                phi_max = phi;
            }
        }

        // Polar width: the grid must span the largest pixel-unit excursion
        // from the colatitude minimum, i.e. the distance to the farthest
        // image corner.
        let min_x = ((theta_min_index % map_w) / multiplier) as f64;
        let min_y = ((theta_min_index / map_w) / multiplier) as f64;
        let w = image_w as f64;
        let h = image_h as f64;
        let d1 = (min_x.powi(2) + min_y.powi(2)).sqrt();
        let d2 = (min_x.powi(2) + (min_y - h).powi(2)).sqrt();
        let d3 = ((min_x - w).powi(2) + min_y.powi(2)).sqrt();
        let d4 = ((min_x - w).powi(2) + (min_y - h).powi(2)).sqrt();
        let polar_w = d1.max(d2).max(d3).max(d4).ceil() as usize;

        // Polar height keeps the total cell count commensurate with the
        // Cartesian pixel count.
        let polar_h = (w * h / polar_w as f64).ceil() as usize;

        // Rewrite the maps in place from absolute angles to fractional
        // polar-grid indices.
        let theta_step = (theta_max - theta_min) / polar_w as f64;
        let phi_step = (phi_max - phi_min) / polar_h as f64;
        for v in xmap.iter_mut() {
            *v = (*v - theta_min) / theta_step;
        }
        for v in ymap.iter_mut() {
            *v = (*v - phi_min) / phi_step;
        }

        tracing::debug!(
            "polar grid {}x{} for image {}x{} (multiplier {})",
            polar_w,
            polar_h,
            image_w,
            image_h,
            multiplier
        );

        Ok(Self {
            multiplier,
            image_size: [image_w, image_h],
            polar_size: [polar_w, polar_h],
            xmap,
            ymap,
        })
    }

    /// Per-axis supersampling factor.
    pub fn multiplier(&self) -> usize {
        self.multiplier
    }

    /// Cartesian image size `[width, height]` in whole pixels.
    pub fn image_size(&self) -> [usize; 2] {
        self.image_size
    }

    /// Polar grid size `[width, height]` in cells.
    pub fn polar_size(&self) -> [usize; 2] {
        self.polar_size
    }

    /// Fractional colatitude-index map over the supersampled grid.
    pub fn xmap(&self) -> &Array2<f64> {
        &self.xmap
    }

    /// Fractional azimuth-index map over the supersampled grid.
    pub fn ymap(&self) -> &Array2<f64> {
        &self.ymap
    }
}

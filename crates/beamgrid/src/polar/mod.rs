//! Beam-centred polar remapping of detector images.
//!
//! [`PolarTransform`] precomputes, once per imaging geometry, a supersampled
//! map from detector pixels to fractional polar-grid coordinates
//! (colatitude × azimuth about the beam axis), then resamples scalar images
//! in either direction with area-weighted splatting/gathering.

mod resample;
mod transform;

pub use transform::PolarTransform;

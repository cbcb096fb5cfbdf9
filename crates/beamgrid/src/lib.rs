//! beamgrid — robust background primitives for diffraction images.
//!
//! Two building blocks used when modelling the background of area-detector
//! diffraction images:
//!
//! 1. **Background** – per-shoebox robust background levels: extract the
//!    background-flagged pixels of a region, seed from their median, fit a
//!    robust Poisson mean, write the level back and mark consumed pixels.
//!    [`BackgroundCreator`] runs this over whole shoebox collections with
//!    per-region failure isolation.
//! 2. **Polar** – beam-centred polar remapping: [`PolarTransform`] derives a
//!    supersampled pixel-to-polar map from beam/goniometer/panel geometry
//!    and resamples scalar images in both directions.
//!
//! # Public API
//! - [`BackgroundCreator`], with [`RobustMeanSolver`] as the injection seam
//!   and [`RobustPoissonMean`] as the built-in solver
//! - [`Shoebox`] and the [`shoebox::mask`] bit flags
//! - [`PolarTransform`]
//! - [`Beam`], [`Goniometer`], [`LabProjector`], [`FlatPanel`]

pub mod background;
mod error;
pub mod geometry;
pub mod polar;
pub mod shoebox;

pub use background::{fit_region, BackgroundCreator, RobustFit, RobustMeanSolver, RobustPoissonMean};
pub use error::Error;
pub use geometry::{Beam, FlatPanel, Goniometer, LabProjector};
pub use polar::PolarTransform;
pub use shoebox::Shoebox;

//! Robust per-region background estimation.
//!
//! Stages, per shoebox:
//! 1. **Extract** – collect the `VALID | BACKGROUND` pixels.
//! 2. **Seed** – partial-reorder median of the samples (1.0 when exactly 0).
//! 3. **Fit** – robust mean through an injected [`RobustMeanSolver`].
//! 4. **Write back** – broadcast the level, mark consumed pixels.
//!
//! [`BackgroundCreator`] runs the same fit over whole shoebox collections,
//! isolating per-region failures into success flags.

mod batch;
mod region;
mod robust;

pub use batch::BackgroundCreator;
pub use region::fit_region;
pub use robust::{RobustFit, RobustMeanSolver, RobustPoissonMean};

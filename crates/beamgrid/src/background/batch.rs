//! Batch background fitting across many shoeboxes.

use crate::error::Error;
use crate::shoebox::Shoebox;

use super::region::fit_region;
use super::robust::{RobustMeanSolver, RobustPoissonMean};

/// Robust background creator applied over collections of shoeboxes.
///
/// Regions are fitted independently: a region that fails (no usable
/// background pixels, corrupt data, a non-converging fit) is recorded as
/// `false` in the returned flags and does not disturb its neighbours.
/// There is no rollback; a failed region's `background`/`mask` contents are
/// unreliable and callers must treat them accordingly.
#[derive(Debug, Clone)]
pub struct BackgroundCreator<S = RobustPoissonMean> {
    tuning_constant: f64,
    max_iter: usize,
    solver: S,
}

impl BackgroundCreator<RobustPoissonMean> {
    /// Create a creator using the built-in robust Poisson mean solver.
    pub fn new(tuning_constant: f64, max_iter: usize) -> Result<Self, Error> {
        Self::with_solver(tuning_constant, max_iter, RobustPoissonMean)
    }
}

impl<S: RobustMeanSolver> BackgroundCreator<S> {
    /// Create a creator with a caller-supplied solver.
    pub fn with_solver(tuning_constant: f64, max_iter: usize, solver: S) -> Result<Self, Error> {
        if !(tuning_constant > 0.0) {
            return Err(Error::InvalidTuningConstant(tuning_constant));
        }
        if max_iter == 0 {
            return Err(Error::InvalidMaxIter);
        }
        Ok(Self {
            tuning_constant,
            max_iter,
            solver,
        })
    }

    /// Fit one shoebox, returning the fitted background level.
    pub fn fit_region(&self, sbox: &mut Shoebox) -> Result<f64, Error> {
        fit_region(sbox, &self.solver, self.tuning_constant, self.max_iter)
    }

    /// Fit every shoebox independently.
    ///
    /// Returns one success flag per shoebox, in input order.
    pub fn fit_all(&self, sboxes: &mut [Shoebox]) -> Vec<bool> {
        let flags: Vec<bool> = sboxes
            .iter_mut()
            .map(|sbox| self.fit_region(sbox).is_ok())
            .collect();
        let n_ok = flags.iter().filter(|&&ok| ok).count();
        tracing::debug!("background fitted for {}/{} shoeboxes", n_ok, flags.len());
        flags
    }
}

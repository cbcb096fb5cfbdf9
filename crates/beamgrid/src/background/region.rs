//! Single-region robust background fit.

use crate::error::Error;
use crate::shoebox::{mask, Shoebox};

use super::robust::RobustMeanSolver;

/// Relative convergence tolerance handed to the robust mean solver.
const FIT_TOLERANCE: f64 = 1e-3;

/// Fit one robust background level to a shoebox.
///
/// Background samples are the pixels whose mask carries both
/// [`mask::VALID`] and [`mask::BACKGROUND`]. The fitted level is written to
/// every element of `background` and every consumed sample is marked
/// [`mask::BACKGROUND_USED`]; other pixels keep their flags. Returns the
/// fitted level.
///
/// The solver is seeded with the sample median, taken as the element at
/// index `len / 2` after a partial reorder (for even lengths this is the
/// upper middle element, not the two-element average), with an exactly zero
/// median replaced by 1.0 so a counts-based solver never starts degenerate.
pub fn fit_region<S: RobustMeanSolver>(
    sbox: &mut Shoebox,
    solver: &S,
    tuning_constant: f64,
    max_iter: usize,
) -> Result<f64, Error> {
    if !sbox.is_consistent() {
        return Err(Error::InconsistentShoebox {
            data: sbox.data.dim(),
            mask: sbox.mask.dim(),
            background: sbox.background.dim(),
        });
    }

    let code = mask::BACKGROUND_VALID;
    let num_background = sbox.mask.iter().filter(|&&m| m & code == code).count();
    if num_background == 0 {
        return Err(Error::NoBackgroundPixels);
    }

    // Negative counts mean the data was corrupted upstream; refuse before
    // the solver sees anything.
    let mut samples = Vec::with_capacity(num_background);
    for (index, (&m, &value)) in sbox.mask.iter().zip(sbox.data.iter()).enumerate() {
        if m & code == code {
            if value < 0.0 {
                return Err(Error::NegativeIntensity { index, value });
            }
            samples.push(value);
        }
    }

    let mid = samples.len() / 2;
    samples.select_nth_unstable_by(mid, f64::total_cmp);
    let mut seed = samples[mid];
    if seed == 0.0 {
        seed = 1.0;
    }

    let fit = solver.fit(&samples, seed, tuning_constant, FIT_TOLERANCE, max_iter);
    if !fit.converged {
        return Err(Error::NotConverged { max_iter });
    }

    for (bg, m) in sbox.background.iter_mut().zip(sbox.mask.iter_mut()) {
        *bg = fit.mean;
        if *m & code == code {
            *m |= mask::BACKGROUND_USED;
        }
    }

    Ok(fit.mean)
}

//! Trait definitions

use crate::types::RealScalar;
use num::complex::Complex;

/// A material whose permittivity and permeability depend on frequency
///
/// Implementations that cache their values must be safe to call from several threads if
/// PFT computations for different surfaces or frequencies run concurrently.
pub trait MaterialModel<T: RealScalar> {
    /// Relative permittivity and permeability at angular frequency `omega`
    fn eps_mu(&self, omega: Complex<T>) -> (Complex<T>, Complex<T>);
}

/// Second moments of stochastic surface currents
///
/// `entry(i, j)` is the expectation of `c_i * conj(c_j)` for degrees of freedom `i` and `j`,
/// indexed in the global basis function numbering of the geometry.
pub trait CurrentCovariance<T: RealScalar> {
    /// Number of rows (and columns)
    fn dim(&self) -> usize;

    /// Entry of the covariance matrix
    fn entry(&self, row: usize, col: usize) -> Complex<T>;
}

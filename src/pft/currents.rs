//! Surface current data

use crate::traits::CurrentCovariance;
use crate::types::{Error, RealScalar, Result, ZVAC};
use ndarray::{ArrayBase, Data, Ix2};
use num::complex::Complex;
use num::Zero;

/// Surface currents on a geometry, either deterministic or statistical
///
/// Indices are global: the entries belonging to a surface start at its basis function offset.
pub enum SurfaceCurrents<'a, T: RealScalar> {
    /// Current coefficients from a linear solve, optionally with the right-hand side that
    /// produced them
    Coefficients {
        /// Electric and (normalised) magnetic current coefficients
        kn: &'a [Complex<T>],
        /// Excitation vector
        rhs: Option<&'a [Complex<T>]>,
    },
    /// Covariance matrix of fluctuating currents
    Covariance(&'a (dyn CurrentCovariance<T> + Sync)),
}

impl<'a, T: RealScalar> SurfaceCurrents<'a, T> {
    /// Currents given by a coefficient vector
    pub fn coefficients(kn: &'a [Complex<T>]) -> Self {
        Self::Coefficients { kn, rhs: None }
    }

    /// Currents given by a coefficient vector and the excitation that produced them
    pub fn with_excitation(kn: &'a [Complex<T>], rhs: &'a [Complex<T>]) -> Self {
        Self::Coefficients { kn, rhs: Some(rhs) }
    }

    /// Currents given by their covariance matrix
    pub fn covariance(sigma: &'a (dyn CurrentCovariance<T> + Sync)) -> Self {
        Self::Covariance(sigma)
    }

    /// Check that the data covers `num_bfs` degrees of freedom starting at `offset`
    pub(crate) fn check(&self, offset: usize, num_bfs: usize) -> Result<()> {
        let expected = offset + num_bfs;
        match self {
            Self::Coefficients { kn, rhs } => {
                if kn.len() < expected {
                    return Err(Error::CoefficientLength {
                        expected,
                        found: kn.len(),
                    });
                }
                if let Some(rhs) = rhs {
                    if rhs.len() < expected {
                        return Err(Error::ExcitationLength {
                            expected,
                            found: rhs.len(),
                        });
                    }
                }
            }
            Self::Covariance(sigma) => {
                if sigma.dim() < expected {
                    return Err(Error::CovarianceShape {
                        expected,
                        found: sigma.dim(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Bilinear current products between basis functions `alpha` and `beta`
    ///
    /// Magnetic coefficients are converted to field units by multiplying by `-ZVAC`; covariance
    /// entries are used as they are.
    pub fn products(&self, offset: usize, is_pec: bool, alpha: usize, beta: usize) -> CurrentProducts<T> {
        match self {
            Self::Coefficients { kn, .. } => {
                if is_pec {
                    let k_alpha = kn[offset + alpha];
                    let k_beta = kn[offset + beta];
                    CurrentProducts::electric(k_alpha.conj() * k_beta)
                } else {
                    let zvac = T::from(ZVAC).unwrap();
                    let k_alpha = kn[offset + 2 * alpha];
                    let n_alpha = -kn[offset + 2 * alpha + 1] * zvac;
                    let k_beta = kn[offset + 2 * beta];
                    let n_beta = -kn[offset + 2 * beta + 1] * zvac;
                    CurrentProducts {
                        kk: k_alpha.conj() * k_beta,
                        kn: k_alpha.conj() * n_beta,
                        nk: n_alpha.conj() * k_beta,
                        nn: n_alpha.conj() * n_beta,
                    }
                }
            }
            Self::Covariance(sigma) => {
                if is_pec {
                    CurrentProducts::electric(sigma.entry(offset + beta, offset + alpha))
                } else {
                    let a = offset + 2 * alpha;
                    let b = offset + 2 * beta;
                    CurrentProducts {
                        kk: sigma.entry(b, a),
                        kn: sigma.entry(b + 1, a),
                        nk: sigma.entry(b, a + 1),
                        nn: sigma.entry(b + 1, a + 1),
                    }
                }
            }
        }
    }
}

/// Products `conj(x_alpha) * y_beta` of electric (K) and magnetic (N) current coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentProducts<T: RealScalar> {
    /// Electric-electric
    pub kk: Complex<T>,
    /// Electric-magnetic
    pub kn: Complex<T>,
    /// Magnetic-electric
    pub nk: Complex<T>,
    /// Magnetic-magnetic
    pub nn: Complex<T>,
}

impl<T: RealScalar> CurrentProducts<T> {
    fn electric(kk: Complex<T>) -> Self {
        Self {
            kk,
            kn: Complex::zero(),
            nk: Complex::zero(),
            nn: Complex::zero(),
        }
    }
}

impl<T: RealScalar, S: Data<Elem = Complex<T>>> CurrentCovariance<T> for ArrayBase<S, Ix2> {
    fn dim(&self) -> usize {
        usize::min(self.nrows(), self.ncols())
    }

    fn entry(&self, row: usize, col: usize) -> Complex<T> {
        self[[row, col]]
    }
}

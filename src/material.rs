//! Exterior media

use crate::traits::MaterialModel;
use crate::types::{RealScalar, ZVAC};
use num::complex::Complex;
use num::{One, Zero};

/// Vacuum: unit relative permittivity and permeability
#[derive(Debug, Clone, Copy, Default)]
pub struct Vacuum;

impl<T: RealScalar> MaterialModel<T> for Vacuum {
    fn eps_mu(&self, _omega: Complex<T>) -> (Complex<T>, Complex<T>) {
        (Complex::one(), Complex::one())
    }
}

/// A non-dispersive material
#[derive(Debug, Clone, Copy)]
pub struct ConstantMaterial<T: RealScalar> {
    eps: Complex<T>,
    mu: Complex<T>,
}

impl<T: RealScalar> ConstantMaterial<T> {
    /// Create a material with the given relative permittivity and permeability
    pub fn new(eps: Complex<T>, mu: Complex<T>) -> Self {
        Self { eps, mu }
    }

    /// Create a non-magnetic material with the given relative permittivity
    pub fn dielectric(eps: Complex<T>) -> Self {
        Self {
            eps,
            mu: Complex::one(),
        }
    }
}

impl<T: RealScalar> MaterialModel<T> for ConstantMaterial<T> {
    fn eps_mu(&self, _omega: Complex<T>) -> (Complex<T>, Complex<T>) {
        (self.eps, self.mu)
    }
}

impl<T: RealScalar, F: Fn(Complex<T>) -> (Complex<T>, Complex<T>)> MaterialModel<T> for F {
    fn eps_mu(&self, omega: Complex<T>) -> (Complex<T>, Complex<T>) {
        self(omega)
    }
}

/// Wave parameters of a medium at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium<T: RealScalar> {
    /// Angular frequency
    pub omega: Complex<T>,
    /// Wave impedance in ohms
    pub impedance: Complex<T>,
    /// Square of the wavenumber
    pub wavenumber_squared: Complex<T>,
}

impl<T: RealScalar> Medium<T> {
    /// Evaluate the material at `omega`
    pub fn new(material: &(impl MaterialModel<T> + ?Sized), omega: Complex<T>) -> Self {
        let (eps, mu) = material.eps_mu(omega);
        let zvac = T::from(ZVAC).unwrap();
        Self {
            omega,
            impedance: (mu / eps).sqrt() * zvac,
            wavenumber_squared: omega * omega * eps * mu,
        }
    }

    /// Whether the frequency is zero, for which the force prefactors are undefined
    pub fn is_static(&self) -> bool {
        self.omega.is_zero()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vacuum_medium() {
        let medium = Medium::new(&Vacuum, Complex::new(2.0, 0.0));
        assert_relative_eq!(medium.impedance.re, ZVAC, max_relative = 1e-14);
        assert_relative_eq!(medium.impedance.im, 0.0);
        assert_relative_eq!(medium.wavenumber_squared.re, 4.0, max_relative = 1e-14);
    }

    #[test]
    fn test_dielectric_medium() {
        let glass = ConstantMaterial::dielectric(Complex::new(4.0, 0.0));
        let medium = Medium::new(&glass, Complex::new(1.5, 0.0));
        assert_relative_eq!(medium.impedance.re, ZVAC / 2.0, max_relative = 1e-14);
        assert_relative_eq!(medium.wavenumber_squared.re, 9.0, max_relative = 1e-14);
    }

    #[test]
    fn test_closure_material() {
        let drude = |w: Complex<f64>| (Complex::new(1.0, 0.0) - Complex::new(4.0, 0.0) / (w * w), Complex::new(1.0, 0.0));
        let medium = Medium::new(&drude, Complex::new(1.0, 0.0));
        assert_relative_eq!(medium.wavenumber_squared.re, -3.0, max_relative = 1e-14);
    }
}

//! Power, force and torque on a surface
//!
//! The absorbed power, force and torque on a surface are reduced from the surface currents and
//! the overlap integrals between neighbouring basis functions. With `K` and `N` the electric and
//! magnetic current coefficients (in field units), `Z` the wave impedance and `k` the wavenumber of
//! the exterior medium, each edge `a` contributes
//!
//! ```text
//! dP   = 1/4 Re sum_b (conj(K_a) N_b - conj(N_a) K_b) <f_a, n x f_b>
//! dF_i = 1/4 (10/3) Re sum_b [ -(conj(K_a) K_b Z + conj(N_a) N_b / Z)
//!                                  * (<f_a, n_i f_b> - <div f_a, n_i div f_b> / k^2)
//!                              + 2 (conj(N_a) K_b - conj(K_a) N_b) <f_a, n_i x div f_b> / (i w) ]
//! ```
//!
//! and the torque uses the same expression with the torque integrals.

mod currents;

pub use currents::{CurrentProducts, SurfaceCurrents};

use crate::grid::{RwgGeometry, RwgSurface};
use crate::material::Medium;
use crate::overlap::OverlapIntegral;
use crate::traits::MaterialModel;
use crate::types::{Error, Pft, PftQuantity, RealScalar, Result, NUM_PFT, TEN_THIRDS, ZVAC};
use itertools::izip;
use log::{debug, trace, warn};
use num::complex::Complex;
use rayon::prelude::*;

/// Options for a power, force and torque computation
#[derive(Debug, Clone)]
pub struct PftOptions {
    by_edge: [bool; NUM_PFT],
    parallel: bool,
}

impl Default for PftOptions {
    fn default() -> Self {
        Self {
            by_edge: [false; NUM_PFT],
            parallel: true,
        }
    }
}

impl PftOptions {
    /// Request (or stop requesting) the per-edge contributions to a quantity
    pub fn set_by_edge(&mut self, quantity: PftQuantity, by_edge: bool) {
        self.by_edge[quantity.index()] = by_edge;
    }

    /// Request (or stop requesting) the per-edge contributions to every quantity
    pub fn set_all_by_edge(&mut self, by_edge: bool) {
        self.by_edge = [by_edge; NUM_PFT];
    }

    /// Evaluate edges in parallel
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Whether per-edge contributions to `quantity` are requested
    pub fn by_edge(&self, quantity: PftQuantity) -> bool {
        self.by_edge[quantity.index()]
    }

    /// Whether edges are evaluated in parallel
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

/// Result of a power, force and torque computation
#[derive(Debug, Clone, PartialEq)]
pub struct PftOutput<T: RealScalar> {
    pft: Pft<T>,
    extinction: Option<T>,
    by_edge: [Option<Vec<T>>; NUM_PFT],
}

impl<T: RealScalar> PftOutput<T> {
    /// Zero power, force and torque, with no extinction or per-edge data
    pub fn zero() -> Self {
        Self {
            pft: Pft::zero(),
            extinction: None,
            by_edge: Default::default(),
        }
    }

    /// Total power, force and torque
    pub fn pft(&self) -> &Pft<T> {
        &self.pft
    }

    /// Extinction power; only available when the excitation vector was given
    pub fn extinction(&self) -> Option<T> {
        self.extinction
    }

    /// Contribution of each edge to `quantity`, if it was requested
    pub fn by_edge(&self, quantity: PftQuantity) -> Option<&[T]> {
        self.by_edge[quantity.index()].as_deref()
    }
}

/// Contributions of edge `alpha` to the power, force and torque
fn edge_pft<T: RealScalar>(
    surface: &RwgSurface<T>,
    offset: usize,
    medium: &Medium<T>,
    currents: &SurfaceCurrents<'_, T>,
    alpha: usize,
) -> [T; NUM_PFT] {
    let quarter = T::from(0.25).unwrap();
    let force_prefactor = quarter * T::from(TEN_THIRDS).unwrap();
    let two = T::from(2.0).unwrap();
    let impedance = medium.impedance;
    let inv_k2 = medium.wavenumber_squared.inv();
    let two_over_iw = (Complex::<T>::i() * medium.omega).inv() * two;

    let mut result = [T::zero(); NUM_PFT];
    let neighbours = surface.overlapping_edges(alpha);
    for &beta in &neighbours {
        let o = surface.overlaps(alpha, beta);
        let p = currents.products(offset, surface.is_pec(), alpha, beta);

        result[0] = result[0] + ((p.kn - p.nk) * o[OverlapIntegral::Cross]).re * quarter;

        let electric = p.kk * impedance + p.nn / impedance;
        let mixed = (p.nk - p.kn) * two_over_iw;
        for &quantity in &PftQuantity::ALL[1..] {
            if let Some((bullet, nabla_nabla, times_nabla)) = o.force_integrals(quantity) {
                let value = -electric * (inv_k2 * (-nabla_nabla) + bullet) + mixed * times_nabla;
                result[quantity.index()] = result[quantity.index()] + value.re * force_prefactor;
            }
        }
    }
    result
}

/// Power, force and torque on one surface
///
/// `offset` is the index of the surface's first degree of freedom in the current data and
/// `exterior` the material outside the surface. Torques are about the coordinate origin.
///
/// # Panics
/// Panics if the current data does not cover the surface's degrees of freedom. Use
/// [RwgGeometry::try_get_pft] for a checked version.
pub fn surface_pft<T: RealScalar>(
    surface: &RwgSurface<T>,
    offset: usize,
    omega: Complex<T>,
    exterior: &(impl MaterialModel<T> + ?Sized),
    currents: &SurfaceCurrents<'_, T>,
    options: &PftOptions,
) -> PftOutput<T> {
    let medium = Medium::new(exterior, omega);
    if medium.is_static() {
        warn!("Force and torque are undefined at zero frequency");
    }
    let num_edges = surface.num_edges();

    let per_edge = if options.parallel {
        (0..num_edges)
            .into_par_iter()
            .map(|alpha| edge_pft(surface, offset, &medium, currents, alpha))
            .collect::<Vec<_>>()
    } else {
        (0..num_edges)
            .map(|alpha| edge_pft(surface, offset, &medium, currents, alpha))
            .collect::<Vec<_>>()
    };

    // Totals are summed in edge order so that they match the per-edge data exactly
    let mut totals = [T::zero(); NUM_PFT];
    for increments in &per_edge {
        for (total, value) in izip!(totals.iter_mut(), increments.iter()) {
            *total = *total + *value;
        }
    }

    let mut by_edge: [Option<Vec<T>>; NUM_PFT] = Default::default();
    for quantity in PftQuantity::ALL {
        if options.by_edge(quantity) {
            by_edge[quantity.index()] = Some(per_edge.iter().map(|d| d[quantity.index()]).collect());
        }
    }

    let extinction_power = match currents {
        SurfaceCurrents::Coefficients { kn, rhs: Some(rhs) } => {
            Some(extinction(surface, offset, kn, rhs))
        }
        _ => None,
    };

    debug!(
        "PFT over {} edges at omega = {:?}, impedance {:?}: power {:?}, force {:?}, torque {:?}",
        num_edges,
        omega,
        medium.impedance,
        totals[0],
        &totals[1..4],
        &totals[4..7]
    );

    PftOutput {
        pft: Pft::new(totals),
        extinction: extinction_power,
        by_edge,
    }
}

/// Extinction power: the work done by the incident field on the surface currents
///
/// # Panics
/// Panics if `kn` or `rhs` does not cover the surface's degrees of freedom.
pub fn extinction<T: RealScalar>(
    surface: &RwgSurface<T>,
    offset: usize,
    kn: &[Complex<T>],
    rhs: &[Complex<T>],
) -> T {
    let half = T::from(0.5).unwrap();
    let zvac = T::from(ZVAC).unwrap();
    let mut total = T::zero();
    for edge in 0..surface.num_edges() {
        if surface.is_pec() {
            let index = offset + edge;
            total = total + (kn[index].conj() * (-rhs[index] * zvac)).re * half;
        } else {
            let index = offset + 2 * edge;
            let k = kn[index];
            let n = -kn[index + 1] * zvac;
            total = total + (k.conj() * (-rhs[index] * zvac)).re * half;
            total = total + (n.conj() * (-rhs[index + 1])).re * half;
        }
    }
    total
}

impl<T: RealScalar> RwgGeometry<T> {
    /// Power, force and torque on a surface of the geometry
    ///
    /// Current data is indexed globally: the surface's degrees of freedom start at its basis
    /// function offset.
    pub fn try_get_pft(
        &self,
        surface_index: usize,
        omega: Complex<T>,
        currents: &SurfaceCurrents<'_, T>,
        options: &PftOptions,
    ) -> Result<PftOutput<T>> {
        let surface = self
            .surface(surface_index)
            .ok_or(Error::UnknownSurface(surface_index))?;
        let offset = self.bf_offset(surface_index);
        currents.check(offset, surface.num_bfs())?;
        trace!(
            "Surface {surface_index}: {} degrees of freedom at offset {offset}",
            surface.num_bfs()
        );
        Ok(surface_pft(
            surface,
            offset,
            omega,
            self.region(surface.exterior_region()),
            currents,
            options,
        ))
    }

    /// Power, force and torque on a surface of the geometry
    ///
    /// Invalid input is logged and gives zero power, force and torque.
    pub fn get_pft(
        &self,
        surface_index: usize,
        omega: Complex<T>,
        currents: &SurfaceCurrents<'_, T>,
        options: &PftOptions,
    ) -> PftOutput<T> {
        match self.try_get_pft(surface_index, omega, currents, options) {
            Ok(output) => output,
            Err(e) => {
                warn!("{e}; returning zero power, force and torque");
                PftOutput::zero()
            }
        }
    }

    /// Power, force and torque on the surface with the given label
    pub fn try_get_pft_by_label(
        &self,
        label: &str,
        omega: Complex<T>,
        currents: &SurfaceCurrents<'_, T>,
        options: &PftOptions,
    ) -> Result<PftOutput<T>> {
        let index = self
            .surface_by_label(label)
            .ok_or_else(|| Error::UnknownSurfaceLabel(label.to_string()))?;
        self.try_get_pft(index, omega, currents, options)
    }

    /// Power, force and torque on the surface with the given label
    ///
    /// An unknown label or invalid input is logged and gives zero power, force and torque.
    pub fn get_pft_by_label(
        &self,
        label: &str,
        omega: Complex<T>,
        currents: &SurfaceCurrents<'_, T>,
        options: &PftOptions,
    ) -> PftOutput<T> {
        match self.try_get_pft_by_label(label, omega, currents, options) {
            Ok(output) => output,
            Err(e) => {
                warn!("{e}; returning zero power, force and torque");
                PftOutput::zero()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::Vacuum;
    use crate::shapes::{regular_sphere, screen_triangles};
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn test_options() {
        let mut options = PftOptions::default();
        assert!(options.parallel());
        assert!(!options.by_edge(PftQuantity::Power));
        options.set_by_edge(PftQuantity::ZForce, true);
        assert!(options.by_edge(PftQuantity::ZForce));
        assert!(!options.by_edge(PftQuantity::XForce));
        options.set_all_by_edge(true);
        assert!(PftQuantity::ALL.iter().all(|q| options.by_edge(*q)));
        options.set_parallel(false);
        assert!(!options.parallel());
    }

    #[test]
    fn test_zero_currents() {
        let surface = regular_sphere::<f64>(1);
        let kn = vec![c(0.0, 0.0); surface.num_bfs()];
        let mut options = PftOptions::default();
        options.set_by_edge(PftQuantity::Power, true);
        let output = surface_pft(
            &surface,
            0,
            c(1.0, 0.0),
            &Vacuum,
            &SurfaceCurrents::coefficients(&kn),
            &options,
        );
        assert_eq!(output.pft(), &Pft::zero());
        assert_eq!(output.extinction(), None);
        assert_eq!(output.by_edge(PftQuantity::Power).map(|d| d.len()), Some(surface.num_edges()));
        assert!(output.by_edge(PftQuantity::XForce).is_none());
    }

    #[test]
    fn test_pec_has_no_power() {
        let mut surface = screen_triangles::<f64>(3, 1.0);
        surface.set_pec(true);
        let kn = (0..surface.num_bfs())
            .map(|i| c(1.0 + i as f64, 0.5 * i as f64))
            .collect::<Vec<_>>();
        let output = surface_pft(
            &surface,
            0,
            c(2.0, 0.0),
            &Vacuum,
            &SurfaceCurrents::coefficients(&kn),
            &PftOptions::default(),
        );
        assert_relative_eq!(output.pft().power(), 0.0);
    }

    #[test]
    fn test_single_electric_mode_extinction() {
        // conj(k) * (-ZVAC * rhs) with k = 1, rhs = -1 / ZVAC on one PEC edge
        let mut surface = screen_triangles::<f64>(1, 1.0);
        surface.set_pec(true);
        let mut kn = vec![c(0.0, 0.0); surface.num_bfs()];
        let mut rhs = vec![c(0.0, 0.0); surface.num_bfs()];
        kn[2] = c(1.0, 0.0);
        rhs[2] = c(-1.0 / ZVAC, 0.0);
        assert_relative_eq!(extinction(&surface, 0, &kn, &rhs), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_magnetic_extinction() {
        let surface = screen_triangles::<f64>(1, 1.0);
        let mut kn = vec![c(0.0, 0.0); surface.num_bfs()];
        let mut rhs = vec![c(0.0, 0.0); surface.num_bfs()];
        // n = -ZVAC * kn[1] = 2, -rhs[1] = 3
        kn[1] = c(-2.0 / ZVAC, 0.0);
        rhs[1] = c(-3.0, 0.0);
        assert_relative_eq!(extinction(&surface, 0, &kn, &rhs), 3.0, epsilon = 1e-14);
    }
}

//! Types specific to rwg-pft

use std::fmt::Debug;

/// Real scalar type used for geometry and for the real parts of all physical quantities
pub trait RealScalar: num::Float + Debug + Send + Sync + 'static {}

impl<T: num::Float + Debug + Send + Sync + 'static> RealScalar for T {}

/// Impedance of free space in ohms
///
/// Magnetic current coefficients are stored scaled by `-1/ZVAC`; this constant undoes that
/// normalisation. It is the vacuum value regardless of the exterior medium.
pub const ZVAC: f64 = 376.73031346177;

/// Conversion factor from (watts / c) to nanonewtons.
///
/// A force computed with fields in volts per micron and lengths in microns has units of
/// 1 W / c = (1 J/s) * (1e-8 s/m) / 3 = (10/3) nN. Torques pick up the same factor and come out in
/// nN * microns.
pub const TEN_THIRDS: f64 = 10.0 / 3.0;

/// Number of power, force and torque quantities
pub const NUM_PFT: usize = 7;

/// One of the seven power, force and torque quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PftQuantity {
    /// Absorbed power
    Power = 0,
    /// x-component of force
    XForce = 1,
    /// y-component of force
    YForce = 2,
    /// z-component of force
    ZForce = 3,
    /// x-component of torque
    XTorque = 4,
    /// y-component of torque
    YTorque = 5,
    /// z-component of torque
    ZTorque = 6,
}

impl PftQuantity {
    /// All quantities in storage order
    pub const ALL: [PftQuantity; NUM_PFT] = [
        PftQuantity::Power,
        PftQuantity::XForce,
        PftQuantity::YForce,
        PftQuantity::ZForce,
        PftQuantity::XTorque,
        PftQuantity::YTorque,
        PftQuantity::ZTorque,
    ];

    /// Position of this quantity in a PFT array
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Power, force and torque on one surface at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pft<T: RealScalar> {
    values: [T; NUM_PFT],
}

impl<T: RealScalar> Pft<T> {
    /// Create from values stored in [`PftQuantity`] order
    pub fn new(values: [T; NUM_PFT]) -> Self {
        Self { values }
    }

    /// All quantities zero
    pub fn zero() -> Self {
        Self {
            values: [T::zero(); NUM_PFT],
        }
    }

    /// Get a single quantity
    pub fn get(&self, quantity: PftQuantity) -> T {
        self.values[quantity.index()]
    }

    /// Absorbed power
    pub fn power(&self) -> T {
        self.values[0]
    }

    /// Force vector
    pub fn force(&self) -> [T; 3] {
        [self.values[1], self.values[2], self.values[3]]
    }

    /// Torque vector about the coordinate origin
    pub fn torque(&self) -> [T; 3] {
        [self.values[4], self.values[5], self.values[6]]
    }

    /// Values in [`PftQuantity`] order
    pub fn as_array(&self) -> &[T; NUM_PFT] {
        &self.values
    }
}

impl<T: RealScalar> std::ops::Index<PftQuantity> for Pft<T> {
    type Output = T;
    fn index(&self, quantity: PftQuantity) -> &T {
        &self.values[quantity.index()]
    }
}

/// Error type
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Surface index out of range
    #[error("unknown surface #{0}")]
    UnknownSurface(usize),
    /// No surface carries the label
    #[error("unknown surface label {0}")]
    UnknownSurfaceLabel(String),
    /// Current coefficient vector too short for the surface
    #[error("coefficient vector has {found} entries, surface needs {expected}")]
    CoefficientLength {
        /// Entries needed
        expected: usize,
        /// Entries supplied
        found: usize,
    },
    /// Excitation vector too short for the surface
    #[error("excitation vector has {found} entries, surface needs {expected}")]
    ExcitationLength {
        /// Entries needed
        expected: usize,
        /// Entries supplied
        found: usize,
    },
    /// Covariance matrix too small for the surface
    #[error("covariance matrix has dimension {found}, surface needs {expected}")]
    CovarianceShape {
        /// Dimension needed
        expected: usize,
        /// Dimension supplied
        found: usize,
    },
    /// A cell references a vertex that was never added
    #[error("cell references unknown vertex {0}")]
    UnknownVertex(usize),
    /// More than two panels share an edge
    #[error("edge ({0}, {1}) is shared by more than two panels")]
    NonManifoldEdge(usize, usize),
    /// A surface references a region that is not defined
    #[error("surface #{surface} references unknown region {region}")]
    UnknownRegion {
        /// Surface index
        surface: usize,
        /// Region index
        region: usize,
    },
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

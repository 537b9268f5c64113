//! Power, force and torque on surfaces carrying RWG currents
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod grid;
pub mod material;
pub mod overlap;
pub mod pft;
pub mod shapes;
pub mod traits;
pub mod types;

pub use grid::{RwgGeometry, RwgSurface, RwgSurfaceBuilder};
pub use pft::{PftOptions, PftOutput, SurfaceCurrents};
pub use types::{Error, Pft, PftQuantity, Result};

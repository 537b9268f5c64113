//! Surface meshes with RWG basis functions
//!
//! Surfaces are stored as arenas: panels and edges refer to each other by index only.
mod builder;
mod geometry;
mod surface;
pub(crate) mod vector;

pub use builder::{BoundaryEdges, RwgSurfaceBuilder};
pub use geometry::RwgGeometry;
pub use surface::{Edge, Panel, PanelLocalIndexPair, RwgSurface};

//! Collections of surfaces embedded in material regions

use crate::grid::surface::RwgSurface;
use crate::material::Vacuum;
use crate::traits::MaterialModel;
use crate::types::{Error, RealScalar, Result};

fn compute_bf_offsets<T: RealScalar>(surfaces: &[RwgSurface<T>]) -> (Vec<usize>, usize) {
    let mut offsets = Vec::with_capacity(surfaces.len());
    let mut total = 0;
    for surface in surfaces {
        offsets.push(total);
        total += surface.num_bfs();
    }
    (offsets, total)
}

/// A set of surfaces sharing one global numbering of current degrees of freedom
///
/// The degrees of freedom of surface `s` occupy `bf_offset(s)..bf_offset(s) + num_bfs` of the
/// solution vector; electric and magnetic coefficients of edge `e` sit at `2e` and `2e + 1`
/// relative to the offset on non-PEC surfaces, and the electric coefficient at `e` on PEC
/// surfaces.
pub struct RwgGeometry<T: RealScalar> {
    surfaces: Vec<RwgSurface<T>>,
    regions: Vec<Box<dyn MaterialModel<T> + Send + Sync>>,
    bf_offsets: Vec<usize>,
    total_bfs: usize,
}

impl<T: RealScalar> RwgGeometry<T> {
    /// Create a geometry from surfaces and the materials of the regions they reference
    pub fn new(
        surfaces: Vec<RwgSurface<T>>,
        regions: Vec<Box<dyn MaterialModel<T> + Send + Sync>>,
    ) -> Result<Self> {
        for (index, surface) in surfaces.iter().enumerate() {
            if surface.exterior_region >= regions.len() {
                return Err(Error::UnknownRegion {
                    surface: index,
                    region: surface.exterior_region,
                });
            }
        }
        let (bf_offsets, total_bfs) = compute_bf_offsets(&surfaces);
        Ok(Self {
            surfaces,
            regions,
            bf_offsets,
            total_bfs,
        })
    }

    /// Create a geometry whose surfaces all sit in vacuum
    pub fn in_vacuum(mut surfaces: Vec<RwgSurface<T>>) -> Self {
        for s in surfaces.iter_mut() {
            s.exterior_region = 0;
        }
        let (bf_offsets, total_bfs) = compute_bf_offsets(&surfaces);
        Self {
            surfaces,
            regions: vec![Box::new(Vacuum) as Box<dyn MaterialModel<T> + Send + Sync>],
            bf_offsets,
            total_bfs,
        }
    }

    /// Number of surfaces
    pub fn num_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Get a surface, if the index is valid
    pub fn surface(&self, index: usize) -> Option<&RwgSurface<T>> {
        self.surfaces.get(index)
    }

    /// Find a surface by its label
    pub fn surface_by_label(&self, label: &str) -> Option<usize> {
        self.surfaces
            .iter()
            .position(|s| s.label.as_deref() == Some(label))
    }

    /// Offset of the first degree of freedom of a surface in the global numbering
    pub fn bf_offset(&self, index: usize) -> usize {
        self.bf_offsets[index]
    }

    /// Total number of degrees of freedom
    pub fn total_bfs(&self) -> usize {
        self.total_bfs
    }

    /// Material of a region
    pub fn region(&self, index: usize) -> &(dyn MaterialModel<T> + Send + Sync) {
        self.regions[index].as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::ConstantMaterial;
    use crate::shapes::{regular_sphere, screen_triangles};
    use num::complex::Complex;

    #[test]
    fn test_offsets() {
        let mut plate = screen_triangles::<f64>(2, 1.0);
        plate.is_pec = true;
        let sphere = regular_sphere::<f64>(0);
        let g = RwgGeometry::in_vacuum(vec![plate, sphere]);
        assert_eq!(g.num_surfaces(), 2);
        assert_eq!(g.bf_offset(0), 0);
        assert_eq!(g.bf_offset(1), 16);
        assert_eq!(g.total_bfs(), 16 + 24);
    }

    #[test]
    fn test_labels() {
        let mut plate = screen_triangles::<f64>(1, 1.0);
        plate.label = Some("plate".to_string());
        let g = RwgGeometry::in_vacuum(vec![regular_sphere(0), plate]);
        assert_eq!(g.surface_by_label("plate"), Some(1));
        assert_eq!(g.surface_by_label("sphere"), None);
    }

    #[test]
    fn test_unknown_region() {
        let mut sphere = regular_sphere::<f64>(0);
        sphere.exterior_region = 2;
        let regions: Vec<Box<dyn MaterialModel<f64> + Send + Sync>> = vec![
            Box::new(Vacuum),
            Box::new(ConstantMaterial::dielectric(Complex::new(2.0, 0.0))),
        ];
        assert_eq!(
            RwgGeometry::new(vec![sphere], regions).err(),
            Some(Error::UnknownRegion {
                surface: 0,
                region: 2
            })
        );
    }
}

//! Overlap integrals between RWG basis functions
//!
//! The overlap integrals between basis functions `f_a` and `f_b` on a surface with unit normal
//! `n` are
//!
//! | index | integral |
//! |---|---|
//! | 0 | `int f_a . f_b` |
//! | 1 | `int f_a . (n x f_b)` |
//! | 2 | `int n_x f_a . f_b` |
//! | 3 | `int n_x (div f_a)(div f_b)` |
//! | 4 | `int (n x f_a)_x (div f_b)` |
//! | 5-7 | as 2-4 with x replaced by y |
//! | 8-10 | as 2-4 with x replaced by z |
//! | 11-19 | as 2-10 with an extra factor of `r x` for torques |
//!
//! Torques are taken about the origin of the coordinate system in which the surface is defined.
//! There is no separate pivot: use [`RwgSurface::translate`] to move the surface instead.
//!
//! The integrals are pure functions of the geometry and are recomputed on every call.
mod panel;

pub use panel::add_panel_contributions;

use crate::grid::RwgSurface;
use crate::types::{PftQuantity, RealScalar};

/// Number of overlap integrals between a pair of basis functions
pub const NUM_OVERLAPS: usize = 20;

/// Maximum number of basis functions that overlap a given one (including itself)
pub const MAX_OVERLAPPING_EDGES: usize = 5;

/// The kinds of overlap integral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum OverlapIntegral {
    /// `int f_a . f_b`
    Overlap = 0,
    /// `int f_a . (n x f_b)`
    Cross = 1,
    /// `int n_x f_a . f_b`
    BulletX = 2,
    /// `int n_x (div f_a)(div f_b)`
    NablaNablaX = 3,
    /// `int (n x f_a)_x (div f_b)`
    TimesNablaX = 4,
    /// `int n_y f_a . f_b`
    BulletY = 5,
    /// `int n_y (div f_a)(div f_b)`
    NablaNablaY = 6,
    /// `int (n x f_a)_y (div f_b)`
    TimesNablaY = 7,
    /// `int n_z f_a . f_b`
    BulletZ = 8,
    /// `int n_z (div f_a)(div f_b)`
    NablaNablaZ = 9,
    /// `int (n x f_a)_z (div f_b)`
    TimesNablaZ = 10,
    /// `int (r x n)_x f_a . f_b`
    RxBulletX = 11,
    /// `int (r x n)_x (div f_a)(div f_b)`
    RxNablaNablaX = 12,
    /// `int (r x (n x f_a))_x (div f_b)`
    RxTimesNablaX = 13,
    /// `int (r x n)_y f_a . f_b`
    RxBulletY = 14,
    /// `int (r x n)_y (div f_a)(div f_b)`
    RxNablaNablaY = 15,
    /// `int (r x (n x f_a))_y (div f_b)`
    RxTimesNablaY = 16,
    /// `int (r x n)_z f_a . f_b`
    RxBulletZ = 17,
    /// `int (r x n)_z (div f_a)(div f_b)`
    RxNablaNablaZ = 18,
    /// `int (r x (n x f_a))_z (div f_b)`
    RxTimesNablaZ = 19,
}

/// The twenty overlap integrals between an ordered pair of basis functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlaps<T: RealScalar> {
    pub(crate) values: [T; NUM_OVERLAPS],
}

impl<T: RealScalar> Overlaps<T> {
    /// All integrals zero
    pub fn zero() -> Self {
        Self {
            values: [T::zero(); NUM_OVERLAPS],
        }
    }

    /// Values in [`OverlapIntegral`] order
    pub fn as_array(&self) -> &[T; NUM_OVERLAPS] {
        &self.values
    }

    /// Whether every integral is exactly zero
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == T::zero())
    }

    /// The (bullet, nabla-nabla, times-nabla) integrals that enter a force or torque component
    ///
    /// Returns `None` for [`PftQuantity::Power`].
    pub fn force_integrals(&self, quantity: PftQuantity) -> Option<(T, T, T)> {
        match quantity {
            PftQuantity::Power => None,
            _ => {
                let start = 2 + 3 * (quantity.index() - 1);
                Some((
                    self.values[start],
                    self.values[start + 1],
                    self.values[start + 2],
                ))
            }
        }
    }
}

impl<T: RealScalar> std::ops::Index<OverlapIntegral> for Overlaps<T> {
    type Output = T;
    fn index(&self, integral: OverlapIntegral) -> &T {
        &self.values[integral as usize]
    }
}

/// The basis functions whose overlap with a given one may be nonzero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlappingEdges {
    indices: [usize; MAX_OVERLAPPING_EDGES],
    len: usize,
}

impl OverlappingEdges {
    fn push(&mut self, index: usize) {
        self.indices[self.len] = index;
        self.len += 1;
    }

    /// Indices as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }

    /// Number of basis functions
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the indices
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.as_slice().iter()
    }

    /// Whether a basis function is in the list
    pub fn contains(&self, index: &usize) -> bool {
        self.as_slice().contains(index)
    }
}

impl<'a> IntoIterator for &'a OverlappingEdges {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: RealScalar> RwgSurface<T> {
    /// Compute the overlap integrals between basis functions `alpha` and `beta`
    ///
    /// Contributions come from every panel the two supports share. A panel enters with sign +1
    /// when it is the positive (or negative) panel of both basis functions and with sign -1 when
    /// it is positive for one and negative for the other.
    pub fn overlaps(&self, alpha: usize, beta: usize) -> Overlaps<T> {
        let e_alpha = self.edge(alpha);
        let e_beta = self.edge(beta);
        let length_product = e_alpha.length() * e_beta.length();
        let one = T::one();

        let mut overlaps = Overlaps::zero();

        let alpha_panels = [Some((e_alpha.positive(), one)), e_alpha.negative().map(|p| (p, -one))];
        let beta_panels = [Some((e_beta.positive(), one)), e_beta.negative().map(|p| (p, -one))];

        for (a, sign_a) in alpha_panels.iter().flatten() {
            for (b, sign_b) in beta_panels.iter().flatten() {
                if a.panel == b.panel {
                    add_panel_contributions(
                        self,
                        a.panel,
                        a.local_index,
                        b.local_index,
                        *sign_a * *sign_b,
                        length_product,
                        &mut overlaps,
                    );
                }
            }
        }
        overlaps
    }

    /// The plain overlap `int f_a . f_b` and the crossed overlap `int f_a . (n x f_b)`
    pub fn overlap(&self, alpha: usize, beta: usize) -> (T, T) {
        let overlaps = self.overlaps(alpha, beta);
        (
            overlaps[OverlapIntegral::Overlap],
            overlaps[OverlapIntegral::Cross],
        )
    }

    /// The basis functions that may overlap `alpha`
    ///
    /// The list starts with `alpha` itself, followed by the other two basis functions on its
    /// positive panel and, for interior edges, the other two on its negative panel. It has
    /// 3 entries for a boundary edge and 5 for an interior edge; edges that carry no basis
    /// function are skipped. Every basis function outside the list has zero overlap with `alpha`.
    pub fn overlapping_edges(&self, alpha: usize) -> OverlappingEdges {
        let mut result = OverlappingEdges {
            indices: [0; MAX_OVERLAPPING_EDGES],
            len: 0,
        };
        result.push(alpha);

        let edge = self.edge(alpha);
        for pair in std::iter::once(edge.positive()).chain(edge.negative()) {
            let panel = self.panel(pair.panel);
            for offset in 1..3 {
                if let Some(neighbour) = panel.edge((pair.local_index + offset) % 3) {
                    result.push(neighbour);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::{BoundaryEdges, RwgSurfaceBuilder};
    use crate::shapes::{regular_sphere, screen_triangles};
    use approx::assert_relative_eq;
    use paste::paste;

    fn bumpy_screen(ncells: usize) -> RwgSurface<f64> {
        let mut b = RwgSurfaceBuilder::new();
        let n = ncells as f64;
        for y in 0..ncells + 1 {
            for x in 0..ncells + 1 {
                let (px, py) = (1.5 * x as f64 / n, 1.5 * y as f64 / n);
                b.add_point(y * (ncells + 1) + x, [px, py, 0.1 * f64::sin(3.0 * px + py)]);
            }
        }
        for y in 0..ncells {
            for x in 0..ncells {
                let v = y * (ncells + 1) + x;
                b.add_cell([v, v + 1, v + ncells + 2]);
                b.add_cell([v, v + ncells + 2, v + ncells + 1]);
            }
        }
        b.create_surface().unwrap()
    }

    fn all_surfaces() -> Vec<RwgSurface<f64>> {
        vec![
            screen_triangles(4, 1.0),
            regular_sphere(1),
            regular_sphere(2),
            bumpy_screen(3),
        ]
    }

    #[test]
    fn test_neighbour_counts() {
        for s in all_surfaces() {
            for (alpha, e) in s.edges().enumerate() {
                let n = s.overlapping_edges(alpha);
                assert_eq!(n.as_slice()[0], alpha);
                if e.is_interior() {
                    assert_eq!(n.len(), 5);
                } else {
                    assert_eq!(n.len(), 3);
                }
            }
        }
    }

    #[test]
    fn test_exterior_edges_are_skipped() {
        let mut b = RwgSurfaceBuilder::<f64>::new();
        b.add_point(0, [0.0, 0.0, 0.0]);
        b.add_point(1, [1.0, 0.0, 0.0]);
        b.add_point(2, [1.0, 1.0, 0.0]);
        b.add_point(3, [0.0, 1.0, 0.0]);
        b.add_cell([0, 1, 2]);
        b.add_cell([0, 2, 3]);
        b.set_boundary_edges(BoundaryEdges::Exterior);
        let s = b.create_surface().unwrap();
        assert_eq!(s.overlapping_edges(0).as_slice(), &[0]);
    }

    #[test]
    fn test_sparsity() {
        for s in all_surfaces().iter().take(2) {
            for alpha in 0..s.num_edges() {
                let neighbours = s.overlapping_edges(alpha);
                for beta in 0..s.num_edges() {
                    if !neighbours.contains(&beta) {
                        assert!(s.overlaps(alpha, beta).is_zero());
                    }
                }
            }
        }
    }

    #[test]
    fn test_self_overlap_positive() {
        for s in all_surfaces() {
            for alpha in 0..s.num_edges() {
                assert!(s.overlap(alpha, alpha).0 > 0.0);
            }
        }
    }

    #[test]
    fn test_cross_antisymmetric() {
        for s in all_surfaces() {
            for alpha in 0..s.num_edges() {
                for beta in s.overlapping_edges(alpha).iter() {
                    let (_, ab) = s.overlap(alpha, *beta);
                    let (_, ba) = s.overlap(*beta, alpha);
                    assert_relative_eq!(ab, -ba, epsilon = 1e-13);
                }
                assert_relative_eq!(s.overlap(alpha, alpha).1, 0.0, epsilon = 1e-13);
            }
        }
    }

    macro_rules! test_symmetric {
        ($($integral:ident),+) => {
            $(
                paste! {
                    #[test]
                    fn [<test_symmetric_ $integral:snake>]() {
                        for s in all_surfaces() {
                            for alpha in 0..s.num_edges() {
                                for beta in s.overlapping_edges(alpha).iter() {
                                    let ab = s.overlaps(alpha, *beta)[OverlapIntegral::$integral];
                                    let ba = s.overlaps(*beta, alpha)[OverlapIntegral::$integral];
                                    assert_relative_eq!(ab, ba, epsilon = 1e-13, max_relative = 1e-12);
                                }
                            }
                        }
                    }
                }
            )*
        };
    }

    test_symmetric!(
        Overlap,
        BulletX,
        BulletY,
        BulletZ,
        NablaNablaX,
        NablaNablaY,
        NablaNablaZ,
        RxBulletX,
        RxBulletY,
        RxBulletZ,
        RxNablaNablaX,
        RxNablaNablaY,
        RxNablaNablaZ
    );

    #[test]
    fn test_bullet_is_normal_weighted_overlap() {
        let s = regular_sphere::<f64>(1);
        for alpha in 0..s.num_edges() {
            for beta in s.overlapping_edges(alpha).iter() {
                let o = s.overlaps(alpha, *beta);
                let bullet = [
                    o[OverlapIntegral::BulletX],
                    o[OverlapIntegral::BulletY],
                    o[OverlapIntegral::BulletZ],
                ];
                let norm2: f64 = bullet.iter().map(|b| b * b).sum();
                if alpha == *beta {
                    // both panels contribute with different normals
                    assert!(norm2.sqrt() <= o[OverlapIntegral::Overlap] + 1e-14);
                } else {
                    // a single shared panel
                    assert_relative_eq!(
                        norm2.sqrt(),
                        o[OverlapIntegral::Overlap].abs(),
                        epsilon = 1e-14
                    );
                }
            }
        }
    }

    #[test]
    fn test_force_integrals() {
        let s = regular_sphere::<f64>(0);
        let o = s.overlaps(0, 1);
        assert!(o.force_integrals(PftQuantity::Power).is_none());
        assert_eq!(
            o.force_integrals(PftQuantity::YForce),
            Some((
                o[OverlapIntegral::BulletY],
                o[OverlapIntegral::NablaNablaY],
                o[OverlapIntegral::TimesNablaY]
            ))
        );
        assert_eq!(
            o.force_integrals(PftQuantity::ZTorque),
            Some((
                o[OverlapIntegral::RxBulletZ],
                o[OverlapIntegral::RxNablaNablaZ],
                o[OverlapIntegral::RxTimesNablaZ]
            ))
        );
    }
}

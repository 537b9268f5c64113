//! Definition of various test shapes.

use crate::grid::{RwgSurface, RwgSurfaceBuilder};
use crate::types::RealScalar;
use std::collections::HashMap;

/// Create a square plate with triangle cells
///
/// Create a surface of the square \[0,side\]^2 in the plane z = 0 with triangle cells. The input
/// ncells is the number of cells along each side of the square. All panel normals point in the
/// +z direction and boundary edges carry half-RWG basis functions.
pub fn screen_triangles<T: RealScalar>(ncells: usize, side: T) -> RwgSurface<T> {
    if ncells == 0 {
        panic!("Cannot create a grid with 0 cells");
    }
    let mut b = RwgSurfaceBuilder::new_with_capacity((ncells + 1) * (ncells + 1), 2 * ncells * ncells);

    let zero = T::zero();
    let n = T::from(ncells).unwrap();
    for y in 0..ncells + 1 {
        for x in 0..ncells + 1 {
            b.add_point(
                y * (ncells + 1) + x,
                [
                    side * T::from(x).unwrap() / n,
                    side * T::from(y).unwrap() / n,
                    zero,
                ],
            );
        }
    }
    for y in 0..ncells {
        for x in 0..ncells {
            b.add_cell([
                y * (ncells + 1) + x,
                y * (ncells + 1) + x + 1,
                y * (ncells + 1) + x + ncells + 2,
            ]);
            b.add_cell([
                y * (ncells + 1) + x,
                y * (ncells + 1) + x + ncells + 2,
                y * (ncells + 1) + x + ncells + 1,
            ]);
        }
    }

    b.create_surface().unwrap()
}

/// Create a regular sphere
///
/// A regular sphere is created by starting with a regular octahedron. The shape is then refined `refinement_level` times.
/// Each time the grid is refined, each triangle is split into four triangles (by adding lines connecting the midpoints of
/// each edge). The new points are then scaled so that they are a distance of 1 from the origin. Panel normals point
/// outwards.
pub fn regular_sphere<T: RealScalar>(refinement_level: u32) -> RwgSurface<T> {
    let mut b = RwgSurfaceBuilder::new_with_capacity(
        2 + usize::pow(4, refinement_level + 1),
        8 * usize::pow(4, refinement_level),
    );

    let mut points = Vec::<[T; 3]>::with_capacity(2 + usize::pow(4, refinement_level + 1));

    let zero = T::zero();
    let one = T::one();
    let half = T::from(0.5).unwrap();

    points.push([zero, zero, one]);
    points.push([one, zero, zero]);
    points.push([zero, one, zero]);
    points.push([-one, zero, zero]);
    points.push([zero, -one, zero]);
    points.push([zero, zero, -one]);

    let mut cells = vec![
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [0, 4, 1],
        [5, 2, 1],
        [5, 3, 2],
        [5, 4, 3],
        [5, 1, 4],
    ];

    for level in 0..refinement_level {
        let mut edge_points = HashMap::new();
        let mut new_cells = Vec::with_capacity(8 * usize::pow(4, level + 1));
        for c in &cells {
            let edges = [[1, 2], [0, 2], [0, 1]]
                .iter()
                .map(|[i, j]| {
                    let mut pt_i = c[*i];
                    let mut pt_j = c[*j];
                    if pt_i > pt_j {
                        std::mem::swap(&mut pt_i, &mut pt_j);
                    }
                    *edge_points.entry((pt_i, pt_j)).or_insert_with(|| {
                        let v_i = points[pt_i];
                        let v_j = points[pt_j];
                        let mut new_pt = [
                            half * (v_i[0] + v_j[0]),
                            half * (v_i[1] + v_j[1]),
                            half * (v_i[2] + v_j[2]),
                        ];
                        let size = new_pt.iter().fold(zero, |acc, &x| acc + x * x).sqrt();
                        for i in new_pt.iter_mut() {
                            *i = *i / size;
                        }
                        points.push(new_pt);
                        points.len() - 1
                    })
                })
                .collect::<Vec<_>>();
            new_cells.push([c[0], edges[2], edges[1]]);
            new_cells.push([c[1], edges[0], edges[2]]);
            new_cells.push([c[2], edges[1], edges[0]]);
            new_cells.push([edges[0], edges[1], edges[2]]);
        }
        cells = new_cells;
    }
    for (i, v) in points.iter().enumerate() {
        b.add_point(i, *v);
    }
    for c in &cells {
        b.add_cell(*c);
    }

    b.create_surface().unwrap()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::vector::dot;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen() {
        let s = screen_triangles::<f64>(3, 2.0);
        assert_eq!(s.num_vertices(), 16);
        assert_eq!(s.num_panels(), 18);
        assert_eq!(s.num_edges(), 16 + 18 - 1);
        assert_relative_eq!(s.area(), 4.0, epsilon = 1e-13);
        for p in s.panels() {
            assert_relative_eq!(p.normal()[2], 1.0);
        }
    }

    #[test]
    fn test_sphere() {
        for level in 0..3 {
            let s = regular_sphere::<f64>(level);
            assert_eq!(s.num_panels(), 8 * usize::pow(4, level));
            assert_eq!(s.num_edges(), 12 * usize::pow(4, level));
            assert!(s.edges().all(|e| e.is_interior()));
            for p in s.panels() {
                assert!(dot(p.normal(), p.centroid()) > 0.0);
            }
        }
    }
}

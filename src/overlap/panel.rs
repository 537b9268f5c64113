//! Contributions of a single panel to the overlap integrals

use crate::grid::vector::{cross, dot, sub};
use crate::grid::RwgSurface;
use crate::overlap::Overlaps;
use crate::types::RealScalar;

/// Add the contributions of one panel to the overlap integrals between two basis functions
///
/// `alpha_index` and `beta_index` are the local indices (on this panel) of the free vertices of
/// the two basis functions, `sign` is +1 if both use the panel with the same orientation and -1
/// otherwise, and `length_product` is the product of the two edge lengths. Contributions are added
/// to `overlaps`, which is not reset.
///
/// All integrals are exact: with `Qa` the free vertex of the first basis function,
/// `L1 = Q(a+1) - Qa`, `L2 = Q(a+2) - Q(a+1)` and `DQ = Qa - Qb`, each integrand is a polynomial
/// of degree at most three in the barycentric coordinates and integrates to a fixed rational
/// combination of the dot and cross products below.
pub fn add_panel_contributions<T: RealScalar>(
    surface: &RwgSurface<T>,
    panel_index: usize,
    alpha_index: usize,
    beta_index: usize,
    sign: T,
    length_product: T,
    overlaps: &mut Overlaps<T>,
) {
    let panel = surface.panel(panel_index);
    let vertices = panel.vertices();
    let qa = surface.vertex(vertices[alpha_index]);
    let qa_p1 = surface.vertex(vertices[(alpha_index + 1) % 3]);
    let qa_p2 = surface.vertex(vertices[(alpha_index + 2) % 3]);
    let qb = surface.vertex(vertices[beta_index]);
    let z = panel.normal();

    let l1 = sub(qa_p1, qa);
    let l2 = sub(qa_p2, qa_p1);
    let dq = sub(qa, qb);

    let z_x_l1 = cross(z, &l1);
    let z_x_l2 = cross(z, &l2);
    let z_x_dq = cross(z, &dq);
    let z_x_qa = cross(z, qa);
    let qa_x_z_x_l1 = cross(qa, &z_x_l1);
    let qa_x_z_x_l2 = cross(qa, &z_x_l2);

    let c = |x: f64| T::from(x).unwrap();
    let two = c(2.0);

    let prefactor = sign * length_product / (two * panel.area());

    let l1_l1 = dot(&l1, &l1);
    let l1_l2 = dot(&l1, &l2);
    let l1_dq = dot(&l1, &dq);
    let l2_l2 = dot(&l2, &l2);
    let l2_dq = dot(&l2, &dq);

    let times_factor = ((two * l1[0] + l2[0]) * z_x_dq[0]
        + (two * l1[1] + l2[1]) * z_x_dq[1]
        + (two * l1[2] + l2[2]) * z_x_dq[2])
        / c(6.0);

    let bullet1 =
        (l1_l1 + l1_l2) / c(4.0) + l1_dq / c(3.0) + l2_l2 / c(12.0) + l2_dq / c(6.0);
    let bullet2 =
        (l1_l1 + l1_l2) / c(5.0) + l1_dq / c(4.0) + l2_l2 / c(15.0) + l2_dq / c(8.0);
    let bullet3 = l1_l1 / c(10.0)
        + two * l1_l2 / c(15.0)
        + l1_dq / c(8.0)
        + l2_l2 / c(20.0)
        + l2_dq / c(12.0);
    let nabla_cross = (l1_l1 + l1_l2) / two + l2_l2 / c(6.0);

    let values = &mut overlaps.values;
    values[0] = values[0] + prefactor * bullet1;
    values[1] = values[1] + prefactor * times_factor;

    for axis in 0..3 {
        // force integrals for this axis start at 2, torque integrals at 11
        let f = 2 + 3 * axis;
        let t = 11 + 3 * axis;

        values[f] = values[f] + prefactor * z[axis] * bullet1;
        values[f + 1] = values[f + 1] + prefactor * z[axis] * two;
        values[f + 2] = values[f + 2] + prefactor * (two * z_x_l1[axis] + z_x_l2[axis]) / c(3.0);

        values[t] = values[t]
            - prefactor * (z_x_qa[axis] * bullet1 + z_x_l1[axis] * bullet2 + z_x_l2[axis] * bullet3);
        values[t + 1] = values[t + 1]
            - prefactor
                * (two * z_x_qa[axis] + c(4.0) * z_x_l1[axis] / c(3.0) + two * z_x_l2[axis] / c(3.0));
        values[t + 2] = values[t + 2]
            + prefactor
                * (z[axis] * nabla_cross
                    + two * qa_x_z_x_l1[axis] / c(3.0)
                    + qa_x_z_x_l2[axis] / c(3.0));
    }
}

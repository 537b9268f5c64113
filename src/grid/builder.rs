//! Surface builder

use crate::grid::surface::{Edge, Panel, PanelLocalIndexPair, RwgSurface};
use crate::grid::vector::{add, cross, norm, scale, sub};
use crate::types::{Error, RealScalar, Result};
use log::warn;
use std::collections::HashMap;

/// Treatment of mesh edges that belong to a single panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryEdges {
    /// Boundary edges carry half-RWG basis functions that live on their positive panel only
    #[default]
    HalfRwg,
    /// Boundary edges carry no basis function
    Exterior,
}

/// Builder for an RWG surface
///
/// Points and cells are added by id; the first panel that contains an edge becomes its positive
/// panel and the second its negative panel.
pub struct RwgSurfaceBuilder<T: RealScalar> {
    points: Vec<[T; 3]>,
    point_ids_to_indices: HashMap<usize, usize>,
    cells: Vec<[usize; 3]>,
    label: Option<String>,
    is_pec: bool,
    exterior_region: usize,
    boundary_edges: BoundaryEdges,
}

impl<T: RealScalar> Default for RwgSurfaceBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RealScalar> RwgSurfaceBuilder<T> {
    /// Create a builder
    pub fn new() -> Self {
        Self::new_with_capacity(0, 0)
    }

    /// Create a builder with storage reserved for `npoints` points and `ncells` cells
    pub fn new_with_capacity(npoints: usize, ncells: usize) -> Self {
        Self {
            points: Vec::with_capacity(npoints),
            point_ids_to_indices: HashMap::with_capacity(npoints),
            cells: Vec::with_capacity(ncells),
            label: None,
            is_pec: false,
            exterior_region: 0,
            boundary_edges: BoundaryEdges::default(),
        }
    }

    /// Add a point
    pub fn add_point(&mut self, id: usize, data: [T; 3]) {
        self.point_ids_to_indices.insert(id, self.points.len());
        self.points.push(data);
    }

    /// Add a triangular cell given the ids of its three points
    pub fn add_cell(&mut self, cell_data: [usize; 3]) {
        self.cells.push(cell_data);
    }

    /// Set the label of the surface
    pub fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    /// Mark the surface as a perfect electric conductor
    pub fn set_pec(&mut self, is_pec: bool) {
        self.is_pec = is_pec;
    }

    /// Set the index of the region outside the surface
    pub fn set_exterior_region(&mut self, region: usize) {
        self.exterior_region = region;
    }

    /// Choose how boundary edges are treated
    pub fn set_boundary_edges(&mut self, boundary_edges: BoundaryEdges) {
        self.boundary_edges = boundary_edges;
    }

    /// Create the surface
    pub fn create_surface(self) -> Result<RwgSurface<T>> {
        let mut cells = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let mut indices = [0; 3];
            for (index, id) in indices.iter_mut().zip(cell.iter()) {
                *index = *self
                    .point_ids_to_indices
                    .get(id)
                    .ok_or(Error::UnknownVertex(*id))?;
            }
            cells.push(indices);
        }

        let third = T::from(1.0 / 3.0).unwrap();
        let half = T::from(0.5).unwrap();
        let mut panels = Vec::with_capacity(cells.len());
        for (panel_index, cell) in cells.iter().enumerate() {
            let v0 = &self.points[cell[0]];
            let v1 = &self.points[cell[1]];
            let v2 = &self.points[cell[2]];
            let n = cross(&sub(v1, v0), &sub(v2, v0));
            let twice_area = norm(&n);
            if twice_area == T::zero() {
                warn!("Panel {panel_index} has zero area");
            }
            panels.push(Panel {
                vertices: *cell,
                area: twice_area * half,
                normal: scale(&n, T::one() / twice_area),
                centroid: scale(&add(&add(v0, v1), v2), third),
                edges: [None; 3],
            });
        }

        // Mesh edges keyed by sorted vertex pair, in order of discovery
        let mut edge_indices = HashMap::<(usize, usize), usize>::new();
        let mut mesh_edges = Vec::<([usize; 2], PanelLocalIndexPair, Option<PanelLocalIndexPair>)>::new();
        for (panel_index, cell) in cells.iter().enumerate() {
            for local_index in 0..3 {
                let mut first = cell[(local_index + 1) % 3];
                let mut second = cell[(local_index + 2) % 3];
                if first > second {
                    std::mem::swap(&mut first, &mut second);
                }
                let pair = PanelLocalIndexPair::new(panel_index, local_index);
                if let Some(edge_index) = edge_indices.get(&(first, second)) {
                    let edge = &mut mesh_edges[*edge_index];
                    if edge.2.is_some() {
                        return Err(Error::NonManifoldEdge(first, second));
                    }
                    edge.2 = Some(pair);
                } else {
                    edge_indices.insert((first, second), mesh_edges.len());
                    mesh_edges.push(([first, second], pair, None));
                }
            }
        }

        let mut edges = Vec::with_capacity(mesh_edges.len());
        for (vertices, positive, negative) in mesh_edges {
            if negative.is_none() && self.boundary_edges == BoundaryEdges::Exterior {
                continue;
            }
            let edge_index = edges.len();
            panels[positive.panel].edges[positive.local_index] = Some(edge_index);
            if let Some(negative) = negative {
                panels[negative.panel].edges[negative.local_index] = Some(edge_index);
            }
            let a = &self.points[vertices[0]];
            let b = &self.points[vertices[1]];
            edges.push(Edge {
                vertices,
                length: norm(&sub(b, a)),
                centroid: scale(&add(a, b), half),
                positive,
                negative,
            });
        }

        Ok(RwgSurface {
            label: self.label,
            vertices: self.points,
            panels,
            edges,
            is_pec: self.is_pec,
            exterior_region: self.exterior_region,
        })
    }
}

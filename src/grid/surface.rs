//! Panels, edges and surfaces

use crate::grid::vector::add;
use crate::types::RealScalar;

/// A (panel, local vertex index) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelLocalIndexPair {
    /// The panel's index
    pub panel: usize,
    /// Local index (0, 1 or 2) of the vertex opposite the edge
    pub local_index: usize,
}

impl PanelLocalIndexPair {
    /// Create a (panel, local index) pair
    pub fn new(panel: usize, local_index: usize) -> Self {
        Self { panel, local_index }
    }
}

/// A flat triangular panel
#[derive(Debug, Clone)]
pub struct Panel<T: RealScalar> {
    pub(crate) vertices: [usize; 3],
    pub(crate) area: T,
    pub(crate) normal: [T; 3],
    pub(crate) centroid: [T; 3],
    pub(crate) edges: [Option<usize>; 3],
}

impl<T: RealScalar> Panel<T> {
    /// Indices of the three vertices
    pub fn vertices(&self) -> &[usize; 3] {
        &self.vertices
    }

    /// Area
    pub fn area(&self) -> T {
        self.area
    }

    /// Unit normal, oriented by the right-hand rule on the vertex order
    pub fn normal(&self) -> &[T; 3] {
        &self.normal
    }

    /// Centroid
    pub fn centroid(&self) -> &[T; 3] {
        &self.centroid
    }

    /// Basis function on the edge opposite local vertex `local_index`, if that edge carries one
    pub fn edge(&self, local_index: usize) -> Option<usize> {
        self.edges[local_index]
    }
}

/// An edge carrying an RWG basis function
#[derive(Debug, Clone)]
pub struct Edge<T: RealScalar> {
    pub(crate) vertices: [usize; 2],
    pub(crate) length: T,
    pub(crate) centroid: [T; 3],
    pub(crate) positive: PanelLocalIndexPair,
    pub(crate) negative: Option<PanelLocalIndexPair>,
}

impl<T: RealScalar> Edge<T> {
    /// Indices of the two end points
    pub fn vertices(&self) -> &[usize; 2] {
        &self.vertices
    }

    /// Length
    pub fn length(&self) -> T {
        self.length
    }

    /// Midpoint
    pub fn centroid(&self) -> &[T; 3] {
        &self.centroid
    }

    /// Positive panel and the local index of its free vertex
    pub fn positive(&self) -> PanelLocalIndexPair {
        self.positive
    }

    /// Negative panel and the local index of its free vertex; `None` on a boundary edge
    pub fn negative(&self) -> Option<PanelLocalIndexPair> {
        self.negative
    }

    /// Whether the edge is shared by two panels
    pub fn is_interior(&self) -> bool {
        self.negative.is_some()
    }
}

/// A triangulated surface with RWG basis functions on its edges
///
/// Basis function `n` lives on `edges[n]`. On its positive panel it is
/// `L / (2A) * (r - Q)` and on its negative panel `-L / (2A) * (r - Q)`, where `Q` is the free
/// vertex of that panel.
#[derive(Debug, Clone)]
pub struct RwgSurface<T: RealScalar> {
    pub(crate) label: Option<String>,
    pub(crate) vertices: Vec<[T; 3]>,
    pub(crate) panels: Vec<Panel<T>>,
    pub(crate) edges: Vec<Edge<T>>,
    pub(crate) is_pec: bool,
    pub(crate) exterior_region: usize,
}

impl<T: RealScalar> RwgSurface<T> {
    /// Label used to look the surface up in a geometry
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether the surface is a perfect electric conductor (electric currents only)
    pub fn is_pec(&self) -> bool {
        self.is_pec
    }

    /// Index of the region outside the surface
    pub fn exterior_region(&self) -> usize {
        self.exterior_region
    }

    /// Set the label
    pub fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    /// Mark the surface as a perfect electric conductor; this changes its number of degrees of
    /// freedom
    pub fn set_pec(&mut self, is_pec: bool) {
        self.is_pec = is_pec;
    }

    /// Set the index of the region outside the surface
    pub fn set_exterior_region(&mut self, region: usize) {
        self.exterior_region = region;
    }

    /// Number of vertices
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of panels
    pub fn num_panels(&self) -> usize {
        self.panels.len()
    }

    /// Number of edges carrying basis functions
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of current degrees of freedom: one per edge for PEC surfaces, two otherwise
    pub fn num_bfs(&self) -> usize {
        if self.is_pec {
            self.edges.len()
        } else {
            2 * self.edges.len()
        }
    }

    /// Vertex coordinates
    pub fn vertex(&self, index: usize) -> &[T; 3] {
        &self.vertices[index]
    }

    /// Panel
    pub fn panel(&self, index: usize) -> &Panel<T> {
        &self.panels[index]
    }

    /// Edge
    pub fn edge(&self, index: usize) -> &Edge<T> {
        &self.edges[index]
    }

    /// Iterator over panels
    pub fn panels(&self) -> impl Iterator<Item = &Panel<T>> {
        self.panels.iter()
    }

    /// Iterator over edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge<T>> {
        self.edges.iter()
    }

    /// Total area
    pub fn area(&self) -> T {
        self.panels.iter().fold(T::zero(), |acc, p| acc + p.area)
    }

    /// Rigidly move the surface
    ///
    /// Torques are computed about the coordinate origin. To get the torque about another point,
    /// translate the surface so that point sits at the origin, compute, then translate back.
    pub fn translate(&mut self, displacement: [T; 3]) {
        for v in self.vertices.iter_mut() {
            *v = add(v, &displacement);
        }
        for p in self.panels.iter_mut() {
            p.centroid = add(&p.centroid, &displacement);
        }
        for e in self.edges.iter_mut() {
            e.centroid = add(&e.centroid, &displacement);
        }
    }
}

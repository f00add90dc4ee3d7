//! The owned mesh store.
//!
//! A [`Mesh`] holds a node coordinate table together with ordered element
//! groups and boundary face groups. It is built either by the file reader in
//! [`crate::io::gri`] or through the `add_*` methods, and is read through
//! the index-based accessors below.

use nalgebra::{DMatrix, DVector};

use super::group::{BoundaryFaceGroup, ElementGroup};
use crate::error::{MeshError, Result};

/// Dimension of a mesh created with [`Mesh::new`].
pub const DEFAULT_DIMENSION: usize = 2;

/// A computational mesh: nodes, element groups, and boundary face groups.
///
/// Every node index referenced by an element group lies in
/// `[0, num_nodes())`, and every coordinate is finite. Both invariants are
/// checked on insertion, so a `Mesh` can never hold dangling references.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    dimension: usize,
    /// Row-major coordinate table, `dimension` values per node.
    coords: Vec<f64>,
    element_groups: Vec<ElementGroup>,
    boundary_face_groups: Vec<BoundaryFaceGroup>,
}

impl Mesh {
    /// Create an empty 2-D mesh.
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            coords: Vec::new(),
            element_groups: Vec::new(),
            boundary_face_groups: Vec::new(),
        }
    }

    /// Create an empty mesh of the given dimension (2 or 3).
    pub fn with_dimension(dimension: usize) -> Result<Self> {
        if !(2..=3).contains(&dimension) {
            return Err(MeshError::InvalidDimension(dimension));
        }
        Ok(Self {
            dimension,
            ..Self::new()
        })
    }

    /// Create an empty mesh with capacity reserved for `num_nodes` nodes.
    pub fn with_capacity(dimension: usize, num_nodes: usize) -> Result<Self> {
        let mut mesh = Self::with_dimension(dimension)?;
        mesh.coords.reserve(num_nodes * dimension);
        Ok(mesh)
    }

    /// Release the mesh.
    ///
    /// Equivalent to dropping it; the handle cannot be used afterwards.
    pub fn destroy(self) {
        log::trace!(
            "destroying mesh with {} nodes and {} groups",
            self.num_nodes(),
            self.element_groups.len() + self.boundary_face_groups.len()
        );
    }

    // ==================== Nodes ====================

    /// Spatial dimension (2 or 3).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.coords.len() / self.dimension
    }

    /// Flattened coordinate table, `dimension()` values per node.
    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coords
    }

    /// Coordinates of node `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.num_nodes()`.
    #[inline]
    pub fn node(&self, i: usize) -> &[f64] {
        &self.coords[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Iterate over node coordinate tuples.
    pub fn nodes(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.coords.chunks_exact(self.dimension)
    }

    /// The coordinate table as a `num_nodes() x dimension()` matrix.
    pub fn coordinate_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.num_nodes(), self.dimension, &self.coords)
    }

    /// Append a node, returning its index.
    pub fn add_node(&mut self, position: &[f64]) -> Result<usize> {
        let index = self.num_nodes();
        self.check_position(index, position)?;
        self.coords.extend_from_slice(position);
        Ok(index)
    }

    /// Move node `i` to a new position.
    pub fn set_node(&mut self, i: usize, position: &[f64]) -> Result<()> {
        let count = self.num_nodes();
        if i >= count {
            return Err(MeshError::IndexOutOfRange {
                what: "node",
                index: i,
                count,
            });
        }
        self.check_position(i, position)?;
        let dim = self.dimension;
        self.coords[i * dim..(i + 1) * dim].copy_from_slice(position);
        Ok(())
    }

    /// Shift every node by `offset`.
    ///
    /// Nothing is modified if any shifted coordinate would be non-finite.
    pub fn translate(&mut self, offset: &[f64]) -> Result<()> {
        if offset.len() != self.dimension {
            return Err(MeshError::CoordinateLength {
                expected: self.dimension,
                found: offset.len(),
            });
        }
        let shifted: Vec<f64> = self
            .coords
            .iter()
            .enumerate()
            .map(|(k, &c)| c + offset[k % self.dimension])
            .collect();
        if let Some(k) = shifted.iter().position(|c| !c.is_finite()) {
            return Err(MeshError::NonFiniteCoordinate {
                node: k / self.dimension,
            });
        }
        self.coords = shifted;
        Ok(())
    }

    /// Axis-aligned bounding box of all nodes, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(DVector<f64>, DVector<f64>)> {
        let mut nodes = self.nodes();
        let first = DVector::from_column_slice(nodes.next()?);
        let (mut min, mut max) = (first.clone(), first);
        for node in nodes {
            for (axis, &c) in node.iter().enumerate() {
                min[axis] = min[axis].min(c);
                max[axis] = max[axis].max(c);
            }
        }
        Some((min, max))
    }

    fn check_position(&self, node: usize, position: &[f64]) -> Result<()> {
        if position.len() != self.dimension {
            return Err(MeshError::CoordinateLength {
                expected: self.dimension,
                found: position.len(),
            });
        }
        if position.iter().any(|c| !c.is_finite()) {
            return Err(MeshError::NonFiniteCoordinate { node });
        }
        Ok(())
    }

    // ==================== Element groups ====================

    /// Number of element groups.
    #[inline]
    pub fn num_element_groups(&self) -> usize {
        self.element_groups.len()
    }

    /// Element group `i`.
    pub fn element_group(&self, i: usize) -> Result<&ElementGroup> {
        self.element_groups
            .get(i)
            .ok_or(MeshError::IndexOutOfRange {
                what: "element group",
                index: i,
                count: self.element_groups.len(),
            })
    }

    /// All element groups in order.
    #[inline]
    pub fn element_groups(&self) -> &[ElementGroup] {
        &self.element_groups
    }

    /// Total number of elements over all groups.
    pub fn num_elements(&self) -> usize {
        self.element_groups.iter().map(ElementGroup::num_elements).sum()
    }

    /// Append an element group, returning its index.
    ///
    /// Fails if the group references a node that is not in the mesh.
    pub fn add_element_group(&mut self, group: ElementGroup) -> Result<usize> {
        let num_nodes = self.num_nodes();
        if let Some((element, node)) = group.max_node().filter(|&(_, n)| n >= num_nodes) {
            return Err(MeshError::InvalidNodeIndex {
                element,
                node,
                num_nodes,
            });
        }
        self.element_groups.push(group);
        Ok(self.element_groups.len() - 1)
    }

    // ==================== Boundary face groups ====================

    /// Number of boundary face groups.
    #[inline]
    pub fn num_boundary_face_groups(&self) -> usize {
        self.boundary_face_groups.len()
    }

    /// Boundary face group `i`.
    pub fn boundary_face_group(&self, i: usize) -> Result<&BoundaryFaceGroup> {
        self.boundary_face_groups
            .get(i)
            .ok_or(MeshError::IndexOutOfRange {
                what: "boundary face group",
                index: i,
                count: self.boundary_face_groups.len(),
            })
    }

    /// All boundary face groups in order.
    #[inline]
    pub fn boundary_face_groups(&self) -> &[BoundaryFaceGroup] {
        &self.boundary_face_groups
    }

    /// Find a boundary face group by title.
    pub fn boundary_face_group_by_title(&self, title: &str) -> Option<&BoundaryFaceGroup> {
        self.boundary_face_groups.iter().find(|g| g.title() == title)
    }

    /// Append a boundary face group, returning its index.
    ///
    /// Fails if a group with the same title already exists.
    pub fn add_boundary_face_group(&mut self, group: BoundaryFaceGroup) -> Result<usize> {
        if self.boundary_face_group_by_title(group.title()).is_some() {
            return Err(MeshError::DuplicateTitle(group.title().to_string()));
        }
        self.boundary_face_groups.push(group);
        Ok(self.boundary_face_groups.len() - 1)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::BoundaryFace;

    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        for p in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]] {
            mesh.add_node(&p).unwrap();
        }
        mesh.add_element_group(ElementGroup::new(1, "QuadLagrange", 4, vec![0, 1, 2, 3]).unwrap())
            .unwrap();
        mesh
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert_eq!(mesh.dimension(), 2);
        assert_eq!(mesh.num_nodes(), 0);
        assert_eq!(mesh.num_element_groups(), 0);
        assert_eq!(mesh.num_boundary_face_groups(), 0);
        assert!(mesh.bounding_box().is_none());
        assert_eq!(mesh.coordinate_matrix().nrows(), 0);
    }

    #[test]
    fn test_invalid_dimension() {
        assert!(matches!(Mesh::with_dimension(1), Err(MeshError::InvalidDimension(1))));
        assert!(matches!(Mesh::with_dimension(4), Err(MeshError::InvalidDimension(4))));
        assert_eq!(Mesh::with_dimension(3).unwrap().dimension(), 3);
    }

    #[test]
    fn test_add_node() {
        let mut mesh = Mesh::with_dimension(3).unwrap();
        assert_eq!(mesh.add_node(&[1.0, 2.0, 3.0]).unwrap(), 0);
        assert_eq!(mesh.add_node(&[4.0, 5.0, 6.0]).unwrap(), 1);
        assert_eq!(mesh.node(1), &[4.0, 5.0, 6.0]);

        assert!(matches!(
            mesh.add_node(&[1.0, 2.0]),
            Err(MeshError::CoordinateLength { expected: 3, found: 2 })
        ));
        assert!(matches!(
            mesh.add_node(&[f64::NAN, 0.0, 0.0]),
            Err(MeshError::NonFiniteCoordinate { node: 2 })
        ));
        assert_eq!(mesh.num_nodes(), 2);
    }

    #[test]
    fn test_coordinate_matrix_layout() {
        let mesh = unit_square();
        let m = mesh.coordinate_matrix();
        assert_eq!(m.shape(), (4, 2));
        assert_eq!(m[(2, 0)], 1.0);
        assert_eq!(m[(3, 1)], 1.0);
        assert_eq!(m[(3, 0)], 0.0);
    }

    #[test]
    fn test_element_group_node_range() {
        let mut mesh = unit_square();
        let bad = ElementGroup::new(1, "TriLagrange", 3, vec![0, 1, 2, 2, 3, 4]).unwrap();
        assert!(matches!(
            mesh.add_element_group(bad),
            Err(MeshError::InvalidNodeIndex { element: 1, node: 4, num_nodes: 4 })
        ));
        assert_eq!(mesh.num_element_groups(), 1);
    }

    #[test]
    fn test_group_index_bounds() {
        let mesh = unit_square();
        assert!(mesh.element_group(0).is_ok());
        assert!(matches!(
            mesh.element_group(mesh.num_element_groups()),
            Err(MeshError::IndexOutOfRange { index: 1, count: 1, .. })
        ));
        assert!(matches!(
            mesh.boundary_face_group(0),
            Err(MeshError::IndexOutOfRange { index: 0, count: 0, .. })
        ));
    }

    #[test]
    fn test_duplicate_title() {
        let mut mesh = unit_square();
        let wall = BoundaryFaceGroup::new("Wall", vec![BoundaryFace::new(0, 0)]).unwrap();
        mesh.add_boundary_face_group(wall.clone()).unwrap();
        assert!(matches!(
            mesh.add_boundary_face_group(wall),
            Err(MeshError::DuplicateTitle(ref t)) if t == "Wall"
        ));
        assert!(mesh.boundary_face_group_by_title("Wall").is_some());
        assert!(mesh.boundary_face_group_by_title("Inflow").is_none());
    }

    #[test]
    fn test_translate_and_bounding_box() {
        let mut mesh = unit_square();
        mesh.translate(&[2.0, -1.0]).unwrap();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min.as_slice(), &[2.0, -1.0]);
        assert_eq!(max.as_slice(), &[3.0, 0.0]);

        assert!(mesh.translate(&[1.0]).is_err());
        assert!(mesh.translate(&[f64::INFINITY, 0.0]).is_err());
        assert_eq!(mesh.node(0), &[2.0, -1.0]);
    }

    #[test]
    fn test_set_node() {
        let mut mesh = unit_square();
        mesh.set_node(2, &[1.5, 1.5]).unwrap();
        assert_eq!(mesh.node(2), &[1.5, 1.5]);
        assert!(matches!(
            mesh.set_node(4, &[0.0, 0.0]),
            Err(MeshError::IndexOutOfRange { what: "node", .. })
        ));
    }

    #[test]
    fn test_num_elements() {
        let mut mesh = unit_square();
        mesh.add_element_group(ElementGroup::new(1, "TriLagrange", 3, vec![0, 1, 2, 0, 2, 3]).unwrap())
            .unwrap();
        assert_eq!(mesh.num_elements(), 3);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mesh>();
    }
}

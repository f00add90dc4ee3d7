//! Element groups and boundary face groups.
//!
//! Groups are owned by their [`Mesh`](super::Mesh) and are immutable once
//! constructed. Both constructors validate their arguments so that every
//! group can be written to a mesh file and read back unchanged.

use crate::error::{MeshError, Result};

/// A set of elements sharing basis family, order, and node count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementGroup {
    order: usize,
    basis: String,
    nodes_per_element: usize,
    node_indices: Vec<usize>,
}

impl ElementGroup {
    /// Create an element group from a flattened node index list.
    ///
    /// `node_indices` holds `nodes_per_element` indices for each element,
    /// element after element. Node indices are checked against the owning
    /// mesh when the group is added to it.
    ///
    /// # Example
    /// ```
    /// use grimesh::mesh::ElementGroup;
    ///
    /// let group = ElementGroup::new(1, "TriLagrange", 3, vec![0, 1, 2, 1, 3, 2]).unwrap();
    /// assert_eq!(group.num_elements(), 2);
    /// assert_eq!(group.element(1), &[1, 3, 2]);
    /// ```
    pub fn new(
        order: usize,
        basis: impl Into<String>,
        nodes_per_element: usize,
        node_indices: Vec<usize>,
    ) -> Result<Self> {
        let basis = basis.into();
        validate_name(&basis)?;

        if order == 0 {
            return Err(MeshError::invalid_param("order", order, "must be positive"));
        }
        if nodes_per_element == 0 {
            return Err(MeshError::invalid_param(
                "nodes_per_element",
                nodes_per_element,
                "must be positive",
            ));
        }
        if node_indices.is_empty() {
            return Err(MeshError::invalid_param(
                "node_indices",
                0,
                "group must contain at least one element",
            ));
        }
        if node_indices.len() % nodes_per_element != 0 {
            return Err(MeshError::invalid_param(
                "node_indices",
                node_indices.len(),
                "length is not a multiple of nodes_per_element",
            ));
        }

        Ok(Self {
            order,
            basis,
            nodes_per_element,
            node_indices,
        })
    }

    /// Number of elements in the group.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.node_indices.len() / self.nodes_per_element
    }

    /// Number of nodes per element.
    #[inline]
    pub fn nodes_per_element(&self) -> usize {
        self.nodes_per_element
    }

    /// Polynomial order of the element geometry.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Name of the basis family, e.g. `"QuadLagrange"`.
    #[inline]
    pub fn basis(&self) -> &str {
        &self.basis
    }

    /// Flattened node indices, `nodes_per_element` per element.
    #[inline]
    pub fn node_indices(&self) -> &[usize] {
        &self.node_indices
    }

    /// Node indices of element `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.num_elements()`.
    #[inline]
    pub fn element(&self, i: usize) -> &[usize] {
        let start = i * self.nodes_per_element;
        &self.node_indices[start..start + self.nodes_per_element]
    }

    /// Iterate over the node index slice of every element.
    pub fn elements(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.node_indices.chunks_exact(self.nodes_per_element)
    }

    /// Largest node index referenced by the group.
    pub(crate) fn max_node(&self) -> Option<(usize, usize)> {
        self.node_indices
            .iter()
            .enumerate()
            .max_by_key(|&(_, &n)| n)
            .map(|(pos, &n)| (pos / self.nodes_per_element, n))
    }
}

/// A boundary face: local face `local_face` of element `element`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryFace {
    /// Index of the element owning the face.
    pub element: usize,
    /// Local face number within that element.
    pub local_face: usize,
}

impl BoundaryFace {
    /// Create a boundary face descriptor.
    pub fn new(element: usize, local_face: usize) -> Self {
        Self { element, local_face }
    }
}

/// A named set of boundary faces sharing a boundary condition region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryFaceGroup {
    title: String,
    faces: Vec<BoundaryFace>,
}

impl BoundaryFaceGroup {
    /// Create a boundary face group.
    ///
    /// The group must contain at least one face.
    pub fn new(title: impl Into<String>, faces: Vec<BoundaryFace>) -> Result<Self> {
        let title = title.into();
        validate_name(&title)?;
        if faces.is_empty() {
            return Err(MeshError::invalid_param(
                "faces",
                0,
                "boundary group must contain at least one face",
            ));
        }
        Ok(Self { title, faces })
    }

    /// Group title, unique within its mesh.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of faces in the group.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The face descriptors, in file order.
    #[inline]
    pub fn faces(&self) -> &[BoundaryFace] {
        &self.faces
    }
}

/// Check that a basis name or title survives a write/read cycle.
///
/// Names are whitespace-separated tokens on a mesh file line, so they must
/// already be in normalized form: single interior spaces, no line breaks,
/// and no leading `#` (which would turn the line into a comment).
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(MeshError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.starts_with('#') {
        return invalid("name starts with a comment marker");
    }
    let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized != name {
        return invalid("name must be single-space separated without line breaks");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_access() {
        let group = ElementGroup::new(2, "TriLagrange", 6, (0..12).collect()).unwrap();
        assert_eq!(group.num_elements(), 2);
        assert_eq!(group.element(1), &[6, 7, 8, 9, 10, 11]);
        assert_eq!(group.elements().count(), 2);
        assert_eq!(group.max_node(), Some((1, 11)));
    }

    #[test]
    fn test_element_group_shape() {
        assert!(matches!(
            ElementGroup::new(1, "Quad", 4, vec![0, 1, 2]),
            Err(MeshError::InvalidParameter { name: "node_indices", .. })
        ));
        assert!(ElementGroup::new(0, "Quad", 4, vec![0, 1, 2, 3]).is_err());
        assert!(ElementGroup::new(1, "Quad", 0, vec![]).is_err());
        assert!(ElementGroup::new(1, "Quad", 4, vec![]).is_err());
    }

    #[test]
    fn test_multi_word_basis() {
        let group = ElementGroup::new(1, "Triangle Lagrange", 3, vec![0, 1, 2]).unwrap();
        assert_eq!(group.basis(), "Triangle Lagrange");
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "#Wall", " Wall", "Wall ", "Inner  Wall", "Wall\nFar"] {
            assert!(
                matches!(validate_name(name), Err(MeshError::InvalidName { .. })),
                "{:?} should be rejected",
                name
            );
        }
        assert!(validate_name("Far Field").is_ok());
    }

    #[test]
    fn test_empty_boundary_group() {
        assert!(BoundaryFaceGroup::new("Wall", vec![]).is_err());
        let group = BoundaryFaceGroup::new("Wall", vec![BoundaryFace::new(3, 1)]).unwrap();
        assert_eq!(group.num_faces(), 1);
        assert_eq!(group.faces()[0], BoundaryFace { element: 3, local_face: 1 });
    }
}

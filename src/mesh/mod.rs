//! Core mesh data structures.
//!
//! This module provides the owned mesh representation used by the file
//! reader and writer in [`crate::io`].
//!
//! # Overview
//!
//! The primary type is [`Mesh`], which stores:
//! - a node coordinate table (2-D or 3-D),
//! - ordered [`ElementGroup`]s, each a block of elements sharing a basis
//!   family, order, and node count,
//! - ordered [`BoundaryFaceGroup`]s, each a titled list of [`BoundaryFace`]s.
//!
//! Groups are addressed by position, mirroring the group-indexed access of
//! the solver this format comes from.
//!
//! # Construction
//!
//! ```
//! use grimesh::mesh::{BoundaryFace, BoundaryFaceGroup, ElementGroup, Mesh};
//!
//! let mut mesh = Mesh::new();
//! for p in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]] {
//!     mesh.add_node(&p).unwrap();
//! }
//! mesh.add_element_group(ElementGroup::new(1, "TriLagrange", 3, vec![0, 1, 2]).unwrap())
//!     .unwrap();
//! mesh.add_boundary_face_group(
//!     BoundaryFaceGroup::new("Wall", vec![BoundaryFace::new(0, 0)]).unwrap(),
//! )
//! .unwrap();
//!
//! assert_eq!(mesh.num_nodes(), 3);
//! assert_eq!(mesh.element_group(0).unwrap().num_elements(), 1);
//! ```

mod group;
mod store;

pub use group::{BoundaryFace, BoundaryFaceGroup, ElementGroup};
pub use store::{Mesh, DEFAULT_DIMENSION};

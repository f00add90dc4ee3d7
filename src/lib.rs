//! # grimesh
//!
//! An owned mesh store for high-order finite-element meshes described by
//! element groups and titled boundary face groups.
//!
//! grimesh reads and writes the plain-text `.gri` mesh format and exposes
//! the mesh through group-indexed accessors: node table, element groups,
//! and boundary face groups, each addressed by position.
//!
//! ## Features
//!
//! - **Owned data model**: no foreign handles; a [`Mesh`](mesh::Mesh) is
//!   released when dropped
//! - **Validated construction**: node references, group shapes, and names
//!   are checked on insertion, so every mesh can be saved and reloaded
//! - **All-or-nothing loading**: a malformed file yields an error with its
//!   line number and no mesh
//! - **Build settings**: [`config::BuildConfig`] for the solver binding build
//!
//! ## Quick Start
//!
//! ```no_run
//! use grimesh::prelude::*;
//!
//! // Load a mesh
//! let mesh = grimesh::io::load("naca_quad.gri").unwrap();
//!
//! println!("Dimension: {}", mesh.dimension());
//! println!("Nodes: {}", mesh.num_nodes());
//!
//! for group in mesh.element_groups() {
//!     println!("{} x {} (order {})", group.num_elements(), group.basis(), group.order());
//! }
//! for group in mesh.boundary_face_groups() {
//!     println!("{}: {} faces", group.title(), group.num_faces());
//! }
//!
//! // Save the mesh
//! grimesh::io::save(&mesh, "output.gri").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use grimesh::prelude::*;
//!
//! let mut mesh = Mesh::new();
//! for p in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]] {
//!     mesh.add_node(&p).unwrap();
//! }
//! let quads = ElementGroup::new(1, "QuadLagrange", 4, vec![0, 1, 2, 3]).unwrap();
//! mesh.add_element_group(quads).unwrap();
//!
//! assert_eq!(mesh.num_nodes(), 4);
//! assert!(mesh.element_group(1).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use grimesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{BoundaryFace, BoundaryFaceGroup, ElementGroup, Mesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_square_with_boundaries() {
        let mut mesh = Mesh::new();
        for p in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]] {
            mesh.add_node(&p).unwrap();
        }
        mesh.add_element_group(ElementGroup::new(1, "Quad", 4, vec![0, 1, 2, 3]).unwrap())
            .unwrap();
        for (face, title) in ["Bottom", "Right", "Top", "Left"].iter().enumerate() {
            let group = BoundaryFaceGroup::new(*title, vec![BoundaryFace::new(0, face)]).unwrap();
            mesh.add_boundary_face_group(group).unwrap();
        }

        assert_eq!(mesh.num_boundary_face_groups(), 4);
        assert_eq!(mesh.boundary_face_group(3).unwrap().title(), "Left");

        let reloaded = crate::io::gri::from_str(&crate::io::gri::to_string(&mesh).unwrap()).unwrap();
        assert_eq!(reloaded, mesh);
        reloaded.destroy();
    }
}

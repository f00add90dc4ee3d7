//! Mesh file I/O.
//!
//! This module provides functions for loading and saving meshes.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | GRI | `.gri` | ✓ | ✓ | Element groups + titled boundary groups |
//!
//! # Usage
//!
//! ```no_run
//! use grimesh::io::{load, save};
//!
//! let mesh = load("naca_quad.gri").unwrap();
//! save(&mesh, "copy.gri").unwrap();
//! ```
//!
//! The format-specific module also reads from and writes to in-memory
//! buffers:
//!
//! ```
//! use grimesh::io::gri;
//! use grimesh::mesh::Mesh;
//!
//! let text = gri::to_string(&Mesh::new()).unwrap();
//! assert_eq!(gri::from_str(&text).unwrap(), Mesh::new());
//! ```

pub mod gri;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Plain-text GRI format.
    Gri,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "gri" => Some(Format::Gri),
            _ => None,
        }
    }

    /// Detect format from file path.
    ///
    /// Paths without an extension are treated as GRI files.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        match path.as_ref().extension() {
            None => Some(Format::Gri),
            Some(ext) => ext.to_str().and_then(Format::from_extension),
        }
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| {
        MeshError::invalid_param(
            "path",
            path.display(),
            "unsupported mesh file extension",
        )
    })
}

/// Load a mesh from a file with automatic format detection.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Gri => gri::load(path),
    }
}

/// Save a mesh to a file with automatic format detection.
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Gri => gri::save(mesh, path),
    }
}

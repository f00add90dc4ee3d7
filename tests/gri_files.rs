//! Loading and rewriting the meshes shipped in `data/`.

use std::path::PathBuf;

use grimesh::io;
use grimesh::prelude::*;
use tempfile::tempdir;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn square_mesh_loads() {
    let mesh = io::load(data("square.gri")).unwrap();

    assert_eq!(mesh.dimension(), 2);
    assert_eq!(mesh.num_nodes(), 4);
    assert_eq!(mesh.num_element_groups(), 1);
    assert_eq!(mesh.num_boundary_face_groups(), 4);

    let titles: Vec<&str> = mesh.boundary_face_groups().iter().map(|g| g.title()).collect();
    assert_eq!(titles, ["Left", "Right", "Top", "Bottom"]);

    let (min, max) = mesh.bounding_box().unwrap();
    assert_eq!(min.as_slice(), &[0.0, 0.0]);
    assert_eq!(max.as_slice(), &[1.0, 1.0]);
}

#[test]
fn high_order_mesh_loads() {
    let mesh = io::load(data("wedge_q2.gri")).unwrap();

    assert_eq!(mesh.num_nodes(), 9);
    assert_eq!(mesh.num_elements(), 3);

    let q2 = mesh.element_group(0).unwrap();
    assert_eq!(q2.order(), 2);
    assert_eq!(q2.nodes_per_element(), 6);
    assert_eq!(q2.basis(), "Triangle Lagrange");
    assert_eq!(q2.element(1), &[2, 7, 5, 6, 8, 4]);

    let far = mesh.boundary_face_group_by_title("Far Field").unwrap();
    assert_eq!(far.faces(), &[BoundaryFace::new(1, 1)]);
}

#[test]
fn rewritten_meshes_are_identical() {
    let dir = tempdir().unwrap();
    for name in ["square.gri", "wedge_q2.gri"] {
        let mesh = io::load(data(name)).unwrap();
        let out = dir.path().join(name);
        io::save(&mesh, &out).unwrap();
        assert_eq!(io::load(&out).unwrap(), mesh, "{} changed on rewrite", name);
    }
}

#[test]
fn deformed_mesh_survives_rewrite() {
    let dir = tempdir().unwrap();
    let mut mesh = io::load(data("square.gri")).unwrap();
    mesh.translate(&[0.25, -0.1]).unwrap();
    mesh.set_node(2, &[1.3, 0.95]).unwrap();

    let out = dir.path().join("deformed.gri");
    io::save(&mesh, &out).unwrap();
    let reloaded = io::load(&out).unwrap();

    assert_eq!(reloaded.node(0), &[0.25, -0.1]);
    assert_eq!(reloaded.node(2), &[1.3, 0.95]);
    assert_eq!(reloaded, mesh);
}

#[test]
fn failed_load_returns_no_mesh() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.gri");
    let text = std::fs::read_to_string(data("square.gri"))
        .unwrap()
        .replace("0 1 2 3", "0 1 2 9");
    std::fs::write(&path, text).unwrap();

    let err = io::load(&path).unwrap_err();
    assert!(err.is_format(), "unexpected error: {}", err);
}

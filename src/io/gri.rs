//! `.gri` mesh format support.
//!
//! A plain-text, line-oriented format with whitespace-delimited fields:
//!
//! ```text
//! <dim> <nNode>
//! <x> <y> [<z>]                       (nNode lines)
//! <nElemGroup>
//! <nElem> <nNodePerElem> <order> <basis>
//! <n0> <n1> ... <nK>                  (nElem lines, per group)
//! <nBFaceGroup>
//! <title> <nFace>
//! <element> <localFace>               (nFace lines, per group)
//! ```
//!
//! Blank lines and lines whose first non-blank character is `#` are
//! ignored. Basis names and titles may contain single spaces; the count
//! fields are located relative to them.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{MeshError, Result};
use crate::mesh::{BoundaryFace, BoundaryFaceGroup, ElementGroup, Mesh};

/// Upper bound on entries reserved from a declared count before it is
/// confirmed by the records that follow.
const MAX_PREALLOC: usize = 1 << 20;

/// Load a mesh from a `.gri` file.
///
/// # Example
///
/// ```no_run
/// use grimesh::io::gri;
///
/// let mesh = gri::load("naca_quad.gri").unwrap();
/// println!("{} nodes", mesh.num_nodes());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = read(BufReader::new(file))?;
    log::debug!(
        "loaded {}: dim={} nodes={} element groups={} boundary groups={}",
        path.display(),
        mesh.dimension(),
        mesh.num_nodes(),
        mesh.num_element_groups(),
        mesh.num_boundary_face_groups()
    );
    Ok(mesh)
}

/// Save a mesh to a `.gri` file.
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    log::debug!("saved {} ({} nodes)", path.display(), mesh.num_nodes());
    Ok(())
}

/// Parse a mesh from any buffered reader.
///
/// The mesh is only returned if the whole input is valid.
pub fn read<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut records = Records::new(reader);

    // Header
    let header = records.expect("mesh header")?;
    let fields = header.fields(2)?;
    let dimension: usize = header.parse(fields[0], "dimension")?;
    let num_nodes: usize = header.parse(fields[1], "node count")?;
    let mut mesh = Mesh::with_capacity(dimension, num_nodes.min(MAX_PREALLOC))
        .map_err(|e| MeshError::format(header.line, e.to_string()))?;

    // Nodes
    let mut position = Vec::with_capacity(dimension);
    for node in 0..num_nodes {
        let record = records.expect("node coordinates")?;
        position.clear();
        for field in record.fields(dimension)? {
            position.push(record.parse::<f64>(field, "coordinate")?);
        }
        if position.iter().any(|c| !c.is_finite()) {
            return Err(record.error(format!("node {} has a non-finite coordinate", node)));
        }
        mesh.add_node(&position)
            .map_err(|e| record.error(e.to_string()))?;
    }

    // Element groups
    let record = records.expect("element group count")?;
    let num_groups: usize = record.parse(record.fields(1)?[0], "element group count")?;
    for g in 0..num_groups {
        let header = records.expect("element group header")?;
        let tokens = header.tokens();
        if tokens.len() < 4 {
            return Err(header.error(format!(
                "element group header needs at least 4 fields, found {}",
                tokens.len()
            )));
        }
        let num_elements: usize = header.parse(tokens[0], "element count")?;
        let nodes_per_element: usize = header.parse(tokens[1], "nodes per element")?;
        let order: usize = header.parse(tokens[2], "order")?;
        let basis = tokens[3..].join(" ");
        if num_elements == 0 {
            return Err(header.error(format!("element group {} has no elements", g)));
        }

        let mut node_indices = Vec::with_capacity(
            num_elements
                .saturating_mul(nodes_per_element)
                .min(MAX_PREALLOC),
        );
        for element in 0..num_elements {
            let record = records.expect("element node indices")?;
            for field in record.fields(nodes_per_element)? {
                let node: usize = record.parse(field, "node index")?;
                if node >= num_nodes {
                    return Err(record.error(format!(
                        "element {} of group {} references node {} but the mesh has {} nodes",
                        element, g, node, num_nodes
                    )));
                }
                node_indices.push(node);
            }
        }

        let group = ElementGroup::new(order, basis, nodes_per_element, node_indices)
            .map_err(|e| header.error(e.to_string()))?;
        mesh.add_element_group(group)
            .map_err(|e| header.error(e.to_string()))?;
    }

    // Boundary face groups
    let record = records.expect("boundary face group count")?;
    let num_groups: usize = record.parse(record.fields(1)?[0], "boundary face group count")?;
    for _ in 0..num_groups {
        let header = records.expect("boundary face group header")?;
        let tokens = header.tokens();
        if tokens.len() < 2 {
            return Err(header.error(format!(
                "boundary face group header needs a title and a face count, found {} fields",
                tokens.len()
            )));
        }
        let (count, title) = (tokens[tokens.len() - 1], tokens[..tokens.len() - 1].join(" "));
        let num_faces: usize = header.parse(count, "face count")?;

        let mut faces = Vec::with_capacity(num_faces.min(MAX_PREALLOC));
        for _ in 0..num_faces {
            let record = records.expect("boundary face")?;
            let fields = record.fields(2)?;
            faces.push(BoundaryFace::new(
                record.parse(fields[0], "element index")?,
                record.parse(fields[1], "local face index")?,
            ));
        }

        let group = BoundaryFaceGroup::new(title, faces)
            .map_err(|e| header.error(e.to_string()))?;
        mesh.add_boundary_face_group(group)
            .map_err(|e| header.error(e.to_string()))?;
    }

    if let Some(extra) = records.next_record()? {
        return Err(extra.error("unexpected content after the last boundary face group"));
    }

    Ok(mesh)
}

/// Write a mesh to any writer.
pub fn write<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "# grimesh mesh")?;
    writeln!(writer, "{} {}", mesh.dimension(), mesh.num_nodes())?;
    for node in mesh.nodes() {
        write_joined(writer, node)?;
    }

    writeln!(writer, "{}", mesh.num_element_groups())?;
    for group in mesh.element_groups() {
        writeln!(
            writer,
            "{} {} {} {}",
            group.num_elements(),
            group.nodes_per_element(),
            group.order(),
            group.basis()
        )?;
        for element in group.elements() {
            write_joined(writer, element)?;
        }
    }

    writeln!(writer, "{}", mesh.num_boundary_face_groups())?;
    for group in mesh.boundary_face_groups() {
        writeln!(writer, "{} {}", group.title(), group.num_faces())?;
        for face in group.faces() {
            writeln!(writer, "{} {}", face.element, face.local_face)?;
        }
    }

    Ok(())
}

/// Render a mesh in `.gri` form.
pub fn to_string(mesh: &Mesh) -> Result<String> {
    let mut buf = Vec::new();
    write(mesh, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Parse a mesh from a string.
pub fn from_str(text: &str) -> Result<Mesh> {
    read(text.as_bytes())
}

fn write_joined<W: Write, T: std::fmt::Display>(writer: &mut W, values: &[T]) -> Result<()> {
    let mut first = true;
    for v in values {
        if !first {
            write!(writer, " ")?;
        }
        write!(writer, "{}", v)?;
        first = false;
    }
    writeln!(writer)?;
    Ok(())
}

/// A significant (non-blank, non-comment) line.
struct Record {
    line: usize,
    text: String,
}

impl Record {
    fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    /// Split into exactly `n` fields.
    fn fields(&self, n: usize) -> Result<Vec<&str>> {
        let tokens = self.tokens();
        if tokens.len() != n {
            return Err(self.error(format!("expected {} fields, found {}", n, tokens.len())));
        }
        Ok(tokens)
    }

    fn parse<T: FromStr>(&self, field: &str, what: &str) -> Result<T> {
        field
            .parse()
            .map_err(|_| self.error(format!("invalid {}: '{}'", what, field)))
    }

    fn error(&self, message: impl Into<String>) -> MeshError {
        MeshError::format(self.line, message)
    }
}

/// Iterator over significant lines, tracking line numbers.
struct Records<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let text = std::str::from_utf8(&self.buf)
                .map_err(|_| MeshError::format(self.line, "line is not valid UTF-8"))?;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some(Record {
                line: self.line,
                text: trimmed.to_string(),
            }));
        }
    }

    fn expect(&mut self, what: &str) -> Result<Record> {
        self.next_record()?.ok_or_else(|| {
            MeshError::format(self.line + 1, format!("unexpected end of file, expected {}", what))
        })
    }
}

//! # Mesh Data Structures
//!
//! Per-group solids, named groups and the document that concatenates them
//! into one shared vertex stream.
//!
//! Faces hold *local* indices into their own solid's vertex list. The OBJ
//! form (negative offsets from the end of the vertex stream) is derived at
//! serialization time, once all of a group's vertices have been emitted, so
//! groups can be streamed without knowing the document size in advance.

use crate::error::MeshError;
use crate::geometry::Point3;
use std::io::Write;

/// A polygon face over local vertex indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// A four-sided face.
    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self::new(vec![a, b, c, d])
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Converts local indices to offsets from the end of a group of
    /// `vertex_count` vertices (`-1` is the group's last vertex).
    ///
    /// # Example
    ///
    /// ```rust
    /// use footprint_mesh::Face;
    ///
    /// let face = Face::quad(0, 1, 3, 2);
    /// assert_eq!(face.relative_indices(4), vec![-4, -3, -1, -2]);
    /// ```
    pub fn relative_indices(&self, vertex_count: usize) -> Vec<i64> {
        self.indices
            .iter()
            .map(|&i| i as i64 - vertex_count as i64)
            .collect()
    }
}

/// Vertices and faces of one extruded footprint or ground quad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtrudedSolid {
    vertices: Vec<Point3>,
    faces: Vec<Face>,
    walls: usize,
    roof: Option<usize>,
}

impl ExtrudedSolid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solid with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            walls: 0,
            roof: None,
        }
    }

    /// Adds a vertex and returns its local index.
    pub fn add_vertex(&mut self, position: Point3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Adds a vertical wall quad.
    pub fn add_wall(&mut self, face: Face) {
        self.walls += 1;
        self.faces.push(face);
    }

    /// Adds the roof cap.
    pub fn set_roof(&mut self, face: Face) {
        self.roof = Some(self.faces.len());
        self.faces.push(face);
    }

    /// Adds any other face (ground quad).
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of wall quads, closing quad included.
    #[inline]
    pub fn wall_count(&self) -> usize {
        self.walls
    }

    pub fn roof(&self) -> Option<&Face> {
        self.roof.map(|i| &self.faces[i])
    }

    /// True when every face index addresses a vertex of this solid.
    pub fn validate(&self) -> bool {
        self.faces
            .iter()
            .all(|f| f.indices().iter().all(|&i| i < self.vertices.len()))
    }
}

/// Makes `raw` safe as an `o`/`usemtl` argument: whitespace and control
/// characters become `_`, an empty name becomes `_`.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::mesh::obj_token;
///
/// assert_eq!(obj_token("osgb.12"), "osgb.12");
/// assert_eq!(obj_token("a\nv 9 9 9"), "a_v_9_9_9");
/// ```
pub fn obj_token(raw: &str) -> String {
    if raw.is_empty() {
        return "_".to_string();
    }
    raw.chars()
        .map(|c| if c.is_whitespace() || c.is_control() { '_' } else { c })
        .collect()
}

/// A named, materialed solid.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGroup {
    pub name: String,
    pub material: String,
    pub solid: ExtrudedSolid,
}

impl MeshGroup {
    /// Creates a group. Both names pass through [`obj_token`] since OBJ
    /// statements are single-line and whitespace separated.
    pub fn new(name: impl Into<String>, material: impl Into<String>, solid: ExtrudedSolid) -> Self {
        Self {
            name: obj_token(&name.into()),
            material: obj_token(&material.into()),
            solid,
        }
    }

    /// Serializes the group as OBJ text.
    ///
    /// Vertex lines come first, then faces with offsets relative to the end
    /// of this group's vertices.
    pub fn to_obj(&self) -> String {
        use std::fmt::Write as _;

        let count = self.solid.vertex_count();
        let mut out = String::with_capacity(32 + count * 40 + self.solid.face_count() * 24);
        // Writing into a String cannot fail
        let _ = writeln!(out, "o {}", self.name);
        let _ = writeln!(out, "usemtl {}", self.material);
        for v in self.solid.vertices() {
            let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
        }
        for face in self.solid.faces() {
            out.push('f');
            for index in face.relative_indices(count) {
                let _ = write!(out, " {index}");
            }
            out.push('\n');
        }
        out
    }
}

/// Ordered groups sharing one vertex index space.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDocument {
    material_library: String,
    groups: Vec<MeshGroup>,
}

impl MeshDocument {
    pub fn new(material_library: impl Into<String>) -> Self {
        Self {
            material_library: material_library.into(),
            groups: Vec::new(),
        }
    }

    #[inline]
    pub fn material_library(&self) -> &str {
        &self.material_library
    }

    pub fn push(&mut self, group: MeshGroup) {
        self.groups.push(group);
    }

    #[inline]
    pub fn groups(&self) -> &[MeshGroup] {
        &self.groups
    }

    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(|g| g.solid.vertex_count()).sum()
    }

    pub fn face_count(&self) -> usize {
        self.groups.iter().map(|g| g.solid.face_count()).sum()
    }

    /// Cumulative vertex count after each group, in emission order.
    pub fn vertex_offsets(&self) -> Vec<usize> {
        self.groups
            .iter()
            .scan(0, |total, g| {
                *total += g.solid.vertex_count();
                Some(*total)
            })
            .collect()
    }

    /// Checks that every relative index resolves inside the cumulative
    /// vertex stream and stays within its own group.
    pub fn validate(&self) -> bool {
        let mut emitted = 0usize;
        for group in &self.groups {
            let count = group.solid.vertex_count();
            emitted += count;
            for face in group.solid.faces() {
                for rel in face.relative_indices(count) {
                    if rel >= 0 || rel.unsigned_abs() as usize > count.min(emitted) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Serializes the whole document.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<W, MeshError> {
        let mut obj = crate::obj::ObjWriter::new(writer, &self.material_library)?;
        for group in &self.groups {
            obj.write_group(group)?;
        }
        obj.finish()
    }

    /// Serializes the whole document into a string.
    pub fn to_obj_string(&self) -> Result<String, MeshError> {
        let bytes = self.write_to(Vec::new())?;
        String::from_utf8(bytes).map_err(|e| MeshError::Io(std::io::Error::other(e)))
    }
}

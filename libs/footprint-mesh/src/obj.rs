//! # OBJ Output
//!
//! Streaming writer for the grouped, relative-indexed mesh document:
//!
//! ```text
//! mtllib material.mtl
//! o <group>
//! usemtl <material>
//! v x y z          (one per vertex, emission order)
//! f -i -j -k -l    (negative offsets from the end of the vertex stream)
//! ```
//!
//! Each group is formatted completely before it reaches the underlying
//! writer and is flushed right after, so a failure part-way through leaves
//! every earlier group intact.

use crate::error::MeshError;
use crate::mesh::{MeshDocument, MeshGroup};
use std::io::Write;

/// Destination for assembled groups, in emission order.
pub trait MeshSink {
    /// Appends one group after all previously accepted ones.
    fn accept(&mut self, group: MeshGroup) -> Result<(), MeshError>;

    /// Total vertices accepted so far.
    fn vertices_emitted(&self) -> usize;
}

impl MeshSink for MeshDocument {
    fn accept(&mut self, group: MeshGroup) -> Result<(), MeshError> {
        self.push(group);
        Ok(())
    }

    fn vertices_emitted(&self) -> usize {
        self.vertex_count()
    }
}

/// Running position of the writer after a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpan {
    /// Index of the group's first vertex in the whole document.
    pub first_vertex: usize,
    /// Vertices emitted by the group.
    pub vertex_count: usize,
    /// Faces emitted by the group.
    pub face_count: usize,
}

/// Writes groups to any [`Write`] while tracking the vertex stream.
#[derive(Debug)]
pub struct ObjWriter<W: Write> {
    inner: W,
    vertices: usize,
    faces: usize,
    groups: usize,
}

impl<W: Write> ObjWriter<W> {
    /// Starts a document by writing the material library header.
    pub fn new(mut inner: W, material_library: &str) -> Result<Self, MeshError> {
        writeln!(inner, "mtllib {material_library}")?;
        inner.flush()?;
        Ok(Self {
            inner,
            vertices: 0,
            faces: 0,
            groups: 0,
        })
    }

    /// Serializes one group and advances the running vertex counter.
    pub fn write_group(&mut self, group: &MeshGroup) -> Result<GroupSpan, MeshError> {
        let span = GroupSpan {
            first_vertex: self.vertices,
            vertex_count: group.solid.vertex_count(),
            face_count: group.solid.face_count(),
        };
        self.inner.write_all(group.to_obj().as_bytes())?;
        self.inner.flush()?;

        self.vertices += span.vertex_count;
        self.faces += span.face_count;
        self.groups += 1;
        log::debug!(
            "wrote group {} ({} vertices, {} faces, stream at {})",
            group.name,
            span.vertex_count,
            span.face_count,
            self.vertices
        );
        Ok(span)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces
    }

    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W, MeshError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> MeshSink for ObjWriter<W> {
    fn accept(&mut self, group: MeshGroup) -> Result<(), MeshError> {
        self.write_group(&group).map(|_| ())
    }

    fn vertices_emitted(&self) -> usize {
        self.vertices
    }
}

//! Swept mesh parts and flattened triangle output.

use serde::{Deserialize, Serialize};
use tubular_math::{Orientation, Point3, Uv, Vec3};

use crate::{CapTopology, EndCap, Grid, UvMapping};

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
    /// Flat array of texture coordinates: `[u0, v0, u1, v1, ...]` (f32).
    pub uvs: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    fn push_vertex(&mut self, p: &Point3, n: &Vec3, uv: Uv) {
        self.vertices.extend([p.x as f32, p.y as f32, p.z as f32]);
        self.normals.extend([n.x as f32, n.y as f32, n.z as f32]);
        self.uvs.extend([uv.u as f32, uv.v as f32]);
    }
}

/// Primitive a part is naturally drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    /// One quad strip per pair of adjacent grid columns.
    QuadStrip,
    /// A fan around point 0.
    TriangleFan,
    /// Independent triangles.
    Triangles,
}

/// Which piece of a [`SweptMesh`] a part is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    /// The swept surface.
    Body,
    /// Cap at the start of the path or profile.
    StartCap,
    /// Cap at the end of the path or profile.
    EndCap,
}

/// Presentation settings attached to each part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartStyle {
    /// Free-form label, e.g. for selecting a texture.
    pub tag: String,
    /// Remapping applied to the part's normalised texture coordinates.
    pub uv_mapping: UvMapping,
}

impl PartStyle {
    fn tagged(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            uv_mapping: UvMapping::IDENTITY,
        }
    }
}

/// Geometry carried by a [`MeshPart`].
#[derive(Debug, Clone, Copy)]
pub enum PartGeometry<'a> {
    /// The swept surface.
    Body(&'a Grid),
    /// A flat end cap.
    Cap(&'a EndCap),
}

/// A view of one independently drawable piece of a swept mesh.
#[derive(Debug, Clone, Copy)]
pub struct MeshPart<'a> {
    /// Which piece this is.
    pub kind: PartKind,
    /// Its geometry.
    pub geometry: PartGeometry<'a>,
    /// Its tag and texture mapping.
    pub style: &'a PartStyle,
}

impl MeshPart<'_> {
    /// Primitive the part is naturally drawn with.
    pub fn draw_mode(&self) -> DrawMode {
        match self.geometry {
            PartGeometry::Body(_) => DrawMode::QuadStrip,
            PartGeometry::Cap(cap) => match cap.topology() {
                CapTopology::Fan => DrawMode::TriangleFan,
                CapTopology::Triangles(_) => DrawMode::Triangles,
            },
        }
    }

    /// Texture coordinates after the part's [`UvMapping`].
    pub fn mapped_uvs(&self) -> Vec<Uv> {
        let uvs = match self.geometry {
            PartGeometry::Body(grid) => grid.uvs(),
            PartGeometry::Cap(cap) => cap.uvs(),
        };
        uvs.iter().map(|&uv| self.style.uv_mapping.apply(uv)).collect()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        match self.geometry {
            PartGeometry::Body(grid) => grid.coords().len(),
            PartGeometry::Cap(cap) => cap.points().len(),
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        match self.geometry {
            PartGeometry::Body(grid) => grid.num_triangles(),
            PartGeometry::Cap(cap) => cap.num_triangles(),
        }
    }

    /// Flatten into indexed triangles.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        let uvs = self.mapped_uvs();
        let indices = match self.geometry {
            PartGeometry::Body(grid) => {
                for ((p, n), uv) in grid.coords().iter().zip(grid.normals()).zip(&uvs) {
                    mesh.push_vertex(p, n, *uv);
                }
                grid.triangle_indices()
            }
            PartGeometry::Cap(cap) => {
                let n = cap.normal();
                for (p, uv) in cap.points().iter().zip(&uvs) {
                    mesh.push_vertex(p, &n, *uv);
                }
                cap.triangle_indices()
            }
        };
        mesh.indices = indices.into_iter().map(|i| i as u32).collect();
        mesh
    }
}

/// Result of a sweep: a body grid and up to two end caps.
#[derive(Debug, Clone, PartialEq)]
pub struct SweptMesh {
    body: Grid,
    start_cap: Option<EndCap>,
    end_cap: Option<EndCap>,
    styles: [PartStyle; 3],
}

impl SweptMesh {
    pub(crate) fn new(body: Grid, start_cap: Option<EndCap>, end_cap: Option<EndCap>) -> Self {
        Self {
            body,
            start_cap,
            end_cap,
            styles: [
                PartStyle::tagged("body"),
                PartStyle::tagged("start"),
                PartStyle::tagged("end"),
            ],
        }
    }

    pub(crate) fn transform(&mut self, orientation: &Orientation) {
        self.body.transform(orientation);
        for cap in self.start_cap.iter_mut().chain(self.end_cap.iter_mut()) {
            cap.transform(orientation);
        }
    }

    /// The swept surface grid.
    pub fn body(&self) -> &Grid {
        &self.body
    }

    /// Cap at the start of the path, if any.
    pub fn start_cap(&self) -> Option<&EndCap> {
        self.start_cap.as_ref()
    }

    /// Cap at the end of the path, if any.
    pub fn end_cap(&self) -> Option<&EndCap> {
        self.end_cap.as_ref()
    }

    /// Tag and texture mapping of a part.
    pub fn style(&self, kind: PartKind) -> &PartStyle {
        &self.styles[kind as usize]
    }

    /// Mutable tag and texture mapping of a part.
    pub fn style_mut(&mut self, kind: PartKind) -> &mut PartStyle {
        &mut self.styles[kind as usize]
    }

    /// Parts in drawing order: body, start cap, end cap. Missing caps are
    /// skipped.
    pub fn parts(&self) -> Vec<MeshPart<'_>> {
        let mut parts = vec![MeshPart {
            kind: PartKind::Body,
            geometry: PartGeometry::Body(&self.body),
            style: self.style(PartKind::Body),
        }];
        for (kind, cap) in [
            (PartKind::StartCap, &self.start_cap),
            (PartKind::EndCap, &self.end_cap),
        ] {
            if let Some(cap) = cap {
                parts.push(MeshPart {
                    kind,
                    geometry: PartGeometry::Cap(cap),
                    style: self.style(kind),
                });
            }
        }
        parts
    }

    /// Total vertex count across all parts.
    pub fn num_vertices(&self) -> usize {
        self.parts().iter().map(MeshPart::num_vertices).sum()
    }

    /// Total triangle count across all parts.
    pub fn num_triangles(&self) -> usize {
        self.parts().iter().map(MeshPart::num_triangles).sum()
    }

    /// Flatten every part into one indexed triangle mesh.
    ///
    /// Vertices are emitted part by part in drawing order, so the same
    /// indices serve shaded and pick rendering.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        for part in self.parts() {
            mesh.merge(&part.to_triangle_mesh());
        }
        mesh
    }
}

//! The JSON model document schema.
//!
//! The on-disk format is a plain JSON object with vertex records, an index
//! list and optional morph targets. A document with morph targets loaded in
//! animated mode becomes a [`MorphMesh`]; everything else becomes a
//! [`StaticMesh`].

use log::warn;
use serde::{Deserialize, Serialize};

use crate::mesh::{MorphMesh, SceneMesh, StaticMesh, Vertex};

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct VertexRecord {
    pub position: [f32; 3],
    #[serde(default)]
    pub tex_coords: [f32; 2],
    #[serde(default)]
    pub normal: [f32; 3],
}

/// One morph frame: a full set of vertex positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MorphTarget {
    pub positions: Vec<[f32; 3]>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub name: Option<String>,
    pub vertices: Vec<VertexRecord>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub morph_targets: Vec<MorphTarget>,
}

impl ModelDocument {
    /// Build the runtime mesh for this document.
    ///
    /// `animated` requests the morph-capable variant; a document without morph
    /// targets falls back to a static mesh with a warning since there is
    /// nothing to animate.
    pub fn into_mesh(self, id: u32, animated: bool) -> Box<dyn SceneMesh> {
        let name = self.name.unwrap_or_else(|| "unknown_mesh".to_string());
        let vertices: Vec<Vertex> = self
            .vertices
            .into_iter()
            .map(|record| Vertex {
                position: record.position,
                tex_coords: record.tex_coords,
                normal: record.normal,
            })
            .collect();
        if animated && self.morph_targets.is_empty() {
            warn!(
                "model {} was requested as animated but carries no morph targets, loading it as static",
                name
            );
        }
        if animated && !self.morph_targets.is_empty() {
            let frames = self
                .morph_targets
                .into_iter()
                .map(|target| target.positions)
                .collect();
            Box::new(MorphMesh::new(id, name, vertices, self.indices, frames))
        } else {
            Box::new(StaticMesh::new(id, name, vertices, self.indices))
        }
    }
}

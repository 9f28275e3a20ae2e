use std::{future::Future, pin::Pin};

use anyhow::Context;

use crate::{mesh::SceneMesh, resources::document::ModelDocument};

/**
 * This module contains all logic for loading model assets from external files,
 * both natively and on the web.
 */
pub mod document;

/// The asset format of a model source.
///
/// `Json` is currently the only legal value; the enum exists so that hosts can
/// store and forward a format without committing this crate to real format
/// polymorphism yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelFormat {
    #[default]
    Json,
}

/// Options forwarded from the control object to the mesh source.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    pub format: ModelFormat,
    pub animated: bool,
}

/// Boxed future resolving to a loaded mesh, the seam for hosts that schedule
/// loads on their own executor.
pub type MeshFuture = Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn SceneMesh>>>>>;

/// Asynchronous mesh loader keyed by file path.
pub trait MeshSource {
    /// Start fetching the asset at `path`. `mesh_id` becomes the id of the
    /// produced mesh so that primary and stencil views stay distinguishable
    /// in the host's collections.
    fn fetch(&self, path: &str, mesh_id: u32, options: &LoadOptions) -> MeshFuture;
}

/// The bundled [`MeshSource`] for JSON model documents.
#[derive(Debug, Default)]
pub struct JsonMeshSource;

impl MeshSource for JsonMeshSource {
    fn fetch(&self, path: &str, mesh_id: u32, options: &LoadOptions) -> MeshFuture {
        let path = path.to_string();
        let options = *options;
        Box::pin(async move { load_model_json(&path, mesh_id, &options).await })
    }
}

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> reqwest::Url {
    let window = web_sys::window().unwrap();
    let location = window.location();
    let origin = location.origin().unwrap();
    let base = reqwest::Url::parse(&format!("{}/", origin)).unwrap();
    base.join(file_name).unwrap()
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name);
        reqwest::get(url).await?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = tokio::fs::read_to_string(file_name).await?;

    Ok(txt)
}

pub async fn load_model_json(
    path: &str,
    mesh_id: u32,
    options: &LoadOptions,
) -> anyhow::Result<Box<dyn SceneMesh>> {
    // Single legal format for now, see `ModelFormat`.
    let ModelFormat::Json = options.format;

    let text = load_string(path)
        .await
        .with_context(|| format!("reading model source {path}"))?;
    let document: ModelDocument =
        serde_json::from_str(&text).with_context(|| format!("parsing model document {path}"))?;
    Ok(document.into_mesh(mesh_id, options.animated))
}

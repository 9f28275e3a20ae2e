//! Rendering-side delegate: owns the loaded mesh and forwards playback
//! commands to it.
//!
//! One delegate drives the main view; an optional second instance drives the
//! stencil/hit-test view with identical commands. Loading is asynchronous and
//! guarded by a generation counter: replacing the model source while a load is
//! in flight invalidates the old completion instead of letting it overwrite
//! fresh state.

use std::{cell::RefCell, rc::Rc};

use log::{error, warn};

use crate::{
    clip::AnimationClip,
    error::ModelError,
    mesh::SceneMesh,
    resources::{LoadOptions, MeshSource},
    scene::MeshCollection,
};

/// Where the delegate stands in its load lifecycle.
///
/// `Failed` is terminal: no retry is attempted until a new source is queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Queued,
    Loading,
    Ready,
    Failed,
}

/// Ties a load completion to the request that started it. A completion whose
/// ticket no longer matches the delegate's generation is stale and discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct RenderDelegate {
    mesh_id: u32,
    scene: Rc<RefCell<dyn MeshCollection>>,
    triggers: Rc<RefCell<dyn MeshCollection>>,
    source: Rc<dyn MeshSource>,
    mesh: Option<Box<dyn SceneMesh>>,
    pending: Option<AnimationClip>,
    phase: LoadPhase,
    generation: u64,
    dirty: bool,
}

impl RenderDelegate {
    pub fn new(
        mesh_id: u32,
        scene: Rc<RefCell<dyn MeshCollection>>,
        triggers: Rc<RefCell<dyn MeshCollection>>,
        source: Rc<dyn MeshSource>,
    ) -> Self {
        Self {
            mesh_id,
            scene,
            triggers,
            source,
            mesh: None,
            pending: None,
            phase: LoadPhase::Idle,
            generation: 0,
            dirty: false,
        }
    }

    pub fn mesh_id(&self) -> u32 {
        self.mesh_id
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    /// The loaded mesh, for vertex upload by the host renderer.
    pub fn mesh(&self) -> Option<&dyn SceneMesh> {
        self.mesh.as_deref()
    }

    /// Consume the needs-re-render flag for this frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Dispose any loaded resources and mark the delegate for a fresh load.
    /// Bumping the generation invalidates completions still in flight.
    pub fn queue_load(&mut self) {
        self.unload();
        self.generation += 1;
        self.phase = LoadPhase::Queued;
    }

    /// First half of the split load API: transition into `Loading` and hand
    /// out the ticket the eventual completion must present.
    pub fn begin_load(&mut self) -> LoadTicket {
        if self.phase != LoadPhase::Queued {
            self.queue_load();
        }
        self.phase = LoadPhase::Loading;
        LoadTicket(self.generation)
    }

    /// Second half of the split load API. Stale tickets are discarded; a
    /// failed result parks the delegate in the terminal `Failed` phase.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        path: &str,
        result: anyhow::Result<Box<dyn SceneMesh>>,
    ) -> Result<(), ModelError> {
        if ticket.0 != self.generation {
            warn!(
                "discarding stale load completion for {} ({:?}, current generation {})",
                path, ticket, self.generation
            );
            return Ok(());
        }
        match result {
            Ok(mesh) => {
                self.scene.borrow_mut().add(mesh.id());
                self.triggers.borrow_mut().add(mesh.id());
                self.mesh = Some(mesh);
                self.phase = LoadPhase::Ready;
                self.dirty = true;
                Ok(())
            }
            Err(reason) => {
                error!("failed to load model {}: {}", path, reason);
                self.phase = LoadPhase::Failed;
                Err(ModelError::LoadFailed {
                    path: path.to_string(),
                    reason,
                })
            }
        }
    }

    /// Fetch and apply in one step, for hosts that simply await the component's
    /// load hook.
    pub async fn load(&mut self, path: &str, options: &LoadOptions) -> Result<(), ModelError> {
        let ticket = self.begin_load();
        let future = self.source.fetch(path, self.mesh_id, options);
        let result = future.await;
        self.finish_load(ticket, path, result)
    }

    /// Forward a clip to the mesh, or queue it until the asset is available.
    pub fn play_animation(&mut self, clip: &AnimationClip) {
        if !self.is_loaded() {
            self.pending = Some(clip.clone());
            return;
        }
        if let Some(animation) = self.mesh.as_mut().and_then(|mesh| mesh.animation_mut()) {
            animation.set_time_ms(0.0);
            animation.set_duration_ms(clip.duration_ms);
            animation.set_forward(clip.forward);
            animation.set_frame_range(clip.start, clip.end);
        }
    }

    /// Advance the animation clock. No-op until the asset is loaded; a clip
    /// queued during loading is applied on the first advance after it.
    pub fn advance_time(&mut self, delta_ms: f64) {
        if !self.is_loaded() {
            return;
        }
        if let Some(clip) = self.pending.take() {
            self.play_animation(&clip);
        }
        if let Some(animation) = self.mesh.as_mut().and_then(|mesh| mesh.animation_mut()) {
            animation.update_animation(delta_ms);
            self.dirty = true;
        }
    }

    /// Current animation clock, `0.0` while nothing is loaded.
    pub fn sample_time(&self) -> f64 {
        self.mesh
            .as_ref()
            .and_then(|mesh| mesh.animation())
            .map(|animation| animation.time_ms())
            .unwrap_or(0.0)
    }

    /// Park the clock on the terminal value and force a final pose update.
    pub fn snap_to_last_frame(&mut self) {
        if let Some(animation) = self.mesh.as_mut().and_then(|mesh| mesh.animation_mut()) {
            let end = animation.duration_ms();
            animation.set_time_ms(end);
            animation.update_animation(0.0);
            self.dirty = true;
        }
    }

    /// Remove the mesh from the scene and trigger collections and release it.
    /// Safe to call when nothing is loaded.
    pub fn unload(&mut self) {
        if let Some(mesh) = self.mesh.take() {
            self.scene.borrow_mut().remove(mesh.id());
            self.triggers.borrow_mut().remove(mesh.id());
        }
        self.pending = None;
        self.phase = LoadPhase::Idle;
    }
}

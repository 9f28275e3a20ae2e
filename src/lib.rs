//! model-flow
//!
//! An animated 3D model component for scene-graph engines. The crate owns the
//! declarative animation state (named clips, playing/looping flags, sampled
//! playback time) and the rendering-side delegates that hold the loaded mesh,
//! while the host framework keeps its own render loop, scene traversal and
//! input handling and drives the component through a small set of hooks.
//!
//! High-level modules
//! - `clip`: the frame-range animation clip value type
//! - `component`: the lifecycle hooks (`load`/`unload`/`tick`) a host calls
//! - `delegate`: the render delegate owning the mesh and the load lifecycle
//! - `error`: typed precondition and load errors
//! - `event`: playback events and the host dispatch seam
//! - `mesh`: mesh abstractions and the bundled CPU morph-target mesh
//! - `model`: the `Model3D` control object with the public playback API
//! - `resources`: JSON model documents and asynchronous asset loading
//! - `scene`: scene / hit-test membership containers
//!

pub mod clip;
pub mod component;
pub mod delegate;
pub mod error;
pub mod event;
pub mod mesh;
pub mod model;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use clip::AnimationClip;
pub use component::{ComponentFuture, SceneComponent};
pub use delegate::{LoadPhase, LoadTicket, RenderDelegate};
pub use error::ModelError;
pub use event::{EventProxy, ModelEvent};
pub use mesh::{AnimatedMesh, MorphMesh, SceneMesh, StaticMesh, Vertex};
pub use model::{Model3D, ModelOptions};
pub use resources::{JsonMeshSource, LoadOptions, MeshFuture, MeshSource, ModelFormat};
pub use scene::{IdSet, MeshCollection};

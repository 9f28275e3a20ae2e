#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
};

use model_flow::{
    AnimatedMesh, EventProxy, IdSet, MeshCollection, MeshFuture, MeshSource, Model3D, ModelEvent,
    ModelOptions, RenderDelegate, SceneMesh, Vertex,
};

/// Event proxy that records every dispatched event for later assertions.
pub struct RecordingProxy(pub Rc<RefCell<Vec<ModelEvent>>>);

impl EventProxy for RecordingProxy {
    fn dispatch(&mut self, event: ModelEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// Every call a [`FakeMesh`] receives, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeshCall {
    SetTime(f64),
    SetDuration(f64),
    SetForward(bool),
    SetFrameRange(u32, u32),
    Update(f64),
}

/// Shared recorder so assertions survive the mesh moving into a delegate.
#[derive(Debug, Default)]
pub struct MeshLog {
    pub calls: Vec<MeshCall>,
    pub clock: f64,
    pub duration: f64,
}

impl MeshLog {
    pub fn handle() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// The `set_time` values received, for counting terminal-frame snaps.
    pub fn set_time_calls(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MeshCall::SetTime(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }
}

/// Scripted mesh double with the same wrapping-clock semantics as `MorphMesh`.
pub struct FakeMesh {
    id: u32,
    name: String,
    animated: bool,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    log: Rc<RefCell<MeshLog>>,
}

impl FakeMesh {
    pub fn animated(id: u32, log: Rc<RefCell<MeshLog>>) -> Self {
        Self {
            id,
            name: format!("fake_mesh_{id}"),
            animated: true,
            vertices: Vec::new(),
            indices: Vec::new(),
            log,
        }
    }

    pub fn fixed(id: u32, log: Rc<RefCell<MeshLog>>) -> Self {
        Self {
            animated: false,
            ..Self::animated(id, log)
        }
    }
}

impl SceneMesh for FakeMesh {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn animation(&self) -> Option<&dyn AnimatedMesh> {
        self.animated.then_some(self as &dyn AnimatedMesh)
    }

    fn animation_mut(&mut self) -> Option<&mut dyn AnimatedMesh> {
        if self.animated {
            Some(self as &mut dyn AnimatedMesh)
        } else {
            None
        }
    }
}

impl AnimatedMesh for FakeMesh {
    fn time_ms(&self) -> f64 {
        self.log.borrow().clock
    }

    fn set_time_ms(&mut self, ms: f64) {
        let mut log = self.log.borrow_mut();
        let duration = log.duration.max(0.0);
        log.clock = ms.clamp(0.0, duration);
        log.calls.push(MeshCall::SetTime(ms));
    }

    fn duration_ms(&self) -> f64 {
        self.log.borrow().duration
    }

    fn set_duration_ms(&mut self, ms: f64) {
        let mut log = self.log.borrow_mut();
        log.duration = ms;
        log.calls.push(MeshCall::SetDuration(ms));
    }

    fn set_forward(&mut self, forward: bool) {
        self.log.borrow_mut().calls.push(MeshCall::SetForward(forward));
    }

    fn set_frame_range(&mut self, start: u32, end: u32) {
        self.log
            .borrow_mut()
            .calls
            .push(MeshCall::SetFrameRange(start, end));
    }

    fn update_animation(&mut self, delta_ms: f64) {
        let mut log = self.log.borrow_mut();
        let mut clock = log.clock + delta_ms;
        if log.duration > 0.0 && clock > log.duration {
            clock %= log.duration;
        }
        log.clock = clock.max(0.0);
        log.calls.push(MeshCall::Update(delta_ms));
    }
}

/// Mesh source double serving pre-queued results.
#[derive(Default)]
pub struct FakeSource {
    results: RefCell<VecDeque<anyhow::Result<Box<dyn SceneMesh>>>>,
}

impl FakeSource {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push(&self, result: anyhow::Result<Box<dyn SceneMesh>>) {
        self.results.borrow_mut().push_back(result);
    }
}

impl MeshSource for FakeSource {
    fn fetch(&self, path: &str, _mesh_id: u32, _options: &model_flow::LoadOptions) -> MeshFuture {
        let result = self
            .results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no queued result for {path}")));
        Box::pin(async move { result })
    }
}

/// Everything a test needs to observe a model built from doubles.
pub struct Harness {
    pub events: Rc<RefCell<Vec<ModelEvent>>>,
    pub scene: Rc<RefCell<IdSet>>,
    pub triggers: Rc<RefCell<IdSet>>,
    pub log: Rc<RefCell<MeshLog>>,
    pub stencil_log: Option<Rc<RefCell<MeshLog>>>,
    pub source: Rc<FakeSource>,
}

pub const PRIMARY_MESH_ID: u32 = 1;
pub const STENCIL_MESH_ID: u32 = 2;

pub fn animated_model(src: &str) -> (Model3D, Harness) {
    build_model(src, false)
}

pub fn animated_model_with_stencil(src: &str) -> (Model3D, Harness) {
    build_model(src, true)
}

fn build_model(src: &str, with_stencil: bool) -> (Model3D, Harness) {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = Rc::new(RefCell::new(Vec::new()));
    let scene = Rc::new(RefCell::new(IdSet::new()));
    let triggers = Rc::new(RefCell::new(IdSet::new()));
    let log = MeshLog::handle();
    let source = FakeSource::new();
    source.push(Ok(
        Box::new(FakeMesh::animated(PRIMARY_MESH_ID, log.clone())) as Box<dyn SceneMesh>
    ));

    let scene_dyn: Rc<RefCell<dyn MeshCollection>> = scene.clone();
    let triggers_dyn: Rc<RefCell<dyn MeshCollection>> = triggers.clone();
    let primary = RenderDelegate::new(
        PRIMARY_MESH_ID,
        scene_dyn.clone(),
        triggers_dyn.clone(),
        source.clone(),
    );

    let options = ModelOptions::new(src).expect("valid model source");
    let mut model =
        Model3D::new(options, primary).with_events(Box::new(RecordingProxy(events.clone())));

    let stencil_log = if with_stencil {
        let stencil_log = MeshLog::handle();
        source.push(Ok(Box::new(FakeMesh::animated(
            STENCIL_MESH_ID,
            stencil_log.clone(),
        )) as Box<dyn SceneMesh>));
        let stencil = RenderDelegate::new(STENCIL_MESH_ID, scene_dyn, triggers_dyn, source.clone());
        model = model.with_stencil(stencil);
        Some(stencil_log)
    } else {
        None
    };

    (
        model,
        Harness {
            events,
            scene,
            triggers,
            log,
            stencil_log,
            source,
        },
    )
}

/// Drive the component's load hook on the current thread.
pub fn load_now(model: &mut Model3D) {
    futures::executor::block_on(model.load_models()).expect("model load should succeed");
}

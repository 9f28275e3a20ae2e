//! Mesh abstractions and the bundled CPU morph-target mesh.
//!
//! The render delegates only ever talk to meshes through [`SceneMesh`] and
//! [`AnimatedMesh`], so any rendering library can be plugged in behind them.
//! [`MorphMesh`] is the default animated implementation: a frame-range
//! morph-target mesh whose pose is blended on the CPU and handed to the host
//! renderer as plain vertex data.

use bytemuck::{Pod, Zeroable};
use cgmath::Vector3;
use log::warn;

/// Vertex layout shared with the host renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

/// A loaded mesh attached to a scene.
pub trait SceneMesh {
    /// Stable id used in the scene and trigger collections.
    fn id(&self) -> u32;

    fn name(&self) -> &str;

    /// Current vertex data for upload by the host renderer. For animated
    /// meshes this is the blended pose of the active frame range.
    fn vertices(&self) -> &[Vertex];

    fn indices(&self) -> &[u32];

    /// Animation capability, when the mesh supports it.
    fn animation(&self) -> Option<&dyn AnimatedMesh>;

    fn animation_mut(&mut self) -> Option<&mut dyn AnimatedMesh>;
}

/// Frame-range animation clock of a mesh.
///
/// The clock must wrap modulo the clip duration when it is advanced past the
/// end; `Model3D` detects one-shot completion by observing the resulting
/// decrease of sampled time. An implementation that clamps instead of wrapping
/// will never signal completion of non-looping clips.
pub trait AnimatedMesh {
    /// Milliseconds into the current playback pass.
    fn time_ms(&self) -> f64;

    /// Set the clock directly. Values are clamped into `[0, duration]`; a
    /// clock sitting exactly on the duration renders the terminal pose.
    fn set_time_ms(&mut self, ms: f64);

    fn duration_ms(&self) -> f64;

    fn set_duration_ms(&mut self, ms: f64);

    /// Playback direction across the frame range.
    fn set_forward(&mut self, forward: bool);

    /// Restrict playback to the frames `start..=end`.
    fn set_frame_range(&mut self, start: u32, end: u32);

    /// Advance the clock by `delta_ms` (wrapping past the duration) and
    /// refresh the pose. A zero delta forces a pose refresh without moving
    /// the clock.
    fn update_animation(&mut self, delta_ms: f64);
}

/// A mesh without animation capability.
pub struct StaticMesh {
    id: u32,
    name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl StaticMesh {
    pub fn new(id: u32, name: String, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            id,
            name,
            vertices,
            indices,
        }
    }
}

impl SceneMesh for StaticMesh {
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
        None
    }

    fn animation_mut(&mut self) -> Option<&mut dyn AnimatedMesh> {
        None
    }
}

/// CPU-side morph-target mesh.
///
/// Each morph frame carries one position per base vertex; the pose is a linear
/// blend between the two frames the fractional frame cursor falls between.
pub struct MorphMesh {
    id: u32,
    name: String,
    base: Vec<Vertex>,
    pose: Vec<Vertex>,
    frames: Vec<Vec<[f32; 3]>>,
    indices: Vec<u32>,
    clock_ms: f64,
    duration_ms: f64,
    forward: bool,
    range: (u32, u32),
}

impl MorphMesh {
    /// Frames whose position count does not match the base vertex count are
    /// dropped with a warning, analogous to how mismatched animation tracks
    /// are padded out elsewhere rather than aborting the whole load.
    pub fn new(
        id: u32,
        name: String,
        base: Vec<Vertex>,
        indices: Vec<u32>,
        frames: Vec<Vec<[f32; 3]>>,
    ) -> Self {
        let expected = base.len();
        let frames: Vec<_> = frames
            .into_iter()
            .enumerate()
            .filter_map(|(idx, frame)| {
                if frame.len() == expected {
                    Some(frame)
                } else {
                    warn!(
                        "morph frame {} of {} has {} positions but the mesh has {} vertices, skipping it",
                        idx,
                        name,
                        frame.len(),
                        expected
                    );
                    None
                }
            })
            .collect();
        let last_frame = frames.len().saturating_sub(1) as u32;
        let pose = base.clone();
        let mut mesh = Self {
            id,
            name,
            base,
            pose,
            frames,
            indices,
            clock_ms: 0.0,
            duration_ms: 0.0,
            forward: true,
            range: (0, last_frame),
        };
        mesh.refresh_pose();
        mesh
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Fractional frame cursor for the current clock, respecting direction.
    fn frame_cursor(&self) -> f64 {
        let (start, end) = self.clamped_range();
        let span = (end - start) as f64;
        let t = if self.duration_ms > 0.0 {
            self.clock_ms / self.duration_ms
        } else {
            0.0
        };
        if self.forward {
            start as f64 + t * span
        } else {
            end as f64 - t * span
        }
    }

    fn clamped_range(&self) -> (u32, u32) {
        if self.frames.is_empty() {
            return (0, 0);
        }
        let last = (self.frames.len() - 1) as u32;
        let start = self.range.0.min(last);
        let end = self.range.1.min(last).max(start);
        (start, end)
    }

    fn refresh_pose(&mut self) {
        if self.frames.is_empty() {
            self.pose.copy_from_slice(&self.base);
            return;
        }
        let cursor = self.frame_cursor();
        let lo = cursor.floor() as usize;
        let hi = (lo + 1).min(self.frames.len() - 1);
        let frac = (cursor - lo as f64) as f32;
        let (lower, upper) = (&self.frames[lo.min(self.frames.len() - 1)], &self.frames[hi]);
        for (i, vertex) in self.pose.iter_mut().enumerate() {
            let a = Vector3::from(lower[i]);
            let b = Vector3::from(upper[i]);
            vertex.position = (a + (b - a) * frac).into();
        }
    }
}

impl SceneMesh for MorphMesh {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(&self) -> &[Vertex] {
        &self.pose
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn animation(&self) -> Option<&dyn AnimatedMesh> {
        Some(self)
    }

    fn animation_mut(&mut self) -> Option<&mut dyn AnimatedMesh> {
        Some(self)
    }
}

impl AnimatedMesh for MorphMesh {
    fn time_ms(&self) -> f64 {
        self.clock_ms
    }

    fn set_time_ms(&mut self, ms: f64) {
        self.clock_ms = ms.clamp(0.0, self.duration_ms.max(0.0));
    }

    fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    fn set_duration_ms(&mut self, ms: f64) {
        self.duration_ms = ms.max(0.0);
    }

    fn set_forward(&mut self, forward: bool) {
        self.forward = forward;
        self.refresh_pose();
    }

    fn set_frame_range(&mut self, start: u32, end: u32) {
        self.range = (start, end);
        self.refresh_pose();
    }

    fn update_animation(&mut self, delta_ms: f64) {
        let mut clock = self.clock_ms + delta_ms;
        // Wrap strictly past the end so that a clock parked exactly on the
        // duration keeps rendering the terminal pose.
        if self.duration_ms > 0.0 && clock > self.duration_ms {
            clock %= self.duration_ms;
        }
        self.clock_ms = clock.max(0.0);
        self.refresh_pose();
    }
}

//! The public-facing animated model control object.
//!
//! `Model3D` owns the declarative animation registry (name → clip), the
//! current playback state and the render delegate(s). Application code talks
//! to it exclusively through `play` / `stop` / `set_animation` /
//! `set_model_src` and the accessors; the host framework drives it through the
//! [`SceneComponent`] hooks.

use std::{collections::HashMap, time::Duration};

use crate::{
    clip::AnimationClip,
    component::{ComponentFuture, SceneComponent},
    delegate::{LoadPhase, RenderDelegate},
    error::ModelError,
    event::{EventProxy, LogProxy, ModelEvent},
    resources::{LoadOptions, ModelFormat},
};

/// Construction options: the asset path is required, format and animation
/// support have defaults (`Json`, animated).
#[derive(Clone, Debug)]
pub struct ModelOptions {
    pub model_src: String,
    pub format: ModelFormat,
    pub animated: bool,
}

impl ModelOptions {
    pub fn new(model_src: impl Into<String>) -> Result<Self, ModelError> {
        let model_src = model_src.into();
        if model_src.is_empty() {
            return Err(ModelError::InvalidArgument(
                "model source must not be empty".to_string(),
            ));
        }
        Ok(Self {
            model_src,
            format: ModelFormat::default(),
            animated: true,
        })
    }

    pub fn with_format(mut self, format: ModelFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

pub struct Model3D {
    model_src: String,
    format: ModelFormat,
    animated: bool,
    animations: HashMap<String, AnimationClip>,
    current_animation: String,
    playing: bool,
    looping: bool,
    last_sampled_time_ms: f64,
    primary: RenderDelegate,
    stencil: Option<RenderDelegate>,
    events: Box<dyn EventProxy>,
}

impl Model3D {
    /// The delegate starts with a queued load; the host's first `load()` call
    /// fetches the asset.
    pub fn new(options: ModelOptions, mut primary: RenderDelegate) -> Self {
        primary.queue_load();
        Self {
            model_src: options.model_src,
            format: options.format,
            animated: options.animated,
            animations: HashMap::new(),
            current_animation: String::new(),
            playing: false,
            looping: false,
            last_sampled_time_ms: 0.0,
            primary,
            stencil: None,
            events: Box::new(LogProxy),
        }
    }

    /// Attach the secondary stencil/hit-test view; it mirrors every command
    /// sent to the primary view.
    pub fn with_stencil(mut self, mut stencil: RenderDelegate) -> Self {
        stencil.queue_load();
        self.stencil = Some(stencil);
        self
    }

    pub fn with_events(mut self, events: Box<dyn EventProxy>) -> Self {
        self.events = events;
        self
    }

    /// Register (or overwrite) a clip under `name`. Duration is given in
    /// seconds and stored in milliseconds. Current playback is unaffected,
    /// even when the overwritten clip is the one playing.
    pub fn set_animation(
        &mut self,
        name: &str,
        start: u32,
        end: u32,
        seconds: f64,
        looped: bool,
        forward: bool,
    ) -> Result<&mut Self, ModelError> {
        if name.is_empty() {
            return Err(ModelError::InvalidArgument(
                "animation name must not be empty".to_string(),
            ));
        }
        let clip = AnimationClip::from_seconds(start, end, seconds, looped, forward)?;
        self.animations.insert(name.to_string(), clip);
        Ok(self)
    }

    /// Start or resume playback.
    ///
    /// With `None` the previously selected animation resumes without a time
    /// reset. Selecting the already-current name likewise only raises the
    /// playing flag. Selecting a different clip forwards it to the delegates,
    /// resets the sampled time and mirrors the clip's loop flag.
    pub fn play(&mut self, name: Option<&str>) -> Result<&mut Self, ModelError> {
        let name = match name {
            None => {
                if self.current_animation.is_empty()
                    || !self.animations.contains_key(&self.current_animation)
                {
                    return Err(ModelError::InvalidState("no last animation to resume"));
                }
                self.playing = true;
                return Ok(self);
            }
            Some(name) => name,
        };
        if name.is_empty() {
            return Err(ModelError::InvalidArgument(
                "animation name must not be empty".to_string(),
            ));
        }
        let clip = self
            .animations
            .get(name)
            .cloned()
            .ok_or_else(|| ModelError::NotFound(name.to_string()))?;
        if name == self.current_animation {
            self.playing = true;
            return Ok(self);
        }
        self.primary.play_animation(&clip);
        if let Some(stencil) = &mut self.stencil {
            stencil.play_animation(&clip);
        }
        if !self.playing {
            self.events.dispatch(ModelEvent::Play);
        }
        self.playing = true;
        self.looping = clip.looped;
        self.current_animation = name.to_string();
        self.last_sampled_time_ms = 0.0;
        Ok(self)
    }

    /// Stop playback. Dispatches `Stop` only when something was playing.
    pub fn stop(&mut self) -> &mut Self {
        if self.playing {
            self.events.dispatch(ModelEvent::Stop);
        }
        self.playing = false;
        self
    }

    /// Replace the model source. A no-op when the path is unchanged;
    /// otherwise stops playback, announces the change and queues a reload on
    /// every delegate. The fetch itself happens in the async `load` hook.
    pub fn set_model_src(&mut self, path: &str) -> Result<&mut Self, ModelError> {
        if path.is_empty() {
            return Err(ModelError::InvalidArgument(
                "model source must not be empty".to_string(),
            ));
        }
        if path == self.model_src {
            return Ok(self);
        }
        self.model_src = path.to_string();
        self.stop();
        self.events.dispatch(ModelEvent::ChangeModelSrc);
        self.primary.queue_load();
        if let Some(stencil) = &mut self.stencil {
            stencil.queue_load();
        }
        Ok(self)
    }

    /// Per-frame update, driven by the host.
    ///
    /// Advances the delegates and, for non-looping clips, watches the sampled
    /// time of the primary view. A *decrease* means the underlying clock
    /// wrapped past the clip end: the one-shot finished, so both views snap
    /// to their terminal frame and playback stops. This deliberately detects
    /// wraparound instead of comparing elapsed time against the duration.
    pub fn tick(&mut self, dt: Duration) {
        if !self.playing {
            return;
        }
        let delta_ms = dt.as_secs_f64() * 1000.0;
        self.primary.advance_time(delta_ms);
        if let Some(stencil) = &mut self.stencil {
            stencil.advance_time(delta_ms);
        }
        if self.looping {
            return;
        }
        let sampled = self.primary.sample_time();
        if sampled < self.last_sampled_time_ms {
            self.primary.snap_to_last_frame();
            if let Some(stencil) = &mut self.stencil {
                stencil.snap_to_last_frame();
            }
            self.stop();
        } else {
            self.last_sampled_time_ms = sampled;
        }
    }

    /// Drive every delegate with a queued load to completion. The first
    /// failure propagates; the failing delegate stays in its terminal failed
    /// phase and is skipped by subsequent calls until a new source is set.
    pub async fn load_models(&mut self) -> Result<(), ModelError> {
        let options = LoadOptions {
            format: self.format,
            animated: self.animated,
        };
        let src = self.model_src.clone();
        if self.primary.phase() == LoadPhase::Queued {
            self.primary.load(&src, &options).await?;
        }
        if let Some(stencil) = &mut self.stencil {
            if stencil.phase() == LoadPhase::Queued {
                stencil.load(&src, &options).await?;
            }
        }
        Ok(())
    }

    pub fn animation(&self) -> &str {
        &self.current_animation
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Side-effecting flag setter: `true` resumes via `play(None)`, `false`
    /// stops.
    pub fn set_playing(&mut self, playing: bool) -> Result<&mut Self, ModelError> {
        if playing {
            self.play(None)
        } else {
            Ok(self.stop())
        }
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn model_src(&self) -> &str {
        &self.model_src
    }

    pub fn last_sampled_time_ms(&self) -> f64 {
        self.last_sampled_time_ms
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.animations.get(name)
    }

    pub fn primary(&self) -> &RenderDelegate {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut RenderDelegate {
        &mut self.primary
    }

    pub fn stencil(&self) -> Option<&RenderDelegate> {
        self.stencil.as_ref()
    }

    pub fn stencil_mut(&mut self) -> Option<&mut RenderDelegate> {
        self.stencil.as_mut()
    }
}

impl SceneComponent for Model3D {
    fn load(&mut self) -> ComponentFuture<'_> {
        Box::pin(async move {
            self.load_models().await?;
            Ok(())
        })
    }

    fn unload(&mut self) {
        self.stop();
        self.primary.unload();
        if let Some(stencil) = &mut self.stencil {
            stencil.unload();
        }
    }

    fn tick(&mut self, dt: Duration) {
        Model3D::tick(self, dt);
    }
}

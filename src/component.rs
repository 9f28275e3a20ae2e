//! The host-facing component lifecycle.
//!
//! Instead of subclassing a framework base type, a component implements this
//! trait and the host framework holds a plain reference to it, calling the
//! hooks from its own loop:
//!
//! 1. `load()` is awaited once after construction and again whenever the
//!    component reports a source change
//! 2. `tick()` is called exactly once per frame with the elapsed time
//! 3. `unload()` is called when the owning scene object is destroyed

use std::{future::Future, pin::Pin, time::Duration};

/// Boxed future returned by the load hook, so the trait stays object-safe for
/// hosts that keep `Box<dyn SceneComponent>` collections.
pub type ComponentFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<()>> + 'a>>;

/// Lifecycle hooks the host framework drives.
pub trait SceneComponent {
    /// Bring any queued asset loads to completion.
    fn load(&mut self) -> ComponentFuture<'_>;

    /// Release scene resources. Safe to call more than once.
    fn unload(&mut self);

    /// Per-frame update. Not reentrant; must be called from the host's single
    /// update cycle only.
    fn tick(&mut self, dt: Duration);
}

//! Component events and the host dispatch seam.
//!
//! The control object announces its state transitions through an [`EventProxy`]
//! the host provides, much like an event-loop proxy forwards user events to an
//! application. A proxy that only logs is used when the host does not care.

use log::debug;

/// Events dispatched by `Model3D` on state transitions.
///
/// `Play` and `Stop` fire only on actual transitions of the playing flag,
/// `ChangeModelSrc` fires when the asset path is replaced with a new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelEvent {
    Play,
    Stop,
    ChangeModelSrc,
}

/// Host-side event sink.
pub trait EventProxy {
    fn dispatch(&mut self, event: ModelEvent);
}

/// Default proxy: events are logged and otherwise dropped.
#[derive(Debug, Default)]
pub struct LogProxy;

impl EventProxy for LogProxy {
    fn dispatch(&mut self, event: ModelEvent) {
        debug!("model event: {:?}", event);
    }
}

//! Animation clip definitions.
//!
//! A clip is a named, reusable playback description: which frame range to play,
//! how long one pass takes, whether it loops and in which direction it runs.
//! Clips are registered on the control object and forwarded verbatim to the
//! render delegates when played.

use crate::error::ModelError;

/// A frame-range playback definition.
///
/// Immutable once created; `Model3D::set_animation` overwrites the whole entry
/// rather than mutating it in place.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub start: u32,
    pub end: u32,
    pub duration_ms: f64,
    pub looped: bool,
    pub forward: bool,
}

impl AnimationClip {
    /// Build a clip from a duration given in seconds, the unit the public API
    /// uses. Stored internally in milliseconds.
    pub fn from_seconds(
        start: u32,
        end: u32,
        seconds: f64,
        looped: bool,
        forward: bool,
    ) -> Result<Self, ModelError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ModelError::InvalidArgument(format!(
                "clip duration must be a non-negative number of seconds, got {seconds}"
            )));
        }
        Ok(Self {
            start,
            end,
            duration_ms: seconds * 1000.0,
            looped,
            forward,
        })
    }
}

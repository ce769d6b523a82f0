//! Playback control boundary trait and supporting types.
//!
//! The host embeds a native media-rendering control (a video widget) and hands
//! the core an exclusive handle to it through [`PlaybackControl`]. The core
//! only ever issues commands against this surface; it never reads playback
//! state back except through the two health predicates. Implementations wrap
//! whatever native control the host ships and are free to translate the
//! locator into platform-specific loading.

use crate::error::{HostError, Result};

/// Identifier of a media resource to load into the control.
///
/// A locator is an opaque path or URI; the core compares locators only for
/// equality and emptiness and never interprets their contents.
pub type MediaLocator = String;

/// Command surface of the embedded native playback control.
///
/// All mutating calls are fire-and-forget commands: the control may apply them
/// asynchronously and the core does not wait for or observe completion. The
/// two predicates are the only synchronous state the core reads.
///
/// # Threading
///
/// Implementations are not expected to be reentrant-safe. The core serializes
/// every call behind a mutex scoped to the control instance and marshals all
/// calls onto a single owner loop; implementors only need `Send`.
///
/// # Failure semantics
///
/// - A command against a disposed control should return
///   [`HostError::OperationFailed`]; the core treats this as a silent skip.
/// - [`PlaybackControl::is_faulted`] reports an unrecoverable native error,
///   which is distinct from normal disposal and escalates to component
///   teardown on the next render pass.
pub trait PlaybackControl: Send {
    /// Load a media resource into the control, replacing any current media.
    fn load(&mut self, locator: &MediaLocator) -> Result<()>;

    /// Begin or resume playback.
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the current position.
    fn pause(&mut self) -> Result<()>;

    /// Stop playback and release the playback session.
    fn stop(&mut self) -> Result<()>;

    /// Seek to an absolute position expressed in seconds.
    fn set_position_secs(&mut self, seconds: f64) -> Result<()>;

    /// Force the mute flag. The audio track of a sync video is never meant to
    /// be heard, so the core re-applies `true` on every update tick.
    fn set_muted(&mut self, muted: bool) -> Result<()>;

    /// `true` when the native control hit an unrecoverable error.
    fn is_faulted(&self) -> bool;

    /// `true` once the native control has been torn down by the host.
    fn is_disposed(&self) -> bool;
}

/// Placeholder control installed when the native control could not be created.
///
/// Every command fails with [`HostError::ControlFault`] and the control
/// reports itself permanently faulted, so the component constructs normally
/// but is torn down by the lifecycle guard on the first render pass.
#[derive(Debug, Default)]
pub struct FaultedControl;

impl FaultedControl {
    fn fault<T>(&self) -> Result<T> {
        Err(HostError::ControlFault(
            "native playback control was never created".to_string(),
        ))
    }
}

impl PlaybackControl for FaultedControl {
    fn load(&mut self, _locator: &MediaLocator) -> Result<()> {
        self.fault()
    }

    fn play(&mut self) -> Result<()> {
        self.fault()
    }

    fn pause(&mut self) -> Result<()> {
        self.fault()
    }

    fn stop(&mut self) -> Result<()> {
        self.fault()
    }

    fn set_position_secs(&mut self, _seconds: f64) -> Result<()> {
        self.fault()
    }

    fn set_muted(&mut self, _muted: bool) -> Result<()> {
        self.fault()
    }

    fn is_faulted(&self) -> bool {
        true
    }

    fn is_disposed(&self) -> bool {
        false
    }
}

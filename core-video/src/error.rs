//! # Video Component Errors
//!
//! Error types surfaced by the video component. Render entry points
//! report a faulted native control through [`VideoError::ControlFaulted`]
//! after the component has already disposed itself.

use host_traits::HostError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VideoError {
    /// The native playback control entered a faulted state. The
    /// component disposes itself before returning this.
    #[error("Native control faulted; video component disposed")]
    ControlFaulted,

    /// The persisted settings document could not be parsed.
    #[error("Invalid settings document: {0}")]
    Settings(String),

    /// An error reported by a host boundary.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// The owner loop is gone and a command could not be delivered.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] core_runtime::Error),
}

pub type Result<T> = std::result::Result<T, VideoError>;

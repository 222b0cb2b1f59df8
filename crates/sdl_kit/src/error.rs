//! Error types for the wrapper layer
//!
//! SDL reports failure through integer return codes and a process-global
//! error string (`SDL_GetError`). This module translates that convention
//! into `Result`-based reporting: every fallible operation captures the
//! native error text at the moment of failure and returns it as an
//! [`SdlError`]. The error string is a global on the native side, so a
//! concurrent native call between failure and retrieval can replace the
//! message; the wrapper assumes SDL's single-threaded usage model and does
//! not attempt to mitigate that.

use std::ffi::CStr;

use sdl2_sys as sys;
use thiserror::Error;

/// Wrapper-layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdlError {
    /// The underlying native call reported failure. The payload is the
    /// text of `SDL_GetError()` captured when the failure was observed.
    #[error("SDL error: {0}")]
    Native(String),

    /// `Sdl::try_init` was called while another context is still alive.
    #[error("SDL is already initialized in this process")]
    AlreadyInitialized,

    /// The operation requires a subsystem that was not requested at init.
    #[error("required subsystem is not initialized: {0}")]
    SubsystemMissing(&'static str),

    /// A parameter could not be translated to the native representation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the wrapper layer
pub type SdlResult<T> = Result<T, SdlError>;

/// Capture the current native error string as an [`SdlError::Native`].
///
/// Must be called immediately after observing a failing return code,
/// before any further native call can overwrite the global message.
pub(crate) fn native_error() -> SdlError {
    let message = unsafe {
        CStr::from_ptr(sys::SDL_GetError())
            .to_string_lossy()
            .into_owned()
    };
    SdlError::Native(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_native_message() {
        let err = SdlError::Native("out of memory".to_string());
        assert_eq!(err.to_string(), "SDL error: out of memory");
    }

    #[test]
    fn subsystem_error_names_the_subsystem() {
        let err = SdlError::SubsystemMissing("video");
        assert!(err.to_string().contains("video"));
    }
}

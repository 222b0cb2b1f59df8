//! Library initialization and the process-wide SDL context
//!
//! SDL must be initialized before any other native call and shut down
//! exactly once. [`Sdl`] makes that lifecycle a value: constructing it runs
//! `SDL_Init` with the requested subsystem mask, dropping it runs
//! `SDL_Quit`. The context is deliberately neither `Send` nor `Sync`:
//! SDL's video, event and joystick machinery must be driven from the
//! thread that initialized it, and the wrapper layer turns that rule into
//! a compile-time property.

use std::ffi::{c_char, c_int, c_void, CStr};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};

use bitflags::bitflags;
use sdl2_sys as sys;

use crate::error::{native_error, SdlError, SdlResult};
use crate::events::EventPump;

bitflags! {
    /// Subsystem selection mask for [`Sdl::try_init`]
    ///
    /// Values mirror SDL's `SDL_INIT_*` bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InitFlags: u32 {
        /// Timer subsystem
        const TIMER = 0x0000_0001;
        /// Audio subsystem
        const AUDIO = 0x0000_0010;
        /// Video subsystem (implies events)
        const VIDEO = 0x0000_0020;
        /// Joystick subsystem (implies events)
        const JOYSTICK = 0x0000_0200;
        /// Haptic (force feedback) subsystem
        const HAPTIC = 0x0000_1000;
        /// Game controller subsystem (implies joystick)
        const GAME_CONTROLLER = 0x0000_2000;
        /// Event subsystem
        const EVENTS = 0x0000_4000;
        /// Sensor subsystem
        const SENSOR = 0x0000_8000;
        /// Every subsystem
        const EVERYTHING = Self::TIMER.bits()
            | Self::AUDIO.bits()
            | Self::VIDEO.bits()
            | Self::JOYSTICK.bits()
            | Self::HAPTIC.bits()
            | Self::GAME_CONTROLLER.bits()
            | Self::EVENTS.bits()
            | Self::SENSOR.bits();
    }
}

// SDL_Init/SDL_Quit manage process-global native state, so only one
// context may be alive at a time regardless of how it is reached.
static CONTEXT_ALIVE: AtomicBool = AtomicBool::new(false);

/// RAII handle to the initialized native library
///
/// Factories for windows, joysticks and audio devices take `&Sdl` so a
/// resource cannot be created before initialization. The context must
/// outlive every wrapper created through it.
pub struct Sdl {
    // !Send + !Sync: the initializing thread is the only legal caller.
    _single_thread: PhantomData<*mut ()>,
}

impl Sdl {
    /// Initialize SDL with the requested subsystems.
    ///
    /// # Errors
    ///
    /// [`SdlError::AlreadyInitialized`] if another context is alive,
    /// [`SdlError::Native`] if the native init call fails.
    pub fn try_init(flags: InitFlags) -> SdlResult<Self> {
        if CONTEXT_ALIVE.swap(true, Ordering::SeqCst) {
            return Err(SdlError::AlreadyInitialized);
        }
        let rc = unsafe { sys::SDL_Init(flags.bits()) };
        if rc != 0 {
            let err = native_error();
            CONTEXT_ALIVE.store(false, Ordering::SeqCst);
            return Err(err);
        }
        log::info!("SDL initialized with {flags:?}");
        Ok(Self {
            _single_thread: PhantomData,
        })
    }

    /// Initialize SDL with the requested subsystems.
    ///
    /// Convenience form of [`Sdl::try_init`].
    ///
    /// # Panics
    ///
    /// Panics if initialization fails.
    pub fn init(flags: InitFlags) -> Self {
        Self::try_init(flags).unwrap_or_else(|err| panic!("SDL initialization failed: {err}"))
    }

    /// Which of the queried subsystems are currently initialized.
    pub fn was_init(&self, flags: InitFlags) -> InitFlags {
        let active = unsafe { sys::SDL_WasInit(flags.bits()) };
        InitFlags::from_bits_truncate(active) & flags
    }

    /// Whether every subsystem in `flags` is initialized.
    pub fn has_subsystem(&self, flags: InitFlags) -> bool {
        self.was_init(flags) == flags
    }

    /// Create the event pump for this context.
    ///
    /// # Errors
    ///
    /// [`SdlError::SubsystemMissing`] if the event subsystem is not up
    /// (it is initialized implicitly by the video and joystick subsystems).
    pub fn try_event_pump(&self) -> SdlResult<EventPump> {
        if !self.has_subsystem(InitFlags::EVENTS) {
            return Err(SdlError::SubsystemMissing("events"));
        }
        Ok(EventPump::new())
    }

    /// Create the event pump for this context.
    ///
    /// Convenience form of [`Sdl::try_event_pump`].
    ///
    /// # Panics
    ///
    /// Panics if the event subsystem is not initialized.
    pub fn event_pump(&self) -> EventPump {
        self.try_event_pump()
            .unwrap_or_else(|err| panic!("event pump unavailable: {err}"))
    }
}

impl Drop for Sdl {
    fn drop(&mut self) {
        unsafe { sys::SDL_Quit() };
        CONTEXT_ALIVE.store(false, Ordering::SeqCst);
        log::info!("SDL shut down");
    }
}

/// Block the calling thread for at least `ms` milliseconds.
///
/// Forwards to `SDL_Delay`, which waits on the OS scheduler granularity.
pub fn delay(ms: u32) {
    unsafe { sys::SDL_Delay(ms) };
}

/// Route SDL's own log output into the `log` facade.
///
/// Native diagnostics (renderer fallbacks, joystick hotplug notes) then
/// land in the same sink as the wrapper layer's messages, under the
/// `sdl2` target. Remains installed for the lifetime of the process.
pub fn forward_native_log() {
    unsafe {
        sys::SDL_LogSetOutputFunction(Some(native_log_bridge), std::ptr::null_mut());
    }
    log::debug!("native SDL log output forwarded to the log facade");
}

unsafe extern "C" fn native_log_bridge(
    _userdata: *mut c_void,
    category: c_int,
    priority: sys::SDL_LogPriority,
    message: *const c_char,
) {
    if message.is_null() {
        return;
    }
    let text = CStr::from_ptr(message).to_string_lossy();
    // SDL_LogPriority: VERBOSE=1, DEBUG=2, INFO=3, WARN=4, ERROR=5, CRITICAL=6
    let level = match priority as i32 {
        1 => log::Level::Trace,
        2 => log::Level::Debug,
        3 => log::Level::Info,
        4 => log::Level::Warn,
        _ => log::Level::Error,
    };
    log::log!(target: "sdl2", level, "[category {category}] {text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_flag_values_match_the_native_masks() {
        assert_eq!(InitFlags::TIMER.bits(), 0x01);
        assert_eq!(InitFlags::AUDIO.bits(), 0x10);
        assert_eq!(InitFlags::VIDEO.bits(), 0x20);
        assert_eq!(InitFlags::JOYSTICK.bits(), 0x200);
        assert_eq!(InitFlags::GAME_CONTROLLER.bits(), 0x2000);
        assert_eq!(InitFlags::EVENTS.bits(), 0x4000);
    }

    #[test]
    fn everything_is_the_union_of_all_subsystems() {
        let union = InitFlags::TIMER
            | InitFlags::AUDIO
            | InitFlags::VIDEO
            | InitFlags::JOYSTICK
            | InitFlags::HAPTIC
            | InitFlags::GAME_CONTROLLER
            | InitFlags::EVENTS
            | InitFlags::SENSOR;
        assert_eq!(InitFlags::EVERYTHING, union);
    }
}

//! Audio device wrapper
//!
//! [`AudioDevice`] opens the default playback device in queueing mode:
//! the application pushes sample data with [`AudioDevice::queue`] and SDL
//! drains it from its own mixing thread. The device id is an integer
//! handle (0 = invalid) and goes through the same ownership cell as the
//! pointer-based wrappers.
//!
//! SDL requires the per-device callback lock around state shared with the
//! audio thread; [`AudioDeviceLock`] wraps it as a scope guard tied to the
//! device's lifetime by borrow.

use std::ffi::c_void;

use sdl2_sys as sys;

use crate::error::{native_error, SdlError, SdlResult};
use crate::foundation::handle::{HandleCell, RawHandle};
use crate::init::{InitFlags, Sdl};

/// Sample format for audio devices
///
/// Values mirror SDL's `AUDIO_*` format constants (bit-packed sign,
/// endianness and sample width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum AudioFormat {
    /// Unsigned 8-bit samples
    U8 = 0x0008,
    /// Signed 8-bit samples
    S8 = 0x8008,
    /// Signed 16-bit little-endian samples
    S16Lsb = 0x8010,
    /// Signed 16-bit big-endian samples
    S16Msb = 0x9010,
    /// Signed 32-bit little-endian samples
    S32Lsb = 0x8020,
    /// 32-bit little-endian float samples
    F32Lsb = 0x8120,
}

impl AudioFormat {
    fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            0x0008 => Some(Self::U8),
            0x8008 => Some(Self::S8),
            0x8010 => Some(Self::S16Lsb),
            0x9010 => Some(Self::S16Msb),
            0x8020 => Some(Self::S32Lsb),
            0x8120 => Some(Self::F32Lsb),
            _ => None,
        }
    }
}

/// Requested or obtained audio device parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    /// Sample rate in Hz
    pub frequency: i32,
    /// Sample format
    pub format: AudioFormat,
    /// Channel count (1 = mono, 2 = stereo)
    pub channels: u8,
    /// Buffer size in sample frames (power of two)
    pub samples: u16,
}

impl Default for AudioSpec {
    fn default() -> Self {
        Self {
            frequency: 44_100,
            format: AudioFormat::S16Lsb,
            channels: 2,
            samples: 4096,
        }
    }
}

/// Integer device handle issued by `SDL_OpenAudioDevice`; 0 is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeviceId(u32);

impl RawHandle for DeviceId {
    const EMPTY: Self = Self(0);
}

/// RAII wrapper around one opened audio playback device
pub struct AudioDevice {
    cell: HandleCell<DeviceId>,
    spec: AudioSpec,
}

impl AudioDevice {
    /// Open the default playback device in queueing mode.
    ///
    /// The device starts paused; call [`resume`](Self::resume) once data
    /// is queued. `spec` is a request; the returned device reports what
    /// was actually obtained via [`spec`](Self::spec).
    ///
    /// # Errors
    ///
    /// [`SdlError::SubsystemMissing`] without the audio subsystem,
    /// [`SdlError::Native`] if no device can be opened.
    pub fn try_open(sdl: &Sdl, spec: &AudioSpec) -> SdlResult<Self> {
        if !sdl.has_subsystem(InitFlags::AUDIO) {
            return Err(SdlError::SubsystemMissing("audio"));
        }
        let desired = sys::SDL_AudioSpec {
            freq: spec.frequency,
            format: spec.format as u16,
            channels: spec.channels,
            silence: 0,
            samples: spec.samples,
            padding: 0,
            size: 0,
            callback: None,
            userdata: std::ptr::null_mut(),
        };
        let mut obtained: sys::SDL_AudioSpec = unsafe { std::mem::zeroed() };
        let id = unsafe {
            sys::SDL_OpenAudioDevice(std::ptr::null(), 0, &desired, &mut obtained, 0)
        };
        if id == 0 {
            return Err(native_error());
        }
        let spec = AudioSpec {
            frequency: obtained.freq,
            format: AudioFormat::from_raw(obtained.format).unwrap_or(spec.format),
            channels: obtained.channels,
            samples: obtained.samples,
        };
        log::debug!(
            "opened audio device {id} ({} Hz, {:?}, {} ch)",
            spec.frequency,
            spec.format,
            spec.channels
        );
        Ok(Self {
            cell: HandleCell::adopt(DeviceId(id)),
            spec,
        })
    }

    /// Open the default playback device in queueing mode.
    ///
    /// Convenience form of [`AudioDevice::try_open`].
    ///
    /// # Panics
    ///
    /// Panics if no device can be opened.
    pub fn open(sdl: &Sdl, spec: &AudioSpec) -> Self {
        Self::try_open(sdl, spec).unwrap_or_else(|err| panic!("audio device open failed: {err}"))
    }

    /// The parameters the device was actually opened with.
    pub fn spec(&self) -> &AudioSpec {
        &self.spec
    }

    /// Queue raw sample data for playback.
    ///
    /// The data must match the obtained [`spec`](Self::spec).
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if queueing fails.
    pub fn queue(&self, data: &[u8]) -> SdlResult<()> {
        let rc = unsafe {
            sys::SDL_QueueAudio(
                self.id().0,
                data.as_ptr().cast::<c_void>(),
                data.len() as u32,
            )
        };
        if rc != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// Number of bytes of queued, not yet played audio.
    pub fn queued_bytes(&self) -> u32 {
        unsafe { sys::SDL_GetQueuedAudioSize(self.id().0) }
    }

    /// Pause playback (the device keeps its queue).
    pub fn pause(&mut self) {
        unsafe { sys::SDL_PauseAudioDevice(self.id().0, 1) };
    }

    /// Start or resume playback.
    pub fn resume(&mut self) {
        unsafe { sys::SDL_PauseAudioDevice(self.id().0, 0) };
    }

    /// Hold the device's callback lock for the lifetime of the guard.
    ///
    /// While the guard is alive the audio thread cannot run the device's
    /// callback, so state shared with it may be touched safely.
    pub fn lock(&mut self) -> AudioDeviceLock<'_> {
        unsafe { sys::SDL_LockAudioDevice(self.id().0) };
        AudioDeviceLock { device: self }
    }

    /// Whether this wrapper currently holds a live handle.
    pub fn is_valid(&self) -> bool {
        !self.cell.is_empty()
    }

    fn id(&self) -> DeviceId {
        self.cell.get().unwrap_or(DeviceId::EMPTY)
    }

    /// Close the device now instead of at end of scope.
    pub fn destroy(mut self) {
        self.destroy_in_place();
    }

    fn destroy_in_place(&mut self) {
        if let Some(id) = self.cell.take_owned() {
            unsafe { sys::SDL_CloseAudioDevice(id.0) };
            log::debug!("closed audio device {}", id.0);
        } else {
            self.cell.release();
        }
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        self.destroy_in_place();
    }
}

/// Scope guard holding an audio device's callback lock
///
/// Move-only; the lock is released exactly once, when the guard drops.
pub struct AudioDeviceLock<'a> {
    device: &'a mut AudioDevice,
}

impl AudioDeviceLock<'_> {
    /// The locked device.
    pub fn device(&mut self) -> &mut AudioDevice {
        self.device
    }
}

impl Drop for AudioDeviceLock<'_> {
    fn drop(&mut self) {
        unsafe { sys::SDL_UnlockAudioDevice(self.device.id().0) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // API shape checks: validated at compile time, no SDL runtime needed.
    #[test]
    fn factory_and_queue_signatures() {
        let _open: fn(&Sdl, &AudioSpec) -> SdlResult<AudioDevice> = AudioDevice::try_open;
        let _queue: fn(&AudioDevice, &[u8]) -> SdlResult<()> = AudioDevice::queue;
        let _lock: for<'a> fn(&'a mut AudioDevice) -> AudioDeviceLock<'a> = AudioDevice::lock;
    }

    #[test]
    fn format_values_match_the_native_constants() {
        assert_eq!(AudioFormat::S16Lsb as u16, 0x8010);
        assert_eq!(AudioFormat::F32Lsb as u16, 0x8120);
        assert_eq!(AudioFormat::from_raw(0x8010), Some(AudioFormat::S16Lsb));
        assert_eq!(AudioFormat::from_raw(0x1234), None);
    }

    #[test]
    fn default_spec_is_cd_quality_stereo() {
        let spec = AudioSpec::default();
        assert_eq!(spec.frequency, 44_100);
        assert_eq!(spec.format, AudioFormat::S16Lsb);
        assert_eq!(spec.channels, 2);
    }

    #[test]
    fn empty_device_id_is_zero() {
        assert!(DeviceId(0).is_empty_value());
        assert!(!DeviceId(2).is_empty_value());
    }
}

//! Joystick enumeration and input
//!
//! [`Joystick`] owns one `SDL_Joystick` opened by device index and closes
//! it on drop. Axis values are exposed both raw (`-32768..=32767`) and
//! normalized to `[-1, 1]` through the asymmetric mapping in
//! [`foundation::remap`](crate::foundation::remap); rumble intensities go
//! the other way, quantized from `[0, 1]` onto the `u16` motor range.
//!
//! SDL allows joystick queries from an audio or haptic callback thread
//! only while the joystick subsystem lock is held. [`JoystickLock`] wraps
//! that lock as a scope guard: taking it locks, dropping it unlocks.

use std::ffi::CStr;

use sdl2_sys as sys;

use crate::error::{native_error, SdlError, SdlResult};
use crate::foundation::handle::HandleCell;
use crate::foundation::remap;
use crate::init::{InitFlags, Sdl};

const AXIS_MIN: i32 = i16::MIN as i32;
const AXIS_MAX: i32 = i16::MAX as i32;

/// Number of joysticks currently attached to the system.
///
/// # Errors
///
/// [`SdlError::SubsystemMissing`] without the joystick subsystem,
/// [`SdlError::Native`] if the native enumeration fails.
pub fn count(sdl: &Sdl) -> SdlResult<u32> {
    if !sdl.has_subsystem(InitFlags::JOYSTICK) {
        return Err(SdlError::SubsystemMissing("joystick"));
    }
    let n = unsafe { sys::SDL_NumJoysticks() };
    if n < 0 {
        return Err(native_error());
    }
    Ok(n as u32)
}

/// Scope guard for the process-wide joystick subsystem lock
///
/// Required by SDL around joystick calls issued from another subsystem's
/// callback thread. The guard is move-only; the lock is held for exactly
/// as long as the guard is alive.
pub struct JoystickLock {
    _single_thread: std::marker::PhantomData<*mut ()>,
}

/// Take the joystick subsystem lock until the returned guard is dropped.
pub fn lock(sdl: &Sdl) -> SdlResult<JoystickLock> {
    if !sdl.has_subsystem(InitFlags::JOYSTICK) {
        return Err(SdlError::SubsystemMissing("joystick"));
    }
    unsafe { sys::SDL_LockJoysticks() };
    Ok(JoystickLock {
        _single_thread: std::marker::PhantomData,
    })
}

impl Drop for JoystickLock {
    fn drop(&mut self) {
        unsafe { sys::SDL_UnlockJoysticks() };
    }
}

/// RAII wrapper around one opened `SDL_Joystick`
pub struct Joystick {
    cell: HandleCell<*mut sys::SDL_Joystick>,
    instance_id: i32,
}

impl Joystick {
    /// Open the joystick at `index` (from the enumeration order of
    /// [`count`]).
    ///
    /// # Errors
    ///
    /// [`SdlError::SubsystemMissing`] without the joystick subsystem,
    /// [`SdlError::Native`] if the device cannot be opened.
    pub fn try_open(sdl: &Sdl, index: u32) -> SdlResult<Self> {
        if !sdl.has_subsystem(InitFlags::JOYSTICK) {
            return Err(SdlError::SubsystemMissing("joystick"));
        }
        let raw = unsafe { sys::SDL_JoystickOpen(index as i32) };
        if raw.is_null() {
            return Err(native_error());
        }
        let instance_id = unsafe { sys::SDL_JoystickInstanceID(raw) };
        log::debug!("opened joystick {index} (instance id {instance_id})");
        Ok(Self {
            cell: HandleCell::adopt(raw),
            instance_id,
        })
    }

    /// Open the joystick at `index`.
    ///
    /// Convenience form of [`Joystick::try_open`].
    ///
    /// # Panics
    ///
    /// Panics if the device cannot be opened.
    pub fn open(sdl: &Sdl, index: u32) -> Self {
        Self::try_open(sdl, index).unwrap_or_else(|err| panic!("joystick open failed: {err}"))
    }

    /// Instance id used by joystick events.
    pub fn instance_id(&self) -> i32 {
        self.instance_id
    }

    /// Device name, or an empty string if the driver reports none.
    pub fn name(&self) -> String {
        unsafe {
            let ptr = sys::SDL_JoystickName(self.raw());
            if ptr.is_null() {
                String::new()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        }
    }

    /// Number of axes on this device.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the query fails.
    pub fn num_axes(&self) -> SdlResult<u32> {
        let n = unsafe { sys::SDL_JoystickNumAxes(self.raw()) };
        if n < 0 {
            return Err(native_error());
        }
        Ok(n as u32)
    }

    /// Raw axis value in `-32768..=32767`. Unknown axes read as 0, which
    /// is also a legitimate centered reading; SDL does not distinguish.
    pub fn axis(&self, axis: u32) -> i16 {
        unsafe { sys::SDL_JoystickGetAxis(self.raw(), axis as i32) }
    }

    /// Axis value normalized to `[-1, 1]`.
    ///
    /// Negative readings scale by `1/32768`, positive by `1/32767`,
    /// mirroring the asymmetric native range so extreme hardware readings
    /// map to exactly ±1.
    pub fn axis_normalized(&self, axis: u32) -> f64 {
        remap::normalized_from_raw(i32::from(self.axis(axis)), AXIS_MIN, AXIS_MAX)
    }

    /// Start a rumble effect.
    ///
    /// Intensities are unit-interval values quantized onto the `u16`
    /// motor range (`0.0` and below stop the motor, `1.0` and above is
    /// full strength).
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the device has no rumble support.
    pub fn try_rumble(&mut self, low: f64, high: f64, duration_ms: u32) -> SdlResult<()> {
        let max = u32::from(u16::MAX);
        let low = remap::scaled_from_unit(low, max) as u16;
        let high = remap::scaled_from_unit(high, max) as u16;
        let rc = unsafe { sys::SDL_JoystickRumble(self.raw(), low, high, duration_ms) };
        if rc != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// Whether this wrapper currently holds a live handle.
    pub fn is_valid(&self) -> bool {
        !self.cell.is_empty()
    }

    /// The raw native handle. Null only after a logic error.
    pub fn raw(&self) -> *mut sys::SDL_Joystick {
        self.cell.get().unwrap_or(std::ptr::null_mut())
    }

    /// Give up ownership and return the raw handle.
    ///
    /// The caller is responsible for eventually closing the device.
    pub fn release(mut self) -> *mut sys::SDL_Joystick {
        let raw = self.raw();
        self.cell.release();
        raw
    }

    /// Close the device now instead of at end of scope.
    pub fn destroy(mut self) {
        self.destroy_in_place();
    }

    fn destroy_in_place(&mut self) {
        if let Some(raw) = self.cell.take_owned() {
            unsafe { sys::SDL_JoystickClose(raw) };
            log::debug!("closed joystick (instance id {})", self.instance_id);
        } else {
            self.cell.release();
        }
    }
}

impl Drop for Joystick {
    fn drop(&mut self) {
        self.destroy_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // API shape checks: validated at compile time, no SDL runtime needed.
    #[test]
    fn factory_and_input_signatures() {
        let _open: fn(&Sdl, u32) -> SdlResult<Joystick> = Joystick::try_open;
        let _axis: fn(&Joystick, u32) -> i16 = Joystick::axis;
        let _normalized: fn(&Joystick, u32) -> f64 = Joystick::axis_normalized;
        let _rumble: fn(&mut Joystick, f64, f64, u32) -> SdlResult<()> = Joystick::try_rumble;
        let _lock: fn(&Sdl) -> SdlResult<JoystickLock> = lock;
    }

    #[test]
    fn axis_normalization_uses_the_native_extremes() {
        assert_relative_eq!(
            remap::normalized_from_raw(AXIS_MIN, AXIS_MIN, AXIS_MAX),
            -1.0
        );
        assert_relative_eq!(remap::normalized_from_raw(AXIS_MAX, AXIS_MIN, AXIS_MAX), 1.0);
    }

    #[test]
    fn rumble_quantization_covers_the_motor_range() {
        let max = u32::from(u16::MAX);
        assert_eq!(remap::scaled_from_unit(0.0, max), 0);
        assert_eq!(remap::scaled_from_unit(1.0, max), 65535);
    }
}

//! Event queue access
//!
//! SDL delivers input through a single process-wide queue that must be
//! drained from the initializing thread. [`EventPump`] is the typed front
//! door to that queue: it is handed out by
//! [`Sdl::try_event_pump`](crate::Sdl::try_event_pump) and translates the
//! native tagged-union events into the
//! [`Event`] enum. Only the event families the wrapper layer exposes are
//! translated; everything else surfaces as [`Event::Unknown`] with its raw
//! type tag so callers can still observe traffic they do not decode.

use std::marker::PhantomData;

use sdl2_sys as sys;

// SDL_EventType values for the families translated below.
const QUIT: u32 = 0x100;
const WINDOW_EVENT: u32 = 0x200;
const KEY_DOWN: u32 = 0x300;
const KEY_UP: u32 = 0x301;
const MOUSE_BUTTON_DOWN: u32 = 0x401;
const MOUSE_BUTTON_UP: u32 = 0x402;
const JOY_AXIS_MOTION: u32 = 0x600;
const JOY_BUTTON_DOWN: u32 = 0x603;
const JOY_DEVICE_ADDED: u32 = 0x605;
const JOY_DEVICE_REMOVED: u32 = 0x606;

/// A translated SDL event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The application was asked to quit
    Quit,
    /// A window changed state
    Window {
        /// Id of the affected window
        window_id: u32,
        /// What changed
        change: WindowChange,
        /// Event-specific payload (e.g. new width for a resize)
        data1: i32,
        /// Event-specific payload (e.g. new height for a resize)
        data2: i32,
    },
    /// A key was pressed
    KeyDown {
        /// Id of the focused window
        window_id: u32,
        /// SDL keycode of the pressed key
        keycode: i32,
        /// Whether this is a key repeat
        repeat: bool,
    },
    /// A key was released
    KeyUp {
        /// Id of the focused window
        window_id: u32,
        /// SDL keycode of the released key
        keycode: i32,
    },
    /// A mouse button was pressed
    MouseButtonDown {
        /// Id of the window under the cursor
        window_id: u32,
        /// Button index (1 = left, 2 = middle, 3 = right)
        button: u8,
        /// Cursor x position in window coordinates
        x: i32,
        /// Cursor y position in window coordinates
        y: i32,
    },
    /// A mouse button was released
    MouseButtonUp {
        /// Id of the window under the cursor
        window_id: u32,
        /// Button index (1 = left, 2 = middle, 3 = right)
        button: u8,
        /// Cursor x position in window coordinates
        x: i32,
        /// Cursor y position in window coordinates
        y: i32,
    },
    /// A joystick axis moved
    JoyAxisMotion {
        /// Instance id of the joystick
        which: i32,
        /// Axis index
        axis: u8,
        /// Raw axis value in `-32768..=32767`
        value: i16,
    },
    /// A joystick button was pressed
    JoyButtonDown {
        /// Instance id of the joystick
        which: i32,
        /// Button index
        button: u8,
    },
    /// A joystick was connected; `index` opens it
    JoyDeviceAdded {
        /// Device index for [`Joystick::try_open`](crate::joystick::Joystick::try_open)
        index: i32,
    },
    /// A joystick was disconnected
    JoyDeviceRemoved {
        /// Instance id of the removed joystick
        which: i32,
    },
    /// An event family the wrapper layer does not translate
    Unknown {
        /// Raw `SDL_EventType` tag
        kind: u32,
    },
}

/// Window state change carried by [`Event::Window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowChange {
    /// Window became visible
    Shown,
    /// Window was hidden
    Hidden,
    /// Window was exposed and needs a redraw
    Exposed,
    /// Window moved to `(data1, data2)`
    Moved,
    /// Window was resized by the user to `(data1, data2)`
    Resized,
    /// Window size changed (by user or API) to `(data1, data2)`
    SizeChanged,
    /// Window was minimized
    Minimized,
    /// Window was maximized
    Maximized,
    /// Window returned to normal size
    Restored,
    /// Pointer entered the window
    Enter,
    /// Pointer left the window
    Leave,
    /// Window gained keyboard focus
    FocusGained,
    /// Window lost keyboard focus
    FocusLost,
    /// The window manager asked the window to close
    Close,
    /// A window change the wrapper layer does not translate
    Other(u8),
}

impl WindowChange {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Shown,
            2 => Self::Hidden,
            3 => Self::Exposed,
            4 => Self::Moved,
            5 => Self::Resized,
            6 => Self::SizeChanged,
            7 => Self::Minimized,
            8 => Self::Maximized,
            9 => Self::Restored,
            10 => Self::Enter,
            11 => Self::Leave,
            12 => Self::FocusGained,
            13 => Self::FocusLost,
            14 => Self::Close,
            other => Self::Other(other),
        }
    }
}

impl Event {
    fn from_native(raw: &sys::SDL_Event) -> Self {
        // Reading a union field selected by the type tag; SDL guarantees
        // the tag matches the active member.
        unsafe {
            match raw.type_ {
                QUIT => Self::Quit,
                WINDOW_EVENT => Self::Window {
                    window_id: raw.window.windowID,
                    change: WindowChange::from_raw(raw.window.event),
                    data1: raw.window.data1,
                    data2: raw.window.data2,
                },
                KEY_DOWN => Self::KeyDown {
                    window_id: raw.key.windowID,
                    keycode: raw.key.keysym.sym,
                    repeat: raw.key.repeat != 0,
                },
                KEY_UP => Self::KeyUp {
                    window_id: raw.key.windowID,
                    keycode: raw.key.keysym.sym,
                },
                MOUSE_BUTTON_DOWN => Self::MouseButtonDown {
                    window_id: raw.button.windowID,
                    button: raw.button.button,
                    x: raw.button.x,
                    y: raw.button.y,
                },
                MOUSE_BUTTON_UP => Self::MouseButtonUp {
                    window_id: raw.button.windowID,
                    button: raw.button.button,
                    x: raw.button.x,
                    y: raw.button.y,
                },
                JOY_AXIS_MOTION => Self::JoyAxisMotion {
                    which: raw.jaxis.which,
                    axis: raw.jaxis.axis,
                    value: raw.jaxis.value,
                },
                JOY_BUTTON_DOWN => Self::JoyButtonDown {
                    which: raw.jbutton.which,
                    button: raw.jbutton.button,
                },
                JOY_DEVICE_ADDED => Self::JoyDeviceAdded {
                    index: raw.jdevice.which,
                },
                JOY_DEVICE_REMOVED => Self::JoyDeviceRemoved {
                    which: raw.jdevice.which,
                },
                other => Self::Unknown { kind: other },
            }
        }
    }
}

/// Typed access to the process-wide event queue
///
/// Obtained from [`Sdl::try_event_pump`](crate::Sdl::try_event_pump).
/// Not `Send`: events must be pumped on the initializing thread.
pub struct EventPump {
    _single_thread: PhantomData<*mut ()>,
}

impl EventPump {
    pub(crate) fn new() -> Self {
        Self {
            _single_thread: PhantomData,
        }
    }

    /// Dequeue the next pending event, if any. Never blocks.
    pub fn poll(&mut self) -> Option<Event> {
        let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
        if unsafe { sys::SDL_PollEvent(&mut raw) } == 1 {
            Some(Event::from_native(&raw))
        } else {
            None
        }
    }

    /// Wait up to `timeout_ms` milliseconds for the next event.
    ///
    /// The timeout is passed through to `SDL_WaitEventTimeout` unchanged.
    /// Returns `None` on timeout (SDL does not distinguish a timeout from
    /// an internal wait failure).
    pub fn wait_timeout(&mut self, timeout_ms: u32) -> Option<Event> {
        let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
        let timeout = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
        if unsafe { sys::SDL_WaitEventTimeout(&mut raw, timeout) } == 1 {
            Some(Event::from_native(&raw))
        } else {
            None
        }
    }

    /// Drain every pending event into a vector. Never blocks.
    pub fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = self.poll() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_change_codes_match_the_native_values() {
        assert_eq!(WindowChange::from_raw(5), WindowChange::Resized);
        assert_eq!(WindowChange::from_raw(6), WindowChange::SizeChanged);
        assert_eq!(WindowChange::from_raw(14), WindowChange::Close);
        assert_eq!(WindowChange::from_raw(200), WindowChange::Other(200));
    }

    #[test]
    fn quit_translates_from_the_raw_tag() {
        let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
        raw.type_ = QUIT;
        assert_eq!(Event::from_native(&raw), Event::Quit);
    }

    #[test]
    fn unknown_tags_are_preserved() {
        let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
        raw.type_ = 0x7f00;
        assert_eq!(Event::from_native(&raw), Event::Unknown { kind: 0x7f00 });
    }
}

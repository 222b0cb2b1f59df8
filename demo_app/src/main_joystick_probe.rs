//! Joystick probe application
//!
//! Lists attached joysticks, prints normalized axis motion as devices are
//! moved, and fires a short rumble when any button is pressed.

use std::collections::HashMap;

use sdl_kit::joystick;
use sdl_kit::prelude::*;

const RUMBLE_STRENGTH: f64 = 0.6;
const RUMBLE_MS: u32 = 250;

fn main() -> SdlResult<()> {
    env_logger::init();
    forward_native_log();

    let sdl = Sdl::try_init(InitFlags::JOYSTICK | InitFlags::EVENTS)?;
    let mut events = sdl.try_event_pump()?;

    let mut open_sticks: HashMap<i32, Joystick> = HashMap::new();
    for index in 0..joystick::count(&sdl)? {
        match Joystick::try_open(&sdl, index) {
            Ok(stick) => {
                log::info!(
                    "joystick {index}: {} ({} axes)",
                    stick.name(),
                    stick.num_axes().unwrap_or(0)
                );
                open_sticks.insert(stick.instance_id(), stick);
            }
            Err(err) => log::warn!("joystick {index} failed to open: {err}"),
        }
    }
    println!("{} joystick(s) attached; move an axis or press a button (Ctrl+C to exit)",
        open_sticks.len());

    loop {
        let Some(event) = events.wait_timeout(250) else {
            continue;
        };
        match event {
            Event::Quit => break,
            Event::JoyDeviceAdded { index } => {
                if let Ok(stick) = Joystick::try_open(&sdl, index as u32) {
                    log::info!("attached: {}", stick.name());
                    open_sticks.insert(stick.instance_id(), stick);
                }
            }
            Event::JoyDeviceRemoved { which } => {
                if let Some(stick) = open_sticks.remove(&which) {
                    log::info!("detached: {}", stick.name());
                }
            }
            Event::JoyAxisMotion { which, axis, value } => {
                if let Some(stick) = open_sticks.get(&which) {
                    println!(
                        "{} axis {axis}: {value:6} -> {:+.3}",
                        stick.name(),
                        stick.axis_normalized(u32::from(axis))
                    );
                }
            }
            Event::JoyButtonDown { which, button } => {
                if let Some(stick) = open_sticks.get_mut(&which) {
                    println!("{} button {button} pressed; rumbling", stick.name());
                    if let Err(err) =
                        stick.try_rumble(RUMBLE_STRENGTH, RUMBLE_STRENGTH, RUMBLE_MS)
                    {
                        log::debug!("rumble unsupported: {err}");
                    }
                }
            }
            _ => {}
        }
    }

    Ok(())
}

//! Color cycle demo application
//!
//! Opens a window and sweeps the clear color around the HSV hue circle,
//! demonstrating window/renderer creation, config loading, the event loop
//! and the color conversions.

use sdl_kit::prelude::*;

const CONFIG_PATH: &str = "color_cycle.toml";
const HUE_DEGREES_PER_FRAME: f64 = 0.8;
const FRAME_DELAY_MS: u32 = 16;

fn main() -> SdlResult<()> {
    env_logger::init();
    forward_native_log();

    let config = match AppConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            log::info!("no config at {CONFIG_PATH} ({err}); using defaults");
            AppConfig::default()
        }
    };

    let sdl = Sdl::try_init(InitFlags::VIDEO | InitFlags::EVENTS)?;
    let window = Window::try_create(
        &sdl,
        &config.window.title,
        config.window.width,
        config.window.height,
        config.window.window_flags(),
    )?;
    let mut renderer = Renderer::try_create(&window, config.renderer.renderer_flags())?;
    let mut events = sdl.try_event_pump()?;

    log::info!(
        "window {} up at {}x{}",
        window.id(),
        window.size().0,
        window.size().1
    );

    let mut hue = 0.0_f64;
    'running: loop {
        while let Some(event) = events.poll() {
            match event {
                Event::Quit
                | Event::Window {
                    change: WindowChange::Close,
                    ..
                } => break 'running,
                // Escape key
                Event::KeyDown { keycode: 27, .. } => break 'running,
                Event::Window {
                    change: WindowChange::SizeChanged,
                    data1,
                    data2,
                    ..
                } => log::debug!("window resized to {data1}x{data2}"),
                _ => {}
            }
        }

        hue = (hue + HUE_DEGREES_PER_FRAME) % 360.0;
        let color = Color::from_hsv(Hsv {
            hue,
            saturation: 0.7,
            value: 0.9,
        });
        renderer.set_draw_color(color)?;
        renderer.clear()?;
        renderer.present();
        delay(FRAME_DELAY_MS);
    }

    log::info!("shutting down");
    Ok(())
}

//! edge-raster: software triangle rasterizer
//!
//! Pixel-exact triangle filling with a minimal 3D pipeline on top:
//! - Integer edge functions with the top-left fill rule
//! - Barycentric (Gouraud) color interpolation
//! - Table-driven trig, row-major 4x4 matrices, look-at and perspective
//!
//! The framebuffer is drawn on the CPU and only handed to the window for
//! presentation.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod config;
mod input;
mod platform;
mod timing;
mod audio;
mod scene;
mod app;

use std::time::Duration;

use macroquad::logging::info;
use macroquad::prelude::{clear_background, get_frame_time, get_time, next_frame, Conf, BLACK};

use app::AppState;
use config::{RendererConfig, CONFIG_PATH};
use platform::{EventPump, Presenter};

fn window_conf(config: &RendererConfig) -> Conf {
    Conf {
        window_title: format!("edge-raster v{}", VERSION),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn main() {
    let config = RendererConfig::load_or_default(CONFIG_PATH);
    macroquad::Window::from_config(window_conf(&config), run(config));
}

async fn run(config: RendererConfig) {
    info!("edge-raster v{}", VERSION);

    let mut app = AppState::new(config);
    let mut events = EventPump::new();
    let mut presenter = Presenter::new(&app.fb);
    let mut pending = Vec::new();

    loop {
        let frame_start = get_time();

        events.poll(&mut pending);
        for event in &pending {
            app.handle_event(event);
        }
        if app.should_close {
            break;
        }

        app.frame(get_frame_time());

        clear_background(BLACK);
        let (canvas_width, canvas_height) = app.canvas_size;
        presenter.present(&app.fb, canvas_width, canvas_height);

        app.record_frame(Duration::from_secs_f64((get_time() - frame_start).max(0.0)));
        next_frame().await;
    }

    info!("Shutting down");
}

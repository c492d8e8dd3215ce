//! Application state
//!
//! Owns everything that lives for the whole run. The main loop feeds it
//! platform events, then asks it to update and render once per frame.

use std::time::Duration;

use macroquad::logging::{info, warn};

use crate::audio::ToneGenerator;
use crate::config::RendererConfig;
use crate::input::{InputState, Key, PlatformEvent};
use crate::rasterizer::Framebuffer;
use crate::scene::Scene;
use crate::timing::FrameStats;

/// Main application state
pub struct AppState {
    pub config: RendererConfig,
    pub input: InputState,
    pub fb: Framebuffer,
    pub scene: Scene,
    pub stats: FrameStats,
    /// Keeps the tone playing while alive
    _tone: ToneGenerator,
    /// Size of the window area the framebuffer is stretched over
    pub canvas_size: (f32, f32),
    /// Set once Escape or a close request has been seen
    pub should_close: bool,
}

impl AppState {
    pub fn new(config: RendererConfig) -> Self {
        let fb = Framebuffer::new(config.framebuffer_width, config.framebuffer_height);
        let scene = Scene::new(&config);
        let tone = ToneGenerator::new(&config.tone);
        let canvas_size = (config.window_width as f32, config.window_height as f32);

        info!(
            "Framebuffer {}x{}, starting in {} scene",
            fb.width,
            fb.height,
            scene.mode.label()
        );

        Self {
            config,
            input: InputState::new(),
            fb,
            scene,
            stats: FrameStats::new(),
            _tone: tone,
            canvas_size,
            should_close: false,
        }
    }

    /// Apply one platform event
    pub fn handle_event(&mut self, event: &PlatformEvent) {
        match *event {
            PlatformEvent::Close => {
                self.should_close = true;
                self.input.reset();
            }
            PlatformEvent::Resize { width, height } => {
                // The framebuffer keeps its size; only the stretch target changes
                self.canvas_size = (width as f32, height as f32);
            }
            PlatformEvent::Key { .. } => self.input.ingest(event),
            PlatformEvent::Paint | PlatformEvent::Other => {}
        }
    }

    /// Act on queued key presses: Escape closes, Space cycles the scene,
    /// F12 takes a screenshot
    pub fn process_key_events(&mut self) {
        while let Some(event) = self.input.next_event() {
            if !event.state.is_first_press() {
                continue;
            }
            match event.code {
                Key::Escape => self.should_close = true,
                Key::Space => {
                    self.scene.mode = self.scene.mode.next();
                    info!("Scene: {}", self.scene.mode.label());
                }
                Key::F12 => self.save_screenshot(),
                _ => {}
            }
        }
    }

    /// Write the framebuffer to the configured screenshot path
    pub fn save_screenshot(&self) {
        let path = &self.config.screenshot_path;
        match self.fb.save_png(path) {
            Ok(()) => info!("Saved screenshot to {}", path.display()),
            Err(e) => warn!("Failed to save screenshot to {}: {}", path.display(), e),
        }
    }

    /// Advance and draw one frame, returning the number of triangles submitted
    pub fn frame(&mut self, dt: f32) -> usize {
        self.process_key_events();
        self.scene.update(&self.input, dt);
        self.scene.render(&mut self.fb)
    }

    /// Record frame time and log the once-per-second average if enabled
    pub fn record_frame(&mut self, elapsed: Duration) {
        self.stats.record(elapsed);
        if let Some((ms, fps)) = self.stats.take_report() {
            if self.config.log_fps {
                info!("{:.2} ms/frame, {:.1} fps", ms, fps);
            }
        }
    }
}

//! macroquad glue: window events in, framebuffer out
//!
//! Everything that touches the window lives here. The rest of the renderer
//! only sees `PlatformEvent`s and a `Framebuffer`.

use std::collections::HashSet;

use macroquad::prelude::{
    draw_texture_ex, get_keys_pressed, get_keys_released, is_key_down, is_quit_requested,
    prevent_quit, screen_height, screen_width, vec2, DrawTextureParams, FilterMode, KeyCode,
    Texture2D, WHITE,
};

use crate::input::{Key, KeyState, PlatformEvent};
use crate::rasterizer::Framebuffer;

/// Map a macroquad key to one the renderer knows about
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::W | KeyCode::Up => Key::W,
        KeyCode::A | KeyCode::Left => Key::A,
        KeyCode::S | KeyCode::Down => Key::S,
        KeyCode::D | KeyCode::Right => Key::D,
        KeyCode::Space => Key::Space,
        KeyCode::F12 => Key::F12,
        _ => Key::Unknown,
    }
}

/// Turn one key transition into an event. Alt+F4 closes; keys we don't
/// handle come through as `Other`.
pub fn translate_key(code: KeyCode, is_down: bool, alt_down: bool) -> PlatformEvent {
    if is_down && alt_down && code == KeyCode::F4 {
        return PlatformEvent::Close;
    }
    match map_key(code) {
        Key::Unknown => PlatformEvent::Other,
        key => {
            let state = if is_down { KeyState::pressed(alt_down) } else { KeyState::released(alt_down) };
            PlatformEvent::Key { code: key, state }
        }
    }
}

/// Drop every held key that `is_down` no longer reports, returning them
///
/// A key released while the window is unfocused never shows up as a
/// release edge, so held keys are checked against the live state each frame.
pub fn take_missed_releases<F>(held: &mut HashSet<KeyCode>, is_down: F) -> Vec<KeyCode>
where
    F: Fn(KeyCode) -> bool,
{
    let missed: Vec<KeyCode> = held.iter().copied().filter(|&code| !is_down(code)).collect();
    for code in &missed {
        held.remove(code);
    }
    missed
}

/// Polls macroquad once per frame
pub struct EventPump {
    window_size: (u32, u32),
    /// Mapped keys we have seen go down and not yet come up
    held: HashSet<KeyCode>,
}

impl EventPump {
    pub fn new() -> Self {
        // Close requests come through `poll` instead of killing the process
        prevent_quit();
        Self { window_size: current_window_size(), held: HashSet::new() }
    }

    /// Collect this frame's events into `out`, ending with one `Paint`
    pub fn poll(&mut self, out: &mut Vec<PlatformEvent>) {
        out.clear();

        let alt_down = is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt);
        for code in get_keys_pressed() {
            if map_key(code) != Key::Unknown {
                self.held.insert(code);
            }
            out.push(translate_key(code, true, alt_down));
        }
        for code in get_keys_released() {
            self.held.remove(&code);
            out.push(translate_key(code, false, alt_down));
        }
        for code in take_missed_releases(&mut self.held, is_key_down) {
            out.push(translate_key(code, false, alt_down));
        }

        if is_quit_requested() {
            out.push(PlatformEvent::Close);
        }

        let size = current_window_size();
        if size != self.window_size {
            self.window_size = size;
            out.push(PlatformEvent::Resize { width: size.0, height: size.1 });
        }

        out.push(PlatformEvent::Paint);
    }
}

fn current_window_size() -> (u32, u32) {
    (screen_width().max(0.0) as u32, screen_height().max(0.0) as u32)
}

/// Uploads the framebuffer to a texture and stretches it over the window
pub struct Presenter {
    texture: Texture2D,
    rgba: Vec<u8>,
    width: usize,
    height: usize,
}

impl Presenter {
    pub fn new(fb: &Framebuffer) -> Self {
        let rgba = vec![0u8; fb.width * fb.height * Framebuffer::BYTES_PER_PIXEL];
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &rgba);
        texture.set_filter(FilterMode::Nearest);
        Self { texture, rgba, width: fb.width, height: fb.height }
    }

    /// Draw the framebuffer over a `canvas_width` x `canvas_height` area
    pub fn present(&mut self, fb: &Framebuffer, canvas_width: f32, canvas_height: f32) {
        if fb.width != self.width || fb.height != self.height {
            *self = Self::new(fb);
        }

        fb.write_rgba(&mut self.rgba);
        self.texture.update_from_bytes(fb.width as u32, fb.height as u32, &self.rgba);

        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(canvas_width, canvas_height)),
                ..Default::default()
            },
        );
    }
}

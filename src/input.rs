//! Keyboard state and platform events
//!
//! Two views of the same key events:
//! - A held-key table, polled every frame (movement, rotation)
//! - A short FIFO of key events, drained when only the press matters
//!   (Escape, Space, screenshot)
//!
//! The platform layer turns whatever it receives into `PlatformEvent`s and
//! feeds them through `InputState::ingest`; nothing here knows about windows.

use std::collections::VecDeque;

use macroquad::logging::warn;

/// Maximum number of queued key events per frame
pub const EVENT_QUEUE_SIZE: usize = 10;

/// Keys the renderer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Unknown = 0,
    Escape = 1,
    W = 2,
    A = 3,
    S = 4,
    D = 5,
    Space = 6,
    F12 = 7,
}

impl Key {
    pub const COUNT: usize = 8;
}

/// State of one key as of its latest event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub is_down: bool,
    pub released: bool,
    /// Down event for a key that was already down
    pub repeated: bool,
    pub alt_down: bool,
}

impl KeyState {
    pub fn pressed(alt_down: bool) -> Self {
        Self { is_down: true, alt_down, ..Default::default() }
    }

    pub fn released(alt_down: bool) -> Self {
        Self { released: true, alt_down, ..Default::default() }
    }

    /// A fresh press, not an auto-repeat
    pub fn is_first_press(&self) -> bool {
        self.is_down && !self.repeated
    }
}

/// A queued key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: Key,
    pub state: KeyState,
}

/// Everything the platform can tell the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    Resize { width: u32, height: u32 },
    Close,
    Key { code: Key, state: KeyState },
    Paint,
    Other,
}

/// Owned input state: held keys plus the pending event queue
pub struct InputState {
    keys: [KeyState; Key::COUNT],
    queue: VecDeque<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: [KeyState::default(); Key::COUNT],
            queue: VecDeque::with_capacity(EVENT_QUEUE_SIZE),
        }
    }

    /// Record a key event: update the held-key table and queue it
    ///
    /// When the queue is full the event is dropped from the queue, but the
    /// held-key table still sees it.
    pub fn process_key(&mut self, code: Key, mut state: KeyState) {
        let previous = self.keys[code as usize];
        state.repeated = state.is_down && previous.is_down;
        self.keys[code as usize] = state;

        if self.queue.len() >= EVENT_QUEUE_SIZE {
            warn!("Input queue full, dropping {:?}", code);
            return;
        }
        self.queue.push_back(KeyEvent { code, state });
    }

    /// Feed one platform event. Only key events touch input state; the
    /// caller handles the rest.
    pub fn ingest(&mut self, event: &PlatformEvent) {
        if let PlatformEvent::Key { code, state } = *event {
            self.process_key(code, state);
        }
    }

    /// Latest state of a key
    pub fn key(&self, code: Key) -> KeyState {
        self.keys[code as usize]
    }

    pub fn is_down(&self, code: Key) -> bool {
        self.keys[code as usize].is_down
    }

    /// Pop the oldest queued key event
    pub fn next_event(&mut self) -> Option<KeyEvent> {
        self.queue.pop_front()
    }

    /// Forget all held keys (window lost focus or is closing)
    pub fn reset(&mut self) {
        self.keys = [KeyState::default(); Key::COUNT];
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

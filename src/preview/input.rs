//! Input polling for the preview window
//!
//! macroquad exposes input as per-frame state. `InputTracker` diffs
//! consecutive snapshots into the discrete events the preview reacts to.

use macroquad::prelude::*;

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Resize { width: f32, height: f32 },
    ButtonDown { x: f32, y: f32 },
    ButtonUp,
    Motion { x: f32, y: f32 },
    Quit,
}

/// Raw input state sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub mouse: (f32, f32),
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub screen: (f32, f32),
    pub quit_requested: bool,
}

impl InputSnapshot {
    /// Read the current macroquad input state
    pub fn sample() -> Self {
        Self {
            mouse: mouse_position(),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            screen: (screen_width(), screen_height()),
            quit_requested: is_quit_requested() || is_key_pressed(KeyCode::Escape),
        }
    }
}

/// Turns snapshots into events
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    last_mouse: Option<(f32, f32)>,
    last_screen: Option<(f32, f32)>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events since the previous snapshot, in the order they should apply
    pub fn events(&mut self, snap: &InputSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if self.last_screen.is_some_and(|s| s != snap.screen) {
            events.push(InputEvent::Resize {
                width: snap.screen.0,
                height: snap.screen.1,
            });
        }
        self.last_screen = Some(snap.screen);

        if snap.left_pressed {
            events.push(InputEvent::ButtonDown {
                x: snap.mouse.0,
                y: snap.mouse.1,
            });
        } else if self.last_mouse.is_some_and(|m| m != snap.mouse) {
            events.push(InputEvent::Motion {
                x: snap.mouse.0,
                y: snap.mouse.1,
            });
        }
        self.last_mouse = Some(snap.mouse);

        if snap.left_released {
            events.push(InputEvent::ButtonUp);
        }

        if snap.quit_requested {
            events.push(InputEvent::Quit);
        }

        events
    }
}

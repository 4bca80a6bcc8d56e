// Copyright 2025 the Lithos Engine authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Backend-agnostic input events and per-frame input state.
//!
//! Windowing backends translate their native events into [`InputEvent`]s;
//! game logic polls the accumulated [`InputState`]. Neither side knows about
//! the other's types.

use std::collections::HashSet;

use crate::math::Vec2;

/// A physical keyboard key, independent of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// The `A` key.
    KeyA,
    /// The `B` key.
    KeyB,
    /// The `C` key.
    KeyC,
    /// The `D` key.
    KeyD,
    /// The `E` key.
    KeyE,
    /// The `F` key.
    KeyF,
    /// The `G` key.
    KeyG,
    /// The `H` key.
    KeyH,
    /// The `I` key.
    KeyI,
    /// The `J` key.
    KeyJ,
    /// The `K` key.
    KeyK,
    /// The `L` key.
    KeyL,
    /// The `M` key.
    KeyM,
    /// The `N` key.
    KeyN,
    /// The `O` key.
    KeyO,
    /// The `P` key.
    KeyP,
    /// The `Q` key.
    KeyQ,
    /// The `R` key.
    KeyR,
    /// The `S` key.
    KeyS,
    /// The `T` key.
    KeyT,
    /// The `U` key.
    KeyU,
    /// The `V` key.
    KeyV,
    /// The `W` key.
    KeyW,
    /// The `X` key.
    KeyX,
    /// The `Y` key.
    KeyY,
    /// The `Z` key.
    KeyZ,
    /// The `0` key on the main row.
    Digit0,
    /// The `1` key on the main row.
    Digit1,
    /// The `2` key on the main row.
    Digit2,
    /// The `3` key on the main row.
    Digit3,
    /// The `4` key on the main row.
    Digit4,
    /// The `5` key on the main row.
    Digit5,
    /// The `6` key on the main row.
    Digit6,
    /// The `7` key on the main row.
    Digit7,
    /// The `8` key on the main row.
    Digit8,
    /// The `9` key on the main row.
    Digit9,
    /// The space bar.
    Space,
    /// Left shift.
    ShiftLeft,
    /// Right shift.
    ShiftRight,
    /// Left control.
    ControlLeft,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Enter / Return.
    Enter,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any key the engine has no binding for, carrying the backend's code.
    Other(u32),
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// An engine-internal representation of a user input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyPressed {
        /// The physical key.
        key: KeyCode,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// The physical key.
        key: KeyCode,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The mouse cursor moved.
    MouseMoved {
        /// The new x-coordinate of the cursor, in window pixels.
        x: f32,
        /// The new y-coordinate of the cursor, in window pixels.
        y: f32,
    },
    /// The mouse wheel was scrolled.
    MouseWheelScrolled {
        /// The horizontal scroll delta.
        delta_x: f32,
        /// The vertical scroll delta.
        delta_y: f32,
    },
}

/// Accumulated input state, updated by [`apply`](InputState::apply) and
/// polled by game logic once per frame.
///
/// Cursor tracking suppresses the very first sample: a window reports the
/// cursor's absolute position on the first `MouseMoved`, and treating that
/// as a delta would jerk the camera on startup.
#[derive(Debug, Default)]
pub struct InputState {
    keys_pressed: HashSet<KeyCode>,
    mouse_buttons_pressed: HashSet<MouseButton>,
    cursor: Vec2,
    mouse_delta: Vec2,
    scroll_delta: Vec2,
    has_cursor_sample: bool,
}

impl InputState {
    /// Creates an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed { key } => {
                self.keys_pressed.insert(key);
            }
            InputEvent::KeyReleased { key } => {
                self.keys_pressed.remove(&key);
            }
            InputEvent::MouseButtonPressed { button } => {
                self.mouse_buttons_pressed.insert(button);
            }
            InputEvent::MouseButtonReleased { button } => {
                self.mouse_buttons_pressed.remove(&button);
            }
            InputEvent::MouseMoved { x, y } => {
                let position = Vec2::new(x, y);
                if self.has_cursor_sample {
                    self.mouse_delta = self.mouse_delta + (position - self.cursor);
                } else {
                    self.has_cursor_sample = true;
                }
                self.cursor = position;
            }
            InputEvent::MouseWheelScrolled { delta_x, delta_y } => {
                self.scroll_delta = self.scroll_delta + Vec2::new(delta_x, delta_y);
            }
        }
    }

    /// Returns `true` while `key` is held down.
    #[inline]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns `true` while `button` is held down.
    #[inline]
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed.contains(&button)
    }

    /// The cursor position of the last `MouseMoved` event, in window pixels.
    #[inline]
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    /// The cursor movement accumulated since the last
    /// [`end_frame`](Self::end_frame).
    #[inline]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// The wheel scroll accumulated since the last
    /// [`end_frame`](Self::end_frame).
    #[inline]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    /// Resets the per-frame deltas. Call once after game logic has consumed
    /// the frame's input.
    pub fn end_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }
}

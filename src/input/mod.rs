// src/input/mod.rs
//! Input as games see it. The host polls the window once per frame, converts
//! what it got into [`InputEvent`]s and hands the list to the running game.
use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::event::{ElementState, KeyboardInput, MouseScrollDelta, WindowEvent};

pub use winit::event::{MouseButton, VirtualKeyCode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    KeyPressed(VirtualKeyCode),
    KeyReleased(VirtualKeyCode),
    Text(char),
    MouseMoved(Vec2),
    MousePressed(MouseButton),
    MouseReleased(MouseButton),
    MouseWheel(Vec2),
    Focus(bool),
}

impl InputEvent {
    /// Translates a window event; events games have no use for map to `None`.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(InputEvent::Quit),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } => Some(match state {
                ElementState::Pressed => InputEvent::KeyPressed(*keycode),
                ElementState::Released => InputEvent::KeyReleased(*keycode),
            }),
            WindowEvent::ReceivedCharacter(c) => Some(InputEvent::Text(*c)),
            WindowEvent::CursorMoved { position, .. } => {
                Some(InputEvent::MouseMoved(Vec2::new(position.x as f32, position.y as f32)))
            }
            WindowEvent::MouseInput { state, button, .. } => Some(match state {
                ElementState::Pressed => InputEvent::MousePressed(*button),
                ElementState::Released => InputEvent::MouseReleased(*button),
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel(match delta {
                MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                MouseScrollDelta::PixelDelta(pos) => Vec2::new(pos.x as f32, pos.y as f32),
            })),
            WindowEvent::Focused(focused) => Some(InputEvent::Focus(*focused)),
            _ => None,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, InputEvent::Quit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputButton {
    Key(VirtualKeyCode),
    Mouse(MouseButton),
}

/// Optional helper for games: folds the events of each frame into "held" and
/// "just pressed" state, with named action bindings on top.
#[derive(Debug, Default)]
pub struct InputState {
    keys_pressed: HashSet<VirtualKeyCode>,
    keys_just_pressed: HashSet<VirtualKeyCode>,
    keys_just_released: HashSet<VirtualKeyCode>,

    mouse_buttons_pressed: HashSet<MouseButton>,
    mouse_buttons_just_pressed: HashSet<MouseButton>,
    mouse_position: Vec2,
    scroll_delta: Vec2,

    actions: HashMap<String, Vec<InputButton>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the movement and confirm/cancel bindings most arcade games use.
    pub fn with_default_actions() -> Self {
        let mut state = Self::new();
        state.setup_default_actions();
        state
    }

    /// Starts a new frame and applies its events. "Just" states only cover
    /// the events passed here.
    pub fn apply(&mut self, events: &[InputEvent]) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_buttons_just_pressed.clear();
        self.scroll_delta = Vec2::ZERO;

        for event in events {
            match *event {
                InputEvent::KeyPressed(key) => {
                    if self.keys_pressed.insert(key) {
                        self.keys_just_pressed.insert(key);
                    }
                }
                InputEvent::KeyReleased(key) => {
                    self.keys_pressed.remove(&key);
                    self.keys_just_released.insert(key);
                }
                InputEvent::MousePressed(button) => {
                    if self.mouse_buttons_pressed.insert(button) {
                        self.mouse_buttons_just_pressed.insert(button);
                    }
                }
                InputEvent::MouseReleased(button) => {
                    self.mouse_buttons_pressed.remove(&button);
                }
                InputEvent::MouseMoved(position) => self.mouse_position = position,
                InputEvent::MouseWheel(delta) => self.scroll_delta += delta,
                // Losing focus means releases may never arrive.
                InputEvent::Focus(false) => {
                    self.keys_pressed.clear();
                    self.mouse_buttons_pressed.clear();
                }
                InputEvent::Focus(true) | InputEvent::Text(_) | InputEvent::Quit => {}
            }
        }
    }

    pub fn is_key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    pub fn is_key_just_released(&self, key: VirtualKeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed.contains(&button)
    }

    pub fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_just_pressed.contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    pub fn map_action(&mut self, action: impl Into<String>, buttons: Vec<InputButton>) {
        self.actions.insert(action.into(), buttons);
    }

    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.actions.get(action).map_or(false, |buttons| {
            buttons.iter().any(|button| match *button {
                InputButton::Key(key) => self.is_key_pressed(key),
                InputButton::Mouse(mouse) => self.is_mouse_button_pressed(mouse),
            })
        })
    }

    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.actions.get(action).map_or(false, |buttons| {
            buttons.iter().any(|button| match *button {
                InputButton::Key(key) => self.is_key_just_pressed(key),
                InputButton::Mouse(mouse) => self.is_mouse_button_just_pressed(mouse),
            })
        })
    }

    pub fn setup_default_actions(&mut self) {
        use VirtualKeyCode::*;

        self.map_action("move_up", vec![InputButton::Key(W), InputButton::Key(Up)]);
        self.map_action("move_down", vec![InputButton::Key(S), InputButton::Key(Down)]);
        self.map_action("move_left", vec![InputButton::Key(A), InputButton::Key(Left)]);
        self.map_action("move_right", vec![InputButton::Key(D), InputButton::Key(Right)]);
        self.map_action(
            "confirm",
            vec![
                InputButton::Key(Return),
                InputButton::Key(Space),
                InputButton::Mouse(MouseButton::Left),
            ],
        );
        self.map_action(
            "cancel",
            vec![InputButton::Key(Escape), InputButton::Mouse(MouseButton::Right)],
        );
    }

    /// Movement from the `move_*` actions in screen coordinates (y grows
    /// downwards), normalized so diagonals are not faster.
    pub fn movement_vector(&self) -> Vec2 {
        let mut movement = Vec2::ZERO;
        if self.is_action_pressed("move_up") {
            movement.y -= 1.0;
        }
        if self.is_action_pressed("move_down") {
            movement.y += 1.0;
        }
        if self.is_action_pressed("move_left") {
            movement.x -= 1.0;
        }
        if self.is_action_pressed("move_right") {
            movement.x += 1.0;
        }
        movement.normalize_or_zero()
    }
}

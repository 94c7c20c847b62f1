use crate::state::State;
use std::time::Instant;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton},
    keyboard::{Key, NamedKey},
};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Redraw,
    Exit,
    Ignored,
}

pub fn handle_key(state: &mut State, key: &Key, element_state: ElementState) -> KeyAction {
    if element_state != ElementState::Pressed {
        return KeyAction::Ignored;
    }

    match key {
        Key::Named(NamedKey::Space) => {
            state.simulation.toggle(Instant::now());
        }
        Key::Named(NamedKey::Escape) => return KeyAction::Exit,
        Key::Character(c) => match c.to_lowercase().as_str() {
            "n" if !state.simulation.is_running() => state.step_once(),
            "r" => state.reseed(),
            "c" => state.simulation.clear(),
            "m" => state.menu_open = !state.menu_open,
            _ => return KeyAction::Ignored,
        },
        _ => return KeyAction::Ignored,
    }
    KeyAction::Redraw
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if button == MouseButton::Left {
        state.is_left_mouse_pressed = element_state == ElementState::Pressed;
        if state.is_left_mouse_pressed {
            if let Some(pos) = state.cursor_pos {
                state.paint_cell(pos);
            }
        }
    }
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);

    // If left button pressed, paint cell every movement step
    if state.is_left_mouse_pressed {
        state.paint_cell(position);
    }
}

pub fn handle_cursor_left(state: &mut State) {
    state.cursor_pos = None;
    state.is_left_mouse_pressed = false;
}

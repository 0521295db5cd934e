use camera_rig::{PointerButton, PointerEvent};
use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Translates window events into page-level pointer events.
///
/// winit reports button presses without a position, so the last cursor
/// position is remembered here.
#[derive(Debug, Default)]
pub struct PointerAdapter {
    cursor: Vec2,
}

impl PointerAdapter {
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                Some(self.mouse_input(*state, *button))
            }
            _ => None,
        }
    }

    fn cursor_moved(&mut self, x: f32, y: f32) -> PointerEvent {
        self.cursor = Vec2::new(x, y);
        PointerEvent::Move { x, y }
    }

    fn mouse_input(&self, state: ElementState, button: MouseButton) -> PointerEvent {
        match state {
            ElementState::Pressed => PointerEvent::Down {
                x: self.cursor.x,
                y: self.cursor.y,
                button: pointer_button(button),
            },
            ElementState::Released => PointerEvent::Up,
        }
    }
}

pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(code) => PointerButton::Other(code),
    }
}

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of trackpad scrolling treated as one wheel notch
const PIXELS_PER_WHEEL_STEP: f32 = 50.0;

/// Camera gesture decoded from pointer input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Drag with the left button, in pixels
    Rotate { dx: f32, dy: f32 },
    /// Drag with the right or middle button, in pixels
    Pan { dx: f32, dy: f32 },
    /// Wheel notches, positive toward the target
    Zoom { steps: f32 },
}

/// What a window event asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Gesture(Gesture),
    SelectView(usize),
}

/// Adapter that turns winit pointer and key events into viewer actions
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    rotating: bool,
    panning: bool,
    cursor: Option<(f32, f32)>,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.button(*button, state.is_pressed());
                None
            }
            WindowEvent::CursorMoved { position, .. } => self
                .cursor_moved(position.x as f32, position.y as f32)
                .map(InputAction::Gesture),
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseWheel { delta, .. } => {
                Some(InputAction::Gesture(Self::wheel(*delta)))
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(code) => view_hotkey(code).map(InputAction::SelectView),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right | MouseButton::Middle => self.panning = pressed,
            _ => {}
        }
    }

    /// Track the cursor; yields a gesture while a drag button is held
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<Gesture> {
        let previous = self.cursor.replace((x, y));
        let (px, py) = previous?;
        let (dx, dy) = (x - px, y - py);

        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if self.rotating {
            Some(Gesture::Rotate { dx, dy })
        } else if self.panning {
            Some(Gesture::Pan { dx, dy })
        } else {
            None
        }
    }

    pub fn wheel(delta: MouseScrollDelta) -> Gesture {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_WHEEL_STEP,
        };
        Gesture::Zoom { steps }
    }

    pub fn is_dragging(&self) -> bool {
        self.rotating || self.panning
    }
}

/// Number keys 1-9 select the matching view
pub fn view_hotkey(code: KeyCode) -> Option<usize> {
    let index = match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => 0,
        KeyCode::Digit2 | KeyCode::Numpad2 => 1,
        KeyCode::Digit3 | KeyCode::Numpad3 => 2,
        KeyCode::Digit4 | KeyCode::Numpad4 => 3,
        KeyCode::Digit5 | KeyCode::Numpad5 => 4,
        KeyCode::Digit6 | KeyCode::Numpad6 => 5,
        KeyCode::Digit7 | KeyCode::Numpad7 => 6,
        KeyCode::Digit8 | KeyCode::Numpad8 => 7,
        KeyCode::Digit9 | KeyCode::Numpad9 => 8,
        _ => return None,
    };
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_no_gesture_without_button() {
        let mut input = PointerInput::new();
        assert_eq!(input.cursor_moved(10.0, 10.0), None);
        assert_eq!(input.cursor_moved(20.0, 15.0), None);
    }

    #[test]
    fn test_left_drag_rotates() {
        let mut input = PointerInput::new();
        input.cursor_moved(10.0, 10.0);
        input.button(MouseButton::Left, true);

        assert_eq!(
            input.cursor_moved(14.0, 7.0),
            Some(Gesture::Rotate { dx: 4.0, dy: -3.0 })
        );

        input.button(MouseButton::Left, false);
        assert_eq!(input.cursor_moved(20.0, 7.0), None);
    }

    #[test]
    fn test_right_drag_pans() {
        let mut input = PointerInput::new();
        input.cursor_moved(0.0, 0.0);
        input.button(MouseButton::Right, true);

        assert_eq!(
            input.cursor_moved(5.0, 5.0),
            Some(Gesture::Pan { dx: 5.0, dy: 5.0 })
        );
        assert!(input.is_dragging());
    }

    #[test]
    fn test_first_cursor_sample_has_no_delta() {
        let mut input = PointerInput::new();
        input.button(MouseButton::Left, true);
        assert_eq!(input.cursor_moved(100.0, 100.0), None);
    }

    #[test]
    fn test_wheel_steps() {
        assert_eq!(
            PointerInput::wheel(MouseScrollDelta::LineDelta(0.0, 2.0)),
            Gesture::Zoom { steps: 2.0 }
        );
        assert_eq!(
            PointerInput::wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -100.0))),
            Gesture::Zoom { steps: -2.0 }
        );
    }

    #[test]
    fn test_view_hotkeys() {
        assert_eq!(view_hotkey(KeyCode::Digit1), Some(0));
        assert_eq!(view_hotkey(KeyCode::Numpad6), Some(5));
        assert_eq!(view_hotkey(KeyCode::Digit0), None);
        assert_eq!(view_hotkey(KeyCode::KeyW), None);
    }
}

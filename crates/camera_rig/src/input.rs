//! Pointer tracking and gesture classification.

use glam::Vec2;
use settings::{CameraSettings, MouseButtonSetting};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

impl From<MouseButtonSetting> for PointerButton {
    fn from(setting: MouseButtonSetting) -> Self {
        match setting {
            MouseButtonSetting::Primary => PointerButton::Primary,
            MouseButtonSetting::Middle => PointerButton::Middle,
            MouseButtonSetting::Secondary => PointerButton::Secondary,
        }
    }
}

/// Pointer input as delivered by the host page, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32, button: PointerButton },
    Move { x: f32, y: f32 },
    Up,
    ContextMenu,
}

impl PointerEvent {
    fn listener(&self) -> Listener {
        match self {
            PointerEvent::Down { .. } => Listener::Down,
            PointerEvent::Move { .. } => Listener::Move,
            PointerEvent::Up => Listener::Up,
            PointerEvent::ContextMenu => Listener::ContextMenu,
        }
    }
}

/// What the host should do with an event after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// No listener was attached for this event.
    Ignored,
    Consumed,
    /// Consumed, and the host must not show its default context menu.
    SuppressDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    None,
    Rotate,
    Pan,
}

/// Pointer displacement routed to one orbit operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureDelta {
    Rotate(Vec2),
    Pan(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listener {
    Down,
    Move,
    Up,
    ContextMenu,
}

impl Listener {
    const fn bit(self) -> u8 {
        match self {
            Listener::Down => 1,
            Listener::Move => 1 << 1,
            Listener::Up => 1 << 2,
            Listener::ContextMenu => 1 << 3,
        }
    }
}

/// Listeners currently attached to the host's input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerSet(u8);

impl ListenerSet {
    fn attach(&mut self, listener: Listener) {
        self.0 |= listener.bit();
    }

    fn detach(&mut self, listener: Listener) {
        self.0 &= !listener.bit();
    }

    fn contains(&self, listener: Listener) -> bool {
        self.0 & listener.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether move/up listeners are attached, i.e. a drag is in progress.
    pub fn tracking_drag(&self) -> bool {
        self.contains(Listener::Move) && self.contains(Listener::Up)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub start_pos: Vec2,
    pub last_pos: Vec2,
    pub current_pos: Vec2,
    /// Displacement since the previous move, +Y pointing up.
    pub delta: Vec2,
    /// Displacement since pointer-down, +Y pointing up.
    pub offset: Vec2,
    pub active_gesture: Gesture,
}

#[derive(Debug, Clone)]
pub struct InputTracker {
    pointer: PointerState,
    listeners: ListenerSet,
    rotate_button: PointerButton,
    pan_button: PointerButton,
}

impl InputTracker {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            pointer: PointerState::default(),
            listeners: ListenerSet::default(),
            rotate_button: settings.rotate_button.into(),
            pan_button: settings.pan_button.into(),
        }
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }

    /// Attaches the always-on listeners (pointer-down and context-menu).
    pub fn attach(&mut self) {
        self.listeners.attach(Listener::Down);
        self.listeners.attach(Listener::ContextMenu);
    }

    /// Detaches every listener and drops any gesture in progress.
    pub fn detach(&mut self) {
        self.listeners = ListenerSet::default();
        self.pointer.active_gesture = Gesture::None;
    }

    /// Feeds one event through the attached listeners.
    pub fn handle(&mut self, event: &PointerEvent) -> (EventResponse, Option<GestureDelta>) {
        if !self.listeners.contains(event.listener()) {
            return (EventResponse::Ignored, None);
        }
        match *event {
            PointerEvent::Down { x, y, button } => {
                self.pointer_down(Vec2::new(x, y), button);
                (EventResponse::Consumed, None)
            }
            PointerEvent::Move { x, y } => (EventResponse::Consumed, self.pointer_move(Vec2::new(x, y))),
            PointerEvent::Up => {
                self.pointer_up();
                (EventResponse::Consumed, None)
            }
            PointerEvent::ContextMenu => (EventResponse::SuppressDefault, None),
        }
    }

    fn classify(&self, button: PointerButton) -> Gesture {
        if button == self.rotate_button {
            Gesture::Rotate
        } else if button == self.pan_button {
            Gesture::Pan
        } else {
            Gesture::None
        }
    }

    fn pointer_down(&mut self, pos: Vec2, button: PointerButton) {
        let gesture = self.classify(button);
        self.pointer = PointerState {
            start_pos: pos,
            last_pos: pos,
            current_pos: pos,
            delta: Vec2::ZERO,
            offset: Vec2::ZERO,
            active_gesture: gesture,
        };
        if gesture == Gesture::None {
            self.listeners.detach(Listener::Move);
            self.listeners.detach(Listener::Up);
            return;
        }
        self.listeners.attach(Listener::Move);
        self.listeners.attach(Listener::Up);
        debug!(?gesture, x = pos.x, y = pos.y, "gesture started");
    }

    fn pointer_move(&mut self, pos: Vec2) -> Option<GestureDelta> {
        let delta = Vec2::new(pos.x - self.pointer.last_pos.x, -(pos.y - self.pointer.last_pos.y));
        self.pointer.delta = delta;
        self.pointer.offset += delta;
        self.pointer.current_pos = pos;
        self.pointer.last_pos = pos;
        if delta == Vec2::ZERO {
            return None;
        }
        match self.pointer.active_gesture {
            Gesture::Rotate => Some(GestureDelta::Rotate(delta)),
            Gesture::Pan => Some(GestureDelta::Pan(delta)),
            Gesture::None => None,
        }
    }

    fn pointer_up(&mut self) {
        debug!(
            gesture = ?self.pointer.active_gesture,
            dx = self.pointer.offset.x,
            dy = self.pointer.offset.y,
            "gesture ended"
        );
        self.pointer.active_gesture = Gesture::None;
        self.listeners.detach(Listener::Move);
        self.listeners.detach(Listener::Up);
    }
}

//! The input event data model (§3).

use serde::{Deserialize, Serialize};

/// A timestamped input event. Events are values, not references — ownership
/// transfers on every hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Monotonic timestamp in microseconds.
    pub timestamp_us: u64,
    /// The event payload.
    pub kind: EventKind,
}

/// Tagged variant over the event classes the proxy distinguishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Pointer motion, relative `(dx, dy)` plus an optional absolute position.
    PointerMotion {
        dx: f64,
        dy: f64,
        absolute: bool,
        x: f64,
        y: f64,
    },
    /// A pointer button press or release. Never predicted.
    PointerButton { button: u32, pressed: bool },
    /// A scroll event: continuous `(dx, dy)` and, if `discrete`, tick counts.
    Scroll {
        dx: f64,
        dy: f64,
        discrete: bool,
        discrete_dx: i32,
        discrete_dy: i32,
    },
    /// A key press or release. Never predicted.
    Key { key: u32, pressed: bool },
    /// A touch contact update. Never predicted.
    Touch {
        touch_id: u32,
        x: f64,
        y: f64,
        pressed: bool,
    },
}

impl EventKind {
    /// True for the pointer-motion variant specifically.
    pub fn is_pointer_motion(&self) -> bool {
        matches!(self, EventKind::PointerMotion { .. })
    }
}

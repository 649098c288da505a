//! Double-press detection.
//!
//! Remembers the last two primary presses. A release completes a double press
//! when the older press happened within the time window and the two presses
//! landed within the radius of each other.

use std::time::{Duration, Instant};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy)]
struct Press {
    pos: Point,
    at: Instant,
}

/// Turns press/release pairs into double-press notifications.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    window: Duration,
    radius: i32,
    presses: [Option<Press>; 2],
}

impl DoubleClickDetector {
    /// Detector with a time `window` and a pixel `radius`.
    pub fn new(window: Duration, radius: i32) -> Self {
        Self { window, radius, presses: [None, None] }
    }

    /// Record a primary press at `pos`.
    pub fn on_press(&mut self, pos: Point, at: Instant) {
        self.presses[0] = self.presses[1];
        self.presses[1] = Some(Press { pos, at });
    }

    /// Handle a primary release. Returns `true` when it completes a double
    /// press; the history is cleared so a third press starts over.
    pub fn on_release(&mut self, at: Instant) -> bool {
        let [Some(older), Some(newer)] = self.presses else {
            return false;
        };
        if at.saturating_duration_since(older.at) > self.window {
            return false;
        }
        let radius = i64::from(self.radius);
        if older.pos.distance_squared(newer.pos) > radius * radius {
            return false;
        }
        self.presses = [None, None];
        true
    }

    /// Forget every recorded press.
    pub fn reset(&mut self) {
        self.presses = [None, None];
    }
}

impl Default for DoubleClickDetector {
    fn default() -> Self {
        Self::new(Duration::from_millis(400), 30)
    }
}

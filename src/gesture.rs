//! Gesture probing and drag classification.
//!
//! A gesture moves through `Idle → Probing → Dragging` as movement
//! accumulates. Probing decides ownership: once vertical displacement
//! clears the noise threshold before horizontal does, the gesture is a
//! scroll and the panel ignores it until the finger lifts. Classification
//! at drag end decides between a swipe (fast flick, commits by
//! direction) and a slow drag (commits by position).

use std::time::Duration;

/// Displacement below this magnitude is sensor noise and confirms
/// neither axis.
const MOVE_NOISE_PX: f64 = 3.0;

/// Phase of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Movement seen, neither axis confirmed yet.
    Probing,
    /// Horizontal intent confirmed; the panel follows the finger.
    Dragging,
    /// Vertical intent won, or the controller was busy at move-start;
    /// ignored until the next gesture.
    Abandoned,
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Fast flick: commits by its last direction regardless of where
    /// the panel ended up.
    Swipe { direction: i8 },
    /// Commits by which half of the travel the panel rests in.
    SlowDrag,
}

/// Per-gesture scratch state. Reset at gesture boundaries, never
/// persisted across gestures.
#[derive(Debug, Default)]
pub struct GestureTracker {
    phase: GesturePhase,
    /// Start of the swipe timing window. Set at drag confirmation and
    /// restarted on direction reversal.
    window_started: Duration,
    /// Accumulated horizontal distance inside the current window.
    distance: f64,
    probe_horizontal: f64,
    probe_vertical: f64,
    last_sign: i8,
    moved: bool,
}

impl GestureTracker {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether any movement at all was registered this gesture.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Arm the tracker at move-start.
    pub fn begin(&mut self) {
        *self = Self {
            phase: GesturePhase::Probing,
            ..Self::default()
        };
    }

    /// Park the tracker until gesture end.
    pub fn abandon(&mut self) {
        self.phase = GesturePhase::Abandoned;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed one movement step while probing. Returns `true` exactly
    /// once, when horizontal intent is confirmed; the swipe window
    /// starts at `now`.
    pub fn probe(&mut self, dx: f64, dy: f64, now: Duration) -> bool {
        debug_assert_eq!(self.phase, GesturePhase::Probing);
        if dx != 0.0 || dy != 0.0 {
            self.moved = true;
        }
        self.probe_horizontal += dx.abs();
        self.probe_vertical += dy.abs();
        if self.probe_vertical > MOVE_NOISE_PX && self.probe_horizontal <= MOVE_NOISE_PX {
            self.phase = GesturePhase::Abandoned;
            return false;
        }
        if self.probe_horizontal > MOVE_NOISE_PX {
            self.phase = GesturePhase::Dragging;
            self.window_started = now;
            return true;
        }
        false
    }

    /// Track one movement step while dragging. Tracks finger intent,
    /// not clamped panel motion. A direction reversal restarts the
    /// swipe window: a flick that changed its mind is no longer a flick.
    pub fn track(&mut self, dx: f64, now: Duration) {
        debug_assert_eq!(self.phase, GesturePhase::Dragging);
        if dx == 0.0 {
            return;
        }
        self.moved = true;
        let sign: i8 = if dx > 0.0 { 1 } else { -1 };
        if self.last_sign != 0 && sign != self.last_sign {
            self.window_started = now;
            self.distance = 0.0;
        }
        self.distance += dx.abs();
        self.last_sign = sign;
    }

    /// Classify the finished drag against the configured thresholds.
    pub fn classify(
        &self,
        now: Duration,
        distance_threshold: f64,
        duration_threshold: Duration,
    ) -> DragOutcome {
        let elapsed = now.saturating_sub(self.window_started);
        if self.distance >= distance_threshold && elapsed < duration_threshold {
            DragOutcome::Swipe {
                direction: self.last_sign,
            }
        } else {
            DragOutcome::SlowDrag
        }
    }
}

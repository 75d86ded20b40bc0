//! Gesture messages delivered by the host.
//!
//! The host's event normalization layer turns raw touch/mouse events
//! into this stream. Deltas are per movement step, in the same unit as
//! panel offsets.

use crate::adapter::ElementId;

/// One normalized gesture event on the handle region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMsg {
    /// Finger/pointer went down and started to move. `item` carries the
    /// gestured container for dynamic-mode element resolution; `None` in
    /// static mode.
    MoveStart { item: Option<ElementId> },

    /// One movement step since the previous event.
    Move { dx: f64, dy: f64 },

    /// Finger/pointer lifted after movement.
    MoveEnd,

    /// Finger/pointer lifted without the host recognizing a move
    /// gesture (plain tap or click release on the handle).
    TapRelease { item: Option<ElementId> },
}

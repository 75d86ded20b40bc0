//! Panel position and lifecycle state.
//!
//! Owned exclusively by the controller and mutated only through its
//! methods; exposed read-only for observers and tests.

use crate::adapter::ElementSet;
use crate::config::HideDirection;

/// Current state of the panel pair.
#[derive(Debug, Default)]
pub struct PanelState {
    /// Horizontal offset of the master panel, in pixels. Always within
    /// `[0, max_offset]` (or `[max_offset, 0]` for left hide direction).
    pub position: f64,

    /// Cached maximum offset: the measured slave width, negated for
    /// left hide direction. `None` until first computed; invalidated by
    /// refresh and element/direction option changes.
    pub max_offset: Option<f64>,

    /// Resting-state flag, confirmed at transition completion, refresh,
    /// and initialization.
    pub hidden: bool,

    /// A programmatic show/hide is in flight. Set when the request is
    /// accepted, cleared at its completion signal.
    pub animating: bool,

    /// Horizontal intent was confirmed for the current gesture.
    pub dragging: bool,

    /// The bound element pair, if any.
    pub elements: Option<ElementSet>,
}

impl PanelState {
    /// Whether the panel currently leans toward the hidden side of its
    /// travel. Used to pick the before-event when a drag begins and the
    /// target when a tap toggles.
    pub fn leaning_hidden(&self, direction: HideDirection) -> bool {
        match direction {
            HideDirection::Right => self.position > 0.0,
            HideDirection::Left => self.position < 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaning_hidden_right() {
        let mut state = PanelState::default();
        assert!(!state.leaning_hidden(HideDirection::Right));
        state.position = 10.0;
        assert!(state.leaning_hidden(HideDirection::Right));
        state.position = -10.0;
        assert!(!state.leaning_hidden(HideDirection::Right));
    }

    #[test]
    fn test_leaning_hidden_left() {
        let mut state = PanelState::default();
        assert!(!state.leaning_hidden(HideDirection::Left));
        state.position = -10.0;
        assert!(state.leaning_hidden(HideDirection::Left));
        state.position = 10.0;
        assert!(!state.leaning_hidden(HideDirection::Left));
    }
}

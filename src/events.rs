//! Lifecycle events emitted on the master element.
//!
//! Before-events fire strictly before the positional animation starts;
//! terminal events fire strictly after its completion signal, exactly
//! once per transition that was actually started.

use std::fmt;

/// Panel lifecycle notification, delivered to external listeners through
/// [`PanelHost::emit`](crate::adapter::PanelHost::emit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelEvent {
    BeforeShow,
    Show,
    BeforeHide,
    Hide,
}

impl PanelEvent {
    /// The before-event for a transition toward hidden (`true`) or shown.
    pub fn before(hide: bool) -> Self {
        if hide {
            PanelEvent::BeforeHide
        } else {
            PanelEvent::BeforeShow
        }
    }

    /// The terminal event for a transition toward hidden (`true`) or shown.
    pub fn after(hide: bool) -> Self {
        if hide {
            PanelEvent::Hide
        } else {
            PanelEvent::Show
        }
    }

    /// Wire name, as seen by host-side listeners.
    pub fn name(&self) -> &'static str {
        match self {
            PanelEvent::BeforeShow => "beforeshow",
            PanelEvent::Show => "show",
            PanelEvent::BeforeHide => "beforehide",
            PanelEvent::Hide => "hide",
        }
    }
}

impl fmt::Display for PanelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_pairing() {
        assert_eq!(PanelEvent::before(true), PanelEvent::BeforeHide);
        assert_eq!(PanelEvent::before(false), PanelEvent::BeforeShow);
        assert_eq!(PanelEvent::after(true), PanelEvent::Hide);
        assert_eq!(PanelEvent::after(false), PanelEvent::Show);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(PanelEvent::BeforeShow.name(), "beforeshow");
        assert_eq!(PanelEvent::Hide.to_string(), "hide");
    }
}

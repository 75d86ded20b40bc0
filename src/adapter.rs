//! Host environment boundary.
//!
//! The controller never touches the DOM (or any concrete scene graph)
//! directly; everything it needs from the outside world goes through the
//! [`PanelHost`] trait. Production hosts wrap their UI toolkit; tests
//! drive the controller with a recording fake.

use std::time::Duration;

use crate::config::ElementRef;
use crate::events::PanelEvent;

/// Opaque handle to a host-side element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Token identifying one requested deferral frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Token identifying one scheduled transition completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionToken(pub u64);

/// The element pair currently owned by a controller, plus the item it
/// was resolved from. Exactly one controller may own a pair at a time;
/// re-binding tears down the previous master's transform first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSet {
    /// The container the pair was resolved within.
    pub item: ElementId,
    /// The panel that slides.
    pub master: ElementId,
    /// The panel revealed beneath the master; its width defines the
    /// maximum offset.
    pub slave: ElementId,
}

/// Capabilities the host environment supplies to the controller.
pub trait PanelHost {
    /// Monotonic clock; only ever compared against itself.
    fn now(&self) -> Duration;

    /// Measured outer width of an element, in the same unit as drag deltas.
    fn measure_width(&self, el: ElementId) -> f64;

    /// Apply a horizontal offset to `el`, or clear the transform entirely
    /// with `None`.
    fn set_offset(&mut self, el: ElementId, x: Option<f64>);

    /// Schedule a timed visual transition on `el`. When `completion` is
    /// set, the host must deliver the token back through
    /// [`PanelController::notify_transition_end`], with a fallback firing
    /// shortly after `duration_ms` if no native completion signal
    /// arrives. Delivering a token more than once is allowed; the
    /// controller ignores duplicates.
    ///
    /// [`PanelController::notify_transition_end`]: crate::controller::PanelController::notify_transition_end
    fn begin_transition(
        &mut self,
        el: ElementId,
        duration_ms: u64,
        easing: &str,
        completion: Option<TransitionToken>,
    );

    /// Remove any timed transition from `el`.
    fn clear_transition(&mut self, el: ElementId);

    /// Ask for a one-frame deferral; the host delivers the token back
    /// through [`PanelController::notify_frame`] on the next frame.
    ///
    /// [`PanelController::notify_frame`]: crate::controller::PanelController::notify_frame
    fn request_frame(&mut self, token: FrameToken);

    /// Register gesture listeners on the `handle` region inside
    /// `container`. When `drag` is false the host only needs to deliver
    /// tap releases.
    fn bind_handle(&mut self, container: ElementId, handle: &str, drag: bool);

    /// Resolve an element reference. `Prev`/`Next` are resolved against
    /// the master element; `Container` and selectors against the bound
    /// item.
    fn resolve(&self, base: ElementId, target: &ElementRef) -> Option<ElementId>;

    /// Fire-and-forget lifecycle notification on `el`.
    fn emit(&mut self, el: ElementId, event: PanelEvent);
}

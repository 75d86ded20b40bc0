//! The panel controller.
//!
//! `PanelController` interprets the host's gesture stream plus explicit
//! API calls into panel position changes and lifecycle events. It
//! guarantees mutual exclusion between programmatic transitions and
//! interactive drags, and classifies gesture outcomes (tap, swipe, slow
//! drag) to decide whether the panel settles shown or hidden.
//!
//! Two hard rules: an in-flight animation blocks interactive dragging,
//! and a direction reversal fully resets the swipe timing window.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::adapter::{ElementId, ElementSet, FrameToken, PanelHost, TransitionToken};
use crate::config::{EasingKind, ElementRef, PanelConfig, PanelOption};
use crate::error::PanelError;
use crate::events::PanelEvent;
use crate::gesture::{DragOutcome, GesturePhase, GestureTracker};
use crate::messages::GestureMsg;
use crate::model::PanelState;

/// Completion callback for a programmatic transition. Invoked exactly
/// once, even when the request is rejected.
pub type Callback = Box<dyn FnOnce() + 'static>;

/// Work deferred by one frame.
enum FrameAction {
    /// Start the accepted toggle.
    Begin {
        hide: bool,
        duration: u64,
        easing: EasingKind,
        callback: Option<Callback>,
    },
    /// Rejected request: only the callback runs.
    Invoke(Callback),
}

/// The transition currently waiting for its completion signal.
struct PendingTransition {
    token: TransitionToken,
    hide: bool,
    callback: Option<Callback>,
}

/// Gesture-driven sliding panel state machine.
pub struct PanelController<H: PanelHost> {
    host: H,
    config: PanelConfig,
    container: ElementId,
    state: PanelState,
    gesture: GestureTracker,
    /// Dynamic-mode item awaiting resolution at drag confirmation.
    pending_item: Option<ElementId>,
    pending_frames: Vec<(FrameToken, FrameAction)>,
    pending_transition: Option<PendingTransition>,
    token_counter: u64,
}

impl<H: PanelHost> PanelController<H> {
    /// Validate the configuration, register gesture handlers on the
    /// handle region, and (in static mode) resolve the element pair and
    /// position it according to `config.hidden`.
    ///
    /// Unresolvable element references are a fatal setup error.
    pub fn new(host: H, container: ElementId, config: PanelConfig) -> Result<Self, PanelError> {
        config.validate()?;
        let mut controller = Self {
            host,
            config,
            container,
            state: PanelState::default(),
            gesture: GestureTracker::default(),
            pending_item: None,
            pending_frames: Vec::new(),
            pending_transition: None,
            token_counter: 0,
        };
        controller.host.bind_handle(
            container,
            &controller.config.handle,
            controller.config.drag,
        );
        if !controller.config.dynamic {
            controller.bind_item(container)?;
            controller.state.hidden = controller.config.hidden;
            controller.reposition_resting()?;
        }
        Ok(controller)
    }

    // === Observers ===

    /// A programmatic transition is in flight.
    pub fn animating(&self) -> bool {
        self.state.animating
    }

    /// An interactive drag owns the panel.
    pub fn dragging(&self) -> bool {
        self.state.dragging
    }

    /// The panel rests (or is settling) in the hidden state.
    pub fn is_hidden(&self) -> bool {
        self.state.hidden
    }

    /// Current horizontal offset of the master panel.
    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    // === Programmatic API ===

    /// Request a transition to the visible resting position.
    ///
    /// Rejected (callback deferred one frame, no events, no motion)
    /// while animating, dragging, or already visible; with
    /// `skip_previous_animation` an in-flight animation is cancelled
    /// instead and the new transition starts.
    pub fn show(
        &mut self,
        duration: Option<u64>,
        callback: Option<Callback>,
    ) -> Result<(), PanelError> {
        self.request_toggle(false, duration, EasingKind::Default, callback)
    }

    /// Request a transition to the hidden resting position. Symmetric
    /// to [`show`](Self::show).
    pub fn hide(
        &mut self,
        duration: Option<u64>,
        callback: Option<Callback>,
    ) -> Result<(), PanelError> {
        self.request_toggle(true, duration, EasingKind::Default, callback)
    }

    /// Recompute the maximum offset from the live slave width and
    /// reposition the panel pair instantly to match the current hidden
    /// state. No lifecycle events, no transition. An active drag is
    /// abandoned first: its geometry is stale once the panel teleports.
    pub fn refresh(&mut self) -> Result<(), PanelError> {
        if self.state.dragging {
            self.gesture.reset();
            self.state.dragging = false;
            self.pending_item = None;
        }
        self.state.max_offset = None;
        self.reposition_resting()
    }

    /// Apply one configuration update, running any dependent
    /// recomputation (element re-resolution, offset re-measurement,
    /// instant repositioning).
    pub fn set_option(&mut self, option: PanelOption) -> Result<(), PanelError> {
        match option {
            PanelOption::Duration(ms) => self.config.duration = ms,
            PanelOption::Easing(easing) => {
                self.config.easing = non_empty("easing", easing)?;
            }
            PanelOption::EasingAfterDrag(easing) => {
                self.config.easing_after_drag = non_empty("easing_after_drag", easing)?;
            }
            PanelOption::EasingAfterSwipe(easing) => {
                self.config.easing_after_swipe = non_empty("easing_after_swipe", easing)?;
            }
            PanelOption::SwipeDurationThreshold(ms) => {
                if ms == 0 {
                    return Err(PanelError::InvalidConfig(
                        "swipe_duration_threshold must be positive".into(),
                    ));
                }
                self.config.swipe_duration_threshold = ms;
            }
            PanelOption::SwipeDistanceThreshold(px) => {
                if px <= 0.0 {
                    return Err(PanelError::InvalidConfig(
                        "swipe_distance_threshold must be positive".into(),
                    ));
                }
                self.config.swipe_distance_threshold = px;
            }
            PanelOption::Hidden(hidden) => {
                self.config.hidden = hidden;
                self.state.hidden = hidden;
                if self.state.elements.is_some() {
                    self.reposition_resting()?;
                }
            }
            PanelOption::HideDirection(direction) => {
                self.config.hide_direction = direction;
                self.state.max_offset = None;
                if self.state.elements.is_some() {
                    self.reposition_resting()?;
                }
            }
            PanelOption::Master(target) => {
                self.config.master = target;
                self.rebind_elements()?;
            }
            PanelOption::Slave(target) => {
                self.config.slave = target;
                self.rebind_elements()?;
            }
            PanelOption::SlaveAnimation(enabled) => self.config.slave_animation = enabled,
            PanelOption::SlaveDisposition(px) => {
                if px < 0.0 {
                    return Err(PanelError::InvalidConfig(
                        "slave_disposition must not be negative".into(),
                    ));
                }
                self.config.slave_disposition = px;
            }
            PanelOption::Drag(enabled) => self.config.drag = enabled,
            PanelOption::SkipPreviousAnimation(enabled) => {
                self.config.skip_previous_animation = enabled;
            }
        }
        Ok(())
    }

    // === Host event entry points ===

    /// Feed one normalized gesture event.
    pub fn handle_gesture(&mut self, msg: GestureMsg) -> Result<(), PanelError> {
        match msg {
            GestureMsg::MoveStart { item } => self.on_move_start(item),
            GestureMsg::Move { dx, dy } => self.on_move(dx, dy),
            GestureMsg::MoveEnd => self.on_move_end(),
            GestureMsg::TapRelease { item } => self.toggle_from_tap(item),
        }
    }

    /// Deliver a previously requested frame. Unknown tokens are ignored.
    pub fn notify_frame(&mut self, token: FrameToken) {
        let Some(index) = self.pending_frames.iter().position(|(t, _)| *t == token) else {
            return;
        };
        let (_, action) = self.pending_frames.remove(index);
        match action {
            FrameAction::Invoke(callback) => callback(),
            FrameAction::Begin {
                hide,
                duration,
                easing,
                callback,
            } => self.begin_toggle(hide, duration, easing, callback),
        }
    }

    /// Deliver a transition completion signal. Stale and duplicate
    /// tokens are ignored; completion effects are single-fire.
    pub fn notify_transition_end(&mut self, token: TransitionToken) {
        let pending = match self.pending_transition.take() {
            Some(pending) if pending.token == token => pending,
            other => {
                self.pending_transition = other;
                return;
            }
        };
        if let Some(els) = self.state.elements {
            self.host.clear_transition(els.master);
        }
        self.finish_toggle(pending.hide, pending.callback);
    }

    // === Gesture state machine ===

    fn on_move_start(&mut self, item: Option<ElementId>) -> Result<(), PanelError> {
        if !self.config.drag {
            return Ok(());
        }
        if self.state.animating {
            // The animation owns the elements until it completes; the
            // whole gesture is ignored.
            self.gesture.abandon();
            trace!(target: "gesture", "move-start while animating, gesture abandoned");
            return Ok(());
        }
        self.pending_item = item;
        self.gesture.begin();
        Ok(())
    }

    fn on_move(&mut self, dx: f64, dy: f64) -> Result<(), PanelError> {
        let now = self.host.now();
        match self.gesture.phase() {
            GesturePhase::Probing => {
                if self.gesture.probe(dx, dy, now) {
                    if let Err(error) = self.confirm_drag() {
                        self.gesture.abandon();
                        return Err(error);
                    }
                    self.gesture.track(dx, now);
                    self.apply_drag_step(dx)?;
                }
                Ok(())
            }
            GesturePhase::Dragging => {
                self.gesture.track(dx, now);
                self.apply_drag_step(dx)
            }
            GesturePhase::Idle | GesturePhase::Abandoned => Ok(()),
        }
    }

    fn on_move_end(&mut self) -> Result<(), PanelError> {
        match self.gesture.phase() {
            GesturePhase::Dragging => {
                let outcome = self.gesture.classify(
                    self.host.now(),
                    self.config.swipe_distance_threshold,
                    Duration::from_millis(self.config.swipe_duration_threshold),
                );
                self.gesture.reset();
                self.state.dragging = false;
                self.pending_item = None;
                let max = self.max_offset()?;
                let (hide, easing) = match outcome {
                    DragOutcome::Swipe { direction } => {
                        let hide = match self.config.hide_direction {
                            crate::config::HideDirection::Right => direction > 0,
                            crate::config::HideDirection::Left => direction < 0,
                        };
                        (hide, EasingKind::AfterSwipe)
                    }
                    DragOutcome::SlowDrag => {
                        let hide = match self.config.hide_direction {
                            crate::config::HideDirection::Right => {
                                self.state.position >= max / 2.0
                            }
                            crate::config::HideDirection::Left => self.state.position < max / 2.0,
                        };
                        (hide, EasingKind::AfterDrag)
                    }
                };
                debug!(target: "gesture", ?outcome, hide, position = self.state.position, "drag settled");
                self.begin_toggle(hide, self.config.duration, easing, None);
                Ok(())
            }
            GesturePhase::Probing if !self.gesture.moved() => {
                // Finger went down and up without any movement: a tap.
                self.gesture.reset();
                let item = self.pending_item.take();
                self.toggle_from_tap(item)
            }
            _ => {
                self.gesture.reset();
                self.pending_item = None;
                Ok(())
            }
        }
    }

    /// Toggle between shown and hidden in response to a tap, using the
    /// after-swipe easing. Ignored while a drag or animation is active.
    fn toggle_from_tap(&mut self, item: Option<ElementId>) -> Result<(), PanelError> {
        if self.state.dragging || self.state.animating {
            trace!(target: "gesture", "tap ignored while busy");
            return Ok(());
        }
        if self.config.dynamic {
            match item {
                Some(item) => self.bind_item(item)?,
                None if self.state.elements.is_none() => return Err(PanelError::ElementsUnbound),
                None => {}
            }
        }
        let hide = !self.state.leaning_hidden(self.config.hide_direction);
        debug!(target: "gesture", hide, "tap toggle");
        self.request_toggle(hide, None, EasingKind::AfterSwipe, None)
    }

    /// PROBING → DRAGGING side effects: bind the gestured item in
    /// dynamic mode, emit the before-event for the direction this drag
    /// leans, and take ownership of the elements.
    fn confirm_drag(&mut self) -> Result<(), PanelError> {
        if self.config.dynamic {
            if let Some(item) = self.pending_item.take() {
                self.bind_item(item)?;
            } else if self.state.elements.is_none() {
                return Err(PanelError::ElementsUnbound);
            }
        }
        let els = self.elements()?;
        self.state.dragging = true;
        let hide = !self.state.leaning_hidden(self.config.hide_direction);
        debug!(target: "gesture", hide, "drag confirmed");
        self.host.emit(els.master, PanelEvent::before(hide));
        Ok(())
    }

    /// Apply one clamped drag step and reposition the master with no
    /// transition. Steps that would leave the `[0, max]` (or `[max, 0]`)
    /// travel are truncated at the bound; steps already at the bound are
    /// ignored entirely.
    fn apply_drag_step(&mut self, dx: f64) -> Result<(), PanelError> {
        if dx == 0.0 {
            return Ok(());
        }
        let max = self.max_offset()?;
        let (low, high) = if max > 0.0 { (0.0, max) } else { (max, 0.0) };
        let next = (self.state.position + dx).clamp(low, high);
        if next == self.state.position {
            return Ok(());
        }
        self.state.position = next;
        let els = self.elements()?;
        self.host.set_offset(els.master, Some(next));
        Ok(())
    }

    // === Transitions ===

    /// Accept or reject a programmatic toggle. Accepted toggles emit
    /// their before-event immediately and start one frame later, so any
    /// state change the caller just made is paintable first.
    fn request_toggle(
        &mut self,
        hide: bool,
        duration: Option<u64>,
        easing: EasingKind,
        callback: Option<Callback>,
    ) -> Result<(), PanelError> {
        if self.state.animating && !self.state.dragging && self.config.skip_previous_animation {
            self.cancel_in_flight();
        }
        let els = self.elements()?;
        let max = self.max_offset()?;
        let target = if hide { max } else { 0.0 };
        let busy = self.state.animating || self.state.dragging;
        let redundant = self.state.hidden == hide && self.state.position == target;
        if busy || redundant {
            trace!(target: "panel", hide, busy, redundant, "toggle rejected");
            if let Some(callback) = callback {
                self.defer_invoke(callback);
            }
            return Ok(());
        }
        self.host.emit(els.master, PanelEvent::before(hide));
        self.state.animating = true;
        let token = FrameToken(self.next_token());
        self.pending_frames.push((
            token,
            FrameAction::Begin {
                hide,
                duration: duration.unwrap_or(self.config.duration),
                easing,
                callback,
            },
        ));
        self.host.request_frame(token);
        debug!(target: "panel", hide, "toggle accepted");
        Ok(())
    }

    /// Start the positional animation toward a resting state. Called
    /// from the deferred frame for programmatic toggles and directly
    /// when a drag settles.
    fn begin_toggle(
        &mut self,
        hide: bool,
        duration: u64,
        easing: EasingKind,
        callback: Option<Callback>,
    ) {
        let (els, max) = match (self.elements(), self.max_offset()) {
            (Ok(els), Ok(max)) => (els, max),
            _ => {
                // Acceptance set `animating`; release it or the
                // controller rejects everything from here on.
                warn!(target: "panel", "toggle dropped: element pair no longer bound");
                self.state.animating = false;
                if let Some(callback) = callback {
                    callback();
                }
                return;
            }
        };
        let target = if hide { max } else { 0.0 };
        self.state.animating = true;
        self.state.position = target;
        debug!(target: "panel", hide, position = target, duration, "transition start");

        if duration == 0 {
            self.host.set_offset(els.master, Some(target));
            if self.config.slave_animation && !self.state.dragging {
                self.host.set_offset(els.slave, Some(self.slave_target(target)));
            }
            self.finish_toggle(hide, callback);
            return;
        }

        let easing = self.config.easing_for(easing).to_owned();
        let token = TransitionToken(self.next_token());
        self.host
            .begin_transition(els.master, duration, &easing, Some(token));
        self.host.set_offset(els.master, Some(target));
        if self.config.slave_animation && !self.state.dragging {
            self.host.begin_transition(els.slave, duration, &easing, None);
            self.host.set_offset(els.slave, Some(self.slave_target(target)));
        }
        self.pending_transition = Some(PendingTransition {
            token,
            hide,
            callback,
        });
    }

    /// Completion effects: confirm the resting state, emit the terminal
    /// event, run the callback.
    fn finish_toggle(&mut self, hide: bool, callback: Option<Callback>) {
        self.state.animating = false;
        self.state.hidden = hide;
        debug!(target: "panel", hide, "transition complete");
        if let Some(els) = self.state.elements {
            self.host.emit(els.master, PanelEvent::after(hide));
        }
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Cancel the in-flight transition and any not-yet-begun deferred
    /// starts, keeping every callback alive for its exactly-once run.
    fn cancel_in_flight(&mut self) {
        let drained = std::mem::take(&mut self.pending_frames);
        for (token, action) in drained {
            match action {
                FrameAction::Begin {
                    callback: Some(callback),
                    ..
                } => self
                    .pending_frames
                    .push((token, FrameAction::Invoke(callback))),
                FrameAction::Begin { callback: None, .. } => {}
                invoke @ FrameAction::Invoke(_) => self.pending_frames.push((token, invoke)),
            }
        }
        if let Some(pending) = self.pending_transition.take() {
            debug!(target: "panel", "in-flight transition cancelled");
            if let Some(els) = self.state.elements {
                self.host.clear_transition(els.master);
            }
            self.state.animating = false;
            if let Some(callback) = pending.callback {
                self.defer_invoke(callback);
            }
        } else {
            self.state.animating = false;
        }
    }

    // === Elements and geometry ===

    /// Bind the element pair found in `item`. A no-op when `item` is
    /// already bound; otherwise the previous master's transform is
    /// cleared first so two controllers never fight over one element,
    /// and the fresh pair starts untranslated (shown).
    fn bind_item(&mut self, item: ElementId) -> Result<(), PanelError> {
        if let Some(set) = self.state.elements {
            if set.item == item {
                return Ok(());
            }
            self.host.set_offset(set.master, None);
        }
        let master = self.host.resolve(item, &self.config.master).ok_or_else(|| {
            PanelError::UnresolvableElement {
                role: "master",
                reference: self.config.master.clone(),
            }
        })?;
        let slave_base = match self.config.slave {
            ElementRef::Prev | ElementRef::Next => master,
            _ => item,
        };
        let slave = self
            .host
            .resolve(slave_base, &self.config.slave)
            .ok_or_else(|| PanelError::UnresolvableElement {
                role: "slave",
                reference: self.config.slave.clone(),
            })?;
        debug!(target: "panel", ?item, ?master, ?slave, "elements bound");
        self.state.elements = Some(ElementSet {
            item,
            master,
            slave,
        });
        self.state.max_offset = None;
        self.state.position = 0.0;
        self.state.hidden = false;
        Ok(())
    }

    /// Re-resolve after a master/slave option change, preserving the
    /// hidden flag across the rebind.
    fn rebind_elements(&mut self) -> Result<(), PanelError> {
        if let Some(set) = self.state.elements.take() {
            self.host.set_offset(set.master, None);
        }
        self.state.max_offset = None;
        if self.config.dynamic {
            return Ok(());
        }
        let hidden = self.state.hidden;
        self.bind_item(self.container)?;
        self.state.hidden = hidden;
        self.reposition_resting()
    }

    /// Instantly place master and slave at the rest offsets for the
    /// current hidden flag.
    fn reposition_resting(&mut self) -> Result<(), PanelError> {
        let max = self.max_offset()?;
        let target = if self.state.hidden { max } else { 0.0 };
        self.state.position = target;
        let els = self.elements()?;
        self.host.set_offset(els.master, Some(target));
        if self.config.slave_animation {
            self.host.set_offset(els.slave, Some(self.slave_target(target)));
        }
        Ok(())
    }

    /// The slave's parallel offset for a master rest position: parked at
    /// its disposition while the master covers it, flush at zero once
    /// revealed.
    fn slave_target(&self, master_target: f64) -> f64 {
        if master_target == 0.0 {
            -self.config.slave_disposition * self.config.hide_direction.sign()
        } else {
            0.0
        }
    }

    /// Cached maximum offset, measuring the slave on first use.
    fn max_offset(&mut self) -> Result<f64, PanelError> {
        if let Some(max) = self.state.max_offset {
            return Ok(max);
        }
        let els = self.elements()?;
        let max = self.host.measure_width(els.slave) * self.config.hide_direction.sign();
        self.state.max_offset = Some(max);
        Ok(max)
    }

    fn elements(&self) -> Result<ElementSet, PanelError> {
        self.state.elements.ok_or(PanelError::ElementsUnbound)
    }

    fn defer_invoke(&mut self, callback: Callback) {
        let token = FrameToken(self.next_token());
        self.pending_frames.push((token, FrameAction::Invoke(callback)));
        self.host.request_frame(token);
    }

    fn next_token(&mut self) -> u64 {
        self.token_counter += 1;
        self.token_counter
    }
}

fn non_empty(name: &'static str, value: String) -> Result<String, PanelError> {
    if value.trim().is_empty() {
        return Err(PanelError::InvalidConfig(format!("{name} is empty")));
    }
    Ok(value)
}

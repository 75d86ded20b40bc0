//! Shared test fixtures: a recording fake host with a manual clock and
//! explicit frame/transition queues, so tests control exactly when each
//! deferred step runs.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use slidepanel::{
    ElementId, ElementRef, FrameToken, GestureMsg, PanelConfig, PanelController, PanelEvent,
    PanelHost, TransitionToken,
};

/// The container element every test binds.
pub const CONTAINER: ElementId = ElementId(1);
/// Default master: the container itself.
pub const MASTER: ElementId = ElementId(1);
/// Default slave: previous sibling of the master.
pub const SLAVE: ElementId = ElementId(101);

/// Slave width used unless a test overrides it, so `max_offset` is 200
/// and the midpoint is 100.
pub const SLAVE_WIDTH: f64 = 200.0;

/// One observed host effect, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Offset(ElementId, Option<f64>),
    Transition {
        el: ElementId,
        duration: u64,
        easing: String,
        completion: bool,
    },
    ClearTransition(ElementId),
    BindHandle {
        container: ElementId,
        handle: String,
        drag: bool,
    },
    Emit(ElementId, PanelEvent),
}

#[derive(Default)]
pub struct HostState {
    pub now: Duration,
    pub widths: HashMap<ElementId, f64>,
    pub calls: Vec<HostCall>,
    pub frames: VecDeque<FrameToken>,
    pub transitions: VecDeque<TransitionToken>,
    /// References `resolve` pretends not to find.
    pub unresolvable: Vec<ElementRef>,
}

/// Recording host. Clones share state, so a test keeps one handle while
/// the controller owns the other.
#[derive(Clone)]
pub struct FakeHost {
    pub state: Rc<RefCell<HostState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState::default())),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.state.borrow_mut().now += Duration::from_millis(ms);
    }

    pub fn set_width(&self, el: ElementId, width: f64) {
        self.state.borrow_mut().widths.insert(el, width);
    }

    pub fn fail_resolve(&self, reference: ElementRef) {
        self.state.borrow_mut().unresolvable.push(reference);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    /// Emitted lifecycle events, in order.
    pub fn events(&self) -> Vec<PanelEvent> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Emit(_, event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// Offsets applied to `el`, in order.
    pub fn offsets(&self, el: ElementId) -> Vec<Option<f64>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Offset(target, x) if *target == el => Some(*x),
                _ => None,
            })
            .collect()
    }

    /// Transitions begun on `el`, as `(duration, easing)` pairs.
    pub fn transitions_on(&self, el: ElementId) -> Vec<(u64, String)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Transition {
                    el: target,
                    duration,
                    easing,
                    ..
                } if *target == el => Some((*duration, easing.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }
}

impl PanelHost for FakeHost {
    fn now(&self) -> Duration {
        self.state.borrow().now
    }

    fn measure_width(&self, el: ElementId) -> f64 {
        self.state
            .borrow()
            .widths
            .get(&el)
            .copied()
            .unwrap_or(SLAVE_WIDTH)
    }

    fn set_offset(&mut self, el: ElementId, x: Option<f64>) {
        self.state.borrow_mut().calls.push(HostCall::Offset(el, x));
    }

    fn begin_transition(
        &mut self,
        el: ElementId,
        duration_ms: u64,
        easing: &str,
        completion: Option<TransitionToken>,
    ) {
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::Transition {
            el,
            duration: duration_ms,
            easing: easing.to_string(),
            completion: completion.is_some(),
        });
        if let Some(token) = completion {
            state.transitions.push_back(token);
        }
    }

    fn clear_transition(&mut self, el: ElementId) {
        self.state
            .borrow_mut()
            .calls
            .push(HostCall::ClearTransition(el));
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.state.borrow_mut().frames.push_back(token);
    }

    fn bind_handle(&mut self, container: ElementId, handle: &str, drag: bool) {
        self.state.borrow_mut().calls.push(HostCall::BindHandle {
            container,
            handle: handle.to_string(),
            drag,
        });
    }

    fn resolve(&self, base: ElementId, target: &ElementRef) -> Option<ElementId> {
        if self.state.borrow().unresolvable.contains(target) {
            return None;
        }
        // Synthetic layout mirroring a container with siblings.
        match target {
            ElementRef::Container => Some(base),
            ElementRef::Prev => Some(ElementId(base.0 + 100)),
            ElementRef::Next => Some(ElementId(base.0 + 110)),
            ElementRef::Selector(_) => Some(ElementId(base.0 + 200)),
        }
    }

    fn emit(&mut self, el: ElementId, event: PanelEvent) {
        self.state
            .borrow_mut()
            .calls
            .push(HostCall::Emit(el, event));
    }
}

/// Deliver every queued deferral frame.
pub fn pump_frames(panel: &mut PanelController<FakeHost>, host: &FakeHost) {
    loop {
        let token = host.state.borrow_mut().frames.pop_front();
        match token {
            Some(token) => panel.notify_frame(token),
            None => break,
        }
    }
}

/// Deliver every queued transition completion.
pub fn complete_transitions(panel: &mut PanelController<FakeHost>, host: &FakeHost) {
    loop {
        let token = host.state.borrow_mut().transitions.pop_front();
        match token {
            Some(token) => panel.notify_transition_end(token),
            None => break,
        }
    }
}

/// Counting completion callback, for asserting exactly-once delivery.
pub fn counter() -> (Rc<Cell<usize>>, Box<dyn FnOnce()>) {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    (count, Box::new(move || inner.set(inner.get() + 1)))
}

/// Opt-in tracing for test debugging: `RUST_LOG=gesture=debug cargo test`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn panel_with(config: PanelConfig) -> (PanelController<FakeHost>, FakeHost) {
    init_tracing();
    let host = FakeHost::new();
    let panel =
        PanelController::new(host.clone(), CONTAINER, config).expect("controller setup failed");
    (panel, host)
}

pub fn default_panel() -> (PanelController<FakeHost>, FakeHost) {
    panel_with(PanelConfig::default())
}

/// Run a full drag: move-start, the given steps (advancing the clock by
/// `step_ms` between moves), then move-end.
pub fn drag(
    panel: &mut PanelController<FakeHost>,
    host: &FakeHost,
    steps: &[(f64, f64)],
    step_ms: u64,
) {
    panel
        .handle_gesture(GestureMsg::MoveStart { item: None })
        .expect("move start");
    for (dx, dy) in steps {
        panel
            .handle_gesture(GestureMsg::Move { dx: *dx, dy: *dy })
            .expect("move");
        host.advance(step_ms);
    }
    panel.handle_gesture(GestureMsg::MoveEnd).expect("move end");
}

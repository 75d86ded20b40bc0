//! Headless panel simulator.
//!
//! Drives a `PanelController` against an in-memory host with a virtual
//! clock and prints the resulting effect stream, which makes the
//! gesture/transition sequencing observable without a real UI. Useful
//! for eyeballing a configuration profile:
//!
//! ```text
//! simulate --config profile.yaml --scenario swipe
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slidepanel::{
    ElementId, ElementRef, FrameToken, GestureMsg, PanelConfig, PanelController, PanelEvent,
    PanelHost, TransitionToken,
};

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Run a scripted gesture scenario against a panel")]
struct Args {
    /// YAML configuration profile; defaults apply when omitted.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Scripted scenario to run.
    #[arg(long, value_enum, default_value = "swipe")]
    scenario: Scenario,

    /// Simulated slave panel width in pixels.
    #[arg(long, default_value_t = 320.0)]
    width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Fast flick past the swipe thresholds.
    Swipe,
    /// Long deliberate drag, settles by midpoint.
    SlowDrag,
    /// Tap the handle twice.
    Tap,
    /// Programmatic hide then show with callbacks.
    Toggle,
}

#[derive(Default)]
struct SimShared {
    now: Duration,
    widths: HashMap<ElementId, f64>,
    default_width: f64,
    frames: VecDeque<FrameToken>,
    transitions: VecDeque<(TransitionToken, Duration)>,
    events: Vec<(ElementId, PanelEvent)>,
}

/// In-memory host: effects print as they happen, frames and transition
/// completions queue until the driver pumps them.
#[derive(Clone)]
struct SimHost {
    shared: Rc<RefCell<SimShared>>,
}

impl SimHost {
    fn new(default_width: f64) -> Self {
        Self {
            shared: Rc::new(RefCell::new(SimShared {
                default_width,
                ..SimShared::default()
            })),
        }
    }
}

impl PanelHost for SimHost {
    fn now(&self) -> Duration {
        self.shared.borrow().now
    }

    fn measure_width(&self, el: ElementId) -> f64 {
        let shared = self.shared.borrow();
        shared.widths.get(&el).copied().unwrap_or(shared.default_width)
    }

    fn set_offset(&mut self, el: ElementId, x: Option<f64>) {
        match x {
            Some(x) => println!("  [{:>6}ms] offset    {el:?} -> {x}px", self.millis()),
            None => println!("  [{:>6}ms] offset    {el:?} cleared", self.millis()),
        }
    }

    fn begin_transition(
        &mut self,
        el: ElementId,
        duration_ms: u64,
        easing: &str,
        completion: Option<TransitionToken>,
    ) {
        println!(
            "  [{:>6}ms] transit   {el:?} over {duration_ms}ms, easing {easing}",
            self.millis()
        );
        if let Some(token) = completion {
            let mut shared = self.shared.borrow_mut();
            let due = shared.now + Duration::from_millis(duration_ms);
            shared.transitions.push_back((token, due));
        }
    }

    fn clear_transition(&mut self, el: ElementId) {
        println!("  [{:>6}ms] transit   {el:?} cleared", self.millis());
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.shared.borrow_mut().frames.push_back(token);
    }

    fn bind_handle(&mut self, container: ElementId, handle: &str, drag: bool) {
        println!("  [{:>6}ms] handle    {handle:?} in {container:?}, drag={drag}", self.millis());
    }

    fn resolve(&self, base: ElementId, target: &ElementRef) -> Option<ElementId> {
        // Synthetic layout: siblings and selector hits get derived ids.
        match target {
            ElementRef::Container => Some(base),
            ElementRef::Prev => Some(ElementId(base.0 + 100)),
            ElementRef::Next => Some(ElementId(base.0 + 101)),
            ElementRef::Selector(_) => Some(ElementId(base.0 + 200)),
        }
    }

    fn emit(&mut self, el: ElementId, event: PanelEvent) {
        println!("  [{:>6}ms] event     {event} on {el:?}", self.millis());
        self.shared.borrow_mut().events.push((el, event));
    }
}

impl SimHost {
    fn millis(&self) -> u128 {
        self.shared.borrow().now.as_millis()
    }
}

struct Driver {
    panel: PanelController<SimHost>,
    shared: Rc<RefCell<SimShared>>,
}

impl Driver {
    /// Deliver every queued frame and every transition completion that
    /// has come due.
    fn pump(&mut self) {
        loop {
            let frame = self.shared.borrow_mut().frames.pop_front();
            if let Some(token) = frame {
                self.panel.notify_frame(token);
                continue;
            }
            let now = self.shared.borrow().now;
            let due = {
                let mut shared = self.shared.borrow_mut();
                let ready = matches!(shared.transitions.front(), Some((_, at)) if *at <= now);
                if ready {
                    shared.transitions.pop_front()
                } else {
                    None
                }
            };
            match due {
                Some((token, _)) => self.panel.notify_transition_end(token),
                None => break,
            }
        }
    }

    /// Advance the virtual clock, pumping as completions come due.
    fn advance(&mut self, ms: u64) {
        self.shared.borrow_mut().now += Duration::from_millis(ms);
        self.pump();
    }

    fn gesture(&mut self, msg: GestureMsg) -> Result<()> {
        self.panel.handle_gesture(msg)?;
        self.pump();
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PanelConfig::from_yaml(&source)?
        }
        None => PanelConfig::default(),
    };
    info!(scenario = ?args.scenario, width = args.width, "starting simulation");

    let host = SimHost::new(args.width);
    let shared = Rc::clone(&host.shared);
    let container = ElementId(1);
    let panel = PanelController::new(host, container, config)?;
    let mut driver = Driver { panel, shared };
    driver.pump();

    match args.scenario {
        Scenario::Swipe => {
            println!("swipe toward hidden:");
            driver.gesture(GestureMsg::MoveStart { item: None })?;
            for _ in 0..5 {
                driver.gesture(GestureMsg::Move { dx: 8.0, dy: 0.5 })?;
                driver.advance(20);
            }
            driver.gesture(GestureMsg::MoveEnd)?;
            driver.advance(1000);
        }
        Scenario::SlowDrag => {
            println!("slow drag past midpoint:");
            driver.gesture(GestureMsg::MoveStart { item: None })?;
            for _ in 0..30 {
                driver.gesture(GestureMsg::Move { dx: 7.0, dy: 0.0 })?;
                driver.advance(60);
            }
            driver.gesture(GestureMsg::MoveEnd)?;
            driver.advance(1000);
        }
        Scenario::Tap => {
            println!("tap to hide:");
            driver.gesture(GestureMsg::TapRelease { item: None })?;
            driver.advance(1000);
            println!("tap to show:");
            driver.gesture(GestureMsg::TapRelease { item: None })?;
            driver.advance(1000);
        }
        Scenario::Toggle => {
            println!("programmatic hide:");
            driver.panel.hide(None, Some(Box::new(|| println!("  hide callback"))))?;
            driver.pump();
            driver.advance(1000);
            println!("programmatic show:");
            driver.panel.show(None, Some(Box::new(|| println!("  show callback"))))?;
            driver.pump();
            driver.advance(1000);
        }
    }

    let events = driver.shared.borrow().events.len();
    println!(
        "final: hidden={} position={}px events={events}",
        driver.panel.is_hidden(),
        driver.panel.position(),
    );
    Ok(())
}

//! Sliding panel state machine.
//!
//! A master panel slides horizontally to reveal a slave panel beneath
//! it, driven by drags, swipes, taps, and a programmatic show/hide API.
//! The crate owns all sequencing decisions (gesture classification,
//! clamping, transition lifecycle, event ordering) and delegates every
//! environment effect to a [`PanelHost`] implementation, so the same
//! controller runs against a browser DOM bridge, a native scene graph,
//! or a test fake.
//!
//! ```no_run
//! use slidepanel::{ElementId, PanelConfig, PanelController, PanelHost};
//!
//! fn open_menu<H: PanelHost>(host: H) -> Result<(), slidepanel::PanelError> {
//!     let mut panel = PanelController::new(host, ElementId(1), PanelConfig::default())?;
//!     panel.hide(None, Some(Box::new(|| println!("menu revealed"))))?;
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gesture;
pub mod messages;
pub mod model;

pub use adapter::{ElementId, ElementSet, FrameToken, PanelHost, TransitionToken};
pub use config::{EasingKind, ElementRef, HideDirection, PanelConfig, PanelOption};
pub use controller::{Callback, PanelController};
pub use error::PanelError;
pub use events::PanelEvent;
pub use messages::GestureMsg;
pub use model::PanelState;

//! Panel configuration.
//!
//! `PanelConfig` is an immutable-by-convention struct built once at
//! construction and validated eagerly, so a bad selector fails at setup
//! rather than at first gesture. Profiles can be loaded from YAML; every
//! field has a serde default.

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Direction a swipe or drag moves the master panel to hide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HideDirection {
    Right,
    Left,
}

impl HideDirection {
    /// Sign applied to the measured slave width when caching the maximum
    /// offset.
    pub fn sign(self) -> f64 {
        match self {
            HideDirection::Right => 1.0,
            HideDirection::Left => -1.0,
        }
    }
}

/// Reference to a host-side element, resolved through
/// [`PanelHost::resolve`](crate::adapter::PanelHost::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRef {
    /// The bound container itself.
    Container,
    /// Previous sibling of the master element.
    Prev,
    /// Next sibling of the master element.
    Next,
    /// A selector scoped to the bound container.
    #[serde(untagged)]
    Selector(String),
}

/// Which configured easing curve a transition uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingKind {
    /// Programmatic `show`/`hide`.
    Default,
    /// Settling after a slow drag.
    AfterDrag,
    /// Settling after a swipe, and tap toggles.
    AfterSwipe,
}

/// Controller configuration. See the field defaults for the recognized
/// option surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Transition duration in milliseconds.
    #[serde(default = "default_duration")]
    pub duration: u64,

    /// Named easing curve for programmatic transitions.
    #[serde(default = "default_easing")]
    pub easing: String,

    /// Easing used when a slow drag settles.
    #[serde(default = "default_easing_after_drag")]
    pub easing_after_drag: String,

    /// Easing used when a swipe settles, and for tap toggles.
    #[serde(default = "default_easing_after_swipe")]
    pub easing_after_swipe: String,

    /// A drag faster than this (ms) with enough distance is a swipe.
    #[serde(default = "default_swipe_duration_threshold")]
    pub swipe_duration_threshold: u64,

    /// Minimum accumulated horizontal distance (px) for a swipe.
    #[serde(default = "default_swipe_distance_threshold")]
    pub swipe_distance_threshold: f64,

    /// Selector for the drag/swipe handle region.
    #[serde(default = "default_handle")]
    pub handle: String,

    /// The master panel.
    #[serde(default = "default_master")]
    pub master: ElementRef,

    /// The slave panel, revealed when the master hides.
    #[serde(default = "default_slave")]
    pub slave: ElementRef,

    /// Start in the hidden resting state.
    #[serde(default)]
    pub hidden: bool,

    /// Direction that hides the master.
    #[serde(default = "default_hide_direction")]
    pub hide_direction: HideDirection,

    /// Shift the slave by a bounded disposition while the master moves.
    #[serde(default = "default_true")]
    pub slave_animation: bool,

    /// Maximum slave shift in pixels.
    #[serde(default = "default_slave_disposition")]
    pub slave_disposition: f64,

    /// Resolve the element pair from the gestured item instead of once
    /// at initialization (delegated mode).
    #[serde(default)]
    pub dynamic: bool,

    /// Allow dragging. When false only tap toggles work.
    #[serde(default = "default_true")]
    pub drag: bool,

    /// Let a new `show`/`hide` cancel an in-flight transition instead of
    /// being rejected.
    #[serde(default)]
    pub skip_previous_animation: bool,
}

fn default_duration() -> u64 {
    500
}

fn default_easing() -> String {
    "cubic-bezier(0.190, 1.000, 0.220, 1.000)".to_string()
}

fn default_easing_after_drag() -> String {
    "ease-out".to_string()
}

fn default_easing_after_swipe() -> String {
    "cubic-bezier(0.175, 0.885, 0.320, 1.275)".to_string()
}

fn default_swipe_duration_threshold() -> u64 {
    1000
}

fn default_swipe_distance_threshold() -> f64 {
    5.0
}

fn default_handle() -> String {
    ".panel-handle".to_string()
}

fn default_master() -> ElementRef {
    ElementRef::Container
}

fn default_slave() -> ElementRef {
    ElementRef::Prev
}

fn default_hide_direction() -> HideDirection {
    HideDirection::Right
}

fn default_slave_disposition() -> f64 {
    100.0
}

fn default_true() -> bool {
    true
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            easing: default_easing(),
            easing_after_drag: default_easing_after_drag(),
            easing_after_swipe: default_easing_after_swipe(),
            swipe_duration_threshold: default_swipe_duration_threshold(),
            swipe_distance_threshold: default_swipe_distance_threshold(),
            handle: default_handle(),
            master: default_master(),
            slave: default_slave(),
            hidden: false,
            hide_direction: default_hide_direction(),
            slave_animation: true,
            slave_disposition: default_slave_disposition(),
            dynamic: false,
            drag: true,
            skip_previous_animation: false,
        }
    }
}

impl PanelConfig {
    /// Parse a YAML profile and validate it.
    pub fn from_yaml(source: &str) -> Result<Self, PanelError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Eager validation, run at construction and after option changes.
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.handle.trim().is_empty() {
            return Err(PanelError::InvalidConfig("handle selector is empty".into()));
        }
        for (name, easing) in [
            ("easing", &self.easing),
            ("easing_after_drag", &self.easing_after_drag),
            ("easing_after_swipe", &self.easing_after_swipe),
        ] {
            if easing.trim().is_empty() {
                return Err(PanelError::InvalidConfig(format!("{name} is empty")));
            }
        }
        if self.swipe_duration_threshold == 0 {
            return Err(PanelError::InvalidConfig(
                "swipe_duration_threshold must be positive".into(),
            ));
        }
        if self.swipe_distance_threshold <= 0.0 {
            return Err(PanelError::InvalidConfig(
                "swipe_distance_threshold must be positive".into(),
            ));
        }
        if self.slave_disposition < 0.0 {
            return Err(PanelError::InvalidConfig(
                "slave_disposition must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// The easing curve for a transition of the given kind.
    pub fn easing_for(&self, kind: EasingKind) -> &str {
        match kind {
            EasingKind::Default => &self.easing,
            EasingKind::AfterDrag => &self.easing_after_drag,
            EasingKind::AfterSwipe => &self.easing_after_swipe,
        }
    }
}

/// One recognized configuration update, applied through
/// [`PanelController::set_option`](crate::controller::PanelController::set_option).
///
/// An explicit tagged union instead of name-string dispatch: every
/// settable option is a variant, and dependent recomputation (element
/// re-resolution, offset re-measurement) happens in the one place that
/// applies it.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOption {
    Duration(u64),
    Easing(String),
    EasingAfterDrag(String),
    EasingAfterSwipe(String),
    SwipeDurationThreshold(u64),
    SwipeDistanceThreshold(f64),
    Hidden(bool),
    HideDirection(HideDirection),
    Master(ElementRef),
    Slave(ElementRef),
    SlaveAnimation(bool),
    SlaveDisposition(f64),
    Drag(bool),
    SkipPreviousAnimation(bool),
}

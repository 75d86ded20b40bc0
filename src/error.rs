//! Error types.
//!
//! The error surface is deliberately small: misconfiguration is fatal at
//! setup or option-change time, and a programmatic call in dynamic mode
//! can find no bound element pair. A rejected `show`/`hide` is not an
//! error (the callback still runs), and a missing transition-completion
//! signal is covered by the host's fallback timeout.

use thiserror::Error;

use crate::config::ElementRef;

#[derive(Debug, Error)]
pub enum PanelError {
    /// The configured master or slave reference matched nothing.
    #[error("cannot resolve {role} element from {reference:?}")]
    UnresolvableElement {
        role: &'static str,
        reference: ElementRef,
    },

    /// Programmatic call in dynamic mode before any gesture bound an item.
    #[error("no element pair bound; in dynamic mode a gesture must bind an item first")]
    ElementsUnbound,

    /// Eager configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration profile could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

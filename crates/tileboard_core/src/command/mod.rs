//! UI event to store-call translation.
//!
//! # Responsibility
//! - Resolve addressing metadata (action, kind/column, entity id) from the
//!   element chain an event bubbled through.
//! - Dispatch exactly one store mutation per handled event.
//!
//! # Invariants
//! - Handlers never touch the visual tree; effects flow store -> view.
//! - Unresolvable or invalid input is ignored, never an error.

pub mod board;
pub mod gallery;

use crate::model::ValidationError;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Data attributes of one element on the event path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMeta {
    attributes: BTreeMap<String, String>,
}

impl ElementMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Elements from the event target up to the container, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPath {
    elements: Vec<ElementMeta>,
}

impl EventPath {
    pub fn new(elements: Vec<ElementMeta>) -> Self {
        Self { elements }
    }

    /// Adds the next outer ancestor.
    pub fn then(mut self, element: ElementMeta) -> Self {
        self.elements.push(element);
        self
    }

    /// Value of `name` on the nearest element carrying it.
    pub fn closest(&self, name: &str) -> Option<&str> {
        self.elements.iter().find_map(|element| element.get(name))
    }
}

/// Why an event produced no store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No element on the path carries the attribute.
    MissingAttribute(&'static str),
    UnknownAction(String),
    Invalid(ValidationError),
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAttribute(name) => write!(f, "missing attribute `{name}`"),
            Self::UnknownAction(action) => write!(f, "unknown action `{action}`"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

/// Result of handling one UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The store committed a new snapshot.
    Applied,
    /// The store was called but nothing changed.
    Unchanged,
    Ignored(IgnoreReason),
}

impl Display for CommandOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Ignored(reason) => write!(f, "ignored: {reason}"),
        }
    }
}

impl CommandOutcome {
    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }

    pub(crate) fn ignored(reason: IgnoreReason) -> Self {
        log::debug!("event=ui_command module=command status=ignored reason={reason}");
        Self::Ignored(reason)
    }
}

use serde::{Deserialize, Serialize};

use crate::host::{ElementId, EventKind};
use crate::Millis;

/// Keys the coordinator reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Events delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
    Scroll,
    Resize,
    Click { target: ElementId },
    MouseEnter { target: ElementId },
    MouseLeave { target: ElementId },
    KeyDown { key: Key },
    Submit { form: ElementId },
    /// Animation frame with its timestamp
    Frame { timestamp: Millis },
    /// Uncaught synchronous error
    ScriptError { message: String },
    /// Rejected asynchronous operation nobody handled
    UnhandledRejection { reason: String },
}

impl PageEvent {
    /// Listener kind this event is delivered to; frames need no listener
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Scroll => Some(EventKind::Scroll),
            Self::Resize => Some(EventKind::Resize),
            Self::Click { .. } => Some(EventKind::Click),
            Self::MouseEnter { .. } => Some(EventKind::MouseEnter),
            Self::MouseLeave { .. } => Some(EventKind::MouseLeave),
            Self::KeyDown { .. } => Some(EventKind::KeyDown),
            Self::Submit { .. } => Some(EventKind::Submit),
            Self::ScriptError { .. } => Some(EventKind::Error),
            Self::UnhandledRejection { .. } => Some(EventKind::UnhandledRejection),
            Self::Frame { .. } => None,
        }
    }
}

/// What the host should do with the event after dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn prevent_default() -> Self {
        Self {
            default_prevented: true,
        }
    }
}

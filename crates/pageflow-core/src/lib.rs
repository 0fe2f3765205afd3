pub mod config;
pub mod coordinator;
pub mod enhance;
pub mod error;
pub mod event;
pub mod host;
pub mod limiter;
pub mod nav;
pub mod scheduler;
pub mod scroll;
pub mod selector;
pub mod tracker;
pub mod viewport;

#[cfg(test)]
mod testing;

/// Milliseconds since the page session started.
pub type Millis = u64;

pub use config::{EasingType, EnhanceConfig, RevealConfig, ScrollConfig};
pub use coordinator::{CoordinatorSnapshot, PageCoordinator};
pub use error::{Error, Result};
pub use event::{EventOutcome, Key, PageEvent};
pub use host::{ElementId, EventKind, EventTarget, HeadNode, Host, PreloadKind, StyleProp};
pub use selector::Selector;
pub use viewport::{Rect, Viewport};

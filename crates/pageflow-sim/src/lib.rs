//! In-memory page host for driving a `PageCoordinator` without a browser.
//!
//! [`SimHost`] implements the host capabilities over a flat element arena
//! with fixed layout boxes. [`SimPage`] owns a host, a coordinator and a
//! virtual clock, and turns user actions into dispatched events. Scenarios
//! describe a page and a timed list of actions in TOML.

pub mod dom;
pub mod error;
pub mod host;
pub mod page;
pub mod scenario;

pub use dom::{ElementSpec, Layout, SimDocument};
pub use error::{Result, SimError};
pub use host::{Change, Mutation, SimHost};
pub use page::{Dispatched, SimPage, FRAME_INTERVAL_MS};
pub use scenario::{Action, Replay, ReplayReport, Scenario, Step};

//! Page enhancements outside the scroll pipeline.
//!
//! Each enhancer queries its elements once at attach time and exposes
//! handlers the coordinator calls when the matching event arrives. Work that
//! must happen later is returned to the coordinator for scheduling.

pub mod a11y;
pub mod forms;
pub mod hover;
pub mod images;
pub mod links;
pub mod mobile;
pub mod report;
pub mod theme;

pub use a11y::KeyboardNav;
pub use forms::{FormReport, FormValidator};
pub use hover::HoverEffects;
pub use images::LazyImages;
pub use links::{InternalLinks, LinkAction};
pub use mobile::MobileNav;
pub use report::ErrorReporter;

//! Smooth scrolling to in-page targets.
//!
//! # Layers
//!
//! - `easing` - pure easing curves over normalized progress
//! - `timing` - progress and interpolation helpers over frame timestamps
//! - `animation` - the frame-driven animator owning one scroll session
//!
//! # Usage
//!
//! ```ignore
//! let mut scroller = SmoothScroller::new(config.scroll.clone());
//!
//! // On click: resolve the target's document top and start a session
//! scroller.scroll_to(host, target_top, config.scroll.offset_px);
//!
//! // On every PageEvent::Frame(timestamp) delivered by the host
//! scroller.on_frame(host, timestamp);
//! ```

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::{AnimationSession, SmoothScroller};
pub use easing::{ease_in_out_quad, EasingTypeExt};

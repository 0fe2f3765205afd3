//! Viewport containment and intersection tests.
//!
//! Both functions are pure: they take the layout as it is right now and cache
//! nothing, so callers re-query the host on every tick.

use serde::{Deserialize, Serialize};

/// Bounding box relative to the viewport, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Visible window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// True iff the box lies entirely inside the viewport.
///
/// Partially visible boxes are rejected.
#[inline]
pub fn is_in_viewport(rect: &Rect, viewport: &Viewport) -> bool {
    rect.top >= 0.0
        && rect.left >= 0.0
        && rect.bottom <= viewport.height
        && rect.right <= viewport.width
}

/// True if any part of the box overlaps the viewport
#[inline]
pub fn intersects(rect: &Rect, viewport: &Viewport) -> bool {
    rect.bottom > 0.0 && rect.right > 0.0 && rect.top < viewport.height && rect.left < viewport.width
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    #[test]
    fn test_negative_top_is_outside() {
        let rect = Rect::new(-1.0, 0.0, 100.0, 100.0);
        assert!(!is_in_viewport(&rect, &VIEW));
    }

    #[test]
    fn test_exact_viewport_box_is_inside() {
        let rect = Rect::new(0.0, 0.0, VIEW.height, VIEW.width);
        assert!(is_in_viewport(&rect, &VIEW));
    }

    #[test]
    fn test_partial_visibility_is_not_containment() {
        let rect = Rect::new(700.0, 10.0, 800.0, 200.0);
        assert!(!is_in_viewport(&rect, &VIEW));
        assert!(intersects(&rect, &VIEW));
    }

    #[test]
    fn test_intersects_rejects_touching_edges() {
        let below = Rect::new(VIEW.height, 0.0, VIEW.height + 50.0, 100.0);
        let above = Rect::new(-50.0, 0.0, 0.0, 100.0);
        assert!(!intersects(&below, &VIEW));
        assert!(!intersects(&above, &VIEW));
    }
}

//! Easing curves for scroll animation.
//!
//! `EasingTypeExt::apply` works on normalized progress. The quadratic
//! in-out curve is also exposed in its elapsed/start/change/duration form
//! because the page script samples it that way.

pub use crate::config::EasingType;

pub trait EasingTypeExt {
    /// Map progress `t` (clamped to [0, 1]) onto the curve
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => step_end(t),
            EasingType::Linear => t,
            EasingType::Cubic => ease_out_pow(t, 3),
            EasingType::Quintic => ease_out_pow(t, 5),
            EasingType::EaseOut => ease_out_expo(t),
            EasingType::EaseInOutQuad => ease_in_out_quad(t, 0.0, 1.0, 1.0),
        }
    }
}

/// Quadratic ease-in-out.
///
/// `t` is the elapsed time, `b` the start value, `c` the total change and
/// `d` the duration. Reaches `b + c/2` at `d/2` and `b + c` at `d`.
#[inline]
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return b + c;
    }
    let half = t / (d / 2.0);
    if half < 1.0 {
        c / 2.0 * half * half + b
    } else {
        let rest = half - 1.0;
        -c / 2.0 * (rest * (rest - 2.0) - 1.0) + b
    }
}

#[inline]
fn step_end(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        0.0
    }
}

/// 1 - (1 - t)^n
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// 1 - 2^(-10t), pinned to 1 at the end
#[inline]
fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::EaseInOutQuad,
    ];

    #[test]
    fn test_quad_hits_midpoint_and_ends() {
        assert!((ease_in_out_quad(150.0, 0.0, 300.0, 300.0) - 150.0).abs() < 1e-9);
        assert!(ease_in_out_quad(0.0, 0.0, 300.0, 300.0).abs() < 1e-9);
        assert!((ease_in_out_quad(300.0, 0.0, 300.0, 300.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_quad_mirrors_around_midpoint() {
        let d = 300.0;
        for t in (0..=300).step_by(10).map(f64::from) {
            let forward = ease_in_out_quad(t, 0.0, 1.0, d);
            let mirrored = 1.0 - ease_in_out_quad(d - t, 0.0, 1.0, d);
            assert!((forward - mirrored).abs() < 1e-9, "asymmetric at t={t}");
        }
    }

    #[test]
    fn test_quad_scrolling_up() {
        assert!((ease_in_out_quad(150.0, 500.0, -300.0, 300.0) - 350.0).abs() < 1e-9);
        assert!(ease_in_out_quad(50.0, 500.0, -300.0, 300.0) < 500.0);
    }

    #[test]
    fn test_zero_duration_lands_on_target() {
        assert_eq!(ease_in_out_quad(0.0, 10.0, 90.0, 0.0), 100.0);
    }

    #[test]
    fn test_curves_start_at_zero_and_end_at_one() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-3, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-3, "{curve:?} at 1");
        }
        assert_eq!(EasingType::None.apply(0.99), 0.0);
        assert_eq!(EasingType::None.apply(1.0), 1.0);
    }

    #[test]
    fn test_curves_never_go_backwards() {
        for curve in CURVES {
            let samples = (0..=20).map(|i| curve.apply(f64::from(i) / 20.0)).collect::<Vec<_>>();
            assert!(
                samples.windows(2).all(|w| w[1] >= w[0]),
                "{curve:?} is not monotonic"
            );
        }
    }
}

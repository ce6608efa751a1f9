// SPDX-License-Identifier: MIT
//
// WCAG 2.0 contrast ratio between two colors.
//
// Both colors go through 8-bit sRGB first (LAB inputs are rounded to the
// nearest displayable color), then through the WCAG relative luminance
// formula. Note the linearization threshold is WCAG's 0.03928, not the
// 0.04045 used by the sRGB companding in `space`.

use crate::space::{Lab, Rgb};

/// WCAG linearization of one unit-range channel.
#[inline]
fn wcag_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG:
///   L = 0.2126 · `R_lin` + 0.7152 · `G_lin` + 0.0722 · `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let (r, g, b) = rgb.to_unit();
    0.2126f64.mul_add(
        wcag_linear(r),
        0.7152f64.mul_add(wcag_linear(g), 0.0722 * wcag_linear(b)),
    )
}

/// Contrast ratio `(L_lighter + 0.05) / (L_darker + 0.05)`, in [1.0, 21.0].
///
/// The result is the same regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two LAB colors.
#[must_use]
pub fn check_color_contrast(lab1: Lab, lab2: Lab) -> f64 {
    contrast_ratio(lab1.to_rgb(), lab2.to_rgb())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = relative_luminance(Rgb::BLACK);
        assert!(approx_eq(lum, 0.0, 1e-12), "Black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        let lum = relative_luminance(Rgb::WHITE);
        assert!(approx_eq(lum, 1.0, 1e-12), "White luminance: {lum}");
    }

    #[test]
    fn luminance_primaries_match_weights() {
        assert!(approx_eq(relative_luminance(Rgb::new(255, 0, 0)), 0.2126, 1e-12));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 255, 0)), 0.7152, 1e-12));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 0, 255)), 0.0722, 1e-12));
    }

    #[test]
    fn luminance_uses_wcag_threshold() {
        // 10/255 ≈ 0.03922 falls on the linear side of 0.03928.
        let lum = relative_luminance(Rgb::new(10, 10, 10));
        assert!(approx_eq(lum, 10.0 / 255.0 / 12.92, 1e-12), "lum = {lum}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn lab_contrast_black_white() {
        let ratio = check_color_contrast(Lab::new(100.0, 0.0, 0.0), Lab::new(0.0, 0.0, 0.0));
        assert!(approx_eq(ratio, 21.0, 1e-9), "LAB B/W contrast: {ratio}");
    }

    #[test]
    fn lab_contrast_same_color_is_exactly_one() {
        let lab = Lab::new(45.0, 30.0, -12.0);
        assert!((check_color_contrast(lab, lab) - 1.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn contrast_is_symmetric(
            l1 in 0.0..100.0f64, a1 in -100.0..100.0f64, b1 in -100.0..100.0f64,
            l2 in 0.0..100.0f64, a2 in -100.0..100.0f64, b2 in -100.0..100.0f64,
        ) {
            let x = Lab::new(l1, a1, b1);
            let y = Lab::new(l2, a2, b2);
            prop_assert!((check_color_contrast(x, y) - check_color_contrast(y, x)).abs() < 1e-12);
            prop_assert!(check_color_contrast(x, y) >= 1.0);
        }

        #[test]
        fn contrast_with_self_is_one(l in 0.0..100.0f64, a in -100.0..100.0f64, b in -100.0..100.0f64) {
            let x = Lab::new(l, a, b);
            prop_assert!((check_color_contrast(x, x) - 1.0).abs() < 1e-12);
        }
    }
}

// SPDX-License-Identifier: MIT
//
// Color-vision deficiency simulation.
//
// A deliberately simple linear model: the color is taken to 8-bit sRGB, one
// fixed 3×3 matrix is applied to the gamma-encoded channels, the result is
// truncated back to 8 bits and converted to LAB again. Each matrix row sums
// to 1, so white stays white and nothing leaves the [0, 255] range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::space::{Lab, Rgb};

/// The three dichromacies the simulator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deficiency {
    /// Missing L cones (red-blind).
    Protanopia,
    /// Missing M cones (green-blind).
    Deuteranopia,
    /// Missing S cones (blue-blind).
    Tritanopia,
}

impl Deficiency {
    /// Row-major RGB transform.
    #[must_use]
    pub const fn matrix(self) -> [[f64; 3]; 3] {
        match self {
            Self::Protanopia => [
                [0.567, 0.433, 0.0],
                [0.558, 0.442, 0.0],
                [0.0, 0.242, 0.758],
            ],
            Self::Deuteranopia => [
                [0.625, 0.375, 0.0],
                [0.7, 0.3, 0.0],
                [0.0, 0.3, 0.7],
            ],
            Self::Tritanopia => [
                [0.95, 0.05, 0.0],
                [0.0, 0.433, 0.567],
                [0.0, 0.475, 0.525],
            ],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
        }
    }

    /// Parse a deficiency from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .copied()
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Protanopia, Self::Deuteranopia, Self::Tritanopia]
    }

    /// Apply this deficiency's matrix to an 8-bit color.
    #[must_use]
    pub fn apply(self, rgb: Rgb) -> Rgb {
        let [r0, r1, r2] = self.matrix();
        let (r, g, b) = (f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b));
        let row = |m: [f64; 3]| truncate_u8(m[2].mul_add(b, m[0].mul_add(r, m[1] * g)));
        Rgb::new(row(r0), row(r1), row(r2))
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Simulate how `lab` looks to someone with the given deficiency.
#[must_use]
pub fn simulate(lab: Lab, kind: Deficiency) -> Lab {
    kind.apply(lab.to_rgb()).to_lab()
}

/// Name-based variant of [`simulate`]. An unknown `kind` is a no-op and
/// returns `lab` unchanged.
#[must_use]
pub fn simulate_color_blindness(lab: Lab, kind: &str) -> Lab {
    Deficiency::from_name(kind).map_or(lab, |kind| simulate(lab, kind))
}

/// Truncate toward zero into a u8.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_sum_to_one() {
        for kind in Deficiency::all() {
            for row in kind.matrix() {
                let sum: f64 = row.iter().sum();
                assert!((sum - 1.0).abs() < 1e-12, "{kind}: row sums to {sum}");
            }
        }
    }

    #[test]
    fn unknown_kind_is_identity() {
        let lab = Lab::new(42.0, 17.5, -3.25);
        assert_eq!(simulate_color_blindness(lab, "achromatopsia"), lab);
        assert_eq!(simulate_color_blindness(lab, ""), lab);
    }

    #[test]
    fn names_roundtrip_case_insensitively() {
        for kind in Deficiency::all() {
            assert_eq!(Deficiency::from_name(kind.name()), Some(*kind));
            assert_eq!(Deficiency::from_name(&kind.name().to_uppercase()), Some(*kind));
        }
    }

    #[test]
    fn deuteranopia_merges_red_and_green() {
        let red = Deficiency::Deuteranopia.apply(Rgb::new(255, 0, 0));
        assert_eq!(red, Rgb::new(159, 178, 0));
        let green = Deficiency::Deuteranopia.apply(Rgb::new(0, 255, 0));
        assert_eq!(green, Rgb::new(95, 76, 76));
    }

    #[test]
    fn tritanopia_apply_truncates() {
        // r = 95.95 + 1.65, g = 14.289 + 3.969, b = 15.675 + 3.675
        let out = Deficiency::Tritanopia.apply(Rgb::new(101, 33, 7));
        assert_eq!(out, Rgb::new(97, 18, 19));
    }

    #[test]
    fn gray_is_unaffected() {
        let gray = Lab::new(53.585, 0.0, 0.0);
        let rgb = gray.to_rgb();
        for kind in Deficiency::all() {
            let out = kind.apply(rgb);
            // Rows sum to one, so a neutral stays neutral up to truncation.
            assert!(out.r.abs_diff(rgb.r) <= 1, "{kind}: {out}");
            assert!(out.g.abs_diff(rgb.g) <= 1, "{kind}: {out}");
            assert!(out.b.abs_diff(rgb.b) <= 1, "{kind}: {out}");
        }
    }

    #[test]
    fn simulate_returns_lab_of_transformed_rgb() {
        let lab = Rgb::new(200, 40, 90).to_lab();
        let expected = Deficiency::Protanopia.apply(lab.to_rgb()).to_lab();
        assert_eq!(simulate_color_blindness(lab, "protanopia"), expected);
    }
}

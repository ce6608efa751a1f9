// SPDX-License-Identifier: MIT
//
// Hue-rotation palettes in LAB space.
//
// Every palette keeps the source color's lightness and chroma and only moves
// its hue angle around the a–b plane. The generated points are plain LAB
// values; they may fall outside the sRGB gamut and are clipped only when
// converted for display.

use std::fmt;

use crate::space::Lab;

/// Total angular spread of an analogous palette, in degrees.
pub const ANALOGOUS_SPREAD: f64 = 30.0;

/// The harmony used to derive a palette from one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    /// `n` hues spread across 30° centered on the source.
    Analogous,
    /// Source plus the opposite hue.
    Complementary,
    /// Three hues 120° apart.
    Triadic,
}

impl PaletteKind {
    /// Generate a palette from `base`. `count` only matters for
    /// [`PaletteKind::Analogous`]; the other kinds have a fixed size.
    #[must_use]
    pub fn generate(self, base: Lab, count: usize) -> Vec<Lab> {
        match self {
            Self::Analogous => analogous_palette(base, count),
            Self::Complementary => complementary_palette(base).to_vec(),
            Self::Triadic => triadic_palette(base).to_vec(),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
        }
    }

    /// Parse a palette kind from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|k| k.name() == lower).copied()
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Analogous, Self::Complementary, Self::Triadic]
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `n` colors at the source's lightness and chroma, hues stepping by
/// `30 / (n − 1)` degrees. Offsets run from `−⌊n/2⌋` to `n − 1 − ⌊n/2⌋`
/// steps, so the source hue sits in the middle (for odd `n`) or just right
/// of it (for even `n`).
///
/// The step is undefined for `n < 2`: `n == 0` yields an empty palette and
/// `n == 1` yields the source color alone.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn analogous_palette(base: Lab, n: usize) -> Vec<Lab> {
    match n {
        0 => return Vec::new(),
        1 => return vec![base],
        _ => {}
    }

    let hue = base.hue_angle();
    let chroma = base.chroma();
    let step = ANALOGOUS_SPREAD / (n - 1) as f64;
    let half = (n / 2) as i64;

    (0..n as i64)
        .map(|i| {
            let angle = ((i - half) as f64).mul_add(step, hue);
            Lab::from_lch(base.l, chroma, angle.rem_euclid(360.0))
        })
        .collect()
}

/// The source color and its opposite (hue + 180°).
#[must_use]
pub fn complementary_palette(base: Lab) -> [Lab; 2] {
    let opposite = rotate(base, 180.0);
    [base, opposite]
}

/// Three colors at hue, hue + 120° and hue + 240°.
#[must_use]
pub fn triadic_palette(base: Lab) -> [Lab; 3] {
    [rotate(base, 0.0), rotate(base, 120.0), rotate(base, 240.0)]
}

fn rotate(base: Lab, degrees: f64) -> Lab {
    let angle = (base.hue_angle() + degrees).rem_euclid(360.0);
    Lab::from_lch(base.l, base.chroma(), angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    /// Smallest signed difference `to − from` on the hue circle.
    fn hue_delta(from: f64, to: f64) -> f64 {
        let d = (to - from).rem_euclid(360.0);
        if d > 180.0 { d - 360.0 } else { d }
    }

    const ORANGE: Lab = Lab::new(65.0, 40.0, 55.0);

    // ── Analogous ───────────────────────────────────────────────────

    #[test]
    fn analogous_five_shares_lightness_and_chroma() {
        let palette = analogous_palette(ORANGE, 5);
        assert_eq!(palette.len(), 5);
        let chroma = ORANGE.chroma();
        for lab in &palette {
            assert_eq!(lab.l, ORANGE.l);
            assert!(approx_eq(lab.chroma(), chroma, 1e-9), "chroma {}", lab.chroma());
        }
    }

    #[test]
    fn analogous_five_steps_evenly() {
        let palette = analogous_palette(ORANGE, 5);
        for pair in palette.windows(2) {
            let d = hue_delta(pair[0].hue_angle(), pair[1].hue_angle());
            assert!(approx_eq(d, 30.0 / 4.0, 1e-9), "step {d}");
        }
    }

    #[test]
    fn analogous_odd_is_centered_on_source() {
        let palette = analogous_palette(ORANGE, 5);
        assert!(approx_eq(hue_delta(ORANGE.hue_angle(), palette[2].hue_angle()), 0.0, 1e-9));
        assert!(approx_eq(hue_delta(ORANGE.hue_angle(), palette[0].hue_angle()), -15.0, 1e-9));
        assert!(approx_eq(hue_delta(ORANGE.hue_angle(), palette[4].hue_angle()), 15.0, 1e-9));
    }

    #[test]
    fn analogous_even_offsets() {
        // n = 4: offsets −2..=1, step 10°.
        let palette = analogous_palette(ORANGE, 4);
        let offsets: Vec<f64> = palette
            .iter()
            .map(|lab| hue_delta(ORANGE.hue_angle(), lab.hue_angle()))
            .collect();
        for (got, want) in offsets.iter().zip([-20.0, -10.0, 0.0, 10.0]) {
            assert!(approx_eq(*got, want, 1e-9), "{offsets:?}");
        }
    }

    #[test]
    fn analogous_wraps_around_zero() {
        // Hue just above 0°: the lower offsets land near 360°.
        let base = Lab::from_lch(50.0, 30.0, 5.0);
        let palette = analogous_palette(base, 3);
        assert!(approx_eq(palette[0].hue_angle(), 350.0, 1e-9), "{}", palette[0].hue_angle());
        assert!(approx_eq(palette[2].hue_angle(), 20.0, 1e-9), "{}", palette[2].hue_angle());
    }

    #[test]
    fn analogous_degenerate_counts() {
        assert!(analogous_palette(ORANGE, 0).is_empty());
        assert_eq!(analogous_palette(ORANGE, 1), vec![ORANGE]);
    }

    #[test]
    fn analogous_of_neutral_stays_neutral() {
        for lab in analogous_palette(Lab::NEUTRAL_GRAY, 5) {
            assert_eq!(lab.l, 60.0);
            assert!(approx_eq(lab.a, 0.0, 1e-12) && approx_eq(lab.b, 0.0, 1e-12), "{lab}");
        }
    }

    // ── Complementary / triadic ─────────────────────────────────────

    #[test]
    fn complementary_is_input_and_opposite() {
        let [first, second] = complementary_palette(ORANGE);
        assert_eq!(first, ORANGE);
        assert_eq!(second.l, ORANGE.l);
        assert!(approx_eq(second.a, -ORANGE.a, 1e-9), "{second}");
        assert!(approx_eq(second.b, -ORANGE.b, 1e-9), "{second}");
    }

    #[test]
    fn triadic_spacing() {
        let palette = triadic_palette(ORANGE);
        let h0 = ORANGE.hue_angle();
        for (lab, offset) in palette.iter().zip([0.0, 120.0, -120.0]) {
            assert_eq!(lab.l, ORANGE.l);
            assert!(approx_eq(lab.chroma(), ORANGE.chroma(), 1e-9));
            assert!(approx_eq(hue_delta(h0, lab.hue_angle()), offset, 1e-9), "{lab}");
        }
    }

    // ── PaletteKind ─────────────────────────────────────────────────

    #[test]
    fn kind_sizes() {
        assert_eq!(PaletteKind::Analogous.generate(ORANGE, 7).len(), 7);
        assert_eq!(PaletteKind::Complementary.generate(ORANGE, 7).len(), 2);
        assert_eq!(PaletteKind::Triadic.generate(ORANGE, 7).len(), 3);
    }

    #[test]
    fn kind_names_roundtrip() {
        for kind in PaletteKind::all() {
            assert_eq!(PaletteKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(PaletteKind::from_name("Triadic"), Some(PaletteKind::Triadic));
        assert_eq!(PaletteKind::from_name("tetradic"), None);
    }
}

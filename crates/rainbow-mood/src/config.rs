//! Static color configuration table.
//!
//! Each named color carries a handful of tints (`light`, `medium`, `dark` in
//! the builtin table), each with a display hex, a CMYK vector and a weight
//! in [0, 100]. The table is loaded once, validated, and only read after
//! that.
//!
//! ```json
//! { "colors": { "green": { "sub_tints": {
//!     "medium": { "hex": "#00ff00", "cmyk": [1, 0, 1, 0], "weight": 50 }
//! } } } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rainbow_color::Cmyk;
use rainbow_color::space::{Rgb, rgb_to_hsv, unit_rgb_to_cmyk};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Tint used when a caller doesn't name one.
pub const DEFAULT_TINT: &str = "medium";

/// Tints every channel must define for emotional scoring.
pub const SCORED_TINTS: [&str; 3] = ["light", "medium", "dark"];

/// Hue step between successive analogous tints, in degrees.
const ANALOGOUS_STEP: f64 = 30.0;

const BUILTIN_JSON: &str = include_str!("../assets/color_config.json");

// ─── Tint ────────────────────────────────────────────────────────────────────

/// One shade of a configured color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub hex: String,
    pub cmyk: Cmyk,
    pub weight: f64,
}

impl Tint {
    /// Rebuild hex and CMYK from unrounded unit-range RGB.
    fn from_unit_rgb((r, g, b): (f64, f64, f64), weight: f64) -> Self {
        Self {
            hex: Rgb::from_unit(r, g, b).to_hex(),
            cmyk: unit_rgb_to_cmyk(r, g, b),
            weight,
        }
    }

    /// Mix with `other` in RGB space. `ratio` 0 keeps `self`, 1 gives
    /// `other`; the weight is interpolated the same way.
    #[must_use]
    pub fn mix(&self, other: &Self, ratio: f64) -> Self {
        let (r1, g1, b1) = self.cmyk.to_unit_rgb();
        let (r2, g2, b2) = other.cmyk.to_unit_rgb();
        let lerp = |a: f64, b: f64| a.mul_add(1.0 - ratio, b * ratio);
        Self::from_unit_rgb(
            (lerp(r1, r2), lerp(g1, g2), lerp(b1, b2)),
            lerp(self.weight, other.weight),
        )
    }

    /// RGB inversion, keeping the weight.
    #[must_use]
    pub fn complement(&self) -> Self {
        let (r, g, b) = self.cmyk.to_unit_rgb();
        Self::from_unit_rgb((1.0 - r, 1.0 - g, 1.0 - b), self.weight)
    }

    /// `n` tints with the HSV hue rotated by 30°, 60°, … from this one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn analogous(&self, n: usize) -> Vec<Self> {
        let (r, g, b) = self.cmyk.to_unit_rgb();
        let hsv = rgb_to_hsv(r, g, b);
        (1..=n)
            .map(|i| {
                let rotated = hsv.shift_hue(i as f64 * ANALOGOUS_STEP);
                Self::from_unit_rgb(rotated.to_unit_rgb(), self.weight)
            })
            .collect()
    }

    fn validate(&self, color: &str, tint: &str) -> Result<()> {
        let invalid = |what: String| Error::InvalidConfig(format!("{color}/{tint}: {what}"));

        Rgb::from_hex(&self.hex).map_err(|e| invalid(e.to_string()))?;
        for v in self.cmyk.to_array() {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(format!("cmyk channel {v} outside [0, 1]")));
            }
        }
        if !(0.0..=100.0).contains(&self.weight) {
            return Err(invalid(format!("weight {} outside [0, 100]", self.weight)));
        }
        Ok(())
    }
}

// ─── ColorTable ──────────────────────────────────────────────────────────────

/// All tints of one named color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub sub_tints: BTreeMap<String, Tint>,
}

/// The full configuration: color name → tints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTable {
    colors: BTreeMap<String, ColorEntry>,
}

impl ColorTable {
    /// The table shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only if the embedded JSON is broken, which the tests rule out.
    pub fn builtin() -> Result<Self> {
        let table = Self::parse(BUILTIN_JSON)?;
        info!(colors = table.len(), source = "builtin", "loaded color table");
        Ok(table)
    }

    /// Parse and validate a table from JSON text.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] for malformed JSON, [`Error::InvalidConfig`] for a
    /// tint with an unparsable hex, a CMYK channel outside [0, 1] or a
    /// weight outside [0, 100].
    pub fn from_json(json: &str) -> Result<Self> {
        let table = Self::parse(json)?;
        info!(colors = table.len(), source = "json", "loaded color table");
        Ok(table)
    }

    /// Read, parse and validate a table file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file can't be read, otherwise as
    /// [`ColorTable::from_json`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&json)?;
        info!(colors = table.len(), source = %path.display(), "loaded color table");
        Ok(table)
    }

    fn parse(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check every tint of every color.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] naming the first offending color/tint.
    pub fn validate(&self) -> Result<()> {
        self.colors().try_for_each(|(color, tint, t)| t.validate(color, tint))
    }

    /// Look up one tint.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownColor`] or [`Error::UnknownTint`].
    pub fn get_color(&self, color: &str, tint: &str) -> Result<&Tint> {
        let entry = self.colors.get(color).ok_or_else(|| Error::UnknownColor {
            name: color.to_owned(),
        })?;
        entry.sub_tints.get(tint).ok_or_else(|| Error::UnknownTint {
            color: color.to_owned(),
            tint: tint.to_owned(),
        })
    }

    /// [`ColorTable::get_color`] with the default `medium` tint.
    ///
    /// # Errors
    ///
    /// As [`ColorTable::get_color`].
    pub fn get_medium(&self, color: &str) -> Result<&Tint> {
        self.get_color(color, DEFAULT_TINT)
    }

    #[must_use]
    pub fn get(&self, color: &str) -> Option<&ColorEntry> {
        self.colors.get(color)
    }

    /// Every `(color, tint name, tint)` triple, sorted by color then tint.
    pub fn colors(&self) -> impl Iterator<Item = (&str, &str, &Tint)> {
        self.colors.iter().flat_map(|(color, entry)| {
            entry
                .sub_tints
                .iter()
                .map(move |(tint, t)| (color.as_str(), tint.as_str(), t))
        })
    }

    /// Configured color names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

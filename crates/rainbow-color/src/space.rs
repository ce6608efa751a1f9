// SPDX-License-Identifier: MIT
//
// Color spaces and the conversions between them.
//
// Single-character variable names (r, g, b, l, a, c, m, y, k, x, z) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference formulas.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   hex ↔ RGB (8-bit) ↔ linear sRGB ↔ CIE XYZ (D65) ↔ CIELAB
//              ↕                                         ↕
//         CMYK, HSV                               chroma / hue angle
//
// Every function here is pure and total. Numeric input is never validated:
// out-of-range values go through the formulas unchanged. The one place that
// clamps is the step back to 8-bit RGB, which silently clips out-of-gamut
// colors to [0, 255].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};

// ─── Constants ───────────────────────────────────────────────────────────────

/// D65 reference white (2° observer), normalized so that Yn = 1.
pub const D65_WHITE: Xyz = Xyz::new(0.950_47, 1.0, 1.088_83);

/// CIE ε: boundary between the cube-root and linear branches of f(t).
pub const LAB_EPSILON: f64 = 0.008_856;

/// CIE κ in its rounded form (the exact value is 24389/27 ≈ 903.296).
///
/// Both directions of the LAB transform use this same constant, so the
/// linear branch round-trips exactly. The price is a ~4e-8 discontinuity
/// against the cube-root branch right at `LAB_EPSILON`.
pub const LAB_KAPPA: f64 = 903.3;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unit-range channels, rounding to the nearest 8-bit value.
    /// Values outside [0, 1] are clipped.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(to_u8(r * 255.0), to_u8(g * 255.0), to_u8(b * 255.0))
    }

    /// Channels scaled to [0, 1].
    #[inline]
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Parse `RRGGBB` or `#RRGGBB` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Format`] for any other length or a non-hex digit.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    #[must_use]
    pub fn to_cmyk(self) -> Cmyk {
        rgb_to_cmyk(self)
    }

    #[must_use]
    pub fn to_xyz(self) -> Xyz {
        rgb_to_xyz(self)
    }

    #[must_use]
    pub fn to_lab(self) -> Lab {
        rgb_to_lab(self)
    }

    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = self.to_unit();
        rgb_to_hsv(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }
}

// ─── Cmyk ────────────────────────────────────────────────────────────────────

/// A CMYK color, every channel nominally in [0, 1].
///
/// Serializes as a plain `[c, m, y, k]` array, which is the shape the
/// configuration table stores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    /// All channels zero. The degenerate result of blending nothing.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Pure key black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.c, self.m, self.y, self.k]
    }

    /// Channels as unit-range RGB, without rounding to 8 bits.
    #[must_use]
    pub fn to_unit_rgb(self) -> (f64, f64, f64) {
        let w = 1.0 - self.k;
        ((1.0 - self.c) * w, (1.0 - self.m) * w, (1.0 - self.y) * w)
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        cmyk_to_rgb(self)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        cmyk_to_hex(self)
    }
}

impl From<[f64; 4]> for Cmyk {
    fn from([c, m, y, k]: [f64; 4]) -> Self {
        Self::new(c, m, y, k)
    }
}

impl From<Cmyk> for [f64; 4] {
    fn from(cmyk: Cmyk) -> Self {
        cmyk.to_array()
    }
}

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cmyk({:.3}, {:.3}, {:.3}, {:.3})",
            self.c, self.m, self.y, self.k
        )
    }
}

// ─── Xyz ─────────────────────────────────────────────────────────────────────

/// CIE 1931 XYZ tristimulus values, D65 white, Y in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn to_lab(self) -> Lab {
        xyz_to_lab(self)
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        xyz_to_rgb(self)
    }
}

// ─── Lab ─────────────────────────────────────────────────────────────────────

/// A CIELAB color: L in [0, 100], a and b roughly in [-128, 128].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Neutral mid gray, the fallback for an empty emotion mix.
    pub const NEUTRAL_GRAY: Self = Self::new(60.0, 0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Build from cylindrical coordinates: lightness, chroma, hue in degrees.
    #[must_use]
    pub fn from_lch(l: f64, chroma: f64, hue: f64) -> Self {
        let h = hue.to_radians();
        Self::new(l, chroma * h.cos(), chroma * h.sin())
    }

    #[must_use]
    pub fn chroma(self) -> f64 {
        calculate_chroma(self.a, self.b)
    }

    #[must_use]
    pub fn hue_angle(self) -> f64 {
        calculate_hue_angle(self.a, self.b)
    }

    #[must_use]
    pub fn to_xyz(self) -> Xyz {
        lab_to_xyz(self)
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        lab_to_rgb(self)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        lab_to_hex(self)
    }
}

impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lab({:.2}, {:.2}, {:.2})", self.l, self.a, self.b)
    }
}

// ─── Hsv ─────────────────────────────────────────────────────────────────────

/// Hue (degrees), saturation and value, the last two in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Rotate the hue by `degrees`, wrapping into [0, 360).
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }

    /// Unit-range RGB channels.
    #[must_use]
    pub fn to_unit_rgb(self) -> (f64, f64, f64) {
        hsv_to_rgb(self)
    }
}

// ─── ColorSample ─────────────────────────────────────────────────────────────

/// A color held in exactly one canonical space.
///
/// Parses from any of:
///
/// | Form                 | Example                      |
/// |----------------------|------------------------------|
/// | hex                  | `#ff8000`, `FF8000`          |
/// | `rgb(r, g, b)`       | `rgb(255, 128, 0)`           |
/// | `cmyk(c, m, y, k)`   | `cmyk(0, 0.5, 1, 0)`         |
/// | `lab(l, a, b)`       | `lab(67.05, 42.83, 74.03)`   |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSample {
    Rgb(Rgb),
    Cmyk(Cmyk),
    Lab(Lab),
}

impl ColorSample {
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Cmyk(cmyk) => cmyk.to_rgb(),
            Self::Lab(lab) => lab.to_rgb(),
        }
    }

    #[must_use]
    pub fn to_cmyk(self) -> Cmyk {
        match self {
            Self::Cmyk(cmyk) => cmyk,
            other => other.to_rgb().to_cmyk(),
        }
    }

    #[must_use]
    pub fn to_lab(self) -> Lab {
        match self {
            Self::Lab(lab) => lab,
            other => other.to_rgb().to_lab(),
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

impl From<Rgb> for ColorSample {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Cmyk> for ColorSample {
    fn from(cmyk: Cmyk) -> Self {
        Self::Cmyk(cmyk)
    }
}

impl From<Lab> for ColorSample {
    fn from(lab: Lab) -> Self {
        Self::Lab(lab)
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(rgb) => write!(f, "rgb({}, {}, {})", rgb.r, rgb.g, rgb.b),
            Self::Cmyk(cmyk) => fmt::Display::fmt(cmyk, f),
            Self::Lab(lab) => fmt::Display::fmt(lab, f),
        }
    }
}

impl FromStr for ColorSample {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(args) = function_args(&lower, "rgb") {
            let [r, g, b] = parse_components::<u8, 3>(s, args)?;
            Ok(Self::Rgb(Rgb::new(r, g, b)))
        } else if let Some(args) = function_args(&lower, "cmyk") {
            let [c, m, y, k] = parse_components::<f64, 4>(s, args)?;
            Ok(Self::Cmyk(Cmyk::new(c, m, y, k)))
        } else if let Some(args) = function_args(&lower, "lab") {
            let [l, a, b] = parse_components::<f64, 3>(s, args)?;
            Ok(Self::Lab(Lab::new(l, a, b)))
        } else {
            hex_to_rgb(trimmed).map(Self::Rgb)
        }
    }
}

/// `name(args)` → `Some("args")`.
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_components<T: FromStr + Copy + Default, const N: usize>(
    input: &str,
    args: &str,
) -> Result<[T; N]> {
    let mut out = [T::default(); N];
    let mut parts = args.split(',');
    for slot in &mut out {
        let part = parts
            .next()
            .ok_or_else(|| ColorError::format(input, "too few components"))?;
        *slot = part
            .trim()
            .parse()
            .map_err(|_| ColorError::format(input, "component is not a number in range"))?;
    }
    if parts.next().is_some() {
        return Err(ColorError::format(input, "too many components"));
    }
    Ok(out)
}

// ─── sRGB companding ─────────────────────────────────────────────────────────

/// Remove the sRGB transfer curve from one unit-range channel.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Apply the sRGB transfer curve to one linear channel.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

// ─── RGB ↔ XYZ ───────────────────────────────────────────────────────────────
//
// sRGB primaries with a D65 white point (IEC 61966-2-1).

#[must_use]
pub fn rgb_to_xyz(rgb: Rgb) -> Xyz {
    let (r, g, b) = rgb.to_unit();
    let (r, g, b) = (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));

    Xyz::new(
        0.180_437_5f64.mul_add(b, 0.412_456_4f64.mul_add(r, 0.357_576_1 * g)),
        0.072_175_0f64.mul_add(b, 0.212_672_9f64.mul_add(r, 0.715_152_2 * g)),
        0.950_304_1f64.mul_add(b, 0.019_333_9f64.mul_add(r, 0.119_192_0 * g)),
    )
}

/// XYZ → 8-bit RGB. Out-of-gamut channels are clipped, never rejected.
#[must_use]
pub fn xyz_to_rgb(xyz: Xyz) -> Rgb {
    let Xyz { x, y, z } = xyz;

    let r = (-0.498_531_4f64).mul_add(z, 3.240_454_2f64.mul_add(x, -(1.537_138_5 * y)));
    let g = 0.041_556_0f64.mul_add(z, (-0.969_266_0f64).mul_add(x, 1.876_010_8 * y));
    let b = 1.057_225_2f64.mul_add(z, 0.055_643_4f64.mul_add(x, -(0.204_025_9 * y)));

    Rgb::from_unit(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

// ─── XYZ ↔ LAB ───────────────────────────────────────────────────────────────

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA.mul_add(t, 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let t = f * f * f;
    if t > LAB_EPSILON {
        t
    } else {
        116.0f64.mul_add(f, -16.0) / LAB_KAPPA
    }
}

#[must_use]
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / D65_WHITE.x);
    let fy = lab_f(xyz.y / D65_WHITE.y);
    let fz = lab_f(xyz.z / D65_WHITE.z);

    Lab::new(
        116.0f64.mul_add(fy, -16.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    )
}

#[must_use]
pub fn lab_to_xyz(lab: Lab) -> Xyz {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    Xyz::new(
        D65_WHITE.x * lab_f_inv(fx),
        D65_WHITE.y * lab_f_inv(fy),
        D65_WHITE.z * lab_f_inv(fz),
    )
}

// ─── Composite LAB conversions ───────────────────────────────────────────────

#[must_use]
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    xyz_to_lab(rgb_to_xyz(rgb))
}

#[must_use]
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    xyz_to_rgb(lab_to_xyz(lab))
}

#[must_use]
pub fn lab_to_hex(lab: Lab) -> String {
    rgb_to_hex(lab_to_rgb(lab))
}

/// Colorfulness: `sqrt(a² + b²)`.
#[inline]
#[must_use]
pub fn calculate_chroma(a: f64, b: f64) -> f64 {
    a.hypot(b)
}

/// Angular position in the a–b plane, degrees in [0, 360).
#[inline]
#[must_use]
pub fn calculate_hue_angle(a: f64, b: f64) -> f64 {
    normalize_hue(b.atan2(a).to_degrees())
}

/// Wrap a hue angle into [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

// ─── RGB ↔ CMYK ──────────────────────────────────────────────────────────────

/// K = 1 − max(R, G, B). Pure black returns C = M = Y = 0 exactly.
#[must_use]
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let (r, g, b) = rgb.to_unit();
    unit_rgb_to_cmyk(r, g, b)
}

/// Same as [`rgb_to_cmyk`] for unrounded unit-range channels.
#[must_use]
pub fn unit_rgb_to_cmyk(r: f64, g: f64, b: f64) -> Cmyk {
    let max = r.max(g).max(b);
    if max <= 0.0 {
        return Cmyk::BLACK;
    }

    let k = 1.0 - max;
    Cmyk::new(
        (1.0 - r - k) / max,
        (1.0 - g - k) / max,
        (1.0 - b - k) / max,
        k,
    )
}

#[must_use]
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let (r, g, b) = cmyk.to_unit_rgb();
    Rgb::from_unit(r, g, b)
}

#[must_use]
pub fn cmyk_to_hex(cmyk: Cmyk) -> String {
    rgb_to_hex(cmyk_to_rgb(cmyk))
}

/// # Errors
///
/// Returns [`ColorError::Format`] if `hex` is not a 6-digit hex color.
pub fn hex_to_cmyk(hex: &str) -> Result<Cmyk> {
    hex_to_rgb(hex).map(rgb_to_cmyk)
}

// ─── RGB ↔ HSV ───────────────────────────────────────────────────────────────

/// Unit-range RGB → HSV (hexcone model).
#[must_use]
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= 0.0 {
        0.0
    } else if r >= g && r >= b {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if g >= b {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max <= 0.0 { 0.0 } else { delta / max };

    Hsv::new(h, s, max)
}

/// HSV → unit-range RGB. Hues outside [0, 360) fall into the last sextant.
#[must_use]
pub fn hsv_to_rgb(hsv: Hsv) -> (f64, f64, f64) {
    let Hsv { h, s, v } = hsv;
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// Lowercase `#rrggbb`, always 7 characters.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_string()
}

/// Parse a 6-digit hex color with optional leading `#`.
///
/// # Errors
///
/// Returns [`ColorError::Format`] on wrong length or a non-hex digit.
pub fn hex_to_rgb(s: &str) -> Result<Rgb> {
    let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();

    if digits.len() != 6 {
        return Err(ColorError::format(s, "expected 6 hex digits"));
    }

    let byte = |i: usize| {
        parse_hex_byte(digits[i], digits[i + 1])
            .ok_or_else(|| ColorError::format(s, "non-hex character"))
    };

    Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
const fn parse_hex_byte(hi: u8, lo: u8) -> Option<u8> {
    match (parse_hex_digit(hi), parse_hex_digit(lo)) {
        (Some(hi), Some(lo)) => Some(hi << 4 | lo),
        _ => None,
    }
}

/// Round a 0.0–255.0 float to a u8, clipping anything outside.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

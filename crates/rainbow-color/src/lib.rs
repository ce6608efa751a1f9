// SPDX-License-Identifier: MIT
//
//! # rainbow-color — color-space math and weighted blending
//!
//! Pure functions over small `Copy` color values. Nothing here knows about
//! emotions; `rainbow-mood` feeds weights in and reads colors out.
//!
//! # Architecture
//!
//! ```text
//!   hex / rgb() / cmyk() / lab() strings
//!        │
//!        ▼
//!   space.rs:    Rgb ⇄ Cmyk, Rgb ⇄ Xyz ⇄ Lab, Rgb ⇄ Hsv
//!        │
//!        ├──▶ blend.rs:    normalized weighted CMYK average
//!        ├──▶ palette.rs:  hue rotation at fixed L and chroma
//!        ├──▶ contrast.rs: WCAG relative luminance and ratio
//!        └──▶ vision.rs:   dichromacy simulation matrices
//! ```
//!
//! # Conventions
//!
//! 8-bit channels are `u8`; everything else is `f64`. CMYK and HSV
//! saturation/value live in [0, 1], hue angles in degrees [0, 360), LAB is
//! CIE 1976 against D65. Hex output is always lowercase `#rrggbb`.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Palette sizes and loop indices are small integers cast to f64.
#![allow(clippy::cast_precision_loss)]
// l/a/b, r/g/b and c/m/y/k read best side by side.
#![allow(clippy::similar_names)]

pub mod blend;
pub mod contrast;
pub mod error;
pub mod palette;
pub mod space;
pub mod vision;

pub use blend::{WeightedColor, blend_cmyk, blend_weighted};
pub use contrast::{check_color_contrast, contrast_ratio, relative_luminance};
pub use error::{ColorError, Result};
pub use palette::{PaletteKind, analogous_palette, complementary_palette, triadic_palette};
pub use space::{Cmyk, ColorSample, Hsv, Lab, Rgb, Xyz};
pub use vision::{Deficiency, simulate_color_blindness};

// SPDX-License-Identifier: MIT
//
// Weighted blending of several colors into one composite.
//
// Weights are normalized to sum to 1 and each channel is averaged on its
// own. Nothing to blend (no colors, no weights, or weights summing to zero)
// yields the all-zero CMYK vector rather than an error.

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};
use crate::space::{Cmyk, Lab};

/// A CMYK color paired with a non-negative weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedColor {
    pub color: Cmyk,
    pub weight: f64,
}

impl WeightedColor {
    #[inline]
    #[must_use]
    pub const fn new(color: Cmyk, weight: f64) -> Self {
        Self { color, weight }
    }
}

/// Blend `colors` by `weights`.
///
/// # Errors
///
/// Returns [`ColorError::ShapeMismatch`] if the two slices differ in length.
pub fn blend_cmyk(colors: &[Cmyk], weights: &[f64]) -> Result<Cmyk> {
    if colors.len() != weights.len() {
        return Err(ColorError::ShapeMismatch {
            colors: colors.len(),
            weights: weights.len(),
        });
    }

    Ok(blend_pairs(colors.iter().copied().zip(weights.iter().copied())))
}

/// Blend already-paired samples. Cannot mismatch, so cannot fail.
#[must_use]
pub fn blend_weighted(samples: &[WeightedColor]) -> Cmyk {
    blend_pairs(samples.iter().map(|s| (s.color, s.weight)))
}

fn blend_pairs<I>(pairs: I) -> Cmyk
where
    I: Iterator<Item = (Cmyk, f64)> + Clone,
{
    let total: f64 = pairs.clone().map(|(_, w)| w).sum();
    if total.is_nan() || total <= 0.0 {
        return Cmyk::ZERO;
    }

    pairs.fold(Cmyk::ZERO, |acc, (color, weight)| {
        let w = weight / total;
        Cmyk::new(
            color.c.mul_add(w, acc.c),
            color.m.mul_add(w, acc.m),
            color.y.mul_add(w, acc.y),
            color.k.mul_add(w, acc.k),
        )
    })
}

/// Unnormalized weighted sum of LAB points: Σ wᵢ·labᵢ per component.
///
/// Callers divide by whatever total they consider authoritative; the emotion
/// palette, for one, normalizes by the sum of *all* scores, including
/// labels that have no LAB anchor.
#[must_use]
pub fn weighted_lab_sum<I>(pairs: I) -> Lab
where
    I: IntoIterator<Item = (Lab, f64)>,
{
    pairs.into_iter().fold(Lab::default(), |acc, (lab, w)| {
        Lab::new(
            lab.l.mul_add(w, acc.l),
            lab.a.mul_add(w, acc.a),
            lab.b.mul_add(w, acc.b),
        )
    })
}

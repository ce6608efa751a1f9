// SPDX-License-Identifier: MIT
//
// Error taxonomy for the color math layer.
//
// Only two things can go wrong here: a color string that doesn't parse, and
// a blend whose color and weight lists disagree in length. Everything else
// (all-zero weights, pure black, out-of-range numbers) has a defined output.

use thiserror::Error;

/// Errors produced by `rainbow-color`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// A hex or color-function string could not be parsed.
    #[error("invalid color {input:?}: {reason}")]
    Format {
        input: String,
        reason: &'static str,
    },

    /// `blend_cmyk` received a different number of colors and weights.
    #[error("cannot blend {colors} colors with {weights} weights")]
    ShapeMismatch { colors: usize, weights: usize },
}

impl ColorError {
    pub(crate) fn format(input: &str, reason: &'static str) -> Self {
        Self::Format {
            input: input.to_owned(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, ColorError>;

//! Response strategy from a CMYK vector.
//!
//! A fixed decision tree, first match wins:
//!
//! | Condition            | Strategy  |
//! |----------------------|-----------|
//! | K > 0.7              | cautious  |
//! | Y > 0.5 and C < 0.3  | direct    |
//! | M > 0.5              | cautious  |
//! | C > 0.5              | empathic  |
//! | otherwise            | neutral   |
//!
//! Independently, `fallback` is raised when K > 0.8.

use std::fmt;

use rainbow_color::Cmyk;
use serde::Serialize;
use tracing::debug;

use crate::emotion::EmotionScores;

pub const CAUTIOUS_K: f64 = 0.7;
pub const FALLBACK_K: f64 = 0.8;
pub const DIRECT_Y: f64 = 0.5;
pub const DIRECT_MAX_C: f64 = 0.3;
pub const CAUTIOUS_M: f64 = 0.5;
pub const EMPATHIC_C: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Direct,
    Neutral,
    #[serde(rename = "empathetic")]
    Empathic,
    Cautious,
}

impl Strategy {
    /// Wire name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Neutral => "neutral",
            Self::Empathic => "empathetic",
            Self::Cautious => "cautious",
        }
    }

    /// Pick a strategy from CMYK alone.
    #[must_use]
    pub fn from_cmyk(cmyk: Cmyk) -> Self {
        let Cmyk { c, m, y, k } = cmyk;
        if k > CAUTIOUS_K {
            Self::Cautious
        } else if y > DIRECT_Y && c < DIRECT_MAX_C {
            Self::Direct
        } else if m > CAUTIOUS_M {
            Self::Cautious
        } else if c > EMPATHIC_C {
            Self::Empathic
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the decision step produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub strategy: Strategy,
    pub fallback: bool,
    /// `cmyk` as `#rrggbb`.
    pub rainbow_vector: String,
    pub cmyk: Cmyk,
    pub dominant_emotion: Option<String>,
}

/// Decide a strategy for `cmyk` and report the dominant emotion of `scores`.
#[must_use]
pub fn determine_strategy(scores: &EmotionScores, cmyk: Cmyk) -> Decision {
    let strategy = Strategy::from_cmyk(cmyk);
    let fallback = cmyk.k > FALLBACK_K;
    let dominant_emotion = dominant_emotion(scores).map(str::to_owned);
    debug!(%strategy, fallback, dominant = ?dominant_emotion, %cmyk, "strategy decided");

    Decision {
        strategy,
        fallback,
        rainbow_vector: cmyk.to_hex(),
        cmyk,
        dominant_emotion,
    }
}

/// Label with the highest positive score; the first in label order wins a
/// tie. `None` if no score is above zero.
#[must_use]
pub fn dominant_emotion(scores: &EmotionScores) -> Option<&str> {
    scores
        .iter()
        .filter(|(_, s)| **s > 0.0)
        .fold(None, |best: Option<(&String, f64)>, (label, &score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((label, score)),
        })
        .map(|(label, _)| label.as_str())
}

//! The seven color channels and their fixed signatures.
//!
//! Every channel has a display color, a CMYK "signature" used when blending
//! the rainbow vector, and three emotion labels it speaks for. The table is
//! static; only the per-channel weights vary from one input to the next.

use std::collections::BTreeMap;
use std::fmt;

use rainbow_color::{Cmyk, WeightedColor, blend_weighted};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named color channel. Declaration order is the canonical iteration
/// order everywhere (maps, reports, tie-breaking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Green,
    Yellow,
    Blue,
    Purple,
    Pink,
    Red,
    Gray,
}

impl Channel {
    pub const ALL: [Self; 7] = [
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Purple,
        Self::Pink,
        Self::Red,
        Self::Gray,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }

    /// Parse a channel from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Display color of the channel's agent.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Green => "#00ff00",
            Self::Yellow => "#ffff00",
            Self::Blue => "#0000ff",
            Self::Purple => "#800080",
            Self::Pink => "#ffc0cb",
            Self::Red => "#ff0000",
            Self::Gray => "#808080",
        }
    }

    /// CMYK contribution of this channel to the rainbow vector.
    #[must_use]
    pub const fn signature(self) -> Cmyk {
        match self {
            Self::Green => Cmyk::new(1.0, 0.0, 1.0, 0.0),
            Self::Yellow => Cmyk::new(0.0, 0.0, 1.0, 0.0),
            Self::Blue => Cmyk::new(1.0, 1.0, 0.0, 0.0),
            Self::Purple => Cmyk::new(0.5, 1.0, 0.0, 0.0),
            Self::Pink => Cmyk::new(0.0, 0.25, 0.2, 0.0),
            Self::Red => Cmyk::new(0.0, 1.0, 1.0, 0.0),
            Self::Gray => Cmyk::new(0.0, 0.0, 0.0, 0.5),
        }
    }

    /// The emotion labels this channel scores.
    #[must_use]
    pub const fn emotions(self) -> [&'static str; 3] {
        match self {
            Self::Green => ["joy", "happy", "neutral"],
            Self::Yellow => ["disbelief", "disgust", "aversion"],
            Self::Blue => ["confused", "hurt", "sadness"],
            Self::Purple => ["jealousy", "ego", "miscommunication"],
            Self::Pink => ["guilt", "negative", "naive"],
            Self::Red => ["betrayal", "angry", "rage"],
            Self::Gray => ["overwhelmed", "saturation", "ambivalence"],
        }
    }

    /// One-line response advice from this channel's agent.
    #[must_use]
    pub const fn suggestion(self) -> &'static str {
        match self {
            Self::Green => "Positive and supportive response",
            Self::Yellow => "Careful and clarifying",
            Self::Blue => "Empathic and understanding",
            Self::Purple => "Professional and distant",
            Self::Pink => "Caring and attentive",
            Self::Red => "Direct and clear",
            Self::Gray => "Neutral and balancing",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── ChannelWeights ──────────────────────────────────────────────────────────

/// Non-negative weight per channel. Channels never set read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChannelWeights(BTreeMap<Channel, f64>);

impl ChannelWeights {
    /// Every channel present with weight 0.
    #[must_use]
    pub fn zeroed() -> Self {
        Self(Channel::ALL.into_iter().map(|c| (c, 0.0)).collect())
    }

    pub fn set(&mut self, channel: Channel, weight: f64) {
        self.0.insert(channel, weight);
    }

    #[must_use]
    pub fn with(mut self, channel: Channel, weight: f64) -> Self {
        self.set(channel, weight);
        self
    }

    #[must_use]
    pub fn get(&self, channel: Channel) -> f64 {
        self.0.get(&channel).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        self.0.iter().map(|(c, w)| (*c, *w))
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(Channel, f64)> for ChannelWeights {
    fn from_iter<I: IntoIterator<Item = (Channel, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ─── Rainbow vector ──────────────────────────────────────────────────────────

/// The blended color of all weighted channels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainbowVector {
    pub hex: String,
    pub cmyk: Cmyk,
}

impl RainbowVector {
    /// What an input with no weight at all maps to.
    #[must_use]
    pub fn black() -> Self {
        Self {
            hex: "#000000".to_owned(),
            cmyk: Cmyk::BLACK,
        }
    }
}

/// Blend every channel's signature by its weight.
///
/// Zero total weight yields black `(0, 0, 0, 1)` / `#000000`, not the
/// all-zero vector a bare blend would give.
#[must_use]
pub fn calculate_rainbow_vector(weights: &ChannelWeights) -> RainbowVector {
    let total = weights.total();
    if total.is_nan() || total <= 0.0 {
        debug!("no channel weight, rainbow vector is black");
        return RainbowVector::black();
    }

    let samples: Vec<WeightedColor> = weights
        .iter()
        .map(|(channel, w)| WeightedColor::new(channel.signature(), w))
        .collect();
    let cmyk = blend_weighted(&samples);
    let hex = cmyk.to_hex();
    debug!(%hex, %cmyk, "rainbow vector");

    RainbowVector { hex, cmyk }
}

//! Emotion scores → color.
//!
//! Two independent mappings live here:
//!
//! - four *groups* of labels, one per CMYK channel (clarity → C,
//!   passion → M, energy → Y, depth → K), averaged into a CMYK vector;
//! - seven fixed LAB *anchors*, averaged into one LAB point that seeds an
//!   analogous palette.
//!
//! Plus the bridge from channel weights to per-label scores through the
//! configured tint weights.

use std::collections::BTreeMap;

use rainbow_color::blend::weighted_lab_sum;
use rainbow_color::{Cmyk, Lab, analogous_palette};

use crate::channel::{Channel, ChannelWeights};
use crate::config::{ColorTable, SCORED_TINTS};
use crate::error::Result;

/// Emotion label → non-negative score.
pub type EmotionScores = BTreeMap<String, f64>;

// ─── CMYK groups ─────────────────────────────────────────────────────────────

/// A group of labels feeding one CMYK channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionGroup {
    /// Cyan.
    Clarity,
    /// Magenta.
    Passion,
    /// Yellow.
    Energy,
    /// Key (black).
    Depth,
}

impl EmotionGroup {
    /// In C, M, Y, K order.
    pub const ALL: [Self; 4] = [Self::Clarity, Self::Passion, Self::Energy, Self::Depth];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clarity => "clarity",
            Self::Passion => "passion",
            Self::Energy => "energy",
            Self::Depth => "depth",
        }
    }

    #[must_use]
    pub const fn members(self) -> &'static [&'static str] {
        match self {
            Self::Clarity => &["confused", "hurt", "sadness"],
            Self::Passion => &["angry", "rage", "betrayal"],
            Self::Energy => &["joy", "happy", "neutral"],
            Self::Depth => &["overwhelmed", "saturation", "ambivalence"],
        }
    }

    /// Sum of member scores over the group's full size. Absent labels count
    /// as 0 but still count toward the divisor.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(self, scores: &EmotionScores) -> f64 {
        let members = self.members();
        let sum: f64 = members
            .iter()
            .map(|label| scores.get(*label).copied().unwrap_or(0.0))
            .sum();
        sum / members.len() as f64
    }
}

/// Average each group, then normalize the four averages to sum to 1.
///
/// With nothing to normalize (raw sum ≤ 0) the averages are returned as-is,
/// which for non-negative scores is the all-zero vector.
#[must_use]
pub fn calculate_emotional_cmyk(scores: &EmotionScores) -> Cmyk {
    let [c, m, y, k] = EmotionGroup::ALL.map(|g| g.average(scores));
    let total = c + m + y + k;
    if total > 0.0 {
        Cmyk::new(c / total, m / total, y / total, k / total)
    } else {
        Cmyk::new(c, m, y, k)
    }
}

// ─── LAB anchors ─────────────────────────────────────────────────────────────

/// Fixed LAB points for the labels that have one.
pub const LAB_ANCHORS: [(&str, Lab); 7] = [
    ("joy", Lab::new(70.0, 20.0, 60.0)),
    ("angry", Lab::new(50.0, 60.0, -20.0)),
    ("sadness", Lab::new(40.0, -20.0, -40.0)),
    ("happy", Lab::new(80.0, 10.0, 40.0)),
    ("neutral", Lab::new(60.0, 0.0, 0.0)),
    ("confused", Lab::new(50.0, -30.0, 30.0)),
    ("overwhelmed", Lab::new(30.0, 0.0, 0.0)),
];

#[must_use]
pub fn lab_anchor(label: &str) -> Option<Lab> {
    LAB_ANCHORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, lab)| *lab)
}

/// Score-weighted mean of the anchors, or `None` if the scores sum to 0.
///
/// The divisor is the sum of *all* scores, so labels without an anchor pull
/// the point toward the LAB origin.
#[must_use]
pub fn emotion_lab(scores: &EmotionScores) -> Option<Lab> {
    let total: f64 = scores.values().sum();
    if total.is_nan() || total <= 0.0 {
        return None;
    }

    let sum = weighted_lab_sum(
        scores
            .iter()
            .filter_map(|(label, w)| lab_anchor(label).map(|lab| (lab, *w))),
    );
    Some(Lab::new(sum.l / total, sum.a / total, sum.b / total))
}

/// `n` analogous colors around the scores' anchor mean, or `n` copies of
/// neutral gray when there is nothing to weigh.
#[must_use]
pub fn emotion_palette(scores: &EmotionScores, n: usize) -> Vec<Lab> {
    emotion_lab(scores).map_or_else(
        || vec![Lab::NEUTRAL_GRAY; n],
        |center| analogous_palette(center, n),
    )
}

// ─── Channel weights → label scores ──────────────────────────────────────────

/// Spread every channel's weight over its labels through the configured
/// tints: each label gets `weight · tint_weight / 100` per scored tint.
///
/// Every label of every channel appears in the result.
///
/// # Errors
///
/// A configuration error if a channel or one of its scored tints is missing
/// from `table`.
pub fn emotional_scores(weights: &ChannelWeights, table: &ColorTable) -> Result<EmotionScores> {
    let mut scores = EmotionScores::new();
    for channel in Channel::ALL {
        let tint_total = tint_weight_total(table, channel)?;
        let score = weights.get(channel) * tint_total / 100.0;
        for label in channel.emotions() {
            *scores.entry(label.to_owned()).or_insert(0.0) += score;
        }
    }
    Ok(scores)
}

/// Sum of the scored tints' weights for `channel`.
///
/// # Errors
///
/// As [`emotional_scores`].
pub fn tint_weight_total(table: &ColorTable, channel: Channel) -> Result<f64> {
    SCORED_TINTS.iter().try_fold(0.0, |acc, tint| {
        table.get_color(channel.name(), tint).map(|t| acc + t.weight)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn scores(pairs: &[(&str, f64)]) -> EmotionScores {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
    }

    // ── Emotional CMYK ──────────────────────────────────────────────

    #[test]
    fn empty_scores_give_zero_vector() {
        assert_eq!(calculate_emotional_cmyk(&EmotionScores::new()), Cmyk::ZERO);
    }

    #[test]
    fn unrelated_labels_are_ignored() {
        let s = scores(&[("jealousy", 10.0), ("guilt", 4.0)]);
        assert_eq!(calculate_emotional_cmyk(&s), Cmyk::ZERO);
    }

    #[test]
    fn single_group_normalizes_to_one() {
        // One member of three present: average is 3, normalized to 1.
        let s = scores(&[("rage", 9.0)]);
        assert_eq!(calculate_emotional_cmyk(&s), Cmyk::new(0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn groups_divide_by_full_size() {
        // clarity: (3 + 0 + 0) / 3 = 1, energy: (3 + 3 + 0) / 3 = 2
        let s = scores(&[("hurt", 3.0), ("joy", 3.0), ("happy", 3.0)]);
        let cmyk = calculate_emotional_cmyk(&s);
        assert!(approx_eq(cmyk.c, 1.0 / 3.0, 1e-12), "{cmyk}");
        assert!(approx_eq(cmyk.y, 2.0 / 3.0, 1e-12), "{cmyk}");
        assert_eq!((cmyk.m, cmyk.k), (0.0, 0.0));
    }

    #[test]
    fn group_averages() {
        let s = scores(&[("confused", 1.0), ("hurt", 2.0), ("sadness", 6.0)]);
        assert!(approx_eq(EmotionGroup::Clarity.average(&s), 3.0, 1e-12));
        assert_eq!(EmotionGroup::Depth.average(&s), 0.0);
    }

    // ── Anchors and palette ─────────────────────────────────────────

    #[test]
    fn anchors_cover_seven_labels() {
        assert_eq!(lab_anchor("joy"), Some(Lab::new(70.0, 20.0, 60.0)));
        assert_eq!(lab_anchor("overwhelmed"), Some(Lab::new(30.0, 0.0, 0.0)));
        assert_eq!(lab_anchor("guilt"), None);
    }

    #[test]
    fn zero_scores_give_neutral_gray() {
        assert_eq!(emotion_palette(&EmotionScores::new(), 4), vec![Lab::NEUTRAL_GRAY; 4]);
        let zeros = scores(&[("joy", 0.0), ("angry", 0.0)]);
        assert_eq!(emotion_palette(&zeros, 2), vec![Lab::NEUTRAL_GRAY; 2]);
    }

    #[test]
    fn unanchored_labels_dilute_the_mean() {
        let s = scores(&[("neutral", 1.0), ("guilt", 1.0)]);
        assert_eq!(emotion_lab(&s), Some(Lab::new(30.0, 0.0, 0.0)));
    }

    #[test]
    fn weighted_mean_of_anchors() {
        let s = scores(&[("joy", 1.0), ("sadness", 1.0)]);
        assert_eq!(emotion_lab(&s), Some(Lab::new(55.0, 0.0, 10.0)));
    }

    #[test]
    fn palette_is_analogous_around_mean() {
        let s = scores(&[("joy", 3.0), ("happy", 1.0)]);
        let center = emotion_lab(&s).unwrap();
        let palette = emotion_palette(&s, 5);
        assert_eq!(palette, analogous_palette(center, 5));
        assert!(palette.iter().all(|lab| lab.l == center.l));
    }

    // ── Scores from channel weights ─────────────────────────────────

    #[test]
    fn scores_spread_over_tints() {
        let table = ColorTable::builtin().unwrap();
        let w = ChannelWeights::zeroed().with(Channel::Green, 30.0);
        let s = emotional_scores(&w, &table).unwrap();
        // Builtin tint weights are 20 + 50 + 30 = 100.
        for label in ["joy", "happy", "neutral"] {
            assert!(approx_eq(s[label], 30.0, 1e-12), "{label}: {}", s[label]);
        }
        assert_eq!(s["rage"], 0.0);
        assert_eq!(s.len(), 21);
    }

    #[test]
    fn scores_follow_custom_tint_weights() {
        let json = r##"{"colors": {
            "green":  {"sub_tints": {"light": {"hex": "#66ff66", "cmyk": [0.6, 0, 0.6, 0], "weight": 10},
                                      "medium": {"hex": "#00ff00", "cmyk": [1, 0, 1, 0], "weight": 10},
                                      "dark": {"hex": "#008000", "cmyk": [1, 0, 1, 0.5], "weight": 5}}},
            "yellow": {"sub_tints": {"light": {"hex": "#ffff66", "cmyk": [0, 0, 0.6, 0], "weight": 0},
                                      "medium": {"hex": "#ffff00", "cmyk": [0, 0, 1, 0], "weight": 0},
                                      "dark": {"hex": "#cccc00", "cmyk": [0, 0, 1, 0.2], "weight": 0}}},
            "blue":   {"sub_tints": {"light": {"hex": "#6666ff", "cmyk": [0.6, 0.6, 0, 0], "weight": 0},
                                      "medium": {"hex": "#0000ff", "cmyk": [1, 1, 0, 0], "weight": 0},
                                      "dark": {"hex": "#000080", "cmyk": [1, 1, 0, 0.5], "weight": 0}}},
            "purple": {"sub_tints": {"light": {"hex": "#cc66cc", "cmyk": [0, 0.5, 0, 0.2], "weight": 0},
                                      "medium": {"hex": "#800080", "cmyk": [0, 1, 0, 0.5], "weight": 0},
                                      "dark": {"hex": "#4d004d", "cmyk": [0, 1, 0, 0.7], "weight": 0}}},
            "pink":   {"sub_tints": {"light": {"hex": "#ffe6eb", "cmyk": [0, 0.1, 0.08, 0], "weight": 0},
                                      "medium": {"hex": "#ffbfcc", "cmyk": [0, 0.25, 0.2, 0], "weight": 0},
                                      "dark": {"hex": "#e6738a", "cmyk": [0, 0.5, 0.4, 0.1], "weight": 0}}},
            "red":    {"sub_tints": {"light": {"hex": "#ff6666", "cmyk": [0, 0.6, 0.6, 0], "weight": 0},
                                      "medium": {"hex": "#ff0000", "cmyk": [0, 1, 1, 0], "weight": 0},
                                      "dark": {"hex": "#800000", "cmyk": [0, 1, 1, 0.5], "weight": 0}}},
            "gray":   {"sub_tints": {"light": {"hex": "#bfbfbf", "cmyk": [0, 0, 0, 0.25], "weight": 0},
                                      "medium": {"hex": "#808080", "cmyk": [0, 0, 0, 0.5], "weight": 0},
                                      "dark": {"hex": "#404040", "cmyk": [0, 0, 0, 0.75], "weight": 0}}}
        }}"##;
        let table = ColorTable::from_json(json).unwrap();
        let w = ChannelWeights::zeroed().with(Channel::Green, 40.0);
        let s = emotional_scores(&w, &table).unwrap();
        assert!(approx_eq(s["joy"], 10.0, 1e-12), "{}", s["joy"]);
    }

    #[test]
    fn missing_channel_is_configuration_error() {
        let json = r##"{"colors": {"green": {"sub_tints": {
            "light": {"hex": "#66ff66", "cmyk": [0.6, 0, 0.6, 0], "weight": 20},
            "medium": {"hex": "#00ff00", "cmyk": [1, 0, 1, 0], "weight": 50},
            "dark": {"hex": "#008000", "cmyk": [1, 0, 1, 0.5], "weight": 30}
        }}}}"##;
        let table = ColorTable::from_json(json).unwrap();
        let err = emotional_scores(&ChannelWeights::zeroed(), &table).unwrap_err();
        assert!(matches!(err, Error::UnknownColor { ref name } if name == "yellow"), "{err}");
    }
}

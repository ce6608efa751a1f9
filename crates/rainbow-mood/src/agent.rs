//! The interpreter pipeline and the per-channel agents around it.
//!
//! ```text
//! context ─▶ KeywordClassifier ─▶ ChannelWeights ─┬─▶ emotional_scores ─────────┐
//!                                                  └─▶ calculate_rainbow_vector ─┤
//!                                                                                ▼
//!                                                     determine_strategy ─▶ Analysis
//!                                                                                │
//!             BalancedResponse ◀─ rank_emotions ◀─ AgentFeedback × 7 ◀───────────┘
//! ```
//!
//! Every agent sees the same analysis, so it is computed once per context
//! and then sliced per channel.

use std::collections::BTreeMap;

use rainbow_color::Cmyk;
use serde::Serialize;
use tracing::{debug, warn};

use crate::channel::{Channel, ChannelWeights, calculate_rainbow_vector};
use crate::classify::KeywordClassifier;
use crate::config::ColorTable;
use crate::emotion::{EmotionScores, emotional_scores, tint_weight_total};
use crate::error::Result;
use crate::strategy::{Decision, Strategy, determine_strategy};

/// How many emotions a balanced response ranks.
pub const TOP_EMOTIONS: usize = 3;

// ─── Interpreter ─────────────────────────────────────────────────────────────

/// Result of interpreting one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub context: String,
    pub weights: ChannelWeights,
    pub scores: EmotionScores,
    pub decision: Decision,
}

/// Text → weights → scores, rainbow vector and strategy.
#[derive(Debug, Clone)]
pub struct Interpreter {
    table: ColorTable,
    classifier: KeywordClassifier,
}

impl Interpreter {
    /// Interpreter over `table` with the default keyword lists.
    ///
    /// # Errors
    ///
    /// A configuration error if `table` lacks any channel or any of its
    /// `light`/`medium`/`dark` tints.
    pub fn new(table: ColorTable) -> Result<Self> {
        Self::with_classifier(table, KeywordClassifier::standard()?)
    }

    /// # Errors
    ///
    /// As [`Interpreter::new`].
    pub fn with_classifier(table: ColorTable, classifier: KeywordClassifier) -> Result<Self> {
        for channel in Channel::ALL {
            tint_weight_total(&table, channel)?;
        }
        Ok(Self { table, classifier })
    }

    /// Interpreter over the builtin table.
    ///
    /// # Errors
    ///
    /// Only if the builtin table is broken.
    pub fn builtin() -> Result<Self> {
        Self::new(ColorTable::builtin()?)
    }

    #[must_use]
    pub const fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Run the full pipeline on `context`.
    ///
    /// # Errors
    ///
    /// None once construction succeeded; the table was checked then.
    pub fn analyze(&self, context: &str) -> Result<Analysis> {
        let weights = self.classifier.weights(context);
        if weights.total() <= 0.0 {
            warn!(context, "no channel matched, falling back to black");
        }

        let scores = emotional_scores(&weights, &self.table)?;
        let rainbow = calculate_rainbow_vector(&weights);
        let decision = determine_strategy(&scores, rainbow.cmyk);

        Ok(Analysis {
            context: context.to_owned(),
            weights,
            scores,
            decision,
        })
    }
}

// ─── Agents ──────────────────────────────────────────────────────────────────

/// One channel's view of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentFeedback {
    pub channel: Channel,
    pub hex: &'static str,
    /// Scores of this channel's own labels only.
    pub emotion_scores: EmotionScores,
    /// Mean of `emotion_scores`, 0 if empty.
    pub confidence: f64,
    pub suggestion: &'static str,
}

impl AgentFeedback {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_analysis(channel: Channel, analysis: &Analysis) -> Self {
        let emotion_scores: EmotionScores = channel
            .emotions()
            .into_iter()
            .filter_map(|label| analysis.scores.get(label).map(|s| (label.to_owned(), *s)))
            .collect();
        let confidence = if emotion_scores.is_empty() {
            0.0
        } else {
            emotion_scores.values().sum::<f64>() / emotion_scores.len() as f64
        };

        Self {
            channel,
            hex: channel.hex(),
            emotion_scores,
            confidence,
            suggestion: channel.suggestion(),
        }
    }
}

/// An emotion and its aggregated score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEmotion {
    pub emotion: String,
    pub score: f64,
}

/// The orchestrator's final answer for one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancedResponse {
    pub context: String,
    pub rainbow_vector: String,
    pub cmyk: Cmyk,
    pub strategy: Strategy,
    pub fallback: bool,
    /// Highest confidence-weighted scores, best first.
    pub dominant_emotions: Vec<RankedEmotion>,
    pub agent_feedbacks: BTreeMap<Channel, AgentFeedback>,
}

/// Fans an analysis out to every channel agent and balances their feedback.
#[derive(Debug, Clone)]
pub struct AgentWhite {
    interpreter: Interpreter,
}

impl AgentWhite {
    #[must_use]
    pub const fn new(interpreter: Interpreter) -> Self {
        Self { interpreter }
    }

    /// # Errors
    ///
    /// Only if the builtin table is broken.
    pub fn builtin() -> Result<Self> {
        Interpreter::builtin().map(Self::new)
    }

    #[must_use]
    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Feedback from every channel agent.
    ///
    /// # Errors
    ///
    /// As [`Interpreter::analyze`].
    pub fn collect_feedback(&self, context: &str) -> Result<BTreeMap<Channel, AgentFeedback>> {
        let analysis = self.interpreter.analyze(context)?;
        Ok(feedbacks(&analysis))
    }

    /// Confidence-weighted consensus of all agents plus the analysis'
    /// rainbow vector and strategy.
    ///
    /// # Errors
    ///
    /// As [`Interpreter::analyze`].
    pub fn balanced_response(&self, context: &str) -> Result<BalancedResponse> {
        let analysis = self.interpreter.analyze(context)?;
        Ok(BalancedResponse::from_analysis(&analysis))
    }
}

impl BalancedResponse {
    /// Fan `analysis` out to every agent and balance the result.
    #[must_use]
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let agent_feedbacks = feedbacks(analysis);
        let dominant_emotions = rank_emotions(&agent_feedbacks);
        debug!(
            top = ?dominant_emotions.iter().map(|r| r.emotion.as_str()).collect::<Vec<_>>(),
            "balanced response"
        );

        let decision = &analysis.decision;
        Self {
            context: analysis.context.clone(),
            rainbow_vector: decision.rainbow_vector.clone(),
            cmyk: decision.cmyk,
            strategy: decision.strategy,
            fallback: decision.fallback,
            dominant_emotions,
            agent_feedbacks,
        }
    }
}

fn feedbacks(analysis: &Analysis) -> BTreeMap<Channel, AgentFeedback> {
    Channel::ALL
        .into_iter()
        .map(|c| (c, AgentFeedback::from_analysis(c, analysis)))
        .collect()
}

/// Weight each agent's scores by its share of total confidence (0 for all
/// when nobody is confident), then keep the [`TOP_EMOTIONS`] best. Ties
/// keep channel order, then label order within a channel.
#[must_use]
pub fn rank_emotions(feedbacks: &BTreeMap<Channel, AgentFeedback>) -> Vec<RankedEmotion> {
    let total: f64 = feedbacks.values().map(|f| f.confidence).sum();

    let mut ranked: Vec<RankedEmotion> = feedbacks
        .iter()
        .flat_map(|(channel, fb)| {
            let share = if total > 0.0 { fb.confidence / total } else { 0.0 };
            channel.emotions().into_iter().filter_map(move |label| {
                fb.emotion_scores.get(label).map(|s| RankedEmotion {
                    emotion: label.to_owned(),
                    score: s * share,
                })
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(TOP_EMOTIONS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn white() -> AgentWhite {
        AgentWhite::builtin().unwrap()
    }

    fn analyze(context: &str) -> Analysis {
        Interpreter::builtin().unwrap().analyze(context).unwrap()
    }

    fn top(response: &BalancedResponse) -> Vec<&str> {
        response.dominant_emotions.iter().map(|r| r.emotion.as_str()).collect()
    }

    // ── Interpreter ─────────────────────────────────────────────────

    #[test]
    fn happy_context() {
        let a = analyze("I am very happy with the result!");
        assert_eq!(a.weights.get(Channel::Green), 30.0);
        assert_eq!(a.decision.rainbow_vector, "#00ff00");
        assert_eq!(a.decision.cmyk, Cmyk::new(1.0, 0.0, 1.0, 0.0));
        // Y is high but so is C, and M is low: the cyan branch decides.
        assert_eq!(a.decision.strategy, Strategy::Empathic);
        assert!(!a.decision.fallback);
        assert_eq!(a.decision.dominant_emotion.as_deref(), Some("happy"));
    }

    #[test]
    fn angry_context_is_direct() {
        let a = analyze("I am full of rage about what happened.");
        assert_eq!(a.decision.rainbow_vector, "#ff0000");
        assert_eq!(a.decision.strategy, Strategy::Direct);
    }

    #[test]
    fn sad_context_is_cautious() {
        let a = analyze("I feel a bit sad today.");
        assert_eq!(a.decision.rainbow_vector, "#0000ff");
        assert_eq!(a.decision.strategy, Strategy::Cautious);
        assert!(!a.decision.fallback);
    }

    #[test]
    fn overwhelmed_context_is_neutral() {
        let a = analyze("I don't know what to do, I feel overwhelmed.");
        assert_eq!(a.decision.cmyk, Cmyk::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(a.decision.strategy, Strategy::Neutral);
        assert!(!a.decision.fallback);
    }

    #[test]
    fn unmatched_context_falls_back_to_black() {
        let a = analyze("The train leaves at nine.");
        assert_eq!(a.decision.rainbow_vector, "#000000");
        assert_eq!(a.decision.cmyk, Cmyk::BLACK);
        assert_eq!(a.decision.strategy, Strategy::Cautious);
        assert!(a.decision.fallback);
        assert_eq!(a.decision.dominant_emotion, None);
        assert!(a.scores.values().all(|s| *s == 0.0));
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let json = r##"{"colors": {"green": {"sub_tints": {
            "medium": {"hex": "#00ff00", "cmyk": [1, 0, 1, 0], "weight": 50}
        }}}}"##;
        let table = ColorTable::from_json(json).unwrap();
        let err = Interpreter::new(table).unwrap_err();
        assert!(matches!(err, Error::UnknownTint { ref tint, .. } if tint == "light"), "{err}");
        assert!(err.is_configuration());
    }

    // ── Feedback ────────────────────────────────────────────────────

    #[test]
    fn feedback_per_channel() {
        let fb = white().collect_feedback("so much joy").unwrap();
        assert_eq!(fb.len(), 7);

        let green = &fb[&Channel::Green];
        assert_eq!(green.hex, "#00ff00");
        assert_eq!(green.emotion_scores.len(), 3);
        assert!((green.confidence - 30.0).abs() < 1e-12, "{}", green.confidence);
        assert_eq!(green.suggestion, "Positive and supportive response");

        let red = &fb[&Channel::Red];
        assert_eq!(red.confidence, 0.0);
        assert!(red.emotion_scores.keys().all(|k| Channel::Red.emotions().contains(&k.as_str())));
    }

    // ── Balanced response ───────────────────────────────────────────

    #[test]
    fn balanced_single_channel() {
        let r = white().balanced_response("I am happy").unwrap();
        assert_eq!(top(&r), ["joy", "happy", "neutral"]);
        assert!((r.dominant_emotions[0].score - 30.0).abs() < 1e-9);
        assert_eq!(r.strategy, Strategy::Empathic);
        assert_eq!(r.rainbow_vector, "#00ff00");
        assert_eq!(r.context, "I am happy");
    }

    #[test]
    fn balanced_splits_by_confidence() {
        let r = white().balanced_response("angry but happy").unwrap();
        // Equal confidence: each agent's scores are halved; green ranks first.
        assert_eq!(top(&r), ["joy", "happy", "neutral"]);
        for ranked in &r.dominant_emotions {
            assert!((ranked.score - 15.0).abs() < 1e-9, "{ranked:?}");
        }
        assert_eq!(r.rainbow_vector, "#808000");
        assert_eq!(r.strategy, Strategy::Neutral);
    }

    #[test]
    fn balanced_without_confidence_scores_zero() {
        let r = white().balanced_response("nothing to see").unwrap();
        assert_eq!(r.dominant_emotions.len(), TOP_EMOTIONS);
        assert!(r.dominant_emotions.iter().all(|e| e.score == 0.0));
        assert!(r.fallback);
    }

    #[test]
    fn balanced_serializes() {
        let r = white().balanced_response("sad and hurt").unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["strategy"], "cautious");
        assert_eq!(json["rainbow_vector"], "#0000ff");
        assert_eq!(json["cmyk"], serde_json::json!([1.0, 1.0, 0.0, 0.0]));
        assert_eq!(json["agent_feedbacks"]["blue"]["hex"], "#0000ff");
        assert_eq!(json["dominant_emotions"][0]["emotion"], "confused");
    }
}

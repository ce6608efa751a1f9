//! # rainbow-mood — emotional text to a rainbow color and a strategy
//!
//! Maps free text onto seven color channels by keyword, spreads the channel
//! weights over emotion labels, blends the channel signatures into a single
//! CMYK "rainbow vector", and picks a response strategy from threshold rules
//! on that vector.
//!
//! # Architecture
//!
//! ```text
//! context text
//!     │
//!     ▼
//! classify.rs:  keyword regexes → ChannelSet → ChannelWeights
//!     │
//!     ▼
//! emotion.rs:   weights × tint weights (config.rs) → EmotionScores
//! channel.rs:   weights × channel signatures → RainbowVector (CMYK/hex)
//!     │
//!     ▼
//! strategy.rs:  CMYK thresholds → Decision
//!     │
//!     ▼
//! agent.rs:     Interpreter, per-channel AgentFeedback, BalancedResponse
//! ```
//!
//! All color math is delegated to `rainbow-color`. Nothing here holds
//! mutable state: a [`ColorTable`] is loaded once and everything else is a
//! function of its inputs.

pub mod agent;
pub mod channel;
pub mod classify;
pub mod config;
pub mod emotion;
pub mod error;
pub mod strategy;

pub use agent::{AgentFeedback, AgentWhite, Analysis, BalancedResponse, Interpreter, RankedEmotion};
pub use channel::{Channel, ChannelWeights, RainbowVector, calculate_rainbow_vector};
pub use classify::{ChannelSet, KeywordClassifier};
pub use config::{ColorTable, Tint};
pub use emotion::{EmotionScores, calculate_emotional_cmyk, emotion_palette, emotional_scores};
pub use error::{Error, Result};
pub use strategy::{Decision, Strategy, determine_strategy};

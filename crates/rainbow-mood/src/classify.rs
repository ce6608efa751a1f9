//! Keyword classifier: free text → channel weights.
//!
//! No language understanding at all. Each channel owns a short keyword list
//! and fires if any keyword occurs anywhere in the text, case-insensitively
//! (so "overwhelmed" matches `overwhelm`, and so does "overwhelming").
//! A firing channel gets a flat [`MATCH_WEIGHT`]; the rest get 0.

use regex::Regex;
use tracing::debug;

use crate::channel::{Channel, ChannelWeights};
use crate::error::Result;

/// Weight assigned to every matched channel.
pub const MATCH_WEIGHT: f64 = 30.0;

/// Default keyword lists.
pub const DEFAULT_KEYWORDS: [(Channel, &[&str]); 7] = [
    (Channel::Green, &["happy", "joy"]),
    (Channel::Red, &["angry", "rage"]),
    (Channel::Blue, &["sad", "hurt"]),
    (Channel::Purple, &["jealous"]),
    (Channel::Pink, &["guilt"]),
    (Channel::Yellow, &["disbelief"]),
    (Channel::Gray, &["overwhelm"]),
];

bitflags::bitflags! {
    /// Set of channels, one bit each in [`Channel::ALL`] order.
    ///
    /// ```
    /// use rainbow_mood::{Channel, ChannelSet};
    ///
    /// let set = ChannelSet::from(Channel::Red) | ChannelSet::GREEN;
    /// assert!(set.contains_channel(Channel::Green));
    /// assert_eq!(set.channels().collect::<Vec<_>>(), [Channel::Green, Channel::Red]);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ChannelSet: u8 {
        const GREEN  = 0b0000_0001;
        const YELLOW = 0b0000_0010;
        const BLUE   = 0b0000_0100;
        const PURPLE = 0b0000_1000;
        const PINK   = 0b0001_0000;
        const RED    = 0b0010_0000;
        const GRAY   = 0b0100_0000;
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Green => Self::GREEN,
            Channel::Yellow => Self::YELLOW,
            Channel::Blue => Self::BLUE,
            Channel::Purple => Self::PURPLE,
            Channel::Pink => Self::PINK,
            Channel::Red => Self::RED,
            Channel::Gray => Self::GRAY,
        }
    }
}

impl ChannelSet {
    #[must_use]
    pub fn contains_channel(self, channel: Channel) -> bool {
        self.contains(channel.into())
    }

    /// Member channels in canonical order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL
            .into_iter()
            .filter(move |c| self.contains_channel(*c))
    }
}

/// One compiled, case-insensitive alternation per channel.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<(Channel, Regex)>,
}

impl KeywordClassifier {
    /// Classifier over [`DEFAULT_KEYWORDS`].
    ///
    /// # Errors
    ///
    /// Never in practice; keywords are escaped before compiling.
    pub fn standard() -> Result<Self> {
        Self::new(DEFAULT_KEYWORDS.iter().map(|(c, words)| (*c, words.iter().copied())))
    }

    /// Build from `(channel, keywords)` pairs. A channel with no keywords
    /// never matches.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Pattern`] if the combined pattern fails to compile.
    pub fn new<'a, I, W>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Channel, W)>,
        W: IntoIterator<Item = &'a str>,
    {
        let mut rules = Vec::new();
        for (channel, words) in keywords {
            let alternation: Vec<String> = words.into_iter().map(regex::escape).collect();
            if alternation.is_empty() {
                continue;
            }
            let pattern = format!("(?i){}", alternation.join("|"));
            rules.push((channel, Regex::new(&pattern)?));
        }
        Ok(Self { rules })
    }

    /// Channels whose keywords occur in `text`.
    #[must_use]
    pub fn classify(&self, text: &str) -> ChannelSet {
        let set = self
            .rules
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .fold(ChannelSet::empty(), |set, (channel, _)| set | ChannelSet::from(*channel));
        debug!(matched = ?set, "classified context");
        set
    }

    /// Every channel, weighted [`MATCH_WEIGHT`] if matched and 0 otherwise.
    #[must_use]
    pub fn weights(&self, text: &str) -> ChannelWeights {
        let matched = self.classify(text);
        Channel::ALL
            .into_iter()
            .map(|c| {
                let w = if matched.contains_channel(c) { MATCH_WEIGHT } else { 0.0 };
                (c, w)
            })
            .collect()
    }
}

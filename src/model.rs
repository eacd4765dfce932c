//! Core data types for the finger chooser.
//! Everything here is plain data; behavior lives in `state`.

use serde::Deserialize;

/// Identifier the browser assigns to a touch for as long as it stays down.
pub type ContactId = i32;

pub const DEFAULT_PALETTE: [&str; 7] = [
    "#F44336", "#2196F3", "#FFEB3B", "#00E676", "#AB47BC", "#EC407A", "#FF9800",
];

/// One entry of a touch event's changed-touch list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: ContactId,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: ContactId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// A tracked finger. `H` is the renderer's marker handle, never inspected here.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact<H> {
    pub id: ContactId,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub marker: H,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoteState {
    /// Contacts may come and go; a stable set triggers a draw.
    #[default]
    Waiting,
    /// A survivor was drawn and stays highlighted until released.
    Voting,
}

/// What happens to fingers placed while a vote is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidVotePolicy {
    /// Register the contact (with a marker) but keep it out of the current vote.
    #[default]
    Admit,
    /// Ignore touch-begin entirely until the vote ends.
    Suppress,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChooserConfig {
    /// A draw needs strictly more contacts than this.
    pub vote_threshold: usize,
    /// Quiet period, in milliseconds, before a draw is attempted.
    pub stable_ms: u32,
    /// Marker ring size in CSS pixels.
    pub marker_size: f64,
    /// Painted under the survivor's marker while it is focused.
    pub background_color: String,
    pub palette: Vec<String>,
    pub mid_vote: MidVotePolicy,
    /// Fixed seed for reproducible draws; `None` uses the browser's RNG.
    pub seed: Option<u64>,
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self {
            vote_threshold: 1,
            stable_ms: 2000,
            marker_size: 96.0,
            background_color: "#000".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            mid_vote: MidVotePolicy::Admit,
            seed: None,
        }
    }
}

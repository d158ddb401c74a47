//! Shake-to-develop: a photo must be agitated before its image shows.
//!
//! While a developing photo is dragged, each applied move sample whose travel
//! exceeds the jitter threshold adds `travel / divisor` to its progress. Slow,
//! small moves add nothing, so an ordinary reposition does not finish
//! development by accident. Progress saturates at [`MAX_SHAKE_PROGRESS`] and
//! the shaken latch then stays set for the life of the photo.

use crate::config::WallConfig;
use serde::{Deserialize, Serialize};

/// Progress value at which a photo counts as shaken.
pub const MAX_SHAKE_PROGRESS: f64 = 100.0;

/// Development state of a photo.
///
/// Fields are private so the latch and clamp cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDevelopState")]
pub struct DevelopState {
    is_developing: bool,
    is_shaken: bool,
    shake_progress: f64,
}

/// Unchecked wire form, normalized on the way in.
#[derive(Deserialize)]
struct RawDevelopState {
    is_developing: bool,
    #[serde(default)]
    is_shaken: bool,
    #[serde(default)]
    shake_progress: f64,
}

impl From<RawDevelopState> for DevelopState {
    fn from(raw: RawDevelopState) -> Self {
        let shake_progress = if raw.shake_progress.is_finite() {
            raw.shake_progress.clamp(0.0, MAX_SHAKE_PROGRESS)
        } else {
            0.0
        };
        Self {
            is_developing: raw.is_developing,
            is_shaken: raw.is_shaken || shake_progress >= MAX_SHAKE_PROGRESS,
            shake_progress,
        }
    }
}

impl Default for DevelopState {
    fn default() -> Self {
        Self::developing()
    }
}

impl DevelopState {
    /// A freshly printed photo: developing, not shaken, no progress.
    pub fn developing() -> Self {
        Self {
            is_developing: true,
            is_shaken: false,
            shake_progress: 0.0,
        }
    }

    /// A photo that needs no development (e.g. restored from an old wall).
    pub fn developed() -> Self {
        Self {
            is_developing: false,
            is_shaken: false,
            shake_progress: 0.0,
        }
    }

    pub fn is_developing(&self) -> bool {
        self.is_developing
    }

    pub fn is_shaken(&self) -> bool {
        self.is_shaken
    }

    pub fn shake_progress(&self) -> f64 {
        self.shake_progress
    }

    /// Whether shaking still has an effect.
    pub fn accepts_shake(&self) -> bool {
        self.is_developing && !self.is_shaken
    }

    /// Whether the photo may be opened in the note editor.
    pub fn can_open(&self) -> bool {
        self.is_shaken || !self.is_developing
    }

    /// Clear the developing flag. Driven from outside the gesture engine.
    pub fn finish_developing(&mut self) {
        self.is_developing = false;
    }

    /// Add progress, saturating at the maximum. Returns true if this call
    /// flipped the shaken latch.
    fn advance(&mut self, amount: f64) -> bool {
        if !self.accepts_shake() || !(amount > 0.0) {
            return false;
        }
        self.shake_progress = (self.shake_progress + amount).min(MAX_SHAKE_PROGRESS);
        if self.shake_progress >= MAX_SHAKE_PROGRESS {
            self.is_shaken = true;
            return true;
        }
        false
    }
}

/// Result of feeding one move sample to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakeOutcome {
    /// The sample did not change the state.
    Ignored,
    /// Progress grew but the photo is not yet shaken.
    Progressed(f64),
    /// Progress hit the maximum on this sample.
    Shaken,
}

/// Thresholds for converting drag travel into progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeModel {
    /// Travel a single sample must exceed to count.
    pub jitter_threshold: f64,
    /// Travel is divided by this to get progress.
    pub divisor: f64,
}

impl Default for ShakeModel {
    fn default() -> Self {
        Self::from_config(&WallConfig::default())
    }
}

impl ShakeModel {
    pub fn from_config(config: &WallConfig) -> Self {
        Self {
            jitter_threshold: config.shake_jitter_threshold,
            divisor: config.shake_divisor,
        }
    }

    /// Feed the travel between two consecutive applied samples.
    pub fn agitate(&self, state: &mut DevelopState, displacement: f64) -> ShakeOutcome {
        if !state.accepts_shake() || !(displacement > self.jitter_threshold) {
            return ShakeOutcome::Ignored;
        }
        if state.advance(displacement / self.divisor) {
            ShakeOutcome::Shaken
        } else {
            ShakeOutcome::Progressed(state.shake_progress)
        }
    }
}

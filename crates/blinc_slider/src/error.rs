//! Slider error types

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the slider engine
///
/// Ordinary interaction never produces these: dropped moves, clamped indices
/// and bad option values all degrade silently. What remains are construction
/// mistakes, malformed config documents and a transition whose completion
/// signal never arrived.
#[derive(Debug, Error)]
pub enum SliderError {
    /// A slider was constructed without any slides
    #[error("slider requires at least one slide")]
    EmptySlides,

    /// The rendering surface never reported the end of a transition
    ///
    /// The slider stays locked after this; it cannot recover on its own.
    #[error("transition to slide {target} stalled: no completion signal after {elapsed:?}")]
    TransitionStalled {
        /// Slide the stalled transition was heading to
        target: usize,
        /// Time spent waiting since the transition started
        elapsed: Duration,
    },

    /// Config document was not valid TOML
    #[error("invalid slider config (toml): {0}")]
    Toml(#[from] toml::de::Error),

    /// Config document was not valid JSON
    #[error("invalid slider config (json): {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for slider operations
pub type Result<T> = std::result::Result<T, SliderError>;

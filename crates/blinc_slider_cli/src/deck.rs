//! Deck files
//!
//! A deck is a TOML file with an optional `[slider]` table holding slider
//! options and one `[[slides]]` entry per slide:
//!
//! ```toml
//! [slider]
//! autoplay = "on"
//! stoptime = 3000
//! start = "last"
//!
//! [[slides]]
//! title = "Welcome"
//! body = "Three slots, any number of slides."
//! ```

use anyhow::{Context, Result};
use blinc_slider::SliderConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A single slide
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// A slider config plus the slides to show
#[derive(Debug, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Parse a deck document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let deck: Deck = toml::from_str(source).context("Invalid deck")?;
        if deck.slides.is_empty() {
            anyhow::bail!("Deck has no slides. Add at least one [[slides]] entry.");
        }
        Ok(Self {
            slider: deck.slider.validated(),
            slides: deck.slides,
        })
    }

    /// Load a deck file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Index the slider will start on
    pub fn start_index(&self) -> usize {
        self.slider.start.resolve(self.slides.len())
    }
}

//! Slider configuration
//!
//! `SliderConfig` is supplied once at construction and never changes after.
//! It deserializes from TOML or JSON using the option names hosts already
//! know (`pagination`, `navigation`, `autoplay`, `movetime`, `stoptime`,
//! `start`). Switches accept `"on"`/`"off"` as well as booleans, and `start`
//! accepts an integer, `"last"`/`"end"`, or anything else (which means 0).
//!
//! ```ignore
//! let config = SliderConfig::from_toml_str(r#"
//!     autoplay = "off"
//!     pagination = "on"
//!     movetime = 300
//!     start = "last"
//! "#)?;
//! ```

use std::fmt;
use std::time::Duration;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::Result;
use crate::index::clamp_index;

/// Default transition duration in milliseconds
pub const DEFAULT_MOVE_TIME_MS: u64 = 500;

/// Default autoplay period in milliseconds
pub const DEFAULT_STOP_TIME_MS: u64 = 2000;

/// Default extra wait past `movetime` before a transition counts as stalled
pub const DEFAULT_STALL_GRACE_MS: u64 = 1000;

/// Where the slider starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartIndex {
    /// The first slide
    #[default]
    First,
    /// A specific index, clamped into range when resolved
    Index(i64),
    /// The last slide (`"last"` or `"end"`)
    Last,
}

impl StartIndex {
    /// Parse a textual start value
    ///
    /// `"last"` and `"end"` name the last slide. Otherwise a leading integer
    /// is read the way `parseInt` would (`"3"`, `"-1"`, `"2px"`); text with
    /// no leading digits falls back to the first slide.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "last" || raw == "end" {
            return Self::Last;
        }

        match leading_integer(raw) {
            Some(n) => Self::Index(n),
            None => {
                tracing::debug!("unrecognized start value {:?}, using first slide", raw);
                Self::First
            }
        }
    }

    /// Resolve to a concrete index for a slide list of `len` slides
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Self::First => 0,
            Self::Index(n) => clamp_index(n, len),
            Self::Last => len.saturating_sub(1),
        }
    }
}

impl From<i64> for StartIndex {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for StartIndex {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<usize> for StartIndex {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for StartIndex {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Digit runs too long for i64 are far out of range either way
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

struct StartIndexVisitor;

impl<'de> Visitor<'de> for StartIndexVisitor {
    type Value = StartIndex;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a slide index, \"last\" or \"end\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<StartIndex, E> {
        Ok(StartIndex::Index(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<StartIndex, E> {
        Ok(StartIndex::Index(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<StartIndex, E> {
        if v.is_finite() {
            Ok(StartIndex::Index(v.trunc() as i64))
        } else {
            Ok(StartIndex::First)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<StartIndex, E> {
        Ok(StartIndex::parse(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<StartIndex, E> {
        Ok(StartIndex::First)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<StartIndex, E> {
        Ok(StartIndex::First)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<StartIndex, E> {
        Ok(StartIndex::First)
    }
}

impl<'de> Deserialize<'de> for StartIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(StartIndexVisitor)
    }
}

struct SwitchVisitor;

impl<'de> Visitor<'de> for SwitchVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or \"on\"/\"off\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<bool, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<bool, E> {
        Ok(v != 0)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<bool, E> {
        Ok(v != 0)
    }

    // Only an explicit "on" enables; any other text is treated as off
    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<bool, E> {
        let v = v.trim();
        Ok(v.eq_ignore_ascii_case("on") || v.eq_ignore_ascii_case("true"))
    }
}

fn deserialize_switch<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<bool, D::Error> {
    deserializer.deserialize_any(SwitchVisitor)
}

/// Slider configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Initial slide
    pub start: StartIndex,
    /// Render one indicator per slide; activating one jumps to it
    #[serde(deserialize_with = "deserialize_switch")]
    pub pagination: bool,
    /// Render previous/next affordances
    #[serde(deserialize_with = "deserialize_switch")]
    pub navigation: bool,
    /// Advance automatically every `stop_time_ms`
    #[serde(deserialize_with = "deserialize_switch")]
    pub autoplay: bool,
    /// Arrow keys move the slider
    #[serde(deserialize_with = "deserialize_switch")]
    pub keyboard: bool,
    /// Transition duration; 0 disables animation entirely
    #[serde(rename = "movetime")]
    pub move_time_ms: u64,
    /// Autoplay period
    #[serde(rename = "stoptime")]
    pub stop_time_ms: u64,
    /// How long past `movetime` to wait for a completion signal before
    /// reporting a stall. `None` or 0 disables the watchdog.
    #[serde(rename = "stallgrace")]
    pub stall_grace_ms: Option<u64>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            start: StartIndex::First,
            pagination: false,
            navigation: true,
            autoplay: true,
            keyboard: true,
            move_time_ms: DEFAULT_MOVE_TIME_MS,
            stop_time_ms: DEFAULT_STOP_TIME_MS,
            stall_grace_ms: Some(DEFAULT_STALL_GRACE_MS),
        }
    }
}

impl SliderConfig {
    /// Create a config with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        Ok(config.validated())
    }

    /// Parse a JSON document
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        Ok(config.validated())
    }

    /// Replace option values the engine cannot use with defaults
    pub fn validated(mut self) -> Self {
        if self.stop_time_ms == 0 {
            tracing::warn!(
                "stoptime must be positive, using default of {}ms",
                DEFAULT_STOP_TIME_MS
            );
            self.stop_time_ms = DEFAULT_STOP_TIME_MS;
        }
        self
    }

    /// Set the initial slide
    pub fn start(mut self, start: impl Into<StartIndex>) -> Self {
        self.start = start.into();
        self
    }

    /// Enable or disable pagination indicators
    pub fn pagination(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }

    /// Enable or disable previous/next affordances
    pub fn navigation(mut self, enabled: bool) -> Self {
        self.navigation = enabled;
        self
    }

    /// Enable or disable autoplay
    pub fn autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = enabled;
        self
    }

    /// Enable or disable arrow-key handling
    pub fn keyboard(mut self, enabled: bool) -> Self {
        self.keyboard = enabled;
        self
    }

    /// Set the transition duration in milliseconds
    pub fn move_time_ms(mut self, ms: u64) -> Self {
        self.move_time_ms = ms;
        self
    }

    /// Set the autoplay period in milliseconds
    pub fn stop_time_ms(mut self, ms: u64) -> Self {
        self.stop_time_ms = ms;
        self
    }

    /// Set the stall grace period in milliseconds
    pub fn stall_grace_ms(mut self, ms: Option<u64>) -> Self {
        self.stall_grace_ms = ms;
        self
    }

    /// Whether transitions are animated
    pub fn animates(&self) -> bool {
        self.move_time_ms > 0
    }

    /// Transition duration
    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }

    /// Autoplay period
    pub fn stop_time(&self) -> Duration {
        Duration::from_millis(self.stop_time_ms)
    }

    /// Total time a transition may wait for its completion signal
    pub fn stall_timeout(&self) -> Option<Duration> {
        self.stall_grace_ms
            .filter(|&grace| grace > 0)
            .map(|grace| Duration::from_millis(self.move_time_ms.saturating_add(grace)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_plugin_defaults() {
        let config = SliderConfig::default();
        assert!(!config.pagination);
        assert!(config.navigation);
        assert!(config.autoplay);
        assert_eq!(config.move_time_ms, 500);
        assert_eq!(config.stop_time_ms, 2000);
        assert_eq!(config.start, StartIndex::First);
    }

    #[test]
    fn test_start_parse() {
        assert_eq!(StartIndex::parse("last"), StartIndex::Last);
        assert_eq!(StartIndex::parse("end"), StartIndex::Last);
        assert_eq!(StartIndex::parse("3"), StartIndex::Index(3));
        assert_eq!(StartIndex::parse(" 12 "), StartIndex::Index(12));
        assert_eq!(StartIndex::parse("-2"), StartIndex::Index(-2));
        assert_eq!(StartIndex::parse("2px"), StartIndex::Index(2));
        assert_eq!(StartIndex::parse("middle"), StartIndex::First);
        assert_eq!(StartIndex::parse(""), StartIndex::First);
    }

    #[test]
    fn test_start_resolve() {
        assert_eq!(StartIndex::Last.resolve(3), 2);
        assert_eq!(StartIndex::Index(10).resolve(4), 3);
        assert_eq!(StartIndex::Index(-1).resolve(4), 0);
        assert_eq!(StartIndex::First.resolve(4), 0);
    }

    #[test]
    fn test_toml_on_off_switches() {
        let config = SliderConfig::from_toml_str(
            r#"
            pagination = "on"
            navigation = "off"
            autoplay = false
            movetime = 0
            stoptime = 1500
            start = "end"
            "#,
        )
        .unwrap();

        assert!(config.pagination);
        assert!(!config.navigation);
        assert!(!config.autoplay);
        assert!(!config.animates());
        assert_eq!(config.stop_time(), Duration::from_millis(1500));
        assert_eq!(config.start, StartIndex::Last);
        // Unset keys keep their defaults
        assert!(config.keyboard);
    }

    #[test]
    fn test_json_mixed_start_values() {
        let numeric = SliderConfig::from_json_str(r#"{ "start": 2 }"#).unwrap();
        assert_eq!(numeric.start, StartIndex::Index(2));

        let float = SliderConfig::from_json_str(r#"{ "start": 2.7 }"#).unwrap();
        assert_eq!(float.start, StartIndex::Index(2));

        let other = SliderConfig::from_json_str(r#"{ "start": true }"#).unwrap();
        assert_eq!(other.start, StartIndex::First);

        let null = SliderConfig::from_json_str(r#"{ "start": null }"#).unwrap();
        assert_eq!(null.start, StartIndex::First);
    }

    #[test]
    fn test_unknown_switch_text_is_off() {
        let config = SliderConfig::from_json_str(r#"{ "autoplay": "sometimes" }"#).unwrap();
        assert!(!config.autoplay);
    }

    #[test]
    fn test_zero_stoptime_recovers() {
        let config = SliderConfig::from_toml_str("stoptime = 0").unwrap();
        assert_eq!(config.stop_time_ms, DEFAULT_STOP_TIME_MS);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(SliderConfig::from_toml_str("movetime = [").is_err());
        assert!(SliderConfig::from_json_str("{ movetime: }").is_err());
    }

    #[test]
    fn test_stall_timeout() {
        let config = SliderConfig::new().move_time_ms(300).stall_grace_ms(Some(700));
        assert_eq!(config.stall_timeout(), Some(Duration::from_millis(1000)));

        let disabled = config.clone().stall_grace_ms(Some(0));
        assert_eq!(disabled.stall_timeout(), None);

        let none = config.stall_grace_ms(None);
        assert_eq!(none.stall_timeout(), None);
    }

    #[test]
    fn test_stall_timeout_saturates() {
        let config =
            SliderConfig::from_json_str(r#"{ "movetime": 18446744073709551615 }"#).unwrap();
        assert_eq!(config.move_time_ms, u64::MAX);
        assert_eq!(
            config.stall_timeout(),
            Some(Duration::from_millis(u64::MAX))
        );
    }
}

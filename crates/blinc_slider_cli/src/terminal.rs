//! Terminal rendering surface
//!
//! Renders the Current slot as a framed text block. There is no real motion
//! in a terminal, so an armed animation simply "finishes" once the transition
//! duration has elapsed; the event loop collects it with
//! [`TerminalSurface::take_finished`] and forwards it to the slider.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use blinc_slider::{Controls, RenderSurface, Size, SlotId, SlotRole};

use crate::deck::Slide;

/// Rows used by the frame and title around a slide body
const CHROME_ROWS: usize = 4;

/// A [`RenderSurface`] that draws to a terminal
pub struct TerminalSurface {
    columns: u16,
    slots: [Option<Slide>; 3],
    roles: [SlotRole; 3],
    widths: [f32; 3],
    viewport_height: f32,
    duration: Duration,
    visible: bool,
    armed: Option<(SlotId, Instant)>,
}

impl TerminalSurface {
    pub fn new(columns: u16) -> Self {
        Self {
            columns: columns.max(20),
            slots: [None, None, None],
            roles: SlotRole::ALL,
            widths: [0.0; 3],
            viewport_height: 0.0,
            duration: Duration::ZERO,
            visible: false,
            armed: None,
        }
    }

    /// Change the terminal width
    pub fn set_columns(&mut self, columns: u16) {
        self.columns = columns.max(20);
    }

    /// When the armed animation will finish
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|(_, at)| at)
    }

    /// Take the armed slot if its animation has run its course
    pub fn take_finished(&mut self, now: Instant) -> Option<SlotId> {
        match self.armed {
            Some((slot, at)) if at <= now => {
                self.armed = None;
                Some(slot)
            }
            _ => None,
        }
    }

    fn current(&self) -> Option<&Slide> {
        let slot = SlotId::ALL
            .into_iter()
            .find(|slot| self.roles[slot.index()] == SlotRole::Current)?;
        self.slots[slot.index()].as_ref()
    }

    fn text_width(&self) -> usize {
        usize::from(self.columns).saturating_sub(4)
    }

    /// Draw the current slide, the controls and a status line
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        controls: &Controls,
        active: usize,
        len: usize,
    ) -> io::Result<()> {
        if !self.visible {
            return Ok(());
        }
        let inner = self.text_width();
        let rule = "─".repeat(inner + 2);

        writeln!(out, "┌{rule}┐")?;
        if let Some(slide) = self.current() {
            writeln!(out, "│ {:<inner$} │", truncate(&slide.title, inner))?;
            writeln!(out, "│ {:<inner$} │", "")?;
            for line in wrap(&slide.body, inner) {
                writeln!(out, "│ {line:<inner$} │")?;
            }
        }
        writeln!(out, "└{rule}┘")?;

        let mut footer = String::new();
        if controls.navigation {
            footer.push_str("‹ p ");
        }
        for indicator in &controls.indicators {
            footer.push_str(if indicator.active { "● " } else { "○ " });
        }
        if controls.navigation {
            footer.push_str("n ›");
        }
        if !footer.is_empty() {
            writeln!(out, "  {}", footer.trim_end())?;
        }

        let status = if self.armed.is_some() { " (moving)" } else { "" };
        writeln!(out, "  slide {}/{}{status}", active + 1, len)?;
        out.flush()
    }
}

impl RenderSurface for TerminalSurface {
    type Content = Slide;

    fn write_slot(&mut self, slot: SlotId, content: &Slide) {
        self.slots[slot.index()] = Some(content.clone());
    }

    fn set_role(&mut self, slot: SlotId, role: SlotRole) {
        self.roles[slot.index()] = role;
    }

    // Only the Current slot is ever drawn, and it is never hidden
    fn set_hidden(&mut self, _slot: SlotId, _hidden: bool) {}

    fn element_width(&self) -> f32 {
        f32::from(self.columns)
    }

    fn slot_size(&self, slot: SlotId) -> Size {
        let rows = self.slots[slot.index()]
            .as_ref()
            .map_or(0, |slide| wrap(&slide.body, self.text_width()).len() + CHROME_ROWS);
        Size::new(self.widths[slot.index()], rows as f32)
    }

    fn set_slot_width(&mut self, slot: SlotId, width: f32) {
        self.widths[slot.index()] = width;
    }

    fn set_viewport_height(&mut self, height: f32) {
        if height != self.viewport_height {
            tracing::trace!(rows = height, "viewport height");
        }
        self.viewport_height = height;
    }

    fn set_container_width(&mut self, _width: f32) {}

    fn set_transition_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn watch_animation(&mut self, slot: SlotId) {
        self.armed = Some((slot, Instant::now() + self.duration));
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Greedy word wrap; words longer than `width` are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }

            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use blinc_slider::{Slider, SliderConfig};

    fn slide(title: &str, body: &str) -> Slide {
        Slide {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn test_finish_after_duration() {
        let mut surface = TerminalSurface::new(40);
        surface.set_transition_duration(Duration::from_millis(300));
        surface.watch_animation(SlotId::ALL[1]);

        let deadline = surface.deadline().unwrap();
        assert_eq!(surface.take_finished(deadline - Duration::from_millis(1)), None);
        assert_eq!(surface.take_finished(deadline), Some(SlotId::ALL[1]));
        assert_eq!(surface.take_finished(deadline), None);
    }

    #[test]
    fn test_viewport_rows_follow_slide() {
        let slides = vec![slide("Short", "one line"), slide("Long", "a b c d e f g h")];
        let config = SliderConfig::new().autoplay(false).move_time_ms(0);
        let mut slider = Slider::new(TerminalSurface::new(20), slides, config).unwrap();
        slider.init();

        assert_eq!(slider.layout().unwrap().viewport_height, 5.0);
        slider.next();
        // 16 columns of text fit "a b c d e f g h" on one line
        assert_eq!(slider.layout().unwrap().viewport_height, 5.0);

        slider.surface_mut().set_columns(40);
        let layout = slider.on_resize().unwrap();
        assert_eq!(layout.slot_width, 40.0);
        assert_eq!(layout.container_width, 120.0);
    }

    #[test]
    fn test_render_current_slide() {
        let slides = vec![slide("First", "hello"), slide("Second", "world")];
        let config = SliderConfig::new()
            .autoplay(false)
            .move_time_ms(0)
            .pagination(true);
        let mut slider = Slider::new(TerminalSurface::new(30), slides, config).unwrap();
        slider.init();
        slider.next();

        let mut out = Vec::new();
        slider
            .surface()
            .render(&mut out, &slider.controls(), slider.active_index(), 2)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Second"));
        assert!(text.contains("world"));
        assert!(!text.contains("First"));
        assert!(text.contains("○ ●"));
        assert!(text.contains("slide 2/2"));
    }
}

//! Rendering surface contract
//!
//! The engine never touches a real widget tree. Everything visual goes
//! through [`RenderSurface`], which a platform adapter implements on top of
//! whatever it renders with (DOM nodes, Blinc layout nodes, a terminal).
//!
//! # Completion contract
//!
//! When a transition animates, the engine calls
//! [`RenderSurface::watch_animation`] with the slot whose motion marks the end
//! of the transition. The adapter must then call
//! [`Slider::animation_finished`](crate::Slider::animation_finished) with that
//! slot exactly once, when the motion ends. If it never does, the slider stays
//! locked and rejects every later move; the stall watchdog reports this
//! through [`Slider::tick`](crate::Slider::tick).

use std::time::Duration;

use crate::sizing::Size;
use crate::slots::{SlotId, SlotRole};

/// Target the slider renders into
pub trait RenderSurface {
    /// Slide payload type
    type Content;

    /// Replace a slot's content
    fn write_slot(&mut self, slot: SlotId, content: &Self::Content);

    /// Assign a role to a slot (positions it as previous, current or next)
    fn set_role(&mut self, slot: SlotId, role: SlotRole);

    /// Hide or show a slot
    fn set_hidden(&mut self, slot: SlotId, hidden: bool);

    /// Width of the element hosting the slider
    fn element_width(&self) -> f32;

    /// Rendered size of a slot's content
    fn slot_size(&self, slot: SlotId) -> Size;

    fn set_slot_width(&mut self, slot: SlotId, width: f32);

    fn set_viewport_height(&mut self, height: f32);

    fn set_container_width(&mut self, width: f32);

    /// Duration of slot motion and viewport height changes
    ///
    /// Only called when transitions animate.
    fn set_transition_duration(&mut self, _duration: Duration) {}

    /// Show or hide the whole widget
    fn set_visible(&mut self, _visible: bool) {}

    /// Arm the one-shot completion signal for a slot
    fn watch_animation(&mut self, _slot: SlotId) {}
}

/// A command issued to a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand<T> {
    Write { slot: SlotId, content: T },
    SetRole { slot: SlotId, role: SlotRole },
    SetHidden { slot: SlotId, hidden: bool },
    SetSlotWidth { slot: SlotId, width: f32 },
    SetViewportHeight(f32),
    SetContainerWidth(f32),
    SetTransitionDuration(Duration),
    SetVisible(bool),
    WatchAnimation(SlotId),
}

/// Headless surface that records every command and keeps the resulting state
///
/// Useful for tests and for hosts that render from a snapshot rather than
/// from individual commands.
pub struct RecordingSurface<T> {
    commands: Vec<SurfaceCommand<T>>,
    element_width: f32,
    contents: [Option<T>; 3],
    roles: [Option<SlotRole>; 3],
    hidden: [bool; 3],
    widths: [f32; 3],
    viewport_height: f32,
    container_width: f32,
    visible: bool,
    watched: Option<SlotId>,
    content_height: Box<dyn Fn(&T) -> f32 + Send>,
}

impl<T> RecordingSurface<T> {
    /// Create a surface hosted in an element `element_width` wide
    ///
    /// All content measures zero height until
    /// [`with_content_height`](Self::with_content_height) is used.
    pub fn new(element_width: f32) -> Self {
        Self {
            commands: Vec::new(),
            element_width,
            contents: [None, None, None],
            roles: [None; 3],
            hidden: [false; 3],
            widths: [0.0; 3],
            viewport_height: 0.0,
            container_width: 0.0,
            visible: false,
            watched: None,
            content_height: Box::new(|_| 0.0),
        }
    }

    /// Measure content heights with `f`
    pub fn with_content_height<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> f32 + Send + 'static,
    {
        self.content_height = Box::new(f);
        self
    }

    /// Change the host element width (as a window resize would)
    pub fn set_element_width(&mut self, width: f32) {
        self.element_width = width;
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[SurfaceCommand<T>] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand<T>> {
        std::mem::take(&mut self.commands)
    }

    /// Content last written to a slot
    pub fn content(&self, slot: SlotId) -> Option<&T> {
        self.contents[slot.index()].as_ref()
    }

    /// Content of the slot currently holding `role`
    pub fn content_for_role(&self, role: SlotRole) -> Option<&T> {
        let slot = SlotId::ALL
            .into_iter()
            .find(|slot| self.roles[slot.index()] == Some(role))?;
        self.content(slot)
    }

    /// Role last assigned to a slot
    pub fn role(&self, slot: SlotId) -> Option<SlotRole> {
        self.roles[slot.index()]
    }

    pub fn is_hidden(&self, slot: SlotId) -> bool {
        self.hidden[slot.index()]
    }

    pub fn slot_width(&self, slot: SlotId) -> f32 {
        self.widths[slot.index()]
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Slot armed by the last `watch_animation` call, if not yet taken
    pub fn watched(&self) -> Option<SlotId> {
        self.watched
    }

    /// Take the armed slot, as an adapter does when the motion ends
    pub fn take_watched(&mut self) -> Option<SlotId> {
        self.watched.take()
    }
}

impl<T: Clone> RenderSurface for RecordingSurface<T> {
    type Content = T;

    fn write_slot(&mut self, slot: SlotId, content: &T) {
        self.commands.push(SurfaceCommand::Write {
            slot,
            content: content.clone(),
        });
        self.contents[slot.index()] = Some(content.clone());
    }

    fn set_role(&mut self, slot: SlotId, role: SlotRole) {
        self.commands.push(SurfaceCommand::SetRole { slot, role });
        self.roles[slot.index()] = Some(role);
    }

    fn set_hidden(&mut self, slot: SlotId, hidden: bool) {
        self.commands.push(SurfaceCommand::SetHidden { slot, hidden });
        self.hidden[slot.index()] = hidden;
    }

    fn element_width(&self) -> f32 {
        self.element_width
    }

    fn slot_size(&self, slot: SlotId) -> Size {
        let height = self.contents[slot.index()]
            .as_ref()
            .map_or(0.0, |content| (self.content_height)(content));
        Size::new(self.widths[slot.index()], height)
    }

    fn set_slot_width(&mut self, slot: SlotId, width: f32) {
        self.commands.push(SurfaceCommand::SetSlotWidth { slot, width });
        self.widths[slot.index()] = width;
    }

    fn set_viewport_height(&mut self, height: f32) {
        self.commands.push(SurfaceCommand::SetViewportHeight(height));
        self.viewport_height = height;
    }

    fn set_container_width(&mut self, width: f32) {
        self.commands.push(SurfaceCommand::SetContainerWidth(width));
        self.container_width = width;
    }

    fn set_transition_duration(&mut self, duration: Duration) {
        self.commands
            .push(SurfaceCommand::SetTransitionDuration(duration));
    }

    fn set_visible(&mut self, visible: bool) {
        self.commands.push(SurfaceCommand::SetVisible(visible));
        self.visible = visible;
    }

    fn watch_animation(&mut self, slot: SlotId) {
        self.commands.push(SurfaceCommand::WatchAnimation(slot));
        self.watched = Some(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_tracks_state() {
        let mut surface =
            RecordingSurface::new(320.0).with_content_height(|s: &&str| s.len() as f32);
        let slot = SlotId::ALL[1];

        surface.write_slot(slot, &"hello");
        surface.set_role(slot, SlotRole::Current);
        surface.set_slot_width(slot, 320.0);

        assert_eq!(surface.content_for_role(SlotRole::Current), Some(&"hello"));
        assert_eq!(surface.slot_size(slot), Size::new(320.0, 5.0));
        assert_eq!(surface.commands().len(), 3);
    }

    #[test]
    fn test_take_commands_clears() {
        let mut surface = RecordingSurface::<u8>::new(100.0);
        surface.set_visible(true);

        assert_eq!(surface.take_commands(), vec![SurfaceCommand::SetVisible(true)]);
        assert!(surface.commands().is_empty());
        assert!(surface.is_visible());
    }

    #[test]
    fn test_watch_is_one_shot() {
        let mut surface = RecordingSurface::<u8>::new(100.0);
        let slot = SlotId::ALL[2];

        surface.watch_animation(slot);
        assert_eq!(surface.take_watched(), Some(slot));
        assert_eq!(surface.take_watched(), None);
    }
}

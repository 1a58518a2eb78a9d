//! Viewport and container sizing
//!
//! Every slot is as wide as the host element, the container holds all three
//! slots side by side, and the viewport is as tall as whatever the Current
//! slot shows. These are derived values; recomputing them twice is harmless.

use crate::slots::{SlotBuffer, SlotId, SlotRole};
use crate::surface::RenderSurface;

/// A 2D size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Dimensions applied by the last recompute
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Width given to each slot
    pub slot_width: f32,
    /// Height of the viewport (the Current slot's content height)
    pub viewport_height: f32,
    /// Width of the container holding all three slots
    pub container_width: f32,
}

/// Recomputes slot, viewport and container dimensions
#[derive(Debug, Default)]
pub struct SizingCoordinator {
    last: Option<Layout>,
}

impl SizingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout applied by the most recent [`recompute`](Self::recompute)
    pub fn layout(&self) -> Option<Layout> {
        self.last
    }

    /// Size the slots to the element, then the viewport and container to the
    /// slots
    pub fn recompute<S>(&mut self, slots: &SlotBuffer<S::Content>, surface: &mut S) -> Layout
    where
        S: RenderSurface,
    {
        let slot_width = surface.element_width();
        for slot in SlotId::ALL {
            surface.set_slot_width(slot, slot_width);
        }

        let current = slots.slot_for(SlotRole::Current);
        let viewport_height = surface.slot_size(current).height;
        surface.set_viewport_height(viewport_height);

        let container_width = SlotId::ALL
            .iter()
            .map(|&slot| surface.slot_size(slot).width)
            .sum();
        surface.set_container_width(container_width);

        let layout = Layout {
            slot_width,
            viewport_height,
            container_width,
        };
        if self.last != Some(layout) {
            tracing::trace!(?layout, "slider layout changed");
        }
        self.last = Some(layout);
        layout
    }
}

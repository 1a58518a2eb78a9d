//! Three-slot render buffer
//!
//! However many slides a slider holds, only three render slots exist. Each
//! physical slot carries a [`SlotRole`]; the roles form a permutation over the
//! slots which the transition controller rotates to express motion. Painting
//! writes the slide at offset −1, 0, +1 from the active index into whichever
//! slot currently holds the Previous, Current and Next role.

use smallvec::SmallVec;

use crate::error::{Result, SliderError};
use crate::index::{predecessor, successor, Direction};
use crate::surface::RenderSurface;

/// Role a render slot plays relative to the active slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Previous,
    Current,
    Next,
}

impl SlotRole {
    /// All roles in display order
    pub const ALL: [SlotRole; 3] = [SlotRole::Previous, SlotRole::Current, SlotRole::Next];

    /// Role name as used by stylesheet-driven surfaces
    pub fn as_str(self) -> &'static str {
        match self {
            SlotRole::Previous => "prev",
            SlotRole::Current => "curr",
            SlotRole::Next => "next",
        }
    }
}

/// One of the three physical render slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    /// All physical slots
    pub const ALL: [SlotId; 3] = [SlotId(0), SlotId(1), SlotId(2)];

    /// Position of this slot in `ALL`
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Slide indices shown by each role for some active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleIndices {
    pub previous: usize,
    pub current: usize,
    pub next: usize,
}

impl RoleIndices {
    /// Indices around `active` in a ring of `len` slides
    pub fn around(active: usize, len: usize) -> Self {
        Self {
            previous: predecessor(active, len),
            current: active,
            next: successor(active, len),
        }
    }

    /// Slide index for a role
    pub fn for_role(&self, role: SlotRole) -> usize {
        match role {
            SlotRole::Previous => self.previous,
            SlotRole::Current => self.current,
            SlotRole::Next => self.next,
        }
    }
}

/// The slide list plus the role and visibility of each render slot
#[derive(Debug, Clone)]
pub struct SlotBuffer<T> {
    slides: Vec<T>,
    /// Role of each physical slot, indexed by `SlotId::index()`
    roles: [SlotRole; 3],
    hidden: [bool; 3],
}

impl<T> SlotBuffer<T> {
    /// Create a buffer over a non-empty slide list
    pub fn new(slides: Vec<T>) -> Result<Self> {
        if slides.is_empty() {
            return Err(SliderError::EmptySlides);
        }
        Ok(Self {
            slides,
            roles: SlotRole::ALL,
            hidden: [false; 3],
        })
    }

    /// Number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; a buffer cannot be built without slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// All slides in order
    pub fn slides(&self) -> &[T] {
        &self.slides
    }

    /// Slide at `index`
    pub fn slide(&self, index: usize) -> Option<&T> {
        self.slides.get(index)
    }

    /// Role currently held by a slot
    pub fn role_of(&self, slot: SlotId) -> SlotRole {
        self.roles[slot.index()]
    }

    /// Slot currently holding a role
    pub fn slot_for(&self, role: SlotRole) -> SlotId {
        SlotId::ALL
            .into_iter()
            .find(|slot| self.roles[slot.index()] == role)
            .unwrap_or(SlotId(1))
    }

    /// Whether a slot is hidden for the current transition
    pub fn is_hidden(&self, slot: SlotId) -> bool {
        self.hidden[slot.index()]
    }

    /// Push every slot's role and visibility to the surface
    pub fn apply_roles<S>(&self, surface: &mut S)
    where
        S: RenderSurface<Content = T>,
    {
        for slot in SlotId::ALL {
            surface.set_role(slot, self.role_of(slot));
            surface.set_hidden(slot, self.is_hidden(slot));
        }
    }

    /// Write the slides around `active` into the three slots
    ///
    /// Content is overwritten unconditionally.
    pub fn paint<S>(&self, active: usize, surface: &mut S)
    where
        S: RenderSurface<Content = T>,
    {
        let indices = RoleIndices::around(active, self.len());
        for slot in SlotId::ALL {
            let index = indices.for_role(self.role_of(slot));
            surface.write_slot(slot, &self.slides[index]);
        }
    }

    /// Reassign roles to express motion in `direction`
    ///
    /// Forward: the outgoing Previous wraps around to Next and is hidden so it
    /// doesn't sweep across the viewport, Current becomes Previous and Next
    /// becomes Current. Backward is the mirror image. Unspecified leaves the
    /// roles alone. Returns the slot that held Current before the rotation.
    pub fn rotate<S>(&mut self, direction: Direction, surface: &mut S) -> SlotId
    where
        S: RenderSurface<Content = T>,
    {
        let prev = self.slot_for(SlotRole::Previous);
        let curr = self.slot_for(SlotRole::Current);
        let next = self.slot_for(SlotRole::Next);

        let (wrapped, assignments) = match direction {
            Direction::Forward => (
                prev,
                [
                    (prev, SlotRole::Next),
                    (curr, SlotRole::Previous),
                    (next, SlotRole::Current),
                ],
            ),
            Direction::Backward => (
                next,
                [
                    (prev, SlotRole::Current),
                    (curr, SlotRole::Next),
                    (next, SlotRole::Previous),
                ],
            ),
            Direction::Unspecified => return curr,
        };

        self.hidden[wrapped.index()] = true;
        surface.set_hidden(wrapped, true);

        for (slot, role) in assignments {
            self.roles[slot.index()] = role;
            surface.set_role(slot, role);
        }

        curr
    }

    /// Show every slot hidden by a rotation
    pub fn reveal<S>(&mut self, surface: &mut S) -> SmallVec<[SlotId; 3]>
    where
        S: RenderSurface<Content = T>,
    {
        let mut revealed = SmallVec::new();
        for slot in SlotId::ALL {
            if self.hidden[slot.index()] {
                self.hidden[slot.index()] = false;
                surface.set_hidden(slot, false);
                revealed.push(slot);
            }
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn buffer(len: usize) -> SlotBuffer<usize> {
        SlotBuffer::new((0..len).collect()).unwrap()
    }

    #[test]
    fn test_empty_slides_rejected() {
        assert!(matches!(
            SlotBuffer::<u8>::new(Vec::new()),
            Err(SliderError::EmptySlides)
        ));
    }

    #[test]
    fn test_paint_places_neighbours() {
        let slots = buffer(5);
        let mut surface = RecordingSurface::new(400.0);
        slots.apply_roles(&mut surface);

        for k in 0..5 {
            slots.paint(k, &mut surface);
            assert_eq!(surface.content_for_role(SlotRole::Current), Some(&k));
            assert_eq!(
                surface.content_for_role(SlotRole::Previous),
                Some(&predecessor(k, 5))
            );
            assert_eq!(
                surface.content_for_role(SlotRole::Next),
                Some(&successor(k, 5))
            );
        }
    }

    #[test]
    fn test_paint_single_slide() {
        let slots = buffer(1);
        let mut surface = RecordingSurface::new(400.0);
        slots.paint(0, &mut surface);

        for slot in SlotId::ALL {
            assert_eq!(surface.content(slot), Some(&0));
        }
    }

    #[test]
    fn test_forward_rotation() {
        let mut slots = buffer(3);
        let mut surface = RecordingSurface::new(400.0);
        let before_prev = slots.slot_for(SlotRole::Previous);
        let before_curr = slots.slot_for(SlotRole::Current);
        let before_next = slots.slot_for(SlotRole::Next);

        let outgoing = slots.rotate(Direction::Forward, &mut surface);

        assert_eq!(outgoing, before_curr);
        assert_eq!(slots.role_of(before_prev), SlotRole::Next);
        assert_eq!(slots.role_of(before_curr), SlotRole::Previous);
        assert_eq!(slots.role_of(before_next), SlotRole::Current);
        assert!(slots.is_hidden(before_prev));
        assert!(!slots.is_hidden(before_curr));
    }

    #[test]
    fn test_backward_rotation() {
        let mut slots = buffer(3);
        let mut surface = RecordingSurface::new(400.0);
        let before_prev = slots.slot_for(SlotRole::Previous);
        let before_curr = slots.slot_for(SlotRole::Current);
        let before_next = slots.slot_for(SlotRole::Next);

        slots.rotate(Direction::Backward, &mut surface);

        assert_eq!(slots.role_of(before_prev), SlotRole::Current);
        assert_eq!(slots.role_of(before_curr), SlotRole::Next);
        assert_eq!(slots.role_of(before_next), SlotRole::Previous);
        assert!(slots.is_hidden(before_next));
    }

    #[test]
    fn test_unspecified_rotation_keeps_roles() {
        let mut slots = buffer(3);
        let mut surface = RecordingSurface::new(400.0);
        let curr = slots.slot_for(SlotRole::Current);

        assert_eq!(slots.rotate(Direction::Unspecified, &mut surface), curr);
        assert_eq!(slots.roles, SlotRole::ALL);
        assert!(SlotId::ALL.iter().all(|&s| !slots.is_hidden(s)));
    }

    #[test]
    fn test_roles_stay_a_permutation() {
        let mut slots = buffer(4);
        let mut surface = RecordingSurface::new(400.0);
        let moves = [
            Direction::Forward,
            Direction::Forward,
            Direction::Backward,
            Direction::Forward,
            Direction::Backward,
            Direction::Backward,
        ];

        for direction in moves {
            slots.rotate(direction, &mut surface);
            slots.reveal(&mut surface);
            for role in SlotRole::ALL {
                let holders = SlotId::ALL
                    .iter()
                    .filter(|&&s| slots.role_of(s) == role)
                    .count();
                assert_eq!(holders, 1, "role {:?} held by {} slots", role, holders);
            }
        }
    }

    #[test]
    fn test_reveal_returns_hidden_slots() {
        let mut slots = buffer(3);
        let mut surface = RecordingSurface::new(400.0);
        let wrapped = slots.slot_for(SlotRole::Previous);

        slots.rotate(Direction::Forward, &mut surface);
        let revealed = slots.reveal(&mut surface);

        assert_eq!(revealed.as_slice(), &[wrapped]);
        assert!(!slots.is_hidden(wrapped));
        assert!(slots.reveal(&mut surface).is_empty());
    }
}
